use super::super::{
    cursor::{latin1, Cursor, Opaque, Raw},
    error::Result,
};
use super::types::{BlockType, Filesystem};
use serde::Serialize;
use tracing::{debug, trace};

/// A known PI service: wire name, description and the ordered names of its
/// string parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiServiceDef {
    pub name: &'static str,
    pub description: &'static str,
    pub params: PiParamShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiParamShape {
    /// Block count, unknown byte, then 8-byte block references
    BlockList,
    /// One opaque ASCII argument string
    Argument,
    /// Length-prefixed ASCII strings in this order
    Strings(&'static [&'static str]),
}

use PiParamShape::{Argument, BlockList, Strings};

const ADDR: &[&str] = &["addressident"];
const ADDR_FILE: &[&str] = &["addressident", "filename"];

static PI_SERVICES: &[PiServiceDef] = &[
    def("_INSE", "Activates a PLC module", BlockList),
    def("_DELE", "Removes module from the PLC's passive file system", BlockList),
    def("P_PROGRAM", "PLC Start / Stop", Argument),
    def("_MODU", "PLC Copy Ram to Rom", Argument),
    def("_GARB", "Compress PLC memory", Argument),
    def("_N_LOGIN_", "Login", Strings(&["addressident", "password"])),
    def("_N_LOGOUT", "Logout", Strings(ADDR)),
    def("_N_CANCEL", "Cancels NC alarm", Strings(ADDR)),
    def("_N_DASAVE", "Copies data from SRAM to FLASH", Strings(ADDR)),
    def("_N_DIGIOF", "Turns off digitizing", Strings(ADDR)),
    def("_N_DIGION", "Turns on digitizing", Strings(ADDR)),
    def("_N_DZERO_", "Set all D nos. invalid for function \"unique D no.\"", Strings(ADDR)),
    def("_N_ENDEXT", "External program end", Strings(ADDR)),
    def("_N_OST_OF", "Overstore OFF", Strings(ADDR)),
    def("_N_OST_ON", "Overstore ON", Strings(ADDR)),
    def("_N_SCALE_", "Unit of measurement setting (metric<->INCH)", Strings(ADDR)),
    def("_N_SETUFR", "Activates user frame", Strings(ADDR)),
    def("_N_STRTLK", "The global start disable is set", Strings(ADDR)),
    def("_N_STRTUL", "The global start disable is reset", Strings(ADDR)),
    def("_N_TMRASS", "Resets the Active status", Strings(ADDR)),
    def("_N_F_DELE", "Deletes file", Strings(ADDR_FILE)),
    def("_N_EXTERN", "Selects external program for execution", Strings(ADDR_FILE)),
    def("_N_EXTMOD", "Selects external program for execution", Strings(ADDR_FILE)),
    def("_N_F_DELR", "Delete file even without access rights", Strings(ADDR_FILE)),
    def("_N_F_XFER", "Selects file for uploading", Strings(ADDR_FILE)),
    def("_N_LOCKE_", "Locks the active file for editing", Strings(ADDR_FILE)),
    def("_N_SELECT", "Selects program for execution", Strings(ADDR_FILE)),
    def("_N_SRTEXT", "A file is being marked in /_N_EXT_DIR", Strings(ADDR_FILE)),
    def("_N_F_PROR", "Unknown function", Strings(ADDR_FILE)),
    def("_N_F_CLOS", "Closes file", Strings(&["addressident", "editwindowname"])),
    def(
        "_N_F_OPEN",
        "Opens file",
        Strings(&["addressident", "filename", "editwindowname"]),
    ),
    def(
        "_N_F_OPER",
        "Opens a file read-only",
        Strings(&["addressident", "filename", "editwindowname"]),
    ),
    def(
        "_N_F_SEEK",
        "Position the file search pointer",
        Strings(&[
            "addressident",
            "editwindowname",
            "seekpointer",
            "windowsize",
            "comparestring",
            "skipcount",
        ]),
    ),
    def(
        "_N_ASUP__",
        "Assigns interrupt",
        Strings(&[
            "addressident",
            "interruptnr",
            "priority",
            "liftfast",
            "blsync",
            "filename",
        ]),
    ),
    def(
        "_N_CHEKDM",
        "Start uniqueness check on D numbers",
        Strings(&["addressident", "magnr", "dnr"]),
    ),
    def(
        "_N_CHKDNO",
        "Check whether the tools have unique D numbers",
        Strings(&["addressident", "wznr", "wznr", "dnr"]),
    ),
    def("_N_CONFIG", "Reconfigures machine data", Strings(&["addressident", "class"])),
    def(
        "_N_CRCEDN",
        "Creates a cutting edge by specifying an edge no.",
        Strings(&["addressident", "tnr", "dnr"]),
    ),
    def("_N_DELECE", "Deletes a cutting edge", Strings(&["addressident", "tnr", "dnr"])),
    def("_N_CREACE", "Creates a cutting edge", Strings(&["addressident", "toolnumber"])),
    def("_N_CREATO", "Creates a tool", Strings(&["addressident", "toolnumber"])),
    def("_N_DELETO", "Deletes tool", Strings(&["addressident", "toolnumber"])),
    def(
        "_N_CRTOCE",
        "Generate tool with specified edge number",
        Strings(&["addressident", "toolnumber", "cenumber"]),
    ),
    def(
        "_N_DELVAR",
        "Delete data block",
        Strings(&[
            "addressident",
            "datablocknumber",
            "firstcolumnnumber",
            "lastcolumnnumber",
            "firstrownumber",
            "lastrownumber",
        ]),
    ),
    def(
        "_N_F_COPY",
        "Copies file within the NCK",
        Strings(&[
            "addressident",
            "direction",
            "sourcefilename",
            "destinationfilename",
        ]),
    ),
    def("_N_F_DMDA", "Deletes MDA memory", Strings(&["addressident", "channelnumber"])),
    def(
        "_N_F_PROT",
        "Assigns a protection level to a file",
        Strings(&["addressident", "filename", "protection"]),
    ),
    def(
        "_N_F_RENA",
        "Renames file",
        Strings(&["addressident", "oldfilename", "newfilename"]),
    ),
    def("_N_FINDBL", "Activates search", Strings(&["addressident", "findmode"])),
    def("_N_IBN_SS", "Sets the set-up switch", Strings(&["addressident", "switch"])),
    def(
        "_N_MMCSEM",
        "MMC-Semaphore",
        Strings(&["addressident", "functionnumber", "semaphorvalue"]),
    ),
    def(
        "_N_NCKMOD",
        "The mode in which the NCK will work is being set",
        Strings(&["addressident", "onoff"]),
    ),
    def("_N_NEWPWD", "New password", Strings(&["addressident", "password"])),
    def("_N_SEL_BL", "Selects a new block", Strings(&["addressident", "linenumber"])),
    def(
        "_N_SETTST",
        "Activate tools for replacement tool group",
        Strings(&["addressident", "magnr", "weargroup", "toolstatus", "wearsearchstrat"]),
    ),
    def(
        "_N_TMAWCO",
        "Set the active wear group in one magazine",
        Strings(&["addressident", "magnr", "weargroup", "wearsearchstrat"]),
    ),
    def(
        "_N_TMCRTC",
        "Create tool with specified edge number",
        Strings(&["addressident", "toolid", "toolnumber", "duplonumber", "edgenumber"]),
    ),
    def(
        "_N_TMCRTO",
        "Creates tool in the tool management",
        Strings(&["addressident", "toolid", "toolnumber", "duplonumber"]),
    ),
    def(
        "_N_TMFDPL",
        "Searches an empty place for loading",
        Strings(&[
            "addressident",
            "toolnumber",
            "placenr",
            "magnr",
            "placerefnr",
            "magrefnr",
        ]),
    ),
    def(
        "_N_TMFPBP",
        "Searches for empty location",
        Strings(&[
            "addressident",
            "magnrfrom",
            "placenrfrom",
            "magnrto",
            "placenrto",
            "magrefnr",
            "placerefnr",
            "halfplacesleft",
            "halfplacesright",
            "halfplacesup",
            "halfplacesdown",
            "placetype",
            "searchdirection",
            "kindofsearch",
        ]),
    ),
    def(
        "_N_TMGETT",
        "Determines T-number for specific toolID with Duplono",
        Strings(&["addressident", "toolid", "duplonumber"]),
    ),
    def(
        "_N_TMMVTL",
        "Loads or unloads a tool",
        Strings(&[
            "addressident",
            "toolnumber",
            "placenrsource",
            "magnrsource",
            "placenrdestination",
            "magnrdestination",
        ]),
    ),
    def(
        "_N_TMPCIT",
        "Sets increment value of the piece counter",
        Strings(&["addressident", "spindlenumber", "incrementnumber"]),
    ),
    def(
        "_N_TMPOSM",
        "Positions a magazine location or tool",
        Strings(&[
            "addressident",
            "toolnumber",
            "toolid",
            "duplonumber",
            "placenrsource",
            "magnrsource",
            "placenrdestination",
            "magnrdestination",
        ]),
    ),
    def(
        "_N_TRESMO",
        "Reset monitoring values",
        Strings(&["addressident", "toolnumber", "dnr", "monitoringmode"]),
    ),
    def(
        "_N_TSEARC",
        "Complex search via search screenforms",
        Strings(&[
            "addressident",
            "magnrfrom",
            "placenrfrom",
            "magnrto",
            "placenrto",
            "magrefnr",
            "placerefnr",
            "searchdirection",
            "kindofsearch",
        ]),
    ),
];

const fn def(name: &'static str, description: &'static str, params: PiParamShape) -> PiServiceDef {
    PiServiceDef {
        name,
        description,
        params,
    }
}

/// Look up a PI service by its wire name.
pub fn pi_service(name: &str) -> Option<&'static PiServiceDef> {
    PI_SERVICES.iter().find(|d| d.name == name)
}

/// 8-byte block reference of `_INSE`/`_DELE`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockRef {
    pub block_type: BlockType,
    pub block_number: String,
    pub filesystem: Filesystem,
}

impl BlockRef {
    pub const LEN: usize = 8;

    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let b: [u8; 8] = cur.read_array()?;
        Ok(Self {
            block_type: BlockType::from(u16::from_be_bytes([b[0], b[1]])),
            block_number: latin1(&b[2..7]),
            filesystem: Filesystem::from(b[7]),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PiParameter {
    pub name: &'static str,
    pub value: String,
}

/// Decoded PI parameter block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PiParameters {
    Blocks {
        count: u8,
        unknown: u8,
        blocks: Vec<Result<BlockRef>>,
    },
    Argument(String),
    Strings {
        values: Vec<PiParameter>,
        #[serde(skip_serializing_if = "Option::is_none")]
        rest: Option<Opaque>,
    },
    /// Block of a service without a table entry
    Unknown(Raw),
}

impl PiParameters {
    fn decode(shape: PiParamShape, cur: &mut Cursor<'_>) -> Self {
        match shape {
            BlockList => match (cur.read_u8(), cur.read_u8()) {
                (Ok(count), Ok(unknown)) => {
                    let blocks = cur.collect(count as usize, |c, _| BlockRef::decode(c));
                    PiParameters::Blocks {
                        count,
                        unknown,
                        blocks,
                    }
                }
                _ => PiParameters::Unknown(cur.raw_rest()),
            },
            Argument => PiParameters::Argument(latin1(cur.rest())),
            Strings(names) => {
                let mut values = Vec::with_capacity(names.len());
                let mut rest = None;
                for &name in names {
                    match cur.read_prefixed_ascii() {
                        Ok(value) => values.push(PiParameter { name, value }),
                        Err(e) => {
                            rest = Some(cur.remainder(e));
                            break;
                        }
                    }
                }
                if rest.is_none() {
                    rest = cur.surplus();
                }
                PiParameters::Strings { values, rest }
            }
        }
    }
}

/// PI-Service job parameters.
///
/// Fields after a cut stay `None`; `rest` holds what was not reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PiService {
    pub unknown: Option<Raw>,
    pub param_block_len: Option<u16>,
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub parameters: Option<PiParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<Opaque>,
}

impl PiService {
    pub const UNKNOWN_LEN: usize = 7;

    /// Decode from a cursor positioned after the function byte.
    pub fn decode(cur: &mut Cursor<'_>) -> Self {
        let mut out = Self {
            unknown: None,
            param_block_len: None,
            service: None,
            description: None,
            parameters: None,
            rest: None,
        };
        if let Err(e) = out.fill(cur) {
            debug!(error = %e, "PI service parameters cut short");
            out.rest = Some(cur.remainder(e));
        }
        out
    }

    fn fill(&mut self, cur: &mut Cursor<'_>) -> Result<()> {
        self.unknown = Some(cur.raw(Self::UNKNOWN_LEN)?);
        let param_block_len = cur.read_u16()?;
        self.param_block_len = Some(param_block_len);
        let mut block = cur.sub(param_block_len as usize)?;
        let service = match cur.read_prefixed_ascii() {
            Ok(service) => service,
            Err(e) => {
                // The service name selects the layout; keep the block as-is.
                self.parameters = Some(PiParameters::Unknown(block.raw_rest()));
                return Err(e);
            }
        };
        let def = pi_service(&service);
        self.parameters = Some(match def {
            Some(def) => PiParameters::decode(def.params, &mut block),
            None => {
                trace!(service = %service, "PI service not in table");
                PiParameters::Unknown(block.raw_rest())
            }
        });
        self.description = def.map(|d| d.description);
        self.service = Some(service);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pi_job(block: &[u8], name: &str) -> Vec<u8> {
        let mut v = vec![0x00; 7];
        v.extend_from_slice(&(block.len() as u16).to_be_bytes());
        v.extend_from_slice(block);
        v.push(name.len() as u8);
        v.extend_from_slice(name.as_bytes());
        v
    }

    #[test]
    fn test_table_size_and_lookup() {
        let sinumerik = PI_SERVICES.iter().filter(|d| d.name.starts_with("_N_")).count();
        assert!(sinumerik >= 55);
        assert_eq!(pi_service("_N_F_DELE").unwrap().description, "Deletes file");
        assert!(pi_service("_N_NOPE__").is_none());
    }

    #[test]
    fn test_program_argument() {
        let buf = pi_job(b"C", "P_PROGRAM");
        let pi = PiService::decode(&mut Cursor::new(&buf));
        assert_eq!(pi.service.as_deref(), Some("P_PROGRAM"));
        assert_eq!(pi.parameters, Some(PiParameters::Argument("C".into())));
        assert_eq!(pi.rest, None);
    }

    #[test]
    fn test_insert_block_list() {
        let mut block = vec![0x02, 0x00];
        block.extend_from_slice(b"0B00001P0800010P");
        let buf = pi_job(&block, "_INSE");
        let mut cur = Cursor::new(&buf);
        let pi = PiService::decode(&mut cur);
        assert!(cur.is_empty());
        let Some(PiParameters::Blocks { count, blocks, .. }) = pi.parameters else {
            panic!("expected block list")
        };
        assert_eq!(count, 2);
        let b1 = blocks[1].as_ref().unwrap();
        assert_eq!(b1.block_type, BlockType::Ob);
        assert_eq!(b1.block_number, "00010");
        assert_eq!(b1.filesystem, Filesystem::Passive);
    }

    #[test]
    fn test_sinumerik_string_parameters() {
        let mut block = vec![0x03];
        block.extend_from_slice(b"201");
        block.push(0x0C);
        block.extend_from_slice(b"/_N_MPF_DIR/");
        let buf = pi_job(&block, "_N_F_DELE");
        let pi = PiService::decode(&mut Cursor::new(&buf));
        let Some(PiParameters::Strings { values, rest }) = pi.parameters else {
            panic!("expected strings")
        };
        assert_eq!(rest, None);
        assert_eq!(values[0].name, "addressident");
        assert_eq!(values[0].value, "201");
        assert_eq!(values[1].name, "filename");
        assert_eq!(values[1].value, "/_N_MPF_DIR/");
    }

    #[test]
    fn test_unknown_service_keeps_block() {
        let buf = pi_job(&[1, 2, 3], "_X_");
        let pi = PiService::decode(&mut Cursor::new(&buf));
        assert_eq!(pi.description, None);
        assert_eq!(
            pi.parameters,
            Some(PiParameters::Unknown(Raw::from(&[1u8, 2, 3][..])))
        );
    }

    #[test]
    fn test_missing_service_name_keeps_block() {
        let mut buf = vec![0x00; 7];
        buf.extend_from_slice(&[0x00, 0x01, b'C']);
        let mut cur = Cursor::at(&buf, 11);
        let pi = PiService::decode(&mut cur);
        assert_eq!(pi.param_block_len, Some(1));
        assert_eq!(pi.service, None);
        assert_eq!(pi.parameters, Some(PiParameters::Unknown(Raw::from(&b"C"[..]))));
        let rest = pi.rest.unwrap();
        assert_eq!(rest.offset, 21);
        assert!(rest.reason.is_truncated());
        assert!(cur.is_empty());
    }
}
