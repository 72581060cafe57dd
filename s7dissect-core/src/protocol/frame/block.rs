use super::super::{
    cursor::{latin1, Cursor, Opaque, Raw},
    error::{ErrorCode, Result},
};
use super::types::{BlockType, FileIdentifier, Filesystem, Function, Rosctr};
use serde::Serialize;
use tracing::debug;

/// Function status byte of block up/download parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionStatus {
    pub raw: u8,
    /// Bit 0: more data follows
    pub more_data: bool,
    /// Bit 1: error
    pub error: bool,
}

impl From<u8> for FunctionStatus {
    fn from(raw: u8) -> Self {
        Self {
            raw,
            more_data: raw & 0x01 != 0,
            error: raw & 0x02 != 0,
        }
    }
}

/// Filename of a block transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockFilename {
    /// `_0A00001P`: identifier, block type, block number, destination
    Block {
        file_identifier: FileIdentifier,
        block_type: BlockType,
        block_number: String,
        destination: Filesystem,
    },
    /// Anything else, e.g. an NC file path
    Other(String),
}

impl BlockFilename {
    pub const BLOCK_LEN: usize = 9;

    /// Classify `name`, a filename without its length byte.
    pub fn parse(name: &[u8]) -> Self {
        if name.len() == Self::BLOCK_LEN {
            let file_identifier = FileIdentifier::from(name[0]);
            let block_type = BlockType::from(u16::from_be_bytes([name[1], name[2]]));
            if file_identifier.is_known() && block_type.is_known() {
                return BlockFilename::Block {
                    file_identifier,
                    block_type,
                    block_number: latin1(&name[3..8]),
                    destination: Filesystem::from(name[8]),
                };
            }
        }
        BlockFilename::Other(latin1(name))
    }

    /// Length byte then the filename.
    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let len = cur.read_u8()? as usize;
        cur.read_bytes(len).map(Self::parse)
    }
}

/// Second part of a RequestDownload job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadPart2 {
    pub length: u8,
    pub unknown: char,
    pub load_memory_length: String,
    pub mc7_code_length: String,
}

impl DownloadPart2 {
    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            length: cur.read_u8()?,
            unknown: cur.read_u8()? as char,
            load_memory_length: cur.read_ascii(6)?,
            mc7_code_length: cur.read_ascii(6)?,
        })
    }
}

/// Block bytes carried by Upload and DownloadBlock responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockData {
    pub length: u16,
    pub unknown: u16,
    pub bytes: Raw,
}

impl BlockData {
    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let length = cur.read_u16()?;
        let unknown = cur.read_u16()?;
        let bytes = cur.raw(length as usize)?;
        Ok(Self {
            length,
            unknown,
            bytes,
        })
    }
}

/// Parameters of the block up/download functions 0x1A..=0x1F.
///
/// One layout per function and direction; fields a combination does not
/// carry stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockControl {
    pub function: Function,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FunctionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown: Option<Raw>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<BlockFilename>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part2: Option<DownloadPart2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BlockData>,
    /// Where decoding stopped, with the bytes it did not reach
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<Opaque>,
}

impl BlockControl {
    /// RequestDownload jobs longer than this carry [`DownloadPart2`]
    const PART2_THRESHOLD: usize = 18;
    /// StartUpload acks longer than this carry the block length
    const BLOCK_LENGTH_THRESHOLD: usize = 8;

    /// Decode from `param`, positioned after the function byte, and `data`.
    /// `param_len` is the declared parameter length including the function byte.
    pub fn decode(
        function: Function,
        rosctr: Rosctr,
        param_len: usize,
        param: &mut Cursor<'_>,
        data: &mut Cursor<'_>,
    ) -> Self {
        let mut out = Self {
            function,
            status: None,
            error_code: None,
            unknown: None,
            upload_id: None,
            filename: None,
            part2: None,
            block_length: None,
            data: None,
            rest: None,
        };
        let res = match rosctr {
            Rosctr::Job => out.decode_job(param_len, param),
            _ => out.decode_ack(param_len, param, data),
        };
        if let Err(e) = res {
            debug!(%function, error = %e, "block control parameters cut short");
            out.rest = Some(param.remainder(e));
        }
        out
    }

    fn decode_job(&mut self, param_len: usize, cur: &mut Cursor<'_>) -> Result<()> {
        self.status = Some(FunctionStatus::from(cur.read_u8()?));
        let code = cur.read_u16()?;
        match self.function {
            Function::DownloadEnded | Function::EndUpload => {
                self.error_code = Some(ErrorCode::from(code));
            }
            _ => self.unknown = Some(Raw::from(&code.to_be_bytes()[..])),
        }
        match self.function {
            Function::Upload | Function::EndUpload => {
                self.upload_id = Some(cur.read_u32()?);
                return Ok(());
            }
            _ => {
                cur.skip(4)?;
            }
        }
        self.filename = Some(BlockFilename::decode(cur)?);
        if self.function == Function::RequestDownload
            && param_len > Self::PART2_THRESHOLD
            && !cur.is_empty()
        {
            self.part2 = Some(DownloadPart2::decode(cur)?);
        }
        Ok(())
    }

    fn decode_ack(
        &mut self,
        param_len: usize,
        cur: &mut Cursor<'_>,
        data: &mut Cursor<'_>,
    ) -> Result<()> {
        if param_len >= 2 {
            self.status = Some(FunctionStatus::from(cur.read_u8()?));
        }
        if self.function == Function::StartUpload && param_len > Self::BLOCK_LENGTH_THRESHOLD {
            self.unknown = Some(cur.raw(2)?);
            self.upload_id = Some(cur.read_u32()?);
            self.block_length = Some(cur.read_prefixed_ascii()?);
        }
        if matches!(self.function, Function::Upload | Function::DownloadBlock) && !data.is_empty()
        {
            self.data = Some(BlockData::decode(data)?);
        }
        Ok(())
    }
}
