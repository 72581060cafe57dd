//! Fixed layouts of SZL partial-list records.

use super::super::{
    cursor::{latin1, Cursor, Raw},
    error::Result,
    flags::BitFlags,
    frame::time::S7Timestamp,
    userdata::{DiagMessage, EventId},
};
use super::{
    names::{block_type_name, component_index_name, led_name, system_area_name},
    SzlId,
};
use serde::Serialize;

wire_enum! {
    pub enum MemoryType: u16 {
        Volatile = 0x0001 => "Volatile memory (RAM)",
        NonVolatile = 0x0002 => "Non-volatile memory (FEPROM)",
        Mixed = 0x0003 => "Mixed memory (RAM and FEPROM)",
    }
}

const MEMORY_MODE_BITS: [&str; 8] = [
    "Volatile memory area",
    "Non-volatile memory area",
    "Mixed memory area",
    "Code and data separate",
    "Code and data together",
    "Reserved",
    "Reserved",
    "Reserved",
];

/// xy11: order number and versions of a module part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleIdentification {
    pub index: u16,
    pub order_number: String,
    pub module_type: u16,
    pub version1: u16,
    pub version2: u16,
}

/// xy13: one memory area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryArea {
    pub index: u16,
    pub memory_type: MemoryType,
    pub size: u32,
    pub mode: BitFlags,
    pub granularity: u16,
    pub area1_size: u32,
    pub area1_used: u32,
    pub area1_largest_free: u32,
    pub area2_size: u32,
    pub area2_used: u32,
    pub area2_largest_free: u32,
}

/// xy14: one system area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemArea {
    pub index: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<&'static str>,
    pub memory_type: MemoryType,
    pub quantity: u16,
    pub retentive: u16,
}

/// xy15: limits of one block type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockTypeLimits {
    pub index: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_type: Option<&'static str>,
    pub max_count: u16,
    pub max_length: u16,
    pub max_local_data: u32,
}

wire_enum! {
    pub enum LedOn: u8 {
        Off = 0 => "Off",
        On = 1 => "On",
    }
}

wire_enum! {
    pub enum LedBlink: u8 {
        NotFlashing = 0 => "Not flashing",
        Normal = 1 => "Flashing normally (2 Hz)",
        Slow = 2 => "Flashing slowly (0.5 Hz)",
    }
}

/// xy19/xy74: state of one LED
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedStatus {
    pub index: u16,
    /// xy74 only: 0 standby, 8 master of an H system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rack_number: Option<u8>,
    pub led_id: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub led_name: Option<&'static str>,
    pub on: LedOn,
    pub blink: LedBlink,
}

/// xy1C: one identification text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentIdentification {
    pub index: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<&'static str>,
    pub text: String,
}

wire_enum! {
    pub enum OperatingMode: u8 {
        Undefined = 0x0 => "Undefined",
        StopUpdate = 0x1 => "STOP (update)",
        StopMemoryReset = 0x2 => "STOP (memory reset)",
        StopSelfInit = 0x3 => "STOP (self initialization)",
        StopInternal = 0x4 => "STOP (internal)",
        StartupComplete = 0x5 => "Startup (complete restart)",
        Restart = 0x7 => "Restart",
        Run = 0x8 => "RUN",
        RunRedundant = 0x9 => "RUN (redundant operation)",
        Hold = 0xA => "HOLD",
        LinkUp = 0xB => "Link-up",
        Update = 0xC => "Update",
        Defective = 0xD => "Defective",
        SelfTest = 0xE => "Self-test",
        NoPower = 0xF => "No power",
    }
}

wire_enum! {
    pub enum StartupType: u8 {
        NoStartup = 0x00 => "No startup",
        Warm = 0x01 => "Warm restart",
        Hot = 0x02 => "Hot restart",
        Cold = 0x03 => "Cold restart",
    }
}

/// xy24: the last mode transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeTransition {
    pub event: EventId,
    pub ae: u8,
    pub requested_mode: OperatingMode,
    pub previous_mode: OperatingMode,
    pub reserved: u32,
    pub info1: u8,
    pub startup_type: StartupType,
    pub info3: u8,
    pub last_startup_type: StartupType,
    pub timestamp: S7Timestamp,
}

/// 0x0131 index 1: limits of the communication stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommGeneral {
    pub index: u16,
    pub max_pdu_size: u16,
    pub max_connections: u16,
    pub mpi_baudrate: u32,
    pub kbus_baudrate: u32,
    pub reserved: Raw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flags(BitFlags),
    Byte(u8),
    Word(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SzlField {
    pub name: &'static str,
    pub value: FieldValue,
}

/// 0x0131 index 2..=6: the available functions of one service class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommFunctions {
    pub index: u16,
    pub fields: Vec<SzlField>,
}

wire_enum! {
    pub enum ModeSelector: u16 {
        Undefined = 0 => "Undefined or cannot be ascertained",
        Run = 1 => "RUN",
        RunP = 2 => "RUN-P",
        Stop = 3 => "STOP",
        Mres = 4 => "MRES",
    }
}

wire_enum! {
    pub enum StartupSwitch: u16 {
        Undefined = 0 => "Undefined or cannot be ascertained",
        Crst = 1 => "CRST",
        Wrst = 2 => "WRST",
    }
}

/// 0x0132 index 4: protection levels and switch positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectionStatus {
    pub index: u16,
    pub key_switch_protection: u16,
    pub parameter_protection: u16,
    pub effective_protection: u16,
    pub mode_selector: ModeSelector,
    pub startup_switch: StartupSwitch,
    pub reserved: Raw,
}

/// xy92: one bit per rack or station
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStatus {
    pub bits: Raw,
    /// Numbers of the stations whose bit is set
    pub set: Vec<u16>,
}

/// One record of an SZL partial list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SzlRecord {
    SzlId(SzlId),
    ModuleIdentification(ModuleIdentification),
    CpuCharacteristic(u16),
    MemoryArea(MemoryArea),
    SystemArea(SystemArea),
    BlockType(BlockTypeLimits),
    Led(LedStatus),
    Component(ComponentIdentification),
    ModeTransition(ModeTransition),
    CommGeneral(CommGeneral),
    CommFunctions(CommFunctions),
    Protection(ProtectionStatus),
    DiagBuffer(DiagMessage),
    StationStatus(StationStatus),
    /// No layout known for this id and index
    Raw(Raw),
}

impl SzlRecord {
    /// Decode one record of list `id`, keyed by `index`, from `cur`, which
    /// holds exactly one record.
    pub fn decode(id: SzlId, index: u16, cur: &mut Cursor<'_>) -> Result<Self> {
        let record = match (id.list_number, index) {
            (0x31, 0x0001) => SzlRecord::CommGeneral(CommGeneral {
                index: cur.read_u16()?,
                max_pdu_size: cur.read_u16()?,
                max_connections: cur.read_u16()?,
                mpi_baudrate: cur.read_u32()?,
                kbus_baudrate: cur.read_u32()?,
                reserved: cur.raw_rest(),
            }),
            (0x31, 0x0002..=0x0006) => {
                SzlRecord::CommFunctions(decode_functions(index, cur)?)
            }
            (0x32, 0x0004) => SzlRecord::Protection(ProtectionStatus {
                index: cur.read_u16()?,
                key_switch_protection: cur.read_u16()?,
                parameter_protection: cur.read_u16()?,
                effective_protection: cur.read_u16()?,
                mode_selector: ModeSelector::from(cur.read_u16()?),
                startup_switch: StartupSwitch::from(cur.read_u16()?),
                reserved: cur.raw_rest(),
            }),
            (0x00, _) => SzlRecord::SzlId(SzlId::from(cur.read_u16()?)),
            (0x11, _) => SzlRecord::ModuleIdentification(ModuleIdentification {
                index: cur.read_u16()?,
                order_number: trimmed(cur.read_bytes(20)?),
                module_type: cur.read_u16()?,
                version1: cur.read_u16()?,
                version2: cur.read_u16()?,
            }),
            (0x12, _) => SzlRecord::CpuCharacteristic(cur.read_u16()?),
            (0x13, _) => SzlRecord::MemoryArea(MemoryArea {
                index: cur.read_u16()?,
                memory_type: MemoryType::from(cur.read_u16()?),
                size: cur.read_u32()?,
                mode: BitFlags::new((cur.read_u16()? & 0xFF) as u8, &MEMORY_MODE_BITS),
                granularity: cur.read_u16()?,
                area1_size: cur.read_u32()?,
                area1_used: cur.read_u32()?,
                area1_largest_free: cur.read_u32()?,
                area2_size: cur.read_u32()?,
                area2_used: cur.read_u32()?,
                area2_largest_free: cur.read_u32()?,
            }),
            (0x14, _) => {
                let index = cur.read_u16()?;
                SzlRecord::SystemArea(SystemArea {
                    index,
                    area: system_area_name(index),
                    memory_type: MemoryType::from(cur.read_u16()?),
                    quantity: cur.read_u16()?,
                    retentive: cur.read_u16()?,
                })
            }
            (0x15, _) => {
                let index = cur.read_u16()?;
                SzlRecord::BlockType(BlockTypeLimits {
                    index,
                    block_type: block_type_name(index),
                    max_count: cur.read_u16()?,
                    max_length: cur.read_u16()?,
                    max_local_data: cur.read_u32()?,
                })
            }
            (0x19, _) => SzlRecord::Led(decode_led(cur, false)?),
            (0x74, _) => SzlRecord::Led(decode_led(cur, true)?),
            (0x1C, _) => {
                let index = cur.read_u16()?;
                SzlRecord::Component(ComponentIdentification {
                    index,
                    item: component_index_name(index),
                    text: trimmed(cur.rest()),
                })
            }
            (0x24, _) => {
                let event = EventId::from(cur.read_u16()?);
                let ae = cur.read_u8()?;
                let modes = cur.read_u8()?;
                SzlRecord::ModeTransition(ModeTransition {
                    event,
                    ae,
                    requested_mode: OperatingMode::from(modes >> 4),
                    previous_mode: OperatingMode::from(modes & 0x0F),
                    reserved: cur.read_u32()?,
                    info1: cur.read_u8()?,
                    startup_type: StartupType::from(cur.read_u8()?),
                    info3: cur.read_u8()?,
                    last_startup_type: StartupType::from(cur.read_u8()?),
                    timestamp: S7Timestamp::decode(cur)?,
                })
            }
            (0x92, _) => {
                let bits = cur.rest();
                let set = bits
                    .iter()
                    .enumerate()
                    .flat_map(|(byte, &b)| {
                        (0..8u16)
                            .filter(move |bit| b & (1 << bit) != 0)
                            .map(move |bit| byte as u16 * 8 + bit)
                    })
                    .collect();
                SzlRecord::StationStatus(StationStatus {
                    bits: Raw::from(bits),
                    set,
                })
            }
            (0xA0, _) => SzlRecord::DiagBuffer(DiagMessage::decode(cur)?),
            _ => SzlRecord::Raw(cur.raw_rest()),
        };
        Ok(record)
    }
}

fn decode_led(cur: &mut Cursor<'_>, split_index: bool) -> Result<LedStatus> {
    let index = cur.read_u16()?;
    let (cpu_type, rack_number) = if split_index {
        (Some((index >> 12) as u8), Some(((index >> 8) & 0x07) as u8))
    } else {
        (None, None)
    };
    Ok(LedStatus {
        index,
        cpu_type,
        rack_number,
        led_id: (index & 0xFF) as u8,
        led_name: led_name(index),
        on: LedOn::from(cur.read_u8()?),
        blink: LedBlink::from(cur.read_u8()?),
    })
}

/// Latin-1 text without NUL or space padding
fn trimmed(bytes: &[u8]) -> String {
    let mut s = latin1(bytes);
    s.truncate(s.trim_end_matches(['\0', ' ']).len());
    s
}

enum FieldKind {
    Flags(&'static [&'static str; 8]),
    Byte,
    Word,
}

type FieldDef = (&'static str, FieldKind);

const TEST_FUNCTIONS: &[FieldDef] = &[
    (
        "functions_0",
        FieldKind::Flags(&[
            "Block status",
            "Variable status",
            "Output ISTACK",
            "Output BSTACK",
            "Output LSTACK",
            "Time measurement from to",
            "Force selection",
            "Modify variable",
        ]),
    ),
    (
        "functions_1",
        FieldKind::Flags(&[
            "Force",
            "Breakpoint",
            "Exit HOLD",
            "Memory reset",
            "Disable job",
            "Enable job",
            "Delete job",
            "Read job list",
        ]),
    ),
    (
        "functions_2",
        FieldKind::Flags(&[
            "Read job",
            "Replace job",
            "Reserved",
            "Reserved",
            "Reserved",
            "Reserved",
            "Reserved",
            "Reserved",
        ]),
    ),
    ("functions_3", FieldKind::Byte),
    ("functions_4", FieldKind::Byte),
    ("functions_5", FieldKind::Byte),
    ("functions_6", FieldKind::Byte),
    ("functions_7", FieldKind::Byte),
    (
        "trigger_events_0",
        FieldKind::Flags(&[
            "Immediately",
            "System trigger",
            "System checkpoint main cycle start",
            "System checkpoint main cycle end",
            "Mode transition RUN-STOP",
            "After code address",
            "Code address area",
            "Data address",
        ]),
    ),
    (
        "trigger_events_1",
        FieldKind::Flags(&[
            "Data object",
            "Local data",
            "Timer",
            "Counter",
            "Reserved",
            "Reserved",
            "Reserved",
            "Reserved",
        ]),
    ),
    ("trigger_events_2", FieldKind::Byte),
    ("trigger_conditions", FieldKind::Byte),
    ("path_depth", FieldKind::Byte),
    ("max_depth", FieldKind::Byte),
    ("system_trigger", FieldKind::Byte),
    ("result_parameters", FieldKind::Byte),
    ("result_pattern_1", FieldKind::Word),
    ("result_pattern_2", FieldKind::Word),
];

const OPERATOR_FUNCTIONS: &[FieldDef] = &[
    (
        "functions_0",
        FieldKind::Flags(&[
            "Read once",
            "Write once",
            "Read cyclic (start)",
            "Read cyclic (stop)",
            "Read cyclic (modify)",
            "Reserved",
            "Reserved",
            "Reserved",
        ]),
    ),
    ("functions_1", FieldKind::Byte),
    ("functions_2", FieldKind::Byte),
    ("functions_3", FieldKind::Byte),
    ("max_read_variables", FieldKind::Word),
    ("max_write_variables", FieldKind::Word),
    ("max_cyclic_variables", FieldKind::Word),
    ("min_cycle_time", FieldKind::Word),
];

const OBJECT_MANAGEMENT_FUNCTIONS: &[FieldDef] = &[
    (
        "functions_0",
        FieldKind::Flags(&[
            "List blocks",
            "Block info",
            "Copy block",
            "Delete block",
            "Compress memory",
            "Load block",
            "Upload block",
            "Link block",
        ]),
    ),
    ("functions_1", FieldKind::Byte),
    ("functions_2", FieldKind::Byte),
    ("functions_3", FieldKind::Byte),
    ("max_parallel_jobs", FieldKind::Word),
];

const PROGRAMMER_FUNCTIONS: &[FieldDef] = &[
    (
        "functions_0",
        FieldKind::Flags(&[
            "Status block",
            "Status variable",
            "Modify variable",
            "Force",
            "Breakpoint",
            "Single step",
            "Reserved",
            "Reserved",
        ]),
    ),
    (
        "functions_1",
        FieldKind::Flags(&[
            "Mode transition",
            "Memory reset",
            "Set clock",
            "Read clock",
            "Read diagnostic buffer",
            "Reserved",
            "Reserved",
            "Reserved",
        ]),
    ),
    ("functions_2", FieldKind::Byte),
    ("functions_3", FieldKind::Byte),
];

const CONNECTION_BLOCKS: &[FieldDef] = &[
    (
        "blocks_0",
        FieldKind::Flags(&[
            "USEND", "URCV", "SEND", "RCV", "BSEND", "BRCV", "GET", "PUT",
        ]),
    ),
    (
        "blocks_1",
        FieldKind::Flags(&[
            "PRINT", "ALARM", "ALARM_8", "ALARM_8P", "NOTIFY", "AR_SEND", "Reserved", "Reserved",
        ]),
    ),
    (
        "blocks_2",
        FieldKind::Flags(&[
            "STOP", "START", "RESUME", "STATUS", "USTATUS", "Reserved", "Reserved", "Reserved",
        ]),
    ),
    ("blocks_3", FieldKind::Byte),
];

fn decode_functions(index: u16, cur: &mut Cursor<'_>) -> Result<CommFunctions> {
    let table = match index {
        0x0002 => TEST_FUNCTIONS,
        0x0003 => OPERATOR_FUNCTIONS,
        0x0004 => OBJECT_MANAGEMENT_FUNCTIONS,
        0x0005 => PROGRAMMER_FUNCTIONS,
        _ => CONNECTION_BLOCKS,
    };
    let index = cur.read_u16()?;
    let mut fields = Vec::with_capacity(table.len());
    for &(name, ref kind) in table {
        let value = match kind {
            FieldKind::Flags(bits) => FieldValue::Flags(BitFlags::new(cur.read_u8()?, bits)),
            FieldKind::Byte => FieldValue::Byte(cur.read_u8()?),
            FieldKind::Word => FieldValue::Word(cur.read_u16()?),
        };
        fields.push(SzlField { name, value });
    }
    Ok(CommFunctions { index, fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(id: u16, index: u16, bytes: &[u8]) -> (Result<SzlRecord>, usize) {
        let mut cur = Cursor::new(bytes);
        let rec = SzlRecord::decode(SzlId::from(id), index, &mut cur);
        (rec, cur.remaining())
    }

    #[test]
    fn test_module_identification() {
        let mut b = vec![0x00, 0x01];
        b.extend_from_slice(b"6ES7 315-2EH14-0AB0 ");
        b.extend_from_slice(&[0x00, 0xC0, 0x00, 0x03, 0x00, 0x01]);
        let (rec, left) = decode(0x0111, 0x0001, &b);
        let SzlRecord::ModuleIdentification(m) = rec.unwrap() else {
            panic!("expected module identification")
        };
        assert_eq!(m.order_number, "6ES7 315-2EH14-0AB0");
        assert_eq!(m.module_type, 0xC0);
        assert_eq!(left, 0);
    }

    #[test]
    fn test_led_with_split_index() {
        let (rec, _) = decode(0x0174, 0x8104, &[0x81, 0x04, 0x01, 0x02]);
        let SzlRecord::Led(led) = rec.unwrap() else {
            panic!("expected led")
        };
        assert_eq!(led.cpu_type, Some(8));
        assert_eq!(led.rack_number, Some(1));
        assert_eq!(led.led_name, Some("RUN"));
        assert_eq!(led.on, LedOn::On);
        assert_eq!(led.blink, LedBlink::Slow);

        let (rec, _) = decode(0x0019, 0, &[0x00, 0x05, 0x00, 0x00]);
        let SzlRecord::Led(led) = rec.unwrap() else {
            panic!("expected led")
        };
        assert_eq!(led.cpu_type, None);
        assert_eq!(led.led_name, Some("STOP"));
    }

    #[test]
    fn test_comm_general() {
        let mut b = vec![0x00, 0x01, 0x00, 0xF0, 0x00, 0x10];
        b.extend_from_slice(&187_500u32.to_be_bytes());
        b.extend_from_slice(&12_000_000u32.to_be_bytes());
        b.extend_from_slice(&[0u8; 26]);
        let (rec, left) = decode(0x0131, 0x0001, &b);
        let SzlRecord::CommGeneral(c) = rec.unwrap() else {
            panic!("expected comm general")
        };
        assert_eq!(c.max_pdu_size, 240);
        assert_eq!(c.max_connections, 16);
        assert_eq!(c.mpi_baudrate, 187_500);
        assert_eq!(c.reserved.len(), 26);
        assert_eq!(left, 0);
    }

    #[test]
    fn test_connection_block_flags() {
        let (rec, _) = decode(0x0131, 0x0006, &[0x00, 0x06, 0xC0, 0x01, 0x08, 0x00]);
        let SzlRecord::CommFunctions(f) = rec.unwrap() else {
            panic!("expected functions")
        };
        assert_eq!(f.fields.len(), 4);
        assert_eq!(
            f.fields[0].value,
            FieldValue::Flags(BitFlags {
                raw: 0xC0,
                set: vec!["GET", "PUT"]
            })
        );
        let FieldValue::Flags(ref b2) = f.fields[2].value else {
            panic!("expected flags")
        };
        assert_eq!(b2.set, vec!["STATUS"]);
    }

    #[test]
    fn test_protection_status() {
        let mut b = vec![0x00, 0x04, 0x00, 0x01, 0x00, 0x01, 0x00, 0x01, 0x00, 0x02, 0x00, 0x01];
        b.extend_from_slice(&[0u8; 28]);
        let (rec, _) = decode(0x0232, 0x0004, &b);
        let SzlRecord::Protection(p) = rec.unwrap() else {
            panic!("expected protection")
        };
        assert_eq!(p.mode_selector, ModeSelector::RunP);
        assert_eq!(p.startup_switch, StartupSwitch::Crst);
    }

    #[test]
    fn test_mode_transition() {
        let mut b = vec![0x43, 0x02, 0xFF, 0x85, 0, 0, 0, 0, 0x00, 0x01, 0x00, 0x03];
        b.extend_from_slice(&[0x14, 0x03, 0x21, 0x13, 0x45, 0x30, 0x12, 0x36]);
        let (rec, _) = decode(0x0424, 0x0000, &b);
        let SzlRecord::ModeTransition(m) = rec.unwrap() else {
            panic!("expected mode transition")
        };
        assert_eq!(m.requested_mode, OperatingMode::Run);
        assert_eq!(m.previous_mode, OperatingMode::StartupComplete);
        assert_eq!(m.startup_type, StartupType::Warm);
        assert_eq!(m.last_startup_type, StartupType::Cold);
        assert_eq!(m.event.name, Some("Mode transition from STARTUP to RUN"));
    }

    #[test]
    fn test_station_status_bits() {
        let (rec, _) = decode(0x0092, 0, &[0x05, 0x00, 0x80]);
        let SzlRecord::StationStatus(s) = rec.unwrap() else {
            panic!("expected station status")
        };
        assert_eq!(s.set, vec![0, 2, 23]);
    }

    #[test]
    fn test_overrunning_layout_is_truncated() {
        let (rec, _) = decode(0x0013, 0x0001, &[0x00, 0x01, 0x00, 0x01]);
        assert!(rec.unwrap_err().is_truncated());
    }

    #[test]
    fn test_unknown_list_is_raw() {
        let (rec, left) = decode(0x0037, 0x0000, &[1, 2, 3]);
        assert_eq!(rec.unwrap(), SzlRecord::Raw(Raw::from(&[1u8, 2, 3][..])));
        assert_eq!(left, 0);
    }
}
