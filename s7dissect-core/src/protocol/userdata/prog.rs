use super::super::{
    cursor::{Cursor, Raw},
    error::{DecodeError, Result},
    flags::BitFlags,
    frame::{
        data::{decode_values, DataValue, FillRule},
        SubblockType,
    },
};
use super::{Context, UserDataPayload};
use serde::Serialize;

wire_enum! {
    pub enum ProgSubfunction: u8 {
        RequestDiagData1 = 0x01 => "Request diag data (Type 1)",
        VarTab1 = 0x02 => "VarTab",
        Erase = 0x0C => "Erase",
        ReadDiagData = 0x0E => "Response diag data",
        RemoveDiagData = 0x0F => "Remove diag data",
        Forces = 0x10 => "Forces",
        RequestDiagData2 = 0x13 => "Request diag data (Type 2)",
    }
}

/// Registers requested by a diagnostic-data request, bit 0 first
pub const REGISTER_BITS: [&str; 8] = [
    "STW", "ACCU1", "ACCU2", "AR1", "AR2", "DB1", "DB2", "Reserved",
];

/// Block status request of a programming device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagDataRequest {
    pub ask_header_size: u16,
    pub ask_size: u16,
    pub unknown1: Raw,
    pub answer_size: u16,
    pub unknown2: Raw,
    pub block_type: SubblockType,
    pub block_number: u16,
    pub start_address: u16,
    pub step_address_counter: u16,
    pub registers: BitFlags,
    /// Registers requested per code line
    pub lines: Vec<Result<BitFlags>>,
}

impl DiagDataRequest {
    fn decode(ctx: &Context<'_>, cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            ask_header_size: cur.read_u16()?,
            ask_size: cur.read_u16()?,
            unknown1: cur.raw(6)?,
            answer_size: cur.read_u16()?,
            unknown2: cur.raw(13)?,
            block_type: SubblockType::from(cur.read_u8()?),
            block_number: cur.read_u16()?,
            start_address: cur.read_u16()?,
            step_address_counter: cur.read_u16()?,
            registers: BitFlags::new(cur.read_u8()?, &REGISTER_BITS),
            lines: cur.collect_rest(ctx.cfg.max_list_entries, |c| {
                c.read_u8().map(|b| BitFlags::new(b, &REGISTER_BITS))
            }),
        })
    }
}

wire_enum! {
    pub enum VarTabDataType: u8 {
        Request = 0x14 => "Request",
        Response = 0x04 => "Response",
    }
}

wire_enum! {
    /// Area and width of a variable table entry
    pub enum VarTabArea: u8 {
        Mb = 0x01 => "MB",
        Mw = 0x02 => "MW",
        Md = 0x03 => "MD",
        Ib = 0x11 => "IB",
        Iw = 0x12 => "IW",
        Id = 0x13 => "ID",
        Qb = 0x21 => "QB",
        Qw = 0x22 => "QW",
        Qd = 0x23 => "QD",
        Pib = 0x31 => "PIB",
        Piw = 0x32 => "PIW",
        Pid = 0x33 => "PID",
        Timer = 0x54 => "TIMER",
        Counter = 0x64 => "COUNTER",
        Dbb = 0x71 => "DBB",
        Dbw = 0x72 => "DBW",
        Dbd = 0x73 => "DBD",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VarTabHeader {
    pub reserved: u8,
    pub data_type: VarTabDataType,
    pub byte_count: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VarTabItem {
    pub area: VarTabArea,
    pub repetition_factor: u8,
    pub db_number: u16,
    pub start_address: u16,
}

impl VarTabItem {
    pub const LEN: usize = 6;

    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            area: VarTabArea::from(cur.read_u8()?),
            repetition_factor: cur.read_u8()?,
            db_number: cur.read_u16()?,
            start_address: cur.read_u16()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarTabRequest {
    pub header: VarTabHeader,
    pub unknown: Raw,
    pub item_count: u16,
    pub items: Vec<Result<VarTabItem>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarTabResponse {
    pub header: VarTabHeader,
    pub unknown: Raw,
    pub item_count: u16,
    /// Every odd payload is padded, the last one included
    pub values: Vec<Result<DataValue>>,
}

fn decode_vartab(ctx: &Context<'_>, cur: &mut Cursor<'_>) -> Result<UserDataPayload> {
    let header = VarTabHeader {
        reserved: cur.read_u8()?,
        data_type: VarTabDataType::from(cur.read_u8()?),
        byte_count: cur.read_u16()?,
    };
    match header.data_type {
        VarTabDataType::Request => {
            let unknown = cur.raw(20)?;
            let item_count = cur.read_u16()?;
            let count = ctx.cfg.clamp_count(item_count as usize);
            let items = cur.collect(count, |c, _| VarTabItem::decode(c));
            Ok(UserDataPayload::VarTabRequest(VarTabRequest {
                header,
                unknown,
                item_count,
                items,
            }))
        }
        VarTabDataType::Response => {
            let unknown = cur.raw(4)?;
            let item_count = cur.read_u16()?;
            let count = ctx.cfg.clamp_count(item_count as usize);
            let values = decode_values(cur, count, FillRule::Always);
            Ok(UserDataPayload::VarTabResponse(VarTabResponse {
                header,
                unknown,
                item_count,
                values,
            }))
        }
        VarTabDataType::Unknown(code) => Err(DecodeError::unknown("vartab data type", code)),
    }
}

pub(super) fn decode(
    ctx: &Context<'_>,
    sub: ProgSubfunction,
    cur: &mut Cursor<'_>,
) -> Result<UserDataPayload> {
    match sub {
        ProgSubfunction::RequestDiagData1 | ProgSubfunction::RequestDiagData2
            if ctx.header.kind.is_request() =>
        {
            DiagDataRequest::decode(ctx, cur).map(UserDataPayload::DiagDataRequest)
        }
        ProgSubfunction::VarTab1 => decode_vartab(ctx, cur),
        _ => Ok(UserDataPayload::Raw(cur.raw_rest())),
    }
}
