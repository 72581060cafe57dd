//! User-data PDUs (ROSCTR 7).
//!
//! The parameter block names a function group and subfunction; the data
//! section starts with a 4-byte head and a body whose layout depends on the
//! group, the subfunction and the direction.

mod alarm;
mod block;
mod clock;
mod cpu;
mod cyclic;
mod ncprog;
mod pbc;
mod prog;

pub use alarm::{
    AlarmDataset, AlarmMessage, AlarmObject, AlarmQueryRequest, AlarmQueryResponse, AlarmSValues,
    AlarmType, MessageObject, NotifyState, QueryTarget, QueryType,
};
pub use block::{BlockCount, BlockInfo, BlockInfoRequest, BlockListEntry, BlockSubfunction, BlockVersion};
pub use clock::TimeSubfunction;
pub use cpu::{
    CpuSubfunction, DiagMessage, EventId, MessageAlarmType, MessageServiceRequest,
    MessageServiceResponse,
};
pub use cyclic::{CyclicSubfunction, CyclicSubscribe, CyclicValues, Timebase};
pub use ncprog::{NcProgramData, NcSubfunction};
pub use pbc::{PbcData, PbcSubfunction};
pub use prog::{
    DiagDataRequest, ProgSubfunction, VarTabArea, VarTabDataType, VarTabHeader, VarTabItem,
    VarTabRequest, VarTabResponse,
};

use super::{
    cursor::{Cursor, Opaque, Raw},
    error::{ErrorCode, Result},
    frame::{time::S7Timestamp, BlockType, DataTransportSize, ReturnCode},
    szl::SzlData,
};
use crate::config::DecoderConfig;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

/// Constant first three bytes of a user-data parameter block
pub const PARAM_HEAD: u32 = 0x00_01_12;

wire_enum! {
    /// High nibble of the type/group byte
    pub enum UserDataType: u8 {
        Push = 0x0 => "Push",
        NcPush = 0x3 => "NC Push",
        Request = 0x4 => "Request",
        NcRequest = 0x7 => "NC Request",
        Response = 0x8 => "Response",
        NcResponse = 0xB => "NC Response",
    }
}

impl UserDataType {
    #[inline]
    pub fn is_push(self) -> bool {
        matches!(self, UserDataType::Push | UserDataType::NcPush)
    }

    #[inline]
    pub fn is_request(self) -> bool {
        matches!(self, UserDataType::Request | UserDataType::NcRequest)
    }

    #[inline]
    pub fn is_response(self) -> bool {
        matches!(self, UserDataType::Response | UserDataType::NcResponse)
    }
}

wire_enum! {
    pub enum FunctionGroup: u8 {
        ModeTransition = 0x0 => "Mode-transition",
        Programmer = 0x1 => "Programmer commands",
        Cyclic = 0x2 => "Cyclic services",
        Block = 0x3 => "Block functions",
        Cpu = 0x4 => "CPU functions",
        Security = 0x5 => "Security",
        Pbc = 0x6 => "PBC BSEND/BRECV",
        Time = 0x7 => "Time functions",
        NcProgramming = 0xF => "NC programming",
    }
}

wire_enum! {
    pub enum Method: u8 {
        Request = 0x11 => "Request",
        Response = 0x12 => "Response",
    }
}

wire_enum! {
    /// Subfunction of the mode-transition group: the mode entered
    pub enum CpuMode: u8 {
        Stop = 0 => "STOP",
        WarmRestart = 1 => "Warm Restart",
        Run = 2 => "RUN",
        HotRestart = 3 => "Hot Restart",
        Hold = 4 => "HOLD",
        ColdRestart = 6 => "Cold Restart",
        RunRedundant = 9 => "RUN_R (H-System redundant)",
        LinkUp = 11 => "LINK-UP",
        Update = 12 => "UPDATE",
    }
}

wire_enum! {
    pub enum SecuritySubfunction: u8 {
        PlcPassword = 0x01 => "PLC password",
    }
}

/// Subfunction code, read through the table of its function group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Subfunction {
    Mode(CpuMode),
    Programmer(ProgSubfunction),
    Cyclic(CyclicSubfunction),
    Block(BlockSubfunction),
    Cpu(CpuSubfunction),
    Security(SecuritySubfunction),
    Pbc(PbcSubfunction),
    Time(TimeSubfunction),
    NcProgramming(NcSubfunction),
    /// Subfunction of an unknown function group
    Unknown(u8),
}

impl Subfunction {
    pub fn new(group: FunctionGroup, code: u8) -> Self {
        match group {
            FunctionGroup::ModeTransition => Subfunction::Mode(code.into()),
            FunctionGroup::Programmer => Subfunction::Programmer(code.into()),
            FunctionGroup::Cyclic => Subfunction::Cyclic(code.into()),
            FunctionGroup::Block => Subfunction::Block(code.into()),
            FunctionGroup::Cpu => Subfunction::Cpu(code.into()),
            FunctionGroup::Security => Subfunction::Security(code.into()),
            FunctionGroup::Pbc => Subfunction::Pbc(code.into()),
            FunctionGroup::Time => Subfunction::Time(code.into()),
            FunctionGroup::NcProgramming => Subfunction::NcProgramming(code.into()),
            FunctionGroup::Unknown(_) => Subfunction::Unknown(code),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Subfunction::Mode(s) => s.code(),
            Subfunction::Programmer(s) => s.code(),
            Subfunction::Cyclic(s) => s.code(),
            Subfunction::Block(s) => s.code(),
            Subfunction::Cpu(s) => s.code(),
            Subfunction::Security(s) => s.code(),
            Subfunction::Pbc(s) => s.code(),
            Subfunction::Time(s) => s.code(),
            Subfunction::NcProgramming(s) => s.code(),
            Subfunction::Unknown(code) => code,
        }
    }
}

impl fmt::Display for Subfunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subfunction::Mode(s) => fmt::Display::fmt(s, f),
            Subfunction::Programmer(s) => fmt::Display::fmt(s, f),
            Subfunction::Cyclic(s) => fmt::Display::fmt(s, f),
            Subfunction::Block(s) => fmt::Display::fmt(s, f),
            Subfunction::Cpu(s) => fmt::Display::fmt(s, f),
            Subfunction::Security(s) => fmt::Display::fmt(s, f),
            Subfunction::Pbc(s) => fmt::Display::fmt(s, f),
            Subfunction::Time(s) => fmt::Display::fmt(s, f),
            Subfunction::NcProgramming(s) => fmt::Display::fmt(s, f),
            Subfunction::Unknown(code) => write!(f, "Unknown ({:#04x})", code),
        }
    }
}

/// User-data parameter block, 8 bytes or 12 with the fragmentation fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDataHeader {
    /// Normally `00 01 12`
    pub head: u32,
    /// Bytes after this field: 4, or 8 with the fragmentation fields
    pub param_length: u8,
    pub method: Method,
    #[serde(rename = "type")]
    pub kind: UserDataType,
    pub function_group: FunctionGroup,
    pub subfunction: Subfunction,
    pub sequence_number: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_unit_reference: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_data_unit: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
}

impl UserDataHeader {
    pub const LEN: usize = 8;
    pub const LEN_WITH_FRAGMENT: usize = 12;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let head = cur.read_u24()?;
        if head != PARAM_HEAD {
            debug!(head = format_args!("{:06x}", head), "unexpected user-data parameter head");
        }
        let param_length = cur.read_u8()?;
        let method = Method::from(cur.read_u8()?);
        let type_group = cur.read_u8()?;
        let kind = UserDataType::from(type_group >> 4);
        let function_group = FunctionGroup::from(type_group & 0x0F);
        let subfunction = Subfunction::new(function_group, cur.read_u8()?);
        let sequence_number = cur.read_u8()?;
        let mut header = Self {
            head,
            param_length,
            method,
            kind,
            function_group,
            subfunction,
            sequence_number,
            data_unit_reference: None,
            last_data_unit: None,
            error_code: None,
        };
        if cur.window_len() >= Self::LEN_WITH_FRAGMENT {
            header.data_unit_reference = Some(cur.read_u8()?);
            header.last_data_unit = Some(cur.read_u8()?);
            header.error_code = Some(ErrorCode::from(cur.read_u16()?));
        }
        Ok(header)
    }
}

/// Common head of a user-data data section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataHead {
    pub return_code: ReturnCode,
    /// Usually OCTET STRING, not checked
    pub transport_size: DataTransportSize,
    pub length: u16,
}

impl DataHead {
    pub const LEN: usize = 4;

    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            return_code: ReturnCode::from(cur.read_u8()?),
            transport_size: DataTransportSize::from(cur.read_u8()?),
            length: cur.read_u16()?,
        })
    }
}

/// Decoded body of a user-data data section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserDataPayload {
    Empty,
    /// No structure known for this group, subfunction and direction
    Raw(Raw),
    DiagDataRequest(DiagDataRequest),
    VarTabRequest(VarTabRequest),
    VarTabResponse(VarTabResponse),
    CyclicSubscribe(CyclicSubscribe),
    CyclicValues(CyclicValues),
    BlockList(Vec<Result<BlockCount>>),
    BlockListTypeRequest(BlockType),
    BlockListType(Vec<Result<BlockListEntry>>),
    BlockInfoRequest(BlockInfoRequest),
    BlockInfo(Box<BlockInfo>),
    Szl(SzlData),
    DiagMessage(DiagMessage),
    MessageServiceRequest(MessageServiceRequest),
    MessageServiceResponse(MessageServiceResponse),
    AlarmMessage(AlarmMessage),
    AlarmQueryResponse(AlarmQueryResponse),
    Pbc(PbcData),
    Time(S7Timestamp),
    NcProgram(NcProgramData),
}

/// What a group decoder knows about the PDU it works on
pub(crate) struct Context<'a> {
    pub header: &'a UserDataHeader,
    pub cfg: &'a DecoderConfig,
}

/// Data section of a user-data PDU
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub head: DataHead,
    /// `None` when the body could not be decoded; see `rest`
    pub payload: Option<UserDataPayload>,
    /// Where decoding stopped, with the bytes it did not reach
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<Opaque>,
}

impl UserData {
    /// The body is every byte after the head; `head.length` is informational.
    fn decode(ctx: &Context<'_>, head: DataHead, data: &mut Cursor<'_>) -> Self {
        let declared = head.length as usize;
        if declared != data.remaining() {
            debug!(
                declared,
                available = data.remaining(),
                "user-data body length differs from declared"
            );
        }
        let mut body = data.sub_clamped(data.remaining());
        match body.attempt(|b| decode_body(ctx, b)) {
            Ok(payload) => Self {
                head,
                payload: Some(payload),
                rest: body.surplus(),
            },
            Err(rest) => {
                debug!(
                    subfunction = %ctx.header.subfunction,
                    reason = %rest.reason,
                    "user-data body not decoded"
                );
                Self {
                    head,
                    payload: None,
                    rest: Some(rest),
                }
            }
        }
    }
}

fn decode_body(ctx: &Context<'_>, body: &mut Cursor<'_>) -> Result<UserDataPayload> {
    if body.is_empty() {
        return Ok(UserDataPayload::Empty);
    }
    match ctx.header.subfunction {
        Subfunction::Programmer(sub) => prog::decode(ctx, sub, body),
        Subfunction::Cyclic(sub) => cyclic::decode(ctx, sub, body),
        Subfunction::Block(sub) => block::decode(ctx, sub, body),
        Subfunction::Cpu(sub) => cpu::decode(ctx, sub, body),
        Subfunction::Pbc(_) => PbcData::decode(body).map(UserDataPayload::Pbc),
        Subfunction::Time(sub) => clock::decode(ctx, sub, body),
        Subfunction::NcProgramming(sub) => ncprog::decode(ctx, sub, body),
        Subfunction::Mode(_) | Subfunction::Security(_) | Subfunction::Unknown(_) => {
            Ok(UserDataPayload::Raw(body.raw_rest()))
        }
    }
}

/// Parameter block and data section of a user-data PDU
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDataBlock {
    pub header: UserDataHeader,
    /// Parameter bytes beyond the header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_rest: Option<Opaque>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<UserData>,
    /// A data section too short for its head
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_rest: Option<Opaque>,
}

/// Decode a user-data parameter block and its data section.
///
/// Only a parameter header cut short fails; everything after it is decoded
/// best-effort.
pub fn decode_userdata(
    param: &mut Cursor<'_>,
    data: &mut Cursor<'_>,
    cfg: &DecoderConfig,
) -> Result<UserDataBlock> {
    let header = UserDataHeader::decode(param)?;
    trace!(
        group = %header.function_group,
        subfunction = %header.subfunction,
        kind = %header.kind,
        "user-data header"
    );
    let param_rest = param.surplus();
    let (data_block, data_rest) = if data.is_empty() {
        (None, None)
    } else {
        match DataHead::decode(data) {
            Ok(head) => {
                let ctx = Context {
                    header: &header,
                    cfg,
                };
                let block = UserData::decode(&ctx, head, data);
                (Some(block), data.surplus())
            }
            Err(e) => (None, Some(data.remainder(e))),
        }
    };
    Ok(UserDataBlock {
        header,
        param_rest,
        data: data_block,
        data_rest,
    })
}
