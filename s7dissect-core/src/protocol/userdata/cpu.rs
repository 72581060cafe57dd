use super::super::{
    cursor::Cursor,
    error::Result,
    flags::BitFlags,
    frame::time::S7Timestamp,
    szl::decode_szl,
    tables::{diag_event_class, diag_event_name},
};
use super::{
    alarm::{AlarmMessage, AlarmQueryResponse},
    Context, UserDataPayload,
};
use serde::Serialize;

wire_enum! {
    pub enum CpuSubfunction: u8 {
        ReadSzl = 0x01 => "Read SZL",
        Msgs = 0x02 => "Message service",
        DiagMsg = 0x03 => "Diagnostic message",
        Alarm8Ind = 0x05 => "ALARM_8 indication",
        NotifyInd = 0x06 => "NOTIFY indication",
        Alarm8Lock = 0x07 => "ALARM_8 lock",
        Alarm8Unlock = 0x08 => "ALARM_8 unlock",
        ScanInd = 0x09 => "SCAN indication",
        AlarmAck = 0x0B => "ALARM ack",
        AlarmAckInd = 0x0C => "ALARM ack indication",
        Alarm8LockInd = 0x0D => "ALARM lock indication",
        Alarm8UnlockInd = 0x0E => "ALARM unlock indication",
        AlarmSqInd = 0x11 => "ALARM_SQ indication",
        AlarmSInd = 0x12 => "ALARM_S indication",
        AlarmQuery = 0x13 => "ALARM query",
        Notify8Ind = 0x16 => "NOTIFY_8 indication",
    }
}

impl CpuSubfunction {
    /// Indications lead with the time the event came
    pub fn is_indication(self) -> bool {
        matches!(
            self,
            CpuSubfunction::Alarm8Ind
                | CpuSubfunction::NotifyInd
                | CpuSubfunction::ScanInd
                | CpuSubfunction::AlarmAckInd
                | CpuSubfunction::Alarm8LockInd
                | CpuSubfunction::Alarm8UnlockInd
                | CpuSubfunction::AlarmSqInd
                | CpuSubfunction::AlarmSInd
                | CpuSubfunction::Notify8Ind
        )
    }

    /// Subfunctions carrying alarm message objects
    pub fn is_alarm(self) -> bool {
        self.is_indication()
            || matches!(
                self,
                CpuSubfunction::Alarm8Lock
                    | CpuSubfunction::Alarm8Unlock
                    | CpuSubfunction::AlarmAck
                    | CpuSubfunction::AlarmQuery
            )
    }
}

const EVENT_IDENT_BITS: [&str; 8] = [
    "Event entering state",
    "Entry in diagnostic buffer",
    "Internal error",
    "External error",
    "Reserved",
    "Reserved",
    "Reserved",
    "Reserved",
];

/// Diagnostic event id: class nibble, identifier bits, event number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventId {
    pub raw: u16,
    pub class: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<&'static str>,
    pub identifiers: BitFlags,
    pub number: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
}

impl From<u16> for EventId {
    fn from(raw: u16) -> Self {
        let class = (raw >> 12) as u8;
        Self {
            raw,
            class,
            class_name: diag_event_class(class),
            identifiers: BitFlags::new(((raw >> 8) & 0x0F) as u8, &EVENT_IDENT_BITS),
            number: (raw & 0xFF) as u8,
            name: diag_event_name(raw),
        }
    }
}

/// CPU diagnostic message, also the layout of a diagnostic buffer entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagMessage {
    pub event_id: EventId,
    pub priority_class: u8,
    pub ob_number: u8,
    pub dat_id: u16,
    pub info1: u16,
    pub info2: u32,
    pub timestamp: S7Timestamp,
}

impl DiagMessage {
    pub const LEN: usize = 20;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            event_id: EventId::from(cur.read_u16()?),
            priority_class: cur.read_u8()?,
            ob_number: cur.read_u8()?,
            dat_id: cur.read_u16()?,
            info1: cur.read_u16()?,
            info2: cur.read_u32()?,
            timestamp: S7Timestamp::decode(cur)?,
        })
    }
}

/// Event classes a message service subscription asks for
pub const SUBSCRIBED_EVENT_BITS: [&str; 8] = [
    "MODE", "SYS", "USR", "Reserved", "Reserved", "Reserved", "Reserved", "ALM",
];
const ALM: u8 = 0x80;

wire_enum! {
    pub enum MessageAlarmType: u8 {
        ScanAbort = 0x00 => "SCAN_ABORT",
        ScanInitiate = 0x01 => "SCAN_INITIATE",
        AlarmAbort = 0x04 => "ALARM_ABORT",
        AlarmInitiate = 0x05 => "ALARM_INITIATE",
        AlarmSAbort = 0x08 => "ALARM_S_ABORT",
        AlarmSInitiate = 0x09 => "ALARM_S_INITIATE",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageServiceRequest {
    pub subscribed_events: BitFlags,
    pub unknown: u8,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_type: Option<MessageAlarmType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown2: Option<u8>,
}

impl MessageServiceRequest {
    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let body_len = cur.remaining();
        let events = cur.read_u8()?;
        let mut req = Self {
            subscribed_events: BitFlags::new(events, &SUBSCRIBED_EVENT_BITS),
            unknown: cur.read_u8()?,
            username: cur.read_ascii(8)?,
            alarm_type: None,
            unknown2: None,
        };
        if events & ALM != 0 && body_len > 10 {
            req.alarm_type = Some(MessageAlarmType::from(cur.read_u8()?));
            req.unknown2 = Some(cur.read_u8()?);
        }
        Ok(req)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageServiceResponse {
    pub result: u8,
    pub reserved: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_type: Option<MessageAlarmType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved2: Option<u16>,
}

impl MessageServiceResponse {
    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let body_len = cur.remaining();
        let mut resp = Self {
            result: cur.read_u8()?,
            reserved: cur.read_u8()?,
            alarm_type: None,
            reserved2: None,
        };
        if body_len > 2 {
            resp.alarm_type = Some(MessageAlarmType::from(cur.read_u8()?));
            resp.reserved2 = Some(cur.read_u16()?);
        }
        Ok(resp)
    }
}

pub(super) fn decode(
    ctx: &Context<'_>,
    sub: CpuSubfunction,
    cur: &mut Cursor<'_>,
) -> Result<UserDataPayload> {
    let kind = ctx.header.kind;
    let payload = match sub {
        CpuSubfunction::ReadSzl => UserDataPayload::Szl(decode_szl(ctx.header, ctx.cfg, cur)?),
        CpuSubfunction::Msgs if kind.is_request() => {
            UserDataPayload::MessageServiceRequest(MessageServiceRequest::decode(cur)?)
        }
        CpuSubfunction::Msgs if kind.is_response() => {
            UserDataPayload::MessageServiceResponse(MessageServiceResponse::decode(cur)?)
        }
        CpuSubfunction::DiagMsg => UserDataPayload::DiagMessage(DiagMessage::decode(cur)?),
        CpuSubfunction::AlarmQuery if kind.is_response() => {
            UserDataPayload::AlarmQueryResponse(AlarmQueryResponse::decode(ctx.cfg, cur)?)
        }
        s if s.is_alarm() => UserDataPayload::AlarmMessage(AlarmMessage::decode(ctx, s, cur)?),
        _ => UserDataPayload::Raw(cur.raw_rest()),
    };
    Ok(payload)
}
