use super::super::{
    cursor::{Cursor, Raw},
    error::Result,
    flags::{BitFlags, SIGNAL_BITS},
    frame::{
        data::{decode_values, DataValue, FillRule},
        time::S7Timestamp,
        DataTransportSize, ReturnCode, SyntaxId,
    },
};
use super::{cpu::CpuSubfunction, Context};
use crate::config::DecoderConfig;
use serde::Serialize;
use tracing::{debug, trace};

wire_enum! {
    pub enum QueryType: u8 {
        ByAlarmType = 1 => "ByAlarmtype",
        ByEventId = 3 => "ByEventID",
    }
}

wire_enum! {
    pub enum AlarmType: u8 {
        Scan = 1 => "SCAN",
        Alarm8 = 2 => "ALARM_8",
        AlarmS = 4 => "ALARM_S",
    }
}

/// Selector of an alarm query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryTarget {
    AlarmType(AlarmType),
    EventId(u32),
    /// Value of an unknown query type, or an alarm type out of range
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlarmQueryRequest {
    pub unknown1: u8,
    pub query_type: QueryType,
    pub unknown2: u8,
    pub target: QueryTarget,
}

impl AlarmQueryRequest {
    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let unknown1 = cur.read_u8()?;
        let query_type = QueryType::from(cur.read_u8()?);
        let unknown2 = cur.read_u8()?;
        let value = cur.read_u32()?;
        let target = match (query_type, u8::try_from(value)) {
            (QueryType::ByAlarmType, Ok(t)) => QueryTarget::AlarmType(AlarmType::from(t)),
            (QueryType::ByEventId, _) => QueryTarget::EventId(value),
            _ => QueryTarget::Other(value),
        };
        Ok(Self {
            unknown1,
            query_type,
            unknown2,
            target,
        })
    }
}

/// Going/coming details of a NOTIFY indication
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyState {
    pub event_going: BitFlags,
    pub event_coming: BitFlags,
    pub event_last_changed: BitFlags,
    pub reserved: u8,
}

/// Alarm message object; which state fields exist depends on the syntax id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageObject {
    pub syntax_id: SyntaxId,
    pub additional_value_count: u8,
    pub event_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_state: Option<BitFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<BitFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ack_state_going: Option<BitFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ack_state_coming: Option<BitFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<NotifyState>,
    /// Associated values
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Result<DataValue>>,
}

impl MessageObject {
    fn decode(syntax_id: SyntaxId, cur: &mut Cursor<'_>) -> Result<Self> {
        let additional_value_count = cur.read_u8()?;
        let mut obj = Self {
            syntax_id,
            additional_value_count,
            event_id: cur.read_u32()?,
            event_state: None,
            state: None,
            ack_state_going: None,
            ack_state_coming: None,
            notify: None,
            values: Vec::new(),
        };
        match syntax_id {
            SyntaxId::AlarmIndSet | SyntaxId::NotifyIndSet => {
                obj.event_state = Some(signals(cur)?);
                obj.state = Some(signals(cur)?);
                obj.ack_state_going = Some(signals(cur)?);
                obj.ack_state_coming = Some(signals(cur)?);
            }
            SyntaxId::AlarmAckSet => {
                obj.ack_state_going = Some(signals(cur)?);
                obj.ack_state_coming = Some(signals(cur)?);
            }
            _ => {}
        }
        if syntax_id == SyntaxId::NotifyIndSet {
            obj.notify = Some(NotifyState {
                event_going: signals(cur)?,
                event_coming: signals(cur)?,
                event_last_changed: signals(cur)?,
                reserved: cur.read_u8()?,
            });
        }
        if additional_value_count > 0 {
            obj.values = decode_values(cur, additional_value_count as usize, FillRule::ExceptLast);
        }
        Ok(obj)
    }
}

fn signals(cur: &mut Cursor<'_>) -> Result<BitFlags> {
    cur.read_u8().map(|b| BitFlags::new(b, &SIGNAL_BITS))
}

/// One object of an alarm message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmObject {
    Message(MessageObject),
    Query(AlarmQueryRequest),
    /// Variable specification with an unknown syntax id, skipped
    Unknown { syntax_id: SyntaxId, bytes: Raw },
    /// Response objects carry only a return code
    ReturnCode(ReturnCode),
}

impl AlarmObject {
    fn decode_spec(cur: &mut Cursor<'_>) -> Result<Self> {
        let _spec_type = cur.read_u8()?;
        let spec_length = cur.read_u8()?;
        let syntax_id = SyntaxId::from(cur.read_u8()?);
        match syntax_id {
            SyntaxId::AlarmLockFreeSet
            | SyntaxId::AlarmIndSet
            | SyntaxId::NotifyIndSet
            | SyntaxId::AlarmAckSet => MessageObject::decode(syntax_id, cur).map(AlarmObject::Message),
            SyntaxId::AlarmQueryReqSet => AlarmQueryRequest::decode(cur).map(AlarmObject::Query),
            _ => {
                trace!(%syntax_id, "skipping alarm object");
                let bytes = cur.raw((spec_length as usize).saturating_sub(1))?;
                Ok(AlarmObject::Unknown { syntax_id, bytes })
            }
        }
    }
}

/// Alarm indications, acknowledgements, lock requests and alarm queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlarmMessage {
    /// When the event came; indications only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<S7Timestamp>,
    pub function: u8,
    pub object_count: u8,
    pub objects: Vec<Result<AlarmObject>>,
}

impl AlarmMessage {
    pub(super) fn decode(
        ctx: &Context<'_>,
        sub: CpuSubfunction,
        cur: &mut Cursor<'_>,
    ) -> Result<Self> {
        let timestamp = if sub.is_indication() {
            Some(S7Timestamp::decode(cur)?)
        } else {
            None
        };
        let function = cur.read_u8()?;
        let object_count = cur.read_u8()?;
        let count = ctx.cfg.clamp_count(object_count as usize);
        let objects = if ctx.header.kind.is_response() {
            cur.collect(count, |c, _| {
                c.read_u8().map(|b| AlarmObject::ReturnCode(ReturnCode::from(b)))
            })
        } else {
            cur.collect(count, |c, _| AlarmObject::decode_spec(c))
        };
        Ok(Self {
            timestamp,
            function,
            object_count,
            objects,
        })
    }
}

/// Coming and going halves of an ALARM_S dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlarmSValues {
    pub coming_timestamp: S7Timestamp,
    pub coming_value: DataValue,
    pub going_timestamp: S7Timestamp,
    pub going_value: DataValue,
    /// The going timestamp is all zero
    pub still_active: bool,
}

/// One alarm of an alarm query response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlarmDataset {
    pub dataset_length: u8,
    pub unknown1: u16,
    pub alarm_type: AlarmType,
    pub event_id: u32,
    pub unknown2: u8,
    pub event_state: BitFlags,
    pub ack_state_going: BitFlags,
    pub ack_state_coming: BitFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_s: Option<AlarmSValues>,
}

impl AlarmDataset {
    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let dataset_length = cur.read_u8()?;
        let unknown1 = cur.read_u16()?;
        let alarm_type = AlarmType::from(cur.read_u8()?);
        let event_id = cur.read_u32()?;
        let unknown2 = cur.read_u8()?;
        let event_state = signals(cur)?;
        let ack_state_going = signals(cur)?;
        let ack_state_coming = signals(cur)?;
        let alarm_s = if alarm_type == AlarmType::AlarmS {
            let coming_timestamp = S7Timestamp::decode(cur)?;
            let coming_value = DataValue::decode(cur, true, FillRule::ExceptLast)?;
            let going_timestamp = S7Timestamp::decode(cur)?;
            let going_value = DataValue::decode(cur, true, FillRule::ExceptLast)?;
            Some(AlarmSValues {
                still_active: going_timestamp.is_zero(),
                coming_timestamp,
                coming_value,
                going_timestamp,
                going_value,
            })
        } else {
            None
        };
        Ok(Self {
            dataset_length,
            unknown1,
            alarm_type,
            event_id,
            unknown2,
            event_state,
            ack_state_going,
            ack_state_coming,
            alarm_s,
        })
    }
}

/// Response to an alarm query, possibly split over several PDUs.
///
/// A leading zero byte starts a response with a header; an object count of
/// zero in that header ends the sequence. A non-zero leading byte is the
/// length of a continuation fragment without header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlarmQueryResponse {
    pub function: u8,
    pub continuation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_count: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_code: Option<ReturnCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_size: Option<DataTransportSize>,
    /// `0xFFFF` when the response spans PDUs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_length: Option<u16>,
    pub datasets: Vec<Result<AlarmDataset>>,
}

impl AlarmQueryResponse {
    pub const UNKNOWN_LENGTH: u16 = 0xFFFF;

    pub(super) fn decode(cfg: &DecoderConfig, cur: &mut Cursor<'_>) -> Result<Self> {
        let function = cur.read_u8()?;
        let mut resp = Self {
            function,
            continuation: false,
            object_count: None,
            return_code: None,
            transport_size: None,
            complete_length: None,
            datasets: Vec::new(),
        };
        let remaining = if function != 0 && cfg.alarm_query_heuristic {
            resp.continuation = true;
            function as usize
        } else {
            let object_count = cur.read_u8()?;
            resp.object_count = Some(object_count);
            if object_count == 0 {
                return Ok(resp);
            }
            resp.return_code = Some(ReturnCode::from(cur.read_u8()?));
            resp.transport_size = Some(DataTransportSize::from(cur.read_u8()?));
            let complete_length = cur.read_u16()?;
            resp.complete_length = Some(complete_length);
            match complete_length {
                Self::UNKNOWN_LENGTH => cur.remaining(),
                len => len as usize,
            }
        };
        if remaining > cur.remaining() {
            debug!(
                remaining,
                available = cur.remaining(),
                "alarm query response continues in a later PDU"
            );
        }
        let mut window = cur.sub_clamped(remaining);
        resp.datasets = window.collect_rest(cfg.max_list_entries, AlarmDataset::decode);
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{decode_userdata, UserData, UserDataPayload};
    use super::*;

    fn data(type_group: u8, sub: u8, body: &[u8], cfg: DecoderConfig) -> UserData {
        let p = [0x00, 0x01, 0x12, 0x04, 0x11, type_group, sub, 0x00];
        let mut d = vec![0xFF, 0x09];
        d.extend_from_slice(&(body.len() as u16).to_be_bytes());
        d.extend_from_slice(body);
        decode_userdata(&mut Cursor::new(&p), &mut Cursor::new(&d), &cfg)
            .unwrap()
            .data
            .unwrap()
    }

    fn alarm(type_group: u8, sub: u8, body: &[u8]) -> AlarmMessage {
        match data(type_group, sub, body, DecoderConfig::default()).payload {
            Some(UserDataPayload::AlarmMessage(m)) => m,
            other => panic!("expected alarm message, got {:?}", other),
        }
    }

    const TS: [u8; 8] = [0x14, 0x03, 0x21, 0x13, 0x45, 0x30, 0x12, 0x36];

    #[test]
    fn test_alarm_s_indication_with_value() {
        let mut body = TS.to_vec();
        body.extend_from_slice(&[0x00, 0x01]); // function, one object
        body.extend_from_slice(&[0x12, 0x08, 0x16, 0x01, 0x00, 0x00, 0x51, 0x01]);
        body.extend_from_slice(&[0x01, 0x01, 0x00, 0x00]);
        body.extend_from_slice(&[0xFF, 0x04, 0x00, 0x10, 0x00, 0x2A]);
        let msg = alarm(0x04, 0x12, &body);
        assert_eq!(msg.timestamp.as_ref().unwrap().year, 2014);
        assert_eq!(msg.object_count, 1);
        let AlarmObject::Message(obj) = msg.objects[0].as_ref().unwrap() else {
            panic!("expected message object")
        };
        assert_eq!(obj.syntax_id, SyntaxId::AlarmIndSet);
        assert_eq!(obj.event_id, 0x0000_5101);
        assert_eq!(obj.event_state.as_ref().unwrap().set, vec!["SIG_1"]);
        assert_eq!(obj.notify, None);
        assert_eq!(obj.values.len(), 1);
        assert_eq!(obj.values[0].as_ref().unwrap().data.as_slice(), &[0x00, 0x2A]);
    }

    #[test]
    fn test_notify_indication_state_bytes() {
        let mut body = TS.to_vec();
        body.extend_from_slice(&[0x00, 0x01]);
        body.extend_from_slice(&[0x12, 0x0C, 0x1C, 0x00, 0x00, 0x00, 0x00, 0x07]);
        body.extend_from_slice(&[0x03, 0x03, 0x00, 0x00, 0x01, 0x02, 0x03, 0x00]);
        let msg = alarm(0x04, 0x06, &body);
        let AlarmObject::Message(obj) = msg.objects[0].as_ref().unwrap() else {
            panic!("expected message object")
        };
        let notify = obj.notify.as_ref().unwrap();
        assert_eq!(notify.event_coming.set, vec!["SIG_2"]);
        assert_eq!(notify.event_last_changed.set, vec!["SIG_1", "SIG_2"]);
        assert!(obj.values.is_empty());
    }

    #[test]
    fn test_ack_request_objects() {
        let body = [
            0x09, 0x02, // function, two objects
            0x12, 0x08, 0x19, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x00, // ack
            0x12, 0x04, 0x77, 0xAA, 0xBB, 0xCC, // unknown syntax id
        ];
        let msg = alarm(0x44, 0x0B, &body);
        assert_eq!(msg.timestamp, None);
        let AlarmObject::Message(ack) = msg.objects[0].as_ref().unwrap() else {
            panic!("expected ack object")
        };
        assert_eq!(ack.ack_state_going.as_ref().unwrap().set, vec!["SIG_1"]);
        assert_eq!(ack.event_state, None);
        assert_eq!(
            msg.objects[1],
            Ok(AlarmObject::Unknown {
                syntax_id: SyntaxId::Unknown(0x77),
                bytes: Raw::from(&[0xAA, 0xBB, 0xCC][..]),
            })
        );
    }

    #[test]
    fn test_response_objects_are_return_codes() {
        let msg = alarm(0x84, 0x0B, &[0x09, 0x02, 0xFF, 0x0A]);
        assert_eq!(
            msg.objects,
            vec![
                Ok(AlarmObject::ReturnCode(ReturnCode::Ok)),
                Ok(AlarmObject::ReturnCode(ReturnCode::ObjectError)),
            ]
        );
    }

    #[test]
    fn test_alarm_query_request() {
        let body = [
            0x00, 0x01, 0x12, 0x08, 0x1A, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x04,
        ];
        let msg = alarm(0x44, 0x13, &body);
        assert_eq!(
            msg.objects[0],
            Ok(AlarmObject::Query(AlarmQueryRequest {
                unknown1: 0,
                query_type: QueryType::ByAlarmType,
                unknown2: 0,
                target: QueryTarget::AlarmType(AlarmType::AlarmS),
            }))
        );
    }

    fn alarm_s_dataset(going: [u8; 8]) -> Vec<u8> {
        let mut d = vec![0x2C, 0x00, 0x01, 0x04, 0x00, 0x00, 0x51, 0x01, 0x00, 0x01, 0x00, 0x01];
        d.extend_from_slice(&TS);
        d.extend_from_slice(&[0xFF, 0x04, 0x00, 0x08, 0x11]);
        d.extend_from_slice(&going);
        d.extend_from_slice(&[0xFF, 0x04, 0x00, 0x08, 0x22]);
        d
    }

    fn query_response(body: &[u8], cfg: DecoderConfig) -> AlarmQueryResponse {
        match data(0x84, 0x13, body, cfg).payload {
            Some(UserDataPayload::AlarmQueryResponse(r)) => r,
            other => panic!("expected alarm query response, got {:?}", other),
        }
    }

    #[test]
    fn test_query_response_with_header() {
        let ds = alarm_s_dataset([0u8; 8]);
        let mut body = vec![0x00, 0x01, 0xFF, 0x09];
        body.extend_from_slice(&(ds.len() as u16).to_be_bytes());
        body.extend_from_slice(&ds);
        let resp = query_response(&body, DecoderConfig::default());
        assert!(!resp.continuation);
        assert_eq!(resp.object_count, Some(1));
        assert_eq!(resp.complete_length, Some(ds.len() as u16));
        assert_eq!(resp.datasets.len(), 1);
        let set = resp.datasets[0].as_ref().unwrap();
        assert_eq!(set.alarm_type, AlarmType::AlarmS);
        let s = set.alarm_s.as_ref().unwrap();
        assert!(s.still_active);
        assert_eq!(s.coming_value.data.as_slice(), &[0x11]);
        assert_eq!(s.going_value.data.as_slice(), &[0x22]);
    }

    #[test]
    fn test_query_response_unknown_length_uses_remaining() {
        let mut body = vec![0x00, 0x01, 0xFF, 0x09, 0xFF, 0xFF];
        body.extend_from_slice(&alarm_s_dataset(TS));
        body.extend_from_slice(&alarm_s_dataset([0u8; 8]));
        let resp = query_response(&body, DecoderConfig::default());
        assert_eq!(resp.datasets.len(), 2);
        assert!(!resp.datasets[0].as_ref().unwrap().alarm_s.as_ref().unwrap().still_active);
    }

    #[test]
    fn test_query_response_end_marker() {
        let resp = query_response(&[0x00, 0x00], DecoderConfig::default());
        assert_eq!(resp.object_count, Some(0));
        assert!(resp.datasets.is_empty());
    }

    #[test]
    fn test_query_response_continuation() {
        let ds = alarm_s_dataset([0u8; 8]);
        let mut body = vec![ds.len() as u8];
        body.extend_from_slice(&ds);
        let resp = query_response(&body, DecoderConfig::default());
        assert!(resp.continuation);
        assert_eq!(resp.object_count, None);
        assert_eq!(resp.datasets.len(), 1);

        let plain = query_response(
            &[0x07, 0x00],
            DecoderConfig::new().with_alarm_query_heuristic(false),
        );
        assert!(!plain.continuation);
        assert_eq!(plain.function, 7);
        assert_eq!(plain.object_count, Some(0));
    }
}
