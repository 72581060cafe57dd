use super::super::{
    cursor::{Cursor, Raw},
    error::Result,
};
use super::types::{DataTransportSize, ReturnCode};
use serde::Serialize;
use tracing::debug;

/// When a fill byte follows an odd-length payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    /// Between values only; the last value is never padded (ReadVar, WriteVar, cyclic)
    ExceptLast,
    /// After every odd payload (variable table responses)
    Always,
}

/// One returned or written value, paired by position with a request item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataValue {
    pub return_code: ReturnCode,
    /// Only meaningful for Reserved, Ok and ObjectError
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_size: Option<DataTransportSize>,
    /// Declared length, in bits or bytes depending on the transport size
    pub length: u16,
    pub data: Raw,
    /// A fill byte was consumed after the payload
    pub fill_byte: bool,
}

impl DataValue {
    pub const HEAD_LEN: usize = 4;

    /// Decode one value. `last` marks the final value of its list.
    pub fn decode(cur: &mut Cursor<'_>, last: bool, rule: FillRule) -> Result<Self> {
        let head: [u8; 4] = cur.read_array()?;
        let return_code = ReturnCode::from(head[0]);
        let (transport_size, length) = if return_code.declares_length() {
            (
                Some(DataTransportSize::from(head[1])),
                u16::from_be_bytes([head[2], head[3]]),
            )
        } else {
            (None, 0)
        };
        let payload_len = match transport_size {
            Some(ts) if return_code.carries_payload() => ts.payload_len(length),
            _ => 0,
        };
        let data = match cur.raw(payload_len) {
            Ok(data) => data,
            Err(e) => {
                // Nothing after a short payload lines up with a value head.
                cur.rest();
                return Err(e);
            }
        };
        let wants_fill = payload_len % 2 == 1
            && match rule {
                FillRule::ExceptLast => !last,
                FillRule::Always => true,
            };
        let fill_byte = wants_fill && !cur.is_empty();
        if fill_byte {
            cur.skip(1)?;
        } else if wants_fill {
            debug!(offset = cur.offset(), "fill byte missing at end of data section");
        }
        Ok(Self {
            return_code,
            transport_size,
            length,
            data,
            fill_byte,
        })
    }

    /// Payload bytes for the declared length
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.data.len()
    }
}

/// Decode up to `count` data values from `cur`.
pub fn decode_values(cur: &mut Cursor<'_>, count: usize, rule: FillRule) -> Vec<Result<DataValue>> {
    cur.collect(count, |c, index| {
        DataValue::decode(c, index + 1 == count, rule)
    })
}

/// Decode up to `count` write confirmations, one return code byte each.
pub fn decode_return_codes(cur: &mut Cursor<'_>, count: usize) -> Vec<Result<ReturnCode>> {
    cur.collect(count, |c, _| c.read_u8().map(ReturnCode::from))
}

/// Decode `item_count` data values starting at `offset` of `buf` and return
/// them with the offset right after the last one consumed.
pub fn decode_data_values(
    buf: &[u8],
    offset: usize,
    item_count: usize,
) -> (Vec<Result<DataValue>>, usize) {
    let mut cur = Cursor::at(buf.get(offset..).unwrap_or_default(), offset);
    let values = decode_values(&mut cur, item_count, FillRule::ExceptLast);
    (values, cur.offset())
}

/// Decode `item_count` write confirmations starting at `offset` of `buf`.
pub fn decode_write_confirmations(
    buf: &[u8],
    offset: usize,
    item_count: usize,
) -> (Vec<Result<ReturnCode>>, usize) {
    let mut cur = Cursor::at(buf.get(offset..).unwrap_or_default(), offset);
    let codes = decode_return_codes(&mut cur, item_count);
    (codes, cur.offset())
}
