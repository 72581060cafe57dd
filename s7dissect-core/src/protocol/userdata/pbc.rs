use super::super::{
    cursor::{Cursor, Raw},
    error::Result,
    frame::SyntaxId,
};
use serde::Serialize;

wire_enum! {
    pub enum PbcSubfunction: u8 {
        BsendBrecv = 0x01 => "BSEND/BRECV",
    }
}

/// BSEND/BRECV segment: an R_ID head and the segment bytes.
///
/// The first segment of a transfer also carries the total length inside
/// `payload`; it stays undecoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PbcData {
    pub spec_type: u8,
    pub spec_length: u8,
    pub syntax_id: SyntaxId,
    pub unknown: u8,
    pub r_id: u32,
    pub payload: Raw,
}

impl PbcData {
    pub const HEAD_LEN: usize = 8;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            spec_type: cur.read_u8()?,
            spec_length: cur.read_u8()?,
            syntax_id: SyntaxId::from(cur.read_u8()?),
            unknown: cur.read_u8()?,
            r_id: cur.read_u32()?,
            payload: cur.raw_rest(),
        })
    }
}
