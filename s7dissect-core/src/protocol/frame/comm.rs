use super::super::{
    cursor::Cursor,
    error::{DecodeError, ErrorClass, ErrorCode, Result},
};
use super::types::Rosctr;
use serde::Serialize;

/// S7 protocol identifier, first byte of every PDU
pub const PROTOCOL_ID: u8 = 0x32;

/// Error class/code pair of an Ack/AckData header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderError {
    pub class: ErrorClass,
    pub code: u8,
    /// `class << 8 | code` looked up in the shared error table
    pub error: ErrorCode,
}

/// S7 Header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct S7Header {
    pub protocol_id: u8,
    pub rosctr: Rosctr,
    pub redundancy_id: u16,
    pub pdu_ref: u16,
    pub param_len: u16,
    pub data_len: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<HeaderError>,
}

impl S7Header {
    pub const LEN: usize = 10;
    pub const ACK_LEN: usize = 12;

    /// Cheap recognition check: minimum length, protocol id and ROSCTR range.
    pub fn is_s7comm(input: &[u8]) -> bool {
        input.len() >= Self::LEN && input[0] == PROTOCOL_ID && (1..=7).contains(&input[1])
    }

    /// Parse an S7 header from the start of a PDU. Ack and AckData headers
    /// carry two more bytes for the error class and code.
    pub fn parse(input: &[u8]) -> Result<S7Header> {
        if !Self::is_s7comm(input) {
            return Err(DecodeError::NotThisProtocol);
        }
        let mut cur = Cursor::new(input);
        let protocol_id = cur.read_u8()?;
        let rosctr = Rosctr::from(cur.read_u8()?);
        let redundancy_id = cur.read_u16()?;
        let pdu_ref = cur.read_u16()?;
        let param_len = cur.read_u16()?;
        let data_len = cur.read_u16()?;
        let error = if rosctr.has_error_fields() {
            let class = cur.read_u8()?;
            let code = cur.read_u8()?;
            Some(HeaderError {
                class: ErrorClass::from(class),
                code,
                error: ErrorCode::from_class_code(class, code),
            })
        } else {
            None
        };
        Ok(S7Header {
            protocol_id,
            rosctr,
            redundancy_id,
            pdu_ref,
            param_len,
            data_len,
            error,
        })
    }

    #[inline]
    pub fn header_len(&self) -> usize {
        if self.rosctr.has_error_fields() {
            Self::ACK_LEN
        } else {
            Self::LEN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_header_has_no_error_fields() {
        let buf = [0x32, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00];
        let h = S7Header::parse(&buf).unwrap();
        assert_eq!(h.rosctr, Rosctr::Job);
        assert_eq!(h.pdu_ref, 1);
        assert_eq!(h.param_len, 2);
        assert_eq!(h.data_len, 0);
        assert_eq!(h.error, None);
        assert_eq!(h.header_len(), 10);
    }

    #[test]
    fn test_ack_data_header_reads_error_fields() {
        let buf = [
            0x32, 0x03, 0x00, 0x00, 0x12, 0x34, 0x00, 0x02, 0x00, 0x00, 0x85, 0x00,
        ];
        let h = S7Header::parse(&buf).unwrap();
        assert_eq!(h.header_len(), 12);
        let err = h.error.unwrap();
        assert_eq!(err.class, ErrorClass::Supplies);
        assert_eq!(err.error, ErrorCode::FrameError);
    }

    #[test]
    fn test_rejects_foreign_buffers() {
        assert_eq!(
            S7Header::parse(&[0x32, 0x01, 0x00]),
            Err(DecodeError::NotThisProtocol)
        );
        let mut buf = [0x32, 0x01, 0, 0, 0, 0, 0, 0, 0, 0];
        buf[0] = 0x33;
        assert_eq!(S7Header::parse(&buf), Err(DecodeError::NotThisProtocol));
        buf[0] = 0x32;
        buf[1] = 0x08;
        assert_eq!(S7Header::parse(&buf), Err(DecodeError::NotThisProtocol));
        buf[1] = 0x00;
        assert_eq!(S7Header::parse(&buf), Err(DecodeError::NotThisProtocol));
    }

    #[test]
    fn test_short_ack_header_is_truncated() {
        let buf = [0x32, 0x02, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(S7Header::parse(&buf).unwrap_err().is_truncated());
    }
}
