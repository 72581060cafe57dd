use super::{
    cursor::{Cursor, Opaque},
    error::{DecodeError, Result},
    frame::{
        comm::S7Header,
        param::{decode_params, ParameterBlock},
        types::Rosctr,
    },
    summary::Summary,
    userdata::{decode_userdata, UserDataBlock},
};
use crate::config::DecoderConfig;
use serde::Serialize;
use tracing::{debug, trace};

/// Everything after the header, selected by ROSCTR
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PduBody {
    /// Job and AckData
    Params {
        block: ParameterBlock,
        #[serde(skip_serializing_if = "Option::is_none")]
        param_rest: Option<Opaque>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data_rest: Option<Opaque>,
    },
    Userdata(UserDataBlock),
    /// Ack: the header says it all
    HeaderOnly,
    /// Sections no decoder could start on
    Undecoded {
        #[serde(skip_serializing_if = "Option::is_none")]
        param: Option<Opaque>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Opaque>,
    },
}

/// One decoded PDU
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedPdu {
    pub header: S7Header,
    /// Set when the buffer ends before the declared parameter and data
    /// sections do
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortfall: Option<DecodeError>,
    pub body: PduBody,
    /// Bytes after the declared data section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing: Option<Opaque>,
    pub summary: Summary,
}

/// PDU decoder bound to one configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct S7Decoder {
    cfg: DecoderConfig,
}

impl S7Decoder {
    pub fn new(cfg: DecoderConfig) -> Self {
        Self { cfg }
    }

    #[inline]
    pub fn config(&self) -> &DecoderConfig {
        &self.cfg
    }

    /// Decode one PDU starting at the protocol id byte.
    ///
    /// Fails only when the buffer is not S7comm or its header is cut short;
    /// anything malformed past the header is kept as opaque bytes.
    pub fn decode(&self, buf: &[u8]) -> Result<DecodedPdu> {
        let header = S7Header::parse(buf)?;
        let header_len = header.header_len();
        let param_len = header.param_len as usize;
        let data_len = header.data_len as usize;

        let declared = header_len + param_len + data_len;
        let shortfall = (buf.len() < declared).then(|| {
            debug!(declared, available = buf.len(), "PDU shorter than its header declares");
            DecodeError::Truncated {
                offset: buf.len(),
                needed: declared - buf.len(),
                available: 0,
            }
        });

        let mut root = Cursor::new(buf);
        root.skip(header_len)?;
        let mut param = root.sub_clamped(param_len);
        let mut data = root.sub_clamped(data_len);
        let trailing = root.opaque_rest(DecodeError::InconsistentLength {
            declared,
            consumed: buf.len(),
        });

        let body = match header.rosctr {
            Rosctr::Job | Rosctr::AckData => {
                self.params_body(header.rosctr, &mut param, &mut data)
            }
            Rosctr::Userdata => {
                let (p0, d0) = (param.clone(), data.clone());
                match decode_userdata(&mut param, &mut data, &self.cfg) {
                    Ok(block) => PduBody::Userdata(block),
                    Err(e) => undecoded(p0, d0, e),
                }
            }
            Rosctr::Ack if param.is_empty() && data.is_empty() => PduBody::HeaderOnly,
            Rosctr::Ack => {
                let reason = DecodeError::InconsistentLength {
                    declared: header_len,
                    consumed: header_len + param.window_len() + data.window_len(),
                };
                undecoded(param, data, reason)
            }
            rosctr => {
                trace!(%rosctr, "no body layout");
                let reason = DecodeError::unknown("rosctr", rosctr.code());
                undecoded(param, data, reason)
            }
        };
        let summary = Summary::build(&header, &body);
        Ok(DecodedPdu {
            header,
            shortfall,
            body,
            trailing,
            summary,
        })
    }

    fn params_body(
        &self,
        rosctr: Rosctr,
        param: &mut Cursor<'_>,
        data: &mut Cursor<'_>,
    ) -> PduBody {
        let (p0, d0) = (param.clone(), data.clone());
        match decode_params(rosctr, param, data) {
            Ok(block) => PduBody::Params {
                block,
                param_rest: param.surplus(),
                data_rest: data.surplus(),
            },
            Err(e) => {
                debug!(%rosctr, error = %e, "no function byte");
                undecoded(p0, d0, e)
            }
        }
    }
}

fn undecoded(mut param: Cursor<'_>, mut data: Cursor<'_>, reason: DecodeError) -> PduBody {
    PduBody::Undecoded {
        param: param.opaque_rest(reason.clone()),
        data: data.opaque_rest(reason),
    }
}

/// Decode one PDU with the default configuration.
pub fn decode(buf: &[u8]) -> Result<DecodedPdu> {
    S7Decoder::default().decode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::frame::types::Function;

    #[test]
    fn test_ack_is_header_only() {
        let buf = [0x32, 0x02, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let pdu = decode(&buf).unwrap();
        assert_eq!(pdu.body, PduBody::HeaderOnly);
        assert_eq!(pdu.shortfall, None);
        assert_eq!(pdu.trailing, None);
    }

    #[test]
    fn test_empty_job_params_are_undecoded() {
        let buf = [0x32, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00];
        let pdu = decode(&buf).unwrap();
        assert_eq!(pdu.body, PduBody::Undecoded { param: None, data: None });
    }

    #[test]
    fn test_shortfall_and_clamped_sections() {
        // Declares 8 parameter bytes; only 3 are present.
        let buf = [
            0x32, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x08, 0x00, 0x00, 0xF0, 0x00, 0x00,
        ];
        let pdu = decode(&buf).unwrap();
        assert_eq!(
            pdu.shortfall,
            Some(DecodeError::Truncated {
                offset: 13,
                needed: 5,
                available: 0
            })
        );
        let PduBody::Params {
            block: ParameterBlock::SetupCommunication(setup),
            param_rest,
            data_rest,
        } = pdu.body
        else {
            panic!("expected partial setup communication")
        };
        assert_eq!(setup.reserved, Some(0));
        assert_eq!(setup.max_amq_calling, None);
        let rest = setup.rest.unwrap();
        assert_eq!(rest.offset, 12);
        assert_eq!(rest.bytes.as_slice(), &[0x00]);
        assert!(rest.reason.is_truncated());
        assert_eq!(
            pdu.summary.info_line(),
            "ROSCTR:[Job] Function:[Setup communication]"
        );
        assert_eq!(param_rest, None);
        assert_eq!(data_rest, None);
    }

    #[test]
    fn test_trailing_bytes_after_data() {
        let buf = [
            0x32, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x08, 0x00, 0x00, 0xF0, 0x00, 0x00, 0x01,
            0x00, 0x01, 0x01, 0xE0, 0xEE,
        ];
        let pdu = decode(&buf).unwrap();
        let PduBody::Params { ref block, .. } = pdu.body else {
            panic!("expected params")
        };
        assert_eq!(block.function(), Function::SetupCommunication);
        let trailing = pdu.trailing.unwrap();
        assert_eq!(trailing.offset, 18);
        assert_eq!(trailing.bytes.as_slice(), &[0xEE]);
    }

    #[test]
    fn test_reserved_rosctr_is_opaque() {
        let buf = [0x32, 0x04, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x77];
        let pdu = decode(&buf).unwrap();
        let PduBody::Undecoded { param, .. } = pdu.body else {
            panic!("expected undecoded body")
        };
        assert_eq!(
            param.unwrap().reason,
            DecodeError::UnknownVariant {
                context: "rosctr",
                code: 4
            }
        );
    }

    #[test]
    fn test_not_s7comm() {
        assert_eq!(decode(&[0x03, 0x00, 0x00, 0x16]), Err(DecodeError::NotThisProtocol));
    }
}
