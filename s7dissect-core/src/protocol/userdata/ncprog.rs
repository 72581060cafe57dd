use super::super::{
    cursor::{latin1, Cursor, Raw},
    error::Result,
};
use super::{Context, UserDataPayload};
use serde::Serialize;

wire_enum! {
    pub enum NcSubfunction: u8 {
        RequestDownload = 0x01 => "Request download",
        DownloadBlock = 0x02 => "Download block",
        ContinueDownload = 0x03 => "Continue download",
        DownloadEnded = 0x04 => "Download ended",
        StartUpload = 0x06 => "Start upload",
        Upload = 0x07 => "Upload",
        ContinueUpload = 0x08 => "Continue upload",
    }
}

/// NC program file transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NcProgramData {
    /// Download request: the file to write
    Filename(String),
    StartUpload {
        unack_count: u8,
        unknown: u8,
        filename: String,
    },
    DownloadAck {
        unack_count: u8,
        unknown: u8,
    },
    Continue {
        unack_count: u8,
        more: u8,
    },
    /// File content or an unknown exchange
    Chunk {
        unknown: u16,
        bytes: Raw,
    },
}

pub(super) fn decode(
    ctx: &Context<'_>,
    sub: NcSubfunction,
    cur: &mut Cursor<'_>,
) -> Result<UserDataPayload> {
    let kind = ctx.header.kind;
    let data = match sub {
        NcSubfunction::RequestDownload if kind.is_request() => {
            NcProgramData::Filename(ascii_rest(cur))
        }
        NcSubfunction::StartUpload if kind.is_request() => NcProgramData::StartUpload {
            unack_count: cur.read_u8()?,
            unknown: cur.read_u8()?,
            filename: ascii_rest(cur),
        },
        NcSubfunction::RequestDownload if kind.is_response() => NcProgramData::DownloadAck {
            unack_count: cur.read_u8()?,
            unknown: cur.read_u8()?,
        },
        NcSubfunction::ContinueUpload | NcSubfunction::ContinueDownload if kind.is_push() => {
            NcProgramData::Continue {
                unack_count: cur.read_u8()?,
                more: cur.read_u8()?,
            }
        }
        _ if cur.remaining() >= 4 => NcProgramData::Chunk {
            unknown: cur.read_u16()?,
            bytes: cur.raw_rest(),
        },
        _ => return Ok(UserDataPayload::Raw(cur.raw_rest())),
    };
    Ok(UserDataPayload::NcProgram(data))
}

fn ascii_rest(cur: &mut Cursor<'_>) -> String {
    latin1(cur.rest())
}

#[cfg(test)]
mod tests {
    use super::super::decode_userdata;
    use super::*;
    use crate::DecoderConfig;

    fn payload(type_group: u8, sub: u8, body: &[u8]) -> Option<UserDataPayload> {
        let p = [0x00, 0x01, 0x12, 0x04, 0x11, type_group, sub, 0x00];
        let mut d = vec![0xFF, 0x09];
        d.extend_from_slice(&(body.len() as u16).to_be_bytes());
        d.extend_from_slice(body);
        decode_userdata(
            &mut Cursor::new(&p),
            &mut Cursor::new(&d),
            &DecoderConfig::default(),
        )
        .unwrap()
        .data
        .unwrap()
        .payload
    }

    #[test]
    fn test_request_download_filename() {
        assert_eq!(
            payload(0x7F, 0x01, b"/_N_MPF_DIR/_N_TEST_MPF"),
            Some(UserDataPayload::NcProgram(NcProgramData::Filename(
                "/_N_MPF_DIR/_N_TEST_MPF".into()
            )))
        );
    }

    #[test]
    fn test_start_upload_request() {
        let mut body = vec![0x04, 0x00];
        body.extend_from_slice(b"/_N_F_XFER");
        assert_eq!(
            payload(0x7F, 0x06, &body),
            Some(UserDataPayload::NcProgram(NcProgramData::StartUpload {
                unack_count: 4,
                unknown: 0,
                filename: "/_N_F_XFER".into(),
            }))
        );
    }

    #[test]
    fn test_continue_push() {
        assert_eq!(
            payload(0x3F, 0x08, &[0x01, 0x01]),
            Some(UserDataPayload::NcProgram(NcProgramData::Continue {
                unack_count: 1,
                more: 1,
            }))
        );
    }

    #[test]
    fn test_chunk_needs_four_bytes() {
        assert_eq!(
            payload(0xBF, 0x07, &[0x00, 0x02, 0x41, 0x42]),
            Some(UserDataPayload::NcProgram(NcProgramData::Chunk {
                unknown: 2,
                bytes: Raw::from(&b"AB"[..]),
            }))
        );
        assert!(matches!(
            payload(0xBF, 0x07, &[0x00, 0x02, 0x41]),
            Some(UserDataPayload::Raw(_))
        ));
    }
}
