#![allow(dead_code)]

use std::sync::Once;
use tracing::Level;

static INIT_TRACING: Once = Once::new();

pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_target(false)
            .without_time()
            .try_init();
    });
}

fn pdu(rosctr: u8, error: Option<[u8; 2]>, param: &[u8], data: &[u8]) -> Vec<u8> {
    let mut buf = vec![0x32, rosctr, 0x00, 0x00, 0x00, 0x01];
    buf.extend_from_slice(&(param.len() as u16).to_be_bytes());
    buf.extend_from_slice(&(data.len() as u16).to_be_bytes());
    if let Some(e) = error {
        buf.extend_from_slice(&e);
    }
    buf.extend_from_slice(param);
    buf.extend_from_slice(data);
    buf
}

/// Job PDU around `param` and `data`
pub fn job(param: &[u8], data: &[u8]) -> Vec<u8> {
    pdu(0x01, None, param, data)
}

/// AckData PDU without an error
pub fn ack_data(param: &[u8], data: &[u8]) -> Vec<u8> {
    pdu(0x03, Some([0x00, 0x00]), param, data)
}

/// Userdata PDU around `param` and `data`
pub fn userdata(param: &[u8], data: &[u8]) -> Vec<u8> {
    pdu(0x07, None, param, data)
}

/// 8-byte user-data parameter header
pub fn userdata_param(type_group: u8, subfunction: u8) -> Vec<u8> {
    vec![0x00, 0x01, 0x12, 0x04, 0x11, type_group, subfunction, 0x00]
}

/// 12-byte response parameter header with fragmentation fields
pub fn userdata_response_param(
    type_group: u8,
    subfunction: u8,
    data_unit_reference: u8,
    last_data_unit: u8,
) -> Vec<u8> {
    vec![
        0x00,
        0x01,
        0x12,
        0x08,
        0x12,
        type_group,
        subfunction,
        0x01,
        data_unit_reference,
        last_data_unit,
        0x00,
        0x00,
    ]
}

/// S7Any item for DB1 at byte `byte`
pub fn s7any_item(byte: u16) -> Vec<u8> {
    let raw = (byte as u32) << 3;
    let addr = raw.to_be_bytes();
    vec![
        0x12, 0x0A, 0x10, 0x02, 0x00, 0x01, 0x00, 0x01, 0x84, addr[1], addr[2], addr[3],
    ]
}

/// DBRead item with `areas` (length, db, start) entries
pub fn dbread_item(areas: &[(u8, u16, u16)]) -> Vec<u8> {
    let mut v = vec![0x12, (areas.len() * 5 + 2) as u8, 0xB0, areas.len() as u8];
    for &(len, db, start) in areas {
        v.push(len);
        v.extend_from_slice(&db.to_be_bytes());
        v.extend_from_slice(&start.to_be_bytes());
    }
    v
}

/// NCK item
pub fn nck_item(module: u8) -> Vec<u8> {
    vec![0x12, 0x08, 0x82, 0x41, 0x00, 0x01, 0x00, 0x02, module, 0x01]
}

/// TIA-1200 symbolic item with `lids` LID entries
pub fn tia1200_item(lids: usize) -> Vec<u8> {
    let mut v = vec![
        0x12,
        (10 + lids * 4) as u8,
        0xB2,
        0xFF,
        0x8A,
        0x0E,
        0x00,
        0x05,
        0xDE,
        0xAD,
        0xBE,
        0xEF,
    ];
    for i in 0..lids {
        v.extend_from_slice(&(0x4000_0000u32 | i as u32).to_be_bytes());
    }
    v
}

/// Drive-ES Any item
pub fn drive_es_item() -> Vec<u8> {
    vec![0x12, 0x0A, 0xA2, 0x01, 0x00, 0x02, 0x00, 0x03, 0x03, 0xE8, 0x00, 0x01]
}

/// PBC R_ID item
pub fn pbc_rid_item(r_id: u32) -> Vec<u8> {
    let mut v = vec![0x12, 0x06, 0x13, 0x00];
    v.extend_from_slice(&r_id.to_be_bytes());
    v
}

/// Item with a syntax id that has no known layout, carrying `body` as-is
pub fn unknown_syntax_item(syntax_id: u8, body: &[u8]) -> Vec<u8> {
    let mut v = vec![0x12, (body.len() + 1) as u8, syntax_id];
    v.extend_from_slice(body);
    v
}

/// Data value with an Ok return code and octet-string payload
pub fn octet_value(payload: &[u8]) -> Vec<u8> {
    let mut v = vec![0xFF, 0x09];
    v.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    v.extend_from_slice(payload);
    v
}
