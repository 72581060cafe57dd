//! System status list reads: the request envelope, the response envelope
//! with its partial-list records, and continuation fragments.

mod names;
mod records;

pub use names::{
    block_type_name, component_index_name, led_name, szl_index_name, szl_list_name,
    system_area_name,
};
pub use records::{
    BlockTypeLimits, CommFunctions, CommGeneral, ComponentIdentification, FieldValue, LedBlink,
    LedOn, LedStatus, MemoryArea, MemoryType, ModeSelector, ModeTransition, ModuleIdentification,
    OperatingMode, ProtectionStatus, StartupSwitch, StartupType, StationStatus, SystemArea,
    SzlField, SzlRecord,
};

use super::{
    cursor::{Cursor, Opaque, Raw},
    error::Result,
    userdata::UserDataHeader,
};
use crate::config::DecoderConfig;
use serde::Serialize;
use tracing::debug;

wire_enum! {
    pub enum ModuleClass: u8 {
        Cpu = 0x0 => "CPU",
        Im = 0x4 => "IM",
        Fm = 0x8 => "FM",
        Cp = 0xC => "CP",
    }
}

/// SZL-ID split into its sub-fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SzlId {
    pub raw: u16,
    pub module_class: ModuleClass,
    /// Number of the partial list extract
    pub extract: u8,
    pub list_number: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
}

impl From<u16> for SzlId {
    fn from(raw: u16) -> Self {
        Self {
            raw,
            module_class: ModuleClass::from((raw >> 12) as u8),
            extract: ((raw >> 8) & 0x0F) as u8,
            list_number: (raw & 0xFF) as u8,
            name: szl_list_name(raw),
        }
    }
}

/// ID and index of a read request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SzlRequest {
    pub id: SzlId,
    pub index: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<&'static str>,
}

impl SzlRequest {
    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let id = SzlId::from(cur.read_u16()?);
        let index = cur.read_u16()?;
        Ok(Self {
            id,
            index,
            index_name: szl_index_name(id.raw, index),
        })
    }
}

/// One record of a partial list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SzlEntry {
    pub record: SzlRecord,
    /// Bytes of the entry past its known layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Raw>,
}

/// A partial list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SzlResponse {
    pub id: SzlId,
    pub index: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<&'static str>,
    /// Bytes per record
    pub list_length: u16,
    /// Records announced by the header, whether or not they fit
    pub list_count: u16,
    pub records: Vec<Result<SzlEntry>>,
    /// Bytes after the last record that fits, completed by a later PDU
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<Opaque>,
}

impl SzlResponse {
    pub const HEAD_LEN: usize = 8;

    pub fn decode(cfg: &DecoderConfig, cur: &mut Cursor<'_>) -> Result<Self> {
        let id = SzlId::from(cur.read_u16()?);
        let index = cur.read_u16()?;
        let list_length = cur.read_u16()?;
        let list_count = cur.read_u16()?;

        let len = list_length as usize;
        let mut count = if len == 0 { 0 } else { list_count as usize };
        if count * len > cur.remaining() {
            count = cur.remaining() / len;
            debug!(
                id = format_args!("{:#06x}", id.raw),
                announced = list_count,
                fits = count,
                "partial list continues in a later PDU"
            );
        }
        let count = cfg.clamp_count(count);
        let records = cur.collect(count, |c, _| {
            let mut entry = c.sub(len)?;
            let record = if cfg.szl_records {
                SzlRecord::decode(id, index, &mut entry)?
            } else {
                SzlRecord::Raw(entry.raw_rest())
            };
            let extra = (!entry.is_empty()).then(|| entry.raw_rest());
            Ok(SzlEntry { record, extra })
        });
        Ok(Self {
            id,
            index,
            index_name: szl_index_name(id.raw, index),
            list_length,
            list_count,
            records,
            rest: cur.surplus(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SzlData {
    Request(SzlRequest),
    /// Follow-up fragment of a partial list; its records cannot be told
    /// apart without the first fragment
    Continuation(Raw),
    Response(SzlResponse),
    /// Neither a request nor a response
    Raw(Raw),
}

/// Decode a Read SZL body, steered by the user-data header that carried it.
pub fn decode_szl(
    header: &UserDataHeader,
    cfg: &DecoderConfig,
    cur: &mut Cursor<'_>,
) -> Result<SzlData> {
    let kind = header.kind;
    if kind.is_request() {
        return SzlRequest::decode(cur).map(SzlData::Request);
    }
    if !kind.is_response() {
        return Ok(SzlData::Raw(cur.raw_rest()));
    }
    let dur = header.data_unit_reference.unwrap_or(0);
    let ldu = header.last_data_unit.unwrap_or(0);
    if dur != 0 && ldu != 0 {
        debug!(dur, "SZL continuation fragment");
        return Ok(SzlData::Continuation(cur.raw_rest()));
    }
    SzlResponse::decode(cfg, cur).map(SzlData::Response)
}
