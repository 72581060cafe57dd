use super::super::{
    cursor::Cursor,
    error::Result,
    frame::{
        data::{decode_values, DataValue, FillRule},
        item::{decode_items, Item},
    },
};
use super::{Context, UserDataPayload};
use serde::Serialize;

wire_enum! {
    pub enum CyclicSubfunction: u8 {
        Memory = 0x01 => "Memory",
        Unsubscribe = 0x04 => "Unsubscribe",
        ChangeDriven = 0x05 => "Change driven",
    }
}

wire_enum! {
    pub enum Timebase: u8 {
        TenthSecond = 0 => "0.1s",
        Second = 1 => "1s",
        TenSeconds = 2 => "10s",
    }
}

/// Subscription request: items sampled every `interval` timebase units
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CyclicSubscribe {
    pub item_count: u8,
    pub timebase: Timebase,
    pub interval: u8,
    pub items: Vec<Result<Item>>,
}

/// Values pushed for, or returned to, a subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CyclicValues {
    pub item_count: u8,
    pub values: Vec<Result<DataValue>>,
}

pub(super) fn decode(
    ctx: &Context<'_>,
    sub: CyclicSubfunction,
    cur: &mut Cursor<'_>,
) -> Result<UserDataPayload> {
    if !matches!(sub, CyclicSubfunction::Memory | CyclicSubfunction::ChangeDriven) {
        return Ok(UserDataPayload::Raw(cur.raw_rest()));
    }
    // reserved
    cur.skip(1)?;
    let item_count = cur.read_u8()?;
    let count = ctx.cfg.clamp_count(item_count as usize);
    if ctx.header.kind.is_request() {
        let timebase = Timebase::from(cur.read_u8()?);
        let interval = cur.read_u8()?;
        let items = decode_items(cur, count, true);
        Ok(UserDataPayload::CyclicSubscribe(CyclicSubscribe {
            item_count,
            timebase,
            interval,
            items,
        }))
    } else {
        let values = decode_values(cur, count, FillRule::ExceptLast);
        Ok(UserDataPayload::CyclicValues(CyclicValues { item_count, values }))
    }
}
