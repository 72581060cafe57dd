use super::super::{
    cursor::{Cursor, Raw},
    error::{DecodeError, Result},
    tables::nck_module_name,
};
use super::types::{Area, ItemTransportSize, SyntaxId};
use serde::Serialize;
use tracing::trace;

/// Variable specification marker preceding every item
pub const VAR_SPEC: u8 = 0x12;

/// One variable specification of a ReadVar/WriteVar or cyclic parameter block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub spec_type: u8,
    /// Bytes following this field, starting with the syntax id
    pub spec_length: u8,
    pub syntax_id: SyntaxId,
    pub address: ItemAddress,
}

impl Item {
    /// Bytes the item occupies on the wire, head included.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.spec_length as usize + 2
    }

    /// Decode one item. The variant body is read through a cursor bounded to
    /// `spec_length`, so on success and on a variant error alike `cur` ends
    /// exactly `spec_length + 2` bytes further.
    pub fn decode(cur: &mut Cursor<'_>) -> Result<Item> {
        let head: [u8; 2] = cur.read_array()?;
        let (spec_type, spec_length) = (head[0], head[1]);
        let mut body = match cur.sub(spec_length as usize) {
            Ok(body) => body,
            Err(e) => {
                // The item runs past the window; nothing after it can be aligned.
                cur.rest();
                return Err(e);
            }
        };
        let syntax_id = SyntaxId::from(body.read_u8()?);
        let address = ItemAddress::decode(spec_type, spec_length, syntax_id, &mut body)?;
        Ok(Item {
            spec_type,
            spec_length,
            syntax_id,
            address,
        })
    }
}

/// Address variants, selected by `(spec_type, spec_length, syntax_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemAddress {
    S7Any(S7AnyAddress),
    DbRead(Vec<DbReadArea>),
    Tia1200(Tia1200Address),
    Nck(NckAddress),
    DriveEsAny(DriveEsAnyAddress),
    PbcRid { unknown: u8, r_id: u32 },
    /// Combination without a known layout; body kept as-is
    Unknown(Raw),
}

impl ItemAddress {
    fn decode(
        spec_type: u8,
        spec_length: u8,
        syntax_id: SyntaxId,
        body: &mut Cursor<'_>,
    ) -> Result<ItemAddress> {
        if spec_type != VAR_SPEC {
            trace!(spec_type, "unknown variable specification type");
            return Ok(ItemAddress::Unknown(body.raw_rest()));
        }
        let address = match (spec_length, syntax_id) {
            (10, SyntaxId::S7Any) => ItemAddress::S7Any(S7AnyAddress::decode(body)?),
            (l, SyntaxId::DbRead) if l >= 7 => ItemAddress::DbRead(DbReadArea::decode_list(body)?),
            (l, SyntaxId::Tia1200Symbolic) if l >= 14 => {
                ItemAddress::Tia1200(Tia1200Address::decode(spec_length, body)?)
            }
            (8, SyntaxId::Nck | SyntaxId::NckMetric | SyntaxId::NckInch) => {
                ItemAddress::Nck(NckAddress::decode(body)?)
            }
            (10, SyntaxId::DriveEsAny) => ItemAddress::DriveEsAny(DriveEsAnyAddress::decode(body)?),
            (l, SyntaxId::PbcRid) if l >= 6 => ItemAddress::PbcRid {
                unknown: body.read_u8()?,
                r_id: body.read_u32()?,
            },
            _ => {
                trace!(%syntax_id, spec_length, "item layout not recognized");
                ItemAddress::Unknown(body.raw_rest())
            }
        };
        Ok(address)
    }
}

/// Byte.bit address, or a plain number for counters and timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnyAddress {
    ByteBit { byte: u32, bit: u8 },
    Number(u32),
}

impl AnyAddress {
    /// Split the 24-bit packed address field for `area`.
    pub fn unpack(area: Area, raw: u32) -> Self {
        if area.is_numbered() {
            AnyAddress::Number(raw & 0xFFFF)
        } else {
            AnyAddress::ByteBit {
                byte: raw >> 3,
                bit: (raw & 0x07) as u8,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct S7AnyAddress {
    pub transport_size: ItemTransportSize,
    pub length: u16,
    pub db_number: u16,
    pub area: Area,
    pub address: AnyAddress,
}

impl S7AnyAddress {
    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let transport_size = ItemTransportSize::from(cur.read_u8()?);
        let length = cur.read_u16()?;
        let db_number = cur.read_u16()?;
        let area = Area::from(cur.read_u8()?);
        let raw = cur.read_u24()?;
        Ok(Self {
            transport_size,
            length,
            db_number,
            area,
            address: AnyAddress::unpack(area, raw),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DbReadArea {
    pub length: u8,
    pub db_number: u16,
    pub start: u16,
}

impl DbReadArea {
    pub const LEN: usize = 5;

    fn decode_list(cur: &mut Cursor<'_>) -> Result<Vec<Self>> {
        let count = cur.read_u8()? as usize;
        let mut out = Vec::with_capacity(count.min(cur.remaining() / Self::LEN));
        for _ in 0..count {
            out.push(DbReadArea {
                length: cur.read_u8()?,
                db_number: cur.read_u16()?,
                start: cur.read_u16()?,
            });
        }
        Ok(out)
    }
}

/// Area selector of a TIA-1200 symbolic address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tia1200Area1 {
    /// `0x8A0E`: area2 carries a DB number
    Db,
    /// `0x0000`: area2 carries an IQMCT code
    Iqmct,
    Unknown(u16),
}

impl From<u16> for Tia1200Area1 {
    fn from(v: u16) -> Self {
        match v {
            0x8A0E => Tia1200Area1::Db,
            0x0000 => Tia1200Area1::Iqmct,
            other => Tia1200Area1::Unknown(other),
        }
    }
}

wire_enum! {
    /// IQMCT area codes of TIA-1200 symbolic addressing
    pub enum IqmctArea: u16 {
        Inputs = 0x50 => "Input area (I)",
        Outputs = 0x51 => "Output area (Q)",
        Flags = 0x52 => "Flags (M)",
        Counter = 0x53 => "Counter (C)",
        Timer = 0x54 => "Timer (T)",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tia1200Area2 {
    DbNumber(u16),
    Iqmct(IqmctArea),
    Raw(u16),
}

wire_enum! {
    /// Access flags in the top nibble of a TIA-1200 LID entry
    pub enum LidFlags: u8 {
        EncapsulatedLid = 0x2 => "Encapsulated LID",
        EncapsulatedIndex = 0x3 => "Encapsulated Index",
        ObtainByLid = 0x4 => "Obtain by LID",
        ObtainByIndex = 0x5 => "Obtain by Index",
        PartStart = 0x6 => "Part Start Address",
        PartLength = 0x7 => "Part Length",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tia1200Lid {
    pub flags: LidFlags,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tia1200Address {
    pub reserved: u8,
    pub area1: Tia1200Area1,
    pub area2: Tia1200Area2,
    pub crc: u32,
    pub lids: Vec<Tia1200Lid>,
}

impl Tia1200Address {
    fn decode(spec_length: u8, cur: &mut Cursor<'_>) -> Result<Self> {
        let reserved = cur.read_u8()?;
        let area1 = Tia1200Area1::from(cur.read_u16()?);
        let raw2 = cur.read_u16()?;
        let area2 = match area1 {
            Tia1200Area1::Db => Tia1200Area2::DbNumber(raw2),
            Tia1200Area1::Iqmct => Tia1200Area2::Iqmct(IqmctArea::from(raw2)),
            Tia1200Area1::Unknown(_) => Tia1200Area2::Raw(raw2),
        };
        let crc = cur.read_u32()?;
        let count = (spec_length as usize - 10) / 4;
        let mut lids = Vec::with_capacity(count);
        for _ in 0..count {
            let v = cur.read_u32()?;
            lids.push(Tia1200Lid {
                flags: LidFlags::from((v >> 28) as u8),
                value: v & 0x0FFF_FFFF,
            });
        }
        Ok(Self {
            reserved,
            area1,
            area2,
            crc,
            lids,
        })
    }
}

wire_enum! {
    /// Sinumerik NCK address area, top three bits of the area/unit byte
    pub enum NckArea: u8 {
        Nck = 0 => "N - NCK",
        ModeGroup = 1 => "B - Mode group",
        Channel = 2 => "C - Channel",
        Axis = 3 => "A - Axis",
        Tool = 4 => "T - Tool",
        FeedDrive = 5 => "V - Feed drive",
        MainDrive = 6 => "H - Main drive",
        Mmc = 7 => "M - MMC",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NckAddress {
    pub area: NckArea,
    pub unit: u8,
    pub column: u16,
    pub line: u16,
    pub module: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_name: Option<&'static str>,
    pub linecount: u8,
}

impl NckAddress {
    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let area_unit = cur.read_u8()?;
        let column = cur.read_u16()?;
        let line = cur.read_u16()?;
        let module = cur.read_u8()?;
        let linecount = cur.read_u8()?;
        Ok(Self {
            area: NckArea::from(area_unit >> 5),
            unit: area_unit & 0x1F,
            column,
            line,
            module,
            module_name: nck_module_name(module),
            linecount,
        })
    }
}

/// Drive-ES parameter address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DriveEsAnyAddress {
    pub unknown1: u8,
    pub unknown2: u16,
    pub unknown3: u16,
    pub parameter_number: u16,
    pub parameter_index: u16,
}

impl DriveEsAnyAddress {
    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            unknown1: cur.read_u8()?,
            unknown2: cur.read_u16()?,
            unknown3: cur.read_u16()?,
            parameter_number: cur.read_u16()?,
            parameter_index: cur.read_u16()?,
        })
    }
}

/// Decode `count` items from `cur`.
///
/// With `fill_odd` set, a fill byte follows every odd-length item except the
/// last, as in cyclic subscriptions.
pub fn decode_items(cur: &mut Cursor<'_>, count: usize, fill_odd: bool) -> Vec<Result<Item>> {
    cur.collect(count, |c, index| {
        let item = Item::decode(c)?;
        if fill_odd && item.wire_len() % 2 == 1 && index + 1 < count && !c.is_empty() {
            c.skip(1)?;
        }
        Ok(item)
    })
}

/// Decode the item at `offset` of `buf` and return it with the offset right
/// after it.
pub fn decode_item(buf: &[u8], offset: usize) -> Result<(Item, usize)> {
    let window = buf.get(offset..).ok_or(DecodeError::Truncated {
        offset,
        needed: 2,
        available: 0,
    })?;
    let mut cur = Cursor::at(window, offset);
    let item = Item::decode(&mut cur)?;
    Ok((item, cur.offset()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s7any(area: u8, addr: [u8; 3]) -> Vec<u8> {
        let mut v = vec![0x12, 0x0A, 0x10, 0x02, 0x00, 0x04, 0x00, 0x01, area];
        v.extend_from_slice(&addr);
        v
    }

    #[test]
    fn test_s7any_byte_bit() {
        // DB1.DBX 10.3
        let buf = s7any(0x84, [0x00, 0x00, 0x53]);
        let (item, next) = decode_item(&buf, 0).unwrap();
        assert_eq!(next, 12);
        let ItemAddress::S7Any(a) = item.address else {
            panic!("expected S7Any")
        };
        assert_eq!(a.area, Area::DataBlock);
        assert_eq!(a.db_number, 1);
        assert_eq!(a.length, 4);
        assert_eq!(a.address, AnyAddress::ByteBit { byte: 10, bit: 3 });
    }

    #[test]
    fn test_s7any_timer_is_numbered() {
        let buf = s7any(0x1D, [0x00, 0x00, 0x05]);
        let (item, _) = decode_item(&buf, 0).unwrap();
        let ItemAddress::S7Any(a) = item.address else {
            panic!("expected S7Any")
        };
        assert_eq!(a.address, AnyAddress::Number(5));
    }

    #[test]
    fn test_dbread_list() {
        let buf = [
            0x12, 0x0C, 0xB0, 0x02, 0x04, 0x00, 0x0A, 0x00, 0x10, 0x02, 0x00, 0x0B, 0x00, 0x20,
        ];
        let (item, next) = decode_item(&buf, 0).unwrap();
        assert_eq!(next, 14);
        let ItemAddress::DbRead(areas) = item.address else {
            panic!("expected DbRead")
        };
        assert_eq!(areas.len(), 2);
        assert_eq!(
            areas[1],
            DbReadArea {
                length: 2,
                db_number: 11,
                start: 0x20
            }
        );
    }

    #[test]
    fn test_tia1200_lids() {
        let buf = [
            0x12, 0x12, 0xB2, 0xFF, 0x8A, 0x0E, 0x00, 0x05, 0xDE, 0xAD, 0xBE, 0xEF, 0x40, 0x00,
            0x00, 0x0A, 0x70, 0x00, 0x00, 0x04,
        ];
        let (item, next) = decode_item(&buf, 0).unwrap();
        assert_eq!(next, 20);
        let ItemAddress::Tia1200(t) = item.address else {
            panic!("expected Tia1200")
        };
        assert_eq!(t.area1, Tia1200Area1::Db);
        assert_eq!(t.area2, Tia1200Area2::DbNumber(5));
        assert_eq!(t.crc, 0xDEADBEEF);
        assert_eq!(t.lids.len(), 2);
        assert_eq!(t.lids[0].flags, LidFlags::ObtainByLid);
        assert_eq!(t.lids[0].value, 10);
        assert_eq!(t.lids[1].flags, LidFlags::PartLength);
    }

    #[test]
    fn test_nck_address() {
        let buf = [0x12, 0x08, 0x82, 0x41, 0x00, 0x01, 0x00, 0x02, 0x7F, 0x01];
        let (item, next) = decode_item(&buf, 0).unwrap();
        assert_eq!(next, 10);
        let ItemAddress::Nck(n) = item.address else {
            panic!("expected Nck")
        };
        assert_eq!(n.area, NckArea::Channel);
        assert_eq!(n.unit, 1);
        assert_eq!(n.module_name, Some("S - State data"));
    }

    #[test]
    fn test_pbc_rid_address() {
        let buf = [0x12, 0x06, 0x13, 0x00, 0x00, 0x00, 0x01, 0x2C, 0xEE];
        let (item, next) = decode_item(&buf, 0).unwrap();
        assert_eq!(next, 8);
        assert_eq!(item.syntax_id, SyntaxId::PbcRid);
        assert_eq!(
            item.address,
            ItemAddress::PbcRid {
                unknown: 0,
                r_id: 300
            }
        );
    }

    #[test]
    fn test_unknown_syntax_is_skipped_whole() {
        let buf = [0x12, 0x05, 0x55, 1, 2, 3, 4, 0xEE];
        let (item, next) = decode_item(&buf, 0).unwrap();
        assert_eq!(next, 7);
        assert_eq!(item.address, ItemAddress::Unknown(Raw::from(&[1u8, 2, 3, 4][..])));
    }

    #[test]
    fn test_variant_error_keeps_list_aligned() {
        // DBRead claiming 3 areas in a 7-byte body, followed by an S7Any
        let mut buf = vec![0x12, 0x07, 0xB0, 0x03, 0x04, 0x00, 0x0A, 0x00, 0x10];
        buf.extend(s7any(0x83, [0, 0, 8]));
        let mut cur = Cursor::new(&buf);
        let items = decode_items(&mut cur, 2, false);
        assert!(items[0].as_ref().unwrap_err().is_truncated());
        assert!(matches!(
            items[1].as_ref().unwrap().address,
            ItemAddress::S7Any(_)
        ));
        assert!(cur.is_empty());
    }

    #[test]
    fn test_missing_item_reports_truncated_head() {
        let buf = [0x04, 0x01];
        let err = decode_item(&buf, 2).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                offset: 2,
                needed: 2,
                available: 0
            }
        );
    }
}
