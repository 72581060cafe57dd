use super::super::{
    cursor::Cursor,
    error::Result,
    flags::BitFlags,
    frame::{
        time::S7Time6, BlockLanguage, BlockSecurity, BlockType, Filesystem, SubblockType,
    },
};
use super::{Context, UserDataPayload};
use serde::Serialize;

wire_enum! {
    pub enum BlockSubfunction: u8 {
        List = 0x01 => "List blocks",
        ListType = 0x02 => "List blocks of type",
        BlockInfo = 0x03 => "Get block info",
    }
}

/// Number of blocks of one type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockCount {
    pub block_type: BlockType,
    pub count: u16,
}

/// One block of a "list blocks of type" response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockListEntry {
    pub block_number: u16,
    pub flags: u8,
    pub language: BlockLanguage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockInfoRequest {
    pub block_type: BlockType,
    pub block_number: String,
    pub filesystem: Filesystem,
}

/// Block header version, one BCD nibble each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockVersion {
    pub raw: u8,
    pub major: u8,
    pub minor: u8,
}

impl From<u8> for BlockVersion {
    fn from(raw: u8) -> Self {
        Self {
            raw,
            major: raw >> 4,
            minor: raw & 0x0F,
        }
    }
}

pub const BLOCK_FLAG_BITS: [&str; 8] = [
    "Linked",
    "Reserved",
    "Reserved",
    "Standard block",
    "Reserved",
    "Non Retain",
    "Reserved",
    "Reserved",
];

/// "Get block info" response record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockInfo {
    pub block_type: BlockType,
    pub info_length: u16,
    pub unknown1: u16,
    /// Always `pp`
    pub constant: String,
    pub unknown2: u8,
    pub flags: BitFlags,
    pub language: BlockLanguage,
    pub subblock_type: SubblockType,
    pub block_number: u16,
    pub load_memory_length: u32,
    pub security: BlockSecurity,
    pub code_timestamp: S7Time6,
    pub interface_timestamp: S7Time6,
    pub ssb_length: u16,
    pub add_length: u16,
    pub localdata_length: u16,
    pub mc7_code_length: u16,
    pub author: String,
    pub family: String,
    pub name: String,
    pub version: BlockVersion,
    pub unknown3: u8,
    pub checksum: u16,
    pub reserved1: u32,
    pub reserved2: u32,
}

impl BlockInfo {
    pub const LEN: usize = 78;

    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            block_type: BlockType::from(cur.read_u16()?),
            info_length: cur.read_u16()?,
            unknown1: cur.read_u16()?,
            constant: cur.read_ascii(2)?,
            unknown2: cur.read_u8()?,
            flags: BitFlags::new(cur.read_u8()?, &BLOCK_FLAG_BITS),
            language: BlockLanguage::from(cur.read_u8()?),
            subblock_type: SubblockType::from(cur.read_u8()?),
            block_number: cur.read_u16()?,
            load_memory_length: cur.read_u32()?,
            security: BlockSecurity::from(cur.read_u32()?),
            code_timestamp: S7Time6::decode(cur)?,
            interface_timestamp: S7Time6::decode(cur)?,
            ssb_length: cur.read_u16()?,
            add_length: cur.read_u16()?,
            localdata_length: cur.read_u16()?,
            mc7_code_length: cur.read_u16()?,
            author: read_name(cur)?,
            family: read_name(cur)?,
            name: read_name(cur)?,
            version: BlockVersion::from(cur.read_u8()?),
            unknown3: cur.read_u8()?,
            checksum: cur.read_u16()?,
            reserved1: cur.read_u32()?,
            reserved2: cur.read_u32()?,
        })
    }
}

/// 8-byte header name, NUL padded
fn read_name(cur: &mut Cursor<'_>) -> Result<String> {
    let mut s = cur.read_ascii(8)?;
    s.truncate(s.trim_end_matches('\0').len());
    Ok(s)
}

pub(super) fn decode(
    ctx: &Context<'_>,
    sub: BlockSubfunction,
    cur: &mut Cursor<'_>,
) -> Result<UserDataPayload> {
    let kind = ctx.header.kind;
    let limit = ctx.cfg.max_list_entries;
    let payload = match sub {
        BlockSubfunction::List if kind.is_response() => {
            UserDataPayload::BlockList(cur.collect_rest(limit, |c| {
                Ok(BlockCount {
                    block_type: BlockType::from(c.read_u16()?),
                    count: c.read_u16()?,
                })
            }))
        }
        BlockSubfunction::ListType if kind.is_request() => {
            UserDataPayload::BlockListTypeRequest(BlockType::from(cur.read_u16()?))
        }
        BlockSubfunction::ListType if kind.is_response() => {
            UserDataPayload::BlockListType(cur.collect_rest(limit, |c| {
                Ok(BlockListEntry {
                    block_number: c.read_u16()?,
                    flags: c.read_u8()?,
                    language: BlockLanguage::from(c.read_u8()?),
                })
            }))
        }
        BlockSubfunction::BlockInfo if kind.is_request() => {
            UserDataPayload::BlockInfoRequest(BlockInfoRequest {
                block_type: BlockType::from(cur.read_u16()?),
                block_number: cur.read_ascii(5)?,
                filesystem: Filesystem::from(cur.read_u8()?),
            })
        }
        BlockSubfunction::BlockInfo if kind.is_response() => {
            UserDataPayload::BlockInfo(Box::new(BlockInfo::decode(cur)?))
        }
        _ => UserDataPayload::Raw(cur.raw_rest()),
    };
    Ok(payload)
}
