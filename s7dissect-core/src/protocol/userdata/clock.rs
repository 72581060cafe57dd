use super::super::{cursor::Cursor, error::Result, frame::time::S7Timestamp};
use super::{Context, UserDataPayload};

wire_enum! {
    pub enum TimeSubfunction: u8 {
        Read = 0x01 => "Read clock",
        Set = 0x02 => "Set clock",
        ReadFollowing = 0x03 => "Read clock (following)",
        Set2 = 0x04 => "Set clock",
    }
}

pub(super) fn decode(
    ctx: &Context<'_>,
    sub: TimeSubfunction,
    cur: &mut Cursor<'_>,
) -> Result<UserDataPayload> {
    let kind = ctx.header.kind;
    let carries_time = match sub {
        TimeSubfunction::Read | TimeSubfunction::ReadFollowing => kind.is_response(),
        TimeSubfunction::Set | TimeSubfunction::Set2 => kind.is_request(),
        TimeSubfunction::Unknown(_) => false,
    };
    if carries_time {
        S7Timestamp::decode_with_century(cur).map(UserDataPayload::Time)
    } else {
        Ok(UserDataPayload::Raw(cur.raw_rest()))
    }
}
