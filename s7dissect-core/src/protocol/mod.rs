pub mod cursor;
pub mod error;
pub mod flags;
pub mod frame;
mod pdu;
pub mod summary;
pub mod szl;
pub mod tables;
pub mod userdata;

pub use cursor::{Cursor, Opaque, Raw};
pub use error::{DecodeError, ErrorClass, ErrorCode, Result};
pub use flags::BitFlags;
pub use pdu::{decode, DecodedPdu, PduBody, S7Decoder};
pub use summary::{Summary, SummaryEntry};
