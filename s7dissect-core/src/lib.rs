#[macro_use]
mod macros;

pub mod config;
pub mod protocol;

pub use config::DecoderConfig;
pub use protocol::{
    decode,
    error::{DecodeError, Result},
    DecodedPdu, S7Decoder,
};
