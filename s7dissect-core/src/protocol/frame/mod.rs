pub mod block;
pub mod comm;
pub mod data;
pub mod item;
pub mod param;
pub mod pi;
pub mod time;
pub mod types;

pub use block::{BlockControl, BlockData, BlockFilename, DownloadPart2, FunctionStatus};
pub use comm::{HeaderError, S7Header, PROTOCOL_ID};
pub use data::{decode_data_values, decode_write_confirmations, DataValue, FillRule};
pub use item::{decode_item, AnyAddress, Item, ItemAddress};
pub use param::{
    decode_params, ParameterBlock, PlcStop, SetupCommunication, VarAccess, VarPayload,
};
pub use pi::{PiParameters, PiService};
pub use time::{bcd_to_dec, bcd_year, S7Time6, S7Timestamp};
pub use types::{
    Area, BlockLanguage, BlockSecurity, BlockType, DataTransportSize, FileIdentifier, Filesystem,
    Function, ItemTransportSize, ReturnCode, Rosctr, SubblockType, SyntaxId,
};
