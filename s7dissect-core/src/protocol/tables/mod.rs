pub mod diag;
pub mod nck;

pub use diag::{diag_event_class, diag_event_name};
pub use nck::nck_module_name;
