mod configuration;
mod error;
mod storage_entry;

pub use configuration::*;
pub use error::*;
pub use storage_entry::*;
