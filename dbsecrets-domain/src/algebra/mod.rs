mod storage;
mod string;
mod timed;

pub use storage::*;
pub use string::*;
pub use timed::*;
