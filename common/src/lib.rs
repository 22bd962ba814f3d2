pub mod error;
pub mod language;
pub mod storage;
pub mod utils;
