pub mod logging;
pub mod storage;
