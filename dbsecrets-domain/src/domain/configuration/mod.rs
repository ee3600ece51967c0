pub mod environment;
pub mod storage_config;
