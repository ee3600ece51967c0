pub mod config_store;
pub mod pool;
pub mod validator;
