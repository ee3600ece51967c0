pub mod connection;
pub mod dsn;
pub mod validation;
