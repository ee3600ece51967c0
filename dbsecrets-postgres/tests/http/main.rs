#[path = "../context.rs"]
mod context;

mod connection;
