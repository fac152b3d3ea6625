pub mod api;
pub mod data;
pub mod error;
pub mod geo;
pub mod planner;
pub mod server;
pub mod types;

pub use error::{Error, Result};
pub use server::{parse_server_address, Server};
