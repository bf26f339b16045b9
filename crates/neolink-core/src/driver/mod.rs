//! Driver module: Bolt protocol v1 client
//!
//! A [`Driver`] knows where the server lives and opens [`Session`]s. Each
//! session owns one connection, performs the INIT exchange and then runs
//! Cypher statements, returning fully buffered [`Record`]s.

mod chunk;
mod config;
mod connect;
mod error;
mod message;
mod record;
mod session;

pub use chunk::{ChunkReader, ChunkWriter, MAX_CHUNK_SIZE};
pub use config::{AuthToken, DriverConfig, DEFAULT_USER_AGENT, SECURE_ENV_VAR};
pub use connect::{handshake, parse_address, Driver, DEFAULT_PORT};
pub use error::DriverError;
pub use message::{Request, Response};
pub use record::Record;
pub use session::{Latency, ResultSet, Session};

#[cfg(test)]
mod tests;
