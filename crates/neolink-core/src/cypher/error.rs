//! Cypher errors

use thiserror::Error;

use crate::driver::DriverError;
use crate::packstream::PackError;
use crate::primitives::PropertyError;

/// Errors that can occur while building or running Cypher
#[derive(Debug, Error)]
pub enum CypherError {
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("Property error: {0}")]
    Property(#[from] PropertyError),

    #[error("Pack error: {0}")]
    Pack(#[from] PackError),

    /// An entity without a server id was used where one is required
    #[error("Entity {0} is not bound to a server id")]
    UnboundEntity(String),

    #[error("Transaction is finished")]
    TransactionFinished,
}
