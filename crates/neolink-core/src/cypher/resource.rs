//! Statement execution over one session

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

use crate::driver::{Driver, Session};
use crate::primitives::Value;

use super::error::CypherError;
use super::records::RecordList;
use super::task::{Parameters, Task};
use super::transaction::CypherTransaction;

/// Runs Cypher statements and opens transactions
#[derive(Debug)]
pub struct CypherResource<S = TcpStream> {
    session: Session<S>,
}

impl CypherResource<TcpStream> {
    /// Open a new session with `driver`
    ///
    /// # Errors
    /// Returns an error if the connection or INIT exchange fails.
    pub async fn connect(driver: &Driver) -> Result<Self, CypherError> {
        Ok(Self::new(driver.session().await?))
    }
}

impl<S> CypherResource<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    #[must_use]
    pub fn new(session: Session<S>) -> Self {
        Self { session }
    }

    pub fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.session
    }

    #[must_use]
    pub fn into_session(self) -> Session<S> {
        self.session
    }

    /// Run a statement and collect every record
    ///
    /// # Errors
    /// Returns an error if a parameter cannot be sent or the server rejects
    /// the statement.
    pub async fn execute(
        &mut self,
        statement: &str,
        parameters: &Parameters,
    ) -> Result<RecordList, CypherError> {
        debug!(statement, "execute");
        let result = self.session.run(statement, parameters).await?;
        Ok(RecordList::from(result))
    }

    /// Run a built statement
    ///
    /// # Errors
    /// Same as [`Self::execute`].
    pub async fn execute_task<T: Task + ?Sized>(
        &mut self,
        task: &T,
    ) -> Result<RecordList, CypherError> {
        self.execute(&task.statement(), &task.parameters()).await
    }

    /// First value of the first record, if any
    ///
    /// # Errors
    /// Same as [`Self::execute`].
    pub async fn execute_one(
        &mut self,
        statement: &str,
        parameters: &Parameters,
    ) -> Result<Option<Value>, CypherError> {
        let records = self.execute(statement, parameters).await?;
        Ok(records
            .into_iter()
            .next()
            .and_then(|record| record.into_values().into_iter().next()))
    }

    /// Start an explicit transaction
    ///
    /// # Errors
    /// Returns an error if the server rejects `BEGIN`.
    pub async fn begin(&mut self) -> Result<CypherTransaction<'_, S>, CypherError> {
        CypherTransaction::begin(&mut self.session).await
    }

    /// Shut down the underlying session
    ///
    /// # Errors
    /// Returns an error if the stream cannot be shut down cleanly.
    pub async fn close(self) -> Result<(), CypherError> {
        self.session.close().await?;
        Ok(())
    }
}
