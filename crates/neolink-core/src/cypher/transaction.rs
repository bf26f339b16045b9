//! Explicit transactions

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use crate::driver::Session;

use super::error::CypherError;
use super::records::RecordList;
use super::task::{CypherTask, Parameters, Task};

/// A transaction holding its session until commit or rollback
///
/// Statements are queued by [`append`](Self::append) and sent by
/// [`process`](Self::process) or [`commit`](Self::commit).
#[derive(Debug)]
pub struct CypherTransaction<'a, S> {
    session: &'a mut Session<S>,
    queue: Vec<CypherTask>,
    finished: bool,
}

impl<'a, S> CypherTransaction<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) async fn begin(session: &'a mut Session<S>) -> Result<Self, CypherError> {
        info!("~~ [BEGIN]");
        session.run("BEGIN", &Parameters::new()).await?;
        Ok(Self {
            session,
            queue: Vec::new(),
            finished: false,
        })
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Queued statements not yet sent
    #[must_use]
    pub fn pending(&self) -> &[CypherTask] {
        &self.queue
    }

    /// Queue a statement
    ///
    /// # Errors
    /// Returns [`CypherError::TransactionFinished`] after commit or rollback.
    pub fn append(
        &mut self,
        statement: impl Into<String>,
        parameters: Parameters,
    ) -> Result<(), CypherError> {
        self.ensure_open()?;
        self.queue
            .push(CypherTask::new(statement).with_parameters(parameters));
        Ok(())
    }

    /// Queue a built statement
    ///
    /// # Errors
    /// Returns [`CypherError::TransactionFinished`] after commit or rollback.
    pub fn append_task<T: Task + ?Sized>(&mut self, task: &T) -> Result<(), CypherError> {
        self.ensure_open()?;
        self.queue.push(task.to_task());
        Ok(())
    }

    /// Send every queued statement, returning one result per statement
    ///
    /// # Errors
    /// Returns [`CypherError::TransactionFinished`] after commit or rollback,
    /// or the first server failure. Statements after a failure stay queued.
    pub async fn process(&mut self) -> Result<Vec<RecordList>, CypherError> {
        self.ensure_open()?;
        let mut results = Vec::with_capacity(self.queue.len());
        while !self.queue.is_empty() {
            let task = self.queue.remove(0);
            let result = self.session.run(task.statement(), task.parameters()).await?;
            results.push(RecordList::from(result));
        }
        Ok(results)
    }

    /// Send queued statements, then commit
    ///
    /// # Errors
    /// Returns [`CypherError::TransactionFinished`] if already finished, or
    /// the first server failure.
    pub async fn commit(&mut self) -> Result<Vec<RecordList>, CypherError> {
        let results = self.process().await?;
        info!("~~ [COMMIT]");
        self.finished = true;
        self.session.run("COMMIT", &Parameters::new()).await?;
        Ok(results)
    }

    /// Discard queued statements and roll back
    ///
    /// # Errors
    /// Returns [`CypherError::TransactionFinished`] if already finished.
    pub async fn rollback(&mut self) -> Result<(), CypherError> {
        self.ensure_open()?;
        info!("~~ [ROLLBACK]");
        self.queue.clear();
        self.finished = true;
        self.session.run("ROLLBACK", &Parameters::new()).await?;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), CypherError> {
        if self.finished {
            return Err(CypherError::TransactionFinished);
        }
        Ok(())
    }
}
