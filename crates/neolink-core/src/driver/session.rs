//! Session: one server connection speaking protocol v1

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, error, info};

use crate::packstream::{dehydrate, hydrate, PackValue};
use crate::primitives::Value;

use super::chunk::{ChunkReader, ChunkWriter};
use super::config::DriverConfig;
use super::error::DriverError;
use super::message::{Request, Response};
use super::record::Record;

const READ_BUFFER_SIZE: usize = 8192;

/// Timing breakdown of a single `run`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    /// From the call to `run` until it returned
    pub overall: Duration,
    /// From the start of sending until the first response was fully read
    pub network: Duration,
    /// From the end of sending until the first response bytes arrived
    pub wait: Duration,
}

/// Checkpoints collected during one `run`
#[derive(Debug, Clone, Copy)]
struct Checkpoints {
    init: Instant,
    start_send: Instant,
    end_send: Instant,
    start_recv: Instant,
    end_recv: Instant,
    returned: Instant,
}

impl Checkpoints {
    fn latency(&self) -> Latency {
        Latency {
            overall: self.returned - self.init,
            network: self.end_recv - self.start_send,
            wait: self.start_recv.saturating_duration_since(self.end_send),
        }
    }
}

/// Outcome of a `run`: field names, records and the closing summary
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub fields: Arc<[String]>,
    pub records: Vec<Record>,
    pub summary: BTreeMap<String, Value>,
}

/// A connection that has completed INIT
#[derive(Debug)]
pub struct Session<S = TcpStream> {
    stream: S,
    read_buf: BytesMut,
    reader: ChunkReader,
    last_recv_start: Option<Instant>,
    bench: Option<Vec<Checkpoints>>,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Initialise a connection with the configured user agent and
    /// credentials
    ///
    /// # Errors
    /// Returns a protocol error if the server does not answer INIT with
    /// SUCCESS.
    pub async fn init(stream: S, config: &DriverConfig) -> Result<Self, DriverError> {
        let mut session = Self {
            stream,
            read_buf: BytesMut::with_capacity(READ_BUFFER_SIZE),
            reader: ChunkReader::new(),
            last_recv_start: None,
            bench: config.bench.then(Vec::new),
        };

        info!("C: INIT {:?}", config.user_agent);
        session
            .send(&[Request::Init {
                user_agent: config.user_agent.clone(),
                auth: config.auth.clone(),
            }])
            .await?;

        match session.recv_raw().await? {
            Response::Success(data) => {
                info!("S: SUCCESS {:?}", data);
                Ok(session)
            }
            other => {
                info!("S: {} {:?}", other.name(), other);
                Err(DriverError::protocol("Initialisation failed"))
            }
        }
    }

    /// Run a parameterised Cypher statement and pull all of its records
    ///
    /// A reply that cannot be decoded or hydrated does not end the exchange
    /// early: the rest of the result is read first, so the next `run` starts
    /// in step with the server.
    ///
    /// # Errors
    /// Returns [`DriverError::Failure`] if the server rejects the statement,
    /// after the failure has been acknowledged.
    pub async fn run(
        &mut self,
        statement: &str,
        parameters: &BTreeMap<String, Value>,
    ) -> Result<ResultSet, DriverError> {
        let init = Instant::now();

        let parameters = parameters
            .iter()
            .map(|(k, v)| dehydrate(v).map(|v| (k.clone(), v)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        info!("C: RUN {:?} {:?}", statement, parameters);
        info!("C: PULL_ALL");
        let (start_send, end_send) = self
            .send(&[
                Request::Run {
                    statement: statement.to_string(),
                    parameters,
                },
                Request::PullAll,
            ])
            .await?;

        let fields = match self.read_fields().await? {
            Ok(fields) => fields,
            Err(e) => {
                self.discard_result().await?;
                return Err(e);
            }
        };
        let end_recv = Instant::now();
        let start_recv = self.last_recv_start.unwrap_or(end_recv);

        let (records, summary) = self.read_records(&fields).await?;

        if let Some(bench) = &mut self.bench {
            bench.push(Checkpoints {
                init,
                start_send,
                end_send,
                start_recv,
                end_recv,
                returned: Instant::now(),
            });
        }

        let summary = summary
            .into_iter()
            .map(|(k, v)| hydrate(v).map(|v| (k, v)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(ResultSet {
            fields,
            records,
            summary,
        })
    }

    /// Read the reply to RUN
    ///
    /// The inner error means the reply was read but is unusable, so the
    /// records that follow still have to be consumed.
    async fn read_fields(&mut self) -> Result<Result<Arc<[String]>, DriverError>, DriverError> {
        match self.recv().await? {
            Ok(Response::Success(data)) => {
                info!("S: SUCCESS {:?}", data);
                Ok(field_names(&data))
            }
            Ok(other) => Err(failure(other)),
            Err(e) => {
                error!("S: @*#! {}", e);
                Ok(Err(e))
            }
        }
    }

    /// Read RECORDs up to the closing SUCCESS
    ///
    /// Every message of the result is consumed even after one fails to
    /// decode or hydrate; the first such error is returned at the end.
    async fn read_records(
        &mut self,
        fields: &Arc<[String]>,
    ) -> Result<(Vec<Record>, BTreeMap<String, PackValue>), DriverError> {
        let mut records = Vec::new();
        let mut unreadable: Option<DriverError> = None;
        let summary = loop {
            match self.recv().await? {
                Ok(Response::Record(values)) => {
                    info!("S: RECORD {:?}", values);
                    if unreadable.is_some() {
                        continue;
                    }
                    match values.into_iter().map(hydrate).collect::<Result<Vec<_>, _>>() {
                        Ok(values) => records.push(Record::new(Arc::clone(fields), values)),
                        Err(e) => {
                            error!("S: @*#! {}", e);
                            unreadable = Some(e.into());
                        }
                    }
                }
                Ok(Response::Success(data)) => {
                    info!("S: SUCCESS {:?}", data);
                    break data;
                }
                Ok(other) => return Err(failure(other)),
                Err(e) => {
                    error!("S: @*#! {}", e);
                    unreadable.get_or_insert(e);
                }
            }
        };
        match unreadable {
            Some(e) => Err(e),
            None => Ok((records, summary)),
        }
    }

    /// Consume the rest of the current result, whatever it holds
    async fn discard_result(&mut self) -> Result<(), DriverError> {
        loop {
            match self.recv().await? {
                Ok(Response::Success(_) | Response::Failure(_)) => return Ok(()),
                // RUN failed unseen and PULL_ALL was ignored
                Ok(Response::Ignored) => return self.ack_failure().await,
                Ok(Response::Record(_)) | Err(_) => {}
            }
        }
    }

    /// Send an acknowledgement for a previous failure
    ///
    /// # Errors
    /// Returns a protocol error if the server does not confirm with SUCCESS.
    pub async fn ack_failure(&mut self) -> Result<(), DriverError> {
        info!("C: ACK_FAILURE");
        self.send(&[Request::AckFailure]).await?;

        let mut response = self.recv_raw().await?;
        while response == Response::Ignored {
            info!("S: IGNORED");
            response = self.recv_raw().await?;
        }

        match response {
            Response::Success(data) => {
                info!("S: SUCCESS {:?}", data);
                Ok(())
            }
            other => {
                info!("S: {} {:?}", other.name(), other);
                Err(DriverError::protocol("Could not acknowledge failure"))
            }
        }
    }

    /// Shut down the connection
    ///
    /// # Errors
    /// Returns an error if the stream cannot be shut down cleanly.
    pub async fn close(mut self) -> Result<(), DriverError> {
        info!("~~ [CLOSE]");
        self.stream.shutdown().await?;
        Ok(())
    }

    /// Timings of every `run` so far, if benchmarking is enabled
    #[must_use]
    pub fn bench(&self) -> Option<Vec<Latency>> {
        self.bench
            .as_ref()
            .map(|runs| runs.iter().map(Checkpoints::latency).collect())
    }

    /// Send messages as one write; returns when sending started and ended
    async fn send(&mut self, requests: &[Request]) -> Result<(Instant, Instant), DriverError> {
        let mut writer = ChunkWriter::new();
        let mut message = BytesMut::new();
        for request in requests {
            message.clear();
            request.encode(&mut message)?;
            writer.write(&message);
            writer.flush(true);
        }
        let data = writer.take();
        debug!("C: {:02X?}", &data[..]);

        let start = Instant::now();
        self.stream.write_all(&data).await?;
        self.stream.flush().await?;
        Ok((start, Instant::now()))
    }

    /// Receive one message, acknowledging it straight away if it is a
    /// FAILURE
    ///
    /// The outer error means the stream itself failed. The inner one means a
    /// complete message arrived but could not be decoded, which leaves the
    /// stream in step.
    async fn recv(&mut self) -> Result<Result<Response, DriverError>, DriverError> {
        let response = Response::decode(self.recv_message().await?);
        if let Ok(Response::Failure(_)) = &response {
            self.ack_failure().await?;
        }
        Ok(response)
    }

    /// Receive and decode exactly one message
    async fn recv_raw(&mut self) -> Result<Response, DriverError> {
        Response::decode(self.recv_message().await?)
    }

    /// Receive exactly one de-chunked message
    async fn recv_message(&mut self) -> Result<Bytes, DriverError> {
        self.last_recv_start = None;
        loop {
            if let Some(message) = self.reader.decode(&mut self.read_buf) {
                return Ok(message);
            }

            let before = self.read_buf.len();
            let n = self.stream.read_buf(&mut self.read_buf).await?;
            if n == 0 {
                error!("S: [CLOSE]");
                return Err(DriverError::protocol("Server closed connection"));
            }
            self.last_recv_start.get_or_insert_with(Instant::now);
            debug!("S: {:02X?}", &self.read_buf[before..]);
        }
    }
}

fn field_names(data: &BTreeMap<String, PackValue>) -> Result<Arc<[String]>, DriverError> {
    match data.get("fields") {
        Some(PackValue::List(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| DriverError::protocol("Field names must be strings"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Arc::from),
        None => Ok(Arc::from(Vec::new())),
        Some(_) => Err(DriverError::protocol("Field names must be a list")),
    }
}

/// Error for a non-SUCCESS reply to RUN or PULL_ALL
fn failure(response: Response) -> DriverError {
    match response {
        Response::Failure(data) => {
            info!("S: FAILURE {:?}", data);
            let text = |key: &str| {
                data.get(key)
                    .and_then(PackValue::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            DriverError::Failure {
                code: text("code"),
                message: text("message"),
            }
        }
        other => {
            info!("S: {}", other.name());
            DriverError::protocol(format!("Unexpected {} response", other.name()))
        }
    }
}
