//! Driver: address parsing, connection and version handshake

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, error, info};

use super::config::DriverConfig;
use super::error::DriverError;
use super::session::Session;

pub const DEFAULT_PORT: u16 = 7687;

/// Protocol versions offered during the handshake, in preference order
const SUPPORTED_VERSIONS: [u32; 4] = [1, 0, 0, 0];

/// Accessor for one graph database server
#[derive(Debug, Clone)]
pub struct Driver {
    config: DriverConfig,
    host: String,
    port: u16,
}

impl Driver {
    /// Create a driver for the configured URI
    ///
    /// # Errors
    /// Returns an error if the URI is malformed or uses a scheme other than
    /// `bolt` (or the legacy `gap`).
    pub fn new(config: DriverConfig) -> Result<Self, DriverError> {
        let (host, port) = parse_address(&config.uri)?;
        Ok(Self { config, host, port })
    }

    #[must_use]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Connect, agree a protocol version and initialise a session
    ///
    /// # Errors
    /// Returns an error if the connection fails, a secure connection is
    /// requested, or the server rejects every offered protocol version.
    pub async fn session(&self) -> Result<Session<TcpStream>, DriverError> {
        info!("~~ [CONNECT] {} {}", self.host, self.port);

        if self.config.resolve_secure() {
            info!("~~ [SECURE] {}", self.host);
            return Err(DriverError::Unsupported(
                "encrypted connections are not available in this build".to_string(),
            ));
        }

        let mut stream = TcpStream::connect((self.host.as_str(), self.port)).await?;
        stream.set_nodelay(true)?;
        handshake(&mut stream).await?;
        Session::init(stream, &self.config).await
    }
}

/// Split a `bolt://host[:port]` URI into host and port
///
/// # Errors
/// Returns an error for unsupported schemes, a missing host or a bad port.
pub fn parse_address(uri: &str) -> Result<(String, u16), DriverError> {
    let (scheme, rest) = uri
        .split_once("://")
        .ok_or_else(|| DriverError::InvalidUrl(uri.to_string()))?;
    if !matches!(scheme, "bolt" | "gap") {
        return Err(DriverError::UnsupportedScheme(scheme.to_string()));
    }

    let authority = rest.split(&['/', '?', '#'][..]).next().unwrap_or_default();
    let authority = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    let (host, port) = if let Some(bracketed) = authority.strip_prefix('[') {
        let (host, tail) = bracketed
            .split_once(']')
            .ok_or_else(|| DriverError::InvalidUrl(uri.to_string()))?;
        (host, tail.strip_prefix(':'))
    } else {
        match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        }
    };

    if host.is_empty() {
        return Err(DriverError::InvalidUrl(uri.to_string()));
    }
    let port = match port {
        Some(port) => port
            .parse::<u16>()
            .map_err(|_| DriverError::InvalidUrl(uri.to_string()))?,
        None => DEFAULT_PORT,
    };
    Ok((host.to_string(), port))
}

/// Offer the supported protocol versions and return the agreed one
///
/// # Errors
/// Returns [`DriverError::NoAgreedVersion`] if the server answers with
/// version 0, or a protocol error if the reply is missing or garbled.
pub async fn handshake<S>(stream: &mut S) -> Result<u32, DriverError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    info!("C: [HANDSHAKE] {:?}", SUPPORTED_VERSIONS);
    let data: Vec<u8> = SUPPORTED_VERSIONS
        .iter()
        .flat_map(|v| v.to_be_bytes())
        .collect();
    debug!("C: {:02X?}", data);
    stream.write_all(&data).await?;
    stream.flush().await?;

    let mut response = [0u8; 4];
    let mut received = 0;
    while received < response.len() {
        let n = stream.read(&mut response[received..]).await?;
        if n == 0 {
            break;
        }
        received += n;
    }

    match received {
        0 => {
            error!("S: [CLOSE]");
            return Err(DriverError::protocol(
                "Server closed connection without responding to handshake",
            ));
        }
        4 => debug!("S: {:02X?}", response),
        _ => {
            error!("S: @*#!");
            return Err(DriverError::protocol(format!(
                "Expected four byte handshake response, received {:02X?} instead",
                &response[..received]
            )));
        }
    }

    let agreed = u32::from_be_bytes(response);
    info!("S: [HANDSHAKE] {}", agreed);
    match agreed {
        0 => {
            debug!("~~ [CLOSE]");
            stream.shutdown().await?;
            Err(DriverError::NoAgreedVersion)
        }
        1 => Ok(agreed),
        other => Err(DriverError::protocol(format!(
            "Server agreed to unoffered protocol version {other}"
        ))),
    }
}
