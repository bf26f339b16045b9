//! Protocol v1 messages

use std::collections::BTreeMap;

use bytes::{Bytes, BytesMut};

use crate::packstream::{pack, pack_struct_header, unpack, PackValue};

use super::config::AuthToken;
use super::error::DriverError;

pub(crate) const INIT: u8 = 0x01;
pub(crate) const ACK_FAILURE: u8 = 0x0F;
pub(crate) const RUN: u8 = 0x10;
pub(crate) const DISCARD_ALL: u8 = 0x2F;
pub(crate) const PULL_ALL: u8 = 0x3F;
pub(crate) const SUCCESS: u8 = 0x70;
pub(crate) const RECORD: u8 = 0x71;
pub(crate) const IGNORED: u8 = 0x7E;
pub(crate) const FAILURE: u8 = 0x7F;

/// Client to server message
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Init {
        user_agent: String,
        auth: Option<AuthToken>,
    },
    Run {
        statement: String,
        parameters: BTreeMap<String, PackValue>,
    },
    DiscardAll,
    PullAll,
    AckFailure,
}

impl Request {
    #[must_use]
    pub fn signature(&self) -> u8 {
        match self {
            Self::Init { .. } => INIT,
            Self::Run { .. } => RUN,
            Self::DiscardAll => DISCARD_ALL,
            Self::PullAll => PULL_ALL,
            Self::AckFailure => ACK_FAILURE,
        }
    }

    fn fields(&self) -> Vec<PackValue> {
        match self {
            Self::Init { user_agent, auth } => {
                let mut fields = vec![PackValue::from(user_agent.as_str())];
                if let Some(auth) = auth {
                    fields.push(auth.to_pack_value());
                }
                fields
            }
            Self::Run {
                statement,
                parameters,
            } => vec![
                PackValue::from(statement.as_str()),
                PackValue::Map(parameters.clone()),
            ],
            Self::DiscardAll | Self::PullAll | Self::AckFailure => Vec::new(),
        }
    }

    /// Pack this message as a structure, without chunking
    ///
    /// # Errors
    /// Returns an error if a field cannot be packed.
    pub fn encode(&self, buf: &mut BytesMut) -> Result<(), DriverError> {
        let fields = self.fields();
        pack_struct_header(fields.len(), self.signature(), buf)?;
        for field in &fields {
            pack(field, buf)?;
        }
        Ok(())
    }
}

/// Server to client message
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(BTreeMap<String, PackValue>),
    Record(Vec<PackValue>),
    Ignored,
    Failure(BTreeMap<String, PackValue>),
}

impl Response {
    /// Decode a complete, de-chunked message
    ///
    /// # Errors
    /// Returns a protocol error if the data is not a known message structure.
    pub fn decode(mut data: Bytes) -> Result<Self, DriverError> {
        let value = unpack(&mut data)?;
        let PackValue::Structure { signature, fields } = value else {
            tracing::error!("S: @*#!");
            return Err(DriverError::protocol("Non-message data received from server"));
        };
        let mut fields = fields.into_iter();
        match signature {
            SUCCESS => Ok(Self::Success(metadata(fields.next())?)),
            FAILURE => Ok(Self::Failure(metadata(fields.next())?)),
            IGNORED => Ok(Self::Ignored),
            RECORD => match fields.next() {
                Some(PackValue::List(values)) => Ok(Self::Record(values)),
                _ => Err(DriverError::protocol("RECORD without a value list")),
            },
            other => Err(DriverError::protocol(format!(
                "Unknown message signature {other:#04x}"
            ))),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Success(_) => "SUCCESS",
            Self::Record(_) => "RECORD",
            Self::Ignored => "IGNORED",
            Self::Failure(_) => "FAILURE",
        }
    }
}

fn metadata(field: Option<PackValue>) -> Result<BTreeMap<String, PackValue>, DriverError> {
    match field {
        Some(PackValue::Map(map)) => Ok(map),
        None => Ok(BTreeMap::new()),
        Some(_) => Err(DriverError::protocol("Message metadata must be a map")),
    }
}
