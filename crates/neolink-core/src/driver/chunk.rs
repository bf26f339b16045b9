//! Message chunking
//!
//! Every message travels as one or more chunks, each prefixed with a
//! big-endian `u16` size, and ends with an empty `00 00` chunk.

use bytes::{Buf, BufMut, Bytes, BytesMut};

pub const MAX_CHUNK_SIZE: usize = 65535;

/// Writer that splits data into chunks
#[derive(Debug, Default)]
pub struct ChunkWriter {
    raw: BytesMut,
    pending: BytesMut,
}

impl ChunkWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write some bytes, emitting a chunk each time one fills up
    pub fn write(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            let room = MAX_CHUNK_SIZE - self.pending.len();
            if data.len() >= room {
                self.pending.extend_from_slice(&data[..room]);
                data = &data[room..];
                self.flush(false);
            } else {
                self.pending.extend_from_slice(data);
                data = &[];
            }
        }
    }

    /// Emit everything written since the last chunk, followed by an end of
    /// message marker if `zero_chunk` is set
    pub fn flush(&mut self, zero_chunk: bool) {
        if !self.pending.is_empty() {
            // pending never exceeds MAX_CHUNK_SIZE, which fits in a u16
            self.raw.put_u16(self.pending.len() as u16);
            self.raw.extend_from_slice(&self.pending);
            self.pending.clear();
        }
        if zero_chunk {
            self.raw.put_u16(0);
        }
    }

    /// Take the chunked output written so far
    pub fn take(&mut self) -> Bytes {
        self.raw.split().freeze()
    }
}

/// Reassembles messages from a stream of chunks
#[derive(Debug, Default)]
pub struct ChunkReader {
    message: BytesMut,
}

impl ChunkReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume complete chunks from `buf`
    ///
    /// Returns the message once its end marker has been read, or `None` if
    /// more data is needed. Partial chunks are left in `buf`. Empty messages
    /// are skipped.
    pub fn decode(&mut self, buf: &mut BytesMut) -> Option<Bytes> {
        loop {
            if buf.len() < 2 {
                return None;
            }
            let size = usize::from(u16::from_be_bytes([buf[0], buf[1]]));
            if size == 0 {
                buf.advance(2);
                if self.message.is_empty() {
                    continue;
                }
                return Some(self.message.split().freeze());
            }
            if buf.len() < 2 + size {
                return None;
            }
            buf.advance(2);
            self.message.extend_from_slice(&buf[..size]);
            buf.advance(size);
        }
    }
}
