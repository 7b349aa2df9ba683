//! Frame assembly, encoding, and the incremental wire parser.

use heapless::Vec;

use crate::tag::{Tag, MAX_PAYLOAD_LEN, TAG_LEN};

/// Maximum complete frame size (tag + largest payload)
pub const MAX_FRAME_SIZE: usize = TAG_LEN + MAX_PAYLOAD_LEN;

/// Errors that can occur constructing or encoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload length does not match what the tag declares
    LengthMismatch,
    /// Destination buffer too small for encoding
    BufferTooSmall,
}

/// A fully assembled (tag, payload) unit ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Packet kind
    pub tag: Tag,
    /// Payload data; the parser guarantees `payload.len() == tag.payload_len()`
    pub payload: Vec<u8, MAX_PAYLOAD_LEN>,
}

impl Frame {
    /// Create a frame, checking the payload against the tag's length table
    pub fn new(tag: Tag, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() != tag.payload_len() {
            return Err(FrameError::LengthMismatch);
        }

        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::LengthMismatch)?;

        Ok(Self {
            tag,
            payload: payload_vec,
        })
    }

    /// Create a frame for a tag with a single payload byte
    pub(crate) fn single(tag: Tag, byte: u8) -> Self {
        let mut payload = Vec::new();
        // Capacity is MAX_PAYLOAD_LEN, a single push cannot fail
        let _ = payload.push(byte);
        Self { tag, payload }
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = TAG_LEN + self.payload.len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[..TAG_LEN].copy_from_slice(self.tag.as_bytes());
        buffer[TAG_LEN..frame_len].copy_from_slice(&self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// State machine for parsing the incoming byte stream.
///
/// Feed one byte at a time; a complete frame is returned exactly when the
/// payload length declared by the tag has been consumed. The parser never
/// waits for bytes - a frame whose remainder has not arrived simply parks
/// it in `AwaitingPayload` until more bytes are fed.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    tag_buf: [u8; TAG_LEN],
    tag_len: usize,
    payload: Vec<u8, MAX_PAYLOAD_LEN>,
    /// Payload bytes consumed so far, including any dropped past capacity
    received: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Accumulating the 4 tag bytes
    AwaitingTag,
    /// Accumulating the payload declared by the matched tag
    AwaitingPayload(Tag),
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::AwaitingTag,
            tag_buf: [0; TAG_LEN],
            tag_len: 0,
            payload: Vec::new(),
            received: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::AwaitingTag;
        self.tag_len = 0;
        self.payload.clear();
        self.received = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Some(frame)` when the byte completes a frame. A 4-byte
    /// sequence matching no known tag is discarded silently and the parser
    /// restarts on the next byte - the dropped bytes are not re-scanned,
    /// so a stream that loses a byte upstream may stay desynchronized
    /// until it happens to realign.
    pub fn feed(&mut self, byte: u8) -> Option<Frame> {
        match self.state {
            ParseState::AwaitingTag => {
                self.tag_buf[self.tag_len] = byte;
                self.tag_len += 1;
                if self.tag_len == TAG_LEN {
                    self.tag_len = 0;
                    if let Some(tag) = Tag::from_bytes(&self.tag_buf) {
                        self.payload.clear();
                        self.received = 0;
                        self.state = ParseState::AwaitingPayload(tag);
                    }
                }
                None
            }
            ParseState::AwaitingPayload(tag) => {
                // Bounded write: a byte past buffer capacity still counts
                // toward the declared length but is not stored
                let _ = self.payload.push(byte);
                self.received += 1;
                if self.received == tag.payload_len() {
                    let frame = Frame {
                        tag,
                        payload: self.payload.clone(),
                    };
                    self.reset();
                    return Some(frame);
                }
                None
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<Frame> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte) {
                return Some(frame);
            }
        }
        None
    }

    /// True when the parser is between frames (not mid-payload)
    pub fn is_idle(&self) -> bool {
        matches!(self.state, ParseState::AwaitingTag) && self.tag_len == 0
    }
}
