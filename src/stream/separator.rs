//! Frame separator pattern and scanner

/// The A-mode machine marks each frame with the ASCII codes of "START",
/// each shifted by 10000 and sent as a little-endian u16.
const AMODE_SEPARATOR_WORDS: [u16; 5] = [10083, 10084, 10065, 10082, 10084];

/// A fixed byte pattern identifying the start of a frame in the raw stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator {
    bytes: Vec<u8>,
}

impl Separator {
    /// The 10-byte separator used by the A-mode streaming protocol
    pub fn amode() -> Self {
        let mut bytes = Vec::with_capacity(AMODE_SEPARATOR_WORDS.len() * 2);
        for word in AMODE_SEPARATOR_WORDS {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        Self { bytes }
    }

    /// Build a separator from raw bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Pattern length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-length pattern (never matches)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The pattern bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Find the lowest offset >= `from` at which the pattern occurs in `buf`.
    ///
    /// A partial match truncated by the end of `buf` does not count; the
    /// decoder retries once more bytes arrive.
    pub fn find(&self, buf: &[u8], from: usize) -> Option<usize> {
        if self.bytes.is_empty() || from >= buf.len() {
            return None;
        }
        buf[from..]
            .windows(self.bytes.len())
            .position(|w| w == self.bytes.as_slice())
            .map(|pos| pos + from)
    }
}
