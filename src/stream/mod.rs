//! A-mode byte stream decoding
//!
//! Raw stream layout, repeating per acquisition cycle:
//!
//! ```text
//! ...[array header][separator][index][samples][array header][separator]...
//!     4 bytes       10 bytes   2 B    2*N B
//! ```
//!
//! The array header is a LabVIEW artifact trailing each cycle's samples;
//! the separator marks the start of the next cycle. [`FrameDecoder`]
//! tolerates arbitrary chunking of the stream and skips corrupt cycles.

pub mod decoder;
pub mod separator;

pub use decoder::{DecoderStats, FrameDecoder, StreamGeometry};
pub use separator::Separator;
