//! Sequence (.mha) interchange files
//!
//! Both file variants share one `key = value` text header grammar followed
//! by the literal `ElementDataFile = LOCAL` marker and a binary payload:
//!
//! - *Record* files: per-frame transform/status/timestamp metadata between
//!   header and marker, then the recorded images concatenated raw.
//! - *Volume* files: marker directly after the header, then one contiguous
//!   voxel blob, row-major per `DimSize`.
//!
//! The external volume-reconstruction tool consumes these files, so the
//! emitted grammar must match it byte for byte. See
//! <http://perk-software.cs.queensu.ca/plus/doc/nightly/user/FileSequenceFile.html>.

pub mod header;
pub mod volume;
pub mod writer;

pub use header::{SequenceHeader, ELEMENT_DATA_MARKER};
pub use volume::{read_volume, Volume};
pub use writer::{RecordingInfo, SequenceRecord, SequenceRecorder};
