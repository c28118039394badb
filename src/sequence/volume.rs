//! Reconstructed volume file reader

use std::fs;
use std::path::Path;

use super::header::{SequenceHeader, ELEMENT_DATA_MARKER};
use crate::error::{Error, Result};

/// A reconstructed 3D volume: parsed header plus the raw voxel blob.
///
/// Voxels are row-major with dimensions given by the header's `DimSize`;
/// indexing is the consumer's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Parsed file header
    pub header: SequenceHeader,
    /// Raw voxel bytes, uninterpreted
    pub voxels: Vec<u8>,
}

impl Volume {
    /// Number of voxels the header declares (product of `DimSize`)
    pub fn declared_voxel_count(&self) -> usize {
        self.header
            .dim_size
            .iter()
            .map(|&d| d.max(0) as usize)
            .product()
    }
}

/// Read a volume file: everything up to and including the
/// `ElementDataFile = LOCAL` line is header text, the rest is the voxel blob.
///
/// Compressed volumes are not supported and are reported distinctly from
/// I/O errors so the user sees "format not supported" rather than a disk
/// error.
pub fn read_volume(path: impl AsRef<Path>) -> Result<Volume> {
    let path = path.as_ref();
    let contents = fs::read(path)?;

    let marker = format!("{ELEMENT_DATA_MARKER}\n");
    let marker_pos = contents
        .windows(marker.len())
        .position(|w| w == marker.as_bytes())
        .ok_or_else(|| {
            Error::Parse(format!(
                "{}: missing '{ELEMENT_DATA_MARKER}' marker",
                path.display()
            ))
        })?;

    let header_end = marker_pos + marker.len();
    let text = std::str::from_utf8(&contents[..header_end])
        .map_err(|_| Error::Parse(format!("{}: header is not UTF-8", path.display())))?;
    let header = SequenceHeader::parse(text)?;

    if header.compressed_data {
        return Err(Error::UnsupportedFormat(
            "compressed volume data cannot be decoded".into(),
        ));
    }

    let voxels = contents[header_end..].to_vec();
    log::debug!(
        "read volume {}: dims {:?}, {} voxel bytes",
        path.display(),
        header.dim_size,
        voxels.len()
    );

    Ok(Volume { header, voxels })
}
