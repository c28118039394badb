//! Sequence file header codec
//!
//! Line-oriented `key = value` grammar shared by record and volume files.
//! Parsing is best-effort: unknown keys are ignored for forward
//! compatibility and missing keys keep their zero/empty defaults. The one
//! hard failure is a malformed number inside a vector-valued key, which
//! would silently truncate the vector if tolerated.

use crate::error::{Error, Result};

/// The literal line separating header text from binary payload.
///
/// Everything after the newline terminating this marker is raw binary.
pub const ELEMENT_DATA_MARKER: &str = "ElementDataFile = LOCAL";

/// Parsed sequence file header.
///
/// Field meanings follow the MetaIO/Plus sequence conventions. Defaults are
/// zero/empty; [`SequenceHeader::image_defaults`] gives the values every
/// file written by this crate starts from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SequenceHeader {
    /// MetaIO object type (must be "Image")
    pub object_type: String,
    /// Number of dimensions (3 for image sequences and volumes)
    pub ndims: i32,
    /// Payload is binary (must be true)
    pub binary_data: bool,
    /// Big-endian payload flag (must be false)
    pub binary_data_byte_order_msb: bool,
    /// Compressed payload flag; decoding compressed data is unsupported
    pub compressed_data: bool,
    /// 3x3 orientation matrix, row-major (identity by convention)
    pub transform_matrix: Vec<i32>,
    /// Extent per dimension; for record files `[width, height, frames]`
    pub dim_size: Vec<i32>,
    /// Image origin
    pub offset: Vec<f64>,
    /// Center of rotation
    pub center_of_rotation: Vec<i32>,
    /// Anatomical orientation code (typically "RAI")
    pub anatomical_orientation: String,
    /// Spacing between elements per dimension
    pub element_spacing: Vec<f64>,
    /// Pixel type (files written here use "MET_UCHAR")
    pub element_type: String,
    /// Ultrasound image orientation code (typically "MFA")
    pub ultrasound_image_orientation: String,
    /// Ultrasound image type (typically "BRIGHTNESS")
    pub ultrasound_image_type: String,
    /// Payload location ("LOCAL" for single-file variants)
    pub element_data_file: String,
}

impl SequenceHeader {
    /// Header defaults for an uncompressed 8-bit image sequence
    pub fn image_defaults() -> Self {
        Self {
            object_type: "Image".to_string(),
            ndims: 3,
            binary_data: true,
            binary_data_byte_order_msb: false,
            compressed_data: false,
            transform_matrix: vec![1, 0, 0, 0, 1, 0, 0, 0, 1],
            dim_size: vec![0, 0, 0],
            offset: vec![0.0, 0.0, 0.0],
            center_of_rotation: vec![0, 0, 0],
            anatomical_orientation: "RAI".to_string(),
            element_spacing: vec![1.0, 1.0, 1.0],
            element_type: "MET_UCHAR".to_string(),
            ultrasound_image_orientation: "MFA".to_string(),
            ultrasound_image_type: "BRIGHTNESS".to_string(),
            element_data_file: "LOCAL".to_string(),
        }
    }

    /// Parse header fields out of a text block.
    ///
    /// Lines without `=` and keys this crate does not know are skipped.
    /// Record-file metadata lines (`Seq_FrameNNNN_...`) fall under the
    /// unknown-key rule, so the same parse serves both file variants.
    pub fn parse(text: &str) -> Result<Self> {
        let mut header = Self::default();

        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "ObjectType" => header.object_type = value.to_string(),
                "NDims" => header.ndims = parse_scalar(key, value)?,
                "BinaryData" => header.binary_data = value == "True",
                "BinaryDataByteOrderMSB" => {
                    header.binary_data_byte_order_msb = value == "True";
                }
                "CompressedData" => header.compressed_data = value == "True",
                "TransformMatrix" => header.transform_matrix = parse_vector(key, value)?,
                "DimSize" => header.dim_size = parse_vector(key, value)?,
                "Offset" => header.offset = parse_vector(key, value)?,
                "CenterOfRotation" => header.center_of_rotation = parse_vector(key, value)?,
                "AnatomicalOrientation" => header.anatomical_orientation = value.to_string(),
                "ElementSpacing" => header.element_spacing = parse_vector(key, value)?,
                "ElementType" => header.element_type = value.to_string(),
                "UltrasoundImageOrientation" => {
                    header.ultrasound_image_orientation = value.to_string();
                }
                "UltrasoundImageType" => header.ultrasound_image_type = value.to_string(),
                "ElementDataFile" => header.element_data_file = value.to_string(),
                _ => {} // unknown keys ignored
            }
        }

        Ok(header)
    }

    /// Serialize the header fields in canonical order, one line per field.
    ///
    /// The `ElementDataFile` marker is not included; record files interpose
    /// per-frame metadata before it, so the writer emits [`ELEMENT_DATA_MARKER`]
    /// itself once the metadata is out.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("ObjectType = {}\n", self.object_type));
        out.push_str(&format!("NDims = {}\n", self.ndims));
        out.push_str(&format!("BinaryData = {}\n", bool_word(self.binary_data)));
        out.push_str(&format!(
            "BinaryDataByteOrderMSB = {}\n",
            bool_word(self.binary_data_byte_order_msb)
        ));
        out.push_str(&format!(
            "CompressedData = {}\n",
            bool_word(self.compressed_data)
        ));
        out.push_str(&format!(
            "TransformMatrix = {}\n",
            join_vector(&self.transform_matrix)
        ));
        out.push_str(&format!("DimSize = {}\n", join_vector(&self.dim_size)));
        out.push_str(&format!("Offset = {}\n", join_vector(&self.offset)));
        out.push_str(&format!(
            "CenterOfRotation = {}\n",
            join_vector(&self.center_of_rotation)
        ));
        out.push_str(&format!(
            "AnatomicalOrientation = {}\n",
            self.anatomical_orientation
        ));
        out.push_str(&format!(
            "ElementSpacing = {}\n",
            join_vector(&self.element_spacing)
        ));
        out.push_str(&format!("ElementType = {}\n", self.element_type));
        out.push_str(&format!(
            "UltrasoundImageOrientation = {}\n",
            self.ultrasound_image_orientation
        ));
        out.push_str(&format!(
            "UltrasoundImageType = {}\n",
            self.ultrasound_image_type
        ));
        out
    }
}

fn bool_word(v: bool) -> &'static str {
    if v {
        "True"
    } else {
        "False"
    }
}

fn join_vector<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_scalar<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Parse(format!("{key}: invalid number '{value}'")))
}

fn parse_vector<T: std::str::FromStr>(key: &str, value: &str) -> Result<Vec<T>> {
    value
        .split_whitespace()
        .map(|tok| {
            tok.parse()
                .map_err(|_| Error::Parse(format!("{key}: invalid number '{tok}'")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_parse_roundtrip() {
        let mut header = SequenceHeader::image_defaults();
        header.dim_size = vec![640, 480, 25];
        header.offset = vec![0.5, -1.25, 0.0];

        let text = format!("{}{}\n", header.serialize(), ELEMENT_DATA_MARKER);
        let parsed = SequenceHeader::parse(&text).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_parse_defaults_for_missing_keys() {
        let header = SequenceHeader::parse("ObjectType = Image\n").unwrap();
        assert_eq!(header.object_type, "Image");
        assert_eq!(header.ndims, 0);
        assert!(!header.binary_data);
        assert!(header.dim_size.is_empty());
        assert!(header.element_type.is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let text = "ObjectType = Image\nSomeFutureKey = 42\nSeq_Frame0000_Timestamp = 0.5\n";
        let header = SequenceHeader::parse(text).unwrap();
        assert_eq!(header.object_type, "Image");
    }

    #[test]
    fn test_bool_literals() {
        let header =
            SequenceHeader::parse("BinaryData = True\nCompressedData = False\n").unwrap();
        assert!(header.binary_data);
        assert!(!header.compressed_data);

        // Anything but the literal "True" is false
        let header = SequenceHeader::parse("BinaryData = true\n").unwrap();
        assert!(!header.binary_data);
    }

    #[test]
    fn test_malformed_vector_is_hard_error() {
        let result = SequenceHeader::parse("DimSize = 640 oops 25\n");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_values_are_trimmed() {
        let header = SequenceHeader::parse("ObjectType =   Image  \nNDims =  3 \n").unwrap();
        assert_eq!(header.object_type, "Image");
        assert_eq!(header.ndims, 3);
    }
}
