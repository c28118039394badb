//! Sequence record file writer
//!
//! Accumulates image/pose pairs in memory for the duration of a recording
//! session and writes the sequence file in one pass when the session is
//! finalized. Finalization is a user-triggered "stop recording" action, so
//! the synchronous disk write is acceptable there and nowhere else.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::header::{SequenceHeader, ELEMENT_DATA_MARKER};
use crate::error::{Error, Result, WritePhase};
use crate::sync::{SoftSync, SyncedPair};
use crate::types::{ImageFrame, PoseUpdate, Transform3};

/// One time-paired record: an image plus the probe and reference poses
/// that were current when the pair was formed.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRecord {
    /// Grayscale image payload
    pub image: ImageFrame,
    /// Probe rigid-body pose
    pub probe_pose: Transform3,
    /// Reference rigid-body pose
    pub reference_pose: Transform3,
    /// Seconds since the recording session started
    pub timestamp_s: f64,
}

/// Summary of a finished recording session.
#[derive(Debug, Clone)]
pub struct RecordingInfo {
    /// Path of the written sequence file
    pub path: PathBuf,
    /// Number of records written
    pub record_count: usize,
    /// Total binary image bytes written
    pub image_bytes: u64,
    /// Timestamp of the last record, seconds since session start
    pub duration_s: f64,
}

/// Records soft-synchronized image/pose pairs and writes them as a
/// sequence (.mha) file.
///
/// Feed it from the two sources via [`SequenceRecorder::on_image`] and
/// [`SequenceRecorder::on_poses`]; both clone their input, so callers may
/// keep reusing their capture buffers. Call [`SequenceRecorder::finish`]
/// to write the file. Entry points take `&mut self` and must be driven
/// from one logical thread of control.
pub struct SequenceRecorder {
    path: PathBuf,
    file: File,
    sync: SoftSync<ImageFrame, PoseUpdate>,
    records: Vec<SequenceRecord>,
    recording: bool,
}

impl SequenceRecorder {
    /// Create the output file and an idle recorder.
    ///
    /// Creating the file up front surfaces path problems before any data
    /// is collected. Offers are ignored until [`SequenceRecorder::start_record`].
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self {
            path,
            file,
            sync: SoftSync::new(),
            records: Vec::new(),
            recording: false,
        })
    }

    /// Begin accumulating records; session timestamps count from the
    /// creation of the recorder
    pub fn start_record(&mut self) {
        self.recording = true;
    }

    /// Stop accumulating and drop any half-formed pair
    pub fn stop_record(&mut self) {
        self.recording = false;
        self.sync.reset();
    }

    /// Offer an image from the camera pipeline
    pub fn on_image(&mut self, image: &ImageFrame) {
        if !self.recording {
            return;
        }
        if let Some(pair) = self.sync.offer_a(image.clone()) {
            self.push(pair);
        }
    }

    /// Offer a pose update from the motion-capture system
    pub fn on_poses(&mut self, poses: &PoseUpdate) {
        if !self.recording {
            return;
        }
        if let Some(pair) = self.sync.offer_b(*poses) {
            self.push(pair);
        }
    }

    /// Number of records accumulated so far
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Write the sequence file and consume the recorder.
    ///
    /// Failures carry the phase (header, transforms, images) that could
    /// not be written; a file that failed partway is never reported as
    /// success.
    pub fn finish(mut self) -> Result<RecordingInfo> {
        self.recording = false;
        self.sync.reset();

        if self.records.is_empty() {
            return Err(Error::InvalidParameter(
                "no records captured; nothing to write".into(),
            ));
        }
        let width = self.records[0].image.width();
        let height = self.records[0].image.height();
        if self
            .records
            .iter()
            .any(|r| r.image.width() != width || r.image.height() != height)
        {
            return Err(Error::InvalidParameter(
                "image dimensions changed mid-session".into(),
            ));
        }

        let mut header = SequenceHeader::image_defaults();
        header.dim_size = vec![width as i32, height as i32, self.records.len() as i32];

        let mut out = BufWriter::new(&mut self.file);

        out.write_all(header.serialize().as_bytes())
            .map_err(|e| Error::Write {
                phase: WritePhase::Header,
                source: e,
            })?;

        write_metadata_blocks(&mut out, &self.records).map_err(|e| Error::Write {
            phase: WritePhase::Transforms,
            source: e,
        })?;

        let mut image_bytes = 0u64;
        for record in &self.records {
            out.write_all(record.image.pixels())
                .map_err(|e| Error::Write {
                    phase: WritePhase::Images,
                    source: e,
                })?;
            image_bytes += record.image.byte_len() as u64;
        }
        out.flush().map_err(|e| Error::Write {
            phase: WritePhase::Images,
            source: e,
        })?;
        drop(out);

        let info = RecordingInfo {
            path: self.path,
            record_count: self.records.len(),
            image_bytes,
            duration_s: self.records.last().map(|r| r.timestamp_s).unwrap_or(0.0),
        };
        log::info!(
            "wrote sequence file {:?}: {} records, {} image bytes",
            info.path,
            info.record_count,
            info.image_bytes
        );
        Ok(info)
    }

    fn push(&mut self, pair: SyncedPair<ImageFrame, PoseUpdate>) {
        self.records.push(SequenceRecord {
            image: pair.a,
            probe_pose: pair.b.probe,
            reference_pose: pair.b.reference,
            timestamp_s: pair.timestamp_s,
        });
    }
}

/// Write the per-frame metadata blocks and the payload marker line.
fn write_metadata_blocks<W: Write>(out: &mut W, records: &[SequenceRecord]) -> std::io::Result<()> {
    for (i, record) in records.iter().enumerate() {
        write_transform(out, i, "ProbeToTracker", &record.probe_pose)?;
        write_transform(out, i, "ReferenceToTracker", &record.reference_pose)?;
        writeln!(out, "Seq_Frame{i:04}_Timestamp = {}", record.timestamp_s)?;
        // Image validity is not actually checked; the source has no way to
        // flag a bad capture, so every image is declared OK.
        writeln!(out, "Seq_Frame{i:04}_ImageStatus = OK")?;
    }
    writeln!(out, "{ELEMENT_DATA_MARKER}")?;
    Ok(())
}

fn write_transform<W: Write>(
    out: &mut W,
    i: usize,
    name: &str,
    transform: &Transform3,
) -> std::io::Result<()> {
    write!(out, "Seq_Frame{i:04}_{name}Transform = ")?;
    for v in transform.values() {
        write!(out, "{v} ")?;
    }
    writeln!(out)?;

    let status = if transform.has_nan() { "INVALID" } else { "OK" };
    writeln!(out, "Seq_Frame{i:04}_{name}TransformStatus = {status}")?;
    Ok(())
}
