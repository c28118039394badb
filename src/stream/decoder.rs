//! Incremental frame decoder for the A-mode byte stream
//!
//! The decoder owns a growable buffer fed by `ingest`. Each call drains
//! every complete frame currently buffered; a single socket-readiness
//! notification often carries several frames. Corrupt frames are skipped
//! and counted, never fatal.
//!
//! All entry points take `&mut self`: a decoder instance belongs to one
//! logical thread of control. Wrap it in an external queue if bytes must
//! arrive from multiple threads.

use super::separator::Separator;
use crate::config::AcquisitionConfig;
use crate::types::SampleFrame;

/// Fixed geometry of the A-mode stream, negotiated out-of-band with the
/// machine. A frame on the wire is
/// `[separator][index][samples][array header]` and the payload must hold
/// exactly `probe_count * sample_count` little-endian u16 samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamGeometry {
    /// Probes multiplexed into each frame
    pub probe_count: usize,
    /// Sample points per probe
    pub sample_count: usize,
    /// LabVIEW array header bytes trailing each cycle's samples
    pub header_bytes: usize,
    /// Frame index bytes following the separator
    pub index_bytes: usize,
}

impl StreamGeometry {
    /// Acquisition sampling frequency of the A-mode machine
    pub const SAMPLING_FREQUENCY_HZ: u32 = 50_000_000;
    /// Assumed speed of sound in tissue
    pub const SOUND_SPEED_M_PER_S: u32 = 1540;

    /// Default geometry of the Diagnostic Sonar setup (30 probes x 3500 samples)
    pub fn amode() -> Self {
        Self::new(30, 3500)
    }

    /// Geometry with the standard A-mode header/index byte widths
    pub fn new(probe_count: usize, sample_count: usize) -> Self {
        Self {
            probe_count,
            sample_count,
            header_bytes: 4,
            index_bytes: 2,
        }
    }

    /// Samples per frame across all probes
    pub fn sample_len(&self) -> usize {
        self.probe_count * self.sample_count
    }

    /// Expected payload size in bytes
    pub fn payload_bytes(&self) -> usize {
        self.sample_len() * 2
    }

    /// Depth covered by one sample, in millimetres (round trip at 1540 m/s)
    pub fn mm_per_sample() -> f64 {
        (1000.0 * Self::SOUND_SPEED_M_PER_S as f64)
            / (2.0 * Self::SAMPLING_FREQUENCY_HZ as f64)
    }
}

impl From<&AcquisitionConfig> for StreamGeometry {
    fn from(cfg: &AcquisitionConfig) -> Self {
        Self::new(cfg.probe_count, cfg.sample_count)
    }
}

/// Decoding counters (frames decoded, corrupt cycles skipped, frames lost
/// according to index gaps).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    /// Frames decoded and emitted
    pub frames_decoded: u64,
    /// Cycles skipped because the payload length did not match the geometry
    pub corrupt_frames: u64,
    /// Frames the device dropped, detected via gaps in the frame index
    pub frames_dropped: u64,
}

/// Streaming decoder turning raw socket bytes into [`SampleFrame`]s.
pub struct FrameDecoder {
    buffer: Vec<u8>,
    separator: Separator,
    geometry: StreamGeometry,
    last_index: Option<u16>,
    stats: DecoderStats,
}

impl FrameDecoder {
    /// Create a decoder for the standard A-mode separator
    pub fn new(geometry: StreamGeometry) -> Self {
        Self::with_separator(geometry, Separator::amode())
    }

    /// Create a decoder with a custom separator pattern
    pub fn with_separator(geometry: StreamGeometry, separator: Separator) -> Self {
        Self {
            buffer: Vec::new(),
            separator,
            geometry,
            last_index: None,
            stats: DecoderStats::default(),
        }
    }

    /// Append newly received bytes and drain every complete frame.
    ///
    /// The decoded frames are identical regardless of how the stream is
    /// split across `ingest` calls. An absent closing separator is not an
    /// error; the partial frame stays buffered until more bytes arrive.
    pub fn ingest(&mut self, bytes: &[u8]) -> Vec<SampleFrame> {
        self.buffer.extend_from_slice(bytes);

        let mut frames = Vec::new();
        let sep_len = self.separator.len();
        // Search start; stays put across corrupt-frame skips so the next
        // separator is re-examined as a frame start.
        let mut cursor = 0usize;

        loop {
            let Some(start) = self.separator.find(&self.buffer, cursor) else {
                if cursor == 0 {
                    self.trim_leading_garbage();
                }
                break;
            };
            let Some(end) = self.separator.find(&self.buffer, start + sep_len) else {
                // Incomplete frame. Keep it from the separator onward; the
                // bytes in front are the previous cycle's stale trailer.
                if start > 0 {
                    self.buffer.drain(..start);
                }
                break;
            };

            let payload_start = start + sep_len + self.geometry.index_bytes;
            let payload_end = end.saturating_sub(self.geometry.header_bytes);
            let expected = self.geometry.payload_bytes();
            if payload_end <= payload_start || payload_end - payload_start != expected {
                self.stats.corrupt_frames += 1;
                log::warn!(
                    "corrupt frame: payload {} bytes, expected {}; resynchronizing",
                    payload_end.saturating_sub(payload_start),
                    expected
                );
                // Resynchronize at the next separator without touching it.
                cursor = end;
                continue;
            }

            let idx_off = start + sep_len;
            let index = u16::from_le_bytes([self.buffer[idx_off], self.buffer[idx_off + 1]]);
            self.track_index(index);

            let samples: Vec<u16> = self.buffer[payload_start..payload_end]
                .chunks_exact(2)
                .map(|b| u16::from_le_bytes([b[0], b[1]]))
                .collect();
            frames.push(SampleFrame::new(index, samples));
            self.stats.frames_decoded += 1;

            // The closing separator becomes the start of the next frame.
            self.buffer.drain(..end);
            cursor = 0;
        }

        frames
    }

    /// Decoding counters
    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Bytes currently buffered awaiting a complete frame
    pub fn pending_bytes(&self) -> usize {
        self.buffer.len()
    }

    /// Drop separator-free garbage, keeping a tail that could be the
    /// beginning of a separator split across chunks.
    fn trim_leading_garbage(&mut self) {
        let keep = self.separator.len().saturating_sub(1);
        if self.buffer.len() > keep {
            let cut = self.buffer.len() - keep;
            self.buffer.drain(..cut);
        }
    }

    fn track_index(&mut self, index: u16) {
        if let Some(prev) = self.last_index {
            let gap = index.wrapping_sub(prev).wrapping_sub(1);
            if gap != 0 {
                self.stats.frames_dropped += u64::from(gap);
                log::warn!("frame index jumped {prev} -> {index}, {gap} frame(s) lost");
            }
        }
        self.last_index = Some(index);
    }
}
