//! Decoded A-mode sample frame

/// One complete acquisition cycle across all probes at a single time step.
///
/// Samples are stored probe-major: probe `p` occupies indices
/// `[p * sample_count, (p + 1) * sample_count)`. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFrame {
    index: u16,
    samples: Vec<u16>,
}

impl SampleFrame {
    /// Create a frame from a decoded sample buffer
    pub fn new(index: u16, samples: Vec<u16>) -> Self {
        Self { index, samples }
    }

    /// Device-assigned frame index, used only for loss detection
    pub fn index(&self) -> u16 {
        self.index
    }

    /// All samples, probe-major
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// Total number of samples (probe_count * sample_count)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the frame holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Signal of a single probe, given the per-probe sample count
    ///
    /// Returns `None` when the probe row falls outside the frame.
    pub fn probe_samples(&self, probe: usize, sample_count: usize) -> Option<&[u16]> {
        let start = probe.checked_mul(sample_count)?;
        let end = start.checked_add(sample_count)?;
        self.samples.get(start..end)
    }
}
