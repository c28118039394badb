//! Rigid-body pose types from the motion-capture system

/// A 4x4 homogeneous transform, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3 {
    m: [f64; 16],
}

impl Transform3 {
    /// Identity transform
    pub fn identity() -> Self {
        let mut m = [0.0; 16];
        m[0] = 1.0;
        m[5] = 1.0;
        m[10] = 1.0;
        m[15] = 1.0;
        Self { m }
    }

    /// Build from 16 row-major values
    pub fn from_row_major(m: [f64; 16]) -> Self {
        Self { m }
    }

    /// Row-major matrix entries
    pub fn values(&self) -> &[f64; 16] {
        &self.m
    }

    /// Entry at (row, col), row and col in 0..4
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.m[row * 4 + col]
    }

    /// True when any entry is NaN (tracker lost sight of the rigid body)
    pub fn has_nan(&self) -> bool {
        self.m.iter().any(|v| v.is_nan())
    }
}

impl Default for Transform3 {
    fn default() -> Self {
        Self::identity()
    }
}

/// One motion-capture update: poses of the probe and reference rigid bodies,
/// delivered together by the tracker at each of its sample points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoseUpdate {
    /// Ultrasound probe rigid body (B_PROBE)
    pub probe: Transform3,
    /// Phantom/anatomy reference rigid body (B_REF)
    pub reference: Transform3,
}
