//! Soft synchronization of two asynchronous producers
//!
//! The image source and the motion-capture source tick on independent
//! clocks. [`SoftSync`] pairs their most recent values: each side has a
//! single pending slot, a new arrival overwrites an unconsumed one, and a
//! pair is emitted the moment both slots are filled. This latest-wins
//! policy is deliberate; queueing stale values would defeat the soft
//! real-time pairing the recorder relies on. Do not "fix" it into a queue.

use std::time::Instant;

/// A record created when both producers have delivered a value.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncedPair<A, B> {
    /// Value from producer A
    pub a: A,
    /// Value from producer B
    pub b: B,
    /// Monotonic seconds since the synchronizer was created
    pub timestamp_s: f64,
}

/// Two-producer latest-wins pairing primitive.
///
/// `offer_a` and `offer_b` may interleave in any order but must be called
/// from one logical thread of control; the `&mut self` receivers enforce
/// exclusive access at compile time. Values are taken by value, so the
/// synchronizer never aliases a producer's transient buffer - callers clone
/// out of reused buffers before offering.
pub struct SoftSync<A, B> {
    pending_a: Option<A>,
    pending_b: Option<B>,
    epoch: Instant,
}

impl<A, B> SoftSync<A, B> {
    /// Create a synchronizer; pair timestamps count from this moment
    pub fn new() -> Self {
        Self {
            pending_a: None,
            pending_b: None,
            epoch: Instant::now(),
        }
    }

    /// Offer a value from producer A.
    ///
    /// Emits a pair when producer B already has a pending value, draining
    /// both slots. Otherwise the value is stored, replacing any unconsumed
    /// previous A value.
    pub fn offer_a(&mut self, a: A) -> Option<SyncedPair<A, B>> {
        match self.pending_b.take() {
            Some(b) => {
                self.pending_a = None;
                Some(self.pair(a, b))
            }
            None => {
                self.pending_a = Some(a);
                None
            }
        }
    }

    /// Offer a value from producer B; symmetric to [`Self::offer_a`]
    pub fn offer_b(&mut self, b: B) -> Option<SyncedPair<A, B>> {
        match self.pending_a.take() {
            Some(a) => {
                self.pending_b = None;
                Some(self.pair(a, b))
            }
            None => {
                self.pending_b = Some(b);
                None
            }
        }
    }

    /// Discard any unconsumed pending values
    pub fn reset(&mut self) {
        self.pending_a = None;
        self.pending_b = None;
    }

    /// True when a value from A awaits its partner
    pub fn has_pending_a(&self) -> bool {
        self.pending_a.is_some()
    }

    /// True when a value from B awaits its partner
    pub fn has_pending_b(&self) -> bool {
        self.pending_b.is_some()
    }

    fn pair(&self, a: A, b: B) -> SyncedPair<A, B> {
        SyncedPair {
            a,
            b,
            timestamp_s: self.epoch.elapsed().as_secs_f64(),
        }
    }
}

impl<A, B> Default for SoftSync<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a_then_b_pairs() {
        let mut sync: SoftSync<u32, &str> = SoftSync::new();
        assert!(sync.offer_a(1).is_none());
        let pair = sync.offer_b("x").expect("pair");
        assert_eq!(pair.a, 1);
        assert_eq!(pair.b, "x");
        assert!(!sync.has_pending_a());
        assert!(!sync.has_pending_b());
    }

    #[test]
    fn test_latest_a_wins() {
        let mut sync: SoftSync<u32, &str> = SoftSync::new();
        assert!(sync.offer_a(1).is_none());
        assert!(sync.offer_a(2).is_none()); // overwrites 1
        let pair = sync.offer_b("x").expect("pair");
        assert_eq!(pair.a, 2);
        assert_eq!(pair.b, "x");
    }

    #[test]
    fn test_latest_b_wins() {
        let mut sync: SoftSync<&str, u32> = SoftSync::new();
        assert!(sync.offer_b(1).is_none());
        assert!(sync.offer_b(2).is_none());
        let pair = sync.offer_a("y").expect("pair");
        assert_eq!(pair.a, "y");
        assert_eq!(pair.b, 2);
    }

    #[test]
    fn test_lone_value_waits() {
        let mut sync: SoftSync<u32, u32> = SoftSync::new();
        assert!(sync.offer_a(1).is_none());
        assert!(sync.offer_b(10).is_some()); // pairs (1, 10)

        // The next lone B waits for a third A
        assert!(sync.offer_b(11).is_none());
        assert!(sync.has_pending_b());
        let pair = sync.offer_a(2).expect("pair");
        assert_eq!((pair.a, pair.b), (2, 11));
    }

    #[test]
    fn test_timestamps_monotonic() {
        let mut sync: SoftSync<u32, u32> = SoftSync::new();
        sync.offer_a(1);
        let t1 = sync.offer_b(1).expect("pair").timestamp_s;
        sync.offer_a(2);
        let t2 = sync.offer_b(2).expect("pair").timestamp_s;
        assert!(t1 >= 0.0);
        assert!(t2 >= t1);
    }

    #[test]
    fn test_reset_drops_pending() {
        let mut sync: SoftSync<u32, u32> = SoftSync::new();
        sync.offer_a(1);
        sync.reset();
        assert!(sync.offer_b(10).is_none());
    }
}
