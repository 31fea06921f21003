//! Refresh counters for the cube driver.

/// Running counters and the timings of the most recent refresh.
///
/// Durations are in microseconds. Counters are cumulative over the life of
/// the driver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshMetrics {
    /// Complete frames delivered to the transport.
    pub frames: u64,
    /// Scene steps taken.
    pub scene_steps: u64,
    /// Scene replacements (playlist rotation and explicit switches).
    pub scene_swaps: u64,
    /// Time spent remapping and packing the last frame.
    pub last_encode_us: u64,
    /// Time spent transmitting the last frame, including a failed attempt.
    pub last_transmit_us: u64,
}
