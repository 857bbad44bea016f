//! Time management for the frame loop.

/// Turns the frame driver's timestamps into per-frame delta time.
///
/// The driver reports absolute timestamps in seconds. The first frame has a
/// delta of zero; every later frame gets the difference to the previous one.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    /// Timestamp of the first frame.
    start: Option<f64>,
    /// Timestamp of the last frame.
    last_frame: Option<f64>,
    /// Duration of the last frame in seconds.
    delta: f32,
    /// Frame count since start.
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock that has not seen a frame yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new frame timestamp and return the delta time in seconds.
    pub fn tick(&mut self, timestamp_seconds: f64) -> f32 {
        self.delta = match self.last_frame {
            Some(last) => (timestamp_seconds - last) as f32,
            None => {
                self.start = Some(timestamp_seconds);
                0.0
            }
        };
        self.last_frame = Some(timestamp_seconds);
        self.frame_count += 1;
        self.delta
    }

    /// Get total elapsed time in seconds since the first frame.
    pub fn elapsed_seconds(&self) -> f32 {
        match (self.start, self.last_frame) {
            (Some(start), Some(last)) => (last - start) as f32,
            _ => 0.0,
        }
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (from the last frame only).
    pub fn fps(&self) -> f32 {
        if self.delta > 0.0 {
            1.0 / self.delta
        } else {
            0.0
        }
    }
}
