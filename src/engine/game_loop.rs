//! Frame timing for the host loop
//!
//! Produces one `FrameTime` per rendered frame: the total running time and
//! the elapsed time since the previous frame, both in milliseconds. The
//! elapsed value is clamped so a long stall (window drag, breakpoint) does
//! not hand the physics step one enormous delta.
use std::time::{Duration, Instant};

/// Longest frame delta handed to the simulation
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(50);

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Timing of a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Milliseconds of simulated time since the clock started
    pub time_ms: f64,
    /// Milliseconds since the previous frame
    pub elapsed_ms: f32,
}

/// Frame clock state
pub struct FrameClock {
    /// Time of last frame
    last_frame_time: Instant,

    /// Simulated time, excluding paused stretches and clamped stalls
    sim_time: Duration,

    /// Whether the game is paused
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl FrameClock {
    /// Create a new frame clock
    pub fn new() -> Self {
        Self {
            last_frame_time: Instant::now(),
            sim_time: Duration::ZERO,
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame. Returns `None` while paused.
    pub fn begin_frame(&mut self) -> Option<FrameTime> {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Advance by an explicit frame duration
    pub fn advance(&mut self, frame_time: Duration) -> Option<FrameTime> {
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        if self.paused {
            return None;
        }

        let delta = frame_time.min(MAX_FRAME_DELTA);
        self.sim_time += delta;

        Some(FrameTime {
            time_ms: self.sim_time.as_secs_f64() * 1000.0,
            elapsed_ms: delta.as_secs_f32() * 1000.0,
        })
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames seen
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Don't count the paused stretch as one giant frame
            self.last_frame_time = Instant::now();
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
