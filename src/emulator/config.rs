/// Rate the delay and sound timers count down at.
pub const TIMER_HZ: u32 = 60;

/// Default instruction rate. At 60 frames per second this is
/// 12 instructions per frame and one timer tick per frame.
pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 720;

/// Behaviour that differs between historical interpreters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quirks {
    /// 8XY6 and 8XYE shift VY into VX (COSMAC VIP) instead of shifting VX in place.
    pub shift_reads_vy: bool,
}

/// How an `Emulator` runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Target instruction rate, which fixes the timer cadence.
    pub instructions_per_second: u32,
    pub quirks: Quirks,
    /// Seed for CXKK. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Make `run` return right after an unknown or unsupported opcode.
    pub halt_on_anomaly: bool,
}

impl Config {

    /// Executed instructions per timer tick, never less than one.
    pub fn timer_divisor(&self) -> u32 {
        (self.instructions_per_second / TIMER_HZ).max(1)
    }

    /// Instructions a host should run per frame to hit the target rate.
    pub fn instructions_per_frame(&self, frames_per_second: u32) -> u32 {
        (self.instructions_per_second / frames_per_second.max(1)).max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instructions_per_second: DEFAULT_INSTRUCTIONS_PER_SECOND,
            quirks: Quirks::default(),
            seed: None,
            halt_on_anomaly: false,
        }
    }
}
