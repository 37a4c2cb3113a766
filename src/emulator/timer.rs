/// The delay and sound timers, clocked off the instruction count.
///
/// Every executed instruction calls `on_cycle`, and every `divisor`-th
/// call decrements both timers once. With `divisor` set to
/// instructions-per-second / 60 the timers run at 60 Hz of emulated time,
/// whatever pace the host drives the machine at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    divisor: u32,
    cycles: u64,
}

impl Timers {

    pub fn new(divisor: u32) -> Timers {
        Timers {
            delay: 0,
            sound: 0,
            divisor: divisor.max(1),
            cycles: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Timers::new(self.divisor);
    }

    /// Count one instruction. Returns true if the timers ticked.
    pub fn on_cycle(&mut self) -> bool {
        self.cycles += 1;
        if self.cycles % self.divisor as u64 != 0 {
            return false;
        }
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
        log::debug!("Timer tick, delay={} sound={}", self.delay, self.sound);
        true
    }

    /// Instructions counted since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn divisor(&self) -> u32 {
        self.divisor
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ticks_every_divisor_cycles() {
        let mut timers = Timers::new(12);
        timers.delay = 5;
        timers.sound = 1;
        for _ in 0..11 {
            assert!(!timers.on_cycle());
        }
        assert!(timers.on_cycle());
        assert_eq!((timers.delay, timers.sound), (4, 0));
        assert_eq!(timers.cycles(), 12);
    }

    #[test]
    fn timers_stop_at_zero() {
        let mut timers = Timers::new(1);
        timers.delay = 2;
        for _ in 0..10 {
            timers.on_cycle();
        }
        assert_eq!((timers.delay, timers.sound), (0, 0));
    }

    #[test]
    fn zero_divisor_is_clamped() {
        assert_eq!(Timers::new(0).divisor(), 1);
    }

    #[test]
    fn reset_keeps_divisor() {
        let mut timers = Timers::new(7);
        timers.delay = 9;
        timers.on_cycle();
        timers.reset();
        assert_eq!(timers, Timers::new(7));
    }
}
