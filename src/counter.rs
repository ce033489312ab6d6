pub const COUNT_DURATION_MS: f64 = 2_000.0;
pub const FRAME_MS: f64 = 16.0;

/// Animated count from zero up to a stat's target, one step per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CountUp {
    target: u32,
    step: f64,
    current: f64,
    finished: bool,
}

impl CountUp {
    pub fn new(target: u32) -> Self {
        Self::with_timing(target, COUNT_DURATION_MS, FRAME_MS)
    }

    pub fn with_timing(target: u32, duration_ms: f64, frame_ms: f64) -> Self {
        let frames = (duration_ms / frame_ms.max(1.0)).max(1.0);
        Self {
            target,
            step: f64::from(target) / frames,
            current: 0.0,
            finished: target == 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tick(&mut self) -> u32 {
        if self.finished {
            return self.target;
        }

        self.current += self.step;
        if self.current < f64::from(self.target) {
            self.current.ceil() as u32
        } else {
            self.finished = true;
            self.target
        }
    }
}
