/// Truncate a fractional percentage into 0..=100.
pub fn truncate_percent(p: f64) -> u8 {
    if p.is_nan() {
        return 0;
    }
    p.trunc().clamp(0.0, 100.0) as u8
}

pub type ProgressChangeFn = Box<dyn FnMut(u8) + Send>;

/// Holds the displayed percentage and forwards every tick to the caller.
pub struct ProgressReporter {
    current: u8,
    on_change: ProgressChangeFn,
}

impl ProgressReporter {
    pub fn new(on_change: impl FnMut(u8) + Send + 'static) -> Self {
        Self {
            current: 0,
            on_change: Box::new(on_change),
        }
    }

    pub fn report(&mut self, p: f64) -> u8 {
        let v = truncate_percent(p);
        self.current = v;
        (self.on_change)(v);
        v
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    /// Clear display state without notifying the caller.
    pub fn reset(&mut self) {
        self.current = 0;
    }
}
