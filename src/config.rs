/// Samples averaged to compute the tare offset.
pub const TARE_SAMPLES: usize = 15;
/// Samples averaged for each calibration point.
pub const CALIBRATION_SAMPLES: usize = 20;
/// Time the operator gets to place or remove each calibration weight.
pub const SETTLE_MS: u32 = 15_000;
/// Longest wait for a single sample-ready tick.
pub const READY_TIMEOUT_MS: u32 = 1_000;
/// How often the ready signal is polled while waiting.
pub const READY_POLL_INTERVAL_US: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    pub tare_samples: usize,
    pub calibration_samples: usize,
    pub settle_ms: u32,
    pub ready_timeout_ms: u32,
    pub poll_interval_us: u32,
}

impl SamplingConfig {
    pub const fn new() -> Self {
        Self {
            tare_samples: TARE_SAMPLES,
            calibration_samples: CALIBRATION_SAMPLES,
            settle_ms: SETTLE_MS,
            ready_timeout_ms: READY_TIMEOUT_MS,
            poll_interval_us: READY_POLL_INTERVAL_US,
        }
    }

    pub const fn with_tare_samples(mut self, samples: usize) -> Self {
        self.tare_samples = samples;
        self
    }

    pub const fn with_calibration_samples(mut self, samples: usize) -> Self {
        self.calibration_samples = samples;
        self
    }

    pub const fn with_settle_ms(mut self, ms: u32) -> Self {
        self.settle_ms = ms;
        self
    }

    pub const fn with_ready_timeout_ms(mut self, ms: u32) -> Self {
        self.ready_timeout_ms = ms;
        self
    }

    /// A zero interval is raised to 1us so the timeout still elapses.
    pub const fn with_poll_interval_us(mut self, us: u32) -> Self {
        self.poll_interval_us = if us == 0 { 1 } else { us };
        self
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::new()
    }
}
