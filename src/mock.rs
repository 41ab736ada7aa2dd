//! Scripted collaborators for host tests.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;

use crate::strain_gauge::interrupt::SampleReady;
use crate::strain_gauge::StrainGauge;
use crate::VoltageSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcFault;

/// Plays back a fixed list of voltages, then fails.
pub struct MockAdc {
    voltages: VecDeque<f32>,
    fail: bool,
}

impl MockAdc {
    pub fn new(voltages: &[f32]) -> Self {
        Self {
            voltages: voltages.iter().copied().collect(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            voltages: VecDeque::new(),
            fail: true,
        }
    }

    pub fn remaining(&self) -> usize {
        self.voltages.len()
    }
}

impl VoltageSource for MockAdc {
    type Error = AdcFault;

    fn read_voltage(&mut self) -> Result<f32, Self::Error> {
        if self.fail {
            return Err(AdcFault);
        }
        Ok(self
            .voltages
            .pop_front()
            .expect("test read more voltages than scripted"))
    }
}

/// Ready on every `period`th poll, never when `period` is zero.
pub struct MockReady {
    period: usize,
    polls: usize,
    taken: usize,
}

impl MockReady {
    pub fn always() -> Self {
        Self::every(1)
    }

    pub fn never() -> Self {
        Self::every(0)
    }

    pub fn every(period: usize) -> Self {
        Self {
            period,
            polls: 0,
            taken: 0,
        }
    }

    /// Ticks consumed so far.
    pub fn taken(&self) -> usize {
        self.taken
    }
}

impl SampleReady for MockReady {
    fn is_ready(&self) -> bool {
        self.period != 0 && (self.polls + 1) % self.period == 0
    }

    fn clear(&mut self) {
        self.taken += 1;
    }

    fn take(&mut self) -> bool {
        let ready = self.is_ready();
        self.polls += 1;
        if ready {
            self.clear();
        }
        ready
    }
}

/// Records time spent instead of sleeping.
#[derive(Default)]
pub struct MockDelay {
    ns: u64,
}

impl MockDelay {
    pub fn total_us(&self) -> u64 {
        self.ns / 1_000
    }

    pub fn total_ms(&self) -> u64 {
        self.ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.ns += u64::from(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.ns += u64::from(us) * 1_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ns += u64::from(ms) * 1_000_000;
    }
}

/// An uninitialized gauge that is always ready and plays back `voltages`.
pub fn gauge(voltages: &[f32]) -> StrainGauge<MockAdc, MockReady, MockDelay> {
    StrainGauge::new(
        MockAdc::new(voltages),
        MockReady::always(),
        MockDelay::default(),
    )
}
