//! Sample-ready signalling between a periodic timer interrupt and the sampler.
//!
//! The timer fires at the ADC's conversion rate. Each tick raises the flag,
//! the sampler consumes it before taking one reading, so no conversion is read
//! twice.

use core::cell::Cell;

use critical_section::Mutex;

/// The "fresh conversion available" signal from the timer.
pub trait SampleReady {
    /// Has a tick arrived since the last clear?
    fn is_ready(&self) -> bool;

    /// Consume the tick.
    fn clear(&mut self);

    /// Check for a tick and consume it.
    fn take(&mut self) -> bool {
        let ready = self.is_ready();
        if ready {
            self.clear();
        }
        ready
    }
}

/// Ready flag shared with an interrupt handler.
///
/// ```ignore
/// static TICK: TickFlag = TickFlag::new();
///
/// #[interrupt]
/// fn TIMER0() {
///     TICK.signal();
/// }
///
/// let mut gauge = StrainGauge::new(adc, &TICK, delay);
/// ```
pub struct TickFlag {
    ready: Mutex<Cell<bool>>,
}

impl TickFlag {
    pub const fn new() -> Self {
        Self {
            ready: Mutex::new(Cell::new(false)),
        }
    }

    /// Raise the flag. Call from the timer interrupt.
    pub fn signal(&self) {
        critical_section::with(|cs| self.ready.borrow(cs).set(true));
    }
}

impl Default for TickFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleReady for &TickFlag {
    fn is_ready(&self) -> bool {
        critical_section::with(|cs| self.ready.borrow(cs).get())
    }

    fn clear(&mut self) {
        critical_section::with(|cs| self.ready.borrow(cs).set(false));
    }

    // a tick landing between the check and the clear would be lost otherwise
    fn take(&mut self) -> bool {
        critical_section::with(|cs| self.ready.borrow(cs).replace(false))
    }
}
