use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;

use super::interrupt::SampleReady;
use super::{CalibrationEquation, Mode, StrainGauge};
use crate::error::Error;
use crate::regression::fit_line;
use crate::VoltageSource;

impl<ADC, READY, DELAY, E> StrainGauge<ADC, READY, DELAY>
where
    ADC: VoltageSource<Error = E>,
    READY: SampleReady,
    DELAY: DelayNs,
{
    /// Zero the scale by averaging `tare_samples` readings, blocking.
    pub(super) fn tare_offset(&mut self) -> Result<(), Error<E>> {
        log::info!("taring...");
        let samples = self.config.tare_samples;
        let tare_weight = self.in_mode(Mode::Taring, |sg| sg.read_average(samples))?;
        self.offset = tare_weight;
        log::info!("tare offset: {tare_weight}kg");
        Ok(())
    }

    /// Fit a calibration line through an empty-scale reading and one reading
    /// per known weight, in kg. The operator gets `settle_ms` to place each
    /// weight before it is measured.
    ///
    /// The equation is returned, not applied; pass it to
    /// [`LoadCell::set_calibration_equation`](crate::LoadCell::set_calibration_equation).
    pub fn calibrate(&mut self, known_weights: &[f32]) -> Result<CalibrationEquation, Error<E>> {
        if known_weights.is_empty() || known_weights.iter().any(|w| !(w.is_finite() && *w > 0.0)) {
            return Err(Error::InvalidArgument);
        }
        self.spec.ok_or(Error::NotInitialized)?;

        let points = self.in_mode(Mode::Calibrating, |sg| sg.capture_points(known_weights))?;
        let equation = fit_line(&points)?;
        log::info!(
            "calibration: slope {}, intercept {}",
            equation.slope,
            equation.intercept
        );
        Ok(equation)
    }

    /// Measured (x) against known (y) kilograms, the empty scale first.
    fn capture_points(&mut self, known_weights: &[f32]) -> Result<Vec<(f32, f32)>, Error<E>> {
        let samples = self.config.calibration_samples;
        let mut points = Vec::with_capacity(known_weights.len() + 1);

        log::info!("averaging 0 weight, please wait");
        let zero = self.read_average(samples)?;
        log::info!("0kg: {zero}");
        points.push((zero, 0.0));

        for (i, &weight) in known_weights.iter().enumerate() {
            log::info!(
                "you have {}s to put weight {} ({}kg) on, or take it off",
                self.config.settle_ms / 1_000,
                i + 1,
                weight
            );
            self.delay.delay_ms(self.config.settle_ms);
            let measured = self.read_average(samples)?;
            log::info!("{weight}kg: {measured}");
            points.push((measured, weight));
        }
        Ok(points)
    }

    /// Run `op` with the gauge in `mode`, back to `Normal` afterwards even on error.
    fn in_mode<T>(
        &mut self,
        mode: Mode,
        op: impl FnOnce(&mut Self) -> Result<T, Error<E>>,
    ) -> Result<T, Error<E>> {
        debug_assert_eq!(self.mode, Mode::Normal);
        self.mode = mode;
        let result = op(self);
        self.mode = Mode::Normal;
        result
    }
}
