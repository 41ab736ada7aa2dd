#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod regression;
pub mod strain_gauge;

#[cfg(test)]
pub(crate) mod mock;

pub use config::SamplingConfig;
pub use error::Error;
pub use regression::{fit_line, DegenerateCalibration};
pub use strain_gauge::interrupt::{SampleReady, TickFlag};
pub use strain_gauge::{CalibrationEquation, LoadCellSpec, Mode, StrainGauge};

/// Kilograms in one avoirdupois pound.
pub const KG_PER_LB: f32 = 0.453_592_37;

/// The ADC channel the strain gauge bridge is wired to.
pub trait VoltageSource {
    type Error;

    /// Read the current sensed voltage, in volts.
    fn read_voltage(&mut self) -> Result<f32, Self::Error>;
}

pub trait LoadCell {
    type Error;

    /// Read the weight in kilograms, after calibration and tare.
    fn read_kg(&mut self) -> Result<f32, Self::Error>;

    /// Read the weight in pounds.
    fn read_lb(&mut self) -> Result<f32, Self::Error> {
        self.read_kg().map(kg_to_lb)
    }

    /// Zero the load cell by averaging readings with nothing on it.
    fn tare(&mut self) -> Result<(), Self::Error>;

    /// Get the tare offset, in kilograms.
    fn offset(&self) -> f32;

    /// Set the calibration line (AKA calibrate the scale).
    /// Use this to ensure that 1kg ~ 1kg
    fn set_calibration_equation(&mut self, slope: f32, intercept: f32);

    /// Get the calibration line.
    fn calibration_equation(&self) -> CalibrationEquation;
}

pub fn kg_to_lb(kilograms: f32) -> f32 {
    kilograms / KG_PER_LB
}
