use embedded_hal::delay::DelayNs;

use crate::config::SamplingConfig;
use crate::error::Error;
use crate::strain_gauge::interrupt::SampleReady;
use crate::{LoadCell, VoltageSource};

mod calibration;
pub mod interrupt;
mod sampler;

/// Manufacturer's load cell rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadCellSpec {
    /// Full scale capacity in kg (3kg, 10kg, 50kg, etc.)
    pub capacity: u16,
    /// Excitation / bridge supply voltage in V (usually 5V)
    pub excitation_voltage: f32,
    /// Rated output in mV/V
    pub rated_output: f32,
}

impl LoadCellSpec {
    pub fn new(excitation_voltage: f32, capacity: u16, rated_output: f32) -> Option<Self> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if capacity == 0 || !positive(excitation_voltage) || !positive(rated_output) {
            return None;
        }
        Some(Self {
            capacity,
            excitation_voltage,
            rated_output,
        })
    }

    /// Kilograms per volt of bridge output.
    pub fn kg_per_volt(&self) -> f32 {
        f32::from(self.capacity) / (self.excitation_voltage * self.rated_output)
    }
}

/// Line of best fit from raw kilograms to corrected kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationEquation {
    pub slope: f32,
    pub intercept: f32,
}

impl CalibrationEquation {
    /// Leaves readings unchanged.
    pub const PASS_THROUGH: Self = Self {
        slope: 1.0,
        intercept: 0.0,
    };

    /// Tension and compression mirror each other around zero, so the
    /// intercept is subtracted for non-positive readings.
    pub fn apply(&self, kilograms: f32) -> f32 {
        if kilograms > 0.0 {
            self.slope * kilograms + self.intercept
        } else {
            self.slope * kilograms - self.intercept
        }
    }
}

impl Default for CalibrationEquation {
    fn default() -> Self {
        Self::PASS_THROUGH
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Offset is not applied.
    Taring,
    /// Neither the calibration equation nor the offset is applied.
    Calibrating,
}

pub struct StrainGauge<ADC, READY, DELAY> {
    adc: ADC,
    ready: READY,
    delay: DELAY,
    spec: Option<LoadCellSpec>,
    offset: f32, // tare, kg
    equation: CalibrationEquation,
    mode: Mode,
    config: SamplingConfig,
}

impl<ADC, READY, DELAY, E> StrainGauge<ADC, READY, DELAY>
where
    ADC: VoltageSource<Error = E>,
    READY: SampleReady,
    DELAY: DelayNs,
{
    pub fn new(adc: ADC, ready: READY, delay: DELAY) -> Self {
        Self::with_config(adc, ready, delay, SamplingConfig::default())
    }

    pub fn with_config(adc: ADC, ready: READY, delay: DELAY, config: SamplingConfig) -> Self {
        Self {
            adc,
            ready,
            delay,
            spec: None,
            offset: 0.0,
            equation: CalibrationEquation::PASS_THROUGH,
            mode: Mode::Normal,
            config,
        }
    }

    /// Set the load cell rating used to convert volts to kilograms.
    /// Clears the tare offset, keeps the calibration equation.
    pub fn initialize(
        &mut self,
        excitation_voltage: f32,
        capacity: u16,
        rated_output: f32,
    ) -> Result<(), Error<E>> {
        let spec =
            LoadCellSpec::new(excitation_voltage, capacity, rated_output).ok_or(Error::InvalidSpec)?;
        log::debug!(
            "load cell: {}kg, VE {}V, RO {}mV/V",
            spec.capacity,
            spec.excitation_voltage,
            spec.rated_output
        );
        self.spec = Some(spec);
        self.offset = 0.0;
        Ok(())
    }

    pub fn spec(&self) -> Option<LoadCellSpec> {
        self.spec
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> SamplingConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SamplingConfig) {
        self.config = config;
    }

    pub fn raw_to_kg(&self, voltage: f32) -> Result<f32, Error<E>> {
        let spec = self.spec.ok_or(Error::NotInitialized)?;
        Ok(voltage * spec.kg_per_volt())
    }

    pub fn apply_calibration(&self, kilograms: f32) -> f32 {
        match self.mode {
            Mode::Calibrating => kilograms,
            _ => self.equation.apply(kilograms),
        }
    }

    pub fn apply_tare(&self, kilograms: f32) -> f32 {
        match self.mode {
            Mode::Taring | Mode::Calibrating => kilograms,
            Mode::Normal => kilograms - self.offset,
        }
    }

    /// Give back the collaborators.
    pub fn release(self) -> (ADC, READY, DELAY) {
        (self.adc, self.ready, self.delay)
    }
}

impl<ADC, READY, DELAY, E> LoadCell for StrainGauge<ADC, READY, DELAY>
where
    ADC: VoltageSource<Error = E>,
    READY: SampleReady,
    DELAY: DelayNs,
{
    type Error = Error<E>;

    fn read_kg(&mut self) -> Result<f32, Self::Error> {
        // fail before touching the ADC
        self.spec.ok_or(Error::NotInitialized)?;
        let voltage = self.adc.read_voltage().map_err(Error::Adc)?;
        log::debug!("measured voltage: {voltage}");
        let kilograms = self.raw_to_kg(voltage)?;
        log::debug!("kilograms: {kilograms}");
        Ok(self.apply_tare(self.apply_calibration(kilograms)))
    }

    fn tare(&mut self) -> Result<(), Self::Error> {
        self.tare_offset()
    }

    fn offset(&self) -> f32 {
        self.offset
    }

    fn set_calibration_equation(&mut self, slope: f32, intercept: f32) {
        self.equation = CalibrationEquation { slope, intercept };
    }

    fn calibration_equation(&self) -> CalibrationEquation {
        self.equation
    }
}
