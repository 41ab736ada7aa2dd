use core::fmt;

use crate::regression::DegenerateCalibration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// A reading was requested before `initialize`.
    NotInitialized,
    /// Capacity, excitation voltage or rated output is zero, negative or not finite.
    InvalidSpec,
    /// The calibration points do not define a line (all measured values equal).
    DegenerateCalibration,
    /// The sample-ready tick did not arrive in time.
    SampleTimeout,
    /// Zero sample count, or an empty / non-positive known weight list.
    InvalidArgument,
    /// The ADC failed to produce a voltage.
    Adc(E),
}

impl<E> From<DegenerateCalibration> for Error<E> {
    fn from(_: DegenerateCalibration) -> Self {
        Error::DegenerateCalibration
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotInitialized => f.write_str("load cell rating not initialized"),
            Error::InvalidSpec => f.write_str("invalid load cell rating"),
            Error::DegenerateCalibration => f.write_str("degenerate calibration data"),
            Error::SampleTimeout => f.write_str("timed out waiting for sample tick"),
            Error::InvalidArgument => f.write_str("invalid argument"),
            Error::Adc(e) => write!(f, "adc read failed: {e:?}"),
        }
    }
}
