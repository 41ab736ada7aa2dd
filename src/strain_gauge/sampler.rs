use embedded_hal::delay::DelayNs;

use super::interrupt::SampleReady;
use super::StrainGauge;
use crate::error::Error;
use crate::{LoadCell, VoltageSource};

impl<ADC, READY, DELAY, E> StrainGauge<ADC, READY, DELAY>
where
    ADC: VoltageSource<Error = E>,
    READY: SampleReady,
    DELAY: DelayNs,
{
    /// Average `count` readings in kg, one per sample-ready tick.
    pub fn read_average(&mut self, count: usize) -> Result<f32, Error<E>> {
        if count == 0 {
            return Err(Error::InvalidArgument);
        }
        self.spec.ok_or(Error::NotInitialized)?;

        let mut sum = 0.0;
        for _ in 0..count {
            self.wait_for_sample()?;
            let weight = self.read_kg()?;
            sum += weight;
            log::debug!("weight: {weight}, sum: {sum}");
        }
        let average = sum / count as f32;
        log::debug!("average: {average}");
        Ok(average)
    }

    /// Block until the timer flags a fresh conversion, consuming the flag.
    fn wait_for_sample(&mut self) -> Result<(), Error<E>> {
        // the field is public, so it can still be zero
        let poll_us = self.config.poll_interval_us.max(1);
        let timeout_us = u64::from(self.config.ready_timeout_ms) * 1_000;
        let mut waited_us: u64 = 0;
        while !self.ready.take() {
            if waited_us >= timeout_us {
                log::warn!("no sample tick after {}ms", self.config.ready_timeout_ms);
                return Err(Error::SampleTimeout);
            }
            self.delay.delay_us(poll_us);
            waited_us += u64::from(poll_us);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SamplingConfig;
    use crate::mock::{gauge, MockAdc, MockDelay, MockReady};

    #[test]
    fn identical_readings_average_to_themselves() {
        for n in [1usize, 2, 7, 20] {
            let voltages = vec![0.3f32; n];
            let mut sg = gauge(&voltages);
            sg.initialize(5.0, 50, 2.0).unwrap();
            let average = sg.read_average(n).unwrap();
            assert!((average - 1.5).abs() < 1e-5, "n = {n}: {average}");
        }
    }

    #[test]
    fn averages_distinct_readings() {
        let mut sg = gauge(&[0.1, 0.2, 0.3, 0.4]);
        sg.initialize(5.0, 10, 1.0).unwrap();
        // 0.2, 0.4, 0.6, 0.8 kg
        assert!((sg.read_average(4).unwrap() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut sg = gauge(&[1.0]);
        sg.initialize(5.0, 50, 2.0).unwrap();
        assert_eq!(sg.read_average(0), Err(Error::InvalidArgument));
    }

    #[test]
    fn requires_initialize() {
        let mut sg = gauge(&[1.0]);
        assert_eq!(sg.read_average(1), Err(Error::NotInitialized));
    }

    #[test]
    fn one_tick_per_sample() {
        let mut sg = gauge(&[0.1; 5]);
        sg.initialize(5.0, 50, 2.0).unwrap();
        sg.read_average(5).unwrap();
        let (adc, ready, _) = sg.release();
        assert_eq!(ready.taken(), 5);
        assert_eq!(adc.remaining(), 0);
    }

    #[test]
    fn waits_for_late_ticks() {
        let config = SamplingConfig::new()
            .with_poll_interval_us(100)
            .with_ready_timeout_ms(1);
        let mut sg = StrainGauge::with_config(
            MockAdc::new(&[0.1, 0.1]),
            MockReady::every(3),
            MockDelay::default(),
            config,
        );
        sg.initialize(5.0, 50, 2.0).unwrap();
        sg.read_average(2).unwrap();
        let (_, _, delay) = sg.release();
        // two polls before each tick
        assert_eq!(delay.total_us(), 400);
    }

    #[test]
    fn missing_tick_times_out() {
        let config = SamplingConfig::new()
            .with_poll_interval_us(250)
            .with_ready_timeout_ms(2);
        let mut sg = StrainGauge::with_config(
            MockAdc::new(&[0.1]),
            MockReady::never(),
            MockDelay::default(),
            config,
        );
        sg.initialize(5.0, 50, 2.0).unwrap();
        assert_eq!(sg.read_average(1), Err(Error::SampleTimeout));
        let (adc, _, delay) = sg.release();
        assert_eq!(delay.total_us(), 2_000);
        assert_eq!(adc.remaining(), 1);
    }

    #[test]
    fn adc_failure_stops_averaging() {
        let mut sg = StrainGauge::new(MockAdc::failing(), MockReady::always(), MockDelay::default());
        sg.initialize(5.0, 50, 2.0).unwrap();
        assert_eq!(sg.read_average(3), Err(Error::Adc(crate::mock::AdcFault)));
    }
}
