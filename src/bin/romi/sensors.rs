use romi::navigation::line_sensor::LineReadings;
use romi::navigation::task::SensorBank;
use stm32f4xx_hal::{
    adc::{config::SampleTime, Adc},
    gpio::{Analog, Pin},
    pac::ADC1,
};

const SAMPLE_TIME: SampleTime = SampleTime::Cycles_112;

// reflectance array (left to right) and the calibration jumper, all on ADC1
pub struct AnalogSensors {
    pub adc: Adc<ADC1>,
    pub l2: Pin<'C', 0, Analog>,
    pub l1: Pin<'A', 7, Analog>,
    pub m: Pin<'A', 6, Analog>,
    pub r1: Pin<'A', 5, Analog>,
    pub r2: Pin<'C', 1, Analog>,
    pub h: Pin<'A', 4, Analog>,
    pub calibration: Pin<'C', 3, Analog>,
}

impl SensorBank for AnalogSensors {
    fn read_line(&mut self) -> LineReadings {
        LineReadings {
            l2: self.adc.convert(&self.l2, SAMPLE_TIME),
            l1: self.adc.convert(&self.l1, SAMPLE_TIME),
            m: self.adc.convert(&self.m, SAMPLE_TIME),
            r1: self.adc.convert(&self.r1, SAMPLE_TIME),
            r2: self.adc.convert(&self.r2, SAMPLE_TIME),
            h: self.adc.convert(&self.h, SAMPLE_TIME),
        }
    }

    fn read_calibration(&mut self) -> u16 {
        self.adc.convert(&self.calibration, SAMPLE_TIME)
    }
}
