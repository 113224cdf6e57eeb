// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Voltage and light meter on the character LCD.

use crate::{
    analog::{AdcScale, AnalogIn},
    bus::ByteBus,
    lcd::Lcd,
    present::{Line, lux_text, voltage_text},
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

pub const SAMPLE_PERIOD_MS: u32 = 500;

const LABEL_ROW: u8 = 1;
const LABEL_COL: u8 = 0;
const VALUE_ROW: u8 = 2;
const VALUE_COL: u8 = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    Voltage,
    Lux,
}

impl DisplayMode {
    pub const fn label(self) -> &'static str {
        match self {
            DisplayMode::Voltage => "Voltage:",
            DisplayMode::Lux => "The Input Light:",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Reading {
    pub raw: u16,
    pub centivolts: u32,
    pub lux: u16,
}

impl Reading {
    pub fn text(&self, mode: DisplayMode) -> Line {
        match mode {
            DisplayMode::Voltage => voltage_text(self.centivolts),
            DisplayMode::Lux => lux_text(self.lux),
        }
    }
}

pub struct Meter<ADC, BUS, RS, EN> {
    adc: ADC,
    lcd: Lcd<BUS, RS, EN>,
    scale: AdcScale,
    mode: DisplayMode,
}

impl<ADC, BUS, RS, EN> Meter<ADC, BUS, RS, EN>
where
    ADC: AnalogIn<Error = BUS::Error>,
    BUS: ByteBus,
    RS: OutputPin<Error = BUS::Error>,
    EN: OutputPin<Error = BUS::Error>,
{
    pub fn new(adc: ADC, lcd: Lcd<BUS, RS, EN>, scale: AdcScale, mode: DisplayMode) -> Self {
        Self {
            adc,
            lcd,
            scale,
            mode,
        }
    }

    /// Initialize the display and write the label line.
    pub fn start<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), BUS::Error> {
        self.lcd.init(delay)?;
        self.lcd
            .write_str_at(delay, LABEL_ROW, LABEL_COL, self.mode.label())
    }

    pub fn measure(&mut self) -> Result<Reading, BUS::Error> {
        let raw = self.adc.sample()?;
        Ok(Reading {
            raw,
            centivolts: self.scale.centivolts(raw),
            lux: self.scale.lux(raw),
        })
    }

    /// Take one reading, show it and wait for the next sample period.
    pub fn run_once<D: DelayNs>(&mut self, delay: &mut D) -> Result<Reading, BUS::Error> {
        let reading = self.measure()?;
        let text = reading.text(self.mode);
        self.lcd
            .write_str_at(delay, VALUE_ROW, VALUE_COL, text.as_str())?;
        delay.delay_ms(SAMPLE_PERIOD_MS);
        Ok(reading)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        analog::SCALE_12BIT_5V,
        testutil::{Clock, RecBus, RecPin},
    };
    use core::convert::Infallible;
    use std::{vec, vec::Vec};

    struct FakeAdc(Vec<u16>);

    impl AnalogIn for FakeAdc {
        type Error = Infallible;

        fn sample(&mut self) -> Result<u16, Self::Error> {
            Ok(self.0.remove(0))
        }
    }

    fn meter(
        clock: &Clock,
        mode: DisplayMode,
        codes: Vec<u16>,
    ) -> (Meter<FakeAdc, RecBus, RecPin, RecPin>, RecBus) {
        let bus = RecBus::new(clock);
        let lcd = Lcd::new(bus.clone(), RecPin::new(clock), RecPin::new(clock));
        (Meter::new(FakeAdc(codes), lcd, SCALE_12BIT_5V, mode), bus)
    }

    #[test]
    fn test_voltage() {
        let clock = Clock::new();
        let (mut meter, bus) = meter(&clock, DisplayMode::Voltage, vec![4095, 2048]);
        let mut delay = clock.delay();

        meter.start(&mut delay).unwrap();
        let mut expected = vec![0x01, 0x38, 0x0C, 0x06, 0x80];
        expected.extend_from_slice(b"Voltage:");
        assert_eq!(bus.bytes(), expected);

        let reading = meter.run_once(&mut delay).unwrap();
        assert_eq!(reading.raw, 4095);
        assert_eq!(reading.centivolts, 500);
        expected.push(0xC4);
        expected.extend_from_slice(b"5.00 V");
        assert_eq!(bus.bytes(), expected);

        let t = clock.now_ms();
        meter.run_once(&mut delay).unwrap();
        expected.push(0xC4);
        expected.extend_from_slice(b"2.50 V");
        assert_eq!(bus.bytes(), expected);
        // Address, 6 characters and the sample period.
        assert_eq!(clock.now_ms() - t, 3 + 6 + 500);
    }

    #[test]
    fn test_lux() {
        let clock = Clock::new();
        let (mut meter, bus) = meter(&clock, DisplayMode::Lux, vec![4095, 100]);
        let mut delay = clock.delay();

        meter.start(&mut delay).unwrap();
        assert!(bus.bytes().ends_with(b"\x80The Input Light:"));

        let reading = meter.run_once(&mut delay).unwrap();
        assert_eq!(reading.lux, 290);
        assert!(bus.bytes().ends_with(b"\xC4290 LUX    "));

        let reading = meter.run_once(&mut delay).unwrap();
        assert_eq!(reading.lux, 0);
        assert!(bus.bytes().ends_with(b"\xC40 LUX    "));
    }
}

// vim: ts=4 sw=4 expandtab
