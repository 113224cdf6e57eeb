// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Analog input and conversion of raw codes into physical units.

/// Single-channel analog input.
pub trait AnalogIn {
    type Error;

    /// Run one conversion and return the raw 12 bit code.
    fn sample(&mut self) -> Result<u16, Self::Error>;
}

/// Full scale code of a 12 bit converter.
pub const FULL_SCALE_12BIT: u32 = 4096;

/// Reference voltage and resolution of a converter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AdcScale {
    pub vref_mv: u32,
    pub full_scale: u32,
}

/// 12 bit code against a 5 V reference.
pub const SCALE_12BIT_5V: AdcScale = AdcScale {
    vref_mv: 5000,
    full_scale: FULL_SCALE_12BIT,
};

// Photoresistor divider fit: lux = 85.19 * V - 135.33
const LUX_SLOPE_CENTI: i64 = 8519;
const LUX_OFFSET_CENTI: i64 = 13533;

impl AdcScale {
    /// Input voltage in hundredths of a volt, rounded to the nearest.
    pub fn centivolts(&self, raw: u16) -> u32 {
        let num = 2 * u32::from(raw) * self.vref_mv + 10 * self.full_scale;
        num / (20 * self.full_scale)
    }

    /// Light intensity from the photoresistor divider voltage.
    ///
    /// Truncated towards zero and clamped to 0 for dark readings.
    pub fn lux(&self, raw: u16) -> u16 {
        let fs = i64::from(self.full_scale);
        let num = LUX_SLOPE_CENTI * i64::from(raw) * i64::from(self.vref_mv)
            - LUX_OFFSET_CENTI * 1000 * fs;
        let lux = num / (100 * 1000 * fs);
        lux.clamp(0, i64::from(u16::MAX)) as u16
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_voltage() {
        let s = SCALE_12BIT_5V;
        assert_eq!(s.centivolts(0), 0);
        assert_eq!(s.centivolts(4095), 500);
        assert_eq!(s.centivolts(2048), 250);
        assert_eq!(s.centivolts(1000), 122);
    }

    #[test]
    fn test_lux() {
        let s = SCALE_12BIT_5V;
        assert_eq!(s.lux(4095), 290);
        assert_eq!(s.lux(1638), 35);
        assert_eq!(s.lux(0), 0);
        // Everything below about 1.59 V is dark.
        assert_eq!(s.lux(1300), 0);
    }

    #[test]
    fn test_lux_monotonic() {
        let s = SCALE_12BIT_5V;
        let mut prev = 0;
        for raw in 0..4096 {
            let lux = s.lux(raw);
            assert!(lux >= prev);
            prev = lux;
        }
    }
}

// vim: ts=4 sw=4 expandtab
