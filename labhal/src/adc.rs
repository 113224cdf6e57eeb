// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::mcu;
use core::convert::Infallible;
use mculab::analog::AnalogIn;

const ADMUX_REFS_AVCC: u8 = 0x40;
const ADCSRA_ADEN: u8 = 0x80;
const ADCSRA_ADSC: u8 = 0x40;
const ADCSRA_ADIF: u8 = 0x10;
/// 8 MHz / 64 = 125 kHz conversion clock.
const ADCSRA_PS_64: u8 = 0x06;

/// Single ended conversion of one channel against AVcc.
pub struct Adc {
    adc: mcu::ADC,
}

impl Adc {
    pub fn new(adc: mcu::ADC, channel: u8) -> Self {
        let channel = channel & 7;
        // SAFETY: Plain register setup. We own the ADC.
        unsafe {
            adc.didr0().write(|w| w.bits(1 << channel));
            adc.admux().write(|w| w.bits(ADMUX_REFS_AVCC | channel));
            adc.adcsra()
                .write(|w| w.bits(ADCSRA_ADEN | ADCSRA_ADIF | ADCSRA_PS_64));
        }
        Self { adc }
    }

    /// Blocking 10 bit conversion.
    pub fn convert(&mut self) -> u16 {
        // SAFETY: Setting ADSC starts the conversion. We own the ADC.
        self.adc
            .adcsra()
            .modify(|r, w| unsafe { w.bits(r.bits() | ADCSRA_ADSC) });
        while self.adc.adcsra().read().adsc().bit_is_set() {}
        self.adc.adc().read().bits() & 0x3FF
    }
}

impl AnalogIn for Adc {
    type Error = Infallible;

    /// The 10 bit result is scaled up to a 12 bit code.
    fn sample(&mut self) -> Result<u16, Self::Error> {
        Ok(self.convert() << 2)
    }
}

// vim: ts=4 sw=4 expandtab
