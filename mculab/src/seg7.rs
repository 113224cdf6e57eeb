// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common cathode 7-segment display.
//!
//! Bit 0 is segment a, bit 6 is segment g.

use crate::bus::ByteBus;
use embedded_hal::delay::DelayNs;

/// Three horizontal bars. Shown for everything without a glyph.
pub const GLYPH_E: u8 = 0x49;

const DIGITS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Segments a to f, one after the other.
pub const SPINNER: [u8; 6] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20];
pub const SPINNER_FRAME_MS: u32 = 10;

pub const fn glyph(c: char) -> u8 {
    match c {
        '0'..='9' => DIGITS[c as usize - '0' as usize],
        '*' => 0x63,
        '#' => 0x79,
        _ => GLYPH_E,
    }
}

pub const fn digit_glyph(digit: u8) -> u8 {
    if digit < 10 {
        DIGITS[digit as usize]
    } else {
        GLYPH_E
    }
}

pub struct SevenSegment<BUS> {
    bus: BUS,
}

impl<BUS: ByteBus> SevenSegment<BUS> {
    pub fn new(bus: BUS) -> Self {
        Self { bus }
    }

    pub fn show(&mut self, c: char) -> Result<(), BUS::Error> {
        self.bus.write_byte(glyph(c))
    }

    pub fn show_digit(&mut self, digit: u8) -> Result<(), BUS::Error> {
        self.bus.write_byte(digit_glyph(digit))
    }

    /// One round of the spinner animation.
    pub fn spin<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), BUS::Error> {
        for frame in SPINNER {
            self.bus.write_byte(frame)?;
            delay.delay_ms(SPINNER_FRAME_MS);
        }
        Ok(())
    }
}


// vim: ts=4 sw=4 expandtab
