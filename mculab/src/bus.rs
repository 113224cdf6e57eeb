// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parallel 8 bit output.
//!
//! The LED bank of the calculator, the LCD data lines and the
//! 7-segment display are all driven as one byte at a time.

use embedded_hal::digital::ErrorType;

/// Write a whole byte to a set of parallel output lines.
pub trait ByteBus: ErrorType {
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}

// vim: ts=4 sw=4 expandtab
