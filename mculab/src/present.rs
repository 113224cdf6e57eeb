// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning values into something to show.

use heapless::String;

/// Capacity of one display line of text.
pub const LINE_LEN: usize = 16;

pub type Line = String<LINE_LEN>;

/// How a negative value is shown on the 8 binary output lines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NegativeDisplay {
    /// Negate (`!v + 1`) before masking. -6 shows as `0000_0110`.
    Magnitude,
    /// Mask the two's complement representation. -6 shows as `1111_1010`.
    TwosComplement,
}

/// The 8 bit pattern for the binary LED bank.
pub const fn led_pattern(value: i16, negative: NegativeDisplay) -> u8 {
    let value = match negative {
        NegativeDisplay::Magnitude if value < 0 => (!value).wrapping_add(1),
        _ => value,
    };
    value as u8
}

/// Append `value` with two decimals, e.g. 437 -> `4.37`.
fn push_hundredths(line: &mut Line, value: u32) {
    let int = value / 100;
    let frac = value % 100;
    ufmt::uwrite!(line, "{}.{}{}", int, frac / 10, frac % 10).ok();
}

/// `"x.xx V"` from a value in hundredths of a volt.
pub fn voltage_text(centivolts: u32) -> Line {
    let mut line = Line::new();
    push_hundredths(&mut line, centivolts);
    line.push_str(" V").ok();
    line
}

/// `"<n> LUX"` padded with blanks that overwrite longer previous readings.
pub fn lux_text(lux: u16) -> Line {
    let mut line = Line::new();
    ufmt::uwrite!(line, "{} LUX    ", lux).ok();
    line
}


// vim: ts=4 sw=4 expandtab
