// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matrix keypad scanning.
//!
//! Rows are outputs and are selected by driving them low.
//! Columns are inputs with pull-ups. A pressed key pulls its column low
//! while its row is selected.

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin, PinState},
};

/// Settle time after selecting a row, before the columns are read.
pub const ROW_SETTLE_MS: u32 = 5;

/// A physical key on the keypad.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    A,
    B,
    C,
    D,
    Star,
    Hash,
}

impl Key {
    pub const fn digit(self) -> Option<u8> {
        match self {
            Key::Digit(d) => Some(d),
            _ => None,
        }
    }

    /// The legend printed on the key.
    pub const fn legend(self) -> char {
        match self {
            Key::Digit(d) => (b'0' + d) as char,
            Key::A => 'A',
            Key::B => 'B',
            Key::C => 'C',
            Key::D => 'D',
            Key::Star => '*',
            Key::Hash => '#',
        }
    }
}

const fn d(n: u8) -> Key {
    Key::Digit(n)
}

/// 4x4 keypad with the operator column.
#[rustfmt::skip]
pub const LAYOUT_4X4: [[Key; 4]; 4] = [
    [d(1),      d(2), d(3),      Key::A],
    [d(4),      d(5), d(6),      Key::B],
    [d(7),      d(8), d(9),      Key::C],
    [Key::Star, d(0), Key::Hash, Key::D],
];

/// 4x3 telephone keypad.
#[rustfmt::skip]
pub const LAYOUT_4X3: [[Key; 3]; 4] = [
    [d(1),      d(2), d(3)],
    [d(4),      d(5), d(6)],
    [d(7),      d(8), d(9)],
    [Key::Star, d(0), Key::Hash],
];

/// Something that can be polled for the currently pressed key.
pub trait Scan {
    type Error;

    /// One full pass over the keypad.
    /// Returns `None` if no key is pressed.
    fn scan<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<Key>, Self::Error>;

    /// Block until no key is pressed anymore.
    fn wait_release<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        while self.scan(delay)?.is_some() {}
        Ok(())
    }
}

pub struct Keypad<R, C, const ROWS: usize, const COLS: usize> {
    rows: [R; ROWS],
    cols: [C; COLS],
    layout: [[Key; COLS]; ROWS],
}

impl<R, C, const ROWS: usize, const COLS: usize> Keypad<R, C, ROWS, COLS>
where
    R: OutputPin,
    C: InputPin<Error = R::Error>,
{
    pub fn new(rows: [R; ROWS], cols: [C; COLS], layout: [[Key; COLS]; ROWS]) -> Self {
        Self { rows, cols, layout }
    }

    /// Drive `row` low and all other rows high.
    fn select(&mut self, row: usize) -> Result<(), R::Error> {
        for (i, pin) in self.rows.iter_mut().enumerate() {
            pin.set_state(PinState::from(i != row))?;
        }
        Ok(())
    }
}

impl<R, C, const ROWS: usize, const COLS: usize> Scan for Keypad<R, C, ROWS, COLS>
where
    R: OutputPin,
    C: InputPin<Error = R::Error>,
{
    type Error = R::Error;

    fn scan<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<Key>, Self::Error> {
        for row in 0..ROWS {
            self.select(row)?;
            delay.delay_ms(ROW_SETTLE_MS);
            for col in 0..COLS {
                if self.cols[col].is_low()? {
                    return Ok(Some(self.layout[row][col]));
                }
            }
        }
        Ok(None)
    }
}


// vim: ts=4 sw=4 expandtab
