// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HD44780 compatible character LCD on an 8 bit parallel bus.

use crate::bus::ByteBus;
use embedded_hal::{delay::DelayNs, digital::OutputPin};

pub mod cmd {
    pub const CLEAR: u8 = 0x01;
    /// 8 bit interface, 2 lines, 5x8 font.
    pub const FUNCTION_8BIT_2LINE: u8 = 0x38;
    /// Display on, cursor off, blink off.
    pub const DISPLAY_ON: u8 = 0x0C;
    /// Increment the address, no display shift.
    pub const ENTRY_INCREMENT: u8 = 0x06;
    pub const LINE1: u8 = 0x80;
    pub const LINE2: u8 = 0xC0;
}

pub const POWER_ON_WAIT_MS: u32 = 500;
pub const COMMAND_SETTLE_MS: u32 = 3;
pub const DATA_SETTLE_MS: u32 = 1;
const ENABLE_PULSE_US: u32 = 1;

/// DDRAM address command for a 1-based `row` and a column.
///
/// Rows 0 and 1 both select the first line. The column wraps within 4 bits.
pub const fn cursor_address(row: u8, col: u8) -> u8 {
    if row <= 1 {
        cmd::LINE1 | (col & 0x0F)
    } else {
        cmd::LINE2 | (col & 0x0F)
    }
}

pub struct Lcd<BUS, RS, EN> {
    bus: BUS,
    rs: RS,
    en: EN,
}

impl<BUS, RS, EN> Lcd<BUS, RS, EN>
where
    BUS: ByteBus,
    RS: OutputPin<Error = BUS::Error>,
    EN: OutputPin<Error = BUS::Error>,
{
    pub fn new(bus: BUS, rs: RS, en: EN) -> Self {
        Self { bus, rs, en }
    }

    /// Power-on wait and controller setup.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), BUS::Error> {
        self.en.set_low()?;
        delay.delay_ms(POWER_ON_WAIT_MS);
        for c in [
            cmd::CLEAR,
            cmd::FUNCTION_8BIT_2LINE,
            cmd::DISPLAY_ON,
            cmd::ENTRY_INCREMENT,
        ] {
            self.command(delay, c)?;
        }
        Ok(())
    }

    fn strobe<D: DelayNs>(&mut self, delay: &mut D, byte: u8) -> Result<(), BUS::Error> {
        self.bus.write_byte(byte)?;
        self.en.set_high()?;
        delay.delay_us(ENABLE_PULSE_US);
        self.en.set_low()
    }

    pub fn command<D: DelayNs>(&mut self, delay: &mut D, command: u8) -> Result<(), BUS::Error> {
        self.rs.set_low()?;
        self.strobe(delay, command)?;
        delay.delay_ms(COMMAND_SETTLE_MS);
        Ok(())
    }

    pub fn write_char<D: DelayNs>(&mut self, delay: &mut D, c: u8) -> Result<(), BUS::Error> {
        self.rs.set_high()?;
        self.strobe(delay, c)?;
        delay.delay_ms(DATA_SETTLE_MS);
        Ok(())
    }

    pub fn write_str<D: DelayNs>(&mut self, delay: &mut D, s: &str) -> Result<(), BUS::Error> {
        for c in s.bytes() {
            self.write_char(delay, c)?;
        }
        Ok(())
    }

    /// Move the cursor to `row`/`col` and write `s` from there.
    pub fn write_str_at<D: DelayNs>(
        &mut self,
        delay: &mut D,
        row: u8,
        col: u8,
        s: &str,
    ) -> Result<(), BUS::Error> {
        self.command(delay, cursor_address(row, col))?;
        self.write_str(delay, s)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testutil::{Clock, RecBus, RecPin};

    fn lcd(clock: &Clock) -> (Lcd<RecBus, RecPin, RecPin>, RecBus, RecPin, RecPin) {
        let bus = RecBus::new(clock);
        let rs = RecPin::new(clock);
        let en = RecPin::new(clock);
        (Lcd::new(bus.clone(), rs.clone(), en.clone()), bus, rs, en)
    }

    #[test]
    fn test_cursor_address() {
        assert_eq!(cursor_address(1, 0), 0x80);
        assert_eq!(cursor_address(0, 3), 0x83);
        assert_eq!(cursor_address(1, 17), 0x81);
        assert_eq!(cursor_address(2, 4), 0xC4);
        assert_eq!(cursor_address(7, 15), 0xCF);
        assert_eq!(cursor_address(2, 16), 0xC0);
    }

    #[test]
    fn test_init() {
        let clock = Clock::new();
        let (mut lcd, bus, rs, en) = lcd(&clock);
        let mut delay = clock.delay();

        lcd.init(&mut delay).unwrap();
        assert_eq!(
            bus.timed(),
            [(500, 0x01), (503, 0x38), (506, 0x0C), (509, 0x06)]
        );
        assert!(rs.writes().iter().all(|&(_, level)| !level));
        assert_eq!(en.pulses(), 4);
        assert_eq!(clock.now_ms(), 512);
    }

    #[test]
    fn test_write_str_at() {
        let clock = Clock::new();
        let (mut lcd, bus, rs, en) = lcd(&clock);
        let mut delay = clock.delay();

        lcd.write_str_at(&mut delay, 2, 4, "5.00 V").unwrap();
        assert_eq!(bus.bytes(), b"\xC45.00 V");
        let rs_levels: std::vec::Vec<bool> = rs.writes().iter().map(|&(_, l)| l).collect();
        assert_eq!(rs_levels, [false, true, true, true, true, true, true]);
        assert_eq!(en.pulses(), 7);
        assert!(!en.level());
        // 3 ms for the command, 1 ms per character.
        assert_eq!(clock.now_ms(), 9);
    }
}

// vim: ts=4 sw=4 expandtab
