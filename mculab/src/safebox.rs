// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Photoresistor combination lock.
//!
//! Covering photoresistor 1 enters the high digit of the code,
//! photoresistor 2 enters the low digit. Each further cover counts the
//! digit up, the confirmation button ends the entry.
//! After two confirmed entries the code is compared against the secret.
//! A match runs the motor, a mismatch sounds the buzzer.
//!
//! Pressing `*` on the keypad sets a new secret from two keypad digits.

use crate::{
    bus::ByteBus,
    keypad::{Key, Scan},
    seg7::SevenSegment,
};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

/// Highest digit that can be entered with a photoresistor.
pub const MAX_SENSOR_DIGIT: u8 = 4;
/// Highest digit accepted from the keypad for a new secret.
pub const MAX_KEYPAD_DIGIT: u8 = 4;
/// Confirmed entries needed before the code is compared.
pub const CONFIRMATIONS_NEEDED: u8 = 2;

/// Sensor must stay covered this long to count up.
pub const SENSOR_STEP_MS: u32 = 500;
pub const CONFIRM_DEBOUNCE_MS: u32 = 50;
/// Pause after every confirmed entry.
pub const ENTRY_PAUSE_MS: u32 = 500;
pub const MOTOR_RUN_MS: u32 = 3000;
pub const BUZZER_MS: u32 = 2000;
/// How long a new secret digit is shown.
pub const SECRET_DIGIT_SHOW_MS: u32 = 1000;

/// Two digit lock code.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SecretCode(u8);

impl SecretCode {
    /// Digits are not range checked. Out of range digits wrap.
    pub const fn from_digits(high: u8, low: u8) -> Self {
        Self(high.wrapping_mul(10).wrapping_add(low))
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sensor {
    /// Photoresistor 1. Enters the high digit.
    Pr1,
    /// Photoresistor 2. Enters the low digit.
    Pr2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Unlock,
    Alarm,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LockState {
    AwaitingInput,
    DigitsCollected,
}

/// Code comparison state without any I/O.
#[derive(Clone, Debug)]
pub struct Lock {
    secret: SecretCode,
    high: u8,
    low: u8,
    user_code: u8,
    confirmations: u8,
}

impl Lock {
    pub const fn new(secret: SecretCode) -> Self {
        Self {
            secret,
            high: 0,
            low: 0,
            user_code: 0,
            confirmations: 0,
        }
    }

    pub fn secret(&self) -> SecretCode {
        self.secret
    }

    pub fn set_secret(&mut self, secret: SecretCode) {
        self.secret = secret;
    }

    /// The digits collected so far as `(high, low)`.
    pub fn digits(&self) -> (u8, u8) {
        (self.high, self.low)
    }

    pub fn user_code(&self) -> u8 {
        self.user_code
    }

    pub fn confirmations(&self) -> u8 {
        self.confirmations
    }

    pub fn state(&self) -> LockState {
        if self.confirmations >= CONFIRMATIONS_NEEDED {
            LockState::DigitsCollected
        } else {
            LockState::AwaitingInput
        }
    }

    /// Store a confirmed digit entry.
    pub fn enter(&mut self, sensor: Sensor, digit: u8) {
        match sensor {
            Sensor::Pr1 => self.high = digit,
            Sensor::Pr2 => self.low = digit,
        }
        self.confirmations = self.confirmations.saturating_add(1);
        self.user_code = SecretCode::from_digits(self.high, self.low).value();
    }

    /// Compare the entered code, if enough entries have been confirmed.
    ///
    /// Clears the digits and the confirmation count after a comparison.
    pub fn compare(&mut self) -> Option<Verdict> {
        if self.state() != LockState::DigitsCollected {
            return None;
        }
        let verdict = if self.user_code == self.secret.value() {
            Verdict::Unlock
        } else {
            Verdict::Alarm
        };
        self.high = 0;
        self.low = 0;
        self.confirmations = 0;
        Some(verdict)
    }
}

/// Discrete inputs and outputs of the safebox.
pub struct SafeboxPins<I, O> {
    pub pr1: I,
    pub pr2: I,
    pub confirm: I,
    pub led: O,
    pub buzzer: O,
    pub motor: O,
}

pub struct Safebox<K, BUS, I, O> {
    keypad: K,
    display: SevenSegment<BUS>,
    pins: SafeboxPins<I, O>,
    lock: Lock,
}

impl<K, BUS, I, O, E> Safebox<K, BUS, I, O>
where
    K: Scan<Error = E>,
    BUS: ByteBus<Error = E>,
    I: InputPin<Error = E>,
    O: OutputPin<Error = E>,
{
    pub fn new(keypad: K, display: SevenSegment<BUS>, pins: SafeboxPins<I, O>) -> Self {
        Self {
            keypad,
            display,
            pins,
            lock: Lock::new(SecretCode::default()),
        }
    }

    pub fn lock(&self) -> &Lock {
        &self.lock
    }

    pub fn lock_mut(&mut self) -> &mut Lock {
        &mut self.lock
    }

    /// Power-up: light the system LED and ask for the first secret.
    pub fn start<D: DelayNs>(&mut self, delay: &mut D) -> Result<SecretCode, E> {
        self.pins.led.set_high()?;
        self.set_new_code(delay)
    }

    /// One pass of the foreground loop.
    pub fn run_once<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<Verdict>, E> {
        self.pins.led.set_high()?;
        self.poll_code_change(delay)?;
        self.poll_sensors(delay)?;
        self.settle(delay)
    }

    /// Start the "set new code" flow, if `*` is pressed.
    pub fn poll_code_change<D: DelayNs>(&mut self, delay: &mut D) -> Result<bool, E> {
        if self.keypad.scan(delay)? == Some(Key::Star) {
            self.set_new_code(delay)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Read two keypad digits and make them the new secret.
    pub fn set_new_code<D: DelayNs>(&mut self, delay: &mut D) -> Result<SecretCode, E> {
        let high = self.keypad_digit(delay)?;
        self.display.show_digit(high)?;
        delay.delay_ms(SECRET_DIGIT_SHOW_MS);

        let low = self.keypad_digit(delay)?;
        self.display.show_digit(low)?;
        delay.delay_ms(SECRET_DIGIT_SHOW_MS);

        self.display.show('E')?;

        let code = SecretCode::from_digits(high, low);
        self.lock.set_secret(code);
        Ok(code)
    }

    /// Spin the display until a digit key in the accepted range is pressed.
    pub fn keypad_digit<D: DelayNs>(&mut self, delay: &mut D) -> Result<u8, E> {
        loop {
            self.display.spin(delay)?;
            let digit = self
                .keypad
                .scan(delay)?
                .and_then(Key::digit)
                .filter(|&d| d <= MAX_KEYPAD_DIGIT);
            if let Some(digit) = digit {
                return Ok(digit);
            }
        }
    }

    /// Run a digit entry, if one of the photoresistors is covered.
    ///
    /// Returns the sensor that has been used.
    pub fn poll_sensors<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<Sensor>, E> {
        let sensor = if self.pins.pr1.is_high()? {
            Sensor::Pr1
        } else if self.pins.pr2.is_high()? {
            Sensor::Pr2
        } else {
            return Ok(None);
        };

        let digit = self.input_digit(delay, sensor)?;
        delay.delay_ms(ENTRY_PAUSE_MS);
        self.lock.enter(sensor, digit);
        Ok(Some(sensor))
    }

    fn sensor_covered(&mut self, sensor: Sensor) -> Result<bool, E> {
        match sensor {
            Sensor::Pr1 => self.pins.pr1.is_high(),
            Sensor::Pr2 => self.pins.pr2.is_high(),
        }
    }

    /// Count covers of `sensor` until the confirmation button is pressed.
    pub fn input_digit<D: DelayNs>(&mut self, delay: &mut D, sensor: Sensor) -> Result<u8, E> {
        let mut count = 1;

        while self.pins.pr1.is_high()? || self.pins.pr2.is_high()? {}
        self.display.show_digit(count)?;

        loop {
            if count < MAX_SENSOR_DIGIT && self.sensor_covered(sensor)? {
                delay.delay_ms(SENSOR_STEP_MS);
                count += 1;
                while self.sensor_covered(sensor)? {}
                self.display.show_digit(count)?;
            }

            if self.pins.confirm.is_high()? {
                delay.delay_ms(CONFIRM_DEBOUNCE_MS);
                self.display.show('E')?;
                return Ok(count);
            }
        }
    }

    /// Compare the code after the second confirmation and actuate.
    pub fn settle<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<Verdict>, E> {
        let verdict = self.lock.compare();
        match verdict {
            Some(Verdict::Unlock) => {
                self.pins.motor.set_high()?;
                delay.delay_ms(MOTOR_RUN_MS);
                self.pins.motor.set_low()?;
            }
            Some(Verdict::Alarm) => {
                self.pins.buzzer.set_high()?;
                delay.delay_ms(BUZZER_MS);
                self.pins.buzzer.set_low()?;
            }
            None => (),
        }
        Ok(verdict)
    }
}


// vim: ts=4 sw=4 expandtab
