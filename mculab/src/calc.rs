// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-operand keypad calculator.
//!
//! Two decimal digits per operand, one of four operators and the result
//! shown in binary on 8 LEDs. The operands are 16 bit and wrap on overflow.

use crate::{
    keypad::Key,
    present::{NegativeDisplay, led_pattern},
};

/// Digits per operand.
pub const OPERAND_DIGITS: u8 = 2;

/// LED pattern shown when the first operand is complete.
pub const LED_FIRST_DONE: u8 = 0x01;
/// LED pattern shown when the second operand is complete.
pub const LED_SECOND_DONE: u8 = 0x02;
pub const LED_OFF: u8 = 0x00;

/// Hold-off after a handled key, before waiting for its release.
pub const KEY_HOLDOFF_MS: u32 = 300;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Digit(u8),
    Operator(Operator),
    Evaluate,
    Reset,
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        match key {
            Key::Digit(d) => KeyEvent::Digit(d),
            Key::A => KeyEvent::Operator(Operator::Add),
            Key::B => KeyEvent::Operator(Operator::Sub),
            Key::C => KeyEvent::Operator(Operator::Mul),
            Key::D => KeyEvent::Operator(Operator::Div),
            Key::Hash => KeyEvent::Evaluate,
            Key::Star => KeyEvent::Reset,
        }
    }
}

/// Apply `op` to the operands.
///
/// Returns `None` if there is nothing to update:
/// division by zero or no operator selected.
pub fn evaluate(x: i16, y: i16, op: Option<Operator>) -> Option<i16> {
    match op? {
        Operator::Add => Some(x.wrapping_add(y)),
        Operator::Sub => Some(x.wrapping_sub(y)),
        Operator::Mul => Some(x.wrapping_mul(y)),
        Operator::Div => x.checked_div(y),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    FirstOperand,
    /// Stays here until evaluate or reset.
    /// Digits beyond the second keep accumulating.
    SecondOperand,
}

pub struct Calculator {
    first: i16,
    second: i16,
    operator: Option<Operator>,
    digits: u8,
    entry: Entry,
    result: i16,
    negative: NegativeDisplay,
}

impl Calculator {
    pub const fn new(negative: NegativeDisplay) -> Self {
        Self {
            first: 0,
            second: 0,
            operator: None,
            digits: 0,
            entry: Entry::FirstOperand,
            result: 0,
            negative,
        }
    }

    pub fn first_operand(&self) -> i16 {
        self.first
    }

    pub fn second_operand(&self) -> i16 {
        self.second
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn digits_entered(&self) -> u8 {
        self.digits
    }

    pub fn entry(&self) -> Entry {
        self.entry
    }

    pub fn entering_second_operand(&self) -> bool {
        self.entry != Entry::FirstOperand
    }

    /// The last displayed result.
    pub fn result(&self) -> i16 {
        self.result
    }

    /// Feed one key event.
    ///
    /// Returns the new LED pattern, if the LEDs have to change.
    pub fn handle(&mut self, event: KeyEvent) -> Option<u8> {
        match event {
            KeyEvent::Digit(digit) => self.digit(digit),
            KeyEvent::Operator(op) => {
                self.operator = Some(op);
                None
            }
            KeyEvent::Evaluate => Some(self.calculate()),
            KeyEvent::Reset => {
                self.reset();
                Some(LED_OFF)
            }
        }
    }

    fn digit(&mut self, digit: u8) -> Option<u8> {
        let digit = i16::from(digit);
        match self.entry {
            Entry::FirstOperand => {
                self.first = self.first.wrapping_mul(10).wrapping_add(digit);
                self.digits += 1;
                if self.digits == OPERAND_DIGITS {
                    self.digits = 0;
                    self.entry = Entry::SecondOperand;
                    return Some(LED_FIRST_DONE);
                }
            }
            Entry::SecondOperand => {
                self.second = self.second.wrapping_mul(10).wrapping_add(digit);
                self.digits += 1;
                if self.digits == OPERAND_DIGITS {
                    self.digits = 0;
                    return Some(LED_SECOND_DONE);
                }
            }
        }
        None
    }

    /// Update the result register and clear the operands.
    /// The operator is kept for the next calculation.
    fn calculate(&mut self) -> u8 {
        if let Some(result) = evaluate(self.first, self.second, self.operator) {
            self.result = result;
        }
        self.first = 0;
        self.second = 0;
        self.digits = 0;
        self.entry = Entry::FirstOperand;
        led_pattern(self.result, self.negative)
    }

    fn reset(&mut self) {
        *self = Self::new(self.negative);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::keypad::Key;

    fn feed(calc: &mut Calculator, keys: &str) -> Option<u8> {
        let mut leds = None;
        for c in keys.chars() {
            let key = match c {
                '0'..='9' => Key::Digit(c as u8 - b'0'),
                'A' => Key::A,
                'B' => Key::B,
                'C' => Key::C,
                'D' => Key::D,
                '*' => Key::Star,
                '#' => Key::Hash,
                _ => unreachable!(),
            };
            if let Some(pattern) = calc.handle(key.into()) {
                leds = Some(pattern);
            }
        }
        leds
    }

    #[test]
    fn test_operand_accumulation() {
        let mut calc = Calculator::new(NegativeDisplay::Magnitude);
        assert_eq!(feed(&mut calc, "4"), None);
        assert_eq!(calc.first_operand(), 4);
        assert_eq!(calc.digits_entered(), 1);
        assert!(!calc.entering_second_operand());

        assert_eq!(feed(&mut calc, "7"), Some(LED_FIRST_DONE));
        assert_eq!(calc.first_operand(), 47);
        assert_eq!(calc.digits_entered(), 0);
        assert_eq!(calc.entry(), Entry::SecondOperand);

        assert_eq!(feed(&mut calc, "0"), None);
        assert_eq!(feed(&mut calc, "9"), Some(LED_SECOND_DONE));
        assert_eq!(calc.second_operand(), 9);
        assert_eq!(calc.entry(), Entry::SecondOperand);
        assert!(calc.entering_second_operand());
    }

    #[test]
    fn test_all_two_digit_first_operands() {
        for a in 0..10_u8 {
            for b in 0..10_u8 {
                let mut calc = Calculator::new(NegativeDisplay::Magnitude);
                calc.handle(KeyEvent::Digit(a));
                assert_eq!(calc.first_operand(), a as i16);
                calc.handle(KeyEvent::Digit(b));
                assert_eq!(calc.first_operand(), (a * 10 + b) as i16);
            }
        }
    }

    #[test]
    fn test_second_operand_keeps_accumulating() {
        let mut calc = Calculator::new(NegativeDisplay::Magnitude);
        feed(&mut calc, "1234");
        assert_eq!(calc.second_operand(), 34);
        assert_eq!(feed(&mut calc, "5"), None);
        assert_eq!(calc.first_operand(), 12);
        assert_eq!(calc.second_operand(), 345);
        assert_eq!(calc.digits_entered(), 1);
        assert_eq!(calc.entry(), Entry::SecondOperand);

        // Every second digit lights the second LED again.
        assert_eq!(feed(&mut calc, "6"), Some(LED_SECOND_DONE));
        assert_eq!(calc.second_operand(), 3456);

        let mut calc = Calculator::new(NegativeDisplay::Magnitude);
        feed(&mut calc, "12345A#");
        assert_eq!(calc.result(), 357);
    }

    #[test]
    fn test_second_operand_wraps() {
        let mut calc = Calculator::new(NegativeDisplay::Magnitude);
        feed(&mut calc, "01");
        feed(&mut calc, "99999");
        assert_eq!(calc.second_operand(), 99999_i32 as i16);
        feed(&mut calc, "9");
        assert_eq!(calc.second_operand(), 999999_i32 as i16);
    }

    #[test]
    fn test_operations() {
        let mut calc = Calculator::new(NegativeDisplay::Magnitude);
        assert_eq!(feed(&mut calc, "12A07#"), Some(19));
        assert_eq!(feed(&mut calc, "12B07#"), Some(5));
        assert_eq!(feed(&mut calc, "12C07#"), Some(84));
        assert_eq!(feed(&mut calc, "12D07#"), Some(1));
        assert_eq!(calc.result(), 1);
    }

    #[test]
    fn test_operator_any_time() {
        let mut calc = Calculator::new(NegativeDisplay::Magnitude);
        // Operator before, between and after the operands; the last one wins.
        assert_eq!(feed(&mut calc, "C1B20A07#"), Some(19));

        // The operator survives the calculation.
        assert_eq!(calc.operator(), Some(Operator::Add));
        assert_eq!(feed(&mut calc, "3003#"), Some(33));
    }

    #[test]
    fn test_evaluate_clears_operands() {
        let mut calc = Calculator::new(NegativeDisplay::Magnitude);
        feed(&mut calc, "12A07#");
        assert_eq!(calc.first_operand(), 0);
        assert_eq!(calc.second_operand(), 0);
        assert_eq!(calc.digits_entered(), 0);
        assert_eq!(calc.entry(), Entry::FirstOperand);
        assert_eq!(calc.result(), 19);
    }

    #[test]
    fn test_divide_by_zero_keeps_result() {
        let mut calc = Calculator::new(NegativeDisplay::Magnitude);
        assert_eq!(feed(&mut calc, "12A07#"), Some(19));
        assert_eq!(feed(&mut calc, "50D00#"), Some(19));
        assert_eq!(calc.result(), 19);
        assert_eq!(calc.first_operand(), 0);
    }

    #[test]
    fn test_no_operator_keeps_result() {
        let mut calc = Calculator::new(NegativeDisplay::Magnitude);
        assert_eq!(feed(&mut calc, "1234#"), Some(0));
        assert_eq!(calc.result(), 0);
    }

    #[test]
    fn test_negative_result() {
        let mut calc = Calculator::new(NegativeDisplay::Magnitude);
        assert_eq!(feed(&mut calc, "03B09#"), Some(0x06));
        assert_eq!(calc.result(), -6);

        let mut calc = Calculator::new(NegativeDisplay::TwosComplement);
        assert_eq!(feed(&mut calc, "03B09#"), Some(0xFA));
    }

    #[test]
    fn test_reset() {
        let mut calc = Calculator::new(NegativeDisplay::Magnitude);
        feed(&mut calc, "12A07#45D");
        assert_eq!(feed(&mut calc, "*"), Some(LED_OFF));
        assert_eq!(calc.first_operand(), 0);
        assert_eq!(calc.second_operand(), 0);
        assert_eq!(calc.operator(), None);
        assert_eq!(calc.result(), 0);
        assert_eq!(calc.entry(), Entry::FirstOperand);

        // Reset in the middle of the second operand.
        feed(&mut calc, "C993");
        feed(&mut calc, "*");
        assert_eq!(feed(&mut calc, "0203#"), Some(0));
        feed(&mut calc, "C");
        assert_eq!(feed(&mut calc, "02"), Some(LED_FIRST_DONE));
        assert_eq!(feed(&mut calc, "03#"), Some(6));
    }

    #[test]
    fn test_evaluate_partial_operand() {
        let mut calc = Calculator::new(NegativeDisplay::Magnitude);
        // "5" then "#": the second operand is still 0.
        assert_eq!(feed(&mut calc, "A5#"), Some(5));
    }

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate(99, 99, Some(Operator::Mul)), Some(9801));
        assert_eq!(evaluate(7, 2, Some(Operator::Div)), Some(3));
        assert_eq!(evaluate(-7, 2, Some(Operator::Div)), Some(-3));
        assert_eq!(evaluate(7, 0, Some(Operator::Div)), None);
        assert_eq!(evaluate(7, 3, None), None);
    }
}

// vim: ts=4 sw=4 expandtab
