// -*- coding: utf-8 -*-

use clap::ValueEnum;
use mculab::debug::{CalcValue, Frame, MeterValue, SafeboxValue};
use std::fmt::Write as _;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Firmware {
    Calculator,
    Meter,
    Safebox,
}

impl Firmware {
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Firmware::Calculator => CalcValue::NAMES,
            Firmware::Meter => MeterValue::NAMES,
            Firmware::Safebox => SafeboxValue::NAMES,
        }
    }

    pub fn name(self, id: u8) -> Option<&'static str> {
        self.names().get(usize::from(id)).copied()
    }

    /// Human readable rendering of a raw value.
    pub fn format(self, id: u8, value: u16) -> String {
        let calc = |v: CalcValue| self == Firmware::Calculator && id == v.id();
        if calc(CalcValue::Key) || calc(CalcValue::Operator) {
            match u8::try_from(value) {
                Ok(0) => "-".to_string(),
                Ok(c) if c.is_ascii_graphic() => format!("'{}'", c as char),
                _ => value.to_string(),
            }
        } else if calc(CalcValue::FirstOperand)
            || calc(CalcValue::SecondOperand)
            || calc(CalcValue::Result)
        {
            (value as i16).to_string()
        } else if calc(CalcValue::Leds) {
            format!("{value:08b}")
        } else if self == Firmware::Meter && id == MeterValue::Centivolts.id() {
            format!("{}.{:02} V", value / 100, value % 100)
        } else {
            value.to_string()
        }
    }
}

/// Latest value of every debug id of one firmware.
pub struct ValueTable {
    firmware: Firmware,
    values: Vec<Option<u16>>,
}

impl ValueTable {
    pub fn new(firmware: Firmware) -> Self {
        Self {
            firmware,
            values: vec![None; firmware.names().len()],
        }
    }

    pub fn get(&self, id: u8) -> Option<u16> {
        self.values.get(usize::from(id)).copied().flatten()
    }

    /// One line for a single frame.
    pub fn describe(&self, frame: &Frame) -> Option<String> {
        match *frame {
            Frame::Value { id, value } => {
                let value = self.firmware.format(id, value);
                Some(match self.firmware.name(id) {
                    Some(name) => format!("{name} = {value}"),
                    None => format!("#{id} = {value}"),
                })
            }
            Frame::Sync => None,
        }
    }

    /// Store the frame.
    ///
    /// Returns the formatted table at the end of every pass.
    pub fn update(&mut self, frame: &Frame) -> Option<String> {
        match *frame {
            Frame::Value { id, value } => {
                if let Some(slot) = self.values.get_mut(usize::from(id)) {
                    *slot = Some(value);
                }
                None
            }
            Frame::Sync => Some(self.render()),
        }
    }

    fn render(&self) -> String {
        let width = self.firmware.names().iter().map(|n| n.len()).max().unwrap_or(0);
        let mut text = String::new();
        for (id, name) in self.firmware.names().iter().enumerate() {
            let value = match self.values[id] {
                Some(v) => self.firmware.format(id as u8, v),
                None => "?".to_string(),
            };
            let _ = writeln!(text, "{name:>width$} = {value}");
        }
        text.push('\n');
        text
    }
}


// vim: ts=4 sw=4 expandtab
