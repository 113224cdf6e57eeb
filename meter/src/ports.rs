// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use labhal::ports::{Port, PortBus, PortPin, Ports};
use mculab::lcd::Lcd;

const LCD_DATA_PORT: Port = Port::B; // D0..D7 on PB0..PB7
const LCD_RS: (Port, u8) = (Port::C, 0);
const LCD_EN: (Port, u8) = (Port::C, 1);

/// Push button to GND. PCINT18.
pub const BUTTON: (Port, u8) = (Port::C, 2);
pub const BUTTON_PCINT_MASK: u8 = 1 << 2;
const LED: (Port, u8) = (Port::C, 3);

/// Analog input on PA0.
pub const ADC_CHANNEL: u8 = 0;

pub type MeterLcd = Lcd<PortBus, PortPin, PortPin>;

pub fn lcd(ports: &Ports) -> MeterLcd {
    Lcd::new(
        ports.bus(LCD_DATA_PORT, 0xFF),
        ports.output(LCD_RS.0, LCD_RS.1, false),
        ports.output(LCD_EN.0, LCD_EN.1, false),
    )
}

pub fn button(ports: &Ports) -> PortPin {
    ports.input(BUTTON.0, BUTTON.1, true)
}

pub fn led(ports: &Ports) -> PortPin {
    ports.output(LED.0, LED.1, false)
}

// vim: ts=4 sw=4 expandtab
