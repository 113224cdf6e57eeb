// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use labhal::ports::{Port, PortBus, PortPin, Ports};
use mculab::{
    keypad::{Keypad, LAYOUT_4X3},
    safebox::SafeboxPins,
    seg7::SevenSegment,
};

const KEYPAD_PORT: Port = Port::B;
const KEYPAD_ROWS: [u8; 4] = [1, 2, 3, 4]; // PB1..PB4, driven low to select
const KEYPAD_COLS: [u8; 3] = [5, 6, 7]; // PB5..PB7, pulled up

/// Segments a..g on PA0..PA6.
const SEG7_PORT: Port = Port::A;
const SEG7_MASK: u8 = 0x7F;

const CONFIRM: (Port, u8) = (Port::C, 4);
pub const LED: (Port, u8) = (Port::C, 3);
pub const BUZZER: (Port, u8) = (Port::C, 6);
const RELAY: (Port, u8) = (Port::C, 7);
/// Photoresistor comparators, high while covered.
const PR1: (Port, u8) = (Port::D, 4);
const PR2: (Port, u8) = (Port::D, 5);

// INT0 on PD2: emergency button, high while pressed.
const EMERGENCY: (Port, u8) = (Port::D, 2);

pub type SafeboxKeypad = Keypad<PortPin, PortPin, 4, 3>;

pub fn keypad(ports: &Ports) -> SafeboxKeypad {
    Keypad::new(
        KEYPAD_ROWS.map(|bit| ports.output(KEYPAD_PORT, bit, true)),
        KEYPAD_COLS.map(|bit| ports.input(KEYPAD_PORT, bit, true)),
        LAYOUT_4X3,
    )
}

pub fn display(ports: &Ports) -> SevenSegment<PortBus> {
    SevenSegment::new(ports.bus(SEG7_PORT, SEG7_MASK))
}

pub fn pins(ports: &Ports) -> SafeboxPins<PortPin, PortPin> {
    ports.input(EMERGENCY.0, EMERGENCY.1, false);
    SafeboxPins {
        pr1: ports.input(PR1.0, PR1.1, false),
        pr2: ports.input(PR2.0, PR2.1, false),
        confirm: ports.input(CONFIRM.0, CONFIRM.1, false),
        led: ports.output(LED.0, LED.1, true),
        buzzer: ports.output(BUZZER.0, BUZZER.1, false),
        motor: ports.output(RELAY.0, RELAY.1, false),
    }
}

// vim: ts=4 sw=4 expandtab
