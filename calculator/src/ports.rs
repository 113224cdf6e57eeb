// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use labhal::ports::{Port, PortBus, PortPin, Ports};
use mculab::keypad::{Keypad, LAYOUT_4X4};

const KEYPAD_PORT: Port = Port::B;
const KEYPAD_ROWS: [u8; 4] = [0, 1, 2, 3]; // PB0..PB3, driven low to select
const KEYPAD_COLS: [u8; 4] = [4, 5, 6, 7]; // PB4..PB7, pulled up

const LED_PORT: Port = Port::A; // PA0..PA7, LED 1 at PA0

pub type CalcKeypad = Keypad<PortPin, PortPin, 4, 4>;

pub fn keypad(ports: &Ports) -> CalcKeypad {
    Keypad::new(
        KEYPAD_ROWS.map(|bit| ports.output(KEYPAD_PORT, bit, true)),
        KEYPAD_COLS.map(|bit| ports.input(KEYPAD_PORT, bit, true)),
        LAYOUT_4X4,
    )
}

pub fn leds(ports: &Ports) -> PortBus {
    ports.bus(LED_PORT, 0xFF)
}

// vim: ts=4 sw=4 expandtab
