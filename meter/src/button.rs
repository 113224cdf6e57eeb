// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::{
    debug::{Debug, DebugLog as _},
    ports::BUTTON_PCINT_MASK,
};
use avr_context::{InitCtx, IrqCtx, Mutex};
use core::cell::RefCell;
use labhal::{delay::BusyDelay, mcu, ports::PortPin, system::unwrap_result};
use mculab::irq::{BUTTON_BLINK, Edge, IrqLine, PendingFlag, blink, service};

const PCIE2: u8 = 1 << 2;
const PCIF2: u8 = 1 << 2;

struct Button {
    exint: mcu::EXINT,
    pin: PortPin,
    led: PortPin,
    line: IrqLine,
    count: u16,
}

static BUTTON: Mutex<RefCell<Option<Button>>> = Mutex::new(RefCell::new(None));

/// Acknowledge of the pin change interrupt.
/// Changes during the blink routine are discarded.
struct PcintAck<'a> {
    exint: &'a mcu::EXINT,
    line: &'a mut IrqLine,
}

impl PendingFlag for PcintAck<'_> {
    fn clear(&mut self) {
        // SAFETY: Writing a one clears the flag. We own EXINT.
        self.exint.pcifr().write(|w| unsafe { w.bits(PCIF2) });
        self.line.clear();
    }
}

pub fn button_init(c: &InitCtx<'_>, exint: mcu::EXINT, pin: PortPin, led: PortPin) {
    // SAFETY: Plain register setup. We own EXINT.
    unsafe {
        exint.pcmsk2().write(|w| w.bits(BUTTON_PCINT_MASK));
        exint.pcifr().write(|w| w.bits(PCIF2));
        exint.pcicr().modify(|r, w| w.bits(r.bits() | PCIE2));
    }
    // The button is pulled up. Idle level is high.
    let line = IrqLine::new(Edge::Falling, pin.get());
    BUTTON.borrow(c.cs()).replace(Some(Button {
        exint,
        pin,
        led,
        line,
        count: 0,
    }));
}

/// Pin change interrupt of PORTC.
pub fn irq_handler_pcint2(c: &IrqCtx<'_>) {
    let mut button = BUTTON.borrow(c.cs()).borrow_mut();
    let Some(button) = button.as_mut() else {
        return;
    };
    if !button.line.sample(button.pin.get()) {
        return;
    }

    let Button {
        exint,
        pin,
        led,
        line,
        count,
    } = button;
    let mut delay = BusyDelay::new();
    let mut ack = PcintAck {
        exint,
        line: &mut *line,
    };
    unwrap_result(service(&mut ack, || blink(led, &mut delay, &BUTTON_BLINK)));
    // Track the level the button has now, the pin changes in between are lost.
    line.sample(pin.get());

    *count = count.wrapping_add(1);
    Debug::Blinks.log_u16(*count);
}

// vim: ts=4 sw=4 expandtab
