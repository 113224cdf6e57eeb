// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::debug::{Debug, DebugLog as _};
use avr_context::{InitCtx, IrqCtx, Mutex};
use core::cell::RefCell;
use labhal::{delay::BusyDelay, mcu, ports::PortPin, system::unwrap_result};
use mculab::irq::{EMERGENCY_MELODY, PendingFlag, melody, service};

/// INT0 on the rising edge.
const EICRA_ISC0_RISING: u8 = 0x03;
const INT0: u8 = 1 << 0;
const INTF0: u8 = 1 << 0;

struct Emergency {
    exint: mcu::EXINT,
    led: PortPin,
    buzzer: PortPin,
    count: u16,
}

static EMERGENCY: Mutex<RefCell<Option<Emergency>>> = Mutex::new(RefCell::new(None));

struct Int0Ack<'a>(&'a mcu::EXINT);

impl PendingFlag for Int0Ack<'_> {
    fn clear(&mut self) {
        // SAFETY: Writing a one clears the flag. We own EXINT.
        self.0.eifr().write(|w| unsafe { w.bits(INTF0) });
    }
}

/// `led` and `buzzer` are second handles to the pins of the main loop.
pub fn emergency_init(c: &InitCtx<'_>, exint: mcu::EXINT, led: PortPin, buzzer: PortPin) {
    // SAFETY: Plain register setup. We own EXINT.
    unsafe {
        exint
            .eicra()
            .modify(|r, w| w.bits((r.bits() & !0x03) | EICRA_ISC0_RISING));
        exint.eifr().write(|w| w.bits(INTF0));
        exint.eimsk().modify(|r, w| w.bits(r.bits() | INT0));
    }
    EMERGENCY.borrow(c.cs()).replace(Some(Emergency {
        exint,
        led,
        buzzer,
        count: 0,
    }));
}

/// External interrupt 0: Play the emergency melody.
///
/// The main loop is frozen meanwhile. Presses during the melody are dropped.
pub fn irq_handler_int0(c: &IrqCtx<'_>) {
    let mut emergency = EMERGENCY.borrow(c.cs()).borrow_mut();
    let Some(Emergency {
        exint,
        led,
        buzzer,
        count,
    }) = emergency.as_mut()
    else {
        return;
    };

    let mut delay = BusyDelay::new();
    unwrap_result(service(&mut Int0Ack(exint), || {
        melody(led, buzzer, &mut delay, &EMERGENCY_MELODY)
    }));

    *count = count.wrapping_add(1);
    Debug::Emergencies.log_u16(*count);
}

// vim: ts=4 sw=4 expandtab
