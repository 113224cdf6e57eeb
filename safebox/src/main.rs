// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Photoresistor safebox.
//!
//! The two digit code is entered with two photoresistors and a confirm
//! button. A correct code runs the motor relay, a wrong one the buzzer.
//! `*` on the 4x3 keypad sets a new code. The emergency button on INT0
//! plays a melody.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]
#![feature(asm_experimental_arch)]

mod debug;
mod emergency;
mod ports;

use crate::{
    debug::{Debug, DebugLog as _, debug_init},
    emergency::{emergency_init, irq_handler_int0},
};
use avr_context::{InitCtx, IrqCtx, MainCtx};
use labhal::{
    delay::BusyDelay,
    mcu,
    ports::{PortPin, Ports},
    system::{jtag_disable, unwrap_result},
};
use mculab::safebox::{Safebox, SafeboxPins, Verdict};

#[allow(non_snake_case)]
struct InitPeripherals {
    EXINT: mcu::EXINT,
    PORTA: mcu::PORTA,
    PORTB: mcu::PORTB,
    PORTC: mcu::PORTC,
    PORTD: mcu::PORTD,
    USART0: mcu::USART0,
}

struct MainPeripherals {
    ports: Ports,
    pins: SafeboxPins<PortPin, PortPin>,
}

fn init_function(c: &InitCtx<'_>, dp: InitPeripherals) -> MainPeripherals {
    jtag_disable();
    let ports = Ports::new(dp.PORTA, dp.PORTB, dp.PORTC, dp.PORTD);
    debug_init(c, dp.USART0);
    // The melody pins must be outputs before INT0 is armed.
    let pins = ports::pins(&ports);
    emergency_init(
        c,
        dp.EXINT,
        ports.pin(ports::LED.0, ports::LED.1),
        ports.pin(ports::BUZZER.0, ports::BUZZER.1),
    );
    MainPeripherals { ports, pins }
}

fn main_loop(_c: &MainCtx<'_>, dp: MainPeripherals) -> ! {
    let mut delay = BusyDelay::new();
    let mut safebox = Safebox::new(
        ports::keypad(&dp.ports),
        ports::display(&dp.ports),
        dp.pins,
    );
    let mut unlocks: u16 = 0;
    let mut alarms: u16 = 0;

    let secret = unwrap_result(safebox.start(&mut delay));
    Debug::Secret.log_u8(secret.value());

    loop {
        let verdict = unwrap_result(safebox.run_once(&mut delay));
        match verdict {
            Some(Verdict::Unlock) => {
                unlocks = unlocks.wrapping_add(1);
                Debug::Unlocks.log_u16(unlocks);
            }
            Some(Verdict::Alarm) => {
                alarms = alarms.wrapping_add(1);
                Debug::Alarms.log_u16(alarms);
            }
            None => (),
        }

        let lock = safebox.lock();
        Debug::Secret.log_u8(lock.secret().value());
        Debug::UserCode.log_u8(lock.user_code());
        Debug::Confirmations.log_u8(lock.confirmations());
    }
}

avr_context::define_main! {
    device: atmega1284p,
    main: main_loop,
    enable_interrupts: true,
    init: init_function(ctx, InitPeripherals { EXINT, PORTA, PORTB, PORTC, PORTD, USART0 }) -> MainPeripherals,
    static_peripherals: {},
}

fn int0_isr(c: &IrqCtx<'_>) {
    irq_handler_int0(c);
}

avr_context::define_isr! {
    device: atmega1284p,
    interrupt: INT0,
    isr: int0_isr,
}

fn usart0_tx_isr(c: &IrqCtx<'_>) {
    debug::irq_handler_usart0_tx(c);
}

avr_context::define_isr! {
    device: atmega1284p,
    interrupt: USART0_TX,
    isr: usart0_tx_isr,
}

// vim: ts=4 sw=4 expandtab
