// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keypad calculator.
//!
//! Two 2-digit operands and an operator are typed on a 4x4 keypad.
//! `A`..`D` select add, subtract, multiply and divide.
//! `#` calculates, `*` resets. The result is shown in binary on 8 LEDs.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]
#![feature(asm_experimental_arch)]

mod debug;
mod ports;

use crate::debug::{Debug, DebugLog as _, debug_init};
use avr_context::{InitCtx, IrqCtx, MainCtx};
use embedded_hal::delay::DelayNs as _;
use labhal::{
    delay::BusyDelay,
    mcu,
    ports::Ports,
    system::{jtag_disable, unwrap_result},
};
use mculab::{
    bus::ByteBus as _,
    calc::{Calculator, KEY_HOLDOFF_MS, KeyEvent, LED_OFF, Operator},
    keypad::Scan as _,
    present::NegativeDisplay,
};

#[allow(non_snake_case)]
struct InitPeripherals {
    PORTA: mcu::PORTA,
    PORTB: mcu::PORTB,
    PORTC: mcu::PORTC,
    PORTD: mcu::PORTD,
    USART0: mcu::USART0,
}

struct MainPeripherals {
    ports: Ports,
}

fn init_function(c: &InitCtx<'_>, dp: InitPeripherals) -> MainPeripherals {
    jtag_disable();
    let ports = Ports::new(dp.PORTA, dp.PORTB, dp.PORTC, dp.PORTD);
    debug_init(c, dp.USART0);
    MainPeripherals { ports }
}

fn operator_code(op: Option<Operator>) -> u8 {
    match op {
        None => 0,
        Some(Operator::Add) => b'+',
        Some(Operator::Sub) => b'-',
        Some(Operator::Mul) => b'*',
        Some(Operator::Div) => b'/',
    }
}

fn main_loop(_c: &MainCtx<'_>, dp: MainPeripherals) -> ! {
    let mut delay = BusyDelay::new();
    let mut keypad = ports::keypad(&dp.ports);
    let mut leds = ports::leds(&dp.ports);
    let mut calc = Calculator::new(NegativeDisplay::Magnitude);

    unwrap_result(leds.write_byte(LED_OFF));

    loop {
        let Some(key) = unwrap_result(keypad.scan(&mut delay)) else {
            continue;
        };
        Debug::Key.log_u8(key.legend() as u8);

        let event = KeyEvent::from(key);
        if event == KeyEvent::Evaluate {
            unwrap_result(leds.write_byte(LED_OFF));
        }
        if let Some(pattern) = calc.handle(event) {
            unwrap_result(leds.write_byte(pattern));
            Debug::Leds.log_u8(pattern);
        }

        Debug::FirstOperand.log_i16(calc.first_operand());
        Debug::SecondOperand.log_i16(calc.second_operand());
        Debug::Operator.log_u8(operator_code(calc.operator()));
        Debug::Result.log_i16(calc.result());

        delay.delay_ms(KEY_HOLDOFF_MS);
        unwrap_result(keypad.wait_release(&mut delay));
    }
}

avr_context::define_main! {
    device: atmega1284p,
    main: main_loop,
    enable_interrupts: true,
    init: init_function(ctx, InitPeripherals { PORTA, PORTB, PORTC, PORTD, USART0 }) -> MainPeripherals,
    static_peripherals: {},
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
