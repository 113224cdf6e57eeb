// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Voltage and light meter.
//!
//! The voltage on ADC0 is shown on a 16x2 character LCD, either directly
//! or converted to the light intensity of a photoresistor divider
//! (feature `lux`).
//! A falling edge on the push button blinks the LED 20 times.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]
#![feature(asm_experimental_arch)]

mod button;
mod debug;
mod ports;

use crate::{
    button::{button_init, irq_handler_pcint2},
    debug::{Debug, DebugLog as _, debug_init},
};
use avr_context::{InitCtx, IrqCtx, MainCtx};
use labhal::{
    adc::Adc,
    delay::BusyDelay,
    mcu,
    ports::Ports,
    system::{jtag_disable, unwrap_result},
};
use mculab::{
    analog::SCALE_12BIT_5V,
    meter::{DisplayMode, Meter},
};

const MODE: DisplayMode = if cfg!(feature = "lux") {
    DisplayMode::Lux
} else {
    DisplayMode::Voltage
};

#[allow(non_snake_case)]
struct InitPeripherals {
    ADC: mcu::ADC,
    EXINT: mcu::EXINT,
    PORTA: mcu::PORTA,
    PORTB: mcu::PORTB,
    PORTC: mcu::PORTC,
    PORTD: mcu::PORTD,
    USART0: mcu::USART0,
}

#[allow(non_snake_case)]
struct MainPeripherals {
    ADC: mcu::ADC,
    ports: Ports,
}

fn init_function(c: &InitCtx<'_>, dp: InitPeripherals) -> MainPeripherals {
    jtag_disable();
    let ports = Ports::new(dp.PORTA, dp.PORTB, dp.PORTC, dp.PORTD);
    debug_init(c, dp.USART0);
    button_init(c, dp.EXINT, ports::button(&ports), ports::led(&ports));
    MainPeripherals { ADC: dp.ADC, ports }
}

fn main_loop(_c: &MainCtx<'_>, dp: MainPeripherals) -> ! {
    let mut delay = BusyDelay::new();
    let adc = Adc::new(dp.ADC, ports::ADC_CHANNEL);
    let mut meter = Meter::new(adc, ports::lcd(&dp.ports), SCALE_12BIT_5V, MODE);

    unwrap_result(meter.start(&mut delay));
    loop {
        let reading = unwrap_result(meter.run_once(&mut delay));
        Debug::AdcRaw.log_u16(reading.raw);
        Debug::Centivolts.log_u16(reading.centivolts as u16);
        Debug::Lux.log_u16(reading.lux);
    }
}

avr_context::define_main! {
    device: atmega1284p,
    main: main_loop,
    enable_interrupts: true,
    init: init_function(ctx, InitPeripherals { ADC, EXINT, PORTA, PORTB, PORTC, PORTD, USART0 }) -> MainPeripherals,
    static_peripherals: {},
}

fn pcint2_isr(c: &IrqCtx<'_>) {
    irq_handler_pcint2(c);
}

avr_context::define_isr! {
    device: atmega1284p,
    interrupt: PCINT2,
    isr: pcint2_isr,
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
