// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::{F_CPU, Mutex, interrupt, mcu};
use avr_context::{CriticalSection, IrqCtx};
use core::cell::RefCell;
use mculab::debug::DebugStream;

pub const BAUD: u32 = 19_200;
const UBRR: u16 = (F_CPU / (16 * BAUD) - 1) as u16;

const UCSRB_TXCIE: u8 = 0x40;
const UCSRB_TXEN: u8 = 0x08;
/// Asynchronous, 8 data bits, no parity, 1 stop bit.
const UCSRC_8N1: u8 = 0x06;

/// Transmit-only USART0 on PD1.
pub struct DebugUart {
    usart: mcu::USART0,
}

impl DebugUart {
    pub fn new(usart: mcu::USART0) -> Self {
        // SAFETY: Plain register setup. We own the USART.
        unsafe {
            usart.ubrr0().write(|w| w.bits(UBRR));
            usart.ucsr0c().write(|w| w.bits(UCSRC_8N1));
            usart.ucsr0b().write(|w| w.bits(UCSRB_TXCIE | UCSRB_TXEN));
        }
        Self { usart }
    }

    #[inline(always)]
    pub fn send(&self, data: u8) {
        // SAFETY: Writing the data register starts the transmission.
        self.usart.udr0().write(|w| unsafe { w.bits(data) });
    }
}

/// Debug value table streamed out by the TX complete interrupt.
pub struct DebugPort<const N: usize> {
    uart: Mutex<RefCell<Option<DebugUart>>>,
    stream: Mutex<RefCell<DebugStream<N>>>,
}

impl<const N: usize> DebugPort<N> {
    pub const fn new() -> Self {
        Self {
            uart: Mutex::new(RefCell::new(None)),
            stream: Mutex::new(RefCell::new(DebugStream::new())),
        }
    }

    /// Take the USART and send the first byte.
    /// Everything else is sent from [Self::tx_complete].
    pub fn init(&self, cs: CriticalSection<'_>, usart: mcu::USART0) {
        let uart = DebugUart::new(usart);
        uart.send(self.stream.borrow(cs).borrow_mut().next_byte());
        self.uart.borrow(cs).replace(Some(uart));
    }

    pub fn log(&self, id: u8, value: u16) {
        interrupt::free(|cs| {
            self.stream.borrow(cs).borrow_mut().log(id, value);
        });
    }

    /// USART0 TX complete interrupt.
    pub fn tx_complete(&self, c: &IrqCtx<'_>) {
        let cs = c.cs();
        if let Some(uart) = self.uart.borrow(cs).borrow().as_ref() {
            uart.send(self.stream.borrow(cs).borrow_mut().next_byte());
        }
    }
}

impl<const N: usize> Default for DebugPort<N> {
    fn default() -> Self {
        Self::new()
    }
}

// vim: ts=4 sw=4 expandtab
