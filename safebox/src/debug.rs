// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use avr_context::{InitCtx, IrqCtx};
use labhal::mcu;
pub use mculab::debug::SafeboxValue as Debug;

#[cfg(feature = "debug")]
static DEBUG: labhal::debug::DebugPort<{ Debug::COUNT }> = labhal::debug::DebugPort::new();

pub trait DebugLog: Sized {
    fn log_u16(self, value: u16);

    fn log_i16(self, value: i16) {
        self.log_u16(value as u16);
    }

    fn log_u8(self, value: u8) {
        self.log_u16(value.into());
    }
}

impl DebugLog for Debug {
    #[inline]
    fn log_u16(self, value: u16) {
        #[cfg(feature = "debug")]
        DEBUG.log(self.id(), value);
        #[cfg(not(feature = "debug"))]
        let _ = value;
    }
}

pub fn debug_init(c: &InitCtx<'_>, usart: mcu::USART0) {
    #[cfg(feature = "debug")]
    DEBUG.init(c.cs(), usart);
    #[cfg(not(feature = "debug"))]
    let _ = (c, usart);
}

#[allow(unused_variables)]
pub fn irq_handler_usart0_tx(c: &IrqCtx<'_>) {
    #[cfg(feature = "debug")]
    DEBUG.tx_complete(c);
}

// vim: ts=4 sw=4 expandtab
