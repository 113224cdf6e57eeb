// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ATmega1284P board layer for the lab firmware images.
//!
//! Implements the `embedded-hal` and [mculab] capabilities on top of
//! the raw `avr-device` registers.

#![no_std]
#![feature(asm_experimental_arch)]

pub mod adc;
pub mod debug;
pub mod delay;
pub mod ports;
pub mod system;

pub use avr_device::atmega1284p as mcu;
pub use avr_device::interrupt::{self, Mutex};

/// CPU clock. Internal RC oscillator without the clock divider.
pub const F_CPU: u32 = 8_000_000;

// vim: ts=4 sw=4 expandtab
