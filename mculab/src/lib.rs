// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portable behavior of the lab firmware images.
//!
//! Everything in here talks to the hardware through `embedded-hal` pins,
//! the [bus::ByteBus] and [analog::AnalogIn] traits and a
//! [DelayNs](embedded_hal::delay::DelayNs) wait primitive.
//! The AVR board layer lives in the `labhal` crate.
//! On the host, the modules are exercised by the unit tests.
//!
//! | Module | Used by |
//! | ------ | ------- |
//! | [keypad] | calculator, safebox |
//! | [calc] | calculator |
//! | [present], [bus] | all |
//! | [lcd], [analog], [meter] | meter |
//! | [seg7], [safebox] | safebox |
//! | [irq] | meter, safebox |
//! | [debug] | all, debugtool |

#![no_std]

#[cfg(test)]
extern crate std;

pub mod analog;
pub mod bus;
pub mod calc;
pub mod debug;
pub mod irq;
pub mod keypad;
pub mod lcd;
pub mod meter;
pub mod present;
pub mod safebox;
pub mod seg7;

#[cfg(test)]
mod testutil;

// vim: ts=4 sw=4 expandtab
