// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::F_CPU;
use embedded_hal::delay::DelayNs;

/// CPU cycles of one [spin] iteration.
const CYCLES_PER_LOOP: u32 = 4;
const LOOPS_PER_US: u32 = F_CPU / 1_000_000 / CYCLES_PER_LOOP;

/// Burn `4 * count` CPU cycles.
#[inline(always)]
fn spin(count: u16) {
    if count == 0 {
        return;
    }
    // SAFETY: The asm code only modifies the loop counter register.
    unsafe {
        core::arch::asm!(
            "1: sbiw {count}, 1", // 2 cycles
            "brne 1b",            // 2 cycles
            count = inout(reg_iw) count => _,
            options(nomem, nostack),
        );
    }
}

/// Cycle counting busy-wait delay.
///
/// Interrupts are not disabled. An interrupt extends the delay
/// by its run time.
#[derive(Copy, Clone, Default)]
pub struct BusyDelay(());

impl BusyDelay {
    pub const fn new() -> Self {
        Self(())
    }
}

impl DelayNs for BusyDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        let mut us = us;
        while us > 0 {
            let chunk = us.min(u32::from(u16::MAX) / LOOPS_PER_US);
            spin((chunk * LOOPS_PER_US) as u16);
            us -= chunk;
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}

// vim: ts=4 sw=4 expandtab
