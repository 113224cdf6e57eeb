// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::interrupt;

/// Disable the JTAG interface to free PC2..PC5 for GPIO use.
///
/// JTD has to be written twice within four cycles.
#[inline(always)]
pub fn jtag_disable() {
    // SAFETY: The asm code only accesses the MCUCR register,
    //         which is not accessed from anywhere else in the program.
    unsafe {
        core::arch::asm!(
            "in {tmp}, {MCUCR}",
            "ori {tmp}, 0x80", // JTD=1
            "out {MCUCR}, {tmp}",
            "out {MCUCR}, {tmp}",
            tmp = out(reg_upper) _,
            MCUCR = const 0x35,
            options(nostack)
        );
    }
}

/// Arm the watchdog with its shortest timeout.
fn wdt_arm() {
    // SAFETY: The asm code only accesses the WDT registers
    //         which are not accessed from anywhere else in the program.
    //         Called with interrupts disabled.
    unsafe {
        core::arch::asm!(
            "wdr",
            "ldi {tmp}, 0x18", // WDCE=1, WDE=1
            "sts {WDTCSR}, {tmp}",
            "ldi {tmp}, 0x08", // WDE=1, WDP=0 -> 16 ms
            "sts {WDTCSR}, {tmp}",
            tmp = out(reg_upper) _,
            WDTCSR = const 0x60,
            options(nostack, preserves_flags)
        );
    }
}

/// Cheaper Result::unwrap() alternative.
///
/// This is cheaper, because it doesn't call into the panic unwind path.
#[inline(always)]
pub fn unwrap_result<T, E>(value: Result<T, E>) -> T {
    match value {
        Ok(value) => value,
        Err(_) => reset_system(),
    }
}

/// Reset the system through the watchdog.
#[inline(never)]
#[allow(clippy::empty_loop)]
pub fn reset_system() -> ! {
    interrupt::disable();
    wdt_arm();
    loop {
        // Wait for the watchdog timer to trigger and reset the system.
    }
}

#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    reset_system();
}

// vim: ts=4 sw=4 expandtab
