// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge triggered button interrupt with a blocking service routine.
//!
//! The routine runs to completion inside of the interrupt.
//! The foreground loop is suspended for the whole duration.
//! Only after the routine returned, the pending condition is cleared.

use embedded_hal::{delay::DelayNs, digital::OutputPin};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

impl Edge {
    pub const fn matches(self, prev: bool, now: bool) -> bool {
        match self {
            Edge::Rising => !prev && now,
            Edge::Falling => prev && !now,
        }
    }
}

/// Something that has to be acknowledged after the service routine.
pub trait PendingFlag {
    fn clear(&mut self);
}

/// Edge detector with a pending latch for one input line.
///
/// This models pin change interrupts, which trigger on both edges
/// and have to filter the wanted edge in software.
#[derive(Clone, Debug)]
pub struct IrqLine {
    edge: Edge,
    level: bool,
    pending: bool,
}

impl IrqLine {
    pub const fn new(edge: Edge, idle_level: bool) -> Self {
        Self {
            edge,
            level: idle_level,
            pending: false,
        }
    }

    /// Feed the current input level.
    ///
    /// Returns true, if this sample latched a new pending event.
    /// Edges are ignored while an event is pending.
    pub fn sample(&mut self, level: bool) -> bool {
        let prev = self.level;
        self.level = level;
        if !self.pending && self.edge.matches(prev, level) {
            self.pending = true;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Force the pending state.
    /// Used for lines where the hardware already did the edge detection.
    pub fn latch(&mut self) {
        self.pending = true;
    }
}

impl PendingFlag for IrqLine {
    fn clear(&mut self) {
        self.pending = false;
    }
}

/// Run `routine` and clear `flag` afterwards.
///
/// The flag is cleared, even if the routine failed.
pub fn service<F, E>(flag: &mut F, routine: impl FnOnce() -> Result<(), E>) -> Result<(), E>
where
    F: PendingFlag + ?Sized,
{
    let res = routine();
    flag.clear();
    res
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlinkPattern {
    pub cycles: u8,
    pub on_ms: u32,
    pub off_ms: u32,
}

/// Meter button: 20 blinks in 10 seconds.
pub const BUTTON_BLINK: BlinkPattern = BlinkPattern {
    cycles: 20,
    on_ms: 250,
    off_ms: 250,
};

pub fn blink<P, D>(led: &mut P, delay: &mut D, pattern: &BlinkPattern) -> Result<(), P::Error>
where
    P: OutputPin,
    D: DelayNs,
{
    for _ in 0..pattern.cycles {
        led.set_high()?;
        delay.delay_ms(pattern.on_ms);
        led.set_low()?;
        delay.delay_ms(pattern.off_ms);
    }
    Ok(())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MelodyPattern {
    pub cycles: u8,
    pub sound_ms: u32,
    pub pause_ms: u32,
}

/// Safebox emergency button.
pub const EMERGENCY_MELODY: MelodyPattern = MelodyPattern {
    cycles: 5,
    sound_ms: 500,
    pause_ms: 500,
};

/// Sound the buzzer with the LED dark, then pause with the LED lit.
pub fn melody<L, B, D>(
    led: &mut L,
    buzzer: &mut B,
    delay: &mut D,
    pattern: &MelodyPattern,
) -> Result<(), L::Error>
where
    L: OutputPin,
    B: OutputPin<Error = L::Error>,
    D: DelayNs,
{
    for _ in 0..pattern.cycles {
        led.set_low()?;
        buzzer.set_high()?;
        delay.delay_ms(pattern.sound_ms);
        led.set_high()?;
        buzzer.set_low()?;
        delay.delay_ms(pattern.pause_ms);
    }
    Ok(())
}


// vim: ts=4 sw=4 expandtab
