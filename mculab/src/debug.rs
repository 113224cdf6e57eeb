// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debug value stream.
//!
//! The firmware keeps a small table of 16 bit values and sends it out
//! over the UART in an endless loop, one byte per TX interrupt.
//! Every value is a frame of `[id, lo, hi]`.
//! Each pass over the table ends with the sync frame `[FF, FF, FF]`.

pub const FRAME_LEN: usize = 3;
pub const SYNC_ID: u8 = 0xFF;
pub const SYNC_VALUE: u16 = 0xFFFF;

/// Firmware side of the stream.
pub struct DebugStream<const N: usize> {
    values: [u16; N],
    id: u8,
    byte: u8,
}

impl<const N: usize> DebugStream<N> {
    pub const fn new() -> Self {
        assert!(N < SYNC_ID as usize);
        Self {
            values: [0; N],
            id: 0,
            byte: 0,
        }
    }

    pub fn log(&mut self, id: u8, value: u16) {
        if let Some(v) = self.values.get_mut(usize::from(id)) {
            *v = value;
        }
    }

    pub fn value(&self, id: u8) -> Option<u16> {
        self.values.get(usize::from(id)).copied()
    }

    /// Get the next byte to transmit.
    pub fn next_byte(&mut self) -> u8 {
        let (id, value) = match self.values.get(usize::from(self.id)) {
            Some(&value) => (self.id, value),
            None => (SYNC_ID, SYNC_VALUE),
        };
        let data = match self.byte {
            0 => id,
            1 => value as u8,
            _ => (value >> 8) as u8,
        };
        if self.byte as usize >= FRAME_LEN - 1 {
            self.byte = 0;
            self.id = if id == SYNC_ID { 0 } else { self.id + 1 };
        } else {
            self.byte += 1;
        }
        data
    }
}

impl<const N: usize> Default for DebugStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Value { id: u8, value: u16 },
    Sync,
}

/// Host side of the stream.
///
/// Bytes are dropped until a run of at least three `0xFF` bytes has been seen.
/// The first other byte after such a run starts a frame.
#[derive(Clone, Debug, Default)]
pub struct FrameDecoder {
    buf: [u8; FRAME_LEN],
    len: usize,
    ff_run: u8,
    synced: bool,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn push(&mut self, byte: u8) -> Option<Frame> {
        if byte == SYNC_ID {
            self.ff_run = self.ff_run.saturating_add(1);
        } else {
            if usize::from(self.ff_run) >= FRAME_LEN {
                self.synced = true;
                self.len = 0;
            }
            self.ff_run = 0;
        }
        if !self.synced {
            return None;
        }

        self.buf[self.len] = byte;
        self.len += 1;
        if self.len < FRAME_LEN {
            return None;
        }
        self.len = 0;

        let [id, lo, hi] = self.buf;
        let value = u16::from_le_bytes([lo, hi]);
        if id != SYNC_ID {
            Some(Frame::Value { id, value })
        } else if value == SYNC_VALUE {
            Some(Frame::Sync)
        } else {
            self.synced = false;
            None
        }
    }
}

macro_rules! debug_values {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $label:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        #[repr(u8)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub const NAMES: &'static [&'static str] = &[$($label,)*];
            pub const COUNT: usize = Self::NAMES.len();

            pub const fn id(self) -> u8 {
                self as u8
            }
        }
    };
}

debug_values!(
    /// Debug values of the calculator.
    CalcValue {
        Key => "key",
        FirstOperand => "first_operand",
        SecondOperand => "second_operand",
        Operator => "operator",
        Result => "result",
        Leds => "leds",
    }
);

debug_values!(
    /// Debug values of the meter.
    MeterValue {
        AdcRaw => "adc_raw",
        Centivolts => "centivolts",
        Lux => "lux",
        Blinks => "button_irqs",
    }
);

debug_values!(
    /// Debug values of the safebox.
    SafeboxValue {
        Secret => "secret",
        UserCode => "user_code",
        Confirmations => "confirmations",
        Unlocks => "unlocks",
        Alarms => "alarms",
        Emergencies => "emergency_irqs",
    }
);


// vim: ts=4 sw=4 expandtab
