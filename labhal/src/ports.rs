// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::{interrupt, mcu};
use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use mculab::bus::ByteBus;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Port {
    A,
    B,
    C,
    D,
}

#[rustfmt::skip]
macro_rules! impl_port {
    (
        $(
            $variant:ident => $periph:ident, $pin:ident, $ddr:ident, $port:ident;
        )*
    ) => {
        impl Port {
            #[inline(always)]
            fn read_pin(self) -> u8 {
                match self {
                    $(
                        // SAFETY: Read only access.
                        //         The port is owned by [Ports].
                        Port::$variant => unsafe { &*mcu::$periph::ptr() }.$pin().read().bits(),
                    )*
                }
            }

            /// Read-modify-write of the output register.
            #[inline(always)]
            fn modify_port(self, f: impl FnOnce(u8) -> u8) {
                interrupt::free(|_| match self {
                    $(
                        Port::$variant => {
                            // SAFETY: Interrupts are disabled during the read-modify-write.
                            //         The port is owned by [Ports].
                            let regs = unsafe { &*mcu::$periph::ptr() };
                            regs.$port().modify(|r, w| unsafe { w.bits(f(r.bits())) });
                        }
                    )*
                })
            }

            /// Read-modify-write of the direction register.
            #[inline(always)]
            fn modify_ddr(self, f: impl FnOnce(u8) -> u8) {
                interrupt::free(|_| match self {
                    $(
                        Port::$variant => {
                            // SAFETY: Interrupts are disabled during the read-modify-write.
                            //         The port is owned by [Ports].
                            let regs = unsafe { &*mcu::$periph::ptr() };
                            regs.$ddr().modify(|r, w| unsafe { w.bits(f(r.bits())) });
                        }
                    )*
                })
            }
        }
    };
}

impl_port!(
    A => PORTA, pina, ddra, porta;
    B => PORTB, pinb, ddrb, portb;
    C => PORTC, pinc, ddrc, portc;
    D => PORTD, pind, ddrd, portd;
);

fn pin_mask(bit: u8) -> u8 {
    1 << (bit & 7)
}

/// Ownership of the four GPIO ports.
///
/// Pins and buses handed out by this object access the registers directly.
/// Several handles to the same pin may exist, e.g. one in main context and
/// one in an interrupt handler.
#[allow(non_snake_case)]
pub struct Ports {
    _PORTA: mcu::PORTA,
    _PORTB: mcu::PORTB,
    _PORTC: mcu::PORTC,
    _PORTD: mcu::PORTD,
}

impl Ports {
    #[allow(non_snake_case)]
    pub fn new(PORTA: mcu::PORTA, PORTB: mcu::PORTB, PORTC: mcu::PORTC, PORTD: mcu::PORTD) -> Self {
        Self {
            _PORTA: PORTA,
            _PORTB: PORTB,
            _PORTC: PORTC,
            _PORTD: PORTD,
        }
    }

    /// Configure `bit` as output, driving `level`.
    pub fn output(&self, port: Port, bit: u8, level: bool) -> PortPin {
        let pin = PortPin::new(port, bit);
        pin.write(level);
        port.modify_ddr(|v| v | pin.mask);
        pin
    }

    /// Configure `bit` as input.
    pub fn input(&self, port: Port, bit: u8, pull_up: bool) -> PortPin {
        let pin = PortPin::new(port, bit);
        port.modify_ddr(|v| v & !pin.mask);
        pin.write(pull_up);
        pin
    }

    /// Another handle to an already configured pin.
    pub fn pin(&self, port: Port, bit: u8) -> PortPin {
        PortPin::new(port, bit)
    }

    /// Configure the `mask` bits of `port` as outputs, driven low.
    pub fn bus(&self, port: Port, mask: u8) -> PortBus {
        port.modify_port(|v| v & !mask);
        port.modify_ddr(|v| v | mask);
        PortBus { port, mask }
    }
}

pub struct PortPin {
    port: Port,
    mask: u8,
}

impl PortPin {
    fn new(port: Port, bit: u8) -> Self {
        Self {
            port,
            mask: pin_mask(bit),
        }
    }

    #[inline(always)]
    fn write(&self, level: bool) {
        let mask = self.mask;
        if level {
            self.port.modify_port(|v| v | mask);
        } else {
            self.port.modify_port(|v| v & !mask);
        }
    }

    #[inline(always)]
    pub fn get(&self) -> bool {
        self.port.read_pin() & self.mask != 0
    }
}

impl ErrorType for PortPin {
    type Error = Infallible;
}

impl OutputPin for PortPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}

impl InputPin for PortPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.get())
    }
}

/// The masked bits of one port, written as a whole.
pub struct PortBus {
    port: Port,
    mask: u8,
}

impl ErrorType for PortBus {
    type Error = Infallible;
}

impl ByteBus for PortBus {
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        let mask = self.mask;
        self.port.modify_port(|v| (v & !mask) | (byte & mask));
        Ok(())
    }
}

// vim: ts=4 sw=4 expandtab
