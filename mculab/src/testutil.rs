// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated board for the unit tests.
//!
//! Time only moves when somebody waits on [SimDelay] or reads an input pin.
//! Every input read costs [READ_COST_NS], so busy-wait loops terminate.

use crate::{bus::ByteBus, keypad::Keypad};
use core::{cell::Cell, cell::RefCell, convert::Infallible};
use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, InputPin, OutputPin},
};
use std::{rc::Rc, vec, vec::Vec};

pub const READ_COST_NS: u64 = 1_000;

#[derive(Clone, Default)]
pub struct Clock(Rc<Cell<u64>>);

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ns(&self) -> u64 {
        self.0.get()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ns() / 1_000_000
    }

    pub fn advance_ns(&self, ns: u64) {
        self.0.set(self.0.get() + ns);
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay {
            clock: self.clone(),
        }
    }
}

pub struct SimDelay {
    clock: Clock,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_ns(ns.into());
    }
}

/// Input that reads high during the given `[start, end)` millisecond windows.
pub struct TimedInput {
    clock: Clock,
    high_ms: Vec<(u64, u64)>,
}

impl TimedInput {
    pub fn new(clock: &Clock, high_ms: &[(u64, u64)]) -> Self {
        Self {
            clock: clock.clone(),
            high_ms: high_ms.to_vec(),
        }
    }
}

impl ErrorType for TimedInput {
    type Error = Infallible;
}

impl InputPin for TimedInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.clock.advance_ns(READ_COST_NS);
        let now = self.clock.now_ms();
        Ok(self.high_ms.iter().any(|&(s, e)| now >= s && now < e))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_high()?)
    }
}

/// Output pin that records every write with its time stamp in ms.
#[derive(Clone)]
pub struct RecPin {
    clock: Clock,
    trace: Rc<RefCell<Vec<(u64, bool)>>>,
}

impl RecPin {
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock: clock.clone(),
            trace: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn writes(&self) -> Vec<(u64, bool)> {
        self.trace.borrow().clone()
    }

    pub fn level(&self) -> bool {
        self.trace.borrow().last().is_some_and(|&(_, level)| level)
    }

    /// Number of low-to-high transitions, counting from an initial low level.
    pub fn pulses(&self) -> usize {
        let mut prev = false;
        let mut count = 0;
        for &(_, level) in self.trace.borrow().iter() {
            if level && !prev {
                count += 1;
            }
            prev = level;
        }
        count
    }

    fn push(&mut self, level: bool) {
        self.trace.borrow_mut().push((self.clock.now_ms(), level));
    }
}

impl ErrorType for RecPin {
    type Error = Infallible;
}

impl OutputPin for RecPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.push(true);
        Ok(())
    }
}

/// Byte bus that records every byte with its time stamp in ms.
#[derive(Clone)]
pub struct RecBus {
    clock: Clock,
    trace: Rc<RefCell<Vec<(u64, u8)>>>,
}

impl RecBus {
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock: clock.clone(),
            trace: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.trace.borrow().iter().map(|&(_, b)| b).collect()
    }

    pub fn timed(&self) -> Vec<(u64, u8)> {
        self.trace.borrow().clone()
    }
}

impl ErrorType for RecBus {
    type Error = Infallible;
}

impl ByteBus for RecBus {
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push((self.clock.now_ms(), byte));
        Ok(())
    }
}

struct MatrixState {
    driven: Vec<bool>,
    selections: Vec<usize>,
    presses: Vec<(usize, usize, u64, u64)>,
}

/// Key matrix wired to row outputs (active low) and column inputs.
#[derive(Clone)]
pub struct Matrix {
    clock: Clock,
    state: Rc<RefCell<MatrixState>>,
}

impl Matrix {
    pub fn new(clock: &Clock, rows: usize) -> Self {
        Self {
            clock: clock.clone(),
            state: Rc::new(RefCell::new(MatrixState {
                driven: vec![false; rows],
                selections: vec![0; rows],
                presses: Vec::new(),
            })),
        }
    }

    /// Hold the key at `row`/`col` down during `[from, to)` ms.
    pub fn press(&self, row: usize, col: usize, from_ms: u64, to_ms: u64) {
        self.state
            .borrow_mut()
            .presses
            .push((row, col, from_ms, to_ms));
    }

    /// How often each row has been driven low.
    pub fn selections(&self) -> Vec<usize> {
        self.state.borrow().selections.clone()
    }

    pub fn row(&self, row: usize) -> MatrixRow {
        MatrixRow {
            matrix: self.clone(),
            row,
        }
    }

    pub fn col(&self, col: usize) -> MatrixCol {
        MatrixCol {
            matrix: self.clone(),
            col,
        }
    }

    pub fn keypad<const ROWS: usize, const COLS: usize>(
        &self,
        layout: [[crate::keypad::Key; COLS]; ROWS],
    ) -> Keypad<MatrixRow, MatrixCol, ROWS, COLS> {
        Keypad::new(
            core::array::from_fn(|r| self.row(r)),
            core::array::from_fn(|c| self.col(c)),
            layout,
        )
    }
}

pub struct MatrixRow {
    matrix: Matrix,
    row: usize,
}

impl ErrorType for MatrixRow {
    type Error = Infallible;
}

impl OutputPin for MatrixRow {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut state = self.matrix.state.borrow_mut();
        state.driven[self.row] = true;
        state.selections[self.row] += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.matrix.state.borrow_mut().driven[self.row] = false;
        Ok(())
    }
}

pub struct MatrixCol {
    matrix: Matrix,
    col: usize,
}

impl ErrorType for MatrixCol {
    type Error = Infallible;
}

impl InputPin for MatrixCol {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_low()?)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.matrix.clock.advance_ns(READ_COST_NS);
        let now = self.matrix.clock.now_ms();
        let state = self.matrix.state.borrow();
        Ok(state.presses.iter().any(|&(r, c, from, to)| {
            c == self.col && state.driven[r] && now >= from && now < to
        }))
    }
}

// vim: ts=4 sw=4 expandtab
