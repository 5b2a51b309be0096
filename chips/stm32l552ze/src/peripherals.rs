// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

use crate::clocks::Clocks;
use stm32l5xx::phclk::{ClockInterface, Peripheral, PeripheralClock};
use stm32l5xx::registers::RegisterBank;

/// Clocks of the peripherals used by the kernel on the STM32L552ZE
pub struct Stm32l552zeDefaultPeripherals<'a, B: RegisterBank> {
    pub clocks: &'a Clocks<'a, B>,
    /// Console
    pub lpuart1_clock: PeripheralClock<'a, B>,
    /// Scheduler tick
    pub tim15_clock: PeripheralClock<'a, B>,
    /// Alarm
    pub tim16_clock: PeripheralClock<'a, B>,
    // Once implemented, place other STM32L552ZE peripherals here
}

impl<'a, B: RegisterBank> Stm32l552zeDefaultPeripherals<'a, B> {
    pub fn new(clocks: &'a Clocks<'a, B>) -> Self {
        Self {
            clocks,
            lpuart1_clock: PeripheralClock::new(Peripheral::LPUART1, clocks),
            tim15_clock: PeripheralClock::new(Peripheral::TIM15, clocks),
            tim16_clock: PeripheralClock::new(Peripheral::TIM16, clocks),
        }
    }

    /// Open the clock gates of every peripheral in the bundle
    pub fn enable_clocks(&self) {
        for clock in [&self.lpuart1_clock, &self.tim15_clock, &self.tim16_clock] {
            clock.enable();
        }
    }
}
