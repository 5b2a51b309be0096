// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Peripheral clock gates
//!
//! Every peripheral handled here has one enable bit in an RCC bus enable register. The mapping
//! lives in a single static table, looked up either by [Peripheral] or by the base address of
//! the peripheral registers, which is what drivers outside this crate usually hold.

use crate::clocks::config::timer_frequency_hz;
use crate::clocks::Stm32l5Clocks;
use crate::rcc::{ClockGate, EnableRegister, Rcc, AHB2ENR, APB1ENR1, APB1ENR2, APB2ENR};
use crate::registers::RegisterBank;
use crate::ErrorCode;

use log::warn;

/// Peripherals with a clock gate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Peripheral {
    GPIOA,
    GPIOB,
    GPIOC,
    GPIOD,
    GPIOE,
    GPIOF,
    GPIOG,
    GPIOH,
    TIM2,
    TIM3,
    TIM6,
    TIM7,
    WWDG,
    SPI2,
    SPI3,
    USART2,
    USART3,
    UART4,
    I2C1,
    I2C2,
    I2C3,
    PWR,
    LPUART1,
    I2C4,
    LPTIM2,
    SYSCFG,
    TIM1,
    SPI1,
    USART1,
    TIM15,
    TIM16,
}

/// Bus clock feeding a peripheral
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bus {
    /// HCLK
    AHB2,
    /// PCLK1
    APB1,
    /// PCLK2
    APB2,
}

struct GateEntry {
    peripheral: Peripheral,
    base_address: usize,
    gate: ClockGate,
}

const fn entry(
    peripheral: Peripheral,
    base_address: usize,
    register: EnableRegister,
    bit: usize,
) -> GateEntry {
    GateEntry {
        peripheral,
        base_address,
        gate: ClockGate::new(register, bit),
    }
}

const GPIO_BASE: usize = 0x4202_0000;
const GPIO_STRIDE: usize = 0x400;

// Indexed by Peripheral discriminant. Base addresses are the non-secure aliases.
#[rustfmt::skip]
static CLOCK_GATES: [GateEntry; 31] = [
    entry(Peripheral::GPIOA, GPIO_BASE, EnableRegister::AHB2ENR, AHB2ENR::GPIOAEN.shift),
    entry(Peripheral::GPIOB, GPIO_BASE + GPIO_STRIDE, EnableRegister::AHB2ENR, AHB2ENR::GPIOBEN.shift),
    entry(Peripheral::GPIOC, GPIO_BASE + 2 * GPIO_STRIDE, EnableRegister::AHB2ENR, AHB2ENR::GPIOCEN.shift),
    entry(Peripheral::GPIOD, GPIO_BASE + 3 * GPIO_STRIDE, EnableRegister::AHB2ENR, AHB2ENR::GPIODEN.shift),
    entry(Peripheral::GPIOE, GPIO_BASE + 4 * GPIO_STRIDE, EnableRegister::AHB2ENR, AHB2ENR::GPIOEEN.shift),
    entry(Peripheral::GPIOF, GPIO_BASE + 5 * GPIO_STRIDE, EnableRegister::AHB2ENR, AHB2ENR::GPIOFEN.shift),
    entry(Peripheral::GPIOG, GPIO_BASE + 6 * GPIO_STRIDE, EnableRegister::AHB2ENR, AHB2ENR::GPIOGEN.shift),
    entry(Peripheral::GPIOH, GPIO_BASE + 7 * GPIO_STRIDE, EnableRegister::AHB2ENR, AHB2ENR::GPIOHEN.shift),
    entry(Peripheral::TIM2, 0x4000_0000, EnableRegister::APB1ENR1, APB1ENR1::TIM2EN.shift),
    entry(Peripheral::TIM3, 0x4000_0400, EnableRegister::APB1ENR1, APB1ENR1::TIM3EN.shift),
    entry(Peripheral::TIM6, 0x4000_1000, EnableRegister::APB1ENR1, APB1ENR1::TIM6EN.shift),
    entry(Peripheral::TIM7, 0x4000_1400, EnableRegister::APB1ENR1, APB1ENR1::TIM7EN.shift),
    entry(Peripheral::WWDG, 0x4000_2C00, EnableRegister::APB1ENR1, APB1ENR1::WWDGEN.shift),
    entry(Peripheral::SPI2, 0x4000_3800, EnableRegister::APB1ENR1, APB1ENR1::SPI2EN.shift),
    entry(Peripheral::SPI3, 0x4000_3C00, EnableRegister::APB1ENR1, APB1ENR1::SPI3EN.shift),
    entry(Peripheral::USART2, 0x4000_4400, EnableRegister::APB1ENR1, APB1ENR1::USART2EN.shift),
    entry(Peripheral::USART3, 0x4000_4800, EnableRegister::APB1ENR1, APB1ENR1::USART3EN.shift),
    entry(Peripheral::UART4, 0x4000_4C00, EnableRegister::APB1ENR1, APB1ENR1::UART4EN.shift),
    entry(Peripheral::I2C1, 0x4000_5400, EnableRegister::APB1ENR1, APB1ENR1::I2C1EN.shift),
    entry(Peripheral::I2C2, 0x4000_5800, EnableRegister::APB1ENR1, APB1ENR1::I2C2EN.shift),
    entry(Peripheral::I2C3, 0x4000_5C00, EnableRegister::APB1ENR1, APB1ENR1::I2C3EN.shift),
    entry(Peripheral::PWR, 0x4000_7000, EnableRegister::APB1ENR1, APB1ENR1::PWREN.shift),
    entry(Peripheral::LPUART1, 0x4000_8000, EnableRegister::APB1ENR2, APB1ENR2::LPUART1EN.shift),
    entry(Peripheral::I2C4, 0x4000_8400, EnableRegister::APB1ENR2, APB1ENR2::I2C4EN.shift),
    entry(Peripheral::LPTIM2, 0x4000_9400, EnableRegister::APB1ENR2, APB1ENR2::LPTIM2EN.shift),
    entry(Peripheral::SYSCFG, 0x4001_0000, EnableRegister::APB2ENR, APB2ENR::SYSCFGEN.shift),
    entry(Peripheral::TIM1, 0x4001_2C00, EnableRegister::APB2ENR, APB2ENR::TIM1EN.shift),
    entry(Peripheral::SPI1, 0x4001_3000, EnableRegister::APB2ENR, APB2ENR::SPI1EN.shift),
    entry(Peripheral::USART1, 0x4001_3800, EnableRegister::APB2ENR, APB2ENR::USART1EN.shift),
    entry(Peripheral::TIM15, 0x4001_4000, EnableRegister::APB2ENR, APB2ENR::TIM15EN.shift),
    entry(Peripheral::TIM16, 0x4001_4400, EnableRegister::APB2ENR, APB2ENR::TIM16EN.shift),
];

impl Peripheral {
    fn entry(self) -> &'static GateEntry {
        &CLOCK_GATES[self as usize]
    }

    /// Look a peripheral up by the base address of its registers
    pub fn from_base_address(base_address: usize) -> Option<Peripheral> {
        CLOCK_GATES
            .iter()
            .find(|entry| entry.base_address == base_address)
            .map(|entry| entry.peripheral)
    }

    pub fn base_address(self) -> usize {
        self.entry().base_address
    }

    pub fn clock_gate(self) -> ClockGate {
        self.entry().gate
    }

    pub fn bus(self) -> Bus {
        match self.clock_gate().register {
            EnableRegister::AHB2ENR => Bus::AHB2,
            EnableRegister::APB1ENR1 | EnableRegister::APB1ENR2 => Bus::APB1,
            EnableRegister::APB2ENR => Bus::APB2,
        }
    }

    /// General purpose and advanced timers get a doubled clock when their APB is divided.
    /// LPTIM2 has its own kernel clock selection and is not one of them.
    pub fn is_timer(self) -> bool {
        matches!(
            self,
            Peripheral::TIM1
                | Peripheral::TIM2
                | Peripheral::TIM3
                | Peripheral::TIM6
                | Peripheral::TIM7
                | Peripheral::TIM15
                | Peripheral::TIM16
        )
    }
}

/// The peripheral clock gate table, bound to a register bank
pub struct PeripheralClocks<'a, B: RegisterBank> {
    rcc: Rcc<'a, B>,
}

impl<'a, B: RegisterBank> PeripheralClocks<'a, B> {
    pub const fn new(rcc: Rcc<'a, B>) -> Self {
        Self { rcc }
    }

    /// Enable the bus clock of the peripheral whose registers start at `base_address`.
    ///
    /// Unknown addresses leave every register untouched; a warning is logged. Use
    /// [PeripheralClocks::try_enable_clock] to get an error instead.
    pub fn enable_clock(&self, base_address: usize) {
        if self.try_enable_clock(base_address).is_err() {
            warn!("phclk: no clock gate for peripheral at {:#010x}", base_address);
        }
    }

    /// Enable the bus clock of the peripheral whose registers start at `base_address`.
    ///
    /// # Errors
    ///
    /// + [Err]\([ErrorCode::NODEVICE]\): no peripheral with a clock gate lives at `base_address`.
    pub fn try_enable_clock(&self, base_address: usize) -> Result<(), ErrorCode> {
        let peripheral = Peripheral::from_base_address(base_address).ok_or(ErrorCode::NODEVICE)?;
        self.enable(peripheral);
        Ok(())
    }

    pub fn enable(&self, peripheral: Peripheral) {
        self.rcc.enable_peripheral_clock(peripheral.clock_gate());
    }

    pub fn disable(&self, peripheral: Peripheral) {
        self.rcc.disable_peripheral_clock(peripheral.clock_gate());
    }

    pub fn is_enabled(&self, peripheral: Peripheral) -> bool {
        self.rcc.is_enabled_peripheral_clock(peripheral.clock_gate())
    }
}

/// Generic operations on a clock gate
pub trait ClockInterface {
    fn is_enabled(&self) -> bool;
    fn enable(&self);
    fn disable(&self);
}

/// Clock of one peripheral, handed to its driver
pub struct PeripheralClock<'a, B: RegisterBank> {
    pub peripheral: Peripheral,
    clocks: &'a dyn Stm32l5Clocks<'a, B>,
}

impl<'a, B: RegisterBank> PeripheralClock<'a, B> {
    pub const fn new(peripheral: Peripheral, clocks: &'a dyn Stm32l5Clocks<'a, B>) -> Self {
        Self { peripheral, clocks }
    }

    fn gates(&self) -> PeripheralClocks<'a, B> {
        PeripheralClocks::new(self.clocks.get_rcc())
    }

    /// Frequency in Hz of the clock reaching the peripheral
    pub fn get_frequency_hz(&self) -> usize {
        let rcc = self.clocks.get_rcc();
        let hclk_freq = self.clocks.get_ahb_frequency();
        let prescaler = match self.peripheral.bus() {
            Bus::AHB2 => return hclk_freq,
            Bus::APB1 => rcc.get_apb1_prescaler(),
            Bus::APB2 => rcc.get_apb2_prescaler(),
        };
        let pclk_freq = hclk_freq / usize::from(prescaler);
        if self.peripheral.is_timer() {
            timer_frequency_hz(pclk_freq, prescaler)
        } else {
            pclk_freq
        }
    }
}

impl<B: RegisterBank> ClockInterface for PeripheralClock<'_, B> {
    fn is_enabled(&self) -> bool {
        self.gates().is_enabled(self.peripheral)
    }

    fn enable(&self) {
        self.gates().enable(self.peripheral);
    }

    fn disable(&self) {
        self.gates().disable(self.peripheral);
    }
}
