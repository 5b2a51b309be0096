// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! STM32L5xx clock driver
//!
//! This module brings the clock tree from its reset state (MSI at 4MHz) to the tree described
//! by a [ClockConfig], and answers frequency queries afterwards.
//!
//! # Features
//!
//! - [x] One-shot bring-up: voltage scaling, oscillators, main PLL, system clock switch, flash
//! latency and bus prescalers
//! - [x] Configuration checked against the chip limits before any register is touched
//! - [x] System clock, AHB, APB1 and APB2 frequencies derived from the registers
//!
//! # Limitations
//!
//! - [ ] No runtime frequency change after bring-up
//! - [ ] PLLSAI1 and PLLSAI2 are left untouched
//!
//! # Usage [^usage_note]
//!
//! ```rust,ignore
//! use stm32l552ze::clocks::{ClockConfig, Clocks};
//! use stm32l552ze::registers::Mmio;
//!
//! let registers = unsafe { Mmio::new() };
//! let clocks = Clocks::new(&registers, ClockConfig::MSI_PLL_110_MHZ)?;
//! clocks.init()?;
//! ```
//!
//! ## Retrieve the AHB frequency:
//!
//! ```rust,ignore
//! let ahb_frequency = clocks.get_ahb_frequency_hz();
//! debug!("Current AHB frequency is {}Hz", ahb_frequency);
//! ```
//!
//! ## Find where a stalled bring-up stopped:
//!
//! ```rust,ignore
//! let clocks = clocks.with_wait_policy(WaitPolicy::Bounded(1_000_000));
//! if clocks.init() == Err(ErrorCode::BUSY) {
//!     debug!("Clock bring-up stalled at {:?}", clocks.step());
//! }
//! ```
//!
//! [^usage_note]: For the purpose of brevity, any error checking has been removed.

use crate::chip_specific::ChipSpecs as ChipSpecsTrait;
use crate::clocks::config::{ClockConfig, HSI16_FREQUENCY_HZ};
use crate::clocks::osc::Oscillators;
use crate::flash::Flash;
use crate::phclk::PeripheralClocks;
use crate::pwr::{Pwr, VOS};
use crate::rcc::{AHBPrescaler, APBPrescaler, PllSource, Rcc, SysClockSource};
use crate::registers::{RegisterBank, WaitPolicy};
use crate::ErrorCode;

use core::cell::Cell;
use core::marker::PhantomData;

use log::{debug, trace, warn};

/// Position of the bring-up sequence
///
/// Steps are entered in declaration order. [Step::SysClockFallback] is skipped unless the PLL
/// drives SYSCLK when bring-up starts, [Step::Hse] when no HSE is configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Bring-up has not started
    Idle,
    PowerClock,
    /// SYSCLK moves from the PLL to HSI16
    SysClockFallback,
    VoltageScaling,
    Hsi16,
    BackupDomain,
    Lse,
    LseSys,
    Hsi48,
    Hse,
    PllStop,
    PllConfig,
    PllLock,
    FlashLatencyRaise,
    AhbCap,
    SysClockSwitch,
    AhbRestore,
    FlashLatencyLower,
    ApbPrescalers,
    /// The clock tree matches the configuration
    Done,
}

/// Progress of the bring-up and the wait policy shared by all its steps
pub(crate) struct Sequence {
    step: Cell<Step>,
    wait: WaitPolicy,
}

impl Sequence {
    const fn new(wait: WaitPolicy) -> Self {
        Self {
            step: Cell::new(Step::Idle),
            wait,
        }
    }

    pub(crate) fn step(&self) -> Step {
        self.step.get()
    }

    pub(crate) fn enter(&self, step: Step) {
        trace!("clocks: {:?}", step);
        self.step.set(step);
    }

    pub(crate) fn wait_until<F: FnMut() -> bool>(&self, condition: F) -> Result<(), ErrorCode> {
        self.wait
            .wait_until(condition)
            .map_err(|err| self.report(err))
    }

    fn report(&self, err: ErrorCode) -> ErrorCode {
        warn!("clocks: bring-up stalled at {:?}", self.step());
        err
    }
}

/// Access to RCC and bus frequencies for peripheral clocks
pub trait Stm32l5Clocks<'a, B: RegisterBank> {
    fn get_rcc(&self) -> Rcc<'a, B>;

    fn get_ahb_frequency(&self) -> usize;
}

/// Main struct for configuring on-board clocks.
pub struct Clocks<'a, B: RegisterBank, ChipSpecs> {
    rcc: Rcc<'a, B>,
    pwr: Pwr<'a, B>,
    flash: Flash<'a, B>,
    config: ClockConfig,
    sequence: Sequence,
    _specs: PhantomData<ChipSpecs>,
}

impl<'a, B: RegisterBank, ChipSpecs: ChipSpecsTrait> Clocks<'a, B, ChipSpecs> {
    /// Create the clock driver. Nothing is written until [Clocks::init].
    ///
    /// Waits spin forever; see [Clocks::with_wait_policy].
    ///
    /// # Errors
    ///
    /// + [Err]\([ErrorCode::INVAL]\): `config` violates the limits of the chip.
    pub fn new(registers: &'a B, config: ClockConfig) -> Result<Self, ErrorCode> {
        config.validate::<ChipSpecs>()?;
        Ok(Self {
            rcc: Rcc::new(registers),
            pwr: Pwr::new(registers),
            flash: Flash::new(registers),
            config,
            sequence: Sequence::new(WaitPolicy::Forever),
            _specs: PhantomData,
        })
    }

    /// Replace the wait policy used by every ready-flag poll of the bring-up
    pub fn with_wait_policy(self, wait: WaitPolicy) -> Self {
        Self {
            sequence: Sequence::new(wait),
            ..self
        }
    }

    /// Bring the clock tree to the configuration.
    ///
    /// Afterwards SYSCLK is the main PLL R output, HCLK, PCLK1 and PCLK2 run at the configured
    /// frequencies and the flash latency matches HCLK. The flash latency is never below what
    /// the current HCLK requires, and the AHB prescaler is at its maximum divide while the
    /// system clock switches.
    ///
    /// # Errors
    ///
    /// + [Err]\([ErrorCode::ALREADY]\): the bring-up already completed.
    /// + [Err]\([ErrorCode::BUSY]\): a bounded wait expired. [Clocks::step] tells which one.
    /// Never returned with [WaitPolicy::Forever].
    pub fn init(&self) -> Result<(), ErrorCode> {
        if self.sequence.step() == Step::Done {
            return Err(ErrorCode::ALREADY);
        }

        debug!(
            "clocks: bring-up to {}Hz from {:?}",
            self.config.sys_clock_frequency_hz(),
            self.config.pll.source
        );

        self.sequence.enter(Step::PowerClock);
        self.rcc.enable_pwr_clock();

        let oscillators = Oscillators::new(self.rcc, self.pwr);

        // The PLL may still run at a frequency above the limit of the target range
        if self.rcc.get_sys_clock_source() == SysClockSource::PLL {
            self.sequence.enter(Step::SysClockFallback);
            oscillators.leave_pll(&self.sequence)?;
        }

        self.sequence.enter(Step::VoltageScaling);
        self.pwr.set_voltage_range(self.config.vos);
        self.sequence.wait_until(|| self.pwr.is_vos_ready())?;

        oscillators.bring_up(&self.config, &self.sequence)?;

        let target_latency =
            ChipSpecs::get_number_wait_cycles_based_on_frequency_and_voltage(
                self.config.ahb_frequency_hz(),
                self.config.vos,
            );

        // The documentation requires the flash latency to be raised before the frequency
        // increases, and lowered only after it decreased.
        self.sequence.enter(Step::FlashLatencyRaise);
        if self.flash.get_latency() < target_latency {
            self.flash
                .set_latency(target_latency, self.sequence.wait)
                .map_err(|err| self.sequence.report(err))?;
        }

        self.sequence.enter(Step::AhbCap);
        self.rcc.set_ahb_prescaler(AHBPrescaler::DivideBy512);

        self.sequence.enter(Step::SysClockSwitch);
        self.rcc.set_sys_clock_source(SysClockSource::PLL);
        self.sequence
            .wait_until(|| self.rcc.get_sys_clock_source() == SysClockSource::PLL)?;

        self.sequence.enter(Step::AhbRestore);
        self.rcc.set_ahb_prescaler(self.config.ahb_prescaler);

        self.sequence.enter(Step::FlashLatencyLower);
        if self.flash.get_latency() > target_latency {
            self.flash
                .set_latency(target_latency, self.sequence.wait)
                .map_err(|err| self.sequence.report(err))?;
        }

        self.sequence.enter(Step::ApbPrescalers);
        self.rcc.set_apb1_prescaler(self.config.apb1_prescaler);
        self.rcc.set_apb2_prescaler(self.config.apb2_prescaler);

        self.sequence.enter(Step::Done);
        debug!(
            "clocks: SYSCLK {}Hz, HCLK {}Hz, PCLK1 {}Hz, PCLK2 {}Hz, flash latency {:?}",
            self.get_sys_clock_frequency_hz(),
            self.get_ahb_frequency_hz(),
            self.get_apb1_frequency_hz(),
            self.get_apb2_frequency_hz(),
            self.flash.get_latency()
        );
        Ok(())
    }

    /// Current position of the bring-up sequence
    pub fn step(&self) -> Step {
        self.sequence.step()
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn flash(&self) -> &Flash<'a, B> {
        &self.flash
    }

    /// Clock gates of the peripherals, fed by this clock tree
    pub fn peripheral_clocks(&self) -> PeripheralClocks<'a, B> {
        PeripheralClocks::new(self.rcc)
    }

    pub fn get_voltage_range(&self) -> VOS {
        self.pwr.get_vos()
    }

    /// Get the current system clock source
    pub fn get_sys_clock_source(&self) -> SysClockSource {
        self.rcc.get_sys_clock_source()
    }

    /// Get the current system clock frequency in Hz, from the RCC registers
    pub fn get_sys_clock_frequency_hz(&self) -> usize {
        match self.get_sys_clock_source() {
            SysClockSource::MSI => self.rcc.get_msi_frequency_hz(),
            SysClockSource::HSI16 => HSI16_FREQUENCY_HZ,
            SysClockSource::HSE => self.hse_frequency_hz(),
            SysClockSource::PLL => self.get_pll_frequency_hz(),
        }
    }

    /// Get the frequency of the main PLL R output in Hz, from the RCC registers
    pub fn get_pll_frequency_hz(&self) -> usize {
        let source_frequency = match self.rcc.get_pll_clocks_source() {
            Some(PllSource::MSI) => self.rcc.get_msi_frequency_hz(),
            Some(PllSource::HSI16) => HSI16_FREQUENCY_HZ,
            Some(PllSource::HSE) => self.hse_frequency_hz(),
            None => 0,
        };
        source_frequency / self.rcc.get_pll_clocks_m_divider()
            * self.rcc.get_pll_clock_n_multiplier()
            / usize::from(self.rcc.get_pll_clock_r_divider())
    }

    // HSE has no frequency register; the configuration is the only source.
    fn hse_frequency_hz(&self) -> usize {
        self.config.hse.map_or(0, |hse| hse.frequency_hz)
    }

    /// Get the current configured AHB prescaler
    pub fn get_ahb_prescaler(&self) -> AHBPrescaler {
        self.rcc.get_ahb_prescaler()
    }

    /// Get the frequency of the AHB (HCLK)
    pub fn get_ahb_frequency_hz(&self) -> usize {
        self.get_sys_clock_frequency_hz() / usize::from(self.get_ahb_prescaler())
    }

    pub fn get_apb1_prescaler(&self) -> APBPrescaler {
        self.rcc.get_apb1_prescaler()
    }

    /// Get the frequency of APB1 (PCLK1)
    pub fn get_apb1_frequency_hz(&self) -> usize {
        self.get_ahb_frequency_hz() / usize::from(self.get_apb1_prescaler())
    }

    pub fn get_apb2_prescaler(&self) -> APBPrescaler {
        self.rcc.get_apb2_prescaler()
    }

    /// Get the frequency of APB2 (PCLK2)
    pub fn get_apb2_frequency_hz(&self) -> usize {
        self.get_ahb_frequency_hz() / usize::from(self.get_apb2_prescaler())
    }
}

impl<'a, B: RegisterBank, ChipSpecs: ChipSpecsTrait> Stm32l5Clocks<'a, B>
    for Clocks<'a, B, ChipSpecs>
{
    fn get_rcc(&self) -> Rcc<'a, B> {
        self.rcc
    }

    fn get_ahb_frequency(&self) -> usize {
        self.get_ahb_frequency_hz()
    }
}
