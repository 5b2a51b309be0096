// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Oscillator and main PLL bring-up
//!
//! Runs as part of [crate::clocks::Clocks::init]. The order matters: LSE lives in the
//! backup domain, so the backup domain write protection goes first, and the PLL can only be
//! reprogrammed once it is stopped.

use crate::clocks::clocks::{Sequence, Step};
use crate::clocks::config::ClockConfig;
use crate::pwr::Pwr;
use crate::rcc::{Rcc, SysClockSource};
use crate::registers::RegisterBank;
use crate::ErrorCode;

use log::trace;

pub(crate) struct Oscillators<'a, B: RegisterBank> {
    rcc: Rcc<'a, B>,
    pwr: Pwr<'a, B>,
}

impl<'a, B: RegisterBank> Oscillators<'a, B> {
    pub(crate) const fn new(rcc: Rcc<'a, B>, pwr: Pwr<'a, B>) -> Self {
        Self { rcc, pwr }
    }

    /// Run SYSCLK from HSI16 so the PLL can be stopped and the voltage range lowered.
    ///
    /// # Errors
    ///
    /// + [Err]\([ErrorCode::BUSY]\): a bounded wait expired.
    pub(crate) fn leave_pll(&self, sequence: &Sequence) -> Result<(), ErrorCode> {
        self.rcc.enable_hsi_clock();
        sequence.wait_until(|| self.rcc.is_ready_hsi_clock())?;
        self.rcc.set_sys_clock_source(SysClockSource::HSI16);
        sequence.wait_until(|| self.rcc.get_sys_clock_source() == SysClockSource::HSI16)
    }

    /// Start HSI16, LSE, HSI48 and, when described, HSE. Then stop, program and relock the
    /// main PLL with its R output enabled.
    ///
    /// # Errors
    ///
    /// + [Err]\([ErrorCode::BUSY]\): a bounded wait expired. The sequence step tells which one.
    pub(crate) fn bring_up(
        &self,
        config: &ClockConfig,
        sequence: &Sequence,
    ) -> Result<(), ErrorCode> {
        sequence.enter(Step::Hsi16);
        self.rcc.enable_hsi_clock();
        sequence.wait_until(|| self.rcc.is_ready_hsi_clock())?;

        sequence.enter(Step::BackupDomain);
        if !self.pwr.is_backup_domain_writable() {
            self.pwr.disable_backup_domain_write_protection();
            sequence.wait_until(|| self.pwr.is_backup_domain_writable())?;
        }

        // Only the enable bit is awaited for LSE and HSI48. Nothing in the boot path needs
        // them to be stable.
        sequence.enter(Step::Lse);
        self.rcc.set_lse_drive(config.lse_drive);
        self.rcc.enable_lse_clock();
        sequence.wait_until(|| self.rcc.is_enabled_lse_clock())?;
        if !self.rcc.is_ready_lse_clock() {
            trace!("clocks: LSE enabled, not ready yet");
        }

        sequence.enter(Step::LseSys);
        self.rcc.disable_lse_sys_clock();
        sequence.wait_until(|| !self.rcc.is_enabled_lse_sys_clock())?;

        sequence.enter(Step::Hsi48);
        self.rcc.enable_hsi48_clock();
        sequence.wait_until(|| self.rcc.is_enabled_hsi48_clock())?;
        if !self.rcc.is_ready_hsi48_clock() {
            trace!("clocks: HSI48 enabled, not ready yet");
        }

        if let Some(hse) = config.hse {
            sequence.enter(Step::Hse);
            if hse.bypass {
                self.rcc.enable_hse_clock_bypass();
            }
            self.rcc.enable_hse_clock();
            sequence.wait_until(|| self.rcc.is_ready_hse_clock())?;
        }

        // SYSCLK is not the PLL at this point, so PLLON can be cleared
        sequence.enter(Step::PllStop);
        self.rcc.disable_pll_clock();
        sequence.wait_until(|| !self.rcc.is_locked_pll_clock())?;

        sequence.enter(Step::PllConfig);
        self.rcc.configure_pll_clock(&config.pll);

        sequence.enter(Step::PllLock);
        self.rcc.enable_pll_clock();
        self.rcc.enable_pll_clock_r_output();
        sequence.wait_until(|| self.rcc.is_locked_pll_clock())
    }
}
