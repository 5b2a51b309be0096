// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Target clock tree description
//!
//! A [ClockConfig] is a compile-time description of the clock tree the board wants after
//! bring-up. Every frequency it implies can be computed in a `const` context, so boards can
//! publish timer frequencies as constants.

use crate::chip_specific::ChipSpecs as ChipSpecsTrait;
use crate::pwr::VOS;
use crate::rcc::{AHBPrescaler, APBPrescaler, LseDrive, PllSource, PLLQ, PLLR};
use crate::ErrorCode;

/// MSI frequency after reset (range 6)
pub const MSI_FREQUENCY_HZ: usize = 4_000_000;
/// HSI16 frequency
pub const HSI16_FREQUENCY_HZ: usize = 16_000_000;

/// Main PLL settings
///
/// PLLCLK = source / m * n / r
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PllConfig {
    pub source: PllSource,
    /// Input divider, 1 to 16
    pub m: usize,
    /// VCO multiplier, 8 to 86
    pub n: usize,
    /// PLLSAI3CLK divider, 2 to 31
    pub pdiv: usize,
    pub q: PLLQ,
    pub r: PLLR,
}

/// External high speed oscillator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HseConfig {
    pub frequency_hz: usize,
    /// Set when an external clock drives OSC_IN instead of a crystal
    pub bypass: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    pub vos: VOS,
    pub pll: PllConfig,
    pub ahb_prescaler: AHBPrescaler,
    pub apb1_prescaler: APBPrescaler,
    pub apb2_prescaler: APBPrescaler,
    pub lse_drive: LseDrive,
    pub hse: Option<HseConfig>,
}

impl ClockConfig {
    /// MSI at 4MHz through the PLL: 110MHz system clock, voltage range 0, no bus division.
    pub const MSI_PLL_110_MHZ: ClockConfig = ClockConfig {
        vos: VOS::Range0,
        pll: PllConfig {
            source: PllSource::MSI,
            m: 1,
            n: 55,
            pdiv: 7,
            q: PLLQ::DivideBy2,
            r: PLLR::DivideBy2,
        },
        ahb_prescaler: AHBPrescaler::DivideBy1,
        apb1_prescaler: APBPrescaler::DivideBy1,
        apb2_prescaler: APBPrescaler::DivideBy1,
        lse_drive: LseDrive::Low,
        hse: None,
    };

    /// Frequency entering the PLL, before the M divider. 0 when the source is HSE but no HSE is
    /// described.
    pub const fn pll_source_frequency_hz(&self) -> usize {
        match self.pll.source {
            PllSource::MSI => MSI_FREQUENCY_HZ,
            PllSource::HSI16 => HSI16_FREQUENCY_HZ,
            PllSource::HSE => match self.hse {
                Some(hse) => hse.frequency_hz,
                None => 0,
            },
        }
    }

    pub const fn vco_input_frequency_hz(&self) -> usize {
        if self.pll.m == 0 {
            return 0;
        }
        self.pll_source_frequency_hz() / self.pll.m
    }

    pub const fn vco_output_frequency_hz(&self) -> usize {
        self.vco_input_frequency_hz() * self.pll.n
    }

    pub const fn sys_clock_frequency_hz(&self) -> usize {
        self.vco_output_frequency_hz() / self.pll.r.divider()
    }

    pub const fn ahb_frequency_hz(&self) -> usize {
        self.sys_clock_frequency_hz() / self.ahb_prescaler.divider()
    }

    pub const fn apb1_frequency_hz(&self) -> usize {
        self.ahb_frequency_hz() / self.apb1_prescaler.divider()
    }

    pub const fn apb2_frequency_hz(&self) -> usize {
        self.ahb_frequency_hz() / self.apb2_prescaler.divider()
    }

    /// Clock of the timers on APB1
    pub const fn apb1_timer_frequency_hz(&self) -> usize {
        timer_frequency_hz(self.apb1_frequency_hz(), self.apb1_prescaler)
    }

    /// Clock of the timers on APB2
    pub const fn apb2_timer_frequency_hz(&self) -> usize {
        timer_frequency_hz(self.apb2_frequency_hz(), self.apb2_prescaler)
    }

    /// Check the configuration against the limits of the chip.
    ///
    /// # Errors
    ///
    /// + [Err]\([ErrorCode::INVAL]\): a divider is out of range, the PLL source is HSE without
    /// an HSE description, or a resulting frequency violates a chip limit.
    pub fn validate<ChipSpecs: ChipSpecsTrait>(&self) -> Result<(), ErrorCode> {
        let pll = &self.pll;
        if pll.m < ChipSpecs::PLLM_MIN
            || pll.m > ChipSpecs::PLLM_MAX
            || pll.n < ChipSpecs::PLLN_MIN
            || pll.n > ChipSpecs::PLLN_MAX
            || pll.pdiv < ChipSpecs::PLLPDIV_MIN
            || pll.pdiv > ChipSpecs::PLLPDIV_MAX
        {
            return Err(ErrorCode::INVAL);
        }

        if let Some(hse) = self.hse {
            if hse.frequency_hz < ChipSpecs::HSE_FREQUENCY_MIN_HZ
                || hse.frequency_hz > ChipSpecs::HSE_FREQUENCY_MAX_HZ
            {
                return Err(ErrorCode::INVAL);
            }
        } else if pll.source == PllSource::HSE {
            return Err(ErrorCode::INVAL);
        }

        let vco_input = self.vco_input_frequency_hz();
        if vco_input < ChipSpecs::VCO_INPUT_MIN_HZ || vco_input > ChipSpecs::VCO_INPUT_MAX_HZ {
            return Err(ErrorCode::INVAL);
        }

        let vco_output = self.vco_output_frequency_hz();
        if vco_output < ChipSpecs::VCO_OUTPUT_MIN_HZ || vco_output > ChipSpecs::VCO_OUTPUT_MAX_HZ
        {
            return Err(ErrorCode::INVAL);
        }

        if self.sys_clock_frequency_hz() > ChipSpecs::sys_clock_frequency_limit_hz(self.vos) {
            return Err(ErrorCode::INVAL);
        }

        if self.apb1_frequency_hz() > ChipSpecs::APB1_FREQUENCY_LIMIT_HZ
            || self.apb2_frequency_hz() > ChipSpecs::APB2_FREQUENCY_LIMIT_HZ
        {
            return Err(ErrorCode::INVAL);
        }

        Ok(())
    }
}

/// Timers run at PCLK when the APB prescaler is 1 and at twice PCLK otherwise (RM0438 clock
/// tree).
pub const fn timer_frequency_hz(pclk_hz: usize, prescaler: APBPrescaler) -> usize {
    match prescaler {
        APBPrescaler::DivideBy1 => pclk_hz,
        _ => pclk_hz * 2,
    }
}
