// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Clock-related constants for a particular chip

use crate::pwr::VOS;

/// PLL-related constants for a specific chip
pub trait PllConstants {
    /// Minimum VCO input frequency (after the M divider) in Hz
    const VCO_INPUT_MIN_HZ: usize = 4_000_000;
    /// Maximum VCO input frequency (after the M divider) in Hz
    const VCO_INPUT_MAX_HZ: usize = 16_000_000;
    /// Minimum VCO output frequency in Hz
    const VCO_OUTPUT_MIN_HZ: usize = 64_000_000;
    /// Maximum VCO output frequency in Hz
    const VCO_OUTPUT_MAX_HZ: usize = 344_000_000;
    const PLLM_MIN: usize = 1;
    const PLLM_MAX: usize = 16;
    const PLLN_MIN: usize = 8;
    const PLLN_MAX: usize = 86;
    const PLLPDIV_MIN: usize = 2;
    const PLLPDIV_MAX: usize = 31;
}

/// Generic clock constants for a specific chip
pub trait SystemClockConstants {
    /// Maximum allowed APB1 frequency in Hz
    const APB1_FREQUENCY_LIMIT_HZ: usize = 110_000_000;
    /// Maximum allowed APB2 frequency in Hz
    const APB2_FREQUENCY_LIMIT_HZ: usize = 110_000_000;
    /// Accepted HSE crystal or external clock frequencies in Hz
    const HSE_FREQUENCY_MIN_HZ: usize = 4_000_000;
    const HSE_FREQUENCY_MAX_HZ: usize = 48_000_000;

    /// Maximum allowed system clock frequency in Hz for a voltage range
    fn sys_clock_frequency_limit_hz(vos: VOS) -> usize {
        match vos {
            VOS::Range0 => 110_000_000,
            VOS::Range1 => 80_000_000,
            VOS::Range2 => 26_000_000,
        }
    }
}

/// Clock constants for a specific chip
pub trait ClockConstants: SystemClockConstants + PllConstants {}

impl<T: SystemClockConstants + PllConstants> ClockConstants for T {}
