// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! STM32L552 Clocks

use crate::chip_specs::Stm32l552Specs;

pub use stm32l5xx::clocks::{ClockConfig, HseConfig, PllConfig, Step, Stm32l5Clocks};

/// STM32L552 Clocks
pub type Clocks<'a, B> = stm32l5xx::clocks::Clocks<'a, B, Stm32l552Specs>;
