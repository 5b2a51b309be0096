// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

pub mod clocks;
pub mod config;
pub mod osc;

pub use crate::clocks::clocks::{Clocks, Step, Stm32l5Clocks};
pub use crate::clocks::config::{ClockConfig, HseConfig, PllConfig};
