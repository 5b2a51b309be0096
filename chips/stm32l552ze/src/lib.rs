// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

#![no_std]

pub use stm32l5xx::{errorcode, flash, phclk, pwr, rcc, registers, ErrorCode};

pub mod chip_specs;
pub mod clocks;
pub mod peripherals;
