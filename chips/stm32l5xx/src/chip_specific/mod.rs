// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! This module contains all chip-specific code.
//!
//! The STM32L5 models share the same clock tree, but each chip crate states the limits it
//! operates under. This module provides the traits a chip crate implements to describe them.

pub mod chip_specs;
pub mod clock_constants;
pub mod flash;

pub use chip_specs::ChipSpecs;
