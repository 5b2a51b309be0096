// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! STM32L552 specifications

use stm32l5xx::chip_specific::clock_constants::{PllConstants, SystemClockConstants};
use stm32l5xx::chip_specific::flash::FlashChipSpecific;

pub enum Stm32l552Specs {}

impl PllConstants for Stm32l552Specs {}

impl SystemClockConstants for Stm32l552Specs {}

impl FlashChipSpecific for Stm32l552Specs {}
