// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Clock bring-up and peripheral clock gating for the STM32L5xx family.
//!
//! STM32L552: <https://www.st.com/en/microcontrollers-microprocessors/stm32l5-series.html>
//!
//! The crate is split the same way the reference manual (RM0438) splits the hardware:
//!
//! + [rcc], [pwr] and [flash] describe the register blocks involved in clock configuration
//! + [registers] abstracts the access to those blocks, so the bring-up logic runs both on the
//!   real memory map and on a simulated register file
//! + [clocks] contains the bring-up sequence and the clock frequency queries
//! + [phclk] contains the peripheral clock gate table used by peripheral drivers

#![no_std]

#[cfg(test)]
extern crate std;

pub mod chip_specific;
pub mod clocks;
pub mod errorcode;
pub mod flash;
pub mod phclk;
pub mod pwr;
pub mod rcc;
pub mod registers;
pub mod static_ref;

#[cfg(test)]
mod sim;

pub use crate::errorcode::ErrorCode;
