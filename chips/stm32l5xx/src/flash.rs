// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! STM32L5xx flash access control
//!
//! Only the part of the flash interface involved in clock configuration is covered: the number
//! of wait states the CPU inserts when reading flash.
//!
//! # Missing features
//!
//! - [ ] Flash programming and erase
//! - [ ] Option bytes
//! - [ ] Power-down modes
//!
//! # Usage
//!
//! Flash latency depends on the HCLK frequency and the voltage range. It is updated by
//! [crate::clocks::Clocks] whenever the system clock frequency changes:
//!
//! + before a frequency increase, the latency is raised
//! + after a frequency decrease, the latency is lowered
//!
//! ```rust,ignore
//! let latency = clocks.flash().get_latency();
//! log::debug!("Current flash latency is {:?}", latency);
//! ```

use crate::registers::{Reg, RegisterBank, RegisterId, WaitPolicy};
use crate::static_ref::StaticRef;
use crate::ErrorCode;

use tock_registers::registers::ReadWrite;
use tock_registers::{register_bitfields, register_structs};

register_structs! {
    pub(crate) FlashRegisters {
        /// Flash access control register
        (0x000 => pub(crate) acr: ReadWrite<u32, ACR::Register>),
        (0x004 => @END),
    }
}

register_bitfields![u32,
    pub ACR [
        /// Flash low-voltage mode enable
        LVEN OFFSET(15) NUMBITS(1) [],
        /// Flash power-down mode during Sleep or Low-power sleep mode
        SLEEP_PD OFFSET(14) NUMBITS(1) [],
        /// Flash power-down mode during Low-power run mode
        RUN_PD OFFSET(13) NUMBITS(1) [],
        /// Latency (number of wait states)
        LATENCY OFFSET(0) NUMBITS(4) []
    ]
];

pub(crate) const FLASH_BASE: StaticRef<FlashRegisters> =
    unsafe { StaticRef::new(0x4002_2000 as *const FlashRegisters) };

pub const FLASH_ACR: Reg<ACR::Register> = Reg::new(RegisterId::FlashAcr);

/// Number of flash wait states
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FlashLatency {
    Latency0 = 0,
    Latency1 = 1,
    Latency2 = 2,
    Latency3 = 3,
    Latency4 = 4,
    Latency5 = 5,
    Latency6 = 6,
    Latency7 = 7,
    Latency8 = 8,
    Latency9 = 9,
    Latency10 = 10,
    Latency11 = 11,
    Latency12 = 12,
    Latency13 = 13,
    Latency14 = 14,
    Latency15 = 15,
}

impl FlashLatency {
    fn from_register(value: u32) -> Self {
        match value {
            0 => FlashLatency::Latency0,
            1 => FlashLatency::Latency1,
            2 => FlashLatency::Latency2,
            3 => FlashLatency::Latency3,
            4 => FlashLatency::Latency4,
            5 => FlashLatency::Latency5,
            6 => FlashLatency::Latency6,
            7 => FlashLatency::Latency7,
            8 => FlashLatency::Latency8,
            9 => FlashLatency::Latency9,
            10 => FlashLatency::Latency10,
            11 => FlashLatency::Latency11,
            12 => FlashLatency::Latency12,
            13 => FlashLatency::Latency13,
            14 => FlashLatency::Latency14,
            // The field is 4 bits wide
            _ => FlashLatency::Latency15,
        }
    }
}

impl From<FlashLatency> for usize {
    fn from(item: FlashLatency) -> Self {
        item as usize
    }
}

pub struct Flash<'a, B: RegisterBank> {
    registers: &'a B,
}

impl<B: RegisterBank> Clone for Flash<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: RegisterBank> Copy for Flash<'_, B> {}

impl<'a, B: RegisterBank> Flash<'a, B> {
    pub const fn new(registers: &'a B) -> Self {
        Self { registers }
    }

    pub fn get_latency(&self) -> FlashLatency {
        FlashLatency::from_register(self.registers.read_field(FLASH_ACR, ACR::LATENCY))
    }

    // NOTE: This method is pub(crate) to prevent modifying the flash latency from board files.
    // Flash latency is dependent on the system clock frequency. The clock sequencer changes it
    // when appropriate.
    //
    // The new value must be observed in ACR before the clock frequency changes, hence the
    // read back.
    pub(crate) fn set_latency(
        &self,
        latency: FlashLatency,
        wait: WaitPolicy,
    ) -> Result<(), ErrorCode> {
        self.registers
            .modify(FLASH_ACR, ACR::LATENCY.val(latency as u32));
        wait.wait_until(|| self.get_latency() == latency)
    }
}
