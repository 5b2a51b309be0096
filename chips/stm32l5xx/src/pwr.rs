// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

use crate::registers::{Reg, RegisterBank, RegisterId};
use crate::static_ref::StaticRef;

use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs};

register_structs! {
    /// Power control
    pub(crate) PwrRegisters {
        /// Power control register 1
        (0x000 => pub(crate) cr1: ReadWrite<u32, CR1::Register>),
        (0x004 => _reserved0),
        /// Power status register 2
        (0x014 => pub(crate) sr2: ReadOnly<u32, SR2::Register>),
        (0x018 => @END),
    }
}

register_bitfields![u32,
    pub CR1 [
        /// Low-power run
        LPR OFFSET(14) NUMBITS(1) [],
        /// Voltage scaling range selection
        VOS OFFSET(9) NUMBITS(2) [
            Range0 = 0b00,
            Range1 = 0b01,
            Range2 = 0b10
        ],
        /// Disable backup domain write protection
        DBP OFFSET(8) NUMBITS(1) [],
        /// Low-power mode selection
        LPMS OFFSET(0) NUMBITS(3) []
    ],
    pub SR2 [
        /// Voltage scaling flag (1: VOS change ongoing)
        VOSF OFFSET(10) NUMBITS(1) []
    ]
];

pub(crate) const PWR_BASE: StaticRef<PwrRegisters> =
    unsafe { StaticRef::new(0x4000_7000 as *const PwrRegisters) };

pub const PWR_CR1: Reg<CR1::Register> = Reg::new(RegisterId::PwrCr1);
pub const PWR_SR2: Reg<SR2::Register> = Reg::new(RegisterId::PwrSr2);

/// Voltage scaling range. Each range caps the system clock frequency.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VOS {
    /// Up to 110MHz
    Range0 = 0b00,
    /// Up to 80MHz
    Range1 = 0b01,
    /// Up to 26MHz
    Range2 = 0b10,
}

pub struct Pwr<'a, B: RegisterBank> {
    registers: &'a B,
}

impl<B: RegisterBank> Clone for Pwr<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: RegisterBank> Copy for Pwr<'_, B> {}

impl<'a, B: RegisterBank> Pwr<'a, B> {
    pub const fn new(registers: &'a B) -> Self {
        Self { registers }
    }

    // The power interface clock must be enabled. The read back makes sure the new range has been
    // latched before the caller starts polling VOSF.
    pub(crate) fn set_voltage_range(&self, vos: VOS) {
        self.registers.modify(PWR_CR1, CR1::VOS.val(vos as u32));
        let _ = self.registers.read(RegisterId::PwrCr1);
    }

    pub(crate) fn get_vos(&self) -> VOS {
        match self.registers.read_field(PWR_CR1, CR1::VOS) {
            0b00 => VOS::Range0,
            0b01 => VOS::Range1,
            // 0b11 is reserved and behaves as the reset value
            _ => VOS::Range2,
        }
    }

    pub(crate) fn is_vos_ready(&self) -> bool {
        !self.registers.is_set(PWR_SR2, SR2::VOSF)
    }

    pub(crate) fn disable_backup_domain_write_protection(&self) {
        self.registers.modify(PWR_CR1, CR1::DBP::SET);
    }

    pub(crate) fn is_backup_domain_writable(&self) -> bool {
        self.registers.is_set(PWR_CR1, CR1::DBP)
    }
}
