// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Access to the registers involved in clock configuration.
//!
//! Drivers in this crate never dereference the register blocks themselves. They go through a
//! [RegisterBank], which only knows how to read and write a whole 32-bit register identified by
//! [RegisterId]. Field access is layered on top with `tock-registers` bitfields: a register is
//! read into a [LocalRegisterCopy], modified with a [FieldValue] and written back in one access.
//!
//! [Mmio] is the bank backed by the memory-mapped RCC, PWR and FLASH blocks. Host tests use a
//! simulated register file with the same field layout.

use crate::flash::{FlashRegisters, FLASH_BASE};
use crate::pwr::{PwrRegisters, PWR_BASE};
use crate::rcc::{RccRegisters, RCC_BASE};
use crate::static_ref::StaticRef;
use crate::ErrorCode;

use core::marker::PhantomData;

use tock_registers::fields::{Field, FieldValue};
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::{LocalRegisterCopy, RegisterLongName};

/// Every register the clock drivers touch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterId {
    RccCr,
    RccCfgr,
    RccPllcfgr,
    RccAhb2enr,
    RccApb1enr1,
    RccApb1enr2,
    RccApb2enr,
    RccBdcr,
    RccCrrcr,
    PwrCr1,
    PwrSr2,
    FlashAcr,
}

impl RegisterId {
    pub const COUNT: usize = 12;

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Typed handle of a register: its identity plus the bitfield layout it follows
pub struct Reg<R: RegisterLongName> {
    id: RegisterId,
    _layout: PhantomData<R>,
}

impl<R: RegisterLongName> Reg<R> {
    pub const fn new(id: RegisterId) -> Self {
        Self {
            id,
            _layout: PhantomData,
        }
    }

    pub const fn id(&self) -> RegisterId {
        self.id
    }
}

impl<R: RegisterLongName> Clone for Reg<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: RegisterLongName> Copy for Reg<R> {}

/// Raw register access plus field helpers built on it
///
/// Implementors only provide [RegisterBank::read] and [RegisterBank::write]. Each helper
/// performs at most one read and one write of the underlying register, so a field update is a
/// single masked read-modify-write.
pub trait RegisterBank {
    fn read(&self, id: RegisterId) -> u32;

    fn write(&self, id: RegisterId, value: u32);

    fn get<R: RegisterLongName>(&self, reg: Reg<R>) -> LocalRegisterCopy<u32, R> {
        LocalRegisterCopy::new(self.read(reg.id()))
    }

    fn read_field<R: RegisterLongName>(&self, reg: Reg<R>, field: Field<u32, R>) -> u32 {
        self.get(reg).read(field)
    }

    fn is_set<R: RegisterLongName>(&self, reg: Reg<R>, field: Field<u32, R>) -> bool {
        self.get(reg).is_set(field)
    }

    fn modify<R: RegisterLongName>(&self, reg: Reg<R>, value: FieldValue<u32, R>) {
        let mut copy = self.get(reg);
        copy.modify(value);
        self.write(reg.id(), copy.get());
    }
}

/// How long to spin on a hardware-ready condition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitPolicy {
    /// Spin until the condition holds. Used on real hardware: a clock that never becomes ready
    /// is a hardware fault and there is nothing better to do than hang.
    Forever,
    /// Give up after the given number of polls.
    Bounded(usize),
}

impl WaitPolicy {
    /// Poll `condition` until it returns true.
    ///
    /// # Errors
    ///
    /// + [Err]\([ErrorCode::BUSY]\): the condition did not hold within the bound.
    pub fn wait_until<F: FnMut() -> bool>(self, mut condition: F) -> Result<(), ErrorCode> {
        match self {
            WaitPolicy::Forever => {
                while !condition() {
                    core::hint::spin_loop();
                }
                Ok(())
            }
            WaitPolicy::Bounded(polls) => {
                for _ in 0..polls {
                    if condition() {
                        return Ok(());
                    }
                    core::hint::spin_loop();
                }
                Err(ErrorCode::BUSY)
            }
        }
    }
}

/// Register bank backed by the memory-mapped RCC, PWR and FLASH blocks
pub struct Mmio {
    rcc: StaticRef<RccRegisters>,
    pwr: StaticRef<PwrRegisters>,
    flash: StaticRef<FlashRegisters>,
}

impl Mmio {
    /// ## Safety
    ///
    /// There must be only one register bank driving the clock tree. The drivers perform
    /// non-atomic read-modify-write sequences.
    pub const unsafe fn new() -> Self {
        Self {
            rcc: RCC_BASE,
            pwr: PWR_BASE,
            flash: FLASH_BASE,
        }
    }
}

impl RegisterBank for Mmio {
    fn read(&self, id: RegisterId) -> u32 {
        match id {
            RegisterId::RccCr => self.rcc.cr.get(),
            RegisterId::RccCfgr => self.rcc.cfgr.get(),
            RegisterId::RccPllcfgr => self.rcc.pllcfgr.get(),
            RegisterId::RccAhb2enr => self.rcc.ahb2enr.get(),
            RegisterId::RccApb1enr1 => self.rcc.apb1enr1.get(),
            RegisterId::RccApb1enr2 => self.rcc.apb1enr2.get(),
            RegisterId::RccApb2enr => self.rcc.apb2enr.get(),
            RegisterId::RccBdcr => self.rcc.bdcr.get(),
            RegisterId::RccCrrcr => self.rcc.crrcr.get(),
            RegisterId::PwrCr1 => self.pwr.cr1.get(),
            RegisterId::PwrSr2 => self.pwr.sr2.get(),
            RegisterId::FlashAcr => self.flash.acr.get(),
        }
    }

    fn write(&self, id: RegisterId, value: u32) {
        match id {
            RegisterId::RccCr => self.rcc.cr.set(value),
            RegisterId::RccCfgr => self.rcc.cfgr.set(value),
            RegisterId::RccPllcfgr => self.rcc.pllcfgr.set(value),
            RegisterId::RccAhb2enr => self.rcc.ahb2enr.set(value),
            RegisterId::RccApb1enr1 => self.rcc.apb1enr1.set(value),
            RegisterId::RccApb1enr2 => self.rcc.apb1enr2.set(value),
            RegisterId::RccApb2enr => self.rcc.apb2enr.set(value),
            RegisterId::RccBdcr => self.rcc.bdcr.set(value),
            RegisterId::RccCrrcr => self.rcc.crrcr.set(value),
            RegisterId::PwrCr1 => self.pwr.cr1.set(value),
            // Status register, read-only
            RegisterId::PwrSr2 => {}
            RegisterId::FlashAcr => self.flash.acr.set(value),
        }
    }
}
