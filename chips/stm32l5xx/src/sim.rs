// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Simulated RCC, PWR and FLASH registers for host tests
//!
//! The register file starts from the reset values of the STM32L552 and models the hardware
//! reactions the clock drivers rely on:
//!
//! + oscillator ready flags follow their enable bits (the PLL locks after a few polls)
//! + `SWS` follows `SW` once the requested source is ready
//! + `VOSF` is raised by a voltage range change and drops after one poll
//! + backup domain writes are dropped while `DBP` is clear
//!
//! Every write is logged and checked against the limits and ordering rules of the reference
//! manual. Broken rules are collected as [Violation]s instead of panicking, so a test can
//! inspect them all.

use crate::chip_specific::clock_constants::{PllConstants, SystemClockConstants};
use crate::chip_specific::flash::FlashChipSpecific;
use crate::flash::ACR;
use crate::pwr::{CR1, SR2, VOS};
use crate::rcc::{BDCR, CFGR, CR, CRRCR, PLLCFGR};
use crate::registers::{RegisterBank, RegisterId};

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use tock_registers::LocalRegisterCopy;

/// Chip limits used by the tests: the family defaults
pub(crate) enum TestSpecs {}

impl PllConstants for TestSpecs {}

impl SystemClockConstants for TestSpecs {}

impl FlashChipSpecific for TestSpecs {}

/// Number of CR reads after PLLON before PLLRDY rises
const PLL_LOCK_POLLS: usize = 3;

const RESET_RCC_CR: u32 = 0x0000_0063;
const RESET_RCC_PLLCFGR: u32 = 0x0000_1000;
const RESET_PWR_CR1: u32 = 0x0000_0400;

const PLL_CONFIGURATION_MASK: u32 = PLLCFGR::PLLPDIV.mask << PLLCFGR::PLLPDIV.shift
    | PLLCFGR::PLLR.mask << PLLCFGR::PLLR.shift
    | PLLCFGR::PLLQ.mask << PLLCFGR::PLLQ.shift
    | PLLCFGR::PLLP.mask << PLLCFGR::PLLP.shift
    | PLLCFGR::PLLN.mask << PLLCFGR::PLLN.shift
    | PLLCFGR::PLLM.mask << PLLCFGR::PLLM.shift
    | PLLCFGR::PLLSRC.mask << PLLCFGR::PLLSRC.shift;

const SWS_PLL: u32 = 0b11;
const HPRE_DIV512: u32 = 0b1111;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Violation {
    /// PLL source, dividers or multiplier changed while PLLON is set
    PllConfiguredWhileOn,
    /// PLLON cleared while the PLL drives SYSCLK
    PllStoppedWhileSysclk,
    /// Flash latency below what the HCLK of that moment requires
    FlashLatencyTooLow { hclk_hz: usize, latency: u32 },
    /// AHB prescaler left /512 before SWS reported the PLL
    AhbRestoredBeforeSwitch,
    /// SYSCLK above the limit of the voltage range of that moment
    SysClockAboveRangeLimit { sysclk_hz: usize, vos: u32 },
}

pub(crate) struct SimulatedRegisters {
    values: RefCell<[u32; RegisterId::COUNT]>,
    writes: RefCell<Vec<(RegisterId, u32)>>,
    violations: RefCell<Vec<Violation>>,
    pll_lock_countdown: Cell<usize>,
    sws_reported_pll: Cell<bool>,
    ahb_at_switch: Cell<Option<u32>>,
    pll_never_locks: bool,
    switch_never_completes: bool,
    lse_never_ready: bool,
    hse_frequency_hz: usize,
}

impl SimulatedRegisters {
    pub(crate) fn new() -> Self {
        let mut values = [0; RegisterId::COUNT];
        values[RegisterId::RccCr.index()] = RESET_RCC_CR;
        values[RegisterId::RccPllcfgr.index()] = RESET_RCC_PLLCFGR;
        values[RegisterId::PwrCr1.index()] = RESET_PWR_CR1;
        Self {
            values: RefCell::new(values),
            writes: RefCell::new(Vec::new()),
            violations: RefCell::new(Vec::new()),
            pll_lock_countdown: Cell::new(0),
            sws_reported_pll: Cell::new(false),
            ahb_at_switch: Cell::new(None),
            pll_never_locks: false,
            switch_never_completes: false,
            lse_never_ready: false,
            hse_frequency_hz: 0,
        }
    }

    pub(crate) fn with_pll_never_locking(mut self) -> Self {
        self.pll_never_locks = true;
        self
    }

    pub(crate) fn with_switch_never_completing(mut self) -> Self {
        self.switch_never_completes = true;
        self
    }

    pub(crate) fn with_lse_never_ready(mut self) -> Self {
        self.lse_never_ready = true;
        self
    }

    /// Fit an HSE oscillator. Without one HSERDY never rises.
    pub(crate) fn with_hse(mut self, frequency_hz: usize) -> Self {
        self.hse_frequency_hz = frequency_hz;
        self
    }

    /// Store a raw value, bypassing the hardware model and the write log
    pub(crate) fn preset(&self, id: RegisterId, value: u32) {
        self.values.borrow_mut()[id.index()] = value;
    }

    /// Read a raw value without any side effect
    pub(crate) fn peek(&self, id: RegisterId) -> u32 {
        self.values.borrow()[id.index()]
    }

    pub(crate) fn snapshot(&self) -> [u32; RegisterId::COUNT] {
        *self.values.borrow()
    }

    pub(crate) fn writes(&self) -> Vec<(RegisterId, u32)> {
        self.writes.borrow().clone()
    }

    pub(crate) fn writes_to(&self, id: RegisterId) -> Vec<u32> {
        self.writes
            .borrow()
            .iter()
            .filter(|(register, _)| *register == id)
            .map(|(_, value)| *value)
            .collect()
    }

    /// Index in the write log of the first write to `id` matching `predicate`
    pub(crate) fn first_write(
        &self,
        id: RegisterId,
        predicate: impl Fn(u32) -> bool,
    ) -> Option<usize> {
        self.writes
            .borrow()
            .iter()
            .position(|&(register, value)| register == id && predicate(value))
    }

    pub(crate) fn violations(&self) -> Vec<Violation> {
        self.violations.borrow().clone()
    }

    /// HPRE value written together with the switch of SW to the PLL
    pub(crate) fn ahb_at_switch(&self) -> Option<u32> {
        self.ahb_at_switch.get()
    }

    fn violation(&self, violation: Violation) {
        self.violations.borrow_mut().push(violation);
    }

    fn cr(&self) -> LocalRegisterCopy<u32, CR::Register> {
        LocalRegisterCopy::new(self.peek(RegisterId::RccCr))
    }

    fn is_source_ready(&self, sw: u32) -> bool {
        let cr = self.cr();
        match sw {
            0b00 => cr.is_set(CR::MSIRDY),
            0b01 => cr.is_set(CR::HSIRDY),
            0b10 => cr.is_set(CR::HSERDY),
            _ => cr.is_set(CR::PLLRDY),
        }
    }

    fn read_cr(&self) -> u32 {
        let mut cr = self.cr();
        if cr.is_set(CR::PLLON) && !cr.is_set(CR::PLLRDY) && !self.pll_never_locks {
            let remaining = self.pll_lock_countdown.get().saturating_sub(1);
            self.pll_lock_countdown.set(remaining);
            if remaining == 0 {
                cr.modify(CR::PLLRDY::SET);
                self.preset(RegisterId::RccCr, cr.get());
            }
        }
        cr.get()
    }

    fn write_cr(&self, value: u32) -> u32 {
        let previous = self.cr();
        let mut cr = LocalRegisterCopy::<u32, CR::Register>::new(value);
        cr.modify(CR::MSIRDY.val(cr.read(CR::MSION)));
        cr.modify(CR::HSIRDY.val(cr.read(CR::HSION)));
        let hse_ready = cr.is_set(CR::HSEON) && self.hse_frequency_hz != 0;
        cr.modify(CR::HSERDY.val(hse_ready as u32));

        if !cr.is_set(CR::PLLON) {
            if previous.is_set(CR::PLLON) && self.sws() == SWS_PLL {
                self.violation(Violation::PllStoppedWhileSysclk);
            }
            cr.modify(CR::PLLRDY::CLEAR);
        } else if !previous.is_set(CR::PLLON) {
            cr.modify(CR::PLLRDY::CLEAR);
            self.pll_lock_countdown.set(PLL_LOCK_POLLS);
        } else {
            cr.modify(CR::PLLRDY.val(previous.read(CR::PLLRDY)));
        }
        cr.get()
    }

    fn sws(&self) -> u32 {
        CFGR::SWS.read(self.peek(RegisterId::RccCfgr))
    }

    fn read_cfgr(&self) -> u32 {
        let cfgr = self.peek(RegisterId::RccCfgr);
        if CFGR::SWS.read(cfgr) == SWS_PLL {
            self.sws_reported_pll.set(true);
        }
        cfgr
    }

    fn write_cfgr(&self, value: u32) -> u32 {
        let previous =
            LocalRegisterCopy::<u32, CFGR::Register>::new(self.peek(RegisterId::RccCfgr));
        let mut cfgr = LocalRegisterCopy::<u32, CFGR::Register>::new(value);
        let requested = cfgr.read(CFGR::SW);

        if requested == SWS_PLL && previous.read(CFGR::SW) != SWS_PLL {
            self.ahb_at_switch.set(Some(cfgr.read(CFGR::HPRE)));
            self.sws_reported_pll.set(false);
        }

        if requested == SWS_PLL
            && previous.read(CFGR::HPRE) == HPRE_DIV512
            && cfgr.read(CFGR::HPRE) != HPRE_DIV512
            && !self.sws_reported_pll.get()
        {
            self.violation(Violation::AhbRestoredBeforeSwitch);
        }

        let sws = if self.is_source_ready(requested) && !self.switch_never_completes {
            requested
        } else {
            previous.read(CFGR::SWS)
        };
        cfgr.modify(CFGR::SWS.val(sws));
        cfgr.get()
    }

    fn write_bdcr(&self, value: u32) -> Option<u32> {
        if !CR1::DBP.is_set(self.peek(RegisterId::PwrCr1)) {
            return None;
        }
        let mut bdcr = LocalRegisterCopy::<u32, BDCR::Register>::new(value);
        let lse_ready = bdcr.is_set(BDCR::LSEON) && !self.lse_never_ready;
        bdcr.modify(BDCR::LSERDY.val(lse_ready as u32));
        bdcr.modify(BDCR::LSESYSRDY.val(bdcr.read(BDCR::LSESYSEN)));
        Some(bdcr.get())
    }

    fn write_cr1(&self, value: u32) -> u32 {
        if CR1::VOS.read(value) != CR1::VOS.read(self.peek(RegisterId::PwrCr1)) {
            let sr2 = self.peek(RegisterId::PwrSr2);
            self.preset(RegisterId::PwrSr2, sr2 | SR2::VOSF::SET.value);
        }
        value
    }

    fn read_sr2(&self) -> u32 {
        let sr2 = self.peek(RegisterId::PwrSr2);
        self.preset(RegisterId::PwrSr2, sr2 & !SR2::VOSF::SET.value);
        sr2
    }

    fn sys_clock_frequency_hz(&self) -> usize {
        match self.sws() {
            0b00 => 4_000_000,
            0b01 => 16_000_000,
            0b10 => self.hse_frequency_hz,
            _ => {
                let pllcfgr = self.peek(RegisterId::RccPllcfgr);
                let source = match PLLCFGR::PLLSRC.read(pllcfgr) {
                    0b01 => 4_000_000,
                    0b10 => 16_000_000,
                    0b11 => self.hse_frequency_hz,
                    _ => 0,
                };
                let m = PLLCFGR::PLLM.read(pllcfgr) as usize + 1;
                let n = PLLCFGR::PLLN.read(pllcfgr) as usize;
                let r = (PLLCFGR::PLLR.read(pllcfgr) as usize + 1) * 2;
                source / m * n / r
            }
        }
    }

    fn hclk_hz(&self) -> usize {
        let hpre = CFGR::HPRE.read(self.peek(RegisterId::RccCfgr)) as usize;
        let divider = if hpre < 0b1000 {
            1
        } else {
            [2, 4, 8, 16, 64, 128, 256, 512][hpre - 0b1000]
        };
        self.sys_clock_frequency_hz() / divider
    }

    fn check_limits(&self) {
        let vos = CR1::VOS.read(self.peek(RegisterId::PwrCr1));

        let sysclk_hz = self.sys_clock_frequency_hz();
        if sysclk_hz > sys_clock_limit_hz(vos) {
            self.violation(Violation::SysClockAboveRangeLimit { sysclk_hz, vos });
        }

        let hclk_hz = self.hclk_hz();
        let latency = ACR::LATENCY.read(self.peek(RegisterId::FlashAcr));
        if latency < required_latency(hclk_hz, vos) {
            self.violation(Violation::FlashLatencyTooLow { hclk_hz, latency });
        }
    }
}

fn sys_clock_limit_hz(vos: u32) -> usize {
    let range = match vos {
        0b00 => VOS::Range0,
        0b01 => VOS::Range1,
        _ => VOS::Range2,
    };
    TestSpecs::sys_clock_frequency_limit_hz(range)
}

/// Wait states for an HCLK frequency, from the upper frequency bound of each wait state
pub(crate) fn required_latency(hclk_hz: usize, vos: u32) -> u32 {
    let bounds: &[usize] = match vos {
        0b00 => &[20_000_000, 40_000_000, 60_000_000, 80_000_000, 100_000_000, 110_000_000],
        0b01 => &[20_000_000, 40_000_000, 60_000_000, 80_000_000],
        _ => &[8_000_000, 16_000_000, 26_000_000],
    };
    bounds
        .iter()
        .position(|&bound| hclk_hz <= bound)
        .unwrap_or(bounds.len()) as u32
}

impl RegisterBank for SimulatedRegisters {
    fn read(&self, id: RegisterId) -> u32 {
        match id {
            RegisterId::RccCr => self.read_cr(),
            RegisterId::RccCfgr => self.read_cfgr(),
            RegisterId::PwrSr2 => self.read_sr2(),
            _ => self.peek(id),
        }
    }

    fn write(&self, id: RegisterId, value: u32) {
        let value = match id {
            RegisterId::RccCr => self.write_cr(value),
            RegisterId::RccCfgr => self.write_cfgr(value),
            RegisterId::RccPllcfgr => {
                // Output enables may change at any time, the dividers only while stopped
                let changed = value ^ self.peek(RegisterId::RccPllcfgr);
                if self.cr().is_set(CR::PLLON) && changed & PLL_CONFIGURATION_MASK != 0 {
                    self.violation(Violation::PllConfiguredWhileOn);
                }
                value
            }
            RegisterId::RccBdcr => match self.write_bdcr(value) {
                Some(value) => value,
                None => return,
            },
            RegisterId::RccCrrcr => {
                let mut crrcr = LocalRegisterCopy::<u32, CRRCR::Register>::new(value);
                crrcr.modify(CRRCR::HSI48RDY.val(crrcr.read(CRRCR::HSI48ON)));
                crrcr.get()
            }
            RegisterId::PwrCr1 => self.write_cr1(value),
            RegisterId::PwrSr2 => return,
            _ => value,
        };
        self.preset(id, value);
        self.writes.borrow_mut().push((id, value));
        self.check_limits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_oracle_bounds() {
        assert_eq!(0, required_latency(4_000_000, 0b00));
        assert_eq!(5, required_latency(110_000_000, 0b00));
        assert_eq!(4, required_latency(100_000_000, 0b00));
        assert_eq!(3, required_latency(80_000_000, 0b01));
        assert_eq!(2, required_latency(26_000_000, 0b10));
        assert_eq!(1, required_latency(8_000_001, 0b10));
    }

    #[test]
    fn pll_locks_after_a_few_polls() {
        let registers = SimulatedRegisters::new();
        registers.write(RegisterId::RccCr, RESET_RCC_CR | CR::PLLON::SET.value);
        let mut polls = 0;
        while !CR::PLLRDY.is_set(registers.read(RegisterId::RccCr)) {
            polls += 1;
            assert!(polls < 10);
        }
        assert_eq!(PLL_LOCK_POLLS - 1, polls);
    }

    #[test]
    fn pll_dividers_are_locked_while_running() {
        let registers = SimulatedRegisters::new();
        registers.write(RegisterId::RccCr, RESET_RCC_CR | CR::PLLON::SET.value);

        let pllcfgr = registers.peek(RegisterId::RccPllcfgr);
        registers.write(RegisterId::RccPllcfgr, pllcfgr | PLLCFGR::PLLREN::SET.value);
        assert!(registers.violations().is_empty());

        registers.write(RegisterId::RccPllcfgr, PLLCFGR::PLLN.val(40).value);
        assert_eq!(std::vec![Violation::PllConfiguredWhileOn], registers.violations());
    }

    #[test]
    fn voltage_range_bounds_the_system_clock() {
        let registers = SimulatedRegisters::new();
        registers.preset(
            RegisterId::RccCr,
            RESET_RCC_CR | CR::PLLON::SET.value | CR::PLLRDY::SET.value,
        );
        registers.preset(
            RegisterId::RccPllcfgr,
            (PLLCFGR::PLLSRC.val(0b01) + PLLCFGR::PLLN.val(55) + PLLCFGR::PLLREN::SET).value,
        );
        registers.preset(RegisterId::RccCfgr, (CFGR::SW.val(0b11) + CFGR::SWS.val(0b11)).value);
        registers.preset(RegisterId::PwrCr1, CR1::VOS::Range0.value);
        registers.preset(RegisterId::FlashAcr, 5);

        registers.write(RegisterId::PwrCr1, CR1::VOS::Range1.value);
        assert_eq!(
            std::vec![Violation::SysClockAboveRangeLimit {
                sysclk_hz: 110_000_000,
                vos: 0b01
            }],
            registers.violations()
        );
    }

    #[test]
    fn backup_domain_is_write_protected() {
        let registers = SimulatedRegisters::new();
        registers.write(RegisterId::RccBdcr, BDCR::LSEON::SET.value);
        assert_eq!(0, registers.peek(RegisterId::RccBdcr));

        registers.write(RegisterId::PwrCr1, RESET_PWR_CR1 | CR1::DBP::SET.value);
        registers.write(RegisterId::RccBdcr, BDCR::LSEON::SET.value);
        assert!(BDCR::LSERDY.is_set(registers.peek(RegisterId::RccBdcr)));
    }
}
