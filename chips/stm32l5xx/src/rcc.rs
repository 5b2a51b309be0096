// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Reset and clock control (RCC)

use crate::clocks::config::PllConfig;
use crate::registers::{Reg, RegisterBank, RegisterId};
use crate::static_ref::StaticRef;

use tock_registers::registers::ReadWrite;
use tock_registers::{register_bitfields, register_structs};

register_structs! {
    /// Reset and clock control
    pub(crate) RccRegisters {
        /// clock control register
        (0x000 => pub(crate) cr: ReadWrite<u32, CR::Register>),
        (0x004 => _reserved0),
        /// clock configuration register
        (0x008 => pub(crate) cfgr: ReadWrite<u32, CFGR::Register>),
        /// PLL configuration register
        (0x00C => pub(crate) pllcfgr: ReadWrite<u32, PLLCFGR::Register>),
        (0x010 => _reserved1),
        /// AHB2 peripheral clock enable register
        (0x04C => pub(crate) ahb2enr: ReadWrite<u32, AHB2ENR::Register>),
        (0x050 => _reserved2),
        /// APB1 peripheral clock enable register 1
        (0x058 => pub(crate) apb1enr1: ReadWrite<u32, APB1ENR1::Register>),
        /// APB1 peripheral clock enable register 2
        (0x05C => pub(crate) apb1enr2: ReadWrite<u32, APB1ENR2::Register>),
        /// APB2 peripheral clock enable register
        (0x060 => pub(crate) apb2enr: ReadWrite<u32, APB2ENR::Register>),
        (0x064 => _reserved3),
        /// backup domain control register
        (0x090 => pub(crate) bdcr: ReadWrite<u32, BDCR::Register>),
        (0x094 => _reserved4),
        /// clock recovery RC register
        (0x098 => pub(crate) crrcr: ReadWrite<u32, CRRCR::Register>),
        (0x09C => @END),
    }
}

register_bitfields![u32,
    pub CR [
        /// PLLSAI2 clock ready flag
        PLLSAI2RDY OFFSET(29) NUMBITS(1) [],
        /// PLLSAI2 enable
        PLLSAI2ON OFFSET(28) NUMBITS(1) [],
        /// PLLSAI1 clock ready flag
        PLLSAI1RDY OFFSET(27) NUMBITS(1) [],
        /// PLLSAI1 enable
        PLLSAI1ON OFFSET(26) NUMBITS(1) [],
        /// Main PLL clock ready flag
        PLLRDY OFFSET(25) NUMBITS(1) [],
        /// Main PLL enable
        PLLON OFFSET(24) NUMBITS(1) [],
        /// Clock security system enable
        CSSON OFFSET(19) NUMBITS(1) [],
        /// HSE crystal oscillator bypass
        HSEBYP OFFSET(18) NUMBITS(1) [],
        /// HSE clock ready flag
        HSERDY OFFSET(17) NUMBITS(1) [],
        /// HSE clock enable
        HSEON OFFSET(16) NUMBITS(1) [],
        /// HSI16 automatic start from Stop
        HSIASFS OFFSET(11) NUMBITS(1) [],
        /// HSI16 clock ready flag
        HSIRDY OFFSET(10) NUMBITS(1) [],
        /// HSI16 always enable for peripheral kernels
        HSIKERON OFFSET(9) NUMBITS(1) [],
        /// HSI16 clock enable
        HSION OFFSET(8) NUMBITS(1) [],
        /// MSI clock ranges
        MSIRANGE OFFSET(4) NUMBITS(4) [],
        /// MSI clock range selection (0: range from RCC_CSR, 1: range from MSIRANGE)
        MSIRGSEL OFFSET(3) NUMBITS(1) [],
        /// MSI clock PLL enable
        MSIPLLEN OFFSET(2) NUMBITS(1) [],
        /// MSI clock ready flag
        MSIRDY OFFSET(1) NUMBITS(1) [],
        /// MSI clock enable
        MSION OFFSET(0) NUMBITS(1) []
    ],
    pub CFGR [
        /// Microcontroller clock output prescaler
        MCOPRE OFFSET(28) NUMBITS(3) [],
        /// Microcontroller clock output
        MCOSEL OFFSET(24) NUMBITS(4) [],
        /// Wakeup from Stop and CSS backup clock selection
        STOPWUCK OFFSET(15) NUMBITS(1) [],
        /// APB high-speed prescaler (APB2)
        PPRE2 OFFSET(11) NUMBITS(3) [],
        /// APB low-speed prescaler (APB1)
        PPRE1 OFFSET(8) NUMBITS(3) [],
        /// AHB prescaler
        HPRE OFFSET(4) NUMBITS(4) [],
        /// System clock switch status
        SWS OFFSET(2) NUMBITS(2) [],
        /// System clock switch
        SW OFFSET(0) NUMBITS(2) []
    ],
    pub PLLCFGR [
        /// Main PLL division factor for PLLSAI2CLK
        PLLPDIV OFFSET(27) NUMBITS(5) [],
        /// Main PLL division factor for PLLCLK (system clock)
        PLLR OFFSET(25) NUMBITS(2) [],
        /// Main PLL PLLCLK output enable
        PLLREN OFFSET(24) NUMBITS(1) [],
        /// Main PLL division factor for PLL48M1CLK
        PLLQ OFFSET(21) NUMBITS(2) [],
        /// Main PLL PLL48M1CLK output enable
        PLLQEN OFFSET(20) NUMBITS(1) [],
        /// Main PLL division factor for PLLSAI3CLK
        PLLP OFFSET(17) NUMBITS(1) [],
        /// Main PLL PLLSAI3CLK output enable
        PLLPEN OFFSET(16) NUMBITS(1) [],
        /// Main PLL multiplication factor for VCO
        PLLN OFFSET(8) NUMBITS(7) [],
        /// Division factor for the main PLL input clock (written as M - 1)
        PLLM OFFSET(4) NUMBITS(4) [],
        /// Main PLL entry clock source
        PLLSRC OFFSET(0) NUMBITS(2) []
    ],
    pub AHB2ENR [
        /// IO port H clock enable
        GPIOHEN OFFSET(7) NUMBITS(1) [],
        /// IO port G clock enable
        GPIOGEN OFFSET(6) NUMBITS(1) [],
        /// IO port F clock enable
        GPIOFEN OFFSET(5) NUMBITS(1) [],
        /// IO port E clock enable
        GPIOEEN OFFSET(4) NUMBITS(1) [],
        /// IO port D clock enable
        GPIODEN OFFSET(3) NUMBITS(1) [],
        /// IO port C clock enable
        GPIOCEN OFFSET(2) NUMBITS(1) [],
        /// IO port B clock enable
        GPIOBEN OFFSET(1) NUMBITS(1) [],
        /// IO port A clock enable
        GPIOAEN OFFSET(0) NUMBITS(1) []
    ],
    pub APB1ENR1 [
        /// Low power timer 1 clock enable
        LPTIM1EN OFFSET(31) NUMBITS(1) [],
        /// OPAMP interface clock enable
        OPAMPEN OFFSET(30) NUMBITS(1) [],
        /// DAC1 interface clock enable
        DAC1EN OFFSET(29) NUMBITS(1) [],
        /// Power interface clock enable
        PWREN OFFSET(28) NUMBITS(1) [],
        /// Clock recovery system clock enable
        CRSEN OFFSET(24) NUMBITS(1) [],
        /// I2C3 clock enable
        I2C3EN OFFSET(23) NUMBITS(1) [],
        /// I2C2 clock enable
        I2C2EN OFFSET(22) NUMBITS(1) [],
        /// I2C1 clock enable
        I2C1EN OFFSET(21) NUMBITS(1) [],
        /// UART5 clock enable
        UART5EN OFFSET(20) NUMBITS(1) [],
        /// UART4 clock enable
        UART4EN OFFSET(19) NUMBITS(1) [],
        /// USART3 clock enable
        USART3EN OFFSET(18) NUMBITS(1) [],
        /// USART2 clock enable
        USART2EN OFFSET(17) NUMBITS(1) [],
        /// SPI3 clock enable
        SPI3EN OFFSET(15) NUMBITS(1) [],
        /// SPI2 clock enable
        SPI2EN OFFSET(14) NUMBITS(1) [],
        /// Window watchdog clock enable
        WWDGEN OFFSET(11) NUMBITS(1) [],
        /// RTC APB clock enable
        RTCAPBEN OFFSET(10) NUMBITS(1) [],
        /// TIM7 timer clock enable
        TIM7EN OFFSET(5) NUMBITS(1) [],
        /// TIM6 timer clock enable
        TIM6EN OFFSET(4) NUMBITS(1) [],
        /// TIM5 timer clock enable
        TIM5EN OFFSET(3) NUMBITS(1) [],
        /// TIM4 timer clock enable
        TIM4EN OFFSET(2) NUMBITS(1) [],
        /// TIM3 timer clock enable
        TIM3EN OFFSET(1) NUMBITS(1) [],
        /// TIM2 timer clock enable
        TIM2EN OFFSET(0) NUMBITS(1) []
    ],
    pub APB1ENR2 [
        /// UCPD1 clock enable
        UCPD1EN OFFSET(23) NUMBITS(1) [],
        /// USB FS clock enable
        USBFSEN OFFSET(21) NUMBITS(1) [],
        /// FDCAN1 clock enable
        FDCAN1EN OFFSET(9) NUMBITS(1) [],
        /// LPTIM3 clock enable
        LPTIM3EN OFFSET(6) NUMBITS(1) [],
        /// LPTIM2 clock enable
        LPTIM2EN OFFSET(5) NUMBITS(1) [],
        /// I2C4 clock enable
        I2C4EN OFFSET(1) NUMBITS(1) [],
        /// Low power UART 1 clock enable
        LPUART1EN OFFSET(0) NUMBITS(1) []
    ],
    pub APB2ENR [
        /// DFSDM1 timer clock enable
        DFSDM1EN OFFSET(24) NUMBITS(1) [],
        /// SAI2 clock enable
        SAI2EN OFFSET(22) NUMBITS(1) [],
        /// SAI1 clock enable
        SAI1EN OFFSET(21) NUMBITS(1) [],
        /// TIM17 timer clock enable
        TIM17EN OFFSET(18) NUMBITS(1) [],
        /// TIM16 timer clock enable
        TIM16EN OFFSET(17) NUMBITS(1) [],
        /// TIM15 timer clock enable
        TIM15EN OFFSET(16) NUMBITS(1) [],
        /// USART1 clock enable
        USART1EN OFFSET(14) NUMBITS(1) [],
        /// TIM8 timer clock enable
        TIM8EN OFFSET(13) NUMBITS(1) [],
        /// SPI1 clock enable
        SPI1EN OFFSET(12) NUMBITS(1) [],
        /// TIM1 timer clock enable
        TIM1EN OFFSET(11) NUMBITS(1) [],
        /// SYSCFG clock enable
        SYSCFGEN OFFSET(0) NUMBITS(1) []
    ],
    pub BDCR [
        /// Backup domain software reset
        BDRST OFFSET(16) NUMBITS(1) [],
        /// RTC clock enable
        RTCEN OFFSET(15) NUMBITS(1) [],
        /// LSE system clock ready
        LSESYSRDY OFFSET(11) NUMBITS(1) [],
        /// RTC clock source selection
        RTCSEL OFFSET(8) NUMBITS(2) [],
        /// LSE system clock enable
        LSESYSEN OFFSET(7) NUMBITS(1) [],
        /// CSS on LSE failure detection
        LSECSSD OFFSET(6) NUMBITS(1) [],
        /// CSS on LSE enable
        LSECSSON OFFSET(5) NUMBITS(1) [],
        /// LSE oscillator drive capability
        LSEDRV OFFSET(3) NUMBITS(2) [],
        /// LSE oscillator bypass
        LSEBYP OFFSET(2) NUMBITS(1) [],
        /// LSE oscillator ready
        LSERDY OFFSET(1) NUMBITS(1) [],
        /// LSE oscillator enable
        LSEON OFFSET(0) NUMBITS(1) []
    ],
    pub CRRCR [
        /// HSI48 clock calibration
        HSI48CAL OFFSET(7) NUMBITS(9) [],
        /// HSI48 clock ready flag
        HSI48RDY OFFSET(1) NUMBITS(1) [],
        /// HSI48 clock enable
        HSI48ON OFFSET(0) NUMBITS(1) []
    ]
];

pub(crate) const RCC_BASE: StaticRef<RccRegisters> =
    unsafe { StaticRef::new(0x4002_1000 as *const RccRegisters) };

pub const RCC_CR: Reg<CR::Register> = Reg::new(RegisterId::RccCr);
pub const RCC_CFGR: Reg<CFGR::Register> = Reg::new(RegisterId::RccCfgr);
pub const RCC_PLLCFGR: Reg<PLLCFGR::Register> = Reg::new(RegisterId::RccPllcfgr);
pub const RCC_APB1ENR1: Reg<APB1ENR1::Register> = Reg::new(RegisterId::RccApb1enr1);
pub const RCC_BDCR: Reg<BDCR::Register> = Reg::new(RegisterId::RccBdcr);
pub const RCC_CRRCR: Reg<CRRCR::Register> = Reg::new(RegisterId::RccCrrcr);

/// MSI frequency in Hz for each MSIRANGE value
const MSI_RANGES_HZ: [usize; 12] = [
    100_000, 200_000, 400_000, 800_000, 1_000_000, 2_000_000, 4_000_000, 8_000_000, 16_000_000,
    24_000_000, 32_000_000, 48_000_000,
];

/// MSI frequency selected by RCC_CSR.MSISRANGE. That field is only written by software and this
/// crate leaves it at its reset value (range 6).
const MSI_STANDBY_RANGE_HZ: usize = 4_000_000;

/// Bus enable register holding a peripheral clock gate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnableRegister {
    AHB2ENR,
    APB1ENR1,
    APB1ENR2,
    APB2ENR,
}

impl EnableRegister {
    pub const fn register_id(self) -> RegisterId {
        match self {
            EnableRegister::AHB2ENR => RegisterId::RccAhb2enr,
            EnableRegister::APB1ENR1 => RegisterId::RccApb1enr1,
            EnableRegister::APB1ENR2 => RegisterId::RccApb1enr2,
            EnableRegister::APB2ENR => RegisterId::RccApb2enr,
        }
    }
}

/// Position of a peripheral clock enable bit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockGate {
    pub register: EnableRegister,
    pub bit: usize,
}

impl ClockGate {
    pub const fn new(register: EnableRegister, bit: usize) -> Self {
        Self { register, bit }
    }

    pub const fn mask(&self) -> u32 {
        1 << self.bit
    }
}

pub struct Rcc<'a, B: RegisterBank> {
    registers: &'a B,
}

impl<B: RegisterBank> Clone for Rcc<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: RegisterBank> Copy for Rcc<'_, B> {}

impl<'a, B: RegisterBank> Rcc<'a, B> {
    pub const fn new(registers: &'a B) -> Self {
        Self { registers }
    }

    /* Power interface clock */

    // The trailing read makes sure the enable has reached the peripheral before PWR is accessed
    pub(crate) fn enable_pwr_clock(&self) {
        self.registers.modify(RCC_APB1ENR1, APB1ENR1::PWREN::SET);
        let _ = self.registers.read(RegisterId::RccApb1enr1);
    }

    /* System clock */

    pub(crate) fn get_sys_clock_source(&self) -> SysClockSource {
        match self.registers.read_field(RCC_CFGR, CFGR::SWS) {
            0b00 => SysClockSource::MSI,
            0b01 => SysClockSource::HSI16,
            0b10 => SysClockSource::HSE,
            _ => SysClockSource::PLL,
        }
    }

    // The source must be enabled and ready.
    // NOTE: The flash latency also needs to be configured when changing the system clock frequency
    pub(crate) fn set_sys_clock_source(&self, source: SysClockSource) {
        self.registers
            .modify(RCC_CFGR, CFGR::SW.val(source as u32));
    }

    /* MSI clock */

    pub(crate) fn get_msi_frequency_hz(&self) -> usize {
        let cr = self.registers.get(RCC_CR);
        if !cr.is_set(CR::MSIRGSEL) {
            return MSI_STANDBY_RANGE_HZ;
        }
        // Values above 11 are reserved
        MSI_RANGES_HZ
            .get(cr.read(CR::MSIRANGE) as usize)
            .copied()
            .unwrap_or(MSI_STANDBY_RANGE_HZ)
    }

    /* HSI16 clock */

    pub(crate) fn enable_hsi_clock(&self) {
        self.registers.modify(RCC_CR, CR::HSION::SET);
    }

    // Indicates whether the HSI16 oscillator is stable
    pub(crate) fn is_ready_hsi_clock(&self) -> bool {
        self.registers.is_set(RCC_CR, CR::HSIRDY)
    }

    /* HSE clock */

    // Must be called before enable_hse_clock(). HSEBYP can only be written while HSE is off.
    pub(crate) fn enable_hse_clock_bypass(&self) {
        self.registers.modify(RCC_CR, CR::HSEBYP::SET);
    }

    pub(crate) fn enable_hse_clock(&self) {
        self.registers.modify(RCC_CR, CR::HSEON::SET);
    }

    pub(crate) fn is_ready_hse_clock(&self) -> bool {
        self.registers.is_set(RCC_CR, CR::HSERDY)
    }

    /* LSE clock */

    // Only writable while the backup domain write protection is disabled
    pub(crate) fn set_lse_drive(&self, drive: LseDrive) {
        self.registers
            .modify(RCC_BDCR, BDCR::LSEDRV.val(drive as u32));
    }

    pub(crate) fn enable_lse_clock(&self) {
        self.registers.modify(RCC_BDCR, BDCR::LSEON::SET);
    }

    pub(crate) fn is_enabled_lse_clock(&self) -> bool {
        self.registers.is_set(RCC_BDCR, BDCR::LSEON)
    }

    pub(crate) fn is_ready_lse_clock(&self) -> bool {
        self.registers.is_set(RCC_BDCR, BDCR::LSERDY)
    }

    pub(crate) fn disable_lse_sys_clock(&self) {
        self.registers.modify(RCC_BDCR, BDCR::LSESYSEN::CLEAR);
    }

    pub(crate) fn is_enabled_lse_sys_clock(&self) -> bool {
        self.registers.is_set(RCC_BDCR, BDCR::LSESYSEN)
    }

    /* HSI48 clock */

    pub(crate) fn enable_hsi48_clock(&self) {
        self.registers.modify(RCC_CRRCR, CRRCR::HSI48ON::SET);
    }

    pub(crate) fn is_enabled_hsi48_clock(&self) -> bool {
        self.registers.is_set(RCC_CRRCR, CRRCR::HSI48ON)
    }

    pub(crate) fn is_ready_hsi48_clock(&self) -> bool {
        self.registers.is_set(RCC_CRRCR, CRRCR::HSI48RDY)
    }

    /* Main PLL clock */

    // The main PLL clock must not be configured as the system clock.
    pub(crate) fn disable_pll_clock(&self) {
        self.registers.modify(RCC_CR, CR::PLLON::CLEAR);
    }

    pub(crate) fn enable_pll_clock(&self) {
        self.registers.modify(RCC_CR, CR::PLLON::SET);
    }

    // The PLL clock is locked when its signal is stable
    pub(crate) fn is_locked_pll_clock(&self) -> bool {
        self.registers.is_set(RCC_CR, CR::PLLRDY)
    }

    // Source, dividers and multiplier go out in a single masked write.
    // This method must be called only while the main PLL is disabled.
    pub(crate) fn configure_pll_clock(&self, config: &PllConfig) {
        self.registers.modify(
            RCC_PLLCFGR,
            PLLCFGR::PLLSRC.val(config.source as u32)
                + PLLCFGR::PLLM.val(config.m.saturating_sub(1) as u32)
                + PLLCFGR::PLLN.val(config.n as u32)
                + PLLCFGR::PLLPDIV.val(config.pdiv as u32)
                + PLLCFGR::PLLQ.val(config.q as u32)
                + PLLCFGR::PLLR.val(config.r as u32),
        );
    }

    pub(crate) fn enable_pll_clock_r_output(&self) {
        self.registers.modify(RCC_PLLCFGR, PLLCFGR::PLLREN::SET);
    }

    pub(crate) fn get_pll_clocks_source(&self) -> Option<PllSource> {
        match self.registers.read_field(RCC_PLLCFGR, PLLCFGR::PLLSRC) {
            0b01 => Some(PllSource::MSI),
            0b10 => Some(PllSource::HSI16),
            0b11 => Some(PllSource::HSE),
            _ => None,
        }
    }

    pub(crate) fn get_pll_clocks_m_divider(&self) -> usize {
        self.registers.read_field(RCC_PLLCFGR, PLLCFGR::PLLM) as usize + 1
    }

    pub(crate) fn get_pll_clock_n_multiplier(&self) -> usize {
        self.registers.read_field(RCC_PLLCFGR, PLLCFGR::PLLN) as usize
    }

    pub(crate) fn get_pll_clock_r_divider(&self) -> PLLR {
        match self.registers.read_field(RCC_PLLCFGR, PLLCFGR::PLLR) {
            0b00 => PLLR::DivideBy2,
            0b01 => PLLR::DivideBy4,
            0b10 => PLLR::DivideBy6,
            _ => PLLR::DivideBy8,
        }
    }

    /* AHB prescaler */

    pub(crate) fn set_ahb_prescaler(&self, ahb_prescaler: AHBPrescaler) {
        self.registers
            .modify(RCC_CFGR, CFGR::HPRE.val(ahb_prescaler as u32));
    }

    pub(crate) fn get_ahb_prescaler(&self) -> AHBPrescaler {
        match self.registers.read_field(RCC_CFGR, CFGR::HPRE) {
            0b1000 => AHBPrescaler::DivideBy2,
            0b1001 => AHBPrescaler::DivideBy4,
            0b1010 => AHBPrescaler::DivideBy8,
            0b1011 => AHBPrescaler::DivideBy16,
            0b1100 => AHBPrescaler::DivideBy64,
            0b1101 => AHBPrescaler::DivideBy128,
            0b1110 => AHBPrescaler::DivideBy256,
            0b1111 => AHBPrescaler::DivideBy512,
            _ => AHBPrescaler::DivideBy1,
        }
    }

    /* APB1 prescaler */

    pub(crate) fn set_apb1_prescaler(&self, apb1_prescaler: APBPrescaler) {
        self.registers
            .modify(RCC_CFGR, CFGR::PPRE1.val(apb1_prescaler as u32));
    }

    pub(crate) fn get_apb1_prescaler(&self) -> APBPrescaler {
        APBPrescaler::from_register(self.registers.read_field(RCC_CFGR, CFGR::PPRE1))
    }

    /* APB2 prescaler */

    pub(crate) fn set_apb2_prescaler(&self, apb2_prescaler: APBPrescaler) {
        self.registers
            .modify(RCC_CFGR, CFGR::PPRE2.val(apb2_prescaler as u32));
    }

    pub(crate) fn get_apb2_prescaler(&self) -> APBPrescaler {
        APBPrescaler::from_register(self.registers.read_field(RCC_CFGR, CFGR::PPRE2))
    }

    /* Peripheral clocks */

    pub(crate) fn is_enabled_peripheral_clock(&self, gate: ClockGate) -> bool {
        self.registers.read(gate.register.register_id()) & gate.mask() != 0
    }

    pub(crate) fn enable_peripheral_clock(&self, gate: ClockGate) {
        let id = gate.register.register_id();
        self.registers.write(id, self.registers.read(id) | gate.mask());
    }

    pub(crate) fn disable_peripheral_clock(&self, gate: ClockGate) {
        let id = gate.register.register_id();
        self.registers.write(id, self.registers.read(id) & !gate.mask());
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SysClockSource {
    MSI = 0b00,
    HSI16 = 0b01,
    HSE = 0b10,
    PLL = 0b11,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PllSource {
    MSI = 0b01,
    HSI16 = 0b10,
    HSE = 0b11,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PLLQ {
    DivideBy2 = 0b00,
    DivideBy4 = 0b01,
    DivideBy6 = 0b10,
    DivideBy8 = 0b11,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PLLR {
    DivideBy2 = 0b00,
    DivideBy4 = 0b01,
    DivideBy6 = 0b10,
    DivideBy8 = 0b11,
}

impl PLLR {
    pub const fn divider(self) -> usize {
        match self {
            PLLR::DivideBy2 => 2,
            PLLR::DivideBy4 => 4,
            PLLR::DivideBy6 => 6,
            PLLR::DivideBy8 => 8,
        }
    }
}

impl From<PLLR> for usize {
    fn from(item: PLLR) -> Self {
        item.divider()
    }
}

/// LSE oscillator drive capability
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LseDrive {
    Low = 0b00,
    MediumLow = 0b01,
    MediumHigh = 0b10,
    High = 0b11,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AHBPrescaler {
    DivideBy1 = 0b0000,
    DivideBy2 = 0b1000,
    DivideBy4 = 0b1001,
    DivideBy8 = 0b1010,
    DivideBy16 = 0b1011,
    DivideBy64 = 0b1100,
    DivideBy128 = 0b1101,
    DivideBy256 = 0b1110,
    DivideBy512 = 0b1111,
}

impl AHBPrescaler {
    pub const fn divider(self) -> usize {
        match self {
            AHBPrescaler::DivideBy1 => 1,
            AHBPrescaler::DivideBy2 => 2,
            AHBPrescaler::DivideBy4 => 4,
            AHBPrescaler::DivideBy8 => 8,
            AHBPrescaler::DivideBy16 => 16,
            AHBPrescaler::DivideBy64 => 64,
            AHBPrescaler::DivideBy128 => 128,
            AHBPrescaler::DivideBy256 => 256,
            AHBPrescaler::DivideBy512 => 512,
        }
    }
}

impl From<AHBPrescaler> for usize {
    fn from(item: AHBPrescaler) -> usize {
        item.divider()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum APBPrescaler {
    DivideBy1 = 0b000, // No division
    DivideBy2 = 0b100,
    DivideBy4 = 0b101,
    DivideBy8 = 0b110,
    DivideBy16 = 0b111,
}

impl APBPrescaler {
    fn from_register(value: u32) -> Self {
        match value {
            0b100 => APBPrescaler::DivideBy2,
            0b101 => APBPrescaler::DivideBy4,
            0b110 => APBPrescaler::DivideBy8,
            0b111 => APBPrescaler::DivideBy16,
            _ => APBPrescaler::DivideBy1, // 0b0xx means no division
        }
    }

    pub const fn divider(self) -> usize {
        match self {
            APBPrescaler::DivideBy1 => 1,
            APBPrescaler::DivideBy2 => 2,
            APBPrescaler::DivideBy4 => 4,
            APBPrescaler::DivideBy8 => 8,
            APBPrescaler::DivideBy16 => 16,
        }
    }
}

impl From<APBPrescaler> for usize {
    fn from(item: APBPrescaler) -> Self {
        item.divider()
    }
}
