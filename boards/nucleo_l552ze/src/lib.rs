// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Clock setup for the NUCLEO-L552ZE-Q board.
//!
//! - <https://www.st.com/en/evaluation-tools/nucleo-l552ze-q.html>
//!
//! The board has no HSE crystal fitted and a 32.768kHz LSE crystal. The system clock runs from
//! MSI through the main PLL at 110MHz.

#![no_std]

use log::debug;

use stm32l552ze::clocks::{ClockConfig, Clocks, PllConfig};
use stm32l552ze::peripherals::Stm32l552zeDefaultPeripherals;
use stm32l552ze::pwr::VOS;
use stm32l552ze::rcc::{AHBPrescaler, APBPrescaler, LseDrive, PllSource, PLLQ, PLLR};
use stm32l552ze::registers::{Mmio, RegisterBank, WaitPolicy};
use stm32l552ze::ErrorCode;

/// Clock tree after bring-up: MSI 4MHz / 1 * 55 / 2 = 110MHz, no bus division
pub const CLOCK_CONFIG: ClockConfig = ClockConfig {
    vos: VOS::Range0,
    pll: PllConfig {
        source: PllSource::MSI,
        m: 1,
        n: 55,
        pdiv: 7,
        q: PLLQ::DivideBy2,
        r: PLLR::DivideBy2,
    },
    ahb_prescaler: AHBPrescaler::DivideBy1,
    apb1_prescaler: APBPrescaler::DivideBy1,
    apb2_prescaler: APBPrescaler::DivideBy1,
    lse_drive: LseDrive::Low,
    hse: None,
};

/// Scheduler tick rate
pub const TICK_RATE_HZ: usize = 1000;

pub const SYS_CLOCK_FREQUENCY_HZ: usize = CLOCK_CONFIG.sys_clock_frequency_hz();

/// Kernel clock of TIM15 and TIM16 (APB2 timers)
pub const TIMER_FREQUENCY_HZ: usize = CLOCK_CONFIG.apb2_timer_frequency_hz();

/// TIM15 reload value for one scheduler tick
pub const TICK_RELOAD: usize = TIMER_FREQUENCY_HZ / TICK_RATE_HZ;

/// Bring the clock tree up and open the clock gates of the kernel peripherals.
///
/// Returns the system clock frequency read back from the RCC registers.
pub fn setup_clocks<B: RegisterBank>(registers: &B, wait: WaitPolicy) -> Result<usize, ErrorCode> {
    let clocks = Clocks::new(registers, CLOCK_CONFIG)?.with_wait_policy(wait);
    clocks.init()?;

    let peripherals = Stm32l552zeDefaultPeripherals::new(&clocks);
    peripherals.enable_clocks();

    debug!(
        "nucleo_l552ze: console clock {}Hz, tick timer clock {}Hz",
        peripherals.lpuart1_clock.get_frequency_hz(),
        peripherals.tim15_clock.get_frequency_hz()
    );
    Ok(clocks.get_sys_clock_frequency_hz())
}

/// Clock initialization for the board.
///
/// # Safety
///
/// Takes ownership of the RCC, PWR and FLASH register blocks. Must be called once, before any
/// other code touches them.
pub unsafe fn init() -> Result<usize, ErrorCode> {
    let registers = Mmio::new();
    setup_clocks(&registers, WaitPolicy::Forever)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use stm32l552ze::chip_specs::Stm32l552Specs;
    use stm32l552ze::pwr::SR2;
    use stm32l552ze::rcc::{APB1ENR1, APB1ENR2, APB2ENR, CFGR, CR};
    use stm32l552ze::registers::RegisterId;

    #[test]
    fn board_clock_tree() {
        assert_eq!(Ok(()), CLOCK_CONFIG.validate::<Stm32l552Specs>());
        assert_eq!(ClockConfig::MSI_PLL_110_MHZ, CLOCK_CONFIG);
        assert_eq!(110_000_000, SYS_CLOCK_FREQUENCY_HZ);
        assert_eq!(110_000_000, TIMER_FREQUENCY_HZ);
        assert_eq!(110_000, TICK_RELOAD);
    }

    /// Register file where every oscillator is ready as soon as it is enabled and SWS follows
    /// SW immediately
    struct InstantRegisters {
        values: Cell<[u32; RegisterId::COUNT]>,
    }

    impl InstantRegisters {
        fn new() -> Self {
            let mut values = [0; RegisterId::COUNT];
            values[RegisterId::RccCr.index()] = 0x0000_0063;
            values[RegisterId::PwrCr1.index()] = 0x0000_0400;
            Self {
                values: Cell::new(values),
            }
        }
    }

    // Copy the bit at `from` into the bit at `to`
    fn echo(value: u32, from: usize, to: usize) -> u32 {
        (value & !(1 << to)) | (((value >> from) & 1) << to)
    }

    impl RegisterBank for InstantRegisters {
        fn read(&self, id: RegisterId) -> u32 {
            self.values.get()[id.index()]
        }

        fn write(&self, id: RegisterId, value: u32) {
            let value = match id {
                RegisterId::RccCr => {
                    let value = echo(value, CR::MSION.shift, CR::MSIRDY.shift);
                    let value = echo(value, CR::HSION.shift, CR::HSIRDY.shift);
                    let value = echo(value, CR::HSEON.shift, CR::HSERDY.shift);
                    echo(value, CR::PLLON.shift, CR::PLLRDY.shift)
                }
                RegisterId::RccCfgr => {
                    (value & !(0b11 << CFGR::SWS.shift)) | (CFGR::SW.read(value) << CFGR::SWS.shift)
                }
                RegisterId::PwrSr2 => return,
                _ => value,
            };
            let mut values = self.values.get();
            values[id.index()] = value;
            self.values.set(values);
        }
    }

    #[test]
    fn setup_opens_kernel_peripheral_clocks() {
        let registers = InstantRegisters::new();
        assert_eq!(
            Ok(110_000_000),
            setup_clocks(&registers, WaitPolicy::Bounded(100))
        );

        let apb1enr2 = registers.read(RegisterId::RccApb1enr2);
        assert!(APB1ENR2::LPUART1EN.is_set(apb1enr2));
        let apb2enr = registers.read(RegisterId::RccApb2enr);
        assert!(APB2ENR::TIM15EN.is_set(apb2enr));
        assert!(APB2ENR::TIM16EN.is_set(apb2enr));
        assert_eq!(0, registers.read(RegisterId::RccApb1enr1) & !(1 << APB1ENR1::PWREN.shift));
    }

    #[test]
    fn setup_reports_a_stalled_bring_up() {
        // Nothing ever becomes ready: the voltage scaling flag is the first wait
        struct DeadRegisters;

        impl RegisterBank for DeadRegisters {
            fn read(&self, id: RegisterId) -> u32 {
                match id {
                    RegisterId::PwrSr2 => 1 << SR2::VOSF.shift,
                    _ => 0,
                }
            }

            fn write(&self, _id: RegisterId, _value: u32) {}
        }

        assert_eq!(
            Err(ErrorCode::BUSY),
            setup_clocks(&DeadRegisters, WaitPolicy::Bounded(10))
        );
    }
}
