// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Chip-specific flash code

use crate::flash::FlashLatency;
use crate::pwr::VOS;

pub trait FlashChipSpecific {
    /// Number of wait states needed to read flash at `frequency_hz` (HCLK) under `vos`.
    ///
    /// The default is the table of RM0438 (flash read access latency versus HCLK frequency),
    /// shared by the STM32L552 and STM32L562.
    fn get_number_wait_cycles_based_on_frequency_and_voltage(
        frequency_hz: usize,
        vos: VOS,
    ) -> FlashLatency {
        match vos {
            VOS::Range0 => match frequency_hz {
                0..=20_000_000 => FlashLatency::Latency0,
                20_000_001..=40_000_000 => FlashLatency::Latency1,
                40_000_001..=60_000_000 => FlashLatency::Latency2,
                60_000_001..=80_000_000 => FlashLatency::Latency3,
                80_000_001..=100_000_000 => FlashLatency::Latency4,
                _ => FlashLatency::Latency5,
            },
            VOS::Range1 => match frequency_hz {
                0..=20_000_000 => FlashLatency::Latency0,
                20_000_001..=40_000_000 => FlashLatency::Latency1,
                40_000_001..=60_000_000 => FlashLatency::Latency2,
                _ => FlashLatency::Latency3,
            },
            VOS::Range2 => match frequency_hz {
                0..=8_000_000 => FlashLatency::Latency0,
                8_000_001..=16_000_000 => FlashLatency::Latency1,
                _ => FlashLatency::Latency2,
            },
        }
    }
}
