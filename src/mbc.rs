//! Register writes understood by the cartridge's memory bank controller.
//!
//! Each operation here is exactly one write cycle into the primary window.

use embedded_hal::{
    blocking::delay::DelayMs,
    digital::v2::OutputPin,
};

use crate::{
    bus::{CartBus, DataBus},
    consts::{DISABLE_RAM, ENABLE_RAM, ENABLE_RAM_ADDR, NUM_BANKS, RAM_BANK_SELECT},
    error::Error,
};

/// A RAM bank index that is known to exist on the cartridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct Bank(u8);

impl Bank {
    pub const fn new(idx: u8) -> Result<Self, Error> {
        if idx < NUM_BANKS {
            Ok(Bank(idx))
        } else {
            Err(Error::BankOutOfRange { bank: idx })
        }
    }

    /// For indices that already went through `Bank::new`.
    pub(crate) const fn from_checked(idx: u8) -> Self {
        Bank(idx)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

impl<SD, SC, OE, WR, RD, CS, D, DL> CartBus<SD, SC, OE, WR, RD, CS, D, DL>
where
    SD: OutputPin,
    SC: OutputPin,
    OE: OutputPin,
    WR: OutputPin,
    RD: OutputPin,
    CS: OutputPin,
    D: DataBus,
    DL: DelayMs<u32>,
{
    pub fn enable_ram(&mut self) {
        sav_log!(info, "RAM enable");
        self.write(ENABLE_RAM_ADDR, ENABLE_RAM);
    }

    pub fn disable_ram(&mut self) {
        sav_log!(info, "RAM disable");
        self.write(ENABLE_RAM_ADDR, DISABLE_RAM);
    }

    /// Map `bank` into the RAM window. Until this is called, what the
    /// window shows is whatever the controller powered up with.
    pub fn select_bank(&mut self, bank: Bank) {
        sav_log!(debug, "select bank {=u8}", bank.index());
        self.write(RAM_BANK_SELECT, bank.index());
    }
}
