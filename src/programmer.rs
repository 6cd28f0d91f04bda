use embedded_hal::{
    blocking::delay::DelayMs,
    digital::v2::OutputPin,
};

use crate::{
    bus::{CartBus, DataBus},
    consts::{RAM_BANK_SIZE, RAM_OFFSET},
    error::Error,
    mbc::Bank,
};

/// Check that `len` bytes starting at `offset` stay inside one bank.
pub fn check_fits(bank: Bank, offset: u16, len: usize) -> Result<(), Error> {
    let end = usize::from(offset).checked_add(len);

    match end {
        Some(end) if end <= usize::from(RAM_BANK_SIZE) => Ok(()),
        _ => Err(Error::BlobOverflow { bank: bank.index(), offset, len }),
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
    /// Select `bank`, then write `blob` into it starting at `offset` bytes
    /// into the RAM window.
    ///
    /// Nothing is written if the blob would run off the end of the bank.
    pub fn program_blob(&mut self, bank: Bank, offset: u16, blob: &[u8]) -> Result<(), Error> {
        check_fits(bank, offset, blob.len())?;

        self.select_bank(bank);
        self.write_blob(offset, blob);
        Ok(())
    }

    /// Write `blob` into whichever bank is currently selected, one cycle per
    /// byte at ascending addresses. Callers must have run `check_fits`.
    pub(crate) fn write_blob(&mut self, offset: u16, blob: &[u8]) {
        sav_log!(info, "blob @{=u16:X}, {=usize} bytes", offset, blob.len());

        let base = RAM_OFFSET + offset;
        for (i, byte) in blob.iter().enumerate() {
            self.write(base + i as u16, *byte);
        }
    }
}
