//! The save-integrity byte the game checks on load.
//!
//! The game accepts a save only if the byte at `CHECKSUM_OFFSET` equals 255
//! minus the sum of every byte in `[CHECKSTART_OFFSET, CHECKSUM_OFFSET)`,
//! mod 256. Anything we write inside that range has to be followed by a
//! fresh checksum.

use core::ops::Range;

use embedded_hal::{
    blocking::delay::DelayMs,
    digital::v2::OutputPin,
};

use crate::{
    bus::{CartBus, DataBus, Direction},
    consts::{CHECKSTART_OFFSET, CHECKSUM_INIT, CHECKSUM_OFFSET, RAM_BANK_SIZE, RAM_OFFSET},
    error::Error,
    mbc::Bank,
};

/// Where the checksum is summed and stored, relative to the RAM window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumRegion {
    pub range: Range<u16>,
    pub write_offset: u16,
    pub init: u8,
}

impl ChecksumRegion {
    pub const SAVE: ChecksumRegion = ChecksumRegion {
        range: CHECKSTART_OFFSET..CHECKSUM_OFFSET,
        write_offset: CHECKSUM_OFFSET,
        init: CHECKSUM_INIT,
    };

    pub fn validate(&self) -> Result<(), Error> {
        let ok = self.range.start <= self.range.end
            && self.range.end <= RAM_BANK_SIZE
            && self.write_offset < RAM_BANK_SIZE;

        if ok {
            Ok(())
        } else {
            Err(Error::BadChecksumRange {
                start: self.range.start,
                end: self.range.end,
                write_offset: self.write_offset,
            })
        }
    }
}

/// Subtract every byte from `init`, wrapping.
pub fn fold<I: IntoIterator<Item = u8>>(init: u8, bytes: I) -> u8 {
    bytes.into_iter().fold(init, |acc, b| acc.wrapping_sub(b))
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
    /// Select `bank`, recompute the checksum over `region` and store it.
    /// Returns the value written.
    pub fn compute_and_write_checksum(
        &mut self,
        bank: Bank,
        region: &ChecksumRegion,
    ) -> Result<u8, Error> {
        region.validate()?;

        self.select_bank(bank);
        Ok(self.patch_checksum(region))
    }

    /// Same as `compute_and_write_checksum`, against whichever bank is
    /// already selected. Callers must have validated `region`.
    pub(crate) fn patch_checksum(&mut self, region: &ChecksumRegion) -> u8 {
        // Only the reads run with the port released. The final write needs
        // it driving again.
        self.set_data_direction(Direction::Input);
        let bytes = region.range.clone().map(|offset| self.read(RAM_OFFSET + offset));
        let checksum = fold(region.init, bytes);
        self.set_data_direction(Direction::Output);

        sav_log!(info, "checksum {=u8:X} -> @{=u16:X}", checksum, region.write_offset);
        self.write(RAM_OFFSET + region.write_offset, checksum);

        checksum
    }
}
