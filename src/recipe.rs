//! What gets written where.
//!
//! A `Recipe` is a list of blob writes plus an optional checksum fixup. The
//! full save injection and the quick verification patch are both just
//! recipes; the bus sequence for each comes from `Recipe::run`.

use embedded_hal::{
    blocking::delay::DelayMs,
    digital::v2::OutputPin,
};

use crate::{
    bus::{CartBus, DataBus},
    checksum::ChecksumRegion,
    consts::{
        BAG_DATA_OFFSET, PRIMARY_BANK, PRIMARY_OFFSET, TRAMPOLINE_BANK, TRAMPOLINE_OFFSET,
    },
    error::Error,
    mbc::Bank,
    programmer::check_fits,
};

/// Save content placed at `PRIMARY_OFFSET` in bank 0.
pub const PRIMARY: &[u8] = include_bytes!("../payload/primary.bin");

/// Jump stub placed at `TRAMPOLINE_OFFSET` in bank 1.
pub const TRAMPOLINE: &[u8] = include_bytes!("../payload/trampoline.bin");

/// `data` lands at `offset` bytes into the RAM window of `bank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOp {
    pub bank: u8,
    pub offset: u16,
    pub data: &'static [u8],
}

impl WriteOp {
    pub fn validate(&self) -> Result<Bank, Error> {
        let bank = Bank::new(self.bank)?;
        if self.data.is_empty() {
            return Err(Error::EmptyBlob { bank: self.bank, offset: self.offset });
        }
        check_fits(bank, self.offset, self.data.len())?;
        Ok(bank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumPatch {
    pub bank: u8,
    pub region: ChecksumRegion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub name: &'static str,
    pub writes: &'static [WriteOp],
    pub checksum: Option<ChecksumPatch>,
}

/// The full injection's writes for a given pair of payloads.
pub const fn full_writes(primary: &'static [u8], trampoline: &'static [u8]) -> [WriteOp; 3] {
    [
        WriteOp { bank: PRIMARY_BANK, offset: PRIMARY_OFFSET, data: primary },
        WriteOp { bank: TRAMPOLINE_BANK, offset: TRAMPOLINE_OFFSET, data: trampoline },
        WriteOp { bank: TRAMPOLINE_BANK, offset: BAG_DATA_OFFSET, data: &[0x01, 0x63] },
    ]
}

/// `writes` followed by a re-sign of the save in the trampoline's bank.
pub const fn full_program(writes: &'static [WriteOp]) -> Recipe {
    Recipe {
        name: "full",
        writes,
        checksum: Some(ChecksumPatch {
            bank: TRAMPOLINE_BANK,
            region: ChecksumRegion::SAVE,
        }),
    }
}

static FULL_WRITES: [WriteOp; 3] = full_writes(PRIMARY, TRAMPOLINE);

/// Inject the payload, point the bag entry at the trampoline and re-sign
/// the save.
///
/// Rejected at `run` while either payload file is still empty.
pub static FULL_PROGRAM: Recipe = full_program(&FULL_WRITES);

/// Only rewrite the bag entry, leaving the checksum stale. Used to check
/// the wiring against a cartridge whose save can be thrown away.
pub const VERIFY_PATCH: Recipe = Recipe {
    name: "verify-patch",
    writes: &[
        WriteOp { bank: TRAMPOLINE_BANK, offset: BAG_DATA_OFFSET, data: &[0x9C, 0x63] },
    ],
    checksum: None,
};

impl Recipe {
    /// Check every bank and range up front, so a bad recipe never puts a
    /// single cycle on the bus.
    pub fn validate(&self) -> Result<(), Error> {
        self.checked().map(|_| ())
    }

    /// Validate, handing back the checksum bank if there is one.
    fn checked(&self) -> Result<Option<Bank>, Error> {
        for op in self.writes {
            op.validate()?;
        }

        match &self.checksum {
            Some(patch) => {
                let bank = Bank::new(patch.bank)?;
                patch.region.validate()?;
                Ok(Some(bank))
            }
            None => Ok(None),
        }
    }

    /// Enable RAM, perform every write in order, fix up the checksum, and
    /// disable RAM again.
    ///
    /// Bank selects are only issued when the target bank changes. The
    /// checksum pass therefore reuses the bank of the last write when they
    /// match.
    pub fn run<SD, SC, OE, WR, RD, CS, D, DL>(
        &self,
        bus: &mut CartBus<SD, SC, OE, WR, RD, CS, D, DL>,
    ) -> Result<(), Error>
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
        let checksum_bank = match self.checked() {
            Ok(bank) => bank,
            Err(e) => {
                sav_log!(error, "recipe {=str} rejected: {:?}", self.name, e);
                return Err(e);
            }
        };

        sav_log!(info, "running recipe {=str}", self.name);
        bus.enable_ram();

        let mut selected: Option<Bank> = None;
        let mut select = |bus: &mut CartBus<SD, SC, OE, WR, RD, CS, D, DL>, bank: Bank| {
            if selected != Some(bank) {
                bus.select_bank(bank);
                selected = Some(bank);
            }
        };

        // Everything below was checked above. From here on nothing may
        // return early, or RAM would be left enabled.
        for op in self.writes {
            select(&mut *bus, Bank::from_checked(op.bank));
            bus.write_blob(op.offset, op.data);
        }

        if let (Some(patch), Some(bank)) = (&self.checksum, checksum_bank) {
            select(&mut *bus, bank);
            bus.patch_checksum(&patch.region);
        }

        bus.disable_ram();
        Ok(())
    }
}
