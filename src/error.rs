/// Problems with a programming plan, caught before the bus is touched.
///
/// Bus cycles themselves cannot fail: there is no ack, parity or timeout on
/// the cartridge bus, so nothing here describes a hardware fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Error {
    BankOutOfRange { bank: u8 },
    BlobOverflow { bank: u8, offset: u16, len: usize },
    /// A payload that was never filled in. Writing the rest of the recipe
    /// around it would leave a valid-looking save pointing at nothing.
    EmptyBlob { bank: u8, offset: u16 },
    BadChecksumRange { start: u16, end: u16, write_offset: u16 },
}
