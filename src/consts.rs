//! Protocol constants of the cartridge and its save layout.
//!
//! These are fixed by the target hardware and the game's save format. They
//! are NOT tunables: changing any of them produces a save the game rejects.

/// Writing `ENABLE_RAM` here unlocks external RAM, anything else locks it.
pub const ENABLE_RAM_ADDR: u16 = 0x0000;
pub const ENABLE_RAM: u8 = 0x0A;
pub const DISABLE_RAM: u8 = 0x00;

/// Writing a bank index here maps that bank into the RAM window.
pub const RAM_BANK_SELECT: u16 = 0x4000;

/// First address of the extended window. Cycles at or above this need
/// chip-select asserted.
pub const ROM_SIZE: u16 = 0x8000;

pub const RAM_OFFSET: u16 = 0xA000;
pub const RAM_BANK_SIZE: u16 = 0x2000;
pub const NUM_BANKS: u8 = 4;

// Checksum layout, relative to RAM_OFFSET. The checksum byte sits directly
// after the summed region.
pub const CHECKSTART_OFFSET: u16 = 0x598;
pub const CHECKSUM_OFFSET: u16 = 0x1523;
pub const CHECKSUM_INIT: u8 = 255;

// Payload placement, relative to RAM_OFFSET
pub const PRIMARY_OFFSET: u16 = 0x20;
pub const PRIMARY_BANK: u8 = 0;
pub const TRAMPOLINE_OFFSET: u16 = 0x10C0;
pub const TRAMPOLINE_BANK: u8 = 1;
pub const BAG_DATA_OFFSET: u16 = 0x5C9;

/// How long a strobe is held before the cartridge is assumed to have latched.
pub const SETTLE_MS: u32 = 20;

pub const BLINK_ON_MS: u32 = 250;
pub const BLINK_OFF_MS: u32 = 500;
