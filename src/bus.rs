use embedded_hal::{
    blocking::delay::DelayMs,
    digital::v2::OutputPin,
};

use crate::{
    consts::{ROM_SIZE, SETTLE_MS},
    shifter::AddressShifter,
};

/// Which side is driving the shared data lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Direction {
    /// We drive D0-D7 (write cycles)
    Output,
    /// The cartridge drives D0-D7 (read cycles)
    Input,
}

/// The eight bidirectional data lines, accessed as one byte.
///
/// Implementors only switch direction when asked to. Callers must put the
/// port in `Input` before sampling read cycles, and back in `Output` before
/// driving a value, so the port and the cartridge never fight over the lines.
pub trait DataBus {
    fn set_direction(&mut self, dir: Direction);
    fn drive(&mut self, value: u8);
    fn sample(&mut self) -> u8;
}

/// Address ranges with the same chip-select behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Window {
    /// 0x0000-0x7FFF: ROM and the controller's registers, decoded by the
    /// cartridge from A15 alone.
    Primary,
    /// 0x8000-0xFFFF: needs chip-select asserted.
    Extended,
}

impl Window {
    pub fn of(addr: u16) -> Self {
        if addr >= ROM_SIZE {
            Window::Extended
        } else {
            Window::Primary
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    /// Time a read/write strobe is held low
    pub settle_ms: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self { settle_ms: SETTLE_MS }
    }
}

/// Exclusive handle to the cartridge bus.
///
/// Owns every line of the bus, so holding `&mut CartBus` is the only way to
/// run a cycle. `wr`, `rd` and `cs` are active-low.
pub struct CartBus<SD, SC, OE, WR, RD, CS, D, DL> {
    shifter: AddressShifter<SD, SC, OE>,
    wr: WR,
    rd: RD,
    cs: CS,
    data: D,
    delay: DL,
    config: BusConfig,
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
    /// Take ownership of the bus and bring every line to idle.
    pub fn new(
        shifter: AddressShifter<SD, SC, OE>,
        wr: WR,
        rd: RD,
        cs: CS,
        data: D,
        delay: DL,
        config: BusConfig,
    ) -> Self {
        let mut bus = Self { shifter, wr, rd, cs, data, delay, config };

        bus.idle();
        bus.data.set_direction(Direction::Output);

        sav_log!(info, "bus up, settle {=u32}ms", bus.config.settle_ms);

        bus
    }

    pub fn set_data_direction(&mut self, dir: Direction) {
        sav_log!(debug, "data bus -> {:?}", dir);
        self.data.set_direction(dir);
    }

    pub fn read(&mut self, addr: u16) -> u8 {
        let window = self.begin(addr);

        self.rd.set_low().ok();
        self.delay.delay_ms(self.config.settle_ms);
        // Must be taken while RD is still low
        let value = self.data.sample();
        self.rd.set_high().ok();

        self.end(window);

        sav_log!(trace, "rd {=u16:X} -> {=u8:X}", addr, value);
        value
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        let window = self.begin(addr);

        self.data.drive(value);
        self.wr.set_low().ok();
        self.delay.delay_ms(self.config.settle_ms);
        self.wr.set_high().ok();

        self.end(window);

        sav_log!(trace, "wr {=u16:X} <- {=u8:X}", addr, value);
    }

    fn idle(&mut self) {
        self.wr.set_high().ok();
        self.rd.set_high().ok();
        self.cs.set_high().ok();
    }

    fn begin(&mut self, addr: u16) -> Window {
        self.idle();
        self.shifter.shift_out(addr);

        let window = Window::of(addr);
        if window == Window::Extended {
            self.cs.set_low().ok();
        }
        window
    }

    fn end(&mut self, window: Window) {
        if window == Window::Extended {
            self.cs.set_high().ok();
        }
    }
}
