use embedded_hal::digital::v2::OutputPin;

/// A 16 bit serial-in, parallel-out shift register (two chained '595s)
/// driving the cartridge address lines.
///
/// `oe` is the register's active-low output enable. It is held high while
/// bits are clocked in so half-shifted addresses never reach the bus.
pub struct AddressShifter<DATA, CLK, OE> {
    data: DATA,
    clk: CLK,
    oe: OE,
}

impl<DATA, CLK, OE> AddressShifter<DATA, CLK, OE>
where
    DATA: OutputPin,
    CLK: OutputPin,
    OE: OutputPin,
{
    /// Takes the pins and parks them: data and clock low, outputs disabled.
    pub fn new(mut data: DATA, mut clk: CLK, mut oe: OE) -> Self {
        data.set_low().ok();
        clk.set_low().ok();
        oe.set_high().ok();

        Self { data, clk, oe }
    }

    /// Clock `value` out LSB first, then enable the outputs.
    pub fn shift_out(&mut self, value: u16) {
        self.oe.set_high().ok();

        for i in 0..16 {
            if (value >> i) & 1 == 0 {
                self.data.set_low().ok();
            } else {
                self.data.set_high().ok();
            }
            self.clk.set_high().ok();
            self.clk.set_low().ok();
        }

        self.oe.set_low().ok();
    }
}
