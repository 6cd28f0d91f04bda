//! A cartridge on the other end of the mock pins.
//!
//! Every pin handle feeds the same `Cart`, which reacts to edges the way the
//! real hardware does: the '595 shifts on a rising clock and presents its
//! value when /OE falls, the bank controller latches register writes on a
//! falling /WR, and RAM answers a falling /RD when /CS is low.

#![allow(dead_code)]

use std::{cell::RefCell, convert::Infallible, rc::Rc};

use embedded_hal::{blocking::delay::DelayMs, digital::v2::OutputPin};
use gb_sav_writer::{
    bus::{BusConfig, CartBus, DataBus, Direction},
    shifter::AddressShifter,
    status::{BlinkConfig, StatusLed},
};

pub const BANK_SIZE: usize = 0x2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    ShiftData,
    ShiftClk,
    ShiftOe,
    Wr,
    Rd,
    Cs,
    Led,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Pin(Line, bool),
    Drive(u8),
    Direction(Direction),
    Sample(u8),
    Delay(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Write { addr: u16, value: u8 },
    Read { addr: u16, value: u8 },
}

pub struct Cart {
    pub events: Vec<Event>,
    pub cycles: Vec<Cycle>,
    pub ram: Vec<[u8; BANK_SIZE]>,
    pub ram_enabled: bool,
    pub bank: u8,
    levels: [bool; 7],
    shift: u16,
    latched: u16,
    driven: u8,
    answer: Option<u8>,
    direction: Direction,
}

pub type Shared = Rc<RefCell<Cart>>;

impl Cart {
    fn new() -> Self {
        Cart {
            events: Vec::new(),
            cycles: Vec::new(),
            ram: vec![[0u8; BANK_SIZE]; 4],
            ram_enabled: false,
            bank: 0,
            levels: [false; 7],
            shift: 0,
            latched: 0,
            driven: 0,
            answer: None,
            direction: Direction::Output,
        }
    }

    pub fn level(&self, line: Line) -> bool {
        self.levels[line as usize]
    }

    /// The address currently presented by the shift register.
    pub fn address(&self) -> u16 {
        self.latched
    }

    pub fn clear_log(&mut self) {
        self.events.clear();
        self.cycles.clear();
    }

    pub fn writes(&self) -> Vec<(u16, u8)> {
        self.cycles
            .iter()
            .filter_map(|c| match *c {
                Cycle::Write { addr, value } => Some((addr, value)),
                _ => None,
            })
            .collect()
    }

    pub fn reads(&self) -> Vec<(u16, u8)> {
        self.cycles
            .iter()
            .filter_map(|c| match *c {
                Cycle::Read { addr, value } => Some((addr, value)),
                _ => None,
            })
            .collect()
    }

    fn ram_slot(&self, addr: u16) -> Option<usize> {
        let selected = !self.level(Line::Cs);
        if selected && self.ram_enabled && (0xA000..0xC000).contains(&addr) {
            Some(usize::from(addr - 0xA000))
        } else {
            None
        }
    }

    fn set(&mut self, line: Line, level: bool) {
        self.events.push(Event::Pin(line, level));

        let prev = self.level(line);
        self.levels[line as usize] = level;

        let rising = !prev && level;
        let falling = prev && !level;

        match line {
            Line::ShiftClk if rising => {
                let bit = u16::from(self.level(Line::ShiftData));
                self.shift = (self.shift >> 1) | (bit << 15);
            }
            Line::ShiftOe if falling => {
                self.latched = self.shift;
            }
            Line::Wr if falling => self.on_write(),
            Line::Rd if falling => {
                self.answer = Some(match self.ram_slot(self.latched) {
                    Some(idx) => self.ram[usize::from(self.bank)][idx],
                    None => 0xFF,
                });
            }
            Line::Rd if rising => {
                self.answer = None;
            }
            _ => {}
        }
    }

    fn on_write(&mut self) {
        assert_eq!(self.direction, Direction::Output, "write cycle with the port released");

        let addr = self.latched;
        let value = self.driven;
        self.cycles.push(Cycle::Write { addr, value });

        match addr {
            0x0000..=0x1FFF => self.ram_enabled = value & 0x0F == 0x0A,
            0x4000..=0x5FFF => self.bank = value & 0x03,
            _ => {
                if let Some(idx) = self.ram_slot(addr) {
                    self.ram[usize::from(self.bank)][idx] = value;
                }
            }
        }
    }
}

pub struct Pin {
    cart: Shared,
    line: Line,
}

impl OutputPin for Pin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.cart.borrow_mut().set(self.line, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.cart.borrow_mut().set(self.line, true);
        Ok(())
    }
}

pub struct Data(Shared);

impl DataBus for Data {
    fn set_direction(&mut self, dir: Direction) {
        let mut cart = self.0.borrow_mut();
        cart.events.push(Event::Direction(dir));
        cart.direction = dir;
    }

    fn drive(&mut self, value: u8) {
        let mut cart = self.0.borrow_mut();
        assert_eq!(cart.direction, Direction::Output, "driving a released port");
        cart.events.push(Event::Drive(value));
        cart.driven = value;
    }

    fn sample(&mut self) -> u8 {
        let mut cart = self.0.borrow_mut();
        assert_eq!(cart.direction, Direction::Input, "sampling while driving");
        let value = cart.answer.expect("sampled with /RD high");
        let addr = cart.latched;
        cart.events.push(Event::Sample(value));
        cart.cycles.push(Cycle::Read { addr, value });
        value
    }
}

pub struct Delay(Shared);

impl DelayMs<u32> for Delay {
    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().events.push(Event::Delay(ms));
    }
}

pub type MockShifter = AddressShifter<Pin, Pin, Pin>;
pub type MockBus = CartBus<Pin, Pin, Pin, Pin, Pin, Pin, Data, Delay>;
pub type MockLed = StatusLed<Pin, Delay>;

pub fn cart() -> Shared {
    Rc::new(RefCell::new(Cart::new()))
}

pub fn pin(cart: &Shared, line: Line) -> Pin {
    Pin { cart: cart.clone(), line }
}

pub fn shifter(cart: &Shared) -> MockShifter {
    AddressShifter::new(
        pin(cart, Line::ShiftData),
        pin(cart, Line::ShiftClk),
        pin(cart, Line::ShiftOe),
    )
}

pub fn bus_with(cart: &Shared, config: BusConfig) -> MockBus {
    CartBus::new(
        shifter(cart),
        pin(cart, Line::Wr),
        pin(cart, Line::Rd),
        pin(cart, Line::Cs),
        Data(cart.clone()),
        Delay(cart.clone()),
        config,
    )
}

/// A bus in its idle state, with the setup traffic already dropped from
/// the log.
pub fn bus() -> (MockBus, Shared) {
    let cart = cart();
    let bus = bus_with(&cart, BusConfig::default());
    cart.borrow_mut().clear_log();
    (bus, cart)
}

pub fn led(cart: &Shared) -> MockLed {
    StatusLed::new(pin(cart, Line::Led), Delay(cart.clone()), BlinkConfig::default())
}

/// Index of the first event matching `pred` at or after `from`.
pub fn find(events: &[Event], from: usize, pred: impl Fn(&Event) -> bool) -> Option<usize> {
    events.iter().skip(from).position(pred).map(|i| i + from)
}
