//! Pin assignment of the programmer board (STM32G031K8).
//!
//! | Signal            | Pin     |
//! |-------------------|---------|
//! | D0-D7             | PA0-PA7 |
//! | shift data        | PB0     |
//! | shift clock       | PB1     |
//! | shift /OE         | PB3     |
//! | /WR               | PB4     |
//! | /RD               | PB5     |
//! | /CS               | PB6     |
//! | status LED        | PB8     |
//!
//! PB2 does not exist on this package, hence the gap.

use bus_timer_stm32g031::BusTimer;
use stm32g0xx_hal::{
    gpio::{
        gpioa,
        gpiob::{PB0, PB1, PB3, PB4, PB5, PB6, PB8},
        Output, PushPull,
    },
    prelude::*,
    rcc::{Config, PllConfig, Prescaler},
    stm32::{self, GPIOA},
};

use crate::{
    bus::{BusConfig, CartBus, DataBus, Direction},
    shifter::AddressShifter,
    status::{BlinkConfig, StatusLed},
};

/// HSI16 / 1 * 8 / 2
const SYSCLK_HZ: u32 = 64_000_000;

const PORT_LOW_MASK: u32 = 0x0000_FFFF;
const PORT_LOW_OUTPUT: u32 = 0x0000_5555;

/// PA0-PA7, driven through the port registers so a whole byte changes in
/// one store. Holds the split port so nothing else can claim its pins.
pub struct DataPort {
    _pins: gpioa::Parts,
}

impl DataPort {
    fn new(pins: gpioa::Parts) -> Self {
        Self { _pins: pins }
    }

    fn regs(&self) -> &stm32::gpioa::RegisterBlock {
        unsafe { &*GPIOA::ptr() }
    }
}

impl DataBus for DataPort {
    fn set_direction(&mut self, dir: Direction) {
        let mode = match dir {
            Direction::Output => PORT_LOW_OUTPUT,
            Direction::Input => 0,
        };
        // Only touch PA0-PA7, PA13/PA14 are SWD
        self.regs()
            .moder
            .modify(|r, w| unsafe { w.bits((r.bits() & !PORT_LOW_MASK) | mode) });
    }

    fn drive(&mut self, value: u8) {
        let set = u32::from(value);
        let reset = u32::from(!value) << 16;
        self.regs().bsrr.write(|w| unsafe { w.bits(set | reset) });
    }

    fn sample(&mut self) -> u8 {
        self.regs().idr.read().bits() as u8
    }
}

pub type Bus = CartBus<
    PB0<Output<PushPull>>,
    PB1<Output<PushPull>>,
    PB3<Output<PushPull>>,
    PB4<Output<PushPull>>,
    PB5<Output<PushPull>>,
    PB6<Output<PushPull>>,
    DataPort,
    BusTimer,
>;

pub type Led = StatusLed<PB8<Output<PushPull>>, BusTimer>;

pub struct Board {
    pub bus: Bus,
    pub led: Led,
}

impl Board {
    /// Clock the chip up and hand out the bus and LED, both idle.
    ///
    /// Returns `None` if the peripherals were already taken.
    pub fn take() -> Option<Self> {
        let board = stm32::Peripherals::take()?;

        let config = Config::pll()
            .pll_cfg(PllConfig::with_hsi(1, 8, 2))
            .ahb_psc(Prescaler::NotDivided)
            .apb_psc(Prescaler::NotDivided);
        let mut rcc = board.RCC.freeze(config);

        let timer = BusTimer::init(board.TIM2, SYSCLK_HZ)?;

        let gpioa = board.GPIOA.split(&mut rcc);
        let gpiob = board.GPIOB.split(&mut rcc);

        let led = StatusLed::new(
            gpiob.pb8.into_push_pull_output(),
            timer,
            BlinkConfig::default(),
        );

        let shifter = AddressShifter::new(
            gpiob.pb0.into_push_pull_output(),
            gpiob.pb1.into_push_pull_output(),
            gpiob.pb3.into_push_pull_output(),
        );

        let bus = CartBus::new(
            shifter,
            gpiob.pb4.into_push_pull_output(),
            gpiob.pb5.into_push_pull_output(),
            gpiob.pb6.into_push_pull_output(),
            DataPort::new(gpioa),
            timer,
            BusConfig::default(),
        );

        Some(Board { bus, led })
    }
}
