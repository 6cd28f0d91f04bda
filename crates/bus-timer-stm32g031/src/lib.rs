//! Busy-wait delays for the cartridge bus, driven by TIM2 running as a
//! free-running 1MHz counter.
//!
//! The bus driver and the status LED both need to block for a number of
//! milliseconds. Rather than hand out the timer peripheral itself, `init`
//! configures TIM2 once and returns a `BusTimer` token. The token is `Copy`,
//! so every consumer can carry its own handle to the same counter.

#![no_std]

use groundhog::RollingTimer;
use embedded_hal::blocking::delay::{DelayUs, DelayMs};
use core::sync::atomic::{AtomicPtr, Ordering};
use stm32g0xx_hal::stm32::{
    TIM2,
    RCC,
    tim2::RegisterBlock as Tim2Rb,
};

static TIMER_PTR: AtomicPtr<Tim2Rb> = AtomicPtr::new(core::ptr::null_mut());

#[derive(Debug, Clone, Copy)]
pub struct BusTimer {
    _private: (),
}

impl BusTimer {
    /// Start TIM2 counting microseconds.
    ///
    /// `timer_clk_hz` is the TIM2 kernel clock, and must be a whole number
    /// of MHz. Returns `None` if the timer was already claimed.
    pub fn init(timer: TIM2, timer_clk_hz: u32) -> Option<Self> {
        if !TIMER_PTR.load(Ordering::SeqCst).is_null() {
            return None;
        }

        let rcc = unsafe {&*RCC::ptr()};

        rcc.apbenr1.modify(|_, w| w.tim2en().set_bit());
        rcc.apbrstr1.modify(|_, w| w.tim2rst().set_bit());
        rcc.apbrstr1.modify(|_, w| w.tim2rst().clear_bit());

        // pause
        timer.cr1.modify(|_, w| w.cen().clear_bit());
        // reset counter
        timer.cnt.reset();

        let psc = (timer_clk_hz / 1_000_000).saturating_sub(1);

        timer.psc.write(|w| unsafe { w.psc().bits(psc as u16) });
        timer.arr.write(|w| unsafe { w.bits(0xFFFFFFFF) });
        timer.egr.write(|w| w.ug().set_bit());
        timer.cr1.modify(|_, w| w.cen().set_bit().urs().set_bit());

        TIMER_PTR.store(TIM2::ptr() as *mut _, Ordering::SeqCst);

        Some(Self { _private: () })
    }
}

impl RollingTimer for BusTimer {
    type Tick = u32;
    const TICKS_PER_SECOND: u32 = 1_000_000;

    fn get_ticks(&self) -> u32 {
        // A `BusTimer` only exists once `init` has stored the pointer
        match unsafe { TIMER_PTR.load(Ordering::SeqCst).as_ref() } {
            Some(t2) => t2.cnt.read().bits(),
            None => 0,
        }
    }
}

impl DelayUs<u32> for BusTimer {
    fn delay_us(&mut self, us: u32) {
        let start = self.get_ticks();
        while self.ticks_since(start) < us { }
    }
}

impl DelayMs<u32> for BusTimer {
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1000)
        }
    }
}
