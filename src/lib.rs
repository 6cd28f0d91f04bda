#![no_std]

#[cfg(feature = "board")]
use stm32g0xx_hal as _; // memory layout

#[macro_use] pub mod log;
pub mod consts;
pub mod error;
pub mod shifter;
pub mod bus;
pub mod mbc;
pub mod programmer;
pub mod checksum;
pub mod status;
pub mod recipe;

#[cfg(feature = "board")]
pub mod board;

pub use error::Error;

#[cfg(feature = "defmt-log")]
mod defmt_glue {
    use core::sync::atomic::{AtomicUsize, Ordering};
    use defmt_rtt as _; // global logger
    use panic_probe as _;

    // same panicking *behavior* as `panic-probe` but doesn't print a panic message
    // this prevents the panic message being printed *twice* when `defmt::panic` is invoked
    #[defmt::panic_handler]
    fn panic() -> ! {
        cortex_m::asm::udf()
    }

    static COUNT: AtomicUsize = AtomicUsize::new(0);

    defmt::timestamp!("{=usize}", {
        // NOTE(no-CAS) `timestamps` runs with interrupts disabled
        let n = COUNT.load(Ordering::Relaxed);
        COUNT.store(n + 1, Ordering::Relaxed);
        n
    });
}

// panic-probe brings its own handler when logging over defmt
#[cfg(all(feature = "panic-reset", not(feature = "defmt-log")))]
use panic_reset as _;

/// Stop doing anything, forever. Whatever the pins show now is what the
/// user sees.
pub fn park() -> ! {
    loop {
        #[cfg(feature = "board")]
        cortex_m::asm::wfi();

        #[cfg(not(feature = "board"))]
        core::hint::spin_loop();
    }
}
