//! Writes the payload into the cartridge's save RAM and re-signs the save.
//!
//! LED solid: done, safe to pull the cartridge.
//! LED blinking: the built-in recipe was rejected and nothing was written.

#![no_main]
#![no_std]

use gb_sav_writer::{
    board::Board,
    park,
    recipe::FULL_PROGRAM,
    sav_log,
};

#[cortex_m_rt::entry]
fn main() -> ! {
    let Board { mut bus, led } = match Board::take() {
        Some(board) => board,
        None => {
            sav_log!(error, "Board setup failed!");
            park()
        }
    };

    match FULL_PROGRAM.run(&mut bus) {
        Ok(()) => led.signal_done(),
        Err(_) => led.signal_panic(),
    }
}
