//! Only rewrites the two bag bytes in bank 1, without touching the
//! checksum. Good for checking the wiring on a throwaway save: the game
//! will report the save as corrupted if the writes landed.

#![no_main]
#![no_std]

use gb_sav_writer::{
    board::Board,
    park,
    recipe::VERIFY_PATCH,
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

    match VERIFY_PATCH.run(&mut bus) {
        Ok(()) => led.signal_done(),
        Err(_) => led.signal_panic(),
    }
}
