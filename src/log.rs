/// Log through defmt at `$level` when `defmt-log` is on.
///
/// Without it the arguments are still evaluated (and dropped), so a log
/// line never changes what the surrounding code does, and nothing goes
/// unused in host builds.
#[cfg(not(feature = "defmt-log"))]
#[macro_export]
macro_rules! sav_log {
    ($level:ident, $($arg:expr),*) => { { $( let _ = $arg; )* } }
}

/// Log through defmt at `$level`.
#[cfg(feature = "defmt-log")]
#[macro_export]
macro_rules! sav_log {
    (trace, $($arg:expr),*) => { defmt::trace!($($arg),*); };
    (debug, $($arg:expr),*) => { defmt::debug!($($arg),*); };
    (info, $($arg:expr),*) => { defmt::info!($($arg),*); };
    (warn, $($arg:expr),*) => { defmt::warn!($($arg),*); };
    (error, $($arg:expr),*) => { defmt::error!($($arg),*); };
}
