//! No-op logging shims, active when neither `defmt` nor `log` is enabled.
#![allow(unused_macros)]

macro_rules! debug {
    ($($arg:tt)*) => {};
}

macro_rules! info {
    ($($arg:tt)*) => {};
}

macro_rules! warn {
    ($($arg:tt)*) => {};
}

macro_rules! error {
    ($($arg:tt)*) => {};
}
