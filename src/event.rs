//! Events produced by the (host-owned) matrix scanner and encoder.

/// A single key state change at a matrix position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn key(row: u8, col: u8, pressed: bool) -> Self {
        Self { row, col, pressed }
    }
}

/// One detent of the rotary encoder.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotaryEncoderEvent {
    pub clockwise: bool,
}
