//! In-memory HID state shared by report construction.

use core::ops::{BitAnd, BitOr, Not};

use bitfield_struct::bitfield;

/// Modifier byte of the keyboard HID report, in USB HID bit order.
#[bitfield(u8, order = Lsb)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Eq, PartialEq)]
pub struct HidModifiers {
    #[bits(1)]
    pub left_ctrl: bool,
    #[bits(1)]
    pub left_shift: bool,
    #[bits(1)]
    pub left_alt: bool,
    #[bits(1)]
    pub left_gui: bool,
    #[bits(1)]
    pub right_ctrl: bool,
    #[bits(1)]
    pub right_shift: bool,
    #[bits(1)]
    pub right_alt: bool,
    #[bits(1)]
    pub right_gui: bool,
}

impl HidModifiers {
    pub const SHIFT: Self = Self::new().with_left_shift(true).with_right_shift(true);

    /// Returns `true` if any shift key is held
    pub fn shifted(self) -> bool {
        self.left_shift() || self.right_shift()
    }
}

impl BitOr for HidModifiers {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}

impl BitAnd for HidModifiers {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() & rhs.into_bits())
    }
}

impl Not for HidModifiers {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self::from_bits(!self.into_bits())
    }
}

/// Keyboard led state from the host, as reported over the HID output pipe.
#[bitfield(u8, order = Lsb)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Eq, PartialEq)]
pub struct LedIndicator {
    #[bits(1)]
    pub num_lock: bool,
    #[bits(1)]
    pub caps_lock: bool,
    #[bits(1)]
    pub scroll_lock: bool,
    #[bits(1)]
    pub compose: bool,
    #[bits(1)]
    pub kana: bool,
    #[bits(3)]
    _reserved: u8,
}

impl LedIndicator {
    pub const CAPS_LOCK: Self = Self::new().with_caps_lock(true);
}
