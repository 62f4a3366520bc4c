use num_enum::FromPrimitive;
use usbd_hid::descriptor::{MediaKey, SystemControlKey};

use crate::hid_state::HidModifiers;

/// To represent all combinations of modifiers, at least 5 bits are needed:
/// 1 bit for Left/Right, 4 bits for modifier type. Represented in LSB format.
///
/// | bit4 | bit3 | bit2 | bit1 | bit0 |
/// | --- | --- | --- | --- | --- |
/// | L/R | GUI | ALT |SHIFT| CTRL|
#[bitfield_struct::bitfield(u8, order = Lsb)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Eq, PartialEq)]
pub struct ModifierCombination {
    #[bits(1)]
    pub ctrl: bool,
    #[bits(1)]
    pub shift: bool,
    #[bits(1)]
    pub alt: bool,
    #[bits(1)]
    pub gui: bool,
    #[bits(1)]
    pub right: bool,
    #[bits(3)]
    _reserved: u8,
}

impl ModifierCombination {
    pub const LCTRL: Self = Self::new().with_ctrl(true);
    pub const LSHIFT: Self = Self::new().with_shift(true);
    pub const LALT: Self = Self::new().with_alt(true);
    pub const LGUI: Self = Self::new().with_gui(true);
    pub const RCTRL: Self = Self::new().with_ctrl(true).with_right(true);
    pub const RSHIFT: Self = Self::new().with_shift(true).with_right(true);
    pub const RALT: Self = Self::new().with_alt(true).with_right(true);
    pub const RGUI: Self = Self::new().with_gui(true).with_right(true);

    /// Combine two modifier combinations, usable in const layout tables.
    pub const fn union(self, rhs: Self) -> Self {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }

    /// Get modifier hid report bits from the modifier combination
    pub fn to_hid_modifiers(self) -> HidModifiers {
        if !self.right() {
            HidModifiers::new()
                .with_left_ctrl(self.ctrl())
                .with_left_shift(self.shift())
                .with_left_alt(self.alt())
                .with_left_gui(self.gui())
        } else {
            HidModifiers::new()
                .with_right_ctrl(self.ctrl())
                .with_right_shift(self.shift())
                .with_right_alt(self.alt())
                .with_right_gui(self.gui())
        }
    }
}

/// Keycodes the keymap can emit or act on.
///
/// The basic range (`A` to `RGui`) keeps standard USB HID usage values so the
/// codes go into reports with a plain `as u8` cast. Everything above 0xFF is
/// internal: macro triggers, RGB matrix controls and board functions. Codes
/// outside this set decode to [`KeyCode::No`].
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum KeyCode {
    /// Reserved, no-action keycode
    #[num_enum(default)]
    No = 0x0000,
    A = 0x0004,
    B = 0x0005,
    C = 0x0006,
    D = 0x0007,
    E = 0x0008,
    F = 0x0009,
    G = 0x000A,
    H = 0x000B,
    I = 0x000C,
    J = 0x000D,
    K = 0x000E,
    L = 0x000F,
    M = 0x0010,
    N = 0x0011,
    O = 0x0012,
    P = 0x0013,
    Q = 0x0014,
    R = 0x0015,
    S = 0x0016,
    T = 0x0017,
    U = 0x0018,
    V = 0x0019,
    W = 0x001A,
    X = 0x001B,
    Y = 0x001C,
    Z = 0x001D,
    Kc1 = 0x001E,
    Kc2 = 0x001F,
    Kc3 = 0x0020,
    Kc4 = 0x0021,
    Kc5 = 0x0022,
    Kc6 = 0x0023,
    Kc7 = 0x0024,
    Kc8 = 0x0025,
    Kc9 = 0x0026,
    Kc0 = 0x0027,
    Enter = 0x0028,
    Escape = 0x0029,
    Backspace = 0x002A,
    Tab = 0x002B,
    Space = 0x002C,
    Minus = 0x002D,
    Equal = 0x002E,
    LeftBracket = 0x002F,
    RightBracket = 0x0030,
    Backslash = 0x0031,
    Semicolon = 0x0033,
    Quote = 0x0034,
    Grave = 0x0035,
    Comma = 0x0036,
    Dot = 0x0037,
    Slash = 0x0038,
    CapsLock = 0x0039,
    F1 = 0x003A,
    F2 = 0x003B,
    F3 = 0x003C,
    F4 = 0x003D,
    F5 = 0x003E,
    F6 = 0x003F,
    F7 = 0x0040,
    F8 = 0x0041,
    F9 = 0x0042,
    F10 = 0x0043,
    F11 = 0x0044,
    F12 = 0x0045,
    PrintScreen = 0x0046,
    ScrollLock = 0x0047,
    Pause = 0x0048,
    Insert = 0x0049,
    Home = 0x004A,
    PageUp = 0x004B,
    Delete = 0x004C,
    End = 0x004D,
    PageDown = 0x004E,
    Right = 0x004F,
    Left = 0x0050,
    Down = 0x0051,
    Up = 0x0052,
    Application = 0x0065,
    SystemPower = 0x00A5,
    SystemSleep = 0x00A6,
    SystemWake = 0x00A7,
    AudioMute = 0x00A8,
    AudioVolUp = 0x00A9,
    AudioVolDown = 0x00AA,
    MediaNextTrack = 0x00AB,
    MediaPrevTrack = 0x00AC,
    MediaStop = 0x00AD,
    MediaPlayPause = 0x00AE,
    BrightnessUp = 0x00BD,
    BrightnessDown = 0x00BE,
    MouseUp = 0x00CD,
    MouseDown = 0x00CE,
    MouseLeft = 0x00CF,
    MouseRight = 0x00D0,
    MouseBtn1 = 0x00D1,
    MouseBtn2 = 0x00D2,
    MouseBtn3 = 0x00D3,
    MouseBtn4 = 0x00D4,
    MouseBtn5 = 0x00D5,
    MouseWheelUp = 0x00D9,
    MouseWheelDown = 0x00DA,
    LCtrl = 0x00E0,
    LShift = 0x00E1,
    LAlt = 0x00E2,
    LGui = 0x00E3,
    RCtrl = 0x00E4,
    RShift = 0x00E5,
    RAlt = 0x00E6,
    RGui = 0x00E7,
    Macro0 = 0x0500,
    Macro1 = 0x0501,
    Macro2 = 0x0502,
    Macro3 = 0x0503,
    RgbTog = 0x0620,
    RgbModeForward = 0x0621,
    RgbModeReverse = 0x0622,
    RgbHui = 0x0623,
    RgbHud = 0x0624,
    RgbSai = 0x0625,
    RgbSad = 0x0626,
    RgbVai = 0x0627,
    RgbVad = 0x0628,
    RgbSpi = 0x0629,
    RgbSpd = 0x062A,
    RgbModePlain = 0x062B,
    RgbModeBreathe = 0x062C,
    RgbModeRainbow = 0x062D,
    RgbModeSwirl = 0x062E,
    RgbModeSnake = 0x062F,
    RgbModeKnight = 0x0630,
    RgbModeXmas = 0x0631,
    RgbModeGradient = 0x0632,
    RgbModeTwinkle = 0x0633,
    Bootloader = 0x0700,
    NkroToggle = 0x0701,
    HoldTimeoutPrint = 0x0702,
    HoldTimeoutUp = 0x0703,
    HoldTimeoutDown = 0x0704,
}

impl KeyCode {
    /// Returns `true` if the keycode is in the basic keyboard usage page
    pub fn is_basic(self) -> bool {
        KeyCode::No <= self && self <= KeyCode::RGui
    }

    /// Returns `true` if the keycode is a modifier keycode
    pub fn is_modifier(self) -> bool {
        KeyCode::LCtrl <= self && self <= KeyCode::RGui
    }

    /// Returns the byte with the bit corresponding to the USB HID
    /// modifier bitfield set.
    pub fn as_modifier_bit(self) -> u8 {
        if self.is_modifier() {
            1 << (self as u16 as u8 - KeyCode::LCtrl as u16 as u8)
        } else {
            0
        }
    }

    /// Returns `true` if the keycode is a system keycode
    pub fn is_system(self) -> bool {
        KeyCode::SystemPower <= self && self <= KeyCode::SystemWake
    }

    /// Returns `true` if the keycode is a keycode in consumer page
    pub fn is_consumer(self) -> bool {
        KeyCode::AudioMute <= self && self <= KeyCode::BrightnessDown
    }

    /// Returns `true` if the keycode is a mouse keycode
    pub fn is_mouse_key(self) -> bool {
        KeyCode::MouseUp <= self && self <= KeyCode::MouseWheelDown
    }

    /// Returns `true` if the keycode triggers a stored macro
    pub fn is_macro(self) -> bool {
        KeyCode::Macro0 <= self && self <= KeyCode::Macro3
    }

    /// Returns the macro slot bound to this keycode
    pub fn as_macro_index(self) -> Option<u8> {
        if self.is_macro() {
            Some((self as u16 - KeyCode::Macro0 as u16) as u8)
        } else {
            None
        }
    }

    /// Returns `true` if the keycode is a rgb keycode
    pub fn is_rgb(self) -> bool {
        KeyCode::RgbTog <= self && self <= KeyCode::RgbModeTwinkle
    }

    /// Returns `true` if the keycode is a board function (bootloader, nkro,
    /// hold timeout adjustment)
    pub fn is_board(self) -> bool {
        KeyCode::Bootloader <= self && self <= KeyCode::HoldTimeoutDown
    }

    /// Convert a keycode to a consumer page usage id
    pub fn as_consumer_control_usage_id(self) -> u16 {
        match self {
            KeyCode::AudioMute => MediaKey::Mute as u16,
            KeyCode::AudioVolUp => MediaKey::VolumeIncrement as u16,
            KeyCode::AudioVolDown => MediaKey::VolumeDecrement as u16,
            KeyCode::MediaNextTrack => MediaKey::NextTrack as u16,
            KeyCode::MediaPrevTrack => MediaKey::PrevTrack as u16,
            KeyCode::MediaStop => MediaKey::Stop as u16,
            KeyCode::MediaPlayPause => MediaKey::PlayPause as u16,
            // Display brightness, not covered by usbd-hid's MediaKey
            KeyCode::BrightnessUp => 0x006F,
            KeyCode::BrightnessDown => 0x0070,
            _ => MediaKey::Zero as u16,
        }
    }

    /// Convert a keycode to a system control usage id
    pub fn as_system_control_usage_id(self) -> Option<SystemControlKey> {
        match self {
            KeyCode::SystemPower => Some(SystemControlKey::PowerDown),
            KeyCode::SystemSleep => Some(SystemControlKey::Sleep),
            KeyCode::SystemWake => Some(SystemControlKey::WakeUp),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_modifier_bits() {
        assert_eq!(KeyCode::LCtrl.as_modifier_bit(), 0b0000_0001);
        assert_eq!(KeyCode::LShift.as_modifier_bit(), 0b0000_0010);
        assert_eq!(KeyCode::RGui.as_modifier_bit(), 0b1000_0000);
        assert_eq!(KeyCode::A.as_modifier_bit(), 0);
    }

    #[test]
    fn test_unknown_code_decodes_to_no() {
        assert_eq!(KeyCode::from_primitive(0xFFFF), KeyCode::No);
        assert_eq!(KeyCode::from_primitive(0x0504), KeyCode::No);
    }

    #[test]
    fn test_ranges() {
        assert!(KeyCode::Macro2.is_macro());
        assert_eq!(KeyCode::Macro2.as_macro_index(), Some(2));
        assert!(KeyCode::RgbHui.is_rgb());
        assert!(KeyCode::MouseWheelUp.is_mouse_key());
        assert!(KeyCode::MediaPlayPause.is_consumer());
        assert!(!KeyCode::LShift.is_consumer());
        assert!(KeyCode::NkroToggle.is_board());
        assert!(KeyCode::HoldTimeoutDown.is_board());
        assert!(!KeyCode::HoldTimeoutDown.is_basic());
    }

    #[test]
    fn test_modifier_combination() {
        let m = ModifierCombination::LCTRL.union(ModifierCombination::LALT);
        let hid = m.to_hid_modifiers();
        assert!(hid.left_ctrl() && hid.left_alt());
        assert!(!hid.left_shift());
        let r = ModifierCombination::RALT.to_hid_modifiers();
        assert!(r.right_alt());
        assert!(!r.left_alt());
    }
}
