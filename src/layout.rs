//! The GMMK Pro ANSI layout: 6x15 matrix, seven layers.
//!
//! Layer tables are transcribed from the physical board left to right, top to
//! bottom. Positions that do not exist on the ANSI plate (the gaps next to
//! Enter, left shift and around the space bar) hold [`KeyAction::No`].

use crate::action::KeyAction;
use crate::keycode::ModifierCombination;
use crate::{a, k, layer, mc, mo, mt, shifted, tg, to, wm};

pub const ROW: usize = 6;
pub const COL: usize = 15;
pub const NUM_LAYER: usize = 7;

/// Layers in priority order. A higher layer shadows the ones below it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Layer {
    Base = 0,
    Fn,
    Code,
    Mouse,
    Workman,
    WorkmanFn,
    WorkmanMouse,
}

/// LED indices lit for caps lock: the eight side glow LEDs on each edge
/// plus the caps lock key itself.
pub const CAPS_LOCK_LEDS: [u8; 17] = [67, 68, 70, 71, 73, 74, 76, 77, 80, 81, 83, 84, 87, 88, 91, 92, 3];

const LCA: ModifierCombination = ModifierCombination::LCTRL.union(ModifierCombination::LALT);
const LGUI: ModifierCombination = ModifierCombination::LGUI;
const LCTRL: ModifierCombination = ModifierCombination::LCTRL;
const LSHIFT: ModifierCombination = ModifierCombination::LSHIFT;
const LALT: ModifierCombination = ModifierCombination::LALT;
const RCTRL: ModifierCombination = ModifierCombination::RCTRL;
const RSHIFT: ModifierCombination = ModifierCombination::RSHIFT;
const RALT: ModifierCombination = ModifierCombination::RALT;
const RGUI: ModifierCombination = ModifierCombination::RGUI;

/// The full keymap.
///
/// The Fn layer carries media controls, RGB controls, the bootloader key and
/// the macro column; Code has editor shortcuts; Mouse drives the pointer.
/// Workman is an alternative base layer (toggled from Fn) with its own Fn and
/// Mouse layers; its number row and brackets are inverted, with the shifted
/// symbol unshifted and the digit recovered through the shift overrides.
#[rustfmt::skip]
pub const fn default_keymap() -> [[[KeyAction; COL]; ROW]; NUM_LAYER] {
    [
        // Base
        layer!([
            [k!(Escape), k!(F1), k!(F2), k!(F3), k!(F4), k!(F5), k!(F6), k!(F7), k!(F8), k!(F9), k!(F10), k!(F11), k!(F12), k!(Delete), k!(AudioMute)],
            [k!(Grave), k!(Kc1), k!(Kc2), k!(Kc3), k!(Kc4), k!(Kc5), k!(Kc6), k!(Kc7), k!(Kc8), k!(Kc9), k!(Kc0), k!(Minus), k!(Equal), k!(Backspace), k!(Home)],
            [k!(Tab), k!(Q), k!(W), k!(E), k!(R), k!(T), k!(Y), k!(U), k!(I), k!(O), k!(P), k!(LeftBracket), k!(RightBracket), k!(Backslash), k!(End)],
            [k!(CapsLock), k!(A), k!(S), k!(D), k!(F), k!(G), k!(H), k!(J), k!(K), k!(L), k!(Semicolon), k!(Quote), a!(No), k!(Enter), k!(PageUp)],
            [k!(LShift), a!(No), k!(Z), k!(X), k!(C), k!(V), k!(B), k!(N), k!(M), k!(Comma), k!(Dot), k!(Slash), mo!(Layer::Code), k!(Up), k!(PageDown)],
            [k!(LCtrl), k!(LGui), k!(LAlt), a!(No), a!(No), k!(Space), a!(No), a!(No), a!(No), k!(RAlt), mo!(Layer::Fn), k!(RCtrl), k!(Left), k!(Down), k!(Right)]
        ]),
        // Fn
        layer!([
            [k!(Bootloader), k!(BrightnessDown), k!(BrightnessUp), wm!(Tab, LGUI), wm!(E, LGUI), k!(MediaPrevTrack), k!(MediaNextTrack), k!(MediaPlayPause), k!(MediaStop), k!(AudioMute), k!(AudioVolDown), k!(AudioVolUp), a!(Transparent), k!(Insert), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), mc!(0)],
            [k!(RgbTog), k!(RgbModeForward), k!(RgbVai), k!(RgbHui), k!(RgbSai), k!(RgbSpi), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(Bootloader), mc!(1)],
            [a!(Transparent), k!(RgbModePlain), k!(RgbModeBreathe), k!(RgbModeRainbow), k!(RgbModeSwirl), k!(RgbModeSnake), k!(RgbModeKnight), k!(RgbModeXmas), k!(RgbModeGradient), k!(RgbModeTwinkle), a!(Transparent), a!(Transparent), a!(No), a!(Transparent), mc!(2)],
            [a!(Transparent), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(NkroToggle), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), mo!(Layer::Mouse), k!(AudioVolUp), mc!(3)],
            [a!(Transparent), wm!(Tab, LGUI), a!(Transparent), a!(No), a!(No), k!(MediaPlayPause), a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent), tg!(Layer::Workman), k!(MediaPrevTrack), k!(AudioVolDown), k!(MediaNextTrack)]
        ]),
        // Code: editor shortcuts (screencast toggle, window transparency,
        // doc generation, terminal toggle)
        layer!([
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [wm!(Grave, RALT), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), wm!(Minus, LCA), wm!(Equal, LCA), a!(Transparent), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(Transparent), a!(Transparent)],
            [a!(Transparent), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), wm!(Dot, LCTRL), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), wm!(Grave, LCTRL), a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)]
        ]),
        // Mouse
        layer!([
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), k!(MouseBtn1), k!(MouseUp), k!(MouseBtn2), k!(MouseWheelUp), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(HoldTimeoutPrint)],
            [a!(Transparent), k!(MouseLeft), k!(MouseDown), k!(MouseRight), k!(MouseWheelDown), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(Transparent), k!(HoldTimeoutUp)],
            [a!(Transparent), a!(No), k!(MouseBtn4), k!(MouseBtn3), k!(MouseBtn5), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(HoldTimeoutDown)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), a!(Transparent), a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)]
        ]),
        // Workman: inverted number row and brackets, letters rearranged,
        // home row modifiers (GACS left, SCAG right)
        layer!([
            [k!(Escape), k!(F1), k!(F2), k!(F3), k!(F4), k!(F5), k!(F6), k!(F7), k!(F8), k!(F9), k!(F10), k!(F11), k!(F12), k!(Delete), k!(AudioMute)],
            [k!(Grave), shifted!(Kc1), shifted!(Kc2), shifted!(Kc3), shifted!(Kc4), shifted!(Kc5), shifted!(Kc6), shifted!(Kc7), shifted!(Kc8), shifted!(Kc9), shifted!(Kc0), k!(Minus), k!(Equal), k!(Backspace), k!(Home)],
            [k!(Tab), k!(Q), k!(D), k!(R), k!(W), k!(B), k!(J), k!(F), k!(U), k!(P), k!(Semicolon), shifted!(LeftBracket), shifted!(RightBracket), k!(Backslash), k!(End)],
            [k!(CapsLock), mt!(A, LGUI), mt!(S, LALT), mt!(H, LCTRL), mt!(T, LSHIFT), k!(G), k!(Y), mt!(N, RSHIFT), mt!(E, RCTRL), mt!(O, RALT), mt!(I, RGUI), k!(Quote), a!(No), k!(Enter), k!(PageUp)],
            [k!(LShift), a!(No), k!(Z), k!(X), k!(M), k!(C), k!(V), k!(K), k!(L), k!(Comma), k!(Dot), k!(Slash), mo!(Layer::Code), k!(Up), k!(PageDown)],
            [k!(LCtrl), k!(LGui), k!(LAlt), a!(No), a!(No), k!(Space), a!(No), a!(No), a!(No), k!(RAlt), mo!(Layer::WorkmanFn), to!(Layer::Base), k!(Left), k!(Down), k!(Right)]
        ]),
        // Workman Fn
        layer!([
            [k!(Bootloader), k!(BrightnessDown), k!(BrightnessUp), wm!(Tab, LGUI), wm!(E, LGUI), k!(MediaPrevTrack), k!(MediaNextTrack), k!(MediaPlayPause), k!(MediaStop), k!(AudioMute), k!(AudioVolDown), k!(AudioVolUp), a!(Transparent), k!(Insert), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), mc!(0)],
            [k!(RgbTog), k!(RgbModeForward), k!(RgbVai), k!(RgbHui), k!(RgbSai), k!(RgbSpi), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(Bootloader), mc!(1)],
            [a!(Transparent), k!(RgbModePlain), k!(RgbModeBreathe), k!(RgbModeRainbow), k!(RgbModeSwirl), k!(RgbModeSnake), k!(RgbModeKnight), k!(RgbModeXmas), k!(RgbModeGradient), k!(RgbModeTwinkle), a!(Transparent), a!(Transparent), a!(No), a!(Transparent), mc!(2)],
            [a!(Transparent), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(NkroToggle), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), mo!(Layer::WorkmanMouse), k!(AudioVolUp), mc!(3)],
            [a!(Transparent), wm!(Tab, LGUI), a!(Transparent), a!(No), a!(No), k!(MediaPlayPause), a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), k!(MediaPrevTrack), k!(AudioVolDown), k!(MediaNextTrack)]
        ]),
        // Workman Mouse
        layer!([
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), k!(MouseBtn1), k!(MouseUp), k!(MouseBtn2), k!(MouseWheelUp), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(HoldTimeoutPrint)],
            [a!(Transparent), k!(MouseLeft), k!(MouseDown), k!(MouseRight), k!(MouseWheelDown), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(Transparent), k!(HoldTimeoutUp)],
            [a!(Transparent), a!(No), k!(MouseBtn4), k!(MouseBtn3), k!(MouseBtn5), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(HoldTimeoutDown)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), a!(Transparent), a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)]
        ]),
    ]
}
