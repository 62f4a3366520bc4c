#![allow(dead_code)]

use core::cell::RefCell;
use std::collections::HashMap;

use embassy_time::Instant;
use gmmk_keymap::config::BehaviorConfig;
use gmmk_keymap::event::KeyEvent;
use gmmk_keymap::hid::{KeyboardReport, Report};
use gmmk_keymap::keyboard::Keyboard;
use gmmk_keymap::keymap::KeyMap;
use gmmk_keymap::layout::{COL, NUM_LAYER, ROW, default_keymap};
use gmmk_keymap::light::{Rgb, RgbCommand, RgbMatrixDriver};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const KC_LCTRL: u8 = 1 << 0;
pub const KC_LSHIFT: u8 = 1 << 1;
pub const KC_LALT: u8 = 1 << 2;
pub const KC_LGUI: u8 = 1 << 3;

// Matrix positions used by the tests, (row, col) on the 6x15 grid
pub const POS_Q: (u8, u8) = (2, 1);
pub const POS_W: (u8, u8) = (2, 2);
pub const POS_M: (u8, u8) = (4, 8);
pub const POS_N: (u8, u8) = (4, 7);
pub const POS_KC1: (u8, u8) = (1, 1);
pub const POS_LEFT_BRACKET: (u8, u8) = (2, 11);
pub const POS_LSHIFT: (u8, u8) = (4, 0);
pub const POS_LCTRL: (u8, u8) = (5, 0);
pub const POS_LALT: (u8, u8) = (5, 2);
pub const POS_MO_FN: (u8, u8) = (5, 10);
pub const POS_RCTRL: (u8, u8) = (5, 11);
pub const POS_MO_CODE: (u8, u8) = (4, 12);
pub const POS_F9: (u8, u8) = (0, 9);
pub const POS_F5: (u8, u8) = (0, 5);
pub const POS_HOME: (u8, u8) = (1, 14);
pub const POS_END: (u8, u8) = (2, 14);
pub const POS_TAB: (u8, u8) = (2, 0);
pub const POS_GRAVE: (u8, u8) = (1, 0);
// Workman home row modifiers
pub const POS_HM_A: (u8, u8) = (3, 1);
pub const POS_HM_T: (u8, u8) = (3, 4);
pub const POS_HM_N: (u8, u8) = (3, 7);
// Hold timeout adjustment column on the mouse layers
pub const POS_HOLD_TIMEOUT_PRINT: (u8, u8) = (2, 14);
pub const POS_HOLD_TIMEOUT_UP: (u8, u8) = (3, 14);
pub const POS_HOLD_TIMEOUT_DOWN: (u8, u8) = (4, 14);

/// RGB matrix test double recording everything the indicator does to it.
#[derive(Debug, Default)]
pub struct MockRgbMatrix {
    pub enabled: bool,
    /// Color of the last full-matrix paint of the current frame
    pub all_color: Option<Rgb>,
    /// Per-LED paints on top of the full-matrix paint
    pub led_colors: HashMap<u8, Rgb>,
    /// User adjustments that reached the driver
    pub commands: Vec<RgbCommand>,
}

impl MockRgbMatrix {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }
}

impl RgbMatrixDriver for MockRgbMatrix {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_color_all(&mut self, color: Rgb) {
        self.all_color = Some(color);
        self.led_colors.clear();
    }

    fn set_color(&mut self, index: u8, color: Rgb) {
        self.led_colors.insert(index, color);
    }

    fn user_command(&mut self, command: RgbCommand) {
        self.commands.push(command);
    }
}

pub type TestKeyboard = Keyboard<'static, ROW, COL, NUM_LAYER, MockRgbMatrix>;

pub fn create_keyboard() -> TestKeyboard {
    create_keyboard_with(MockRgbMatrix::default(), BehaviorConfig::default())
}

pub fn create_keyboard_with(driver: MockRgbMatrix, behavior: BehaviorConfig) -> TestKeyboard {
    let keymap = Box::leak(Box::new(RefCell::new(KeyMap::new(Box::leak(Box::new(default_keymap()))))));
    Keyboard::new(keymap, driver, behavior)
}

pub fn press(keyboard: &mut TestKeyboard, pos: (u8, u8)) {
    press_at(keyboard, pos, Instant::from_millis(0));
}

pub fn release(keyboard: &mut TestKeyboard, pos: (u8, u8)) {
    release_at(keyboard, pos, Instant::from_millis(0));
}

pub fn press_at(keyboard: &mut TestKeyboard, pos: (u8, u8), at: Instant) {
    keyboard.process_key_event(KeyEvent::key(pos.0, pos.1, true), at);
}

pub fn release_at(keyboard: &mut TestKeyboard, pos: (u8, u8), at: Instant) {
    keyboard.process_key_event(KeyEvent::key(pos.0, pos.1, false), at);
}

pub fn tap(keyboard: &mut TestKeyboard, pos: (u8, u8)) {
    press(keyboard, pos);
    release(keyboard, pos);
}

/// Hold Fn, tap the workman toggle, release Fn.
pub fn enter_workman(keyboard: &mut TestKeyboard) {
    press(keyboard, POS_MO_FN);
    tap(keyboard, POS_RCTRL);
    release(keyboard, POS_MO_FN);
    drain_reports(keyboard);
}

/// Drain and return every pending report.
pub fn drain_reports(keyboard: &mut TestKeyboard) -> Vec<Report> {
    let mut reports = Vec::new();
    while let Some(report) = keyboard.pop_report() {
        reports.push(report);
    }
    reports
}

/// Drain pending reports, keeping only the keyboard ones.
pub fn drain_keyboard_reports(keyboard: &mut TestKeyboard) -> Vec<KeyboardReport> {
    drain_reports(keyboard)
        .into_iter()
        .filter_map(|report| match report {
            Report::Keyboard(r) => Some(r),
            _ => None,
        })
        .collect()
}

/// Build the expected keyboard report from a modifier byte and held keys.
pub fn kbd(modifier: u8, keys: &[u8]) -> KeyboardReport {
    let mut keycodes = [0u8; 6];
    keycodes[..keys.len()].copy_from_slice(keys);
    KeyboardReport {
        modifier,
        reserved: 0,
        leds: 0,
        keycodes,
    }
}
