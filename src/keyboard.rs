//! The key event processor.

use core::cell::RefCell;

use embassy_futures::select::{Either3, select3};
use embassy_time::{Duration, Instant, Ticker};
use heapless::{Deque, Vec};

use crate::action::{Action, KeyAction};
use crate::channel::{ENCODER_EVENT_CHANNEL, KEY_EVENT_CHANNEL, KEYBOARD_REPORT_CHANNEL};
use crate::config::BehaviorConfig;
use crate::event::{KeyEvent, RotaryEncoderEvent};
use crate::hid::{KeyboardReport, MediaKeyboardReport, MouseReport, Report, SystemControlReport};
use crate::hid_state::{HidModifiers, LedIndicator};
use crate::keyboard_macro::MacroOperation;
use crate::keycode::{KeyCode, ModifierCombination};
use crate::keymap::KeyMap;
use crate::layout::Layer;
use crate::light::{RgbCommand, RgbIndicator, RgbMatrixDriver};
use crate::shift_override::SHIFT_OVERRIDE_MAX_NUM;

/// Pointer step per mouse key press
const MOUSE_MOVE_UNIT: i8 = 8;
/// Wheel step per mouse wheel key press
const MOUSE_WHEEL_UNIT: i8 = 1;
/// Step of the hold timeout adjustment keys
const HOLD_TIMEOUT_STEP: Duration = Duration::from_millis(5);

/// A pressed tap-hold key waiting for its tap-or-hold decision.
struct PendingTapHold {
    row: u8,
    col: u8,
    action: Action,
    hold: HidModifiers,
    pressed_at: Instant,
}

/// Keyboard logic: resolves key events against the keymap, applies shift
/// overrides, runs macros, maintains HID state and drives the RGB indicator.
///
/// All processing is synchronous; [`Keyboard::run`] is the async shell that
/// feeds it from the event channels and flushes reports to the host.
pub struct Keyboard<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize, D: RgbMatrixDriver> {
    keymap: &'a RefCell<KeyMap<'a, ROW, COL, NUM_LAYER>>,
    behavior: BehaviorConfig,
    indicator: RgbIndicator<D>,
    render_interval: Duration,

    /// Held modifier keys
    held_modifiers: HidModifiers,
    /// Extra modifiers from `WithModifier` actions currently held
    with_modifiers: HidModifiers,
    /// Modifiers masked out of reports while a shift override is held
    shift_suppress: HidModifiers,
    /// The 6KRO key slots
    held_keycodes: [KeyCode; 6],
    /// Matrix positions of latched shift overrides, by table index
    active_overrides: [Option<(u8, u8)>; SHIFT_OVERRIDE_MAX_NUM],
    /// Tap-hold key awaiting its decision, at most one at a time
    pending_tap_hold: Option<PendingTapHold>,
    /// Tap-hold positions resolved as holds, with their registered modifiers
    held_tap_holds: Vec<((u8, u8), HidModifiers), 8>,

    /// Led state from the host
    led_state: LedIndicator,
    nkro_enabled: bool,
    mouse_report: MouseReport,

    /// Outgoing reports, flushed to the report channel by `run`
    report_buffer: Deque<Report, 16>,
}

impl<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize, D: RgbMatrixDriver>
    Keyboard<'a, ROW, COL, NUM_LAYER, D>
{
    pub fn new(keymap: &'a RefCell<KeyMap<'a, ROW, COL, NUM_LAYER>>, driver: D, behavior: BehaviorConfig) -> Self {
        let render_interval = behavior.indicator.render_interval;
        let indicator = RgbIndicator::new(driver, behavior.indicator.clone());
        Self {
            keymap,
            behavior,
            indicator,
            render_interval,
            held_modifiers: HidModifiers::new(),
            with_modifiers: HidModifiers::new(),
            shift_suppress: HidModifiers::new(),
            held_keycodes: [KeyCode::No; 6],
            active_overrides: [None; SHIFT_OVERRIDE_MAX_NUM],
            pending_tap_hold: None,
            held_tap_holds: Vec::new(),
            led_state: LedIndicator::new(),
            nkro_enabled: false,
            mouse_report: MouseReport::default(),
            report_buffer: Deque::new(),
        }
    }

    /// Event loop for firmware use: consume key and encoder events, render
    /// the indicator on a fixed tick, forward reports to the host.
    pub async fn run(&mut self) -> ! {
        let mut render_tick = Ticker::every(self.render_interval);
        loop {
            match select3(
                KEY_EVENT_CHANNEL.receive(),
                ENCODER_EVENT_CHANNEL.receive(),
                render_tick.next(),
            )
            .await
            {
                Either3::First(event) => self.process_key_event(event, Instant::now()),
                Either3::Second(event) => self.process_encoder_event(event),
                Either3::Third(_) => {
                    let now = Instant::now();
                    self.settle_pending_tap_hold(None, now);
                    self.render_indicator(now);
                }
            }
            while let Some(report) = self.report_buffer.pop_front() {
                KEYBOARD_REPORT_CHANNEL.send(report).await;
            }
        }
    }

    /// Process a single key event.
    pub fn process_key_event(&mut self, event: KeyEvent, now: Instant) {
        self.settle_pending_tap_hold(Some(event), now);
        let action = self.keymap.borrow_mut().get_action_with_layer_cache(event);
        let action = self.apply_shift_override(action, event);
        debug!("Processing key event {:?} -> {:?}", event, action);
        self.process_key_action(action, event, now);
    }

    /// Host led state changed (caps lock and friends).
    pub fn update_led_state(&mut self, led_state: LedIndicator) {
        self.led_state = led_state;
        self.indicator.set_caps_lock(led_state.caps_lock());
    }

    /// Render one indicator frame.
    pub fn render_indicator(&mut self, now: Instant) {
        self.indicator.render(now);
    }

    /// Pop the next outgoing report, if any.
    pub fn pop_report(&mut self) -> Option<Report> {
        self.report_buffer.pop_front()
    }

    pub fn nkro_enabled(&self) -> bool {
        self.nkro_enabled
    }

    /// The current tap-hold decision timeout.
    pub fn hold_timeout(&self) -> Duration {
        self.behavior.tap_hold.hold_timeout
    }

    pub fn indicator(&self) -> &RgbIndicator<D> {
        &self.indicator
    }

    /// Rotary encoder dispatch: Alt or Ctrl held cycles windows, the Fn
    /// layer skips tracks, anything else is volume.
    pub fn process_encoder_event(&mut self, event: RotaryEncoderEvent) {
        if self.held_modifiers.left_alt() || self.held_modifiers.left_ctrl() {
            if event.clockwise {
                self.tap_key(KeyCode::Tab, HidModifiers::new());
            } else {
                self.tap_key(KeyCode::Tab, HidModifiers::new().with_left_shift(true));
            }
        } else if self.keymap.borrow().is_layer_active(Layer::Fn as u8) {
            if event.clockwise {
                self.tap_media(KeyCode::MediaNextTrack);
            } else {
                self.tap_media(KeyCode::MediaPrevTrack);
            }
        } else if event.clockwise {
            self.tap_media(KeyCode::AudioVolUp);
        } else {
            self.tap_media(KeyCode::AudioVolDown);
        }
    }

    /// Substitute the resolved action when a latched or matching shift
    /// override applies, and keep the suppression mask current.
    fn apply_shift_override(&mut self, action: KeyAction, event: KeyEvent) -> KeyAction {
        if event.pressed {
            if !self.keymap.borrow().is_layer_active(self.behavior.shift_override.layer) {
                return action;
            }
            if !self.held_modifiers.shifted() {
                return action;
            }
            let Some(index) = self.behavior.shift_override.position(action) else {
                return action;
            };
            self.active_overrides[index] = Some((event.row, event.col));
            self.update_shift_suppress();
            self.behavior.shift_override.overrides[index].replacement
        } else {
            let latched = self
                .active_overrides
                .iter()
                .position(|slot| *slot == Some((event.row, event.col)));
            let Some(index) = latched else {
                return action;
            };
            self.active_overrides[index] = None;
            self.update_shift_suppress();
            self.behavior.shift_override.overrides[index].replacement
        }
    }

    fn update_shift_suppress(&mut self) {
        self.shift_suppress = if self.active_overrides.iter().any(Option::is_some) {
            HidModifiers::SHIFT
        } else {
            HidModifiers::new()
        };
    }

    fn process_key_action(&mut self, action: KeyAction, event: KeyEvent, now: Instant) {
        match action {
            KeyAction::No | KeyAction::Transparent => (),
            KeyAction::Single(a) => self.process_action(a, event, now),
            KeyAction::WithModifier(a, m) => self.process_action_with_modifier(a, m, event, now),
            KeyAction::TapHold(a, m) => self.process_tap_hold(a, m, event, now),
        }
    }

    /// Promote the pending tap-hold to a hold once its timeout has elapsed,
    /// or as soon as another key is pressed while it is down.
    fn settle_pending_tap_hold(&mut self, event: Option<KeyEvent>, now: Instant) {
        let Some(pending) = &self.pending_tap_hold else {
            return;
        };
        let timed_out = now >= pending.pressed_at + self.behavior.tap_hold.hold_timeout;
        let interrupted = self.behavior.tap_hold.hold_on_other_press
            && event.is_some_and(|e| e.pressed && (e.row, e.col) != (pending.row, pending.col));
        if !timed_out && !interrupted {
            return;
        }
        let Some(pending) = self.pending_tap_hold.take() else {
            return;
        };
        self.held_modifiers = self.held_modifiers | pending.hold;
        if self.held_tap_holds.push(((pending.row, pending.col), pending.hold)).is_err() {
            warn!("Tap-hold slots filled, dropping the hold");
        }
        self.send_keyboard_report();
    }

    /// A tap-hold key: the tap action when released within the hold timeout,
    /// the hold modifiers otherwise. The press itself emits nothing, the
    /// decision is made by [`Self::settle_pending_tap_hold`] or at release.
    fn process_tap_hold(&mut self, action: Action, modifiers: ModifierCombination, event: KeyEvent, now: Instant) {
        if event.pressed {
            self.pending_tap_hold = Some(PendingTapHold {
                row: event.row,
                col: event.col,
                action,
                hold: modifiers.to_hid_modifiers(),
                pressed_at: now,
            });
        } else if self
            .pending_tap_hold
            .as_ref()
            .is_some_and(|p| (p.row, p.col) == (event.row, event.col))
        {
            // Released in time: replay the tap action as a press and release
            let Some(pending) = self.pending_tap_hold.take() else {
                return;
            };
            self.process_action(pending.action, KeyEvent::key(event.row, event.col, true), now);
            self.process_action(pending.action, KeyEvent::key(event.row, event.col, false), now);
        } else if let Some(index) = self
            .held_tap_holds
            .iter()
            .position(|(pos, _)| *pos == (event.row, event.col))
        {
            let (_, hold) = self.held_tap_holds.swap_remove(index);
            self.held_modifiers = self.held_modifiers & !hold;
            self.send_keyboard_report();
        }
    }

    /// Press: report the modifiers first, then the key. Release: the key
    /// first, then the modifiers. The host never sees the key without them.
    fn process_action_with_modifier(
        &mut self,
        action: Action,
        modifiers: ModifierCombination,
        event: KeyEvent,
        now: Instant,
    ) {
        if event.pressed {
            self.with_modifiers = self.with_modifiers | modifiers.to_hid_modifiers();
            self.send_keyboard_report();
            self.process_action(action, event, now);
        } else {
            self.process_action(action, event, now);
            self.with_modifiers = self.with_modifiers & !modifiers.to_hid_modifiers();
            self.send_keyboard_report();
        }
    }

    fn process_action(&mut self, action: Action, event: KeyEvent, now: Instant) {
        match action {
            Action::Key(key) => self.process_key(key, event, now),
            Action::LayerOn(layer) => {
                if event.pressed {
                    self.keymap.borrow_mut().activate_layer(layer);
                } else {
                    self.keymap.borrow_mut().deactivate_layer(layer);
                }
                self.announce_active_layer(now);
            }
            Action::LayerToggle(layer) => {
                if !event.pressed {
                    self.keymap.borrow_mut().toggle_layer(layer);
                    self.announce_active_layer(now);
                }
            }
            Action::LayerToggleOnly(layer) => {
                if event.pressed {
                    self.keymap.borrow_mut().toggle_layer_only(layer);
                    self.announce_active_layer(now);
                }
            }
            Action::TriggerMacro(index) => {
                if event.pressed {
                    self.execute_macro(index);
                }
            }
        }
    }

    fn announce_active_layer(&mut self, now: Instant) {
        let layer = self.keymap.borrow().get_activated_layer();
        self.indicator.announce_layer(layer, now);
    }

    fn process_key(&mut self, key: KeyCode, event: KeyEvent, now: Instant) {
        if key == KeyCode::No {
            return;
        }
        // Consumer, system and mouse keys sit inside the basic usage range,
        // so they have to be peeled off before the 6KRO path
        if key.is_consumer() {
            let usage_id = if event.pressed { key.as_consumer_control_usage_id() } else { 0 };
            self.send_report(Report::MediaKeyboard(MediaKeyboardReport { usage_id }));
        } else if key.is_system() {
            if event.pressed {
                if let Some(system_key) = key.as_system_control_usage_id() {
                    self.send_report(Report::SystemControl(SystemControlReport {
                        usage_id: system_key as u8,
                    }));
                }
            } else {
                self.send_report(Report::SystemControl(SystemControlReport { usage_id: 0 }));
            }
        } else if key.is_mouse_key() {
            self.process_mouse_key(key, event);
        } else if key.is_basic() {
            if event.pressed {
                self.register_key(key);
            } else {
                self.unregister_key(key);
            }
            self.send_keyboard_report();
        } else if key.is_rgb() {
            if event.pressed {
                self.process_rgb_key(key);
            }
        } else if key.is_macro() {
            if event.pressed
                && let Some(index) = key.as_macro_index()
            {
                self.execute_macro(index);
            }
        } else if key == KeyCode::NkroToggle {
            if event.pressed {
                self.nkro_enabled = !self.nkro_enabled;
                info!("NKRO {}", if self.nkro_enabled { "enabled" } else { "disabled" });
                self.indicator.confirm_nkro(self.nkro_enabled, now);
            }
        } else if key == KeyCode::Bootloader {
            if event.pressed {
                info!("Bootloader requested, deferring to the host reset service");
            }
        } else if key == KeyCode::HoldTimeoutUp {
            if event.pressed {
                self.behavior.tap_hold.hold_timeout += HOLD_TIMEOUT_STEP;
                info!("Hold timeout {} ms", self.behavior.tap_hold.hold_timeout.as_millis());
            }
        } else if key == KeyCode::HoldTimeoutDown {
            if event.pressed {
                if self.behavior.tap_hold.hold_timeout > HOLD_TIMEOUT_STEP {
                    self.behavior.tap_hold.hold_timeout -= HOLD_TIMEOUT_STEP;
                }
                info!("Hold timeout {} ms", self.behavior.tap_hold.hold_timeout.as_millis());
            }
        } else if key == KeyCode::HoldTimeoutPrint {
            if event.pressed {
                info!("Hold timeout {} ms", self.behavior.tap_hold.hold_timeout.as_millis());
            }
        } else {
            warn!("Unsupported key: {:?}", key);
        }
    }

    fn process_rgb_key(&mut self, key: KeyCode) {
        if key == KeyCode::RgbTog {
            self.indicator.toggle_user_rgb();
        } else if let Some(command) = RgbCommand::from_keycode(key) {
            self.indicator.request_user_adjust(command);
        }
    }

    fn process_mouse_key(&mut self, key: KeyCode, event: KeyEvent) {
        match key {
            KeyCode::MouseBtn1
            | KeyCode::MouseBtn2
            | KeyCode::MouseBtn3
            | KeyCode::MouseBtn4
            | KeyCode::MouseBtn5 => {
                let bit = 1 << (key as u16 - KeyCode::MouseBtn1 as u16);
                if event.pressed {
                    self.mouse_report.buttons |= bit;
                } else {
                    self.mouse_report.buttons &= !bit;
                }
            }
            KeyCode::MouseUp => self.mouse_report.y = if event.pressed { -MOUSE_MOVE_UNIT } else { 0 },
            KeyCode::MouseDown => self.mouse_report.y = if event.pressed { MOUSE_MOVE_UNIT } else { 0 },
            KeyCode::MouseLeft => self.mouse_report.x = if event.pressed { -MOUSE_MOVE_UNIT } else { 0 },
            KeyCode::MouseRight => self.mouse_report.x = if event.pressed { MOUSE_MOVE_UNIT } else { 0 },
            KeyCode::MouseWheelUp => self.mouse_report.wheel = if event.pressed { MOUSE_WHEEL_UNIT } else { 0 },
            KeyCode::MouseWheelDown => self.mouse_report.wheel = if event.pressed { -MOUSE_WHEEL_UNIT } else { 0 },
            _ => return,
        }
        self.send_report(Report::Mouse(self.mouse_report));
    }

    fn execute_macro(&mut self, index: u8) {
        let Some(sequence) = self.behavior.macros.sequence(index) else {
            warn!("Macro index {} out of range", index);
            return;
        };
        if sequence.is_empty() {
            debug!("Macro {} has no sequence bound", index);
            return;
        }
        for operation in sequence {
            match *operation {
                MacroOperation::Press(key) => {
                    self.register_key(key);
                    self.send_keyboard_report();
                }
                MacroOperation::Release(key) => {
                    self.unregister_key(key);
                    self.send_keyboard_report();
                }
                MacroOperation::Tap(key) => {
                    self.register_key(key);
                    self.send_keyboard_report();
                    self.unregister_key(key);
                    self.send_keyboard_report();
                }
                MacroOperation::Delay(ms) => embassy_time::block_for(Duration::from_millis(ms as u64)),
                MacroOperation::End => break,
            }
        }
    }

    /// Tap a key with the given extra modifiers, restoring state afterwards.
    fn tap_key(&mut self, key: KeyCode, modifiers: HidModifiers) {
        self.with_modifiers = self.with_modifiers | modifiers;
        self.register_key(key);
        self.send_keyboard_report();
        self.unregister_key(key);
        self.with_modifiers = self.with_modifiers & !modifiers;
        self.send_keyboard_report();
    }

    fn tap_media(&mut self, key: KeyCode) {
        self.send_report(Report::MediaKeyboard(MediaKeyboardReport {
            usage_id: key.as_consumer_control_usage_id(),
        }));
        self.send_report(Report::MediaKeyboard(MediaKeyboardReport { usage_id: 0 }));
    }

    fn register_key(&mut self, key: KeyCode) {
        if key.is_modifier() {
            self.held_modifiers = HidModifiers::from_bits(self.held_modifiers.into_bits() | key.as_modifier_bit());
        } else if let Some(slot) = self.held_keycodes.iter_mut().find(|k| **k == KeyCode::No) {
            *slot = key;
        } else {
            warn!("All key slots filled, dropping {:?}", key);
        }
    }

    fn unregister_key(&mut self, key: KeyCode) {
        if key.is_modifier() {
            self.held_modifiers = HidModifiers::from_bits(self.held_modifiers.into_bits() & !key.as_modifier_bit());
        } else if let Some(slot) = self.held_keycodes.iter_mut().find(|k| **k == key) {
            *slot = KeyCode::No;
        }
    }

    fn send_keyboard_report(&mut self) {
        let modifier = ((self.held_modifiers & !self.shift_suppress) | self.with_modifiers).into_bits();
        let mut keycodes = [0u8; 6];
        for (slot, code) in keycodes.iter_mut().zip(self.held_keycodes.iter()) {
            *slot = *code as u8;
        }
        self.send_report(Report::Keyboard(KeyboardReport {
            modifier,
            reserved: 0,
            leds: self.led_state.into_bits(),
            keycodes,
        }));
    }

    fn send_report(&mut self, report: Report) {
        if self.report_buffer.push_back(report).is_err() {
            warn!("Report buffer full, dropping report");
        }
    }
}
