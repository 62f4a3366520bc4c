//! RGB matrix arbitration and the indicator state machine.
//!
//! The matrix has two kinds of owner: the user (who may have their ambient
//! effect on or off) and the indicator (caps lock and short confirmation
//! blinks). The indicator never clobbers the user's persisted settings; it
//! only enables the matrix while it has something to show and returns it to
//! the user's state afterwards. While the matrix is lit for the indicator
//! alone, user RGB adjustments are refused.

use embassy_time::{Duration, Instant};

use crate::keycode::KeyCode;
use crate::layout::{CAPS_LOCK_LEDS, Layer};

/// An RGB color triple.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Self = Self::new(0x00, 0x00, 0x00);
    pub const RED: Self = Self::new(0xFF, 0x00, 0x00);
    pub const GREEN: Self = Self::new(0x00, 0xFF, 0x00);
    pub const BLUE: Self = Self::new(0x00, 0x00, 0xFF);
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Square-wave blink level: the inverted selected bit of the elapsed time.
/// With bit 8 the light is on for 256 ms starting at 0, then off for 256 ms,
/// and so on.
pub fn blink_level(elapsed_ms: u16, bit: u8) -> bool {
    ((!elapsed_ms) >> bit) & 0x01 == 1
}

/// Ambient matrix effects selectable from the Fn layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbEffectMode {
    Plain,
    Breathe,
    Rainbow,
    Swirl,
    Snake,
    Knight,
    Xmas,
    Gradient,
    Twinkle,
}

/// A user adjustment of the ambient matrix effect, forwarded to the driver
/// when the indicator does not hold the matrix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbCommand {
    ModeForward,
    ModeReverse,
    Mode(RgbEffectMode),
    HueUp,
    HueDown,
    SatUp,
    SatDown,
    ValUp,
    ValDown,
    SpeedUp,
    SpeedDown,
}

impl RgbCommand {
    pub fn from_keycode(keycode: KeyCode) -> Option<Self> {
        let command = match keycode {
            KeyCode::RgbModeForward => Self::ModeForward,
            KeyCode::RgbModeReverse => Self::ModeReverse,
            KeyCode::RgbHui => Self::HueUp,
            KeyCode::RgbHud => Self::HueDown,
            KeyCode::RgbSai => Self::SatUp,
            KeyCode::RgbSad => Self::SatDown,
            KeyCode::RgbVai => Self::ValUp,
            KeyCode::RgbVad => Self::ValDown,
            KeyCode::RgbSpi => Self::SpeedUp,
            KeyCode::RgbSpd => Self::SpeedDown,
            KeyCode::RgbModePlain => Self::Mode(RgbEffectMode::Plain),
            KeyCode::RgbModeBreathe => Self::Mode(RgbEffectMode::Breathe),
            KeyCode::RgbModeRainbow => Self::Mode(RgbEffectMode::Rainbow),
            KeyCode::RgbModeSwirl => Self::Mode(RgbEffectMode::Swirl),
            KeyCode::RgbModeSnake => Self::Mode(RgbEffectMode::Snake),
            KeyCode::RgbModeKnight => Self::Mode(RgbEffectMode::Knight),
            KeyCode::RgbModeXmas => Self::Mode(RgbEffectMode::Xmas),
            KeyCode::RgbModeGradient => Self::Mode(RgbEffectMode::Gradient),
            KeyCode::RgbModeTwinkle => Self::Mode(RgbEffectMode::Twinkle),
            _ => return None,
        };
        Some(command)
    }
}

/// Seam to the host RGB matrix service.
pub trait RgbMatrixDriver {
    fn enable(&mut self);
    fn disable(&mut self);
    fn is_enabled(&self) -> bool;
    /// Paint every LED, overriding the ambient effect for this frame
    fn set_color_all(&mut self, color: Rgb);
    /// Paint a single LED
    fn set_color(&mut self, index: u8, color: Rgb);
    /// Apply a user adjustment (mode, hue, ...) to the ambient effect
    fn user_command(&mut self, command: RgbCommand);
}

/// Why the indicator currently wants the matrix lit. The matrix is
/// indicator-owned iff any reason holds and the user has their effect off.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorReasons {
    pub caps_lock: bool,
    pub effect: bool,
}

impl IndicatorReasons {
    pub const fn visible(self) -> bool {
        self.caps_lock || self.effect
    }
}

/// Indicator settings. Defaults reproduce the board's stock behavior.
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    /// How long a confirmation blink runs, in milliseconds
    pub blink_window_ms: u16,
    /// Which bit of the elapsed time drives the square wave; higher is slower
    pub blink_bit: u8,
    /// Color of the caps lock LEDs
    pub caps_color: Rgb,
    /// LEDs lit while caps lock is on
    pub caps_leds: &'static [u8],
    /// Blink colors announcing a switch to these layers
    pub announcements: &'static [(u8, Rgb)],
    pub nkro_on_color: Rgb,
    pub nkro_off_color: Rgb,
    /// How often `render` should run
    pub render_interval: Duration,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            blink_window_ms: 2000,
            blink_bit: 8,
            caps_color: Rgb::RED,
            caps_leds: &CAPS_LOCK_LEDS,
            announcements: &[(Layer::Base as u8, Rgb::BLUE), (Layer::Workman as u8, Rgb::WHITE)],
            nkro_on_color: Rgb::GREEN,
            nkro_off_color: Rgb::RED,
            render_interval: Duration::from_millis(16),
        }
    }
}

/// The indicator state machine in front of a matrix driver.
pub struct RgbIndicator<D: RgbMatrixDriver> {
    driver: D,
    config: IndicatorConfig,
    reasons: IndicatorReasons,
    /// Whether the user has their ambient effect on
    user_enabled: bool,
    effect_started: Option<Instant>,
    effect_color: Rgb,
    announced_layer: Option<u8>,
}

impl<D: RgbMatrixDriver> RgbIndicator<D> {
    pub fn new(driver: D, config: IndicatorConfig) -> Self {
        let user_enabled = driver.is_enabled();
        Self {
            driver,
            config,
            reasons: IndicatorReasons::default(),
            user_enabled,
            effect_started: None,
            effect_color: Rgb::OFF,
            announced_layer: None,
        }
    }

    /// Host caps lock state changed.
    pub fn set_caps_lock(&mut self, on: bool) {
        if self.reasons.caps_lock != on {
            debug!("Caps lock indicator {}", if on { "on" } else { "off" });
        }
        self.reasons.caps_lock = on;
        self.sync_matrix();
    }

    /// The highest active layer changed. Announce entering a base-like layer
    /// with its blink color, once per switch.
    pub fn announce_layer(&mut self, layer: u8, now: Instant) {
        let Some(&(_, color)) = self.config.announcements.iter().find(|(l, _)| *l == layer) else {
            return;
        };
        if self.announced_layer == Some(layer) {
            return;
        }
        self.announced_layer = Some(layer);
        self.start_effect(color, now);
    }

    /// NKRO was toggled; confirm with green (on) or red (off).
    pub fn confirm_nkro(&mut self, enabled: bool, now: Instant) {
        let color = if enabled {
            self.config.nkro_on_color
        } else {
            self.config.nkro_off_color
        };
        self.start_effect(color, now);
    }

    /// Begin a confirmation blink.
    pub fn start_effect(&mut self, color: Rgb, now: Instant) {
        self.effect_color = color;
        self.effect_started = Some(now);
        self.reasons.effect = true;
        self.sync_matrix();
    }

    /// The user toggled the ambient effect. Ownership of the matrix is
    /// re-arbitrated: the matrix stays lit if the indicator still needs it.
    pub fn toggle_user_rgb(&mut self) {
        self.user_enabled = !self.user_enabled;
        info!("User RGB {}", if self.user_enabled { "on" } else { "off" });
        self.sync_matrix();
    }

    /// `true` when user adjustments reach the driver: the matrix is either
    /// user-owned or fully off.
    pub fn allows_user_adjust(&self) -> bool {
        self.user_enabled || !self.reasons.visible()
    }

    /// Forward a user adjustment. Refused silently while the matrix is lit
    /// for the indicator alone.
    pub fn request_user_adjust(&mut self, command: RgbCommand) {
        if self.allows_user_adjust() {
            self.driver.user_command(command);
        } else {
            debug!("RGB adjustment refused, matrix is indicator-owned");
        }
    }

    /// Per-tick frame render. Paints the blink and the caps lock LEDs and
    /// retires the blink once its window has elapsed.
    pub fn render(&mut self, now: Instant) {
        if let Some(started) = self.effect_started {
            let elapsed = if now < started { 0 } else { now.duration_since(started).as_millis() };
            if elapsed <= self.config.blink_window_ms as u64 {
                let color = if blink_level(elapsed as u16, self.config.blink_bit) {
                    self.effect_color
                } else {
                    Rgb::OFF
                };
                self.driver.set_color_all(color);
                if self.reasons.caps_lock {
                    self.paint_caps_leds();
                }
                return;
            }
            // Window over, retire the blink
            self.effect_started = None;
            self.reasons.effect = false;
            self.sync_matrix();
        }
        if self.reasons.caps_lock {
            if !self.user_enabled {
                // Matrix is on only for the indicator, blank the ambient effect
                self.driver.set_color_all(Rgb::OFF);
            }
            self.paint_caps_leds();
        }
    }

    pub fn reasons(&self) -> IndicatorReasons {
        self.reasons
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn paint_caps_leds(&mut self) {
        for &led in self.config.caps_leds {
            self.driver.set_color(led, self.config.caps_color);
        }
    }

    /// Enable the matrix iff the user wants it or an indicator reason holds.
    fn sync_matrix(&mut self) {
        let want = self.user_enabled || self.reasons.visible();
        if want != self.driver.is_enabled() {
            if want {
                self.driver.enable();
            } else {
                self.driver.disable();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_blink_level_square_wave() {
        // Bit 8 selects 256 ms half-periods, starting lit
        assert!(blink_level(0, 8));
        assert!(blink_level(255, 8));
        assert!(!blink_level(256, 8));
        assert!(!blink_level(511, 8));
        assert!(blink_level(512, 8));
        assert!(!blink_level(300, 8));
    }

    #[test]
    fn test_reason_visibility() {
        let mut reasons = IndicatorReasons::default();
        assert!(!reasons.visible());
        reasons.caps_lock = true;
        assert!(reasons.visible());
        reasons.caps_lock = false;
        reasons.effect = true;
        assert!(reasons.visible());
    }
}
