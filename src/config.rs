//! Keyboard behavior configuration.

use embassy_time::Duration;

use crate::keyboard_macro::MacroConfig;
use crate::light::IndicatorConfig;
use crate::shift_override::ShiftOverrideConfig;

/// Configurable behaviors of the keymap. `Default` reproduces the stock
/// board behavior.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    pub shift_override: ShiftOverrideConfig,
    pub macros: MacroConfig,
    pub indicator: IndicatorConfig,
    pub tap_hold: TapHoldConfig,
}

/// Tap-hold behavior, used by the home row modifiers.
#[derive(Debug, Copy, Clone)]
pub struct TapHoldConfig {
    /// A tap-hold key held at least this long is a hold
    pub hold_timeout: Duration,
    /// Resolve a pending tap-hold as a hold as soon as another key is pressed
    pub hold_on_other_press: bool,
}

impl Default for TapHoldConfig {
    fn default() -> Self {
        Self {
            hold_timeout: Duration::from_millis(200),
            hold_on_other_press: true,
        }
    }
}
