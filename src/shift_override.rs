//! Custom shift keys: replace the shifted output of selected keys.
//!
//! On the designated layer, pressing an override's trigger while a physical
//! shift is held emits the replacement instead, with the shift modifier
//! suppressed in outgoing reports for as long as the key is held. The
//! decision is latched at press, so releasing shift mid-hold does not change
//! what gets released.

use heapless::Vec;

use crate::action::KeyAction;
use crate::layout::Layer;
use crate::{k, shifted};

pub const SHIFT_OVERRIDE_MAX_NUM: usize = 16;

/// One entry of the override table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShiftOverride {
    /// The action as resolved from the keymap
    pub trigger: KeyAction,
    /// The action substituted when shift is held
    pub replacement: KeyAction,
}

impl ShiftOverride {
    pub const fn new(trigger: KeyAction, replacement: KeyAction) -> Self {
        Self { trigger, replacement }
    }
}

/// Override table plus the layer it is scoped to.
#[derive(Debug, Clone)]
pub struct ShiftOverrideConfig {
    /// Overrides apply only while this layer is active
    pub layer: u8,
    pub overrides: Vec<ShiftOverride, SHIFT_OVERRIDE_MAX_NUM>,
}

impl ShiftOverrideConfig {
    /// Index of the override whose trigger matches the resolved action.
    pub fn position(&self, action: KeyAction) -> Option<usize> {
        self.overrides.iter().position(|o| o.trigger == action)
    }
}

impl Default for ShiftOverrideConfig {
    /// The Workman table: shift recovers the digits on the inverted number
    /// row, and the unshifted brackets on the inverted bracket keys.
    fn default() -> Self {
        let overrides = Vec::from_slice(&[
            ShiftOverride::new(shifted!(Kc1), k!(Kc1)),
            ShiftOverride::new(shifted!(Kc2), k!(Kc2)),
            ShiftOverride::new(shifted!(Kc3), k!(Kc3)),
            ShiftOverride::new(shifted!(Kc4), k!(Kc4)),
            ShiftOverride::new(shifted!(Kc5), k!(Kc5)),
            ShiftOverride::new(shifted!(Kc6), k!(Kc6)),
            ShiftOverride::new(shifted!(Kc7), k!(Kc7)),
            ShiftOverride::new(shifted!(Kc8), k!(Kc8)),
            ShiftOverride::new(shifted!(Kc9), k!(Kc9)),
            ShiftOverride::new(shifted!(Kc0), k!(Kc0)),
            ShiftOverride::new(shifted!(LeftBracket), k!(LeftBracket)),
            ShiftOverride::new(shifted!(RightBracket), k!(RightBracket)),
        ])
        .expect("default overrides fit the table");
        Self {
            layer: Layer::Workman as u8,
            overrides,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_table_lookup() {
        let config = ShiftOverrideConfig::default();
        assert_eq!(config.overrides.len(), 12);
        assert_eq!(config.position(shifted!(Kc9)), Some(8));
        assert_eq!(config.position(k!(Kc9)), None);
        assert_eq!(config.position(shifted!(RightBracket)), Some(11));
    }
}
