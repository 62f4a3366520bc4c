//! The closed set of actions a key position can resolve to.

use crate::keycode::{KeyCode, ModifierCombination};

/// A basic action fully executable on a single press or release.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Emit a keycode
    Key(KeyCode),
    /// Activate a layer while held
    LayerOn(u8),
    /// Toggle a layer on release
    LayerToggle(u8),
    /// Activate a layer and deactivate all other non-default layers
    LayerToggleOnly(u8),
    /// Run the macro stored in the given slot
    TriggerMacro(u8),
}

/// What a slot in a layer table holds. Every key position on every layer
/// resolves to exactly one of these variants; dispatch is a match over the
/// variant, never an inspection of raw keycode ranges.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// No action, the scan position is not a key
    No,
    /// Fall through to the next lower active layer
    Transparent,
    /// A single action
    Single(Action),
    /// An action executed with extra modifiers held
    WithModifier(Action, ModifierCombination),
    /// The action when tapped, the modifiers when held
    TapHold(Action, ModifierCombination),
}

impl KeyAction {
    /// The inner action, if the slot carries one.
    pub fn to_action(self) -> Option<Action> {
        match self {
            KeyAction::Single(a) | KeyAction::WithModifier(a, _) | KeyAction::TapHold(a, _) => Some(a),
            KeyAction::No | KeyAction::Transparent => None,
        }
    }
}
