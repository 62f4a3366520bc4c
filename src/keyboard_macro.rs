//! Hardcoded key macros.

use crate::keycode::KeyCode;

/// Number of macro slots, bound to `KeyCode::Macro0..Macro3`.
pub const NUM_MACRO: usize = 4;

/// One step of a macro sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroOperation {
    Press(KeyCode),
    Release(KeyCode),
    Tap(KeyCode),
    /// Wait the given number of milliseconds before the next step
    Delay(u16),
    /// Stop executing the sequence
    End,
}

/// Select all then copy: Ctrl held around A and C taps.
pub const COPY_ALL: &[MacroOperation] = &[
    MacroOperation::Press(KeyCode::LCtrl),
    MacroOperation::Tap(KeyCode::A),
    MacroOperation::Tap(KeyCode::C),
    MacroOperation::Release(KeyCode::LCtrl),
];

/// Macro sequences by slot. Slots without a binding hold an empty sequence.
#[derive(Debug, Clone)]
pub struct MacroConfig {
    pub sequences: [&'static [MacroOperation]; NUM_MACRO],
}

impl MacroConfig {
    pub fn sequence(&self, index: u8) -> Option<&'static [MacroOperation]> {
        self.sequences.get(index as usize).copied()
    }
}

impl Default for MacroConfig {
    fn default() -> Self {
        // Slots 1-3 are reserved for future bindings
        Self {
            sequences: [COPY_ALL, &[], &[], &[]],
        }
    }
}
