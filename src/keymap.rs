//! Layer stack and action resolution.

use crate::action::KeyAction;
use crate::event::KeyEvent;

/// Keymap state for a `ROW x COL` matrix with `NUM_LAYER` layers.
///
/// Layer priority is the layer index; the default layer (index 0) is always
/// active and terminates transparency fallthrough. Presses resolve top-down
/// through [`KeyAction::Transparent`] slots and cache the resolving layer per
/// position, so the matching release always replays against the same layer
/// even if the layer stack changed while the key was held.
pub struct KeyMap<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize> {
    /// Layers of key actions
    layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER],
    /// Current state of each layer
    layer_state: [bool; NUM_LAYER],
    /// Default layer number, active at all times
    default_layer: u8,
    /// Layer cache, recording the layer each pressed position resolved on
    layer_cache: [[u8; COL]; ROW],
}

impl<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize> KeyMap<'a, ROW, COL, NUM_LAYER> {
    pub fn new(layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER]) -> Self {
        Self {
            layers,
            layer_state: [false; NUM_LAYER],
            default_layer: 0,
            layer_cache: [[0; COL]; ROW],
        }
    }

    /// Fetch the action at a given position on a given layer.
    pub fn get_action_at(&self, row: usize, col: usize, layer: usize) -> KeyAction {
        if row < ROW && col < COL && layer < NUM_LAYER {
            self.layers[layer][row][col]
        } else {
            warn!("Key action index out of range: ({},{}) layer {}", row, col, layer);
            KeyAction::No
        }
    }

    /// Resolve the action for a key event.
    ///
    /// A press walks the active layers from highest to lowest, skipping
    /// transparent slots, and caches the layer it settles on. A release
    /// reads back the cached layer.
    pub fn get_action_with_layer_cache(&mut self, event: KeyEvent) -> KeyAction {
        let (row, col) = (event.row as usize, event.col as usize);
        if row >= ROW || col >= COL {
            warn!("Key event out of range: ({},{})", event.row, event.col);
            return KeyAction::No;
        }
        if !event.pressed {
            let layer = self.layer_cache[row][col];
            return self.get_action_at(row, col, layer as usize);
        }

        for layer in (0..NUM_LAYER).rev() {
            if self.layer_state[layer] || layer as u8 == self.default_layer {
                let action = self.get_action_at(row, col, layer);
                if action == KeyAction::Transparent {
                    // The default layer terminates fallthrough
                    if layer as u8 == self.default_layer {
                        break;
                    }
                    continue;
                }
                self.layer_cache[row][col] = layer as u8;
                return action;
            }
        }
        self.layer_cache[row][col] = self.default_layer;
        KeyAction::No
    }

    /// Whether a layer is currently active. The default layer always is.
    pub fn is_layer_active(&self, layer_num: u8) -> bool {
        if layer_num as usize >= NUM_LAYER {
            return false;
        }
        layer_num == self.default_layer || self.layer_state[layer_num as usize]
    }

    /// The highest-priority active layer.
    pub fn get_activated_layer(&self) -> u8 {
        for layer in (0..NUM_LAYER).rev() {
            if self.layer_state[layer] {
                return layer as u8;
            }
        }
        self.default_layer
    }

    pub fn activate_layer(&mut self, layer_num: u8) {
        if layer_num as usize >= NUM_LAYER {
            warn!("Not a valid layer {}, keyboard supports only {} layers", layer_num, NUM_LAYER);
            return;
        }
        self.layer_state[layer_num as usize] = true;
    }

    pub fn deactivate_layer(&mut self, layer_num: u8) {
        if layer_num as usize >= NUM_LAYER {
            warn!("Not a valid layer {}, keyboard supports only {} layers", layer_num, NUM_LAYER);
            return;
        }
        self.layer_state[layer_num as usize] = false;
    }

    pub fn toggle_layer(&mut self, layer_num: u8) {
        if layer_num as usize >= NUM_LAYER {
            warn!("Not a valid layer {}, keyboard supports only {} layers", layer_num, NUM_LAYER);
            return;
        }
        self.layer_state[layer_num as usize] = !self.layer_state[layer_num as usize];
    }

    /// Activate a layer and deactivate every other non-default layer.
    pub fn toggle_layer_only(&mut self, layer_num: u8) {
        if layer_num as usize >= NUM_LAYER {
            warn!("Not a valid layer {}, keyboard supports only {} layers", layer_num, NUM_LAYER);
            return;
        }
        for layer in 0..NUM_LAYER {
            self.layer_state[layer] = layer == layer_num as usize && layer as u8 != self.default_layer;
        }
    }
}
