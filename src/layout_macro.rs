//! Macros for building layer tables declaratively.

/// Create a normal key. For example, `k!(A)` represents `KeyAction::Single(Action::Key(KeyCode::A))`
#[macro_export]
macro_rules! k {
    ($k: ident) => {
        $crate::action::KeyAction::Single($crate::action::Action::Key($crate::keycode::KeyCode::$k))
    };
}

/// Create a normal action: `a!(No)`, `a!(Transparent)`
#[macro_export]
macro_rules! a {
    ($a: ident) => {
        $crate::action::KeyAction::$a
    };
}

/// Create a layer activate action. For example, `mo!(Layer::Fn)` activates the Fn layer while held
#[macro_export]
macro_rules! mo {
    ($x: expr) => {
        $crate::action::KeyAction::Single($crate::action::Action::LayerOn(($x) as u8))
    };
}

/// Create a layer toggle action
#[macro_export]
macro_rules! tg {
    ($x: expr) => {
        $crate::action::KeyAction::Single($crate::action::Action::LayerToggle(($x) as u8))
    };
}

/// Create a layer toggle only action (activate the layer and deactivate all other non-default layers)
#[macro_export]
macro_rules! to {
    ($x: expr) => {
        $crate::action::KeyAction::Single($crate::action::Action::LayerToggleOnly(($x) as u8))
    };
}

/// Create a key with modifiers held. For example, `wm!(E, ModifierCombination::LGUI)`
#[macro_export]
macro_rules! wm {
    ($x: ident, $m: expr) => {
        $crate::action::KeyAction::WithModifier($crate::action::Action::Key($crate::keycode::KeyCode::$x), $m)
    };
}

/// Create a modifier-tap-hold action: the key when tapped, the modifiers when held
#[macro_export]
macro_rules! mt {
    ($k: ident, $m: expr) => {
        $crate::action::KeyAction::TapHold($crate::action::Action::Key($crate::keycode::KeyCode::$k), $m)
    };
}

/// Create a key emitted with shift held, i.e. the shifted symbol of a key
#[macro_export]
macro_rules! shifted {
    ($x: ident) => {
        $crate::wm!($x, $crate::keycode::ModifierCombination::LSHIFT)
    };
}

/// Create a macro trigger action for the given macro slot
#[macro_export]
macro_rules! mc {
    ($x: expr) => {
        $crate::action::KeyAction::Single($crate::action::Action::TriggerMacro(($x) as u8))
    };
}

/// Create a layer in the keymap
#[macro_export]
macro_rules! layer {
    ([$([$($x: expr), +]), +]) => {
        [$([$($x), +]), +]
    };
}
