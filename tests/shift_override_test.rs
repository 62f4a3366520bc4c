mod common;

use common::*;
use gmmk_keymap::keycode::KeyCode;

#[test]
fn test_workman_shift_digit_recovers_the_digit() {
    let mut keyboard = create_keyboard();
    enter_workman(&mut keyboard);

    press(&mut keyboard, POS_LSHIFT);
    press(&mut keyboard, POS_KC1);
    release(&mut keyboard, POS_KC1);
    release(&mut keyboard, POS_LSHIFT);
    let reports = drain_keyboard_reports(&mut keyboard);
    assert_eq!(
        reports,
        vec![
            kbd(KC_LSHIFT, &[]),
            // Shift is suppressed while the override is held: a bare 1
            kbd(0, &[KeyCode::Kc1 as u8]),
            kbd(KC_LSHIFT, &[]),
            kbd(0, &[]),
        ]
    );
}

#[test]
fn test_workman_unshifted_digit_is_the_symbol() {
    let mut keyboard = create_keyboard();
    enter_workman(&mut keyboard);

    tap(&mut keyboard, POS_KC1);
    let reports = drain_keyboard_reports(&mut keyboard);
    assert_eq!(
        reports,
        vec![
            kbd(KC_LSHIFT, &[]),
            kbd(KC_LSHIFT, &[KeyCode::Kc1 as u8]),
            kbd(KC_LSHIFT, &[]),
            kbd(0, &[]),
        ]
    );
}

#[test]
fn test_workman_shift_bracket_recovers_the_bracket() {
    let mut keyboard = create_keyboard();
    enter_workman(&mut keyboard);

    press(&mut keyboard, POS_LSHIFT);
    press(&mut keyboard, POS_LEFT_BRACKET);
    release(&mut keyboard, POS_LEFT_BRACKET);
    release(&mut keyboard, POS_LSHIFT);
    let reports = drain_keyboard_reports(&mut keyboard);
    assert_eq!(
        reports,
        vec![
            kbd(KC_LSHIFT, &[]),
            kbd(0, &[KeyCode::LeftBracket as u8]),
            kbd(KC_LSHIFT, &[]),
            kbd(0, &[]),
        ]
    );
}

#[test]
fn test_override_latched_at_press_survives_shift_release() {
    let mut keyboard = create_keyboard();
    enter_workman(&mut keyboard);

    press(&mut keyboard, POS_LSHIFT);
    press(&mut keyboard, POS_KC1);
    // Shift released first, the latched override still finishes as a digit
    release(&mut keyboard, POS_LSHIFT);
    release(&mut keyboard, POS_KC1);
    let reports = drain_keyboard_reports(&mut keyboard);
    assert_eq!(
        reports,
        vec![
            kbd(KC_LSHIFT, &[]),
            kbd(0, &[KeyCode::Kc1 as u8]),
            kbd(0, &[KeyCode::Kc1 as u8]),
            kbd(0, &[]),
        ]
    );
}

#[test]
fn test_base_layer_is_not_overridden() {
    let mut keyboard = create_keyboard();
    press(&mut keyboard, POS_LSHIFT);
    tap(&mut keyboard, POS_KC1);
    release(&mut keyboard, POS_LSHIFT);
    let reports = drain_keyboard_reports(&mut keyboard);
    assert_eq!(
        reports,
        vec![
            kbd(KC_LSHIFT, &[]),
            kbd(KC_LSHIFT, &[KeyCode::Kc1 as u8]),
            kbd(KC_LSHIFT, &[]),
            kbd(0, &[]),
        ]
    );
}
