mod common;

use common::*;
use embassy_time::Instant;
use gmmk_keymap::hid_state::LedIndicator;
use gmmk_keymap::layout::Layer;
use gmmk_keymap::light::{IndicatorConfig, Rgb, RgbCommand, RgbIndicator};

fn indicator_off() -> RgbIndicator<MockRgbMatrix> {
    RgbIndicator::new(MockRgbMatrix::default(), IndicatorConfig::default())
}

#[test]
fn test_caps_lock_owns_the_matrix() {
    let mut indicator = indicator_off();
    assert!(!indicator.driver().enabled);

    indicator.set_caps_lock(true);
    assert!(indicator.driver().enabled);

    indicator.render(Instant::from_millis(0));
    // Ambient effect blanked, caps LEDs lit
    assert_eq!(indicator.driver().all_color, Some(Rgb::OFF));
    assert_eq!(indicator.driver().led_colors.get(&3), Some(&Rgb::RED));
    assert_eq!(indicator.driver().led_colors.get(&67), Some(&Rgb::RED));
    assert_eq!(indicator.driver().led_colors.len(), 17);

    indicator.set_caps_lock(false);
    assert!(!indicator.driver().enabled);
}

#[test]
fn test_caps_lock_preserves_user_rgb() {
    let mut indicator = RgbIndicator::new(MockRgbMatrix::enabled(), IndicatorConfig::default());
    indicator.set_caps_lock(true);
    indicator.render(Instant::from_millis(0));
    // The ambient effect keeps running, only the caps LEDs are overlaid
    assert_eq!(indicator.driver().all_color, None);
    assert_eq!(indicator.driver().led_colors.get(&3), Some(&Rgb::RED));

    indicator.set_caps_lock(false);
    assert!(indicator.driver().enabled);
}

#[test]
fn test_nkro_blink_square_wave() {
    let mut indicator = indicator_off();
    indicator.confirm_nkro(true, Instant::from_millis(0));
    assert!(indicator.driver().enabled);

    // Bit 8 gives 256 ms half-periods, lit first
    indicator.render(Instant::from_millis(100));
    assert_eq!(indicator.driver().all_color, Some(Rgb::GREEN));
    indicator.render(Instant::from_millis(300));
    assert_eq!(indicator.driver().all_color, Some(Rgb::OFF));
    indicator.render(Instant::from_millis(600));
    assert_eq!(indicator.driver().all_color, Some(Rgb::GREEN));

    // Past the 2000 ms window the blink retires and the matrix goes dark
    indicator.render(Instant::from_millis(2100));
    assert!(!indicator.reasons().effect);
    assert!(!indicator.driver().enabled);
}

#[test]
fn test_blink_demotes_to_caps_after_window() {
    let mut indicator = indicator_off();
    indicator.set_caps_lock(true);
    indicator.confirm_nkro(false, Instant::from_millis(0));
    indicator.render(Instant::from_millis(100));
    assert_eq!(indicator.driver().all_color, Some(Rgb::RED));

    indicator.render(Instant::from_millis(2500));
    // Caps lock still holds the matrix
    assert!(indicator.driver().enabled);
    assert!(!indicator.reasons().effect);
    assert_eq!(indicator.driver().led_colors.get(&3), Some(&Rgb::RED));
}

#[test]
fn test_layer_announcement_is_deduplicated() {
    let mut indicator = indicator_off();
    indicator.announce_layer(Layer::Workman as u8, Instant::from_millis(0));
    assert!(indicator.reasons().effect);
    indicator.render(Instant::from_millis(100));
    assert_eq!(indicator.driver().all_color, Some(Rgb::WHITE));

    indicator.render(Instant::from_millis(2100));
    assert!(!indicator.driver().enabled);

    // Same layer again: no new blink
    indicator.announce_layer(Layer::Workman as u8, Instant::from_millis(3000));
    assert!(!indicator.reasons().effect);

    // Back to base: blue blink
    indicator.announce_layer(Layer::Base as u8, Instant::from_millis(4000));
    indicator.render(Instant::from_millis(4100));
    assert_eq!(indicator.driver().all_color, Some(Rgb::BLUE));
}

#[test]
fn test_fn_layers_are_not_announced() {
    let mut indicator = indicator_off();
    indicator.announce_layer(Layer::Fn as u8, Instant::from_millis(0));
    indicator.announce_layer(Layer::Mouse as u8, Instant::from_millis(0));
    assert!(!indicator.reasons().effect);
    assert!(!indicator.driver().enabled);
}

#[test]
fn test_guarded_adjustment_is_refused_silently() {
    let mut indicator = indicator_off();
    indicator.set_caps_lock(true);
    indicator.request_user_adjust(RgbCommand::HueUp);
    assert!(indicator.driver().commands.is_empty());
    // No confirmation blink either, the caps overlay just keeps rendering
    assert!(!indicator.reasons().effect);
    indicator.render(Instant::from_millis(100));
    assert_eq!(indicator.driver().all_color, Some(Rgb::OFF));
}

#[test]
fn test_adjustment_passes_through_when_user_owns_the_matrix() {
    let mut indicator = RgbIndicator::new(MockRgbMatrix::enabled(), IndicatorConfig::default());
    indicator.set_caps_lock(true);
    indicator.request_user_adjust(RgbCommand::HueUp);
    assert_eq!(indicator.driver().commands, vec![RgbCommand::HueUp]);
}

#[test]
fn test_toggle_rearbitrates_ownership() {
    let mut indicator = indicator_off();
    indicator.set_caps_lock(true);
    assert!(indicator.driver().enabled);

    // User turns their effect on, then off again; caps keeps the matrix lit
    indicator.toggle_user_rgb();
    assert!(indicator.driver().enabled);
    indicator.toggle_user_rgb();
    assert!(indicator.driver().enabled);

    indicator.set_caps_lock(false);
    assert!(!indicator.driver().enabled);
}

#[test]
fn test_nkro_toggle_key_blinks_and_flips_the_flag() {
    let mut keyboard = create_keyboard();
    assert!(!keyboard.nkro_enabled());
    keyboard.update_led_state(LedIndicator::new());

    press(&mut keyboard, POS_MO_FN);
    tap(&mut keyboard, POS_N);
    assert!(keyboard.nkro_enabled());
    assert!(keyboard.indicator().driver().enabled);
    keyboard.render_indicator(Instant::from_millis(100));
    assert_eq!(keyboard.indicator().driver().all_color, Some(Rgb::GREEN));
    release(&mut keyboard, POS_MO_FN);
    // No report leaves the board for the toggle itself
    assert!(drain_reports(&mut keyboard).is_empty());
}

#[test]
fn test_rgb_adjustment_guarded_at_the_keymap_level() {
    let mut keyboard = create_keyboard();
    keyboard.update_led_state(LedIndicator::CAPS_LOCK);

    press(&mut keyboard, POS_MO_FN);
    // RgbHui sits at the E position on the Fn layer
    tap(&mut keyboard, (2, 3));
    release(&mut keyboard, POS_MO_FN);
    assert!(keyboard.indicator().driver().commands.is_empty());
}
