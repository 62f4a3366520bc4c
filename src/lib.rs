#![no_std]

//! Keymap logic for a GMMK Pro ANSI board.
//!
//! This crate owns everything between the scanned key matrix and the host
//! services: layer resolution, custom shift keys, the four hardcoded macros,
//! rotary encoder dispatch and the RGB indicator state machine. Matrix
//! scanning, USB report transport, EEPROM persistence and the RGB LED driver
//! itself stay on the host side and are reached through [`channel`] statics
//! and the [`light::RgbMatrixDriver`] trait.

#[cfg(feature = "defmt")]
#[macro_use(debug, info, warn, error)]
extern crate defmt;
#[cfg(all(feature = "log", not(feature = "defmt")))]
#[macro_use(debug, info, warn, error)]
extern crate log;
#[cfg(not(any(feature = "defmt", feature = "log")))]
#[macro_use]
mod logging;

pub mod action;
pub mod channel;
pub mod config;
pub mod event;
pub mod hid;
pub mod hid_state;
pub mod keyboard;
pub mod keyboard_macro;
pub mod keycode;
pub mod keymap;
pub mod layout;
pub mod layout_macro;
pub mod light;
pub mod shift_override;

/// Mutex used by all exposed channels.
pub type RawMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Capacity of the key event channel
pub const EVENT_CHANNEL_SIZE: usize = 16;
/// Capacity of the report channel
pub const REPORT_CHANNEL_SIZE: usize = 16;
