//! Channels connecting the scanner, the processor and the host transport.

use embassy_sync::channel::Channel;

use crate::event::{KeyEvent, RotaryEncoderEvent};
use crate::hid::Report;
use crate::{EVENT_CHANNEL_SIZE, RawMutex, REPORT_CHANNEL_SIZE};

/// Key events from the matrix scanner
pub static KEY_EVENT_CHANNEL: Channel<RawMutex, KeyEvent, EVENT_CHANNEL_SIZE> = Channel::new();

/// Encoder detents from the rotary encoder
pub static ENCODER_EVENT_CHANNEL: Channel<RawMutex, RotaryEncoderEvent, EVENT_CHANNEL_SIZE> = Channel::new();

/// Reports to the host HID transport
pub static KEYBOARD_REPORT_CHANNEL: Channel<RawMutex, Report, REPORT_CHANNEL_SIZE> = Channel::new();
