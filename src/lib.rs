#![no_std]

mod bus;
mod codec;
mod frame;
mod shared;

// CAN Frame - SOF: 0
// Extended ID: 0x1FFFFFFF
// DLC: 8
// Data: FF FF FF FF FF FF FF FF
// CRC: 0x7FFF
// ACK: 0x3
// EOF: 0x7F

/// Classic CAN frames carry at most 8 data bytes
pub const MAX_DATA_LENGTH: usize = 8;

/// Default number of frames a [`BusQueue`] can hold
pub const MAX_MESSAGES: usize = 100;

/// Enough room for the longest rendering shown above
pub const RENDERED_FRAME_SIZE: usize = 128;

pub use bus::*;
pub use frame::*;
pub use shared::*;

pub use embedded_can::{ExtendedId, Id, StandardId};
