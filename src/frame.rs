use core::fmt::{self, Write};

use embedded_can::Id;
use heapless::String;
use num_enum::IntoPrimitive;

use crate::{
    codec::{id_from_raw, id_to_raw, write_hex_bytes},
    MAX_DATA_LENGTH, RENDERED_FRAME_SIZE,
};

/// Start of frame is a single dominant bit
pub const SOF_DOMINANT: u8 = 0;
/// No checksum is computed, the 15-bit CRC field is always zero
pub const CRC_PLACEHOLDER: u16 = 0;
/// ACK slot and delimiter (2 bits), always zero
pub const ACK_PLACEHOLDER: u8 = 0;
/// End of frame: seven recessive bits
pub const EOF_RECESSIVE: u8 = 0x7F;

/// Human readable form of a rendered [`Frame`]. See [`Frame::render`].
pub type RenderedFrame = String<RENDERED_FRAME_SIZE>;

/// Which identifier variant a frame carries. The integer value is the IDE
/// bit as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum IdKind {
    /// 11-bit identifier (0..=0x7FF)
    Standard = 0,
    /// 29-bit identifier (0..=0x1FFFFFFF)
    Extended = 1,
}

impl IdKind {
    pub fn label(self) -> &'static str {
        match self {
            IdKind::Standard => "Standard",
            IdKind::Extended => "Extended",
        }
    }
}

impl From<bool> for IdKind {
    fn from(extended: bool) -> Self {
        if extended {
            IdKind::Extended
        } else {
            IdKind::Standard
        }
    }
}

pub trait IdExt {
    fn kind(self) -> IdKind;
}

impl IdExt for Id {
    fn kind(self) -> IdKind {
        match self {
            Id::Standard(_) => IdKind::Standard,
            Id::Extended(_) => IdKind::Extended,
        }
    }
}

/// A classic CAN frame as it is laid out on the bus, minus the bits this
/// model never computes (stuffing, real CRC, ACK).
///
/// Only the first [`Frame::dlc`] bytes of the payload are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    sof: u8,
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    id: Id,
    remote: bool,
    dlc: usize,
    data: [u8; MAX_DATA_LENGTH],
    crc: u16,
    ack: u8,
    eof: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameBuildError {
    #[error("Requested a data length ({0:?}) outside of the valid range (0..=8)")]
    InvalidLength(usize),
    #[error("Identifier ({value:#X}) does not fit in a {kind:?} ID")]
    IdentifierOutOfRange { kind: IdKind, value: u32 },
    #[error("Requested {expected:?} data bytes but the payload only holds {actual:?}")]
    PayloadTooShort { expected: usize, actual: usize },
}

impl Frame {
    /// Builds a data frame. `identifier` must fit in 11 bits (or 29 bits when
    /// `extended` is set), `length` must be in the range 0..=8 and `payload`
    /// must hold at least `length` bytes. Bytes past `length` are ignored.
    pub fn build(
        identifier: u32,
        extended: bool,
        length: usize,
        payload: &[u8],
    ) -> Result<Self, FrameBuildError> {
        if length > MAX_DATA_LENGTH {
            return Err(FrameBuildError::InvalidLength(length));
        }

        let id = id_from_raw(identifier, extended)?;

        if payload.len() < length {
            return Err(FrameBuildError::PayloadTooShort {
                expected: length,
                actual: payload.len(),
            });
        }

        Ok(Self::assemble(id, false, length, &payload[..length]))
    }

    fn assemble(id: Id, remote: bool, dlc: usize, data: &[u8]) -> Self {
        let mut copy = [0u8; MAX_DATA_LENGTH];
        copy[..data.len()].copy_from_slice(data);

        Self {
            sof: SOF_DOMINANT,
            id,
            remote,
            dlc,
            data: copy,
            crc: CRC_PLACEHOLDER,
            ack: ACK_PLACEHOLDER,
            eof: EOF_RECESSIVE,
        }
    }

    pub fn start_of_frame(&self) -> u8 {
        self.sof
    }

    /// Gets the message ID of the frame
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn id_kind(&self) -> IdKind {
        self.id.kind()
    }

    /// Raw value of the IDE bit (0 for standard, 1 for extended)
    pub fn ide(&self) -> u8 {
        self.id.kind().into()
    }

    pub fn is_remote(&self) -> bool {
        self.remote
    }

    /// Gets the DLC (Data Length Code) of the frame
    pub fn dlc(&self) -> usize {
        self.dlc
    }

    /// Gets the meaningful part of the payload (length will match DLC). Remote
    /// frames carry no data, their DLC only announces the requested length.
    pub fn data(&self) -> &[u8] {
        if self.remote {
            &[]
        } else {
            &self.data[..self.dlc]
        }
    }

    pub fn crc(&self) -> u16 {
        self.crc
    }

    pub fn ack(&self) -> u8 {
        self.ack
    }

    pub fn end_of_frame(&self) -> u8 {
        self.eof
    }

    /// Renders the frame into its multi-line text description. See the
    /// [`fmt::Display`] implementation for the layout.
    pub fn render(&self) -> RenderedFrame {
        let mut result = RenderedFrame::new();

        write!(result, "{self}").expect("Rendered frame exceeds RENDERED_FRAME_SIZE");

        result
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CAN Frame - SOF: {}", self.sof)?;
        writeln!(f, "{} ID: {:#X}", self.id_kind().label(), id_to_raw(self.id))?;
        writeln!(f, "DLC: {}", self.dlc)?;
        if self.remote {
            writeln!(f, "RTR: 1")?;
        }

        f.write_str("Data:")?;
        if !self.data().is_empty() {
            f.write_char(' ')?;
            write_hex_bytes(f, self.data())?;
        }
        f.write_char('\n')?;

        writeln!(f, "CRC: {:#X}", self.crc)?;
        writeln!(f, "ACK: {:#X}", self.ack)?;
        write!(f, "EOF: {:#X}", self.eof)
    }
}

impl embedded_can::Frame for Frame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > MAX_DATA_LENGTH {
            return None;
        }

        Some(Self::assemble(id.into(), false, data.len(), data))
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > MAX_DATA_LENGTH {
            return None;
        }

        Some(Self::assemble(id.into(), true, dlc, &[]))
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.remote
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc
    }

    fn data(&self) -> &[u8] {
        Frame::data(self)
    }
}
