use core::fmt;

use embedded_can::{ExtendedId, Id, StandardId};

use crate::{FrameBuildError, IdKind};

/* Encoding */

pub fn to_hex_digit(value: u32) -> char {
    const HEX_LUT: &[u8] = "0123456789ABCDEF".as_bytes();

    HEX_LUT[(value & 0xF) as usize] as char
}

/// Writes `data` as two-digit uppercase hex bytes separated by single spaces
pub fn write_hex_bytes(f: &mut impl fmt::Write, data: &[u8]) -> fmt::Result {
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }

        f.write_char(to_hex_digit((byte >> 4) as u32))?;
        f.write_char(to_hex_digit(*byte as u32))?;
    }

    Ok(())
}

/// Raw numeric value of an identifier, regardless of its kind
pub fn id_to_raw(id: Id) -> u32 {
    match id {
        Id::Standard(standard_id) => standard_id.as_raw() as u32,
        Id::Extended(extended_id) => extended_id.as_raw(),
    }
}

/* Validation */

pub fn standard_id_from_raw(value: u32) -> Result<StandardId, FrameBuildError> {
    u16::try_from(value)
        .ok()
        .and_then(StandardId::new)
        .ok_or(FrameBuildError::IdentifierOutOfRange {
            kind: IdKind::Standard,
            value,
        })
}

pub fn extended_id_from_raw(value: u32) -> Result<ExtendedId, FrameBuildError> {
    ExtendedId::new(value).ok_or(FrameBuildError::IdentifierOutOfRange {
        kind: IdKind::Extended,
        value,
    })
}

pub fn id_from_raw(value: u32, extended: bool) -> Result<Id, FrameBuildError> {
    Ok(match IdKind::from(extended) {
        IdKind::Standard => Id::Standard(standard_id_from_raw(value)?),
        IdKind::Extended => Id::Extended(extended_id_from_raw(value)?),
    })
}

#[cfg(test)]
mod tests {
    use embedded_can::{ExtendedId, Id, StandardId};
    use heapless::String;

    use super::{id_from_raw, id_to_raw, write_hex_bytes};
    use crate::{FrameBuildError, IdKind};

    #[test]
    fn hex_bytes_are_space_separated() {
        let mut out = String::<32>::new();
        write_hex_bytes(&mut out, &[0x0A, 0xFF, 0x00]).unwrap();
        assert_eq!(out.as_str(), "0A FF 00");

        let mut empty = String::<4>::new();
        write_hex_bytes(&mut empty, &[]).unwrap();
        assert_eq!(empty.as_str(), "");
    }

    #[test]
    fn id_range_limits() {
        assert_eq!(id_from_raw(0x7FF, false), Ok(Id::Standard(StandardId::MAX)));
        assert_eq!(
            id_from_raw(0x1FFF_FFFF, true),
            Ok(Id::Extended(ExtendedId::MAX))
        );

        assert_eq!(
            id_from_raw(0x800, false),
            Err(FrameBuildError::IdentifierOutOfRange {
                kind: IdKind::Standard,
                value: 0x800
            })
        );
        // Larger than u16 must not wrap into range
        assert_eq!(
            id_from_raw(0x1_0123, false),
            Err(FrameBuildError::IdentifierOutOfRange {
                kind: IdKind::Standard,
                value: 0x1_0123
            })
        );
        assert_eq!(
            id_from_raw(0x2000_0000, true),
            Err(FrameBuildError::IdentifierOutOfRange {
                kind: IdKind::Extended,
                value: 0x2000_0000
            })
        );
    }

    #[test]
    fn raw_value_of_either_kind() {
        assert_eq!(id_to_raw(id_from_raw(0x123, false).unwrap()), 0x123);
        assert_eq!(id_to_raw(id_from_raw(0x1ABCDEF, true).unwrap()), 0x1ABCDEF);
    }
}
