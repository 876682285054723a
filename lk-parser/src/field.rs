use crate::constants::NOT_AVAILABLE;
use crate::utils::{SliceExt, trim_end};
use std::fmt::{Display, Formatter};
use std::str::{Utf8Error, from_utf8};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum FieldKind {
    Cmdline,
    Platform,
    Product,
    OemCommand,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ExtractedField {
    pub kind: FieldKind,
    pub offset: usize,
    pub value: String,
}

/// Outcome of recovering one field from the image. A missing marker or
/// undecodable bytes only affect the field itself.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Field {
    Found(ExtractedField),
    Absent,
    Invalid {
        kind: FieldKind,
        offset: usize,
        error: Utf8Error,
    },
}

impl Field {
    pub fn value(&self) -> Option<&str> {
        match self {
            Field::Found(field) => Some(field.value.as_str()),
            _ => None,
        }
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            Field::Found(field) => Some(field.offset),
            Field::Invalid { offset, .. } => Some(*offset),
            Field::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub(crate) fn map_value<F: FnOnce(&str) -> String>(self, f: F) -> Self {
        match self {
            Field::Found(field) => Field::Found(ExtractedField {
                value: f(&field.value),
                ..field
            }),
            other => other,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Found(field) => f.write_str(&field.value),
            Field::Absent => f.write_str(NOT_AVAILABLE),
            Field::Invalid { offset, error, .. } => {
                f.write_fmt(format_args!("<invalid text at 0x{:x}: {}>", offset, error))
            }
        }
    }
}

pub(crate) fn decode_field(kind: FieldKind, offset: usize, raw: &[u8]) -> Field {
    match from_utf8(raw) {
        Ok(value) => Field::Found(ExtractedField {
            kind,
            offset,
            value: value.to_string(),
        }),
        Err(error) => {
            log::warn!("{:?} at 0x{:x} is not valid utf-8: {}", kind, offset, error);
            Field::Invalid {
                kind,
                offset,
                error,
            }
        }
    }
}

/// Finds the first `marker` in `data` and reads the NUL-terminated string
/// starting `skip` bytes after it. The read stops at the end of the buffer
/// when no NUL follows.
pub fn locate_cstr(data: &[u8], kind: FieldKind, marker: &[u8], skip: usize) -> Field {
    let Some(pos) = data.find(marker) else {
        log::debug!("{:?}: marker {:?} not found", kind, String::from_utf8_lossy(marker));
        return Field::Absent;
    };
    let start = pos.saturating_add(skip).min(data.len());
    decode_field(kind, start, trim_end(&data[start..]))
}

/// Reads exactly `size` bytes following the first `marker`, or fewer when the
/// buffer ends first.
pub fn locate_fixed(data: &[u8], kind: FieldKind, marker: &[u8], size: usize) -> Field {
    let Some(pos) = data.find(marker) else {
        log::debug!("{:?}: marker {:?} not found", kind, String::from_utf8_lossy(marker));
        return Field::Absent;
    };
    let start = pos + marker.len();
    let end = start.saturating_add(size).min(data.len());
    decode_field(kind, start, &data[start..end])
}
