use crate::constants::{
    OEM_CHUNK_SIZE, OEM_CHUNK_TOKEN_LEN, OEM_COMMAND_PREFIX, OEM_MARKER, OEM_TOKEN_BOUNDARY,
    OEM_TOKEN_LEN,
};
use crate::field::{ExtractedField, FieldKind};
use crate::utils::{SliceExt, render_bytes};
use itertools::Itertools;
use std::slice::Iter;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum OemScanStrategy {
    /// Every `oem ` marker in the image opens a window.
    #[default]
    WholeBuffer,
    /// The image is walked in fixed-size chunks and only markers lying
    /// entirely inside one chunk are seen.
    Chunked,
}

#[derive(Debug, Clone)]
pub struct OemScanOptions {
    pub strategy: OemScanStrategy,
    /// Bytes kept after each marker.
    pub token_len: usize,
    pub chunk_size: usize,
}

impl Default for OemScanOptions {
    fn default() -> Self {
        Self {
            strategy: OemScanStrategy::WholeBuffer,
            token_len: OEM_TOKEN_LEN,
            chunk_size: OEM_CHUNK_SIZE,
        }
    }
}

impl OemScanOptions {
    pub fn chunked() -> Self {
        Self {
            strategy: OemScanStrategy::Chunked,
            token_len: OEM_CHUNK_TOKEN_LEN,
            chunk_size: OEM_CHUNK_SIZE,
        }
    }
}

/// A slice of the image that starts at an `oem ` marker.
#[derive(Debug, Copy, Clone)]
pub struct OemWindow<'a> {
    pub offset: usize,
    pub data: &'a [u8],
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OemCommandSet {
    commands: Vec<ExtractedField>,
}

impl OemCommandSet {
    /// Keeps the first occurrence of every command, in order.
    pub fn from_commands<I: IntoIterator<Item = ExtractedField>>(commands: I) -> Self {
        Self {
            commands: commands
                .into_iter()
                .unique_by(|c| c.value.clone())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, ExtractedField> {
        self.commands.iter()
    }

    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|c| c.value.as_str())
    }

    pub fn contains(&self, command: &str) -> bool {
        self.commands().any(|c| c == command)
    }
}

fn window_at(data: &[u8], offset: usize, token_len: usize) -> OemWindow<'_> {
    let end = offset
        .saturating_add(OEM_MARKER.len() + token_len)
        .min(data.len());
    OemWindow {
        offset,
        data: &data[offset..end],
    }
}

pub fn collect_windows<'a>(data: &'a [u8], options: &OemScanOptions) -> Vec<OemWindow<'a>> {
    match options.strategy {
        OemScanStrategy::WholeBuffer => data
            .find_all(OEM_MARKER)
            .into_iter()
            .map(|off| window_at(data, off, options.token_len))
            .collect(),
        OemScanStrategy::Chunked => {
            let chunk_size = options.chunk_size.max(OEM_MARKER.len());
            data.chunks(chunk_size)
                .enumerate()
                .flat_map(|(i, chunk)| {
                    chunk
                        .find_all(OEM_MARKER)
                        .into_iter()
                        .map(move |off| i * chunk_size + off)
                })
                .map(|off| window_at(data, off, options.token_len))
                .collect()
        }
    }
}

/// Cuts a command token at the first boundary character.
pub fn normalize_token(piece: &str) -> Option<&str> {
    let end = piece.find(OEM_TOKEN_BOUNDARY).unwrap_or(piece.len());
    let token = &piece[..end];
    if token.is_empty() { None } else { Some(token) }
}

/// Splits a window on every `oem ` marker it holds and turns the text after
/// each one into a `fastboot oem <token>` command.
pub fn split_window(window: &OemWindow<'_>) -> Vec<ExtractedField> {
    let markers = window.data.find_all(OEM_MARKER);
    if std::str::from_utf8(window.data).is_err() {
        log::debug!("oem window at 0x{:x} is not utf-8, using escaped bytes", window.offset);
    }

    markers
        .iter()
        .enumerate()
        .filter_map(|(i, &off)| {
            let start = off + OEM_MARKER.len();
            let end = markers.get(i + 1).copied().unwrap_or(window.data.len());
            let piece = render_bytes(&window.data[start..end]);
            normalize_token(&piece).map(|token| ExtractedField {
                kind: FieldKind::OemCommand,
                offset: window.offset + off,
                value: format!("{} {}", OEM_COMMAND_PREFIX, token),
            })
        })
        .collect()
}

pub fn scan_oem_commands(data: &[u8], options: &OemScanOptions) -> OemCommandSet {
    let windows = collect_windows(data, options);
    let commands = OemCommandSet::from_commands(windows.iter().flat_map(split_window));
    log::info!(
        "found {} oem commands in {} windows ({:?})",
        commands.len(),
        windows.len(),
        options.strategy
    );
    commands
}
