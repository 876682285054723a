use std::fmt::Write;

pub trait SliceExt {
    fn u32_at(&self, offset: usize) -> Option<u32>;
    fn find(&self, needle: &[u8]) -> Option<usize>;
    fn find_all(&self, needle: &[u8]) -> Vec<usize>;
    fn contains_seq(&self, needle: &[u8]) -> bool;
}

impl SliceExt for [u8] {
    fn u32_at(&self, offset: usize) -> Option<u32> {
        self.get(offset..offset.checked_add(4)?)
            .and_then(|data| data.try_into().ok())
            .map(u32::from_le_bytes)
    }

    fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        self.windows(needle.len()).position(|window| window == needle)
    }

    // Non-overlapping, left to right.
    fn find_all(&self, needle: &[u8]) -> Vec<usize> {
        let mut found = Vec::new();
        if needle.is_empty() {
            return found;
        }
        let mut off = 0;
        while let Some(pos) = self[off..].find(needle) {
            found.push(off + pos);
            off += pos + needle.len();
        }
        found
    }

    fn contains_seq(&self, needle: &[u8]) -> bool {
        self.find(needle).is_some()
    }
}

pub fn trim_end(data: &[u8]) -> &[u8] {
    &data[..data.iter().position(|&b| b == 0).unwrap_or(data.len())]
}

/// Renders arbitrary bytes as printable text. Printable ASCII is kept as is,
/// everything else becomes a backslash escape, so the result always starts a
/// non-printable run with `\`.
pub fn render_bytes(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    for &b in data {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\x{:02x}", b);
            }
        }
    }
    out
}
