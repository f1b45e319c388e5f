use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Indentation width of a pretty-printed output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Two,
    Four,
}

impl Indent {
    fn as_bytes(self) -> &'static [u8] {
        match self {
            Indent::Two => b"  ",
            Indent::Four => b"    ",
        }
    }
}

/// Render a value as pretty-printed UTF-8 JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T, indent: Indent) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Render fully in memory first so a serialization failure never leaves a partial file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, indent: Indent) -> Result<usize> {
    let bytes = render_json(value, indent)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes)?;
    Ok(bytes.len())
}
