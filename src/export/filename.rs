use super::format::ExportFormat;
use crate::track::TrackMetadata;

const ILLEGAL_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];
const FALLBACK_EXTENSION: &str = "txt";

/// `<name>.<ext>` for a download; unknown format keys get a `.txt` extension.
pub fn file_name(metadata: &TrackMetadata, format: &str) -> String {
    let name: String = metadata
        .display_name()
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .collect();
    let extension = ExportFormat::from_key(format)
        .map(|f| f.extension())
        .unwrap_or(FALLBACK_EXTENSION);
    format!("{}.{}", name, extension)
}

/// `Content-Disposition` value with an ASCII `filename` for older clients and
/// the percent-encoded UTF-8 name in `filename*`.
pub fn content_disposition(file_name: &str) -> String {
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_fallback(file_name),
        percent_encode(file_name)
    )
}

fn ascii_fallback(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => ' ',
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect()
}

fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
