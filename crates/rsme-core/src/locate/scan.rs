//! Trailing-window scan for the `//# sourceMappingURL=` directive.

/// Directive token; must start the (whitespace-trimmed) line.
pub const SOURCE_MAPPING_URL_TOKEN: &str = "//# sourceMappingURL=";

/// Returns the raw reference from the last directive line found in the final
/// `window` bytes of `body`.
///
/// When the window starts inside the body, everything up to the first line
/// break in the window is discarded: a cut line is never a candidate, so bytes
/// earlier in the body cannot change the result. Lines are examined from the
/// end; the first one carrying a non-empty value wins.
pub fn find_source_mapping_url(body: &[u8], window: usize) -> Option<String> {
    let start = body.len().saturating_sub(window);
    let mut tail = &body[start..];

    if start > 0 && body[start - 1] != b'\n' {
        let first_break = tail.iter().position(|&b| b == b'\n')?;
        tail = &tail[first_break + 1..];
    }

    let text = String::from_utf8_lossy(tail);
    text.lines().rev().find_map(directive_value)
}

fn directive_value(line: &str) -> Option<String> {
    let value = line.trim().strip_prefix(SOURCE_MAPPING_URL_TOKEN)?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}
