//! Managed stack block inside proposal descriptions
//!
//! The stack is kept between [`STACK_START_MARKER`] and [`STACK_END_MARKER`]
//! so it can be replaced on every sync without touching the rest of the body.

/// First line of the managed block
pub const STACK_START_MARKER: &str = "<!-- branch-stack -->";

/// Last line of the managed block
pub const STACK_END_MARKER: &str = "<!-- branch-stack-end -->";

/// Put `content` into the managed block of `body`
///
/// - no start marker: append a new block (separated by a blank line unless
///   `body` is empty)
/// - start and end marker: replace what lies between them
/// - start marker only (older bodies): the block ends at the first blank
///   line (`\n` or `\r\n` endings), or at the end of the body; the end
///   marker is added
///
/// Text outside the block is kept byte for byte. Applying the same content
/// twice gives the same body.
pub fn splice_stack_into_body(body: &str, content: &str) -> String {
    let Some(start) = body.find(STACK_START_MARKER) else {
        let block = format!("{STACK_START_MARKER}\n{content}\n{STACK_END_MARKER}");
        if body.is_empty() {
            return block;
        }
        return format!("{body}\n\n{block}");
    };

    let head_end = start + STACK_START_MARKER.len();
    let head = &body[..head_end];
    let rest = &body[head_end..];

    if let Some(end) = rest.find(STACK_END_MARKER) {
        return format!("{head}\n{content}\n{}", &rest[end..]);
    }

    match blank_line(rest) {
        Some(boundary) => format!("{head}\n{content}\n{STACK_END_MARKER}{}", &rest[boundary..]),
        None => format!("{head}\n{content}\n{STACK_END_MARKER}"),
    }
}

/// Offset of the first blank line, with `\n` or `\r\n` line endings
fn blank_line(text: &str) -> Option<usize> {
    [text.find("\n\n"), text.find("\r\n\r\n")]
        .into_iter()
        .flatten()
        .min()
}
