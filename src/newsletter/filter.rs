use regex::Regex;
use std::sync::LazyLock;

pub const THINK_START: &str = "<think>";
pub const THINK_END: &str = "</think>";

// Shortest span between a start and an end marker, across newlines.
static THINK_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<think>.*?</think>").expect("think-pair pattern is hardcoded and valid")
});

/// Removes chain-of-thought blocks (markers included) from model output.
///
/// Each round runs the primary non-greedy pass and, when a lone marker is
/// still left over, the [`collapse_outer_span`] fallback. Rounds repeat until
/// the text stops changing, so `strip(strip(x)) == strip(x)` holds even when a
/// removal splices two fragments into a fresh marker.
pub fn strip(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = strip_round(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

pub fn contains_marker(text: &str) -> bool {
    text.contains(THINK_START) || text.contains(THINK_END)
}

fn strip_round(text: &str) -> String {
    let cleaned = THINK_PAIR.replace_all(text, "");
    if contains_marker(&cleaned) {
        if let Some(collapsed) = collapse_outer_span(text) {
            return collapsed;
        }
    }
    cleaned.into_owned()
}

/// Fallback for unbalanced output: drops everything from the first start marker
/// through the last end marker.
///
/// Known limitation: with nested or repeated unmatched markers this removes the
/// whole outer span, including any answer text sitting between blocks. A start
/// marker with no end marker after it is left alone, since there is no way to
/// tell where the reasoning stops.
pub fn collapse_outer_span(text: &str) -> Option<String> {
    let start = text.find(THINK_START)?;
    let end = text.rfind(THINK_END)?;
    if end < start {
        return None;
    }

    let mut collapsed = String::with_capacity(text.len());
    collapsed.push_str(&text[..start]);
    collapsed.push_str(&text[end + THINK_END.len()..]);
    Some(collapsed)
}
