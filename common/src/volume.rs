//! Volume display strings ("45.2M", "620K", "1500")

use crate::numeric::format_fixed;
use tracing::debug;

/// Parse a volume display string into a share count.
///
/// The leading numeric prefix is read (so "45.2M shares" works); an `M`
/// anywhere multiplies by one million, otherwise a `K` by one thousand.
/// Strings without a numeric prefix parse to 0.
pub fn parse_volume(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let prefix_len = numeric_prefix_len(trimmed);

    let base = match trimmed[..prefix_len].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            debug!("Unparseable volume string {:?}, treating as 0", text);
            return 0.0;
        }
    };

    let multiplier = if text.contains('M') {
        1_000_000.0
    } else if text.contains('K') {
        1_000.0
    } else {
        1.0
    };

    (base * multiplier).max(0.0)
}

/// Format a share count back to display form: "33.9M" above one million,
/// "850K" otherwise
pub fn format_volume(shares: f64) -> String {
    if shares > 1_000_000.0 {
        format!("{}M", format_fixed(shares / 1_000_000.0, 1))
    } else {
        format!("{}K", format_fixed(shares / 1_000.0, 0))
    }
}

fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if seen_digit {
        end
    } else {
        0
    }
}
