/// Size formatting and parsing -- human-readable byte counts.
///
/// All internal sizes are `u64` bytes. Floating point is only used at the
/// display boundary, and parsing is deliberately forgiving: text that does
/// not look like a size parses to zero instead of failing, so a malformed
/// entry still shows up in the listing while weighing nothing in the chart.

/// Unit labels in ascending order. Binary scaling (1 KB = 1024 B) with the
/// short labels users expect in a disk tool.
const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

const STEP: f64 = 1024.0;

/// Format a byte count using the largest unit whose scaled value is at
/// least 1, always with two decimals. Zero is rendered as `"0 B"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= STEP && unit < UNITS.len() - 1 {
        value /= STEP;
        unit += 1;
    }

    format!("{:.2} {}", value, UNITS[unit])
}

/// Parse a size such as `"2.50 GB"` or `"17kb"` back into bytes.
///
/// Accepts a non-negative decimal magnitude followed by one of
/// `B`, `KB`, `MB`, `GB`, `TB` (case-insensitive, optional whitespace in
/// between). Anything else yields `0`.
pub fn parse_size(text: &str) -> u64 {
    let text = text.trim();
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    let (magnitude, unit) = text.split_at(split);

    if magnitude.is_empty() {
        return 0;
    }
    let value: f64 = match magnitude.parse() {
        Ok(v) => v,
        Err(_) => return 0,
    };

    let unit = unit.trim();
    let exponent = match UNITS
        .iter()
        .position(|label| label.eq_ignore_ascii_case(unit))
    {
        Some(pos) => pos as i32,
        None => return 0,
    };

    (value * STEP.powi(exponent)).round() as u64
}

/// Format a file count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Percentage of `part` in `total`, `0.0` when `total` is zero.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_zero() {
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn test_format_bytes_small() {
        assert_eq!(format_bytes(1), "1.00 B");
        assert_eq!(format_bytes(1023), "1023.00 B");
    }

    #[test]
    fn test_format_bytes_kb() {
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
    }

    #[test]
    fn test_format_bytes_large_units() {
        assert_eq!(format_bytes(1_048_576), "1.00 MB");
        assert_eq!(format_bytes(1_073_741_824), "1.00 GB");
        assert_eq!(format_bytes(1_099_511_627_776), "1.00 TB");
        // TB is the largest unit; no PB rollover.
        assert_eq!(format_bytes(2048 * 1_099_511_627_776), "2048.00 TB");
    }

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("2.50 GB"), (2.5 * 1024f64.powi(3)) as u64);
        assert_eq!(parse_size("1.00 KB"), 1024);
        assert_eq!(parse_size("512 B"), 512);
        assert_eq!(parse_size("3 TB"), 3 * 1_099_511_627_776);
    }

    #[test]
    fn test_parse_size_is_case_insensitive() {
        assert_eq!(parse_size("1.5kb"), 1536);
        assert_eq!(parse_size("1MB"), 1_048_576);
        assert_eq!(parse_size("  2 gB  "), 2 * 1_073_741_824);
    }

    #[test]
    fn test_parse_size_garbage_is_zero() {
        assert_eq!(parse_size("garbage"), 0);
        assert_eq!(parse_size(""), 0);
        assert_eq!(parse_size("KB"), 0);
        assert_eq!(parse_size("12 PB"), 0);
        assert_eq!(parse_size("1.2.3 MB"), 0);
        assert_eq!(parse_size("-4 KB"), 0);
        assert_eq!(parse_size("512 bytes"), 0);
    }

    #[test]
    fn test_parse_of_format_is_close() {
        for n in [0u64, 1, 999, 1024, 1536, 10_000, 5_000_000, 123_456_789_012] {
            let back = parse_size(&format_bytes(n));
            let tolerance = (n as f64 * 0.005).max(1.0);
            assert!(
                (back as f64 - n as f64).abs() <= tolerance,
                "{n} -> {} -> {back}",
                format_bytes(n)
            );
        }
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(50, 200), 25.0);
        assert_eq!(percentage(10, 0), 0.0);
    }
}
