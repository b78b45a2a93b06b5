//! File-size formatting for `{size}` and `{size:...}`.
//!
//! Specs: `1b` (raw bytes), `1kb` (whole kilobytes), `1mb` (megabytes, two
//! decimals), `.Nf` (automatic unit with N decimals). Anything else, or no
//! spec, picks the unit automatically with two decimals.

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const DEFAULT_DECIMALS: usize = 2;

pub fn format_size(bytes: u64, spec: &str) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let spec = spec.trim().to_lowercase();
    match spec.as_str() {
        "1b" => format!("{} B", bytes),
        "1kb" => format!("{:.0} KB", bytes as f64 / KB),
        "1mb" => format!("{:.2} MB", bytes as f64 / MB),
        other => format_auto(bytes, decimals_from_spec(other).unwrap_or(DEFAULT_DECIMALS)),
    }
}

/// `.3f` -> 3
fn decimals_from_spec(spec: &str) -> Option<usize> {
    spec.strip_prefix('.')?.strip_suffix('f')?.parse().ok()
}

fn format_auto(bytes: u64, decimals: usize) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= KB && unit < UNITS.len() - 1 {
        size /= KB;
        unit += 1;
    }
    format!("{:.*} {}", decimals, size, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_size(0, ""), "0 B");
        assert_eq!(format_size(0, "1kb"), "0 B");
    }

    #[test]
    fn test_fixed_units() {
        assert_eq!(format_size(2048, "1b"), "2048 B");
        assert_eq!(format_size(2048, "1KB"), "2 KB");
        assert_eq!(format_size(1536, "1kb"), "2 KB");
        assert_eq!(format_size(3 * 1024 * 1024, "1mb"), "3.00 MB");
    }

    #[test]
    fn test_auto() {
        assert_eq!(format_size(500, ""), "500.00 B");
        assert_eq!(format_size(1536, ""), "1.50 KB");
        assert_eq!(format_size(1024 * 1024, ""), "1.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024, "whatever"), "5.00 GB");
    }

    #[test]
    fn test_decimal_spec() {
        assert_eq!(format_size(1536, ".1f"), "1.5 KB");
        assert_eq!(format_size(1536, ".0f"), "2 KB");
        assert_eq!(format_size(1536, ".3f"), "1.500 KB");
        assert_eq!(format_size(1536, ".xf"), "1.50 KB");
    }
}
