//! Formatting helpers for presenting sizes and server-supplied numbers.

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human readable byte count using base-1024 scaling and at most two decimals.
///
/// `0` formats as `"0 Bytes"`; anything beyond the gigabyte range stays in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimals(scaled, 2), SIZE_UNITS[unit])
}

/// en-US style number: thousands separators, up to three fraction digits.
pub fn format_locale_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = trim_decimals(value.abs(), 3);
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));

    let mut out = String::new();
    if value < 0.0 && rendered != "0" {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Render a JSON scalar the way the dashboard shows stat card values.
pub fn format_stat_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Number(number) => number
            .as_f64()
            .map(format_locale_number)
            .unwrap_or_else(|| number.to_string()),
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Null => "n/a".to_string(),
        other => other.to_string(),
    }
}

/// Fixed-point rendering with trailing zeros (and a dangling point) removed.
fn trim_decimals(value: f64, places: usize) -> String {
    let fixed = format!("{value:.places$}");
    if !fixed.contains('.') {
        return fixed;
    }
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_sizes_pick_the_largest_unit() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(10 * 1024 * 1024 + 1), "10 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn sizes_beyond_gigabytes_stay_in_gb() {
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn locale_numbers_group_and_trim() {
        assert_eq!(format_locale_number(1234.0), "1,234");
        assert_eq!(format_locale_number(1_234_567.891), "1,234,567.891");
        assert_eq!(format_locale_number(12.5), "12.5");
        assert_eq!(format_locale_number(0.12345), "0.123");
        assert_eq!(format_locale_number(-9876.5), "-9,876.5");
        assert_eq!(format_locale_number(999.0), "999");
    }

    #[test]
    fn counts_use_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(150_000), "150,000");
    }

    #[test]
    fn stat_values_keep_strings_verbatim() {
        assert_eq!(format_stat_value(&json!(2500)), "2,500");
        assert_eq!(format_stat_value(&json!(48.25)), "48.25");
        assert_eq!(format_stat_value(&json!("n/a")), "n/a");
    }
}
