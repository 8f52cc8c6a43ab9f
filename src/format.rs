//! Display formatting for prices, market figures, scheme amounts (INR) and
//! sparkline strips. Rules here are load-bearing: tests pin them exactly.

const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Compact a USD magnitude: `$2.40T`, `$81.20B`, `$5.12M`, below a million
/// the raw value with thousands separators. Zero and non-finite render `$0`.
pub fn format_compact_usd(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "$0".to_string();
    }
    if value >= 1e12 {
        return format!("${}T", to_fixed(value / 1e12, 2));
    }
    if value >= 1e9 {
        return format!("${}B", to_fixed(value / 1e9, 2));
    }
    if value >= 1e6 {
        return format!("${}M", to_fixed(value / 1e6, 2));
    }
    format!("${}", group_thousands(value.round() as u64))
}

/// Format a coin price: values at or above a dollar get thousands grouping
/// and exactly two decimals, sub-dollar values keep six decimals so small
/// tokens stay legible. Zero and non-finite render `$0.00`.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "$0.00".to_string();
    }
    if value >= 1.0 {
        return format!("${}", group_fixed2(value));
    }
    format!("${}", to_fixed(value, 6))
}

/// Ticker prices always use two decimals with grouping, regardless of
/// magnitude.
pub fn format_ticker_price(value: f64) -> String {
    if !value.is_finite() {
        return "$0.00".to_string();
    }
    format!("${}", group_fixed2(value))
}

/// Sign-explicit 2-decimal percent: `+4.20%`, `-1.23%`.
pub fn format_signed_percent(value: f64) -> String {
    if !value.is_finite() {
        return "+0.00%".to_string();
    }
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{}%", to_fixed(value, 2))
}

/// Unsigned 2-decimal percent with a direction marker, as the market table
/// shows it: `▲ 4.20%` / `▼ 1.23%`.
pub fn format_percent_with_arrow(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let arrow = if value >= 0.0 { '▲' } else { '▼' };
    format!("{arrow} {}%", to_fixed(value.abs(), 2))
}

/// One-decimal percent, used for the BTC dominance stat.
pub fn format_percent_1dp(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{}%", to_fixed(value, 1))
}

/// Thousands-grouped integer, for counters like active cryptocurrencies.
pub fn format_count(value: u64) -> String {
    group_thousands(value)
}

/// Full INR amount with Indian digit grouping: `Rs.25,00,000`.
pub fn format_inr(amount: i64) -> String {
    if amount < 0 {
        return format!("-Rs.{}", group_indian(amount.unsigned_abs()));
    }
    format!("Rs.{}", group_indian(amount as u64))
}

/// Compact INR for scheme cards: lakhs at or above 1,00,000 (whole lakhs
/// drop the decimal), thousands as `K`, small amounts raw.
pub fn format_inr_compact(amount: i64) -> String {
    if amount >= 100_000 {
        let lakhs = amount as f64 / 100_000.0;
        if amount % 100_000 == 0 {
            return format!("Rs.{} Lakhs", amount / 100_000);
        }
        let tenths = (lakhs * 10.0).round() as i64;
        return format!("Rs.{}.{} Lakhs", tenths / 10, tenths % 10);
    }
    if amount >= 1000 {
        return format!("Rs.{}K", (amount as f64 / 1000.0).round() as i64);
    }
    format!("Rs.{amount}")
}

/// Thin a price series to roughly 30 points for rendering. Stride is
/// `ceil(len / 30)` and the source slice is never modified.
pub fn downsample_sparkline(samples: &[f64]) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }
    let stride = samples.len().div_ceil(30);
    samples
        .iter()
        .copied()
        .enumerate()
        .filter(|(i, _)| i % stride == 0)
        .map(|(_, v)| v)
        .collect()
}

/// Render a price series as a block-glyph strip, downsampled first. A flat
/// series renders as a line of middle blocks; empty input renders empty.
pub fn sparkline_strip(samples: &[f64]) -> String {
    let points = downsample_sparkline(samples);
    if points.is_empty() {
        return String::new();
    }
    let min = points.iter().copied().fold(f64::INFINITY, f64::min);
    let max = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    points
        .iter()
        .map(|&v| {
            if span == 0.0 {
                SPARK_GLYPHS[3]
            } else {
                let norm = (v - min) / span;
                let idx = (norm * (SPARK_GLYPHS.len() - 1) as f64).round() as usize;
                SPARK_GLYPHS[idx.min(SPARK_GLYPHS.len() - 1)]
            }
        })
        .collect()
}

/// Fixed-decimal rendering with ties rounded away from zero.
fn to_fixed(value: f64, decimals: u32) -> String {
    let factor = 10f64.powi(decimals as i32);
    let scaled = (value * factor).round();
    let sign = if scaled < 0.0 { "-" } else { "" };
    let magnitude = scaled.abs();
    let whole = (magnitude / factor).trunc() as u64;
    let frac = (magnitude % factor) as u64;
    if decimals == 0 {
        return format!("{sign}{whole}");
    }
    format!("{sign}{whole}.{frac:0width$}", width = decimals as usize)
}

/// Two decimals plus thousands grouping on the integer part.
fn group_fixed2(value: f64) -> String {
    let scaled = (value * 100.0).round();
    let whole = (scaled / 100.0).trunc() as u64;
    let cents = (scaled.abs() % 100.0) as u64;
    format!("{}.{cents:02}", group_thousands(whole))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Indian grouping: the last three digits, then pairs. `2500000` becomes
/// `25,00,000`.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::new();
    let head_chars: Vec<char> = head.chars().collect();
    for (i, c) in head_chars.iter().enumerate() {
        if i > 0 && (head_chars.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    grouped.push(',');
    grouped.push_str(tail);
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_usd_trillions() {
        assert_eq!(format_compact_usd(2.4e12), "$2.40T");
    }

    #[test]
    fn test_compact_usd_billions_and_millions() {
        assert_eq!(format_compact_usd(81.2e9), "$81.20B");
        assert_eq!(format_compact_usd(5_120_000.0), "$5.12M");
    }

    #[test]
    fn test_compact_usd_below_a_million_groups_thousands() {
        assert_eq!(format_compact_usd(950_000.0), "$950,000");
    }

    #[test]
    fn test_compact_usd_zero_and_nan() {
        assert_eq!(format_compact_usd(0.0), "$0");
        assert_eq!(format_compact_usd(f64::NAN), "$0");
    }

    #[test]
    fn test_price_two_decimals_with_grouping() {
        assert_eq!(format_price(1234.5), "$1,234.50");
        assert_eq!(format_price(1.0), "$1.00");
    }

    #[test]
    fn test_price_six_decimals_below_one() {
        assert_eq!(format_price(0.0000456), "$0.000046");
        assert_eq!(format_price(0.5), "$0.500000");
    }

    #[test]
    fn test_price_zero_and_nan() {
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(f64::NAN), "$0.00");
    }

    #[test]
    fn test_ticker_price_always_two_decimals() {
        assert_eq!(format_ticker_price(0.0000456), "$0.00");
        assert_eq!(format_ticker_price(67234.12), "$67,234.12");
    }

    #[test]
    fn test_signed_percent() {
        assert_eq!(format_signed_percent(4.2), "+4.20%");
        assert_eq!(format_signed_percent(-1.234), "-1.23%");
        assert_eq!(format_signed_percent(-0.5), "-0.50%");
        assert_eq!(format_signed_percent(0.0), "+0.00%");
    }

    #[test]
    fn test_percent_with_arrow_uses_magnitude() {
        assert_eq!(format_percent_with_arrow(4.2), "▲ 4.20%");
        assert_eq!(format_percent_with_arrow(-1.234), "▼ 1.23%");
    }

    #[test]
    fn test_inr_indian_grouping() {
        assert_eq!(format_inr(500), "Rs.500");
        assert_eq!(format_inr(1000), "Rs.1,000");
        assert_eq!(format_inr(100_000), "Rs.1,00,000");
        assert_eq!(format_inr(2_500_000), "Rs.25,00,000");
    }

    #[test]
    fn test_inr_compact_lakhs() {
        assert_eq!(format_inr_compact(100_000), "Rs.1 Lakhs");
        assert_eq!(format_inr_compact(250_000), "Rs.2.5 Lakhs");
        assert_eq!(format_inr_compact(2_500_000), "Rs.25 Lakhs");
    }

    #[test]
    fn test_inr_compact_thousands_and_raw() {
        assert_eq!(format_inr_compact(5000), "Rs.5K");
        assert_eq!(format_inr_compact(25_000), "Rs.25K");
        assert_eq!(format_inr_compact(500), "Rs.500");
    }

    #[test]
    fn test_downsample_short_series_kept_whole() {
        let data: Vec<f64> = (0..20).map(|i| i as f64).collect();
        assert_eq!(downsample_sparkline(&data), data);
    }

    #[test]
    fn test_downsample_stride_is_ceil_len_over_thirty() {
        let data: Vec<f64> = (0..168).map(|i| i as f64).collect();
        let sampled = downsample_sparkline(&data);
        // stride = ceil(168/30) = 6, keeps indices 0, 6, 12, ...
        assert_eq!(sampled.len(), 28);
        assert_eq!(sampled[0], 0.0);
        assert_eq!(sampled[1], 6.0);
        // source untouched
        assert_eq!(data.len(), 168);
    }

    #[test]
    fn test_downsample_empty() {
        assert!(downsample_sparkline(&[]).is_empty());
    }

    #[test]
    fn test_sparkline_strip_shapes() {
        assert_eq!(sparkline_strip(&[]), "");
        assert_eq!(sparkline_strip(&[1.0, 1.0, 1.0]), "▄▄▄");
        let strip = sparkline_strip(&[0.0, 1.0]);
        assert_eq!(strip, "▁█");
    }
}
