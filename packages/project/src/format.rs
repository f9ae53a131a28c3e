//! Number formatting for detail rows and dashboard figures.

/// Formats a number with thousands separators and at most three fraction
/// digits (`1234567.5` -> `"1,234,567.5"`).
#[must_use]
pub fn format_number(n: f64) -> String {
    format_grouped(n, 3)
}

/// Formats hectares compactly: `"1.2M ha"`, `"45k ha"` or `"950 ha"`.
#[must_use]
pub fn format_area_ha(hectares: f64) -> String {
    if hectares >= 1_000_000.0 {
        format!("{:.1}M ha", hectares / 1_000_000.0)
    } else if hectares >= 1_000.0 {
        format!("{:.0}k ha", hectares / 1_000.0)
    } else {
        format!("{} ha", format_number(hectares))
    }
}

/// Formats square kilometers rounded to whole units: `"3,450 km²"`.
#[must_use]
pub fn format_area_km2(km2: f64) -> String {
    format!("{} km²", format_grouped(km2, 0))
}

/// Formats a USD amount: `"$1,250,000"`.
#[must_use]
pub fn format_money(usd: f64) -> String {
    format!("${}", format_number(usd))
}

/// Formats a large count in millions with one decimal: `"3.2M"`.
#[must_use]
pub fn format_millions(n: f64) -> String {
    format!("{:.1}M", n / 1_000_000.0)
}

fn format_grouped(n: f64, max_fraction_digits: usize) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    let fixed = format!("{:.*}", max_fraction_digits, n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let sign = if n < 0.0 && !is_zero { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
