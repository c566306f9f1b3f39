//! Display strings for years, populations and resource quantities.

pub fn format_year(year: i64) -> String {
    if year < 0 {
        format!("{} BCE", year.unsigned_abs())
    } else {
        format!("{year} CE")
    }
}

/// Decimal representation with `,` between thousands groups.
pub fn format_population(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_fixed2(x: f64) -> String {
    format!("{x:.2}")
}

/// Like [`format_fixed2`], with `∞` standing in for a figure that has no finite value.
pub fn format_optional_fixed2(x: Option<f64>) -> String {
    match x {
        Some(value) if value.is_finite() => format_fixed2(value),
        _ => "∞".to_string(),
    }
}
