//! Small text/number helpers.

/// Strip the characters OptionAlpha renders inside money values: spaces,
/// dollar signs and thousands separators. Sign and decimal point survive.
pub fn clean_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '$' | ','))
        .collect()
}

/// Normalize a money/quantity label. Empty text and the "--" placeholder
/// the page shows for blank cells are zero; anything else must parse.
pub fn parse_money(raw: &str) -> Option<f64> {
    let cleaned = clean_number(raw);
    if cleaned.is_empty() || cleaned.contains("--") {
        return Some(0.0);
    }
    cleaned.parse().ok()
}

/// Render a parsed number without a trailing ".0" on whole values, so
/// quantities come out as "3" and not "3.0".
pub fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}
