/// Uppercase the first character and leave the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Display a metric value at full precision.
pub fn format_value(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_first_only_touches_first_char() {
        assert_eq!(capitalize_first("accuracy"), "Accuracy");
        assert_eq!(capitalize_first("round 0"), "Round 0");
        assert_eq!(capitalize_first("f1_score"), "F1_score");
        assert_eq!(capitalize_first("ßeta"), "SSeta");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn format_value_drops_trailing_zero_fraction() {
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(0.125), "0.125");
    }
}
