pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{amount:.0}")
    } else {
        let text = format!("{amount:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}

pub fn display_timestamp(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return "no timestamp".to_owned();
    }
    timestamp.replacen('T', " ", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts_have_no_decimals() {
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(7.777), "7.78");
        assert_eq!(format_amount(2.5001), "2.5");
    }

    #[test]
    fn timestamps_drop_the_iso_separator() {
        assert_eq!(display_timestamp("2025-02-11T14:20:53"), "2025-02-11 14:20:53");
        assert_eq!(display_timestamp(""), "no timestamp");
    }
}
