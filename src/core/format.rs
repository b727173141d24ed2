use chrono::NaiveDate;

pub const DATE_FORMAT_BR: &str = "%d/%m/%Y";

/// Brazilian currency text: `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    // -0.001 rounds to zero and must not print a sign.
    let sign = if value < 0.0 && fixed.chars().any(|c| matches!(c, '1'..='9')) {
        "-"
    } else {
        ""
    };
    format!("R$ {}{},{}", sign, grouped, frac_part)
}

/// Rounds to cents, the precision every document amount is shown with.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

pub fn parse_date_br(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT_BR).ok()
}

pub fn format_date_br(date: NaiveDate) -> String {
    date.format(DATE_FORMAT_BR).to_string()
}
