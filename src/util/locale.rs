use chrono::{DateTime, TimeZone};

/// `16/10/2026, 14:05`
pub fn format_datetime_short<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%d/%m/%Y, %H:%M").to_string()
}

/// `16/10/2026, 14:05:33`
pub fn format_datetime_long<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// Brazilian number formatting: `.` groups thousands, `,` separates up to three decimals.
pub fn format_number_pt_br(value: f64) -> String {
    let negative = value < 0.0;
    let thousandths = (value.abs() * 1000.0).round() as u64;
    let integer = thousandths / 1000;
    let fraction = thousandths % 1000;

    let digits = integer.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative && thousandths > 0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction > 0 {
        let decimals = format!("{:03}", fraction);
        out.push(',');
        out.push_str(decimals.trim_end_matches('0'));
    }
    out
}
