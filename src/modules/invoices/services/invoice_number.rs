use chrono::{Datelike, NaiveDate};
use rand::Rng;

pub const DEFAULT_INVOICE_NUMBER_PATTERN: &str = "INV-{YYYY}-{MM}-{###}";

/// Expand an invoice number pattern for `date`.
///
/// Placeholders: `{YYYY}`, `{YY}`, `{MM}`, `{DD}` and `{###}` (a random
/// number in 100..=999). Each placeholder is replaced once.
pub fn generate_invoice_number(pattern: &str, date: NaiveDate) -> String {
    let suffix = rand::thread_rng().gen_range(100..=999);
    expand_pattern(pattern, date, suffix)
}

fn expand_pattern(pattern: &str, date: NaiveDate, suffix: u32) -> String {
    let year = format!("{:04}", date.year());
    let short_year = &year[year.len() - 2..];

    pattern
        .replacen("{YYYY}", &year, 1)
        .replacen("{YY}", short_year, 1)
        .replacen("{MM}", &format!("{:02}", date.month()), 1)
        .replacen("{DD}", &format!("{:02}", date.day()), 1)
        .replacen("{###}", &suffix.to_string(), 1)
}
