use chrono::{Days, NaiveDate};

use crate::modules::invoices::models::DeliveryWindow;

/// Delivery date helpers for the document header
pub struct Schedule;

impl Schedule {
    /// Start date plus `days_total` days; saturates at the start date on overflow
    pub fn eta_date(start: NaiveDate, days_total: u32) -> NaiveDate {
        start
            .checked_add_days(Days::new(u64::from(days_total)))
            .unwrap_or(start)
    }

    /// `"Jan 05 – Apr 05"`
    pub fn format_date_range(start: NaiveDate, days_total: u32) -> String {
        let end = Self::eta_date(start, days_total);
        format!("{} – {}", start.format("%b %d"), end.format("%b %d"))
    }

    pub fn eta_description(days_total: u32) -> String {
        match days_total {
            7 => "1 week".to_string(),
            14 => "2 weeks".to_string(),
            30 => "1 month".to_string(),
            60 => "2 months".to_string(),
            90 => "3 months".to_string(),
            n => format!("{} days", n),
        }
    }

    pub fn delivery_window(start: NaiveDate, days_total: u32) -> DeliveryWindow {
        DeliveryWindow {
            start_date: start,
            eta_date: Self::eta_date(start, days_total),
            range: Self::format_date_range(start, days_total),
            description: Self::eta_description(days_total),
        }
    }
}
