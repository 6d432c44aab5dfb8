use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::numeric::numeric_text;

/// Invoice display currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound
    GBP,
    /// Ghanaian Cedi
    GHS,
    /// Nigerian Naira
    NGN,
    /// Kenyan Shilling
    KES,
}

/// Dropdown entry for currency pickers
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyOption {
    pub value: Currency,
    pub label: &'static str,
    pub symbol: &'static str,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::GHS,
        Currency::NGN,
        Currency::KES,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::GHS => "₵",
            Currency::NGN => "₦",
            Currency::KES => "KSh",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::GBP => "British Pound",
            Currency::GHS => "Ghanaian Cedi",
            Currency::NGN => "Nigerian Naira",
            Currency::KES => "Kenyan Shilling",
        }
    }

    pub fn options() -> Vec<CurrencyOption> {
        Self::ALL
            .iter()
            .map(|c| CurrencyOption {
                value: *c,
                label: c.name(),
                symbol: c.symbol(),
            })
            .collect()
    }

    /// Formats with the currency symbol and exactly two decimals: `$ 1,234.50`
    pub fn format_with_symbol(&self, amount: Decimal) -> String {
        format!("{} {}", self.symbol(), format_fixed(amount, 2))
    }
}

/// Symbol-formatted amount for any currency code; unknown codes are used as the symbol
pub fn format_with_symbol(amount: Decimal, code: &str) -> String {
    match code.parse::<Currency>() {
        Ok(currency) => currency.format_with_symbol(amount),
        Err(_) => format!("{} {}", code, format_fixed(amount, 2)),
    }
}

/// Display amount with up to two decimals and thousands separators,
/// optionally prefixed by a currency code: `USD 1,234.5`
pub fn format_amount(amount: Decimal, code: Option<&str>) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let formatted = group_thousands(&rounded.to_string());
    match code {
        Some(code) => format!("{} {}", code, formatted),
        None => formatted,
    }
}

/// Extract a number from display text such as `"$1,234.50"`
pub fn parse_currency(text: &str) -> Decimal {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    numeric_text(&cleaned)
}

fn format_fixed(amount: Decimal, dp: u32) -> String {
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    group_thousands(&format!("{:.width$}", rounded, width = dp as usize))
}

fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::GHS => "GHS",
            Currency::NGN => "NGN",
            Currency::KES => "KES",
        };
        write!(f, "{}", code)
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "GHS" => Ok(Currency::GHS),
            "NGN" => Ok(Currency::NGN),
            "KES" => Ok(Currency::KES),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

impl TryFrom<&str> for Currency {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
