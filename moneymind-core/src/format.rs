//! Presentation formatting for amounts and month labels.
//!
//! Locale and currency are always passed in explicitly; the aggregation
//! itself only ever produces raw numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::month::{MonthKey, SHORT_MONTHS_EN};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unsupported locale {0:?} (expected one of: en, pt, es, de)")]
    UnknownLocale(String),
    #[error("unsupported currency {0:?} (expected one of: EUR, USD, BRL, GBP)")]
    UnknownCurrency(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pt,
    Es,
    De,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Pt, Locale::Es, Locale::De];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pt => "pt",
            Locale::Es => "es",
            Locale::De => "de",
        }
    }

    fn separators(&self) -> (char, char) {
        // (thousands, decimal)
        match self {
            Locale::En => (',', '.'),
            Locale::Pt | Locale::Es | Locale::De => ('.', ','),
        }
    }

    fn short_months(&self) -> [&'static str; 12] {
        match self {
            Locale::En => SHORT_MONTHS_EN,
            Locale::Pt => [
                "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.",
                "nov.", "dez.",
            ],
            Locale::Es => [
                "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
            ],
            Locale::De => [
                "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.",
                "Nov.", "Dez.",
            ],
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = FormatError;

    /// Accepts bare language codes and regional tags ("pt-BR", "de_DE").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        Locale::ALL
            .into_iter()
            .find(|l| l.code() == lang)
            .ok_or_else(|| FormatError::UnknownLocale(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Brl,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Eur, Currency::Usd, Currency::Brl, Currency::Gbp];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Brl => "BRL",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Brl => "R$",
            Currency::Gbp => "£",
        }
    }

    /// Locale the currency is usually displayed in.
    pub fn home_locale(&self) -> Locale {
        match self {
            Currency::Eur => Locale::De,
            Currency::Usd | Currency::Gbp => Locale::En,
            Currency::Brl => Locale::Pt,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| FormatError::UnknownCurrency(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyFormat {
    pub locale: Locale,
    pub currency: Currency,
}

impl MoneyFormat {
    pub fn new(locale: Locale, currency: Currency) -> Self {
        Self { locale, currency }
    }

    /// Format in the currency's home locale.
    pub fn for_currency(currency: Currency) -> Self {
        Self::new(currency.home_locale(), currency)
    }

    /// Two fraction digits, locale separators and symbol placement.
    pub fn format(&self, amount: f64) -> String {
        let fixed = format!("{:.2}", amount.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let negative = amount < 0.0 && fixed != "0.00";

        let (thousands, decimal) = self.locale.separators();
        // es groups only from five integer digits on
        let min_grouping = if self.locale == Locale::Es { 5 } else { 4 };
        let grouped = if int_part.len() >= min_grouping {
            group_digits(int_part, thousands)
        } else {
            int_part.to_string()
        };

        let number = format!("{grouped}{decimal}{frac_part}");
        let sign = if negative { "-" } else { "" };
        let symbol = self.currency.symbol();

        match self.locale {
            Locale::En => format!("{sign}{symbol}{number}"),
            Locale::Pt => format!("{sign}{symbol} {number}"),
            Locale::Es | Locale::De => format!("{sign}{number} {symbol}"),
        }
    }

    /// Localized short month label, e.g. "März 2024" or "jan. de 2024".
    pub fn month_label(&self, key: MonthKey) -> String {
        let name = self.locale.short_months()[key.index0()];
        match self.locale {
            Locale::Pt => format!("{name} de {}", key.year()),
            _ => format!("{name} {}", key.year()),
        }
    }
}

fn group_digits(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_en_usd() {
        let f = MoneyFormat::new(Locale::En, Currency::Usd);
        assert_eq!(f.format(1234.5), "$1,234.50");
        assert_eq!(f.format(-1234567.891), "-$1,234,567.89");
        assert_eq!(f.format(0.0), "$0.00");
    }

    #[test]
    fn test_format_de_eur() {
        let f = MoneyFormat::for_currency(Currency::Eur);
        assert_eq!(f.format(1234.56), "1.234,56 €");
        assert_eq!(f.format(-750.0), "-750,00 €");
    }

    #[test]
    fn test_format_pt_brl() {
        let f = MoneyFormat::for_currency(Currency::Brl);
        assert_eq!(f.format(19.99), "R$ 19,99");
        assert_eq!(f.format(1000000.0), "R$ 1.000.000,00");
    }

    #[test]
    fn test_format_es_grouping() {
        let f = MoneyFormat::new(Locale::Es, Currency::Eur);
        assert_eq!(f.format(1234.0), "1234,00 €");
        assert_eq!(f.format(12345.0), "12.345,00 €");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        let f = MoneyFormat::new(Locale::En, Currency::Gbp);
        assert_eq!(f.format(-0.001), "£0.00");
    }

    #[test]
    fn test_month_labels() {
        let march = MonthKey::new(2024, 3).unwrap();
        assert_eq!(MoneyFormat::new(Locale::En, Currency::Usd).month_label(march), "Mar 2024");
        assert_eq!(MoneyFormat::new(Locale::De, Currency::Eur).month_label(march), "März 2024");
        let jan = MonthKey::new(2024, 1).unwrap();
        assert_eq!(MoneyFormat::new(Locale::Pt, Currency::Brl).month_label(jan), "jan. de 2024");
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::Pt);
        assert_eq!("de_DE".parse::<Locale>().unwrap(), Locale::De);
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert!(matches!("JPY".parse::<Currency>(), Err(FormatError::UnknownCurrency(_))));
    }
}
