// src/view/format.rs
//! Display helpers: currency amounts, truncated descriptions, avatar initials.

pub const DESCRIPTION_PREVIEW_CHARS: usize = 50;
pub const ELLIPSIS: &str = "...";

/// Locale convention used to render prices.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyFormat {
    pub code: String,
    pub symbol: String,
    pub symbol_first: bool,
    /// Inserted between symbol and number.
    pub symbol_spacing: String,
    pub grouping_separator: char,
    pub decimal_separator: char,
    pub fraction_digits: u8,
    /// Integer digits that must sit left of the first separator before
    /// grouping kicks in (CLDR `minimumGroupingDigits`).
    pub min_grouping_digits: u8,
}

pub const MAX_FRACTION_DIGITS: u8 = 6;

impl CurrencyFormat {
    fn colombian_peso() -> Self {
        Self {
            code: "COP".into(),
            symbol: "$".into(),
            symbol_first: true,
            symbol_spacing: "\u{a0}".into(),
            grouping_separator: '.',
            decimal_separator: ',',
            fraction_digits: 0,
            min_grouping_digits: 1,
        }
    }

    pub fn for_locale(locale: &str) -> Option<Self> {
        let preset = match locale.to_ascii_lowercase().as_str() {
            "es-co" => Self::colombian_peso(),
            "en-us" => Self {
                code: "USD".into(),
                symbol: "$".into(),
                symbol_first: true,
                symbol_spacing: String::new(),
                grouping_separator: ',',
                decimal_separator: '.',
                fraction_digits: 0,
                min_grouping_digits: 1,
            },
            "es-es" => Self {
                code: "EUR".into(),
                symbol: "€".into(),
                symbol_first: false,
                symbol_spacing: "\u{a0}".into(),
                grouping_separator: '.',
                decimal_separator: ',',
                fraction_digits: 0,
                min_grouping_digits: 2,
            },
            _ => return None,
        };
        Some(preset)
    }

    pub fn with_fraction_digits(mut self, digits: u8) -> Self {
        self.fraction_digits = digits.min(MAX_FRACTION_DIGITS);
        self
    }

    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return amount.to_string();
        }

        let digits = usize::from(self.fraction_digits.min(MAX_FRACTION_DIGITS));
        // f64::round rounds half away from zero. The result is integral, so
        // printing it with no decimals yields its exact digits at any size.
        let scaled = (amount.abs() * 10f64.powi(digits as i32)).round();
        let raw = format!("{:0>width$.0}", scaled, width = digits + 1);
        let (whole, frac) = raw.split_at(raw.len() - digits);

        let mut number = self.group(whole);
        if digits > 0 {
            number.push(self.decimal_separator);
            number.push_str(frac);
        }

        let sign = if amount < 0.0 && scaled != 0.0 { "-" } else { "" };
        if self.symbol_first {
            format!("{sign}{}{}{number}", self.symbol, self.symbol_spacing)
        } else {
            format!("{sign}{number}{}{}", self.symbol_spacing, self.symbol)
        }
    }

    fn group(&self, digits: &str) -> String {
        let len = digits.len();
        if len < 3 + usize::from(self.min_grouping_digits) {
            return digits.to_string();
        }

        let mut out = String::with_capacity(len + len / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.grouping_separator);
            }
            out.push(ch);
        }
        out
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::colombian_peso()
    }
}

/// Cuts `text` to `max_chars` characters, appending [`ELLIPSIS`] when
/// anything was removed.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn initials(display_name: &str) -> String {
    display_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
