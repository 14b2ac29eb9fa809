//! Deterministic built-in provider.
//!
//! English-convention output for every formatter kind, with no locale
//! data files and no I/O: number grouping and fraction digits, civil
//! date/time styles, the hand-written plural families from
//! [`crate::plural`], conjunction/disjunction list joining, relative
//! time with optional named phrases, and a compact display-name table.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Currency style, no code | `NumberStyle::Currency` without `currency` | `ProviderError::InvalidOptions` |
//! | Fraction digit bounds | `min > max` or `max > 20` | `ProviderError::InvalidOptions` |
//! | Non-UTC time zone | `time_zone` other than `"UTC"` | `ProviderError::Unsupported` |
//!
//! Formatting itself never fails; every constructed formatter is total
//! over its input type.

use unic_langid::LanguageIdentifier;

use crate::datetime::CivilDateTime;
use crate::options::{
    DateTimeOptions, DateTimeStyle, DisplayNamesFallback, DisplayNamesKind,
    DisplayNamesOptions, ListKind, ListOptions, ListStyle, NumberOptions, NumberStyle,
    PluralKind, PluralOptions, RelativeTimeNumeric, RelativeTimeOptions,
};
use crate::plural::{PluralCategory, PluralRuleFamily};
use crate::provider::{
    DateTimeFormatter, DisplayNames, IntlProvider, ListFormatter, NumberFormatter,
    PluralRules, ProviderError, RelativeTimeFormatter, RelativeTimeUnit,
};

/// The self-contained default provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinProvider;

impl BuiltinProvider {
    /// Create the provider. Stateless; all state lives in the formatters
    /// it constructs.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl IntlProvider for BuiltinProvider {
    fn date_time(
        &self,
        _locale: &LanguageIdentifier,
        options: &DateTimeOptions,
    ) -> Result<Box<dyn DateTimeFormatter>, ProviderError> {
        if let Some(tz) = options.time_zone.as_deref() {
            if tz != "UTC" {
                return Err(ProviderError::Unsupported(format!(
                    "time zone {tz:?} (built-in provider supports only UTC)"
                )));
            }
        }
        let mut date_style = options.date_style;
        let time_style = options.time_style;
        if date_style.is_none() && time_style.is_none() {
            date_style = Some(DateTimeStyle::Short);
        }
        Ok(Box::new(BuiltinDateTime {
            date_style,
            time_style,
            hour12: options.hour12.unwrap_or(true),
            zone_label: options.time_zone.clone().unwrap_or_else(|| "UTC".into()),
        }))
    }

    fn number(
        &self,
        _locale: &LanguageIdentifier,
        options: &NumberOptions,
    ) -> Result<Box<dyn NumberFormatter>, ProviderError> {
        let style = options.style.unwrap_or(NumberStyle::Decimal);
        let currency = match style {
            NumberStyle::Currency => match &options.currency {
                Some(code) => Some(code.to_ascii_uppercase()),
                None => {
                    return Err(ProviderError::InvalidOptions(
                        "currency style requires a currency code".into(),
                    ));
                }
            },
            _ => None,
        };
        let (default_min, default_max) = match style {
            NumberStyle::Decimal => (0, 3),
            NumberStyle::Percent => (0, 0),
            NumberStyle::Currency => {
                if currency.as_deref() == Some("JPY") {
                    (0, 0)
                } else {
                    (2, 2)
                }
            }
        };
        let min_frac = options.minimum_fraction_digits.unwrap_or(default_min);
        let max_frac = options
            .maximum_fraction_digits
            .unwrap_or(default_max.max(min_frac));
        if min_frac > max_frac {
            return Err(ProviderError::InvalidOptions(format!(
                "minimum fraction digits ({min_frac}) exceed maximum ({max_frac})"
            )));
        }
        if max_frac > 20 {
            return Err(ProviderError::InvalidOptions(format!(
                "maximum fraction digits ({max_frac}) out of range (0..=20)"
            )));
        }
        Ok(Box::new(BuiltinNumber {
            style,
            currency,
            min_frac,
            max_frac,
            grouping: options.use_grouping.unwrap_or(true),
        }))
    }

    fn plural_rules(
        &self,
        locale: &LanguageIdentifier,
        options: &PluralOptions,
    ) -> Result<Box<dyn PluralRules>, ProviderError> {
        Ok(Box::new(BuiltinPlural {
            family: PluralRuleFamily::for_locale(locale),
            kind: options.kind.unwrap_or(PluralKind::Cardinal),
        }))
    }

    fn relative_time(
        &self,
        _locale: &LanguageIdentifier,
        options: &RelativeTimeOptions,
    ) -> Result<Box<dyn RelativeTimeFormatter>, ProviderError> {
        Ok(Box::new(BuiltinRelative {
            numeric: options.numeric.unwrap_or(RelativeTimeNumeric::Always),
        }))
    }

    fn list(
        &self,
        _locale: &LanguageIdentifier,
        options: &ListOptions,
    ) -> Result<Box<dyn ListFormatter>, ProviderError> {
        Ok(Box::new(BuiltinList {
            style: options.style.unwrap_or(ListStyle::Long),
            kind: options.kind.unwrap_or(ListKind::Conjunction),
        }))
    }

    fn display_names(
        &self,
        _locale: &LanguageIdentifier,
        options: &DisplayNamesOptions,
    ) -> Result<Box<dyn DisplayNames>, ProviderError> {
        Ok(Box::new(BuiltinDisplayNames {
            kind: options.kind,
            fallback: options.fallback.unwrap_or(DisplayNamesFallback::Code),
        }))
    }
}

// ---------------------------------------------------------------------------
// Date/time
// ---------------------------------------------------------------------------

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

struct BuiltinDateTime {
    date_style: Option<DateTimeStyle>,
    time_style: Option<DateTimeStyle>,
    hour12: bool,
    zone_label: String,
}

impl BuiltinDateTime {
    fn date_part(&self, style: DateTimeStyle, value: &CivilDateTime) -> String {
        let month_idx = usize::from(value.month.clamp(1, 12)) - 1;
        match style {
            DateTimeStyle::Short => {
                format!("{}/{}/{}", value.month, value.day, value.year)
            }
            DateTimeStyle::Medium => {
                format!("{} {}, {}", MONTHS_SHORT[month_idx], value.day, value.year)
            }
            DateTimeStyle::Long => {
                format!("{} {}, {}", MONTHS_LONG[month_idx], value.day, value.year)
            }
            DateTimeStyle::Full => format!(
                "{}, {} {}, {}",
                WEEKDAYS[usize::from(value.day_of_week() % 7)],
                MONTHS_LONG[month_idx],
                value.day,
                value.year
            ),
        }
    }

    fn time_part(&self, style: DateTimeStyle, value: &CivilDateTime) -> String {
        let with_seconds = !matches!(style, DateTimeStyle::Short);
        let with_zone = matches!(style, DateTimeStyle::Long | DateTimeStyle::Full);
        let clock = if self.hour12 {
            let hour = match value.hour % 12 {
                0 => 12,
                h => h,
            };
            let meridiem = if value.hour < 12 { "AM" } else { "PM" };
            if with_seconds {
                format!("{hour}:{:02}:{:02} {meridiem}", value.minute, value.second)
            } else {
                format!("{hour}:{:02} {meridiem}", value.minute)
            }
        } else if with_seconds {
            format!("{:02}:{:02}:{:02}", value.hour, value.minute, value.second)
        } else {
            format!("{:02}:{:02}", value.hour, value.minute)
        };
        if with_zone {
            format!("{clock} {}", self.zone_label)
        } else {
            clock
        }
    }
}

impl DateTimeFormatter for BuiltinDateTime {
    fn format(&self, value: &CivilDateTime) -> String {
        match (self.date_style, self.time_style) {
            (Some(d), Some(t)) => {
                format!("{}, {}", self.date_part(d, value), self.time_part(t, value))
            }
            (Some(d), None) => self.date_part(d, value),
            (None, Some(t)) => self.time_part(t, value),
            // Constructor guarantees at least one style is set.
            (None, None) => value.to_string(),
        }
    }

    fn format_range(&self, from: &CivilDateTime, to: &CivilDateTime) -> String {
        // No range collapsing; both endpoints render in full.
        format!("{} \u{2013} {}", self.format(from), self.format(to))
    }
}

// ---------------------------------------------------------------------------
// Number
// ---------------------------------------------------------------------------

struct BuiltinNumber {
    style: NumberStyle,
    currency: Option<String>,
    min_frac: u8,
    max_frac: u8,
    grouping: bool,
}

impl NumberFormatter for BuiltinNumber {
    fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".into();
        }
        match self.style {
            NumberStyle::Decimal => {
                format_fixed(value, self.min_frac, self.max_frac, self.grouping)
            }
            NumberStyle::Percent => {
                let scaled = format_fixed(value * 100.0, self.min_frac, self.max_frac, self.grouping);
                format!("{scaled}%")
            }
            NumberStyle::Currency => {
                let code = self.currency.as_deref().unwrap_or("XXX");
                let digits =
                    format_fixed(value.abs(), self.min_frac, self.max_frac, self.grouping);
                let body = match currency_symbol(code) {
                    Some(symbol) => format!("{symbol}{digits}"),
                    None => format!("{code} {digits}"),
                };
                if value.is_finite() && value < 0.0 {
                    format!("-{body}")
                } else {
                    body
                }
            }
        }
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("\u{20ac}"),
        "GBP" => Some("\u{a3}"),
        "JPY" => Some("\u{a5}"),
        _ => None,
    }
}

/// Fixed-point rendering with grouping: round to `max_frac` digits, trim
/// trailing zeros down to `min_frac`, group the integer part in threes.
fn format_fixed(value: f64, min_frac: u8, max_frac: u8, grouping: bool) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-\u{221e}" } else { "\u{221e}" }.into();
    }
    let negative = value < 0.0;
    let mut text = format!("{:.*}", usize::from(max_frac), value.abs());
    if max_frac > min_frac {
        if let Some(dot) = text.find('.') {
            let keep = if min_frac == 0 {
                dot
            } else {
                dot + 1 + usize::from(min_frac)
            };
            while text.len() > keep && text.ends_with('0') {
                text.pop();
            }
            if text.ends_with('.') {
                text.pop();
            }
        }
    }
    if grouping {
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (text, None),
        };
        let grouped = group_thousands(&int_part);
        text = match frac_part {
            Some(f) => format!("{grouped}.{f}"),
            None => grouped,
        };
    }
    if negative && text.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{text}")
    } else {
        text
    }
}

fn group_thousands(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Plural rules
// ---------------------------------------------------------------------------

struct BuiltinPlural {
    family: PluralRuleFamily,
    kind: PluralKind,
}

impl PluralRules for BuiltinPlural {
    fn select(&self, value: f64) -> PluralCategory {
        match self.kind {
            PluralKind::Cardinal => self.family.cardinal(value),
            PluralKind::Ordinal => self.family.ordinal(value),
        }
    }
}

// ---------------------------------------------------------------------------
// Relative time
// ---------------------------------------------------------------------------

struct BuiltinRelative {
    numeric: RelativeTimeNumeric,
}

impl RelativeTimeFormatter for BuiltinRelative {
    fn format(&self, value: i64, unit: RelativeTimeUnit) -> String {
        if self.numeric == RelativeTimeNumeric::Auto {
            if let Some(named) = named_phrase(value, unit) {
                return named.into();
            }
        }
        let magnitude = value.unsigned_abs();
        let noun = if magnitude == 1 {
            unit.as_str().to_string()
        } else {
            format!("{}s", unit.as_str())
        };
        if value < 0 {
            format!("{magnitude} {noun} ago")
        } else {
            format!("in {magnitude} {noun}")
        }
    }
}

fn named_phrase(value: i64, unit: RelativeTimeUnit) -> Option<&'static str> {
    use RelativeTimeUnit::{Day, Month, Quarter, Second, Week, Year};
    match (unit, value) {
        (Second, 0) => Some("now"),
        (Day, -1) => Some("yesterday"),
        (Day, 0) => Some("today"),
        (Day, 1) => Some("tomorrow"),
        (Week, -1) => Some("last week"),
        (Week, 0) => Some("this week"),
        (Week, 1) => Some("next week"),
        (Month, -1) => Some("last month"),
        (Month, 0) => Some("this month"),
        (Month, 1) => Some("next month"),
        (Quarter, -1) => Some("last quarter"),
        (Quarter, 0) => Some("this quarter"),
        (Quarter, 1) => Some("next quarter"),
        (Year, -1) => Some("last year"),
        (Year, 0) => Some("this year"),
        (Year, 1) => Some("next year"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

struct BuiltinList {
    style: ListStyle,
    kind: ListKind,
}

impl ListFormatter for BuiltinList {
    fn format(&self, items: &[String]) -> String {
        match items {
            [] => String::new(),
            [only] => only.clone(),
            _ => {
                let connective = match (self.kind, self.style) {
                    (ListKind::Conjunction, ListStyle::Long) => Some("and"),
                    (ListKind::Conjunction, ListStyle::Short) => Some("&"),
                    (ListKind::Disjunction, _) => Some("or"),
                    (ListKind::Unit, _) | (ListKind::Conjunction, ListStyle::Narrow) => None,
                };
                match connective {
                    None => items.join(", "),
                    Some(word) => {
                        let (last, head) = items.split_last().unwrap_or((&items[0], &[]));
                        if head.len() == 1 {
                            format!("{} {word} {last}", head[0])
                        } else {
                            format!("{}, {word} {last}", head.join(", "))
                        }
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Display names
// ---------------------------------------------------------------------------

struct BuiltinDisplayNames {
    kind: DisplayNamesKind,
    fallback: DisplayNamesFallback,
}

const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("de", "German"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("hi", "Hindi"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("sv", "Swedish"),
    ("tr", "Turkish"),
    ("zh", "Chinese"),
];

const REGION_NAMES: &[(&str, &str)] = &[
    ("AU", "Australia"),
    ("BR", "Brazil"),
    ("CA", "Canada"),
    ("CN", "China"),
    ("DE", "Germany"),
    ("ES", "Spain"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("IN", "India"),
    ("IT", "Italy"),
    ("JP", "Japan"),
    ("KR", "South Korea"),
    ("MX", "Mexico"),
    ("NL", "Netherlands"),
    ("PL", "Poland"),
    ("RU", "Russia"),
    ("SE", "Sweden"),
    ("TR", "Turkey"),
    ("US", "United States"),
];

const SCRIPT_NAMES: &[(&str, &str)] = &[
    ("Arab", "Arabic"),
    ("Cyrl", "Cyrillic"),
    ("Deva", "Devanagari"),
    ("Grek", "Greek"),
    ("Hans", "Simplified Han"),
    ("Hant", "Traditional Han"),
    ("Hebr", "Hebrew"),
    ("Jpan", "Japanese"),
    ("Kore", "Korean"),
    ("Latn", "Latin"),
];

const CURRENCY_NAMES: &[(&str, &str)] = &[
    ("AUD", "Australian Dollar"),
    ("BRL", "Brazilian Real"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CNY", "Chinese Yuan"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("INR", "Indian Rupee"),
    ("JPY", "Japanese Yen"),
    ("KRW", "South Korean Won"),
    ("MXN", "Mexican Peso"),
    ("PLN", "Polish Zloty"),
    ("RUB", "Russian Ruble"),
    ("SEK", "Swedish Krona"),
    ("TRY", "Turkish Lira"),
    ("USD", "US Dollar"),
];

impl DisplayNames for BuiltinDisplayNames {
    fn of(&self, code: &str) -> Option<String> {
        if code.is_empty() {
            return None;
        }
        let normalized = match self.kind {
            DisplayNamesKind::Language => code.to_ascii_lowercase(),
            DisplayNamesKind::Region | DisplayNamesKind::Currency => code.to_ascii_uppercase(),
            DisplayNamesKind::Script => {
                let mut chars = code.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_ascii_uppercase().to_string()
                            + &chars.as_str().to_ascii_lowercase()
                    }
                    None => return None,
                }
            }
        };
        let table = match self.kind {
            DisplayNamesKind::Language => LANGUAGE_NAMES,
            DisplayNamesKind::Region => REGION_NAMES,
            DisplayNamesKind::Script => SCRIPT_NAMES,
            DisplayNamesKind::Currency => CURRENCY_NAMES,
        };
        match table
            .iter()
            .find(|(key, _)| *key == normalized)
            .map(|(_, name)| (*name).to_string())
        {
            Some(name) => Some(name),
            None => match self.fallback {
                DisplayNamesFallback::Code => Some(normalized),
                DisplayNamesFallback::None => None,
            },
        }
    }
}
