//! CLDR-style plural categories and hand-written rule families.
//!
//! # Invariants
//!
//! 1. **Totality**: every rule maps every finite value to a category;
//!    non-finite values map to [`PluralCategory::Other`].
//!
//! 2. **Sign-agnostic**: selection uses the absolute value, so `-1` and
//!    `1` always land in the same category.
//!
//! 3. **Fractions**: values with a fractional part select `Other` in every
//!    built-in family except French (CLDR: `i = 0..1` is `one`).
//!
//! The families cover the major rule shapes (Germanic, Romance, Slavic,
//! Semitic, and no-plural languages); they are selected from the primary
//! language subtag. A CLDR-complete provider can replace all of this
//! behind the same trait.

use unic_langid::LanguageIdentifier;

/// CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    /// CLDR `zero`.
    Zero,
    /// CLDR `one`.
    One,
    /// CLDR `two`.
    Two,
    /// CLDR `few`.
    Few,
    /// CLDR `many`.
    Many,
    /// CLDR `other` (always present).
    Other,
}

impl PluralCategory {
    /// The CLDR keyword for this category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }

    /// Parse a CLDR keyword (as used in plural branch selectors).
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "zero" => Some(Self::Zero),
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            "few" => Some(Self::Few),
            "many" => Some(Self::Many),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A family of plural rules shared by several languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRuleFamily {
    /// `one` for exactly 1: English, German, Dutch, Italian, …
    English,
    /// `one` for 0 and 1: French, Portuguese (BR).
    French,
    /// Slavic one/few/many: Russian, Ukrainian, Serbian, …
    Russian,
    /// Slavic with Polish `many` shape.
    Polish,
    /// zero/one/two/few/many: Arabic.
    Arabic,
    /// No plural distinction: Chinese, Japanese, Korean, Thai, Vietnamese.
    CJK,
}

impl PluralRuleFamily {
    /// Pick the family for a locale from its primary language subtag.
    ///
    /// Unknown languages fall back to the English family, the most common
    /// shape.
    #[must_use]
    pub fn for_locale(locale: &LanguageIdentifier) -> Self {
        match locale.language.as_str() {
            "fr" | "pt" => Self::French,
            "ru" | "uk" | "sr" | "hr" | "bs" | "be" => Self::Russian,
            "pl" => Self::Polish,
            "ar" => Self::Arabic,
            "zh" | "ja" | "ko" | "th" | "vi" | "id" | "ms" => Self::CJK,
            _ => Self::English,
        }
    }

    /// Cardinal category for a value.
    #[must_use]
    pub fn cardinal(self, value: f64) -> PluralCategory {
        if !value.is_finite() {
            return PluralCategory::Other;
        }
        let n = value.abs();
        let has_fraction = n.fract() != 0.0;
        let i = n.trunc() as u64;
        match self {
            Self::English => {
                if i == 1 && !has_fraction {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::French => {
                if i <= 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::Russian => {
                if has_fraction {
                    return PluralCategory::Other;
                }
                match (i % 10, i % 100) {
                    (1, m100) if m100 != 11 => PluralCategory::One,
                    (2..=4, m100) if !(12..=14).contains(&m100) => PluralCategory::Few,
                    _ => PluralCategory::Many,
                }
            }
            Self::Polish => {
                if has_fraction {
                    return PluralCategory::Other;
                }
                match (i % 10, i % 100) {
                    (1, m100) if i == 1 && m100 == 1 => PluralCategory::One,
                    (2..=4, m100) if !(12..=14).contains(&m100) => PluralCategory::Few,
                    _ => PluralCategory::Many,
                }
            }
            Self::Arabic => {
                if has_fraction {
                    return PluralCategory::Other;
                }
                match i {
                    0 => PluralCategory::Zero,
                    1 => PluralCategory::One,
                    2 => PluralCategory::Two,
                    _ => match i % 100 {
                        3..=10 => PluralCategory::Few,
                        11..=99 => PluralCategory::Many,
                        _ => PluralCategory::Other,
                    },
                }
            }
            Self::CJK => PluralCategory::Other,
        }
    }

    /// Ordinal category for a value ("1st", "2nd", "3rd", "4th", …).
    ///
    /// Only the English family distinguishes ordinal categories; the
    /// others use `other` throughout (matching CLDR for French `1` being
    /// the lone exception, which is also honored).
    #[must_use]
    pub fn ordinal(self, value: f64) -> PluralCategory {
        if !value.is_finite() {
            return PluralCategory::Other;
        }
        let n = value.abs();
        if n.fract() != 0.0 {
            return PluralCategory::Other;
        }
        let i = n.trunc() as u64;
        match self {
            Self::English => match (i % 10, i % 100) {
                (1, m100) if m100 != 11 => PluralCategory::One,
                (2, m100) if m100 != 12 => PluralCategory::Two,
                (3, m100) if m100 != 13 => PluralCategory::Few,
                _ => PluralCategory::Other,
            },
            Self::French => {
                if i == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            _ => PluralCategory::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> LanguageIdentifier {
        tag.parse().expect("valid tag")
    }

    #[test]
    fn family_selection() {
        assert_eq!(
            PluralRuleFamily::for_locale(&locale("en-US")),
            PluralRuleFamily::English
        );
        assert_eq!(
            PluralRuleFamily::for_locale(&locale("fr")),
            PluralRuleFamily::French
        );
        assert_eq!(
            PluralRuleFamily::for_locale(&locale("ru")),
            PluralRuleFamily::Russian
        );
        assert_eq!(
            PluralRuleFamily::for_locale(&locale("zh-Hans-CN")),
            PluralRuleFamily::CJK
        );
        assert_eq!(
            PluralRuleFamily::for_locale(&locale("tlh")),
            PluralRuleFamily::English
        );
    }

    #[test]
    fn english_cardinal() {
        let f = PluralRuleFamily::English;
        assert_eq!(f.cardinal(1.0), PluralCategory::One);
        assert_eq!(f.cardinal(-1.0), PluralCategory::One);
        assert_eq!(f.cardinal(0.0), PluralCategory::Other);
        assert_eq!(f.cardinal(2.0), PluralCategory::Other);
        assert_eq!(f.cardinal(1.5), PluralCategory::Other);
    }

    #[test]
    fn french_cardinal_zero_is_one() {
        let f = PluralRuleFamily::French;
        assert_eq!(f.cardinal(0.0), PluralCategory::One);
        assert_eq!(f.cardinal(1.0), PluralCategory::One);
        assert_eq!(f.cardinal(1.5), PluralCategory::One);
        assert_eq!(f.cardinal(2.0), PluralCategory::Other);
    }

    #[test]
    fn russian_cardinal() {
        let f = PluralRuleFamily::Russian;
        assert_eq!(f.cardinal(1.0), PluralCategory::One);
        assert_eq!(f.cardinal(21.0), PluralCategory::One);
        assert_eq!(f.cardinal(3.0), PluralCategory::Few);
        assert_eq!(f.cardinal(12.0), PluralCategory::Many);
        assert_eq!(f.cardinal(5.0), PluralCategory::Many);
        assert_eq!(f.cardinal(11.0), PluralCategory::Many);
    }

    #[test]
    fn polish_cardinal() {
        let f = PluralRuleFamily::Polish;
        assert_eq!(f.cardinal(1.0), PluralCategory::One);
        // 21 is `many` in Polish, unlike Russian.
        assert_eq!(f.cardinal(21.0), PluralCategory::Many);
        assert_eq!(f.cardinal(22.0), PluralCategory::Few);
        assert_eq!(f.cardinal(5.0), PluralCategory::Many);
    }

    #[test]
    fn arabic_cardinal() {
        let f = PluralRuleFamily::Arabic;
        assert_eq!(f.cardinal(0.0), PluralCategory::Zero);
        assert_eq!(f.cardinal(1.0), PluralCategory::One);
        assert_eq!(f.cardinal(2.0), PluralCategory::Two);
        assert_eq!(f.cardinal(3.0), PluralCategory::Few);
        assert_eq!(f.cardinal(11.0), PluralCategory::Many);
        assert_eq!(f.cardinal(100.0), PluralCategory::Other);
    }

    #[test]
    fn cjk_always_other() {
        let f = PluralRuleFamily::CJK;
        for n in [-5.0, 0.0, 1.0, 2.0, 100.5] {
            assert_eq!(f.cardinal(n), PluralCategory::Other);
        }
    }

    #[test]
    fn english_ordinal() {
        let f = PluralRuleFamily::English;
        assert_eq!(f.ordinal(1.0), PluralCategory::One);
        assert_eq!(f.ordinal(2.0), PluralCategory::Two);
        assert_eq!(f.ordinal(3.0), PluralCategory::Few);
        assert_eq!(f.ordinal(4.0), PluralCategory::Other);
        assert_eq!(f.ordinal(11.0), PluralCategory::Other);
        assert_eq!(f.ordinal(21.0), PluralCategory::One);
        assert_eq!(f.ordinal(112.0), PluralCategory::Other);
    }

    #[test]
    fn non_finite_is_other() {
        let f = PluralRuleFamily::English;
        assert_eq!(f.cardinal(f64::NAN), PluralCategory::Other);
        assert_eq!(f.cardinal(f64::INFINITY), PluralCategory::Other);
        assert_eq!(f.ordinal(f64::NAN), PluralCategory::Other);
    }

    #[test]
    fn keyword_round_trip() {
        for cat in [
            PluralCategory::Zero,
            PluralCategory::One,
            PluralCategory::Two,
            PluralCategory::Few,
            PluralCategory::Many,
            PluralCategory::Other,
        ] {
            assert_eq!(PluralCategory::from_keyword(cat.as_str()), Some(cat));
        }
        assert_eq!(PluralCategory::from_keyword("paucal"), None);
    }
}
