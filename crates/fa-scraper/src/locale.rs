//! Per-language site conventions.
//!
//! URL path segment, date grammar and category labels all depend on the
//! site language and always change together, so each language gets a single
//! [`Locale`] record.

use shared::{Category, Language};

/// Order of the date components after the literal prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateGrammar {
    /// `January 5, 2021`
    MonthDayYear,
    /// `5 de enero de 2021`
    DayDeMonthDeYear,
}

/// Everything about the site that varies with the language
#[derive(Debug)]
pub struct Locale {
    pub language: Language,
    /// Path segment after the site root, e.g. `en`
    pub path_segment: &'static str,
    /// Known date header prefixes across markup revisions
    pub date_prefixes: &'static [&'static str],
    pub date_grammar: DateGrammar,
    /// Lowercase month names, January first
    pub months: [&'static str; 12],
    /// Label the site prints for each category
    pub category_labels: [(Category, &'static str); 4],
}

static ENGLISH: Locale = Locale {
    language: Language::En,
    path_segment: "en",
    date_prefixes: &["Rated on ", "Rated "],
    date_grammar: DateGrammar::MonthDayYear,
    months: [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ],
    category_labels: [
        (Category::TvSeries, "TV Series"),
        (Category::TvMiniseries, "TV Miniseries"),
        (Category::Tv, "TV"),
        (Category::Short, "S"),
    ],
};

static SPANISH: Locale = Locale {
    language: Language::Es,
    path_segment: "es",
    date_prefixes: &["Votada el día: ", "votada "],
    date_grammar: DateGrammar::DayDeMonthDeYear,
    months: [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ],
    category_labels: [
        (Category::TvSeries, "Serie de TV"),
        (Category::TvMiniseries, "Miniserie de TV"),
        (Category::Tv, "TV"),
        (Category::Short, "C"),
    ],
};

/// Look up the locale record for a language
pub fn locale(language: Language) -> &'static Locale {
    match language {
        Language::En => &ENGLISH,
        Language::Es => &SPANISH,
    }
}

impl Locale {
    /// 1-based month number for a month name, case-insensitive
    pub fn month_number(&self, name: &str) -> Option<u32> {
        let name = name.to_lowercase();
        // "setiembre" is an accepted Spanish spelling
        let name = match (self.language, name.as_str()) {
            (Language::Es, "setiembre") => "septiembre".to_string(),
            _ => name,
        };
        self.months
            .iter()
            .position(|m| *m == name)
            .map(|i| i as u32 + 1)
    }
}
