//! Date header parsing.
//!
//! Converts "Rated on January 5, 2021" / "Votada el día: 5 de enero de 2021"
//! into a calendar date. Month names come from the [`Locale`] table, never
//! from the process locale.

use crate::error::{Result, ScrapeError};
use crate::locale::{locale, DateGrammar, Locale};
use chrono::NaiveDate;
use shared::Language;

/// Parse a date header text for the given language
pub fn parse_date(text: &str, language: Language) -> Result<NaiveDate> {
    let loc = locale(language);
    let fail = || ScrapeError::DateParse {
        text: text.to_string(),
        language,
    };

    let rest = strip_prefix(text.trim(), loc).ok_or_else(fail)?;
    let tokens: Vec<&str> = rest.split_whitespace().collect();

    let (day, month, year) = match (loc.date_grammar, tokens.as_slice()) {
        (DateGrammar::MonthDayYear, [month, day, year]) => {
            (day.trim_end_matches(','), *month, *year)
        }
        (DateGrammar::DayDeMonthDeYear, [day, de1, month, de2, year])
            if de1.eq_ignore_ascii_case("de") && de2.eq_ignore_ascii_case("de") =>
        {
            (*day, *month, *year)
        }
        _ => return Err(fail()),
    };

    let month = loc.month_number(month).ok_or_else(fail)?;
    let day: u32 = day.parse().map_err(|_| fail())?;
    let year: i32 = year.parse().map_err(|_| fail())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(fail)
}

/// Parse and format as `YYYY-MM-DD`
pub fn parse_iso_date(text: &str, language: Language) -> Result<String> {
    Ok(parse_date(text, language)?.format("%Y-%m-%d").to_string())
}

/// Remove whichever known prefix the text starts with (case-insensitive).
fn strip_prefix<'t>(text: &'t str, loc: &Locale) -> Option<&'t str> {
    let mut prefixes: Vec<&str> = loc.date_prefixes.to_vec();
    prefixes.sort_by_key(|p| std::cmp::Reverse(p.len()));

    prefixes.into_iter().find_map(|prefix| {
        let head = text.get(..prefix.len())?;
        if head.to_lowercase() == prefix.to_lowercase() {
            Some(&text[prefix.len()..])
        } else {
            None
        }
    })
}
