//! Layout adapters.
//!
//! FilmAffinity has rendered the same entry in several ways over time:
//!
//! - **Legacy**: the type is a suffix of the title (`Foundation (TV Series)`)
//!   and the year is the text node right after the title link.
//! - **Type tag**: as legacy, but the type sits in its own `.type` element.
//! - **Card**: entries wrapped in `.movie-card`, year in `.mc-year`.
//!
//! Each adapter answers the same questions about an entry; the extractor
//! picks one per page with [`detect`].

use crate::classify::TypeLabel;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

static TITLE_LINK: Lazy<Selector> = Lazy::new(|| selector(".mc-title a"));
static TYPE_TAG: Lazy<Selector> = Lazy::new(|| selector(".type"));
static TITLE_TYPE_TAG: Lazy<Selector> = Lazy::new(|| selector(".mc-title .type"));
static CARD: Lazy<Selector> = Lazy::new(|| selector(".movie-card"));
static CARD_YEAR: Lazy<Selector> = Lazy::new(|| selector(".mc-year"));
static DIRECTORS: Lazy<Selector> = Lazy::new(|| selector(".mc-director"));
static CREDIT: Lazy<Selector> = Lazy::new(|| selector(".nb"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a"));
static RATING: Lazy<Selector> = Lazy::new(|| selector(".ur-mr-rat, .fa-user-rat-box"));

const CREATOR_SUFFIX: &str = "(Creator)";

/// Element text with whitespace runs collapsed
pub(crate) fn clean_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Field extraction for one markup revision.
///
/// `None` means the element the layout relies on is missing or malformed.
pub trait Layout: Sync {
    fn name(&self) -> &'static str;

    /// Text of the entry's title link
    fn title(&self, entry: ElementRef<'_>) -> Option<String> {
        entry
            .select(&TITLE_LINK)
            .next()
            .map(clean_text)
            .filter(|title| !title.is_empty())
    }

    fn year(&self, entry: ElementRef<'_>) -> Option<i32>;

    /// Comma-joined director names; empty when the entry credits none
    fn directors(&self, entry: ElementRef<'_>) -> Option<String> {
        let container = entry.select(&DIRECTORS).next()?;
        let names: Vec<String> = container
            .select(&CREDIT)
            .filter_map(director_name)
            .filter(|name| !name.is_empty())
            .collect();
        Some(names.join(", "))
    }

    fn type_label(&self, entry: ElementRef<'_>) -> Option<TypeLabel>;

    /// The user's 0-10 rating
    fn rating(&self, entry: ElementRef<'_>) -> Option<u8> {
        entry
            .select(&RATING)
            .next()
            .map(clean_text)
            .and_then(|text| text.parse::<u8>().ok())
            .filter(|rating| *rating <= 10)
    }
}

/// Name from a credit's link, without the "(Creator)" marker used for series
fn director_name(credit: ElementRef<'_>) -> Option<String> {
    let link = credit.select(&LINK).next()?;
    let name = link
        .value()
        .attr("title")
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_else(|| clean_text(link));
    Some(
        name.strip_suffix(CREATOR_SUFFIX)
            .map(str::trim_end)
            .unwrap_or(name.as_str())
            .to_string(),
    )
}

/// Year from the text node following the title link, e.g. ` (2021) `
fn year_after_title(entry: ElementRef<'_>) -> Option<i32> {
    let link = entry.select(&TITLE_LINK).next()?;
    let text = link
        .next_siblings()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())?;
    parse_year(text)
}

fn parse_year(text: &str) -> Option<i32> {
    text.trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim()
        .parse()
        .ok()
}

fn type_tag(entry: ElementRef<'_>) -> Option<TypeLabel> {
    entry
        .select(&TYPE_TAG)
        .next()
        .map(|tag| TypeLabel::Tag(clean_text(tag)))
}

/// Type carried as a title suffix
pub struct LegacyLayout;

impl Layout for LegacyLayout {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn year(&self, entry: ElementRef<'_>) -> Option<i32> {
        year_after_title(entry)
    }

    fn type_label(&self, entry: ElementRef<'_>) -> Option<TypeLabel> {
        self.title(entry).map(TypeLabel::TitleSuffix)
    }
}

/// Type in a dedicated `.type` element inside the title block
pub struct TypeTagLayout;

impl Layout for TypeTagLayout {
    fn name(&self) -> &'static str {
        "type-tag"
    }

    fn year(&self, entry: ElementRef<'_>) -> Option<i32> {
        year_after_title(entry)
    }

    fn type_label(&self, entry: ElementRef<'_>) -> Option<TypeLabel> {
        type_tag(entry)
    }
}

/// Nested `.movie-card` entries
pub struct CardLayout;

impl Layout for CardLayout {
    fn name(&self) -> &'static str {
        "card"
    }

    fn year(&self, entry: ElementRef<'_>) -> Option<i32> {
        entry
            .select(&CARD_YEAR)
            .next()
            .map(clean_text)
            .and_then(|text| parse_year(&text))
    }

    fn type_label(&self, entry: ElementRef<'_>) -> Option<TypeLabel> {
        type_tag(entry)
    }
}

static LEGACY: LegacyLayout = LegacyLayout;
static TYPE_TAG_LAYOUT: TypeTagLayout = TypeTagLayout;
static CARD_LAYOUT: CardLayout = CardLayout;

/// Pick the adapter matching the markers present on the page
pub fn detect(document: &Html) -> &'static dyn Layout {
    if document.select(&CARD).next().is_some() {
        &CARD_LAYOUT
    } else if document.select(&TITLE_TYPE_TAG).next().is_some() {
        &TYPE_TAG_LAYOUT
    } else {
        &LEGACY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry<'a>(document: &'a Html, css: &str) -> ElementRef<'a> {
        document.select(&selector(css)).next().unwrap()
    }

    const LEGACY_ENTRY: &str = r#"
        <div class="user-ratings-movie">
          <div class="mc-title"><a href="/en/film1.html">  Foundation (TV Series) </a> (2021) <img src="flag.png"></div>
          <div class="mc-director">
            <span class="nb"><a title="David S. Goyer (Creator)">David S. Goyer</a></span>,
            <span class="nb"><a title="Josh Friedman">Josh Friedman</a></span>
          </div>
          <div class="ur-mr-rat">7</div>
        </div>"#;

    const CARD_ENTRY: &str = r#"
        <div class="user-ratings-movie">
          <div class="movie-card">
            <div class="mc-title"><a href="/en/film2.html">Dune</a> <span class="mc-year">2021</span>
              <span class="type">TV</span></div>
            <div class="mc-director"><div class="credits">
              <span class="nb"><a href="/d">Denis Villeneuve</a></span>
              <span class="nb"></span>
            </div></div>
          </div>
          <div class="fa-user-rat-box"> 10 </div>
        </div>"#;

    #[test]
    fn test_legacy_fields() {
        let doc = Html::parse_document(LEGACY_ENTRY);
        let e = entry(&doc, ".user-ratings-movie");
        let layout = detect(&doc);

        assert_eq!(layout.name(), "legacy");
        assert_eq!(layout.title(e).as_deref(), Some("Foundation (TV Series)"));
        assert_eq!(layout.year(e), Some(2021));
        assert_eq!(
            layout.directors(e).as_deref(),
            Some("David S. Goyer, Josh Friedman")
        );
        assert_eq!(
            layout.type_label(e),
            Some(TypeLabel::TitleSuffix("Foundation (TV Series)".into()))
        );
        assert_eq!(layout.rating(e), Some(7));
    }

    #[test]
    fn test_card_fields() {
        let doc = Html::parse_document(CARD_ENTRY);
        let e = entry(&doc, ".user-ratings-movie");
        let layout = detect(&doc);

        assert_eq!(layout.name(), "card");
        assert_eq!(layout.title(e).as_deref(), Some("Dune"));
        assert_eq!(layout.year(e), Some(2021));
        assert_eq!(layout.directors(e).as_deref(), Some("Denis Villeneuve"));
        assert_eq!(layout.type_label(e), Some(TypeLabel::Tag("TV".into())));
        assert_eq!(layout.rating(e), Some(10));
    }

    #[test]
    fn test_type_tag_detection() {
        let doc = Html::parse_document(
            r#"<div class="movie-wrapper"><div class="mc-title"><a>Chernobyl</a> (2019)
               <span class="type">TV Miniseries</span></div></div>"#,
        );
        let e = entry(&doc, ".movie-wrapper");
        let layout = detect(&doc);

        assert_eq!(layout.name(), "type-tag");
        assert_eq!(layout.year(e), Some(2019));
        assert_eq!(
            layout.type_label(e),
            Some(TypeLabel::Tag("TV Miniseries".into()))
        );
        // no director block at all
        assert_eq!(layout.directors(e), None);
    }

    #[test]
    fn test_missing_and_malformed_fields() {
        let doc = Html::parse_document(
            r#"<div class="e"><div class="mc-title"><a>Untitled</a> (n/a)</div>
               <div class="mc-director"></div><div class="ur-mr-rat">11</div></div>"#,
        );
        let e = entry(&doc, ".e");
        let layout = detect(&doc);

        assert_eq!(layout.year(e), None);
        assert_eq!(layout.rating(e), None);
        assert_eq!(layout.directors(e).as_deref(), Some(""));

        let empty = Html::parse_document(r#"<div class="e"></div>"#);
        assert_eq!(layout.title(entry(&empty, ".e")), None);
        assert_eq!(layout.type_label(entry(&empty, ".e")), None);
    }
}
