//! Record extraction.
//!
//! A ratings page is a sequence of date headers and entries; each header sets
//! the date for the entries after it. A list page is a flat sequence of
//! entries. Any entry whose markup does not fit the detected layout aborts
//! the page, and with it the run.

use crate::classify::{classify, is_excluded, Exclusions};
use crate::date::parse_date;
use crate::error::{Result, ScrapeError};
use crate::fetch::Fetcher;
use crate::layout::{clean_text, detect, Layout};
use crate::pager::{Page, PageTemplate, Pager, Pages};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use shared::{Language, ListRecord, RatingRecord};
use tracing::{debug, error};

const DATE_HEADER_CLASS: &str = "user-ratings-header";

static RATINGS_TAGS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".user-ratings-header, .user-ratings-movie")
        .unwrap_or_else(|e| panic!("invalid ratings selector: {e:?}"))
});
static LIST_ENTRIES: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".movie-wrapper").unwrap_or_else(|e| panic!("invalid list selector: {e:?}"))
});

/// Records found on one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageScan<R> {
    pub records: Vec<R>,
    /// Entries left out because of their category
    pub skipped: usize,
}

impl<R> Default for PageScan<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

/// Fields shared by rating and list entries
struct EntryFields {
    title: String,
    year: i32,
    directors: String,
}

/// Read an entry, or `None` when its category is excluded
fn entry_fields(
    entry: ElementRef<'_>,
    layout: &dyn Layout,
    language: Language,
    exclusions: &Exclusions,
) -> Result<Option<EntryFields>> {
    let label = layout.type_label(entry);
    if is_excluded(label.as_ref(), language, exclusions) {
        debug!(
            title = %layout.title(entry).unwrap_or_default(),
            category = ?label.as_ref().and_then(|l| classify(l, language)),
            "Skipping excluded title"
        );
        return Ok(None);
    }

    let title = layout
        .title(entry)
        .ok_or_else(|| markup_failure(layout, "<unknown>", "missing title link"))?;
    let year = layout
        .year(entry)
        .ok_or_else(|| markup_failure(layout, &title, "missing or malformed year"))?;
    let directors = layout
        .directors(entry)
        .ok_or_else(|| markup_failure(layout, &title, "missing director block"))?;

    Ok(Some(EntryFields {
        title,
        year,
        directors,
    }))
}

fn markup_failure(layout: &dyn Layout, title: &str, detail: &str) -> ScrapeError {
    error!(title = %title, layout = layout.name(), detail, "Entry does not match the page layout");
    ScrapeError::markup(title, detail)
}

fn is_date_header(tag: ElementRef<'_>) -> bool {
    tag.value().classes().any(|class| class == DATE_HEADER_CLASS)
}

/// Extract the rating records of one ratings page
pub fn extract_ratings(
    page: &Page,
    language: Language,
    exclusions: &Exclusions,
) -> Result<PageScan<RatingRecord>> {
    let layout = detect(&page.document);
    let mut scan = PageScan::default();
    // No default: entries before the first header have no date
    let mut current_date: Option<NaiveDate> = None;

    for tag in page.document.select(&RATINGS_TAGS) {
        if is_date_header(tag) {
            current_date = Some(parse_date(&clean_text(tag), language)?);
            continue;
        }

        let Some(fields) = entry_fields(tag, layout, language, exclusions)? else {
            scan.skipped += 1;
            continue;
        };

        let rating = layout
            .rating(tag)
            .ok_or_else(|| markup_failure(layout, &fields.title, "missing or malformed rating"))?;

        scan.records.push(RatingRecord {
            title: fields.title,
            year: fields.year,
            directors: fields.directors,
            watched_date: current_date,
            rating: f64::from(rating) / 2.0,
            rating10: rating.to_string(),
        });
    }

    Ok(scan)
}

/// Extract the records of one list page
pub fn extract_list(
    page: &Page,
    language: Language,
    exclusions: &Exclusions,
) -> Result<PageScan<ListRecord>> {
    let layout = detect(&page.document);
    let mut scan = PageScan::default();

    for tag in page.document.select(&LIST_ENTRIES) {
        match entry_fields(tag, layout, language, exclusions)? {
            Some(fields) => scan.records.push(ListRecord {
                title: fields.title,
                year: fields.year,
                directors: fields.directors,
            }),
            None => scan.skipped += 1,
        }
    }

    Ok(scan)
}

/// Lazy record stream over a paginated section.
///
/// Pages are fetched one at a time as records are pulled. The first error
/// ends the stream.
pub struct Records<'p, F, R, E> {
    pages: Pages<'p, F>,
    extract: E,
    buffered: std::vec::IntoIter<R>,
    skipped: usize,
    done: bool,
}

impl<'p, F, R, E> Records<'p, F, R, E>
where
    F: Fetcher,
    E: FnMut(&Page) -> Result<PageScan<R>>,
{
    pub fn new(pages: Pages<'p, F>, extract: E) -> Self {
        Self {
            pages,
            extract,
            buffered: Vec::new().into_iter(),
            skipped: 0,
            done: false,
        }
    }

    /// Pages fetched so far
    pub fn pages_read(&self) -> u32 {
        self.pages.pages_read()
    }

    /// Entries skipped by category so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<F, R, E> Iterator for Records<'_, F, R, E>
where
    F: Fetcher,
    E: FnMut(&Page) -> Result<PageScan<R>>,
{
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffered.next() {
                return Some(Ok(record));
            }
            if self.done {
                return None;
            }

            let page = match self.pages.next() {
                Some(Ok(page)) => page,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    return None;
                }
            };

            match (self.extract)(&page) {
                Ok(scan) => {
                    self.skipped += scan.skipped;
                    self.buffered = scan.records.into_iter();
                }
                Err(e) => {
                    error!(url = %page.url, error = %e, "Failed to extract page");
                    self.done = true;
                    return Some(Err(ScrapeError::Page {
                        url: page.url,
                        source: Box::new(e),
                    }));
                }
            }
        }
    }
}

/// Rating records across all pages of `template`
pub fn ratings<'p, F: Fetcher>(
    pager: &'p Pager<F>,
    template: PageTemplate,
    language: Language,
    exclusions: &'p Exclusions,
) -> Records<'p, F, RatingRecord, impl FnMut(&Page) -> Result<PageScan<RatingRecord>> + 'p> {
    Records::new(pager.pages(template), move |page: &Page| {
        extract_ratings(page, language, exclusions)
    })
}

/// List records across all pages of `template`
pub fn list_records<'p, F: Fetcher>(
    pager: &'p Pager<F>,
    template: PageTemplate,
    language: Language,
    exclusions: &'p Exclusions,
) -> Records<'p, F, ListRecord, impl FnMut(&Page) -> Result<PageScan<ListRecord>> + 'p> {
    Records::new(pager.pages(template), move |page: &Page| {
        extract_list(page, language, exclusions)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::tests::ScriptedFetcher;
    use shared::Category;

    fn exclude(categories: &[Category]) -> Exclusions {
        categories.iter().copied().collect()
    }

    fn legacy_movie(title: &str, year: &str, director: &str, rating: &str) -> String {
        format!(
            r#"<div class="user-ratings-movie">
                 <div class="mc-title"><a href="/f.html">{title}</a> ({year})</div>
                 <div class="mc-director"><span class="nb"><a title="{director}">{director}</a></span></div>
                 <div class="ur-mr-rat">{rating}</div>
               </div>"#
        )
    }

    fn header(text: &str) -> String {
        format!(r#"<div class="user-ratings-header">{text}</div>"#)
    }

    fn page(body: String) -> Page {
        Page::parse("https://example.com/en/userratings.php?p=1", &body)
    }

    /// Type-tag layout page: one dated film and one series
    fn dune_and_foundation() -> String {
        format!(
            r#"<html><body>{}
              <div class="user-ratings-movie">
                <div class="mc-title"><a href="/dune.html">Dune</a> (2021)</div>
                <div class="mc-director"><span class="nb"><a title="Denis Villeneuve">Denis Villeneuve</a></span></div>
                <div class="ur-mr-rat">8</div>
              </div>
              <div class="user-ratings-movie">
                <div class="mc-title"><a href="/foundation.html">Foundation</a> (2021) <span class="type">tv series</span></div>
                <div class="mc-director"><span class="nb"><a title="David S. Goyer (Creator)">David S. Goyer</a></span></div>
                <div class="ur-mr-rat">6</div>
              </div>
            </body></html>"#,
            header("Rated on January 5, 2021")
        )
    }

    #[test]
    fn test_dated_film_kept_and_series_excluded() {
        let scan = extract_ratings(
            &page(dune_and_foundation()),
            Language::En,
            &exclude(&[Category::TvSeries]),
        )
        .unwrap();

        assert_eq!(scan.skipped, 1);
        assert_eq!(
            scan.records,
            vec![RatingRecord {
                title: "Dune".to_string(),
                year: 2021,
                directors: "Denis Villeneuve".to_string(),
                watched_date: NaiveDate::from_ymd_opt(2021, 1, 5),
                rating: 4.0,
                rating10: "8".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_exclusions_keep_every_entry() {
        let scan = extract_ratings(&page(dune_and_foundation()), Language::En, &Exclusions::new())
            .unwrap();

        assert_eq!(scan.records.len(), 2);
        assert_eq!(scan.skipped, 0);
        assert_eq!(scan.records[1].title, "Foundation");
        assert_eq!(scan.records[1].directors, "David S. Goyer");
    }

    #[test]
    fn test_excluded_entry_does_not_disturb_date() {
        let body = format!(
            "{}{}{}{}{}",
            header("Rated on March 1, 2020"),
            legacy_movie("Fargo (TV Series)", "2014", "Noah Hawley", "9"),
            legacy_movie("Fargo", "1996", "Joel Coen", "8"),
            header("Rated on February 2, 2020"),
            legacy_movie("Heat", "1995", "Michael Mann", "7"),
        );
        let scan = extract_ratings(&page(body), Language::En, &exclude(&[Category::TvSeries]))
            .unwrap();

        let dates: Vec<_> = scan
            .records
            .iter()
            .map(|r| (r.title.as_str(), r.watched_date))
            .collect();
        assert_eq!(
            dates,
            vec![
                ("Fargo", NaiveDate::from_ymd_opt(2020, 3, 1)),
                ("Heat", NaiveDate::from_ymd_opt(2020, 2, 2)),
            ]
        );
    }

    #[test]
    fn test_rating_is_half_of_rating10() {
        let body: String = (0..=10)
            .map(|r| legacy_movie(&format!("Film {r}"), "2000", "Someone", &r.to_string()))
            .collect();
        let scan = extract_ratings(&page(body), Language::En, &Exclusions::new()).unwrap();

        assert_eq!(scan.records.len(), 11);
        for record in &scan.records {
            let rating10: u8 = record.rating10.parse().unwrap();
            assert_eq!(record.rating, f64::from(rating10) / 2.0);
        }
        assert_eq!(scan.records[7].rating, 3.5);
    }

    #[test]
    fn test_entry_before_first_header_has_no_date() {
        let body = format!(
            "{}{}{}",
            legacy_movie("Alien", "1979", "Ridley Scott", "9"),
            header("Rated on May 4, 2019"),
            legacy_movie("Aliens", "1986", "James Cameron", "8"),
        );
        let scan = extract_ratings(&page(body), Language::En, &Exclusions::new()).unwrap();

        assert_eq!(scan.records[0].watched_date, None);
        assert_eq!(scan.records[1].watched_date, NaiveDate::from_ymd_opt(2019, 5, 4));
    }

    #[test]
    fn test_spanish_page() {
        let body = format!(
            "{}{}{}",
            header("Votada el día: 12 de octubre de 2018"),
            legacy_movie("El Verdugo", "1963", "Luis García Berlanga", "10"),
            legacy_movie("Cuéntame cómo pasó (Serie de TV)", "2001", "Varios", "5"),
        );
        let scan = extract_ratings(&page(body), Language::Es, &exclude(&[Category::TvSeries]))
            .unwrap();

        assert_eq!(scan.records.len(), 1);
        assert_eq!(scan.records[0].title, "El Verdugo");
        assert_eq!(scan.records[0].watched_date, NaiveDate::from_ymd_opt(2018, 10, 12));
        assert_eq!(scan.records[0].rating, 5.0);
    }

    #[test]
    fn test_bad_date_header_is_error() {
        let body = format!(
            "{}{}",
            header("Votada el día: 12 de octubre de 2018"),
            legacy_movie("Fargo", "1996", "Joel Coen", "8"),
        );
        let err = extract_ratings(&page(body), Language::En, &Exclusions::new()).unwrap_err();
        assert!(matches!(err, ScrapeError::DateParse { .. }));
    }

    #[test]
    fn test_missing_rating_is_markup_error() {
        let body = r#"<div class="user-ratings-movie">
              <div class="mc-title"><a>Stalker</a> (1979)</div>
              <div class="mc-director"><span class="nb"><a title="Andrei Tarkovsky">A</a></span></div>
            </div>"#;
        let err = extract_ratings(&page(body.to_string()), Language::En, &Exclusions::new())
            .unwrap_err();
        match err {
            ScrapeError::Markup { title, .. } => assert_eq!(title, "Stalker"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_excluded_entry_is_not_validated() {
        // A malformed series entry is dropped before any field is read
        let body = r#"<div class="user-ratings-movie">
              <div class="mc-title"><a>Twin Peaks (TV Series)</a></div>
            </div>"#;
        let scan = extract_ratings(
            &page(body.to_string()),
            Language::En,
            &exclude(&[Category::TvSeries]),
        )
        .unwrap();
        assert!(scan.records.is_empty());
        assert_eq!(scan.skipped, 1);
    }

    #[test]
    fn test_card_list_page() {
        let body = r#"
            <div class="movie-wrapper"><div class="movie-card">
              <div class="mc-title"><a>Paprika</a> <span class="mc-year">2006</span></div>
              <div class="mc-director"><div class="credits"><span class="nb"><a title="Satoshi Kon">Satoshi Kon</a></span></div></div>
            </div></div>
            <div class="movie-wrapper"><div class="movie-card">
              <div class="mc-title"><a>Meshes of the Afternoon</a> <span class="mc-year">1943</span> <span class="type">S</span></div>
              <div class="mc-director"><div class="credits">
                <span class="nb"><a title="Maya Deren">Maya Deren</a></span>
                <span class="nb"><a title="Alexander Hammid">Alexander Hammid</a></span>
              </div></div>
            </div></div>"#;
        let p = Page::parse("https://example.com/en/userlist.php?page=1", body);

        let all = extract_list(&p, Language::En, &Exclusions::new()).unwrap();
        assert_eq!(
            all.records[1],
            ListRecord {
                title: "Meshes of the Afternoon".to_string(),
                year: 1943,
                directors: "Maya Deren, Alexander Hammid".to_string(),
            }
        );

        let no_shorts = extract_list(&p, Language::En, &exclude(&[Category::Short])).unwrap();
        assert_eq!(no_shorts.records.len(), 1);
        assert_eq!(no_shorts.records[0].title, "Paprika");
    }

    #[test]
    fn test_stream_spans_pages() {
        let page1 = format!(
            "{}{}",
            header("Rated on June 1, 2022"),
            legacy_movie("A", "2001", "X", "6")
        );
        let page2 = format!(
            "{}{}{}",
            header("Rated on May 1, 2022"),
            legacy_movie("B", "2002", "Y", "4"),
            legacy_movie("C (S)", "2003", "Z", "2")
        );
        let fetcher = ScriptedFetcher::pages(&[page1.as_str(), page2.as_str()]);
        let pager = Pager::new(&fetcher);
        let exclusions = exclude(&[Category::Short]);

        let mut stream = ratings(&pager, PageTemplate::new("r?p={page}"), Language::En, &exclusions);
        let titles: Vec<String> = stream
            .by_ref()
            .map(|r| r.map(|r| r.title))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(stream.pages_read(), 2);
        assert_eq!(stream.skipped(), 1);
        assert_eq!(fetcher.fetch_count(), 3);
    }

    #[test]
    fn test_stopping_early_fetches_nothing_more() {
        let page1 = format!(
            "{}{}{}",
            header("Rated on June 1, 2022"),
            legacy_movie("A", "2001", "X", "6"),
            legacy_movie("B", "2002", "X", "6")
        );
        let fetcher = ScriptedFetcher::pages(&[page1.as_str(), "<p>never read</p>"]);
        let pager = Pager::new(&fetcher);
        let exclusions = Exclusions::new();

        let first = ratings(&pager, PageTemplate::new("r?p={page}"), Language::En, &exclusions)
            .next()
            .unwrap()
            .unwrap();

        assert_eq!(first.title, "A");
        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[test]
    fn test_page_failure_names_url_and_ends_stream() {
        let bad = legacy_movie("Broken", "year?", "X", "6");
        let fetcher = ScriptedFetcher::pages(&[bad.as_str(), "<p>unused</p>"]);
        let pager = Pager::new(&fetcher);
        let exclusions = Exclusions::new();

        let mut stream = ratings(&pager, PageTemplate::new("r?p={page}"), Language::En, &exclusions);
        match stream.next() {
            Some(Err(ScrapeError::Page { url, source })) => {
                assert_eq!(url, "r?p=1");
                assert!(matches!(*source, ScrapeError::Markup { .. }));
            }
            other => panic!("unexpected item: {other:?}"),
        }
        assert!(stream.next().is_none());
        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[test]
    fn test_list_stream_without_entries_is_empty() {
        let fetcher = ScriptedFetcher::pages(&["<html><body></body></html>"]);
        let pager = Pager::new(&fetcher);
        let exclusions = Exclusions::new();

        let stream =
            list_records(&pager, PageTemplate::new("l?page={page}"), Language::Es, &exclusions);
        assert_eq!(stream.count(), 0);
        assert_eq!(fetcher.fetch_count(), 2);
    }
}
