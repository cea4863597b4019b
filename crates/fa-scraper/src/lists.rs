//! Enumeration of a user's lists.

use crate::error::{Result, ScrapeError};
use crate::fetch::Fetcher;
use crate::extract::{PageScan, Records};
use crate::layout::clean_text;
use crate::pager::{Page, PageTemplate, Pager};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use shared::{ListDescriptor, ListId};
use tracing::{debug, error, warn};

static LIST_NAMES: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".list-name-wrapper")
        .unwrap_or_else(|e| panic!("invalid list name selector: {e:?}"))
});
static LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").unwrap_or_else(|e| panic!("invalid link selector: {e:?}")));

const LIST_ID_MARKER: &str = "list_id=";

/// Keep alphanumerics and single spaces, in order
pub fn sanitize_list_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect::<String>()
        .split(' ')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Value of the `list_id` query parameter in `href`
pub fn list_id_from_href(href: &str) -> Option<ListId> {
    let start = href.find(LIST_ID_MARKER)? + LIST_ID_MARKER.len();
    let value = href[start..]
        .split(['&', '#', ';'])
        .next()
        .unwrap_or_default()
        .trim();
    if value.is_empty() {
        None
    } else {
        Some(ListId::new(value))
    }
}

fn descriptor(wrapper: ElementRef<'_>) -> Result<ListDescriptor> {
    let raw_name = clean_text(wrapper);
    let fail = |detail: &str| {
        error!(list = %raw_name, detail, "List entry does not match the page layout");
        ScrapeError::markup(raw_name.clone(), detail)
    };

    let link = wrapper.select(&LINK).next().ok_or_else(|| fail("missing list link"))?;
    let href = link.value().attr("href").unwrap_or_default();
    let id = list_id_from_href(href).ok_or_else(|| fail("link has no list_id"))?;

    let mut name = sanitize_list_name(&clean_text(link));
    if name.is_empty() {
        warn!(list_id = %id, list = %raw_name, "List name has no usable characters, naming it by id");
        name = id.as_str().to_string();
    }

    Ok(ListDescriptor { id, name })
}

/// Extract the list descriptors of one lists overview page
pub fn extract_lists(page: &Page) -> Result<PageScan<ListDescriptor>> {
    let mut scan = PageScan::default();
    for wrapper in page.document.select(&LIST_NAMES) {
        let list = descriptor(wrapper)?;
        debug!(list_id = %list.id, name = %list.name, "Found list");
        scan.records.push(list);
    }
    Ok(scan)
}

/// Every list of a user, across all overview pages
pub fn user_lists<'p, F: Fetcher>(
    pager: &'p Pager<F>,
    template: PageTemplate,
) -> Records<'p, F, ListDescriptor, impl FnMut(&Page) -> Result<PageScan<ListDescriptor>> + 'p> {
    Records::new(pager.pages(template), |page: &Page| extract_lists(page))
}
