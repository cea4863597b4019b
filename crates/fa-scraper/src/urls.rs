//! Page templates for the paginated FilmAffinity sections.

use crate::locale::locale;
use crate::pager::PageTemplate;
use shared::{Language, ListId, UserId};

/// Builds page templates for one site root and language
#[derive(Debug, Clone)]
pub struct SiteUrls {
    root: String,
}

impl SiteUrls {
    pub fn new(base_url: &str, language: Language) -> Self {
        Self {
            root: format!(
                "{}/{}/",
                base_url.trim_end_matches('/'),
                locale(language).path_segment
            ),
        }
    }

    /// A user's ratings history, ordered by `order`
    pub fn ratings(&self, user_id: &UserId, order: u32) -> PageTemplate {
        PageTemplate::new(format!(
            "{}userratings.php?user_id={}&p={}&orderby={}",
            self.root,
            user_id,
            PageTemplate::SLOT,
            order
        ))
    }

    /// The titles in one user list
    pub fn list(&self, user_id: &UserId, list_id: &ListId) -> PageTemplate {
        PageTemplate::new(format!(
            "{}userlist.php?user_id={}&list_id={}&page={}",
            self.root,
            user_id,
            list_id,
            PageTemplate::SLOT
        ))
    }

    /// Overview of a user's lists
    pub fn lists(&self, user_id: &UserId) -> PageTemplate {
        PageTemplate::new(format!(
            "{}userlists.php?user_id={}&p={}",
            self.root,
            user_id,
            PageTemplate::SLOT
        ))
    }
}
