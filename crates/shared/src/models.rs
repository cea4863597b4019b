//! Data models for the project.
//!
//! This module defines the records produced by the scraper, the identifiers
//! used to address FilmAffinity pages, and the closed enumerations for site
//! language and title category.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// FilmAffinity user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("User id cannot be empty"));
        }
        Ok(Self::new(s))
    }
}

/// Identifier of a user-curated list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ListId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("List id cannot be empty"));
        }
        Ok(Self::new(s))
    }
}

/// Site language. Selects URL path segment, date grammar and category labels.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    #[default]
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            _ => Err(anyhow::anyhow!("Invalid language: {} (expected es or en)", s)),
        }
    }
}

/// Title categories that can be excluded from an export
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "tvs")]
    TvSeries,
    #[serde(rename = "tvms")]
    TvMiniseries,
    #[serde(rename = "tv")]
    Tv,
    #[serde(rename = "s")]
    Short,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::TvSeries,
        Category::TvMiniseries,
        Category::Tv,
        Category::Short,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::TvSeries => "tvs",
            Category::TvMiniseries => "tvms",
            Category::Tv => "tv",
            Category::Short => "s",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tvs" => Ok(Category::TvSeries),
            "tvms" => Ok(Category::TvMiniseries),
            "tv" => Ok(Category::Tv),
            "s" => Ok(Category::Short),
            _ => Err(anyhow::anyhow!(
                "Invalid category: {} (expected one of tvs, tvms, tv, s)",
                s
            )),
        }
    }
}

/// One rated title from a user's ratings history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatingRecord {
    pub title: String,
    pub year: i32,
    pub directors: String,
    pub watched_date: Option<NaiveDate>,
    pub rating: f64, // 0.0 to 5.0 in 0.5 steps
    pub rating10: String,
}

impl RatingRecord {
    pub const FIELDS: [&'static str; 6] = [
        "Title",
        "Year",
        "Directors",
        "WatchedDate",
        "Rating",
        "Rating10",
    ];
}

/// One title from a user list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRecord {
    pub title: String,
    pub year: i32,
    pub directors: String,
}

impl ListRecord {
    pub const FIELDS: [&'static str; 3] = ["Title", "Year", "Directors"];
}

/// A user list found on the lists overview pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDescriptor {
    pub id: ListId,
    /// Alphanumerics and spaces only, safe for file names
    pub name: String,
}
