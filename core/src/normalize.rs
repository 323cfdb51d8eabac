//! Argument normalization for every public operation.
//!
//! # Design
//! Each operation accepts a small closed set of input shapes, expressed as an
//! enum per operation family. A normalize function matches on the shape and
//! produces a `CanonicalRequest`, or a validation error, without doing any
//! I/O. Keys an endpoint does not declare are dropped by `CanonicalRequest`
//! itself, so option structs may carry fields some endpoints ignore.

use serde::Deserialize;

use crate::config::ClientConfig;
use crate::endpoint::{CanonicalRequest, Operation};
use crate::error::RottenError;

/// Input for `boxOffice`, `inTheaters`, `opening` and `upcoming`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListQuery {
    /// Use the endpoint defaults.
    #[default]
    Defaults,
    /// ISO 3166-1 alpha-2 country code.
    Country(String),
    /// Result limit.
    Limit(u32),
    Options(ListOptions),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ListOptions {
    pub country: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub page_limit: Option<u32>,
}

impl From<()> for ListQuery {
    fn from(_: ()) -> Self {
        ListQuery::Defaults
    }
}

impl From<&str> for ListQuery {
    fn from(country: &str) -> Self {
        ListQuery::Country(country.to_string())
    }
}

impl From<String> for ListQuery {
    fn from(country: String) -> Self {
        ListQuery::Country(country)
    }
}

impl From<u32> for ListQuery {
    fn from(limit: u32) -> Self {
        ListQuery::Limit(limit)
    }
}

impl From<ListOptions> for ListQuery {
    fn from(options: ListOptions) -> Self {
        ListQuery::Options(options)
    }
}

/// Which reviews to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewType {
    All,
    TopCritic,
    Dvd,
}

impl ReviewType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewType::All => "all",
            ReviewType::TopCritic => "top_critic",
            ReviewType::Dvd => "dvd",
        }
    }
}

/// Input for `reviews`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewsQuery {
    Id(String),
    Options(ReviewOptions),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ReviewOptions {
    pub id: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub page_limit: Option<u32>,
    pub country: Option<String>,
    pub review_type: Option<ReviewType>,
}

impl From<&str> for ReviewsQuery {
    fn from(id: &str) -> Self {
        ReviewsQuery::Id(id.to_string())
    }
}

impl From<String> for ReviewsQuery {
    fn from(id: String) -> Self {
        ReviewsQuery::Id(id)
    }
}

impl From<ReviewOptions> for ReviewsQuery {
    fn from(options: ReviewOptions) -> Self {
        ReviewsQuery::Options(options)
    }
}

/// Input for `similar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimilarQuery {
    Id(String),
    Options(SimilarOptions),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SimilarOptions {
    pub id: Option<String>,
    pub limit: Option<u32>,
}

impl From<&str> for SimilarQuery {
    fn from(id: &str) -> Self {
        SimilarQuery::Id(id.to_string())
    }
}

impl From<String> for SimilarQuery {
    fn from(id: String) -> Self {
        SimilarQuery::Id(id)
    }
}

impl From<SimilarOptions> for SimilarQuery {
    fn from(options: SimilarOptions) -> Self {
        SimilarQuery::Options(options)
    }
}

/// Input for `search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Text(String),
    /// Searched for as its decimal text.
    Number(i64),
    Options(SearchOptions),
}

/// `q` takes precedence over `query` unless it is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub q: Option<String>,
    pub query: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub page_limit: Option<u32>,
}

impl From<&str> for SearchQuery {
    fn from(q: &str) -> Self {
        SearchQuery::Text(q.to_string())
    }
}

impl From<String> for SearchQuery {
    fn from(q: String) -> Self {
        SearchQuery::Text(q)
    }
}

impl From<i64> for SearchQuery {
    fn from(n: i64) -> Self {
        SearchQuery::Number(n)
    }
}

impl From<SearchOptions> for SearchQuery {
    fn from(options: SearchOptions) -> Self {
        SearchQuery::Options(options)
    }
}

/// True when `id` is one or more ASCII decimal digits.
pub fn is_movie_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Strip an optional `tt` prefix and return the digits, if the rest is valid.
pub fn imdb_digits(id: &str) -> Option<&str> {
    let digits = id.strip_prefix("tt").unwrap_or(id);
    is_movie_id(digits).then_some(digits)
}

// `limit`, then `page_limit`, then the configured default; zero counts as absent.
fn page_limit(limit: Option<u32>, page_limit: Option<u32>, fallback: u32) -> u32 {
    limit
        .filter(|&n| n > 0)
        .or(page_limit.filter(|&n| n > 0))
        .unwrap_or(fallback)
}

fn checked_id(id: Option<String>) -> Result<String, RottenError> {
    id.filter(|id| is_movie_id(id)).ok_or(RottenError::InvalidId)
}

/// `boxOffice`, `opening` and `upcoming`.
pub fn list(operation: Operation, query: ListQuery) -> CanonicalRequest {
    let req = CanonicalRequest::new(operation);
    match query {
        ListQuery::Defaults => req,
        ListQuery::Country(country) => req.param("country", country),
        ListQuery::Limit(limit) => req.param("limit", limit),
        ListQuery::Options(options) => req
            .param_opt("country", options.country)
            .param_opt("limit", options.limit)
            .param_opt("page", options.page)
            .param_opt("page_limit", options.page_limit),
    }
}

/// `inTheaters` pages by `page_limit`, so a bare limit lands there.
pub fn in_theaters(query: ListQuery, config: &ClientConfig) -> CanonicalRequest {
    let req = CanonicalRequest::new(Operation::InTheaters);
    match query {
        ListQuery::Defaults => req,
        ListQuery::Country(country) => req.param("country", country),
        ListQuery::Limit(limit) => req.param("page_limit", limit),
        ListQuery::Options(options) => req
            .param_opt("country", options.country)
            .param_opt("page", options.page)
            .param(
                "page_limit",
                page_limit(options.limit, options.page_limit, config.limit()),
            ),
    }
}

/// `info`, `cast` and `clips`.
pub fn movie(operation: Operation, id: &str) -> Result<CanonicalRequest, RottenError> {
    let id = checked_id(Some(id.to_string()))?;
    Ok(CanonicalRequest::new(operation).with_path(id))
}

pub fn reviews(query: ReviewsQuery, config: &ClientConfig) -> Result<CanonicalRequest, RottenError> {
    let options = match query {
        ReviewsQuery::Id(id) => ReviewOptions {
            id: Some(id),
            ..ReviewOptions::default()
        },
        ReviewsQuery::Options(options) => options,
    };
    let id = checked_id(options.id)?;
    Ok(CanonicalRequest::new(Operation::Reviews)
        .with_path(id)
        .param_opt("page", options.page)
        .param_opt("country", options.country)
        .param_opt("review_type", options.review_type.map(ReviewType::as_str))
        .param(
            "page_limit",
            page_limit(options.limit, options.page_limit, config.limit()),
        ))
}

pub fn similar(query: SimilarQuery) -> Result<CanonicalRequest, RottenError> {
    let options = match query {
        SimilarQuery::Id(id) => SimilarOptions {
            id: Some(id),
            limit: None,
        },
        SimilarQuery::Options(options) => options,
    };
    let id = checked_id(options.id)?;
    Ok(CanonicalRequest::new(Operation::Similar)
        .with_path(id)
        .param_opt("limit", options.limit.filter(|&n| n > 0)))
}

pub fn alias(imdb_id: &str) -> Result<CanonicalRequest, RottenError> {
    let digits = imdb_digits(imdb_id).ok_or(RottenError::InvalidImdbId)?;
    Ok(CanonicalRequest::new(Operation::Alias).param("id", digits))
}

pub fn search(query: SearchQuery, config: &ClientConfig) -> Result<CanonicalRequest, RottenError> {
    let options = match query {
        SearchQuery::Text(q) => SearchOptions {
            q: Some(q),
            ..SearchOptions::default()
        },
        SearchQuery::Number(n) => SearchOptions {
            q: Some(n.to_string()),
            ..SearchOptions::default()
        },
        SearchQuery::Options(options) => options,
    };
    let q = options
        .q
        .filter(|q| !q.is_empty())
        .or(options.query)
        .filter(|q| !q.trim().is_empty())
        .ok_or(RottenError::EmptyQuery)?;
    Ok(CanonicalRequest::new(Operation::Search)
        .param("q", q)
        .param_opt("page", options.page)
        .param(
            "page_limit",
            page_limit(options.limit, options.page_limit, config.limit()),
        ))
}
