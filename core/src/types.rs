//! Typed views over the JSON the API returns.
//!
//! # Design
//! Callbacks receive raw `serde_json::Value`s. These DTOs are an optional
//! layer for callers who want structure: every field is defaulted and
//! unknown fields are ignored, so a partial payload still deserializes.

use serde::{Deserialize, Serialize};

/// A movie as it appears in lists and in `info` responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: Option<u32>,
    pub mpaa_rating: Option<String>,
    pub runtime: Option<u32>,
    pub synopsis: Option<String>,
}

/// Response of the list endpoints, `similar` and `search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieList {
    pub total: Option<u64>,
    pub movies: Vec<Movie>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub critic: String,
    pub date: Option<String>,
    pub freshness: Option<String>,
    pub publication: Option<String>,
    pub quote: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewList {
    pub total: Option<u64>,
    pub reviews: Vec<Review>,
}
