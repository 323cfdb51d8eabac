//! Static registry of remote endpoints.
//!
//! # Design
//! Every operation maps to one `EndpointDescriptor`: a URL template relative
//! to the configured base URL, an optional path parameter, and a set of
//! default query parameters. Descriptors are `'static` data. Defaults are
//! produced by `default_params()`, which builds a fresh map each call, so no
//! request can observe values written by another one.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::RottenError;

/// Default page size when neither the caller nor the config supplies one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Query key reserved for the access key.
pub const API_KEY_PARAM: &str = "apikey";

/// One named remote read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    BoxOffice,
    InTheaters,
    Opening,
    Upcoming,
    Info,
    Cast,
    Clips,
    Reviews,
    Similar,
    Alias,
    Search,
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::BoxOffice,
        Operation::InTheaters,
        Operation::Opening,
        Operation::Upcoming,
        Operation::Info,
        Operation::Cast,
        Operation::Clips,
        Operation::Reviews,
        Operation::Similar,
        Operation::Alias,
        Operation::Search,
    ];

    /// Wire name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Operation::BoxOffice => "boxOffice",
            Operation::InTheaters => "inTheaters",
            Operation::Opening => "opening",
            Operation::Upcoming => "upcoming",
            Operation::Info => "info",
            Operation::Cast => "cast",
            Operation::Clips => "clips",
            Operation::Reviews => "reviews",
            Operation::Similar => "similar",
            Operation::Alias => "alias",
            Operation::Search => "search",
        }
    }

    pub fn descriptor(self) -> EndpointDescriptor {
        let (url_template, path_param) = match self {
            Operation::BoxOffice => ("/lists/movies/box_office.json", None),
            Operation::InTheaters => ("/lists/movies/in_theaters.json", None),
            Operation::Opening => ("/lists/movies/opening.json", None),
            Operation::Upcoming => ("/lists/movies/upcoming.json", None),
            Operation::Info => ("/movies/{id}.json", Some("id")),
            Operation::Cast => ("/movies/{id}/cast.json", Some("id")),
            Operation::Clips => ("/movies/{id}/clips.json", Some("id")),
            Operation::Reviews => ("/movies/{id}/reviews.json", Some("id")),
            Operation::Similar => ("/movies/{id}/similar.json", Some("id")),
            Operation::Alias => ("/movie_alias.json", None),
            Operation::Search => ("/movies.json", None),
        };
        EndpointDescriptor {
            operation: self,
            url_template,
            path_param,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = RottenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| RottenError::UnknownOperation(s.to_string()))
    }
}

/// Resolve an operation name to its descriptor.
pub fn lookup(name: &str) -> Result<EndpointDescriptor, RottenError> {
    name.parse::<Operation>().map(Operation::descriptor)
}

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Int(u64),
    /// Declared but without a value; never transmitted.
    Unset,
}

impl ParamValue {
    /// Wire form, or `None` for `Unset`.
    pub fn render(&self) -> Option<String> {
        match self {
            ParamValue::Text(s) => Some(s.clone()),
            ParamValue::Int(n) => Some(n.to_string()),
            ParamValue::Unset => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Int(u64::from(n))
    }
}

/// Query parameters keyed by name, sorted for deterministic output.
pub type Params = BTreeMap<String, ParamValue>;

/// Immutable description of one remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub operation: Operation,
    /// Path relative to the base URL, with at most one `{name}` slot.
    pub url_template: &'static str,
    pub path_param: Option<&'static str>,
}

impl EndpointDescriptor {
    /// Default query parameters, freshly built on every call.
    pub fn default_params(&self) -> Params {
        let defaults: Vec<(&str, ParamValue)> = match self.operation {
            Operation::BoxOffice | Operation::Opening | Operation::Upcoming => vec![
                ("limit", DEFAULT_LIMIT.into()),
                ("country", "us".into()),
            ],
            Operation::InTheaters => vec![
                ("page", 1u32.into()),
                ("country", "us".into()),
                ("page_limit", DEFAULT_LIMIT.into()),
            ],
            Operation::Info | Operation::Cast | Operation::Clips => Vec::new(),
            Operation::Reviews => vec![
                ("page", 1u32.into()),
                ("country", "us".into()),
                ("page_limit", 20u32.into()),
                ("review_type", "all".into()),
            ],
            Operation::Similar => vec![("limit", 5u32.into())],
            Operation::Alias => vec![("type", "imdb".into()), ("id", ParamValue::Unset)],
            Operation::Search => vec![
                ("q", "".into()),
                ("page", 1u32.into()),
                ("page_limit", 30u32.into()),
            ],
        };
        defaults
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Whether `key` may be sent to this endpoint as a query parameter.
    pub fn accepts(&self, key: &str) -> bool {
        self.default_params().contains_key(key)
    }

    /// The template with its slot filled, or untouched when there is no slot.
    pub fn render_path(&self, value: Option<&str>) -> String {
        match (self.path_param, value) {
            (Some(name), Some(value)) => {
                self.url_template.replacen(&format!("{{{name}}}"), value, 1)
            }
            _ => self.url_template.to_string(),
        }
    }
}

/// Fully normalized call, ready for the dispatcher.
///
/// `params` only ever holds keys the endpoint declares in its defaults;
/// `param` silently drops anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    pub operation: Operation,
    pub path_value: Option<String>,
    pub params: Params,
}

impl CanonicalRequest {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            path_value: None,
            params: Params::new(),
        }
    }

    pub fn with_path(mut self, value: impl Into<String>) -> Self {
        self.path_value = Some(value.into());
        self
    }

    pub fn param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        if self.operation.descriptor().accepts(key) {
            self.params.insert(key.to_string(), value.into());
        }
        self
    }

    /// Like `param`, but skips `None`.
    pub fn param_opt<V: Into<ParamValue>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }
}
