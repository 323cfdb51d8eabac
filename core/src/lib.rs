//! Client library for a read-only movie database API.
//!
//! # Overview
//! Each public operation accepts a small set of input shapes, normalizes them
//! into a canonical parameter set, builds a GET request from a static endpoint
//! table and classifies the response into parsed JSON or a [`RottenError`].
//! Results are always delivered through the callback passed to the operation.
//!
//! # Design
//! - `endpoint` is the static registry: URL templates and default params.
//! - `normalize` turns caller input into a `CanonicalRequest` with no I/O.
//! - `dispatch` merges defaults, injects the access key and calls the
//!   `Transport`; `classify` maps the raw outcome to a result.
//! - `RottenClient` ties these together behind one method per operation.
//! - The transport is a trait so the core stays testable without a network;
//!   `UreqTransport` (feature `ureq`) is the default implementation.
//!
//! ```no_run
//! # #[cfg(feature = "ureq")]
//! # fn demo() -> Result<(), rotten_core::RottenError> {
//! let client = rotten_core::RottenClient::new("YOUR_API_KEY")?;
//! client.search("The Godfather", |result| match result {
//!     Ok(data) => println!("{data}"),
//!     Err(err) => eprintln!("{err}"),
//! });
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod normalize;
pub mod types;

pub use classify::{classify, Classified};
pub use client::RottenClient;
pub use config::{ClientConfig, ClientOptions, DEFAULT_BASE_URL};
pub use dispatch::{build_request, dispatch, Callback};
pub use endpoint::{lookup, CanonicalRequest, EndpointDescriptor, Operation, ParamValue, Params};
pub use error::{ErrorKind, RottenError};
#[cfg(feature = "ureq")]
pub use http::UreqTransport;
pub use http::{Completion, HttpRequest, HttpResponse, Transport, TransportError};
pub use normalize::{
    ListOptions, ListQuery, ReviewOptions, ReviewType, ReviewsQuery, SearchOptions, SearchQuery,
    SimilarOptions, SimilarQuery,
};
pub use types::{Movie, MovieList, Review, ReviewList};
