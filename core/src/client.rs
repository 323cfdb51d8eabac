//! Client handle exposing one method per remote operation.
//!
//! # Design
//! `RottenClient` holds the resolved config and a transport, both behind
//! `Arc`, so clones are cheap and concurrent calls share nothing mutable.
//! Every method normalizes its input, then dispatches. Validation failures
//! are reported through the same callback, in-line, before the method
//! returns, and no request is issued for them.

use std::sync::Arc;

use serde_json::Value;

use crate::config::{ClientConfig, ClientOptions};
use crate::dispatch::dispatch;
use crate::endpoint::{CanonicalRequest, Operation};
use crate::error::RottenError;
use crate::http::Transport;
use crate::normalize::{self, ListQuery, ReviewsQuery, SearchQuery, SimilarQuery};

/// Client for the movie API, generic over how requests are sent.
pub struct RottenClient<T> {
    config: Arc<ClientConfig>,
    transport: Arc<T>,
}

impl<T> Clone for RottenClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
        }
    }
}

#[cfg(feature = "ureq")]
impl RottenClient<crate::http::UreqTransport> {
    /// Client backed by [`UreqTransport`](crate::http::UreqTransport).
    pub fn new(options: impl Into<ClientOptions>) -> Result<Self, RottenError> {
        Self::with_transport(options, crate::http::UreqTransport::new())
    }
}

impl<T: Transport + 'static> RottenClient<T> {
    pub fn with_transport(
        options: impl Into<ClientOptions>,
        transport: T,
    ) -> Result<Self, RottenError> {
        Ok(Self {
            config: Arc::new(ClientConfig::resolve(options)?),
            transport: Arc::new(transport),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Top box office earners, sorted by most recent weekend gross.
    pub fn box_office<F>(&self, query: impl Into<ListQuery>, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        self.send(Ok(normalize::list(Operation::BoxOffice, query.into())), callback);
    }

    /// Movies currently in theaters. Pages by `page_limit`.
    pub fn in_theaters<F>(&self, query: impl Into<ListQuery>, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        let canonical = normalize::in_theaters(query.into(), &self.config);
        self.send(Ok(canonical), callback);
    }

    pub fn opening<F>(&self, query: impl Into<ListQuery>, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        self.send(Ok(normalize::list(Operation::Opening, query.into())), callback);
    }

    pub fn upcoming<F>(&self, query: impl Into<ListQuery>, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        self.send(Ok(normalize::list(Operation::Upcoming, query.into())), callback);
    }

    /// Detailed information on one movie.
    pub fn info<F>(&self, id: &str, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        self.send(normalize::movie(Operation::Info, id), callback);
    }

    /// Same as [`info`](Self::info).
    pub fn get<F>(&self, id: &str, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        self.info(id, callback);
    }

    pub fn cast<F>(&self, id: &str, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        self.send(normalize::movie(Operation::Cast, id), callback);
    }

    pub fn clips<F>(&self, id: &str, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        self.send(normalize::movie(Operation::Clips, id), callback);
    }

    pub fn reviews<F>(&self, query: impl Into<ReviewsQuery>, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        self.send(normalize::reviews(query.into(), &self.config), callback);
    }

    pub fn similar<F>(&self, query: impl Into<SimilarQuery>, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        self.send(normalize::similar(query.into()), callback);
    }

    /// Look a movie up by IMDB id (`tt` prefix optional).
    pub fn alias<F>(&self, imdb_id: &str, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        self.send(normalize::alias(imdb_id), callback);
    }

    /// Same as [`alias`](Self::alias).
    pub fn imdb<F>(&self, imdb_id: &str, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        self.alias(imdb_id, callback);
    }

    pub fn search<F>(&self, query: impl Into<SearchQuery>, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        self.send(normalize::search(query.into(), &self.config), callback);
    }

    fn send<F>(&self, canonical: Result<CanonicalRequest, RottenError>, callback: F)
    where
        F: FnOnce(Result<Value, RottenError>) + Send + 'static,
    {
        match canonical {
            Ok(canonical) => {
                dispatch(&self.config, self.transport.as_ref(), canonical, Box::new(callback))
            }
            Err(err) => {
                tracing::debug!("rejected before dispatch: {err}");
                callback(Err(err));
            }
        }
    }
}
