//! Request building and dispatch.
//!
//! # Design
//! `build_request` is pure: it turns a `CanonicalRequest` plus the client
//! config into an `HttpRequest`. `dispatch` adds the I/O edge: it passes the
//! request to a `Transport`, classifies the outcome and calls the callback
//! exactly once. Nothing is shared between calls except the read-only config.

use serde_json::Value;

use crate::classify::classify;
use crate::config::ClientConfig;
use crate::endpoint::{lookup, CanonicalRequest, API_KEY_PARAM};
use crate::error::RottenError;
use crate::http::{HttpRequest, Transport};

/// Receives the result of one operation.
pub type Callback = Box<dyn FnOnce(Result<Value, RottenError>) + Send + 'static>;

/// Merge defaults with the caller's params, fill the path slot and append
/// the access key.
///
/// Query pairs come out in key order, with `apikey` last. `Unset` values are
/// skipped.
pub fn build_request(
    config: &ClientConfig,
    canonical: &CanonicalRequest,
) -> Result<HttpRequest, RottenError> {
    let descriptor = lookup(canonical.operation.name())?;

    let mut params = descriptor.default_params();
    for (key, value) in &canonical.params {
        if let Some(slot) = params.get_mut(key) {
            *slot = value.clone();
        }
    }

    let mut query: Vec<(String, String)> = params
        .into_iter()
        .filter(|(key, _)| key != API_KEY_PARAM)
        .filter_map(|(key, value)| value.render().map(|v| (key, v)))
        .collect();
    query.push((API_KEY_PARAM.to_string(), config.key().to_string()));

    let path = descriptor.render_path(canonical.path_value.as_deref());
    Ok(HttpRequest {
        url: format!("{}{path}", config.base_url()),
        query,
    })
}

/// Build, send, classify, and report to `callback`.
pub fn dispatch<T: Transport + ?Sized>(
    config: &ClientConfig,
    transport: &T,
    canonical: CanonicalRequest,
    callback: Callback,
) {
    let request = match build_request(config, &canonical) {
        Ok(request) => request,
        Err(err) => return callback(Err(err)),
    };
    let operation = canonical.operation;
    tracing::debug!(%operation, url = %request.url, "dispatching request");

    transport.get(
        request,
        Box::new(move |outcome| {
            let result = classify(outcome);
            if let Err(err) = &result {
                tracing::warn!(%operation, kind = ?err.kind(), "request failed: {err}");
            }
            callback(result);
        }),
    );
}
