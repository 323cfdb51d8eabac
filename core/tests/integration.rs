//! Every operation against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `RottenClient` over
//! real HTTP through `UreqTransport`. Results arrive on transport threads, so
//! each call forwards its callback result over a channel.

use std::sync::mpsc;
use std::time::Duration;

use rotten_core::{
    ClientOptions, ListOptions, Movie, MovieList, ReviewList, ReviewOptions, RottenClient,
    RottenError, SearchOptions, SimilarOptions, UreqTransport,
};
use serde_json::Value;

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn client(base_url: &str, key: &str, limit: u32) -> RottenClient<UreqTransport> {
    RottenClient::new(ClientOptions {
        key: Some(key.to_string()),
        limit: Some(limit),
        base_url: Some(base_url.to_string()),
    })
    .unwrap()
}

/// Run one operation and wait for its callback.
fn wait(start: impl FnOnce(Box<dyn FnOnce(Result<Value, RottenError>) + Send>)) -> Result<Value, RottenError> {
    let (tx, rx) = mpsc::channel();
    start(Box::new(move |result| {
        tx.send(result).unwrap();
    }));
    rx.recv_timeout(Duration::from_secs(10)).expect("callback never fired")
}

#[test]
fn every_operation_round_trips() {
    let base = start_server();
    let c = client(&base, mock_server::MOCK_API_KEY, 3);

    // Step 1: box office with defaults returns up to 10 movies.
    let data = wait(|cb| c.box_office((), cb)).unwrap();
    let list: MovieList = serde_json::from_value(data).unwrap();
    assert_eq!(list.movies.len(), 5);

    // Step 2: numeric limit shorthand.
    let data = wait(|cb| c.opening(2u32, cb)).unwrap();
    let list: MovieList = serde_json::from_value(data).unwrap();
    assert_eq!(list.movies.len(), 2);

    // Step 3: upcoming with an options object.
    let data = wait(|cb| {
        c.upcoming(
            ListOptions {
                limit: Some(1),
                ..ListOptions::default()
            },
            cb,
        )
    })
    .unwrap();
    let list: MovieList = serde_json::from_value(data).unwrap();
    assert_eq!(list.movies.len(), 1);

    // Step 4: in theaters pages by the configured limit.
    let data = wait(|cb| c.in_theaters(ListOptions::default(), cb)).unwrap();
    let list: MovieList = serde_json::from_value(data).unwrap();
    assert_eq!(list.movies.len(), 3);

    // Step 5: info, cast, clips.
    let data = wait(|cb| c.info("12911", cb)).unwrap();
    let movie: Movie = serde_json::from_value(data).unwrap();
    assert_eq!(movie.title, "The Godfather");
    assert_eq!(movie.year, Some(1972));

    let data = wait(|cb| c.cast("12911", cb)).unwrap();
    assert_eq!(data["cast"][1]["name"], "Al Pacino");

    let data = wait(|cb| c.clips("12911", cb)).unwrap();
    assert!(data["clips"].is_array());

    // Step 6: reviews use the configured page size.
    let data = wait(|cb| c.reviews("12911", cb)).unwrap();
    let reviews: ReviewList = serde_json::from_value(data).unwrap();
    assert_eq!(reviews.total, Some(3));
    assert_eq!(reviews.reviews.len(), 3);

    let data = wait(|cb| {
        c.reviews(
            ReviewOptions {
                id: Some("12911".to_string()),
                limit: Some(1),
                page: Some(2),
                ..ReviewOptions::default()
            },
            cb,
        )
    })
    .unwrap();
    let reviews: ReviewList = serde_json::from_value(data).unwrap();
    assert_eq!(reviews.reviews.len(), 1);
    assert_eq!(reviews.reviews[0].critic, "Pauline Kael");

    // Step 7: similar with an explicit limit.
    let data = wait(|cb| {
        c.similar(
            SimilarOptions {
                id: Some("12911".to_string()),
                limit: Some(2),
            },
            cb,
        )
    })
    .unwrap();
    let list: MovieList = serde_json::from_value(data).unwrap();
    assert_eq!(list.movies.len(), 2);

    // Step 8: alias strips the tt prefix before sending.
    let data = wait(|cb| c.alias("tt0068646", cb)).unwrap();
    assert_eq!(data["id"], "12911");

    // Step 9: search, shorthand and object.
    let data = wait(|cb| c.search("Godfather", cb)).unwrap();
    let list: MovieList = serde_json::from_value(data).unwrap();
    assert_eq!(list.total, Some(2));

    let data = wait(|cb| {
        c.search(
            SearchOptions {
                query: Some("alien".to_string()),
                limit: Some(1),
                ..SearchOptions::default()
            },
            cb,
        )
    })
    .unwrap();
    let list: MovieList = serde_json::from_value(data).unwrap();
    assert_eq!(list.total, Some(2));
    assert_eq!(list.movies.len(), 1);
}

#[test]
fn error_paths_over_http() {
    let base = start_server();
    let c = client(&base, mock_server::MOCK_API_KEY, 10);

    // Embedded error member on a 200.
    let err = wait(|cb| c.info("1", cb)).unwrap_err();
    assert_eq!(
        err,
        RottenError::Api("Could not find a movie with the specified id".to_string())
    );

    // Validation never reaches the server.
    assert_eq!(wait(|cb| c.info("abc", cb)), Err(RottenError::InvalidId));
    assert_eq!(wait(|cb| c.search("  ", cb)), Err(RottenError::EmptyQuery));
    assert_eq!(wait(|cb| c.alias("nm123", cb)), Err(RottenError::InvalidImdbId));

    // Wrong key: non-200 wins over the embedded error.
    let bad = client(&base, "wrong-key", 10);
    assert_eq!(wait(|cb| bad.upcoming((), cb)), Err(RottenError::Http(403)));
}

#[test]
fn unreachable_host_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let c = client(&format!("http://{addr}"), "key", 10);
    let err = wait(|cb| c.box_office((), cb)).unwrap_err();
    assert!(matches!(err, RottenError::Transport(_)), "{err:?}");
}

#[test]
fn concurrent_calls_complete_independently() {
    let base = start_server();
    let c = client(&base, mock_server::MOCK_API_KEY, 10);

    let (tx, rx) = mpsc::channel();
    for id in ["12911", "12926", "16992", "16993"] {
        let tx = tx.clone();
        c.info(id, move |result| {
            tx.send(result).unwrap();
        });
    }
    drop(tx);

    let mut titles: Vec<String> = rx
        .iter()
        .map(|r| r.unwrap()["title"].as_str().unwrap().to_string())
        .collect();
    titles.sort();
    assert_eq!(
        titles,
        vec!["Alien", "Aliens", "The Godfather", "The Godfather, Part II"]
    );
}
