use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Key accepted by [`app`].
pub const MOCK_API_KEY: &str = "mock-key";

#[derive(Clone, Debug, Serialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: u32,
    pub mpaa_rating: String,
    pub runtime: u32,
    pub synopsis: String,
    #[serde(skip)]
    pub imdb: String,
    #[serde(skip)]
    pub cast: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Review {
    pub critic: String,
    pub date: String,
    pub freshness: String,
    pub publication: String,
    pub quote: String,
}

type Params = Query<HashMap<String, String>>;
type Reply = (StatusCode, Json<Value>);

pub struct Catalog {
    key: String,
    movies: Vec<Movie>,
    reviews: HashMap<String, Vec<Review>>,
}

pub type Db = Arc<Catalog>;

impl Catalog {
    pub fn new(key: &str) -> Self {
        let movies = vec![
            movie("12911", "The Godfather", 1972, "R", 175, "0068646", &["Marlon Brando", "Al Pacino"]),
            movie("12926", "The Godfather, Part II", 1974, "R", 200, "0071562", &["Al Pacino", "Robert De Niro"]),
            movie("770805418", "Inception", 2010, "PG-13", 148, "1375666", &["Leonardo DiCaprio"]),
            movie("16992", "Alien", 1979, "R", 117, "0078748", &["Sigourney Weaver"]),
            movie("16993", "Aliens", 1986, "R", 137, "0090605", &["Sigourney Weaver", "Michael Biehn"]),
        ];
        let reviews = HashMap::from([(
            "12911".to_string(),
            vec![
                review("Roger Ebert", "fresh", "Chicago Sun-Times", "A film of grandeur."),
                review("Pauline Kael", "fresh", "New Yorker", "The greatest gangster picture ever made."),
                review("Vincent Canby", "fresh", "New York Times", "One of the most brutal and moving chronicles."),
            ],
        )]);
        Self {
            key: key.to_string(),
            movies,
            reviews,
        }
    }

    fn find(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }
}

fn movie(
    id: &str,
    title: &str,
    year: u32,
    rating: &str,
    runtime: u32,
    imdb: &str,
    cast: &[&str],
) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        year,
        mpaa_rating: rating.to_string(),
        runtime,
        synopsis: format!("{title} ({year})"),
        imdb: imdb.to_string(),
        cast: cast.iter().map(|name| name.to_string()).collect(),
    }
}

fn review(critic: &str, freshness: &str, publication: &str, quote: &str) -> Review {
    Review {
        critic: critic.to_string(),
        date: "1972-03-15".to_string(),
        freshness: freshness.to_string(),
        publication: publication.to_string(),
        quote: quote.to_string(),
    }
}

pub fn app() -> Router {
    app_with_key(MOCK_API_KEY)
}

pub fn app_with_key(key: &str) -> Router {
    let db: Db = Arc::new(Catalog::new(key));
    Router::new()
        .route("/lists/movies/{file}", get(list_movies))
        .route("/movies.json", get(search_movies))
        .route("/movies/{file}", get(movie_info))
        .route("/movies/{id}/{file}", get(movie_detail))
        .route("/movie_alias.json", get(movie_alias))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn ok(body: Value) -> Reply {
    (StatusCode::OK, Json(body))
}

fn api_error(message: &str) -> Reply {
    ok(json!({ "error": message }))
}

fn not_found() -> Reply {
    api_error("Could not find a movie with the specified id")
}

fn authorize(db: &Catalog, params: &HashMap<String, String>) -> Result<(), Reply> {
    match params.get("apikey") {
        Some(key) if *key == db.key => Ok(()),
        _ => Err((StatusCode::FORBIDDEN, Json(json!({ "error": "Account Inactive" })))),
    }
}

fn number(params: &HashMap<String, String>, key: &str, default: usize) -> usize {
    params.get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn page(movies: Vec<&Movie>, page: usize, per_page: usize) -> Value {
    let total = movies.len();
    let slice: Vec<&Movie> = movies
        .into_iter()
        .skip(page.saturating_sub(1) * per_page)
        .take(per_page)
        .collect();
    json!({ "total": total, "movies": slice })
}

async fn list_movies(State(db): State<Db>, Path(file): Path<String>, Query(params): Params) -> Reply {
    if let Err(reply) = authorize(&db, &params) {
        return reply;
    }
    let all: Vec<&Movie> = db.movies.iter().collect();
    let body = match file.as_str() {
        "box_office.json" | "opening.json" | "upcoming.json" => {
            let limit = number(&params, "limit", 10);
            page(all, 1, limit)
        }
        "in_theaters.json" => {
            let per_page = number(&params, "page_limit", 10);
            page(all, number(&params, "page", 1), per_page)
        }
        _ => return (StatusCode::NOT_FOUND, Json(json!({ "error": "Unknown list" }))),
    };
    ok(body)
}

async fn search_movies(State(db): State<Db>, Query(params): Params) -> Reply {
    if let Err(reply) = authorize(&db, &params) {
        return reply;
    }
    let q = params.get("q").map(|q| q.to_lowercase()).unwrap_or_default();
    let matches: Vec<&Movie> = db
        .movies
        .iter()
        .filter(|m| !q.is_empty() && m.title.to_lowercase().contains(&q))
        .collect();
    ok(page(
        matches,
        number(&params, "page", 1),
        number(&params, "page_limit", 30),
    ))
}

async fn movie_info(State(db): State<Db>, Path(file): Path<String>, Query(params): Params) -> Reply {
    if let Err(reply) = authorize(&db, &params) {
        return reply;
    }
    let Some(id) = file.strip_suffix(".json") else {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })));
    };
    match db.find(id) {
        Some(movie) => ok(json!(movie)),
        None => not_found(),
    }
}

async fn movie_detail(
    State(db): State<Db>,
    Path((id, file)): Path<(String, String)>,
    Query(params): Params,
) -> Reply {
    if let Err(reply) = authorize(&db, &params) {
        return reply;
    }
    let Some(movie) = db.find(&id) else {
        return not_found();
    };
    match file.as_str() {
        "cast.json" => {
            let cast: Vec<Value> = movie.cast.iter().map(|name| json!({ "name": name })).collect();
            ok(json!({ "cast": cast }))
        }
        "clips.json" => ok(json!({ "clips": [{ "title": format!("{} trailer", movie.title) }] })),
        "reviews.json" => {
            let reviews = db.reviews.get(&id).cloned().unwrap_or_default();
            let kept: Vec<Review> = match params.get("review_type").map(String::as_str) {
                Some("all") | None => reviews,
                Some(_) => Vec::new(),
            };
            let total = kept.len();
            let per_page = number(&params, "page_limit", 20);
            let start = number(&params, "page", 1).saturating_sub(1) * per_page;
            let shown: Vec<Review> = kept.into_iter().skip(start).take(per_page).collect();
            ok(json!({ "total": total, "reviews": shown }))
        }
        "similar.json" => {
            let limit = number(&params, "limit", 5);
            let others: Vec<&Movie> = db.movies.iter().filter(|m| m.id != movie.id).collect();
            let mut body = page(others, 1, limit);
            if let Some(obj) = body.as_object_mut() {
                obj.remove("total");
            }
            ok(body)
        }
        _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))),
    }
}

async fn movie_alias(State(db): State<Db>, Query(params): Params) -> Reply {
    if let Err(reply) = authorize(&db, &params) {
        return reply;
    }
    if params.get("type").map(String::as_str) != Some("imdb") {
        return api_error("Unsupported alias type");
    }
    let id = params.get("id").map(String::as_str).unwrap_or_default();
    match db.movies.iter().find(|m| m.imdb == id) {
        Some(movie) => ok(json!(movie)),
        None => not_found(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn movie_serializes_without_private_fields() {
        let catalog = Catalog::new("k");
        let json = serde_json::to_value(catalog.find("12911").unwrap()).unwrap();
        assert_eq!(json["title"], "The Godfather");
        assert_eq!(json["year"], 1972);
        assert!(json.get("imdb").is_none());
        assert!(json.get("cast").is_none());
    }

    #[test]
    fn authorize_requires_matching_key() {
        let catalog = Catalog::new("k");
        assert!(authorize(&catalog, &params(&[("apikey", "k")])).is_ok());
        let (status, _) = authorize(&catalog, &params(&[("apikey", "x")])).unwrap_err();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(authorize(&catalog, &params(&[])).is_err());
    }

    #[test]
    fn page_slices_and_counts() {
        let catalog = Catalog::new("k");
        let all: Vec<&Movie> = catalog.movies.iter().collect();
        let body = page(all, 2, 2);
        assert_eq!(body["total"], 5);
        assert_eq!(body["movies"].as_array().unwrap().len(), 2);
        assert_eq!(body["movies"][0]["id"], "770805418");
    }

    #[test]
    fn number_falls_back_on_garbage() {
        let p = params(&[("limit", "abc"), ("page", "3")]);
        assert_eq!(number(&p, "limit", 10), 10);
        assert_eq!(number(&p, "page", 1), 3);
    }
}
