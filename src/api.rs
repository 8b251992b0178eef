use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rusqlite::Connection;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::error::Error;
use crate::store::{self, DishChanges};

pub type Db = Arc<Mutex<Connection>>;

const DEFAULT_LIMIT: i64 = 50;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[derive(Deserialize)]
pub struct DishIn {
    pub name: String,
    pub canonical_dish_key: Option<String>,
}

#[derive(Deserialize)]
pub struct DishUpdate {
    pub name: Option<String>,
    pub canonical_dish_key: Option<String>,
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/dishes", get(search_dishes).post(create_dish))
        .route(
            "/dishes/{id}",
            get(get_dish).patch(update_dish).delete(delete_dish),
        )
        .layer(Extension(db))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
}

fn lock(db: &Db) -> MutexGuard<'_, Connection> {
    db.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

fn store_error(err: Error) -> Response {
    if err.is_unique_violation() {
        return (StatusCode::CONFLICT, "Dish name already exists").into_response();
    }
    error!("Store failure: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

async fn search_dishes(
    Query(params): Query<SearchParams>,
    Extension(db): Extension<Db>,
) -> Response {
    if params.limit < 0 {
        return (StatusCode::BAD_REQUEST, "limit must not be negative").into_response();
    }

    let conn = lock(&db);
    match store::search_dishes(&conn, &params.q, params.limit) {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => store_error(err),
    }
}

async fn get_dish(Path(id): Path<i64>, Extension(db): Extension<Db>) -> Response {
    let conn = lock(&db);
    match store::get_dish(&conn, id) {
        Ok(Some(dish)) => Json(dish).into_response(),
        Ok(None) => not_found(),
        Err(err) => store_error(err),
    }
}

async fn create_dish(Extension(db): Extension<Db>, Json(payload): Json<DishIn>) -> Response {
    let name = payload.name.trim();
    let key = payload
        .canonical_dish_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty());

    let conn = lock(&db);
    match store::create_dish(&conn, name, key) {
        Ok(dish) => Json(dish).into_response(),
        Err(err) => store_error(err),
    }
}

async fn update_dish(
    Path(id): Path<i64>,
    Extension(db): Extension<Db>,
    Json(payload): Json<DishUpdate>,
) -> Response {
    let changes = DishChanges {
        name: payload.name.as_deref().map(str::trim),
        canonical_dish_key: payload.canonical_dish_key.as_deref(),
    };
    if changes.is_empty() {
        return (StatusCode::BAD_REQUEST, "No fields to update").into_response();
    }

    let conn = lock(&db);
    match store::update_dish(&conn, id, &changes) {
        Ok(Some(dish)) => Json(dish).into_response(),
        Ok(None) => not_found(),
        Err(err) => store_error(err),
    }
}

async fn delete_dish(Path(id): Path<i64>, Extension(db): Extension<Db>) -> Response {
    let conn = lock(&db);
    match store::delete_dish(&conn, id) {
        Ok(true) => Json(serde_json::json!({ "deleted": id })).into_response(),
        Ok(false) => not_found(),
        Err(err) => store_error(err),
    }
}
