pub mod auth;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod routes;
pub mod store;
pub mod templates;

use std::sync::Arc;

use axum::Router;
use axum::extract::FromRef;
use axum::routing::{get, post};
use axum_extra::extract::cookie::Key;

use crate::config::Config;
use crate::github::GitHubClient;
use crate::store::MovieStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<MovieStore>,
    pub github: Arc<GitHubClient>,
    cookie_key: Key,
}

impl AppState {
    pub fn new(config: Config, http: reqwest::Client) -> Self {
        let cookie_key = Key::derive_from(config.session_secret.as_bytes());
        let store = Arc::new(MovieStore::new(config.data_file.clone()));
        let github = Arc::new(GitHubClient::new(
            http,
            config.github_client_id.clone(),
            config.github_client_secret.clone(),
        ));
        Self { config: Arc::new(config), store, github, cookie_key }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(auth::register_page))
        .route("/register", post(auth::register))
        .route("/logout", get(auth::logout))
        .route("/auth/github", get(auth::github_login))
        .route("/auth/github/callback", get(auth::github_callback))
        .route("/catalogue", get(routes::catalogue_page))
        .route("/catalogue/new", get(routes::movie_form_page).post(routes::create_from_form))
        .route("/catalogue/{id}", get(routes::movie_page))
        .route("/catalogue/{id}/delete", post(routes::delete_from_form))
        .route("/movies", get(routes::list_movies).post(routes::create_movie))
        .route("/movies/{id}", get(routes::get_movie).delete(routes::delete_movie))
        .with_state(state)
}
