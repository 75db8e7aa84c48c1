use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;

use crate::auth::current_user;
use crate::error::{AppError, AppResult};
use crate::models::{CreateMovie, Movie, MovieForm};
use crate::{AppState, templates};

/// Route ids arrive as raw path segments; anything non-numeric is treated as
/// an id that matches no movie rather than a bad request.
fn parse_movie_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|_| AppError::NotFound)
}

// JSON API

pub async fn list_movies(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    Ok(Json(state.store.list().await?))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Movie>> {
    let id = parse_movie_id(&id)?;
    match state.store.get(id).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(AppError::NotFound),
    }
}

pub async fn create_movie(
    State(state): State<AppState>,
    payload: Result<Json<CreateMovie>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let Json(input) = payload.map_err(|err| AppError::validation(err.body_text()))?;
    let movie = state.store.create(input.validate()?).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Movie>>> {
    let id = parse_movie_id(&id)?;
    Ok(Json(state.store.delete(id).await?))
}

// Server-rendered catalogue

pub async fn catalogue_page(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let user = current_user(&jar);
    match state.store.list().await {
        Ok(movies) => Html(templates::catalogue_page(
            &movies,
            user.as_ref(),
            &state.config.tmdb_image_base_url,
        ))
        .into_response(),
        Err(err) => Html(templates::error_page(err.to_string())).into_response(),
    }
}

pub async fn movie_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let result = async {
        let id = parse_movie_id(&id)?;
        state.store.get(id).await?.ok_or(AppError::NotFound)
    }
    .await;

    match result {
        Ok(movie) => {
            Html(templates::movie_page(&movie, &state.config.tmdb_image_base_url)).into_response()
        }
        Err(AppError::NotFound) => (
            StatusCode::NOT_FOUND,
            Html(templates::error_page("Movie not found".to_string())),
        )
            .into_response(),
        Err(err) => Html(templates::error_page(err.to_string())).into_response(),
    }
}

pub async fn movie_form_page() -> Html<String> {
    Html(templates::movie_form_page(&MovieForm::default(), None))
}

pub async fn create_from_form(
    State(state): State<AppState>,
    Form(form): Form<MovieForm>,
) -> Response {
    let result = async {
        let new = form.clone().into_create().validate()?;
        state.store.create(new).await
    }
    .await;

    match result {
        Ok(_) => Redirect::to("/catalogue").into_response(),
        Err(AppError::Validation(msg)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(templates::movie_form_page(&form, Some(&msg))),
        )
            .into_response(),
        Err(err) => Html(templates::error_page(err.to_string())).into_response(),
    }
}

pub async fn delete_from_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let result = async { state.store.delete(parse_movie_id(&id)?).await }.await;
    match result {
        Ok(_) => Redirect::to("/catalogue").into_response(),
        Err(AppError::NotFound) => (
            StatusCode::NOT_FOUND,
            Html(templates::error_page("Movie not found".to_string())),
        )
            .into_response(),
        Err(err) => Html(templates::error_page(err.to_string())).into_response(),
    }
}
