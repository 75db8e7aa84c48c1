use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::{AppState, templates};

pub const SESSION_COOKIE: &str = "filmshelf_session";

/// Identity carried by the signed session cookie. `user_id` is the GitHub
/// account id for OAuth sign-ins and the username for the credentials flow.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub issued_at: jiff::Timestamp,
}

impl Session {
    pub fn new(user_id: String, username: String) -> Self {
        Self { user_id, username, issued_at: jiff::Timestamp::now() }
    }
}

pub fn current_user(jar: &SignedCookieJar) -> Option<Session> {
    let cookie = jar.get(SESSION_COOKIE)?;
    serde_json::from_str(cookie.value()).ok()
}

fn session_cookie(session: &Session) -> AppResult<Cookie<'static>> {
    let mut cookie = Cookie::new(SESSION_COOKIE, serde_json::to_string(session)?);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::days(7));
    Ok(cookie)
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, Default)]
pub struct RegisterErrors {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// Server-side mirror of the signup form's field rules. Validation also runs
/// in the browser via the input attributes; this is the authoritative check.
pub fn validate_registration(form: &RegisterForm) -> RegisterErrors {
    let mut errors = RegisterErrors::default();

    if form.username.trim().is_empty() {
        errors.username = Some("Username is required".to_string());
    } else if form.username.chars().count() < 3 {
        errors.username = Some("Username must be at least 3 characters".to_string());
    }

    if form.email.trim().is_empty() {
        errors.email = Some("Email is required".to_string());
    } else if !email_is_valid(&form.email) {
        errors.email = Some("Please enter a valid email".to_string());
    }

    if form.password.is_empty() {
        errors.password = Some("Password is required".to_string());
    } else if form.password.chars().count() < 6 {
        errors.password = Some("Password must be at least 6 characters".to_string());
    }

    errors
}

/// `local@domain.tld` with no whitespace and exactly one `@`; the domain must
/// contain a dot with something on both sides.
fn email_is_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub async fn register_page(jar: SignedCookieJar) -> Response {
    if current_user(&jar).is_some() {
        return Redirect::to("/catalogue").into_response();
    }
    Html(templates::register_page(&RegisterForm::default(), &RegisterErrors::default()))
        .into_response()
}

/// Credentials sign-up: validates the fields, issues a session, and lands on
/// the catalogue. There is no user database behind it.
pub async fn register(jar: SignedCookieJar, Form(form): Form<RegisterForm>) -> Response {
    let errors = validate_registration(&form);
    if !errors.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(templates::register_page(&form, &errors)),
        )
            .into_response();
    }

    let session = Session::new(form.username.clone(), form.username);
    match session_cookie(&session) {
        Ok(cookie) => (jar.add(cookie), Redirect::to("/catalogue")).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn github_login(State(state): State<AppState>) -> Redirect {
    if !state.github.is_configured() {
        return Redirect::to("/auth/github/callback?code=mock");
    }
    let redirect_uri = format!("{}/auth/github/callback", state.config.public_base_url);
    Redirect::to(&state.github.authorize_url(&redirect_uri))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    error: Option<String>,
}

pub async fn github_callback(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(q): Query<CallbackQuery>,
) -> Response {
    let result = async {
        if let Some(error) = q.error {
            return Err(AppError::validation(format!("GitHub sign-in failed: {error}")));
        }
        let code =
            q.code.ok_or_else(|| AppError::validation("missing authorization code"))?;
        let token = state.github.exchange_code(&code).await?;
        let user = state.github.fetch_user(&token).await?;
        Ok(Session::new(user.id.to_string(), user.login))
    }
    .await;

    let session = match result {
        Ok(session) => session,
        Err(err) => return Html(templates::error_page(err.to_string())).into_response(),
    };

    match session_cookie(&session) {
        Ok(cookie) => (jar.add(cookie), Redirect::to("/catalogue")).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn logout(jar: SignedCookieJar) -> Response {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), Redirect::to("/")).into_response()
}
