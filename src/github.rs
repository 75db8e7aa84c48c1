use serde::Deserialize;

use crate::error::{AppError, AppResult};

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const API_BASE: &str = "https://api.github.com";

pub struct GitHubClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GitHubUser {
    pub id: i64,
    pub login: String,
}

impl GitHubClient {
    pub fn new(client: reqwest::Client, client_id: String, client_secret: String) -> Self {
        // Warn once on app load if using mock data
        if client_id.trim().is_empty() {
            tracing::warn!("Using mock GitHub sign-in - no GITHUB_CLIENT_ID provided");
        }
        Self { client, client_id, client_secret }
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty()
    }

    pub fn authorize_url(&self, redirect_uri: &str) -> String {
        format!(
            "{AUTHORIZE_URL}?client_id={}&redirect_uri={}&scope=read:user",
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
        )
    }

    pub async fn exchange_code(&self, code: &str) -> AppResult<String> {
        // Use mock data if no OAuth app is configured
        if !self.is_configured() {
            return Ok("mock-access-token".to_string());
        }

        let resp: AccessTokenResponse = self
            .client
            .post(TOKEN_URL)
            .header("Accept", "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match resp.access_token {
            Some(token) => Ok(token),
            None => Err(AppError::validation("GitHub rejected the authorization code")),
        }
    }

    pub async fn fetch_user(&self, access_token: &str) -> AppResult<GitHubUser> {
        // Use mock data if no OAuth app is configured
        if !self.is_configured() {
            return Ok(GitHubUser { id: 583231, login: "octocat".to_string() });
        }

        let user: GitHubUser = self
            .client
            .get(format!("{API_BASE}/user"))
            .bearer_auth(access_token)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(user)
    }
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_client() -> GitHubClient {
        GitHubClient::new(reqwest::Client::new(), String::new(), String::new())
    }

    #[test]
    fn authorize_url_encodes_redirect() {
        let gh = GitHubClient::new(
            reqwest::Client::new(),
            "abc".to_string(),
            "secret".to_string(),
        );
        let url = gh.authorize_url("http://localhost:3000/auth/github/callback");
        assert!(url.starts_with("https://github.com/login/oauth/authorize?client_id=abc"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fgithub%2Fcallback"));
    }

    #[tokio::test]
    async fn unconfigured_client_returns_mock_user() {
        let gh = mock_client();
        assert!(!gh.is_configured());

        let token = gh.exchange_code("whatever").await.unwrap();
        let user = gh.fetch_user(&token).await.unwrap();
        assert_eq!(user.login, "octocat");
    }
}
