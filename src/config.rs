use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

const DEV_SESSION_SECRET: &str = "filmshelf-dev-session-secret-change-me-in-production";

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub data_file: PathBuf,
    pub public_base_url: String,
    pub github_client_id: String,
    pub github_client_secret: String,
    pub session_secret: String,
    pub tmdb_image_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let data_file: PathBuf =
            std::env::var("DATA_FILE").unwrap_or_else(|_| "data/movies.json".to_string()).into();

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"));

        let github_client_id = std::env::var("GITHUB_CLIENT_ID").unwrap_or_else(|_| "".to_string());
        let github_client_secret =
            std::env::var("GITHUB_CLIENT_SECRET").unwrap_or_else(|_| "".to_string());

        let session_secret =
            std::env::var("SESSION_SECRET").unwrap_or_else(|_| DEV_SESSION_SECRET.to_string());
        // The cookie signing key is derived from this value.
        if session_secret.len() < 32 {
            anyhow::bail!("SESSION_SECRET must be at least 32 bytes");
        }

        let tmdb_image_base_url = std::env::var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|_| "https://image.tmdb.org/t/p".to_string());

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            data_file,
            public_base_url,
            github_client_id,
            github_client_secret,
            session_secret,
            tmdb_image_base_url,
        })
    }
}
