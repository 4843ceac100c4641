use std::path::PathBuf;

use anyhow::Context as _;

/// API service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 8000). Env var: `API_PORT`.
    pub api_port: u16,
    /// Salt of the short-link codec. Env var: `SHORT_LINK_SALT`.
    pub short_link_salt: String,
    /// Origin used for short links, redirects and pagination links, without a
    /// trailing slash (default `http://localhost`).
    pub public_base_url: String,
    /// Directory uploaded images are written to (default `media`).
    pub media_root: PathBuf,
    /// URL prefix images are served from (default `/media/`).
    pub media_url: String,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_port = match lookup("API_PORT") {
            Some(v) => v.parse().with_context(|| format!("invalid API_PORT {v:?}"))?,
            None => 8000,
        };
        let public_base_url = lookup("PUBLIC_BASE_URL")
            .unwrap_or_else(|| "http://localhost".to_owned())
            .trim_end_matches('/')
            .to_owned();

        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL is not set")?,
            api_port,
            short_link_salt: lookup("SHORT_LINK_SALT").context("SHORT_LINK_SALT is not set")?,
            public_base_url,
            media_root: lookup("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("media")),
            media_url: lookup("MEDIA_URL").unwrap_or_else(|| "/media/".to_owned()),
        })
    }
}
