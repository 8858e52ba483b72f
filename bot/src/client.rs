use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::{Client, Response};
use reqwest::header::{
    ACCEPT, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT,
};
use reqwest::{StatusCode, Url};
use serde::Serialize;
use zapador_core::{Coord2, GameApi, TransportError};
use zapador_protocol::{ActionRequest, BoardUpdate};

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/143.0.0.0 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Extra attempts for calls that die before reaching the server.
const NETWORK_RETRIES: u32 = 1;

/// Game server client that presents itself as the browser session the
/// tokens were captured from.
pub struct HttpGameApi {
    client: Client,
    base_url: Url,
}

impl HttpGameApi {
    pub fn new(base_url: &str, auth_token: &str, csrf_token: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).context("invalid base url")?;
        let headers = session_headers(&base_url, auth_token, csrf_token)?;
        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("could not build the http client")?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<BoardUpdate, TransportError> {
        let url = self.endpoint(path);
        let response = self.send_with_retry(&url, body)?;
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            return Err(TransportError::Status { status: status.as_u16(), body });
        }
        response.json().map_err(|err| TransportError::Malformed(err.to_string()))
    }

    fn send_with_retry<B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response, TransportError> {
        let mut failures = 0;
        loop {
            match self.client.post(url).json(body).send() {
                Ok(response) => return Ok(response),
                Err(err) => {
                    failures += 1;
                    if failures > NETWORK_RETRIES || !(err.is_timeout() || err.is_connect()) {
                        return Err(TransportError::Network(err.to_string()));
                    }
                    log::debug!("retrying {url} after a network error: {err}");
                }
            }
        }
    }
}

impl GameApi for HttpGameApi {
    fn new_game(&mut self) -> Result<BoardUpdate, TransportError> {
        self.post("new-game", &serde_json::json!({}))
    }

    fn reveal(&mut self, game_id: &str, coords: Coord2) -> Result<BoardUpdate, TransportError> {
        self.post(&format!("{game_id}/reveal"), &ActionRequest::from(coords))
    }

    fn flag(&mut self, game_id: &str, coords: Coord2) -> Result<BoardUpdate, TransportError> {
        self.post(&format!("{game_id}/flag"), &ActionRequest::from(coords))
    }
}

fn session_headers(
    base_url: &Url,
    auth_token: &str,
    csrf_token: &str,
) -> anyhow::Result<HeaderMap> {
    let origin = base_url.origin().ascii_serialization();
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ORIGIN, origin.parse().context("origin header")?);
    headers.insert(
        REFERER,
        format!("{origin}/game/minesweeper/").parse().context("referer header")?,
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert("x-csrf-token", csrf_token.parse().context("csrf token header")?);
    headers.insert(
        COOKIE,
        format!("auth_token={auth_token}; csrf_token={csrf_token}")
            .parse()
            .context("session cookie")?,
    );
    Ok(headers)
}
