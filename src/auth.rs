use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Token endpoint response. Providers differ in what else they return
/// (expiry, scope, token type); only the access token is of interest and
/// its presence is not validated.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
}

/// Authenticates with the client-credentials grant and returns the bearer
/// token. One POST, Basic Auth from the id/secret pair, no retry.
///
/// Many OAuth providers (Auth0, Okta) accept Basic Auth for the client
/// id/secret; providers that want them in the form body are not supported.
pub async fn acquire_token(
    client: &Client,
    client_id: &str,
    client_secret: &str,
    auth_url: &str,
) -> Result<String> {
    let response = client
        .post(auth_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Auth { status, body });
    }

    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}
