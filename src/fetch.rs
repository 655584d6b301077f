use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use crate::config::TermRange;
use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the JSON payload from the secured data endpoint with the bearer
/// token. The response shape is not contractually fixed, so the body is
/// returned as an untyped value for shape resolution downstream.
pub async fn fetch_records(
    client: &Client,
    data_url: &str,
    token: &str,
    terms: &TermRange,
) -> Result<Value> {
    let body = json!({
        "terms_start": terms.start,
        "terms_end": terms.end,
    });

    let response = client
        .post(data_url)
        .bearer_auth(token)
        .header(ACCEPT, "application/json")
        .json(&body)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await?;

    if response.status() != StatusCode::OK {
        let status = response.status();
        // Headers are collected before the body read consumes the response.
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Fetch {
            status,
            body,
            headers,
        });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_parsed_body_on_200() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/export"))
            .and(header("Authorization", "Bearer T"))
            .and(header("Accept", "application/json"))
            .and(body_json(json!({"terms_start": "21", "terms_end": "36"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "record": [{"a": 1}, {"a": 2, "b": 3}],
            })))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/export", server.uri());
        let payload = fetch_records(&client, &url, "T", &TermRange::default())
            .await
            .unwrap();
        assert_eq!(payload["record"][1]["b"], json!(3));
    }

    #[tokio::test]
    async fn term_range_is_sent_as_strings() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/export"))
            .and(body_json(json!({"terms_start": "1", "terms_end": "4"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let terms = TermRange {
            start: "1".to_string(),
            end: "4".to_string(),
        };
        let client = Client::new();
        let url = format!("{}/export", server.uri());
        fetch_records(&client, &url, "T", &terms).await.unwrap();
    }

    #[tokio::test]
    async fn non_200_carries_status_body_and_headers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/export"))
            .respond_with(
                ResponseTemplate::new(503)
                    .insert_header("Retry-After", "120")
                    .set_body_string("service unavailable"),
            )
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/export", server.uri());
        let err = fetch_records(&client, &url, "T", &TermRange::default())
            .await
            .unwrap_err();
        match err {
            Error::Fetch {
                status,
                body,
                headers,
            } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "service unavailable");
                assert!(headers
                    .iter()
                    .any(|(name, value)| name == "retry-after" && value == "120"));
            }
            other => panic!("expected Fetch error, got {other:?}"),
        }
    }
}
