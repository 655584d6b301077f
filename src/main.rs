use dotenvy::dotenv;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod error;
mod fetch;
mod normalize;
mod sink;

use config::Settings;
use error::{Error, Result};
use normalize::Table;
use sink::{TabularSink, XlsxSink};

/// How a completed run ended. Spreadsheet-write failures are recovered, so
/// they are an outcome rather than an error.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Written(usize),
    NoRecords,
    WriteFailed,
}

/// Sequential driver: authenticate, fetch, resolve the record list, write.
/// Each stage gates the next; the first fatal error aborts the run.
async fn run(settings: &Settings) -> Result<Outcome> {
    let client = reqwest::Client::new();

    tracing::info!("1. Authenticating...");
    let token = auth::acquire_token(
        &client,
        &settings.client_id,
        &settings.client_secret,
        &settings.auth_url,
    )
    .await?;
    tracing::info!("   Token received.");

    tracing::info!("2. Fetching data...");
    let payload = fetch::fetch_records(&client, &settings.data_url, &token, &settings.terms).await?;
    tracing::info!("   Data received.");

    // The curriculum API nests its list under a fixed "record" key; any
    // other envelope goes through generic shape resolution.
    let records = match payload.get("record").and_then(Value::as_array) {
        Some(list) => list.clone(),
        None => normalize::resolve_records(&payload),
    };

    if records.is_empty() {
        tracing::info!("No records found to save.");
        return Ok(Outcome::NoRecords);
    }

    tracing::info!("3. Saving to {}...", settings.output.display());
    let table = Table::from_records(&records);
    match XlsxSink::new(&settings.output).write(&table) {
        Ok(rows) => {
            tracing::info!("Success! {} rows saved to {}", rows, settings.output.display());
            Ok(Outcome::Written(rows))
        }
        Err(err) => {
            tracing::warn!(error = %err, "could not write spreadsheet, continuing");
            Ok(Outcome::WriteFailed)
        }
    }
}

fn report_failure(err: &Error) {
    eprintln!("Error: {err}");
    if let Error::Fetch { headers, .. } = err {
        for (name, value) in headers {
            eprintln!("{name}: {value}");
        }
    }
}

#[tokio::main]
async fn main() {
    // Settings may come from a .env file or the real environment.
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {err}. Please check your .env file.");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&settings).await {
        report_failure(&err);
        std::process::exit(1);
    }
}
