use aptabase::{runtime::Tokio, Client, Properties};
use std::time::Duration;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let client = Client::builder(
        std::env::var("APTABASE_APP_KEY").unwrap_or_else(|_| "A-DEV-0000000000".into()),
    )
    .with_app_version(env!("CARGO_PKG_VERSION"))
    .build(reqwest::Client::new(), Tokio::default());

    client.track_event("app_started", None);
    client.track_event(
        "file_opened",
        Some(
            Properties::new()
                .insert("extension", "md")
                .insert("size_kb", 12)
                .insert("ratio", 0.25),
        ),
    );

    // events are sent in the background
    tokio::time::sleep(Duration::from_secs(2)).await;
}
