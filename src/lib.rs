//! A client SDK for [Aptabase], privacy-first analytics for desktop, mobile and web apps.
//!
//! [Aptabase]: https://aptabase.com
//!
//! # Usage
//!
//! Create one client per application with the app key from the Aptabase dashboard and track
//! events from anywhere:
//!
//! ```rust,no_run
//! # #[cfg(feature = "reqwest-client")]
//! # async fn run() {
//! use aptabase::{runtime::Tokio, Client, Properties};
//!
//! let client = Client::builder("A-EU-1234567890")
//!     .with_app_version(env!("CARGO_PKG_VERSION"))
//!     .build(reqwest::Client::new(), Tokio::default());
//!
//! client.track_event("app_started", None);
//! client.track_event(
//!     "file_opened",
//!     Some(Properties::new().insert("extension", "md").insert("size_kb", 12)),
//! );
//! # }
//! ```
//!
//! `track_event` never blocks and never fails. Each call sends one event in a detached task on
//! the client's [`runtime::Runtime`]. Problems are reported through [`tracing`]:
//!
//! | Situation                                  | Level   | Effect                       |
//! | ------------------------------------------ | ------- | ---------------------------- |
//! | App key malformed or region unknown        | `WARN`  | Client disabled for good     |
//! | Self-hosted app key without host           | `WARN`  | Client disabled for good     |
//! | Collector answers with non-success status  | `ERROR` | Event dropped                |
//! | Network or serialization failure           | `ERROR` | Event dropped                |
//! | Event delivered                            | `TRACE` |                              |
//!
//! Without an installed `tracing` subscriber all of these are silent.
//!
//! # Regions
//!
//! The middle part of the app key selects where events are sent:
//!
//! | Region | Endpoint                                   |
//! | ------ | ------------------------------------------ |
//! | `US`   | `https://us.aptabase.com/api/v0/event`     |
//! | `EU`   | `https://eu.aptabase.com/api/v0/event`     |
//! | `DEV`  | `http://localhost:3000/api/v0/event`       |
//! | `SH`   | `{host}/api/v0/event`, host from options   |
//!
//! # Sessions
//!
//! Events are grouped into sessions. A session ends after 60 minutes without any tracked event;
//! the next event starts a new one.
//!
//! # HTTP clients
//!
//! Events are delivered through the [`HttpClient`] trait. Enable one of the following features to
//! use `reqwest::Client`, or implement the trait for your own transport:
//!
//! - `reqwest-client`: native TLS
//! - `reqwest-client-vendored-tls`: vendored native TLS
//! - `reqwest-client-rustls`: rustls
#![doc(html_root_url = "https://docs.rs/aptabase/0.1.0")]
#![deny(missing_docs, unreachable_pub, missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod app_key;
mod client;
mod convert;
mod error;
mod http_client;
mod models;
pub mod runtime;
mod session;
mod system_info;
mod uploader;

pub use app_key::ConfigError;
pub use client::{Client, ClientBuilder, InitOptions};
pub use error::Error;
pub use http_client::{HttpClient, HttpError};
pub use models::{Properties, Value};
pub use system_info::{SystemInfo, SDK_VERSION};
