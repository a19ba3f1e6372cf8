use crate::{
    app_key,
    models::{Event, Properties, SystemProperties},
    runtime::Runtime,
    session::SessionTracker,
    uploader, Error, HttpClient, SystemInfo,
};
use chrono::Utc;
use std::{sync::Arc, time::Instant};
use tracing::{error, instrument::WithSubscriber as _, trace, warn, Instrument as _};

/// Options for [`Client::new`].
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Base URL of a self-hosted collector, e.g. `https://aptabase.example.com`. Required for
    /// app keys of the `SH` region and ignored for all others.
    pub host: Option<String>,
    /// Version of the host application.
    pub app_version: Option<String>,
    /// Build number of the host application.
    pub app_build_number: Option<String>,
    /// Override the debug flag. Defaults to whether this crate was built with debug assertions.
    pub is_debug: Option<bool>,
}

/// Aptabase client.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone, Debug)]
pub struct Client {
    app_key: Arc<str>,
    dispatcher: Option<Arc<Dispatcher>>,
}

#[derive(Debug)]
struct Dispatcher {
    http_client: Arc<dyn HttpClient>,
    runtime: Arc<dyn Runtime>,
    endpoint: http::Uri,
    app_key: Arc<str>,
    session: SessionTracker,
    system_props: SystemProperties,
}

impl Client {
    /// Create a new client.
    ///
    /// An app key that cannot be resolved to a collector endpoint is logged as a warning and
    /// turns the client into a no-op.
    pub fn new<C, R>(
        app_key: impl Into<String>,
        options: InitOptions,
        http_client: C,
        runtime: R,
    ) -> Self
    where
        C: HttpClient + 'static,
        R: Runtime,
    {
        Client::builder(app_key)
            .with_options(options)
            .build(http_client, runtime)
    }

    /// Create a client builder.
    ///
    /// ```no_run
    /// # #[cfg(feature = "reqwest-client")]
    /// # {
    /// let client = aptabase::Client::builder("A-EU-1234567890")
    ///     .with_app_version(env!("CARGO_PKG_VERSION"))
    ///     .build(reqwest::Client::new(), aptabase::runtime::Tokio::default());
    /// # }
    /// ```
    pub fn builder(app_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            app_key: app_key.into(),
            options: InitOptions::default(),
            system_info: None,
        }
    }

    /// The app key this client was created with.
    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    /// Returns false if the app key could not be resolved and tracking is a no-op.
    pub fn is_enabled(&self) -> bool {
        self.dispatcher.is_some()
    }

    /// Track an event with optional custom properties.
    ///
    /// Returns immediately. The event is sent in the background on the client's runtime;
    /// failures are logged and never reach the caller.
    pub fn track_event(&self, name: impl Into<String>, props: Option<Properties>) {
        let dispatcher = match &self.dispatcher {
            Some(dispatcher) => Arc::clone(dispatcher),
            None => return,
        };
        let event_name = name.into();
        let runtime = Arc::clone(&dispatcher.runtime);
        runtime.spawn(Box::pin(
            async move { dispatcher.dispatch(event_name, props).await }
                .in_current_span()
                .with_current_subscriber(),
        ));
    }
}

impl Dispatcher {
    async fn dispatch(&self, event_name: String, props: Option<Properties>) {
        let session_id = self.session.touch(Instant::now());
        let event = Event {
            timestamp: Utc::now(),
            session_id,
            event_name,
            system_props: self.system_props.clone(),
            props,
        };

        match uploader::send(
            self.http_client.as_ref(),
            &self.endpoint,
            &self.app_key,
            &event,
        )
        .await
        {
            Ok(()) => trace!(event_name = %event.event_name, "event sent"),
            Err(Error::Rejected { status, body }) => error!(
                event_name = %event.event_name,
                status,
                body = %body,
                "event rejected by collector"
            ),
            Err(err) => error!(
                event_name = %event.event_name,
                error = %err,
                "failed to send event"
            ),
        }
    }
}

/// Builder for [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    app_key: String,
    options: InitOptions,
    system_info: Option<SystemInfo>,
}

impl ClientBuilder {
    /// Replace all options.
    pub fn with_options(mut self, options: InitOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the base URL of a self-hosted collector.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.options.host = Some(host.into());
        self
    }

    /// Set the version of the host application.
    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        self.options.app_version = Some(app_version.into());
        self
    }

    /// Set the build number of the host application.
    pub fn with_app_build_number(mut self, app_build_number: impl Into<String>) -> Self {
        self.options.app_build_number = Some(app_build_number.into());
        self
    }

    /// Override the debug flag.
    pub fn with_debug(mut self, is_debug: bool) -> Self {
        self.options.is_debug = Some(is_debug);
        self
    }

    /// Report the given environment instead of detecting it.
    ///
    /// Application version, build number and debug flag set on the builder still take precedence.
    pub fn with_system_info(mut self, system_info: SystemInfo) -> Self {
        self.system_info = Some(system_info);
        self
    }

    /// Build the client. Resolves the app key exactly once.
    pub fn build<C, R>(self, http_client: C, runtime: R) -> Client
    where
        C: HttpClient + 'static,
        R: Runtime,
    {
        let app_key: Arc<str> = self.app_key.into();
        let endpoint = match app_key::resolve(&app_key, self.options.host.as_deref()) {
            Ok(endpoint) => endpoint,
            Err(err) => {
                warn!(error = %err, "tracking is disabled");
                return Client {
                    app_key,
                    dispatcher: None,
                };
            }
        };

        let mut system_info = self.system_info.unwrap_or_else(SystemInfo::detect);
        if let Some(app_version) = self.options.app_version {
            system_info.app_version = app_version;
        }
        if let Some(app_build_number) = self.options.app_build_number {
            system_info.app_build_number = app_build_number;
        }
        if let Some(is_debug) = self.options.is_debug {
            system_info.is_debug = is_debug;
        }

        Client {
            app_key: Arc::clone(&app_key),
            dispatcher: Some(Arc::new(Dispatcher {
                http_client: Arc::new(http_client),
                runtime: Arc::new(runtime),
                endpoint,
                app_key,
                session: SessionTracker::new(),
                system_props: SystemProperties::from(&system_info),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::BoxFuture;
    use async_trait::async_trait;
    use bytes::Bytes;
    use http::{Request, Response};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };
    use test_case::test_case;

    #[derive(Debug, Default)]
    struct CountingRuntime {
        spawned: Arc<AtomicUsize>,
    }

    impl Runtime for CountingRuntime {
        fn spawn(&self, _future: BoxFuture) {
            self.spawned.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Debug, Default)]
    struct NoopClient;

    #[async_trait]
    impl HttpClient for NoopClient {
        async fn send(
            &self,
            _request: Request<Vec<u8>>,
        ) -> Result<Response<Bytes>, crate::HttpError> {
            Ok(Response::new(Bytes::new()))
        }
    }

    fn fake_system_info() -> SystemInfo {
        SystemInfo {
            is_debug: false,
            os_name: "TestOS".into(),
            os_version: "1.0".into(),
            locale: "en-US".into(),
            app_version: String::new(),
            app_build_number: String::new(),
            sdk_version: "aptabase@test".into(),
        }
    }

    #[test_case("invalid", None ; "malformed key")]
    #[test_case("A-XX-1", None ; "unknown region")]
    #[test_case("A-SH-1", None ; "self-hosted without host")]
    #[test_case("A-SH-1", Some("") ; "self-hosted with empty host")]
    fn disabled_client_never_spawns(app_key: &'static str, host: Option<&'static str>) {
        let spawned = Arc::new(AtomicUsize::new(0));
        let runtime = CountingRuntime {
            spawned: Arc::clone(&spawned),
        };
        let client = Client::new(
            app_key,
            InitOptions {
                host: host.map(String::from),
                ..InitOptions::default()
            },
            NoopClient,
            runtime,
        );
        assert!(!client.is_enabled());
        for i in 0..10 {
            client.track_event("event", None);
            client.track_event("event", Some(Properties::new().insert("i", i)));
        }
        assert_eq!(0, spawned.load(Ordering::SeqCst));
    }

    #[test]
    fn every_call_spawns_its_own_task() {
        let spawned = Arc::new(AtomicUsize::new(0));
        let client = Client::builder("A-US-1")
            .with_system_info(fake_system_info())
            .build(
                NoopClient,
                CountingRuntime {
                    spawned: Arc::clone(&spawned),
                },
            );
        assert!(client.is_enabled());
        for _ in 0..25 {
            client.track_event("tick", None);
        }
        assert_eq!(25, spawned.load(Ordering::SeqCst));
    }

    #[test]
    fn builder_options_override_system_info() {
        let client = Client::builder("A-EU-1")
            .with_system_info(fake_system_info())
            .with_app_version("2.3.4")
            .with_app_build_number("99")
            .with_debug(true)
            .build(NoopClient, CountingRuntime::default());
        let dispatcher = client.dispatcher.as_ref().unwrap();
        assert_eq!("2.3.4", dispatcher.system_props.app_version);
        assert_eq!("99", dispatcher.system_props.app_build_number);
        assert!(dispatcher.system_props.is_debug);
        assert_eq!("TestOS", dispatcher.system_props.os_name);
        assert_eq!(
            "https://eu.aptabase.com/api/v0/event",
            dispatcher.endpoint.to_string()
        );
    }

    #[test]
    fn app_key_is_kept_when_disabled() {
        let client = Client::new(
            "broken",
            InitOptions::default(),
            NoopClient,
            CountingRuntime::default(),
        );
        assert_eq!("broken", client.app_key());
    }

    #[derive(Default)]
    struct InlineRuntime {
        futures: Mutex<Vec<BoxFuture>>,
    }

    impl std::fmt::Debug for InlineRuntime {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("InlineRuntime").finish_non_exhaustive()
        }
    }

    impl Runtime for InlineRuntime {
        fn spawn(&self, future: BoxFuture) {
            self.futures.lock().unwrap().push(future);
        }
    }

    #[tokio::test]
    async fn clones_share_session() {
        #[derive(Debug, Default)]
        struct SessionRecorder(Mutex<Vec<String>>);

        #[async_trait]
        impl HttpClient for Arc<SessionRecorder> {
            async fn send(
                &self,
                request: Request<Vec<u8>>,
            ) -> Result<Response<Bytes>, crate::HttpError> {
                let event: Event = serde_json::from_slice(request.body())?;
                self.0.lock().unwrap().push(event.session_id);
                Ok(Response::new(Bytes::new()))
            }
        }

        let recorder = Arc::new(SessionRecorder::default());
        let runtime = Arc::new(InlineRuntime::default());
        let client = Client::builder("A-US-1")
            .with_system_info(fake_system_info())
            .build(Arc::clone(&recorder), Arc::clone(&runtime));
        let clone = client.clone();
        client.track_event("first", None);
        clone.track_event("second", None);

        let futures = std::mem::take(&mut *runtime.futures.lock().unwrap());
        for future in futures {
            future.await;
        }
        let sessions = recorder.0.lock().unwrap();
        assert_eq!(2, sessions.len());
        assert_eq!(sessions[0], sessions[1]);
    }
}
