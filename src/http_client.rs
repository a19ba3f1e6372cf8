use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use std::{error::Error as StdError, fmt::Debug};

/// Error returned by an [`HttpClient`].
pub type HttpError = Box<dyn StdError + Send + Sync + 'static>;

/// Minimal HTTP transport used to deliver events.
///
/// Implemented for `reqwest::Client` with one of the `reqwest-client*` features. Timeouts,
/// connection pooling and TLS are the transport's concern.
#[async_trait]
pub trait HttpClient: Debug + Send + Sync {
    /// Send the request and return the response status and body.
    async fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Bytes>, HttpError>;
}

#[cfg(feature = "reqwest")]
mod reqwest {
    use super::{async_trait, Bytes, HttpClient, HttpError, Request, Response};
    use std::convert::TryInto;

    #[async_trait]
    impl HttpClient for reqwest::Client {
        async fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Bytes>, HttpError> {
            let request = request.try_into()?;
            let response = self.execute(request).await?;
            Ok(Response::builder()
                .status(response.status())
                .body(response.bytes().await?)?)
        }
    }
}
