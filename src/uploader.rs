use crate::{models::Event, Error, HttpClient};
use bytes::Bytes;
use http::{HeaderName, Request, Response, Uri};

// Allow interior mutability. See https://github.com/hyperium/http/issues/599
#[allow(clippy::declare_interior_mutable_const)]
const APP_KEY: HeaderName = HeaderName::from_static("app-key");

/// Sends one event to the collector.
pub(crate) async fn send(
    client: &dyn HttpClient,
    endpoint: &Uri,
    app_key: &str,
    event: &Event,
) -> Result<(), Error> {
    let payload = serde_json::to_vec(event).map_err(Error::SerializeEvent)?;

    let request = Request::post(endpoint)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(APP_KEY, app_key)
        .body(payload)
        .map_err(|err| Error::Connection(err.into()))?;

    let response = client.send(request).await.map_err(Error::Connection)?;
    handle_response(response)
}

fn handle_response(response: Response<Bytes>) -> Result<(), Error> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::Rejected {
            status: status.as_u16(),
            body: String::from_utf8_lossy(response.body()).into_owned(),
        })
    }
}
