use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::TransportError;

/// Decode a JSON body, treating any non-2xx status as a failure.
///
/// The body is read in full before decoding so malformed payloads surface as
/// `TransportError::Decode` rather than as a reqwest error.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::HttpStatus(status));
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
