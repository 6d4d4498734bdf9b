use super::{ApodSource, Media};
use crate::error::{ApodError, Result};
use crate::model::RawApod;
use chrono::NaiveDate;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the NASA APOD endpoint. No retries.
pub struct NasaClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NasaClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApodError::Http)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn get_json(&self, params: &[(&str, String)]) -> Result<Value> {
        // The key is added separately so it never reaches the logs.
        debug!(url = %self.base_url, ?params, "requesting APOD");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .map_err(ApodError::Http)?;

        let response = check_status(response)?;
        response.json::<Value>().map_err(ApodError::Http)
    }
}

/// Maps the statuses the API is known to return onto user-facing errors.
pub fn status_error(status: u16) -> Option<ApodError> {
    match status {
        200..=299 => None,
        403 | 404 => Some(ApodError::Unauthorized(status)),
        500 | 503 | 504 => Some(ApodError::Unavailable(status)),
        other => Some(ApodError::UnexpectedStatus(other)),
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status().as_u16();
    match status_error(status) {
        None => Ok(response),
        Some(err) => {
            warn!(status, url = %response.url().path(), "APOD request failed");
            Err(err)
        }
    }
}

/// The endpoint answers with a bare object for single dates and an array for
/// `count` queries.
pub fn decode_payload(value: Value) -> Result<Vec<RawApod>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(ApodError::Serialization))
            .collect(),
        other => Ok(vec![
            serde_json::from_value(other).map_err(ApodError::Serialization)?
        ]),
    }
}

fn single(value: Value) -> Result<RawApod> {
    decode_payload(value)?
        .into_iter()
        .next()
        .ok_or_else(|| ApodError::Store("The APOD API returned no entries".to_string()))
}

impl ApodSource for NasaClient {
    fn today(&self) -> Result<RawApod> {
        single(self.get_json(&[])?)
    }

    fn on_date(&self, date: NaiveDate) -> Result<RawApod> {
        single(self.get_json(&[("date", date.format("%Y-%m-%d").to_string())])?)
    }

    fn random(&self, count: u32) -> Result<Vec<RawApod>> {
        decode_payload(self.get_json(&[("count", count.to_string())])?)
    }

    fn download(&self, url: &str) -> Result<Media> {
        debug!(url, "downloading media");
        let response = self.client.get(url).send().map_err(ApodError::Http)?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            warn!(status, url, "media download failed");
            return Err(ApodError::UnexpectedStatus(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty());
        let bytes = response.bytes().map_err(ApodError::Http)?.to_vec();

        Ok(Media {
            bytes,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        assert!(status_error(200).is_none());
        assert!(matches!(status_error(403), Some(ApodError::Unauthorized(403))));
        assert!(matches!(status_error(404), Some(ApodError::Unauthorized(404))));
        assert!(matches!(status_error(503), Some(ApodError::Unavailable(503))));
        assert!(matches!(status_error(504), Some(ApodError::Unavailable(504))));
        assert!(matches!(
            status_error(429),
            Some(ApodError::UnexpectedStatus(429))
        ));
    }

    #[test]
    fn test_unauthorized_message() {
        let msg = status_error(403).unwrap().to_string();
        assert!(msg.starts_with("Request error: Verify your API key and try again."));
    }

    #[test]
    fn test_decode_single_object() {
        let payload = json!({
            "date": "2013-10-01",
            "title": "Earth at Night",
            "url": "https://apod.nasa.gov/apod/image/1310/a.jpg",
            "explanation": "One. Two. Three.",
            "service_version": "v1"
        });
        let items = decode_payload(payload).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].date, "2013-10-01");
        assert_eq!(items[0].hdurl, None);
    }

    #[test]
    fn test_decode_array() {
        let payload = json!([
            {"date": "2001-01-01", "title": "a", "url": "u", "explanation": "e"},
            {"date": "2002-02-02", "title": "b", "url": "u", "explanation": "e", "hdurl": "h"}
        ]);
        let items = decode_payload(payload).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].hdurl.as_deref(), Some("h"));
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        assert!(decode_payload(json!({"date": "2001-01-01"})).is_err());
    }
}
