//! Google Books volumes lookup
//!
//! The HTTP client is supplied by the caller as a `Transport`; this module
//! builds the query and turns the JSON response into partial records
//! (ISBN, author, title, publisher).

use serde::Deserialize;

use super::errors::{BoxError, LookupError, LookupResult};
use super::IsbnLookup;
use crate::record::{Isbn, Record};

/// Public volumes endpoint
pub const VOLUMES_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Fetches a URL and returns the response body.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String, BoxError>;
}

impl<F> Transport for F
where
    F: Fn(&str) -> Result<String, BoxError>,
{
    fn get(&self, url: &str) -> Result<String, BoxError> {
        self(url)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    total_items: u64,
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    #[serde(default)]
    authors: Vec<String>,
    title: Option<String>,
    publisher: Option<String>,
}

/// Lookup client for the Google Books API
pub struct GoogleBooks<T> {
    transport: T,
    base_url: String,
    api_key: Option<String>,
}

impl<T: Transport> GoogleBooks<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: VOLUMES_URL.to_string(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the endpoint, e.g. for a local mirror.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn query_url(&self, isbn: &Isbn) -> String {
        let mut url = format!("{}?q=isbn:{}", self.base_url, isbn.compact());
        if let Some(key) = &self.api_key {
            url.push_str("&key=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }
}

impl<T: Transport> IsbnLookup for GoogleBooks<T> {
    fn lookup(&self, isbn: &Isbn) -> LookupResult<Vec<Record>> {
        let body = self.transport.get(&self.query_url(isbn)).map_err(|e| {
            LookupError::new(format!(
                "Could not connect to Google to fetch ISBN information: {}",
                e
            ))
            .with_source(e)
        })?;
        parse_volumes(isbn, &body)
    }
}

/// Parses a volumes response into one partial record per item.
pub fn parse_volumes(isbn: &Isbn, payload: &str) -> LookupResult<Vec<Record>> {
    let value: serde_json::Value = serde_json::from_str(payload).map_err(|e| {
        LookupError::new("Google returned an invalid response")
            .with_payload(payload)
            .with_source(e)
    })?;
    let response: VolumesResponse = serde_json::from_value(value).map_err(|e| {
        LookupError::new(format!("Failed to parse result for ISBN {}", isbn))
            .with_payload(payload)
            .with_source(e)
    })?;

    if response.total_items == 0 {
        return Ok(Vec::new());
    }

    Ok(response
        .items
        .into_iter()
        .map(|item| {
            let info = item.volume_info;
            let authors: Vec<String> = info.authors.iter().map(|a| invert_name(a)).collect();
            Record::default()
                .with_isbn(isbn.clone())
                .with_author(authors.join(" and "))
                .with_title(info.title.unwrap_or_default())
                .with_publisher(info.publisher.unwrap_or_default())
        })
        .collect())
}

/// "Given Names Surname" becomes "Surname, Given Names". Single-word names
/// are kept as they are.
pub fn invert_name(name: &str) -> String {
    match name.trim().rsplit_once(' ') {
        Some((given, surname)) => format!("{}, {}", surname, given.trim_end()),
        None => name.trim().to_string(),
    }
}
