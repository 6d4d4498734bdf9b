//! Where APOD entries come from.
//!
//! Commands only see [`ApodSource`]; [`http::NasaClient`] is the one real
//! implementation and tests substitute their own.

use crate::error::Result;
use crate::model::RawApod;
use chrono::NaiveDate;

pub mod http;

/// Largest batch the random endpoint is asked for.
pub const MAX_RANDOM_COUNT: u32 = 20;

/// A downloaded media body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub bytes: Vec<u8>,
    /// `Content-Type` without parameters, lowercased.
    pub content_type: Option<String>,
}

pub trait ApodSource {
    fn today(&self) -> Result<RawApod>;

    fn on_date(&self, date: NaiveDate) -> Result<RawApod>;

    /// `count` random entries. Callers validate the range.
    fn random(&self, count: u32) -> Result<Vec<RawApod>>;

    fn download(&self, url: &str) -> Result<Media>;
}
