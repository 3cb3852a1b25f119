use std::{num::NonZeroU32, time::Duration};

use anyhow::Context;
use nonzero_ext::nonzero;
use serde::{Deserialize, de::DeserializeOwned};

use crate::query::{Campus, CourseCode};

const DEFAULT_TIMETABLE_API_URL: &str = "https://timetable.unsw.edu.au/year/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REQ_PER_SEC: NonZeroU32 = nonzero!(4u32);

/// The env vars that tune scraping. All of them are optional.
#[derive(Debug, Deserialize)]
pub struct ScrapingEnv {
    #[serde(default = "default_timetable_api_url")]
    timetable_api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
    #[serde(default = "default_requests_per_sec")]
    requests_per_sec: u32,
}

fn default_timetable_api_url() -> String {
    DEFAULT_TIMETABLE_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_requests_per_sec() -> u32 {
    DEFAULT_REQ_PER_SEC.get()
}

#[derive(Debug, Clone)]
pub struct ScrapingConfig {
    // Contains a `/year/` path segment, substituted per request.
    timetable_api_url: String,
    pub request_timeout: Duration,
    pub requests_per_sec: NonZeroU32,
}

impl ScrapingConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        let requests_per_sec = NonZeroU32::new(scraping_env.requests_per_sec)
            .context("REQUESTS_PER_SEC must be greater than zero")?;
        Ok(Self {
            timetable_api_url: with_trailing_slash(scraping_env.timetable_api_url),
            request_timeout: Duration::from_secs(scraping_env.request_timeout_secs),
            requests_per_sec,
        })
    }

    pub fn with_base_url(timetable_api_url: &str) -> Self {
        Self {
            timetable_api_url: with_trailing_slash(timetable_api_url.to_string()),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            requests_per_sec: DEFAULT_REQ_PER_SEC,
        }
    }

    pub fn get_timetable_api_url_for_year(&self, year: i32) -> String {
        self.timetable_api_url.replacen("/year/", &format!("/{year}/"), 1)
    }

    /// Directory of every subject area, grouped by campus anchors.
    pub fn subject_directory_url(&self, year: i32) -> String {
        self.get_timetable_api_url_for_year(year) + "subjectSearch.html"
    }

    /// Class search page listing the courses of one subject at one campus.
    pub fn subject_classes_url(&self, year: i32, subject: &str, campus: Campus) -> String {
        format!(
            "{}{}{}.html",
            self.get_timetable_api_url_for_year(year),
            subject,
            campus.code()
        )
    }

    pub fn course_timetable_url(&self, year: i32, course_code: &CourseCode) -> String {
        format!(
            "{}{}.html",
            self.get_timetable_api_url_for_year(year),
            course_code
        )
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
