// src/devpost/mod.rs

//! Devpost site client.
//!
//! Fetches hackathon project galleries page by page and project detail
//! pages, decoding them into [`Project`] records.

mod extract;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::Project;

/// Sentinel marking the page past the last gallery page.
const NO_SUBMISSIONS: &str = "There are no submissions which match your criteria.";

/// Sentinel for galleries the organizers have not published yet.
const GALLERY_UNPUBLISHED: &str =
    "The hackathon managers haven't published this gallery yet, but hang tight!";

/// Raw HTTP fetch capability. Cookies, throttling and timeouts live behind
/// this seam, not in the extraction pipeline.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a URL and return the response body. A non-200 status is an
    /// [`Error::Status`] carrying the status code and raw body.
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Source of project data. Implemented by [`DevpostClient`] and by test
/// doubles in the cache tests.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Fetch every project of an event's gallery, across all listing pages.
    async fn fetch_projects(&self, event_id: &str) -> Result<Vec<Project>>;

    /// Fetch a project's detail page and update it in place.
    async fn fetch_project(&self, project: &mut Project) -> Result<()>;
}

/// reqwest-backed transport with a warmed cookie jar.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the client and warm the cookie jar with one request to the
    /// site root.
    pub async fn new(config: &ClientConfig) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let origin: url::Url = "https://devpost.com".parse()?;
        // The newsletter banner otherwise replaces parts of the markup.
        jar.add_cookie_str(
            "platform.notifications.newsletter.dismissed=dismissed",
            &origin,
        );

        let mut headers = HeaderMap::new();
        let referer = config
            .referer
            .parse::<HeaderValue>()
            .map_err(|_| Error::config("client.referer is not a valid header value"))?;
        headers.insert(REFERER, referer);

        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_provider(jar)
            .build()?;
        let transport = Self { client };
        transport.get("https://devpost.com").await?;
        Ok(transport)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        if status != 200 {
            return Err(Error::status(status, &body));
        }
        Ok(body.to_vec())
    }
}

/// Client for the Devpost project galleries.
pub struct DevpostClient {
    transport: Box<dyn Transport>,
}

impl DevpostClient {
    /// Create a client backed by a live [`HttpTransport`].
    pub async fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(Box::new(
            HttpTransport::new(config).await?,
        )))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    fn listing_url(event_id: &str, page: u32) -> String {
        format!(
            "https://{event_id}.devpost.com/submissions/search?page={page}&sort=alpha&terms=&utf8=%E2%9C%93"
        )
    }
}

#[async_trait]
impl ProjectSource for DevpostClient {
    async fn fetch_projects(&self, event_id: &str) -> Result<Vec<Project>> {
        let start = Instant::now();
        let mut projects = Vec::new();
        for page in 1u32.. {
            let body = self.transport.get(&Self::listing_url(event_id, page)).await?;
            let html = String::from_utf8_lossy(&body);
            if html.contains(NO_SUBMISSIONS) || html.contains(GALLERY_UNPUBLISHED) {
                break;
            }
            let page_projects = extract::parse_gallery(&html);
            if page_projects.is_empty() {
                break;
            }
            projects.extend(page_projects);
        }
        log::info!(
            "fetched {} projects for {} in {:?}",
            projects.len(),
            event_id,
            start.elapsed()
        );
        Ok(projects)
    }

    async fn fetch_project(&self, project: &mut Project) -> Result<()> {
        let start = Instant::now();
        let body = self.transport.get(&project.url).await?;
        extract::apply_detail(project, &String::from_utf8_lossy(&body));
        project.last_refresh = Some(Utc::now());
        log::info!(
            "fetched detail for {} in {:?}",
            project.short_name,
            start.elapsed()
        );
        Ok(())
    }
}
