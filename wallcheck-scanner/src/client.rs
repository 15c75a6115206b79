use crate::cookies::CredentialSet;
use crate::error::{ProbeError, Result};
use crate::result::FetchedPage;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_USER_AGENT: &str =
    "Wallcheck/0.1 (https://github.com/trapdoorsec/wallcheck)";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client bound to a single credential set's cookie jar.
///
/// Cookies set by responses during a run land in the same jar, so a redirect
/// chain sees them just like a browser would.
pub struct ProbeClient {
    client: Client,
}

impl ProbeClient {
    pub fn new(credentials: &CredentialSet, options: &ClientOptions) -> Result<Self> {
        let jar = Arc::new(credentials.to_jar());
        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .connect_timeout(options.timeout / 2)
            .cookie_provider(jar)
            .redirect(reqwest::redirect::Policy::limited(options.max_redirects))
            .build()?;

        Ok(Self { client })
    }

    /// GET a URL, following redirects, and capture where it ended up.
    ///
    /// Transport failures are returned as `reqwest::Error`; each pipeline stage
    /// maps them onto its own error kind.
    pub async fn get(&self, url: &str) -> std::result::Result<FetchedPage, reqwest::Error> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let final_url = response.url().clone();
        let status_code = response.status().as_u16();
        let body = response.text().await?;

        if final_url.as_str() != url {
            debug!("{} resolved to {}", url, final_url);
        }

        Ok(FetchedPage {
            final_path: final_url.path().to_string(),
            final_url: final_url.to_string(),
            status_code,
            body,
        })
    }

    /// Fetch the embed page the descriptor pointed at.
    pub async fn fetch_resource(&self, url: &str) -> Result<FetchedPage> {
        self.get(url)
            .await
            .map_err(|e| ProbeError::ResourceFetch(format!("{}: {}", url, e)))
    }
}
