use crate::classify::{classify, summarize_payload};
use crate::client::ProbeClient;
use crate::descriptor::{self, OEMBED_ENDPOINT};
use crate::error::Result;
use crate::markup;
use crate::result::ProbeOutcome;
use tracing::{debug, info};

/// The post every probe asks about. Any post on a GDPR-affected blog will do.
pub const DEFAULT_TARGET_URL: &str = "http://crownwithoutaqueen.tumblr.com/post/141513923043/ein-bleistift-und-radiergummi-oskar-fischinger";

/// Runs descriptor resolution, embed page fetch, bootstrap extraction and
/// classification against one client.
#[derive(Debug, Clone)]
pub struct Prober {
    target_url: String,
    endpoint: String,
}

impl Prober {
    pub fn new() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            endpoint: OEMBED_ENDPOINT.to_string(),
        }
    }

    pub fn with_target_url(mut self, target_url: String) -> Self {
        self.target_url = target_url;
        self
    }

    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub async fn probe(&self, client: &ProbeClient) -> Result<ProbeOutcome> {
        info!("Resolving {} via {}", self.target_url, self.endpoint);
        let descriptor = descriptor::resolve(client, &self.endpoint, &self.target_url).await?;

        let page = client.fetch_resource(&descriptor.resource_url).await?;
        info!(
            "Embed page {} ended at {} ({})",
            descriptor.resource_url, page.final_url, page.status_code
        );

        let payload = markup::extract(&page.body)?;
        debug!("Bootstrap components: {:?}", summarize_payload(&payload));

        let outcome = classify(&page.final_path, &payload);

        Ok(ProbeOutcome {
            resource_url: descriptor.resource_url,
            final_url: page.final_url,
            status_code: page.status_code,
            outcome,
        })
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new()
    }
}
