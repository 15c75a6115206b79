// oEmbed descriptor resolution

use crate::client::ProbeClient;
use crate::error::{ProbeError, Result};
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

pub const OEMBED_ENDPOINT: &str = "https://www.tumblr.com/oembed/1.0";

static EMBED_POST_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".tumblr-post").expect("static selector"));

const EMBED_URL_ATTR: &str = "data-href";

/// An oEmbed response and the embed page URL found inside its markup.
#[derive(Debug, Clone)]
pub struct EmbedDescriptor {
    pub raw: Value,
    pub html: String,
    pub resource_url: String,
}

/// Build `<endpoint>?url=<target>` with the target percent-encoded.
pub fn descriptor_url(endpoint: &str, target: &str) -> Result<Url> {
    Url::parse_with_params(endpoint, &[("url", target)])
        .map_err(|e| ProbeError::InvalidUrl(format!("{}: {}", endpoint, e)))
}

/// Ask the oEmbed endpoint about `target` and pull out the embed page URL.
pub async fn resolve(client: &ProbeClient, endpoint: &str, target: &str) -> Result<EmbedDescriptor> {
    let url = descriptor_url(endpoint, target)?;

    let page = client
        .get(url.as_str())
        .await
        .map_err(|e| ProbeError::DescriptorFetch(format!("{}: {}", url, e)))?;

    if !(200..300).contains(&page.status_code) {
        return Err(ProbeError::DescriptorFetch(format!(
            "{} returned status {}",
            url, page.status_code
        )));
    }

    let descriptor = parse_descriptor(&page.body)?;
    debug!("Embed page for {} is {}", target, descriptor.resource_url);
    Ok(descriptor)
}

/// Parse an oEmbed JSON body. Needs a string `html` field holding the embed code.
pub fn parse_descriptor(body: &str) -> Result<EmbedDescriptor> {
    let raw: Value =
        serde_json::from_str(body).map_err(|e| ProbeError::DescriptorParse(e.to_string()))?;

    let html = raw
        .get("html")
        .and_then(Value::as_str)
        .ok_or_else(|| ProbeError::DescriptorParse("missing string field `html`".to_string()))?
        .to_string();

    let resource_url = extract_resource_url(&html)?;

    Ok(EmbedDescriptor {
        raw,
        html,
        resource_url,
    })
}

/// Read the trimmed `data-href` of the `.tumblr-post` element in an embed snippet.
pub fn extract_resource_url(html: &str) -> Result<String> {
    let fragment = Html::parse_fragment(html);

    let mut matches = fragment.select(&EMBED_POST_SELECTOR);
    let element = matches.next().ok_or_else(|| {
        ProbeError::DescriptorExtraction("no .tumblr-post element".to_string())
    })?;
    if matches.next().is_some() {
        debug!("Embed snippet has more than one .tumblr-post element, using the first");
    }

    let href = element.value().attr(EMBED_URL_ATTR).map(str::trim).unwrap_or("");
    if href.is_empty() {
        return Err(ProbeError::DescriptorExtraction(format!(
            ".tumblr-post has no {}",
            EMBED_URL_ATTR
        )));
    }

    Ok(href.to_string())
}
