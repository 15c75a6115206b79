use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("No cookies present in store: {0}")]
    EmptyCredentialStore(String),

    #[error("Failed to load credential store: {0}")]
    CredentialLoad(String),

    #[error("oEmbed request failed: {0}")]
    DescriptorFetch(String),

    #[error("oEmbed response is not a valid descriptor: {0}")]
    DescriptorParse(String),

    #[error("No embed URL in oEmbed markup: {0}")]
    DescriptorExtraction(String),

    #[error("Embed page request failed: {0}")]
    ResourceFetch(String),

    #[error("No bootstrap data element in embed page")]
    BootstrapMissing,

    #[error("Bootstrap data is not valid JSON: {0}")]
    BootstrapParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl ProbeError {
    /// Short stable name of the failure kind, used in report lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::EmptyCredentialStore(_) => "empty_credential_store",
            ProbeError::CredentialLoad(_) => "credential_load",
            ProbeError::DescriptorFetch(_) => "descriptor_fetch",
            ProbeError::DescriptorParse(_) => "descriptor_parse",
            ProbeError::DescriptorExtraction(_) => "descriptor_extraction",
            ProbeError::ResourceFetch(_) => "resource_fetch",
            ProbeError::BootstrapMissing => "bootstrap_missing",
            ProbeError::BootstrapParse(_) => "bootstrap_parse",
            ProbeError::InvalidUrl(_) => "invalid_url",
            ProbeError::HttpError(_) => "http_client",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
