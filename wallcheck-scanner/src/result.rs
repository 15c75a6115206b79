use serde::Serialize;

/// Where a GET request ended up after redirects, and what it returned.
#[derive(Debug, Clone, Serialize)]
pub struct FetchedPage {
    pub final_url: String,
    /// Path of the final URL; this, not the requested URL, drives classification.
    pub final_path: String,
    pub status_code: u16,
    pub body: String,
}

/// Which response mode the embed endpoint served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ClassifiedOutcome {
    ConsentWall,
    DashboardRedirect,
    PostDataFound { blog_name: String, post_slug: String },
    PostDataMissing,
}

impl ClassifiedOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifiedOutcome::ConsentWall => "consent_wall",
            ClassifiedOutcome::DashboardRedirect => "dashboard_redirect",
            ClassifiedOutcome::PostDataFound { .. } => "post_data_found",
            ClassifiedOutcome::PostDataMissing => "post_data_missing",
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ClassifiedOutcome::ConsentWall => "Hit ConsentForm wall.".to_string(),
            ClassifiedOutcome::DashboardRedirect => "Redirected to dashboard.".to_string(),
            ClassifiedOutcome::PostDataFound {
                blog_name,
                post_slug,
            } => format!(
                "Found post data. Blog name: {}, post slug: {}",
                blog_name, post_slug
            ),
            ClassifiedOutcome::PostDataMissing => "No post data found.".to_string(),
        }
    }
}

/// Everything one pass through the pipeline learned.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeOutcome {
    pub resource_url: String,
    pub final_url: String,
    pub status_code: u16,
    pub outcome: ClassifiedOutcome,
}
