// Outcome classification
//
// The three modes were observed, not documented: a consent interstitial
// (GDPR regions without consent), a redirect to the dashboard (logged-in
// sessions), or the embed page with full post data. The redirect checks come
// first because the payload shape is unreliable once a redirect happened.

use crate::result::ClassifiedOutcome;
use serde_json::Value;

pub const CONSENT_PATH: &str = "/privacy/consent";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Location of the first post's data entry in the bootstrap payload.
pub const POST_DATA_PATH: &[PathSegment] = &[
    PathSegment::Key("Components"),
    PathSegment::Key("EmbeddablePost"),
    PathSegment::Key("posts_data"),
    PathSegment::Index(0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    Key(&'static str),
    Index(usize),
}

/// Walk `path` from `value`, stopping with None at the first missing step.
pub fn lookup<'a>(value: &'a Value, path: &[PathSegment]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, segment| match segment {
        PathSegment::Key(key) => current.as_object()?.get(*key),
        PathSegment::Index(idx) => current.as_array()?.get(*idx),
    })
}

pub fn classify(resolved_path: &str, payload: &Value) -> ClassifiedOutcome {
    if resolved_path == CONSENT_PATH {
        return ClassifiedOutcome::ConsentWall;
    }
    if resolved_path == DASHBOARD_PATH {
        return ClassifiedOutcome::DashboardRedirect;
    }

    let Some(post) = lookup(payload, POST_DATA_PATH) else {
        return ClassifiedOutcome::PostDataMissing;
    };

    let blog_name = lookup(post, &[PathSegment::Key("blog"), PathSegment::Key("name")])
        .and_then(Value::as_str);
    let post_slug = lookup(post, &[PathSegment::Key("slug")]).and_then(Value::as_str);

    match (blog_name, post_slug) {
        (Some(blog_name), Some(post_slug)) => ClassifiedOutcome::PostDataFound {
            blog_name: blog_name.to_string(),
            post_slug: post_slug.to_string(),
        },
        _ => ClassifiedOutcome::PostDataMissing,
    }
}

/// Sorted keys under `Components`, for debug output.
pub fn summarize_payload(payload: &Value) -> Vec<String> {
    let mut keys: Vec<String> = lookup(payload, &[PathSegment::Key("Components")])
        .and_then(Value::as_object)
        .map(|components| components.keys().cloned().collect())
        .unwrap_or_default();
    keys.sort();
    keys
}
