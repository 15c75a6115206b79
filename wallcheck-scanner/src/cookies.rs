// Netscape cookies.txt credential stores

use crate::error::{ProbeError, Result};
use reqwest::cookie::Jar;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use url::Url;

const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// A single saved cookie, one line of a cookies.txt file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieEntry {
    pub domain: String,
    pub include_subdomains: bool,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    /// Unix timestamp; 0 marks a session cookie.
    pub expires: u64,
    pub name: String,
    pub value: String,
}

impl CookieEntry {
    /// Parse one tab-separated line. Returns None for anything that is not a
    /// seven-field cookie record.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (line, http_only) = match line.strip_prefix(HTTP_ONLY_PREFIX) {
            Some(rest) => (rest, true),
            None => (line, false),
        };

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 7 {
            return None;
        }

        let domain = fields[0].trim();
        let name = fields[5].trim();
        if domain.is_empty() || name.is_empty() {
            return None;
        }

        Some(Self {
            domain: domain.to_string(),
            include_subdomains: parse_flag(fields[1])?,
            path: fields[2].trim().to_string(),
            secure: parse_flag(fields[3])?,
            http_only,
            expires: fields[4].trim().parse().ok()?,
            name: name.to_string(),
            // Values may legitimately carry surrounding spaces
            value: fields[6].trim_end_matches(['\r', '\n']).to_string(),
        })
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.expires != 0 && self.expires < now
    }

    /// Host the cookie belongs to, without the leading dot of domain cookies.
    pub fn host(&self) -> &str {
        self.domain.trim_start_matches('.')
    }

    /// URL a response would have to come from to set this cookie.
    pub fn origin_url(&self) -> Option<Url> {
        let scheme = if self.secure { "https" } else { "http" };
        let path = if self.path.starts_with('/') {
            self.path.as_str()
        } else {
            "/"
        };
        Url::parse(&format!("{}://{}{}", scheme, self.host(), path)).ok()
    }

    /// Render as a Set-Cookie header value for seeding a cookie jar.
    pub fn set_cookie_header(&self) -> String {
        let mut header = format!("{}={}", self.name, self.value);
        if !self.path.is_empty() {
            header.push_str(&format!("; Path={}", self.path));
        }
        if self.include_subdomains {
            header.push_str(&format!("; Domain={}", self.host()));
        }
        if self.secure {
            header.push_str("; Secure");
        }
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        header
    }
}

fn parse_flag(field: &str) -> Option<bool> {
    match field.trim().to_ascii_uppercase().as_str() {
        "TRUE" => Some(true),
        "FALSE" => Some(false),
        _ => None,
    }
}

/// The set of cookies loaded from one store, keyed by (domain, path, name).
#[derive(Debug, Clone, Default)]
pub struct CredentialSet {
    entries: BTreeMap<(String, String, String), CookieEntry>,
}

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ProbeError::CredentialLoad(format!("{}: {}", path.display(), e)))?;
        let set = Self::parse(&content);
        debug!("Loaded {} cookies from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn parse(content: &str) -> Self {
        let mut set = Self::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim_start();
            if line.trim().is_empty() {
                continue;
            }
            if line.starts_with('#') && !line.starts_with(HTTP_ONLY_PREFIX) {
                continue;
            }

            match CookieEntry::parse_line(line) {
                Some(entry) => set.insert(entry),
                None => warn!("Skipping malformed cookie line {}", idx + 1),
            }
        }

        set
    }

    pub fn insert(&mut self, entry: CookieEntry) {
        let key = (entry.domain.clone(), entry.path.clone(), entry.name.clone());
        self.entries.insert(key, entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = &CookieEntry> {
        self.entries.values()
    }

    /// Build a reqwest cookie jar holding every unexpired entry.
    pub fn to_jar(&self) -> Jar {
        let jar = Jar::default();
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        for entry in self.entries() {
            if entry.is_expired(now) {
                debug!("Dropping expired cookie {} for {}", entry.name, entry.domain);
                continue;
            }
            match entry.origin_url() {
                Some(url) => jar.add_cookie_str(&entry.set_cookie_header(), &url),
                None => warn!("Cookie {} has an unusable domain {}", entry.name, entry.domain),
            }
        }

        jar
    }
}
