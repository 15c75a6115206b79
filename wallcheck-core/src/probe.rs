use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use wallcheck_scanner::descriptor::OEMBED_ENDPOINT;
use wallcheck_scanner::prober::DEFAULT_TARGET_URL;
use wallcheck_scanner::{
    ClientOptions, CredentialSet, ProbeClient, ProbeError, ProbeOutcome, Prober,
};

/// A named cookie store to probe with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialProfile {
    pub name: String,
    /// None runs without any cookies and skips the empty-store check.
    pub store: Option<PathBuf>,
}

impl CredentialProfile {
    pub fn new(name: impl Into<String>, store: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            store: Some(store.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            name: "anonymous".to_string(),
            store: None,
        }
    }
}

/// The two stores the harness was built around: cookies after accepting the
/// GDPR notice as a guest, and cookies of a registered, logged-in account.
pub fn default_profiles() -> Vec<CredentialProfile> {
    vec![
        CredentialProfile::new("guest", "guest-cookies.txt"),
        CredentialProfile::new("user", "user-cookies.txt"),
    ]
}

/// Options for configuring a probe sequence
pub struct ProbeOptions {
    pub target_url: String,
    pub endpoint: String,
    pub profiles: Vec<CredentialProfile>,
    pub client: ClientOptions,
    pub show_progress: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            endpoint: OEMBED_ENDPOINT.to_string(),
            profiles: default_profiles(),
            client: ClientOptions::default(),
            show_progress: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    Skipped,
    Completed(ProbeOutcome),
    Failed { kind: String, message: String },
}

impl From<ProbeError> for RunStatus {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::EmptyCredentialStore(_) => RunStatus::Skipped,
            other => RunStatus::Failed {
                kind: other.kind().to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Result of probing with one profile.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub profile: String,
    #[serde(flatten)]
    pub status: RunStatus,
}

impl RunReport {
    /// One plain-text status line.
    pub fn line(&self) -> String {
        let detail = match &self.status {
            RunStatus::Skipped => "No cookies present in store. Canceling test.".to_string(),
            RunStatus::Completed(result) => result.outcome.describe(),
            RunStatus::Failed { kind, message } => format!("Run failed ({}): {}", kind, message),
        };
        format!("[{}] {}", self.profile, detail)
    }
}

/// Callback receiving each run's report as soon as the run finishes
pub type ReportCallback = Arc<dyn Fn(&RunReport) + Send + Sync>;

/// Load a profile's cookies, refusing empty stores before anything touches
/// the network.
pub fn preflight(profile: &CredentialProfile) -> Result<CredentialSet, ProbeError> {
    let Some(ref path) = profile.store else {
        return Ok(CredentialSet::new());
    };

    let credentials = CredentialSet::load(path)?;
    if credentials.is_empty() {
        return Err(ProbeError::EmptyCredentialStore(path.display().to_string()));
    }
    Ok(credentials)
}

async fn run_profile(
    profile: &CredentialProfile,
    prober: &Prober,
    client_options: &ClientOptions,
) -> RunStatus {
    let credentials = match preflight(profile) {
        Ok(credentials) => credentials,
        Err(e) => {
            if !matches!(e, ProbeError::EmptyCredentialStore(_)) {
                warn!("Profile {} unusable: {}", profile.name, e);
            }
            return e.into();
        }
    };

    info!(
        "Probing as {} with {} cookies",
        profile.name,
        credentials.len()
    );

    let client = match ProbeClient::new(&credentials, client_options) {
        Ok(client) => client,
        Err(e) => return e.into(),
    };

    match prober.probe(&client).await {
        Ok(result) => RunStatus::Completed(result),
        Err(e) => {
            warn!("Probe as {} failed: {}", profile.name, e);
            e.into()
        }
    }
}

/// Probe once per profile, strictly one after another.
///
/// A failing run is reported and the sequence moves on; nothing here fails the
/// whole sequence.
pub async fn execute_probes(
    options: ProbeOptions,
    report_callback: Option<ReportCallback>,
) -> Vec<RunReport> {
    let ProbeOptions {
        target_url,
        endpoint,
        profiles,
        client,
        show_progress,
    } = options;

    let prober = Prober::new()
        .with_target_url(target_url)
        .with_endpoint(endpoint);

    let mut reports = Vec::with_capacity(profiles.len());

    for profile in &profiles {
        let spinner = if show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb.set_message(format!("Probing as {}...", profile.name));
            Some(pb)
        } else {
            None
        };

        let status = run_profile(profile, &prober, &client).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let report = RunReport {
            profile: profile.name.clone(),
            status,
        };
        if let Some(ref callback) = report_callback {
            callback(&report);
        }
        reports.push(report);
    }

    reports
}
