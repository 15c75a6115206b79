use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wallcheck_core::probe::{
    CredentialProfile, ProbeOptions, ReportCallback, RunReport, default_profiles, execute_probes,
};
use wallcheck_core::report::{ReportFormat, generate_summary, render_run};
use wallcheck_scanner::{ClientOptions, CredentialSet};

/// Format chosen for `run`, Text when the flag is absent or unknown
pub fn run_format(sub_matches: &ArgMatches) -> ReportFormat {
    sub_matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text)
}

/// The banner goes to stdout, so it is left out when `-q` is given or when a
/// `run` writes JSON lines there.
pub fn banner_allowed(matches: &ArgMatches) -> bool {
    if matches.get_flag("quiet") {
        return false;
    }
    match matches.subcommand() {
        Some(("run", sub_matches)) => run_format(sub_matches) == ReportFormat::Text,
        _ => true,
    }
}

/// Lines printed before the first report. Empty for JSON output.
pub fn run_preamble(options: &ProbeOptions, format: ReportFormat) -> Vec<String> {
    match format {
        ReportFormat::Text => vec![
            format!("Target: {}", options.target_url.bright_white()),
            format!("Endpoint: {}", options.endpoint.bright_white()),
            format!("Profiles: {}\n", options.profiles.len()),
        ],
        ReportFormat::Json => Vec::new(),
    }
}

/// Lines printed after the last report. Empty for JSON output.
pub fn run_epilogue(reports: &[RunReport], format: ReportFormat) -> Vec<String> {
    match format {
        ReportFormat::Text => {
            let mut lines = vec![String::new()];
            lines.extend(generate_summary(reports).lines().map(str::to_string));
            lines
        }
        ReportFormat::Json => Vec::new(),
    }
}

pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // Reports own stdout, logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Parse a `NAME=PATH` profile argument, expanding `~` in the path
pub fn parse_profile_arg(arg: &str) -> Result<CredentialProfile, String> {
    let (name, path) = arg
        .split_once('=')
        .ok_or_else(|| format!("Profile '{}' must look like NAME=PATH", arg))?;

    let name = name.trim();
    let path = path.trim();
    if name.is_empty() || path.is_empty() {
        return Err(format!("Profile '{}' needs both a name and a path", arg));
    }

    let expanded = shellexpand::tilde(path);
    Ok(CredentialProfile::new(
        name,
        PathBuf::from(expanded.as_ref()),
    ))
}

/// Build the profile list for a run: the anonymous profile first when asked
/// for, then the given profiles, or the default guest/user pair.
pub fn profiles_from_args(
    profile_args: &[String],
    anonymous: bool,
) -> Result<Vec<CredentialProfile>, String> {
    let mut profiles = Vec::new();
    if anonymous {
        profiles.push(CredentialProfile::anonymous());
    }

    if profile_args.is_empty() {
        profiles.extend(default_profiles());
    } else {
        for arg in profile_args {
            profiles.push(parse_profile_arg(arg)?);
        }
    }

    Ok(profiles)
}

/// One line per cookie: domain, path, name and expiry. Values are never shown.
pub fn format_cookie_listing(credentials: &CredentialSet) -> String {
    let mut listing = String::new();
    for entry in credentials.entries() {
        let expires = if entry.expires == 0 {
            "session".to_string()
        } else {
            entry.expires.to_string()
        };
        listing.push_str(&format!(
            "{}\t{}\t{}\t{}{}\n",
            entry.domain,
            entry.path,
            entry.name,
            expires,
            if entry.secure { "\tsecure" } else { "" }
        ));
    }
    listing
}

pub fn handle_cookies(args: &ArgMatches) -> anyhow::Result<()> {
    let raw_path = args
        .get_one::<String>("PATH")
        .context("a cookie file path is required")?;
    let path = PathBuf::from(shellexpand::tilde(raw_path).as_ref());

    let credentials = CredentialSet::load(&path)
        .with_context(|| format!("could not load {}", path.display()))?;

    if credentials.is_empty() {
        println!(
            "{} No cookies present in {}",
            "-".bright_black().bold(),
            path.display().to_string().bright_white()
        );
        return Ok(());
    }

    println!(
        "{} {} cookies in {}\n",
        "✓".green().bold(),
        credentials.len().to_string().cyan(),
        path.display().to_string().bright_white()
    );
    print!("{}", format_cookie_listing(&credentials));
    Ok(())
}

pub async fn handle_run(sub_matches: &ArgMatches, quiet: bool) {
    let profile_args: Vec<String> = sub_matches
        .get_many::<String>("profile")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let anonymous = sub_matches.get_flag("anonymous");
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&30);
    let format = run_format(sub_matches);

    let profiles = match profiles_from_args(&profile_args, anonymous) {
        Ok(profiles) => profiles,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    let mut options = ProbeOptions {
        profiles,
        client: ClientOptions {
            timeout: Duration::from_secs(timeout),
            ..ClientOptions::default()
        },
        show_progress: !quiet && format == ReportFormat::Text,
        ..ProbeOptions::default()
    };
    if let Some(target) = sub_matches.get_one::<Url>("target") {
        options.target_url = target.as_str().to_string();
    }
    if let Some(endpoint) = sub_matches.get_one::<Url>("endpoint") {
        options.endpoint = endpoint.as_str().to_string();
    }

    for line in run_preamble(&options, format) {
        println!("{}", line);
    }

    let report_callback: ReportCallback = Arc::new(move |report: &RunReport| {
        println!("{}", render_run(report, format));
    });

    let reports = execute_probes(options, Some(report_callback)).await;

    for line in run_epilogue(&reports, format) {
        println!("{}", line);
    }
}
