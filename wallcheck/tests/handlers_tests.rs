use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use wallcheck::command_argument_builder;
use wallcheck::handlers::*;
use wallcheck_core::probe::{CredentialProfile, ProbeOptions, RunReport, RunStatus};
use wallcheck_core::report::{ReportFormat, render_run};
use wallcheck_scanner::{ClassifiedOutcome, CredentialSet, ProbeOutcome};

fn sample_reports() -> Vec<RunReport> {
    vec![
        RunReport {
            profile: "guest".to_string(),
            status: RunStatus::Skipped,
        },
        RunReport {
            profile: "user".to_string(),
            status: RunStatus::Completed(ProbeOutcome {
                resource_url: "https://embed.tumblr.com/embed/post/abc/123".to_string(),
                final_url: "https://www.tumblr.com/dashboard".to_string(),
                status_code: 200,
                outcome: ClassifiedOutcome::DashboardRedirect,
            }),
        },
        RunReport {
            profile: "anonymous".to_string(),
            status: RunStatus::Failed {
                kind: "descriptor_fetch".to_string(),
                message: "oEmbed request failed: \"timed out\"".to_string(),
            },
        },
    ]
}

#[test]
fn test_parse_profile_arg() {
    let profile = parse_profile_arg("guest=guest-cookies.txt").unwrap();
    assert_eq!(profile.name, "guest");
    assert_eq!(profile.store, Some(PathBuf::from("guest-cookies.txt")));
}

#[test]
fn test_parse_profile_arg_trims_whitespace() {
    let profile = parse_profile_arg(" user = /tmp/user-cookies.txt ").unwrap();
    assert_eq!(profile.name, "user");
    assert_eq!(profile.store, Some(PathBuf::from("/tmp/user-cookies.txt")));
}

#[test]
fn test_parse_profile_arg_expands_tilde() {
    let profile = parse_profile_arg("user=~/cookies.txt").unwrap();
    let store = profile.store.unwrap();
    assert!(!store.to_string_lossy().starts_with('~'));
    assert!(store.ends_with("cookies.txt"));
}

#[test]
fn test_parse_profile_arg_invalid() {
    assert!(parse_profile_arg("guest-cookies.txt").is_err());
    assert!(parse_profile_arg("=cookies.txt").is_err());
    assert!(parse_profile_arg("guest=").is_err());
}

#[test]
fn test_profiles_from_args_defaults() {
    let profiles = profiles_from_args(&[], false).unwrap();
    let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["guest", "user"]);
}

#[test]
fn test_profiles_from_args_anonymous_first() {
    let args = vec!["eu=eu.txt".to_string(), "us=us.txt".to_string()];
    let profiles = profiles_from_args(&args, true).unwrap();
    let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();

    assert_eq!(names, vec!["anonymous", "eu", "us"]);
    assert!(profiles[0].store.is_none());
}

#[test]
fn test_profiles_from_args_rejects_bad_profile() {
    let args = vec!["eu=eu.txt".to_string(), "broken".to_string()];
    let err = profiles_from_args(&args, false).unwrap_err();
    assert!(err.contains("NAME=PATH"));
}

#[test]
fn test_format_cookie_listing_hides_values() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "# Netscape HTTP Cookie File")?;
    writeln!(temp_file, ".tumblr.com\tTRUE\t/\tTRUE\t0\tpfg\tsupersecret")?;
    writeln!(temp_file, "www.tumblr.com\tFALSE\t/\tFALSE\t1900000000\tlogged_in\t1")?;

    let credentials = CredentialSet::load(temp_file.path())?;
    let listing = format_cookie_listing(&credentials);

    assert_eq!(listing.lines().count(), 2);
    assert!(listing.contains(".tumblr.com\t/\tpfg\tsession\tsecure"));
    assert!(listing.contains("www.tumblr.com\t/\tlogged_in\t1900000000"));
    assert!(!listing.contains("supersecret"));

    Ok(())
}

#[test]
fn test_banner_skipped_for_json_run() {
    let matches = command_argument_builder()
        .try_get_matches_from(["wallcheck", "run", "-f", "json"])
        .unwrap();
    assert!(!banner_allowed(&matches));
}

#[test]
fn test_banner_shown_for_text_run_and_cookies() {
    let matches = command_argument_builder()
        .try_get_matches_from(["wallcheck", "run"])
        .unwrap();
    assert!(banner_allowed(&matches));

    let matches = command_argument_builder()
        .try_get_matches_from(["wallcheck", "cookies", "guest-cookies.txt"])
        .unwrap();
    assert!(banner_allowed(&matches));

    let matches = command_argument_builder()
        .try_get_matches_from(["wallcheck", "-q", "run"])
        .unwrap();
    assert!(!banner_allowed(&matches));
}

#[test]
fn test_json_run_stdout_is_json_lines() {
    let matches = command_argument_builder()
        .try_get_matches_from(["wallcheck", "run", "--format", "json"])
        .unwrap();
    let (_, run_matches) = matches.subcommand().unwrap();
    let format = run_format(run_matches);
    assert_eq!(format, ReportFormat::Json);
    assert!(!banner_allowed(&matches));

    let options = ProbeOptions {
        profiles: vec![CredentialProfile::anonymous()],
        ..ProbeOptions::default()
    };
    let reports = sample_reports();

    let mut stdout_lines = run_preamble(&options, format);
    stdout_lines.extend(reports.iter().map(|r| render_run(r, format)));
    stdout_lines.extend(run_epilogue(&reports, format));

    assert_eq!(stdout_lines.len(), reports.len());
    for line in &stdout_lines {
        let value: serde_json::Value = serde_json::from_str(line)
            .unwrap_or_else(|e| panic!("not JSON: {} ({})", line, e));
        assert!(value["profile"].is_string());
    }
}

#[test]
fn test_text_run_has_preamble_and_summary() {
    let options = ProbeOptions::default();
    let reports = sample_reports();

    let preamble = run_preamble(&options, ReportFormat::Text);
    assert!(preamble.iter().any(|l| l.contains("Profiles: 2")));

    let epilogue = run_epilogue(&reports, ReportFormat::Text);
    assert!(epilogue.iter().any(|l| l.contains("Runs: 3")));
}

#[test]
fn test_timeout_must_be_positive() {
    let result = command_argument_builder()
        .try_get_matches_from(["wallcheck", "run", "--timeout", "0"]);
    assert!(result.is_err());

    let matches = command_argument_builder()
        .try_get_matches_from(["wallcheck", "run", "--timeout", "5"])
        .unwrap();
    let (_, run_matches) = matches.subcommand().unwrap();
    assert_eq!(run_matches.get_one::<u64>("timeout"), Some(&5));
}

#[test]
fn test_timeout_defaults_to_thirty_seconds() {
    let matches = command_argument_builder()
        .try_get_matches_from(["wallcheck", "run"])
        .unwrap();
    let (_, run_matches) = matches.subcommand().unwrap();
    assert_eq!(run_matches.get_one::<u64>("timeout"), Some(&30));
}
