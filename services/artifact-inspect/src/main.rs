//! OAuth artifact inspector
//!
//! Debugging tool for sessions that hold login artifacts:
//! 1. Loads a session dump (JSON object) through the same `ArtifactStore`
//!    the web application uses
//! 2. Prints the session key and value of every allowed artifact for the
//!    configured application, credentials redacted
//! 3. Optionally clears one artifact or everything under the prefix, then
//!    writes the dump back

mod config;
mod dump;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use oauth_artifacts::{Artifact, ArtifactStore, FixedAppId};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

const USAGE: &str =
    "usage: artifact-inspect [--config PATH] [--session PATH] [--clear KEY] [--clear-all] [--reveal]";

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<String>,
    session: Option<String>,
    clear: Option<Artifact>,
    clear_all: bool,
    reveal: bool,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(value_for(&mut args, "--config")?),
                "--session" => parsed.session = Some(value_for(&mut args, "--session")?),
                "--clear" => {
                    let key = value_for(&mut args, "--clear")?;
                    // Unlike the store, the tool refuses unknown keys outright
                    let artifact = key
                        .parse::<Artifact>()
                        .with_context(|| format!("--clear {key}"))?;
                    parsed.clear = Some(artifact);
                }
                "--clear-all" => parsed.clear_all = true,
                "--reveal" => parsed.reveal = true,
                other => bail!("unknown argument: {other}\n{USAGE}"),
            }
        }
        Ok(parsed)
    }
}

fn value_for(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} requires a value\n{USAGE}"))
}

fn main() -> Result<()> {
    // JSON logs on stderr with LOG_LEVEL / RUST_LOG support; stdout carries the report
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let config_path = Config::resolve_path(args.config.as_deref());
    info!(path = %config_path.display(), "loading configuration");
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let dump_path = args
        .session
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.session.dump_path.clone());

    info!(
        app_id = %config.application.app_id,
        prefix = %config.application.prefix,
        dump = %dump_path.display(),
        "configuration loaded"
    );

    for line in run(&args, &config, &dump_path)? {
        println!("{line}");
    }

    Ok(())
}

/// Open the dump at `dump_path`, apply any requested clears, and return the
/// report lines. The dump is written back only when something was cleared.
fn run(args: &Args, config: &Config, dump_path: &Path) -> Result<Vec<String>> {
    let mut session = dump::load(dump_path)
        .with_context(|| format!("failed to load session dump {}", dump_path.display()))?;

    let modified = args.clear.is_some() || args.clear_all;
    let lines = {
        let mut store = ArtifactStore::with_prefix(
            &mut session,
            FixedAppId::new(config.application.app_id.clone()),
            config.application.prefix.clone(),
        )?;

        if let Some(artifact) = args.clear {
            store.clear(artifact.as_str())?;
            info!(artifact = %artifact, "cleared artifact");
        }
        if args.clear_all {
            let removed = store.clear_all()?;
            info!(removed, "cleared all artifacts under prefix");
        }

        report::render(&store, args.reveal)?
    };

    if modified {
        dump::save(dump_path, &session)
            .with_context(|| format!("failed to save session dump {}", dump_path.display()))?;
        info!(path = %dump_path.display(), "session dump updated");
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApplicationConfig, SessionConfig};

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args_means_report_only() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_all_flags_parse() {
        let args = parse(&[
            "--config",
            "/etc/inspect.toml",
            "--session",
            "dump.json",
            "--clear",
            "access_token",
            "--clear-all",
            "--reveal",
        ])
        .unwrap();
        assert_eq!(args.config.as_deref(), Some("/etc/inspect.toml"));
        assert_eq!(args.session.as_deref(), Some("dump.json"));
        assert_eq!(args.clear, Some(Artifact::AccessToken));
        assert!(args.clear_all);
        assert!(args.reveal);
    }

    #[test]
    fn test_clear_rejects_unknown_artifact() {
        let err = format!("{:#}", parse(&["--clear", "bogus"]).unwrap_err());
        assert!(err.contains("unknown artifact: bogus"), "got: {err}");
    }

    #[test]
    fn test_flag_without_value_is_an_error() {
        let err = parse(&["--config"]).unwrap_err().to_string();
        assert!(err.contains("--config requires a value"), "got: {err}");
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let err = parse(&["--verbose"]).unwrap_err().to_string();
        assert!(err.contains("unknown argument: --verbose"), "got: {err}");
    }

    fn inspect_config(dump_path: &Path) -> Config {
        Config {
            application: ApplicationConfig {
                app_id: "123".into(),
                prefix: "_fos_facebook_".into(),
            },
            session: SessionConfig {
                dump_path: dump_path.to_path_buf(),
            },
        }
    }

    fn write_dump(path: &Path) {
        let dump = serde_json::json!({
            "_fos_facebook_fb_123_state": "S",
            "_fos_facebook_fb_123_code": "C",
            "_fos_facebook_fb_123_access_token": "TKN",
            "_fos_facebook_fb_999_user_id": "other-app",
            "cart": {"items": 2}
        });
        std::fs::write(path, serde_json::to_string_pretty(&dump).unwrap()).unwrap();
    }

    fn read_dump(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_clear_all_rewrites_dump_without_prefixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        write_dump(&path);

        let args = parse(&["--clear-all"]).unwrap();
        let lines = run(&args, &inspect_config(&path), &path).unwrap();

        assert!(lines.iter().all(|l| l.ends_with("= <absent>")), "got: {lines:?}");
        assert_eq!(read_dump(&path), serde_json::json!({"cart": {"items": 2}}));
    }

    #[test]
    fn test_clear_one_artifact_removes_only_that_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        write_dump(&path);

        let args = parse(&["--clear", "code"]).unwrap();
        let lines = run(&args, &inspect_config(&path), &path).unwrap();

        assert_eq!(lines[1], "_fos_facebook_fb_123_code = <absent>");
        let dump = read_dump(&path);
        let keys: Vec<&str> = dump.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "_fos_facebook_fb_123_access_token",
                "_fos_facebook_fb_123_state",
                "_fos_facebook_fb_999_user_id",
                "cart",
            ]
        );
    }

    #[test]
    fn test_report_only_leaves_dump_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        write_dump(&path);
        let before_bytes = std::fs::read(&path).unwrap();
        let before_mtime = std::fs::metadata(&path).unwrap().modified().unwrap();

        let lines = run(&Args::default(), &inspect_config(&path), &path).unwrap();

        assert_eq!(lines[2], "_fos_facebook_fb_123_access_token = [REDACTED]");
        assert_eq!(std::fs::read(&path).unwrap(), before_bytes);
        assert_eq!(
            std::fs::metadata(&path).unwrap().modified().unwrap(),
            before_mtime
        );
    }

    #[test]
    fn test_report_only_on_missing_dump_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let lines = run(&Args::default(), &inspect_config(&path), &path).unwrap();

        assert_eq!(lines.len(), 4);
        assert!(!path.exists());
    }
}
