//! deploykeys
//!
//! Installs one SSH deploy key per GitHub repository and routes each
//! repository's clone URL to its own key through a host alias.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use deploykeys_core::{ProvisionReport, Provisioner};
use eyre::WrapErr;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod annotate;
mod config;

use config::{Config, LogFormat};

/// Provision per-repository SSH deploy keys
#[derive(Parser, Debug)]
#[command(name = "deploykeys", version, about)]
struct Args {
    /// Concatenated PEM private keys; each key comment must be `git@github.com:<owner>/<repo>.git`
    #[arg(long, env = "INPUT_KEYS", hide_env_values = true)]
    keys: Option<String>,

    /// Read the keys from a file instead, taking precedence over --keys (`-` for stdin)
    #[arg(long, value_name = "PATH")]
    keys_file: Option<PathBuf>,

    /// Configuration file (defaults to $DEPLOYKEYS_CONFIG, then ./deploykeys.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory receiving keys and SSH config (defaults to ~/.ssh)
    #[arg(long, value_name = "DIR")]
    ssh_dir: Option<PathBuf>,

    /// Timeout in seconds for each ssh-keygen / git invocation
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Print the provisioning report as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();

    let (mut config, config_source) = Config::load_default(args.config.as_deref())?;
    if let Some(level) = &args.log_level {
        config.log.level.clone_from(level);
    }
    if let Some(format) = args.log_format {
        config.log.format = format;
    }
    if let Some(dir) = &args.ssh_dir {
        config.provision.ssh_dir = Some(dir.clone());
    }
    if let Some(secs) = args.timeout {
        config.provision.command_timeout_secs = Some(secs);
    }

    init_tracing(&config.log.level, config.log.format)?;
    match &config_source {
        Some(path) => info!(path = %path.display(), "loaded configuration"),
        None => debug!("no config file found, using defaults"),
    }

    let keys = match &args.keys_file {
        Some(path) => Some(read_keys_file(path)?),
        None => args.keys.clone(),
    };

    let provisioner = Provisioner::local(config.provision_config()?);
    match provisioner.provision(keys.as_deref()).await {
        Ok(report) => {
            info!(keys = report.key_count(), "deploy keys provisioned");
            print_report(&report, args.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(error = %err, "provisioning failed");
            if annotate::in_github_actions() {
                println!("{}", annotate::error_command(&err.to_string()));
            }
            eprintln!("error: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .wrap_err_with(|| format!("invalid log level {level:?}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

fn read_keys_file(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut keys = String::new();
        std::io::stdin()
            .read_to_string(&mut keys)
            .wrap_err("failed to read keys from stdin")?;
        return Ok(keys);
    }
    std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read keys file {}", path.display()))
}

fn print_report(report: &ProvisionReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    for entry in &report.entries {
        println!(
            "{} -> {} ({})",
            entry.repo_url,
            entry.rewrite_target,
            entry.key_file.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "deploykeys",
            "--keys-file",
            "keys.pem",
            "--ssh-dir",
            "/tmp/ssh",
            "--timeout",
            "30",
            "--log-format",
            "json",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.keys_file, Some(PathBuf::from("keys.pem")));
        assert_eq!(args.ssh_dir, Some(PathBuf::from("/tmp/ssh")));
        assert_eq!(args.timeout, Some(30));
        assert_eq!(args.log_format, Some(LogFormat::Json));
        assert!(args.json);
    }

    #[test]
    fn test_keys_flag_accepts_pem_text() {
        let pem = "-----BEGIN X-----\nA\n-----END X-----";
        let flag = format!("--keys={pem}");
        let args = Args::try_parse_from(["deploykeys", flag.as_str()]).unwrap();

        assert_eq!(args.keys.as_deref(), Some(pem));
        assert!(args.keys_file.is_none());
    }

    #[test]
    fn test_read_keys_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.pem");
        std::fs::write(&path, "-----BEGIN X-----\nA\n-----END X-----\n").unwrap();

        assert_eq!(
            read_keys_file(&path).unwrap(),
            "-----BEGIN X-----\nA\n-----END X-----\n"
        );
        assert!(read_keys_file(&dir.path().join("missing.pem")).is_err());
    }
}
