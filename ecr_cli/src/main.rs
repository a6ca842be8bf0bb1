//! Command line front end: argument parsing, logging setup, per-file
//! analysis, and report output.

mod analyze;
mod cli;
mod report;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use cli::{Cli, FILE_GUARD};
use ecr_core::AnalysisCfg;
use eyre::WrapErr;
use tracing_subscriber::{EnvFilter, prelude::*};

fn init_tracing(level: &str, json: bool, log_file: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Optional JSON-lines file sink from the config.
    let file_layer = log_file.map(|file| {
        let path = Path::new(file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| "ecr.log".into());
        let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
        let _ = FILE_GUARD.set(guard);
        tracing_subscriber::fmt::layer().json().with_writer(writer)
    });

    // Console logs go to stderr so --json summaries own stdout.
    let base = tracing_subscriber::registry().with(filter).with(file_layer);
    if json {
        base.with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();
    } else {
        base.with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> eyre::Result<ecr_config::Config> {
    let config = match path {
        Some(p) => {
            let text = fs::read_to_string(p)
                .wrap_err_with(|| format!("reading config {}", p.display()))?;
            ecr_config::load_toml(&text).wrap_err("parsing config TOML")?
        }
        None => ecr_config::Config::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    let config = load_config(args.config.as_ref())?;
    let level = args
        .log_level
        .as_deref()
        .or(config.logging.level.as_deref())
        .unwrap_or("info");
    init_tracing(level, args.json, config.logging.file.as_deref());

    let analysis: AnalysisCfg = (&config.analysis).into();
    let thresholds = if args.thresholds.is_empty() {
        config.analysis.thresholds_ohm.clone()
    } else {
        args.thresholds.clone()
    };
    let strains = if args.strains.is_empty() {
        config.analysis.strains.clone()
    } else {
        args.strains.clone()
    };

    let out_dir = args
        .out_dir
        .clone()
        .or_else(|| config.report.out_dir.clone())
        .or_else(|| {
            args.files[0]
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
        })
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&out_dir)
        .wrap_err_with(|| format!("creating output directory {}", out_dir.display()))?;

    let mut measurements = Vec::new();
    let mut failures = 0usize;
    // Report files are keyed by dataset name; same-stem inputs from
    // different directories must not overwrite each other.
    let mut name_counts: HashMap<String, usize> = HashMap::new();
    for file in &args.files {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        let seen = name_counts.entry(stem.clone()).or_insert(0);
        *seen += 1;
        let name = if *seen > 1 {
            tracing::warn!(
                file = %file.display(),
                dataset = %stem,
                "duplicate dataset name; reports suffixed to avoid overwrite"
            );
            format!("{stem} ({seen})")
        } else {
            stem
        };
        match analyze::analyze_file(file, name, args.size, analysis, &thresholds, &strains) {
            Ok(mut m) => {
                if args.clean {
                    m.clean();
                }
                if config.report.write_samples {
                    report::write_samples(&m, &out_dir)?;
                }
                report::write_sweep(&m, &out_dir)?;
                measurements.push(m);
            }
            Err(e) => {
                failures += 1;
                tracing::error!(file = %file.display(), error = ?e, "dataset failed");
            }
        }
    }

    if !measurements.is_empty() {
        report::write_statistics(&measurements, &out_dir)?;
    }
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report::json_summary(&measurements))?
        );
    }
    if measurements.is_empty() {
        eyre::bail!("all {failures} input file(s) failed");
    }
    if failures > 0 {
        tracing::warn!(failures, "some input files failed; reports cover the rest");
    }
    Ok(())
}
