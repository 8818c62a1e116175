mod cli;
mod config;
mod error;
mod input;
mod lint;
mod matching;
mod report;
mod scoring;
mod types;

use crate::error::CompassError;
use crate::types::matching::RankOptions;
use crate::types::report::Severity;
use clap::Parser;
use std::path::Path;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, CompassError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            require_path(&cmd.template)?;
            require_path(&cmd.answers)?;

            let policy = config::load_policy(cmd.policy.as_deref())?;
            let loaded = input::load_template(&cmd.template)?;
            let assessment = input::load_assessment(&cmd.answers)?;
            let org = cmd
                .org
                .as_deref()
                .map(input::load_organization)
                .transpose()?;

            let mut assessment_report = scoring::score_assessment(
                &loaded.template,
                &assessment,
                org.as_ref(),
                &policy,
            )?;
            assessment_report.template_fingerprint = Some(loaded.fingerprint);
            assessment_report.generated_at = Some(chrono::Utc::now());

            let rendered = report::render_assessment(&assessment_report, output_format(cmd.format))?;
            println!("{rendered}");

            for warning in &assessment_report.warnings {
                eprintln!("warning: {warning}");
            }

            let has_critical = assessment_report
                .gaps
                .iter()
                .any(|gap| gap.severity == Severity::Critical);
            if has_critical {
                Ok(exit_code::BLOCKING)
            } else if !assessment_report.gaps.is_empty()
                || !assessment_report.warnings.is_empty()
            {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Match(cmd) => {
            require_path(&cmd.vendors)?;
            require_path(&cmd.org)?;

            let policy = config::load_policy(cmd.policy.as_deref())?;
            let vendors = input::load_vendors(&cmd.vendors)?;
            let org = input::load_organization(&cmd.org)?;
            let gaps = cmd
                .gaps
                .as_deref()
                .map(input::load_gaps)
                .transpose()?
                .unwrap_or_default();

            let options = RankOptions {
                min_score: cmd.min_score.or(policy.min_score),
                top_n: cmd.top_n,
            };
            let matches = matching::match_vendors(&vendors, &org, &gaps, &policy, &options);

            let rendered = report::render_matches(&matches, output_format(cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Lint(cmd) => {
            require_path(&cmd.path)?;

            let mut has_findings = false;
            let mut has_blocking = false;
            for path in template_files(&cmd.path) {
                let (file_findings, file_blocking) = lint_one(&path);
                has_findings |= file_findings;
                has_blocking |= file_blocking;
            }

            if !has_findings {
                println!("lint: no findings");
                return Ok(exit_code::SUCCESS);
            }
            if has_blocking {
                Ok(exit_code::BLOCKING)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
    }
}

/// Lints a single template file; returns (any findings, any blocking).
fn lint_one(path: &Path) -> (bool, bool) {
    let loaded = match input::load_template(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("[BLOCKING] {}: {}", path.display(), e);
            return (true, true);
        }
    };

    let findings = lint::lint_template(&loaded.template);
    let mut has_blocking = false;
    for finding in &findings {
        let level = if finding.blocking { "BLOCKING" } else { "WARN" };
        has_blocking |= finding.blocking;
        println!(
            "[{}] {} {}: {}",
            level,
            path.display(),
            finding.id,
            finding.title
        );
        println!("  {}", finding.body);
    }
    (!findings.is_empty(), has_blocking)
}

fn template_files(path: &Path) -> Vec<std::path::PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    let mut files: Vec<_> = walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext == "json")
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

fn require_path(path: &Path) -> Result<(), CompassError> {
    if !path.exists() {
        return Err(CompassError::PathNotFound(path.display().to_string()));
    }
    Ok(())
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_directive = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
