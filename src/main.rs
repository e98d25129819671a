use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use clap::{Args, Parser, Subcommand};
use e2e_report_core::config::Config;
use e2e_report_core::logs::filter_logs;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "e2e-report", about = "Turn Ginkgo e2e run reports into CI artefacts")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file; defaults to $XDG_CONFIG_HOME/e2e-report/config.toml if present.
    #[arg(long, global = true, env = "E2E_REPORT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a JUnit XML report.
    Junit {
        #[command(flatten)]
        input: ReportInput,
        /// Destination file.
        #[arg(short, long, default_value = "junit.xml")]
        output: PathBuf,
        #[command(flatten)]
        junit: JunitArgs,
    },
    /// Write a Polarion test-case import document.
    Polarion {
        #[command(flatten)]
        input: ReportInput,
        /// Destination file.
        #[arg(short, long, default_value = "polarion.xml")]
        output: PathBuf,
        #[command(flatten)]
        polarion: PolarionArgs,
    },
    /// Rebuild the Report Portal attachment tree for failed specs.
    RpPreproc {
        #[command(flatten)]
        input: ReportInput,
        #[command(flatten)]
        attachments: AttachmentArgs,
    },
    /// Generate the JUnit report, Polarion document and attachment tree.
    All {
        #[command(flatten)]
        input: ReportInput,
        #[arg(long, default_value = "junit.xml")]
        junit_output: PathBuf,
        #[arg(long, default_value = "polarion.xml")]
        polarion_output: PathBuf,
        #[command(flatten)]
        junit: JunitArgs,
        #[command(flatten)]
        polarion: PolarionArgs,
        #[command(flatten)]
        attachments: AttachmentArgs,
    },
    /// Print the part of a log that starts at or after a timestamp.
    FilterLogs {
        /// Log file; reads stdin when omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// RFC3339 cutoff, e.g. 2024-01-01T00:00:03Z.
        #[arg(long)]
        since: String,
    },
}

#[derive(Args)]
struct ReportInput {
    /// Ginkgo JSON report (`ginkgo --json-report`).
    #[arg(short, long, default_value = "report.json")]
    report: PathBuf,
}

#[derive(Args)]
struct JunitArgs {
    /// Leave system-out empty on every test case.
    #[arg(long)]
    omit_captured_output: bool,
    /// Leave system-err empty for specs in these states.
    #[arg(long, value_delimiter = ',')]
    omit_timelines_for: Vec<String>,
}

#[derive(Args)]
struct PolarionArgs {
    /// Polarion project id used to prefix case and work-item ids.
    #[arg(long)]
    project_id: Option<String>,
    /// Mark the import as a dry run.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct AttachmentArgs {
    /// Directory in which `rp_preproc/` is created.
    #[arg(long)]
    parent_dir: Option<PathBuf>,
}

impl JunitArgs {
    fn apply(self, config: &mut Config) {
        if self.omit_captured_output {
            config.junit.omit_captured_output = true;
        }
        if !self.omit_timelines_for.is_empty() {
            config.junit.omit_timelines_for = self.omit_timelines_for;
        }
    }
}

impl PolarionArgs {
    fn apply(self, config: &mut Config) {
        if let Some(id) = self.project_id {
            config.polarion.project_id = id;
        }
        if self.dry_run {
            config.polarion.dry_run = true;
        }
    }
}

impl AttachmentArgs {
    fn apply(self, config: &mut Config) {
        if let Some(dir) = self.parent_dir {
            config.attachments.parent_dir = dir;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Junit { input, output, junit } => {
            junit.apply(&mut config);
            let reports = e2e_report::load_reports(&input.report)?;
            e2e_report::run_junit(&reports, &output, &config)
        }
        Command::Polarion { input, output, polarion } => {
            polarion.apply(&mut config);
            let reports = e2e_report::load_reports(&input.report)?;
            e2e_report::run_polarion(&reports, &output, &config)
        }
        Command::RpPreproc { input, attachments } => {
            attachments.apply(&mut config);
            let reports = e2e_report::load_reports(&input.report)?;
            e2e_report::run_rp_preproc(&reports, &config)
        }
        Command::All {
            input,
            junit_output,
            polarion_output,
            junit,
            polarion,
            attachments,
        } => {
            junit.apply(&mut config);
            polarion.apply(&mut config);
            attachments.apply(&mut config);
            let reports = e2e_report::load_reports(&input.report)?;
            e2e_report::run_junit(&reports, &junit_output, &config)?;
            e2e_report::run_polarion(&reports, &polarion_output, &config)?;
            e2e_report::run_rp_preproc(&reports, &config)
        }
        Command::FilterLogs { input, since } => {
            let since: DateTime<FixedOffset> = DateTime::parse_from_rfc3339(&since)
                .with_context(|| format!("--since {since:?} is not an RFC3339 timestamp"))?;
            let logs = match input {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("reading stdin")?;
                    buf
                }
            };
            println!("{}", filter_logs(&logs, since));
            Ok(())
        }
    }
}
