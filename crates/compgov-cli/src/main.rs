mod display;
mod drafts;
mod extract;
mod reports;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use compgov_core::config::{
    DEFAULT_ARCHIVE_ROOT, DEFAULT_DELIVERABLES_CSV, DEFAULT_LIBRARY_DIR, DEFAULT_OUTPUT_DIR,
    DEFAULT_REPORT_DIR,
};
use compgov_core::{Config, PlanNameMatch};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "compgov",
    version,
    about = "Compensation-plan policy coverage: extract, classify, and report"
)]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Command,
}

/// Locations shared by every subcommand.
#[derive(Args, Debug)]
struct PathArgs {
    /// Client archive holding the master workbook, clause extracts and delivery package
    #[arg(long, global = true, env = "ARCHIVE_ROOT", default_value = DEFAULT_ARCHIVE_ROOT)]
    archive_root: PathBuf,

    /// Directory for JSON intermediates
    #[arg(long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Directory for generated workbooks
    #[arg(long, global = true, default_value = DEFAULT_REPORT_DIR)]
    report_dir: PathBuf,

    /// Markdown policy library directory
    #[arg(long, global = true, default_value = DEFAULT_LIBRARY_DIR)]
    library_dir: PathBuf,

    /// Deliverables checklist CSV
    #[arg(long, global = true, default_value = DEFAULT_DELIVERABLES_CSV)]
    deliverables_csv: PathBuf,

    /// How plan names are compared across sources: exact or normalized
    #[arg(long, global = true, default_value = "normalized")]
    plan_name_match: PlanNameMatch,
}

impl From<PathArgs> for Config {
    fn from(args: PathArgs) -> Self {
        Self {
            archive_root: args.archive_root,
            output_dir: args.output_dir,
            report_dir: args.report_dir,
            library_dir: args.library_dir,
            deliverables_csv: args.deliverables_csv,
            plan_name_match: args.plan_name_match,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the coverage matrix and executive summary from the master workbook
    ExtractWorkbook,
    /// Classify per-plan clause extracts into json-plan-analysis.json
    ParsePlans,
    /// Summarize the DRAFT policy documents
    ReadDrafts,
    /// Export DRAFT and TEMPLATE policies as a Markdown library
    ExportPolicies,
    /// Build the four-tab policy coverage matrix workbook
    BuildMatrix,
    /// Validate the deliverables checklist and estimate risk mitigated
    EnhanceDeliverables,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from(cli.paths);
    tracing::debug!(?config, "configuration");

    match run(cli.command, &config, Local::now().date_naive()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config, today: NaiveDate) -> anyhow::Result<()> {
    match command {
        Command::ExtractWorkbook => {
            let extract = extract::run_extract_workbook(config, today)?;
            display::print_workbook_extract(&extract);
        }
        Command::ParsePlans => {
            let report = extract::run_parse_plans(config)?;
            display::print_plan_ranking(&report);
        }
        Command::ReadDrafts => {
            let report = drafts::run_read_drafts(config)?;
            display::print_draft_summary(&report);
        }
        Command::ExportPolicies => {
            let index = drafts::run_export_policies(config, today)?;
            display::print_library_index(&index);
        }
        Command::BuildMatrix => {
            let summary = reports::run_build_matrix(config, today)?;
            display::print_matrix_summary(&summary, &config.matrix_workbook());
        }
        Command::EnhanceDeliverables => {
            let enhanced = reports::run_enhance_deliverables(config, today)?;
            display::print_deliverables(&enhanced);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_map_onto_config() {
        let cli = Cli::try_parse_from(["compgov", "parse-plans"]).unwrap();
        assert!(matches!(cli.command, Command::ParsePlans));
        let config = Config::from(cli.paths);
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.plan_name_match, PlanNameMatch::Normalized);
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "compgov",
            "build-matrix",
            "--report-dir",
            "reports",
            "--plan-name-match",
            "exact",
        ])
        .unwrap();
        let config = Config::from(cli.paths);
        assert_eq!(config.report_dir, PathBuf::from("reports"));
        assert_eq!(config.plan_name_match, PlanNameMatch::Exact);
    }

    #[test]
    fn rejects_unknown_match_mode() {
        assert!(Cli::try_parse_from(["compgov", "parse-plans", "--plan-name-match", "fuzzy"]).is_err());
    }
}
