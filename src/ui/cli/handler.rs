// Sat Oct 17 2026 - Alex

use super::args::{Args, BatchArgs, Command, OverrideArgs, PatchArgs};
use crate::config::PatchConfig;
use crate::output::{ReportFormatter, ReportSerializer};
use crate::pipeline::{process_display, BatchProcessor, BatchReport, DisplayIds, DisplayInput, DisplayReport};
use crate::ui::{print_error, print_info, print_success, print_warning};
use crate::utils::{pluralize, LoggingUtils};
use anyhow::Context;
use colored::Colorize;
use std::fs;

pub struct CommandHandler {
    formatter: ReportFormatter,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            formatter: ReportFormatter::new(),
        }
    }

    pub fn with_formatter(formatter: ReportFormatter) -> Self {
        Self { formatter }
    }

    /// Text formatter shaped by the global report options.
    pub fn formatter_for(args: &Args) -> ReportFormatter {
        ReportFormatter::new()
            .with_summary(!args.no_summary)
            .with_diff(!args.no_diff)
            .with_bytes_per_row(args.bytes_per_row)
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args);

        match &args.command {
            Command::Patch(patch_args) => self.handle_patch(patch_args, &args),
            Command::Batch(batch_args) => self.handle_batch(batch_args, &args),
        }
    }

    fn setup_logging(&self, args: &Args) {
        if args.no_color {
            colored::control::set_override(false);
        }
        let level = LoggingUtils::effective_level(&args.log_level, args.verbose, args.quiet);
        LoggingUtils::init_logger(level, !args.no_color);
    }

    /// Config file first, then command-line overrides on top.
    pub fn resolve_config(&self, args: &OverrideArgs) -> anyhow::Result<PatchConfig> {
        let mut config = match &args.config {
            Some(path) => PatchConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => PatchConfig::default(),
        };
        if !args.overrides.is_empty() {
            config = config.with_overrides(args.overrides.iter().copied());
        }
        if args.full_edid {
            config = config.with_full_edid(true);
        }
        if args.compact {
            config = config.with_pretty_json(false);
        }
        config.validate()?;
        Ok(config)
    }

    fn handle_patch(&self, args: &PatchArgs, global: &Args) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let config = self.resolve_config(&args.overrides)?;

        let edid = match (&args.edid, &args.input) {
            (Some(hex), _) => hex.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => anyhow::bail!("no EDID given"),
        };
        let input = DisplayInput::new(edid.trim(), DisplayIds::new(args.vendor_id, args.product_id));

        let report = process_display(&input, &config).context("Failed to process EDID")?;

        if global.json_output {
            let serializer = ReportSerializer::new().with_pretty_print(config.pretty_json);
            print!("{}", serializer.serialize(&report)?);
        } else {
            self.print_report(&report, global.quiet);
        }
        Ok(())
    }

    fn handle_batch(&self, args: &BatchArgs, global: &Args) -> anyhow::Result<()> {
        let config = self.resolve_config(&args.overrides)?;
        let text = fs::read_to_string(&args.input)
            .with_context(|| format!("Failed to read {}", args.input.display()))?;
        let displays: Vec<DisplayInput> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", args.input.display()))?;

        if !global.quiet && !global.json_output {
            print_info(&format!("Processing {}", pluralize(displays.len(), "display", "displays")));
        }

        let pretty = config.pretty_json;
        let batch = BatchProcessor::new(config)
            .with_parallel(!args.sequential)
            .run(&displays);

        if global.json_output {
            let serializer = ReportSerializer::new().with_pretty_print(pretty);
            print!("{}", serializer.serialize(&batch)?);
        } else {
            self.print_batch(&batch, global.quiet);
        }

        if !batch.is_clean() {
            anyhow::bail!(
                "{} of {} failed",
                pluralize(batch.failures.len(), "display", "displays"),
                batch.total()
            );
        }
        Ok(())
    }

    fn print_report(&self, report: &DisplayReport, quiet: bool) {
        if quiet {
            println!("{}", report.patched_hex);
            return;
        }
        println!("{}", self.formatter.format_report(report));
        if report.patches.is_empty() {
            print_info("EDID unchanged");
        } else {
            print_success(&format!(
                "{} from {}",
                pluralize(report.patches.len(), "patch", "patches"),
                report
                    .applied
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        for skipped in &report.skipped {
            print_warning(&format!("{} skipped: {}", skipped.flag, skipped.reason));
        }
        if !report.checksum_mismatches.is_empty() {
            print_warning(&format!(
                "Input checksum mismatch in block(s) {:?}",
                report.checksum_mismatches
            ));
        }
    }

    fn print_batch(&self, batch: &BatchReport, quiet: bool) {
        for report in &batch.reports {
            if !quiet {
                println!("{}", "=".repeat(50).cyan());
            }
            self.print_report(report, quiet);
        }
        for failure in &batch.failures {
            print_error(&failure.to_string());
        }
        if !quiet {
            print_success(&format!(
                "{} of {} processed",
                pluralize(batch.reports.len(), "display", "displays"),
                batch.total()
            ));
        }
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
