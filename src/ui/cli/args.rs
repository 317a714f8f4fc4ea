// Sat Oct 17 2026 - Alex

use crate::patch::OverrideFlag;
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "edid-patcher")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Decode EDID blobs and compute display override patches", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Raise the log level; -v for debug, -vv for trace. Wins over --log-level.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print reports as JSON instead of text.
    #[arg(long = "json", global = true)]
    pub json_output: bool,

    /// Leave the decoded EDID summary out of text reports.
    #[arg(long, global = true)]
    pub no_summary: bool,

    /// Leave the hex diff marker out of text reports.
    #[arg(long, global = true)]
    pub no_diff: bool,

    #[arg(long, global = true, default_value_t = 16, value_name = "N")]
    pub bytes_per_row: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Patch a single display's EDID.
    Patch(PatchArgs),
    /// Patch every display listed in a JSON file.
    Batch(BatchArgs),
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Override to apply; repeat for several. Replaces the config's list.
    #[arg(short = 'o', long = "override", value_name = "FLAG")]
    pub overrides: Vec<OverrideFlag>,

    /// JSON file with a patch configuration.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep zeroed extension blocks in the emitted EDID.
    #[arg(long)]
    pub full_edid: bool,

    /// Single-line JSON output.
    #[arg(long)]
    pub compact: bool,
}

#[derive(ClapArgs, Debug)]
pub struct PatchArgs {
    /// EDID as a hex string.
    #[arg(short, long, conflicts_with = "input")]
    pub edid: Option<String>,

    /// File holding the EDID hex string.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[arg(long, default_value = "0", value_parser = parse_id)]
    pub vendor_id: u32,

    #[arg(long, default_value = "0", value_parser = parse_id)]
    pub product_id: u32,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

impl PatchArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.edid.is_none() && self.input.is_none() {
            return Err("either --edid or --input is required".to_string());
        }
        Ok(())
    }
}

#[derive(ClapArgs, Debug)]
pub struct BatchArgs {
    /// JSON array of {edid, vendor_id, product_id} entries.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Process displays one after another.
    #[arg(long)]
    pub sequential: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Accepts decimal or `0x`-prefixed hex.
pub fn parse_id(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid id '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("4268"), Ok(4268));
        assert_eq!(parse_id("0x10AC"), Ok(0x10ac));
        assert!(parse_id("0xZZ").is_err());
    }

    #[test]
    fn test_patch_with_repeated_overrides() {
        let args = Args::try_parse_from([
            "edid-patcher",
            "patch",
            "--edid",
            "00FF",
            "--override",
            "set_rgb444",
            "-o",
            "NO-EXTENSIONS",
            "--vendor-id",
            "0x10ac",
            "--json",
        ])
        .unwrap();
        assert!(args.json_output);
        match args.command {
            Command::Patch(p) => {
                assert_eq!(
                    p.overrides.overrides,
                    vec![OverrideFlag::SetRgb444, OverrideFlag::NoExtensions]
                );
                assert_eq!(p.vendor_id, 0x10ac);
                assert!(p.validate().is_ok());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_report_options() {
        let args = Args::try_parse_from([
            "edid-patcher", "batch", "-i", "displays.json", "-vv", "--no-diff", "--bytes-per-row", "8",
            "--compact",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert!(args.no_diff);
        assert!(!args.no_summary);
        assert_eq!(args.bytes_per_row, 8);
        match args.command {
            Command::Batch(b) => assert!(b.overrides.compact),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_override_is_rejected() {
        let result = Args::try_parse_from(["edid-patcher", "patch", "--edid", "00", "-o", "NO_SUCH"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_requires_a_source() {
        let args = Args::try_parse_from(["edid-patcher", "patch"]).unwrap();
        match args.command {
            Command::Patch(p) => assert!(p.validate().is_err()),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_edid_and_input_conflict() {
        let result = Args::try_parse_from([
            "edid-patcher", "patch", "--edid", "00", "--input", "edid.hex",
        ]);
        assert!(result.is_err());
    }
}
