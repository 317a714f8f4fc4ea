// Sat Oct 17 2026 - Alex

pub mod args;
pub mod handler;

pub use args::{Args, BatchArgs, Command, OverrideArgs, PatchArgs};
pub use handler::CommandHandler;

use clap::Parser;

pub fn parse_args() -> Args {
    Args::parse()
}

pub fn run() -> anyhow::Result<()> {
    let args = parse_args();
    let handler = CommandHandler::with_formatter(CommandHandler::formatter_for(&args));
    handler.execute(args)
}
