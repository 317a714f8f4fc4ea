// Sat Oct 17 2026 - Alex

use colored::Colorize;

fn main() {
    if let Err(e) = edid_patcher::ui::cli::run() {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}
