// Sat Oct 17 2026 - Alex

pub mod cli;

pub use cli::{Args, Command, CommandHandler};

use colored::Colorize;

pub fn print_info(message: &str) {
    println!("{} {}", "[*]".blue(), message);
}

pub fn print_success(message: &str) {
    println!("{} {}", "[+]".green(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "[!]".yellow(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "[!]".red(), message);
}
