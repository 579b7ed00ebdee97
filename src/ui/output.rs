use crate::ui::theme;
use owo_colors::OwoColorize;

/// The few icons this CLI actually prints.
pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const DATABASE: &str = "🗄️";
    pub const GEAR: &str = "⚙️";
}

pub fn header(text: &str) {
    println!("{} {}", Icons::ROCKET, text.style(theme().header.clone()));
}

/// The target-database line both commands print before touching it.
pub fn database(url: &str) {
    println!(
        "{} {}: {}",
        Icons::DATABASE,
        "Database".style(theme().dim.clone()),
        url
    );
}

/// A labeled count, e.g. how many records the input file holds.
pub fn count(label: &str, n: usize) {
    println!(
        "{} {}",
        format!("{label}:").style(theme().dim.clone()),
        n.style(theme().info.clone())
    );
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn phase(name: &str) {
    println!();
    println!(
        "{} {}",
        Icons::GEAR.style(theme().info.clone()),
        name.style(theme().header.clone())
    );
}
