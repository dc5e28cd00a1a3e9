//! Output formatting utilities for the CLI.

use serde::Serialize;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Bulleted list under a heading, or just the heading's empty form.
pub fn bullet_list(heading: &str, items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    let mut lines = vec![format!("{heading} ({}):", items.len())];
    lines.extend(items.iter().map(|item| format!("  - {item}")));
    lines.join("\n")
}
