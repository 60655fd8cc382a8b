//! CLI output formatting: highlighted JSON and small table helpers.

use std::fmt::Write;

use colored::Colorize;
use serde_json::Value;

/// Prints a JSON value pretty-printed with syntax highlighting.
///
/// Keys are cyan, strings green, numbers yellow, booleans and null magenta.
pub fn print_highlighted_json(value: &Value) {
    println!("{}", highlight_json(value));
}

/// Renders a JSON value like `serde_json::to_string_pretty`, with colors.
#[must_use]
pub fn highlight_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    // Writing to a String cannot fail.
    let _ = match value {
        Value::Null => write!(out, "{}", "null".magenta()),
        Value::Bool(flag) => write!(out, "{}", flag.to_string().magenta()),
        Value::Number(number) => write!(out, "{}", number.to_string().yellow()),
        Value::String(text) => write!(out, "{}", quote(text).green()),
        Value::Array(items) if items.is_empty() => write!(out, "[]"),
        Value::Object(map) if map.is_empty() => write!(out, "{{}}"),
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                indent(out, depth + 1);
                write_value(out, item, depth + 1);
                out.push_str(if i + 1 < items.len() { ",\n" } else { "\n" });
            }
            indent(out, depth);
            write!(out, "]")
        }
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                indent(out, depth + 1);
                let _ = write!(out, "{}: ", quote(key).cyan());
                write_value(out, item, depth + 1);
                out.push_str(if i + 1 < map.len() { ",\n" } else { "\n" });
            }
            indent(out, depth);
            write!(out, "}}")
        }
    };
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

/// Truncates a string to at most `max_chars` characters, ending in an
/// ellipsis when shortened.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 1 {
        return "…".to_string();
    }

    let kept: String = s.chars().take(max_chars - 1).collect();
    format!("{kept}…")
}

/// Formats a boolean as a colored check mark or cross.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value { "✓".green().to_string() } else { "✗".red().to_string() }
}
