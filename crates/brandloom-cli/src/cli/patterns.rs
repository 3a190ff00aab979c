//! List the pattern tags.

use brandloom::PatternTag;

pub fn cmd_patterns() {
    println!("Available patterns:");
    for tag in PatternTag::all() {
        let meta = tag.metadata();
        let stub = if tag.is_stub() { " (stub)" } else { "" };
        println!("  {:<34} {}{} - {}", tag.name(), meta.label, stub, meta.description);
    }
}
