//! Print the operator catalog, one group per block. `--json` prints the
//! entries as a JSON array instead.
use std::env;
use vision_lab::{OperatorCatalog, OperatorGroup};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let catalog = OperatorCatalog::new();
    if env::args().nth(1).as_deref() == Some("--json") {
        let json = serde_json::to_string_pretty(catalog.entries())
            .map_err(|e| format!("Failed to serialize catalog: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let mut current: Option<OperatorGroup> = None;
    for entry in catalog.entries() {
        if current != Some(entry.group) {
            if current.is_some() {
                println!();
            }
            println!("{}:", entry.group.label());
            current = Some(entry.group);
        }
        println!("  {:<16} {}", entry.name, entry.label);
    }
    Ok(())
}
