use resxgen::ResxDocument;
use std::collections::HashSet;

const TRUNCATE_AT: usize = 50;

/// Print a view of the entries in a resource document.
pub fn print_view(document: &ResxDocument, full: bool) {
    let duplicates = document.duplicates().len();
    println!("Entries: {}", document.len());
    println!("Members: {}", document.len() - duplicates);
    if duplicates > 0 {
        println!("Duplicates: {} (ignored during generation)", duplicates);
    }

    let mut seen = HashSet::new();
    for (i, entry) in document.iter().enumerate() {
        let first = seen.insert(entry.key.as_str());
        if first {
            println!("\n  Entry {}: {}", i + 1, entry.key);
        } else {
            println!("\n  Entry {}: {} (duplicate, ignored)", i + 1, entry.key);
        }

        if full || entry.raw_value.chars().count() <= TRUNCATE_AT {
            println!("    Value: {}", entry.raw_value);
        } else {
            let truncated: String = entry.raw_value.chars().take(TRUNCATE_AT).collect();
            println!("    Value: {}...", truncated);
        }
    }
}
