use resxgen::{ResxDocument, traits::Parser};
use std::fs::File;
use std::io::Write;
use tracing::{error, info};

/// Run the debug command: read a resource file and output its entries as JSON.
pub fn run_debug_command(input: String, output: Option<String>) {
    let document = ResxDocument::read_from(&input).unwrap_or_else(|e| {
        error!("Error reading {}: {}", input, e);
        std::process::exit(1);
    });

    let json = serde_json::to_string_pretty(&document).unwrap_or_else(|e| {
        error!("Error serializing to JSON: {}", e);
        std::process::exit(1);
    });

    match output {
        Some(output_path) => {
            if let Err(e) =
                File::create(&output_path).and_then(|mut f| f.write_all(json.as_bytes()))
            {
                error!("Error writing to {}: {}", output_path, e);
                std::process::exit(1);
            }
            info!("Debug output written to: {}", output_path);
        }
        None => println!("{}", json),
    }
}
