mod debug;
mod view;

use clap::{Parser, Subcommand};
use resxgen::{GenerateResourcesCode, ResxDocument, traits::Parser as _};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::{debug::run_debug_command, view::print_view};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the SR accessor source file from a .resx file.
    Generate {
        /// The .resx file to read
        #[arg(short, long)]
        input: String,
        /// The source file to write; a `.vb` extension selects Visual Basic, anything else C#
        #[arg(short, long)]
        output: String,
        /// Assembly name used for the `FxResources.<assembly>.SR` marker type
        #[arg(short, long)]
        assembly_name: String,
        /// Always embed literal values and emit no DEBUGRESOURCES conditional block
        #[arg(long)]
        debug_only: bool,
    },

    /// View the entries of a .resx file.
    View {
        /// The input file to view
        #[arg(short, long)]
        input: String,

        /// Display full value without truncation
        #[arg(long)]
        full: bool,
    },

    /// Dump the parsed entries of a .resx file as JSON.
    Debug {
        /// The input file to read
        #[arg(short, long)]
        input: String,
        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_logging();
    let args = Args::parse();

    match args.commands {
        Commands::Generate {
            input,
            output,
            assembly_name,
            debug_only,
        } => {
            let task = GenerateResourcesCode::new(input, output, assembly_name)
                .with_debug_only(debug_only);
            if !task.execute() {
                std::process::exit(1);
            }
        }
        Commands::View { input, full } => match ResxDocument::read_from(&input) {
            Ok(document) => print_view(&document, full),
            Err(e) => {
                error!("Error reading {}: {}", input, e);
                std::process::exit(1);
            }
        },
        Commands::Debug { input, output } => run_debug_command(input, output),
    }
}
