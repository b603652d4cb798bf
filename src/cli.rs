use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Show the open-source acknowledgements bundled with an app
#[derive(Parser, Debug)]
#[command(name = "acknowlist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log lookup and decoding details to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Collation locale for sorting titles (BCP-47, e.g. "fr")
    #[arg(long, global = true)]
    pub locale: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List acknowledgements found in an app's resources
    List {
        /// Resources directory to search
        #[arg(long, default_value = ".")]
        bundle: PathBuf,

        /// Settings-bundle names to load instead of the defaults (without .plist)
        #[arg(long = "plist")]
        plists: Vec<String>,
    },
    /// Show one acknowledgement's license text
    Show {
        /// Acknowledgement title
        title: String,

        /// Resources directory to search
        #[arg(long, default_value = ".")]
        bundle: PathBuf,

        /// Settings-bundle names to load instead of the defaults (without .plist)
        #[arg(long = "plist")]
        plists: Vec<String>,

        /// Fetch the license from GitHub when the entry has no text
        #[arg(long)]
        fetch: bool,
    },
    /// Decode a single .plist or Package.resolved file
    Decode {
        /// File to decode
        file: PathBuf,
    },
}
