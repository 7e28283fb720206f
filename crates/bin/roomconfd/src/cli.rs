//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "roomconfd",
    version,
    about = "Compile smart-room spreadsheet sections into a room configuration"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: `roomconf.toml` in the working directory, if present).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a sections file and export the configuration document.
    Compile(CompileArgs),

    /// Run the device step only and list the identified devices.
    Check(CheckArgs),

    /// Serve the HTTP API.
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// JSON file holding the split sections.
    #[arg(value_name = "SECTIONS")]
    pub sections: PathBuf,

    /// Where to write the document (overrides `output.path`).
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// JSON file holding the split sections.
    #[arg(value_name = "SECTIONS")]
    pub sections: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides `server.host` and `server.port`).
    #[arg(long, value_name = "HOST:PORT")]
    pub bind: Option<String>,
}
