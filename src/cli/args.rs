use std::path::PathBuf;

use clap::Parser;

pub const STDIN_MARKER: &str = "-";

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Terraform plan JSON (`terraform show -json`), or `-` for stdin
    #[arg(short, long, default_value = "tfplan.json")]
    pub input: PathBuf,

    /// Configuration file; defaults to `.tftldr.yml` when present
    #[arg(short, long, env = "TFTLDR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also export the changes to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == STDIN_MARKER
    }
}
