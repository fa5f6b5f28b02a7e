use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "relock", about = "pnpm lockfile upkeep for a pinned project checkout")]
pub struct Cli {
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a fresh pnpm-lock.yaml (bounded at 120 seconds)
    Create,
    /// Regenerate pnpm-lock.yaml with a plain install
    Regenerate,
    /// Install dependencies, falling back to npm when pnpm is missing
    Install,
}
