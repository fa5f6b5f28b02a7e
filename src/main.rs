mod cli;
mod commands;
mod config;
mod pm;
mod testutil;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_default_config()?;

    match cli.command {
        Command::Create => {
            let result =
                commands::cmd_create(&config.project_dir, commands::LOCKFILE_TIMEOUT)?;
            let ok = result.succeeded();
            output(&result, cli.json, commands::format_create_human)?;
            if !ok {
                std::process::exit(1);
            }
        }
        Command::Regenerate => {
            let result = commands::cmd_regenerate(&config.project_dir)?;
            let ok = result.succeeded();
            output(&result, cli.json, commands::format_regenerate_human)?;
            if !ok {
                std::process::exit(1);
            }
        }
        Command::Install => {
            let result = commands::cmd_install(&config.project_dir)?;
            let ok = result.succeeded();
            output(&result, cli.json, commands::format_install_human)?;
            if !ok {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn output<T: serde::Serialize>(result: &T, json: bool, human_fn: fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        let text = human_fn(result);
        if !text.is_empty() {
            println!("{}", text);
        }
    }
    Ok(())
}
