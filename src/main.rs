#![deny(rust_2018_idioms)]

mod cli;
mod publish;

use clap::{CommandFactory, Parser};
use cli::{Cli, Command, Format};
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use rpmprops_spec::{PropertyStore, SpecParser};
use std::io::Write;
use std::path::Path;
use tracing::debug;
use tracing_log::AsTrace;

fn parse(spec: &Path) -> Result<PropertyStore> {
    SpecParser::new(spec)
        .parse()
        .wrap_err_with(|| format!("Cannot read properties from {}", spec.display()))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // set up logging according to verbosity level
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(cli.verbose.log_level_filter().as_trace())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    match cli.command {
        Command::Props { specs, prefix, format } => {
            let mut out = std::io::stdout().lock();
            for spec in &specs {
                let props = parse(spec)?;
                debug!(spec = %spec.display(), keys = props.len(), "parsed");
                match format {
                    Format::Properties => {
                        publish::write_properties(&mut out, &publish::publish(&props, &prefix))?;
                    }
                    Format::Json => {
                        let doc = serde_json::json!({
                            "spec": spec.display().to_string(),
                            "prefix": prefix,
                            "properties": props,
                        });
                        serde_json::to_writer_pretty(&mut out, &doc)?;
                        writeln!(out)?;
                    }
                }
            }
        }
        Command::Get { spec, key, all } => {
            let props = parse(&spec)?;
            if all {
                let values = props.get_all(&key);
                if values.is_empty() {
                    return Err(eyre!("`{key}` is not set in {}", spec.display()));
                }
                for value in values {
                    println!("{value}");
                }
            } else {
                let value = props
                    .get(&key)?
                    .ok_or_else(|| eyre!("`{key}` is not set in {}", spec.display()))?;
                println!("{value}");
            }
        }
        Command::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "rpmprops", &mut std::io::stdout());
        }
    }
    Ok(())
}
