use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::style;
use lyra_core::names::StarNames;

#[derive(Args)]
pub struct NamesArgs {
    /// Star-name table to load (built-in catalog names when omitted)
    pub file: Option<PathBuf>,

    /// Show the first N catalog indices only
    #[arg(long, default_value = "20")]
    pub top: usize,
}

/// Dump the star-name table as the session will resolve it, shifted lookup
/// included, for eyeballing which name each catalog index maps to.
pub fn run(args: &NamesArgs) -> Result<()> {
    let names = match &args.file {
        Some(path) => StarNames::load(path)?,
        None => StarNames::builtin(),
    };

    println!("{} rows loaded", names.len());
    println!("{:>7}  Name", style("Catalog").bold());
    println!("{}", "-".repeat(30));

    for catalog_index in 0..args.top {
        match names.get(catalog_index) {
            Some(name) => println!("{catalog_index:>7}  {name}"),
            None => break,
        }
    }

    Ok(())
}
