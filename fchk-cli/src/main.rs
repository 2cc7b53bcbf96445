use std::{path::PathBuf, time::Instant};

use anyhow::Context;
use clap::Parser;
use fchk_core::{config, fchk::FchkExport};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// A path to the wavefunction JSON to export
    #[arg(long, short)]
    wavefunction: PathBuf,
    /// Where to write the formatted checkpoint file
    #[arg(long, short)]
    output: PathBuf,
    /// Document title, the first line of the checkpoint
    #[arg(long, default_value = "formatted checkpoint export")]
    title: String,
    /// Calculation type field of the method line
    #[arg(long, default_value = "SP")]
    calc_type: String,
    /// Method field of the method line
    #[arg(long, default_value = "SCF")]
    method: String,
    /// Basis label field of the method line
    #[arg(long, default_value = "Gen")]
    basis_label: String,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args: Args = Args::parse();

    let wavefunction = config::load_wavefunction(&args.wavefunction)
        .map_err(|error| anyhow::anyhow!("{error}"))
        .with_context(|| format!("loading {}", args.wavefunction.display()))?;
    log::info!(
        "loaded wavefunction: {} atoms, {} electrons",
        wavefunction.atoms.len(),
        wavefunction.n_electrons()
    );

    let start = Instant::now();
    let export = FchkExport {
        wavefunction: &wavefunction,
        title: args.title,
        calc_type: args.calc_type,
        method: args.method,
        basis_label: args.basis_label,
    };
    export
        .write_to(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("wrote {} in {:0.2?}", args.output.display(), start.elapsed());

    Ok(())
}
