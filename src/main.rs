use anyhow::Result;
use clap::Parser;
use log::{error, info};

use genes_detective::seq::{find_motif, run_operation};
use genes_detective::{Destination, FilterOptions, filter_fastq};

mod cli;

use cli::{Cli, Commands};

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Filter {
            input,
            output,
            out_dir,
            gc,
            length,
            quality,
        } => {
            let opts = FilterOptions {
                gc_bounds: gc,
                length_bounds: length,
                quality_threshold: quality,
            };
            let dest = Destination::new(out_dir, output);
            let kept = filter_fastq(&input, &dest, &opts)?;
            info!("Wrote {kept} records to {}", dest.path().display());
        }
        Commands::Tools { operation, seqs } => {
            for (seq, res) in seqs.iter().zip(run_operation(operation, &seqs)) {
                match res {
                    Ok(out) => println!("{out}"),
                    Err(e) => println!("{seq}: {e}"),
                }
            }
        }
        Commands::Motif { protein, motif } => {
            let hits = find_motif(protein.as_bytes(), motif.as_bytes())?;
            if hits.is_empty() {
                println!("no match");
            } else {
                let hits: Vec<String> = hits.iter().map(usize::to_string).collect();
                println!("{}", hits.join(" "));
            }
        }
    }
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));
        std::process::exit(1);
    }
}
