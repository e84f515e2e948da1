use clap::{Parser, Subcommand};
use genes_detective::BoundsSpec;
use genes_detective::options::DEFAULT_OUTPUT_DIR;
use genes_detective::seq::Operation;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(
    version = VERSION,
    about = "sequence tools and a GC/length/quality FASTQ filter",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Keep only the FASTQ records that pass every filter
    #[command(arg_required_else_help = true)]
    Filter {
        /// the input .fastq (or .fastq.gz)
        input: String,

        /// name of the output file; a `.gz` name gives gzip output
        #[arg(short, long)]
        output: String,

        /// directory the output file is written to
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        out_dir: String,

        /// GC content bounds in percent, inclusive.
        /// a single value MAX means 0..MAX; a range is MIN,MAX or MIN..MAX.
        #[arg(long, default_value = "0,100", verbatim_doc_comment)]
        gc: BoundsSpec,

        /// sequence length bounds, same forms as --gc
        #[arg(long, default_value = "0,2147483647")]
        length: BoundsSpec,

        /// minimum mean Phred quality
        #[arg(short, long, default_value_t = 0.0)]
        quality: f64,
    },

    /// Apply a DNA/RNA operation to each sequence:
    ///   reverse, complement, reverse_complement, transcribe,
    ///   search_start_codon_in_rna, search_first_stop_codon_in_rna
    #[command(arg_required_else_help = true, verbatim_doc_comment)]
    Tools {
        operation: Operation,

        #[arg(required = true)]
        seqs: Vec<String>,
    },

    /// Print the 1-based positions of a motif in a protein sequence
    #[command(arg_required_else_help = true)]
    Motif { protein: String, motif: String },
}
