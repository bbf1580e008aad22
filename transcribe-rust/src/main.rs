use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use tracing::{debug, info};

use transcribe_rust::io::{self, fasta::FastaRecord};
use transcribe_rust::logging;
use transcribe_rust::table::{self, CodonIndex, IndexMeta};
use transcribe_rust::transcribe::{self, TranscribeOpt};

/// demo 子命令使用的样例序列
const SAMPLE_SEQUENCES: [&str; 5] = [
    "ATGAGGAGACGGCGATAA",
    "AAAAAAAA",
    "ATGAGGAGACGGCGA",
    "AAAAAAATGGCTGCCGCAGCGTAGAAAAAAA",
    "ATGAGGAGACGGCGXTAA",
];

#[derive(Parser, Debug)]
#[command(name = "transcribe-rust", author, version, about = "Translate DNA into amino-acid codes using a codon table", arg_required_else_help = true)]
struct Cli {
    /// Debug logging (overrides TRANSCRIBE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a codon table and compile it into an index file
    Index {
        /// Codon table text file
        table: String,
        /// Output prefix for the index file
        #[arg(short, long, default_value = "codons")]
        output: String,
    },
    /// Transcribe sequences
    Run {
        /// Sequences to transcribe
        sequences: Vec<String>,
        /// FASTA file or plain file with one sequence per line
        #[arg(short, long)]
        file: Option<String>,
        /// Codon table text file (built-in standard table if omitted)
        #[arg(long, conflicts_with = "index")]
        table: Option<String>,
        /// Compiled codon index (.cdx)
        #[arg(short = 'i', long = "index")]
        index: Option<String>,
        /// Output path (stdout if omitted)
        #[arg(short, long)]
        out: Option<String>,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
    /// Transcribe the built-in sample sequences with the standard table
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;
    match cli.command {
        Commands::Index { table, output } => run_index(&table, &output),
        Commands::Run { sequences, file, table, index, out, threads } => {
            let opt = TranscribeOpt { threads };
            let codon_index = resolve_index(table.as_deref(), index.as_deref())?;
            run_transcribe(&codon_index, sequences, file.as_deref(), out.as_deref(), opt)
        }
        Commands::Demo => {
            let codon_index = table::standard()?;
            let sequences = SAMPLE_SEQUENCES.iter().map(|s| s.to_string()).collect();
            run_transcribe(&codon_index, sequences, None, None, TranscribeOpt::default())
        }
    }
}

fn run_index(table_path: &str, output: &str) -> Result<()> {
    let mut idx = table::load_from_path(table_path)?;
    idx.set_meta(IndexMeta {
        table_file: Some(table_path.to_string()),
        build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
    });

    println!("table: {}", table_path);
    println!("codons: {}", idx.len());
    println!("start codon: {}", idx.start_codon());
    let mut stops: Vec<&str> = idx.stop_codons().iter().map(String::as_str).collect();
    stops.sort_unstable();
    println!("stop codons: {}", stops.join(","));

    let out_path = format!("{}.cdx", output);
    idx.save_to_file(&out_path)
        .map_err(|e| anyhow::anyhow!("cannot write index to '{}': {}", out_path, e))?;
    println!("codon index saved: {}", out_path);
    Ok(())
}

fn resolve_index(table_path: Option<&str>, index_path: Option<&str>) -> Result<CodonIndex> {
    let idx = match (table_path, index_path) {
        (_, Some(p)) => {
            let idx = CodonIndex::load_from_file(p)?;
            debug!(path = p, built = ?idx.meta().build_timestamp, "codon index loaded");
            idx
        }
        (Some(p), None) => table::load_from_path(p)?,
        (None, None) => table::standard()?,
    };
    Ok(idx)
}

fn run_transcribe(
    index: &CodonIndex,
    sequences: Vec<String>,
    file: Option<&str>,
    out_path: Option<&str>,
    opt: TranscribeOpt,
) -> Result<()> {
    let mut records: Vec<FastaRecord> = sequences
        .into_iter()
        .enumerate()
        .map(|(i, seq)| FastaRecord { id: format!("arg{}", i + 1), desc: None, seq })
        .collect();
    if let Some(p) = file {
        records.extend(io::read_sequences_from_path(p)?);
    }
    if records.is_empty() {
        anyhow::bail!("no sequences given; pass them as arguments or with --file");
    }
    info!(sequences = records.len(), start = index.start_codon(), "transcribing");

    let seqs: Vec<&str> = records.iter().map(|r| r.seq.as_str()).collect();
    let outcomes = transcribe::transcribe_batch(&seqs, index, opt)?;

    let mut out_box: Box<dyn Write> = if let Some(p) = out_path {
        let fh = std::fs::File::create(p)
            .map_err(|e| anyhow::anyhow!("cannot create output '{}': {}", p, e))?;
        Box::new(std::io::BufWriter::new(fh))
    } else {
        Box::new(std::io::BufWriter::new(std::io::stdout()))
    };
    transcribe::write_report(&mut out_box, &records, &outcomes)
}
