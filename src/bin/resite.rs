use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use resite::{
    enzymes::SiteTable,
    find_restriction_sites,
    report::{write_json_report, write_text_report},
    scan::ScanConfig,
};
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::PathBuf,
};

/// Given a FASTA or FASTQ file, list the restriction sites in each sequence
/// together with their positions.
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// FASTA or FASTQ input file
    #[clap(short = 'i', value_name = "INFILE")]
    infile: PathBuf,

    /// Output file (default: stdout)
    #[clap(short = 'o', value_name = "OUTFILE")]
    outfile: Option<PathBuf>,

    /// Comma-separated key phrases to look for in headers, or exact,NAME for
    /// one specific header. Case insensitive. Default: all headers
    #[clap(short = 'k', value_name = "KEYWORD", default_value = ">")]
    keyword: String,

    /// Comma-separated (partial) enzyme names, eg eco for EcoRI and EcoRV.
    /// Case insensitive. "all" searches every enzyme
    #[clap(short = 'z', value_name = "ENZYMES", default_value = "all")]
    enzymes: String,

    /// Tab-separated restriction site table (pattern, enzyme name).
    /// Default: the bundled table
    #[clap(short = 'r', value_name = "RESTRICTION SITES TSV")]
    rsites: Option<PathBuf>,

    /// Write the matches as JSON instead of the text report
    #[clap(long)]
    json: bool,

    /// Log progress to stderr
    #[clap(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    if let Err(e) = run(&args) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = ScanConfig::new(&args.keyword, &args.enzymes);

    let table = match &args.rsites {
        Some(path) => SiteTable::from_path(path).context("Could not load restriction sites")?,
        None => SiteTable::active().context("Could not load the restriction site override")?,
    };
    info!("{} restriction sites before complements", table.len());

    let text = fs::read_to_string(&args.infile)
        .with_context(|| format!("Could not read input '{}'", args.infile.display()))?;
    let report = find_restriction_sites(&text, &table, &config);

    let mut out: Box<dyn Write> = match &args.outfile {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Could not create output '{}'", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    if args.json {
        write_json_report(&mut out, &report)?;
    } else {
        write_text_report(&mut out, &report)?;
    }
    out.flush().context("Could not write output")?;
    Ok(())
}
