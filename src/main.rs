use clap::Parser;
use quotedoc::config::{self, AssemblerConfig};
use quotedoc::{QuoteAssembler, QuoteError, QuoteRequest};
use std::fs;
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Generates the XLSX and PDF documents for one quote request.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the quote request JSON
    request: PathBuf,

    /// Directory the documents are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// File name (without extension) of both documents
    #[arg(long, default_value = "presupuesto")]
    stem: String,

    /// Directory the logo and watermark paths are resolved against
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Assembler configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Issuer profile JSON; overrides the issuer from --config
    #[arg(long)]
    issuer: Option<PathBuf>,

    /// Print `{ "excel": ..., "pdf": ... }` with base64 contents instead of writing files
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<(), QuoteError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("quotedoc=info"))
        .init();

    let args = Args::parse();

    let mut assembler_config = match &args.config {
        Some(path) => AssemblerConfig::from_json_file(path)?,
        None => AssemblerConfig::default(),
    };
    if let Some(path) = &args.issuer {
        assembler_config = assembler_config.with_issuer(config::load_issuer(path)?);
    }

    let request: QuoteRequest = serde_json::from_str(&fs::read_to_string(&args.request)?)?;
    log::debug!("loaded request with {} item(s)", request.items.len());

    let assembler = QuoteAssembler::builder()
        .with_config(assembler_config)
        .with_assets_dir(&args.assets)
        .build()?;

    let artifacts = assembler.assemble(&request)?;

    if args.json {
        println!("{}", serde_json::to_string(&artifacts.to_envelope())?);
    } else {
        let (sheet, document) = artifacts.write_to_dir(&args.out_dir, &args.stem)?;
        log::info!("wrote {} and {}", sheet.display(), document.display());
    }
    Ok(())
}
