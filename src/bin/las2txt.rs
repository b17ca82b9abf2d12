use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use las2txt::{ConversionConfig, Converter};
use log::{info, LevelFilter};

#[derive(Parser)]
#[command(author, version, about = "Converts LAS/LAZ point clouds into a single XYZRGBUV text file", long_about = None)]
struct Args {
    #[arg(
        help = "Input LAS/LAZ files, converted in the given order. Directories are searched recursively for LAS and LAZ files"
    )]
    inputs: Vec<PathBuf>,
    #[arg(short, long, help = "Path of the text file to write. Existing files are overwritten")]
    output: Option<PathBuf>,
    #[arg(
        short,
        long,
        help = "JSON file with `inputs`, `output` and `write_header`. Command line arguments take precedence"
    )]
    config: Option<PathBuf>,
    #[arg(long, help = "Write \"X Y Z R G B U V\" as the first line of the output")]
    header: bool,
}

fn init_logging() {
    if std::env::var_os("RUST_LOG").is_some() {
        pretty_env_logger::init();
    } else {
        pretty_env_logger::formatted_builder()
            .filter_level(LevelFilter::Info)
            .init();
    }
}

fn make_config(args: Args) -> Result<ConversionConfig> {
    let mut config = match args.config {
        Some(path) => ConversionConfig::from_path(&path)?,
        None => ConversionConfig::default(),
    };
    if !args.inputs.is_empty() {
        config.inputs = args.inputs;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    config.write_header |= args.header;
    Ok(config)
}

fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let config = make_config(args)?;
    let input_files = config.input_files()?;
    if input_files.is_empty() {
        bail!("No input files found");
    }

    info!("Converting {} files", input_files.len());
    let summary = Converter::default()
        .with_header(config.write_header)
        .run(&input_files, &config.output)
        .with_context(|| format!("Conversion into {} failed", config.output.display()))?;

    info!("Wrote {} points", summary.points);
    println!("All files exported to: {}", summary.output.display());

    Ok(())
}
