use clap::{Parser, ValueEnum};
use image::ImageReader;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tabletscan::debug::DebugConfig;
use tabletscan::matching::feature::DEFAULT_ACCEPTANCE_THRESHOLD;
use tabletscan::{
    DetectionPipeline, ExtractorConfig, FeatureMatchPolicy, MatchPolicy, Outcome, Record,
    RecordStore, StubPolicy,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyKind {
    /// Picks an arbitrary known record (not a classifier)
    Stub,
    /// Compares region appearance with reference images
    Feature,
}

#[derive(Parser)]
#[command(name = "tabletscan")]
#[command(about = "Detect tablets in a photo and look up the matching medication")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE", required_unless_present = "name")]
    image_path: Option<PathBuf>,

    /// CSV file with name,indication,dosage,side_effects columns
    #[arg(short, long, value_name = "FILE")]
    records: PathBuf,

    /// Look a medication up by name instead of analysing an image
    #[arg(short, long, conflicts_with = "image_path")]
    name: Option<String>,

    /// How detected regions are matched to records
    #[arg(long, value_enum, default_value_t = PolicyKind::Stub)]
    policy: PolicyKind,

    /// Directory of <name>.png|jpg reference images (feature policy)
    #[arg(long, value_name = "DIR", required_if_eq("policy", "feature"))]
    references: Option<PathBuf>,

    /// Minimum similarity for a feature match
    #[arg(long, default_value_t = DEFAULT_ACCEPTANCE_THRESHOLD)]
    accept: f32,

    /// Seed for the stub policy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// JSON file with extractor settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save intermediate images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tabletscan=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tabletscan=info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_record(record: &Record) {
    println!("Name: {}", record.name);
    println!("Indication: {}", record.indication);
    println!("Dosage: {}", record.dosage);
    println!("Side Effects: {}", record.side_effects);
}

fn manual_lookup(store: &RecordStore, name: &str) {
    if name.trim().is_empty() {
        println!("Please enter a medication.");
        return;
    }
    match store.lookup(name) {
        Some(record) => print_record(record),
        None => println!("Medication information not available for the entered medication."),
    }
}

fn build_policy(args: &Cli, store: &RecordStore) -> anyhow::Result<Box<dyn MatchPolicy>> {
    Ok(match args.policy {
        PolicyKind::Stub => Box::new(StubPolicy::from_store(store).with_seed(args.seed)),
        PolicyKind::Feature => {
            let dir = args
                .references
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("--references is required for the feature policy"))?;
            Box::new(FeatureMatchPolicy::from_reference_dir(dir, store, args.accept)?)
        }
    })
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let store = RecordStore::from_csv_path(&args.records)?;
    info!("Loaded {} records", store.len());

    if let Some(name) = &args.name {
        manual_lookup(&store, name);
        return Ok(());
    }

    let image_path = args
        .image_path
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("an IMAGE or --name is required"))?;

    let config = match &args.config {
        Some(path) => ExtractorConfig::from_json_file(path)?,
        None => ExtractorConfig::default(),
    };
    let pipeline = DetectionPipeline::new(config, build_policy(&args, &store)?)?;

    info!("Loading image: {:?}", image_path);
    let img = ImageReader::open(image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    info!("Image loaded: {}x{}", img.width(), img.height());

    let result = match args.debug_out.clone() {
        Some(dir) => {
            let debug = DebugConfig::new(dir)?;
            let (result, stages) = pipeline.detect_with_stages(&img)?;
            debug.save_extraction(&img, &stages)?;
            result
        }
        None => pipeline.detect(&img)?,
    };

    println!("\n=== Tablet Detection Results ===");
    println!("Regions detected: {}", result.regions().len());
    for (i, region) in result.regions().iter().enumerate() {
        println!(
            "  Region {} at ({}, {}) - {}x{}",
            i + 1,
            region.x,
            region.y,
            region.width,
            region.height
        );
    }
    println!();

    match result.outcome() {
        Outcome::Matched(key) => match store.lookup(key) {
            Some(record) => print_record(record),
            None => println!("Medication information not available for the detected medication."),
        },
        Outcome::Unmatched | Outcome::NoRegions => {
            println!("No medication detected in the image.")
        }
    }

    Ok(())
}
