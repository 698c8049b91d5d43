//! bv_validate - compare computed Battle Value against reference values
//!
//! Usage:
//!   bv_validate run --data units/ --overrides overrides.toml --report report.json
//!   bv_validate unit --file hunchback.json --gunnery 3 --piloting 4

use bv_core::config::{default_catalog, default_tables, load_catalog, load_rules, load_tables};
use bv_core::{skill_adjusted_bv, BvEngine, BvRules, DataTables, EquipmentCatalog, UnitConstruction};
use bv_validate::{load_dataset, load_overrides, sample, ValidateError, ValidationRunner};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Battle Value validation harness
#[derive(Parser, Debug)]
#[command(name = "bv_validate")]
#[command(about = "Calculate Battle Value and compare it against reference values")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a dataset of units with reference values
    Run(RunArgs),
    /// Print the full breakdown for one unit
    Unit(UnitArgs),
}

/// Data files shared by both commands; bundled defaults when omitted
#[derive(Args, Debug)]
struct DataArgs {
    /// Equipment catalog TOML
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Resolver and exception tables TOML
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Rule constants TOML
    #[arg(long)]
    rules: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Unit JSON file, or a directory of them
    #[arg(long)]
    data: PathBuf,

    /// Curated reference overrides TOML
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Write the full JSON report here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Validate a random subset of this many units
    #[arg(long)]
    sample: Option<usize>,

    /// Seed for the random subset
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// How many of the worst mismatches to list
    #[arg(long, default_value_t = 10)]
    worst: usize,

    #[command(flatten)]
    data_files: DataArgs,
}

#[derive(Args, Debug)]
struct UnitArgs {
    /// Unit construction JSON
    #[arg(long)]
    file: PathBuf,

    /// Gunnery skill for the adjusted value
    #[arg(long, default_value_t = 4)]
    gunnery: u8,

    /// Piloting skill for the adjusted value
    #[arg(long, default_value_t = 5)]
    piloting: u8,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    data_files: DataArgs,
}

/// Owned data for one engine
struct EngineData {
    catalog: EquipmentCatalog,
    tables: DataTables,
    rules: BvRules,
}

impl EngineData {
    fn load(args: &DataArgs) -> Result<Self, ValidateError> {
        let catalog = match &args.catalog {
            Some(path) => load_catalog(path)?,
            None => default_catalog().clone(),
        };
        let tables = match &args.tables {
            Some(path) => load_tables(path)?,
            None => default_tables().clone(),
        };
        let rules = match &args.rules {
            Some(path) => load_rules(path)?,
            None => BvRules::default(),
        };

        let dangling = tables.dangling_targets(&catalog);
        if !dangling.is_empty() {
            tracing::warn!("resolver tables point at missing catalog ids: {}", dangling.join(", "));
        }
        tracing::info!("catalog has {} entries", catalog.len());
        Ok(EngineData { catalog, tables, rules })
    }

    fn engine(&self) -> BvEngine<'_> {
        BvEngine::new(&self.catalog, &self.tables).with_rules(self.rules.clone())
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ValidateError> {
    fs::write(path, content).map_err(|source| ValidateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn run(args: RunArgs) -> Result<(), ValidateError> {
    let data = EngineData::load(&args.data_files)?;
    let overrides = match &args.overrides {
        Some(path) => load_overrides(path)?,
        None => Default::default(),
    };

    let mut units = load_dataset(&args.data)?;
    if let Some(count) = args.sample {
        units = sample(units, count, args.seed);
        tracing::info!("sampled {} units with seed {}", units.len(), args.seed);
    }

    let runner = ValidationRunner::new(data.engine()).with_overrides(overrides);
    let report = runner.run(&units);

    println!("{}", report.summary().summary());

    let worst = report.worst(args.worst);
    if !worst.is_empty() {
        println!("\nLargest mismatches:");
        for unit in worst {
            println!(
                "  {:<36} computed {:>5}  reference {:>5}  {:+.2}%",
                unit.id,
                unit.computed_bv.unwrap_or(0),
                unit.reference_bv.unwrap_or(0),
                unit.error_percent.unwrap_or(0.0)
            );
        }
    }

    let unresolved = report.unresolved_frequency();
    if !unresolved.is_empty() {
        println!("\nUnresolved identifiers:");
        for (identifier, count) in unresolved.iter().take(args.worst) {
            println!("  {:<36} {}", identifier, count);
        }
    }

    if let Some(path) = &args.report {
        write_file(path, &report.to_json()?)?;
        tracing::info!("report written to {}", path.display());
    }
    Ok(())
}

fn unit(args: UnitArgs) -> Result<(), ValidateError> {
    let data = EngineData::load(&args.data_files)?;
    let content = fs::read_to_string(&args.file).map_err(|source| ValidateError::Io {
        path: args.file.clone(),
        source,
    })?;
    let construction = UnitConstruction::from_json_str(&content)?;

    let result = match data.engine().calculate(&construction) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{}: {}", construction.display_name(), err);
            return Ok(());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", result.summary());
    match skill_adjusted_bv(result.total, args.gunnery, args.piloting) {
        Ok(adjusted) => println!("Skill {}/{}: {}", args.gunnery, args.piloting, adjusted),
        Err(err) => eprintln!("{}", err),
    }
    Ok(())
}

fn main() -> Result<(), ValidateError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bv_validate=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args),
        Command::Unit(args) => unit(args),
    }
}
