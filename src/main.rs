mod class;
mod config;

use class::{ClassFile, ClassReport, GenerateParams};
use clap::Parser;
use config::{AppConfig, AssignMethod, ConfigErr};
use dotenvy::dotenv;
use grouping::{
    GroupingErr, MutualAdjacency, balanced_assign_with, reset_and_random_assign_with, validate_groups,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("could not read class file: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Grouping(#[from] GroupingErr),
    #[error(transparent)]
    Config(#[from] ConfigErr),
}

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to a JSON class file with `groups` and `students`
    #[arg(conflicts_with_all = ["students", "groups", "capacity", "likes"])]
    class_file: Option<PathBuf>,

    /// Assignment method, overrides GROUPING_METHOD
    #[arg(long, value_enum)]
    method: Option<AssignMethod>,

    /// Swap proposals for the balanced method, overrides GROUPING_ITERATIONS
    #[arg(long)]
    iterations: Option<usize>,

    /// Random seed, overrides GROUPING_SEED
    #[arg(long)]
    seed: Option<u64>,

    /// Number of students in a generated class
    #[arg(long, default_value = "24")]
    students: u32,

    /// Number of groups in a generated class
    #[arg(long, default_value = "4")]
    groups: u32,

    /// Seats per group in a generated class, unlimited when omitted
    #[arg(long)]
    capacity: Option<u32>,

    /// Classmates each generated student likes
    #[arg(long, default_value = "2")]
    likes: u32,

    /// Print the generated class instead of grouping it
    #[arg(long, conflicts_with = "class_file")]
    dump_class: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn resolve_config(&self, mut config: AppConfig) -> AppConfig {
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(iterations) = self.iterations {
            config.grouping.iterations = iterations;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }

    fn load_class(&self, rng: &mut StdRng) -> Result<ClassFile, CliError> {
        match &self.class_file {
            Some(path) => {
                tracing::info!("Reading class from {}", path.display());
                let file_contents = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&file_contents)?)
            },
            None => {
                let params = GenerateParams {
                    students: self.students,
                    groups: self.groups,
                    capacity: self.capacity,
                    likes: self.likes,
                };
                tracing::info!(?params, "Generating class");
                Ok(ClassFile::generate(&params, rng))
            },
        }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String, CliError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.resolve_config(AppConfig::from_env()?);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let class = cli.load_class(&mut rng)?;
    if cli.dump_class {
        println!("{}", cli.to_json(&class)?);
        return Ok(());
    }

    validate_groups(&class.groups)?;
    let roster = class.roster();
    let preferences = class.preferences();
    tracing::info!(
        students = roster.len(),
        groups = class.groups.len(),
        method = ?config.method,
        iterations = config.grouping.iterations,
        "Assigning groups"
    );

    let assignment = match config.method {
        AssignMethod::Random => reset_and_random_assign_with(&class.groups, &roster, &config.grouping, &mut rng),
        AssignMethod::Balanced => {
            balanced_assign_with(&class.groups, &roster, &preferences, &config.grouping, &mut rng)
        },
    };
    if !assignment.unassigned().is_empty() {
        tracing::warn!(
            unassigned = assignment.unassigned().len(),
            "Not enough seats, some students were left out"
        );
    }

    let adjacency = MutualAdjacency::build(&roster, &preferences);
    let report = ClassReport::new(&class, &assignment, &adjacency);
    println!("{}", cli.to_json(&report)?);

    Ok(())
}

fn main() {
    // load env vars
    dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    let fmt_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
