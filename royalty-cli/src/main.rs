use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use royalty_core::{DistributorKind, DistributorProfile, NormalizedResult};
use royalty_ingest::{normalize_with_profile, ProcessedFile};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod report;
mod state;

use config::{init_config, load_config, resolve_config_path, Config};
use report::{print_result, FileOutcome, RunSummary};

#[derive(Parser, Debug)]
#[command(
    name = "royalties",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ROYALTIES_BUILD_SHA"), ")"),
    about = "Normalize distributor royalty statements and apply tax deductions"
)]
struct Cli {
    /// Config file (default: $ROYALTIES_HOME/config.toml or ~/.royalties/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter, total and tax-adjust one or more statements from the same distributor
    Process {
        /// fuga | altafonte | onerpm | onerpm-share-in
        #[arg(long, short)]
        distributor: DistributorKind,

        /// Tax rate in percent (default: configured rate for the distributor)
        #[arg(long)]
        tax: Option<f64>,

        /// Output directory for processed CSVs (default: output.dir from config)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print a JSON run summary instead of the human-readable report
        #[arg(long)]
        json: bool,

        /// Rows to show in the preview (default: output.preview_rows from config)
        #[arg(long)]
        preview: Option<usize>,

        /// Statement files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List distributor profiles after config overrides
    Profiles,

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a config file with the built-in defaults
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref())?;

    match cli.command {
        Command::Process {
            distributor,
            tax,
            out,
            json,
            preview,
            files,
        } => {
            let cfg = load_config(&config_path)?;
            let opts = ProcessOptions {
                tax,
                out_dir: out.unwrap_or_else(|| cfg.output.dir.clone()),
                json,
                preview: preview.unwrap_or(cfg.output.preview_rows),
            };
            process(&cfg, distributor, &files, &opts)?;
        }

        Command::Profiles => {
            let cfg = load_config(&config_path)?;
            for p in cfg.profiles()? {
                print_profile(&p);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(&config_path)?,
            ConfigCommand::Show => {
                let cfg = load_config(&config_path)?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::Path => println!("{}", config_path.display()),
        },
    }

    Ok(())
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

struct ProcessOptions {
    tax: Option<f64>,
    out_dir: PathBuf,
    json: bool,
    preview: usize,
}

fn process(
    cfg: &Config,
    distributor: DistributorKind,
    files: &[PathBuf],
    opts: &ProcessOptions,
) -> Result<()> {
    let profile = cfg.profile(distributor)?;
    let rate = opts.tax.unwrap_or(profile.default_tax_rate.percent());

    fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("create {}", opts.out_dir.display()))?;

    let mut summary = RunSummary::new(distributor.id());
    let mut names = OutputNames::new(files.len() > 1);
    for input in files {
        // Each file stands alone: one bad upload must not stop the rest.
        match process_one(&profile, input, rate, &mut names, &opts.out_dir) {
            Ok((result, output)) => {
                info!(input = %input.display(), output = %output.display(), "wrote processed statement");
                if !opts.json {
                    print_result(&profile, &result, opts.preview);
                    println!("\nSaved {}\n", output.display());
                }
                summary.files.push(FileOutcome::Processed {
                    input: input.clone(),
                    output,
                    rows: result.row_count(),
                    tax_rate: result.tax_rate.percent(),
                    gross_total: result.gross_total,
                    net_total: result.net_total,
                });
            }
            Err(e) => {
                error!(input = %input.display(), "could not process statement: {e:#}");
                summary.files.push(FileOutcome::Failed {
                    input: input.clone(),
                    error: format!("{e:#}"),
                });
            }
        }
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    let failed = summary.failures();
    if failed > 0 {
        bail!("{failed} of {} statements could not be processed", files.len());
    }
    Ok(())
}

fn process_one(
    profile: &DistributorProfile,
    input: &Path,
    rate: f64,
    names: &mut OutputNames,
    out_dir: &Path,
) -> Result<(NormalizedResult, PathBuf)> {
    let bytes = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let result = normalize_with_profile(profile, &bytes, rate)
        .with_context(|| format!("{} statement {}", profile.kind, input.display()))?;

    let file = ProcessedFile::from_result(&result).context("render processed CSV")?;
    let output = out_dir.join(names.claim(&file.file_name, input));
    fs::write(&output, &file.contents).with_context(|| format!("write {}", output.display()))?;

    Ok((result, output))
}

/// Output names handed out during one `process` run.
///
/// A single input gets `fuga_processed.csv`; several inputs get `<input stem>_fuga_processed.csv`.
/// A name already handed out gets `_2`, `_3`, ... before the extension.
struct OutputNames {
    several: bool,
    used: HashSet<String>,
}

impl OutputNames {
    fn new(several: bool) -> Self {
        Self {
            several,
            used: HashSet::new(),
        }
    }

    fn claim(&mut self, base: &str, input: &Path) -> String {
        let name = match input.file_stem().and_then(|s| s.to_str()) {
            Some(stem) if self.several => format!("{stem}_{base}"),
            _ => base.to_string(),
        };
        let (stem, ext) = name.rsplit_once('.').unwrap_or((name.as_str(), ""));

        let mut candidate = name.clone();
        let mut n = 2;
        while self.used.contains(&candidate) {
            candidate = if ext.is_empty() {
                format!("{stem}_{n}")
            } else {
                format!("{stem}_{n}.{ext}")
            };
            n += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

fn print_profile(p: &DistributorProfile) {
    println!("{} ({})", p.kind, p.kind.id());
    println!("  format:         {}", p.file_format);
    println!(
        "  numbers:        decimal '{}', thousands {}",
        p.number_format.decimal,
        p.number_format
            .thousands
            .map(|c| format!("'{c}'"))
            .unwrap_or_else(|| "none".to_string())
    );
    println!("  filter column:  {} ({})", p.filter_column, p.row_filter);
    println!("  amount column:  {}", p.amount_column);
    println!("  default tax:    {}", p.default_tax_rate);
    println!("  output file:    {}", p.kind.processed_file_name());
    println!();
}
