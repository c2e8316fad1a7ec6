use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod curriculum;
mod error;
mod manifest;
mod materialize;
mod model;
mod plan;
mod segment;
mod verify;

#[derive(Parser, Debug)]
#[command(name = "syllabus-tree", version, about = "Materialize a curriculum into a directory tree")]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "More logging (-v info, -vv debug)")]
    verbose: u8,
    #[arg(short, long, global = true, help = "Only log errors")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create every department/semester/subject directory and its resources.txt
    Materialize(MaterializeCmd),
    /// List the leaves that would be created, without touching the disk
    Plan(PlanCmd),
    /// Compare an existing tree against the curriculum
    Verify(VerifyCmd),
    /// Print the curriculum table as TOML or JSON
    Export(ExportCmd),
}

#[derive(Args, Debug)]
struct SourceArgs {
    #[arg(long, env = config::BASE_ENV, help = "Directory the tree is created under")]
    base: Option<PathBuf>,
    #[arg(long, env = config::CURRICULUM_ENV, help = "Curriculum file (.toml or .json); built-in table if omitted")]
    curriculum: Option<PathBuf>,
}

impl SourceArgs {
    fn base(&self) -> PathBuf { self.base.clone().unwrap_or_else(config::default_base_path) }
    fn curriculum(&self) -> Result<model::Curriculum> { curriculum::load_or_builtin(self.curriculum.as_deref()) }
}

#[derive(Args, Debug)]
struct MaterializeCmd {
    #[command(flatten)]
    source: SourceArgs,
    #[arg(long, help = "Leave existing resources.txt files untouched")]
    keep_existing: bool,
    #[arg(long, help = "Record failed leaves and keep going instead of stopping at the first")]
    continue_on_error: bool,
    #[arg(long, help = "Refuse names that are not valid on every common filesystem")]
    portable: bool,
    #[arg(long, help = "Write a JSON manifest of the created leaves")]
    manifest: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlanCmd {
    #[command(flatten)]
    source: SourceArgs,
    #[arg(long)]
    json: bool,
    #[arg(long, help = "Also check names against portable filesystem rules")]
    portable: bool,
}

#[derive(Args, Debug)]
struct VerifyCmd {
    #[command(flatten)]
    source: SourceArgs,
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum ExportFormat { Toml, Json }

#[derive(Args, Debug)]
struct ExportCmd {
    #[arg(long, env = config::CURRICULUM_ENV)]
    curriculum: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ExportFormat::Toml)]
    format: ExportFormat,
}

fn init_logging(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}

fn segment_policy(portable: bool) -> segment::SegmentPolicy {
    if portable { segment::SegmentPolicy::Portable } else { segment::SegmentPolicy::Verbatim }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(config::log_directive(cli.verbose, cli.quiet));
    match cli.command {
        Commands::Materialize(cmd) => {
            let table = cmd.source.curriculum()?;
            let base = cmd.source.base();
            let opts = materialize::Options {
                existing: if cmd.keep_existing { materialize::ExistingPolicy::Keep } else { materialize::ExistingPolicy::Overwrite },
                failures: if cmd.continue_on_error { materialize::FailureMode::Continue } else { materialize::FailureMode::Abort },
                segments: segment_policy(cmd.portable),
            };
            let report = materialize::materialize(&table, &base, &opts)?;
            if let Some(out) = &cmd.manifest {
                let m = manifest::Manifest::from_report(&table, &report);
                manifest::ManifestIo::default().write(out, &m)?;
            }
            if !report.is_success() {
                for f in &report.failures { eprintln!("{}: {}", f, f.source); }
                bail!("{} of {} leaves failed under {}", report.failures.len(), report.leaves + report.failures.len(), base.display());
            }
            println!("✅ Created folder structure at {}", base.display());
        }
        Commands::Plan(cmd) => {
            let table = cmd.source.curriculum()?;
            let base = cmd.source.base();
            if let Err(errors) = segment::validate(&table, segment_policy(cmd.portable)) {
                for e in &errors { eprintln!("{}", e); }
                bail!("{} invalid path segment(s)", errors.len());
            }
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&manifest::Manifest::build(&table, &base))?);
            } else {
                for l in plan::plan_to_tsv(&table, &base) { println!("{}", l); }
            }
        }
        Commands::Verify(cmd) => {
            let table = cmd.source.curriculum()?;
            let base = cmd.source.base();
            let v = verify::verify(&table, &base)?;
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&v)?);
            } else {
                for p in &v.missing { println!("missing\t{}", p.display()); }
                for p in &v.drifted { println!("drifted\t{}", p.display()); }
                for p in &v.unexpected { println!("unexpected\t{}", p.display()); }
                if v.is_clean() { println!("ok\t{} leaves under {}", v.leaves, base.display()); }
            }
            if !v.is_clean() { std::process::exit(1); }
        }
        Commands::Export(cmd) => {
            let table = curriculum::load_or_builtin(cmd.curriculum.as_deref())?;
            let format = match cmd.format { ExportFormat::Toml => curriculum::Format::Toml, ExportFormat::Json => curriculum::Format::Json };
            print!("{}", curriculum::render(&table, format)?);
        }
    }
    Ok(())
}
