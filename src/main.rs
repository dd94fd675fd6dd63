//! codex - markdown directory to page-flip book

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use codex::site::{SiteConfig, build_site, load_book};

#[derive(Parser)]
#[command(name = "codex")]
#[command(version, about = "Build a page-flip book site from markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    codex build                         Build ./codex into ./dist
    codex build --content notes -o out  Build ./notes into ./out
    codex info --config site.json       List the pages a build would produce")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log every file as it is rendered
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Render the content root and write the static site
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Render worker threads
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,
    },
    /// Show the page sequence without writing anything
    Info {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Content root (overrides the config file)
    #[arg(long, value_name = "DIR")]
    content: Option<PathBuf>,
}

impl SourceArgs {
    fn load(&self) -> codex::Result<SiteConfig> {
        let mut config = match &self.config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::default(),
        };
        if let Some(content) = &self.content {
            config.content_root = content.clone();
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match cli.command {
        Command::Build { source, out, jobs } => build(&source, out, jobs, cli.quiet),
        Command::Info { source } => show_info(&source),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("CODEX_LOG")
        .format_timestamp(None)
        .init();
}

fn build(
    source: &SourceArgs,
    out: Option<PathBuf>,
    jobs: Option<usize>,
    quiet: bool,
) -> codex::Result<()> {
    let mut config = source.load()?;
    if let Some(out) = out {
        config.output_dir = out;
    }
    if let Some(jobs) = jobs {
        config.jobs = Some(jobs);
    }

    let report = build_site(&config)?;
    if !quiet {
        println!(
            "Built {} pages into {}",
            report.total_pages,
            config.output_dir.display()
        );
    }
    Ok(())
}

fn show_info(source: &SourceArgs) -> codex::Result<()> {
    let config = source.load()?;
    let book = load_book(&config)?;

    println!("Content root: {}", config.content_root.display());
    println!("Title: {}", config.cover.title);
    println!("Pages: {}", book.total_pages());
    for page in book.pages() {
        match book.source_of(page.number) {
            Some(file) => println!("{:>4}  {file}", page.number),
            None => println!("{:>4}  (cover)", page.number),
        }
    }
    Ok(())
}
