//! gocfg CLI — inspect and apply Go build-configuration transitions.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use gocfg_transition::gate::RuleKind;
use gocfg_transition::Transition;
use tracing_subscriber::EnvFilter;

use manifest::{GocfgManifest, Overrides};

#[derive(Parser)]
#[command(name = "gocfg", version, about = "Go build-configuration transitions")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Repository owning the go/config settings (overrides gocfg.toml)
    #[arg(long, global = true)]
    repo: Option<String>,
    /// Treat that repository as the main workspace
    #[arg(long, global = true)]
    main: bool,
    /// Platform catalog file (overrides gocfg.toml)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the settings a target builds with
    Transition {
        /// JSON file with the ambient settings (default: empty)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Target attribute as key=value (gotags takes a comma-separated list)
        #[arg(short, long = "attr")]
        attrs: Vec<String>,
    },
    /// Show whether a target needs the transition
    Route {
        /// Target attribute as key=value
        #[arg(short, long = "attr")]
        attrs: Vec<String>,
        /// Print the concrete rule name for this kind
        #[arg(long)]
        kind: Option<Kind>,
    },
    /// Resolve setting labels for the current workspace
    Resolve {
        /// Labels to resolve
        #[arg(required = true)]
        labels: Vec<String>,
    },
    /// List supported platforms
    Platforms {
        /// Only platforms that can link cgo
        #[arg(long)]
        cgo: bool,
    },
    /// List accepted link modes
    Linkmodes,
    /// Catalog file utilities
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Validate a catalog file
    Check {
        /// Path to a .catalog.toml
        path: PathBuf,
    },
    /// Print the built-in catalog as TOML
    Template,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Binary,
    Test,
}

impl Kind {
    fn rule_kind(self) -> RuleKind {
        match self {
            Kind::Binary => RuleKind::GO_BINARY,
            Kind::Test => RuleKind::GO_TEST,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let overrides = Overrides {
        repo: cli.repo,
        main: cli.main,
        catalog: cli.catalog,
    };

    match cli.command {
        Commands::Transition { settings, attrs } => {
            let transition = load_transition(&overrides)?;
            let attrs = commands::parse_attrs(&attrs)?;
            commands::transition::run(&transition, settings.as_deref(), &attrs)
        }
        Commands::Route { attrs, kind } => {
            let attrs = commands::parse_attrs(&attrs)?;
            let kind = kind.map(Kind::rule_kind);
            commands::route::run(&attrs, kind.as_ref())
        }
        Commands::Resolve { labels } => {
            let transition = load_transition(&overrides)?;
            commands::resolve::run(transition.resolver(), &labels)
        }
        Commands::Platforms { cgo } => {
            let transition = load_transition(&overrides)?;
            commands::catalog::platforms(transition.platforms(), cgo)
        }
        Commands::Linkmodes => {
            let transition = load_transition(&overrides)?;
            commands::catalog::linkmodes(transition.linkmodes())
        }
        Commands::Catalog { action } => match action {
            CatalogAction::Check { path } => commands::catalog::check(&path),
            CatalogAction::Template => commands::catalog::template(),
        },
    }
}

/// Build the transition from the nearest `gocfg.toml` (if any) and flags.
fn load_transition(overrides: &Overrides) -> anyhow::Result<Transition> {
    let cwd = std::env::current_dir()?;
    let (manifest, dir) = GocfgManifest::find_and_load(&cwd)?.unwrap_or((GocfgManifest::default(), cwd));
    manifest.transition(&dir, overrides)
}
