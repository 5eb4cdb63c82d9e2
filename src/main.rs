//! Ranged DPS calculator: CLI.

use clap::{Parser, Subcommand};
use ranged_dps::catalog::Catalog;
use ranged_dps::config::{AppConfig, Quality};
use ranged_dps::graph::LineGraph;
use ranged_dps::report::{
    render_shooter_pane, render_turret_pane, render_weapon_pane, write_graph_report,
};
use ranged_dps::series::SeriesSpec;
use ranged_dps::stats;
use ranged_dps::store::{FavoriteKind, Store};
use ranged_dps::util::init_logging;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ranged-dps")]
#[command(about = "Ranged weapon, shooter and turret DPS calculator")]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Optional TOML file overriding graph, quality and shooter tuning.
    #[arg(long, global = true, value_name = "TOML")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Weapon stats: max DPS, weapon DPS at its best band, range breakdown.
    Weapon {
        #[arg(long, value_name = "PATH", help = "Catalog .toml file, directory, or .zip/.pak archive")]
        catalog: PathBuf,
        def_name: String,
        #[arg(long, default_value = "normal")]
        quality: Quality,
        #[arg(long)]
        json: bool,
    },
    /// Turret stats: DPS with the turret's own shooter and fuel economics.
    Turret {
        #[arg(long, value_name = "PATH")]
        catalog: PathBuf,
        def_name: String,
        #[arg(long)]
        json: bool,
    },
    /// Shooter DPS of a pawn with its primary weapon.
    Pawn {
        #[arg(long, value_name = "PATH")]
        catalog: PathBuf,
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Sample DPS-by-range curves and write graph.json and graph.html.
    Graph {
        #[arg(long, value_name = "PATH")]
        catalog: PathBuf,
        #[arg(long, value_name = "DIR", default_value = "out")]
        out: PathBuf,
        #[arg(
            long = "series",
            value_name = "SPEC",
            required = true,
            help = "weapon=DEF[@QUALITY][,shooter=pawn:NAME|sim:SKILL[:th|:cs]][,target=size:S[:cover:C][:sharp:A]|pawn:NAME] or turret=DEF[,target=...]"
        )]
        series: Vec<SeriesSpec>,
    },
    /// Manage the favorites list.
    Favorite {
        #[arg(long, value_name = "DB", default_value = "favorites.sqlite")]
        db: PathBuf,
        #[command(subcommand)]
        action: FavoriteAction,
    },
}

#[derive(Subcommand)]
enum FavoriteAction {
    Add {
        kind: FavoriteKind,
        def_name: String,
        #[arg(long, default_value = "normal")]
        quality: Quality,
    },
    Remove {
        kind: FavoriteKind,
        def_name: String,
        #[arg(long, default_value = "normal")]
        quality: Quality,
    },
    List,
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load_or_default(cli.config.as_deref()).map_err(|e| e.to_string())?;

    match cli.command {
        Commands::Weapon {
            catalog,
            def_name,
            quality,
            json,
        } => run_weapon(&config, &catalog, &def_name, quality, json),
        Commands::Turret {
            catalog,
            def_name,
            json,
        } => run_turret(&config, &catalog, &def_name, json),
        Commands::Pawn {
            catalog,
            name,
            json,
        } => run_pawn(&config, &catalog, &name, json),
        Commands::Graph {
            catalog,
            out,
            series,
        } => run_graph(&config, &catalog, &out, &series),
        Commands::Favorite { db, action } => run_favorite(&db, action),
    }
}

fn load_catalog(path: &Path) -> Result<Catalog, String> {
    Catalog::load(path).map_err(|e| e.to_string())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn run_weapon(
    config: &AppConfig,
    catalog: &Path,
    def_name: &str,
    quality: Quality,
    json: bool,
) -> Result<(), String> {
    let catalog = load_catalog(catalog)?;
    let weapon = catalog
        .resolve_gun(def_name, quality, &config.quality)
        .map_err(|e| e.to_string())?;
    let pane = stats::weapon_pane(&weapon);
    tracing::info!("{}: max DPS {:.2}", pane.label, pane.max_dps);
    if json {
        return print_json(&pane);
    }
    print!("{}", render_weapon_pane(&pane));
    Ok(())
}

fn run_turret(
    config: &AppConfig,
    catalog: &Path,
    def_name: &str,
    json: bool,
) -> Result<(), String> {
    let catalog = load_catalog(catalog)?;
    let turret = catalog
        .resolve_turret(def_name, &config.quality)
        .map_err(|e| e.to_string())?;
    let loaded = catalog.turret(def_name).map(|t| t.is_loaded()).unwrap_or(true);
    let pane = stats::turret_pane(&turret, loaded);
    if json {
        return print_json(&pane);
    }
    match pane {
        Some(p) => print!("{}", render_turret_pane(&p)),
        None => println!("{} is not loaded; no DPS to show.", turret.shooter.label()),
    }
    Ok(())
}

fn run_pawn(config: &AppConfig, catalog: &Path, name: &str, json: bool) -> Result<(), String> {
    let catalog = load_catalog(catalog)?;
    let shooter = catalog.resolve_pawn_shooter(name).map_err(|e| e.to_string())?;
    let weapon = catalog
        .resolve_pawn_weapon(name, &config.quality)
        .map_err(|e| e.to_string())?;
    let pane = stats::shooter_pane(&weapon, &shooter);
    tracing::info!(
        "{}: shooter DPS {:.2} at range {}",
        pane.shooter,
        pane.shooter_dps,
        pane.optimal_range
    );
    if json {
        return print_json(&pane);
    }
    print!("{}", render_shooter_pane(&pane));
    Ok(())
}

fn run_graph(
    config: &AppConfig,
    catalog: &Path,
    out: &Path,
    series: &[SeriesSpec],
) -> Result<(), String> {
    let catalog = load_catalog(catalog)?;
    let mut functions = Vec::with_capacity(series.len());
    for spec in series {
        functions.push(spec.build(&catalog, config).map_err(|e| e.to_string())?);
    }
    let mut graph = LineGraph::new(config.graph.clone());
    graph.add_functions(functions);
    write_graph_report(&graph, out)?;
    tracing::info!(
        "wrote {} series to {} (domain 0..{:.1}, range 0..{:.2})",
        graph.len(),
        out.display(),
        graph.domain().1,
        graph.range().1
    );
    Ok(())
}

fn run_favorite(db: &Path, action: FavoriteAction) -> Result<(), String> {
    let store = Store::open(db)?;
    match action {
        FavoriteAction::Add {
            kind,
            def_name,
            quality,
        } => {
            if store.add(kind, &def_name, quality)? {
                println!("added {} {} ({})", kind.as_str(), def_name, quality);
            } else {
                println!("{} {} ({}) is already a favorite", kind.as_str(), def_name, quality);
            }
        }
        FavoriteAction::Remove {
            kind,
            def_name,
            quality,
        } => {
            if !store.remove(kind, &def_name, quality)? {
                return Err(format!("{} {} ({}) is not a favorite", kind.as_str(), def_name, quality));
            }
            println!("removed {} {} ({})", kind.as_str(), def_name, quality);
        }
        FavoriteAction::List => {
            let favorites = store.list()?;
            if favorites.is_empty() {
                println!("No favorites.");
            }
            for f in favorites {
                println!("{}  {}  {}  {}", f.kind.as_str(), f.def_name, f.quality, f.added_at);
            }
        }
    }
    Ok(())
}
