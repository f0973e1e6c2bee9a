use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use qurani_core::{
    parse_reference, Category, NavigationState, Navigator, SavedPosition, SqliteStore,
};
use tracing::warn;

mod config;
mod logging;
mod rpc;

use config::{Config, UserData};

#[derive(Parser)]
#[command(name = "qurani")]
#[command(version, about = "Read the Quran by page, surah, quarter, hizb or juz")]
struct Cli {
    /// Path to the verse database (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Leave out the "(n)" verse markers
    #[arg(long, global = true)]
    no_verse_numbers: bool,
    /// Run verses together on one line instead of one per line
    #[arg(long, global = true)]
    inline: bool,
    /// Log every query and render to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the five divisions and how many units each has
    Categories,
    /// Show one page, surah, quarter, hizb or juz
    Show {
        #[arg(value_parser = parse_category)]
        category: Category,
        index: u32,
    },
    /// Show a verse range such as 2:255, 2:1-5 or 2:280-3:4
    Range {
        reference: String,
    },
    /// Show the unit holding a verse, by global verse number
    Locate {
        #[arg(value_parser = parse_category)]
        category: Category,
        verse: u32,
    },
    /// Report which verse sits at a character offset of a rendered unit
    Resolve {
        #[arg(value_parser = parse_category)]
        category: Category,
        index: u32,
        offset: usize,
    },
    /// Reopen the saved reading position
    Resume,
    /// Save the verse at an offset of a rendered unit as the reading position
    Save {
        #[arg(value_parser = parse_category)]
        category: Category,
        index: u32,
        offset: usize,
    },
    /// Serve navigation requests as JSON-RPC over stdin/stdout
    Serve,
    /// Write the effective --db, --no-verse-numbers and --inline settings to the config file
    Configure,
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_str(s).ok_or_else(|| {
        format!(
            "unknown category '{}' (expected page, surah, quarter, hizb or juz)",
            s
        )
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = Config::load().unwrap_or_else(|e| {
        warn!("using default config: {}", e);
        Config::new()
    });

    match cli.command {
        Commands::Categories => {
            list_categories();
            return Ok(());
        }
        Commands::Configure => {
            let mut settings = effective_config(&cli, config);
            if let Some(db) = &cli.db {
                settings.database_path = Some(db.clone());
            }
            settings.save()?;
            println!("Settings saved");
            return Ok(());
        }
        _ => {}
    }

    let config = effective_config(&cli, config);
    let options = config.render_options();
    let db_path = config.resolve_database_path(cli.db.as_deref());
    let store = SqliteStore::open(&db_path)
        .map_err(|e| anyhow!("Could not open {}: {}", db_path.display(), e))?;
    let mut nav = Navigator::new(store, options);

    match cli.command {
        Commands::Categories | Commands::Configure => {}
        Commands::Show { category, index } => {
            let state = nav.select(category, index)?;
            print_state(&state);
        }
        Commands::Range { reference } => {
            let reference = parse_reference(&reference)
                .ok_or_else(|| anyhow!("Could not parse reference: {}", reference))?;
            let state = nav.range_query(Some(reference.from), reference.to)?;
            print_state(&state);
        }
        Commands::Locate { category, verse } => {
            nav.select(category, 1)?;
            let located = nav.locate_by_verse_number(verse)?;
            println!("{}", located.verse_text);
            println!();
            print_state(&located.state);
        }
        Commands::Resolve {
            category,
            index,
            offset,
        } => {
            nav.select(category, index)?;
            let meta = nav.resolve_offset(offset)?;
            println!(
                "{} {} - verse {} (global {})",
                meta.chapter_name, meta.chapter_id, meta.number_in_chapter, meta.number
            );
        }
        Commands::Resume => resume(&mut nav)?,
        Commands::Save {
            category,
            index,
            offset,
        } => {
            nav.select(category, index)?;
            let position = nav.save_position(offset)?;
            UserData::save(&position)?;
            println!(
                "Saved {} {}, verse {}",
                category, position.position, position.ayah_number
            );
        }
        Commands::Serve => rpc::run_rpc_server(&mut nav)?,
    }

    Ok(())
}

/// The config file with this run's formatting switches applied.
fn effective_config(cli: &Cli, mut config: Config) -> Config {
    if cli.no_verse_numbers {
        config.show_verse_number = false;
    }
    if cli.inline {
        config.one_verse_per_line = false;
    }
    config
}

fn list_categories() {
    for category in Category::all() {
        println!(
            "{:<8} {:<5} {:>4}",
            category.label(),
            category.arabic_label(),
            category.max_index()
        );
    }
}

fn print_state(state: &NavigationState) {
    println!("{}", state.title());
    println!("{}", "=".repeat(40));
    println!("{}", state.text());
}

fn resume(nav: &mut Navigator<SqliteStore>) -> Result<()> {
    let saved = UserData::load().unwrap_or_else(|e| {
        warn!("ignoring saved position: {}", e);
        SavedPosition::default()
    });
    let restored = match nav.restore(&saved) {
        Ok(restored) => restored,
        Err(e) => {
            warn!("saved position {:?} is unusable: {}", saved, e);
            nav.restore(&SavedPosition::default())?
        }
    };
    print_state(&restored.state);
    if let Some(cursor) = restored.cursor {
        eprintln!("cursor at offset {}", cursor);
    }
    Ok(())
}
