//! outly - a keyboard-driven tree outliner.
//!
//! Usage:
//!   outly init [FILE]         Write a starter outline
//!   outly show [FILE]         Print the laid-out outline grid
//!   outly fmt [FILE]          Normalize an outline file in place
//!   outly --help              Show help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, Context, Result};

use outly_core::{ItemId, ItemRecord};
use outly_engine::{AppState, ThemeKind};

#[derive(Parser)]
#[command(
    name = "outly",
    version,
    about = "A keyboard-driven tree outliner",
    long_about = "outly keeps your outlines as plain JSON trees.\n\n\
                  Use `outly init` to start a new outline, `outly show` to \
                  inspect how it lays out, and `outly fmt` to normalize a file."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a starter outline file
    Init {
        /// Outline file to create
        #[arg(default_value = "outline.json")]
        file: PathBuf,

        /// Overwrite the file if it already exists
        #[arg(short, long)]
        force: bool,
    },

    /// Load an outline and print its laid-out grid
    Show {
        /// Outline file to load
        #[arg(default_value = "outline.json")]
        file: PathBuf,

        /// Zoom into the first item with this title
        #[arg(short = 'F', long)]
        focus: Option<String>,

        /// Palette used for derived view colors
        #[arg(short, long, default_value = "dark")]
        theme: ThemeKind,

        /// Output format
        #[arg(short = 'o', long, default_value = "text")]
        format: OutputFormat,
    },

    /// Normalize an outline file in place
    Fmt {
        /// Outline file to rewrite
        #[arg(default_value = "outline.json")]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Command::Init { file, force } => run_init(&file, force),
        Command::Show {
            file,
            focus,
            theme,
            format,
        } => run_show(&file, focus.as_deref(), theme, format),
        Command::Fmt { file } => run_fmt(&file),
    }
}

/// Write a small starter outline.
fn run_init(file: &Path, force: bool) -> Result<()> {
    if file.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", file.display());
    }
    let records = vec![
        ItemRecord::new("Inbox").with_children(vec![
            ItemRecord::new("Press enter to add an item"),
            ItemRecord::new("Press tab to nest it"),
        ]),
        ItemRecord::new("Projects"),
        ItemRecord::new("Someday"),
    ];
    save_records(file, &records)?;
    eprintln!("Wrote {}", file.display());
    Ok(())
}

/// Load an outline and print every visible item at its grid position.
fn run_show(file: &Path, focus: Option<&str>, theme: ThemeKind, format: OutputFormat) -> Result<()> {
    let records = load_records(file)?;
    let mut app = AppState::from_records(&records).with_theme(theme.palette());

    if let Some(title) = focus {
        let Some(item) = find_by_title(&app, title) else {
            bail!("no item titled {title:?} in {}", file.display());
        };
        app.change_selection(item);
        app.focus_on_item_selected();
        outly_engine::sync_views(&mut app);
    }

    // Insertion order of a freshly synced map is the visible pre-order,
    // but sort by row so the listing stays stable regardless.
    let mut rows: Vec<(ItemId, i32, i32)> = app
        .views
        .iter()
        .map(|(&id, view)| (id, view.grid_y, view.grid_x))
        .collect();
    rows.sort_by_key(|&(_, grid_y, _)| grid_y);

    match format {
        OutputFormat::Text => {
            for (id, _, grid_x) in rows {
                let indent = "  ".repeat((grid_x + 1) as usize);
                let marker = if Some(id) == app.selected_item {
                    "> "
                } else if !app.tree.is_open(id) && app.tree.has_children(id) {
                    "+ "
                } else {
                    "- "
                };
                println!("{indent}{marker}{}", app.tree.title(id));
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = rows
                .iter()
                .map(|&(id, _, _)| {
                    serde_json::json!({
                        "title": app.tree.title(id),
                        "view": app.views[&id],
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

/// Re-serialize an outline file, normalizing formatting.
fn run_fmt(file: &Path) -> Result<()> {
    let records = load_records(file)?;
    save_records(file, &records)?;
    eprintln!("Formatted {}", file.display());
    Ok(())
}

fn load_records(file: &Path) -> Result<Vec<ItemRecord>> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Cannot read {}", file.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid outline in {}", file.display()))
}

fn save_records(file: &Path, records: &[ItemRecord]) -> Result<()> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    std::fs::write(file, json).with_context(|| format!("Cannot write {}", file.display()))
}

/// First item whose title matches, in pre-order.
fn find_by_title(app: &AppState, title: &str) -> Option<ItemId> {
    let mut found = None;
    app.tree.for_each_descendant(app.tree.root(), |id| {
        if found.is_none() && app.tree.title(id) == title {
            found = Some(id);
        }
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_round_trip_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("outline.json");

        let records = vec![ItemRecord::new("a").with_children(vec![ItemRecord::new("a1")])];
        save_records(&file, &records).unwrap();
        assert_eq!(load_records(&file).unwrap(), records);
    }

    #[test]
    fn find_by_title_walks_in_preorder() {
        let app = AppState::from_records(&[
            ItemRecord::new("a").with_children(vec![ItemRecord::new("x")]),
            ItemRecord::new("x"),
        ]);
        let first = find_by_title(&app, "x").unwrap();
        let a = app.tree.children(app.tree.root())[0];
        assert_eq!(app.tree.parent(first), Some(a));
        assert!(find_by_title(&app, "missing").is_none());
    }
}
