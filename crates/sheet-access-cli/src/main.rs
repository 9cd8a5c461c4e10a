//! sheet-access CLI - run the entry points against a JSON workbook

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sheet_access::handler::{do_get_with, do_post_with};
use sheet_access::memory::WorkbookFixture;
use sheet_access::{EntryConfig, MemorySpreadsheet, Request, SheetAccess};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheet-access")]
#[command(
    author,
    version,
    about = "Validated spreadsheet access over a JSON workbook"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct EntryArgs {
    /// Workbook fixture, e.g. {"sheets": [{"name": "Sheet1", "rows": [["42"]]}]}
    #[arg(short, long)]
    workbook: PathBuf,

    /// JSON request body
    payload: String,

    /// Sheet read by the entry point
    #[arg(long, default_value = "Sheet1")]
    sheet: String,

    /// Cell read by the entry point
    #[arg(long, default_value = "A1")]
    cell: String,
}

impl EntryArgs {
    fn config(&self) -> EntryConfig {
        EntryConfig {
            sheet_name: self.sheet.clone(),
            cell: self.cell.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the POST entry point and print its response
    Post(EntryArgs),

    /// Run the GET entry point and print its response
    Get(EntryArgs),

    /// Print the value of one cell
    Cell {
        /// Workbook fixture
        #[arg(short, long)]
        workbook: PathBuf,

        /// Sheet name
        sheet: String,

        /// Cell position, e.g. B2
        position: String,
    },

    /// Print a range as tab-separated rows
    Rows {
        /// Workbook fixture
        #[arg(short, long)]
        workbook: PathBuf,

        /// Sheet name
        sheet: String,

        /// Range positions, e.g. A6:X385
        positions: String,
    },

    /// List the sheets of a workbook
    Sheets {
        /// Workbook fixture
        #[arg(short, long)]
        workbook: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Post(args) => {
            let book = load_workbook(&args.workbook)?;
            let output = do_post_with(book, &Request::new(args.payload.clone()), &args.config())
                .context("POST entry point failed")?;
            println!("{output}");
        }
        Commands::Get(args) => {
            let book = load_workbook(&args.workbook)?;
            let output = do_get_with(book, &Request::new(args.payload.clone()), &args.config())
                .context("GET entry point failed")?;
            println!("{output}");
        }
        Commands::Cell {
            workbook,
            sheet,
            position,
        } => {
            let access = SheetAccess::new(load_workbook(&workbook)?);
            let value = access
                .cell_value(&sheet, &position)
                .with_context(|| format!("Failed to read {sheet}!{position}"))?;
            println!("{value}");
        }
        Commands::Rows {
            workbook,
            sheet,
            positions,
        } => {
            let access = SheetAccess::new(load_workbook(&workbook)?);
            let rows = access
                .rows_by_positions(&sheet, &positions)
                .with_context(|| format!("Failed to read {sheet}!{positions}"))?;
            print!("{}", format_rows(&rows));
        }
        Commands::Sheets { workbook } => {
            for (i, name) in load_workbook(&workbook)?.sheet_names().iter().enumerate() {
                println!("{i}\t{name}");
            }
        }
    }

    Ok(())
}

fn load_workbook(path: &Path) -> Result<MemorySpreadsheet> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let fixture = WorkbookFixture::from_json(&json)
        .with_context(|| format!("Failed to parse '{}'", path.display()))?;
    let book = MemorySpreadsheet::from_fixture(&fixture)
        .with_context(|| format!("Invalid workbook '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), sheets = fixture.sheets.len(), "loaded workbook");
    Ok(book)
}

/// One line per row, cells separated by tabs
fn format_rows(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| format!("{}\n", row.join("\t")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fixture(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_workbook() {
        let file = fixture(r#"{"sheets": [{"name": "Sheet1", "rows": [["42"]]}, {"name": "B"}]}"#);
        let book = load_workbook(file.path()).unwrap();
        assert_eq!(book.sheet_names(), vec!["Sheet1", "B"]);
        assert_eq!(SheetAccess::new(book).cell_value("Sheet1", "A1").unwrap(), "42");
    }

    #[test]
    fn test_load_workbook_errors() {
        let err = load_workbook(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));

        let file = fixture("{not json");
        let err = load_workbook(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));

        let file = fixture(r#"{"sheets": [{"name": "A"}, {"name": "A"}]}"#);
        let err = load_workbook(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid workbook"));
    }

    #[test]
    fn test_format_rows() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec![String::new(), "d".to_string()],
        ];
        assert_eq!(format_rows(&rows), "a\tb\n\td\n");
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from([
            "sheet-access", "get", "-w", "book.json", "{}", "--sheet", "Data", "--cell", "B2",
        ])
        .unwrap();
        match cli.command {
            Commands::Get(args) => {
                assert_eq!(
                    args.config(),
                    EntryConfig {
                        sheet_name: "Data".into(),
                        cell: "B2".into(),
                    }
                );
                assert_eq!(args.payload, "{}");
            }
            _ => panic!("expected get"),
        }
    }
}
