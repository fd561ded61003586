use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use cheatsheet_pdf::model::groups_from_json;
use cheatsheet_pdf::sample::sample_cheatsheet;
use cheatsheet_pdf::style::PaperSize;
use cheatsheet_pdf::{ExportBuilder, Group};

/// Exports technical cheatsheets to paginated PDF documents.
///
/// Output files are named `tech-cheatsheet-data-<YYYY-MM-DD>.pdf` and written
/// to the output directory (the current directory by default).
#[derive(Parser)]
#[command(author, version, about = "Export cheatsheets to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a cheatsheet stored as JSON.
    #[command(name = "export")]
    Export {
        /// JSON file holding an array of groups.
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Export the bundled sample cheatsheet.
    #[command(name = "sample", alias = "demo")]
    Sample {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Directory to write the PDF into.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Paper size of the generated pages.
    #[arg(long, value_enum, default_value = "a4")]
    paper: Paper,

    /// Embed a bookmark for every group (requires the `bookmarks` feature).
    #[arg(long)]
    bookmarks: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Paper {
    A4,
    Letter,
}

impl From<Paper> for PaperSize {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::A4 => PaperSize::A4,
            Paper::Letter => PaperSize::Letter,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export { input, output } => {
            load_groups(&input).and_then(|groups| export(&groups, &output))
        }
        Commands::Sample { output } => export(&sample_cheatsheet(), &output),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn load_groups(path: &Path) -> Result<Vec<Group>, Box<dyn Error>> {
    let json = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    let groups = groups_from_json(&json)
        .map_err(|err| format!("Invalid cheatsheet in {}: {}", path.display(), err))?;
    info!("Loaded {} group(s) from {}", groups.len(), path.display());
    Ok(groups)
}

fn export(groups: &[Group], args: &OutputArgs) -> Result<(), Box<dyn Error>> {
    let builder = ExportBuilder::new().with_paper_size(args.paper.into());
    let builder = with_bookmarks(builder, args.bookmarks)?;

    let pdf = builder.render(groups)?;
    let path = pdf.save_in(&args.output)?;
    info!("Saved {}", path.display());
    println!(
        "Generated {} ({} pages, {} bytes)",
        path.display(),
        pdf.page_count,
        pdf.bytes.len()
    );
    Ok(())
}

#[cfg(feature = "bookmarks")]
fn with_bookmarks(builder: ExportBuilder, enabled: bool) -> Result<ExportBuilder, Box<dyn Error>> {
    Ok(builder.with_bookmarks(enabled))
}

#[cfg(not(feature = "bookmarks"))]
fn with_bookmarks(builder: ExportBuilder, enabled: bool) -> Result<ExportBuilder, Box<dyn Error>> {
    if enabled {
        return Err("Enable the `bookmarks` feature to embed group bookmarks".into());
    }
    Ok(builder)
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
