use std::{io::stdout, path::PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::{debug, error, info};

use waste_skips::{
    actor::TableExporter,
    adapter::{DirectoryResources, EmbeddedResources, ResourceSource},
    model::{LoaderOptions, RaggedRows, ResourceRef, Table},
    service::TableLoader,
    Result,
};

/// The bundled datasets.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Dataset {
    /// The November 2023 skip listing.
    Skips,
    /// The data dictionary.
    Dictionary,
}

impl Dataset {
    fn reference(self) -> ResourceRef {
        match self {
            Self::Skips => ResourceRef::SKIPS,
            Self::Dictionary => ResourceRef::DICTIONARY,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(version, about = "Print the Blantyre waste skips datasets as CSV.")]
struct CLIArguments {
    /// The dataset to print.
    #[arg(value_enum)]
    dataset: Dataset,

    /// Read the datasets from this directory instead of the bundled copies.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Reject rows shorter than the header instead of padding them with
    /// missing values.
    #[arg(long)]
    strict: bool,

    /// Trim whitespace around headers and fields.
    #[arg(long)]
    trim: bool,

    /// Print the column names and types instead of the content.
    #[arg(long)]
    schema: bool,
}

struct Application {
    arguments: CLIArguments,
}

impl Application {
    fn new(arguments: CLIArguments) -> Result<Self> {
        if let Some(data_dir) = &arguments.data_dir {
            if !data_dir.exists() {
                bail!("Data directory does not exist: '{}'.", data_dir.display());
            }
            if !data_dir.is_dir() {
                bail!("Data directory is not a directory: '{}'.", data_dir.display());
            }
        }
        let this = Self { arguments };

        Ok(this)
    }

    fn options(&self) -> LoaderOptions {
        let ragged_rows = if self.arguments.strict {
            RaggedRows::Strict
        } else {
            RaggedRows::PadShort
        };

        LoaderOptions::default()
            .with_ragged_rows(ragged_rows)
            .with_trim(self.arguments.trim)
    }

    fn load_from<S: ResourceSource>(&self, source: S) -> Result<Table> {
        let reference = self.arguments.dataset.reference();
        let table = TableLoader::new(source)
            .with_options(self.options())
            .load(&reference)
            .with_context(|| format!("Could not load the '{reference}' dataset."))?;

        Ok(table)
    }

    fn run(&self) -> Result<()> {
        info!("Starting WASTE_SKIPS version {}", env!("CARGO_PKG_VERSION"));

        let table = match &self.arguments.data_dir {
            Some(data_dir) => {
                debug!("Reading datasets from '{}'.", data_dir.display());
                self.load_from(DirectoryResources::new(data_dir))?
            }
            None => self.load_from(EmbeddedResources::bundled())?,
        };
        info!(
            "Loaded {} rows and {} columns.",
            table.row_count(),
            table.column_count()
        );

        let exporter = TableExporter::new(table, Box::new(stdout()));
        if self.arguments.schema {
            exporter.run_schema()
        } else {
            exporter.run()
        }
    }
}

fn main() -> Result<()> {
    let arguments = CLIArguments::parse();
    env_logger::init();
    let application = Application::new(arguments)?;

    let result = application.run();

    match &result {
        Ok(_) => {
            info!("WASTE_SKIPS completed successfully");
        }
        Err(error) => {
            error!("WASTE_SKIPS failed with error: {:#}", error);
        }
    };

    result
}
