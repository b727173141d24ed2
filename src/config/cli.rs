use crate::adapters::table::{read_raw_rows, TableFormat};
use crate::config::toml_config::{AppConfig, StoreBackend, DEFAULT_CONFIG_FILE};
use crate::core::format::parse_date_br;
use crate::domain::model::{QuoteStatus, RawRow, RawValue};
use crate::utils::error::{QuoteError, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "quote-desk")]
#[command(about = "Service quotes: line items, yearly sequential ids, documents and share links")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override storage.data_dir
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Override storage.backend
    #[arg(long, value_enum, global = true)]
    pub backend: Option<StoreBackend>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Clean a raw item table (.json or .csv) and write the results
    Normalize {
        input: String,
        #[arg(short, long, default_value = ".")]
        output: String,
    },
    /// Show the id the next quote would receive
    NextId {
        /// Reference date (dd/mm/yyyy or yyyy-mm-dd), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Create a quote
    Create(CreateArgs),
    /// Edit a quote, keeping its id
    Update(UpdateArgs),
    /// Delete a quote
    Delete { id: String },
    /// List quotes, newest first
    List,
    /// Print a quote document
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the WhatsApp share link of a quote
    Share { id: String },
    /// Revenue summary over a date range
    Report {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Write every quote to a ZIP archive
    Export {
        #[arg(short, long, default_value = "quotes-export.zip")]
        output: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ItemArgs {
    /// Line item as "description;quantity;unit price" (repeatable)
    #[arg(long = "item")]
    pub items: Vec<String>,

    /// Item table to read (.json or .csv)
    #[arg(long)]
    pub items_file: Option<String>,
}

impl ItemArgs {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.items_file.is_none()
    }

    /// Rows from the items file first, then each `--item` in order.
    pub async fn rows(&self) -> Result<Vec<RawRow>> {
        let mut rows = match &self.items_file {
            Some(path) => {
                let format = TableFormat::from_path(path)?;
                let bytes = tokio::fs::read(path).await?;
                read_raw_rows(&bytes, format)?
            }
            None => Vec::new(),
        };
        rows.extend(self.items.iter().map(|item| parse_item_arg(item)));
        Ok(rows)
    }
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub customer: String,
    #[arg(long, default_value = "")]
    pub contact: String,
    /// dd/mm/yyyy or yyyy-mm-dd, defaults to today
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long, default_value = "Pendente")]
    pub status: String,
    #[command(flatten)]
    pub items: ItemArgs,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long)]
    pub customer: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    // Replaces every stored item when given.
    #[command(flatten)]
    pub items: ItemArgs,
}

impl CliConfig {
    /// Configuration file merged with command-line overrides.
    pub fn load_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::from_file_or_default(DEFAULT_CONFIG_FILE)?,
        };
        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        if let Some(backend) = self.backend {
            config.storage.backend = backend;
        }
        Ok(config)
    }
}

/// Accepts `dd/mm/yyyy` or ISO `yyyy-mm-dd`.
pub fn parse_date_arg(text: &str) -> Result<NaiveDate> {
    parse_date_br(text)
        .or_else(|| NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| QuoteError::ValidationError {
            message: format!("invalid date '{}', use dd/mm/yyyy", text),
        })
}

pub fn parse_status_arg(text: &str) -> Result<QuoteStatus> {
    text.parse::<QuoteStatus>()
        .map_err(|message| QuoteError::ValidationError { message })
}

/// `"Compressor;2;150.5"` into a raw row; missing parts stay missing.
pub fn parse_item_arg(text: &str) -> RawRow {
    let mut parts = text.splitn(3, ';').map(|part| part.trim().to_string());
    let mut next = || {
        parts
            .next()
            .filter(|part| !part.is_empty())
            .map(RawValue::Text)
    };
    RawRow {
        description: next(),
        quantity: next(),
        unit_price: next(),
    }
}
