use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the stockroom binary.
#[derive(Debug, Parser)]
#[command(
    name = "stockroom",
    version,
    about = "Product-management dashboard for a remote demo catalog"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "STOCKROOM_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the interactive dashboard.
    Dashboard,
    /// Print one page of the product listing.
    List(ListArgs),
    /// Print the category set.
    Categories(OutputArgs),
    /// Create a product.
    Add(ProductFieldArgs),
    /// Replace a product's fields by identifier.
    Update(UpdateArgs),
    /// Delete a product by identifier.
    Delete(DeleteArgs),
}

/// Overrides accepted by every subcommand.
#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the catalog API base URL.
    #[arg(long = "api-base-url", value_name = "URL", global = true)]
    pub api_base_url: Option<String>,

    /// Override the simulated latency (ms) requested from the catalog on listings.
    #[arg(long = "catalog-delay-ms", value_name = "MILLIS", global = true)]
    pub catalog_delay_ms: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct OutputArgs {
    /// Print raw JSON instead of the rendered view.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ListArgs {
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Free-text search; ignored when --category is set.
    #[arg(long)]
    pub search: Option<String>,

    /// Category slug, or `all`.
    #[arg(long)]
    pub category: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ProductFieldArgs {
    #[arg(long)]
    pub title: String,

    /// Price, e.g. 12.50
    #[arg(long)]
    pub price: String,

    /// Units in stock.
    #[arg(long)]
    pub stock: String,

    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub description: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct UpdateArgs {
    /// Identifier of the product to update.
    #[arg(long)]
    pub id: u64,

    #[command(flatten)]
    pub fields: ProductFieldArgs,
}

#[derive(Debug, Args, Clone)]
pub struct DeleteArgs {
    /// Identifier of the product to delete.
    #[arg(long)]
    pub id: u64,

    /// Confirm the deletion; without it nothing is sent.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub yes: bool,
}
