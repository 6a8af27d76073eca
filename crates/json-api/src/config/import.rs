//! Import Config

use clap::Args;
use inventory_app::domain::products::import::ImportPolicy;

/// Spreadsheet import settings.
#[derive(Debug, Args)]
pub struct ImportConfig {
    /// How strictly imported rows are checked (permissive, strict)
    #[arg(
        long = "import-policy",
        env = "IMPORT_POLICY",
        value_enum,
        default_value_t
    )]
    pub policy: ImportPolicy,
}
