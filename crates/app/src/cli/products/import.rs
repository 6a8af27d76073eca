use std::path::PathBuf;

use clap::Args;
use inventory_app::{
    domain::products::{PgProductsService, ProductsService, import::ImportPolicy},
    spreadsheet,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ImportArgs {
    /// Workbook to read (xlsx, xlsm, xlsb, xls or ods)
    #[arg(long)]
    file: PathBuf,

    /// How strictly rows are checked before they are written
    #[arg(long, env = "IMPORT_POLICY", value_enum, default_value_t)]
    policy: ImportPolicy,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ImportArgs) -> Result<(), String> {
    let bytes = tokio::fs::read(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let rows = spreadsheet::decode(bytes).map_err(|error| error.to_string())?;
    let products = args.policy.apply(rows).map_err(|error| error.to_string())?;

    let service = PgProductsService::new(args.database.connect().await?);

    let imported = service
        .import_products(products)
        .await
        .map_err(|error| format!("import failed: {error}"))?;

    println!("imported: {imported}");

    Ok(())
}
