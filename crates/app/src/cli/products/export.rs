use std::path::PathBuf;

use clap::Args;
use inventory_app::{
    domain::products::{PgProductsService, ProductsService},
    spreadsheet,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ExportArgs {
    /// Destination xlsx file; overwritten when it exists
    #[arg(long)]
    file: PathBuf,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ExportArgs) -> Result<(), String> {
    let service = PgProductsService::new(args.database.connect().await?);

    let products = service
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    let bytes = spreadsheet::encode(&products).map_err(|error| error.to_string())?;

    tokio::fs::write(&args.file, bytes)
        .await
        .map_err(|error| format!("failed to write {}: {error}", args.file.display()))?;

    println!("exported: {} products to {}", products.len(), args.file.display());

    Ok(())
}
