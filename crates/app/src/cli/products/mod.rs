use clap::{Args, Subcommand};

mod export;
mod import;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// Import products from a spreadsheet
    Import(import::ImportArgs),
    /// Export every product to an xlsx file
    Export(export::ExportArgs),
}

pub(crate) async fn run(command: ProductsCommand) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::Import(args) => import::run(args).await,
        ProductsSubcommand::Export(args) => export::run(args).await,
    }
}
