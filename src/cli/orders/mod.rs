use clap::{Args, Subcommand};

mod cancel_stale;
mod render_documents;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    CancelStale(cancel_stale::CancelStaleArgs),
    RenderDocuments(render_documents::RenderDocumentsArgs),
}

pub(crate) async fn run(command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::CancelStale(args) => cancel_stale::run(args).await,
        OrdersSubcommand::RenderDocuments(args) => render_documents::run(args).await,
    }
}
