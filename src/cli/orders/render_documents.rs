use clap::Args;
use orchard_app::{
    database::{self, Db},
    domain::orders::{OrdersService, PgOrdersService},
};

#[derive(Debug, Args)]
pub(crate) struct RenderDocumentsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

/// Backfill confirmation documents for completed orders lacking one.
pub(crate) async fn run(args: RenderDocumentsArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgOrdersService::new(Db::new(pool));

    let rendered = service
        .render_missing_documents()
        .await
        .map_err(|error| format!("failed to render documents: {error}"))?;

    println!("rendered {rendered} confirmation documents");

    Ok(())
}
