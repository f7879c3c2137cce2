use clap::Args;
use jiff::Timestamp;
use orchard_app::{
    database::{self, Db},
    domain::orders::{OrdersService, PgOrdersService},
};

#[derive(Debug, Args)]
pub(crate) struct CancelStaleArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

/// Cancel orders left in `new` past the stale-order age. Intended to be
/// invoked periodically by an external scheduler.
pub(crate) async fn run(args: CancelStaleArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgOrdersService::new(Db::new(pool));

    let canceled = service
        .cancel_stale_orders(Timestamp::now())
        .await
        .map_err(|error| format!("failed to cancel stale orders: {error}"))?;

    println!("canceled {canceled} stale orders");

    Ok(())
}
