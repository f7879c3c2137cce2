use clap::{Parser, Subcommand};

mod db;
mod orders;
mod stats;
mod users;

#[derive(Debug, Parser)]
#[command(name = "orchard-app", about = "Orchard storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Users(users::UsersCommand),
    Orders(orders::OrdersCommand),
    Stats(stats::StatsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Users(command) => users::run(command).await,
            Commands::Orders(command) => orders::run(command).await,
            Commands::Stats(command) => stats::run(command).await,
        }
    }
}
