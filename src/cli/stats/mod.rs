use clap::{Args, Subcommand};

mod send_digest;

#[derive(Debug, Args)]
pub(crate) struct StatsCommand {
    #[command(subcommand)]
    command: StatsSubcommand,
}

#[derive(Debug, Subcommand)]
enum StatsSubcommand {
    SendDigest(send_digest::SendDigestArgs),
}

pub(crate) async fn run(command: StatsCommand) -> Result<(), String> {
    match command.command {
        StatsSubcommand::SendDigest(args) => send_digest::run(args).await,
    }
}
