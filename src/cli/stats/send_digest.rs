use clap::Args;
use orchard_app::{
    database::{self, Db},
    domain::reports::{HttpMailer, MailerConfig, PgReportsService},
};

#[derive(Debug, Args)]
pub(crate) struct SendDigestArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Mail API address
    #[arg(long, env = "MAIL_API_ADDR")]
    mail_addr: String,

    /// Mail API token
    #[arg(long, env = "MAIL_API_TOKEN", hide_env_values = true)]
    mail_token: String,

    /// Sender address for the digest
    #[arg(long, env = "MAIL_SENDER", default_value = "store@orchard.example")]
    mail_sender: String,
}

/// Send the weekly stats digest to administrators. Intended to be invoked
/// periodically by an external scheduler.
pub(crate) async fn run(args: SendDigestArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgReportsService::new(Db::new(pool));

    let mailer = HttpMailer::new(MailerConfig {
        addr: args.mail_addr,
        token: args.mail_token,
        sender: args.mail_sender,
    });

    let recipients = service
        .send_weekly_digest(&mailer)
        .await
        .map_err(|error| format!("failed to send digest: {error}"))?;

    println!("digest sent to {recipients} administrators");

    Ok(())
}
