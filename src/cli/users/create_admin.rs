use clap::Args;
use orchard_app::{
    database::{self, Db},
    domain::users::{
        PgUsersService, UsersService,
        models::{NewUser, Role},
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Administrator username
    #[arg(long, default_value = "admin")]
    username: String,

    /// Administrator email
    #[arg(long)]
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let user = service
        .create_user(NewUser {
            uuid: Uuid::now_v7(),
            username: args.username,
            email: args.email,
            phone: String::new(),
            address: String::new(),
            role: Role::Admin,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("role: {}", user.role.as_str());

    Ok(())
}
