use clap::Args;
use jiff::{Span, Zoned};
use orchard_app::{
    database::{self, Db},
    domain::{
        articles::{ArticlesService, PgArticlesService, models::NewArticle},
        catalog::{
            CatalogService, PgCatalogService,
            models::{NewCategory, NewDiscount, NewProduct},
        },
        users::{
            PgUsersService, UsersService, UsersServiceError,
            models::{NewUser, Role},
        },
    },
};
use uuid::Uuid;

const CATEGORIES: [&str; 5] = ["Handsets", "Laptops", "Tablets", "Watches", "Audio"];

// (title, price in minor units, category index)
const PRODUCTS: [(&str, u64, usize); 8] = [
    ("Pome 13", 79_990, 0),
    ("Pome 13 Pro", 99_990, 0),
    ("Slab Air", 59_990, 2),
    ("Slab Pro 12.9", 109_990, 2),
    ("Bramley Air M2", 119_990, 1),
    ("Bramley Pro 14", 189_990, 1),
    ("Chrono Series 8", 41_990, 3),
    ("Pips Pro 2", 22_990, 4),
];

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

/// Seed a freshly migrated database with a demo catalog.
pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let db = Db::new(pool);
    let users = PgUsersService::new(db.clone());
    let catalog = PgCatalogService::new(db.clone());
    let articles = PgArticlesService::new(db);

    let admin_uuid = match users.get_user_by_username("admin").await {
        Ok(admin) => admin.uuid,
        Err(UsersServiceError::NotFound) => {
            let uuid = Uuid::now_v7();

            users
                .create_user(NewUser {
                    uuid,
                    username: "admin".to_string(),
                    email: "admin@example.com".to_string(),
                    phone: String::new(),
                    address: String::new(),
                    role: Role::Admin,
                })
                .await
                .map_err(|error| format!("failed to create seed admin: {error}"))?;

            uuid
        }
        Err(error) => return Err(format!("failed to look up seed admin: {error}")),
    };

    let admin = users
        .require_admin(admin_uuid)
        .await
        .map_err(|error| format!("failed to grant admin capability: {error}"))?;

    let mut categories = Vec::with_capacity(CATEGORIES.len());

    for name in CATEGORIES {
        let category = catalog
            .create_category(
                &admin,
                NewCategory {
                    uuid: Uuid::now_v7(),
                    name: name.to_string(),
                },
            )
            .await
            .map_err(|error| format!("failed to create category `{name}`: {error}"))?;

        categories.push(category);
    }

    let mut first_product = None;

    for (title, price, category) in PRODUCTS {
        let product = catalog
            .create_product(
                &admin,
                NewProduct {
                    uuid: Uuid::now_v7(),
                    title: title.to_string(),
                    description: format!("{title} — demo catalog entry"),
                    price,
                    manufacturer: "Orchard".to_string(),
                    category_uuid: categories.get(category).map(|c| c.uuid),
                },
            )
            .await
            .map_err(|error| format!("failed to create product `{title}`: {error}"))?;

        first_product.get_or_insert(product.uuid);
    }

    if let Some(product_uuid) = first_product {
        let today = Zoned::now().date();
        let end_date = today
            .checked_add(Span::new().days(30))
            .map_err(|error| format!("failed to compute discount window: {error}"))?;

        catalog
            .create_discount(
                &admin,
                NewDiscount {
                    uuid: Uuid::now_v7(),
                    product_uuid,
                    percent: 10,
                    start_date: today,
                    end_date,
                },
            )
            .await
            .map_err(|error| format!("failed to create demo discount: {error}"))?;
    }

    for (title, featured) in [
        ("Autumn lineup review", true),
        ("Choosing your first laptop", false),
        ("Five accessories worth having", false),
    ] {
        let article = articles
            .create_article(
                &admin,
                NewArticle {
                    uuid: Uuid::now_v7(),
                    title: title.to_string(),
                    teaser: format!("{title} — the short version"),
                    full_text: format!("{title} — the long version."),
                    source_url: String::new(),
                    is_featured: featured,
                },
            )
            .await
            .map_err(|error| format!("failed to create article `{title}`: {error}"))?;

        if let Some(category) = categories.first() {
            articles
                .tag_category(&admin, article.uuid, category.uuid, 1)
                .await
                .map_err(|error| format!("failed to tag article `{title}`: {error}"))?;
        }
    }

    println!(
        "seeded {} categories, {} products, 3 articles",
        CATEGORIES.len(),
        PRODUCTS.len()
    );

    Ok(())
}
