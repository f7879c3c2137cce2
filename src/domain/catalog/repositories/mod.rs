//! Catalog Repositories

mod categories;
mod discounts;
mod products;

pub(crate) use categories::PgCategoriesRepository;
pub(crate) use discounts::PgDiscountsRepository;
pub(crate) use products::PgProductsRepository;
