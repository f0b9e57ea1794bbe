//! Startup data: demo retailers with a starter catalog, and the admin account
//!
//! Both steps are idempotent. Demo data is only written into an empty
//! products table and never touches an account that already holds a demo
//! username or email; the admin is only created when no admin exists.

use rand::seq::SliceRandom;
use shared::models::{ProductCreate, Role, UserStatus};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::auth::password::hash_password;
use crate::config::Config;
use crate::error::BoxError;

pub const CITIES: [&str; 8] = [
    "Vellore",
    "Katpadi",
    "Ranipet",
    "Thiruvannamalai",
    "Arani",
    "Gudiyatham",
    "Pallikonda",
    "Anaicut",
];

pub const RETAILER_NAMES: [&str; 5] = ["FreshMart", "SmartBazaar", "QuickCart", "MegaStore", "UrbanShop"];

const CATEGORIES_PER_RETAILER: usize = 4;
const ITEMS_PER_CATEGORY: usize = 2;

/// (name, price, quantity)
type CatalogItem = (&'static str, f64, i64);

const CATALOG: &[(&str, &[CatalogItem])] = &[
    (
        "Fruits",
        &[("Apples", 95.0, 150), ("Bananas", 45.0, 200), ("Oranges", 80.0, 180), ("Mangoes", 120.0, 100)],
    ),
    (
        "Vegetables",
        &[("Tomatoes", 40.0, 250), ("Potatoes", 35.0, 300), ("Carrots", 50.0, 200), ("Onions", 45.0, 220)],
    ),
    (
        "Dairy",
        &[("Milk", 52.0, 150), ("Curd", 35.0, 120), ("Butter", 120.0, 80), ("Cheese", 160.0, 70)],
    ),
    (
        "Bakery",
        &[("Bread", 40.0, 100), ("Croissant", 60.0, 80), ("Muffins", 75.0, 90), ("Buns", 30.0, 110)],
    ),
    (
        "Beverages",
        &[
            ("Green Tea", 150.0, 90),
            ("Coffee Powder", 210.0, 75),
            ("Soft Drink", 45.0, 300),
            ("Fruit Juice", 70.0, 180),
        ],
    ),
    (
        "Groceries",
        &[
            ("Rice", 68.0, 500),
            ("Wheat Flour", 50.0, 400),
            ("Sugar", 56.0, 300),
            ("Salt", 25.0, 250),
            ("Cooking Oil", 165.0, 200),
        ],
    ),
    (
        "Home Care",
        &[("Soap", 38.0, 250), ("Shampoo", 120.0, 150), ("Detergent", 180.0, 100), ("Dish Wash", 90.0, 120)],
    ),
];

struct SeedRetailer {
    username: String,
    email: String,
    name: &'static str,
    city: &'static str,
    products: Vec<(&'static str, CatalogItem)>,
}

/// Random catalog selection for every city/retailer pair
fn plan() -> Vec<SeedRetailer> {
    let mut rng = rand::thread_rng();
    let mut retailers = Vec::with_capacity(CITIES.len() * RETAILER_NAMES.len());
    for city in CITIES {
        for name in RETAILER_NAMES {
            let handle = format!("{}_{}", name.to_lowercase(), city.to_lowercase());
            let mut products = Vec::new();
            for (category, items) in CATALOG.choose_multiple(&mut rng, CATEGORIES_PER_RETAILER) {
                for item in items.choose_multiple(&mut rng, ITEMS_PER_CATEGORY) {
                    products.push((*category, *item));
                }
            }
            retailers.push(SeedRetailer {
                email: format!("{handle}@smartmarket.com"),
                username: handle,
                name,
                city,
                products,
            });
        }
    }
    retailers
}

/// Populate demo retailers and products when the catalog is empty.
///
/// Returns the number of retailers created (0 when skipped). Demo accounts
/// whose username or email is already registered are left alone.
pub async fn seed_demo_data(pool: &SqlitePool, retailer_password: &str) -> Result<usize, BoxError> {
    if super::products::count(pool).await? > 0 {
        tracing::info!("Inventory already populated, skipping seed");
        return Ok(0);
    }

    let password_hash = hash_password(retailer_password).map_err(|e| format!("Failed to hash seed password: {e}"))?;
    let retailers = plan();
    let now = now_millis();

    let mut tx = pool.begin().await?;
    let mut created = 0;
    for seed in &retailers {
        if super::users::identity_taken(&mut *tx, &seed.username, &seed.email).await? {
            tracing::debug!(username = %seed.username, "Seed account already exists, skipping");
            continue;
        }
        let user_id = super::users::create(
            &mut *tx,
            &seed.username,
            &seed.email,
            &password_hash,
            Role::Retailer,
            UserStatus::Active,
            now,
        )
        .await?;
        let retailer_id = super::retailers::create(&mut *tx, user_id, seed.name, seed.city, true).await?;
        for (category, (name, price, quantity)) in &seed.products {
            let product = ProductCreate {
                retailer_id,
                name: (*name).to_string(),
                price: Some(*price),
                quantity: *quantity,
                category: Some((*category).to_string()),
            };
            super::products::create(&mut *tx, &product).await?;
        }
        created += 1;
    }
    tx.commit().await?;

    tracing::info!(retailers = created, cities = CITIES.len(), "Demo retailers and products seeded");
    Ok(created)
}

/// Create the configured admin account if no admin exists yet.
///
/// Returns true when an admin was created.
pub async fn bootstrap_admin(pool: &SqlitePool, config: &Config) -> Result<bool, BoxError> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        return Ok(false);
    };
    if super::users::admin_exists(pool).await? {
        return Ok(false);
    }

    let email = config
        .admin_email
        .clone()
        .unwrap_or_else(|| format!("{username}@smartmarket.com"));
    let password_hash = hash_password(password).map_err(|e| format!("Failed to hash admin password: {e}"))?;
    super::users::create(
        pool,
        username,
        &email,
        &password_hash,
        Role::Admin,
        UserStatus::Active,
        now_millis(),
    )
    .await?;

    tracing::info!(username = %username, "Admin account created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use std::collections::HashSet;

    #[test]
    fn test_plan_shape() {
        let retailers = plan();
        assert_eq!(retailers.len(), 40);
        for r in &retailers {
            assert_eq!(r.products.len(), CATEGORIES_PER_RETAILER * ITEMS_PER_CATEGORY);
            let categories: HashSet<&str> = r.products.iter().map(|(c, _)| *c).collect();
            assert_eq!(categories.len(), CATEGORIES_PER_RETAILER);
            assert!(r.username.chars().all(|c| !c.is_ascii_uppercase()));
            assert!(r.email.ends_with("@smartmarket.com"));
        }
        assert!(retailers.iter().any(|r| r.username == "freshmart_vellore"));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = DbService::in_memory().await.unwrap();
        let created = seed_demo_data(&db.pool, "changeme123").await.unwrap();
        assert_eq!(created, 40);
        let products = crate::db::products::count(&db.pool).await.unwrap();
        assert_eq!(products, 40 * 8);

        let again = seed_demo_data(&db.pool, "changeme123").await.unwrap();
        assert_eq!(again, 0);
        assert_eq!(crate::db::products::count(&db.pool).await.unwrap(), products);

        let cities = crate::db::retailers::list_cities(&db.pool).await.unwrap();
        assert_eq!(cities.len(), 8);
    }

    #[tokio::test]
    async fn test_seed_after_catalog_emptied() {
        let db = DbService::in_memory().await.unwrap();
        assert_eq!(seed_demo_data(&db.pool, "changeme123").await.unwrap(), 40);

        sqlx::query("DELETE FROM products").execute(&db.pool).await.unwrap();
        let again = seed_demo_data(&db.pool, "changeme123").await.unwrap();
        assert_eq!(again, 0);
        assert_eq!(crate::db::retailers::list_accounts(&db.pool).await.unwrap().len(), 40);
    }

    #[tokio::test]
    async fn test_seed_skips_taken_username() {
        let db = DbService::in_memory().await.unwrap();
        crate::db::users::create(
            &db.pool,
            "freshmart_vellore",
            "someone@example.com",
            "hash",
            Role::Customer,
            UserStatus::Active,
            now_millis(),
        )
        .await
        .unwrap();

        let created = seed_demo_data(&db.pool, "changeme123").await.unwrap();
        assert_eq!(created, 39);
        assert_eq!(crate::db::products::count(&db.pool).await.unwrap(), 39 * 8);
    }

    #[tokio::test]
    async fn test_bootstrap_admin_once() {
        let db = DbService::in_memory().await.unwrap();
        let config = Config {
            admin_username: Some("root".into()),
            admin_password: Some("supersecret".into()),
            ..Config::default()
        };
        assert!(bootstrap_admin(&db.pool, &config).await.unwrap());
        assert!(!bootstrap_admin(&db.pool, &config).await.unwrap());
        assert!(crate::db::users::admin_exists(&db.pool).await.unwrap());
    }

    #[tokio::test]
    async fn test_bootstrap_admin_skipped_without_credentials() {
        let db = DbService::in_memory().await.unwrap();
        assert!(!bootstrap_admin(&db.pool, &Config::default()).await.unwrap());
    }
}
