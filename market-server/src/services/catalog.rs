//! Customer-facing catalog reads

use shared::error::{AppError, ErrorCode};
use shared::models::{Product, RetailerSummary};
use sqlx::SqlitePool;

use crate::db;
use crate::error::ServiceResult;

pub async fn list_cities(pool: &SqlitePool) -> ServiceResult<Vec<String>> {
    Ok(db::retailers::list_cities(pool).await?)
}

pub async fn list_retailers(pool: &SqlitePool, city: &str) -> ServiceResult<Vec<RetailerSummary>> {
    Ok(db::retailers::list_by_city(pool, city.trim()).await?)
}

/// Priced, categorized products of one retailer.
///
/// An empty result is reported as not found.
pub async fn list_products(pool: &SqlitePool, retailer_id: i64) -> ServiceResult<Vec<Product>> {
    let products = db::products::list_visible_by_retailer(pool, retailer_id).await?;
    if products.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::ProductNotFound,
            format!("No products found for retailer {retailer_id}"),
        )
        .into());
    }
    Ok(products)
}

pub async fn list_all_products(pool: &SqlitePool) -> ServiceResult<Vec<Product>> {
    Ok(db::products::list_all(pool).await?)
}

/// Full inventory of a retailer, hidden products included
pub async fn list_retailer_products(pool: &SqlitePool, retailer_id: i64) -> ServiceResult<Vec<Product>> {
    Ok(db::products::list_by_retailer(pool, retailer_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{ProductCreate, Role, UserStatus};

    async fn retailer(pool: &SqlitePool, username: &str, city: &str) -> i64 {
        let user_id = db::users::create(
            pool,
            username,
            &format!("{username}@x.com"),
            "hash",
            Role::Retailer,
            UserStatus::Active,
            0,
        )
        .await
        .unwrap();
        db::retailers::create(pool, user_id, username, city, true).await.unwrap()
    }

    #[tokio::test]
    async fn test_hidden_products_and_empty_catalog() {
        let db = DbService::in_memory().await.unwrap();
        let rid = retailer(&db.pool, "freshmart", "Vellore").await;

        let err = list_products(&db.pool, rid).await.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::ProductNotFound));

        for (name, price, category) in [
            ("Apples", Some(95.0), Some("Fruits")),
            ("Mystery", None, Some("Fruits")),
            ("Loose", Some(10.0), None),
        ] {
            db::products::create(
                &db.pool,
                &ProductCreate {
                    retailer_id: rid,
                    name: name.into(),
                    price,
                    quantity: 10,
                    category: category.map(Into::into),
                },
            )
            .await
            .unwrap();
        }

        let visible = list_products(&db.pool, rid).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Apples");
        assert_eq!(list_retailer_products(&db.pool, rid).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_blocked_retailers_hidden() {
        let db = DbService::in_memory().await.unwrap();
        let a = retailer(&db.pool, "freshmart", "Vellore").await;
        retailer(&db.pool, "quickcart", "Vellore").await;
        retailer(&db.pool, "urbanshop", "Arani").await;

        assert_eq!(list_cities(&db.pool).await.unwrap(), vec!["Arani", "Vellore"]);
        db::retailers::set_blocked(&db.pool, a).await.unwrap();

        let vellore = list_retailers(&db.pool, "Vellore").await.unwrap();
        assert_eq!(vellore.len(), 1);
        assert_eq!(vellore[0].name, "quickcart");
    }
}
