//! Retailer inventory mutations

use shared::error::{AppError, ErrorCode};
use shared::models::{InventoryUpdate, Product, ProductCreate, ProductUpdate};
use sqlx::SqlitePool;

use crate::db;
use crate::error::ServiceResult;
use crate::orders::money::{validate_price, validate_stock};

fn product_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, format!("Product {id} not found"))
        .with_detail("product_id", id)
}

pub async fn get_product(pool: &SqlitePool, id: i64) -> ServiceResult<Product> {
    db::products::find_by_id(pool, id)
        .await?
        .ok_or_else(|| product_not_found(id).into())
}

/// Overwrite stock (and optionally price and category) of the product
/// identified by retailer and name.
pub async fn update_inventory(pool: &SqlitePool, req: InventoryUpdate) -> ServiceResult<Product> {
    validate_stock(req.new_qty)?;
    if let Some(price) = req.price {
        validate_price(price)?;
    }

    let name = req.product_name.trim();
    let product = db::products::find_by_retailer_and_name(pool, req.retailer_id, name)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {name} not found for retailer {}", req.retailer_id),
            )
        })?;

    let changes = ProductUpdate {
        quantity: Some(req.new_qty),
        price: req.price,
        category: req.category,
        ..ProductUpdate::default()
    };
    db::products::update(pool, product.id, &changes).await?;

    tracing::info!(
        product_id = product.id,
        retailer_id = req.retailer_id,
        old_qty = product.quantity,
        new_qty = req.new_qty,
        "Inventory updated"
    );
    get_product(pool, product.id).await
}

pub async fn create_product(pool: &SqlitePool, data: ProductCreate) -> ServiceResult<Product> {
    if data.name.trim().is_empty() {
        return Err(AppError::with_message(ErrorCode::RequiredField, "Product name is required").into());
    }
    validate_stock(data.quantity)?;
    if let Some(price) = data.price {
        validate_price(price)?;
    }
    db::retailers::find_by_id(pool, data.retailer_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RetailerNotFound))?;

    let data = ProductCreate {
        name: data.name.trim().to_string(),
        ..data
    };
    let id = db::products::create(pool, &data).await?;
    tracing::info!(product_id = id, retailer_id = data.retailer_id, name = %data.name, "Product created");
    get_product(pool, id).await
}

pub async fn update_product(pool: &SqlitePool, id: i64, data: ProductUpdate) -> ServiceResult<Product> {
    if let Some(quantity) = data.quantity {
        validate_stock(quantity)?;
    }
    if let Some(price) = data.price {
        validate_price(price)?;
    }
    if let Some(name) = &data.name
        && name.trim().is_empty()
    {
        return Err(AppError::with_message(ErrorCode::RequiredField, "Product name is required").into());
    }

    if !db::products::update(pool, id, &data).await? {
        return Err(product_not_found(id).into());
    }
    tracing::info!(product_id = id, "Product updated");
    get_product(pool, id).await
}

/// Order lines keep their name snapshot; their product reference is cleared.
pub async fn delete_product(pool: &SqlitePool, id: i64) -> ServiceResult<()> {
    if !db::products::delete(pool, id).await? {
        return Err(product_not_found(id).into());
    }
    tracing::info!(product_id = id, "Product deleted");
    Ok(())
}
