use crate::{
    db::DbPool,
    entities::{
        bom_line, bom_line::Entity as BomLineEntity, product, product::Entity as ProductEntity,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Field values collected for creating a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub description: String,
}

/// Service for managing finished products.
#[derive(Clone)]
pub struct ProductService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, input), fields(description = %input.description))]
    pub async fn create_product(
        &self,
        input: ProductInput,
    ) -> Result<product::Model, ServiceError> {
        if input.description.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Product description is required".to_string(),
            ));
        }

        let duplicates = ProductEntity::find()
            .filter(product::Column::Description.eq(&input.description))
            .count(&*self.db_pool)
            .await?;
        if duplicates > 0 {
            return Err(ServiceError::Conflict(format!(
                "A product with description [{}] already exists",
                input.description
            )));
        }

        let model = product::ActiveModel {
            id: Default::default(),
            description: Set(input.description),
        };
        let created = model.insert(&*self.db_pool).await?;

        info!("Added product [{}] with id={}", created.description, created.id);
        self.event_sender
            .send_or_log(Event::ProductCreated(created.id))
            .await;
        Ok(created)
    }

    /// Deletes a product and all of its bill-of-materials lines.
    ///
    /// Both deletes run inside one transaction so a failure cannot leave
    /// orphaned lines behind.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        let existing = ProductEntity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with id {} not found", id)))?;

        let txn = self.db_pool.begin().await?;
        BomLineEntity::delete_many()
            .filter(bom_line::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        existing.delete(&txn).await?;
        txn.commit().await?;

        info!("Deleted product with id={} and its bill-of-materials lines", id);
        self.event_sender
            .send_or_log(Event::ProductDeleted(id))
            .await;
        Ok(())
    }

    pub async fn get_product(&self, id: i64) -> Result<product::Model, ServiceError> {
        ProductEntity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with id {} not found", id)))
    }

    /// Resolves a product from its exact description, the way the order form
    /// resolves the user's selection.
    pub async fn find_product_by_description(
        &self,
        description: &str,
    ) -> Result<product::Model, ServiceError> {
        ProductEntity::find()
            .filter(product::Column::Description.eq(description))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product with description [{}] not found", description))
            })
    }

    pub async fn list_products(&self) -> Result<Vec<product::Model>, ServiceError> {
        let products = ProductEntity::find()
            .order_by_asc(product::Column::Id)
            .all(&*self.db_pool)
            .await?;
        Ok(products)
    }
}
