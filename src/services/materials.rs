use crate::{
    db::DbPool,
    entities::{
        bom_line, bom_line::Entity as BomLineEntity, material,
        material::Entity as MaterialEntity,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Units added to every under-threshold material by one replenishment sweep.
///
/// A fixed bump, not a top-up to a target level: a single sweep may leave a
/// material below its threshold when the deficit exceeds the increment.
pub const REPLENISHMENT_INCREMENT: i64 = 10;

/// Field values collected for creating or updating a material.
#[derive(Debug, Clone)]
pub struct MaterialInput {
    pub description: String,
    pub current_stock: i64,
    pub reorder_threshold: i64,
    pub reorder_lead_time_days: i64,
}

/// Service for managing raw materials and their stock levels.
#[derive(Clone)]
pub struct MaterialService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl MaterialService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Rejects empty descriptions and non-positive numeric fields before any
    /// statement runs.
    fn validate(input: &MaterialInput) -> Result<(), ServiceError> {
        if input.description.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Material description is required".to_string(),
            ));
        }
        if input.current_stock <= 0 || input.reorder_threshold <= 0 || input.reorder_lead_time_days <= 0
        {
            return Err(ServiceError::ValidationError(
                "Current stock, reorder threshold and reorder lead time must be greater than zero"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Duplicate-description pre-check (exact, case sensitive). `exclude_id`
    /// lets an update keep its own description.
    async fn ensure_unique_description(
        &self,
        description: &str,
        exclude_id: Option<i64>,
    ) -> Result<(), ServiceError> {
        let mut query =
            MaterialEntity::find().filter(material::Column::Description.eq(description));
        if let Some(id) = exclude_id {
            query = query.filter(material::Column::Id.ne(id));
        }
        let count = query.count(&*self.db_pool).await?;
        if count > 0 {
            return Err(ServiceError::Conflict(format!(
                "A material with description [{}] already exists",
                description
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, input), fields(description = %input.description))]
    pub async fn create_material(
        &self,
        input: MaterialInput,
    ) -> Result<material::Model, ServiceError> {
        Self::validate(&input)?;
        self.ensure_unique_description(&input.description, None)
            .await?;

        let model = material::ActiveModel {
            id: Default::default(),
            description: Set(input.description),
            current_stock: Set(input.current_stock),
            reorder_threshold: Set(input.reorder_threshold),
            reorder_lead_time_days: Set(input.reorder_lead_time_days),
        };
        let created = model.insert(&*self.db_pool).await?;

        info!("Added material [{}] with id={}", created.description, created.id);
        self.event_sender
            .send_or_log(Event::MaterialCreated(created.id))
            .await;
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_material(
        &self,
        id: i64,
        input: MaterialInput,
    ) -> Result<material::Model, ServiceError> {
        Self::validate(&input)?;

        let existing = MaterialEntity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Material with id {} not found", id)))?;
        self.ensure_unique_description(&input.description, Some(id))
            .await?;

        let mut model: material::ActiveModel = existing.into();
        model.description = Set(input.description);
        model.current_stock = Set(input.current_stock);
        model.reorder_threshold = Set(input.reorder_threshold);
        model.reorder_lead_time_days = Set(input.reorder_lead_time_days);
        let updated = model.update(&*self.db_pool).await?;

        info!("Updated material with id={}", updated.id);
        self.event_sender
            .send_or_log(Event::MaterialUpdated(updated.id))
            .await;
        Ok(updated)
    }

    /// Deletes a material unless any bill-of-materials line still references
    /// it, in which case the delete is refused.
    #[instrument(skip(self))]
    pub async fn delete_material(&self, id: i64) -> Result<(), ServiceError> {
        let existing = MaterialEntity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Material with id {} not found", id)))?;

        let references = BomLineEntity::find()
            .filter(bom_line::Column::MaterialId.eq(id))
            .count(&*self.db_pool)
            .await?;
        if references > 0 {
            return Err(ServiceError::InvalidOperation(format!(
                "Material [{}] is used by {} product(s) and cannot be deleted; remove its bill-of-materials lines first",
                existing.description, references
            )));
        }

        existing.delete(&*self.db_pool).await?;
        info!("Deleted material with id={}", id);
        self.event_sender
            .send_or_log(Event::MaterialDeleted(id))
            .await;
        Ok(())
    }

    pub async fn get_material(&self, id: i64) -> Result<material::Model, ServiceError> {
        MaterialEntity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Material with id {} not found", id)))
    }

    pub async fn list_materials(&self) -> Result<Vec<material::Model>, ServiceError> {
        let materials = MaterialEntity::find()
            .order_by_asc(material::Column::Id)
            .all(&*self.db_pool)
            .await?;
        Ok(materials)
    }

    /// Replenishment sweep: every material below its reorder threshold gets
    /// a fixed stock bump. Returns how many rows were touched.
    ///
    /// The caller is expected to have confirmed the sweep; the HTTP layer
    /// refuses unconfirmed requests.
    #[instrument(skip(self))]
    pub async fn replenish_stock(&self) -> Result<u64, ServiceError> {
        let result = MaterialEntity::update_many()
            .col_expr(
                material::Column::CurrentStock,
                Expr::col(material::Column::CurrentStock).add(REPLENISHMENT_INCREMENT),
            )
            .filter(
                Expr::col(material::Column::CurrentStock)
                    .lt(Expr::col(material::Column::ReorderThreshold)),
            )
            .exec(&*self.db_pool)
            .await?;

        info!(
            "Replenishment sweep updated {} material(s)",
            result.rows_affected
        );
        self.event_sender
            .send_or_log(Event::StockReplenished {
                materials_updated: result.rows_affected,
            })
            .await;
        Ok(result.rows_affected)
    }
}
