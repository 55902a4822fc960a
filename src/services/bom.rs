use crate::{
    db::DbPool,
    entities::{
        bom_line, bom_line::Entity as BomLineEntity, material,
        material::Entity as MaterialEntity, product::Entity as ProductEntity,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// One row of a product's bill of materials as shown to callers.
#[derive(Debug, Clone, Serialize)]
pub struct BomLineView {
    pub material_id: i64,
    pub material_description: String,
    pub quantity_required: i64,
}

/// Service for managing which materials, and in what quantity, a product
/// consumes.
#[derive(Clone)]
pub struct BomService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl BomService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    async fn resolve_material_id(&self, description: &str) -> Result<i64, ServiceError> {
        let material = MaterialEntity::find()
            .filter(material::Column::Description.eq(description))
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Material with description [{}] not found",
                    description
                ))
            })?;
        Ok(material.id)
    }

    /// Associates a material (looked up by exact description) with a product.
    /// An existing (material, product) pair is rejected rather than updated.
    #[instrument(skip(self))]
    pub async fn associate(
        &self,
        product_id: i64,
        material_description: &str,
        quantity_required: i64,
    ) -> Result<(), ServiceError> {
        if quantity_required <= 0 {
            return Err(ServiceError::ValidationError(
                "Quantity of material units must be greater than zero".to_string(),
            ));
        }

        if ProductEntity::find_by_id(product_id)
            .one(&*self.db_pool)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!(
                "Product with id {} not found",
                product_id
            )));
        }
        let material_id = self.resolve_material_id(material_description).await?;

        let already_associated = BomLineEntity::find()
            .filter(bom_line::Column::MaterialId.eq(material_id))
            .filter(bom_line::Column::ProductId.eq(product_id))
            .count(&*self.db_pool)
            .await?;
        if already_associated > 0 {
            return Err(ServiceError::Conflict(format!(
                "Material [{}] is already associated with product {}",
                material_description, product_id
            )));
        }

        let line = bom_line::ActiveModel {
            material_id: Set(material_id),
            product_id: Set(product_id),
            quantity_required: Set(quantity_required),
        };
        line.insert(&*self.db_pool).await?;

        info!(
            "Associated material [{}] (id={}) with product {} at {} unit(s)",
            material_description, material_id, product_id, quantity_required
        );
        self.event_sender
            .send_or_log(Event::MaterialAssociated {
                product_id,
                material_id,
            })
            .await;
        Ok(())
    }

    /// Removes the bill-of-materials line for a (material, product) pair.
    #[instrument(skip(self))]
    pub async fn disassociate(
        &self,
        product_id: i64,
        material_description: &str,
    ) -> Result<(), ServiceError> {
        let material_id = self.resolve_material_id(material_description).await?;

        let result = BomLineEntity::delete_many()
            .filter(bom_line::Column::MaterialId.eq(material_id))
            .filter(bom_line::Column::ProductId.eq(product_id))
            .exec(&*self.db_pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Material [{}] is not associated with product {}",
                material_description, product_id
            )));
        }

        info!(
            "Disassociated material [{}] (id={}) from product {}",
            material_description, material_id, product_id
        );
        self.event_sender
            .send_or_log(Event::MaterialDisassociated {
                product_id,
                material_id,
            })
            .await;
        Ok(())
    }

    /// Lists a product's bill of materials, ordered by material id so the
    /// result is deterministic.
    pub async fn list_associated(&self, product_id: i64) -> Result<Vec<BomLineView>, ServiceError> {
        let rows = BomLineEntity::find()
            .filter(bom_line::Column::ProductId.eq(product_id))
            .find_also_related(MaterialEntity)
            .order_by_asc(bom_line::Column::MaterialId)
            .all(&*self.db_pool)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(line, material)| {
                material.map(|m| BomLineView {
                    material_id: m.id,
                    material_description: m.description,
                    quantity_required: line.quantity_required,
                })
            })
            .collect())
    }
}
