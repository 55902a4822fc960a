use crate::{
    db::DbPool,
    entities::{
        bom_line, bom_line::Entity as BomLineEntity, material,
        material::Entity as MaterialEntity, product::Entity as ProductEntity,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// One required material in an order plan.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPlanLine {
    pub material_id: i64,
    pub material_description: String,
    pub current_stock: i64,
    pub quantity_required: i64,
    pub reorder_lead_time_days: i64,
    /// True when current stock does not cover the required quantity.
    pub short: bool,
}

/// Feasibility assessment for building one unit of a product right now.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPlan {
    pub product_id: i64,
    pub product_description: String,
    pub lines: Vec<OrderPlanLine>,
    pub delayed: bool,
    /// Maximum replenishment lead time among short materials. Replenishments
    /// are assumed to run in parallel, so the total delay is the slowest
    /// single material, not the sum.
    pub max_delay_days: i64,
}

/// Result of an order-fulfillment request.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FulfillmentOutcome {
    /// The order is delayed and the caller has not accepted the delay.
    /// No stock was touched.
    DelayRequired { max_delay_days: i64 },
    /// Stock was decremented for every bill-of-materials line.
    Completed {
        lines_consumed: usize,
        delayed: bool,
        max_delay_days: i64,
    },
}

/// Service implementing order feasibility and stock consumption.
#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl OrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Joins the product's bill of materials against current stock and
    /// computes whether the order is delayed and by how many days.
    ///
    /// A product with no bill-of-materials lines yields an empty plan with no
    /// delay.
    #[instrument(skip(self))]
    pub async fn plan_order(&self, product_id: i64) -> Result<OrderPlan, ServiceError> {
        let product = ProductEntity::find_by_id(product_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product with id {} not found", product_id))
            })?;

        let rows = BomLineEntity::find()
            .filter(bom_line::Column::ProductId.eq(product_id))
            .find_also_related(MaterialEntity)
            .order_by_asc(bom_line::Column::MaterialId)
            .all(&*self.db_pool)
            .await?;

        let mut lines = Vec::with_capacity(rows.len());
        let mut delayed = false;
        let mut max_delay_days = 0;
        for (line, material) in rows {
            let material = material.ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Material with id {} referenced by product {} not found",
                    line.material_id, product_id
                ))
            })?;

            let short = material.current_stock < line.quantity_required;
            if short {
                delayed = true;
                if max_delay_days < material.reorder_lead_time_days {
                    max_delay_days = material.reorder_lead_time_days;
                }
            }
            lines.push(OrderPlanLine {
                material_id: material.id,
                material_description: material.description,
                current_stock: material.current_stock,
                quantity_required: line.quantity_required,
                reorder_lead_time_days: material.reorder_lead_time_days,
                short,
            });
        }

        Ok(OrderPlan {
            product_id,
            product_description: product.description,
            lines,
            delayed,
            max_delay_days,
        })
    }

    /// Fulfills one order for the product: plans it, and unless a delay is
    /// pending the caller's acceptance, decrements stock for every required
    /// material inside a single transaction.
    ///
    /// No shortage check blocks the decrement: when the caller accepts the
    /// delay, stock goes negative and replenishment catches up later.
    #[instrument(skip(self))]
    pub async fn fulfill_order(
        &self,
        product_id: i64,
        accept_delay: bool,
    ) -> Result<FulfillmentOutcome, ServiceError> {
        let plan = self.plan_order(product_id).await?;

        if plan.delayed && !accept_delay {
            info!(
                "Order for product {} delayed by {} day(s); awaiting caller confirmation",
                product_id, plan.max_delay_days
            );
            return Ok(FulfillmentOutcome::DelayRequired {
                max_delay_days: plan.max_delay_days,
            });
        }

        let txn = self.db_pool.begin().await?;
        for line in &plan.lines {
            MaterialEntity::update_many()
                .col_expr(
                    material::Column::CurrentStock,
                    Expr::col(material::Column::CurrentStock).sub(line.quantity_required),
                )
                .filter(material::Column::Id.eq(line.material_id))
                .exec(&txn)
                .await?;
            info!(
                "Stock updated for material id={} - previous stock=[{}] - new stock=[{}]",
                line.material_id,
                line.current_stock,
                line.current_stock - line.quantity_required
            );
        }
        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::OrderFulfilled {
                product_id,
                delayed: plan.delayed,
                max_delay_days: plan.max_delay_days,
            })
            .await;

        Ok(FulfillmentOutcome::Completed {
            lines_consumed: plan.lines.len(),
            delayed: plan.delayed,
            max_delay_days: plan.max_delay_days,
        })
    }
}
