use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: String,
    /// Units on hand. Signed on purpose: a confirmed order may drive stock
    /// below zero when the caller accepts the replenishment delay.
    pub current_stock: i64,
    /// Stock level at which a replenishment order is placed.
    pub reorder_threshold: i64,
    /// Days to wait for delivery once replenishment is triggered.
    pub reorder_lead_time_days: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bom_line::Entity")]
    BomLines,
}

impl Related<super::bom_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BomLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
