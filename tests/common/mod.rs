use std::sync::Arc;

use sea_orm::{ConnectOptions, Database};
use shopfloor_api::{
    db::{self, DbPool},
    entities::{material, product},
    events::{self, EventSender},
    services::{
        bom::BomService,
        materials::{MaterialInput, MaterialService},
        orders::OrderService,
        products::{ProductInput, ProductService},
    },
};
use tokio::sync::mpsc;

/// Test harness wiring every service to a fresh in-memory SQLite database.
pub struct TestContext {
    pub db: Arc<DbPool>,
    pub event_sender: EventSender,
    pub materials: MaterialService,
    pub products: ProductService,
    pub bom: BomService,
    pub orders: OrderService,
    _event_task: tokio::task::JoinHandle<()>,
}

pub async fn setup() -> TestContext {
    // A single connection keeps every statement on the same in-memory store.
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("in-memory database");
    db::run_migrations(&db).await.expect("migrations");
    let db = Arc::new(db);

    let (event_tx, event_rx) = mpsc::channel(64);
    let event_sender = EventSender::new(event_tx);
    let event_task = tokio::spawn(events::process_events(event_rx));

    TestContext {
        materials: MaterialService::new(db.clone(), event_sender.clone()),
        products: ProductService::new(db.clone(), event_sender.clone()),
        bom: BomService::new(db.clone(), event_sender.clone()),
        orders: OrderService::new(db.clone(), event_sender.clone()),
        db,
        event_sender,
        _event_task: event_task,
    }
}

#[allow(dead_code)]
pub async fn seed_material(
    ctx: &TestContext,
    description: &str,
    current_stock: i64,
    reorder_threshold: i64,
    reorder_lead_time_days: i64,
) -> material::Model {
    ctx.materials
        .create_material(MaterialInput {
            description: description.to_string(),
            current_stock,
            reorder_threshold,
            reorder_lead_time_days,
        })
        .await
        .expect("seed material")
}

#[allow(dead_code)]
pub async fn seed_product(ctx: &TestContext, description: &str) -> product::Model {
    ctx.products
        .create_product(ProductInput {
            description: description.to_string(),
        })
        .await
        .expect("seed product")
}
