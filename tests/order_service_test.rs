//! Tests for order feasibility planning and stock consumption.

mod common;

use common::{seed_material, seed_product, setup};
use shopfloor_api::{errors::ServiceError, services::orders::FulfillmentOutcome};

#[tokio::test]
async fn widget_order_with_enough_stock_is_not_delayed() {
    // Bolt stock=5 threshold=10 lead=3; Nut stock=20 threshold=10 lead=1;
    // Widget requires 2 x Bolt + 1 x Nut. 5 >= 2, so no delay even though
    // Bolt sits below its reorder threshold.
    let ctx = setup().await;
    let bolt = seed_material(&ctx, "Bolt", 5, 10, 3).await;
    let nut = seed_material(&ctx, "Nut", 20, 10, 1).await;
    let widget = seed_product(&ctx, "Widget").await;
    ctx.bom.associate(widget.id, "Bolt", 2).await.unwrap();
    ctx.bom.associate(widget.id, "Nut", 1).await.unwrap();

    let plan = ctx.orders.plan_order(widget.id).await.unwrap();
    assert!(!plan.delayed);
    assert_eq!(plan.max_delay_days, 0);
    assert_eq!(plan.lines.len(), 2);
    assert!(plan.lines.iter().all(|l| !l.short));

    let outcome = ctx.orders.fulfill_order(widget.id, false).await.unwrap();
    match outcome {
        FulfillmentOutcome::Completed {
            lines_consumed,
            delayed,
            max_delay_days,
        } => {
            assert_eq!(lines_consumed, 2);
            assert!(!delayed);
            assert_eq!(max_delay_days, 0);
        }
        other => panic!("expected completed outcome, got {:?}", other),
    }

    assert_eq!(ctx.materials.get_material(bolt.id).await.unwrap().current_stock, 3);
    assert_eq!(ctx.materials.get_material(nut.id).await.unwrap().current_stock, 19);
}

#[tokio::test]
async fn short_material_delays_the_order_and_can_go_negative() {
    // Widget requires 10 x Bolt with only 5 in stock: delayed by Bolt's
    // 3-day lead time. Accepting the delay drives stock to -5 by design.
    let ctx = setup().await;
    let bolt = seed_material(&ctx, "Bolt", 5, 10, 3).await;
    let widget = seed_product(&ctx, "Widget").await;
    ctx.bom.associate(widget.id, "Bolt", 10).await.unwrap();

    let plan = ctx.orders.plan_order(widget.id).await.unwrap();
    assert!(plan.delayed);
    assert_eq!(plan.max_delay_days, 3);
    assert!(plan.lines[0].short);

    // Declining leaves the stock untouched.
    let outcome = ctx.orders.fulfill_order(widget.id, false).await.unwrap();
    assert!(matches!(
        outcome,
        FulfillmentOutcome::DelayRequired { max_delay_days: 3 }
    ));
    assert_eq!(ctx.materials.get_material(bolt.id).await.unwrap().current_stock, 5);

    // Proceeding anyway consumes past zero.
    let outcome = ctx.orders.fulfill_order(widget.id, true).await.unwrap();
    assert!(matches!(outcome, FulfillmentOutcome::Completed { .. }));
    assert_eq!(
        ctx.materials.get_material(bolt.id).await.unwrap().current_stock,
        -5
    );
}

#[tokio::test]
async fn delay_is_the_maximum_lead_time_not_the_sum() {
    let ctx = setup().await;
    seed_material(&ctx, "Bolt", 1, 10, 3).await;
    seed_material(&ctx, "Gasket", 1, 10, 7).await;
    seed_material(&ctx, "Nut", 50, 10, 9).await;
    let widget = seed_product(&ctx, "Widget").await;
    ctx.bom.associate(widget.id, "Bolt", 5).await.unwrap();
    ctx.bom.associate(widget.id, "Gasket", 5).await.unwrap();
    // Nut is well stocked, so its long lead time must not count.
    ctx.bom.associate(widget.id, "Nut", 5).await.unwrap();

    let plan = ctx.orders.plan_order(widget.id).await.unwrap();
    assert!(plan.delayed);
    assert_eq!(plan.max_delay_days, 7);
}

#[tokio::test]
async fn product_without_bom_lines_fulfills_as_a_no_op() {
    let ctx = setup().await;
    let widget = seed_product(&ctx, "Widget").await;

    let plan = ctx.orders.plan_order(widget.id).await.unwrap();
    assert!(plan.lines.is_empty());
    assert!(!plan.delayed);

    let outcome = ctx.orders.fulfill_order(widget.id, false).await.unwrap();
    assert!(matches!(
        outcome,
        FulfillmentOutcome::Completed {
            lines_consumed: 0,
            ..
        }
    ));
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let ctx = setup().await;

    let err = ctx.orders.plan_order(7).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = ctx.orders.fulfill_order(7, true).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn repeated_fulfillment_keeps_decrementing() {
    let ctx = setup().await;
    let bolt = seed_material(&ctx, "Bolt", 9, 10, 3).await;
    let widget = seed_product(&ctx, "Widget").await;
    ctx.bom.associate(widget.id, "Bolt", 4).await.unwrap();

    ctx.orders.fulfill_order(widget.id, false).await.unwrap();
    assert_eq!(ctx.materials.get_material(bolt.id).await.unwrap().current_stock, 5);

    ctx.orders.fulfill_order(widget.id, false).await.unwrap();
    assert_eq!(ctx.materials.get_material(bolt.id).await.unwrap().current_stock, 1);

    // Third build is now short: 1 < 4.
    let outcome = ctx.orders.fulfill_order(widget.id, false).await.unwrap();
    assert!(matches!(outcome, FulfillmentOutcome::DelayRequired { .. }));
}
