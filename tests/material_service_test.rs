//! Tests for material CRUD, validation, referential checks, and the stock
//! replenishment sweep.

mod common;

use common::{seed_material, seed_product, setup};
use shopfloor_api::{
    errors::ServiceError,
    services::materials::{MaterialInput, REPLENISHMENT_INCREMENT},
};

#[tokio::test]
async fn create_and_list_materials() {
    let ctx = setup().await;

    let bolt = seed_material(&ctx, "Bolt", 5, 10, 3).await;
    let nut = seed_material(&ctx, "Nut", 20, 10, 1).await;

    let listed = ctx.materials.list_materials().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, bolt.id);
    assert_eq!(listed[0].description, "Bolt");
    assert_eq!(listed[1].id, nut.id);
    assert_eq!(listed[1].current_stock, 20);
}

#[tokio::test]
async fn create_material_rejects_empty_description() {
    let ctx = setup().await;

    let err = ctx
        .materials
        .create_material(MaterialInput {
            description: "   ".to_string(),
            current_stock: 5,
            reorder_threshold: 10,
            reorder_lead_time_days: 3,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn create_material_rejects_zero_numeric_fields() {
    let ctx = setup().await;

    for (stock, threshold, lead) in [(0, 10, 3), (5, 0, 3), (5, 10, 0)] {
        let err = ctx
            .materials
            .create_material(MaterialInput {
                description: "Washer".to_string(),
                current_stock: stock,
                reorder_threshold: threshold,
                reorder_lead_time_days: lead,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));
    }

    assert!(ctx.materials.list_materials().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_material_rejects_duplicate_description() {
    let ctx = setup().await;
    seed_material(&ctx, "Bolt", 5, 10, 3).await;

    let err = ctx
        .materials
        .create_material(MaterialInput {
            description: "Bolt".to_string(),
            current_stock: 8,
            reorder_threshold: 4,
            reorder_lead_time_days: 2,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(ctx.materials.list_materials().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_material_in_place() {
    let ctx = setup().await;
    let bolt = seed_material(&ctx, "Bolt", 5, 10, 3).await;

    // Keeping its own description is not a duplicate.
    let updated = ctx
        .materials
        .update_material(
            bolt.id,
            MaterialInput {
                description: "Bolt".to_string(),
                current_stock: 7,
                reorder_threshold: 12,
                reorder_lead_time_days: 4,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, bolt.id);
    assert_eq!(updated.current_stock, 7);
    assert_eq!(updated.reorder_threshold, 12);
    assert_eq!(updated.reorder_lead_time_days, 4);
}

#[tokio::test]
async fn update_material_rejects_taken_description() {
    let ctx = setup().await;
    seed_material(&ctx, "Bolt", 5, 10, 3).await;
    let nut = seed_material(&ctx, "Nut", 20, 10, 1).await;

    let err = ctx
        .materials
        .update_material(
            nut.id,
            MaterialInput {
                description: "Bolt".to_string(),
                current_stock: 20,
                reorder_threshold: 10,
                reorder_lead_time_days: 1,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn update_missing_material_is_not_found() {
    let ctx = setup().await;

    let err = ctx
        .materials
        .update_material(
            999,
            MaterialInput {
                description: "Ghost".to_string(),
                current_stock: 1,
                reorder_threshold: 1,
                reorder_lead_time_days: 1,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn delete_unreferenced_material_succeeds() {
    let ctx = setup().await;
    let bolt = seed_material(&ctx, "Bolt", 5, 10, 3).await;

    ctx.materials.delete_material(bolt.id).await.unwrap();
    assert!(ctx.materials.list_materials().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_referenced_material_is_refused() {
    let ctx = setup().await;
    let bolt = seed_material(&ctx, "Bolt", 5, 10, 3).await;
    let widget = seed_product(&ctx, "Widget").await;
    ctx.bom.associate(widget.id, "Bolt", 2).await.unwrap();

    let err = ctx.materials.delete_material(bolt.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));

    // Still listed.
    assert_eq!(ctx.materials.list_materials().await.unwrap().len(), 1);

    // Removing the association lifts the refusal.
    ctx.bom.disassociate(widget.id, "Bolt").await.unwrap();
    ctx.materials.delete_material(bolt.id).await.unwrap();
}

#[tokio::test]
async fn replenish_bumps_only_materials_below_threshold() {
    let ctx = setup().await;
    let low = seed_material(&ctx, "Bolt", 5, 10, 3).await;
    let ok = seed_material(&ctx, "Nut", 20, 10, 1).await;
    let at_threshold = seed_material(&ctx, "Washer", 10, 10, 2).await;

    let updated = ctx.materials.replenish_stock().await.unwrap();
    assert_eq!(updated, 1);

    assert_eq!(
        ctx.materials.get_material(low.id).await.unwrap().current_stock,
        5 + REPLENISHMENT_INCREMENT
    );
    assert_eq!(ctx.materials.get_material(ok.id).await.unwrap().current_stock, 20);
    // At the threshold is not below it.
    assert_eq!(
        ctx.materials
            .get_material(at_threshold.id)
            .await
            .unwrap()
            .current_stock,
        10
    );
}

#[tokio::test]
async fn replenish_is_a_fixed_bump_not_a_top_up() {
    let ctx = setup().await;
    let deep_deficit = seed_material(&ctx, "Rivet", 2, 50, 5).await;

    let updated = ctx.materials.replenish_stock().await.unwrap();
    assert_eq!(updated, 1);
    assert_eq!(
        ctx.materials
            .get_material(deep_deficit.id)
            .await
            .unwrap()
            .current_stock,
        12
    );

    // Still below threshold, so the next sweep touches it again.
    let updated = ctx.materials.replenish_stock().await.unwrap();
    assert_eq!(updated, 1);
    assert_eq!(
        ctx.materials
            .get_material(deep_deficit.id)
            .await
            .unwrap()
            .current_stock,
        22
    );
}

#[tokio::test]
async fn replenish_with_nothing_to_do_returns_zero() {
    let ctx = setup().await;
    seed_material(&ctx, "Nut", 20, 10, 1).await;

    let updated = ctx.materials.replenish_stock().await.unwrap();
    assert_eq!(updated, 0);
}
