mod common;

use garage_core::{
    demo, Assignee, GarageError, OrderBackend, OrderId, OrderStoreBuilder, Priority, Status,
    UpdateOrderRequest,
};
use jiff::civil::date;
use tempfile::TempDir;

use common::{create_test_store, order_form};

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let (_temp_dir, store) = create_test_store().await;

    let first = store
        .create_order(&order_form("Oil Change").validate().unwrap())
        .await
        .expect("Failed to create order");
    let second = store
        .create_order(&order_form("Tire Rotation").validate().unwrap())
        .await
        .expect("Failed to create order");

    assert_eq!(first.id.as_str(), "order-1");
    assert_eq!(second.id.as_str(), "order-2");
    assert_eq!(first.status, Status::Pending);
    assert_eq!(first.priority, Priority::Medium);
    assert!(first.created_at.is_some());
    assert_eq!(
        first.assigned_to.as_ref().map(Assignee::display_name),
        Some("Mike Johnson".to_string())
    );
}

#[tokio::test]
async fn test_fetch_all_round_trips_fields() {
    let (_temp_dir, store) = create_test_store().await;
    let mut form = order_form("Brake Replacement");
    form.due_date = Some(date(2023, 5, 11));
    form.priority = Priority::High;
    let created = store
        .create_order(&form.validate().unwrap())
        .await
        .unwrap();

    let orders = store.fetch_all().await.expect("Failed to fetch");
    assert_eq!(orders, vec![created]);
    assert_eq!(orders[0].due_date, Some(date(2023, 5, 11)));
    assert_eq!(orders[0].vehicle.year, 2019);
}

#[tokio::test]
async fn test_update_status_is_idempotent() {
    let (_temp_dir, store) = create_test_store().await;
    let order = store
        .create_order(&order_form("Oil Change").validate().unwrap())
        .await
        .unwrap();

    let once = store
        .update_status(&order.id, Status::Completed)
        .await
        .unwrap();
    let twice = store
        .update_status(&order.id, Status::Completed)
        .await
        .unwrap();
    assert_eq!(once.status, Status::Completed);
    assert_eq!(twice.status, Status::Completed);

    let stored = store.get_order(&order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, Status::Completed);
}

#[tokio::test]
async fn test_update_status_of_missing_order() {
    let (_temp_dir, store) = create_test_store().await;
    let err = store
        .update_status(&OrderId::new("order-42"), Status::InProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, GarageError::OrderNotFound { id } if id == "order-42"));
}

#[tokio::test]
async fn test_update_order_applies_detail_edits() {
    let (_temp_dir, store) = create_test_store().await;
    let order = store
        .create_order(&order_form("Oil Change").validate().unwrap())
        .await
        .unwrap();

    let request = UpdateOrderRequest {
        title: Some("Oil and Filter Change".to_string()),
        priority: Some(Priority::Low),
        due_date: Some(date(2023, 6, 1)),
        assigned_to: Some(Assignee::named("Alex Turner")),
        ..Default::default()
    };
    let updated = store.update_order(&order.id, &request).await.unwrap();

    assert_eq!(updated.id, order.id);
    assert_eq!(updated.title, "Oil and Filter Change");
    assert_eq!(updated.priority, Priority::Low);
    assert_eq!(updated.due_date, Some(date(2023, 6, 1)));
    assert_eq!(updated.assigned_to.unwrap().initials(), "AT");
    assert_eq!(updated.created_at, order.created_at);
}

#[tokio::test]
async fn test_detail_edit_keeps_moved_status() {
    let (_temp_dir, store) = create_test_store().await;
    let order = store
        .create_order(&order_form("Tire Rotation").validate().unwrap())
        .await
        .unwrap();
    store
        .update_status(&order.id, Status::Completed)
        .await
        .unwrap();

    let request = UpdateOrderRequest {
        description: Some("Rotate and balance".to_string()),
        ..Default::default()
    };
    let updated = store.update_order(&order.id, &request).await.unwrap();
    assert_eq!(updated.status, Status::Completed);

    let stored = store.get_order(&order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, Status::Completed);
    assert_eq!(stored.description.as_deref(), Some("Rotate and balance"));
}

#[tokio::test]
async fn test_seeded_store_persists_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("garage.db");

    let store = OrderStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();
    demo::seed_demo_orders(&store).await.unwrap();

    let reopened = OrderStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();
    let orders = reopened.fetch_all().await.unwrap();
    assert_eq!(orders.len(), 6);
    assert_eq!(orders[1].title, "Brake Replacement");
    assert_eq!(orders[1].status, Status::InProgress);
}
