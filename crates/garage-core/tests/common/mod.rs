use garage_core::{NewOrderForm, OrderStore, OrderStoreBuilder};
use tempfile::TempDir;

/// Helper function to create a store over a throwaway database
pub async fn create_test_store() -> (TempDir, OrderStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = OrderStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

/// A valid new-order form
#[allow(dead_code)]
pub fn order_form(title: &str) -> NewOrderForm {
    NewOrderForm {
        title: title.to_string(),
        description: Some("Full synthetic oil change and filter replacement".to_string()),
        customer_name: "John Smith".to_string(),
        make: "Toyota".to_string(),
        model: "Camry".to_string(),
        year: "2019".to_string(),
        assigned_to: Some("Mike Johnson".to_string()),
        ..Default::default()
    }
}
