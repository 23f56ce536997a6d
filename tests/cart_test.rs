use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use whizzyverse::management::{CartDocument, CartManager};
use whizzyverse::store::{CART_KEY, FileStorage, MemoryStorage, Storage};
use whizzyverse::types::{CartChanged, Product};

fn product(id: i64, price: i64) -> Product {
    Product {
        id,
        name: format!("Product {}", id),
        price: Decimal::from(price),
        image_url: Some(format!("https://cdn.example/{}.png", id)),
        category: Some("apparel".to_string()),
    }
}

fn stored_document(raw: Option<String>) -> CartDocument {
    serde_json::from_str(&raw.expect("cart should be stored")).unwrap()
}

#[tokio::test]
async fn test_add_merges_same_id_and_size() {
    let mut cart = CartManager::load(MemoryStorage::new()).await;

    assert!(cart.add_item(&product(1, 10), 2, "M").await);
    assert!(cart.add_item(&product(1, 10), 1, "M").await);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total(), Decimal::from(30));

    assert!(cart.remove_item(1, "M").await);
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);
}

#[tokio::test]
async fn test_different_size_is_a_separate_entry() {
    let mut cart = CartManager::load(MemoryStorage::new()).await;

    cart.add_item(&product(1, 10), 1, "M").await;
    cart.add_item(&product(1, 10), 1, "L").await;

    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.find(1, "M").unwrap().quantity, 1);
    assert_eq!(cart.find(1, "L").unwrap().quantity, 1);
}

#[tokio::test]
async fn test_zero_quantity_add_is_ignored() {
    let storage = MemoryStorage::new();
    let mut cart = CartManager::load(storage.clone()).await;

    assert!(!cart.add_item(&product(1, 10), 0, "M").await);

    assert!(cart.is_empty());
    assert!(storage.read(CART_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_quantity_to_zero_or_less_removes() {
    let mut cart = CartManager::load(MemoryStorage::new()).await;
    cart.add_item(&product(1, 10), 2, "M").await;
    cart.add_item(&product(2, 5), 2, "S").await;

    assert!(cart.update_quantity(1, "M", 0).await);
    assert!(cart.find(1, "M").is_none());

    assert!(cart.update_quantity(2, "S", -4).await);
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_update_quantity_sets_value() {
    let mut cart = CartManager::load(MemoryStorage::new()).await;
    cart.add_item(&product(4, 12), 1, "M").await;

    assert!(cart.update_quantity(4, "M", 5).await);

    assert_eq!(cart.find(4, "M").unwrap().quantity, 5);
    assert_eq!(cart.total(), Decimal::from(60));
}

#[tokio::test]
async fn test_operations_on_absent_entry_are_noops() {
    let storage = MemoryStorage::new();
    let mut cart = CartManager::load(storage.clone()).await;
    let calls = Arc::new(Mutex::new(0));
    let _sub = {
        let calls = Arc::clone(&calls);
        cart.subscribe(move |_| *calls.lock().unwrap() += 1)
    };

    assert!(!cart.remove_item(9, "M").await);
    assert!(!cart.update_quantity(9, "M", 3).await);
    assert!(!cart.update_quantity(9, "M", 0).await);

    assert_eq!(*calls.lock().unwrap(), 0);
    assert!(storage.read(CART_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_total_matches_stored_document() {
    let storage = MemoryStorage::new();
    let mut cart = CartManager::load(storage.clone()).await;

    cart.add_item(
        &Product {
            price: Decimal::new(1999, 2),
            ..product(1, 0)
        },
        3,
        "M",
    )
    .await;
    cart.add_item(
        &Product {
            price: Decimal::new(105, 1),
            ..product(2, 0)
        },
        2,
        "L",
    )
    .await;
    cart.add_item(&product(3, 7), 1, "S").await;
    cart.update_quantity(3, "S", 4).await;
    cart.remove_item(2, "L").await;

    let stored = stored_document(storage.read(CART_KEY).await.unwrap());
    let recomputed: Decimal = stored
        .items
        .iter()
        .map(|item| item.unit_price * Decimal::from(item.quantity))
        .sum();

    assert_eq!(recomputed, cart.total());
    assert_eq!(cart.total(), Decimal::new(8797, 2));
}

#[tokio::test]
async fn test_stored_layout() {
    let storage = MemoryStorage::new();
    let mut cart = CartManager::load(storage.clone()).await;
    cart.add_item(&product(1, 10), 2, "M").await;

    let raw = storage.read(CART_KEY).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let item = &json["items"][0];
    assert_eq!(item["id"], 1);
    assert_eq!(item["size"], "M");
    assert_eq!(item["quantity"], 2);
    assert_eq!(item["image_url"], "https://cdn.example/1.png");
    assert!(item.get("price").is_some());
}

#[tokio::test]
async fn test_clear_empties_and_notifies() {
    let mut cart = CartManager::load(MemoryStorage::new()).await;
    cart.add_item(&product(1, 10), 2, "M").await;

    let seen: Arc<Mutex<Vec<CartChanged>>> = Arc::new(Mutex::new(Vec::new()));
    let _sub = {
        let seen = Arc::clone(&seen);
        cart.subscribe(move |change| seen.lock().unwrap().push(change.clone()))
    };

    cart.clear().await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].items.is_empty());
    assert_eq!(seen[0].count, 0);
    assert_eq!(seen[0].total, Decimal::ZERO);
}

#[tokio::test]
async fn test_change_event_carries_full_state() {
    let mut cart = CartManager::load(MemoryStorage::new()).await;
    let seen: Arc<Mutex<Vec<CartChanged>>> = Arc::new(Mutex::new(Vec::new()));
    let _sub = {
        let seen = Arc::clone(&seen);
        cart.subscribe(move |change| seen.lock().unwrap().push(change.clone()))
    };

    cart.add_item(&product(1, 10), 2, "M").await;
    cart.add_item(&product(2, 4), 1, "S").await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].items.len(), 2);
    assert_eq!(seen[1].count, 3);
    assert_eq!(seen[1].total, Decimal::from(24));
    assert_eq!(seen[1], cart.snapshot());
}

#[tokio::test]
async fn test_independent_subscribers_stay_in_sync() {
    let mut cart = CartManager::load(MemoryStorage::new()).await;
    let badge = Arc::new(Mutex::new(0u64));
    let dropdown = Arc::new(Mutex::new(Vec::new()));

    let badge_sub = {
        let badge = Arc::clone(&badge);
        cart.subscribe(move |change| *badge.lock().unwrap() = change.count)
    };
    let _dropdown_sub = {
        let dropdown = Arc::clone(&dropdown);
        cart.subscribe(move |change| *dropdown.lock().unwrap() = change.items.clone())
    };

    cart.add_item(&product(1, 10), 2, "M").await;
    assert_eq!(*badge.lock().unwrap(), 2);
    assert_eq!(dropdown.lock().unwrap().len(), 1);

    badge_sub.unsubscribe();
    cart.add_item(&product(2, 10), 1, "M").await;

    // badge unsubscribed, dropdown still follows
    assert_eq!(*badge.lock().unwrap(), 2);
    assert_eq!(dropdown.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_corrupt_document_loads_empty() {
    let storage = MemoryStorage::new().with_entry(CART_KEY, "{not json");
    let mut cart = CartManager::load(storage.clone()).await;

    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);

    cart.add_item(&product(1, 10), 1, "M").await;
    let stored = stored_document(storage.read(CART_KEY).await.unwrap());
    assert_eq!(stored.items.len(), 1);
}

#[tokio::test]
async fn test_wrong_shape_loads_empty() {
    let storage = MemoryStorage::new().with_entry(
        CART_KEY,
        r#"{"items":[{"id":1,"name":"x","price":"10","size":"M","quantity":-2}]}"#,
    );

    let cart = CartManager::load(storage).await;

    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_load_repairs_stored_entries() {
    let storage = MemoryStorage::new().with_entry(
        CART_KEY,
        r#"{"items":[
            {"id":1,"name":"Tee","price":10,"size":"M","quantity":1},
            {"id":1,"name":"Tee","price":10,"size":"M","quantity":2},
            {"id":2,"name":"Cap","price":"15.50","size":"S","quantity":0}
        ]}"#,
    );

    let cart = CartManager::load(storage).await;

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.find(1, "M").unwrap().quantity, 3);
    assert_eq!(cart.total(), Decimal::from(30));
}

#[tokio::test]
async fn test_unavailable_storage_keeps_session_state() {
    let mut cart = CartManager::load(MemoryStorage::unavailable()).await;
    let calls = Arc::new(Mutex::new(0));
    let _sub = {
        let calls = Arc::clone(&calls);
        cart.subscribe(move |_| *calls.lock().unwrap() += 1)
    };

    assert!(cart.add_item(&product(1, 10), 2, "M").await);

    assert_eq!(cart.item_count(), 2);
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_cart_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut cart = CartManager::load(FileStorage::new(dir.path())).await;
        cart.add_item(&product(1, 10), 2, "M").await;
        cart.add_item(&product(5, 3), 1, "XL").await;
    }

    let cart = CartManager::load(FileStorage::new(dir.path())).await;
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total(), Decimal::from(23));
    assert!(dir.path().join("whizzyverse_cart.json").is_file());
}

#[tokio::test]
async fn test_listener_sees_saved_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("whizzyverse_cart.json");
    let mut cart = CartManager::load(FileStorage::new(dir.path())).await;

    let stored_counts = Arc::new(Mutex::new(Vec::new()));
    let _sub = {
        let stored_counts = Arc::clone(&stored_counts);
        cart.subscribe(move |_| {
            // runs after the write, so the file already holds the new state
            let raw = std::fs::read_to_string(&path).unwrap();
            let doc: CartDocument = serde_json::from_str(&raw).unwrap();
            stored_counts.lock().unwrap().push(doc.item_count());
        })
    };

    cart.add_item(&product(1, 10), 2, "M").await;
    cart.update_quantity(1, "M", 5).await;

    assert_eq!(*stored_counts.lock().unwrap(), vec![2, 5]);
}

#[tokio::test]
async fn test_quantity_saturates_at_u32_max() {
    let mut cart = CartManager::load(MemoryStorage::new()).await;

    cart.add_item(&product(1, 1), u32::MAX - 1, "M").await;
    assert!(cart.add_item(&product(1, 1), 5, "M").await);
    assert_eq!(cart.find(1, "M").unwrap().quantity, u32::MAX);

    cart.add_item(&product(2, 1), 1, "S").await;
    assert!(cart.update_quantity(2, "S", i64::MAX).await);
    assert_eq!(cart.find(2, "S").unwrap().quantity, u32::MAX);
}

#[tokio::test]
async fn test_overflowing_stored_entry_is_dropped_on_load() {
    let storage = MemoryStorage::new().with_entry(
        CART_KEY,
        r#"{"items":[
            {"id":1,"name":"x","price":"79228162514264337593543950335","size":"M","quantity":2},
            {"id":2,"name":"Cap","price":"15","size":"S","quantity":1}
        ]}"#,
    );

    let mut cart = CartManager::load(storage).await;

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.total(), Decimal::from(15));

    // the cart stays usable afterwards
    assert!(cart.add_item(&product(3, 5), 1, "M").await);
    assert_eq!(cart.total(), Decimal::from(20));
    cart.clear().await;
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_add_refused_when_total_would_overflow() {
    let storage = MemoryStorage::new();
    let mut cart = CartManager::load(storage.clone()).await;
    let expensive = Product {
        price: Decimal::MAX,
        ..product(1, 0)
    };

    assert!(cart.add_item(&expensive, 1, "M").await);
    assert_eq!(cart.total(), Decimal::MAX);

    // merging a second unit and adding another entry both overflow
    assert!(!cart.add_item(&expensive, 1, "M").await);
    assert!(!cart.add_item(&product(2, 1), 1, "S").await);
    assert!(!cart.update_quantity(1, "M", 2).await);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.find(1, "M").unwrap().quantity, 1);
    let stored = stored_document(storage.read(CART_KEY).await.unwrap());
    assert_eq!(stored.items[0].quantity, 1);
    assert_eq!(stored.total(), Decimal::MAX);
}

#[tokio::test]
async fn test_too_large_first_add_leaves_cart_empty() {
    let storage = MemoryStorage::new();
    let mut cart = CartManager::load(storage.clone()).await;
    let expensive = Product {
        price: Decimal::MAX,
        ..product(1, 0)
    };

    assert!(!cart.add_item(&expensive, 2, "M").await);

    assert!(cart.is_empty());
    assert!(storage.read(CART_KEY).await.unwrap().is_none());
}
