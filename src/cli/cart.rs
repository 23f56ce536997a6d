use tabled::Table;

use crate::{
    info,
    management::CartManager,
    store::Storage,
    success,
    types::Product,
    utils, warning,
};

pub fn list_cart<S: Storage>(cart: &CartManager<S>) {
    if cart.is_empty() {
        info!("Your cart is empty.");
        return;
    }

    let table = Table::new(utils::cart_table_rows(cart.items()));
    println!("{}", table);
    info!(
        "{} item(s), total {}",
        cart.item_count(),
        utils::format_price(cart.total())
    );
}

pub async fn add_to_cart<S: Storage>(
    cart: &mut CartManager<S>,
    product: Product,
    quantity: u32,
    size: &str,
) {
    if cart.add_item(&product, quantity, size).await {
        success!("Added {} x {} ({}) to cart", quantity, product.name, size);
    } else if quantity == 0 {
        warning!("Nothing added, quantity must be at least 1.");
    } else {
        warning!("Nothing added, the cart total would be too large.");
    }
}

pub async fn remove_from_cart<S: Storage>(cart: &mut CartManager<S>, id: i64, size: &str) {
    if cart.remove_item(id, size).await {
        success!("Removed item {} ({}) from cart", id, size);
    } else {
        warning!("Nothing in the cart for id {} size {}", id, size);
    }
}

pub async fn update_cart_quantity<S: Storage>(
    cart: &mut CartManager<S>,
    id: i64,
    size: &str,
    quantity: i64,
) {
    if !cart.update_quantity(id, size, quantity).await {
        if cart.find(id, size).is_some() {
            warning!("Quantity unchanged, the cart total would be too large.");
        } else {
            warning!("Nothing in the cart for id {} size {}", id, size);
        }
        return;
    }

    match cart.find(id, size) {
        Some(item) => success!("Item {} ({}) quantity set to {}", id, size, item.quantity),
        None => success!("Removed item {} ({}) from cart", id, size),
    }
}

pub async fn clear_cart<S: Storage>(cart: &mut CartManager<S>) {
    cart.clear().await;
    success!("Cart cleared");
}
