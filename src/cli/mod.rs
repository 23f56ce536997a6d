//! # CLI Module
//!
//! Command handlers for the `whizzyverse` binary. Each handler receives the
//! collection manager it works on; nothing here owns state of its own.
//!
//! ## Command Categories
//!
//! ### Cart
//!
//! - [`list_cart`] - Shows line items, item count and total
//! - [`add_to_cart`] - Adds a product, merging with an entry of the same id and size
//! - [`remove_from_cart`] - Removes one entry
//! - [`update_cart_quantity`] - Sets a quantity; zero or less removes the entry
//! - [`clear_cart`] - Empties the cart
//!
//! ### Favorites
//!
//! - [`list_favorites`] - Shows bucket counts, optionally resolved against the catalog
//! - [`toggle_favorite`] - Adds or removes an id in a bucket
//! - [`clear_favorites`] - Empties every bucket
//!
//! ## Change Reporting
//!
//! [`attach_badges`] subscribes the console "badges" to both collections. They
//! play the part of independent UI widgets: they learn about changes only
//! through the subscription, never from the command that caused them.

mod cart;
mod favorites;

pub use cart::add_to_cart;
pub use cart::clear_cart;
pub use cart::list_cart;
pub use cart::remove_from_cart;
pub use cart::update_cart_quantity;
pub use favorites::clear_favorites;
pub use favorites::list_favorites;
pub use favorites::toggle_favorite;

use crate::{app::App, info, management::Subscription, store::Storage, utils};

/// Subscribes console reporters for cart and favorites changes.
///
/// The returned handles must be kept alive for as long as reporting is wanted.
pub fn attach_badges<S: Storage + Clone>(app: &App<S>) -> Vec<Subscription> {
    let cart_badge = app.cart.subscribe(|change| {
        info!(
            "Cart: {} item(s), total {}",
            change.count,
            utils::format_price(change.total)
        );
    });

    let favorites_badge = app.favorites.subscribe(|buckets| {
        let total: usize = buckets.values().map(Vec::len).sum();
        info!("Favorites: {} in total", total);
    });

    vec![cart_badge, favorites_badge]
}
