//! Application bootstrap.
//!
//! Owns the single storage handle and the one cart and favorites manager of a
//! session. Command handlers borrow what they need from [`App`] instead of
//! reaching for globals.

use crate::{
    management::{CartManager, FavoritesManager},
    store::Storage,
};

pub struct App<S: Storage + Clone> {
    pub cart: CartManager<S>,
    pub favorites: FavoritesManager<S>,
}

impl<S: Storage + Clone> App<S> {
    /// Loads both collections from `storage`.
    pub async fn bootstrap(storage: S) -> Self {
        let cart = CartManager::load(storage.clone()).await;
        let favorites = FavoritesManager::load(storage).await;
        tracing::debug!(
            cart_items = cart.items().len(),
            favorites = favorites.total_count(),
            "collections loaded"
        );

        Self { cart, favorites }
    }
}
