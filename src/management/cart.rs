use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    collection::{Document, PersistedCollection},
    observer::Subscription,
};
use crate::{
    store::{CART_KEY, Storage},
    types::{CartChanged, LineItem, Product},
};

/// Size used when the caller does not pick one.
pub const DEFAULT_SIZE: &str = "M";

/// Stored shape: `{ "items": [LineItem, ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartDocument {
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl CartDocument {
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of the line totals. Saturates at `Decimal::MAX`; documents that
    /// went through `load` or a cart operation never get there.
    pub fn total(&self) -> Decimal {
        self.checked_total().unwrap_or(Decimal::MAX)
    }

    pub fn checked_total(&self) -> Option<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |sum, item| {
            sum.checked_add(item.line_total()?)
        })
    }

    fn position(&self, id: i64, size: &str) -> Option<usize> {
        self.items.iter().position(|item| item.matches(id, size))
    }

    /// Sets the quantity at `index` unless the cart total would overflow.
    fn set_quantity(&mut self, index: usize, quantity: u32) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        let previous = std::mem::replace(&mut item.quantity, quantity);
        if self.checked_total().is_some() {
            return true;
        }

        if let Some(item) = self.items.get_mut(index) {
            tracing::warn!(
                id = item.id,
                size = %item.size,
                quantity,
                "refusing quantity, cart total would overflow"
            );
            item.quantity = previous;
        }
        false
    }
}

impl Document for CartDocument {
    const KEY: &'static str = CART_KEY;
    type Change = CartChanged;

    fn change(&self) -> CartChanged {
        CartChanged {
            items: self.items.clone(),
            count: self.item_count(),
            total: self.total(),
        }
    }

    fn normalize(&mut self) {
        let mut merged: Vec<LineItem> = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            if item.quantity == 0 {
                continue;
            }
            match merged
                .iter_mut()
                .find(|existing| existing.matches(item.id, &item.size))
            {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => merged.push(item),
            }
        }

        // keep entries while the running total still fits
        let mut total = Decimal::ZERO;
        merged.retain(
            |item| match item.line_total().and_then(|line| total.checked_add(line)) {
                Some(next) => {
                    total = next;
                    true
                }
                None => {
                    tracing::warn!(
                        id = item.id,
                        size = %item.size,
                        "dropping stored cart entry, total overflows"
                    );
                    false
                }
            },
        );
        self.items = merged;
    }
}

/// Shopping cart backed by durable storage.
pub struct CartManager<S: Storage> {
    collection: PersistedCollection<CartDocument, S>,
}

impl<S: Storage> CartManager<S> {
    pub async fn load(storage: S) -> Self {
        Self {
            collection: PersistedCollection::load(storage).await,
        }
    }

    /// Adds `quantity` of `product` in `size`, merging into an existing entry
    /// with the same id and size. A zero quantity is ignored, and so is an add
    /// that would push the cart total past `Decimal::MAX`.
    pub async fn add_item(&mut self, product: &Product, quantity: u32, size: &str) -> bool {
        if quantity == 0 {
            tracing::debug!(id = product.id, size, "ignoring add with zero quantity");
            return false;
        }

        self.collection
            .mutate(|cart| match cart.position(product.id, size) {
                Some(index) => {
                    let merged = cart
                        .items
                        .get(index)
                        .map(|existing| existing.quantity.saturating_add(quantity));
                    merged.is_some_and(|merged| cart.set_quantity(index, merged))
                }
                None => {
                    cart.items.push(LineItem {
                        id: product.id,
                        name: product.name.clone(),
                        unit_price: product.price,
                        image_url: product.image_url.clone(),
                        category: product.category.clone(),
                        size: size.to_string(),
                        quantity,
                    });
                    if cart.checked_total().is_none() {
                        cart.items.pop();
                        tracing::warn!(
                            id = product.id,
                            size,
                            "refusing add, cart total would overflow"
                        );
                        return false;
                    }
                    true
                }
            })
            .await
    }

    /// Removes the entry for `(id, size)`. Returns false if there was none.
    pub async fn remove_item(&mut self, id: i64, size: &str) -> bool {
        self.collection
            .mutate(|cart| match cart.position(id, size) {
                Some(index) => {
                    cart.items.remove(index);
                    true
                }
                None => false,
            })
            .await
    }

    /// Sets the quantity of `(id, size)`; zero or less removes the entry.
    /// Values above `u32::MAX` are clamped.
    pub async fn update_quantity(&mut self, id: i64, size: &str, quantity: i64) -> bool {
        self.collection
            .mutate(|cart| {
                let Some(index) = cart.position(id, size) else {
                    return false;
                };

                if quantity <= 0 {
                    cart.items.remove(index);
                    return true;
                }
                cart.set_quantity(index, u32::try_from(quantity).unwrap_or(u32::MAX))
            })
            .await
    }

    pub async fn clear(&mut self) {
        self.collection
            .mutate(|cart| {
                cart.items.clear();
                true
            })
            .await;
    }

    pub fn items(&self) -> &[LineItem] {
        &self.collection.state().items
    }

    pub fn find(&self, id: i64, size: &str) -> Option<&LineItem> {
        self.items().iter().find(|item| item.matches(id, size))
    }

    pub fn item_count(&self) -> u64 {
        self.collection.state().item_count()
    }

    pub fn total(&self) -> Decimal {
        self.collection.state().total()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn snapshot(&self) -> CartChanged {
        self.collection.state().change()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&CartChanged) + Send + Sync + 'static,
    {
        self.collection.subscribe(listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.collection.subscriber_count()
    }

    pub async fn reload(&mut self) {
        self.collection.reload().await;
    }

    pub fn storage(&self) -> &S {
        self.collection.storage()
    }
}
