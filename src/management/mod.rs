mod cart;
mod collection;
mod favorites;
mod observer;

pub use cart::CartDocument;
pub use cart::CartManager;
pub use cart::DEFAULT_SIZE;
pub use collection::Document;
pub use collection::PersistedCollection;
pub use favorites::DEFAULT_BUCKETS;
pub use favorites::EVENTS;
pub use favorites::FavoritesDocument;
pub use favorites::FavoritesManager;
pub use favorites::MERCH;
pub use favorites::TRACKS;
pub use observer::Observers;
pub use observer::Subscription;
