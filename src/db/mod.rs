//! Postgres backend for [`SaveStore`](crate::persist::SaveStore).

mod migrate;
mod store;

pub use migrate::migrate;
pub use store::{delete_save, load_store, save_store};
