//! rowbind binds SQL result rows into plain Rust records by matching
//! column names to record fields through a deterministic naming
//! convention: column `order_item_id` binds the field declared as
//! `order_item_id` (capitalized form `OrderItemId`).
//!
//! Destinations are a single record, a `Vec` of records, or a `Vec` of
//! boxed records; the shape selects the binding strategy. Binders always
//! drain their cursor so forward-only sources are left reusable.
//!
//! ```
//! use rusqlite::Connection;
//!
//! rowbind::record! {
//!     #[derive(Debug, Default, Clone)]
//!     pub struct User {
//!         pub id: i64,
//!         pub user_name: String,
//!     }
//! }
//!
//! fn main() -> rowbind::Result<()> {
//!     let conn = Connection::open_in_memory()?;
//!     conn.execute_batch(
//!         "CREATE TABLE users (id INTEGER, user_name TEXT);
//!          INSERT INTO users VALUES (1, 'ann'), (2, 'bob');",
//!     )?;
//!
//!     let mut users: Vec<User> = Vec::new();
//!     rowbind::sqlite::query(
//!         &conn,
//!         "SELECT id, user_name FROM users ORDER BY id",
//!         [],
//!         &mut users,
//!     )?;
//!     assert_eq!(users.len(), 2);
//!     assert_eq!(users[0].user_name, "ann");
//!     Ok(())
//! }
//! ```

// Core infrastructure modules
pub mod core;

// Binding engine modules
pub mod bind;
pub mod cursor;
pub mod mapper;
pub mod record;
pub mod sqlite;
pub mod value;

// Re-export the public surface at the crate root
pub use crate::core::{BindError, Result};
pub use bind::{bind, Destination};
pub use cursor::{MemoryCursor, RowCursor};
pub use mapper::underscore_to_pascal;
pub use record::{Descriptor, FieldDef, FieldSetter, Record};
pub use value::{FromValue, Value, ValueError};
