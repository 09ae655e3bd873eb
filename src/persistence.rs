//! SQLite persistence for submitted orders.
//!
//! Three tables: `orders`, `order_items`, `order_item_notes`. One submit is
//! one transaction — all three record kinds land or none do. Custom note
//! ids are stored as `custom:{n}` so they round-trip distinctly from
//! predefined ids.

use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::StorageError;
use crate::register::Entry;
use crate::session::{OrderMeta, OrderStatus};

/// Rowid of a persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderId(pub i64);

/// What the session controller needs from the durable store.
pub trait OrderStore {
    /// Persist the whole ticket atomically and return its identity.
    fn save(&mut self, meta: &OrderMeta, entries: &[Entry]) -> Result<OrderId, StorageError>;

    /// Update the lifecycle status of a persisted order.
    fn set_status(&mut self, order: OrderId, status: OrderStatus) -> Result<(), StorageError>;
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_at TEXT NOT NULL,
        order_number INTEGER NOT NULL,
        source TEXT NOT NULL DEFAULT 'tui',
        status TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS order_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_id INTEGER NOT NULL,
        line_index INTEGER NOT NULL,
        dish_id TEXT NOT NULL,
        dish_name TEXT NOT NULL,
        category TEXT NOT NULL,
        takeaway INTEGER NOT NULL DEFAULT 0,
        group_id INTEGER,
        FOREIGN KEY(order_id) REFERENCES orders(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS order_item_notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_item_id INTEGER NOT NULL,
        note_id TEXT NOT NULL,
        note_label TEXT NOT NULL,
        FOREIGN KEY(order_item_id) REFERENCES order_items(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_order_items_order_id_line
        ON order_items(order_id, line_index);

    CREATE INDEX IF NOT EXISTS idx_order_item_notes_item_id
        ON order_item_notes(order_item_id);
";

/// SQLite-backed order store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating parent directories and schema as needed).
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError(format!("creating {}: {e}", parent.display())))?;
        }
        let conn = Connection::open(path)?;
        Self::bootstrap(conn)
    }

    /// In-memory store for tests.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> Result<Self, StorageError> {
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    fn count(&self, table: &str) -> i64 {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .unwrap()
    }
}

impl OrderStore for SqliteStore {
    fn save(&mut self, meta: &OrderMeta, entries: &[Entry]) -> Result<OrderId, StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO orders (created_at, order_number, source, status)
             VALUES (?1, ?2, 'tui', ?3)",
            params![
                chrono::Utc::now().to_rfc3339(),
                meta.order_number,
                OrderStatus::Saved.as_str()
            ],
        )?;
        let order_id = tx.last_insert_rowid();

        for (line_index, entry) in entries.iter().enumerate() {
            tx.execute(
                "INSERT INTO order_items
                     (order_id, line_index, dish_id, dish_name, category, takeaway, group_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    order_id,
                    line_index as i64,
                    entry.dish.id,
                    entry.dish.base_name,
                    entry.dish.category.as_str(),
                    entry.takeaway,
                    entry.group.map(|g| i64::from(g.0)),
                ],
            )?;
            let item_id = tx.last_insert_rowid();
            for (note_id, label) in &entry.notes {
                tx.execute(
                    "INSERT INTO order_item_notes (order_item_id, note_id, note_label)
                     VALUES (?1, ?2, ?3)",
                    params![item_id, note_id, label],
                )?;
            }
        }

        tx.commit()?;
        Ok(OrderId(order_id))
    }

    fn set_status(&mut self, order: OrderId, status: OrderStatus) -> Result<(), StorageError> {
        self.conn.execute(
            "UPDATE orders SET status = ?1 WHERE id = ?2",
            params![status.as_str(), order.0],
        )?;
        Ok(())
    }
}
