//! SQLite-backed catalog store.
//!
//! The store manages the product catalog database: product records with
//! their base image column and the ordered media gallery rows. Gallery
//! roles are persisted as a JSON array column.

use std::collections::BTreeSet;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::catalog::product::{GalleryEntry, Product, NO_SELECTION};
use crate::error::{Error, Result};

/// Handle to the catalog database.
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open (or create) the catalog database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = CatalogStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory catalog, used for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = CatalogStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS product (
                sku       TEXT NOT NULL,
                store_id  INTEGER NOT NULL DEFAULT 0,
                image     TEXT NOT NULL DEFAULT 'no_selection',
                PRIMARY KEY (sku, store_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS product_media_gallery (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                sku       TEXT NOT NULL,
                store_id  INTEGER NOT NULL DEFAULT 0,
                file      TEXT NOT NULL,
                position  INTEGER NOT NULL DEFAULT 0,
                roles     TEXT NOT NULL DEFAULT '[]'
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_gallery_sku
             ON product_media_gallery (sku, store_id, position)",
            [],
        )?;

        Ok(())
    }

    /// SKUs worth checking: products with two or more gallery rows and a
    /// base image that is actually set.
    pub fn candidate_skus(&self, store_id: i64) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT g.sku
             FROM product_media_gallery g
             JOIN product p ON p.sku = g.sku AND p.store_id = g.store_id
             WHERE g.store_id = ?1
               AND p.image != ?2
               AND p.image != ''
             GROUP BY g.sku
             HAVING COUNT(*) >= 2
             ORDER BY g.sku",
        )?;

        let skus = stmt
            .query_map(params![store_id, NO_SELECTION], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(skus)
    }

    /// Load a product and its ordered gallery at the given store scope.
    pub fn load(&self, sku: &str, store_id: i64) -> Result<Product> {
        let image: String = self
            .conn
            .query_row(
                "SELECT image FROM product WHERE sku = ?1 AND store_id = ?2",
                params![sku, store_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| Error::ProductNotFound(sku.to_string()))?;

        let base_image = match image.as_str() {
            "" | NO_SELECTION => None,
            _ => Some(image),
        };

        let mut stmt = self.conn.prepare(
            "SELECT file, roles FROM product_media_gallery
             WHERE sku = ?1 AND store_id = ?2
             ORDER BY position, id",
        )?;

        let rows = stmt
            .query_map(params![sku, store_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<(String, String)>, _>>()?;

        let mut gallery = Vec::with_capacity(rows.len());
        for (file, roles_json) in rows {
            let roles: BTreeSet<String> = serde_json::from_str(&roles_json)?;
            gallery.push(GalleryEntry { file, roles });
        }

        Ok(Product {
            sku: sku.to_string(),
            store_id,
            base_image,
            gallery,
        })
    }

    /// Persist a product and its gallery, rewriting the gallery rows
    /// transactionally.
    pub fn save(&mut self, product: &Product) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO product (sku, store_id, image) VALUES (?1, ?2, ?3)
             ON CONFLICT (sku, store_id) DO UPDATE SET image = excluded.image",
            params![product.sku, product.store_id, product.base_image_column()],
        )?;

        tx.execute(
            "DELETE FROM product_media_gallery WHERE sku = ?1 AND store_id = ?2",
            params![product.sku, product.store_id],
        )?;

        for (position, entry) in product.gallery.iter().enumerate() {
            let roles_json = serde_json::to_string(&entry.roles)?;
            tx.execute(
                "INSERT INTO product_media_gallery (sku, store_id, file, position, roles)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    product.sku,
                    product.store_id,
                    entry.file,
                    position as i64,
                    roles_json
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}
