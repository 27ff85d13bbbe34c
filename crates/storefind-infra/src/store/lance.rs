//! LanceDB connection wrapper for table lifecycle management.
//!
//! Wraps a `lancedb::Connection` at a filesystem path and offers helper
//! methods for creating, opening, and dropping the products table. The
//! `ProductVectorStore` trait implementation lives in `products`.

use std::path::PathBuf;
use std::sync::Arc;

use arrow_schema::Schema;

/// LanceDB vector store wrapper for connection and table management.
///
/// Owns a single connection for the duration of one CLI invocation;
/// dropping the value releases it regardless of outcome.
pub struct LanceVectorStore {
    db: lancedb::Connection,
    base_path: PathBuf,
}

impl LanceVectorStore {
    /// Open or create a LanceDB store at the given path.
    ///
    /// Creates the directory if it does not exist.
    pub async fn new(base_path: PathBuf) -> Result<Self, lancedb::Error> {
        std::fs::create_dir_all(&base_path).map_err(|e| lancedb::Error::CreateDir {
            path: base_path.display().to_string(),
            source: e,
        })?;

        let uri = base_path
            .to_str()
            .ok_or_else(|| lancedb::Error::InvalidInput {
                message: format!("Path contains invalid UTF-8: {}", base_path.display()),
            })?;

        let db = lancedb::connect(uri).execute().await?;

        Ok(Self { db, base_path })
    }

    /// Create an empty table with the given schema, replacing nothing --
    /// callers drop first if they want a clean slate.
    pub async fn create_table(
        &self,
        table_name: &str,
        schema: Arc<Schema>,
    ) -> Result<lancedb::Table, lancedb::Error> {
        self.db
            .create_empty_table(table_name, schema)
            .execute()
            .await
    }

    /// Open an existing table.
    pub async fn open_table(&self, table_name: &str) -> Result<lancedb::Table, lancedb::Error> {
        self.db.open_table(table_name).execute().await
    }

    /// Check if a table exists in the database.
    pub async fn table_exists(&self, table_name: &str) -> bool {
        self.db.open_table(table_name).execute().await.is_ok()
    }

    /// Drop a table from the database.
    ///
    /// Returns Ok(()) even if the table does not exist (idempotent).
    pub async fn drop_table(&self, table_name: &str) -> Result<(), lancedb::Error> {
        match self.db.drop_table(table_name, &[]).await {
            Ok(()) => Ok(()),
            Err(lancedb::Error::TableNotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// The base path of the store.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema::products_schema;

    #[tokio::test]
    async fn test_connection_opens_successfully() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = LanceVectorStore::new(temp_dir.path().to_path_buf())
            .await
            .expect("Failed to create vector store");

        assert!(!store.table_exists("products").await);
    }

    #[tokio::test]
    async fn test_create_and_open_table() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = LanceVectorStore::new(temp_dir.path().to_path_buf())
            .await
            .expect("Failed to create vector store");

        let schema = Arc::new(products_schema(8));
        let table = store
            .create_table("products", schema)
            .await
            .expect("Failed to create table");

        let count = table.count_rows(None).await.expect("Failed to count rows");
        assert_eq!(count, 0);

        assert!(store.table_exists("products").await);
        store
            .open_table("products")
            .await
            .expect("Failed to reopen table");
    }

    #[tokio::test]
    async fn test_drop_table_idempotent() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = LanceVectorStore::new(temp_dir.path().to_path_buf())
            .await
            .expect("Failed to create vector store");

        let schema = Arc::new(products_schema(8));
        store
            .create_table("to_drop", schema)
            .await
            .expect("Failed to create table");

        assert!(store.table_exists("to_drop").await);

        store
            .drop_table("to_drop")
            .await
            .expect("Failed to drop table");
        assert!(!store.table_exists("to_drop").await);

        // Second drop should also succeed (idempotent)
        store
            .drop_table("to_drop")
            .await
            .expect("Second drop should be idempotent");
    }
}
