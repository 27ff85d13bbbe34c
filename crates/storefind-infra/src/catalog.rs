//! Product catalog loading from CSV.
//!
//! The source file must carry the headers
//! `product_id,product_name,description`. Row order is significant: it
//! defines the positional pairing between records and their embeddings
//! during ingestion. A malformed row aborts the whole load -- no silent
//! skipping.

use std::path::Path;

use tracing::debug;

use storefind_types::error::CatalogError;
use storefind_types::product::ProductRecord;

/// Load all product records from a CSV file, preserving file order.
pub fn load_products(path: &Path) -> Result<Vec<ProductRecord>, CatalogError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| match e.kind() {
        csv::ErrorKind::Io(_) => CatalogError::Io(std::io::Error::other(format!(
            "{}: {e}",
            path.display()
        ))),
        _ => CatalogError::Malformed(e.to_string()),
    })?;

    let mut records = Vec::new();
    for row in reader.deserialize::<ProductRecord>() {
        records.push(row.map_err(|e| CatalogError::Malformed(e.to_string()))?);
    }

    debug!(records = records.len(), path = %path.display(), "catalog loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write");
        file
    }

    #[test]
    fn test_load_products_preserves_order() {
        let file = write_csv(
            "product_id,product_name,description\n\
             1,Red shoes,Comfortable red running shoes\n\
             2,Blue hat,Warm blue winter hat\n",
        );

        let records = load_products(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product_id, 1);
        assert_eq!(records[1].product_name, "Blue hat");
        assert_eq!(records[1].description, "Warm blue winter hat");
    }

    #[test]
    fn test_load_products_empty_file_with_header() {
        let file = write_csv("product_id,product_name,description\n");
        let records = load_products(file.path()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_products_malformed_row_aborts() {
        let file = write_csv(
            "product_id,product_name,description\n\
             1,Red shoes,Comfortable red running shoes\n\
             not-a-number,Broken,row\n",
        );

        let result = load_products(file.path());
        assert!(matches!(result, Err(CatalogError::Malformed(_))));
    }

    #[test]
    fn test_load_products_missing_file() {
        let result = load_products(Path::new("/nonexistent/products.csv"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_load_products_quoted_commas() {
        let file = write_csv(
            "product_id,product_name,description\n\
             3,\"Scarf, wool\",\"Soft, warm, green\"\n",
        );

        let records = load_products(file.path()).unwrap();
        assert_eq!(records[0].product_name, "Scarf, wool");
        assert_eq!(records[0].description, "Soft, warm, green");
    }
}
