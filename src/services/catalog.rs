use std::{fs::File, io::Read, path::Path};

use crate::{
    error::{AppError, AppResult},
    models::Product,
};

const REQUIRED_COLUMN: &str = "product_id";

/// The product dataset, loaded once at startup and read-only afterwards
///
/// Every string cell is lower-cased so filters can compare without case folding
/// the dataset on each request.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into_iter().map(Product::lowercased).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses comma-delimited rows with a header line
    ///
    /// Columns are matched by name and extra columns are ignored. Rows that
    /// fail to decode are logged and skipped.
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = reader.headers()?.clone();
        if !headers.iter().any(|h| h == REQUIRED_COLUMN) {
            return Err(AppError::Internal(format!(
                "dataset has no '{}' column",
                REQUIRED_COLUMN
            )));
        }

        let mut products = Vec::new();
        let mut skipped = 0usize;
        for row in reader.deserialize::<Product>() {
            match row {
                Ok(product) => products.push(product.lowercased()),
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(error = %e, "Skipping malformed dataset row");
                }
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, loaded = products.len(), "Dataset loaded with skipped rows");
        }

        Ok(Self { products })
    }

    /// Loads the dataset file at `path`
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Loads the dataset, falling back to an empty catalog on failure
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => {
                tracing::info!(path = %path.display(), products = catalog.len(), "Dataset loaded");
                catalog
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Error loading dataset");
                Self::empty()
            }
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
