use serde::{Deserialize, Serialize};

/// URL prefix under which product images are published
pub const IMAGE_URL_PREFIX: &str = "/static/images";

/// One row of the product dataset
///
/// Every field except `product_id` may be missing in the source file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub product_id: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl Product {
    /// Lower-cases every string cell, mirroring how the dataset is normalized on load
    pub fn lowercased(self) -> Self {
        let lower = |value: Option<String>| value.map(|v| v.to_lowercase());
        Self {
            product_id: self.product_id.to_lowercase(),
            caption: lower(self.caption),
            gender: lower(self.gender),
            product_type: lower(self.product_type),
            path: lower(self.path),
        }
    }

    /// Public URL of the product image
    pub fn image_url(&self) -> Option<String> {
        self.path
            .as_ref()
            .map(|path| format!("{}/{}", IMAGE_URL_PREFIX, path))
    }
}

/// A product as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub product_id: String,
    pub caption: Option<String>,
    pub image: Option<String>,
    pub product_type: Option<String>,
}

impl From<&Product> for Recommendation {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.product_id.clone(),
            caption: product.caption.clone(),
            image: product.image_url(),
            product_type: product.product_type.clone(),
        }
    }
}
