//! Product catalog service
//!
//! Loads an immutable catalog snapshot from CSV once at startup. The CSV
//! layout is:
//!
//! ```text
//! id,name,ideal_category,peak_months,low_months
//! 5f0c...,Ice Cream,hot,6;7;8,12;1
//! ```
//!
//! Month lists are `;`-separated month numbers and may be empty.

use serde::Deserialize;
use shared::{parse_month_list, Product, ProductCatalogProvider, TemperatureCategory};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Read-only product catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogService {
    products: Vec<Product>,
}

/// One CSV row
#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: Uuid,
    name: String,
    ideal_category: String,
    #[serde(default)]
    peak_months: String,
    #[serde(default)]
    low_months: String,
}

impl CatalogService {
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load the catalog from a CSV file
    pub fn load(path: &Path) -> AppResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            AppError::Configuration(format!("Cannot open catalog {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} products from {}",
            catalog.products.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse a catalog from CSV. Any malformed row fails the whole load.
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut products = Vec::new();
        let mut seen_ids = HashSet::new();

        for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            // Header is line 1
            let line = index + 2;
            let row = record
                .map_err(|e| AppError::Configuration(format!("Catalog line {}: {}", line, e)))?;

            if !seen_ids.insert(row.id) {
                return Err(AppError::Configuration(format!(
                    "Catalog line {}: duplicate product id {}",
                    line, row.id
                )));
            }

            let product = row_to_product(row)
                .map_err(|e| AppError::Configuration(format!("Catalog line {}: {}", line, e)))?;

            let conflicts = product.conflicting_months();
            if !conflicts.is_empty() {
                tracing::warn!(
                    "Product '{}' lists {:?} as both peak and low; peak takes precedence",
                    product.name,
                    conflicts
                );
            }

            products.push(product);
        }

        Ok(Self { products })
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

    /// Find a product by id
    pub fn get(&self, id: Uuid) -> AppResult<&Product> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }
}

impl ProductCatalogProvider for CatalogService {
    fn list_all(&self) -> Vec<Product> {
        self.products.clone()
    }
}

fn row_to_product(row: CatalogRow) -> shared::EngineResult<Product> {
    let ideal_category: TemperatureCategory = row.ideal_category.parse()?;
    Ok(Product {
        id: row.id,
        name: row.name,
        ideal_category,
        peak_months: parse_month_list(&row.peak_months)?.into_iter().collect(),
        low_months: parse_month_list(&row.low_months)?.into_iter().collect(),
    })
}
