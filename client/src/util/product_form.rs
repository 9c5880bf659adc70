//! Editable product draft: seeding, validation and payload normalization.
//!
//! DESIGN
//! ======
//! The form component binds inputs straight to a [`ProductDraft`] held in a
//! signal. Everything here is plain data so the conversion rules can be
//! tested without a browser.

#[cfg(test)]
#[path = "product_form_test.rs"]
mod product_form_test;

use std::collections::BTreeMap;

use super::form_validation::{
    FieldError, non_blank, optional_decimal, parse_decimal, parse_integer, require_decimal, require_integer,
    require_text,
};
use crate::net::error::ApiError;
use crate::net::types::{Dimensions, Product, ProductPayload};
use crate::state::toast::Notice;

pub const UPLOAD_SUCCESS: &str = "Images uploaded successfully";
pub const UPLOAD_FAILED: &str = "Failed to upload images";

/// One key/value line of the compatibility editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompatibilityRow {
    pub key: String,
    pub value: String,
}

/// Product form fields as typed text.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub discount_price: String,
    pub category_id: String,
    pub stock_quantity: String,
    pub is_active: bool,
    pub is_featured: bool,
    pub sku: String,
    pub brand: String,
    pub part_number: String,
    pub compatibility: Vec<CompatibilityRow>,
    pub weight: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub warranty: String,
    pub image_urls: Vec<String>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            discount_price: String::new(),
            category_id: String::new(),
            stock_quantity: "0".to_owned(),
            is_active: true,
            is_featured: false,
            sku: String::new(),
            brand: String::new(),
            part_number: String::new(),
            compatibility: Vec::new(),
            weight: String::new(),
            length: String::new(),
            width: String::new(),
            height: String::new(),
            warranty: String::new(),
            image_urls: Vec::new(),
        }
    }
}

fn number_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn compatibility_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ProductDraft {
    /// Blank draft for create mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft for edit mode, with absent optional fields defaulted.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let dims = product.dimensions.clone().unwrap_or_default();
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            discount_price: number_text(product.discount_price),
            category_id: product.category_id.clone().unwrap_or_default(),
            stock_quantity: product.stock_quantity.to_string(),
            is_active: product.is_active,
            is_featured: product.is_featured,
            sku: product.sku.clone().unwrap_or_default(),
            brand: product.brand.clone().unwrap_or_default(),
            part_number: product.part_number.clone().unwrap_or_default(),
            compatibility: product
                .compatibility
                .iter()
                .flatten()
                .map(|(key, value)| CompatibilityRow { key: key.clone(), value: compatibility_text(value) })
                .collect(),
            weight: number_text(product.weight),
            length: number_text(dims.length),
            width: number_text(dims.width),
            height: number_text(dims.height),
            warranty: product.warranty.clone().unwrap_or_default(),
            image_urls: product.image_urls.clone(),
        }
    }

    /// Collect every field error; empty when the draft can be submitted.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", "Name", &self.name);
        require_decimal(&mut errors, "price", "Price", &self.price);
        require_integer(&mut errors, "stock_quantity", "Stock quantity", &self.stock_quantity);
        optional_decimal(&mut errors, "discount_price", "Discount price", &self.discount_price);
        optional_decimal(&mut errors, "weight", "Weight", &self.weight);
        optional_decimal(&mut errors, "length", "Length", &self.length);
        optional_decimal(&mut errors, "width", "Width", &self.width);
        optional_decimal(&mut errors, "height", "Height", &self.height);
        errors
    }

    /// Validate, then convert to the body sent to the backend.
    ///
    /// # Errors
    ///
    /// Returns the field errors when the draft is not submittable.
    pub fn to_payload(&self) -> Result<ProductPayload, Vec<FieldError>> {
        let errors = self.validate();
        let (Some(price), Some(stock_quantity)) = (parse_decimal(&self.price), parse_integer(&self.stock_quantity))
        else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ProductPayload {
            name: self.name.trim().to_owned(),
            description: self.description.clone(),
            price,
            discount_price: parse_decimal(&self.discount_price),
            category_id: non_blank(&self.category_id),
            stock_quantity,
            is_active: self.is_active,
            is_featured: self.is_featured,
            sku: self.sku.clone(),
            brand: self.brand.clone(),
            part_number: self.part_number.clone(),
            compatibility: self.compatibility_map(),
            weight: parse_decimal(&self.weight),
            dimensions: self.dimensions(),
            warranty: self.warranty.clone(),
            image_urls: self.image_urls.clone(),
        })
    }

    /// `None` when all three sub-fields are blank.
    fn dimensions(&self) -> Option<Dimensions> {
        let all_blank = [&self.length, &self.width, &self.height].iter().all(|v| v.trim().is_empty());
        if all_blank {
            return None;
        }
        Some(Dimensions {
            length: parse_decimal(&self.length),
            width: parse_decimal(&self.width),
            height: parse_decimal(&self.height),
        })
    }

    /// Rows with a non-blank key, later rows winning on duplicates.
    fn compatibility_map(&self) -> Option<BTreeMap<String, serde_json::Value>> {
        let map: BTreeMap<String, serde_json::Value> = self
            .compatibility
            .iter()
            .filter_map(|row| {
                non_blank(&row.key).map(|key| (key, serde_json::Value::String(row.value.trim().to_owned())))
            })
            .collect();
        if map.is_empty() { None } else { Some(map) }
    }

    pub fn add_compatibility_row(&mut self) {
        self.compatibility.push(CompatibilityRow::default());
    }

    pub fn remove_compatibility_row(&mut self, index: usize) {
        if index < self.compatibility.len() {
            self.compatibility.remove(index);
        }
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.image_urls.len() {
            self.image_urls.remove(index);
        }
    }

    /// Apply the result of an upload batch and return the toast to show.
    /// A failed batch leaves `image_urls` untouched.
    pub fn apply_upload(&mut self, result: Result<Vec<String>, ApiError>) -> Notice {
        match result {
            Ok(urls) => {
                self.image_urls.extend(urls);
                Notice::success(UPLOAD_SUCCESS)
            }
            Err(e) => {
                leptos::logging::warn!("product image upload failed: {e}");
                Notice::error(UPLOAD_FAILED)
            }
        }
    }
}
