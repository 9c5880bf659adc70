//! Editable category draft.

#[cfg(test)]
#[path = "category_form_test.rs"]
mod category_form_test;

use super::form_validation::{FieldError, non_blank, require_text};
use crate::net::error::ApiError;
use crate::net::types::{Category, CategoryPayload};
use crate::state::toast::Notice;

pub const UPLOAD_SUCCESS: &str = "Image uploaded successfully";
pub const UPLOAD_FAILED: &str = "Failed to upload image";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub is_active: bool,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        Self { name: String::new(), description: String::new(), image_url: String::new(), is_active: true }
    }
}

impl CategoryDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            image_url: category.image_url.clone().unwrap_or_default(),
            is_active: category.is_active,
        }
    }

    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", "Name", &self.name);
        errors
    }

    /// # Errors
    ///
    /// Returns the field errors when the draft is not submittable.
    pub fn to_payload(&self) -> Result<CategoryPayload, Vec<FieldError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CategoryPayload {
            name: self.name.trim().to_owned(),
            description: self.description.clone(),
            image_url: non_blank(&self.image_url),
            is_active: self.is_active,
        })
    }

    pub fn clear_image(&mut self) {
        self.image_url.clear();
    }

    /// Replace the image with a freshly uploaded one and return the toast to
    /// show. A failed upload keeps the current image.
    pub fn apply_upload(&mut self, result: Result<String, ApiError>) -> Notice {
        match result {
            Ok(url) => {
                self.image_url = url;
                Notice::success(UPLOAD_SUCCESS)
            }
            Err(e) => {
                leptos::logging::warn!("category image upload failed: {e}");
                Notice::error(UPLOAD_FAILED)
            }
        }
    }
}
