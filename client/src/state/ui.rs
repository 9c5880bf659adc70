//! Local UI chrome state for the admin page (active tab, open editor).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the cached collections so
//! the list views and the modal forms can evolve independently.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use crate::net::types::{Category, Product};

/// Tabs on the admin page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Products,
    Categories,
}

impl AdminTab {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::Categories => "Categories",
        }
    }
}

/// Which modal form is open, and in which mode.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Editor {
    #[default]
    Closed,
    NewProduct,
    EditProduct(Product),
    NewCategory,
    EditCategory(Category),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdminUiState {
    pub tab: AdminTab,
    pub editor: Editor,
}

impl AdminUiState {
    /// Switch tabs. Any open form is closed.
    pub fn select_tab(&mut self, tab: AdminTab) {
        self.tab = tab;
        self.editor = Editor::Closed;
    }

    /// Open a blank form for the active tab's entity.
    pub fn open_create(&mut self) {
        self.editor = match self.tab {
            AdminTab::Products => Editor::NewProduct,
            AdminTab::Categories => Editor::NewCategory,
        };
    }

    pub fn edit_product(&mut self, product: Product) {
        self.editor = Editor::EditProduct(product);
    }

    pub fn edit_category(&mut self, category: Category) {
        self.editor = Editor::EditCategory(category);
    }

    pub fn close_editor(&mut self) {
        self.editor = Editor::Closed;
    }
}
