use std::cell::RefCell;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::*;
use crate::net::types::{RegisterRequest, TokenResponse, User};
use crate::state::toast::ToastKind;

/// Records every request and answers with a canned result.
#[derive(Default)]
struct RecordingApi {
    calls: RefCell<Vec<(&'static str, String, Option<Value>)>>,
    list_body: Value,
    reject_with: Option<ApiError>,
}

impl RecordingApi {
    fn rejecting(error: ApiError) -> Self {
        Self { reject_with: Some(error), ..Self::default() }
    }

    fn answer(&self, method: &'static str, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.calls.borrow_mut().push((method, path.to_owned(), body.cloned()));
        match &self.reject_with {
            Some(error) => Err(error.clone()),
            None => Ok(json!({})),
        }
    }

    fn calls(&self) -> Vec<(&'static str, String, Option<Value>)> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ShopApi for RecordingApi {
    async fn login(&self, _email: &str, _password: &str) -> Result<TokenResponse, ApiError> {
        Err(ApiError::Transport("unused".to_owned()))
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<User, ApiError> {
        Err(ApiError::Transport("unused".to_owned()))
    }

    async fn current_user(&self, _token: &str) -> Result<User, ApiError> {
        Err(ApiError::Transport("unused".to_owned()))
    }

    async fn exchange_google_credential(&self, _credential: &str) -> Result<TokenResponse, ApiError> {
        Err(ApiError::Transport("unused".to_owned()))
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        self.answer("GET", path, None)?;
        Ok(self.list_body.clone())
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.answer("POST", path, Some(body))
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.answer("PUT", path, Some(body))
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.answer("DELETE", path, None).map(drop)
    }
}

fn category_payload(name: &str) -> CategoryPayload {
    CategoryPayload { name: name.to_owned(), description: String::new(), image_url: None, is_active: true }
}

// =============================================================
// list
// =============================================================

#[tokio::test]
async fn product_list_requests_first_hundred() {
    let api = RecordingApi {
        list_body: json!([{ "id": "p1", "name": "Brake pad", "price": "12.50" }]),
        ..RecordingApi::default()
    };
    let manager = RecordManager::<Product, _>::new(api);

    let products = manager.list().await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id(), "p1");
    assert_eq!(manager.api.calls()[0].1, "/products/?limit=100");
}

#[tokio::test]
async fn category_list_has_no_query() {
    let api = RecordingApi { list_body: json!([]), ..RecordingApi::default() };
    let manager = RecordManager::<Category, _>::new(api);

    assert!(manager.list().await.unwrap().is_empty());
    assert_eq!(manager.api.calls()[0].1, "/categories/");
}

#[tokio::test]
async fn list_with_unexpected_body_is_decode_error() {
    let api = RecordingApi { list_body: json!({ "items": [] }), ..RecordingApi::default() };
    let manager = RecordManager::<Category, _>::new(api);

    assert!(matches!(manager.list().await, Err(ApiError::Decode(_))));
}

// =============================================================
// create / update
// =============================================================

#[tokio::test]
async fn create_posts_payload_and_invalidates_own_collection() {
    let manager = RecordManager::<Category, _>::new(RecordingApi::default());

    let outcome = manager.create(&category_payload("Brakes")).await;

    assert!(outcome.succeeded());
    assert_eq!(outcome.invalidate, Some(CollectionKey::Categories));
    assert_eq!(outcome.notice, Some(Notice::success("Category created successfully")));
    let calls = manager.api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "POST");
    assert_eq!(calls[0].1, "/categories/");
    assert_eq!(calls[0].2.as_ref().unwrap()["image_url"], Value::Null);
}

#[tokio::test]
async fn update_puts_to_record_path() {
    let manager = RecordManager::<Category, _>::new(RecordingApi::default());

    let outcome = manager.update("c9", &category_payload("Filters")).await;

    assert_eq!(outcome.notice, Some(Notice::success("Category updated successfully")));
    let calls = manager.api.calls();
    assert_eq!(calls[0].0, "PUT");
    assert_eq!(calls[0].1, "/categories/c9");
}

#[tokio::test]
async fn rejected_create_reports_server_detail_and_invalidates_nothing() {
    let api = RecordingApi::rejecting(ApiError::rejected(400, r#"{"detail":"Category already exists"}"#));
    let manager = RecordManager::<Category, _>::new(api);

    let outcome = manager.create(&category_payload("Brakes")).await;

    assert!(!outcome.succeeded());
    assert_eq!(outcome.invalidate, None);
    assert_eq!(outcome.notice, Some(Notice::error("Category already exists")));
}

#[tokio::test]
async fn rejected_update_without_detail_uses_fallback() {
    let api = RecordingApi::rejecting(ApiError::rejected(500, "Internal Server Error"));
    let manager = RecordManager::<Category, _>::new(api);

    let outcome = manager.update("c1", &category_payload("x")).await;

    assert_eq!(outcome.notice, Some(Notice::error("Failed to update category")));
}

// =============================================================
// delete
// =============================================================

#[tokio::test]
async fn delete_invalidates_own_collection_exactly_once() {
    let manager = RecordManager::<Product, _>::new(RecordingApi::default());
    let mut cache = RecordCache::default();

    let outcome = manager.delete("p1", |_| true).await;
    let notice = outcome.apply(&mut cache);

    assert_eq!(cache.generation(CollectionKey::AdminProducts), 1);
    assert_eq!(cache.generation(CollectionKey::Categories), 0);
    assert_eq!(notice, Some(Notice::success("Product deleted successfully")));
    assert_eq!(manager.api.calls(), vec![("DELETE", "/products/p1".to_owned(), None)]);
}

#[tokio::test]
async fn delete_asks_for_confirmation_with_entity_label() {
    let manager = RecordManager::<Category, _>::new(RecordingApi::default());
    let mut asked = None;

    manager
        .delete("c1", |question| {
            asked = Some(question.to_owned());
            true
        })
        .await;

    assert_eq!(asked.as_deref(), Some("Are you sure you want to delete this category?"));
}

#[tokio::test]
async fn declined_delete_sends_nothing_and_reports_nothing() {
    let manager = RecordManager::<Product, _>::new(RecordingApi::default());

    let outcome = manager.delete("p1", |_| false).await;

    assert_eq!(outcome, MutationOutcome::default());
    assert!(manager.api.calls().is_empty());
}

#[tokio::test]
async fn failed_delete_leaves_cache_untouched() {
    let api = RecordingApi::rejecting(ApiError::Transport("Failed to fetch".to_owned()));
    let manager = RecordManager::<Product, _>::new(api);
    let mut cache = RecordCache::default();

    let notice = manager.delete("p1", |_| true).await.apply(&mut cache);

    assert_eq!(cache, RecordCache::default());
    let notice = notice.unwrap();
    assert_eq!(notice.kind, ToastKind::Error);
    assert_eq!(notice.message, "Network error. Please try again.");
}

#[test]
fn labels_capitalize_first_letter() {
    assert_eq!(capitalized("product"), "Product");
    assert_eq!(capitalized(""), "");
}

#[test]
fn list_failure_text_uses_plural_label() {
    assert_eq!(list_failed::<Product>(), "Failed to load products");
    assert_eq!(list_failed::<Category>(), "Failed to load categories");
}
