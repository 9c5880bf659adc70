//! Generic list + create + update + delete workflow for admin records.
//!
//! ARCHITECTURE
//! ============
//! One [`RecordManager`] is instantiated per [`AdminEntity`] (products and
//! categories). Mutations never fail loudly: each returns a
//! [`MutationOutcome`] naming the collection to invalidate and the toast to
//! show, which the admin page applies to the shared contexts.
//!
//! Only the entity's own collection is ever invalidated, and only after the
//! backend accepted the mutation.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api::{ShopApi, decode_value, to_json};
use super::error::ApiError;
use super::types::{Category, CategoryPayload, Product, ProductPayload};
use crate::state::records::{CollectionKey, RecordCache};
use crate::state::toast::Notice;

/// A backend record type managed from the admin page.
pub trait AdminEntity: DeserializeOwned + Clone + 'static {
    /// Normalized body sent on create and update.
    type Payload: Serialize;

    /// Cached collection this entity lists into.
    const COLLECTION: CollectionKey;
    /// REST collection path, with trailing slash.
    const BASE_PATH: &'static str;
    /// Lowercase display label used in notifications.
    const LABEL: &'static str;
    /// Lowercase plural label used for the collection as a whole.
    const PLURAL: &'static str;
    /// Query string appended when listing, including the leading `?`.
    const LIST_QUERY: &'static str = "";

    fn id(&self) -> &str;
}

impl AdminEntity for Product {
    type Payload = ProductPayload;

    const COLLECTION: CollectionKey = CollectionKey::AdminProducts;
    const BASE_PATH: &'static str = "/products/";
    const LABEL: &'static str = "product";
    const PLURAL: &'static str = "products";
    const LIST_QUERY: &'static str = "?limit=100";

    fn id(&self) -> &str {
        &self.id
    }
}

impl AdminEntity for Category {
    type Payload = CategoryPayload;

    const COLLECTION: CollectionKey = CollectionKey::Categories;
    const BASE_PATH: &'static str = "/categories/";
    const LABEL: &'static str = "category";
    const PLURAL: &'static str = "categories";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Side effects a finished mutation asks the UI to perform.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MutationOutcome {
    pub invalidate: Option<CollectionKey>,
    pub notice: Option<Notice>,
}

impl MutationOutcome {
    /// `true` when the backend accepted the mutation.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.invalidate.is_some()
    }

    /// Invalidate the collection this outcome names, if any, and hand back
    /// the notice to show.
    pub fn apply(self, cache: &mut RecordCache) -> Option<Notice> {
        if let Some(key) = self.invalidate {
            cache.invalidate(key);
        }
        self.notice
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verb {
    Create,
    Update,
    Delete,
}

impl Verb {
    fn past(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }

    fn present(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Fallback message when a collection cannot be fetched.
#[must_use]
pub fn list_failed<E: AdminEntity>() -> String {
    format!("Failed to load {}", E::PLURAL)
}

/// Text of the blocking confirmation shown before a delete.
#[must_use]
pub fn delete_confirmation<E: AdminEntity>() -> String {
    format!("Are you sure you want to delete this {}?", E::LABEL)
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Admin workflow for one entity type.
#[derive(Clone, Debug)]
pub struct RecordManager<E, A> {
    api: A,
    entity: PhantomData<E>,
}

impl<E, A> RecordManager<E, A>
where
    E: AdminEntity,
    A: ShopApi,
{
    pub fn new(api: A) -> Self {
        Self { api, entity: PhantomData }
    }

    /// Fetch the whole collection.
    ///
    /// # Errors
    ///
    /// Returns the request failure, or a decode error when the body is not a
    /// list of records.
    pub async fn list(&self) -> Result<Vec<E>, ApiError> {
        let path = format!("{}{}", E::BASE_PATH, E::LIST_QUERY);
        let body = self.api.get_json(&path).await?;
        decode_value(body)
    }

    pub async fn create(&self, payload: &E::Payload) -> MutationOutcome {
        let result = match to_json(payload) {
            Ok(body) => self.api.post_json(E::BASE_PATH, &body).await.map(drop),
            Err(e) => Err(e),
        };
        Self::outcome(Verb::Create, result)
    }

    pub async fn update(&self, id: &str, payload: &E::Payload) -> MutationOutcome {
        let result = match to_json(payload) {
            Ok(body) => self.api.put_json(&record_path::<E>(id), &body).await.map(drop),
            Err(e) => Err(e),
        };
        Self::outcome(Verb::Update, result)
    }

    /// Delete a record after `confirm` accepts the confirmation text.
    /// A declined confirmation sends nothing and reports nothing.
    pub async fn delete<F>(&self, id: &str, confirm: F) -> MutationOutcome
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(&delete_confirmation::<E>()) {
            return MutationOutcome::default();
        }
        let result = self.api.delete(&record_path::<E>(id)).await;
        Self::outcome(Verb::Delete, result)
    }

    fn outcome(verb: Verb, result: Result<(), ApiError>) -> MutationOutcome {
        match result {
            Ok(()) => MutationOutcome {
                invalidate: Some(E::COLLECTION),
                notice: Some(Notice::success(format!(
                    "{} {} successfully",
                    capitalized(E::LABEL),
                    verb.past()
                ))),
            },
            Err(e) => {
                leptos::logging::warn!("{} {} failed: {e}", E::LABEL, verb.present());
                let fallback = format!("Failed to {} {}", verb.present(), E::LABEL);
                MutationOutcome { invalidate: None, notice: Some(Notice::error(e.user_message(&fallback))) }
            }
        }
    }
}

fn record_path<E: AdminEntity>(id: &str) -> String {
    format!("{}{id}", E::BASE_PATH)
}
