use std::{fmt, future::Future, marker::PhantomData};

use api_types::ResourceId;
use chrono::NaiveDate;
use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned, de::Error as _};
use serde_json::Value;

use crate::{
    error::ClientError,
    form::DraftFields,
    http::HttpClient,
    table::Column,
    validation::{FieldErrors, fields},
};

/// Endpoint layout and labels of a soft-deletable resource.
///
/// The backend exposes every resource under the same scheme: `GET /<path>/` for active rows
/// (enveloped as `{<list_key>: [...]}`), `GET /<path>/deleted` (`{<deleted_key>: [...]}`),
/// `POST /<path>/create` and `PUT /<path>/update/:id` (both answering `{<singular_key>: {...}}`)
/// and `PATCH /<path>/soft_delete/:id` / `PATCH /<path>/restore/:id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub path: &'static str,
    pub singular_key: &'static str,
    pub list_key: &'static str,
    pub deleted_key: &'static str,
    /// Capitalized singular, e.g. `Wallet`.
    pub label: &'static str,
    /// Capitalized plural, e.g. `Wallets`.
    pub plural_label: &'static str,
}

impl Descriptor {
    pub fn list_path(&self) -> String {
        format!("/{}/", self.path)
    }

    pub fn deleted_path(&self) -> String {
        format!("/{}/deleted", self.path)
    }

    pub fn create_path(&self) -> String {
        format!("/{}/create", self.path)
    }

    pub fn update_path(&self, id: &ResourceId) -> String {
        format!("/{}/update/{id}", self.path)
    }

    pub fn soft_delete_path(&self, id: &ResourceId) -> String {
        format!("/{}/soft_delete/{id}", self.path)
    }

    pub fn restore_path(&self, id: &ResourceId) -> String {
        format!("/{}/restore/{id}", self.path)
    }

    /// Lower-case singular used inside messages ("Failed to save wallet").
    pub fn noun(&self) -> String {
        self.label.to_lowercase()
    }

    pub fn plural_noun(&self) -> String {
        self.plural_label.to_lowercase()
    }
}

/// A backend resource managed through the list/form pattern.
///
/// Implemented for [`Wallet`](api_types::wallet::Wallet),
/// [`Category`](api_types::category::Category) and [`Goal`](api_types::goal::Goal).
pub trait Resource: Clone + fmt::Debug + DeserializeOwned {
    type Draft: DraftFields;
    type CreateBody: Serialize;
    type UpdateBody: Serialize;

    const DESCRIPTOR: Descriptor;

    fn id(&self) -> &ResourceId;

    fn name(&self) -> &str;

    /// Copies the editable fields into a fresh draft.
    fn to_draft(&self) -> Self::Draft;

    /// Overwrites the fields the draft carries, keeping everything else.
    fn apply_draft(&mut self, draft: &Self::Draft);

    /// Builds a resource when the backend confirms an update without echoing it back.
    fn from_draft(id: ResourceId, draft: &Self::Draft) -> Self;

    fn create_body(draft: &Self::Draft) -> Self::CreateBody;

    fn update_body(draft: &Self::Draft) -> Self::UpdateBody;

    fn validate(
        draft: &Self::Draft,
        active: &[Self],
        editing: Option<&ResourceId>,
        today: NaiveDate,
    ) -> FieldErrors;

    fn columns() -> Vec<Column<Self>>;
}

/// Backend operations the list state and the form controller rely on.
pub trait CrudApi<R: Resource> {
    fn list(&self) -> impl Future<Output = Result<Vec<R>, ClientError>>;

    fn list_deleted(&self) -> impl Future<Output = Result<Vec<R>, ClientError>>;

    fn create(&self, draft: &R::Draft) -> impl Future<Output = Result<R, ClientError>>;

    fn update(
        &self,
        id: &ResourceId,
        draft: &R::Draft,
    ) -> impl Future<Output = Result<R, ClientError>>;

    fn soft_delete(&self, id: &ResourceId) -> impl Future<Output = Result<(), ClientError>>;

    fn restore(&self, id: &ResourceId) -> impl Future<Output = Result<(), ClientError>>;
}

/// HTTP implementation of [`CrudApi`] for one resource type.
#[derive(Clone, Debug)]
pub struct ResourceClient<R> {
    http: HttpClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}

impl<R: Resource> CrudApi<R> for ResourceClient<R> {
    async fn list(&self) -> Result<Vec<R>, ClientError> {
        let d = R::DESCRIPTOR;
        let body = self.http.get_json(&d.list_path()).await?;
        let items = take_list(body, d.list_key)?;
        tracing::debug!(resource = d.path, count = items.len(), "listed active");
        Ok(items)
    }

    async fn list_deleted(&self) -> Result<Vec<R>, ClientError> {
        let d = R::DESCRIPTOR;
        let body = self.http.get_json(&d.deleted_path()).await?;
        let items = take_list(body, d.deleted_key)?;
        tracing::debug!(resource = d.path, count = items.len(), "listed deleted");
        Ok(items)
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, ClientError> {
        let d = R::DESCRIPTOR;
        let body = self
            .http
            .send_json(Method::POST, &d.create_path(), &R::create_body(draft))
            .await?;
        match envelope(body, d.singular_key) {
            Some(payload) if has_id(&payload) => Ok(serde_json::from_value(payload)?),
            _ => self.find_created(draft).await,
        }
    }

    async fn update(&self, id: &ResourceId, draft: &R::Draft) -> Result<R, ClientError> {
        let d = R::DESCRIPTOR;
        let body = self
            .http
            .send_json(Method::PUT, &d.update_path(id), &R::update_body(draft))
            .await?;
        Ok(take_one(body, d.singular_key)?.unwrap_or_else(|| R::from_draft(id.clone(), draft)))
    }

    async fn soft_delete(&self, id: &ResourceId) -> Result<(), ClientError> {
        self.http
            .send_empty(Method::PATCH, &R::DESCRIPTOR.soft_delete_path(id))
            .await
    }

    async fn restore(&self, id: &ResourceId) -> Result<(), ClientError> {
        self.http
            .send_empty(Method::PATCH, &R::DESCRIPTOR.restore_path(id))
            .await
    }
}

impl<R: Resource> ResourceClient<R> {
    /// Looks up a row the backend created without echoing its id (the wallet endpoint answers
    /// `{"wallet": {name, balance, currency}}`). Active names are unique, so the name finds it.
    async fn find_created(&self, draft: &R::Draft) -> Result<R, ClientError> {
        let d = R::DESCRIPTOR;
        let name = draft.display(fields::NAME);
        let name = name.trim();
        tracing::debug!(resource = d.path, name, "create response has no id, refetching");
        self.list()
            .await?
            .into_iter()
            .rev()
            .find(|item| item.name() == name)
            .ok_or_else(|| {
                ClientError::Decode(serde_json::Error::custom(format!(
                    "created {} \"{name}\" is missing from the active list",
                    d.noun()
                )))
            })
    }
}

/// Unwraps `{<key>: [...]}`. A bare array is accepted as is; anything else (missing key,
/// `null`, a non-array) is an empty list.
fn take_list<R: DeserializeOwned>(body: Value, key: &str) -> Result<Vec<R>, ClientError> {
    let payload = match body {
        Value::Object(mut map) => map.remove(key).unwrap_or(Value::Null),
        other => other,
    };
    match payload {
        Value::Array(_) => Ok(serde_json::from_value(payload)?),
        _ => Ok(Vec::new()),
    }
}

/// Unwraps `{<key>: {...}}`, falling back to the body itself when it already looks like a
/// resource.
fn take_one<R: DeserializeOwned>(body: Value, key: &str) -> Result<Option<R>, ClientError> {
    match envelope(body, key) {
        Some(payload) => Ok(Some(serde_json::from_value(payload)?)),
        None => Ok(None),
    }
}

fn envelope(body: Value, key: &str) -> Option<Value> {
    let Value::Object(mut map) = body else {
        return None;
    };
    match map.remove(key) {
        Some(Value::Null) | None if map.contains_key("id") => Some(Value::Object(map)),
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    }
}

fn has_id(payload: &Value) -> bool {
    payload.get("id").is_some_and(|id| !id.is_null())
}

#[cfg(test)]
mod tests {
    use api_types::category::Category;
    use serde_json::json;

    use super::*;

    #[test]
    fn descriptor_paths_follow_backend_layout() {
        let d = Descriptor {
            path: "wallets",
            singular_key: "wallet",
            list_key: "wallets",
            deleted_key: "deleted_wallets",
            label: "Wallet",
            plural_label: "Wallets",
        };
        let id = ResourceId::from("3");
        assert_eq!(d.list_path(), "/wallets/");
        assert_eq!(d.deleted_path(), "/wallets/deleted");
        assert_eq!(d.create_path(), "/wallets/create");
        assert_eq!(d.update_path(&id), "/wallets/update/3");
        assert_eq!(d.soft_delete_path(&id), "/wallets/soft_delete/3");
        assert_eq!(d.restore_path(&id), "/wallets/restore/3");
        assert_eq!(d.noun(), "wallet");
        assert_eq!(d.plural_noun(), "wallets");
    }

    #[test]
    fn list_envelope_defaults_to_empty() {
        let items: Vec<Category> = take_list(json!({"page": 1}), "categories").unwrap();
        assert!(items.is_empty());
        let items: Vec<Category> = take_list(json!({"categories": null}), "categories").unwrap();
        assert!(items.is_empty());
        let items: Vec<Category> = take_list(Value::Null, "categories").unwrap();
        assert!(items.is_empty());

        let items: Vec<Category> = take_list(
            json!({"categories": [{"id": 1, "name": "Food"}], "total_items": 1}),
            "categories",
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Food");
    }

    #[test]
    fn single_envelope_is_unwrapped() {
        let item: Option<Category> = take_one(
            json!({"message": "ok", "category": {"id": 5, "name": "Rent"}}),
            "category",
        )
        .unwrap();
        assert_eq!(item.map(|c| c.id), Some(ResourceId::from("5")));

        let item: Option<Category> = take_one(json!({"id": 6, "name": "Bills"}), "category").unwrap();
        assert_eq!(item.map(|c| c.name), Some("Bills".to_string()));

        let item: Option<Category> = take_one(json!({"message": "ok"}), "category").unwrap();
        assert!(item.is_none());
    }

    #[test]
    fn id_less_payload_is_detected() {
        let payload = envelope(
            json!({"wallet": {"name": "Cash", "balance": 100, "currency": "USD"}}),
            "wallet",
        )
        .unwrap();
        assert!(!has_id(&payload));
        assert!(has_id(&json!({"id": 0, "name": "Cash"})));
        assert!(!has_id(&json!({"id": null})));
    }
}
