//! EdgeKV items
//!
//! Items live under `network / namespace / group`. Unlike the rest of the
//! API an item is opaque text: it may be JSON but does not have to be, so
//! reads and writes move raw bodies instead of typed ones. Writing the
//! first item to a group creates the group, which is why group listing
//! lives here too.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::validation::ValidationErrors;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::edgekv_namespaces::EdgeKvNetwork;

const OP_LIST_ITEMS: &str = "listing items";
const OP_GET_ITEM: &str = "getting item";
const OP_UPSERT_ITEM: &str = "creating or updating item";
const OP_DELETE_ITEM: &str = "deleting item";
const OP_LIST_GROUPS: &str = "listing groups within namespace";

/// A single item value, opaque text that may or may not be JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(pub String);

impl Item {
    /// Wrap a value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Whether the value parses as JSON, which decides the content type
    /// the write is sent with.
    #[must_use]
    pub fn is_json(&self) -> bool {
        serde_json::from_str::<serde_json::Value>(&self.0).is_ok()
    }

    fn content_type(&self) -> &'static str {
        if self.is_json() {
            "application/json"
        } else {
            "text/plain"
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Location shared by all item operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsRequestParams {
    /// Network the namespace lives on
    pub network: EdgeKvNetwork,
    /// Namespace holding the group
    pub namespace_id: String,
    /// Group holding the items
    pub group_id: String,
}

impl ItemsRequestParams {
    fn validate_into(&self, errors: &mut ValidationErrors) {
        self.network.validate("network", errors);
        errors.require_str("namespace_id", &self.namespace_id);
        errors.require_str("group_id", &self.group_id);
    }

    fn base_path(&self) -> String {
        format!(
            "/edgekv/v1/networks/{}/namespaces/{}/groups/{}",
            self.network, self.namespace_id, self.group_id
        )
    }
}

/// Parameters for listing the items of a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItemsRequest {
    /// Group location
    pub params: ItemsRequestParams,
}

/// Parameters for reading one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetItemRequest {
    /// Item key
    pub item_id: String,
    /// Group location
    pub params: ItemsRequestParams,
}

/// Parameters for creating or updating one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsertItemRequest {
    /// Item key
    pub item_id: String,
    /// Value to store
    pub item_data: Item,
    /// Group location
    pub params: ItemsRequestParams,
}

/// Parameters for deleting one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteItemRequest {
    /// Item key
    pub item_id: String,
    /// Group location
    pub params: ItemsRequestParams,
}

/// Parameters for listing the groups of a namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListGroupsRequest {
    /// Network the namespace lives on
    pub network: EdgeKvNetwork,
    /// Namespace to list groups of
    pub namespace_id: String,
}

impl ListItemsRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.params.validate_into(&mut errors);
        errors.finish()
    }
}

impl GetItemRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_str("item_id", &self.item_id);
        self.params.validate_into(&mut errors);
        errors.finish()
    }
}

impl UpsertItemRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_str("item_id", &self.item_id);
        errors.require_str("item_data", &self.item_data.0);
        self.params.validate_into(&mut errors);
        errors.finish()
    }
}

impl DeleteItemRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_str("item_id", &self.item_id);
        self.params.validate_into(&mut errors);
        errors.finish()
    }
}

impl ListGroupsRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.network.validate("network", &mut errors);
        errors.require_str("namespace_id", &self.namespace_id);
        errors.finish()
    }
}

/// EdgeKV items API.
#[derive(Clone)]
pub struct ItemsApi {
    client: Client,
}

impl ItemsApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the item keys in a group.
    ///
    /// GET `/edgekv/v1/networks/{network}/namespaces/{ns}/groups/{group}`
    pub async fn list(&self, params: ListItemsRequest) -> Result<Vec<String>> {
        debug!("list items");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_LIST_ITEMS, errors))?;

        let path = params.params.base_path();
        self.client.get_json(OP_LIST_ITEMS, &path, StatusCode::OK).await
    }

    /// Read one item.
    ///
    /// GET `.../items/{itemId}`; the body is returned verbatim.
    pub async fn get(&self, params: GetItemRequest) -> Result<Item> {
        debug!("get item");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_GET_ITEM, errors))?;

        let path = format!("{}/items/{}", params.params.base_path(), params.item_id);
        self.client
            .send_text(OP_GET_ITEM, Method::GET, &path, None, StatusCode::OK)
            .await
            .map(Item)
    }

    /// Create or update one item. JSON values are sent as
    /// `application/json`, anything else as `text/plain`.
    ///
    /// PUT `.../items/{itemId}`
    pub async fn upsert(&self, params: UpsertItemRequest) -> Result<String> {
        debug!("upsert item");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_UPSERT_ITEM, errors))?;

        let path = format!("{}/items/{}", params.params.base_path(), params.item_id);
        let content_type = params.item_data.content_type();
        self.client
            .send_text(
                OP_UPSERT_ITEM,
                Method::PUT,
                &path,
                Some((params.item_data.0.into_bytes(), content_type)),
                StatusCode::OK,
            )
            .await
    }

    /// Delete one item.
    ///
    /// DELETE `.../items/{itemId}`
    pub async fn delete(&self, params: DeleteItemRequest) -> Result<String> {
        debug!("delete item");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_DELETE_ITEM, errors))?;

        let path = format!("{}/items/{}", params.params.base_path(), params.item_id);
        self.client
            .send_text(OP_DELETE_ITEM, Method::DELETE, &path, None, StatusCode::OK)
            .await
    }

    /// List the group identifiers that exist in a namespace.
    ///
    /// GET `/edgekv/v1/networks/{network}/namespaces/{ns}/groups`
    pub async fn list_groups(&self, params: ListGroupsRequest) -> Result<Vec<String>> {
        debug!("list groups within namespace");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_LIST_GROUPS, errors))?;

        let path = format!(
            "/edgekv/v1/networks/{}/namespaces/{}/groups",
            params.network, params.namespace_id
        );
        self.client.get_json(OP_LIST_GROUPS, &path, StatusCode::OK).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> ItemsRequestParams {
        ItemsRequestParams {
            network: EdgeKvNetwork::STAGING,
            namespace_id: "marketing".to_string(),
            group_id: "greetings".to_string(),
        }
    }

    #[test]
    fn test_item_content_type() {
        assert_eq!(Item::new(r#"{"a":1}"#).content_type(), "application/json");
        assert_eq!(Item::new("\"quoted\"").content_type(), "application/json");
        assert_eq!(Item::new("hello world").content_type(), "text/plain");
    }

    #[test]
    fn test_get_requires_item_id() {
        let errors = GetItemRequest {
            item_id: String::new(),
            params: location(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.field("item_id"), Some("cannot be blank"));
    }

    #[test]
    fn test_all_location_fields_required() {
        let errors = ListItemsRequest::default().validate().unwrap_err();
        assert_eq!(
            errors.to_string(),
            "group_id: cannot be blank; namespace_id: cannot be blank; network: cannot be blank"
        );
    }

    #[test]
    fn test_base_path_layout() {
        assert_eq!(
            location().base_path(),
            "/edgekv/v1/networks/staging/namespaces/marketing/groups/greetings"
        );
    }
}
