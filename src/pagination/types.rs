//! Pagination types
//!
//! Defines the page response shape and the continuation token carried by
//! every page.

use crate::dispatch::PageRequest;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Names of the fields a page response must carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageShape {
    /// Field holding the array of items (default: "data")
    pub items_field: String,
    /// Field holding the next page token (default: "next_page")
    pub next_page_field: String,
}

impl Default for PageShape {
    fn default() -> Self {
        Self {
            items_field: "data".to_string(),
            next_page_field: "next_page".to_string(),
        }
    }
}

impl PageShape {
    /// Create a shape with custom field names
    pub fn new(items_field: impl Into<String>, next_page_field: impl Into<String>) -> Self {
        Self {
            items_field: items_field.into(),
            next_page_field: next_page_field.into(),
        }
    }
}

/// Continuation token pointing at the following page.
///
/// Common patterns:
/// - `{ "next_page": { "offset": "eyJ0", "path": "/tasks?limit=2&offset=eyJ0", "uri": "https://..." } }`
/// - `{ "next_page": "https://api.example.com/items?page=2" }`
/// - `{ "next_page": null }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPage {
    /// Opaque offset token
    #[serde(default)]
    pub offset: Option<String>,
    /// Relative path for the next page
    #[serde(default)]
    pub path: Option<String>,
    /// Absolute URI for the next page
    #[serde(default)]
    pub uri: Option<String>,
}

impl NextPage {
    /// Create a token that follows an absolute URI
    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Default::default()
        }
    }

    /// Create a token that requests a path at an offset
    pub fn with_path(path: impl Into<String>, offset: impl Into<String>) -> Self {
        Self {
            offset: Some(offset.into()),
            path: Some(path.into()),
            uri: None,
        }
    }

    /// Parse the next page field of a response.
    ///
    /// `null` and `""` mean there are no more pages.
    pub fn from_value(value: JsonValue) -> Result<Option<Self>> {
        match value {
            JsonValue::Null => Ok(None),
            JsonValue::String(uri) if uri.is_empty() => Ok(None),
            JsonValue::String(uri) => Ok(Some(Self::with_uri(uri))),
            JsonValue::Object(map) => Ok(Some(Self {
                offset: token_field(&map, "offset")?,
                path: token_field(&map, "path")?,
                uri: token_field(&map, "uri")?,
            })),
            other => Err(Error::protocol_shape(format!(
                "next page must be null, a string or an object, got {other}"
            ))),
        }
    }

    /// Build the request for the page this token points at.
    ///
    /// `uri` wins over `path`; a token with neither ends pagination.
    /// `offset` is only added when `path` does not already carry one.
    pub fn request(&self) -> Option<PageRequest> {
        if let Some(uri) = self.uri.as_deref().filter(|u| !u.is_empty()) {
            return Some(PageRequest::new(uri));
        }

        let path = self.path.as_deref().filter(|p| !p.is_empty())?;
        let mut request = PageRequest::new(path);
        if let Some(offset) = &self.offset {
            if !path_has_offset(path) {
                request = request.query("offset", offset);
            }
        }
        Some(request)
    }
}

fn path_has_offset(path: &str) -> bool {
    path.split_once('?').is_some_and(|(_, query)| {
        form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == "offset")
    })
}

fn token_field(map: &JsonObject, name: &str) -> Result<Option<String>> {
    match map.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(Error::protocol_shape(format!(
            "next page `{name}` must be a string, got {other}"
        ))),
    }
}

/// One validated page of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse<T = JsonValue> {
    /// Items on this page, in response order
    pub data: Vec<T>,
    /// Where the following page lives, if anywhere
    pub next_page: Option<NextPage>,
}

impl<T: DeserializeOwned> PageResponse<T> {
    /// Validate a response body and decode its items.
    ///
    /// Either every item decodes or none are returned.
    pub fn from_value(body: JsonValue, shape: &PageShape) -> Result<Self> {
        let JsonValue::Object(mut body) = body else {
            return Err(Error::protocol_shape("response body is not an object"));
        };

        let items = match body.remove(&shape.items_field) {
            Some(JsonValue::Array(items)) => items,
            Some(_) => {
                return Err(Error::protocol_shape(format!(
                    "`{}` is not an array",
                    shape.items_field
                )))
            }
            None => {
                return Err(Error::protocol_shape(format!(
                    "missing `{}`",
                    shape.items_field
                )))
            }
        };

        let Some(next_page) = body.remove(&shape.next_page_field) else {
            return Err(Error::protocol_shape(format!(
                "missing `{}`",
                shape.next_page_field
            )));
        };
        let next_page = NextPage::from_value(next_page)?;

        let data = items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()?;

        Ok(Self { data, next_page })
    }
}

impl<T> PageResponse<T> {
    /// Check if the response points at a following page
    pub fn has_next_page(&self) -> bool {
        self.next_page
            .as_ref()
            .is_some_and(|next| next.request().is_some())
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if this page has no items
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
