//! JSON request and response adapters

use crate::loader::OperationDefinition;
use crate::pagination::{PageRequest, PageResponse};
use crate::types::{lookup_path, lookup_string, Cursor, JsonObject, JsonValue};

/// Request parameters for a JSON operation
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRequest {
    params: JsonObject,
    cursor_param: String,
    page_size_param: Option<String>,
}

impl JsonRequest {
    /// Create a request from bound parameters
    pub fn new(
        params: JsonObject,
        cursor_param: impl Into<String>,
        page_size_param: Option<String>,
    ) -> Self {
        Self {
            params,
            cursor_param: cursor_param.into(),
            page_size_param,
        }
    }

    /// Create a request seeded with a definition's default parameters
    pub fn from_definition(def: &OperationDefinition) -> Self {
        Self::new(
            def.params.clone(),
            def.pagination.cursor_param.clone(),
            def.pagination.page_size_param.clone(),
        )
    }

    /// Bind a parameter, replacing any previous value
    pub fn set_param(&mut self, key: impl Into<String>, value: JsonValue) {
        self.params.insert(key.into(), value);
    }

    /// Bound parameters
    pub fn params(&self) -> &JsonObject {
        &self.params
    }

    /// Parameters as a JSON object value
    pub fn to_value(&self) -> JsonValue {
        JsonValue::Object(self.params.clone())
    }

    /// Cursor currently bound to the request
    pub fn cursor(&self) -> Option<&str> {
        self.params
            .get(&self.cursor_param)
            .and_then(JsonValue::as_str)
    }

    /// Page size currently bound to the request
    pub fn page_size(&self) -> Option<u64> {
        let param = self.page_size_param.as_ref()?;
        self.params.get(param).and_then(JsonValue::as_u64)
    }
}

impl PageRequest for JsonRequest {
    fn set_cursor(&mut self, cursor: Option<&Cursor>) {
        match cursor {
            Some(cursor) => {
                self.params.insert(
                    self.cursor_param.clone(),
                    JsonValue::String(cursor.as_str().to_string()),
                );
            }
            None => {
                self.params.remove(&self.cursor_param);
            }
        }
    }

    fn set_page_size(&mut self, size: u32) {
        if let Some(param) = &self.page_size_param {
            self.params.insert(param.clone(), JsonValue::from(size));
        }
    }
}

/// One page returned by a JSON operation
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    body: JsonValue,
    cursor_path: String,
    items_path: String,
}

impl JsonResponse {
    /// Wrap a response body
    pub fn new(
        body: JsonValue,
        cursor_path: impl Into<String>,
        items_path: impl Into<String>,
    ) -> Self {
        Self {
            body,
            cursor_path: cursor_path.into(),
            items_path: items_path.into(),
        }
    }

    /// The raw response body
    pub fn body(&self) -> &JsonValue {
        &self.body
    }

    /// Items of this page; empty when the items field is missing
    pub fn items(&self) -> &[JsonValue] {
        match lookup_path(&self.body, &self.items_path).and_then(JsonValue::as_array) {
            Some(items) => items,
            None => &[],
        }
    }

    /// Take the response body
    pub fn into_body(self) -> JsonValue {
        self.body
    }
}

impl PageResponse for JsonResponse {
    fn next_cursor(&self) -> Option<Cursor> {
        Cursor::from_token(lookup_string(&self.body, &self.cursor_path))
    }

    fn item_count(&self) -> usize {
        self.items().len()
    }
}
