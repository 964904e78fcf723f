//! Decoded store entities

use crate::storage::Document;
use crate::utils::error::RemoteError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::ops::Deref;

/// A decoded document annotated with its identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity<T> {
    /// Document identifier
    pub id: String,
    /// Decoded field data
    #[serde(flatten)]
    pub data: T,
}

impl<T> Entity<T> {
    pub fn new(id: impl Into<String>, data: T) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

impl<T: DeserializeOwned> Entity<T> {
    /// Decode a raw document, keeping its identifier alongside the fields
    pub fn decode(document: Document) -> Result<Self, RemoteError> {
        let Document { id, fields } = document;
        let data = serde_json::from_value(fields).map_err(|e| {
            RemoteError::decode(format!("Failed to decode document {}: {}", id, e))
        })?;
        Ok(Self { id, data })
    }

    /// Decode every document of a collection snapshot, preserving order
    pub fn decode_all(documents: Vec<Document>) -> Result<Vec<Self>, RemoteError> {
        documents.into_iter().map(Self::decode).collect()
    }
}

impl<T> Deref for Entity<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
