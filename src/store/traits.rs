//! `KvStore` trait — the durable key-value medium behind the progress store.

use async_trait::async_trait;

use crate::error::StoreError;

/// Backend-agnostic string key-value store.
///
/// The wizard only ever uses a single fixed key, but the trait stays
/// general so backends can share a table with other settings.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, overwriting any prior value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value under `key`. Returns whether a value existed.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;
}
