use async_trait::async_trait;

use super::account::Address;
use super::event::{ChainEvent, StoredEvent};

/// Append-only event log consumed by off-chain indexers. Pagination is total:
/// out-of-range reads return an empty page.
#[async_trait]
pub trait EventStore: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn append(&self, contract: Address, event: &ChainEvent) -> anyhow::Result<()>;
    async fn events(&self, offset: u64, limit: u64) -> anyhow::Result<Vec<StoredEvent>>;
    async fn count(&self) -> anyhow::Result<u64>;
}
