use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{account::Address, todo::Priority};

/// Log entries emitted by successful contract calls. Off-chain indexers
/// reconstruct activity from these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainEvent {
    TodoCreated { user: Address, id: u64, title: String, priority: Priority },
    TodoUpdated { user: Address, id: u64, title: String, priority: Priority },
    TodoCompletionToggled { user: Address, id: u64, completed: bool },
    TodoDeleted { user: Address, id: u64 },
    TodoListCreated { user: Address, todo_list: Address },
    OwnershipTransferred { previous_owner: Address, new_owner: Address },
}

/// An event as persisted by the store, with its position in the log and the
/// contract that emitted it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredEvent {
    pub seq: u64,
    pub contract: Address,
    pub recorded_at: DateTime<Utc>,
    pub event: ChainEvent,
}
