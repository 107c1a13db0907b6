use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::chain::runtime::Chain;
use crate::domain::{
    account::Address,
    error::ContractError,
    event::StoredEvent,
    store::EventStore,
    todo::{CreateTodo, Todo, TodoPatch, TodoStats},
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Revert(#[from] ContractError),
    #[error("event store failure: {0}")]
    Store(anyhow::Error),
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        Self::Store(err)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Transaction surface of the node. Every call executes serially against the
/// chain; mutations append their event to the store before returning.
#[async_trait]
pub trait ChainService: Send + Sync + 'static {
    async fn create_todo_list(&self, caller: Address) -> ServiceResult<Address>;
    async fn todo_list_for(&self, user: Address) -> ServiceResult<Option<Address>>;
    async fn user_count(&self) -> ServiceResult<u64>;
    async fn users(&self, offset: u64, limit: u64) -> ServiceResult<Vec<Address>>;

    async fn create_todo(&self, contract: Address, caller: Address, input: CreateTodo) -> ServiceResult<Todo>;
    async fn update_todo(&self, contract: Address, caller: Address, id: u64, patch: TodoPatch) -> ServiceResult<Todo>;
    async fn toggle_todo_completion(&self, contract: Address, caller: Address, id: u64) -> ServiceResult<Todo>;
    async fn delete_todo(&self, contract: Address, caller: Address, id: u64) -> ServiceResult<()>;
    async fn todo(&self, contract: Address, caller: Address, id: u64) -> ServiceResult<Todo>;
    async fn todos(&self, contract: Address, caller: Address) -> ServiceResult<Vec<Todo>>;
    async fn stats(&self, contract: Address, caller: Address) -> ServiceResult<TodoStats>;
    async fn owner_of(&self, contract: Address) -> ServiceResult<Address>;
    async fn transfer_ownership(&self, contract: Address, caller: Address, new_owner: Address) -> ServiceResult<()>;

    async fn events(&self, offset: u64, limit: u64) -> ServiceResult<Vec<StoredEvent>>;
}

pub struct NodeService<S: EventStore> {
    chain: Arc<Mutex<Chain>>,
    store: Arc<S>,
}

impl<S: EventStore> NodeService<S> {
    pub fn new(chain: Chain, store: S) -> Self {
        Self { chain: Arc::new(Mutex::new(chain)), store: Arc::new(store) }
    }
}

impl<S: EventStore> Clone for NodeService<S> {
    fn clone(&self) -> Self {
        Self { chain: self.chain.clone(), store: self.store.clone() }
    }
}

#[async_trait]
impl<S: EventStore> ChainService for NodeService<S> {
    async fn create_todo_list(&self, caller: Address) -> ServiceResult<Address> {
        // the chain lock is held across the append so the log order matches
        // the execution order
        let mut chain = self.chain.lock().await;
        let (address, event) = chain.create_todo_list(caller)?;
        self.store.append(chain.factory_address(), &event).await?;
        tracing::info!(user = %caller, todo_list = %address, "todo list deployed");
        Ok(address)
    }

    async fn todo_list_for(&self, user: Address) -> ServiceResult<Option<Address>> {
        Ok(self.chain.lock().await.todo_list_for(user))
    }

    async fn user_count(&self) -> ServiceResult<u64> {
        Ok(self.chain.lock().await.user_count())
    }

    async fn users(&self, offset: u64, limit: u64) -> ServiceResult<Vec<Address>> {
        Ok(self.chain.lock().await.users(offset, limit))
    }

    async fn create_todo(&self, contract: Address, caller: Address, input: CreateTodo) -> ServiceResult<Todo> {
        let mut chain = self.chain.lock().await;
        let (todo, event) = chain.create_todo(contract, caller, input)?;
        self.store.append(contract, &event).await?;
        Ok(todo)
    }

    async fn update_todo(&self, contract: Address, caller: Address, id: u64, patch: TodoPatch) -> ServiceResult<Todo> {
        let mut chain = self.chain.lock().await;
        let (todo, event) = chain.update_todo(contract, caller, id, patch)?;
        self.store.append(contract, &event).await?;
        Ok(todo)
    }

    async fn toggle_todo_completion(&self, contract: Address, caller: Address, id: u64) -> ServiceResult<Todo> {
        let mut chain = self.chain.lock().await;
        let (todo, event) = chain.toggle_todo_completion(contract, caller, id)?;
        self.store.append(contract, &event).await?;
        Ok(todo)
    }

    async fn delete_todo(&self, contract: Address, caller: Address, id: u64) -> ServiceResult<()> {
        let mut chain = self.chain.lock().await;
        let event = chain.delete_todo(contract, caller, id)?;
        self.store.append(contract, &event).await?;
        Ok(())
    }

    async fn todo(&self, contract: Address, caller: Address, id: u64) -> ServiceResult<Todo> {
        Ok(self.chain.lock().await.todo(contract, caller, id)?)
    }

    async fn todos(&self, contract: Address, caller: Address) -> ServiceResult<Vec<Todo>> {
        Ok(self.chain.lock().await.todos(contract, caller)?)
    }

    async fn stats(&self, contract: Address, caller: Address) -> ServiceResult<TodoStats> {
        Ok(self.chain.lock().await.stats(contract, caller)?)
    }

    async fn owner_of(&self, contract: Address) -> ServiceResult<Address> {
        Ok(self.chain.lock().await.owner_of(contract)?)
    }

    async fn transfer_ownership(&self, contract: Address, caller: Address, new_owner: Address) -> ServiceResult<()> {
        let mut chain = self.chain.lock().await;
        let event = chain.transfer_ownership(contract, caller, new_owner)?;
        self.store.append(contract, &event).await?;
        tracing::info!(%contract, %new_owner, "ownership transferred");
        Ok(())
    }

    async fn events(&self, offset: u64, limit: u64) -> ServiceResult<Vec<StoredEvent>> {
        Ok(self.store.events(offset, limit).await?)
    }
}
