use std::collections::HashMap;

use crate::chain::{factory::TodoListFactory, todo_list::TodoList};
use crate::domain::{
    account::Address,
    error::ContractError,
    event::ChainEvent,
    todo::{CreateTodo, Todo, TodoPatch, TodoStats},
};

/// The simulated chain: one factory plus every TodoList it has deployed, keyed
/// by contract address. Calls run one at a time and either complete fully or
/// fail without side effects; each successful mutation yields the event an
/// indexer would observe.
pub struct Chain {
    factory_address: Address,
    factory: TodoListFactory,
    lists: HashMap<Address, TodoList>,
}

impl Chain {
    pub fn new(deployer: Address) -> Self {
        Self {
            factory_address: Address::random(),
            factory: TodoListFactory::new(deployer),
            lists: HashMap::new(),
        }
    }

    pub fn factory_address(&self) -> Address { self.factory_address }

    /// Deploys a fresh caller-owned TodoList within the same call, exactly once
    /// per address.
    pub fn create_todo_list(&mut self, caller: Address) -> Result<(Address, ChainEvent), ContractError> {
        let address = Address::random();
        self.factory.register(caller, address)?;
        self.lists.insert(address, TodoList::new(caller));
        Ok((address, ChainEvent::TodoListCreated { user: caller, todo_list: address }))
    }

    pub fn todo_list_for(&self, user: Address) -> Option<Address> {
        self.factory.todo_list_for(user)
    }

    pub fn user_count(&self) -> u64 { self.factory.user_count() }

    pub fn users(&self, offset: u64, limit: u64) -> Vec<Address> {
        self.factory.users(offset, limit).to_vec()
    }

    pub fn create_todo(&mut self, contract: Address, caller: Address, input: CreateTodo) -> Result<(Todo, ChainEvent), ContractError> {
        let todo = self.list_mut(contract)?.create_todo(caller, input)?;
        let event = ChainEvent::TodoCreated {
            user: caller,
            id: todo.id,
            title: todo.title.clone(),
            priority: todo.priority,
        };
        Ok((todo, event))
    }

    pub fn update_todo(&mut self, contract: Address, caller: Address, id: u64, patch: TodoPatch) -> Result<(Todo, ChainEvent), ContractError> {
        let todo = self.list_mut(contract)?.update_todo(caller, id, patch)?;
        let event = ChainEvent::TodoUpdated {
            user: caller,
            id: todo.id,
            title: todo.title.clone(),
            priority: todo.priority,
        };
        Ok((todo, event))
    }

    pub fn toggle_todo_completion(&mut self, contract: Address, caller: Address, id: u64) -> Result<(Todo, ChainEvent), ContractError> {
        let todo = self.list_mut(contract)?.toggle_todo_completion(caller, id)?;
        let event = ChainEvent::TodoCompletionToggled { user: caller, id: todo.id, completed: todo.completed };
        Ok((todo, event))
    }

    pub fn delete_todo(&mut self, contract: Address, caller: Address, id: u64) -> Result<ChainEvent, ContractError> {
        self.list_mut(contract)?.delete_todo(caller, id)?;
        Ok(ChainEvent::TodoDeleted { user: caller, id })
    }

    pub fn todo(&self, contract: Address, caller: Address, id: u64) -> Result<Todo, ContractError> {
        self.list(contract)?.todo(caller, id).cloned()
    }

    pub fn todos(&self, contract: Address, caller: Address) -> Result<Vec<Todo>, ContractError> {
        Ok(self.list(contract)?.todos(caller).to_vec())
    }

    pub fn stats(&self, contract: Address, caller: Address) -> Result<TodoStats, ContractError> {
        Ok(self.list(contract)?.stats(caller))
    }

    pub fn owner_of(&self, contract: Address) -> Result<Address, ContractError> {
        Ok(self.list(contract)?.owner())
    }

    pub fn transfer_ownership(&mut self, contract: Address, caller: Address, new_owner: Address) -> Result<ChainEvent, ContractError> {
        let previous = self.list_mut(contract)?.transfer_ownership(caller, new_owner)?;
        Ok(ChainEvent::OwnershipTransferred { previous_owner: previous, new_owner })
    }

    fn list(&self, contract: Address) -> Result<&TodoList, ContractError> {
        self.lists.get(&contract).ok_or(ContractError::ListNotFound)
    }

    fn list_mut(&mut self, contract: Address) -> Result<&mut TodoList, ContractError> {
        self.lists.get_mut(&contract).ok_or(ContractError::ListNotFound)
    }
}
