use std::collections::HashMap;

use crate::domain::{account::Address, error::ContractError};

/// Self-service provisioning registry: at most one TodoList per address, plus
/// an append-only, order-preserving enumeration of participating users.
pub struct TodoListFactory {
    owner: Address,
    lists: HashMap<Address, Address>,
    users: Vec<Address>,
}

impl TodoListFactory {
    pub fn new(owner: Address) -> Self {
        Self { owner, lists: HashMap::new(), users: Vec::new() }
    }

    pub fn owner(&self) -> Address { self.owner }

    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<Address, ContractError> {
        if caller != self.owner { return Err(ContractError::NotOwner); }
        if new_owner.is_zero() { return Err(ContractError::ZeroAddressOwner); }
        let previous = self.owner;
        self.owner = new_owner;
        Ok(previous)
    }

    /// Records a freshly deployed list for `caller`. The runtime mints the
    /// contract address and installs the instance.
    pub fn register(&mut self, caller: Address, todo_list: Address) -> Result<(), ContractError> {
        if self.lists.contains_key(&caller) {
            return Err(ContractError::ListAlreadyExists);
        }
        self.lists.insert(caller, todo_list);
        self.users.push(caller);
        Ok(())
    }

    pub fn todo_list_for(&self, user: Address) -> Option<Address> {
        self.lists.get(&user).copied()
    }

    pub fn user_count(&self) -> u64 { self.users.len() as u64 }

    /// Total over its whole domain: an offset past the end yields an empty
    /// slice, and the limit is clamped to what remains.
    pub fn users(&self, offset: u64, limit: u64) -> &[Address] {
        let len = self.users.len() as u64;
        let start = offset.min(len);
        let end = start.saturating_add(limit).min(len);
        &self.users[start as usize..end as usize]
    }
}
