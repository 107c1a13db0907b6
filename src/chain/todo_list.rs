use std::collections::HashMap;

use chrono::Utc;

use crate::domain::{
    account::Address,
    error::ContractError,
    todo::{
        CreateTodo, Priority, Todo, TodoPatch, TodoStats, MAX_DESCRIPTION_LENGTH,
        MAX_TITLE_LENGTH, MAX_TODOS_PER_USER,
    },
};

/// Per-user todo ledger. Every caller address gets its own record book inside
/// the instance; ids are assigned sequentially per caller and never reused, so
/// another caller's ids are simply not found here. Mutating calls validate
/// before touching storage — a failed call changes nothing.
pub struct TodoList {
    owner: Address,
    books: HashMap<Address, Vec<Todo>>,
    next_id: HashMap<Address, u64>,
}

impl TodoList {
    pub fn new(owner: Address) -> Self {
        Self { owner, books: HashMap::new(), next_id: HashMap::new() }
    }

    pub fn owner(&self) -> Address { self.owner }

    /// Returns the previous owner on success.
    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<Address, ContractError> {
        if caller != self.owner { return Err(ContractError::NotOwner); }
        if new_owner.is_zero() { return Err(ContractError::ZeroAddressOwner); }
        let previous = self.owner;
        self.owner = new_owner;
        Ok(previous)
    }

    pub fn create_todo(&mut self, caller: Address, input: CreateTodo) -> Result<Todo, ContractError> {
        validate_title(&input.title)?;
        validate_description(&input.description)?;
        let book = self.books.entry(caller).or_default();
        if book.len() >= MAX_TODOS_PER_USER {
            return Err(ContractError::TodoListFull);
        }
        let id = self.next_id.entry(caller).or_insert(1);
        let now = Utc::now();
        let todo = Todo {
            id: *id,
            title: input.title,
            description: input.description,
            priority: input.priority,
            completed: false,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };
        *id += 1;
        book.push(todo.clone());
        Ok(todo)
    }

    pub fn update_todo(&mut self, caller: Address, id: u64, patch: TodoPatch) -> Result<Todo, ContractError> {
        if let Some(title) = &patch.title { validate_title(title)?; }
        if let Some(description) = &patch.description { validate_description(description)?; }
        let todo = self.find_mut(caller, id)?;
        if let Some(title) = patch.title { todo.title = title; }
        if let Some(description) = patch.description { todo.description = description; }
        if let Some(priority) = patch.priority { todo.priority = priority; }
        todo.updated_at = Utc::now();
        Ok(todo.clone())
    }

    pub fn toggle_todo_completion(&mut self, caller: Address, id: u64) -> Result<Todo, ContractError> {
        let todo = self.find_mut(caller, id)?;
        let now = Utc::now();
        todo.completed = !todo.completed;
        todo.completed_at = if todo.completed { Some(now) } else { None };
        todo.updated_at = now;
        Ok(todo.clone())
    }

    pub fn delete_todo(&mut self, caller: Address, id: u64) -> Result<(), ContractError> {
        let book = self.books.get_mut(&caller).ok_or(ContractError::TodoNotFound)?;
        let idx = book.iter().position(|t| t.id == id).ok_or(ContractError::TodoNotFound)?;
        // swap-and-pop: storage slots move, ids stay with their records
        book.swap_remove(idx);
        Ok(())
    }

    pub fn todo(&self, caller: Address, id: u64) -> Result<&Todo, ContractError> {
        self.books
            .get(&caller)
            .and_then(|book| book.iter().find(|t| t.id == id))
            .ok_or(ContractError::TodoNotFound)
    }

    pub fn todos(&self, caller: Address) -> &[Todo] {
        self.books.get(&caller).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn stats(&self, caller: Address) -> TodoStats {
        let mut stats = TodoStats::default();
        for todo in self.todos(caller) {
            stats.total += 1;
            if todo.completed {
                stats.completed += 1;
            } else {
                stats.pending += 1;
                if todo.priority == Priority::High { stats.high_priority += 1; }
            }
        }
        stats
    }

    fn find_mut(&mut self, caller: Address, id: u64) -> Result<&mut Todo, ContractError> {
        self.books
            .get_mut(&caller)
            .and_then(|book| book.iter_mut().find(|t| t.id == id))
            .ok_or(ContractError::TodoNotFound)
    }
}

fn validate_title(title: &str) -> Result<(), ContractError> {
    if title.is_empty() { return Err(ContractError::EmptyTitle); }
    if title.chars().count() > MAX_TITLE_LENGTH { return Err(ContractError::TitleTooLong); }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ContractError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ContractError::DescriptionTooLong);
    }
    Ok(())
}
