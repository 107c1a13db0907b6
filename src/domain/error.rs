use thiserror::Error;

/// Revert reasons. A call that fails with one of these leaves contract state
/// exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Title is too long")]
    TitleTooLong,
    #[error("Description is too long")]
    DescriptionTooLong,
    #[error("Invalid priority value")]
    InvalidPriority,
    #[error("Todo not found")]
    TodoNotFound,
    #[error("Todo list is full")]
    TodoListFull,
    #[error("TodoList already exists for this user")]
    ListAlreadyExists,
    #[error("TodoList not found")]
    ListNotFound,
    #[error("Caller is not the owner")]
    NotOwner,
    #[error("New owner is the zero address")]
    ZeroAddressOwner,
}
