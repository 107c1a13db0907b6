use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::chain_service::ServiceError;
use crate::domain::error::ContractError;

/// Revert reason (or store failure) as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, axum::Json(serde_json::json!({ "message": self.message }))).into_response()
    }
}

impl From<ContractError> for ApiError {
    fn from(err: ContractError) -> Self {
        Self::from(ServiceError::Revert(err))
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::Revert(revert) => match revert {
                ContractError::EmptyTitle
                | ContractError::TitleTooLong
                | ContractError::DescriptionTooLong
                | ContractError::InvalidPriority
                | ContractError::ZeroAddressOwner => StatusCode::BAD_REQUEST,
                ContractError::TodoNotFound | ContractError::ListNotFound => StatusCode::NOT_FOUND,
                ContractError::NotOwner => StatusCode::FORBIDDEN,
                ContractError::TodoListFull | ContractError::ListAlreadyExists => StatusCode::CONFLICT,
            },
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: err.to_string() }
    }
}
