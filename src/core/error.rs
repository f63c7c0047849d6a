// src/core/error.rs
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{core::enums::UserField, dtos::response::Res};

/// 字段级校验失败。结构化校验会收集全部失败项，业务规则校验只返回第一个。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    /// 必填字段为空（null 或仅包含空白）
    #[error("{0} is required")]
    MissingField(UserField),

    /// 字段非空但格式不合法
    #[error("{0} has an invalid format")]
    InvalidFormat(UserField),
}

impl FieldViolation {
    pub fn field(&self) -> UserField {
        match self {
            FieldViolation::MissingField(field) | FieldViolation::InvalidFormat(field) => *field,
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// 应用程序统一错误类型。覆盖校验、资源查找、契约违反以及未预期的内部错误。
///
/// 通过实现 `IntoResponse` trait，任何 `AppError` 都可以直接转换为HTTP响应，
/// 处理器只需根据错误种类决定状态码，不需要关心具体的错误文本。
#[derive(Error, Debug)]
pub enum AppError {
    /// 请求数据未通过结构化校验，携带全部失败字段。返回400 Bad Request。
    #[error("Invalid user data: {}", join_violations(.0))]
    InvalidInput(Vec<FieldViolation>),

    /// 转换后的记录未通过校验。正常情况下不会出现，出现即说明转换逻辑与校验规则不一致。
    #[error("Invalid user after transformation: {}", join_violations(.0))]
    InvalidRecord(Vec<FieldViolation>),

    /// 业务规则校验（短路）返回的第一个错误。返回400 Bad Request。
    #[error("{0}")]
    Validation(#[from] FieldViolation),

    /// 请求体无法解析等传输层错误。返回400 Bad Request。
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 资源未找到错误。返回404 Not Found。
    #[error("User with id {0} not found")]
    NotFound(String),

    /// 调用方违反了存储层或转换层的契约（编程错误），不面向用户。返回500。
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 服务器内部错误。用于未预期的错误情况。返回500 Internal Server Error。
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

/// 请求体不是合法 JSON（或 Content-Type 不对）时，统一按 400 处理。
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// 实现 `IntoResponse` trait，将 `AppError` 转换为HTTP响应。
///
/// 校验类错误直接把错误文本返回给客户端；契约违反与内部错误只记录日志，
/// 对外返回通用消息，避免泄露内部状态。
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            AppError::InvalidInput(_)
            | AppError::InvalidRecord(_)
            | AppError::Validation(_)
            | AppError::BadRequest(_) => {
                tracing::warn!("⚠️ Rejected request: {}", self);
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::InvalidArgument(msg) => {
                tracing::error!("❌ Contract violation: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("❌ Internal Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        Res::with_error(status, &msg).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (AppError::InvalidInput(vec![FieldViolation::MissingField(UserField::Name)]), StatusCode::BAD_REQUEST),
            (AppError::InvalidRecord(vec![]), StatusCode::BAD_REQUEST),
            (AppError::Validation(FieldViolation::InvalidFormat(UserField::Email)), StatusCode::BAD_REQUEST),
            (AppError::BadRequest("not json".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("42".into()), StatusCode::NOT_FOUND),
            (AppError::InvalidArgument("blank id".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::InternalServerError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn invalid_input_lists_every_violation() {
        let error = AppError::InvalidInput(vec![
            FieldViolation::MissingField(UserField::Name),
            FieldViolation::InvalidFormat(UserField::Phone),
        ]);
        assert_eq!(
            error.to_string(),
            "Invalid user data: name is required; whatsapp has an invalid format"
        );
    }
}
