use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 错误响应体。成功响应直接返回资源本身，只有错误才使用这个信封。
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Res {
    #[schema(example = 404)]
    pub code: u16,
    #[schema(example = "User with id 42 not found")]
    pub msg: String,
}

impl Res {
    pub fn with_error(code: StatusCode, msg: &str) -> Self {
        Self {
            code: code.as_u16(),
            msg: msg.to_string(),
        }
    }
}

impl IntoResponse for Res {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
