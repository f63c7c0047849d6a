// src/handlers/users.rs
use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::{
    core::{
        constants::{CSV_CONTENT_TYPE, REPORT_FILENAME},
        error::AppError,
    },
    dtos::{
        response::Res,
        user::{UserInput, UserRecord},
    },
    services::validation,
    state::AppState,
};

/// OpenAPI 文档中用户接口的分组名
pub const USERS_TAG: &str = "users";

/// 创建用户处理器。
///
/// # 功能说明
/// - 解析 JSON 请求体（字段名 `whatsapp` 对应内部的 phone）
/// - 执行业务规则校验，返回第一个错误
/// - 调用用户服务完成结构化校验、默认角色转换与持久化
///
/// # 返回值
/// - `Ok(impl IntoResponse)`: 创建成功，返回201 Created与新记录
/// - `Err(AppError)`: 校验失败返回400，其他异常返回500
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USERS_TAG,
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = UserRecord),
        (status = 400, description = "Missing field, invalid format or malformed JSON", body = Res)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    validation::check_business_rules(&payload)?;

    let user = state.users.create_user(&payload)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// 获取全部用户，可能为空数组。
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USERS_TAG,
    responses((status = 200, description = "All users", body = Vec<UserRecord>))
)]
pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    let users = state.users.get_all_users();
    tracing::info!("📋 Listed {} users", users.len());
    Json(users)
}

/// 按 id 获取用户，不存在时返回404。
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = USERS_TAG,
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserRecord),
        (status = 404, description = "User not found", body = Res)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users
        .get_user_by_id(&id)
        .ok_or(AppError::NotFound(id))?;
    Ok(Json(user))
}

/// 全量更新用户处理器。
///
/// # 返回值
/// - `Ok(impl IntoResponse)`: 更新成功，返回200与更新后的记录
/// - `Err(AppError)`: 校验失败返回400，用户不存在返回404
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = USERS_TAG,
    params(("id" = String, Path, description = "User id")),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated", body = UserRecord),
        (status = 400, description = "Missing field, invalid format or malformed JSON", body = Res),
        (status = 404, description = "User not found", body = Res)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    validation::check_business_rules(&payload)?;

    let user = state.users.update_user(&id, &payload)?;
    Ok(Json(user))
}

/// 删除用户。成功返回204无响应体；存储层返回 false 时映射为404。
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = USERS_TAG,
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = Res)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.users.delete_user(&id) {
        tracing::warn!("⚠️ Delete requested for unknown user {}", id);
        return Err(AppError::NotFound(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// 导出 CSV 报表，以附件形式下载。
#[utoipa::path(
    get,
    path = "/api/users/report",
    tag = USERS_TAG,
    responses(
        (status = 200, description = "CSV report of all users", body = String, content_type = "text/csv")
    )
)]
pub async fn export_report(State(state): State<AppState>) -> impl IntoResponse {
    let csv = state.users.generate_csv_report();
    let disposition = format!("attachment; filename={REPORT_FILENAME}");

    (
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
}
