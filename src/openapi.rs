// src/openapi.rs
use axum::Json;
use utoipa::OpenApi;

use crate::{
    core::enums::UserRole,
    dtos::{
        response::Res,
        user::{UserInput, UserRecord},
    },
    handlers::users::{self, USERS_TAG},
};

/// 用户接口的 OpenAPI 文档
#[derive(OpenApi)]
#[openapi(
    info(title = "User Registry API", description = "CRUD and CSV export for user records"),
    paths(
        users::create_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::export_report,
    ),
    components(schemas(UserInput, UserRecord, UserRole, Res)),
    tags((name = USERS_TAG, description = "User management endpoints"))
)]
pub struct ApiDoc;

/// 文档 JSON 的访问路径，Scalar 页面也从这里加载。
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// 返回生成的 OpenAPI 文档。
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_user_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert_eq!(
            paths,
            vec!["/api/users", "/api/users/report", "/api/users/{id}"]
        );
    }
}
