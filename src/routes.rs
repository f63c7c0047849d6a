use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    core::error::AppError,
    handlers,
    openapi::{self, ApiDoc, OPENAPI_JSON_PATH},
    state::AppState,
};

/// 处理器中未预期的 panic 统一转换为 500，具体内容只写日志。
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::InternalServerError(detail).into_response()
}

/// 创建应用程序路由器。
///
/// # 路由结构
/// - `GET /` 存活检查。
/// - `/api/users` 用户增删改查；`/api/users/report` 导出 CSV。
///   静态路径 `/report` 的优先级高于 `/{id}`，不会被当成 id 匹配。
/// - `GET /api-docs/openapi.json` OpenAPI 文档，`/scalar` 文档页面。
///
/// # 中间件
/// - 全局请求日志记录、panic 兜底和 CORS 支持。
pub fn create_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/", get(handlers::users::list_users).post(handlers::users::create_user))
        .route("/report", get(handlers::users::export_report))
        .route(
            "/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        );

    let api = Router::new()
        .route("/", get(|| async { "🚀 User registry is running!" }))
        .nest("/api/users", user_routes)
        .with_state(state);

    Router::new()
        .merge(api)
        .route(OPENAPI_JSON_PATH, get(openapi::openapi_json))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        // 全局日志、panic 兜底与 CORS
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(CorsLayer::permissive())
}
