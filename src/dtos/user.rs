// src/dtos/user.rs
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    core::{enums::UserRole, error::FieldViolation},
    services::validation,
};

/// 客户端提交的用户数据，尚未分配身份标识。
///
/// 缺失或为 `null` 的 `name` / `whatsapp` / `email` 反序列化为空字符串，交给校验层报告为必填错误，
/// 而不是在 JSON 解析阶段直接失败。`role` 允许缺失或为空，转换时会落到默认角色。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserInput {
    #[serde(default, deserialize_with = "null_as_blank")]
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Juan Pérez")]
    pub name: String,

    #[serde(default, rename = "whatsapp", deserialize_with = "null_as_blank")]
    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "+1234567890")]
    pub phone: String,

    #[serde(default, deserialize_with = "null_as_blank")]
    #[validate(custom(function = "validate_email"))]
    #[schema(example = "juan@example.com")]
    pub email: String,

    /// `admin` 或 `client`，缺失或为空时为 `client`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_role"))]
    #[schema(example = "client")]
    pub role: Option<String>,
}

/// 显式的 JSON `null` 与缺失字段同样处理：落为空字符串。
fn null_as_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserInput {
    pub fn new(name: &str, phone: &str, email: &str, role: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            role: role.map(str::to_string),
        }
    }
}

/// 已持久化的用户记录。`id` 在创建时生成，此后不再改变；角色总是 admin 或 client。
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserRecord {
    #[schema(example = "3f2b8c1e-6a4d-4f7b-9c2e-1d5a7b9e0f12")]
    pub id: String,

    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[serde(rename = "whatsapp")]
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(custom(function = "validate_email"))]
    pub email: String,

    pub role: UserRole,
}

/// 记录按身份比较：id 相同即视为同一个用户，不比较其余字段。
impl PartialEq for UserRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UserRecord {}

// --- validator 适配函数：把字段规则的结果翻译成 ValidationError，错误码区分“必填”和“格式” ---

pub(crate) const CODE_REQUIRED: &str = "required";
pub(crate) const CODE_FORMAT: &str = "format";

fn to_validation_error(violation: FieldViolation) -> ValidationError {
    let code = match violation {
        FieldViolation::MissingField(_) => CODE_REQUIRED,
        FieldViolation::InvalidFormat(_) => CODE_FORMAT,
    };
    let mut err = ValidationError::new(code);
    err.message = Some(violation.to_string().into());
    err
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    validation::check_name(name).map_err(to_validation_error)
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    validation::check_phone(phone).map_err(to_validation_error)
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    validation::check_email(email).map_err(to_validation_error)
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    validation::check_role(Some(role)).map_err(to_validation_error)
}
