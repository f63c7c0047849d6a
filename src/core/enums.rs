// src/core/enums.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// 用户角色枚举
/// 同时支持：
/// 1. JSON 序列化 (Serde) - 对外输出 "admin" / "client"
/// 2. 字符串转换 (Strum) - 解析请求中的角色字符串（区分大小写）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "lowercase")] // to_string() 输出小写
#[serde(rename_all = "lowercase")]    // JSON 输出小写
pub enum UserRole {
    Admin,

    #[default]
    Client,
}

/// 参与校验的用户字段。Display 输出对外（JSON）字段名，用于拼接错误信息：
/// 内部的 phone 字段在接口上叫 `whatsapp`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum UserField {
    Name,
    #[strum(to_string = "whatsapp", serialize = "phone")]
    Phone,
    Email,
    Role,
}
