// src/services/transform.rs
use uuid::Uuid;

use crate::{
    core::{enums::UserRole, error::AppError},
    dtos::user::{UserInput, UserRecord},
};

/// 角色默认规则：缺失或空白时使用 client，否则必须严格等于 admin / client。
///
/// 未经校验的非法角色视为调用方违反契约，返回 `InvalidArgument`，不会被静默替换成默认值。
pub fn resolve_role(role: Option<&str>) -> Result<UserRole, AppError> {
    match role {
        Some(raw) if !raw.trim().is_empty() => raw
            .parse::<UserRole>()
            .map_err(|_| AppError::InvalidArgument(format!("unsupported role '{raw}'"))),
        _ => Ok(UserRole::default()),
    }
}

/// 将输入转换为待持久化的记录，并在这里生成唯一的 UUID v4 作为身份标识。
/// name / phone / email 原样复制，角色按默认规则解析。
pub fn to_record(input: &UserInput) -> Result<UserRecord, AppError> {
    Ok(UserRecord {
        id: Uuid::new_v4().to_string(),
        name: input.name.clone(),
        phone: input.phone.clone(),
        email: input.email.clone(),
        role: resolve_role(input.role.as_deref())?,
    })
}

/// 全量覆盖已有记录的 name / phone / email / role，保留原 id。
///
/// 直接修改传入的记录，同时返回修改后的副本，调用方可以使用任意一个。
/// 角色非法时返回错误，且记录保持不变。
pub fn apply_update(existing: &mut UserRecord, input: &UserInput) -> Result<UserRecord, AppError> {
    let role = resolve_role(input.role.as_deref())?;

    existing.name = input.name.clone();
    existing.phone = input.phone.clone();
    existing.email = input.email.clone();
    existing.role = role;

    Ok(existing.clone())
}

/// 记录到输入的反向投影，丢弃 id。
pub fn to_input(record: &UserRecord) -> UserInput {
    UserInput {
        name: record.name.clone(),
        phone: record.phone.clone(),
        email: record.email.clone(),
        role: Some(record.role.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(role: Option<&str>) -> UserInput {
        UserInput::new("Juan Pérez", "+1234567890", "juan@example.com", role)
    }

    #[test]
    fn blank_or_missing_role_becomes_client() {
        for role in [None, Some(""), Some("   ")] {
            let record = to_record(&input(role)).unwrap();
            assert_eq!(record.role, UserRole::Client, "role: {role:?}");
        }
    }

    #[test]
    fn explicit_role_is_kept() {
        assert_eq!(to_record(&input(Some("admin"))).unwrap().role, UserRole::Admin);
        assert_eq!(to_record(&input(Some("client"))).unwrap().role, UserRole::Client);
    }

    #[test]
    fn unknown_role_is_a_contract_violation() {
        let err = to_record(&input(Some("root"))).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn to_record_copies_fields_and_assigns_fresh_id() {
        let a = to_record(&input(None)).unwrap();
        let b = to_record(&input(None)).unwrap();

        assert_eq!(a.name, "Juan Pérez");
        assert_eq!(a.phone, "+1234567890");
        assert_eq!(a.email, "juan@example.com");
        assert!(!a.id.trim().is_empty());
        assert!(Uuid::parse_str(&a.id).is_ok());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn apply_update_mutates_in_place_and_returns_same_identity() {
        let mut existing = to_record(&input(Some("admin"))).unwrap();
        let id = existing.id.clone();

        let update = UserInput::new("María", "+5215512345678", "maria@example.com", None);
        let returned = apply_update(&mut existing, &update).unwrap();

        assert_eq!(returned.id, id);
        assert_eq!(existing.id, id);
        for record in [&existing, &returned] {
            assert_eq!(record.name, "María");
            assert_eq!(record.phone, "+5215512345678");
            assert_eq!(record.email, "maria@example.com");
            assert_eq!(record.role, UserRole::Client);
        }
    }

    #[test]
    fn apply_update_with_bad_role_leaves_record_untouched() {
        let mut existing = to_record(&input(None)).unwrap();
        let before = existing.clone();

        let update = UserInput::new("Otro", "+111", "otro@example.com", Some("root"));
        assert!(apply_update(&mut existing, &update).is_err());
        assert_eq!(existing.name, before.name);
        assert_eq!(existing.email, before.email);
    }

    #[test]
    fn to_input_drops_identity() {
        let record = to_record(&input(None)).unwrap();
        let projected = to_input(&record);
        assert_eq!(projected, input(Some("client")));
    }
}
