// src/services/validation.rs
use validator::{Validate, ValidationErrors};

use crate::{
    core::{
        enums::{UserField, UserRole},
        error::FieldViolation,
    },
    dtos::{
        user::{UserInput, UserRecord, CODE_REQUIRED},
        EMAIL_REGEX, PHONE_REGEX,
    },
};

// --- 字段规则：两条校验路径共用这一组函数，保证对“合法”的判定完全一致 ---

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn check_name(name: &str) -> Result<(), FieldViolation> {
    if is_blank(name) {
        return Err(FieldViolation::MissingField(UserField::Name));
    }
    Ok(())
}

pub(crate) fn check_email(email: &str) -> Result<(), FieldViolation> {
    if is_blank(email) {
        return Err(FieldViolation::MissingField(UserField::Email));
    }
    if !is_valid_email(email) {
        return Err(FieldViolation::InvalidFormat(UserField::Email));
    }
    Ok(())
}

pub(crate) fn check_phone(phone: &str) -> Result<(), FieldViolation> {
    if is_blank(phone) {
        return Err(FieldViolation::MissingField(UserField::Phone));
    }
    if !is_valid_phone(phone) {
        return Err(FieldViolation::InvalidFormat(UserField::Phone));
    }
    Ok(())
}

pub(crate) fn check_role(role: Option<&str>) -> Result<(), FieldViolation> {
    if is_valid_role(role) {
        Ok(())
    } else {
        Err(FieldViolation::InvalidFormat(UserField::Role))
    }
}

/// 邮箱是否符合 local@domain.tld 格式。空值返回 false。
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// 号码是否符合类 E.164 格式。空值返回 false。
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// 角色是否合法：缺失或空白视为合法（转换时使用默认角色），否则必须严格等于 admin 或 client。
pub fn is_valid_role(role: Option<&str>) -> bool {
    match role {
        None => true,
        Some(role) if is_blank(role) => true,
        Some(role) => role.parse::<UserRole>().is_ok(),
    }
}

// --- 结构化校验：不短路，收集全部失败字段 ---

fn field_order(field: UserField) -> u8 {
    match field {
        UserField::Name => 0,
        UserField::Email => 1,
        UserField::Phone => 2,
        UserField::Role => 3,
    }
}

/// 把 validator 的错误集合转换为字段级失败列表，按 name、email、phone、role 的顺序排列。
fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .iter()
        .filter_map(|(field, issues)| {
            let field = field.parse::<UserField>().ok()?;
            let issue = issues.first()?;
            Some(if issue.code == CODE_REQUIRED {
                FieldViolation::MissingField(field)
            } else {
                FieldViolation::InvalidFormat(field)
            })
        })
        .collect();

    violations.sort_by_key(|v| field_order(v.field()));
    violations
}

/// 结构化校验用户输入。每个字段独立检查，返回全部失败项。
pub fn validate(input: &UserInput) -> Result<(), Vec<FieldViolation>> {
    input.validate().map_err(|e| collect_violations(&e))
}

/// 结构化校验转换后的记录，用于在持久化前确认转换结果仍然满足字段约束。
pub fn validate_record(record: &UserRecord) -> Result<(), Vec<FieldViolation>> {
    record.validate().map_err(|e| collect_violations(&e))
}

// --- 业务规则校验：短路，返回第一个失败项 ---

/// 路由层在调用业务服务之前执行的快速校验。
///
/// 检查顺序固定：先检查 name、email、phone 是否必填，再检查 email 格式、phone 格式，
/// 最后检查 role。与 [`validate`] 共用同一组字段规则，因此两者接受的输入集合完全相同，
/// 区别只在于这里只报告第一个错误。
pub fn check_business_rules(input: &UserInput) -> Result<(), FieldViolation> {
    let required = [
        (UserField::Name, input.name.as_str()),
        (UserField::Email, input.email.as_str()),
        (UserField::Phone, input.phone.as_str()),
    ];
    for (field, value) in required {
        if is_blank(value) {
            return Err(FieldViolation::MissingField(field));
        }
    }

    check_email(&input.email)?;
    check_phone(&input.phone)?;
    check_role(input.role.as_deref())
}

/// 聚合布尔判定：输入是否能被接受。
pub fn is_valid_input(input: &UserInput) -> bool {
    check_business_rules(input).is_ok() && validate(input).is_ok()
}
