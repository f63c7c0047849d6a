// src/services/user.rs
use std::sync::Arc;

use crate::{
    core::{constants::CSV_HEADER, error::AppError},
    dtos::user::{UserInput, UserRecord},
    services::{store::UserStore, transform, validation},
};

/// 用户业务编排：组合校验、转换与存储，实现每个用例。
///
/// 每个写用例都遵循相同的流程：校验输入 → 转换 → 校验转换结果 → 持久化。
/// 存储通过构造函数注入，便于替换为其他后端或在测试中使用独立实例。
#[derive(Clone)]
pub struct UserManager {
    store: Arc<dyn UserStore>,
}

impl UserManager {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// 创建用户。
    ///
    /// # 参数
    /// - `input`: 客户端提交的用户数据，角色可以为空。
    ///
    /// # 返回值
    /// - `Ok(UserRecord)`: 已持久化的记录，包含新生成的 id 与解析后的角色。
    /// - `Err(AppError::InvalidInput)`: 输入未通过结构化校验，携带全部失败字段。
    /// - `Err(AppError::InvalidRecord)`: 转换结果未通过校验。
    pub fn create_user(&self, input: &UserInput) -> Result<UserRecord, AppError> {
        validation::validate(input).map_err(AppError::InvalidInput)?;

        let record = transform::to_record(input)?;
        validation::validate_record(&record).map_err(AppError::InvalidRecord)?;

        let saved = self.store.save(record)?;
        tracing::info!(user_id = %saved.id, role = %saved.role, "✅ User created");
        Ok(saved)
    }

    pub fn get_user_by_id(&self, id: &str) -> Option<UserRecord> {
        self.store.find_by_id(id)
    }

    pub fn get_all_users(&self) -> Vec<UserRecord> {
        self.store.find_all()
    }

    /// 全量更新用户（不是部分更新）：name / phone / email / role 全部被替换，id 保持不变。
    ///
    /// # 返回值
    /// - `Ok(UserRecord)`: 更新后的记录。
    /// - `Err(AppError::InvalidInput)`: 输入未通过结构化校验。
    /// - `Err(AppError::NotFound)`: id 不存在，不会创建新记录。
    /// - `Err(AppError::InvalidRecord)`: 更新后的记录未通过校验。
    pub fn update_user(&self, id: &str, input: &UserInput) -> Result<UserRecord, AppError> {
        validation::validate(input).map_err(AppError::InvalidInput)?;

        let mut existing = self
            .store
            .find_by_id(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        let updated = transform::apply_update(&mut existing, input)?;
        validation::validate_record(&updated).map_err(AppError::InvalidRecord)?;

        // 查询与写入之间不加锁：并发删除时 store.update 会以 InvalidArgument 拒绝
        let saved = self.store.update(updated)?;
        tracing::info!(user_id = %saved.id, "✅ User updated");
        Ok(saved)
    }

    /// 删除用户。不存在时返回 false，而不是错误。
    pub fn delete_user(&self, id: &str) -> bool {
        let deleted = self.store.delete_by_id(id);
        if deleted {
            tracing::info!(user_id = %id, "🗑️ User deleted");
        }
        deleted
    }

    pub fn user_exists(&self, id: &str) -> bool {
        self.store.exists_by_id(id)
    }

    /// 生成全部用户的 CSV 报表。第一行为表头，之后每个用户一行，
    /// 每行以 `\n` 结尾；没有用户时只输出表头。行的顺序与存储返回的顺序一致。
    pub fn generate_csv_report(&self) -> String {
        let users = self.store.find_all();

        let mut csv = String::with_capacity(64 * (users.len() + 1));
        csv.push_str(CSV_HEADER);
        csv.push('\n');

        for user in &users {
            let role = user.role.to_string();
            let fields = [
                user.id.as_str(),
                user.name.as_str(),
                user.phone.as_str(),
                user.email.as_str(),
                role.as_str(),
            ];
            let line = fields
                .into_iter()
                .map(|field| escape_csv_field(Some(field)))
                .collect::<Vec<_>>()
                .join(",");
            csv.push_str(&line);
            csv.push('\n');
        }

        tracing::info!("📄 CSV report generated with {} users", users.len());
        csv
    }
}

/// CSV 字段转义：包含逗号、双引号或换行时整体加双引号，内部双引号加倍；缺失字段输出空串。
pub fn escape_csv_field(field: Option<&str>) -> String {
    let Some(field) = field else {
        return String::new();
    };

    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            enums::{UserField, UserRole},
            error::FieldViolation,
        },
        services::store::InMemoryUserStore,
    };

    fn manager() -> UserManager {
        UserManager::new(Arc::new(InMemoryUserStore::new()))
    }

    fn juan(role: Option<&str>) -> UserInput {
        UserInput::new("Juan Pérez", "+1234567890", "juan@example.com", role)
    }

    #[test]
    fn create_assigns_default_role() {
        let users = manager();

        let created = users.create_user(&juan(Some(""))).unwrap();
        assert_eq!(created.role, UserRole::Client);

        let admin = users.create_user(&juan(Some("admin"))).unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_ne!(created.id, admin.id);
    }

    #[test]
    fn create_rejects_bad_phone() {
        let users = manager();
        let input = UserInput { phone: "abc".into(), ..juan(None) };

        match users.create_user(&input) {
            Err(AppError::InvalidInput(violations)) => {
                assert_eq!(violations, vec![FieldViolation::InvalidFormat(UserField::Phone)]);
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        assert!(users.get_all_users().is_empty());
    }

    #[test]
    fn created_user_reads_back_identical() {
        let users = manager();
        let created = users.create_user(&juan(None)).unwrap();

        let fetched = users.get_user_by_id(&created.id).unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, created.name);
        assert_eq!(fetched.phone, created.phone);
        assert_eq!(fetched.email, created.email);
        assert_eq!(fetched.role, created.role);
        assert!(users.user_exists(&created.id));
    }

    #[test]
    fn update_replaces_every_field() {
        let users = manager();
        let created = users.create_user(&juan(Some("admin"))).unwrap();

        let input = UserInput::new("María", "+5215512345678", "maria@example.com", None);
        let updated = users.update_user(&created.id, &input).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "María");
        assert_eq!(updated.role, UserRole::Client);

        let stored = users.get_user_by_id(&created.id).unwrap();
        assert_eq!(stored.email, "maria@example.com");
        assert_eq!(users.get_all_users().len(), 1);
    }

    #[test]
    fn update_unknown_id_is_not_found_and_creates_nothing() {
        let users = manager();

        let err = users.update_user("never-created", &juan(None)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(id) if id == "never-created"));
        assert!(users.get_all_users().is_empty());
    }

    #[test]
    fn update_validates_before_lookup() {
        let users = manager();
        let input = UserInput { name: "".into(), ..juan(None) };

        let err = users.update_user("never-created", &input).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn delete_then_get_is_absent() {
        let users = manager();
        let created = users.create_user(&juan(None)).unwrap();

        assert!(users.delete_user(&created.id));
        assert!(users.get_user_by_id(&created.id).is_none());
        assert!(!users.user_exists(&created.id));
        assert!(!users.delete_user(&created.id));
    }

    #[test]
    fn empty_report_is_header_only() {
        assert_eq!(manager().generate_csv_report(), "ID,Name,WhatsApp,Email,Role\n");
    }

    #[test]
    fn report_escapes_fields() {
        let users = manager();
        let input = UserInput::new("O'Brien, \"Jr\"", "+1234567890", "ob@example.com", Some("admin"));
        let created = users.create_user(&input).unwrap();

        let report = users.generate_csv_report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            format!("{},\"O'Brien, \"\"Jr\"\"\",+1234567890,ob@example.com,admin", created.id)
        );
    }

    #[test]
    fn escape_rules() {
        assert_eq!(escape_csv_field(Some("O'Brien, \"Jr\"")), "\"O'Brien, \"\"Jr\"\"\"");
        assert_eq!(escape_csv_field(Some("plain")), "plain");
        assert_eq!(escape_csv_field(Some("two\nlines")), "\"two\nlines\"");
        assert_eq!(escape_csv_field(Some("")), "");
        assert_eq!(escape_csv_field(None), "");
    }
}
