// ==========================================
// CSV 报表常量：导出接口的表头与下载文件名，保证报表格式稳定。
// ==========================================

/// CSV 表头：列顺序固定为 ID、姓名、WhatsApp、邮箱、角色。
pub const CSV_HEADER: &str = "ID,Name,WhatsApp,Email,Role";

/// 报表下载文件名，写入 Content-Disposition 头部。
pub const REPORT_FILENAME: &str = "users_report.csv";

/// 报表响应的媒体类型。
pub const CSV_CONTENT_TYPE: &str = "text/csv";
