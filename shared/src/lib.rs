use serde::{Deserialize, Serialize};

use chrono::{DateTime, NaiveDate, Utc};

pub mod error;
pub mod policy;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 每次提交可请求的最小血液单位数
pub const MIN_REQUIRED_UNITS: u32 = 1;
/// 每次提交可请求的最大血液单位数
pub const MAX_REQUIRED_UNITS: u32 = 10;

/// 将用户输入的单位数收敛到 [1, 10] 区间
///
/// 表单输入解析出的原始值可能为 0 或超出上限，统一在这里收敛，
/// 提交前还会再做一次，保证请求体永远合法。
pub fn clamp_units(raw: i64) -> u32 {
    raw.clamp(MIN_REQUIRED_UNITS as i64, MAX_REQUIRED_UNITS as i64) as u32
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 标准 ABO/Rh 血型（8 种）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }

    /// 从 "A+" 这类显示值解析，解析失败返回 None
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.as_str() == s)
    }
}

impl std::fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 请求紧急程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    Urgent,
    Emergency,
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Normal
    }
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Normal, Urgency::Urgent, Urgency::Emergency];

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::Urgent => "urgent",
            Urgency::Emergency => "emergency",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|u| u.as_str() == s)
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 请求状态
///
/// 状态集合由服务端定义且可能扩展，未知值保留原文而不是反序列化失败。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
    Pending,
    Completed,
    Cancelled,
    Other(String),
}

impl Default for RequestStatus {
    fn default() -> Self {
        RequestStatus::Pending
    }
}

impl From<String> for RequestStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "pending" => RequestStatus::Pending,
            "completed" => RequestStatus::Completed,
            "cancelled" => RequestStatus::Cancelled,
            _ => RequestStatus::Other(s),
        }
    }
}

impl From<RequestStatus> for String {
    fn from(status: RequestStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => f.write_str("pending"),
            RequestStatus::Completed => f.write_str("completed"),
            RequestStatus::Cancelled => f.write_str("cancelled"),
            RequestStatus::Other(s) => f.write_str(s),
        }
    }
}

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// 已认证身份 (会话声明)
///
/// 由外部认证服务在登录成功时颁发，对除会话层以外的组件只读。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "id", alias = "_id")]
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
}

/// 血液请求记录（服务端持久化形态）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequest {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub patient_name: String,
    pub blood_group: BloodGroup,
    #[serde(default = "default_units")]
    pub required_units: u32,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub hospital_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub sick_details: String,
    #[serde(default)]
    pub urgency: Urgency,
    pub needed_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_blood_group: Option<BloodGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_units() -> u32 {
    MIN_REQUIRED_UNITS
}

/// 创建血液请求的提交体
///
/// id / createdAt / updatedAt 由服务端分配；requester 三个字段
/// 在提交时从当前会话附加，保证 requesterEmail 与会话邮箱一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBloodRequest {
    pub patient_name: String,
    pub blood_group: BloodGroup,
    pub required_units: u32,
    pub mobile_number: String,
    pub hospital_name: String,
    pub location: String,
    pub sick_details: String,
    pub urgency: Urgency,
    pub needed_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    pub status: RequestStatus,
    pub requested_by: String,
    pub requester_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_blood_group: Option<BloodGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_units_boundaries() {
        assert_eq!(clamp_units(0), 1);
        assert_eq!(clamp_units(1), 1);
        assert_eq!(clamp_units(10), 10);
        assert_eq!(clamp_units(11), 10);
        assert_eq!(clamp_units(-3), 1);
    }

    #[test]
    fn blood_group_wire_format() {
        let json = serde_json::to_string(&BloodGroup::AbNegative).unwrap();
        assert_eq!(json, "\"AB-\"");
        let parsed: BloodGroup = serde_json::from_str("\"O+\"").unwrap();
        assert_eq!(parsed, BloodGroup::OPositive);
        assert_eq!(BloodGroup::parse("B-"), Some(BloodGroup::BNegative));
        assert_eq!(BloodGroup::parse("C+"), None);
    }

    #[test]
    fn status_keeps_unknown_values_verbatim() {
        let parsed: RequestStatus = serde_json::from_str("\"fulfilled\"").unwrap();
        assert_eq!(parsed, RequestStatus::Other("fulfilled".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"fulfilled\"");

        let pending: RequestStatus = serde_json::from_str("\"Pending\"").unwrap();
        assert_eq!(pending, RequestStatus::Pending);
    }

    #[test]
    fn blood_request_accepts_mongo_id_and_sparse_fields() {
        let body = r#"{
            "_id": "65f0",
            "patientName": "Jane Roe",
            "bloodGroup": "A+",
            "neededDate": "2026-09-10"
        }"#;
        let req: BloodRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.id, "65f0");
        assert_eq!(req.required_units, 1);
        assert_eq!(req.urgency, Urgency::Normal);
        assert_eq!(req.status, RequestStatus::Pending);
        assert!(req.requester_email.is_none());
    }

    /// 创建请求的往返：服务端回显分配 id/状态后，用户提交的字段逐一相等
    #[test]
    fn create_round_trip_preserves_user_fields() {
        let payload = CreateBloodRequest {
            patient_name: "Karim".into(),
            blood_group: BloodGroup::BPositive,
            required_units: 3,
            mobile_number: "01711".into(),
            hospital_name: "City Hospital".into(),
            location: "Dhaka".into(),
            sick_details: "surgery".into(),
            urgency: Urgency::Urgent,
            needed_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            additional_info: Some("ward 4".into()),
            status: RequestStatus::Pending,
            requested_by: "Karim".into(),
            requester_email: "karim@example.com".into(),
            requester_blood_group: Some(BloodGroup::OPositive),
        };

        // 模拟服务端：收到提交体，补上 _id 与时间戳后原样回显
        let mut value: serde_json::Value = serde_json::to_value(&payload).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.insert("_id".into(), serde_json::json!("abc123"));
        obj.insert("createdAt".into(), serde_json::json!("2026-08-25T10:00:00Z"));

        let echoed: BloodRequest = serde_json::from_value(value).unwrap();
        assert_eq!(echoed.id, "abc123");
        assert_eq!(echoed.patient_name, payload.patient_name);
        assert_eq!(echoed.blood_group, payload.blood_group);
        assert_eq!(echoed.required_units, payload.required_units);
        assert_eq!(echoed.mobile_number, payload.mobile_number);
        assert_eq!(echoed.hospital_name, payload.hospital_name);
        assert_eq!(echoed.location, payload.location);
        assert_eq!(echoed.sick_details, payload.sick_details);
        assert_eq!(echoed.urgency, payload.urgency);
        assert_eq!(echoed.needed_date, payload.needed_date);
        assert_eq!(echoed.additional_info, payload.additional_info);
        assert_eq!(echoed.requested_by.as_deref(), Some("Karim"));
        assert_eq!(echoed.requester_email.as_deref(), Some("karim@example.com"));
        assert!(echoed.created_at.is_some());
    }
}
