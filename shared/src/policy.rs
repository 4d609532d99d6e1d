//! 可见性与删除权限策略
//!
//! 这是纯粹的业务规则层，列表视图与任何管理工具都应消费这里的
//! 同一份判定，而不是各自内联重复逻辑。
//!
//! 所有权判定：requesterEmail 与查看者邮箱大小写不敏感相等；
//! requesterEmail 缺失（或为空串）时回退到 requestedBy。

use crate::{BloodRequest, Session};

/// 提取请求的归属邮箱：requesterEmail 优先，缺失时回退 requestedBy
fn owner_email(request: &BloodRequest) -> Option<&str> {
    request
        .requester_email
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| request.requested_by.as_deref().filter(|s| !s.is_empty()))
}

/// 查看者是否为该请求的所有者（大小写不敏感邮箱比较）
pub fn is_owner(request: &BloodRequest, viewer_email: &str) -> bool {
    owner_email(request)
        .map(|email| email.to_lowercase() == viewer_email.to_lowercase())
        .unwrap_or(false)
}

/// 该请求对查看者是否可见：管理员全可见，其余仅限所有者
pub fn can_view(request: &BloodRequest, viewer: &Session) -> bool {
    viewer.role.is_admin() || is_owner(request, &viewer.email)
}

/// 查看者是否可删除该请求：deletable(R, V) ⇔ V 是管理员 ∨ V 拥有 R
pub fn can_delete(request: &BloodRequest, viewer: &Session) -> bool {
    viewer.role.is_admin() || is_owner(request, &viewer.email)
}

/// 按可见性规则过滤整个结果集
///
/// 管理员得到原序列（顺序不变），普通用户得到其拥有的子集。
pub fn visible_requests(viewer: &Session, items: Vec<BloodRequest>) -> Vec<BloodRequest> {
    if viewer.role.is_admin() {
        return items;
    }
    items
        .into_iter()
        .filter(|r| is_owner(r, &viewer.email))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BloodGroup, RequestStatus, Role, Urgency};
    use chrono::NaiveDate;

    fn session(email: &str, role: Role) -> Session {
        Session {
            user_id: "u1".into(),
            name: "Test User".into(),
            email: email.into(),
            role,
            blood_group: None,
        }
    }

    fn request(id: &str, requester_email: Option<&str>, requested_by: Option<&str>) -> BloodRequest {
        BloodRequest {
            id: id.into(),
            patient_name: "Patient".into(),
            blood_group: BloodGroup::OPositive,
            required_units: 2,
            mobile_number: String::new(),
            hospital_name: String::new(),
            location: String::new(),
            sick_details: String::new(),
            urgency: Urgency::Normal,
            needed_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            additional_info: None,
            status: RequestStatus::Pending,
            requested_by: requested_by.map(Into::into),
            requester_email: requester_email.map(Into::into),
            requester_blood_group: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn ownership_is_case_insensitive() {
        let r = request("1", Some("Alice@Example.COM"), None);
        assert!(is_owner(&r, "alice@example.com"));
        assert!(!is_owner(&r, "bob@example.com"));
    }

    #[test]
    fn requested_by_is_fallback_only() {
        // requesterEmail 缺失时回退到 requestedBy
        let fallback = request("1", None, Some("alice@example.com"));
        assert!(is_owner(&fallback, "alice@example.com"));

        let empty_primary = request("2", Some(""), Some("alice@example.com"));
        assert!(is_owner(&empty_primary, "alice@example.com"));

        // requesterEmail 存在时 requestedBy 不参与判定
        let primary_wins = request("3", Some("bob@example.com"), Some("alice@example.com"));
        assert!(!is_owner(&primary_wins, "alice@example.com"));
        assert!(is_owner(&primary_wins, "bob@example.com"));
    }

    #[test]
    fn no_requester_fields_means_no_owner() {
        let orphan = request("1", None, None);
        assert!(!is_owner(&orphan, "alice@example.com"));
        assert!(!can_delete(&orphan, &session("alice@example.com", Role::User)));
    }

    #[test]
    fn non_admin_sees_exactly_own_requests() {
        let viewer = session("alice@example.com", Role::User);
        let all = vec![
            request("1", Some("ALICE@example.com"), None),
            request("2", Some("bob@example.com"), None),
            request("3", None, Some("alice@example.com")),
            request("4", None, None),
        ];
        let visible = visible_requests(&viewer, all);
        let ids: Vec<_> = visible.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn admin_sees_full_sequence_unchanged() {
        let admin = session("root@example.com", Role::Admin);
        let all = vec![
            request("b", Some("x@example.com"), None),
            request("a", None, None),
            request("c", Some("y@example.com"), None),
        ];
        let visible = visible_requests(&admin, all.clone());
        assert_eq!(visible, all);
    }

    #[test]
    fn delete_permission_matrix() {
        let r = request("1", Some("owner@example.com"), None);

        let owner = session("Owner@Example.com", Role::User);
        let stranger = session("other@example.com", Role::User);
        let admin = session("admin@example.com", Role::Admin);

        assert!(can_delete(&r, &owner));
        assert!(!can_delete(&r, &stranger));
        assert!(can_delete(&r, &admin));

        assert!(can_view(&r, &owner));
        assert!(!can_view(&r, &stranger));
        assert!(can_view(&r, &admin));
    }
}
