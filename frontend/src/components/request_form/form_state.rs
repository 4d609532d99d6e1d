//! 提交表单的信号状态
//!
//! 每个字段一个 RwSignal，提交成功后 reset，失败时保持原值。
//! 校验与载荷组装集中在 [`FormState::to_payload`]。

use chrono::NaiveDate;
use leptos::prelude::*;

use youthblood_shared::{
    clamp_units, BloodGroup, CreateBloodRequest, RequestStatus, Session, Urgency,
};

/// 表单字段集合
#[derive(Clone, Copy)]
pub struct FormState {
    pub patient_name: RwSignal<String>,
    pub blood_group: RwSignal<Option<BloodGroup>>,
    pub mobile_number: RwSignal<String>,
    pub hospital_name: RwSignal<String>,
    pub location: RwSignal<String>,
    pub sick_details: RwSignal<String>,
    pub required_units: RwSignal<u32>,
    pub urgency: RwSignal<Urgency>,
    /// `YYYY-MM-DD`，与 `<input type="date">` 的值一致
    pub needed_date: RwSignal<String>,
    pub additional_info: RwSignal<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            patient_name: RwSignal::new(String::new()),
            blood_group: RwSignal::new(None),
            mobile_number: RwSignal::new(String::new()),
            hospital_name: RwSignal::new(String::new()),
            location: RwSignal::new(String::new()),
            sick_details: RwSignal::new(String::new()),
            required_units: RwSignal::new(1),
            urgency: RwSignal::new(Urgency::Normal),
            needed_date: RwSignal::new(String::new()),
            additional_info: RwSignal::new(String::new()),
        }
    }

    /// 清空所有字段（提交成功后调用）
    pub fn reset(&self) {
        self.patient_name.set(String::new());
        self.blood_group.set(None);
        self.mobile_number.set(String::new());
        self.hospital_name.set(String::new());
        self.location.set(String::new());
        self.sick_details.set(String::new());
        self.required_units.set(1);
        self.urgency.set(Urgency::Normal);
        self.needed_date.set(String::new());
        self.additional_info.set(String::new());
    }

    /// 校验并组装提交体
    ///
    /// requester 字段取自当前会话而不是表单，提交者无法伪造归属。
    pub fn to_payload(&self, user: &Session) -> Result<CreateBloodRequest, String> {
        let patient_name = self.patient_name.get_untracked().trim().to_string();
        if patient_name.is_empty() {
            return Err("Patient name is required".to_string());
        }

        let blood_group = self
            .blood_group
            .get_untracked()
            .ok_or_else(|| "Please select a blood group".to_string())?;

        let mobile_number = self.mobile_number.get_untracked().trim().to_string();
        if mobile_number.is_empty() {
            return Err("Mobile number is required".to_string());
        }

        let hospital_name = self.hospital_name.get_untracked().trim().to_string();
        if hospital_name.is_empty() {
            return Err("Hospital name is required".to_string());
        }

        let location = self.location.get_untracked().trim().to_string();
        if location.is_empty() {
            return Err("Location is required".to_string());
        }

        let sick_details = self.sick_details.get_untracked().trim().to_string();
        if sick_details.is_empty() {
            return Err("Patient condition details are required".to_string());
        }

        let raw_date = self.needed_date.get_untracked();
        let needed_date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
            .map_err(|_| "Please choose a valid needed date".to_string())?;

        let additional_info = {
            let info = self.additional_info.get_untracked().trim().to_string();
            if info.is_empty() { None } else { Some(info) }
        };

        Ok(CreateBloodRequest {
            patient_name,
            blood_group,
            required_units: clamp_units(self.required_units.get_untracked() as i64),
            mobile_number,
            hospital_name,
            location,
            sick_details,
            urgency: self.urgency.get_untracked(),
            needed_date,
            additional_info,
            status: RequestStatus::Pending,
            requested_by: user.name.clone(),
            requester_email: user.email.clone(),
            requester_blood_group: user.blood_group,
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use youthblood_shared::Role;

    fn session() -> Session {
        Session {
            user_id: "u1".into(),
            name: "Karim".into(),
            email: "karim@example.com".into(),
            role: Role::User,
            blood_group: Some(BloodGroup::OPositive),
        }
    }

    fn filled() -> FormState {
        let state = FormState::new();
        state.patient_name.set("Jane Roe".into());
        state.blood_group.set(Some(BloodGroup::APositive));
        state.mobile_number.set("01711".into());
        state.hospital_name.set("City Hospital".into());
        state.location.set("Dhaka".into());
        state.sick_details.set("surgery".into());
        state.required_units.set(3);
        state.urgency.set(Urgency::Urgent);
        state.needed_date.set("2026-09-01".into());
        state
    }

    #[test]
    fn payload_carries_session_identity() {
        let payload = filled().to_payload(&session()).unwrap();
        assert_eq!(payload.requested_by, "Karim");
        assert_eq!(payload.requester_email, "karim@example.com");
        assert_eq!(payload.requester_blood_group, Some(BloodGroup::OPositive));
        assert_eq!(payload.status, RequestStatus::Pending);
        assert_eq!(
            payload.needed_date,
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
        );
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let state = filled();
        state.patient_name.set("   ".into());
        assert!(state.to_payload(&session()).is_err());

        let state = filled();
        state.blood_group.set(None);
        assert!(state.to_payload(&session()).is_err());

        let state = filled();
        state.needed_date.set("01/09/2026".into());
        assert!(state.to_payload(&session()).is_err());
    }

    #[test]
    fn units_are_clamped_on_submit() {
        let state = filled();
        state.required_units.set(99);
        assert_eq!(state.to_payload(&session()).unwrap().required_units, 10);

        state.required_units.set(0);
        assert_eq!(state.to_payload(&session()).unwrap().required_units, 1);
    }

    #[test]
    fn blank_additional_info_is_omitted() {
        let state = filled();
        state.additional_info.set("  ".into());
        assert!(state.to_payload(&session()).unwrap().additional_info.is_none());

        state.additional_info.set("ward 4".into());
        assert_eq!(
            state.to_payload(&session()).unwrap().additional_info.as_deref(),
            Some("ward 4")
        );
    }

    #[test]
    fn reset_clears_every_field() {
        let state = filled();
        state.reset();
        assert!(state.patient_name.get_untracked().is_empty());
        assert!(state.blood_group.get_untracked().is_none());
        assert_eq!(state.required_units.get_untracked(), 1);
        assert_eq!(state.urgency.get_untracked(), Urgency::Normal);
        assert!(state.needed_date.get_untracked().is_empty());
    }
}
