//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到请求对象的转换（经由纯数据的 `ActivityDraft`）

use chrono::TimeZone;
use classroom_shared::ActivityState;
use classroom_shared::date::{input_now, input_to_rfc3339_in};
use classroom_shared::protocol::{CreateActivity, CreateActivityInput};
use leptos::prelude::*;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    pub group_id: RwSignal<String>,
    /// `<input type="datetime-local">` 的原始值
    pub scheduled_at: RwSignal<String>,
    pub location: RwSignal<String>,
}

impl FormState {
    /// 创建新的表单状态，时间默认为当前时刻
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            group_id: RwSignal::new(String::new()),
            scheduled_at: RwSignal::new(input_now()),
            location: RwSignal::new(String::new()),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.title.set(String::new());
        self.description.set(String::new());
        self.group_id.set(String::new());
        self.scheduled_at.set(input_now());
        self.location.set(String::new());
    }

    /// 当前表单值的快照
    pub fn draft(&self) -> ActivityDraft {
        ActivityDraft {
            title: self.title.get_untracked(),
            description: self.description.get_untracked(),
            group_id: self.group_id.get_untracked(),
            scheduled_at: self.scheduled_at.get_untracked(),
            location: self.location.get_untracked(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// 纯数据草稿
// ============================================================================

/// 表单校验失败的原因，直接用作提示文案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    MissingTitle,
    MissingGroup,
    InvalidDate,
}

impl DraftError {
    pub fn message(&self) -> &'static str {
        match self {
            DraftError::MissingTitle => "Please enter a title",
            DraftError::MissingGroup => "Please select a group",
            DraftError::InvalidDate => "Please enter a valid date and time",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDraft {
    pub title: String,
    pub description: String,
    pub group_id: String,
    pub scheduled_at: String,
    pub location: String,
}

impl ActivityDraft {
    /// 转换为 API 请求：时间按 `tz` 理解后转为 UTC，空地点省略，初始状态为 NEW
    pub fn into_request_in<Tz: TimeZone>(self, tz: &Tz) -> Result<CreateActivity, DraftError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if self.group_id.is_empty() {
            return Err(DraftError::MissingGroup);
        }
        let scheduled_at =
            input_to_rfc3339_in(&self.scheduled_at, tz).ok_or(DraftError::InvalidDate)?;

        let location = self.location.trim();
        let location = (!location.is_empty()).then(|| location.to_string());

        Ok(CreateActivity {
            create_activity_input: CreateActivityInput {
                title,
                description: self.description,
                group_id: self.group_id,
                scheduled_at,
                location,
                state: ActivityState::New,
            },
        })
    }

    pub fn into_request(self) -> Result<CreateActivity, DraftError> {
        self.into_request_in(&chrono::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn draft() -> ActivityDraft {
        ActivityDraft {
            title: "  Field Trip ".to_string(),
            description: "Museum visit".to_string(),
            group_id: "g1".to_string(),
            scheduled_at: "2024-05-01T14:30".to_string(),
            location: String::new(),
        }
    }

    #[test]
    fn converts_local_time_to_utc_and_starts_new() {
        let req = draft().into_request_in(&Utc).unwrap();
        let input = req.create_activity_input;
        assert_eq!(input.title, "Field Trip");
        assert_eq!(input.scheduled_at, "2024-05-01T14:30:00.000Z");
        assert_eq!(input.state, ActivityState::New);
        assert_eq!(input.location, None);

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let req = draft().into_request_in(&plus_two).unwrap();
        assert_eq!(req.create_activity_input.scheduled_at, "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn keeps_non_blank_location() {
        let mut d = draft();
        d.location = " Room 12 ".to_string();
        let req = d.into_request_in(&Utc).unwrap();
        assert_eq!(req.create_activity_input.location.as_deref(), Some("Room 12"));
    }

    #[test]
    fn rejects_incomplete_drafts() {
        let mut d = draft();
        d.group_id.clear();
        assert_eq!(d.into_request_in(&Utc).unwrap_err(), DraftError::MissingGroup);

        let mut d = draft();
        d.title = "   ".to_string();
        assert_eq!(d.into_request_in(&Utc).unwrap_err(), DraftError::MissingTitle);

        let mut d = draft();
        d.scheduled_at = "tomorrow".to_string();
        assert_eq!(d.into_request_in(&Utc).unwrap_err(), DraftError::InvalidDate);
    }
}
