//! 活动生命周期
//!
//! 状态只允许单调前进：NEW → IN_PROGRESS → COMPLETED，
//! CANCELED 只能从 NEW 或 IN_PROGRESS 进入。客户端永远不会请求迁移到 NEW。

use serde::{Deserialize, Serialize};

use crate::{Activity, TransitionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityState {
    #[default]
    New,
    InProgress,
    Completed,
    Canceled,
}

/// 教师可在活动卡片上执行的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateAction {
    Start,
    Complete,
    Cancel,
}

impl StateAction {
    pub fn target(&self) -> ActivityState {
        match self {
            StateAction::Start => ActivityState::InProgress,
            StateAction::Complete => ActivityState::Completed,
            StateAction::Cancel => ActivityState::Canceled,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StateAction::Start => "Start",
            StateAction::Complete => "Complete",
            StateAction::Cancel => "Cancel",
        }
    }
}

impl ActivityState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityState::New => "NEW",
            ActivityState::InProgress => "IN_PROGRESS",
            ActivityState::Completed => "COMPLETED",
            ActivityState::Canceled => "CANCELED",
        }
    }

    /// 展示用文案（下划线替换为空格）
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// 仍可加入 / 仍在进行中的状态
    pub fn is_open(&self) -> bool {
        matches!(self, ActivityState::New | ActivityState::InProgress)
    }

    /// 当前状态下提供的操作按钮，顺序即渲染顺序
    pub fn actions(&self) -> &'static [StateAction] {
        match self {
            ActivityState::New => &[StateAction::Start, StateAction::Cancel],
            ActivityState::InProgress => &[StateAction::Complete, StateAction::Cancel],
            ActivityState::Completed | ActivityState::Canceled => &[],
        }
    }

    pub fn can_transition_to(&self, next: ActivityState) -> bool {
        self.actions().iter().any(|a| a.target() == next)
    }

    /// 校验迁移并返回目标状态
    pub fn transition(self, next: ActivityState) -> Result<ActivityState, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                from: self,
                to: next,
            })
        }
    }
}

impl std::fmt::Display for ActivityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 学生 "Available Activities" 列表：仅保留开放状态且尚未加入的活动
pub fn available_for<'a>(activities: &'a [Activity], user_id: &str) -> Vec<&'a Activity> {
    activities
        .iter()
        .filter(|a| a.state.is_open() && !a.has_attendee(user_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GroupRef, Person};

    fn activity(id: &str, state: ActivityState, attendees: &[&str]) -> Activity {
        Activity {
            id: id.to_string(),
            title: format!("Activity {id}"),
            description: String::new(),
            scheduled_at: "2024-05-01T14:30:00.000Z".to_string(),
            created_at: None,
            state,
            location: None,
            group: GroupRef {
                id: "g1".to_string(),
                name: "Math 101".to_string(),
            },
            created_by: None,
            attendees: attendees
                .iter()
                .map(|id| Person {
                    id: id.to_string(),
                    first_name: "S".to_string(),
                    last_name: id.to_string(),
                    email: None,
                })
                .collect(),
        }
    }

    #[test]
    fn terminal_states_offer_no_actions() {
        assert!(ActivityState::Completed.actions().is_empty());
        assert!(ActivityState::Canceled.actions().is_empty());

        let completed = ActivityState::Completed.actions();
        assert!(!completed.contains(&StateAction::Start));
        assert!(!completed.contains(&StateAction::Complete));
    }

    #[test]
    fn open_states_offer_forward_moves_and_cancel() {
        assert_eq!(
            ActivityState::New.actions(),
            &[StateAction::Start, StateAction::Cancel]
        );
        assert_eq!(
            ActivityState::InProgress.actions(),
            &[StateAction::Complete, StateAction::Cancel]
        );
    }

    #[test]
    fn transitions_are_monotonic() {
        use ActivityState::*;

        assert_eq!(New.transition(InProgress), Ok(InProgress));
        assert_eq!(New.transition(Canceled), Ok(Canceled));
        assert_eq!(InProgress.transition(Completed), Ok(Completed));
        assert_eq!(InProgress.transition(Canceled), Ok(Canceled));

        // 不允许跳级，也不允许回到 NEW
        assert!(New.transition(Completed).is_err());
        assert!(InProgress.transition(New).is_err());
        assert!(Completed.transition(Canceled).is_err());
        assert!(Canceled.transition(InProgress).is_err());
        for state in [New, InProgress, Completed, Canceled] {
            assert!(!state.can_transition_to(New));
        }
    }

    #[test]
    fn labels_replace_underscores() {
        assert_eq!(ActivityState::InProgress.label(), "IN PROGRESS");
        assert_eq!(ActivityState::New.label(), "NEW");
    }

    #[test]
    fn joined_activity_is_not_available() {
        let list = vec![
            activity("a1", ActivityState::New, &["me"]),
            activity("a2", ActivityState::New, &["other"]),
            activity("a3", ActivityState::InProgress, &[]),
            activity("a4", ActivityState::Completed, &[]),
            activity("a5", ActivityState::Canceled, &[]),
        ];

        let ids: Vec<&str> = available_for(&list, "me")
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a2", "a3"]);
    }
}
