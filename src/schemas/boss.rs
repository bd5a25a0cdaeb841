use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::boss::BossStatus;
use crate::services::duration::parse_clock_time;

/// Admin edit form. Every field is written back on save, so an omitted
/// optional field clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BossForm {
    #[validate(length(min = 1, max = 200, message = "Boss name is required"))]
    pub name: String,
    #[serde(default)]
    pub status: BossStatus,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[validate(range(min = 0, message = "Level cannot be negative"))]
    pub level_emily: Option<i32>,
    #[validate(range(min = 0, message = "Level cannot be negative"))]
    pub level_agent: Option<i32>,
    #[validate(range(min = 0, message = "Death count cannot be negative"))]
    pub death_count_emily: Option<i32>,
    #[validate(range(min = 0, message = "Death count cannot be negative"))]
    pub death_count_agent: Option<i32>,
    #[validate(length(max = 2048))]
    pub clip_link: Option<String>,
    pub order_index: i32,
}

impl BossForm {
    /// Trim text fields and turn blank optional text into `None`, then validate
    pub fn into_checked(self) -> Result<Self> {
        let form = Self {
            name: self.name.trim().to_string(),
            start_time: blank_to_none(self.start_time),
            end_time: blank_to_none(self.end_time),
            clip_link: blank_to_none(self.clip_link),
            ..self
        };

        form.validate()?;

        for (field, value) in [("start_time", &form.start_time), ("end_time", &form.end_time)] {
            if let Some(value) = value {
                if parse_clock_time(value).is_none() {
                    return Err(AppError::BadRequest(format!(
                        "{} must look like H:MM:SS, got '{}'",
                        field, value
                    )));
                }
            }
        }

        Ok(form)
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BossForm {
        BossForm {
            name: "Margit, the Fell Omen".to_string(),
            status: BossStatus::Completed,
            start_time: Some("0:45:20".to_string()),
            end_time: Some("2:06:36".to_string()),
            level_emily: Some(40),
            level_agent: Some(38),
            death_count_emily: Some(3),
            death_count_agent: Some(7),
            clip_link: Some("https://clips.twitch.tv/AbCd123".to_string()),
            order_index: 1,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(form().into_checked().is_ok());
    }

    #[test]
    fn test_blank_optional_text_becomes_none() {
        let checked = BossForm {
            start_time: Some("   ".to_string()),
            end_time: Some(String::new()),
            clip_link: Some(String::new()),
            ..form()
        }
        .into_checked()
        .unwrap();

        assert_eq!(checked.start_time, None);
        assert_eq!(checked.end_time, None);
        assert_eq!(checked.clip_link, None);
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = BossForm {
            name: "  ".to_string(),
            ..form()
        }
        .into_checked();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_negative_counts_rejected() {
        let result = BossForm {
            death_count_agent: Some(-1),
            ..form()
        }
        .into_checked();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_bad_time_rejected() {
        let result = BossForm {
            end_time: Some("2h06".to_string()),
            ..form()
        }
        .into_checked();
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_missing_status_defaults_to_not_started() {
        let parsed: BossForm =
            serde_json::from_str(r#"{"name":"Godrick","order_index":2}"#).unwrap();
        assert_eq!(parsed.status, BossStatus::NotStarted);
        assert_eq!(parsed.death_count_emily, None);
    }
}
