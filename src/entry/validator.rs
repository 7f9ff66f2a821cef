use chrono::NaiveDate;
use crate::errors::ValidationError;
use crate::models::{ProductionRecord, PublicUser, RecordDraft, RecordPatch};

pub const MAX_UTILIZATION: f64 = 8.0;
pub const DEFAULT_FREQUENCY: &str = "Daily";

pub fn check_utilization(value: f64) -> Result<(), ValidationError> {
    // NaN fails the first comparison too
    if !(value > 0.0) {
        return Err(ValidationError::UtilizationNotPositive);
    }
    if value > MAX_UTILIZATION {
        return Err(ValidationError::UtilizationTooHigh);
    }
    Ok(())
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Gates a new submission and turns it into a record owned by `owner`.
///
/// Utilization is checked before the required fields. A missing date
/// becomes `today`, a missing or non-positive count becomes 1 and a blank
/// frequency becomes "Daily".
pub fn accept_draft(
    draft: RecordDraft,
    owner: &PublicUser,
    today: NaiveDate,
) -> Result<ProductionRecord, ValidationError> {
    check_utilization(draft.total_utilization.unwrap_or(0.0))?;

    if is_blank(draft.task_name()) || is_blank(draft.team.as_deref()) {
        return Err(ValidationError::MissingRequiredFields);
    }

    let task = draft.task_name().unwrap_or_default().to_string();
    let frequency = draft
        .frequency
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FREQUENCY.to_string());
    let count = draft
        .count
        .and_then(|c| u32::try_from(c).ok())
        .filter(|c| *c >= 1)
        .unwrap_or(1);

    Ok(ProductionRecord {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: owner.id.clone(),
        user_name: owner.name.clone(),
        process_name: task.clone(),
        task,
        team: draft.team.unwrap_or_default(),
        frequency,
        total_utilization: draft.total_utilization.unwrap_or(0.0),
        completed_date: draft.completed_date.unwrap_or(today),
        count,
        remarks: draft.remarks.unwrap_or_default(),
    })
}

/// Same rules as `accept_draft`, applied only to the fields a patch carries.
/// Count goes first: a derived utilization of 0 stems from a bad count.
pub fn check_patch(patch: &RecordPatch) -> Result<(), ValidationError> {
    if let Some(count) = patch.count {
        if count < 1 || u32::try_from(count).is_err() {
            return Err(ValidationError::InvalidCount);
        }
    }
    if let Some(value) = patch.total_utilization {
        check_utilization(value)?;
    }
    if patch.task_name().is_some() && is_blank(patch.task_name()) {
        return Err(ValidationError::MissingRequiredFields);
    }
    if patch.team.is_some() && is_blank(patch.team.as_deref()) {
        return Err(ValidationError::MissingRequiredFields);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn owner() -> PublicUser {
        PublicUser {
            id: "u-7".into(),
            username: "meena".into(),
            name: "Meena".into(),
            role: Role::Standard,
            is_disabled: false,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn draft() -> RecordDraft {
        RecordDraft {
            process_name: Some("Invoice creation".into()),
            team: Some("Pick My Career Operations".into()),
            total_utilization: Some(0.21),
            count: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn zero_utilization_is_rejected() {
        let err = accept_draft(
            RecordDraft { total_utilization: Some(0.0), ..draft() },
            &owner(),
            today(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::UtilizationNotPositive);
        assert_eq!(err.to_string(), "Total Utilization must be greater than 0");
    }

    #[test]
    fn utilization_is_checked_before_required_fields() {
        let err = accept_draft(
            RecordDraft { team: None, total_utilization: None, ..draft() },
            &owner(),
            today(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::UtilizationNotPositive);
    }

    #[test]
    fn blank_team_or_task_is_rejected() {
        let err = accept_draft(RecordDraft { team: Some("  ".into()), ..draft() }, &owner(), today())
            .unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields");

        let err = accept_draft(RecordDraft { process_name: None, ..draft() }, &owner(), today())
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingRequiredFields);
    }

    #[test]
    fn more_than_a_working_day_is_rejected() {
        assert_eq!(check_utilization(8.0), Ok(()));
        assert_eq!(check_utilization(8.01), Err(ValidationError::UtilizationTooHigh));
        assert_eq!(check_utilization(f64::NAN), Err(ValidationError::UtilizationNotPositive));
    }

    #[test]
    fn accepted_draft_is_stamped_and_defaulted() {
        let record = accept_draft(
            RecordDraft { count: Some(0), ..draft() },
            &owner(),
            today(),
        )
        .unwrap();
        assert!(!record.id.is_empty());
        assert_eq!(record.user_id, "u-7");
        assert_eq!(record.user_name, "Meena");
        assert_eq!(record.task, record.process_name);
        assert_eq!(record.frequency, DEFAULT_FREQUENCY);
        assert_eq!(record.completed_date, today());
        assert_eq!(record.count, 1);
        assert_eq!(record.remarks, "");
    }

    #[test]
    fn each_accepted_draft_gets_its_own_id() {
        let a = accept_draft(draft(), &owner(), today()).unwrap();
        let b = accept_draft(draft(), &owner(), today()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn patch_checks_only_present_fields() {
        assert_eq!(check_patch(&RecordPatch::default()), Ok(()));
        assert_eq!(
            check_patch(&RecordPatch { total_utilization: Some(0.0), ..Default::default() }),
            Err(ValidationError::UtilizationNotPositive)
        );
        assert_eq!(
            check_patch(&RecordPatch { team: Some(String::new()), ..Default::default() }),
            Err(ValidationError::MissingRequiredFields)
        );
        assert_eq!(
            check_patch(&RecordPatch { count: Some(0), ..Default::default() }),
            Err(ValidationError::InvalidCount)
        );
    }

    #[test]
    fn bad_count_is_reported_before_utilization() {
        let patch = RecordPatch {
            count: Some(0),
            total_utilization: Some(0.0),
            ..Default::default()
        };
        assert_eq!(check_patch(&patch), Err(ValidationError::InvalidCount));
    }
}
