use chrono::NaiveDate;
use serde::Serialize;
use crate::catalog::{round2, TaskCatalog, TaskTime};
use crate::entry::validator;
use crate::errors::ValidationError;
use crate::models::{ProductionRecord, PublicUser, RecordDraft};

/// Utilization for `count` units of a task, or `None` for runtime tasks.
/// An absent or non-positive count counts as zero units.
pub fn compute_utilization(time: TaskTime, count: Option<i64>) -> Option<f64> {
    match time {
        TaskTime::Runtime => None,
        TaskTime::Fixed(hours) => {
            let units = count.filter(|c| *c > 0).unwrap_or(0) as f64;
            Some(round2(hours * units))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationMode {
    /// Derived from task duration and count; read-only.
    Computed,
    /// Typed in by the user.
    Manual,
}

enum Trigger {
    TaskChanged,
    CountChanged,
}

/// What the form currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySnapshot {
    pub process_name: String,
    pub team: String,
    pub frequency: String,
    pub total_utilization: f64,
    pub count: Option<i64>,
    pub completed_date: Option<NaiveDate>,
    pub remarks: String,
    pub utilization_mode: UtilizationMode,
}

/// State of the production entry form.
///
/// Task, team and frequency stick across submissions so the same kind of
/// work can be logged repeatedly; utilization, count and remarks reset.
#[derive(Debug, Clone)]
pub struct EntryForm<'a> {
    catalog: &'a TaskCatalog,
    task: String,
    team: String,
    frequency: String,
    total_utilization: f64,
    completed_date: Option<NaiveDate>,
    count: Option<i64>,
    remarks: String,
    mode: UtilizationMode,
}

impl<'a> EntryForm<'a> {
    pub fn new(catalog: &'a TaskCatalog) -> Self {
        let mut form = Self {
            catalog,
            task: catalog.tasks().first().map(|t| t.name.clone()).unwrap_or_default(),
            team: catalog.teams().first().cloned().unwrap_or_default(),
            frequency: catalog.frequencies().first().cloned().unwrap_or_default(),
            total_utilization: 0.0,
            completed_date: None,
            count: Some(1),
            remarks: String::new(),
            mode: UtilizationMode::Computed,
        };
        form.recompute(Trigger::TaskChanged);
        form
    }

    /// Replays a submitted draft through the form, the same way a user
    /// would fill it in. Absent team or frequency stay blank rather than
    /// taking the form defaults, and a supplied utilization only sticks
    /// for runtime tasks.
    pub fn from_draft(catalog: &'a TaskCatalog, draft: &RecordDraft) -> Self {
        let mut form = Self::new(catalog);
        form.set_team(draft.team.as_deref().unwrap_or_default());
        form.set_frequency(draft.frequency.as_deref().unwrap_or_default());
        form.set_remarks(draft.remarks.as_deref().unwrap_or_default());
        if let Some(date) = draft.completed_date {
            form.set_completed_date(date);
        }
        form.set_count(draft.count);
        form.select_task(draft.task_name().unwrap_or_default());
        if let Some(value) = draft.total_utilization {
            // refused in computed mode, where the derived value stands
            form.set_utilization(value).ok();
        }
        form
    }

    pub fn select_task(&mut self, task: &str) {
        self.task = task.to_string();
        self.recompute(Trigger::TaskChanged);
    }

    pub fn set_count(&mut self, count: Option<i64>) {
        self.count = count;
        self.recompute(Trigger::CountChanged);
    }

    pub fn set_utilization(&mut self, value: f64) -> Result<(), ValidationError> {
        if self.mode == UtilizationMode::Computed {
            return Err(ValidationError::UtilizationReadOnly);
        }
        self.total_utilization = value;
        Ok(())
    }

    pub fn set_team(&mut self, team: &str) {
        self.team = team.to_string();
    }

    pub fn set_frequency(&mut self, frequency: &str) {
        self.frequency = frequency.to_string();
    }

    pub fn set_completed_date(&mut self, date: NaiveDate) {
        self.completed_date = Some(date);
    }

    pub fn set_remarks(&mut self, remarks: &str) {
        self.remarks = remarks.to_string();
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn frequency(&self) -> &str {
        &self.frequency
    }

    pub fn count(&self) -> Option<i64> {
        self.count
    }

    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    pub fn total_utilization(&self) -> f64 {
        self.total_utilization
    }

    pub fn mode(&self) -> UtilizationMode {
        self.mode
    }

    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            process_name: self.task().to_string(),
            team: self.team().to_string(),
            frequency: self.frequency().to_string(),
            total_utilization: self.total_utilization(),
            count: self.count(),
            completed_date: self.completed_date,
            remarks: self.remarks().to_string(),
            utilization_mode: self.mode(),
        }
    }

    pub fn draft(&self) -> RecordDraft {
        RecordDraft {
            process_name: Some(self.task.clone()),
            task: Some(self.task.clone()),
            team: Some(self.team.clone()),
            frequency: Some(self.frequency.clone()),
            total_utilization: Some(self.total_utilization),
            completed_date: self.completed_date,
            count: self.count,
            remarks: Some(self.remarks.clone()),
        }
    }

    /// Validates the current input and builds the record. The form is only
    /// reset when the record is accepted.
    pub fn submit(
        &mut self,
        owner: &PublicUser,
        today: NaiveDate,
    ) -> Result<ProductionRecord, ValidationError> {
        let record = validator::accept_draft(self.draft(), owner, today)?;

        self.count = Some(1);
        self.remarks.clear();
        self.total_utilization = 0.0;
        self.recompute(Trigger::CountChanged);

        Ok(record)
    }

    // Names missing from the catalog have no known duration: treat them as runtime.
    fn recompute(&mut self, trigger: Trigger) {
        let time = self.catalog.duration(&self.task).unwrap_or(TaskTime::Runtime);

        match compute_utilization(time, self.count) {
            Some(value) => {
                self.mode = UtilizationMode::Computed;
                self.total_utilization = value;
            }
            None => {
                self.mode = UtilizationMode::Manual;
                if let Trigger::TaskChanged = trigger {
                    self.total_utilization = 0.0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CUSTOM_TASK;
    use crate::models::Role;

    fn owner() -> PublicUser {
        PublicUser {
            id: "u-1".into(),
            username: "arun".into(),
            name: "Arun".into(),
            role: Role::Standard,
            is_disabled: false,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn fixed_duration_times_count_is_rounded() {
        assert_eq!(compute_utilization(TaskTime::Fixed(0.07), Some(3)), Some(0.21));
        assert_eq!(compute_utilization(TaskTime::Fixed(0.17), Some(7)), Some(1.19));
        assert_eq!(compute_utilization(TaskTime::Fixed(0.07), None), Some(0.0));
        assert_eq!(compute_utilization(TaskTime::Runtime, Some(3)), None);
    }

    #[test]
    fn fixed_task_recomputes_on_count_change() {
        let catalog = TaskCatalog::builtin();
        let mut form = EntryForm::new(&catalog);
        form.select_task("Invoice creation");
        assert_eq!(form.mode(), UtilizationMode::Computed);
        assert_eq!(form.total_utilization(), 0.07);

        form.set_count(Some(3));
        assert_eq!(form.total_utilization(), 0.21);
    }

    #[test]
    fn fixed_task_utilization_is_read_only() {
        let catalog = TaskCatalog::builtin();
        let mut form = EntryForm::new(&catalog);
        form.select_task("Invoice creation");
        assert_eq!(form.set_utilization(2.0), Err(ValidationError::UtilizationReadOnly));
        assert_eq!(form.total_utilization(), 0.07);
    }

    #[test]
    fn selecting_runtime_task_resets_utilization() {
        let catalog = TaskCatalog::builtin();
        let mut form = EntryForm::new(&catalog);
        form.select_task(CUSTOM_TASK);
        form.set_utilization(2.5).unwrap();

        form.select_task("Meetings");
        assert_eq!(form.mode(), UtilizationMode::Manual);
        assert_eq!(form.total_utilization(), 0.0);
    }

    #[test]
    fn count_change_keeps_manual_value() {
        let catalog = TaskCatalog::builtin();
        let mut form = EntryForm::new(&catalog);
        form.select_task(CUSTOM_TASK);
        form.set_utilization(1.25).unwrap();
        form.set_count(Some(4));
        assert_eq!(form.total_utilization(), 1.25);
    }

    #[test]
    fn zero_utilization_blocks_submission_and_keeps_input() {
        let catalog = TaskCatalog::builtin();
        let mut form = EntryForm::new(&catalog);
        form.select_task(CUSTOM_TASK);
        form.set_remarks("half day");

        let err = form.submit(&owner(), today()).unwrap_err();
        assert_eq!(err, ValidationError::UtilizationNotPositive);
        assert_eq!(form.remarks(), "half day");
    }

    #[test]
    fn submission_resets_transient_fields_only() {
        let catalog = TaskCatalog::builtin();
        let mut form = EntryForm::new(&catalog);
        form.select_task("Invoice creation");
        form.set_team("Pick My Career Operations");
        form.set_frequency("Weekly");
        form.set_count(Some(3));
        form.set_remarks("batch A");

        let record = form.submit(&owner(), today()).unwrap();
        assert_eq!(record.total_utilization, 0.21);
        assert_eq!(record.count, 3);
        assert_eq!(record.remarks, "batch A");
        assert_eq!(record.user_id, "u-1");

        assert_eq!(form.task(), "Invoice creation");
        assert_eq!(form.team(), "Pick My Career Operations");
        assert_eq!(form.frequency(), "Weekly");
        assert_eq!(form.count(), Some(1));
        assert_eq!(form.remarks(), "");
        assert_eq!(form.total_utilization(), 0.07);
    }

    #[test]
    fn draft_replay_recomputes_fixed_tasks() {
        let catalog = TaskCatalog::builtin();
        let draft = RecordDraft {
            process_name: Some("Invoice creation".into()),
            team: Some("PTM".into()),
            total_utilization: Some(7.5),
            count: Some(3),
            ..Default::default()
        };
        let form = EntryForm::from_draft(&catalog, &draft);
        assert_eq!(form.mode(), UtilizationMode::Computed);
        assert_eq!(form.total_utilization(), 0.21);
    }

    #[test]
    fn draft_replay_keeps_manual_values_and_blank_fields() {
        let catalog = TaskCatalog::builtin();
        let draft = RecordDraft {
            task: Some("Something new".into()),
            total_utilization: Some(1.5),
            ..Default::default()
        };
        let mut form = EntryForm::from_draft(&catalog, &draft);
        assert_eq!(form.mode(), UtilizationMode::Manual);
        assert_eq!(form.total_utilization(), 1.5);
        assert_eq!(form.team(), "");
        assert_eq!(
            form.submit(&owner(), today()).unwrap_err(),
            ValidationError::MissingRequiredFields
        );
    }

    #[test]
    fn snapshot_reports_mode() {
        let catalog = TaskCatalog::builtin();
        let mut form = EntryForm::new(&catalog);
        form.select_task(CUSTOM_TASK);
        let json = serde_json::to_value(form.snapshot()).unwrap();
        assert_eq!(json["utilizationMode"], "manual");
        assert_eq!(json["processName"], CUSTOM_TASK);
    }

    #[test]
    fn runtime_submission_resets_to_zero() {
        let catalog = TaskCatalog::builtin();
        let mut form = EntryForm::new(&catalog);
        form.select_task(CUSTOM_TASK);
        form.set_utilization(3.5).unwrap();
        let record = form.submit(&owner(), today()).unwrap();
        assert_eq!(record.total_utilization, 3.5);
        assert_eq!(form.total_utilization(), 0.0);
        assert_eq!(form.mode(), UtilizationMode::Manual);
    }
}
