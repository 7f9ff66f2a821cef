use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged unit of work. `process_name` and `task` always carry the same
/// value; both are kept for older readers of the data.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub process_name: String,
    pub task: String,
    pub team: String,
    pub frequency: String,
    pub total_utilization: f64,
    pub completed_date: NaiveDate,
    pub count: u32,
    #[serde(default)]
    pub remarks: String,
}

/// A submission as typed into the entry form, before validation.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    pub process_name: Option<String>,
    pub task: Option<String>,
    pub team: Option<String>,
    pub frequency: Option<String>,
    pub total_utilization: Option<f64>,
    pub completed_date: Option<NaiveDate>,
    pub count: Option<i64>,
    pub remarks: Option<String>,
}

impl RecordDraft {
    /// The task name, whichever of the two fields carried it.
    pub fn task_name(&self) -> Option<&str> {
        self.process_name
            .as_deref()
            .or(self.task.as_deref())
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    pub process_name: Option<String>,
    pub task: Option<String>,
    pub team: Option<String>,
    pub frequency: Option<String>,
    pub total_utilization: Option<f64>,
    pub completed_date: Option<NaiveDate>,
    pub count: Option<i64>,
    pub remarks: Option<String>,
}

impl RecordPatch {
    pub fn task_name(&self) -> Option<&str> {
        self.process_name
            .as_deref()
            .or(self.task.as_deref())
    }

    /// Writes the present fields onto `record`. Callers validate first, so a
    /// count that does not fit is left untouched.
    pub fn apply(&self, record: &mut ProductionRecord) {
        if let Some(task) = self.task_name() {
            record.process_name = task.to_string();
            record.task = task.to_string();
        }
        if let Some(team) = &self.team {
            record.team = team.clone();
        }
        if let Some(frequency) = &self.frequency {
            record.frequency = frequency.clone();
        }
        if let Some(total_utilization) = self.total_utilization {
            record.total_utilization = total_utilization;
        }
        if let Some(completed_date) = self.completed_date {
            record.completed_date = completed_date;
        }
        if let Some(count) = self.count.and_then(|c| u32::try_from(c).ok()) {
            record.count = count;
        }
        if let Some(remarks) = &self.remarks {
            record.remarks = remarks.clone();
        }
    }
}
