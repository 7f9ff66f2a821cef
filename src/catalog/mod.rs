//! Static lookup tables: task durations, teams and frequencies.
//!
//! The catalog is built once at startup from the builtin time-study labels
//! (plus any configured extras) and shared read-only afterwards.

mod builtin;

use serde::{Deserialize, Serialize, Serializer};

/// Name of the synthetic task always appended last; its duration is entered by hand.
pub const CUSTOM_TASK: &str = "Custom";

const RUNTIME_PHRASE: &str = "based on run time";

/// Duration of a task in decimal hours, or `Runtime` when it can only be
/// known after the fact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskTime {
    Fixed(f64),
    Runtime,
}

// Wire form: a bare number of hours, or the string "runtime".
impl Serialize for TaskTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TaskTime::Fixed(hours) => serializer.serialize_f64(*hours),
            TaskTime::Runtime => serializer.serialize_str("runtime"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskDefinition {
    pub name: String,
    pub time: TaskTime,
}

/// A raw `(name, label)` pair such as `("Invoice creation", "4 min / Invoice")`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskLabel {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeStudyRow {
    pub time: String,
    pub num: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskCatalog {
    tasks: Vec<TaskDefinition>,
    teams: Vec<String>,
    frequencies: Vec<String>,
}

impl TaskCatalog {
    /// Builtin table alone; the server always goes through `with_extra`.
    #[cfg(test)]
    pub fn builtin() -> Self {
        Self::with_extra(&[])
    }

    /// Builtin table merged with `extra`. An extra label replaces a builtin
    /// task of the same name.
    pub fn with_extra(extra: &[TaskLabel]) -> Self {
        let mut labels: Vec<(String, String)> = builtin::TASK_LABELS
            .iter()
            .map(|(name, label)| (name.to_string(), label.to_string()))
            .collect();

        for task in extra {
            match labels.iter_mut().find(|(name, _)| *name == task.name) {
                Some(entry) => entry.1 = task.label.clone(),
                None => labels.push((task.name.clone(), task.label.clone())),
            }
        }

        let mut tasks: Vec<TaskDefinition> = labels
            .into_iter()
            .filter(|(name, _)| name != CUSTOM_TASK)
            .map(|(name, label)| TaskDefinition {
                time: parse_label(&label),
                name,
            })
            .collect();
        tasks.sort_by_key(|t| t.name.to_lowercase());
        tasks.dedup_by(|a, b| a.name == b.name);
        tasks.push(TaskDefinition {
            name: CUSTOM_TASK.to_string(),
            time: TaskTime::Runtime,
        });

        Self {
            tasks,
            teams: unique_sorted(builtin::TEAMS),
            frequencies: unique_sorted(builtin::FREQUENCIES),
        }
    }

    pub fn duration(&self, task: &str) -> Option<TaskTime> {
        self.tasks.iter().find(|t| t.name == task).map(|t| t.time)
    }

    pub fn tasks(&self) -> &[TaskDefinition] {
        &self.tasks
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn frequencies(&self) -> &[String] {
        &self.frequencies
    }
}

fn unique_sorted(values: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    out.sort_by_key(|v| v.to_lowercase());
    out.dedup();
    out
}

/// Resolves a time-study label to a duration.
///
/// "Based on run time" (any case) is a runtime task. Otherwise the first
/// integer in the label is read as minutes. Labels with no number at all
/// also fall back to runtime.
pub fn parse_label(label: &str) -> TaskTime {
    if label.to_lowercase().contains(RUNTIME_PHRASE) {
        return TaskTime::Runtime;
    }

    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<u32>() {
        Ok(minutes) => TaskTime::Fixed(minutes_to_hours(minutes)),
        Err(_) => TaskTime::Runtime,
    }
}

pub fn minutes_to_hours(minutes: u32) -> f64 {
    round2(f64::from(minutes) / 60.0)
}

/// Rounds half-up at the second decimal. Inputs are non-negative hours.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Minute → decimal hour conversion table for 1..=60 minutes.
pub fn time_study() -> Vec<TimeStudyRow> {
    (1..=60u32)
        .map(|minutes| TimeStudyRow {
            time: format!("{:02}:{:02}", minutes / 60, minutes % 60),
            num: minutes_to_hours(minutes),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minute_labels_into_hours() {
        assert_eq!(parse_label("4 min / Section"), TaskTime::Fixed(0.07));
        assert_eq!(parse_label("10 min / Student"), TaskTime::Fixed(0.17));
        assert_eq!(parse_label("approx. 30 minutes, 2 people"), TaskTime::Fixed(0.5));
    }

    #[test]
    fn runtime_phrase_is_case_insensitive() {
        assert_eq!(parse_label("Based on run time"), TaskTime::Runtime);
        assert_eq!(parse_label("BASED ON RUN TIME (5 min min)"), TaskTime::Runtime);
    }

    #[test]
    fn labels_without_numbers_fall_back_to_runtime() {
        assert_eq!(parse_label("varies"), TaskTime::Runtime);
        assert_eq!(parse_label(""), TaskTime::Runtime);
    }

    #[test]
    fn custom_task_is_last_and_runtime() {
        let catalog = TaskCatalog::builtin();
        let last = catalog.tasks().last().unwrap();
        assert_eq!(last.name, CUSTOM_TASK);
        assert_eq!(last.time, TaskTime::Runtime);
        assert_eq!(catalog.tasks().iter().filter(|t| t.name == CUSTOM_TASK).count(), 1);
    }

    #[test]
    fn builtin_tasks_are_sorted_without_duplicates() {
        let catalog = TaskCatalog::builtin();
        let names: Vec<String> = catalog.tasks()[..catalog.tasks().len() - 1]
            .iter()
            .map(|t| t.name.to_lowercase())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(catalog.duration("Invoice creation"), Some(TaskTime::Fixed(0.07)));
        assert_eq!(catalog.duration("Meetings"), Some(TaskTime::Runtime));
        assert_eq!(catalog.duration("Unknown"), None);
    }

    #[test]
    fn extra_labels_override_and_extend() {
        let catalog = TaskCatalog::with_extra(&[
            TaskLabel { name: "Meetings".into(), label: "30 min / Meeting".into() },
            TaskLabel { name: "Audit".into(), label: "6 min / Audit".into() },
            TaskLabel { name: CUSTOM_TASK.into(), label: "1 min".into() },
        ]);
        assert_eq!(catalog.duration("Meetings"), Some(TaskTime::Fixed(0.5)));
        assert_eq!(catalog.duration("Audit"), Some(TaskTime::Fixed(0.1)));
        assert_eq!(catalog.duration(CUSTOM_TASK), Some(TaskTime::Runtime));
    }

    #[test]
    fn frequencies_start_with_daily() {
        let catalog = TaskCatalog::builtin();
        assert_eq!(catalog.frequencies()[0], "Daily");
        assert_eq!(catalog.teams().len(), 7);
    }

    #[test]
    fn time_study_matches_minute_conversion() {
        let rows = time_study();
        assert_eq!(rows.len(), 60);
        assert_eq!(rows[0].time, "00:01");
        assert_eq!(rows[0].num, 0.02);
        assert_eq!(rows[3].num, 0.07);
        assert_eq!(rows[29].num, 0.5);
        assert_eq!(rows[59].time, "01:00");
        assert_eq!(rows[59].num, 1.0);
    }

    #[test]
    fn task_time_serializes_as_number_or_marker() {
        assert_eq!(serde_json::to_value(TaskTime::Fixed(0.25)).unwrap(), serde_json::json!(0.25));
        assert_eq!(serde_json::to_value(TaskTime::Runtime).unwrap(), serde_json::json!("runtime"));
    }
}
