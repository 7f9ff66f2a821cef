// Work types as published in the time-study sheet. Labels are parsed once by
// `TaskCatalog`; anything without a leading minute figure is a runtime task.
pub(super) const TASK_LABELS: &[(&str, &str)] = &[
    ("API Queries", "5 min / Query"),
    ("Address verification", "3 min / Address"),
    ("Attendance", "2 min / Class"),
    ("Attendance Updation", "2 min / Class"),
    ("Attendance followup calls", "4 min / Call"),
    ("Batch allocation calls", "5 min / Call"),
    ("Calls", "4 min / Call"),
    ("Chat", "3 min / Chat"),
    ("Chitti offline willingness", "4 min / Call"),
    ("Class Reminders Schedule QC", "2 min / Schedule"),
    ("Course Access", "2 min / Student"),
    ("Electronics and solar one and one workshop", "Based on run time"),
    ("Email", "3 min / Email"),
    ("Followup Calls", "4 min / Call"),
    ("Gallabox Messages", "1 min / Message"),
    ("Inbound Calls", "5 min / Call"),
    ("Inbound/Outbound Calls", "5 min / Call"),
    ("Invoice creation", "4 min / Invoice"),
    ("KIT", "3 min / Kit"),
    ("Kit Changing address", "3 min / Request"),
    ("Kit Followups/Queries", "4 min / Query"),
    ("Kit Requesting address", "3 min / Request"),
    ("Live Class Quality Check", "Based on run time"),
    ("Live class Schedule check", "2 min / Class"),
    ("Makers Absentees Creation", "2 min / Student"),
    ("Makers School Onboarding", "10 min / Student"),
    ("Meeting", "Based on run time"),
    ("Meetings", "Based on run time"),
    ("One-on-one workshop", "Based on run time"),
    ("Onboarding", "10 min / Student"),
    ("Others", "Based on run time"),
    ("Overall sheet- attendance & progress", "Based on run time"),
    ("PMC Onboarding", "10 min / Student"),
    ("PTM", "15 min / Meeting"),
    ("PTM Reschedule", "3 min / Reschedule"),
    ("PTM Schedule", "3 min / Schedule"),
    ("Payments", "4 min / Payment"),
    ("Pick Mycareer Calls/Whatsapp/Email", "4 min / Contact"),
    ("Progression", "3 min / Student"),
    ("Progression Follow-up Calls", "4 min / Call"),
    ("Progression Updation", "2 min / Student"),
    ("Retention Calls", "6 min / Call"),
    ("Schedules", "3 min / Schedule"),
    ("Scheduling", "3 min / Schedule"),
    ("School -followup calls", "5 min / Call"),
    ("School Tool onboarding", "Based on run time"),
    ("Setting Workshop reminders", "2 min / Reminder"),
    ("Slack queries", "2 min / Query"),
    ("Tickets Resolving", "6 min / Ticket"),
    ("Time table", "Based on run time"),
    ("Trainer Connect", "5 min / Call"),
    ("Training", "Based on run time"),
    ("US Onboarding", "12 min / Student"),
    ("Workshop", "Based on run time"),
    ("Workshops", "Based on run time"),
    ("Young Scientist Onboarding", "10 min / Student"),
    ("calls and chats", "4 min / Contact"),
    ("certificate", "2 min / Certificate"),
];

pub(super) const TEAMS: &[&str] = &[
    "Stem Educational Program Onboarding",
    "Stem Educational Program Operations",
    "Neet/Jee Operations and Onboarding",
    "Pick My Career Onboarding",
    "Pick My Career Operations",
    "Chitti Future School Onboarding",
    "Chitti Future School Operations",
];

pub(super) const FREQUENCIES: &[&str] = &["Daily", "Weekly", "Weekend", "Monthly", "Yearly"];
