mod user;
mod record;
mod forms;

pub use user::{User, PublicUser, Role, NewUser, UserPatch};
pub use record::{ProductionRecord, RecordDraft, RecordPatch};
pub use forms::{LoginForm, IdPayload, Keyed, InsightsQuery};
