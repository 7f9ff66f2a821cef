use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::errors::StoreResult;
use crate::models::{ProductionRecord, PublicUser, RecordPatch, User, UserPatch};
use super::store::{RecordStore, UserStore};

#[derive(Default)]
struct Documents {
    users: Vec<User>,
    records: Vec<ProductionRecord>,
}

/// In-process document store. Keeps insertion order; lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<Documents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<PublicUser>> {
        let docs = self.docs.read().await;
        Ok(docs
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .map(PublicUser::from))
    }

    async fn get_user(&self, id: &str) -> StoreResult<Option<PublicUser>> {
        let docs = self.docs.read().await;
        Ok(docs.users.iter().find(|u| u.id == id).map(PublicUser::from))
    }

    async fn list_users(&self) -> StoreResult<Vec<PublicUser>> {
        let docs = self.docs.read().await;
        Ok(docs.users.iter().map(PublicUser::from).collect())
    }

    async fn insert_user(&self, user: User) -> StoreResult<PublicUser> {
        let public = PublicUser::from(&user);
        self.docs.write().await.users.push(user);
        Ok(public)
    }

    async fn update_user(&self, id: &str, patch: &UserPatch) -> StoreResult<Option<PublicUser>> {
        let mut docs = self.docs.write().await;
        Ok(docs.users.iter_mut().find(|u| u.id == id).map(|user| {
            patch.apply(user);
            PublicUser::from(&*user)
        }))
    }

    async fn delete_user(&self, id: &str) -> StoreResult<bool> {
        let mut docs = self.docs.write().await;
        let before = docs.users.len();
        docs.users.retain(|u| u.id != id);
        if docs.users.len() == before {
            return Ok(false);
        }
        docs.records.retain(|r| r.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_records(&self) -> StoreResult<Vec<ProductionRecord>> {
        Ok(self.docs.read().await.records.clone())
    }

    async fn get_record(&self, id: &str) -> StoreResult<Option<ProductionRecord>> {
        let docs = self.docs.read().await;
        Ok(docs.records.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_record(&self, record: ProductionRecord) -> StoreResult<ProductionRecord> {
        self.docs.write().await.records.push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        id: &str,
        patch: &RecordPatch,
    ) -> StoreResult<Option<ProductionRecord>> {
        let mut docs = self.docs.write().await;
        Ok(docs.records.iter_mut().find(|r| r.id == id).map(|record| {
            patch.apply(record);
            record.clone()
        }))
    }

    async fn delete_record(&self, id: &str) -> StoreResult<bool> {
        let mut docs = self.docs.write().await;
        let before = docs.records.len();
        docs.records.retain(|r| r.id != id);
        Ok(docs.records.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::Role;

    fn user(id: &str, username: &str) -> User {
        User {
            id: id.into(),
            username: username.into(),
            password: "pw".into(),
            name: username.to_uppercase(),
            role: Role::Standard,
            is_disabled: false,
        }
    }

    fn record(id: &str, user_id: &str) -> ProductionRecord {
        ProductionRecord {
            id: id.into(),
            user_id: user_id.into(),
            user_name: user_id.to_uppercase(),
            process_name: "Email".into(),
            task: "Email".into(),
            team: "Pick My Career Operations".into(),
            frequency: "Daily".into(),
            total_utilization: 0.15,
            completed_date: NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
            count: 3,
            remarks: "follow-ups".into(),
        }
    }

    #[tokio::test]
    async fn inserted_record_lists_back_unchanged() {
        let store = MemoryStore::new();
        let stored = store.insert_record(record("r-1", "u-1")).await.unwrap();
        let listed = store.list_records().await.unwrap();
        assert_eq!(listed, vec![stored.clone()]);
        assert_eq!(listed[0], record("r-1", "u-1"));
    }

    #[tokio::test]
    async fn unchanged_update_is_idempotent() {
        let store = MemoryStore::new();
        store.insert_record(record("r-1", "u-1")).await.unwrap();
        let patch = RecordPatch {
            team: Some("Pick My Career Operations".into()),
            count: Some(3),
            ..Default::default()
        };
        let first = store.update_record("r-1", &patch).await.unwrap().unwrap();
        let second = store.update_record("r-1", &patch).await.unwrap().unwrap();
        assert_eq!(first, record("r-1", "u-1"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn deleting_user_cascades_to_their_records_only() {
        let store = MemoryStore::new();
        store.insert_user(user("u-1", "asha")).await.unwrap();
        store.insert_user(user("u-2", "bala")).await.unwrap();
        store.insert_record(record("r-1", "u-1")).await.unwrap();
        store.insert_record(record("r-2", "u-2")).await.unwrap();
        store.insert_record(record("r-3", "u-1")).await.unwrap();

        assert!(store.delete_user("u-1").await.unwrap());

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "u-2");
        let records = store.list_records().await.unwrap();
        assert_eq!(records, vec![record("r-2", "u-2")]);
    }

    #[tokio::test]
    async fn missing_targets_report_not_found() {
        let store = MemoryStore::new();
        assert!(!store.delete_user("nobody").await.unwrap());
        assert!(!store.delete_record("nothing").await.unwrap());
        assert!(store.update_user("nobody", &UserPatch::default()).await.unwrap().is_none());
        assert!(store
            .update_record("nothing", &RecordPatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn credentials_match_first_account_exactly() {
        let store = MemoryStore::new();
        store.insert_user(user("u-1", "asha")).await.unwrap();
        store.insert_user(user("u-2", "asha")).await.unwrap();

        let found = store.find_user_by_credentials("asha", "pw").await.unwrap().unwrap();
        assert_eq!(found.id, "u-1");
        assert!(store.find_user_by_credentials("asha", "PW").await.unwrap().is_none());
        assert!(store.find_user_by_credentials("Asha", "pw").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn user_patch_is_persisted() {
        let store = MemoryStore::new();
        store.insert_user(user("u-1", "asha")).await.unwrap();
        let patch = UserPatch { password: Some("new".into()), ..Default::default() };
        store.update_user("u-1", &patch).await.unwrap().unwrap();
        assert!(store.find_user_by_credentials("asha", "pw").await.unwrap().is_none());
        assert!(store.find_user_by_credentials("asha", "new").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn users_list_in_creation_order() {
        let store = MemoryStore::new();
        store.insert_user(user("u-2", "zara")).await.unwrap();
        store.insert_user(user("u-1", "anil")).await.unwrap();
        let ids: Vec<String> = store.list_users().await.unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["u-2", "u-1"]);
    }
}
