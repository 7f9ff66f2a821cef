use async_trait::async_trait;
use crate::errors::StoreResult;
use crate::models::{ProductionRecord, PublicUser, RecordPatch, User, UserPatch};

/// Account persistence. Nothing that leaves this trait carries a password.
///
/// Operations are independent; there is no multi-document atomicity and
/// concurrent writers are resolved by the backend's write order.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// First account whose username and password both match exactly.
    async fn find_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<PublicUser>>;

    async fn get_user(&self, id: &str) -> StoreResult<Option<PublicUser>>;

    async fn list_users(&self) -> StoreResult<Vec<PublicUser>>;

    async fn insert_user(&self, user: User) -> StoreResult<PublicUser>;

    async fn update_user(&self, id: &str, patch: &UserPatch) -> StoreResult<Option<PublicUser>>;

    /// Removes the account and every record whose `user_id` is `id`.
    /// Returns false when no such account existed.
    async fn delete_user(&self, id: &str) -> StoreResult<bool>;
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_records(&self) -> StoreResult<Vec<ProductionRecord>>;

    async fn get_record(&self, id: &str) -> StoreResult<Option<ProductionRecord>>;

    async fn insert_record(&self, record: ProductionRecord) -> StoreResult<ProductionRecord>;

    async fn update_record(
        &self,
        id: &str,
        patch: &RecordPatch,
    ) -> StoreResult<Option<ProductionRecord>>;

    async fn delete_record(&self, id: &str) -> StoreResult<bool>;
}

pub trait Store: UserStore + RecordStore {}

impl<T: UserStore + RecordStore> Store for T {}
