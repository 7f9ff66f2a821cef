use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use crate::errors::StoreResult;
use crate::models::{ProductionRecord, PublicUser, RecordPatch, User, UserPatch};
use super::store::{RecordStore, UserStore};

// Each collection is one hash: field = document id, value = JSON document.
const USERS_KEY: &str = "users";
const RECORDS_KEY: &str = "records";
// User ids in creation order. Hash field order is arbitrary, and credential
// lookup and listings go by first-created.
const USER_ORDER_KEY: &str = "users:order";

pub struct RedisStore {
    client: Arc<Client>,
}

impl RedisStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    async fn connection(&self) -> StoreResult<redis::aio::Connection> {
        Ok(self.client.get_async_connection().await?)
    }

    async fn all<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Vec<T>> {
        let mut conn = self.connection().await?;
        let values: Vec<String> = conn.hvals(key).await?;
        values
            .iter()
            .map(|v| serde_json::from_str(v).map_err(Into::into))
            .collect()
    }

    async fn one<T: DeserializeOwned>(&self, key: &str, id: &str) -> StoreResult<Option<T>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.hget(key, id).await?;
        Ok(value.map(|v| serde_json::from_str(&v)).transpose()?)
    }

    async fn put<T: serde::Serialize>(&self, key: &str, id: &str, doc: &T) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.hset(key, id, serde_json::to_string(doc)?).await?;
        Ok(())
    }

    async fn users_in_order(&self) -> StoreResult<Vec<User>> {
        let mut conn = self.connection().await?;
        let order: Vec<String> = conn.lrange(USER_ORDER_KEY, 0, -1).await?;
        let docs: HashMap<String, String> = conn.hgetall(USERS_KEY).await?;
        in_creation_order(&order, docs)
            .iter()
            .map(|v| serde_json::from_str(v).map_err(Into::into))
            .collect()
    }

    async fn remove(&self, key: &str, id: &str) -> StoreResult<bool> {
        let mut conn = self.connection().await?;
        let removed: i64 = conn.hdel(key, id).await?;
        Ok(removed > 0)
    }
}

#[async_trait]
impl UserStore for RedisStore {
    async fn find_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<PublicUser>> {
        let users = self.users_in_order().await?;
        Ok(users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .map(PublicUser::from))
    }

    async fn get_user(&self, id: &str) -> StoreResult<Option<PublicUser>> {
        let user: Option<User> = self.one(USERS_KEY, id).await?;
        Ok(user.map(PublicUser::from))
    }

    async fn list_users(&self) -> StoreResult<Vec<PublicUser>> {
        let users = self.users_in_order().await?;
        Ok(users.iter().map(PublicUser::from).collect())
    }

    async fn insert_user(&self, user: User) -> StoreResult<PublicUser> {
        let mut conn = self.connection().await?;
        let added: i64 = conn.hset(USERS_KEY, &user.id, serde_json::to_string(&user)?).await?;
        if added > 0 {
            let _: i64 = conn.rpush(USER_ORDER_KEY, &user.id).await?;
        }
        Ok(PublicUser::from(&user))
    }

    async fn update_user(&self, id: &str, patch: &UserPatch) -> StoreResult<Option<PublicUser>> {
        let Some(mut user) = self.one::<User>(USERS_KEY, id).await? else {
            return Ok(None);
        };
        patch.apply(&mut user);
        self.put(USERS_KEY, id, &user).await?;
        Ok(Some(PublicUser::from(&user)))
    }

    async fn delete_user(&self, id: &str) -> StoreResult<bool> {
        if !self.remove(USERS_KEY, id).await? {
            return Ok(false);
        }
        let mut conn = self.connection().await?;
        let _: i64 = conn.lrem(USER_ORDER_KEY, 0, id).await?;

        let records: Vec<ProductionRecord> = self.all(RECORDS_KEY).await?;
        let owned: Vec<String> = records
            .into_iter()
            .filter(|r| r.user_id == id)
            .map(|r| r.id)
            .collect();
        if !owned.is_empty() {
            tracing::debug!("Removing {} records owned by {}", owned.len(), id);
            let _: i64 = conn.hdel(RECORDS_KEY, owned).await?;
        }
        Ok(true)
    }
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn list_records(&self) -> StoreResult<Vec<ProductionRecord>> {
        self.all(RECORDS_KEY).await
    }

    async fn get_record(&self, id: &str) -> StoreResult<Option<ProductionRecord>> {
        self.one(RECORDS_KEY, id).await
    }

    async fn insert_record(&self, record: ProductionRecord) -> StoreResult<ProductionRecord> {
        self.put(RECORDS_KEY, &record.id, &record).await?;
        Ok(record)
    }

    async fn update_record(
        &self,
        id: &str,
        patch: &RecordPatch,
    ) -> StoreResult<Option<ProductionRecord>> {
        let Some(mut record) = self.one::<ProductionRecord>(RECORDS_KEY, id).await? else {
            return Ok(None);
        };
        patch.apply(&mut record);
        self.put(RECORDS_KEY, id, &record).await?;
        Ok(Some(record))
    }

    async fn delete_record(&self, id: &str) -> StoreResult<bool> {
        self.remove(RECORDS_KEY, id).await
    }
}

/// Documents listed in `order` first, in that order; any others (written
/// before the order list existed) follow sorted by id.
fn in_creation_order(order: &[String], mut docs: HashMap<String, String>) -> Vec<String> {
    let mut out: Vec<String> = order.iter().filter_map(|id| docs.remove(id)).collect();
    let mut rest: Vec<(String, String)> = docs.into_iter().collect();
    rest.sort();
    out.extend(rest.into_iter().map(|(_, doc)| doc));
    out
}
