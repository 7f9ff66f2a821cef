use async_trait::async_trait;
use crate::errors::{AppError, AppResult, AuthError};
use crate::models::PublicUser;

pub const CURRENT_USER_KEY: &str = "current_user";

/// Who is at the keyboard. Transitions: LoggedOut → LoggedIn → LoggedOut.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(PublicUser),
}

impl Session {
    pub fn current_user(&self) -> AppResult<&PublicUser> {
        match self {
            Session::LoggedIn(user) => Ok(user),
            Session::LoggedOut => Err(AuthError::NotAuthenticated.into()),
        }
    }
}

/// Where a session lives between requests.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load_session(&self) -> AppResult<Session>;

    /// Persists `session`; saving `LoggedOut` discards the whole session.
    async fn save_session(&self, session: &Session) -> AppResult<()>;
}

#[async_trait]
impl SessionStore for tower_sessions::Session {
    async fn load_session(&self) -> AppResult<Session> {
        let user = self
            .get::<PublicUser>(CURRENT_USER_KEY)
            .await
            .map_err(|e| AppError::Session(e.to_string()))?;
        Ok(user.map_or(Session::LoggedOut, Session::LoggedIn))
    }

    async fn save_session(&self, session: &Session) -> AppResult<()> {
        match session {
            Session::LoggedIn(user) => self
                .insert(CURRENT_USER_KEY, user)
                .await
                .map_err(|e| AppError::Session(e.to_string())),
            // deletes the stored record too, so a replayed cookie finds nothing
            Session::LoggedOut => self
                .flush()
                .await
                .map_err(|e| AppError::Session(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user(role: Role) -> PublicUser {
        PublicUser {
            id: "u-1".into(),
            username: "deepa".into(),
            name: "Deepa".into(),
            role,
            is_disabled: false,
        }
    }

    #[test]
    fn logged_out_has_no_user() {
        assert!(matches!(
            Session::LoggedOut.current_user(),
            Err(AppError::Auth(AuthError::NotAuthenticated))
        ));
    }

    #[test]
    fn logged_in_exposes_the_cached_user() {
        let session = Session::LoggedIn(user(Role::Standard));
        assert_eq!(session.current_user().unwrap().username, "deepa");
    }

    #[tokio::test]
    async fn saving_logged_out_clears_the_cookie_session() {
        let store = std::sync::Arc::new(tower_sessions::MemoryStore::default());
        let cookie = tower_sessions::Session::new(None, store, None);

        cookie.save_session(&Session::LoggedIn(user(Role::Admin))).await.unwrap();
        assert!(matches!(cookie.load_session().await.unwrap(), Session::LoggedIn(_)));

        cookie.save_session(&Session::LoggedOut).await.unwrap();
        assert_eq!(cookie.load_session().await.unwrap(), Session::LoggedOut);
    }
}
