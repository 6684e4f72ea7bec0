//! Session storage port definition.

use crate::domain::entities::SessionUser;
use crate::domain::errors::SessionError;

/// Port for session persistence (the current-user record).
///
/// Read once at startup; the core never writes to it after that. Seeding
/// happens out of band (login is not this client's concern).
pub trait SessionStorePort: Send + Sync {
    /// Retrieves the stored session, if any.
    fn load(&self) -> Result<Option<SessionUser>, SessionError>;

    /// Stores the session record.
    fn store(&self, session: &SessionUser) -> Result<(), SessionError>;

    /// Deletes the stored session.
    fn clear(&self) -> Result<(), SessionError>;
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::mock::MockSessionStore;
    use super::*;
    use crate::domain::entities::UserRole;

    #[test]
    fn test_port_round_trip_through_trait_object() {
        let store: Arc<dyn SessionStorePort> =
            Arc::new(MockSessionStore::with_session(SessionUser::new(
                UserRole::Employee,
                "employee@test.tld",
            )));

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.email, "employee@test.tld");

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        store
            .store(&SessionUser::new(UserRole::Admin, "admin@test.tld"))
            .unwrap();
        assert_eq!(store.load().unwrap().unwrap().role, UserRole::Admin);
    }
}
