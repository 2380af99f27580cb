use crate::models::User;

/// Port for the authentication provider.
///
/// GeoMark only reads the session; sign-in, sign-up, and password flows
/// belong to the provider.
pub trait AuthProvider: Send + Sync {
    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    fn current_user(&self) -> Option<User>;
}
