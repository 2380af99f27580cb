use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned by the authentication provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

/// The signed-in user as reported by the authentication provider.
///
/// GeoMark only reads this; session lifecycle belongs to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
}
