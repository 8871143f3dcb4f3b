use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public projection of a user identity, as exposed when a comment's
/// user reference is expanded. Credentials and private fields never
/// leave the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub name: String,
}
