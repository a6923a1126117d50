use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public user snapshot — what gets embedded in access tokens and returned
/// from the API. Never carries the password digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub uuid: Uuid,
    pub name: String,
    pub email: Option<String>,
}
