use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::user_repository::UserRow;
use crate::domain::users::Role;

/// Public view of a user record together with its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    pub id: Uuid,
    pub email: String,
    pub user_name: String,
    pub role: Role,
}

impl From<UserRow> for ProfileUser {
    fn from(row: UserRow) -> Self {
        ProfileUser {
            id: row.id,
            email: row.email,
            user_name: row.user_name,
            role: row.role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserNameAvailabilityDto {
    pub user_name: String,
    pub exists: bool,
}
