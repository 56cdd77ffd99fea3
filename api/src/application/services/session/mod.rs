use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::users::ProfileUser;

/// Authentication state as seen by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub is_logged_in: bool,
    pub user: Option<ProfileUser>,
}

impl SessionState {
    pub fn from_profile(user: Option<ProfileUser>) -> Self {
        Self {
            is_logged_in: user.is_some(),
            user,
        }
    }
}

pub fn is_logged_in(state: &SessionState) -> bool {
    state.is_logged_in
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::Role;
    use uuid::Uuid;

    fn profile() -> ProfileUser {
        ProfileUser {
            id: Uuid::new_v4(),
            email: "dev@example.com".into(),
            user_name: "dev".into(),
            role: Role::User,
        }
    }

    #[test]
    fn selector_returns_field_verbatim() {
        for flag in [true, false] {
            let state = SessionState {
                is_logged_in: flag,
                user: None,
            };
            assert_eq!(is_logged_in(&state), flag);
        }
        let odd = SessionState {
            is_logged_in: false,
            user: Some(profile()),
        };
        assert!(!is_logged_in(&odd));
    }

    #[test]
    fn from_profile_tracks_presence() {
        assert!(is_logged_in(&SessionState::from_profile(Some(profile()))));
        assert!(!is_logged_in(&SessionState::from_profile(None)));
        assert_eq!(SessionState::from_profile(None), SessionState::default());
    }
}
