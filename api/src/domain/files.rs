use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Destination folder for uploads under the uploads root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UploadFolder {
    Profile,
    Post,
    Feed,
    Department,
}

impl UploadFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadFolder::Profile => "profile",
            UploadFolder::Post => "post",
            UploadFolder::Feed => "feed",
            UploadFolder::Department => "department",
        }
    }
}
