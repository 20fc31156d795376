use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "user";

/// Row view of a user as the service layer needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub user_type: String,
}

/// Insert payload for a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub phone: String,
    pub email: String,
    pub user_type: String,
}

/// Profile fields submitted by add-profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub dob: String,
    pub profile_photo: String,
}

/// User joined with profile. Profile fields are empty until add-profile runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i32,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub dob: String,
    pub profile_photo: String,
}
