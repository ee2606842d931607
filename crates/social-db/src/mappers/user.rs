//! User entity <-> model mapper

use social_core::entities::{AttachmentRef, User};
use social_core::value_objects::Snowflake;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            display_name: model.display_name,
            photo: model.photo.map(AttachmentRef::new),
            gender: model.gender,
            birth_date: model.birth_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
