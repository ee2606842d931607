//! User entity - an account with its public profile

use chrono::{DateTime, NaiveDate, Utc};

use super::AttachmentRef;
use crate::value_objects::Snowflake;

/// User account
///
/// The credential hash is never part of the entity; repositories expose it
/// separately so it cannot leak through response mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub photo: Option<AttachmentRef>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String, email: String, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            display_name,
            photo: None,
            gender: None,
            birth_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style default photo assignment used at registration
    pub fn with_photo(mut self, photo: Option<AttachmentRef>) -> Self {
        self.photo = photo;
        self
    }

    /// Apply a partial profile update
    ///
    /// Absent fields keep their current value. Returns whether anything changed.
    pub fn apply_profile(&mut self, changes: ProfileChanges) -> bool {
        let mut changed = false;

        if let Some(display_name) = changes.display_name {
            changed |= replace_if_different(&mut self.display_name, display_name);
        }
        if let Some(username) = changes.username {
            changed |= replace_if_different(&mut self.username, username);
        }
        if let Some(email) = changes.email {
            changed |= replace_if_different(&mut self.email, email);
        }
        if let Some(gender) = changes.gender {
            changed |= replace_if_different(&mut self.gender, Some(gender));
        }
        if let Some(birth_date) = changes.birth_date {
            changed |= replace_if_different(&mut self.birth_date, Some(birth_date));
        }
        if let Some(photo) = changes.photo {
            changed |= replace_if_different(&mut self.photo, Some(photo));
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

fn replace_if_different<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Partial profile update; `None` means "keep current value"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub photo: Option<AttachmentRef>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
