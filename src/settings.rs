//! Settings Form Rules
//!
//! Client-side shaping and checks for the profile and security forms.

use crate::error::FieldErrors;
use crate::models::{PasswordUpdate, ProfileUpdate, User};

/// Split a full name at the first space. With no remainder the first name
/// doubles as the surname, which the backend requires.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(' ') {
        Some((first, rest)) if !rest.trim().is_empty() => (first.to_string(), rest.trim().to_string()),
        Some((first, _)) => (first.to_string(), first.to_string()),
        None => (trimmed.to_string(), trimmed.to_string()),
    }
}

pub fn profile_update(full_name: &str, email: &str) -> Result<ProfileUpdate, FieldErrors> {
    let (name, surname) = split_full_name(full_name);
    if name.is_empty() {
        return Err(FieldErrors::single("name", "Name is required."));
    }
    Ok(ProfileUpdate {
        name,
        surname,
        email: email.trim().to_string(),
    })
}

/// Session user after a save the backend only acknowledged
pub fn apply_profile_update(user: &User, update: &ProfileUpdate) -> User {
    let name = if update.surname == update.name {
        update.name.clone()
    } else {
        format!("{} {}", update.name, update.surname)
    };
    User {
        id: user.id.clone(),
        name,
        email: update.email.clone(),
    }
}

/// New password and confirmation must match before anything is sent
pub fn password_update(current: &str, new: &str, confirm: &str) -> Result<PasswordUpdate, String> {
    if new != confirm {
        return Err("New passwords do not match".to_string());
    }
    Ok(PasswordUpdate {
        old_password: current.to_string(),
        password: new.to_string(),
        password_confirm: confirm.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_full_name() {
        assert_eq!(split_full_name("Ada King Lovelace"), ("Ada".to_string(), "King Lovelace".to_string()));
        assert_eq!(split_full_name("  Ada  "), ("Ada".to_string(), "Ada".to_string()));
        assert_eq!(split_full_name("Ada "), ("Ada".to_string(), "Ada".to_string()));
    }

    #[test]
    fn test_profile_update_trims_email() {
        let update = profile_update("Grace Hopper", "  grace@example.com ").unwrap();
        assert_eq!(update.surname, "Hopper");
        assert_eq!(update.email, "grace@example.com");
        assert!(profile_update("   ", "x@example.com").is_err());
    }

    #[test]
    fn test_acknowledged_save_updates_session_user() {
        let user = User {
            id: "u1".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        };
        let renamed = apply_profile_update(&user, &profile_update("Ada King Lovelace", "ada@king.example").unwrap());
        assert_eq!(renamed.id, "u1");
        assert_eq!(renamed.name, "Ada King Lovelace");
        assert_eq!(renamed.email, "ada@king.example");

        let single = apply_profile_update(&user, &profile_update("Ada", "ada@example.com").unwrap());
        assert_eq!(single.name, "Ada");
    }

    #[test]
    fn test_password_confirmation_must_match() {
        assert_eq!(password_update("old", "new-1", "new-2").unwrap_err(), "New passwords do not match");
        let update = password_update("old", "new-1", "new-1").unwrap();
        assert_eq!(update.old_password, "old");
    }
}
