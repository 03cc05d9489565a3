use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use kinograph_model::{User, UserId};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn login_has_no_whitespace(login: &str) -> Result<(), ValidationError> {
    if login.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("login_whitespace")
            .with_message("Login must not contain spaces".into()));
    }
    Ok(())
}

fn birthday_not_in_future(birthday: &NaiveDate) -> Result<(), ValidationError> {
    if *birthday > Utc::now().date_naive() {
        return Err(ValidationError::new("birthday_future")
            .with_message("Birthday cannot be in the future".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUserRequest {
    pub name: Option<String>,

    #[validate(email(message = "Email should be valid"))]
    pub email: String,

    #[validate(
        length(min = 1, message = "Login must not be blank"),
        custom(function = "login_has_no_whitespace")
    )]
    pub login: String,

    #[validate(custom(function = "birthday_not_in_future"))]
    pub birthday: Option<NaiveDate>,
}

/// Partial update addressed by the `id` carried in the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub id: UserId,

    pub name: Option<String>,

    #[validate(email(message = "Email should be valid"))]
    pub email: Option<String>,

    #[validate(
        length(min = 1, message = "Login must not be blank"),
        custom(function = "login_has_no_whitespace")
    )]
    pub login: Option<String>,

    #[validate(custom(function = "birthday_not_in_future"))]
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub login: String,
    pub birthday: Option<NaiveDate>,
    pub friends: BTreeSet<UserId>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            login: user.login,
            birthday: user.birthday,
            friends: user.friends,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, login: &str) -> NewUserRequest {
        NewUserRequest {
            name: None,
            email: email.to_string(),
            login: login.to_string(),
            birthday: None,
        }
    }

    #[test]
    fn accepts_a_well_formed_request() {
        assert!(request("neo@example.com", "neo").validate().is_ok());
    }

    #[test]
    fn rejects_invalid_email() {
        assert!(request("not-an-email", "neo").validate().is_err());
    }

    #[test]
    fn rejects_login_with_whitespace() {
        assert!(request("neo@example.com", "mr anderson").validate().is_err());
        assert!(request("neo@example.com", "").validate().is_err());
    }

    #[test]
    fn rejects_future_birthday() {
        let mut req = request("neo@example.com", "neo");
        req.birthday = Some(Utc::now().date_naive() + chrono::Days::new(1));
        assert!(req.validate().is_err());
    }
}
