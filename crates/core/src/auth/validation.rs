use super::{AuthError, RegisterUser};

pub const PASSWORD_MIN_LEN: usize = 10;
pub const PASSWORD_MAX_LEN: usize = 100;
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;

/// Checks the `local@domain.tld` shape; no deliverability check.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(AuthError::InvalidRegistration(format!(
            "password must be {PASSWORD_MIN_LEN} to {PASSWORD_MAX_LEN} characters"
        )));
    }
    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_upper && has_lower && has_digit) {
        return Err(AuthError::InvalidRegistration(
            "password needs an uppercase letter, a lowercase letter and a digit".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), AuthError> {
    let len = username.chars().count();
    let starts_alphanumeric = username
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric());
    let allowed = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));

    if (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) && starts_alphanumeric && allowed {
        Ok(())
    } else {
        Err(AuthError::InvalidRegistration(format!(
            "invalid username '{username}'"
        )))
    }
}

/// Validates a registration and normalizes it (trimmed, lowercase email).
pub fn validate_registration(user: RegisterUser) -> Result<RegisterUser, AuthError> {
    let email = user.email.trim().to_lowercase();
    let username = user.username.trim().to_string();

    if !is_valid_email(&email) {
        return Err(AuthError::InvalidRegistration(
            "invalid email address".to_string(),
        ));
    }
    validate_username(&username)?;
    validate_password(&user.password)?;

    Ok(RegisterUser {
        email,
        username,
        password: user.password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str, username: &str, password: &str) -> RegisterUser {
        RegisterUser {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_plain_emails() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("ana.perez+site@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in [
            "",
            "ana",
            "@example.com",
            "ana@",
            "ana@example",
            "a@b@c.com",
            "a b@c.com",
            "ana@example..com",
        ] {
            assert!(!is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn password_rules() {
        assert!(validate_password("Secretpass1").is_ok());
        assert!(validate_password("Short1A").is_err());
        assert!(validate_password("alllowercase1").is_err());
        assert!(validate_password("ALLUPPERCASE1").is_err());
        assert!(validate_password("NoDigitsHere").is_err());
        assert!(validate_password(&format!("Aa1{}", "x".repeat(98))).is_err());
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("ana_perez").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("_ana").is_err());
        assert!(validate_username("ana perez").is_err());
    }

    #[test]
    fn registration_is_normalized() {
        let user = validate_registration(registration(
            " Ana@Example.COM ",
            " ana ",
            "Secretpass1",
        ))
        .unwrap();

        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.username, "ana");
    }

    #[test]
    fn registration_rejects_weak_password() {
        assert!(matches!(
            validate_registration(registration("ana@example.com", "ana", "weak")),
            Err(AuthError::InvalidRegistration(_))
        ));
    }
}
