use once_cell::sync::Lazy;
use tracing::{debug, info, instrument};

use crate::api::simulate_latency;
use crate::auth::auth::Session;
use crate::config::Config;
use crate::error::ServiceError;
use crate::model::role::Role;
use crate::models::{LoginRequest, MockUser};

/// The demo credential list. In a real deployment this would come from an
/// identity provider; here it is the whole user database.
static MOCK_USERS: Lazy<Vec<MockUser>> = Lazy::new(|| {
    vec![
        MockUser {
            id: 1,
            email: "admin@salarybox.com",
            password: "admin123",
            name: "Admin User",
            role: Role::Admin,
            employee_id: None,
        },
        MockUser {
            id: 2,
            email: "employee@salarybox.com",
            password: "employee123",
            name: "John Employee",
            role: Role::Employee,
            employee_id: Some(2),
        },
    ]
});

#[instrument(name = "auth_login", skip(config, request), fields(email = %request.email))]
pub async fn login(config: &Config, request: &LoginRequest) -> Result<Session, ServiceError> {
    info!("Login request received");

    // 1️⃣ basic validation
    if request.email.trim().is_empty() || request.password.is_empty() {
        info!("Validation failed: empty email or password");
        return Err(ServiceError::validation("email and password are required"));
    }

    simulate_latency(config).await;

    // 2️⃣ find user in the credential list
    debug!("Looking up user");
    let user = MOCK_USERS
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(request.email.trim()))
        .ok_or_else(|| {
            info!("Invalid credentials: user not found");
            ServiceError::Unauthorized
        })?;

    // 3️⃣ verify password (plain comparison; this is mock auth)
    if user.password != request.password {
        info!("Invalid credentials: password mismatch");
        return Err(ServiceError::Unauthorized);
    }

    info!(user_id = user.id, "Login successful");

    // 4️⃣ session omits the password
    Ok(Session {
        user_id: user.id,
        name: user.name.to_string(),
        email: user.email.to_string(),
        role: user.role,
        employee_id: user.employee_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_return_a_session() {
        let config = Config::for_tests();
        let session = login(&config, &request("employee@salarybox.com", "employee123"))
            .await
            .unwrap();

        assert_eq!(session.user_id, 2);
        assert_eq!(session.role, Role::Employee);
        assert_eq!(session.employee_id, Some(2));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let config = Config::for_tests();
        let err = login(&config, &request("admin@salarybox.com", "nope"))
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::Unauthorized);
    }

    #[tokio::test]
    async fn unknown_user_is_unauthorized() {
        let config = Config::for_tests();
        let err = login(&config, &request("ghost@salarybox.com", "admin123"))
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::Unauthorized);
    }

    #[tokio::test]
    async fn empty_fields_fail_validation() {
        let config = Config::for_tests();
        let err = login(&config, &request("", "")).await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
