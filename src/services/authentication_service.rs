// src/services/authentication_service.rs
//
// Registration and credential checks. Passwords are stored as bcrypt hashes.

use std::sync::Arc;

use super::view_models::UserView;
use crate::domain::User;
use crate::error::{AppError, AppResult};
use crate::repositories::Repository;

pub struct AuthenticationService {
    repo: Arc<dyn Repository>,
    bcrypt_cost: u32,
}

impl AuthenticationService {
    pub fn new(repo: Arc<dyn Repository>, bcrypt_cost: u32) -> Self {
        Self { repo, bcrypt_cost }
    }

    /// Registers a new user under the next free id
    ///
    /// The username is trimmed here and on every lookup below.
    pub fn add_user(&self, username: &str, password: &str) -> AppResult<User> {
        let username = username.trim();
        if self.repo.get_user_by_username(username)?.is_some() {
            return Err(AppError::NameNotUnique(username.to_string()));
        }

        let password_hash = bcrypt::hash(password, self.bcrypt_cost)?;
        let user = User::new(self.repo.get_next_user_id()?, username, &password_hash)?;
        self.repo.add_user(&user)?;

        log::info!("Registered user '{}' (id {})", user.username(), user.id());
        Ok(user)
    }

    pub fn get_user(&self, username: &str) -> AppResult<UserView> {
        let username = username.trim();
        let user = self
            .repo
            .get_user_by_username(username)?
            .ok_or_else(|| AppError::UnknownUser(username.to_string()))?;

        Ok(UserView {
            user_name: user.username().to_string(),
            password: user.password().to_string(),
        })
    }

    pub fn authenticate_user(&self, username: &str, password: &str) -> AppResult<()> {
        let username = username.trim();
        let user = self
            .repo
            .get_user_by_username(username)?
            .ok_or_else(|| AppError::UnknownUser(username.to_string()))?;

        if !bcrypt::verify(password, user.password())? {
            log::warn!("Failed login for '{}'", username);
            return Err(AppError::Authentication);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MemoryRepository, MockRepository};

    // Lowest cost bcrypt accepts; keeps the tests fast
    const TEST_COST: u32 = 4;

    fn service() -> AuthenticationService {
        AuthenticationService::new(Arc::new(MemoryRepository::new()), TEST_COST)
    }

    #[test]
    fn test_add_user_hashes_password() {
        let service = service();
        let user = service.add_user("Shyamli", "pw12345").unwrap();
        assert_eq!(user.id(), 1);
        assert_ne!(user.password(), "pw12345");

        let view = service.get_user("Shyamli").unwrap();
        assert_eq!(view.user_name, "Shyamli");
        assert!(view.password.starts_with("$2"));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let service = service();
        service.add_user("Shyamli", "pw12345").unwrap();
        assert!(matches!(
            service.add_user("Shyamli", "other"),
            Err(AppError::NameNotUnique(_))
        ));
    }

    #[test]
    fn test_authenticate() {
        let service = service();
        service.add_user("Shyamli", "pw12345").unwrap();

        assert!(service.authenticate_user("Shyamli", "pw12345").is_ok());
        assert!(matches!(
            service.authenticate_user("Shyamli", "wrong"),
            Err(AppError::Authentication)
        ));
        assert!(matches!(
            service.authenticate_user("nobody", "pw12345"),
            Err(AppError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_padded_username_logs_in_as_registered() {
        let service = service();
        let user = service.add_user(" alice ", "pw12345").unwrap();
        assert_eq!(user.username(), "alice");

        assert!(service.authenticate_user(" alice ", "pw12345").is_ok());
        assert!(service.authenticate_user("alice", "pw12345").is_ok());
        assert_eq!(service.get_user(" alice ").unwrap().user_name, "alice");
    }

    #[test]
    fn test_get_unknown_user() {
        assert!(matches!(
            service().get_user("nobody"),
            Err(AppError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_taken_name_never_allocates_an_id() {
        let mut mock = MockRepository::new();
        mock.expect_get_user_by_username()
            .returning(|name| Ok(Some(User::new(9, name, "hash").unwrap())));
        mock.expect_get_next_user_id().never();
        mock.expect_add_user().never();

        let service = AuthenticationService::new(Arc::new(mock), TEST_COST);
        assert!(matches!(
            service.add_user("taken", "pw"),
            Err(AppError::NameNotUnique(_))
        ));
    }
}
