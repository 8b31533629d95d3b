//! Authentication view model

use std::sync::Arc;

use vlogsnap_core::validation::{validate_credentials, validate_registration};
use vlogsnap_core::{format_count, Credentials, Registration, SessionStore, UserPatch};

use super::Notice;

/// Sign-up screen fields
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub registration: Registration,
    pub confirm_password: String,
}

/// Profile header with display-ready counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub followers: String,
    pub following: String,
    pub videos: String,
}

pub struct AuthViewModel {
    session: Arc<SessionStore>,
}

impl AuthViewModel {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    pub async fn login(&self, email: &str, password: &str) -> Notice {
        if let Err(e) = validate_credentials(&Credentials::new(email, password)) {
            return Notice::error(e.to_string());
        }

        if !self.session.login(email, password).await {
            return Notice::error("Invalid email or password");
        }

        match self.session.user() {
            Some(user) => Notice::success(format!("Welcome back, {}!", user.full_name)),
            None => Notice::error("Invalid email or password"),
        }
    }

    pub async fn register(&self, form: RegisterForm) -> Notice {
        if let Err(e) = validate_registration(&form.registration, &form.confirm_password) {
            return Notice::error(e.to_string());
        }

        if self.session.register(form.registration).await {
            Notice::success("Your account has been created successfully!")
        } else {
            Notice::error("Registration failed. Please try again.")
        }
    }

    pub fn logout(&self) -> Notice {
        self.session.logout();
        Notice::success("Signed out")
    }

    pub fn update_bio(&self, bio: &str) -> Notice {
        if !self.session.is_authenticated() {
            return Notice::error("Please log in first");
        }
        self.session.update_user(UserPatch::bio(bio.trim()));
        Notice::success("Profile updated")
    }

    pub fn profile(&self) -> Option<ProfileView> {
        let user = self.session.user()?;
        Some(ProfileView {
            followers: format_count(user.followers),
            following: format_count(user.following),
            videos: format_count(user.videos),
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            bio: user.bio,
        })
    }
}
