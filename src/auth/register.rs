use axum::{debug_handler, extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::{
    config::SharedConfig,
    models::user::{Role, UserProfile},
    store::SharedStore,
    AppError, AppResult, AppState,
};

use super::{create_user, find_by_email, valid_phone, Signup};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
    #[serde(default)]
    agreed_to_terms: bool,
}

impl RegisterForm {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(AppError::validation("Please fill all required fields"));
        }
        if !self.email.contains('@') {
            return Err(AppError::validation("Please enter a valid email address"));
        }
        if self.password != self.confirm_password {
            return Err(AppError::validation("Passwords do not match!"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::validation("Password must be at least 6 characters long"));
        }
        let phone = self.phone.trim();
        if !phone.is_empty() && !valid_phone(phone) {
            return Err(AppError::validation("Please enter a valid 10-digit phone number"));
        }
        if !self.agreed_to_terms {
            return Err(AppError::validation("Please accept the Terms and Conditions"));
        }
        Ok(())
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn register(
    State(store): State<SharedStore>,
    State(config): State<SharedConfig>,
    Json(form): Json<RegisterForm>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    form.validate()?;

    if find_by_email(&*store, &form.email).await?.is_some() {
        return Err(AppError::conflict("Email already registered. Please login instead."));
    }

    let signup = Signup {
        name: &form.name,
        email: &form.email,
        phone: &form.phone,
        password: &form.password,
        role: Role::User,
    };
    let user = create_user(&*store, signup, config.bcrypt_cost).await?;

    Ok((StatusCode::CREATED, Json(UserProfile::from(&user))))
}
