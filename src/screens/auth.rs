use crate::{
    entities::Credential,
    error::INVALID_CREDENTIAL,
    external::Authenticator,
    screens::{Screen, Toast},
};

#[derive(Clone, Debug, PartialEq)]
pub enum AuthOutcome {
    /// Signed in; the app moves on to `next`.
    SignedIn { credential: Credential, next: Screen },
    Rejected(Toast),
}

#[derive(Clone, Debug, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    #[tracing::instrument(skip(self, auth), fields(email = %self.email))]
    pub async fn submit(&self, auth: &dyn Authenticator) -> AuthOutcome {
        if self.email.is_empty() || self.password.is_empty() {
            return AuthOutcome::Rejected(Toast::short("Please enter email and password"));
        }

        match auth.sign_in(&self.email, &self.password).await {
            Ok(credential) => {
                tracing::info!(user_id = %credential.user_id, "signed in");
                AuthOutcome::SignedIn {
                    credential,
                    next: Screen::Home,
                }
            }
            Err(err) => {
                tracing::info!("sign in failed: {}", err);

                let message = match err.code {
                    INVALID_CREDENTIAL => "Invalid credentials",
                    _ => "Sign in failed. Please try again.",
                };

                AuthOutcome::Rejected(Toast::long(message))
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    #[tracing::instrument(skip(self, auth), fields(email = %self.email))]
    pub async fn submit(&self, auth: &dyn Authenticator) -> AuthOutcome {
        if self.email.is_empty() || self.password.is_empty() || self.full_name.is_empty() {
            return AuthOutcome::Rejected(Toast::long("Please enter all the details"));
        }

        if self.password != self.confirm_password {
            return AuthOutcome::Rejected(Toast::long("Passwords do not match"));
        }

        match auth.sign_up(&self.email, &self.password).await {
            Ok(credential) => {
                tracing::info!(user_id = %credential.user_id, "account created");
                AuthOutcome::SignedIn {
                    credential,
                    next: Screen::Home,
                }
            }
            Err(err) => {
                tracing::info!("sign up failed: {}", err);
                AuthOutcome::Rejected(Toast::long(err.message))
            }
        }
    }
}
