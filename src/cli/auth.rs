use anyhow::Context;
use clap::Args;

use crate::config::Config;
use crate::services::validation::{into_result, validate_login, validate_sign_up};
use crate::services::SessionStore;
use crate::types::{DishhubError, LoginForm, SignUpForm};

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Args)]
pub struct SignUpArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

impl LoginArgs {
    fn form(&self) -> LoginForm {
        LoginForm {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        }
    }

    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let form = self.form();
        into_result(validate_login(&form))?;

        let client = super::client_for(config)?;
        let session = super::runtime()?
            .block_on(client.login(&form))
            .context("login failed")?;

        let store = SessionStore::new()?;
        store.save(&session)?;
        println!("Logged in as {}.", session.username);
        Ok(())
    }
}

impl SignUpArgs {
    fn form(&self) -> SignUpForm {
        SignUpForm {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }

    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let store = SessionStore::new()?;
        ensure_logged_out(&store)?;

        let form = self.form();
        into_result(validate_sign_up(&form))?;

        let client = super::client_for(config)?;
        super::runtime()?
            .block_on(client.register(&form))
            .context("sign-up failed")?;

        println!("Account {} created. Log in with `dishhub-admin login`.", form.username);
        Ok(())
    }
}

/// Sign-up is only offered to visitors without a session
fn ensure_logged_out(store: &SessionStore) -> crate::types::Result<()> {
    match store.load()? {
        Some(session) => Err(DishhubError::Session(format!(
            "already logged in as {}; open the dashboard or log out first",
            session.username
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Session;
    use chrono::Utc;
    use tempfile::TempDir;

    fn make_sign_up_args(email: &str) -> SignUpArgs {
        SignUpArgs {
            first_name: " Ada ".into(),
            last_name: "Lovelace".into(),
            username: "ada ".into(),
            email: email.into(),
            password: "secret1".into(),
        }
    }

    #[test]
    fn test_ensure_logged_out_without_session() {
        let temp = TempDir::new().unwrap();
        let store = SessionStore::with_dir(temp.path().to_path_buf());
        assert!(ensure_logged_out(&store).is_ok());
    }

    #[test]
    fn test_ensure_logged_out_refuses_active_session() {
        let temp = TempDir::new().unwrap();
        let store = SessionStore::with_dir(temp.path().to_path_buf());
        store
            .save(&Session {
                username: "admin".into(),
                token: None,
                logged_in_at: Utc::now(),
            })
            .unwrap();

        let err = ensure_logged_out(&store).unwrap_err();
        assert!(matches!(err, DishhubError::Session(_)));
        assert!(err.to_string().contains("admin"));
    }

    #[test]
    fn test_sign_up_form_trims_fields() {
        let form = make_sign_up_args("ada@dishhub.test").form();
        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.username, "ada");
        assert!(validate_sign_up(&form).is_empty());
    }

    #[test]
    fn test_sign_up_form_keeps_password_verbatim() {
        let mut args = make_sign_up_args("ada@dishhub.test");
        args.password = " secret ".into();
        assert_eq!(args.form().password, " secret ");
    }

    #[test]
    fn test_login_form_invalid_before_network() {
        let args = LoginArgs {
            username: "   ".into(),
            password: "123".into(),
        };
        let err = into_result(validate_login(&args.form())).unwrap_err();
        assert!(matches!(err, DishhubError::Validation(_)));
    }
}
