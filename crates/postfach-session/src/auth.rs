//! Login and logout

use std::fmt;
use url::Url;

use crate::error::SessionError;
use crate::form::FormSubmission;
use crate::page::Page;
use crate::portal::Portal;
use crate::Result;

pub const DEFAULT_USERNAME_FIELD: &str = "j_username";
pub const DEFAULT_PASSWORD_FIELD: &str = "j_password";

/// User name and secret for the portal login form
#[derive(Clone)]
pub struct Credentials {
    username: String,
    secret: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"***")
            .finish()
    }
}

pub struct Authenticator {
    login_url: Url,
    logout_url: Url,
    username_field: String,
    password_field: String,
}

impl Authenticator {
    pub fn new(login_url: Url, logout_url: Url) -> Self {
        Self {
            login_url,
            logout_url,
            username_field: DEFAULT_USERNAME_FIELD.to_string(),
            password_field: DEFAULT_PASSWORD_FIELD.to_string(),
        }
    }

    pub fn with_fields(mut self, username_field: &str, password_field: &str) -> Self {
        self.username_field = username_field.to_string();
        self.password_field = password_field.to_string();
        self
    }

    /// Fill in and submit the login form.
    ///
    /// Success is not verified beyond the transport; a rejected login shows
    /// up later as missing archive markup. A login form on the landing page
    /// is logged as a warning.
    pub async fn login<P: Portal + ?Sized>(
        &self,
        portal: &P,
        credentials: &Credentials,
    ) -> Result<Page> {
        let entry = portal.navigate(&self.login_url).await?;

        let mut form = FormSubmission::from_page(&entry, &self.username_field)
            .ok_or_else(|| SessionError::LoginFormMissing(entry.url.to_string()))?;
        form.set_field(&self.username_field, credentials.username());
        form.set_field(&self.password_field, credentials.secret());

        let landing = portal.submit(&form).await?;

        if FormSubmission::from_page(&landing, &self.username_field).is_some() {
            tracing::warn!(
                url = %landing.url,
                "Login form still present after submitting credentials"
            );
        }

        tracing::info!(user = %credentials.username(), "Login complete");

        Ok(landing)
    }

    pub async fn logout<P: Portal + ?Sized>(&self, portal: &P) -> Result<()> {
        portal.navigate(&self.logout_url).await?;
        tracing::info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormMethod;
    use crate::memory::{MemoryPortal, PortalRequest};

    const LOGIN_HTML: &str = r#"
        <form action="/banking/login" method="post">
          <input type="hidden" name="token" value="abc">
          <input name="j_username">
          <input type="password" name="j_password">
        </form>
    "#;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            Url::parse("https://portal.test/banking").unwrap(),
            Url::parse("https://portal.test/logout").unwrap(),
        )
    }

    #[test]
    fn test_credentials_debug_masks_secret() {
        let credentials = Credentials::new("alice", "hunter2");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("alice"));
        assert!(!printed.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_login_submits_credentials() {
        let portal = MemoryPortal::new()
            .with_page("https://portal.test/banking", LOGIN_HTML)
            .with_page("https://portal.test/banking/login", "<p>Willkommen</p>");

        let landing = authenticator()
            .login(&portal, &Credentials::new("alice", "1234"))
            .await
            .unwrap();
        assert_eq!(landing.text(), "<p>Willkommen</p>");

        let submitted = portal
            .requests()
            .into_iter()
            .find_map(|r| match r {
                PortalRequest::Submit(form) => Some(form),
                PortalRequest::Navigate(_) => None,
            })
            .unwrap();

        assert_eq!(submitted.method, FormMethod::Post);
        assert_eq!(submitted.action.as_str(), "https://portal.test/banking/login");
        assert_eq!(submitted.field("token"), Some("abc"));
        assert_eq!(submitted.field("j_username"), Some("alice"));
        assert_eq!(submitted.field("j_password"), Some("1234"));
    }

    #[tokio::test]
    async fn test_rejected_login_still_proceeds() {
        let portal = MemoryPortal::new()
            .with_page("https://portal.test/banking", LOGIN_HTML)
            .with_page("https://portal.test/banking/login", LOGIN_HTML);

        let result = authenticator()
            .login(&portal, &Credentials::new("alice", "wrong"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_without_form() {
        let portal = MemoryPortal::new().with_page("https://portal.test/banking", "<p>down</p>");

        let result = authenticator()
            .login(&portal, &Credentials::new("alice", "1234"))
            .await;
        assert!(matches!(result, Err(SessionError::LoginFormMissing(_))));
    }

    #[tokio::test]
    async fn test_logout_navigates_to_endpoint() {
        let portal = MemoryPortal::new().with_page("https://portal.test/logout", "bye");

        authenticator().logout(&portal).await.unwrap();
        assert_eq!(portal.navigation_count("https://portal.test/logout"), 1);
    }
}
