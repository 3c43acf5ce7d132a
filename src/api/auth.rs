//! Login and logout.

use super::paths;
use crate::errors::ClientError;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{LoginRequest, TokenPair};
use crate::session::TokenStore;

impl<S: TokenStore> ApiClient<S> {
    /// POST /api/auth/login/ - Exchange credentials for a token pair and store it.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let request = ApiRequest::post(paths::LOGIN).json(&LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        })?;
        let tokens: TokenPair = self.send_anonymous(&request).await?.json()?;

        self.session().sign_in(&tokens).await?;
        tracing::info!("Logged in");
        Ok(())
    }

    /// Drop the stored tokens.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.session().sign_out().await?;
        tracing::info!("Logged out");
        Ok(())
    }
}
