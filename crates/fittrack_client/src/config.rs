use crate::ClientError;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_token: SecretString,
    pub user_id: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values through the
    /// provided function, so tests never mutate the process
    /// environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ClientError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api_token = get("FITTRACK_API_TOKEN")
            .ok_or_else(|| ClientError::Config("FITTRACK_API_TOKEN missing".into()))?;
        let user_id = get("FITTRACK_USER_ID")
            .ok_or_else(|| ClientError::Config("FITTRACK_USER_ID missing".into()))?;
        let base_url =
            get("FITTRACK_BASE_URL").unwrap_or_else(|| "http://localhost:8000".into());
        Ok(Self {
            api_token: SecretString::new(api_token.into()),
            user_id,
            base_url,
        })
    }
}
