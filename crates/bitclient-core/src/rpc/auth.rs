//! Credential schemes applied to outgoing RPC requests.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use reqwest::RequestBuilder;

use crate::error::ValidationError;

/// Which scheme a configured label should be presented with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthType {
    /// Label is sent verbatim as `Authorization: Bearer <label>`.
    ApiKey,
    /// Label is `username:password`, sent as HTTP Basic auth.
    Credentials,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiKey => "api-key",
            Self::Credentials => "user:password",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api-key" => Ok(Self::ApiKey),
            "user:password" => Ok(Self::Credentials),
            other => Err(ValidationError::UnsupportedAuthType(other.to_owned())),
        }
    }
}

/// Authentication built once from configuration and shared by every call.
#[derive(Clone, PartialEq, Eq)]
pub struct Authentication {
    kind: AuthType,
    label: String,
}

impl Authentication {
    pub fn new(kind: AuthType, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }

    /// Build from the textual `type`/`label` pair found in configuration.
    pub fn parse(kind: &str, label: impl Into<String>) -> Result<Self, ValidationError> {
        let auth = Self::new(kind.parse()?, label);
        auth.validate()?;
        Ok(auth)
    }

    /// Read `username:password` credentials from a bitcoind cookie file.
    pub fn from_cookie_file(path: &Path) -> Result<Self, ValidationError> {
        let cookie_error = |reason: String| ValidationError::CookieFile {
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| cookie_error(e.to_string()))?;
        let line = content
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .ok_or_else(|| cookie_error("file is empty".to_owned()))?;

        let auth = Self::new(AuthType::Credentials, line);
        auth.validate().map_err(|e| cookie_error(e.to_string()))?;
        Ok(auth)
    }

    pub fn kind(&self) -> AuthType {
        self.kind
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.label.is_empty() {
            return Err(ValidationError::EmptyAuthLabel);
        }
        if self.kind == AuthType::Credentials {
            self.credentials()?;
        }
        Ok(())
    }

    /// Username and password of a `user:password` label. The password keeps
    /// any further colons.
    pub fn credentials(&self) -> Result<(&str, &str), ValidationError> {
        let (user, pass) = self
            .label
            .split_once(':')
            .ok_or(ValidationError::MalformedCredentials)?;
        if user.is_empty() || pass.is_empty() {
            return Err(ValidationError::EmptyCredentialPart);
        }
        Ok((user, pass))
    }

    /// Apply the scheme to an outgoing request. Touches headers only.
    pub fn setup(&self, builder: RequestBuilder) -> Result<RequestBuilder, ValidationError> {
        self.validate()?;
        match self.kind {
            AuthType::ApiKey => Ok(builder.bearer_auth(&self.label)),
            AuthType::Credentials => {
                let (user, pass) = self.credentials()?;
                Ok(builder.basic_auth(user, Some(pass)))
            }
        }
    }
}

// The label is a secret; keep it out of logs.
impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authentication")
            .field("kind", &self.kind)
            .field("label", &"<redacted>")
            .finish()
    }
}
