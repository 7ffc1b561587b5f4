//! Credentials and settings read from the process environment.

use std::fmt;

use crate::{Error, Logger, Result};

pub const ENV_ORACLE_USERNAME: &str = "ORACLE_USERNAME";
pub const ENV_ORACLE_PASSWORD: &str = "ORACLE_PASSWORD";
pub const ENV_ORACLE_SERVICE_NAME: &str = "ORACLE_SERVICENAME";

pub const ENV_BUCKET_NAME: &str = "OCI_BUCKETNAME";
pub const ENV_SOURCE_REGION: &str = "OCI_SOURCE_REGION";
pub const ENV_TENANCY_NAME: &str = "OCI_TENANCY_NAME";

/// Placeholder written in place of the password when a descriptor is logged.
pub const MASK: &str = "secret";

/// The three values needed to reach the database.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub service_name: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the credentials through `lookup`, failing on the first missing name.
    ///
    /// A variable that is set to an empty string still counts as present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| lookup(name).ok_or(Error::MissingEnv(name));

        Ok(Self {
            username: require(ENV_ORACLE_USERNAME)?,
            password: require(ENV_ORACLE_PASSWORD)?,
            service_name: require(ENV_ORACLE_SERVICE_NAME)?,
        })
    }

    pub fn descriptor(self) -> ConnectDescriptor {
        ConnectDescriptor { credentials: self }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &MASK)
            .field("service_name", &self.service_name)
            .finish()
    }
}

/// Connection string of the form `username/password@service`.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectDescriptor {
    credentials: Credentials,
}

impl ConnectDescriptor {
    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    pub fn password(&self) -> &str {
        &self.credentials.password
    }

    pub fn service_name(&self) -> &str {
        &self.credentials.service_name
    }

    pub fn dsn(&self) -> String {
        format!(
            "{}/{}@{}",
            self.username(),
            self.password(),
            self.service_name()
        )
    }

    pub fn masked(&self) -> String {
        format!("{}/{}@{}", self.username(), MASK, self.service_name())
    }
}

impl fmt::Debug for ConnectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConnectDescriptor")
            .field(&self.masked())
            .finish()
    }
}

/// Reads the credentials and logs the masked descriptor.
pub fn load_descriptor<F>(lookup: F, logger: &dyn Logger) -> Result<ConnectDescriptor>
where
    F: Fn(&str) -> Option<String>,
{
    let storage = StorageSettings::from_lookup(&lookup);
    logger.debug(&format!("object storage settings: {storage:?}"));

    let descriptor = Credentials::from_lookup(lookup)?.descriptor();
    logger.info(&format!("Generated connect: {}", descriptor.masked()));

    Ok(descriptor)
}

/// Object storage settings deployed alongside the function.
///
/// They are read and logged but no code path consumes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSettings {
    pub bucket_name: Option<String>,
    pub source_region: Option<String>,
    pub tenancy_name: Option<String>,
}

impl StorageSettings {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            bucket_name: lookup(ENV_BUCKET_NAME),
            source_region: lookup(ENV_SOURCE_REGION),
            tenancy_name: lookup(ENV_TENANCY_NAME),
        }
    }
}
