//! Process settings loaded via OrthoConfig.
//!
//! Values come from `BLOGLIST_*` environment variables, configuration files
//! and command-line flags, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use bloglist::outbound::security::{BCRYPT_COST_RANGE, DEFAULT_BCRYPT_COST};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3003";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 1;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("missing required setting: {name}")]
    Missing { name: &'static str },
    #[error("invalid value for {name}='{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the blog list server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOGLIST")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Secret used to sign bearer tokens.
    pub token_secret: Option<String>,
    /// Bearer token lifetime in hours.
    pub token_ttl_hours: Option<i64>,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(SettingsError::Missing { name })
}

impl AppSettings {
    /// Listen address, defaulting to `0.0.0.0:3003`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::Invalid {
            name: "bind_addr",
            value: raw.to_owned(),
            reason: err.to_string(),
        })
    }

    pub fn database_url(&self) -> Result<&str, SettingsError> {
        required(self.database_url.as_deref(), "database_url")
    }

    pub fn token_secret(&self) -> Result<&str, SettingsError> {
        required(self.token_secret.as_deref(), "token_secret")
    }

    /// Token lifetime, defaulting to one hour. Must be positive.
    pub fn token_ttl(&self) -> Result<TimeDelta, SettingsError> {
        let hours = self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        TimeDelta::try_hours(hours)
            .filter(|ttl| *ttl > TimeDelta::zero())
            .ok_or_else(|| SettingsError::Invalid {
                name: "token_ttl_hours",
                value: hours.to_string(),
                reason: "expected a positive number of hours".to_owned(),
            })
    }

    /// bcrypt work factor, defaulting to 10. Must lie within 4..=31.
    pub fn bcrypt_cost(&self) -> Result<u32, SettingsError> {
        let cost = self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST);
        if BCRYPT_COST_RANGE.contains(&cost) {
            Ok(cost)
        } else {
            Err(SettingsError::Invalid {
                name: "bcrypt_cost",
                value: cost.to_string(),
                reason: format!(
                    "expected a value between {} and {}",
                    BCRYPT_COST_RANGE.start(),
                    BCRYPT_COST_RANGE.end()
                ),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "BLOGLIST_BIND_ADDR",
        "BLOGLIST_DATABASE_URL",
        "BLOGLIST_TOKEN_SECRET",
        "BLOGLIST_TOKEN_TTL_HOURS",
        "BLOGLIST_BCRYPT_COST",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("bloglist")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(DEFAULT_BIND_ADDR.parse().expect("valid default"))
        );
        assert_eq!(settings.token_ttl(), Ok(TimeDelta::hours(1)));
        assert_eq!(settings.bcrypt_cost(), Ok(DEFAULT_BCRYPT_COST));
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::Missing {
                name: "database_url"
            })
        );
        assert_eq!(
            settings.token_secret(),
            Err(SettingsError::Missing {
                name: "token_secret"
            })
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BLOGLIST_BIND_ADDR", Some("127.0.0.1:8080".to_owned())),
            (
                "BLOGLIST_DATABASE_URL",
                Some("postgres://localhost/bloglist".to_owned()),
            ),
            ("BLOGLIST_TOKEN_SECRET", Some("sekret".to_owned())),
            ("BLOGLIST_TOKEN_TTL_HOURS", Some("24".to_owned())),
            ("BLOGLIST_BCRYPT_COST", Some("12".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok("127.0.0.1:8080".parse().expect("valid addr"))
        );
        assert_eq!(settings.database_url(), Ok("postgres://localhost/bloglist"));
        assert_eq!(settings.token_secret(), Ok("sekret"));
        assert_eq!(settings.token_ttl(), Ok(TimeDelta::hours(24)));
        assert_eq!(settings.bcrypt_cost(), Ok(12));
    }

    #[rstest]
    #[case(Some("0"))]
    #[case(Some("-3"))]
    fn non_positive_ttl_is_rejected(#[case] hours: Option<&str>) {
        let mut vars = VARS.map(|name| (name, None::<String>));
        vars[3].1 = hours.map(str::to_owned);
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.token_ttl(),
            Err(SettingsError::Invalid {
                name: "token_ttl_hours",
                ..
            })
        ));
    }

    #[rstest]
    #[case("3")]
    #[case("32")]
    fn out_of_range_bcrypt_cost_is_rejected(#[case] cost: &str) {
        let mut vars = VARS.map(|name| (name, None::<String>));
        vars[4].1 = Some(cost.to_owned());
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bcrypt_cost(),
            Err(SettingsError::Invalid {
                name: "bcrypt_cost",
                value: cost.to_owned(),
                reason: "expected a value between 4 and 31".to_owned(),
            })
        );
    }

    #[rstest]
    fn malformed_bind_addr_is_rejected() {
        let mut vars = VARS.map(|name| (name, None::<String>));
        vars[0].1 = Some("not-an-address".to_owned());
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::Invalid { name: "bind_addr", .. })
        ));
    }
}
