// Cookie-style store: named values with an absolute expiry

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::StoreResult;
use super::file::JsonFile;

/// Lifetime of a cookie when the caller does not pick one
pub const DEFAULT_COOKIE_DAYS: i64 = 365;

/// Lifetimes beyond a century in either direction are clamped
const MAX_COOKIE_DAYS: i64 = 36_600;

const ROOT_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
    pub path: String,
}

impl Cookie {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

/// Expiring key/value entries scoped to the whole application path.
///
/// Expired cookies are never returned and are dropped on the next write.
#[derive(Debug)]
pub struct CookieStore {
    file: JsonFile,
}

impl CookieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Write `name=value` expiring `days` from now. Negative days backdate
    /// the expiry, which evicts the cookie.
    pub fn set(&self, name: &str, value: &str, days: i64) -> StoreResult<()> {
        let now = Utc::now();
        let expires = Duration::try_days(days.clamp(-MAX_COOKIE_DAYS, MAX_COOKIE_DAYS))
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(now);
        let cookie = Cookie {
            name: name.to_string(),
            value: value.to_string(),
            expires,
            path: ROOT_PATH.to_string(),
        };

        let _guard = self.file.guard();
        let mut cookies: Vec<Cookie> = self.file.load()?;
        match cookies.iter_mut().find(|c| c.name == name && c.path == ROOT_PATH) {
            Some(existing) => *existing = cookie,
            None => cookies.push(cookie),
        }
        cookies.retain(|c| !c.is_expired_at(now));
        self.file.save(&cookies)
    }

    /// [`set`](Self::set) with the default one-year lifetime
    pub fn set_default(&self, name: &str, value: &str) -> StoreResult<()> {
        self.set(name, value, DEFAULT_COOKIE_DAYS)
    }

    /// First live cookie whose name matches exactly
    pub fn get(&self, name: &str) -> StoreResult<Option<String>> {
        let now = Utc::now();
        let _guard = self.file.guard();
        let cookies: Vec<Cookie> = self.file.load()?;
        Ok(cookies
            .into_iter()
            .find(|c| c.name == name && !c.is_expired_at(now))
            .map(|c| c.value))
    }

    pub fn remove(&self, name: &str) -> StoreResult<()> {
        self.set(name, "", -1)
    }
}
