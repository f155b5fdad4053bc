//! One-shot flash messages carried in a cookie across a redirect.

use actix_web::HttpRequest;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use serde::Serialize;

use crate::config::FLASH_COOKIE;

/// Bootstrap-style alert level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "danger" => Some(Self::Danger),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Cookie value: `<level>:<percent-encoded message>`.
    pub fn encode(&self) -> String {
        format!(
            "{}:{}",
            self.level.as_str(),
            urlencoding::encode(&self.message)
        )
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let (level, message) = raw.split_once(':')?;
        let level = FlashLevel::parse(level)?;
        let message = urlencoding::decode(message).ok()?.into_owned();
        Some(Self { level, message })
    }

    /// Cookie delivering this message to the next page view.
    pub fn to_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::new(FLASH_COOKIE, self.encode());
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(Duration::seconds(60));
        cookie
    }

    /// Pending flash message of this request, if any.
    pub fn from_request(req: &HttpRequest) -> Option<Self> {
        req.cookie(FLASH_COOKIE)
            .and_then(|c| Self::decode(c.value()))
    }
}

/// Cookie that removes a consumed flash message.
pub fn clear_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}
