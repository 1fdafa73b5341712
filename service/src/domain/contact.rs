//! Contact channels definitions.

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
use regex::Regex;
use url::Url;

use crate::domain::listing;

/// Channels prospective buyers reach the sales team through.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Channels {
    /// [`Phone`] number for calls.
    pub phone: Phone,

    /// [`Phone`] number registered in `WhatsApp`.
    pub whatsapp: Phone,

    /// [`Email`] address.
    pub email: Email,
}

impl Channels {
    /// Returns `tel:` deep-link for calling the sales team.
    #[must_use]
    pub fn call_link(&self) -> String {
        format!("tel:+{}", self.phone.digits())
    }

    /// Returns `mailto:` deep-link for emailing the sales team.
    #[must_use]
    pub fn email_link(&self) -> String {
        format!("mailto:{}", self.email)
    }

    /// Returns `WhatsApp` deep-link for messaging the sales team, optionally
    /// prefilled with an enquiry about the provided [`listing::Title`].
    #[must_use]
    pub fn whatsapp_link(&self, about: Option<&listing::Title>) -> String {
        let base = format!("https://wa.me/{}", self.whatsapp.digits());
        let Some(title) = about else {
            return base;
        };
        let text = format!("Hi, I'm interested in {title}");
        Url::parse_with_params(&base, [("text", text)])
            .map_or(base, String::from)
    }
}

/// International phone number.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format: an optional leading
        /// `+` followed by 7 to 15 digits, optionally grouped with spaces or
        /// dashes.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?\d(?:[ -]?\d){6,14}$").expect("valid regex")
        });
        REGEX.is_match(number.as_ref())
    }

    /// Returns digits of this [`Phone`] without any separators.
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Email address.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });
        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}
