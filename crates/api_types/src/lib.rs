use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the backend.
///
/// The backend emits integer ids, but the client never does arithmetic on them, so both JSON
/// numbers and strings decode into the same string form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct ResourceId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Str(String),
}

impl From<RawId> for ResourceId {
    fn from(value: RawId) -> Self {
        match value {
            RawId::Int(id) => Self(id.to_string()),
            RawId::Str(id) => Self(id),
        }
    }
}

impl From<ResourceId> for String {
    fn from(value: ResourceId) -> Self {
        value.0
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl ResourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Currencies a wallet can hold.
///
/// `minor_units()` is the number of fraction digits shown when formatting a balance: the dong
/// and the won have none, dollars and yuan use two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Vnd,
    Usd,
    Cny,
    Krw,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Vnd, Currency::Usd, Currency::Cny, Currency::Krw];

    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Vnd => "VND",
            Currency::Usd => "USD",
            Currency::Cny => "CNY",
            Currency::Krw => "KRW",
        }
    }

    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Currency::Vnd | Currency::Krw => 0,
            Currency::Usd | Currency::Cny => 2,
        }
    }

    /// Next currency in selection order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous currency in selection order, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "VND" => Ok(Currency::Vnd),
            "USD" => Ok(Currency::Usd),
            "CNY" => Ok(Currency::Cny),
            "KRW" => Ok(Currency::Krw),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "error")]
    pub message: String,
}

pub mod wallet {
    use rust_decimal::Decimal;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Wallet {
        pub id: ResourceId,
        pub name: String,
        #[serde(default)]
        pub balance: Decimal,
        #[serde(default)]
        pub currency: Currency,
    }

    /// Body of `POST /wallets/create`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletNew {
        pub name: String,
        #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
        pub balance: Decimal,
        pub currency: Currency,
    }

    /// Body of `PUT /wallets/update/:id`. The balance is only set at creation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletUpdate {
        pub name: String,
        pub currency: Currency,
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Category {
        pub id: ResourceId,
        pub name: String,
    }

    /// Body of both `POST /categories/create` and `PUT /categories/update/:id`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
    }
}

pub mod goal {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Goal {
        pub id: ResourceId,
        pub name: String,
        #[serde(default)]
        pub target_amount: Decimal,
        #[serde(default)]
        pub saved_amount: Decimal,
        #[serde(default, deserialize_with = "dates::deserialize_opt")]
        pub deadline: Option<NaiveDate>,
    }

    /// Body of both `POST /goals/create` and `PUT /goals/update/:id`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalNew {
        pub name: String,
        #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
        pub target_amount: Decimal,
        #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
        pub saved_amount: Decimal,
        pub deadline: Option<NaiveDate>,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub token: String,
        pub user: User,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Register {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct User {
        pub id: ResourceId,
        pub username: String,
        pub email: String,
    }
}

/// Lenient calendar-date decoding.
///
/// The backend sends dates either as ISO strings (`2026-12-31`, optionally followed by a time
/// part) or in HTTP date form (`Thu, 31 Dec 2026 00:00:00 GMT`). Only the date is kept.
pub mod dates {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Some(prefix) = raw.get(..10)
            && let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        {
            return Some(date);
        }
        DateTime::parse_from_rfc2822(raw)
            .ok()
            .map(|dt| dt.date_naive())
    }

    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {value}"))),
        }
    }
}
