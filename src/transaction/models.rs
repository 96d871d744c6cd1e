//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// Which ledger a transaction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    /// Money that was earned.
    Incomes,
    /// Money that was spent.
    Outcomes,
}

impl Nature {
    /// Both ledgers, in display order.
    pub const ALL: [Nature; 2] = [Nature::Incomes, Nature::Outcomes];

    /// The ledger name, which doubles as its storage key.
    pub fn as_str(self) -> &'static str {
        match self {
            Nature::Incomes => "incomes",
            Nature::Outcomes => "outcomes",
        }
    }
}

impl FromStr for Nature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incomes" => Ok(Nature::Incomes),
            "outcomes" => Ok(Nature::Outcomes),
            other => Err(Error::UnknownNature(other.to_owned())),
        }
    }
}

impl Display for Nature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated, non-empty description of what a transaction was for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct Motive(String);

impl Motive {
    /// Create a motive from `motive` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyMotive] if `motive` is empty
    /// or only whitespace.
    pub fn new(motive: &str) -> Result<Self, Error> {
        let motive = motive.trim();

        if motive.is_empty() {
            Err(Error::EmptyMotive)
        } else {
            Ok(Self(motive.to_owned()))
        }
    }

    /// Create a motive without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(motive: &str) -> Self {
        Self(motive.to_owned())
    }
}

impl AsRef<str> for Motive {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Motive {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Motive::new(s)
    }
}

impl Display for Motive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a user supplied amount.
///
/// # Errors
///
/// Returns [Error::InvalidAmount] if `text` is not a number, is zero, or is
/// not finite.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount != 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}

/// A single recorded income or outcome.
///
/// Transactions have no ID. They are located by their [Identity].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ledger the transaction belongs to.
    pub nature: Nature,
    /// What the money was for.
    pub motive: Motive,
    /// How much money was earned or spent.
    pub amount: f64,
    /// When the transaction was recorded.
    pub time: Timestamp,
}

impl Transaction {
    /// The values used to find this transaction in its ledger.
    pub fn identity(&self) -> Identity {
        Identity {
            time: self.time,
            amount: self.amount,
        }
    }
}

/// The data for a transaction that has not been added to a ledger yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// What the money was for.
    pub motive: Motive,
    /// How much money was earned or spent.
    pub amount: f64,
    /// When the transaction was recorded.
    pub time: Timestamp,
}

impl NewTransaction {
    /// Create a transaction stamped with the current time.
    pub fn now(motive: Motive, amount: f64) -> Self {
        Self {
            motive,
            amount,
            time: now_millis(),
        }
    }

    /// Attach the transaction to the ledger `nature`.
    pub fn into_transaction(self, nature: Nature) -> Transaction {
        Transaction {
            nature,
            motive: self.motive,
            amount: self.amount,
            time: self.time,
        }
    }
}

/// The current time in milliseconds since the Unix epoch.
pub fn now_millis() -> Timestamp {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as Timestamp
}

/// The `(time, amount)` pair that locates a transaction within a ledger.
///
/// Two transactions recorded in the same millisecond with the same amount
/// cannot be told apart, and the first one in ledger order is the one found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// The transaction's timestamp.
    pub time: Timestamp,
    /// The transaction's amount.
    pub amount: f64,
}

impl Identity {
    /// Whether `transaction` has this identity.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        transaction.time == self.time && transaction.amount == self.amount
    }
}

/// Changes to apply to an existing transaction.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    /// The new motive.
    pub motive: Option<Motive>,
    /// The new amount.
    pub amount: Option<f64>,
    /// The new timestamp.
    pub time: Option<Timestamp>,
}

impl TransactionPatch {
    /// Merge the patch into `transaction`.
    pub fn apply(&self, transaction: &mut Transaction) {
        if let Some(motive) = &self.motive {
            transaction.motive = motive.clone();
        }

        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }

        if let Some(time) = self.time {
            transaction.time = time;
        }
    }
}
