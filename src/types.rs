// 1.0: all the primitives live here. identifiers, raw amounts, block metadata.
// each is a newtype so the compiler catches an address passed where a token id belongs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SECONDS_PER_DAY: u64 = 86_400;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// 20-byte account address, stored lowercase hex.
    Address
);
string_id!(TxHash);
string_id!(OrderHash);
string_id!(ConditionId);
string_id!(QuestionId);
string_id!(
    /// Decimal string of a uint256 ERC-1155 position id. "0" is the collateral leg.
    AssetId
);

// hex identifiers are case-insensitive on chain, normalize once at the edge
impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().to_ascii_lowercase())
    }
}

impl TxHash {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().to_ascii_lowercase())
    }
}

impl OrderHash {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().to_ascii_lowercase())
    }
}

impl ConditionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().to_ascii_lowercase())
    }
}

impl QuestionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().to_ascii_lowercase())
    }
}

impl AssetId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn collateral() -> Self {
        Self("0".to_string())
    }

    // "0", "000" and friends all denote the collateral leg
    pub fn is_collateral(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b == b'0')
    }
}

impl From<u128> for AssetId {
    fn from(value: u128) -> Self {
        Self(value.to_string())
    }
}

// 1.1: raw on-chain integer amount in collateral base units (6 decimals for USDC).
// serialized as a decimal string, the way big integers travel between chain tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn new(value: u128) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(&self, other: Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(AmountError::Overflow { lhs: *self, rhs: other })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u128>()
            .map(Amount)
            .map_err(|_| AmountError::InvalidText(s.to_string()))
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value as u128)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount overflow: {lhs} + {rhs}")]
    Overflow { lhs: Amount, rhs: Amount },

    #[error("Amount {0} exceeds decimal range")]
    OutOfRange(Amount),

    #[error("Invalid amount text: {0:?}")]
    InvalidText(String),

    #[error("Decimal overflow while computing {0}")]
    DecimalOverflow(&'static str),
}

// Buy = maker gave collateral for outcome tokens. Sell = maker gave outcome tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// 1.2: block timestamp in unix seconds. zero means "never", which the account
// ledger relies on for first_trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct BlockTimestamp(pub u64);

impl BlockTimestamp {
    pub const UNSET: BlockTimestamp = BlockTimestamp(0);

    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }

    pub fn day_bucket(&self) -> u64 {
        self.0 / SECONDS_PER_DAY
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.0).ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

impl fmt::Display for BlockTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S UTC")),
            None => write!(f, "{}s", self.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct BlockNumber(pub u64);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn collateral_asset_detection() {
        assert!(AssetId::new("0").is_collateral());
        assert!(AssetId::new("000").is_collateral());
        assert!(AssetId::collateral().is_collateral());
        assert!(!AssetId::new("").is_collateral());
        assert!(!AssetId::new("100").is_collateral());
        assert!(!AssetId::new("71321045679252212594626385532706912750332728571942532289631379312455583992563").is_collateral());
        assert!(!AssetId::from(7u128).is_collateral());
    }

    #[test]
    fn hex_identifiers_are_lowercased() {
        assert_eq!(Address::new("0xAbCd").as_str(), "0xabcd");
        assert_eq!(ConditionId::new("0xABC").as_str(), "0xabc");
        assert_eq!(TxHash::new("0xFF").to_string(), "0xff");
    }

    #[test]
    fn amount_checked_add() {
        let a = Amount::new(500_000);
        assert_eq!(a.checked_add(Amount::new(1)).unwrap(), Amount::new(500_001));

        let overflow = Amount::new(u128::MAX).checked_add(Amount::new(1));
        assert!(matches!(overflow, Err(AmountError::Overflow { .. })));
    }

    #[test]
    fn amount_serializes_as_string() {
        let json = serde_json::to_string(&Amount::new(u128::MAX)).unwrap();
        assert_eq!(json, format!("\"{}\"", u128::MAX));

        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value(), u128::MAX);

        let bad: Result<Amount, _> = serde_json::from_str("\"12x\"");
        assert!(bad.is_err());
    }

    #[test]
    fn timestamp_day_bucket() {
        assert_eq!(BlockTimestamp::from_secs(0).day_bucket(), 0);
        assert_eq!(BlockTimestamp::from_secs(86_399).day_bucket(), 0);
        assert_eq!(BlockTimestamp::from_secs(86_400).day_bucket(), 1);
        assert_eq!(BlockTimestamp::from_secs(1_700_000_000).day_bucket(), 19_675);
    }

    #[test]
    fn timestamp_datetime() {
        let ts = BlockTimestamp::from_secs(1_700_000_000);
        let dt = ts.to_datetime().unwrap();
        assert_eq!(dt.year(), 2023);
        assert_eq!(dt.month(), 11);
        assert!(BlockTimestamp::UNSET.is_unset());
    }

    #[test]
    fn side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TradeSide::Buy).unwrap(), "\"buy\"");
        assert_eq!(TradeSide::Sell.to_string(), "sell");
    }
}
