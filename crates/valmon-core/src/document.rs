//! `metrics.json` document model.
//!
//! The indexer writes whatever the chain RPC returned, so every field is
//! decoded leniently: missing keys, `null`, numeric strings and garbage all
//! map to a sane default instead of failing the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Slashes at or below this height are excluded from the "recent jails" view.
pub const RECENT_SLASH_HEIGHT: u64 = 1_000_000;

/// Top-level payload of `metrics.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricsDocument {
    /// Last block height the indexer processed.
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub latest_height: Option<u64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub validators: Vec<ValidatorRecord>,
}

/// Raw attributes of one validator.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ValidatorRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub valoper: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub moniker: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub consensus_pubkey: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub wallet: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub valcons: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hex: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_signed_blocks: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_missed_blocks: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_proposed_blocks: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub delegators_count: u64,
    #[serde(default, deserialize_with = "lenient_opt_list")]
    pub slashes: Option<Vec<SlashEvent>>,
    /// Older indexer key for the same list; used only when `slashes` is absent.
    #[serde(default, deserialize_with = "lenient_opt_list")]
    pub slashing_info: Option<Vec<SlashEvent>>,
    #[serde(default, deserialize_with = "lenient_opt_object")]
    pub validator_creation_info: Option<CreationInfo>,
    /// Older indexer key, used only when `validator_creation_info` is absent.
    #[serde(default, deserialize_with = "lenient_opt_object")]
    pub creation_info: Option<CreationInfo>,
    #[serde(default, deserialize_with = "lenient_opt_bool")]
    pub tombstoned: Option<bool>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub tokens: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub stake: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub self_stake: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub transactions: Option<u64>,
}

/// A slashing (jail) event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SlashEvent {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub height: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: String,
}

/// Block and transaction that created the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreationInfo {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub height: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tx_hash: String,
}

impl MetricsDocument {
    /// Parses a document from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl ValidatorRecord {
    /// Slash list, preferring `slashes` over `slashing_info`.
    pub fn slash_events(&self) -> Option<&[SlashEvent]> {
        self.slashes.as_deref().or(self.slashing_info.as_deref())
    }

    pub fn jail_count(&self) -> usize {
        self.slash_events().map_or(0, <[SlashEvent]>::len)
    }

    /// Slashes strictly above [`RECENT_SLASH_HEIGHT`], in source order.
    pub fn recent_slashes(&self) -> impl Iterator<Item = &SlashEvent> {
        self.slash_events()
            .unwrap_or_default()
            .iter()
            .filter(|s| s.height > RECENT_SLASH_HEIGHT)
    }

    pub fn creation(&self) -> Option<&CreationInfo> {
        self.validator_creation_info.as_ref().or(self.creation_info.as_ref())
    }

    /// Signed + missed blocks.
    pub fn active_blocks(&self) -> u64 {
        self.total_signed_blocks.saturating_add(self.total_missed_blocks)
    }
}

// ---------------------------------------------------------------------------
// Lenient decoders
// ---------------------------------------------------------------------------

/// Interprets a JSON value as a non-negative integer. Anything that is not a
/// non-negative finite number (or a string holding one) becomes 0.
fn value_as_u64(v: &Value) -> u64 {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(float_as_u64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_as_u64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn float_as_u64(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0).then_some(f as u64)
}

fn value_as_f64(v: &Value) -> Option<f64> {
    let f = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    f.filter(|f| f.is_finite())
}

fn lenient_u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(value_as_u64(&Value::deserialize(d)?))
}

fn lenient_opt_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok((!v.is_null()).then(|| value_as_u64(&v)))
}

fn lenient_opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(value_as_f64(&Value::deserialize(d)?))
}

fn lenient_opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => s.trim().parse::<bool>().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Decodes an object; any other shape is treated as absent.
fn lenient_opt_object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(match Value::deserialize(d)? {
        v @ Value::Object(_) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

/// Decodes an array element by element. An element that does not decode is
/// replaced by `T::default()` so the list length stays faithful to the source.
fn decode_items<T>(items: Vec<Value>) -> Vec<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect()
}

fn lenient_opt_list<'de, D, T>(d: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => Some(decode_items(items)),
        _ => None,
    })
}

fn lenient_list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    Ok(lenient_opt_list(d)?.unwrap_or_default())
}
