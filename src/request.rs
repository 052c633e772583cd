use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_with::{DeserializeAs, DisplayFromStr, MapPreventDuplicates, SerializeAs, serde_as};

use crate::{
    core::instance::Instance,
    cost::Cost,
    error::ValidationError,
};

/// Optimization request: the price series keyed by slot index and the event durations.
///
/// Slot indices are string keys, since that is the only kind of keys JSON and TOML support.
/// Each key must be spelled canonically and appear once, so that no price is silently overwritten:
///
/// ```json
/// {
///   "electricity_prices": { "0": 0.06, "1": 0.05 },
///   "labor_costs": { "0": 0.4, "1": 0.4 },
///   "maintenance_durations": [1]
/// }
/// ```
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Request {
    #[serde_as(as = "MapPreventDuplicates<SlotKey, _>")]
    pub electricity_prices: BTreeMap<usize, Cost>,

    #[serde_as(as = "MapPreventDuplicates<SlotKey, _>")]
    pub labor_costs: BTreeMap<usize, Cost>,

    /// Event durations in slots. A single one-slot event, if omitted.
    #[serde(default = "Request::default_durations")]
    pub maintenance_durations: Vec<usize>,
}

impl Request {
    fn default_durations() -> Vec<usize> {
        vec![1]
    }

    /// Parse the request, choosing the format by the file extension: TOML for `.toml`, JSON otherwise.
    pub fn from_str_with_path(text: &str, path: &Path) -> Result<Self, RequestError> {
        if path.extension().is_some_and(|extension| extension.eq_ignore_ascii_case("toml")) {
            Ok(toml::from_str(text)?)
        } else {
            Ok(serde_json::from_str(text)?)
        }
    }

    pub fn to_instance(&self, max_events: usize) -> Result<Instance, ValidationError> {
        Instance::try_new(
            &self.electricity_prices,
            &self.labor_costs,
            &self.maintenance_durations,
            max_events,
        )
    }

    /// Two-day hourly example with morning and evening price peaks, and cheaper labor in daytime.
    pub fn example() -> Self {
        const ELECTRICITY: [f64; 48] = [
            0.06, 0.05, 0.04, 0.04, 0.05, 0.06, 0.08, 0.12, 0.18, 0.22, 0.16, 0.12, 0.00, 0.13,
            0.11, 0.13, 0.15, 0.19, 0.21, 0.20, 0.17, 0.14, 0.11, 0.09, 0.08, 0.09, 0.10, 0.11,
            0.12, 0.13, 0.81, 0.85, 0.84, 0.83, 0.10, 0.05, 0.08, 0.05, 0.05, 0.05, 0.46, 0.78,
            0.89, 0.78, 0.50, 0.47, 0.47, 0.45,
        ];
        const LABOR: [f64; 48] = [
            0.4, 0.4, 0.4, 0.4, 0.4, 0.3, 0.3, 0.3, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1,
            0.1, 0.3, 0.3, 0.3, 0.3, 0.3, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.1, 0.1,
            0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4,
        ];
        Self {
            electricity_prices: ELECTRICITY.into_iter().map(Cost::from).enumerate().collect(),
            labor_costs: LABOR.into_iter().map(Cost::from).enumerate().collect(),
            maintenance_durations: vec![2, 1, 3],
        }
    }
}

/// Slot index spelled as a plain decimal string: no signs, no leading zeros.
struct SlotKey;

impl SerializeAs<usize> for SlotKey {
    fn serialize_as<S: Serializer>(slot: &usize, serializer: S) -> Result<S::Ok, S::Error> {
        DisplayFromStr::serialize_as(slot, serializer)
    }
}

impl<'de> DeserializeAs<'de, usize> for SlotKey {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
        let key = String::deserialize(deserializer)?;
        let slot: usize = key.parse().map_err(de::Error::custom)?;
        if slot.to_string() == key {
            Ok(slot)
        } else {
            Err(de::Error::custom(format!("slot key `{key}` must be written as `{slot}`")))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("malformed JSON request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed TOML request: {0}")]
    Toml(#[from] toml::de::Error),
}
