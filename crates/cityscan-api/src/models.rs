// Request inputs and response types
//
// Inputs are typed so that an operation can only ever populate one id field.
// Responses stay close to the wire: the service owns the shape of an
// activation or an address record, so those are kept as JSON objects and
// only their outer structure is validated.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

// ── Identifiers ──────────────────────────────────────────────────────

/// An address identifier, numeric or textual.
///
/// Serialized untagged, so `AddressId::from(42)` goes on the wire as `42`
/// and `AddressId::from("A-42")` as `"A-42"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressId {
    Numeric(u64),
    Text(String),
}

impl From<u64> for AddressId {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for AddressId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for AddressId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Reference to one address: the service's own id, or the caller's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressRef {
    /// Id assigned by CityScan.
    Internal(AddressId),
    /// Id supplied and owned by the calling system.
    External(AddressId),
}

impl AddressRef {
    /// Build from the `(id, is_external)` pair used across the API.
    pub fn new(id: impl Into<AddressId>, is_external: bool) -> Self {
        let id = id.into();
        if is_external {
            Self::External(id)
        } else {
            Self::Internal(id)
        }
    }

    pub fn id(&self) -> &AddressId {
        match self {
            Self::Internal(id) | Self::External(id) => id,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// Several addresses of the same kind, for bulk reactivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressRefs {
    Internal(Vec<AddressId>),
    External(Vec<AddressId>),
}

impl AddressRefs {
    pub fn new<I, T>(ids: I, is_external: bool) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<AddressId>,
    {
        let ids = ids.into_iter().map(Into::into).collect();
        if is_external {
            Self::External(ids)
        } else {
            Self::Internal(ids)
        }
    }

    pub fn ids(&self) -> &[AddressId] {
        match self {
            Self::Internal(ids) | Self::External(ids) => ids,
        }
    }
}

// ── Locations ────────────────────────────────────────────────────────

/// A postal address as typed by a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadAddress {
    /// Number and street name.
    pub road: String,
    /// Kept as text: French postal codes have leading zeros (`01000`).
    pub postal_code: String,
    pub city: String,
}

impl RoadAddress {
    pub fn new(
        road: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            road: road.into(),
            postal_code: postal_code.into(),
            city: city.into(),
        }
    }
}

/// WGS84 coordinates, always finite.
///
/// JSON has no encoding for NaN or infinity, so those are refused up front
/// instead of going out as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpsPosition {
    latitude: f64,
    longitude: f64,
}

impl GpsPosition {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        for (field, value) in [("latitude", latitude), ("longitude", longitude)] {
            if !value.is_finite() {
                return Err(Error::invalid_input(
                    field,
                    format!("{value} is not a finite number"),
                ));
            }
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(self) -> f64 {
        self.latitude
    }

    pub fn longitude(self) -> f64 {
        self.longitude
    }
}

// ── Date filters ─────────────────────────────────────────────────────

/// Optional bounds for the dated list endpoints.
///
/// Unset bounds are left out of the query string entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub const DATE_FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Query pairs for the bounds that are set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [("start", self.start), ("end", self.end)]
            .into_iter()
            .filter_map(|(key, date)| {
                date.map(|d| (key, d.format(Self::DATE_FORMAT).to_string()))
            })
            .collect()
    }
}

// ── Responses ────────────────────────────────────────────────────────

/// The `activation` object returned by activation and correction.
///
/// Passed through exactly as the service sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Activation(Map<String, Value>);

impl Activation {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// One entry from the address list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(Map<String, Value>);

impl Address {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// `content` of the activation and correction endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ActivationContent {
    pub activation: Activation,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn address_id_serializes_untagged() {
        assert_eq!(serde_json::to_value(AddressId::from(42)).unwrap(), json!(42));
        assert_eq!(serde_json::to_value(AddressId::from("EXT-9")).unwrap(), json!("EXT-9"));
    }

    #[test]
    fn address_ref_follows_is_external_flag() {
        assert_eq!(AddressRef::new(7, true), AddressRef::External(AddressId::Numeric(7)));
        assert_eq!(AddressRef::new(7, false), AddressRef::Internal(AddressId::Numeric(7)));
        assert!(AddressRef::new("x", true).is_external());
        assert_eq!(AddressRef::new("x", false).id(), &AddressId::Text("x".into()));
    }

    #[test]
    fn address_refs_collects_ids() {
        let refs = AddressRefs::new([1_u64, 2, 3], false);
        assert!(matches!(refs, AddressRefs::Internal(_)));
        assert_eq!(refs.ids().len(), 3);
    }

    #[test]
    fn gps_position_accepts_finite_coordinates() {
        let pos = GpsPosition::new(-33.87, 151.21).unwrap();
        assert!((pos.latitude() + 33.87).abs() < f64::EPSILON);
        assert!((pos.longitude() - 151.21).abs() < f64::EPSILON);
    }

    #[test]
    fn gps_position_rejects_non_finite_coordinates() {
        for (lat, lon, field) in [
            (f64::NAN, 2.0, "latitude"),
            (48.0, f64::INFINITY, "longitude"),
            (f64::NEG_INFINITY, f64::NAN, "latitude"),
        ] {
            let err = GpsPosition::new(lat, lon).unwrap_err();
            assert!(
                matches!(err, Error::InvalidInput { field: f, .. } if f == field),
                "({lat}, {lon}) gave {err:?}"
            );
        }
    }

    #[test]
    fn date_range_skips_unset_bounds() {
        assert!(DateRange::default().query_pairs().is_empty());

        let start = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let pairs = DateRange::new(Some(start), None).query_pairs();
        assert_eq!(pairs, vec![("start", "2024-01-05".to_string())]);

        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let pairs = DateRange::new(None, Some(end)).query_pairs();
        assert_eq!(pairs, vec![("end", "2024-12-31".to_string())]);
    }

    #[test]
    fn activation_rejects_non_objects() {
        assert!(serde_json::from_value::<Activation>(json!([1, 2])).is_err());
        assert!(serde_json::from_value::<Activation>(json!("done")).is_err());
        let activation: Activation = serde_json::from_value(json!({ "id": 12 })).unwrap();
        assert_eq!(activation.get("id"), Some(&json!(12)));
    }

    #[test]
    fn activation_content_requires_activation_key() {
        assert!(serde_json::from_value::<ActivationContent>(json!({})).is_err());
        assert!(
            serde_json::from_value::<ActivationContent>(json!({ "activation": {} })).is_ok()
        );
    }
}
