// Per-endpoint request shaping
//
// Each constructor turns typed inputs into an `ApiRequest`: method, path,
// body and query as plain data. Nothing here does I/O, so payload shapes are
// checked directly in unit tests. Optional inputs that are not set never
// appear in the body or query, and each payload carries exactly one id field.

use reqwest::Method;
use serde_json::{Map, Value, json};

use crate::models::{AddressId, AddressRef, AddressRefs, DateRange, GpsPosition, RoadAddress};
use crate::transport::RequestTimeout;

// ── Paths ────────────────────────────────────────────────────────────

pub const ACTIVATION_PATH: &str = "address/activation";
pub const CORRECTION_PATH: &str = "address/correction";
pub const DEACTIVATION_PATH: &str = "address/deactivation";
pub const REPORT_PATH: &str = "address/report";
pub const REACTIVATE_PATH: &str = "addresses/reactivate";
pub const ACTIVE_PATH: &str = "addresses/active";
pub const ACTIVATED_PATH: &str = "addresses/activated";
pub const BILLED_PATH: &str = "addresses/billed";
pub const DEACTIVATED_PATH: &str = "addresses/deactivated";
pub const ALL_PATH: &str = "addresses/all";

// ── Request description ──────────────────────────────────────────────

/// An outgoing API call described as plain data.
///
/// `path` is relative to the environment base URL. `body` is sent as JSON
/// when present; `query` pairs are appended to the URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: &'static str,
    pub body: Option<Map<String, Value>>,
    pub query: Vec<(&'static str, String)>,
    pub timeout: RequestTimeout,
}

impl ApiRequest {
    fn get(path: &'static str) -> Self {
        Self {
            method: Method::GET,
            path,
            body: None,
            query: Vec::new(),
            timeout: RequestTimeout::Standard,
        }
    }

    fn post(path: &'static str, body: Map<String, Value>) -> Self {
        Self {
            method: Method::POST,
            path,
            body: Some(body),
            query: Vec::new(),
            timeout: RequestTimeout::Standard,
        }
    }

    // ── Activation ───────────────────────────────────────────────────

    /// `POST address/activation` with `{road, postalCode, city, externalAddressId?}`
    pub fn activate_by_road(address: &RoadAddress, external_id: Option<&AddressId>) -> Self {
        let mut body = road_fields(address);
        insert_external_id(&mut body, external_id);
        Self::post(ACTIVATION_PATH, body)
    }

    /// `POST address/activation` with `{latitude, longitude, externalAddressId?}`
    pub fn activate_by_gps(position: GpsPosition, external_id: Option<&AddressId>) -> Self {
        let mut body = gps_fields(position);
        insert_external_id(&mut body, external_id);
        Self::post(ACTIVATION_PATH, body)
    }

    // ── Correction ───────────────────────────────────────────────────

    /// `POST address/correction` with `{road, postalCode, city}` plus
    /// `externalAddressId` or `oldAddressId`.
    pub fn correct_by_road(address: &RoadAddress, target: &AddressRef) -> Self {
        let mut body = road_fields(address);
        insert_correction_target(&mut body, target);
        Self::post(CORRECTION_PATH, body)
    }

    /// `POST address/correction` with `{latitude, longitude}` plus
    /// `externalAddressId` or `oldAddressId`.
    pub fn correct_by_gps(position: GpsPosition, target: &AddressRef) -> Self {
        let mut body = gps_fields(position);
        insert_correction_target(&mut body, target);
        Self::post(CORRECTION_PATH, body)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// `POST address/deactivation` with `externalAddressId` or `addressId`.
    pub fn deactivate(target: &AddressRef) -> Self {
        Self::post(DEACTIVATION_PATH, address_ref_fields(target))
    }

    /// `POST addresses/reactivate` with `extAddressIds` or `addressIds`.
    pub fn reactivate(targets: &AddressRefs) -> Self {
        let (key, ids) = match targets {
            AddressRefs::External(ids) => ("extAddressIds", ids),
            AddressRefs::Internal(ids) => ("addressIds", ids),
        };
        let mut body = Map::new();
        body.insert(key.into(), json!(ids));
        Self::post(REACTIVATE_PATH, body)
    }

    /// `POST address/report` with the address id and `clientKey`.
    ///
    /// Runs under the rendering timeout.
    pub fn report(target: &AddressRef, client_key: &str) -> Self {
        let mut body = address_ref_fields(target);
        body.insert("clientKey".into(), json!(client_key));
        Self {
            timeout: RequestTimeout::Rendering,
            ..Self::post(REPORT_PATH, body)
        }
    }

    // ── Lists ────────────────────────────────────────────────────────

    /// `GET addresses/active`
    pub fn list_active() -> Self {
        Self::get(ACTIVE_PATH)
    }

    /// `GET addresses/activated?start=&end=`
    pub fn list_activated(range: &DateRange) -> Self {
        Self::get_dated(ACTIVATED_PATH, range)
    }

    /// `GET addresses/billed?start=&end=`
    pub fn list_billed(range: &DateRange) -> Self {
        Self::get_dated(BILLED_PATH, range)
    }

    /// `GET addresses/deactivated?start=&end=`
    pub fn list_deactivated(range: &DateRange) -> Self {
        Self::get_dated(DEACTIVATED_PATH, range)
    }

    /// `GET addresses/all`
    pub fn list_all() -> Self {
        Self::get(ALL_PATH)
    }

    fn get_dated(path: &'static str, range: &DateRange) -> Self {
        Self {
            query: range.query_pairs(),
            ..Self::get(path)
        }
    }
}

// ── Field helpers ────────────────────────────────────────────────────

fn road_fields(address: &RoadAddress) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("road".into(), json!(address.road));
    body.insert("postalCode".into(), json!(address.postal_code));
    body.insert("city".into(), json!(address.city));
    body
}

fn gps_fields(position: GpsPosition) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("latitude".into(), json!(position.latitude()));
    body.insert("longitude".into(), json!(position.longitude()));
    body
}

fn insert_external_id(body: &mut Map<String, Value>, external_id: Option<&AddressId>) {
    if let Some(id) = external_id.filter(|id| !is_falsy(id)) {
        body.insert("externalAddressId".into(), json!(id));
    }
}

/// `""`, `"0"` and `0` count as "not given" for an optional external id.
fn is_falsy(id: &AddressId) -> bool {
    match id {
        AddressId::Numeric(n) => *n == 0,
        AddressId::Text(s) => s.is_empty() || s == "0",
    }
}

fn insert_correction_target(body: &mut Map<String, Value>, target: &AddressRef) {
    let (key, id) = match target {
        AddressRef::External(id) => ("externalAddressId", id),
        AddressRef::Internal(id) => ("oldAddressId", id),
    };
    body.insert(key.into(), json!(id));
}

fn address_ref_fields(target: &AddressRef) -> Map<String, Value> {
    let (key, id) = match target {
        AddressRef::External(id) => ("externalAddressId", id),
        AddressRef::Internal(id) => ("addressId", id),
    };
    let mut body = Map::new();
    body.insert(key.into(), json!(id));
    body
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn rivoli() -> RoadAddress {
        RoadAddress::new("1 rue de Rivoli", "75001", "Paris")
    }

    fn body(req: &ApiRequest) -> Value {
        Value::Object(req.body.clone().expect("request should carry a body"))
    }

    fn has_key(req: &ApiRequest, key: &str) -> bool {
        req.body.as_ref().is_some_and(|b| b.contains_key(key))
    }

    #[test]
    fn activate_by_road_without_external_id() {
        let req = ApiRequest::activate_by_road(&rivoli(), None);
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "address/activation");
        assert_eq!(
            body(&req),
            json!({ "road": "1 rue de Rivoli", "postalCode": "75001", "city": "Paris" })
        );
        assert!(req.query.is_empty());
    }

    #[test]
    fn activate_by_road_with_external_id() {
        let ext = AddressId::from("CRM-77");
        let req = ApiRequest::activate_by_road(&rivoli(), Some(&ext));
        assert_eq!(body(&req)["externalAddressId"], json!("CRM-77"));
    }

    #[test]
    fn activate_treats_empty_external_id_as_absent() {
        let ext = AddressId::from("");
        let req = ApiRequest::activate_by_road(&rivoli(), Some(&ext));
        assert!(!has_key(&req, "externalAddressId"));
    }

    #[test]
    fn activate_treats_zero_external_id_as_absent() {
        let pos = GpsPosition::new(45.0, 5.0).unwrap();
        for ext in [AddressId::from("0"), AddressId::from(0)] {
            let road = ApiRequest::activate_by_road(&rivoli(), Some(&ext));
            assert!(!has_key(&road, "externalAddressId"), "{ext:?}");
            let gps = ApiRequest::activate_by_gps(pos, Some(&ext));
            assert!(!has_key(&gps, "externalAddressId"), "{ext:?}");
        }

        // Only the exact falsy forms are dropped.
        for ext in [AddressId::from("00"), AddressId::from(10)] {
            let req = ApiRequest::activate_by_road(&rivoli(), Some(&ext));
            assert!(has_key(&req, "externalAddressId"), "{ext:?}");
        }
    }

    #[test]
    fn activate_by_gps_shapes_coordinates() {
        let ext = AddressId::from(99);
        let pos = GpsPosition::new(48.8606, 2.3376).unwrap();
        let req = ApiRequest::activate_by_gps(pos, Some(&ext));
        assert_eq!(req.path, "address/activation");
        assert_eq!(
            body(&req),
            json!({ "latitude": 48.8606, "longitude": 2.3376, "externalAddressId": 99 })
        );
    }

    #[test]
    fn activate_by_gps_omits_missing_external_id() {
        let req = ApiRequest::activate_by_gps(GpsPosition::new(45.0, 5.0).unwrap(), None);
        assert_eq!(body(&req), json!({ "latitude": 45.0, "longitude": 5.0 }));
    }

    #[test]
    fn correct_by_road_selects_one_id_field() {
        let ext = ApiRequest::correct_by_road(&rivoli(), &AddressRef::new("CRM-1", true));
        assert_eq!(ext.path, "address/correction");
        assert!(has_key(&ext, "externalAddressId"));
        assert!(!has_key(&ext, "oldAddressId"));

        let int = ApiRequest::correct_by_road(&rivoli(), &AddressRef::new(12, false));
        assert_eq!(
            body(&int),
            json!({
                "road": "1 rue de Rivoli",
                "postalCode": "75001",
                "city": "Paris",
                "oldAddressId": 12
            })
        );
        assert!(!has_key(&int, "externalAddressId"));
    }

    #[test]
    fn correct_by_gps_selects_one_id_field() {
        let pos = GpsPosition::new(43.6, 1.44).unwrap();
        let ext = ApiRequest::correct_by_gps(pos, &AddressRef::new("CRM-1", true));
        assert_eq!(
            body(&ext),
            json!({ "latitude": 43.6, "longitude": 1.44, "externalAddressId": "CRM-1" })
        );

        let int = ApiRequest::correct_by_gps(pos, &AddressRef::new(5, false));
        assert!(has_key(&int, "oldAddressId"));
        assert!(!has_key(&int, "externalAddressId"));
    }

    #[test]
    fn deactivate_selects_one_id_field() {
        let ext = ApiRequest::deactivate(&AddressRef::new("CRM-1", true));
        assert_eq!(ext.path, "address/deactivation");
        assert_eq!(body(&ext), json!({ "externalAddressId": "CRM-1" }));

        let int = ApiRequest::deactivate(&AddressRef::new(8, false));
        assert_eq!(body(&int), json!({ "addressId": 8 }));
    }

    #[test]
    fn reactivate_uses_plural_field_names() {
        let ext = ApiRequest::reactivate(&AddressRefs::new(["a", "b"], true));
        assert_eq!(ext.path, "addresses/reactivate");
        assert_eq!(body(&ext), json!({ "extAddressIds": ["a", "b"] }));

        let int = ApiRequest::reactivate(&AddressRefs::new([1_u64, 2], false));
        assert_eq!(body(&int), json!({ "addressIds": [1, 2] }));
    }

    #[test]
    fn report_carries_client_key_and_long_timeout() {
        let req = ApiRequest::report(&AddressRef::new(3, false), "ck-123");
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "address/report");
        assert_eq!(body(&req), json!({ "addressId": 3, "clientKey": "ck-123" }));
        assert_eq!(req.timeout, RequestTimeout::Rendering);

        let ext = ApiRequest::report(&AddressRef::new("CRM-3", true), "ck-123");
        assert_eq!(body(&ext), json!({ "externalAddressId": "CRM-3", "clientKey": "ck-123" }));
    }

    #[test]
    fn every_other_request_uses_standard_timeout() {
        let addr = rivoli();
        let pos = GpsPosition::new(1.0, 2.0).unwrap();
        let target = AddressRef::new(1, false);
        let range = DateRange::default();
        let requests = [
            ApiRequest::activate_by_road(&addr, None),
            ApiRequest::activate_by_gps(pos, None),
            ApiRequest::correct_by_road(&addr, &target),
            ApiRequest::correct_by_gps(pos, &target),
            ApiRequest::deactivate(&target),
            ApiRequest::reactivate(&AddressRefs::new([1_u64], false)),
            ApiRequest::list_active(),
            ApiRequest::list_activated(&range),
            ApiRequest::list_billed(&range),
            ApiRequest::list_deactivated(&range),
            ApiRequest::list_all(),
        ];
        for req in requests {
            assert_eq!(req.timeout, RequestTimeout::Standard, "{}", req.path);
        }
    }

    #[test]
    fn list_requests_are_bodyless_gets() {
        let range = DateRange::default();
        let cases = [
            (ApiRequest::list_active(), "addresses/active"),
            (ApiRequest::list_activated(&range), "addresses/activated"),
            (ApiRequest::list_billed(&range), "addresses/billed"),
            (ApiRequest::list_deactivated(&range), "addresses/deactivated"),
            (ApiRequest::list_all(), "addresses/all"),
        ];
        for (req, path) in cases {
            assert_eq!(req.method, Method::GET);
            assert_eq!(req.path, path);
            assert!(req.body.is_none());
            assert!(req.query.is_empty(), "{path} should have no query");
        }
    }

    #[test]
    fn dated_lists_forward_only_set_bounds() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();

        let both = ApiRequest::list_billed(&DateRange::new(Some(start), Some(end)));
        assert_eq!(
            both.query,
            vec![("start", "2024-03-01".to_string()), ("end", "2024-03-31".to_string())]
        );

        let end_only = ApiRequest::list_deactivated(&DateRange::new(None, Some(end)));
        assert_eq!(end_only.query, vec![("end", "2024-03-31".to_string())]);
    }
}
