// cityscan-api: Async Rust client for the CityScan address API
//
// `CityScanClient` turns typed inputs into authenticated requests, unwraps the
// `{ status, message, error, content }` envelope, and hands back `content`
// shaped per endpoint.

mod address;
pub mod client;
pub mod config;
pub mod envelope;
pub mod environment;
pub mod error;
pub mod models;
pub mod requests;
pub mod transport;

pub use chrono::NaiveDate;
pub use client::CityScanClient;
pub use config::ClientConfig;
pub use envelope::Envelope;
pub use environment::Environment;
pub use error::Error;
pub use models::{
    Activation, Address, AddressId, AddressRef, AddressRefs, DateRange, GpsPosition, RoadAddress,
};
pub use requests::ApiRequest;
pub use transport::{DEFAULT_TIMEOUT, REPORT_TIMEOUT, RequestTimeout, TransportConfig};
