// Address endpoints
//
// Activation, correction, (de/re)activation, report generation and the five
// address listings. Each method shapes its parameters through `ApiRequest`,
// runs it, and gives the returned `content` its type.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::client::CityScanClient;
use crate::error::Error;
use crate::models::{
    Activation, ActivationContent, Address, AddressId, AddressRef, AddressRefs, DateRange,
    GpsPosition, RoadAddress,
};
use crate::requests::ApiRequest;

impl CityScanClient {
    // ── Activation ───────────────────────────────────────────────────

    /// Activate an address from its road, postal code and city.
    ///
    /// `POST address/activation`
    pub async fn activate_by_road(
        &self,
        address: &RoadAddress,
        external_id: Option<&AddressId>,
    ) -> Result<Activation, Error> {
        debug!(city = %address.city, "activating address by road");
        let content = self
            .execute(&ApiRequest::activate_by_road(address, external_id))
            .await?;
        activation(content)
    }

    /// Activate an address from GPS coordinates.
    ///
    /// `POST address/activation`
    pub async fn activate_by_gps(
        &self,
        position: GpsPosition,
        external_id: Option<&AddressId>,
    ) -> Result<Activation, Error> {
        debug!("activating address by GPS");
        let content = self
            .execute(&ApiRequest::activate_by_gps(position, external_id))
            .await?;
        activation(content)
    }

    // ── Correction ───────────────────────────────────────────────────

    /// Replace the road, postal code and city of an activated address.
    ///
    /// `POST address/correction`
    pub async fn correct_by_road(
        &self,
        address: &RoadAddress,
        target: &AddressRef,
    ) -> Result<Activation, Error> {
        debug!(id = %target.id(), external = target.is_external(), "correcting address by road");
        let content = self
            .execute(&ApiRequest::correct_by_road(address, target))
            .await?;
        activation(content)
    }

    /// Replace the coordinates of an activated address.
    ///
    /// `POST address/correction`
    pub async fn correct_by_gps(
        &self,
        position: GpsPosition,
        target: &AddressRef,
    ) -> Result<Activation, Error> {
        debug!(id = %target.id(), external = target.is_external(), "correcting address by GPS");
        let content = self
            .execute(&ApiRequest::correct_by_gps(position, target))
            .await?;
        activation(content)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Stop monitoring an address. Returns the raw `content`.
    ///
    /// `POST address/deactivation`
    pub async fn deactivate(&self, target: &AddressRef) -> Result<Value, Error> {
        debug!(id = %target.id(), external = target.is_external(), "deactivating address");
        self.execute(&ApiRequest::deactivate(target)).await
    }

    /// Resume monitoring previously deactivated addresses. Returns the raw
    /// `content`.
    ///
    /// `POST addresses/reactivate`
    pub async fn reactivate(&self, targets: &AddressRefs) -> Result<Value, Error> {
        debug!(count = targets.ids().len(), "reactivating addresses");
        self.execute(&ApiRequest::reactivate(targets)).await
    }

    /// Request the report for an address. Returns the raw `content`.
    ///
    /// `POST address/report`, under the long rendering timeout. Fails with
    /// `Error::Configuration` before any I/O if no client key is configured.
    pub async fn report(&self, target: &AddressRef) -> Result<Value, Error> {
        let client_key = self.client_key()?;
        debug!(id = %target.id(), external = target.is_external(), "requesting report");
        self.execute(&ApiRequest::report(target, client_key)).await
    }

    // ── Lists ────────────────────────────────────────────────────────

    /// Addresses currently being monitored.
    ///
    /// `GET addresses/active`
    pub async fn list_active(&self) -> Result<Vec<Address>, Error> {
        self.list(ApiRequest::list_active()).await
    }

    /// Addresses activated within `range`.
    ///
    /// `GET addresses/activated`
    pub async fn list_activated(&self, range: &DateRange) -> Result<Vec<Address>, Error> {
        self.list(ApiRequest::list_activated(range)).await
    }

    /// Addresses billed within `range`.
    ///
    /// `GET addresses/billed`
    pub async fn list_billed(&self, range: &DateRange) -> Result<Vec<Address>, Error> {
        self.list(ApiRequest::list_billed(range)).await
    }

    /// Addresses deactivated within `range`.
    ///
    /// `GET addresses/deactivated`
    pub async fn list_deactivated(&self, range: &DateRange) -> Result<Vec<Address>, Error> {
        self.list(ApiRequest::list_deactivated(range)).await
    }

    /// Every address known for the account.
    ///
    /// `GET addresses/all`
    pub async fn list_all(&self) -> Result<Vec<Address>, Error> {
        self.list(ApiRequest::list_all()).await
    }

    async fn list(&self, request: ApiRequest) -> Result<Vec<Address>, Error> {
        debug!(path = request.path, "listing addresses");
        let content = self.execute(&request).await?;
        typed(content, "a list of addresses")
    }
}

fn activation(content: Value) -> Result<Activation, Error> {
    let typed: ActivationContent = typed(content, "an activation object")?;
    Ok(typed.activation)
}

/// Give `content` its endpoint-specific shape, or report the mismatch.
fn typed<T: DeserializeOwned>(content: Value, expected: &str) -> Result<T, Error> {
    let raw = content.to_string();
    serde_json::from_value(content)
        .map_err(|e| Error::protocol(format!("expected {expected} in content: {e}"), raw))
}
