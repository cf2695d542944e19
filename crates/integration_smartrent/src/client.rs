//! SmartRent backend client
//!
//! Thin request/response mapping over the booking backend. No call retries
//! and none inspects the body on success; the only local logic is splitting
//! 2xx from everything else.

use async_trait::async_trait;
use domain::value_objects::{AlertId, BookingId, Coordinate, TripId, VehicleId};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::RentalApiConfig;
use crate::error::RentalApiError;
use crate::models::{
    Acknowledgement, AlertReceipt, AlertStatus, ApiResponse, BookingConfirmation, EmergencyReport,
    EndTripRequest, FeedbackRequest, NearbyQuery, NearbyVehicles, RoutePlan, StartTripRequest,
    TripSummary,
};

/// Outcome of a single backend call
pub type ApiResult = Result<ApiResponse, RentalApiError>;

/// Operations offered by the rental backend
///
/// Payload-taking operations accept arbitrary JSON; see [`RentalClientExt`]
/// for the typed variants.
#[async_trait]
pub trait RentalClient: Send + Sync {
    /// `GET /vehicles/api/nearby`
    async fn get_nearby_vehicles(&self, query: &NearbyQuery) -> ApiResult;

    /// `POST /vehicles/{id}/book`
    async fn book_vehicle(&self, vehicle_id: VehicleId) -> ApiResult;

    /// `POST /vehicles/{id}/unlock`
    async fn unlock_vehicle(&self, vehicle_id: VehicleId) -> ApiResult;

    /// `POST /vehicles/{id}/lock`
    async fn lock_vehicle(&self, vehicle_id: VehicleId) -> ApiResult;

    /// `POST /trips/{id}/end`
    async fn end_trip(&self, trip_id: TripId, payload: &Value) -> ApiResult;

    /// `POST /emergency/report`
    async fn report_emergency(&self, payload: &Value) -> ApiResult;

    /// `POST /trips/start/{booking_id}`
    async fn start_trip(&self, booking_id: BookingId, payload: &Value) -> ApiResult;

    /// `POST /trips/{id}/feedback`
    async fn submit_trip_feedback(&self, trip_id: TripId, payload: &Value) -> ApiResult;

    /// `GET /trips/api/route`
    async fn plan_route(&self, start: Coordinate, end: Coordinate) -> ApiResult;

    /// `POST /emergency/button/{vehicle_id}`
    async fn press_emergency_button(&self, vehicle_id: VehicleId) -> ApiResult;

    /// `GET /emergency/{id}/status`
    async fn get_alert_status(&self, alert_id: AlertId) -> ApiResult;
}

/// Typed helpers on top of [`RentalClient`]
#[async_trait]
pub trait RentalClientExt: RentalClient {
    /// Vehicles within the default radius, any type
    async fn nearby_vehicles(&self, center: Coordinate) -> Result<NearbyVehicles, RentalApiError> {
        self.get_nearby_vehicles(&NearbyQuery::around(center))
            .await?
            .decode()
    }

    /// Book a vehicle and return the reservation
    async fn book(&self, vehicle_id: VehicleId) -> Result<BookingConfirmation, RentalApiError> {
        self.book_vehicle(vehicle_id).await?.decode()
    }

    /// End a trip and return its bill
    async fn finish_trip(
        &self,
        trip_id: TripId,
        request: &EndTripRequest,
    ) -> Result<TripSummary, RentalApiError> {
        let payload = to_payload(request)?;
        self.end_trip(trip_id, &payload).await?.decode()
    }

    /// File an emergency report
    async fn report(&self, report: &EmergencyReport) -> Result<AlertReceipt, RentalApiError> {
        let payload = to_payload(report)?;
        self.report_emergency(&payload).await?.decode()
    }

    /// Start the trip of a booking
    async fn start_trip_at(
        &self,
        booking_id: BookingId,
        request: &StartTripRequest,
    ) -> Result<BookingConfirmation, RentalApiError> {
        let payload = to_payload(request)?;
        self.start_trip(booking_id, &payload).await?.decode()
    }

    /// Rate a finished trip
    async fn rate_trip(
        &self,
        trip_id: TripId,
        feedback: &FeedbackRequest,
    ) -> Result<Acknowledgement, RentalApiError> {
        let payload = to_payload(feedback)?;
        self.submit_trip_feedback(trip_id, &payload)
            .await?
            .decode()
    }

    /// Route suggestion between two points
    async fn route_between(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RoutePlan, RentalApiError> {
        self.plan_route(start, end).await?.decode()
    }

    /// One-tap SOS for a vehicle
    async fn sos(&self, vehicle_id: VehicleId) -> Result<AlertReceipt, RentalApiError> {
        self.press_emergency_button(vehicle_id).await?.decode()
    }

    /// Processing state of an alert
    async fn alert_status(&self, alert_id: AlertId) -> Result<AlertStatus, RentalApiError> {
        self.get_alert_status(alert_id).await?.decode()
    }
}

impl<T: RentalClient + ?Sized> RentalClientExt for T {}

fn to_payload<T: Serialize + ?Sized>(value: &T) -> Result<Value, RentalApiError> {
    serde_json::to_value(value).map_err(|e| RentalApiError::InvalidRequest(e.to_string()))
}

/// reqwest-backed [`RentalClient`]
#[derive(Debug, Clone)]
pub struct HttpRentalClient {
    client: Client,
    base_url: String,
    timeout_secs: Option<u64>,
}

impl HttpRentalClient {
    /// Create a client for the configured backend
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the config is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &RentalApiConfig) -> Result<Self, RentalApiError> {
        config.validate().map_err(RentalApiError::Configuration)?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RentalApiError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Backend root every path is joined to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(%url, "POST");
        self.client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
    }

    fn post_json(&self, path: &str, payload: &Value) -> RequestBuilder {
        self.post(path).json(payload)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(%url, "GET");
        self.client.get(url)
    }

    fn transport_error(&self, err: &reqwest::Error) -> RentalApiError {
        if err.is_timeout() {
            RentalApiError::Timeout {
                timeout_secs: self.timeout_secs.unwrap_or_default(),
            }
        } else {
            RentalApiError::Network(err.to_string())
        }
    }

    /// Send a request and split the answer into success or `Http`
    async fn send(&self, request: RequestBuilder) -> ApiResult {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if response_is_success(status) {
            let body = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text).map_err(|e| RentalApiError::InvalidBody {
                    status,
                    message: e.to_string(),
                })?
            };
            debug!(status, "Backend call succeeded");
            Ok(ApiResponse { status, body })
        } else {
            let body = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text).unwrap_or(Value::String(text))
            };
            let err = RentalApiError::Http { status, body };
            warn!(status, error = %err, "Backend call failed");
            Err(err)
        }
    }
}

const fn response_is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

#[async_trait]
impl RentalClient for HttpRentalClient {
    #[instrument(skip(self), fields(lat = query.latitude, lng = query.longitude))]
    async fn get_nearby_vehicles(&self, query: &NearbyQuery) -> ApiResult {
        let request = self
            .get("/vehicles/api/nearby")
            .query(&query.query_params());
        self.send(request).await
    }

    #[instrument(skip(self))]
    async fn book_vehicle(&self, vehicle_id: VehicleId) -> ApiResult {
        self.send(self.post(&format!("/vehicles/{vehicle_id}/book")))
            .await
    }

    #[instrument(skip(self))]
    async fn unlock_vehicle(&self, vehicle_id: VehicleId) -> ApiResult {
        self.send(self.post(&format!("/vehicles/{vehicle_id}/unlock")))
            .await
    }

    #[instrument(skip(self))]
    async fn lock_vehicle(&self, vehicle_id: VehicleId) -> ApiResult {
        self.send(self.post(&format!("/vehicles/{vehicle_id}/lock")))
            .await
    }

    #[instrument(skip(self, payload))]
    async fn end_trip(&self, trip_id: TripId, payload: &Value) -> ApiResult {
        self.send(self.post_json(&format!("/trips/{trip_id}/end"), payload))
            .await
    }

    #[instrument(skip(self, payload))]
    async fn report_emergency(&self, payload: &Value) -> ApiResult {
        self.send(self.post_json("/emergency/report", payload))
            .await
    }

    #[instrument(skip(self, payload))]
    async fn start_trip(&self, booking_id: BookingId, payload: &Value) -> ApiResult {
        self.send(self.post_json(&format!("/trips/start/{booking_id}"), payload))
            .await
    }

    #[instrument(skip(self, payload))]
    async fn submit_trip_feedback(&self, trip_id: TripId, payload: &Value) -> ApiResult {
        self.send(self.post_json(&format!("/trips/{trip_id}/feedback"), payload))
            .await
    }

    #[instrument(skip(self), fields(start = %start, end = %end))]
    async fn plan_route(&self, start: Coordinate, end: Coordinate) -> ApiResult {
        let params = [
            ("start_lat", start.latitude().to_string()),
            ("start_lng", start.longitude().to_string()),
            ("end_lat", end.latitude().to_string()),
            ("end_lng", end.longitude().to_string()),
        ];
        let request = self.get("/trips/api/route").query(&params);
        self.send(request).await
    }

    #[instrument(skip(self))]
    async fn press_emergency_button(&self, vehicle_id: VehicleId) -> ApiResult {
        self.send(self.post(&format!("/emergency/button/{vehicle_id}")))
            .await
    }

    #[instrument(skip(self))]
    async fn get_alert_status(&self, alert_id: AlertId) -> ApiResult {
        self.send(self.get(&format!("/emergency/{alert_id}/status")))
            .await
    }
}
