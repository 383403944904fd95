use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{Airport, Flight, ProfileUpdate, Registration, Ticket, User};
use crate::pii::Masked;
use crate::search::FlightSearchQuery;
use crate::ApiResult;

/// Successful login payload: the access token plus the account snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: Masked<String>,
    pub user: User,
}

/// Booking submission. `price` is the value displayed to the user at
/// selection time, serialized as a decimal string the backend accepts.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BookingRequest {
    pub flight: i64,
    pub seat_number: String,
    pub price: String,
}

/// Account operations. All methods are single-attempt; the POST/PATCH
/// calls must never be retried automatically.
#[async_trait]
pub trait AccountsApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse>;

    /// The backend replies with the created user and a token pair; the
    /// client discards both and routes the user to the login flow.
    async fn register(&self, registration: &Registration) -> ApiResult<()>;

    async fn current_user(&self, token: &str) -> ApiResult<User>;

    async fn update_profile(&self, update: &ProfileUpdate, token: &str) -> ApiResult<User>;
}

/// Flight-domain operations. The GET methods are safe for callers to
/// retry; listing endpoints return `Ok` with an empty vector when the
/// backend finds nothing.
#[async_trait]
pub trait FlightsApi: Send + Sync {
    async fn list_airports(&self) -> ApiResult<Vec<Airport>>;

    async fn list_flights(&self) -> ApiResult<Vec<Flight>>;

    /// Results keep the server-determined order; no client-side re-sort.
    async fn search_flights(&self, query: &FlightSearchQuery) -> ApiResult<Vec<Flight>>;

    async fn create_ticket(&self, request: &BookingRequest, token: &str) -> ApiResult<Ticket>;

    /// Lists the calling user's own tickets.
    async fn list_tickets(&self, token: &str) -> ApiResult<Vec<Ticket>>;
}
