use std::sync::Arc;

use tracing::{info, warn};

use farebird_core::api::{AccountsApi, BookingRequest, FlightsApi};
use farebird_core::models::{Airport, Flight, ProfileUpdate, Registration, Ticket, User};
use farebird_core::notify::{NotificationSink, Severity};
use farebird_core::search::FlightSearchQuery;
use farebird_core::session::Session;
use farebird_core::ApiError;
use farebird_store::SessionStore;

const NETWORK_ERROR: &str = "Network error. Please try again.";
const PROFILE_LOGIN_PROMPT: &str = "Please login to view your profile";
const BOOKING_LOGIN_PROMPT: &str = "Please login to book a flight";

/// Navigable sections of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Flights,
    About,
    Contact,
    Profile,
}

/// The data an adapter needs to render an opened section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionView {
    Home,
    About,
    Contact,
    Flights(Vec<Flight>),
    Profile { user: User, bookings: Vec<Ticket> },
}

/// A successful booking plus the refreshed booking list. `bookings` is
/// `None` when the refresh failed after the booking itself stood.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingOutcome {
    pub ticket: Ticket,
    pub bookings: Option<Vec<Ticket>>,
}

/// Action-boundary failure. By the time a caller sees one of these, the
/// user-facing message has already gone to the notification sink; adapters
/// only decide whether to open the login flow.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The action needs an authenticated session.
    #[error("login required")]
    LoginRequired,

    #[error(transparent)]
    Failed(#[from] ApiError),
}

pub type ActionResult<T> = Result<T, ActionError>;

/// Orchestrates the session-gated booking workflow.
///
/// Holds the session store and the backend traits, owns none of their
/// state. Every operation reports its outcome through the sink; auth
/// failures clear the session before anything is reported, so the next
/// guarded action re-gates.
pub struct BookingController {
    store: Arc<SessionStore>,
    accounts: Arc<dyn AccountsApi>,
    flights: Arc<dyn FlightsApi>,
    sink: Arc<dyn NotificationSink>,
}

impl BookingController {
    pub fn new(
        store: Arc<SessionStore>,
        accounts: Arc<dyn AccountsApi>,
        flights: Arc<dyn FlightsApi>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            accounts,
            flights,
            sink,
        }
    }

    pub fn session(&self) -> Session {
        self.store.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    /// Startup session check. Failures collapse to `Anonymous` inside the
    /// store; nothing is reported to the sink.
    pub async fn restore_session(&self) -> Session {
        self.store.restore().await
    }

    pub async fn login(&self, email: &str, password: &str) -> ActionResult<User> {
        match self.accounts.login(email, password).await {
            Ok(response) => {
                let user = response.user;
                self.store
                    .set_session(response.access.into_inner(), user.clone());
                info!(email = %user.email, "logged in");
                self.sink.notify(Severity::Success, "Login successful!");
                Ok(user)
            }
            Err(err) => Err(self.action_failed(err)),
        }
    }

    /// Registration never authenticates; on success the user is routed
    /// back to the login flow.
    pub async fn register(&self, registration: &Registration) -> ActionResult<()> {
        if !registration.passwords_match() {
            self.sink.notify(Severity::Error, "Passwords do not match");
            return Err(ActionError::Failed(ApiError::Validation(
                "Passwords do not match".to_string(),
            )));
        }

        match self.accounts.register(registration).await {
            Ok(()) => {
                info!(email = %registration.email, "account registered");
                self.sink
                    .notify(Severity::Success, "Registration successful! Please login.");
                Ok(())
            }
            Err(err) => Err(self.action_failed(err)),
        }
    }

    pub fn logout(&self) {
        self.store.clear();
        info!("logged out");
        self.sink.notify(Severity::Info, "Logged out.");
    }

    pub async fn open_section(&self, section: Section) -> ActionResult<SectionView> {
        match section {
            Section::Home => Ok(SectionView::Home),
            Section::About => Ok(SectionView::About),
            Section::Contact => Ok(SectionView::Contact),
            Section::Flights => Ok(SectionView::Flights(self.list_flights().await?)),
            Section::Profile => {
                let (token, user) = self.require_login(PROFILE_LOGIN_PROMPT)?;
                let bookings = match self.flights.list_tickets(&token).await {
                    Ok(bookings) => bookings,
                    Err(err) if err.is_auth() => return Err(self.action_failed(err)),
                    Err(err) => {
                        // the profile still renders, just without bookings
                        warn!(error = %err, "failed to load bookings");
                        Vec::new()
                    }
                };
                Ok(SectionView::Profile { user, bookings })
            }
        }
    }

    /// Empty results are a valid outcome, reported as "Found 0 flights",
    /// never as a failure.
    pub async fn search_flights(&self, query: &FlightSearchQuery) -> ActionResult<Vec<Flight>> {
        match self.flights.search_flights(query).await {
            Ok(flights) => {
                self.sink
                    .notify(Severity::Info, &format!("Found {} flights", flights.len()));
                Ok(flights)
            }
            Err(err) => Err(self.failed_with_message(err, "Failed to search flights")),
        }
    }

    pub async fn list_flights(&self) -> ActionResult<Vec<Flight>> {
        match self.flights.list_flights().await {
            Ok(flights) => Ok(flights),
            Err(err) => Err(self.failed_with_message(err, "Failed to load flights")),
        }
    }

    /// Reference data for the search form. Failure leaves the caller with
    /// an empty list and a log line; it is not worth a notification.
    pub async fn load_airports(&self) -> Vec<Airport> {
        match self.flights.list_airports().await {
            Ok(airports) => airports,
            Err(err) => {
                warn!(error = %err, "failed to load airports");
                Vec::new()
            }
        }
    }

    /// Submits the price the user saw at selection time. On success the
    /// booking list is refreshed exactly once; a refresh failure does not
    /// undo the reported success.
    pub async fn book_flight(
        &self,
        flight_id: i64,
        seat_number: &str,
        price: &str,
    ) -> ActionResult<BookingOutcome> {
        let (token, _) = self.require_login(BOOKING_LOGIN_PROMPT)?;
        let request = BookingRequest {
            flight: flight_id,
            seat_number: seat_number.to_string(),
            price: price.to_string(),
        };

        match self.flights.create_ticket(&request, &token).await {
            Ok(ticket) => {
                info!(ticket = ticket.id, flight = flight_id, "booking created");
                self.sink.notify(Severity::Success, "Booking successful!");
                let bookings = match self.flights.list_tickets(&token).await {
                    Ok(bookings) => Some(bookings),
                    Err(err) => {
                        self.clear_if_auth(&err);
                        warn!(error = %err, "booking list refresh failed");
                        None
                    }
                };
                Ok(BookingOutcome { ticket, bookings })
            }
            Err(err) => Err(self.action_failed(err)),
        }
    }

    /// The in-memory account snapshot; no network round trip.
    pub fn load_profile(&self) -> ActionResult<User> {
        let (_, user) = self.require_login(PROFILE_LOGIN_PROMPT)?;
        Ok(user)
    }

    /// Full replacement of the mutable profile fields. The stored user
    /// snapshot is swapped wholesale with the backend's response.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ActionResult<User> {
        let (token, _) = self.require_login(PROFILE_LOGIN_PROMPT)?;
        match self.accounts.update_profile(update, &token).await {
            Ok(user) => {
                self.store.replace_user(user.clone());
                self.sink
                    .notify(Severity::Success, "Profile updated successfully!");
                Ok(user)
            }
            Err(err) => Err(self.action_failed(err)),
        }
    }

    pub async fn load_bookings(&self) -> ActionResult<Vec<Ticket>> {
        let (token, _) = self.require_login(PROFILE_LOGIN_PROMPT)?;
        match self.flights.list_tickets(&token).await {
            Ok(bookings) => Ok(bookings),
            Err(err) => Err(self.action_failed(err)),
        }
    }

    fn require_login(&self, prompt: &str) -> ActionResult<(String, User)> {
        match self.store.current() {
            Session::Authenticated { token, user } => Ok((token.into_inner(), user)),
            Session::Anonymous => {
                self.sink.notify(Severity::Error, prompt);
                Err(ActionError::LoginRequired)
            }
        }
    }

    /// Converts a backend failure into its user-facing notification:
    /// the extracted backend message, or the generic text for transport
    /// failures.
    fn action_failed(&self, err: ApiError) -> ActionError {
        let message = if err.is_network() {
            NETWORK_ERROR.to_string()
        } else {
            err.to_string()
        };
        self.failed_with_message(err, &message)
    }

    fn failed_with_message(&self, err: ApiError, message: &str) -> ActionError {
        // clear first so guarded actions re-gate before anyone reacts to
        // the notification
        self.clear_if_auth(&err);
        self.sink.notify(Severity::Error, message);
        ActionError::Failed(err)
    }

    fn clear_if_auth(&self, err: &ApiError) {
        if err.is_auth() {
            self.store.clear();
        }
    }
}
