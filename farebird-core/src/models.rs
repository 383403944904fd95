use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::pii::Masked;

/// Flight lifecycle status as reported by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    Scheduled,
    Boarding,
    Departed,
    Delayed,
    Cancelled,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "scheduled",
            FlightStatus::Boarding => "boarding",
            FlightStatus::Departed => "departed",
            FlightStatus::Delayed => "delayed",
            FlightStatus::Cancelled => "cancelled",
        }
    }
}

/// Ticket lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Booked,
    Paid,
    Failed,
    Used,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Booked => "booked",
            TicketStatus::Paid => "paid",
            TicketStatus::Failed => "failed",
            TicketStatus::Used => "used",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    OneWay,
    RoundTrip,
    MultiCity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub id: i64,
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
}

/// Read-only reference data, fetched once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airport {
    pub id: i64,
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub country: Option<Country>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airline {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub airport: Option<Airport>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airplane {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub slug: Option<String>,
    pub model: String,
    #[serde(default)]
    pub capacity: Option<i64>,
    pub airline: Airline,
}

/// A flight as served by the backend. The airline hangs off the airplane,
/// not off the flight itself; use [`Flight::airline_name`] for display.
/// The backend serves no price; see [`crate::quote`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    pub id: i64,
    pub flight_number: String,
    pub airplane: Airplane,
    pub departure_airport: Airport,
    pub arrival_airport: Airport,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub status: FlightStatus,
    /// Minutes, server-computed.
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub available_seats: Option<i64>,
}

impl Flight {
    pub fn airline_name(&self) -> &str {
        &self.airplane.airline.name
    }

    pub fn route(&self) -> String {
        format!(
            "{} -> {}",
            self.departure_airport.city, self.arrival_airport.city
        )
    }
}

/// A booking owned by the authenticated user.
///
/// `price` is a decimal the backend serializes as a JSON string
/// ("300.00"); it is carried verbatim and never reinterpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: i64,
    pub flight: Flight,
    pub seat_number: String,
    pub price: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub ticket_type: Option<TicketType>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Immutable account snapshot; replaced wholesale on profile update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Server-computed; display falls back to "first last" when absent.
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl User {
    pub fn display_name(&self) -> String {
        match &self.full_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// The backend's pagination envelope. Only `results` is consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Account creation payload. Passwords are masked in Debug output.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub password: Masked<String>,
    pub password2: Masked<String>,
}

impl Registration {
    pub fn passwords_match(&self) -> bool {
        self.password.0 == self.password2.0
    }
}

/// Full replacement of the mutable profile fields.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight_json() -> &'static str {
        r#"
        {
            "id": 42,
            "flight_number": "FB101",
            "airplane": {
                "id": 3,
                "slug": "a320",
                "model": "A320",
                "capacity": 180,
                "airline": {
                    "id": 1,
                    "slug": "farebird-air",
                    "name": "Farebird Air"
                }
            },
            "departure_airport": {"id": 1, "name": "Kennedy Intl", "city": "New York"},
            "arrival_airport": {"id": 2, "name": "Heathrow", "city": "London"},
            "departure_time": "2024-06-01T10:30:00Z",
            "arrival_time": "2024-06-01T18:45:00Z",
            "status": "scheduled",
            "duration": 495,
            "available_seats": 12
        }
        "#
    }

    #[test]
    fn test_flight_deserialization() {
        let flight: Flight = serde_json::from_str(flight_json()).expect("Failed to deserialize");
        assert_eq!(flight.id, 42);
        assert_eq!(flight.status, FlightStatus::Scheduled);
        assert_eq!(flight.airline_name(), "Farebird Air");
        assert_eq!(flight.route(), "New York -> London");
    }

    #[test]
    fn test_ticket_price_stays_a_string() {
        let json = format!(
            r#"{{
                "id": 7,
                "flight": {},
                "seat_number": "12A",
                "price": "300.00",
                "status": "booked",
                "ticket_type": "one_way"
            }}"#,
            flight_json()
        );
        let ticket: Ticket = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(ticket.price, "300.00");
        assert_eq!(ticket.status, TicketStatus::Booked);
        assert_eq!(ticket.ticket_type, Some(TicketType::OneWay));
    }

    #[test]
    fn test_user_display_name_fallback() {
        let json = r#"{"id": 1, "email": "a@x.com", "first_name": "Ada", "last_name": "Wong"}"#;
        let user: User = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(user.display_name(), "Ada Wong");
        assert_eq!(user.date_of_birth, None);

        let json = r#"
            {"id": 1, "email": "a@x.com", "username": "ada", "first_name": "Ada",
             "last_name": "Wong", "full_name": "Ada R. Wong", "date_of_birth": "1990-02-14"}
        "#;
        let user: User = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(user.display_name(), "Ada R. Wong");
        assert!(user.date_of_birth.is_some());
    }

    #[test]
    fn test_paginated_envelope() {
        let json = r#"{"count": 1, "next": null, "previous": null, "results": [{"id": 5, "name": "Schiphol", "city": "Amsterdam"}]}"#;
        let page: Paginated<Airport> = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].city, "Amsterdam");

        // Bare results are enough; the envelope fields are optional.
        let json = r#"{"results": []}"#;
        let page: Paginated<Airport> = serde_json::from_str(json).expect("Failed to deserialize");
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_registration_masks_passwords_in_debug() {
        let registration = Registration {
            first_name: "Ada".into(),
            last_name: "Wong".into(),
            username: "ada".into(),
            email: "a@x.com".into(),
            date_of_birth: None,
            password: Masked("s3cret!".to_string()),
            password2: Masked("s3cret!".to_string()),
        };
        let debugged = format!("{:?}", registration);
        assert!(!debugged.contains("s3cret!"));
        assert!(registration.passwords_match());

        let wire = serde_json::to_value(&registration).unwrap();
        assert_eq!(wire["password"], "s3cret!");
        assert_eq!(wire["password2"], "s3cret!");
    }
}
