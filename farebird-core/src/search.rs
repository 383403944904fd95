use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    OneWay,
    RoundTrip,
}

/// Parameters for the flight search endpoint.
///
/// `return_date` is private so the one-way/round-trip invariant holds by
/// construction: a one-way query can never carry a return date, and the
/// serialized query string omits the `return_time` key entirely for
/// one-way trips rather than sending it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightSearchQuery {
    pub departure_airport: i64,
    pub arrival_airport: i64,
    pub departure_date: NaiveDate,
    return_date: Option<NaiveDate>,
    pub passengers: u32,
}

impl FlightSearchQuery {
    pub fn one_way(
        departure_airport: i64,
        arrival_airport: i64,
        departure_date: NaiveDate,
        passengers: u32,
    ) -> Self {
        Self {
            departure_airport,
            arrival_airport,
            departure_date,
            return_date: None,
            passengers,
        }
    }

    pub fn round_trip(
        departure_airport: i64,
        arrival_airport: i64,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        passengers: u32,
    ) -> Self {
        Self {
            departure_airport,
            arrival_airport,
            departure_date,
            return_date: Some(return_date),
            passengers,
        }
    }

    pub fn trip_type(&self) -> TripType {
        if self.return_date.is_some() {
            TripType::RoundTrip
        } else {
            TripType::OneWay
        }
    }

    pub fn return_date(&self) -> Option<NaiveDate> {
        self.return_date
    }

    /// Key/value pairs for the flight list endpoint, in the order the
    /// backend documents them. `return_time` is appended only for
    /// round trips.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("departure_airport", self.departure_airport.to_string()),
            ("arrival_airport", self.arrival_airport.to_string()),
            ("departure_time", self.departure_date.to_string()),
            ("passengers", self.passengers.to_string()),
        ];
        if let Some(return_date) = self.return_date {
            params.push(("return_time", return_date.to_string()));
        }
        params
    }
}
