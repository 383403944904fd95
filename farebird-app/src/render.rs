//! Plain-text rendering of backend data, the console stand-in for the
//! web client's HTML fragments.

use chrono::{DateTime, Utc};

use farebird_core::models::{Airport, Flight, Ticket, User};
use farebird_core::quote::quoted_price;

pub fn render_airports(airports: &[Airport]) -> String {
    if airports.is_empty() {
        return "No airports available.".to_string();
    }
    airports
        .iter()
        .map(|airport| format!("  [{}] {} ({})", airport.id, airport.name, airport.city))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_flights(flights: &[Flight]) -> String {
    if flights.is_empty() {
        return "No flights found for your search criteria.".to_string();
    }
    flights
        .iter()
        .map(render_flight)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One flight card. The price is the deterministic display quote; the
/// same value is submitted if the flight gets booked.
pub fn render_flight(flight: &Flight) -> String {
    format!(
        "{}  [{}]  {}\n  {} ({}) -> {} ({})\n  {} -> {}  ({})\n  ${}  book {} <seat>",
        flight.flight_number,
        flight.status.as_str(),
        flight.airline_name(),
        flight.departure_airport.city,
        flight.departure_airport.name,
        flight.arrival_airport.city,
        flight.arrival_airport.name,
        format_time(flight.departure_time),
        format_time(flight.arrival_time),
        format_duration(flight),
        quoted_price(flight.id),
        flight.id,
    )
}

pub fn render_bookings(bookings: &[Ticket]) -> String {
    if bookings.is_empty() {
        return "No bookings found.".to_string();
    }
    bookings
        .iter()
        .map(|booking| {
            format!(
                "Flight {}  [{}]\n  {}\n  Seat: {} | Price: ${}\n  Date: {}",
                booking.flight.flight_number,
                booking.status.as_str(),
                booking.flight.route(),
                booking.seat_number,
                booking.price,
                format_date(booking.flight.departure_time),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_profile(user: &User) -> String {
    let mut lines = vec![user.display_name(), format!("  email: {}", user.email)];
    if !user.username.is_empty() {
        lines.push(format!("  username: {}", user.username));
    }
    if let Some(date_of_birth) = user.date_of_birth {
        lines.push(format!("  date of birth: {date_of_birth}"));
    }
    lines.join("\n")
}

pub fn format_duration(flight: &Flight) -> String {
    let minutes = flight
        .duration
        .unwrap_or_else(|| (flight.arrival_time - flight.departure_time).num_minutes());
    format!("{}h {}m", minutes / 60, minutes % 60)
}

fn format_time(at: DateTime<Utc>) -> String {
    at.format("%-I:%M %p").to_string()
}

fn format_date(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use farebird_core::models::{Airline, Airplane, FlightStatus, TicketStatus, TicketType};

    fn airport(id: i64, name: &str, city: &str) -> Airport {
        Airport {
            id,
            slug: None,
            name: name.into(),
            city: city.into(),
            country: None,
        }
    }

    fn flight() -> Flight {
        Flight {
            id: 42,
            flight_number: "FB101".into(),
            airplane: Airplane {
                id: Some(3),
                slug: None,
                model: "A320".into(),
                capacity: Some(180),
                airline: Airline {
                    id: Some(1),
                    slug: None,
                    name: "Farebird Air".into(),
                    airport: None,
                },
            },
            departure_airport: airport(1, "Kennedy Intl", "New York"),
            arrival_airport: airport(2, "Heathrow", "London"),
            departure_time: "2024-06-01T10:30:00Z".parse().unwrap(),
            arrival_time: "2024-06-01T18:45:00Z".parse().unwrap(),
            status: FlightStatus::Scheduled,
            duration: Some(495),
            available_seats: Some(12),
        }
    }

    fn ticket() -> Ticket {
        Ticket {
            id: 7,
            flight: flight(),
            seat_number: "12A".into(),
            price: "300.00".into(),
            status: TicketStatus::Booked,
            ticket_type: Some(TicketType::OneWay),
            created_at: None,
        }
    }

    #[test]
    fn test_empty_flight_list_message() {
        assert_eq!(
            render_flights(&[]),
            "No flights found for your search criteria."
        );
    }

    #[test]
    fn test_flight_card_contents() {
        let card = render_flight(&flight());
        assert!(card.contains("FB101"));
        assert!(card.contains("[scheduled]"));
        assert!(card.contains("Farebird Air"));
        assert!(card.contains("New York (Kennedy Intl) -> London (Heathrow)"));
        assert!(card.contains("8h 15m"));
        assert!(card.contains("book 42 <seat>"));
    }

    #[test]
    fn test_card_price_is_the_booking_quote() {
        let card = render_flight(&flight());
        assert!(card.contains(&format!("${}", quoted_price(42))));
    }

    #[test]
    fn test_times_render_in_twelve_hour_clock() {
        let card = render_flight(&flight());
        assert!(card.contains("10:30 AM"));
        assert!(card.contains("6:45 PM"));
    }

    #[test]
    fn test_duration_falls_back_to_timestamps() {
        let mut no_duration = flight();
        no_duration.duration = None;
        assert_eq!(format_duration(&no_duration), "8h 15m");
    }

    #[test]
    fn test_empty_bookings_message() {
        assert_eq!(render_bookings(&[]), "No bookings found.");
    }

    #[test]
    fn test_booking_shows_seat_price_and_date() {
        let listing = render_bookings(&[ticket()]);
        assert!(listing.contains("Flight FB101  [booked]"));
        assert!(listing.contains("New York -> London"));
        assert!(listing.contains("Seat: 12A | Price: $300.00"));
        assert!(listing.contains("Date: June 1, 2024"));
    }

    #[test]
    fn test_profile_uses_display_name_and_skips_blank_fields() {
        let user = User {
            id: 1,
            email: "a@x.com".into(),
            username: String::new(),
            first_name: "Ada".into(),
            last_name: "Wong".into(),
            full_name: None,
            date_of_birth: None,
        };
        let profile = render_profile(&user);
        assert!(profile.starts_with("Ada Wong"));
        assert!(profile.contains("email: a@x.com"));
        assert!(!profile.contains("username"));
        assert!(!profile.contains("date of birth"));
    }

    #[test]
    fn test_airport_listing_shows_ids_for_search() {
        let listing = render_airports(&[
            airport(1, "Kennedy Intl", "New York"),
            airport(2, "Heathrow", "London"),
        ]);
        assert!(listing.contains("[1] Kennedy Intl (New York)"));
        assert!(listing.contains("[2] Heathrow (London)"));
        assert_eq!(render_airports(&[]), "No airports available.");
    }
}
