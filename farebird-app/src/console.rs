//! Line-oriented console adapter: maps commands to controller calls and
//! prints what comes back. All user-visible outcomes of an action arrive
//! through [`ConsoleNotifier`]; failures are not handled here again.

use std::io::{self, Write as _};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use farebird_core::models::{ProfileUpdate, Registration};
use farebird_core::notify::{NotificationSink, Severity};
use farebird_core::pii::Masked;
use farebird_core::quote::quoted_price;
use farebird_core::search::FlightSearchQuery;
use farebird_core::session::{Session, SessionObserver};
use farebird_workflow::{BookingController, Section, SectionView};

use crate::render;

const HELP: &str = "\
commands:
  home | flights | about | contact | profile
  airports                                list airports and their ids
  search <from> <to> <date> <n> [return]  search flights (airport ids, YYYY-MM-DD)
  book <flight-id> <seat>                 book a flight at the shown price
  bookings                                list your bookings
  login <email> <password>
  register                                create an account
  update-profile                          edit your profile
  logout
  message <text>                          contact the team
  help | quit";

/// Prints notifications as bracketed severity lines.
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        println!("[{}] {}", severity.as_str(), message);
    }
}

/// Keeps the terminal's auth indicator current across session changes.
pub struct AuthBadge;

impl SessionObserver for AuthBadge {
    fn session_changed(&self, session: &Session) {
        match session.user() {
            Some(user) => println!("* signed in as {}", user.display_name()),
            None => println!("* signed out"),
        }
    }
}

pub async fn run(controller: BookingController, notifier: Arc<ConsoleNotifier>) -> io::Result<()> {
    Console {
        controller,
        notifier,
        lines: BufReader::new(tokio::io::stdin()).lines(),
    }
    .run()
    .await
}

struct Console {
    controller: BookingController,
    notifier: Arc<ConsoleNotifier>,
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    async fn run(&mut self) -> io::Result<()> {
        self.controller.restore_session().await;

        let airports = self.controller.load_airports().await;
        println!("Welcome to Farebird.");
        if !airports.is_empty() {
            println!("Airports:");
            println!("{}", render::render_airports(&airports));
        }
        println!("{HELP}");

        loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = self.lines.next_line().await? else {
                break;
            };
            if !self.dispatch(line.trim()).await? {
                break;
            }
        }
        Ok(())
    }

    /// Returns `false` when the user asked to quit.
    async fn dispatch(&mut self, line: &str) -> io::Result<bool> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(true);
        };
        let args: Vec<&str> = parts.collect();

        match command {
            "help" => println!("{HELP}"),
            "quit" | "exit" => return Ok(false),
            "home" => self.open(Section::Home).await,
            "flights" => self.open(Section::Flights).await,
            "about" => self.open(Section::About).await,
            "contact" => self.open(Section::Contact).await,
            "profile" => self.open(Section::Profile).await,
            "airports" => {
                let airports = self.controller.load_airports().await;
                println!("{}", render::render_airports(&airports));
            }
            "login" => self.login(&args).await,
            "register" => self.register().await?,
            "logout" => self.controller.logout(),
            "search" => self.search(&args).await,
            "book" => self.book(&args).await,
            "bookings" => self.bookings().await,
            "update-profile" => self.update_profile().await?,
            "message" => {
                if args.is_empty() {
                    println!("usage: message <text>");
                } else {
                    self.notifier.notify(
                        Severity::Success,
                        "Thank you for your message! We will get back to you soon.",
                    );
                }
            }
            other => println!("unknown command: {other} (try: help)"),
        }
        Ok(true)
    }

    async fn open(&self, section: Section) {
        match self.controller.open_section(section).await {
            Ok(SectionView::Home) => {
                println!("Find your perfect flight. Search, compare and book.");
            }
            Ok(SectionView::About) => {
                println!("Farebird compares flights across airlines and books them in seconds.");
            }
            Ok(SectionView::Contact) => {
                println!("Questions? Send us a note with: message <text>");
            }
            Ok(SectionView::Flights(flights)) => {
                println!("{}", render::render_flights(&flights));
            }
            Ok(SectionView::Profile { user, bookings }) => {
                println!("{}", render::render_profile(&user));
                println!("Your bookings:");
                println!("{}", render::render_bookings(&bookings));
            }
            Err(_) => {}
        }
    }

    async fn login(&self, args: &[&str]) {
        let [email, password] = args else {
            println!("usage: login <email> <password>");
            return;
        };
        let _ = self.controller.login(email, password).await;
    }

    async fn register(&mut self) -> io::Result<()> {
        let Some(first_name) = self.prompt("First name: ").await? else {
            return Ok(());
        };
        let Some(last_name) = self.prompt("Last name: ").await? else {
            return Ok(());
        };
        let Some(username) = self.prompt("Username: ").await? else {
            return Ok(());
        };
        let Some(email) = self.prompt("Email: ").await? else {
            return Ok(());
        };
        let Some(date_of_birth) = self
            .prompt("Date of birth (YYYY-MM-DD, blank to skip): ")
            .await?
        else {
            return Ok(());
        };
        let Some(password) = self.prompt("Password: ").await? else {
            return Ok(());
        };
        let Some(password2) = self.prompt("Confirm password: ").await? else {
            return Ok(());
        };

        let registration = Registration {
            first_name,
            last_name,
            username,
            email,
            date_of_birth: date_of_birth.parse().ok(),
            password: Masked(password),
            password2: Masked(password2),
        };
        let _ = self.controller.register(&registration).await;
        Ok(())
    }

    async fn search(&self, args: &[&str]) {
        let Some(query) = parse_search(args) else {
            println!("usage: search <from-id> <to-id> <YYYY-MM-DD> <passengers> [return YYYY-MM-DD]");
            return;
        };
        if let Ok(flights) = self.controller.search_flights(&query).await {
            println!("{}", render::render_flights(&flights));
        }
    }

    async fn book(&self, args: &[&str]) {
        let (Some(flight_id), Some(seat)) =
            (args.first().and_then(|id| id.parse::<i64>().ok()), args.get(1))
        else {
            println!("usage: book <flight-id> <seat>");
            return;
        };

        // submit the price shown on the flight card
        let price = quoted_price(flight_id).to_string();
        if let Ok(outcome) = self.controller.book_flight(flight_id, seat, &price).await {
            if let Some(bookings) = outcome.bookings {
                println!("Your bookings:");
                println!("{}", render::render_bookings(&bookings));
            }
        }
    }

    async fn bookings(&self) {
        if let Ok(bookings) = self.controller.load_bookings().await {
            println!("{}", render::render_bookings(&bookings));
        }
    }

    async fn update_profile(&mut self) -> io::Result<()> {
        let Ok(current) = self.controller.load_profile() else {
            return Ok(());
        };

        println!("Leave a field blank to keep the current value.");
        let Some(first_name) = self
            .prompt(&format!("First name [{}]: ", current.first_name))
            .await?
        else {
            return Ok(());
        };
        let Some(last_name) = self
            .prompt(&format!("Last name [{}]: ", current.last_name))
            .await?
        else {
            return Ok(());
        };
        let Some(email) = self.prompt(&format!("Email [{}]: ", current.email)).await? else {
            return Ok(());
        };
        let current_dob = current
            .date_of_birth
            .map(|date| date.to_string())
            .unwrap_or_default();
        let Some(date_of_birth) = self
            .prompt(&format!("Date of birth [{current_dob}]: "))
            .await?
        else {
            return Ok(());
        };

        let update = ProfileUpdate {
            first_name: or_keep(first_name, current.first_name),
            last_name: or_keep(last_name, current.last_name),
            email: or_keep(email, current.email),
            date_of_birth: if date_of_birth.is_empty() {
                current.date_of_birth
            } else {
                date_of_birth.parse().ok()
            },
        };
        if let Ok(updated) = self.controller.update_profile(&update).await {
            println!("{}", render::render_profile(&updated));
        }
        Ok(())
    }

    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        print!("{label}");
        io::stdout().flush()?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }
}

fn or_keep(entered: String, current: String) -> String {
    if entered.is_empty() {
        current
    } else {
        entered
    }
}

fn parse_search(args: &[&str]) -> Option<FlightSearchQuery> {
    if args.len() < 4 || args.len() > 5 {
        return None;
    }
    let departure_airport = args[0].parse().ok()?;
    let arrival_airport = args[1].parse().ok()?;
    let departure_date: NaiveDate = args[2].parse().ok()?;
    let passengers = args[3].parse().ok()?;

    let query = match args.get(4) {
        Some(return_date) => FlightSearchQuery::round_trip(
            departure_airport,
            arrival_airport,
            departure_date,
            return_date.parse().ok()?,
            passengers,
        ),
        None => FlightSearchQuery::one_way(
            departure_airport,
            arrival_airport,
            departure_date,
            passengers,
        ),
    };
    Some(query)
}
