use async_trait::async_trait;

use farebird_core::api::{BookingRequest, FlightsApi};
use farebird_core::models::{Airport, Flight, Paginated, Ticket};
use farebird_core::search::FlightSearchQuery;
use farebird_core::ApiResult;

use crate::http::ApiClient;

#[async_trait]
impl FlightsApi for ApiClient {
    async fn list_airports(&self) -> ApiResult<Vec<Airport>> {
        let page: Paginated<Airport> = self.send(self.http.get(self.url("/flight/airports/"))).await?;
        Ok(page.results)
    }

    async fn list_flights(&self) -> ApiResult<Vec<Flight>> {
        let page: Paginated<Flight> = self.send(self.http.get(self.url("/flight/flights/"))).await?;
        Ok(page.results)
    }

    async fn search_flights(&self, query: &FlightSearchQuery) -> ApiResult<Vec<Flight>> {
        let params = query.query_params();
        tracing::debug!(?params, "searching flights");
        let page: Paginated<Flight> = self
            .send(self.http.get(self.url("/flight/flights/")).query(&params))
            .await?;
        Ok(page.results)
    }

    async fn create_ticket(&self, request: &BookingRequest, token: &str) -> ApiResult<Ticket> {
        tracing::debug!(flight = request.flight, "submitting booking");
        self.send(
            self.http
                .post(self.url("/flight/tickets/"))
                .bearer_auth(token)
                .json(request),
        )
        .await
    }

    async fn list_tickets(&self, token: &str) -> ApiResult<Vec<Ticket>> {
        let page: Paginated<Ticket> = self
            .send(
                self.http
                    .get(self.url("/flight/tickets/"))
                    .bearer_auth(token),
            )
            .await?;
        Ok(page.results)
    }
}
