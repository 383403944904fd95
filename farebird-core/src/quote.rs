//! Placeholder display prices.
//!
//! The backend serves no price for a flight, yet a booking submits one.
//! The quote shown on a flight card is a pure function of the flight id
//! in the $200 to $699 band, so repeated renders of one flight agree and
//! the price submitted with a booking always equals the price displayed
//! at selection time.

/// Whole-dollar quote for a flight, always in 200..=699.
pub fn quoted_price(flight_id: i64) -> u32 {
    // splitmix64-style finalizer, keeps nearby ids from clustering
    let mut h = (flight_id as u64).wrapping_add(0x9e37_79b9_7f4a_7c15);
    h = (h ^ (h >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    h = (h ^ (h >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    h ^= h >> 31;
    200 + (h % 500) as u32
}
