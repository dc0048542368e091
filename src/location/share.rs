//! Share-link generation for live location.

use super::types::Coordinates;

/// Builds a Google Maps link for the given position.
///
/// The link is what gets sent to trusted contacts when the user shares
/// their live location.
///
/// # Examples
///
/// ```
/// use aegis_core::location::{maps_share_url, Coordinates};
///
/// let url = maps_share_url(Coordinates::new(37.7749, -122.4194));
/// assert_eq!(url, "https://www.google.com/maps?q=37.7749,-122.4194");
/// ```
#[must_use]
pub fn maps_share_url(position: Coordinates) -> String {
    format!(
        "https://www.google.com/maps?q={},{}",
        position.latitude, position.longitude
    )
}
