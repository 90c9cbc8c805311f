//! Client-side navigation.

/// Performs redirects on behalf of the API gateway.
pub trait Navigator: Send + Sync {
    /// Replace the current location with `route`.
    fn navigate(&self, route: &str);
}
