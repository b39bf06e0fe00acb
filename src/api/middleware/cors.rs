//! CORS middleware for the browser-facing API.

use tower_http::cors::CorsLayer;

/// Permissive CORS: any origin, method, and headers.
///
/// The shorten/analytics endpoints are called from a static frontend
/// served on a different origin.
pub fn layer() -> CorsLayer {
    CorsLayer::permissive()
}
