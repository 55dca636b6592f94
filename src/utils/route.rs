//! Route pattern extraction utilities.

use actix_web::HttpRequest;

/// Extract the matched route pattern for metric labels.
///
/// Uses the resource pattern once routing has happened, so unknown paths all
/// share one label instead of creating a series per URL.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| "/unmatched".to_string())
}
