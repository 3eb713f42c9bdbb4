use http::Method;
use http::header::HeaderName;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use waifu_config::{AnyOrArray, CorsConfig};

/// Build a Tower CORS layer from configuration
///
/// Entries that do not parse as origins, methods or header names are skipped
/// with a warning.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    layer = match &config.origins {
        AnyOrArray::Any => layer.allow_origin(AllowOrigin::any()),
        AnyOrArray::List(origins) => layer.allow_origin(parse_all::<http::HeaderValue>("origin", origins)),
    };

    layer = match &config.methods {
        AnyOrArray::Any => layer.allow_methods(AllowMethods::any()),
        AnyOrArray::List(methods) => layer.allow_methods(parse_all::<Method>("method", methods)),
    };

    layer = match &config.headers {
        AnyOrArray::Any => layer.allow_headers(AllowHeaders::any()),
        AnyOrArray::List(headers) => layer.allow_headers(parse_all::<HeaderName>("header", headers)),
    };

    // Browsers hide Content-Disposition unless it is exposed
    if !config.expose_headers.is_empty() {
        layer = layer.expose_headers(parse_all::<HeaderName>("expose header", &config.expose_headers));
    }

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}

fn parse_all<T: std::str::FromStr>(kind: &str, values: &[String]) -> Vec<T> {
    values
        .iter()
        .filter_map(|value| {
            let parsed = value.parse().ok();
            if parsed.is_none() {
                tracing::warn!("ignoring invalid CORS {kind}: {value}");
            }
            parsed
        })
        .collect()
}
