//! CORS headers middleware for the browser client.

use crate::config::CorsConfig;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{self, HeaderValue},
};
use std::{
    future::{Ready, ready},
    pin::Pin,
};

/// CORS headers middleware factory
pub struct CorsHeaders {
    config: CorsConfig,
}

impl CorsHeaders {
    /// Create a new CORS middleware with the given configuration
    pub fn new(config: CorsConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CorsHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsHeadersMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsHeadersMiddleware {
            service,
            config: self.config.clone(),
        }))
    }
}

/// The actual CORS middleware service
pub struct CorsHeadersMiddleware<S> {
    service: S,
    config: CorsConfig,
}

impl<S, B> Service<ServiceRequest> for CorsHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        let config = self.config.clone();

        Box::pin(async move {
            let mut res = fut.await?;
            let headers = res.headers_mut();

            if let Ok(value) = HeaderValue::from_str(&config.allowed_origin) {
                headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
            }

            if let Ok(value) = HeaderValue::from_str(&config.allowed_methods) {
                headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, value);
            }

            if let Ok(value) = HeaderValue::from_str(&config.allowed_headers) {
                headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
            }

            headers.insert(
                header::ACCESS_CONTROL_EXPOSE_HEADERS,
                HeaderValue::from_static("x-request-id"),
            );

            if let Ok(value) = HeaderValue::from_str(&config.max_age_seconds.to_string()) {
                headers.insert(header::ACCESS_CONTROL_MAX_AGE, value);
            }

            // A single configured origin makes responses origin-specific for caches
            if !config.is_wildcard() {
                headers.append(header::VARY, HeaderValue::from_static("Origin"));
            }

            Ok(res)
        })
    }
}
