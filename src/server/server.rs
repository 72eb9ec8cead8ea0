use bytes::Bytes;
use http_body_util::Full;
use hyper::{
    body::Incoming,
    header::{HeaderValue, CONTENT_TYPE},
    service::Service,
    Method, Request, Response, StatusCode, Uri,
};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, error};
use url_escape::decode;

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use crate::{
    locations::{Location, Locations},
    timing::{summarize_week, BusinessHours, Clock, SystemClock},
};

use super::response::{HoursResponse, LocationSummary, NextOpenResponse, StatusResponse};

/// The Server
///
/// Answers the read-only opening-hours API for every configured location.
/// Locations are loaded once and shared behind an `Arc`; the evaluator holds
/// no state, so each connection gets its own cheap clone of this struct.
///
/// Implements hyper's `Service` trait so it can be handed straight to
/// `serve_connection`.
#[derive(Clone)]
pub struct Server<C = SystemClock> {
    locations: Arc<Locations>,
    hours: BusinessHours<C>,
    name_sanitizer: Regex,
}

impl<C: Clock> Server<C> {
    pub fn setup(locations: Arc<Locations>, hours: BusinessHours<C>) -> Result<Self, regex::Error> {
        Ok(Self {
            locations,
            hours,
            name_sanitizer: Regex::new(r"^\w+$")?,
        })
    }

    /// Parses the query parameters and returns a `hashmap` of key pair values
    /// Returns `None` if the parameters are malformed
    fn parse_params(text: &str) -> Option<HashMap<String, String>> {
        let mut map: HashMap<String, String> = HashMap::new();
        for pair in text.split('&') {
            let mut iterator = pair.split('=');
            map.insert(
                iterator.next()?.to_string(),
                decode(iterator.next()?).to_string(),
            );
        }
        Some(map)
    }

    /// Resolves the `name` query parameter to a known location.
    ///
    /// The error side is the response to send back: 400 for a missing or
    /// malformed name, 404 for a name nobody configured.
    fn location(&self, uri: &Uri) -> Result<&Location, Response<Full<Bytes>>> {
        let Some(params) = uri.query() else {
            return Err(Self::bad_request("Parameters not provided. Required name."));
        };
        let Some(map) = Self::parse_params(params) else {
            return Err(Self::bad_request("Malformed Parameters."));
        };
        let Some(name) = map.get("name") else {
            return Err(Self::bad_request("name not provided."));
        };
        if !self.name_sanitizer.is_match(name) {
            return Err(Self::bad_request("Malformed Name"));
        }
        self.locations
            .get(name)
            .ok_or_else(|| Self::not_found("Unknown location"))
    }

    /// The /api/status API endpoint.
    ///
    /// 200 with the evaluated status, or 204 when the location exists but its
    /// schedule is not configured.
    fn status(&self, uri: &Uri) -> Response<Full<Bytes>> {
        let location = match self.location(uri) {
            Ok(location) => location,
            Err(res) => return res,
        };
        let Some(schedule) = &location.schedule else {
            return Self::no_data();
        };
        Self::ok_data(StatusResponse {
            name: &location.name,
            timezone: &location.timezone,
            status: self.hours.is_open(schedule, &location.timezone),
        })
    }

    /// The /api/hours API endpoint. The week's hours for display, Monday first.
    fn week_hours(&self, uri: &Uri) -> Response<Full<Bytes>> {
        let location = match self.location(uri) {
            Ok(location) => location,
            Err(res) => return res,
        };
        let Some(schedule) = &location.schedule else {
            return Self::no_data();
        };
        Self::ok_data(HoursResponse {
            name: &location.name,
            timezone: &location.timezone,
            hours: summarize_week(schedule),
        })
    }

    /// The /api/next API endpoint. `nextOpen` is null for a location that never opens.
    fn next_open(&self, uri: &Uri) -> Response<Full<Bytes>> {
        let location = match self.location(uri) {
            Ok(location) => location,
            Err(res) => return res,
        };
        let Some(schedule) = &location.schedule else {
            return Self::no_data();
        };
        Self::ok_data(NextOpenResponse {
            name: &location.name,
            next_open: self.hours.find_next_open_time(schedule, &location.timezone),
        })
    }

    /// The /api/locations API endpoint.
    fn list_locations(&self) -> Response<Full<Bytes>> {
        let summaries: Vec<LocationSummary> = self.locations.iter().map(Into::into).collect();
        Self::ok_data(summaries)
    }

    /// Routes a request. Everything except the GET endpoints below is a 404.
    pub fn respond(&self, method: &Method, uri: &Uri) -> Response<Full<Bytes>> {
        debug!("{} {}", method, uri);
        match method {
            &Method::GET => match uri.path() {
                "/api/status" => self.status(uri),
                "/api/hours" => self.week_hours(uri),
                "/api/next" => self.next_open(uri),
                "/api/locations" => self.list_locations(),
                "/health" => Self::ok_data(serde_json::json!({ "status": "ok" })),
                _ => Self::not_found(""),
            },
            _ => Self::not_found(""),
        }
    }

    fn json(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
        let mut res = Response::new(Full::new(body));
        *res.status_mut() = status;
        if status != StatusCode::NO_CONTENT {
            res.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        res
    }

    fn error_body(message: &str) -> Bytes {
        Bytes::from(serde_json::json!({ "error": message }).to_string())
    }

    /// Return a 200 OK response with the data provided.
    fn ok_data<T: Serialize>(body: T) -> Response<Full<Bytes>> {
        match serde_json::to_vec(&body) {
            Ok(data) => Self::json(StatusCode::OK, Bytes::from(data)),
            Err(err) => {
                error!("Could not serialize response: {}", err);
                Self::server_error("Could not serialize response")
            }
        }
    }

    /// Return a 500 Internal Server Error response with the message provided.
    fn server_error(message: &str) -> Response<Full<Bytes>> {
        Self::json(StatusCode::INTERNAL_SERVER_ERROR, Self::error_body(message))
    }

    /// Return a 404 Not Found response with the message provided. The message here is optional.
    /// Leave it empty for no message.
    fn not_found(message: &str) -> Response<Full<Bytes>> {
        let body = if message.is_empty() {
            Bytes::new()
        } else {
            Self::error_body(message)
        };
        Self::json(StatusCode::NOT_FOUND, body)
    }

    /// Return a 400 Bad Request response with the message provided.
    fn bad_request(message: &str) -> Response<Full<Bytes>> {
        Self::json(StatusCode::BAD_REQUEST, Self::error_body(message))
    }

    /// Return a 204 No Content response.
    fn no_data() -> Response<Full<Bytes>> {
        Self::json(StatusCode::NO_CONTENT, Bytes::new())
    }
}

impl<C> Service<Request<Incoming>> for Server<C>
where
    C: Clock + Clone + Send + Sync + 'static,
{
    type Response = Response<Full<Bytes>>;
    type Error = hyper::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let res = self.respond(req.method(), req.uri());
        Box::pin(async { Ok(res) })
    }
}
