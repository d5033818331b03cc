//! HTTP client for a Nominatim-compatible geocoding service.
//!
//! The public instance allows roughly one request per second and requires an
//! identifying `User-Agent`; pair this client with a
//! [`RateLimiter`](crate::RateLimiter).

use std::time::Duration;

use activecalls_core::Coordinates;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::GeocodeError;
use crate::geocoder::{AddressComponents, Geocoder};

/// Nominatim serializes coordinates as strings; some compatible services
/// use numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CoordinateValue {
    Text(String),
    Number(f64),
}

impl CoordinateValue {
    fn to_f64(&self) -> Result<f64, GeocodeError> {
        let value = match self {
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| GeocodeError::InvalidCoordinate(text.clone()))?,
            Self::Number(n) => *n,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(GeocodeError::InvalidCoordinate(value.to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchPlace {
    lat: CoordinateValue,
    lon: CoordinateValue,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<AddressComponents>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the `/search` and `/reverse` endpoints.
pub struct NominatimClient {
    client: Client,
    search_url: Url,
    reverse_url: Url,
}

impl NominatimClient {
    /// Creates a client rooted at `base_url` (e.g.
    /// `https://nominatim.openstreetmap.org`, or a wiremock URI in tests).
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    /// - [`GeocodeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, user_agent: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends rather than replaces
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| GeocodeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        let search_url = base.join("search").map_err(|e| invalid(e.to_string()))?;
        let reverse_url = base.join("reverse").map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            search_url,
            reverse_url,
        })
    }

    fn search_request_url(&self, query: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1");
        url
    }

    fn reverse_request_url(&self, at: Coordinates) -> Url {
        let mut url = self.reverse_url.clone();
        url.query_pairs_mut()
            .append_pair("lat", &at.latitude.to_string())
            .append_pair("lon", &at.longitude.to_string())
            .append_pair("format", "jsonv2")
            .append_pair("addressdetails", "1")
            .append_pair("accept-language", "en");
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, GeocodeError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| GeocodeError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn forward(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let url = self.search_request_url(query);
        let places: Vec<SearchPlace> = self
            .get_json(url, &format!("search(q={query})"))
            .await?;

        let Some(place) = places.first() else {
            return Ok(None);
        };
        Ok(Some(Coordinates::new(
            place.lat.to_f64()?,
            place.lon.to_f64()?,
        )))
    }

    async fn reverse(&self, at: Coordinates) -> Result<Option<AddressComponents>, GeocodeError> {
        let url = self.reverse_request_url(at);
        let response: ReverseResponse = self
            .get_json(
                url,
                &format!("reverse(lat={}, lon={})", at.latitude, at.longitude),
            )
            .await?;

        if let Some(error) = response.error {
            tracing::debug!(
                lat = at.latitude,
                lng = at.longitude,
                error = %error,
                "reverse geocoder returned no address"
            );
            return Ok(None);
        }
        Ok(response.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> NominatimClient {
        NominatimClient::new(base, "activecalls-test/0.1", 5).unwrap()
    }

    #[test]
    fn search_url_carries_query_and_single_result_limit() {
        let url = client("https://nominatim.example.org")
            .search_request_url("123 MAIN ST, Richmond, VA");
        assert_eq!(url.path(), "/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".to_owned(), "123 MAIN ST, Richmond, VA".to_owned())));
        assert!(pairs.contains(&("limit".to_owned(), "1".to_owned())));
        assert!(pairs.contains(&("format".to_owned(), "jsonv2".to_owned())));
    }

    #[test]
    fn reverse_url_requests_english_address_details() {
        let url = client("https://nominatim.example.org/")
            .reverse_request_url(Coordinates::new(37.5, -77.25));
        assert_eq!(url.path(), "/reverse");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("lat".to_owned(), "37.5".to_owned())));
        assert!(pairs.contains(&("lon".to_owned(), "-77.25".to_owned())));
        assert!(pairs.contains(&("accept-language".to_owned(), "en".to_owned())));
        assert!(pairs.contains(&("addressdetails".to_owned(), "1".to_owned())));
    }

    #[test]
    fn base_url_path_prefix_is_kept() {
        let url = client("http://localhost:8080/nominatim").search_request_url("x");
        assert_eq!(url.path(), "/nominatim/search");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = NominatimClient::new("not a url", "activecalls-test/0.1", 5);
        assert!(matches!(result, Err(GeocodeError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn coordinate_value_accepts_strings_and_numbers() {
        let text = CoordinateValue::Text(" 37.54 ".to_owned()).to_f64().unwrap();
        assert!((text - 37.54).abs() < 1e-9);
        let number = CoordinateValue::Number(-77.43).to_f64().unwrap();
        assert!((number + 77.43).abs() < 1e-9);
        assert!(matches!(
            CoordinateValue::Text("north".to_owned()).to_f64(),
            Err(GeocodeError::InvalidCoordinate(_))
        ));
    }
}
