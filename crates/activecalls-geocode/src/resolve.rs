//! Forward and reverse resolution with failure absorption.
//!
//! Both resolvers log and swallow every [`GeocodeError`](crate::GeocodeError):
//! a miss on one record must not stop the batch.

use activecalls_core::Coordinates;

use crate::geocoder::{AddressComponents, Geocoder};

/// Builds the forward-geocoding query for `fragment`.
#[must_use]
pub fn geocode_query(fragment: &str, city_context: &str) -> String {
    format!("{fragment}, {city_context}")
}

/// Resolves an address fragment to coordinates, or `None` on a miss or any
/// service error.
pub async fn forward_geocode<G>(
    geocoder: &G,
    fragment: &str,
    city_context: &str,
) -> Option<Coordinates>
where
    G: Geocoder + ?Sized,
{
    let query = geocode_query(fragment, city_context);
    tracing::info!(query = %query, "geocoding");

    match geocoder.forward(&query).await {
        Ok(Some(found)) => {
            tracing::info!(lat = found.latitude, lng = found.longitude, "geocoded");
            Some(found)
        }
        Ok(None) => {
            tracing::warn!(query = %query, "could not geocode address");
            None
        }
        Err(e) => {
            tracing::warn!(query = %query, error = %e, "geocoding error");
            None
        }
    }
}

/// Best-effort nearest road/intersection label for `at`.
///
/// Absent coordinates short-circuit to an empty label without calling the
/// service. Errors and empty responses also yield an empty label.
pub async fn nearest_intersection<G>(geocoder: &G, at: Option<Coordinates>) -> String
where
    G: Geocoder + ?Sized,
{
    let Some(at) = at else {
        return String::new();
    };

    let label = match geocoder.reverse(at).await {
        Ok(Some(address)) => intersection_label(&address),
        Ok(None) => String::new(),
        Err(e) => {
            tracing::warn!(
                lat = at.latitude,
                lng = at.longitude,
                error = %e,
                "reverse geocoding error"
            );
            String::new()
        }
    };

    if label.is_empty() {
        tracing::info!("no intersection found");
    } else {
        tracing::info!(intersection = %label, "nearest intersection");
    }
    label
}

/// Picks a human-readable label from a reverse-geocoded address.
///
/// The road is the first non-empty of `road`, `street`, `pedestrian`. A road
/// containing `&` or `/` already names an intersection and is returned
/// alone; otherwise the result is `"road, suburb"`, `road`, `suburb` or
/// empty, depending on which are present.
#[must_use]
pub fn intersection_label(address: &AddressComponents) -> String {
    fn present(field: &Option<String>) -> Option<&str> {
        field.as_deref().filter(|v| !v.is_empty())
    }


    let road = present(&address.road)
        .or_else(|| present(&address.street))
        .or_else(|| present(&address.pedestrian));
    let suburb = present(&address.suburb);

    match (road, suburb) {
        (Some(road), _) if road.contains('&') || road.contains('/') => road.to_owned(),
        (Some(road), Some(suburb)) => format!("{road}, {suburb}"),
        (Some(road), None) => road.to_owned(),
        (None, Some(suburb)) => suburb.to_owned(),
        (None, None) => String::new(),
    }
}
