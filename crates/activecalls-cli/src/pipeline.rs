//! Per-row orchestration: normalize, resolve coordinates, label the nearest
//! intersection, assemble the output record.
//!
//! Rows are processed strictly one after another. Every geocoding call,
//! forward or reverse, goes through the pipeline's [`RateLimiter`]; rows
//! that carry their own `LL(..)` coordinates skip forward geocoding and its
//! wait entirely.

use activecalls_core::{Coordinates, Incident, IncidentRow};
use activecalls_geocode::{
    forward_geocode, nearest_intersection, normalize, Geocoder, NormalizedQuery, RateLimiter,
};

pub(crate) struct Pipeline<'a, G: Geocoder + ?Sized> {
    geocoder: &'a G,
    limiter: RateLimiter,
    city_context: &'a str,
}

impl<'a, G: Geocoder + ?Sized> Pipeline<'a, G> {
    pub(crate) fn new(geocoder: &'a G, limiter: RateLimiter, city_context: &'a str) -> Self {
        Self {
            geocoder,
            limiter,
            city_context,
        }
    }

    /// Processes every row in order. Never fails: rows whose location cannot
    /// be resolved are emitted with null coordinates and an empty label.
    pub(crate) async fn run(&mut self, rows: Vec<IncidentRow>) -> Vec<Incident> {
        let total = rows.len();
        let mut incidents = Vec::with_capacity(total);
        for (index, row) in rows.into_iter().enumerate() {
            tracing::info!(
                row = index + 1,
                total,
                street = %row.street,
                "processing incident"
            );
            incidents.push(self.process_row(row).await);
        }

        let resolved = incidents.iter().filter(|i| i.lat.is_some()).count();
        tracing::info!(incidents = total, resolved, "found and geocoded incidents");
        incidents
    }

    pub(crate) async fn process_row(&mut self, row: IncidentRow) -> Incident {
        let coordinates = self.resolve_coordinates(&row.street).await;

        let nearest = if coordinates.is_some() {
            let geocoder = self.geocoder;
            self.limiter
                .run(|| nearest_intersection(geocoder, coordinates))
                .await
        } else {
            String::new()
        };

        Incident::from_row(row, coordinates, nearest)
    }

    async fn resolve_coordinates(&mut self, street: &str) -> Option<Coordinates> {
        match normalize(street) {
            NormalizedQuery::DirectCoordinates(coordinates) => Some(coordinates),
            NormalizedQuery::AddressFragment(fragment) => {
                let geocoder = self.geocoder;
                let city_context = self.city_context;
                self.limiter
                    .run(|| forward_geocode(geocoder, &fragment, city_context))
                    .await
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
