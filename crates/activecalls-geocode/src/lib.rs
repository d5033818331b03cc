//! Location resolution for active-call incidents.
//!
//! Turns the upstream table's free-text location field into coordinates and
//! a nearest-intersection label:
//!
//! 1. [`normalize`] cleans the raw text and classifies it as either an
//!    embedded `LL(lon,lat)` coordinate pair ([`decode_ll`]) or a geocodable
//!    address fragment.
//! 2. [`forward_geocode`] resolves a fragment through a [`Geocoder`].
//! 3. [`nearest_intersection`] reverse-geocodes coordinates and picks a
//!    road/suburb label with [`intersection_label`].
//!
//! Geocoding failures are absorbed into `None` / empty labels; nothing in
//! steps 2 and 3 returns an error to the caller. Throttling is the caller's
//! job, through [`RateLimiter`].

pub mod coordinates;
pub mod error;
pub mod geocoder;
pub mod nominatim;
pub mod normalize;
pub mod rate_limit;
pub mod resolve;

pub use coordinates::decode_ll;
pub use error::{CoordinateParseError, GeocodeError};
pub use geocoder::{AddressComponents, Geocoder};
pub use nominatim::NominatimClient;
pub use normalize::{clean_location, normalize, NormalizedQuery};
pub use rate_limit::RateLimiter;
pub use resolve::{forward_geocode, geocode_query, intersection_label, nearest_intersection};
