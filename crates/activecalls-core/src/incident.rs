//! Incident records as scraped from the active-calls table and as emitted
//! after geocoding.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One structurally valid row of the upstream table.
///
/// The fourth cell of the table carries nothing we use and is not retained.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncidentRow {
    pub dispatch_time: String,
    pub type_general: String,
    pub box_no: String,
    pub type_specific: String,
    /// Free-text location field, fed to the address normalizer.
    pub street: String,
    pub status: String,
}

/// Output record: the table fields plus resolved location data.
///
/// Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub type_general: String,
    pub dispatch_time: String,
    pub box_no: String,
    pub type_specific: String,
    pub street: String,
    pub status: String,
    /// Reserved; never populated.
    pub cross_street: String,
    pub nearest_intersection: String,
    pub location_township: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Incident {
    /// Assembles the output record for `row`.
    ///
    /// `location_township` mirrors the box number, matching the upstream
    /// feed's convention.
    #[must_use]
    pub fn from_row(
        row: IncidentRow,
        coordinates: Option<Coordinates>,
        nearest_intersection: String,
    ) -> Self {
        let location_township = row.box_no.clone();
        Self {
            type_general: row.type_general,
            dispatch_time: row.dispatch_time,
            box_no: row.box_no,
            type_specific: row.type_specific,
            street: row.street,
            status: row.status,
            cross_street: String::new(),
            nearest_intersection,
            location_township,
            lat: coordinates.map(|c| c.latitude),
            lng: coordinates.map(|c| c.longitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> IncidentRow {
        IncidentRow {
            dispatch_time: "10/19/2026 14:02".to_owned(),
            type_general: "FIRE".to_owned(),
            box_no: "R1-12".to_owned(),
            type_specific: "STRUCTURE FIRE".to_owned(),
            street: "123-BLK MAIN ST RICH".to_owned(),
            status: "ENROUTE".to_owned(),
        }
    }

    #[test]
    fn from_row_copies_box_number_into_township() {
        let incident = Incident::from_row(sample_row(), None, String::new());
        assert_eq!(incident.location_township, "R1-12");
        assert_eq!(incident.box_no, "R1-12");
        assert!(incident.cross_street.is_empty());
    }

    #[test]
    fn from_row_splits_coordinates() {
        let incident = Incident::from_row(
            sample_row(),
            Some(Coordinates::new(37.54, -77.43)),
            "Main St, Downtown".to_owned(),
        );
        assert_eq!(incident.lat, Some(37.54));
        assert_eq!(incident.lng, Some(-77.43));
        assert_eq!(incident.nearest_intersection, "Main St, Downtown");
    }

    #[test]
    fn unresolved_incident_serializes_null_coordinates() {
        let incident = Incident::from_row(sample_row(), None, String::new());
        let value = serde_json::to_value(&incident).unwrap();
        assert!(value["lat"].is_null());
        assert!(value["lng"].is_null());
        assert_eq!(value["nearest_intersection"], "");
        assert_eq!(value["cross_street"], "");
    }

    #[test]
    fn serialized_field_order_is_stable() {
        let incident = Incident::from_row(sample_row(), None, String::new());
        let json = serde_json::to_string(&incident).unwrap();
        let keys = [
            "type_general",
            "dispatch_time",
            "box_no",
            "type_specific",
            "street",
            "status",
            "cross_street",
            "nearest_intersection",
            "location_township",
            "lat",
            "lng",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| json.find(&format!("\"{k}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }
}
