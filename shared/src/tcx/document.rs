//! TCX exercise document assembly.
//!
//! Element order inside `Lap` and `Trackpoint` follows the
//! TrainingCenterDatabase v2 and ActivityExtension v2 schemas; Garmin Connect
//! rejects documents whose children are out of order.

use super::xml::Element;
use crate::models::{format_decimal, ExerciseSession, Lap, Observation};

/// Default namespace of TCX documents.
pub const TCX_NAMESPACE: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2";

/// Namespaces declared on the document root, as `(prefix, uri)` pairs.
pub const NAMESPACES: [(&str, &str); 5] = [
    ("ns2", "http://www.garmin.com/xmlschemas/UserProfile/v2"),
    ("ns3", "http://www.garmin.com/xmlschemas/ActivityExtension/v2"),
    ("ns4", "http://www.garmin.com/xmlschemas/ProfileExtension/v1"),
    ("ns5", "http://www.garmin.com/xmlschemas/ActivityGoals/v1"),
    ("xsi", "http://www.w3.org/2001/XMLSchema-instance"),
];

const SCHEMA_LOCATION: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2 \
                               http://www.garmin.com/xmlschemas/TrainingCenterDatabasev2.xsd";

/// Builds the `Trackpoint` element for an observation.
///
/// Altitude, distance and speed are never written: Garmin Connect derives
/// them from the GPS track, and conflicting values distort its charts.
/// Returns `None` when nothing but the time would be written.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn trackpoint(observation: &Observation) -> Option<Element> {
    let mut point = Element::new("Trackpoint").with_child(Element::text("Time", &observation.time));

    if let (Some(latitude), Some(longitude)) = (observation.latitude, observation.longitude) {
        point.push(
            Element::new("Position")
                .with_child(Element::text("LatitudeDegrees", format_decimal(latitude)))
                .with_child(Element::text("LongitudeDegrees", format_decimal(longitude))),
        );
    }
    if let Some(heart_rate) = observation.heart_rate.filter(|hr| *hr != 0) {
        point.push(heart_rate_bpm("HeartRateBpm", heart_rate));
    }
    if let Some(cadence) = observation.cadence.filter(|c| c.abs() > 0.0) {
        point.push(Element::text("Cadence", cadence as i64));
    }

    (point.children().len() > 1).then_some(point)
}

/// Builds the `Lap` element, attaching a `Track` only if at least one
/// trackpoint carries data.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn lap_element(lap: &Lap) -> Element {
    let mut element = Element::new("Lap")
        .with_attribute("StartTime", &lap.start_time)
        .with_child(Element::text("TotalTimeSeconds", format_decimal(lap.total_time_secs)))
        .with_child(Element::text("DistanceMeters", format_decimal(lap.distance_meters)));

    if let Some(speed) = lap.maximum_speed {
        element.push(Element::text("MaximumSpeed", format_decimal(speed)));
    }
    element.push(Element::text("Calories", lap.calories.round() as i64));
    if let Some(hr) = lap.average_heart_rate {
        element.push(heart_rate_bpm("AverageHeartRateBpm", hr));
    }
    if let Some(hr) = lap.maximum_heart_rate {
        element.push(heart_rate_bpm("MaximumHeartRateBpm", hr));
    }
    element.push(Element::text("Intensity", "Active"));
    element.push(Element::text("TriggerMethod", "Manual"));

    let mut track = Element::new("Track");
    for point in lap.track.iter().filter_map(trackpoint) {
        track.push(point);
    }
    if !track.children().is_empty() {
        element.push(track);
    }

    if lap.has_extensions() {
        let mut lx = Element::new("ns3:LX");
        if let Some(speed) = lap.average_speed {
            lx.push(Element::text("ns3:AvgSpeed", format_decimal(speed)));
        }
        if let Some(cadence) = lap.average_cadence {
            lx.push(Element::text("ns3:AvgRunCadence", cadence as i64));
        }
        if let Some(cadence) = lap.maximum_cadence {
            lx.push(Element::text("ns3:MaxRunCadence", cadence as i64));
        }
        element.push(Element::new("Extensions").with_child(lx));
    }

    element
}

/// Builds and serializes the TCX document for one session.
///
/// The document holds one `Activity` whose `Id` is the session start time
/// and whose `Sport` is derived from the exercise type code.
///
/// # Example
///
/// ```
/// use shared::models::{ExerciseSession, Lap};
/// use shared::tcx::build_document;
///
/// let session = ExerciseSession::new("uuid", "2021-06-12 08:15:00.000", "11007");
/// let lap = Lap::from_session(&session, Vec::new());
///
/// let xml = build_document(&session, &lap);
/// assert!(xml.contains("<Activity Sport=\"Biking\">"));
/// assert!(xml.contains("<Id>2021-06-12T08:15:00.000Z</Id>"));
/// assert!(!xml.contains("<Track>"));
/// ```
#[must_use]
pub fn build_document(session: &ExerciseSession, lap: &Lap) -> String {
    let activity = Element::new("Activity")
        .with_attribute("Sport", session.sport().to_string())
        .with_child(Element::text("Id", session.activity_id()))
        .with_child(lap_element(lap));

    let mut root = Element::new("TrainingCenterDatabase").with_attribute("xmlns", TCX_NAMESPACE);
    for (prefix, uri) in NAMESPACES {
        root = root.with_attribute(format!("xmlns:{prefix}"), uri);
    }
    root.with_attribute("xsi:schemaLocation", SCHEMA_LOCATION)
        .with_attribute("version", "1.1")
        .with_child(Element::new("Activities").with_child(activity))
        .to_document()
}

fn heart_rate_bpm(name: &str, value: i64) -> Element {
    Element::new(name).with_child(Element::text("Value", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(time: &str) -> Observation {
        Observation::at(time)
    }

    fn create_test_session() -> ExerciseSession {
        let mut session = ExerciseSession::new("uuid-1", "2021-06-12 08:15:00.000", "1002");
        session.duration_ms = Some(1_800_000.0);
        session.distance = Some(5012.3);
        session.total_calorie = Some(312.6);
        session.mean_heart_rate = Some(142.0);
        session.max_heart_rate = Some(171.0);
        session.mean_speed = Some(2.78);
        session.max_speed = Some(4.1);
        session.max_cadence = Some(88.0);
        session
    }

    fn child_names(element: &Element) -> Vec<&str> {
        element.children().iter().map(Element::name).collect()
    }

    #[test]
    fn test_time_only_observation_is_dropped() {
        assert!(trackpoint(&observation("2021-06-12T08:15:00.000Z")).is_none());
    }

    #[test]
    fn test_zero_heart_rate_is_not_data() {
        let mut obs = observation("t");
        obs.heart_rate = Some(0);
        obs.altitude = Some(500.0);
        obs.speed = Some(3.0);
        obs.distance = Some(100.0);

        assert!(trackpoint(&obs).is_none());
    }

    #[test]
    fn test_trackpoint_field_order() {
        let mut obs = observation("t");
        obs.latitude = Some(10.5);
        obs.longitude = Some(20.25);
        obs.heart_rate = Some(120);
        obs.cadence = Some(81.6);

        let point = trackpoint(&obs).unwrap();

        assert_eq!(
            child_names(&point),
            vec!["Time", "Position", "HeartRateBpm", "Cadence"]
        );
        let xml = point.to_document();
        assert!(xml.contains("<LatitudeDegrees>10.5</LatitudeDegrees>"));
        assert!(xml.contains("<LongitudeDegrees>20.25</LongitudeDegrees>"));
        assert!(xml.contains("<Value>120</Value>"));
        assert!(xml.contains("<Cadence>81</Cadence>"));
    }

    #[test]
    fn test_position_requires_both_coordinates() {
        let mut obs = observation("t");
        obs.latitude = Some(10.5);
        obs.heart_rate = Some(99);

        let point = trackpoint(&obs).unwrap();

        assert_eq!(child_names(&point), vec!["Time", "HeartRateBpm"]);
    }

    #[test]
    fn test_lap_element_order() {
        let mut obs = observation("t");
        obs.heart_rate = Some(120);
        let lap = Lap::from_session(&create_test_session(), vec![obs]);

        let element = lap_element(&lap);

        assert_eq!(
            child_names(&element),
            vec![
                "TotalTimeSeconds",
                "DistanceMeters",
                "MaximumSpeed",
                "Calories",
                "AverageHeartRateBpm",
                "MaximumHeartRateBpm",
                "Intensity",
                "TriggerMethod",
                "Track",
                "Extensions",
            ]
        );
    }

    #[test]
    fn test_lap_values() {
        let lap = Lap::from_session(&create_test_session(), Vec::new());

        let xml = lap_element(&lap).to_document();

        assert!(xml.contains("<TotalTimeSeconds>1800.0</TotalTimeSeconds>"));
        assert!(xml.contains("<DistanceMeters>5012.3</DistanceMeters>"));
        assert!(xml.contains("<MaximumSpeed>4.1</MaximumSpeed>"));
        assert!(xml.contains("<Calories>313</Calories>"));
        assert!(xml.contains("<ns3:AvgSpeed>2.78</ns3:AvgSpeed>"));
        assert!(xml.contains("<ns3:MaxRunCadence>88</ns3:MaxRunCadence>"));
        assert!(!xml.contains("AvgRunCadence"));
    }

    #[test]
    fn test_lap_without_extensions() {
        let session = ExerciseSession::new("uuid", "2021-06-12 08:15:00.000", "0");
        let lap = Lap::from_session(&session, Vec::new());

        let element = lap_element(&lap);

        assert_eq!(
            child_names(&element),
            vec![
                "TotalTimeSeconds",
                "DistanceMeters",
                "Calories",
                "Intensity",
                "TriggerMethod",
            ]
        );
    }

    #[test]
    fn test_track_omitted_when_all_points_empty() {
        let lap = Lap::from_session(
            &create_test_session(),
            vec![observation("a"), observation("b")],
        );

        assert!(!child_names(&lap_element(&lap)).contains(&"Track"));
    }

    #[test]
    fn test_build_document_shape() {
        let session = create_test_session();
        let mut obs = observation("2021-06-12T08:15:01.000Z");
        obs.latitude = Some(1.0);
        obs.longitude = Some(2.0);
        let lap = Lap::from_session(&session, vec![obs]);

        let xml = build_document(&session, &lap);

        assert!(xml.starts_with("<?xml version='1.0' encoding='UTF-8'?>\n<TrainingCenterDatabase"));
        assert!(xml.contains(&format!("xmlns=\"{TCX_NAMESPACE}\"")));
        assert!(xml.contains("xmlns:ns3=\"http://www.garmin.com/xmlschemas/ActivityExtension/v2\""));
        assert!(xml.contains("version=\"1.1\""));
        assert!(xml.contains("<Activity Sport=\"Running\">"));
        assert!(xml.contains("<Id>2021-06-12T08:15:00.000Z</Id>"));
        assert!(xml.contains("<Lap StartTime=\"2021-06-12T08:15:00.000Z\">"));
        assert_eq!(xml.matches("<Trackpoint>").count(), 1);
        assert!(!xml.contains("AltitudeMeters"));
    }

    #[test]
    fn test_other_sport() {
        let session = ExerciseSession::new("uuid", "2021-06-12 08:15:00.000", "9999");
        let lap = Lap::from_session(&session, Vec::new());

        assert!(build_document(&session, &lap).contains("<Activity Sport=\"Other\">"));
    }
}
