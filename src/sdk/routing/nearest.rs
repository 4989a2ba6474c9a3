use crate::sdk::feature::{LonLat, PointFeature};

/// Mean Earth radius in kilometres, the default the map platform measures with.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two points, in kilometres.
pub fn haversine_km(a: LonLat, b: LonLat) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Nearest candidate to `target` with its distance in kilometres.
///
/// Candidates without a position are skipped and the first of several
/// equidistant candidates wins.
pub fn nearest_station_with_distance(
    target: LonLat,
    candidates: &[PointFeature],
) -> Option<(&PointFeature, f64)> {
    let mut best: Option<(&PointFeature, f64)> = None;
    for candidate in candidates {
        let Some(position) = candidate.coordinates else {
            continue;
        };
        let distance = haversine_km(target, position);
        match best {
            Some((_, min)) if distance >= min => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best
}

pub fn nearest_station(target: LonLat, candidates: &[PointFeature]) -> Option<&PointFeature> {
    nearest_station_with_distance(target, candidates).map(|(station, _)| station)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::JsonObject;

    fn station(name: &str, at: Option<(f64, f64)>) -> PointFeature {
        let mut props = JsonObject::new();
        props.insert("name".into(), name.into());
        PointFeature::new(at.map(LonLat::from), props)
    }

    #[test]
    fn distance_is_a_metric() {
        let glasgow = LonLat::new(-4.2518, 55.8642);
        let edinburgh = LonLat::new(-3.1883, 55.9533);
        assert_eq!(haversine_km(glasgow, glasgow), 0.0);
        assert_eq!(haversine_km(glasgow, edinburgh), haversine_km(edinburgh, glasgow));
        let d = haversine_km(glasgow, edinburgh);
        assert!((d - 67.1).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn picks_closer_of_two() {
        let candidates = vec![station("A", Some((0.0, 0.0))), station("B", Some((1.0, 1.0)))];
        let nearest = nearest_station(LonLat::new(0.1, 0.1), &candidates).unwrap();
        assert_eq!(nearest.property("name"), Some("A"));
    }

    #[test]
    fn empty_or_unpositioned_candidates_give_none() {
        assert!(nearest_station(LonLat::new(0.0, 0.0), &[]).is_none());
        let candidates = vec![station("A", None), station("B", None)];
        assert!(nearest_station(LonLat::new(0.0, 0.0), &candidates).is_none());
    }

    #[test]
    fn unpositioned_candidates_are_skipped() {
        let candidates = vec![station("ghost", None), station("far", Some((10.0, 10.0)))];
        let nearest = nearest_station(LonLat::new(0.0, 0.0), &candidates).unwrap();
        assert_eq!(nearest.property("name"), Some("far"));
    }

    #[test]
    fn first_of_colocated_candidates_wins() {
        let candidates = vec![
            station("first", Some((2.0, 2.0))),
            station("second", Some((2.0, 2.0))),
        ];
        let (nearest, distance) =
            nearest_station_with_distance(LonLat::new(2.0, 2.0), &candidates).unwrap();
        assert_eq!(nearest.property("name"), Some("first"));
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn result_is_no_farther_than_any_candidate() {
        let target = LonLat::new(-4.0, 56.0);
        let candidates: Vec<_> = (0..25)
            .map(|i| {
                let f = i as f64;
                station(&i.to_string(), Some((-6.0 + f * 0.17, 55.0 + (f * 0.37) % 2.0)))
            })
            .collect();
        let (_, best) = nearest_station_with_distance(target, &candidates).unwrap();
        for c in &candidates {
            assert!(best <= haversine_km(target, c.coordinates.unwrap()));
        }
    }
}
