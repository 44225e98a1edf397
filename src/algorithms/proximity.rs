//! Ranking of stationary points by distance from the device

use crate::algorithms::geodesy::{distance_and_bearing, relative_bearing, DistanceModel};
use crate::core::{PointOfInterest, PositionFix};

impl PointOfInterest {
    /// Recompute distance and relative bearing from `fix`.
    ///
    /// Bearing is relative to the fix heading; an unknown heading counts as
    /// north-up.
    pub fn update_from_fix(&mut self, fix: &PositionFix, model: DistanceModel) {
        let heading = if fix.has_heading() {
            fix.heading_degrees as f64
        } else {
            0.0
        };
        let solution = distance_and_bearing(fix, self, model);
        self.distance_km = solution.distance_m / 1000.0;
        self.bearing_degrees = relative_bearing(solution.initial_bearing_deg, heading);
    }
}

/// Rank points by distance from `fix` using the default earth model
pub fn rank_by_proximity(points: &[PointOfInterest], fix: &PositionFix) -> Vec<PointOfInterest> {
    rank_by_proximity_with(points, fix, DistanceModel::default())
}

/// Return a copy of `points` with distance and bearing recomputed from `fix`,
/// sorted nearest first. Equal distances keep their input order.
pub fn rank_by_proximity_with(
    points: &[PointOfInterest],
    fix: &PositionFix,
    model: DistanceModel,
) -> Vec<PointOfInterest> {
    let mut ranked = points.to_vec();
    for point in ranked.iter_mut() {
        point.update_from_fix(fix, model);
    }
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}

/// Traffic lights watched around the Gdańsk ring road
pub fn traffic_lights() -> Vec<PointOfInterest> {
    vec![
        PointOfInterest::new("Kadetów od obwodnicy", 18.50218, 54.37738),
        PointOfInterest::new("Kadetów od lotniska", 18.50194, 54.37727),
        PointOfInterest::new("Budowlanych od obwodnicy", 18.50860, 54.37660),
        PointOfInterest::new("Budowlanych od lotniska", 18.50837, 54.37652),
        PointOfInterest::new("Radarowa od obwodnicy", 18.48768, 54.37910),
        PointOfInterest::new("Radarowa od Klukowa", 18.48753, 54.37930),
        PointOfInterest::new("Przytulna od osiedla", 18.53498, 54.34823),
        PointOfInterest::new("Przytulna od Armii Krajowej", 18.53490, 54.34788),
        PointOfInterest::new("Przytulna od Auchaun", 18.53458, 54.34807),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::geodesy::{distance_km, distance_km_with};

    fn names(points: &[PointOfInterest]) -> Vec<&str> {
        points.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_traffic_lights_ranking_from_kadetow() {
        let fix = PositionFix::new(54.37738, 18.50218, 0).with_heading(0.0);
        let ranked = rank_by_proximity(&traffic_lights(), &fix);

        assert_eq!(ranked.len(), 9);
        assert_eq!(
            names(&ranked),
            vec![
                "Kadetów od obwodnicy",
                "Kadetów od lotniska",
                "Budowlanych od lotniska",
                "Budowlanych od obwodnicy",
                "Radarowa od obwodnicy",
                "Radarowa od Klukowa",
                "Przytulna od osiedla",
                "Przytulna od Auchaun",
                "Przytulna od Armii Krajowej",
            ]
        );
        assert_eq!(ranked[0].distance_km, 0.0);
        assert!(ranked[1].distance_km > 0.01 && ranked[1].distance_km < 0.03);
        assert!(ranked.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
    }

    #[test]
    fn test_update_matches_distance_function() {
        let fix = PositionFix::new(54.3600, 18.5200, 0);
        let mut point = PointOfInterest::new("Radarowa od Klukowa", 18.48753, 54.37930);
        point.update_from_fix(&fix, DistanceModel::Ellipsoidal);
        assert_eq!(point.distance_km, distance_km(&fix, &point));

        point.update_from_fix(&fix, DistanceModel::Spherical);
        assert_eq!(point.distance_km, distance_km_with(&point, &fix, DistanceModel::Spherical));
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let fix = PositionFix::new(54.3600, 18.5200, 0).with_heading(135.0);
        let first = rank_by_proximity(&traffic_lights(), &fix);
        let second = rank_by_proximity(&first, &fix);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ranking_keeps_input_order_on_ties() {
        let points = vec![
            PointOfInterest::new("b", 18.6, 54.4),
            PointOfInterest::new("a", 18.6, 54.4),
            PointOfInterest::new("near", 18.5001, 54.4),
            PointOfInterest::new("c", 18.6, 54.4),
        ];
        let fix = PositionFix::new(54.4, 18.5, 0);
        let ranked = rank_by_proximity(&points, &fix);
        assert_eq!(names(&ranked), vec!["near", "b", "a", "c"]);
    }

    #[test]
    fn test_input_is_left_untouched() {
        let points = traffic_lights();
        let fix = PositionFix::new(54.3480, 18.5349, 0);
        let _ = rank_by_proximity(&points, &fix);
        assert_eq!(points, traffic_lights());
    }

    #[test]
    fn test_bearing_relative_to_heading() {
        // Point due east of the device
        let points = vec![PointOfInterest::new("east", 18.51, 54.0)];
        let north_up = PositionFix::new(54.0, 18.50, 0).with_heading(0.0);
        let heading_east = north_up.with_heading(90.0);
        let heading_south = north_up.with_heading(180.0);

        let bearing = rank_by_proximity(&points, &north_up)[0].bearing_degrees;
        assert!((89..=90).contains(&bearing));
        let ahead = rank_by_proximity(&points, &heading_east)[0].bearing_degrees;
        assert!(ahead <= 1 || ahead >= 359);
        let left = rank_by_proximity(&points, &heading_south)[0].bearing_degrees;
        assert!((269..=270).contains(&left));
    }

    #[test]
    fn test_unknown_heading_is_north_up() {
        let points = vec![PointOfInterest::new("east", 18.51, 54.0)];
        let fix = PositionFix::new(54.0, 18.50, 0);
        assert!(!fix.has_heading());
        let bearing = rank_by_proximity(&points, &fix)[0].bearing_degrees;
        assert!((89..=90).contains(&bearing));
    }

    #[test]
    fn test_spherical_model_ranks_the_same() {
        let fix = PositionFix::new(54.37738, 18.50218, 0);
        let ellipsoidal = rank_by_proximity(&traffic_lights(), &fix);
        let spherical = rank_by_proximity_with(&traffic_lights(), &fix, DistanceModel::Spherical);
        assert_eq!(names(&ellipsoidal), names(&spherical));
    }
}
