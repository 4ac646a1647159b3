use async_trait::async_trait;
use geo::{Distance, Haversine, InterpolatePoint, Point};
use geo_types::{Coord, LineString};

use crate::{
    entities::{Coordinates, Route, TransportMode},
    error::Error,
    external::{DirectionsProvider, DirectionsRequest},
};

const STEPS: usize = 16;

/// Offline provider: a great-circle path between the two points, timed at a
/// nominal speed for the transport mode.
#[derive(Clone, Debug, Default)]
pub struct LocalDirections;

impl LocalDirections {
    pub fn new() -> Self {
        Self
    }
}

fn speed_meters_per_sec(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Walking => 5_000.0 / 3_600.0,
        TransportMode::Driving => 50_000.0 / 3_600.0,
    }
}

fn point(coordinates: Coordinates) -> Point<f64> {
    Point::from(Coord::from(coordinates))
}

pub fn haversine_meters(a: Coordinates, b: Coordinates) -> f64 {
    Haversine::distance(point(a), point(b))
}

/// Endpoints are kept exactly; the points between follow the great circle.
fn interpolate(start: Coordinates, end: Coordinates) -> LineString<f64> {
    if start == end {
        return LineString::from(vec![Coord::from(start), Coord::from(end)]);
    }

    let (from, to) = (point(start), point(end));
    let inner = (1..STEPS).map(|i| {
        let ratio = i as f64 / STEPS as f64;
        Haversine::point_at_ratio_between(from, to, ratio).0
    });

    let coords: Vec<Coord<f64>> = std::iter::once(from.0)
        .chain(inner)
        .chain(std::iter::once(to.0))
        .collect();

    LineString::from(coords)
}

#[async_trait]
impl DirectionsProvider for LocalDirections {
    #[tracing::instrument(skip(self))]
    async fn directions(&self, request: DirectionsRequest) -> Result<Vec<Route>, Error> {
        let distance_meters = haversine_meters(request.source, request.destination);

        Ok(vec![Route {
            path: interpolate(request.source, request.destination),
            distance_meters,
            expected_travel_time_secs: distance_meters / speed_meters_per_sec(request.mode),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn request(mode: TransportMode) -> DirectionsRequest {
        DirectionsRequest {
            source: Coordinates::new(0.0, 0.0),
            destination: Coordinates::new(0.0, 1.0),
            mode,
        }
    }

    #[test]
    fn one_degree_of_equator_is_about_111_km() {
        let meters = haversine_meters(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
        assert!((meters - 111_195.0).abs() < 10.0, "{}", meters);
    }

    #[test]
    fn walking_takes_ten_times_longer_than_driving() {
        let provider = LocalDirections::new();
        let walking = block_on(provider.directions(request(TransportMode::Walking))).unwrap();
        let driving = block_on(provider.directions(request(TransportMode::Driving))).unwrap();

        let ratio = walking[0].expected_travel_time_secs / driving[0].expected_travel_time_secs;
        assert!((ratio - 10.0).abs() < 1e-9);
    }

    #[test]
    fn path_runs_from_source_to_destination() {
        let provider = LocalDirections::new();
        let routes = block_on(provider.directions(request(TransportMode::Driving))).unwrap();
        let coords: Vec<_> = routes[0].path.coords().copied().collect();

        assert_eq!(coords.len(), STEPS + 1);
        assert_eq!(coords[0], Coord { x: 0.0, y: 0.0 });
        assert_eq!(coords[STEPS], Coord { x: 1.0, y: 0.0 });

        // along the equator the great circle stays on it
        let middle = coords[STEPS / 2];
        assert!((middle.x - 0.5).abs() < 1e-6, "{:?}", middle);
        assert!(middle.y.abs() < 1e-6, "{:?}", middle);
    }

    #[test]
    fn identical_points_give_zero_route() {
        let here = Coordinates::new(48.85, 2.35);
        let routes = block_on(LocalDirections::new().directions(DirectionsRequest {
            source: here,
            destination: here,
            mode: TransportMode::Walking,
        }))
        .unwrap();

        assert_eq!(routes[0].distance_meters, 0.0);
        assert_eq!(routes[0].expected_travel_time_secs, 0.0);
    }
}
