use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Annotation, Coordinates, Notice, Region, RouteOverlay, ScreenPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayLevel {
    AboveRoads,
    AboveLabels,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    None,
    Follow,
}

/// Everything the session needs from the map view. Implementations render and
/// hold handles; the session keeps the semantic state.
pub trait MapSurface: Send + 'static {
    fn add_annotation(&mut self, annotation: &Annotation);
    fn add_annotations(&mut self, annotations: &[Annotation]);
    fn remove_annotations(&mut self, ids: &[Uuid]);

    fn add_overlay(&mut self, overlay: &RouteOverlay, level: OverlayLevel);
    fn remove_overlay(&mut self, id: Uuid);
    fn remove_overlays(&mut self, ids: &[Uuid]);

    fn set_tracking_mode(&mut self, mode: TrackingMode);
    fn set_region(&mut self, region: Region);

    /// Projects a point of the view onto the map.
    fn convert_point(&self, point: ScreenPoint) -> Coordinates;

    fn present_notice(&mut self, notice: &Notice);
}

/// Screen size plus the region it currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub region: Region,
}

impl Viewport {
    pub fn new(width: f64, height: f64, region: Region) -> Self {
        Self {
            width,
            height,
            region,
        }
    }

    pub fn coordinates_at(&self, point: ScreenPoint) -> Coordinates {
        let Region {
            center,
            latitude_delta,
            longitude_delta,
        } = self.region;

        let fx = if self.width > 0.0 { point.x / self.width } else { 0.5 };
        let fy = if self.height > 0.0 { point.y / self.height } else { 0.5 };

        let latitude = center.latitude + latitude_delta * (0.5 - fy);
        let longitude = center.longitude + longitude_delta * (fx - 0.5);

        Coordinates::new(latitude.clamp(-90.0, 90.0), wrap_longitude(longitude))
    }
}

fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        return longitude;
    }

    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawnOverlay {
    pub id: Uuid,
    pub level: OverlayLevel,
    pub points: Vec<Coordinates>,
}

/// In-process surface used by the headless server and by tests.
#[derive(Debug)]
pub struct MemorySurface {
    viewport: Viewport,
    annotations: Vec<Annotation>,
    overlays: Vec<DrawnOverlay>,
    tracking_mode: TrackingMode,
    notices: Vec<Notice>,
    annotation_batches: usize,
}

impl MemorySurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            annotations: Vec::new(),
            overlays: Vec::new(),
            tracking_mode: TrackingMode::None,
            notices: Vec::new(),
            annotation_batches: 0,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn overlays(&self) -> &[DrawnOverlay] {
        &self.overlays
    }

    pub fn tracking_mode(&self) -> TrackingMode {
        self.tracking_mode
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Number of batch annotation registrations, i.e. full redraws.
    pub fn annotation_batches(&self) -> usize {
        self.annotation_batches
    }
}

impl MapSurface for MemorySurface {
    fn add_annotation(&mut self, annotation: &Annotation) {
        self.annotations.push(*annotation);
    }

    fn add_annotations(&mut self, annotations: &[Annotation]) {
        self.annotations.extend_from_slice(annotations);
        self.annotation_batches += 1;
    }

    fn remove_annotations(&mut self, ids: &[Uuid]) {
        self.annotations.retain(|a| !ids.contains(&a.id));
    }

    fn add_overlay(&mut self, overlay: &RouteOverlay, level: OverlayLevel) {
        self.overlays.push(DrawnOverlay {
            id: overlay.id,
            level,
            points: overlay.route.coordinates(),
        });
    }

    fn remove_overlay(&mut self, id: Uuid) {
        self.overlays.retain(|o| o.id != id);
    }

    fn remove_overlays(&mut self, ids: &[Uuid]) {
        self.overlays.retain(|o| !ids.contains(&o.id));
    }

    fn set_tracking_mode(&mut self, mode: TrackingMode) {
        self.tracking_mode = mode;
    }

    fn set_region(&mut self, region: Region) {
        self.viewport.region = region;
    }

    fn convert_point(&self, point: ScreenPoint) -> Coordinates {
        self.viewport.coordinates_at(point)
    }

    fn present_notice(&mut self, notice: &Notice) {
        tracing::info!(title = %notice.title, "{}", notice.message);
        self.notices.push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(
            200.0,
            100.0,
            Region {
                center: Coordinates::new(10.0, 20.0),
                latitude_delta: 2.0,
                longitude_delta: 4.0,
            },
        )
    }

    #[test]
    fn center_of_screen_is_region_center() {
        let coordinates = viewport().coordinates_at(ScreenPoint { x: 100.0, y: 50.0 });
        assert_eq!(coordinates, Coordinates::new(10.0, 20.0));
    }

    #[test]
    fn top_left_corner_is_north_west() {
        let coordinates = viewport().coordinates_at(ScreenPoint { x: 0.0, y: 0.0 });
        assert_eq!(coordinates, Coordinates::new(11.0, 18.0));
    }

    #[test]
    fn longitude_wraps_across_the_antimeridian() {
        let viewport = Viewport::new(
            100.0,
            100.0,
            Region {
                center: Coordinates::new(0.0, 179.0),
                latitude_delta: 1.0,
                longitude_delta: 4.0,
            },
        );

        let coordinates = viewport.coordinates_at(ScreenPoint { x: 100.0, y: 50.0 });
        assert!((coordinates.longitude - -179.0).abs() < 1e-9);
    }
}
