use uuid::Uuid;

use super::{Session, MAX_PINS};
use crate::{
    entities::{Annotation, Coordinates, LongPress, Notice, Pin, RouteRequest, Segment},
    error::{capacity_exceeded_error, nothing_to_delete_error, Error},
    surface::MapSurface,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinAdded {
    pub pin: Pin,
    /// Set once there is a segment to route; the caller dispatches it.
    pub route_request: Option<RouteRequest>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinRemoved {
    pub pin: Pin,
    pub overlay_removed: bool,
}

impl<S: MapSurface> Session<S> {
    /// Converts a finished long press into a pin. Presses still in progress
    /// are ignored.
    #[tracing::instrument(skip(self))]
    pub fn handle_long_press(&mut self, event: LongPress) -> Result<Option<PinAdded>, Error> {
        if !event.is_complete() {
            return Ok(None);
        }

        let coordinates = self.surface.convert_point(event.point);
        self.add_pin(coordinates).map(Some)
    }

    #[tracing::instrument(skip(self))]
    pub fn add_pin(&mut self, coordinates: Coordinates) -> Result<PinAdded, Error> {
        if self.pins.len() >= MAX_PINS {
            tracing::warn!(count = self.pins.len(), "pin rejected, session is full");
            self.surface.present_notice(&Notice::capacity_exceeded());
            return Err(capacity_exceeded_error());
        }

        let pin = Pin::new(coordinates.validate()?);
        self.pins.push(pin);

        let annotation = Annotation::for_pin(&pin);
        self.surface.add_annotation(&annotation);
        self.annotations.push(annotation);

        tracing::info!(pin_id = %pin.id, count = self.pins.len(), "pin added");

        let route_request = self
            .newest_segment()
            .map(|segment| self.track_request(segment));

        Ok(PinAdded { pin, route_request })
    }

    #[tracing::instrument(skip(self))]
    pub fn delete_last_pin(&mut self) -> Result<PinRemoved, Error> {
        let pin = match self.pins.pop() {
            Some(pin) => pin,
            None => {
                self.surface.present_notice(&Notice::nothing_to_delete());
                return Err(nothing_to_delete_error());
            }
        };

        self.pending.retain(|_, request| !request.segment.key().touches(pin.id));

        let overlay_removed = match self.pins.last() {
            Some(previous) => {
                let key = Segment::new(*previous, pin).key();
                match self.overlays.remove(&key) {
                    Some(overlay) => {
                        self.surface.remove_overlay(overlay.id);
                        true
                    }
                    None => false,
                }
            }
            None => false,
        };

        tracing::info!(pin_id = %pin.id, count = self.pins.len(), "pin deleted");
        self.redraw_annotations();

        Ok(PinRemoved {
            pin,
            overlay_removed,
        })
    }

    /// Returns how many pins were removed.
    #[tracing::instrument(skip(self))]
    pub fn delete_all_pins(&mut self) -> Result<usize, Error> {
        if self.pins.is_empty() {
            self.surface.present_notice(&Notice::nothing_to_delete());
            return Err(nothing_to_delete_error());
        }

        let removed = self.pins.len();
        self.pins.clear();
        self.pending.clear();

        let overlay_ids: Vec<Uuid> = self
            .overlays
            .drain()
            .map(|(_, overlay)| overlay.id)
            .collect();
        self.surface.remove_overlays(&overlay_ids);

        tracing::info!(removed, "all pins deleted");
        self.redraw_annotations();

        Ok(removed)
    }

    /// Replaces every annotation on the surface with a fresh one per pin.
    pub fn redraw_annotations(&mut self) {
        let stale: Vec<Uuid> = self.annotations.drain(..).map(|a| a.id).collect();
        self.surface.remove_annotations(&stale);

        self.annotations = self.pins.iter().map(Annotation::for_pin).collect();
        self.surface.add_annotations(&self.annotations);
    }

    fn newest_segment(&self) -> Option<Segment> {
        match self.pins.as_slice() {
            [.., source, destination] => Some(Segment::new(*source, *destination)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{point, route, session};
    use super::*;
    use crate::entities::GestureState;

    fn c(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates::new(latitude, longitude)
    }

    #[test]
    fn up_to_ten_pins_are_accepted() {
        let mut session = session();

        for i in 0..MAX_PINS {
            session.add_pin(c(i as f64, 0.0)).unwrap();
            assert_eq!(session.pins().len(), i + 1);
        }
    }

    #[test]
    fn eleventh_pin_is_rejected() {
        let mut session = session();
        for i in 0..MAX_PINS {
            session.add_pin(c(i as f64, 0.0)).unwrap();
        }
        let before = session.pins().to_vec();

        let err = session.add_pin(c(50.0, 50.0)).unwrap_err();

        assert!(err.is_capacity_exceeded());
        assert_eq!(session.pins(), before.as_slice());
        assert_eq!(session.annotations().len(), MAX_PINS);
        assert_eq!(session.surface().notices(), &[Notice::capacity_exceeded()]);
    }

    #[test]
    fn invalid_coordinates_leave_state_unchanged() {
        let mut session = session();

        assert!(session.add_pin(c(91.0, 0.0)).is_err());
        assert!(session.pins().is_empty());
        assert!(session.surface().annotations().is_empty());
    }

    #[test]
    fn route_requests_follow_the_newest_pair() {
        let mut session = session();

        let first = session.add_pin(c(0.0, 0.0)).unwrap();
        assert!(first.route_request.is_none());

        let second = session.add_pin(c(1.0, 1.0)).unwrap();
        let request = second.route_request.unwrap();
        assert_eq!(request.source(), c(0.0, 0.0));
        assert_eq!(request.destination(), c(1.0, 1.0));

        let third = session.add_pin(c(2.0, 2.0)).unwrap();
        let request = third.route_request.unwrap();
        assert_eq!(request.source(), c(1.0, 1.0));
        assert_eq!(request.destination(), c(2.0, 2.0));

        let coordinates: Vec<_> = session.pins().iter().map(|p| p.coordinates).collect();
        assert_eq!(coordinates, vec![c(0.0, 0.0), c(1.0, 1.0), c(2.0, 2.0)]);
        assert_eq!(session.pending_requests(), 2);
    }

    #[test]
    fn each_add_registers_one_annotation() {
        let mut session = session();

        session.add_pin(c(0.0, 0.0)).unwrap();
        session.add_pin(c(1.0, 1.0)).unwrap();

        assert_eq!(session.surface().annotations().len(), 2);
        assert_eq!(session.surface().annotation_batches(), 0);
    }

    #[test]
    fn unfinished_long_press_is_ignored() {
        let mut session = session();
        let event = LongPress {
            point: point(50.0, 50.0),
            state: GestureState::Began,
        };

        assert_eq!(session.handle_long_press(event).unwrap(), None);
        assert!(session.pins().is_empty());
    }

    #[test]
    fn finished_long_press_drops_pin_at_projected_point() {
        let mut session = session();
        let event = LongPress {
            point: point(50.0, 50.0),
            state: GestureState::Ended,
        };

        let added = session.handle_long_press(event).unwrap().unwrap();

        assert_eq!(added.pin.coordinates, c(0.0, 0.0));
    }

    #[test]
    fn delete_last_pin_redraws_once() {
        let mut session = session();
        session.add_pin(c(0.0, 0.0)).unwrap();
        session.add_pin(c(1.0, 1.0)).unwrap();

        let removed = session.delete_last_pin().unwrap();

        assert_eq!(removed.pin.coordinates, c(1.0, 1.0));
        assert_eq!(session.pins().len(), 1);
        assert_eq!(session.surface().annotation_batches(), 1);
        assert_eq!(session.surface().annotations().len(), 1);
        assert_eq!(session.pending_requests(), 0);
    }

    #[test]
    fn delete_last_pin_removes_only_its_segment_overlay() {
        let mut session = session();
        session.add_pin(c(0.0, 0.0)).unwrap();
        let first = session.add_pin(c(1.0, 1.0)).unwrap().route_request.unwrap();
        let second = session.add_pin(c(2.0, 2.0)).unwrap().route_request.unwrap();
        session.apply_route(first.ticket, Ok(route(c(0.0, 0.0), c(1.0, 1.0))));
        session.apply_route(second.ticket, Ok(route(c(1.0, 1.0), c(2.0, 2.0))));
        assert_eq!(session.surface().overlays().len(), 2);

        let removed = session.delete_last_pin().unwrap();
        assert!(removed.overlay_removed);
        assert_eq!(session.overlay_count(), 1);
        assert_eq!(
            session.surface().overlays()[0].points,
            vec![c(0.0, 0.0), c(1.0, 1.0)]
        );

        let removed = session.delete_last_pin().unwrap();
        assert!(removed.overlay_removed);
        assert_eq!(session.overlay_count(), 0);

        let removed = session.delete_last_pin().unwrap();
        assert!(!removed.overlay_removed);
        assert!(session.surface().overlays().is_empty());
    }

    #[test]
    fn delete_last_pin_on_empty_session() {
        let mut session = session();

        let err = session.delete_last_pin().unwrap_err();

        assert!(err.is_nothing_to_delete());
        assert_eq!(session.surface().notices(), &[Notice::nothing_to_delete()]);
        assert_eq!(session.surface().annotation_batches(), 0);
    }

    #[test]
    fn delete_all_pins_clears_everything() {
        let mut session = session();
        session.add_pin(c(0.0, 0.0)).unwrap();
        let first = session.add_pin(c(1.0, 1.0)).unwrap().route_request.unwrap();
        session.add_pin(c(2.0, 2.0)).unwrap();
        session.apply_route(first.ticket, Ok(route(c(0.0, 0.0), c(1.0, 1.0))));

        assert_eq!(session.delete_all_pins().unwrap(), 3);

        assert!(session.pins().is_empty());
        assert!(session.annotations().is_empty());
        assert_eq!(session.overlay_count(), 0);
        assert_eq!(session.pending_requests(), 0);
        assert!(session.surface().overlays().is_empty());
        assert!(session.surface().annotations().is_empty());
    }

    #[test]
    fn delete_all_pins_on_empty_session() {
        let mut session = session();
        assert!(session.delete_all_pins().unwrap_err().is_nothing_to_delete());
    }

    #[test]
    fn redraw_matches_pins_in_order() {
        let mut session = session();
        for i in 0..4 {
            session.add_pin(c(i as f64, -(i as f64))).unwrap();
        }

        session.redraw_annotations();

        let annotated: Vec<_> = session
            .annotations()
            .iter()
            .map(|a| (a.pin_id, a.coordinates))
            .collect();
        let pinned: Vec<_> = session.pins().iter().map(|p| (p.id, p.coordinates)).collect();
        assert_eq!(annotated, pinned);
        assert_eq!(session.surface().annotations(), session.annotations());
    }
}
