//! Derives a map position from the two plate identifiers and places it.
//!
//! The position is a synthetic linear offset from a fixed base point, not a
//! geocoded address.

use crate::app_state::{AppState, PlateInput};
use crate::engine::input::parse_int_prefix;
use crate::engine::navigation::ViewInitializer;
use crate::engine::presentation::{GeoPoint, MapWidget};
use crate::engine::view::ViewId;
use dioxus_logger::tracing::debug;
use std::rc::Rc;

pub const BASE_LAT: f64 = 35.6892;
pub const BASE_LNG: f64 = 51.3890;
/// Degrees added per unit of a plate number.
pub const STEP: f64 = 0.0001;

/// Zoom of the first, unmarked view of the map.
pub const OVERVIEW_ZOOM: u8 = 13;
/// Zoom used when centering on a placed marker.
pub const MARKER_ZOOM: u8 = 18;

pub const BASE_POINT: GeoPoint = GeoPoint {
    lat: BASE_LAT,
    lng: BASE_LNG,
};

/// The main and sub plate numbers of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlatePair {
    pub main: i64,
    pub sub: i64,
}

impl PlatePair {
    /// Parses both fields leniently; a field without leading digits counts as 0.
    pub fn from_input(input: &PlateInput) -> Self {
        Self {
            main: parse_int_prefix(&input.main).unwrap_or(0),
            sub: parse_int_prefix(&input.sub).unwrap_or(0),
        }
    }
}

/// Where a plate pair lands on the map, and the text of its popup.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
}

impl Coordinate {
    pub fn from_plates(pair: PlatePair) -> Self {
        Self {
            lat: BASE_LAT + pair.main as f64 * STEP,
            lng: BASE_LNG + pair.sub as f64 * STEP,
            label: format!("Plate: {}-{}", pair.main, pair.sub),
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Outcome of [`CoordinatePlacer::place`].
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Placed(Coordinate),
    /// The pair is already on the map; nothing was redrawn.
    Skipped,
}

/// Places plate markers on the map, skipping redundant work.
pub struct CoordinatePlacer {
    state: AppState,
    map: Rc<dyn MapWidget>,
}

impl CoordinatePlacer {
    pub fn new(state: AppState, map: Rc<dyn MapWidget>) -> Self {
        Self { state, map }
    }

    /// Shows the base overview the first time it is called. Returns whether
    /// it did anything.
    pub fn init_map(&self) -> bool {
        let first = self.state.update(|s| !std::mem::replace(&mut s.map_ready, true));
        if first {
            self.map.set_view(BASE_POINT, OVERVIEW_ZOOM);
        }
        first
    }

    pub fn place(&self, main: i64, sub: i64) -> Placement {
        let pair = PlatePair { main, sub };
        if self.state.last_placed() == Some(pair) {
            debug!("plate {main}-{sub} already placed");
            return Placement::Skipped;
        }

        let coordinate = Coordinate::from_plates(pair);
        let point = coordinate.point();

        if let Some(previous) = self.state.update(|s| s.marker.take()) {
            self.map.remove_marker(previous);
        }
        let handle = self.map.place_marker(point, &coordinate.label);
        self.map.set_view(point, MARKER_ZOOM);

        self.state.update(|s| {
            s.marker = Some(handle);
            s.last_placed = Some(pair);
        });
        Placement::Placed(coordinate)
    }

    /// Places whatever the plate fields currently hold.
    pub fn place_from_input(&self) -> Placement {
        let pair = PlatePair::from_input(&self.state.plate_input());
        self.place(pair.main, pair.sub)
    }
}

impl ViewInitializer for CoordinatePlacer {
    fn on_enter(&self, view: ViewId) {
        if view == ViewId::Map {
            self.init_map();
            self.place_from_input();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::presentation::MarkerHandle;
    use crate::engine::testing::{MapCall, RecordingMap};

    fn placer() -> (AppState, Rc<RecordingMap>, CoordinatePlacer) {
        let state = AppState::new();
        let map = Rc::new(RecordingMap::default());
        let placer = CoordinatePlacer::new(state.clone(), map.clone());
        (state, map, placer)
    }

    #[test]
    fn derives_offset_point_and_label() {
        let c = Coordinate::from_plates(PlatePair { main: 12, sub: 7 });
        assert_eq!(c.lat, 35.6892 + 12.0 * 0.0001);
        assert_eq!(c.lng, 51.3890 + 7.0 * 0.0001);
        assert!(c.label.contains("12"));
        assert!(c.label.contains('7'));
    }

    #[test]
    fn placing_the_same_pair_twice_draws_once() {
        let (state, map, placer) = placer();

        assert!(matches!(placer.place(12, 7), Placement::Placed(_)));
        assert_eq!(placer.place(12, 7), Placement::Skipped);

        assert_eq!(map.placements(), 1);
        assert_eq!(state.last_placed(), Some(PlatePair { main: 12, sub: 7 }));
    }

    #[test]
    fn new_pair_replaces_previous_marker() {
        let (_state, map, placer) = placer();
        placer.place(1, 1);
        placer.place(2, 3);

        let calls = map.calls();
        let first = MarkerHandle(0);
        assert!(calls.contains(&MapCall::Remove(first)));
        assert_eq!(
            calls.last(),
            Some(&MapCall::SetView(
                Coordinate::from_plates(PlatePair { main: 2, sub: 3 }).point(),
                MARKER_ZOOM
            ))
        );
    }

    #[test]
    fn unparsable_fields_default_to_zero() {
        let (state, _map, placer) = placer();
        state.update(|s| {
            s.plate_input = PlateInput {
                main: "12abc".into(),
                sub: "n/a".into(),
            }
        });

        match placer.place_from_input() {
            Placement::Placed(c) => assert_eq!(c, Coordinate::from_plates(PlatePair { main: 12, sub: 0 })),
            Placement::Skipped => panic!("first placement must draw"),
        }
    }

    #[test]
    fn entering_the_map_initializes_it_once() {
        let (_state, map, placer) = placer();
        placer.on_enter(ViewId::Map);
        placer.on_enter(ViewId::Map);
        placer.on_enter(ViewId::Auth);

        let overviews = map
            .calls()
            .iter()
            .filter(|c| **c == MapCall::SetView(BASE_POINT, OVERVIEW_ZOOM))
            .count();
        assert_eq!(overviews, 1);
        assert_eq!(map.placements(), 1);
    }
}
