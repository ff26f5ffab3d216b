use crate::domain::model::{Coordinate, LocationSlot, NamedPoint};

/// Anything that may carry a location: a record, a slot, a bare coordinate.
///
/// Implementors only say where they are; distance and link helpers come for free.
pub trait Locatable {
    fn location(&self) -> Option<Coordinate>;

    fn has_location(&self) -> bool {
        self.location().is_some()
    }

    fn map_url(&self, zoom: Option<u8>) -> Option<String> {
        self.location().map(|coordinate| coordinate.map_url(zoom))
    }

    /// `"lat, lon"` exactly as stored, without padding or rounding.
    fn coordinates_string(&self) -> Option<String> {
        self.location()
            .map(|coordinate| format!("{}, {}", coordinate.latitude(), coordinate.longitude()))
    }

    fn distance_to(&self, target: &Coordinate) -> Option<f64> {
        self.location()
            .map(|coordinate| coordinate.distance_km_to(target))
    }

    fn distance_to_other<L: Locatable + ?Sized>(&self, other: &L) -> Option<f64>
    where
        Self: Sized,
    {
        self.distance_to(&other.location()?)
    }
}

impl Locatable for Coordinate {
    fn location(&self) -> Option<Coordinate> {
        Some(*self)
    }
}

impl Locatable for Option<Coordinate> {
    fn location(&self) -> Option<Coordinate> {
        *self
    }
}

impl Locatable for LocationSlot {
    fn location(&self) -> Option<Coordinate> {
        self.coordinate()
    }
}

impl Locatable for NamedPoint {
    fn location(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

impl<L: Locatable + ?Sized> Locatable for &L {
    fn location(&self) -> Option<Coordinate> {
        (**self).location()
    }
}
