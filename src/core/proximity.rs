use crate::domain::model::Coordinate;
use crate::domain::ports::Locatable;

/// Radius used for "is at home" style checks when the caller has none.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 0.1;

/// Items within `radius_km` of `center`, in input order. Items without a
/// location are skipped.
pub fn within_distance<'a, L: Locatable>(items: &'a [L], center: &Coordinate, radius_km: f64) -> Vec<&'a L> {
    items
        .iter()
        .filter(|item| matches!(item.distance_to(center), Some(distance) if distance <= radius_km))
        .collect()
}

/// Items with a location paired with their distance, nearest first.
/// Equal distances keep input order.
pub fn order_by_distance<'a, L: Locatable>(items: &'a [L], center: &Coordinate) -> Vec<(&'a L, f64)> {
    let mut ranked: Vec<(&L, f64)> = items
        .iter()
        .filter_map(|item| item.distance_to(center).map(|distance| (item, distance)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    let skipped = items.len() - ranked.len();
    if skipped > 0 {
        tracing::debug!("{} item(s) without a location left out of ranking", skipped);
    }

    ranked
}

pub fn closest<'a, L: Locatable>(items: &'a [L], center: &Coordinate) -> Option<(&'a L, f64)> {
    items
        .iter()
        .filter_map(|item| item.distance_to(center).map(|distance| (item, distance)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Whether two locations are at most `radius_km` apart. False when either
/// side has no location.
pub fn is_within<A: Locatable, B: Locatable>(a: &A, b: &B, radius_km: f64) -> bool {
    a.distance_to_other(b)
        .is_some_and(|distance| distance <= radius_km)
}
