//! Planar distance math over grid coordinates.

use crate::models::Coordinate;

/// Straight-line distance between two cells, in cell widths.
///
/// Doubles as the search heuristic (cost-to-go).
pub fn euclidean_distance(a: Coordinate, b: Coordinate) -> f64 {
    let de = f64::from(a.e) - f64::from(b.e);
    let dn = f64::from(a.n) - f64::from(b.n);
    (de * de + dn * dn).sqrt()
}

/// Sum of step lengths along a route. Zero for routes shorter than two cells.
pub fn route_length(path: &[Coordinate]) -> f64 {
    path.windows(2)
        .map(|pair| euclidean_distance(pair[0], pair[1]))
        .sum()
}

/// True when `b` is one of the eight cells surrounding `a`.
pub fn is_adjacent(a: Coordinate, b: Coordinate) -> bool {
    let de = a.e.abs_diff(b.e);
    let dn = a.n.abs_diff(b.n);
    de <= 1 && dn <= 1 && (de, dn) != (0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_known_distances() {
        let origin = Coordinate::new(0, 0);
        assert_eq!(euclidean_distance(origin, Coordinate::new(3, 4)), 5.0);
        assert!((euclidean_distance(origin, Coordinate::new(1, 1)) - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(euclidean_distance(origin, origin), 0.0);
    }

    #[test]
    fn test_route_length_sums_steps() {
        let path = [
            Coordinate::new(0, 0),
            Coordinate::new(1, 1),
            Coordinate::new(2, 1),
        ];
        assert!((route_length(&path) - (2f64.sqrt() + 1.0)).abs() < 1e-12);
        assert_eq!(route_length(&path[..1]), 0.0);
        assert_eq!(route_length(&[]), 0.0);
    }

    #[test]
    fn test_adjacency_excludes_self_and_far_cells() {
        let c = Coordinate::new(2, 2);
        assert!(is_adjacent(c, Coordinate::new(3, 3)));
        assert!(is_adjacent(c, Coordinate::new(2, 1)));
        assert!(!is_adjacent(c, c));
        assert!(!is_adjacent(c, Coordinate::new(4, 2)));
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let low = Coordinate::new(i32::MIN, 0);
        let high = Coordinate::new(i32::MAX, 0);
        assert!((euclidean_distance(low, high) - f64::from(u32::MAX)).abs() < 1.0);
        assert!(!is_adjacent(low, high));
        assert!(is_adjacent(high, Coordinate::new(i32::MAX - 1, 1)));
    }
}
