use std::f64::consts::PI;

/// The area of the polygon drawn by the scores on a radar chart.
///
/// Vertex `i` is placed at the angle `2π·i/n` with the score as radius, and the area
/// is computed with the Shoelace formula. Fewer than 3 scores do not enclose any area.
pub fn polygon_area(scores: &[f64]) -> f64 {
    let n = scores.len();
    if n < 3 {
        return 0.0;
    }

    let points: Vec<(f64, f64)> = scores
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let angle = 2.0 * PI * (i as f64) / (n as f64);
            (r * angle.cos(), r * angle.sin())
        })
        .collect();

    let mut twice_area = 0.0;
    for i in 0..n {
        let (x1, y1) = points[i];
        let (x2, y2) = points[(i + 1) % n];
        twice_area += x1 * y2 - x2 * y1;
    }
    twice_area.abs() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn degenerate_polygons() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[5.0]), 0.0);
        assert_eq!(polygon_area(&[5.0, 5.0]), 0.0);
    }

    #[test]
    fn regular_polygons() {
        // Equilateral triangle inscribed in a circle of radius 5.
        let triangle = 3.0 * 3f64.sqrt() / 4.0 * 25.0;
        assert!(close(polygon_area(&[5.0, 5.0, 5.0]), triangle));
        // Square with a diagonal of 10.
        assert!(close(polygon_area(&[5.0, 5.0, 5.0, 5.0]), 50.0));
    }

    #[test]
    fn irregular_polygon() {
        // Rhombus: (3, 0), (0, 1), (-3, 0), (0, -1), with diagonals 6 and 2.
        assert!(close(polygon_area(&[3.0, 1.0, 3.0, 1.0]), 6.0));
        assert!(close(polygon_area(&[0.0, 0.0, 0.0]), 0.0));
    }
}
