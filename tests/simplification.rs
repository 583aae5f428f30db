use geo::coord;
use geoslim::document::{read_document, simplify_document, write_document};
use geoslim::geometry::{perpendicular_distance, reduce_line};
use geoslim::processor::{process_ring, rank_polygons};
use geoslim::{
    Geometry, MinRingVertices, MultiPolygon, Point, PolygonLimit, Polygon, Profile, Ring,
    SimplificationConfig, simplify,
};
use std::fs;
use tempfile::tempdir;

fn circle(n: usize, cx: f64, cy: f64, radius: f64) -> Ring {
    let mut points: Vec<Point> = (0..n - 1)
        .map(|i| {
            let a = i as f64 / (n - 1) as f64 * std::f64::consts::TAU;
            coord! { x: cx + radius * a.cos(), y: cy + radius * a.sin() }
        })
        .collect();
    points.push(points[0]);
    Ring::new(points)
}

/// Deterministic jagged ring, like a digitised coastline
fn coastline(n: usize, seed: u64) -> Ring {
    let mut state = seed;
    let mut points: Vec<Point> = (0..n - 1)
        .map(|i| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let jitter = ((state >> 33) as f64 / (1u64 << 31) as f64 - 0.5) * 0.02;
            let a = i as f64 / (n - 1) as f64 * std::f64::consts::TAU;
            let r = 1.0 + jitter;
            coord! { x: -95.0 + r * a.cos(), y: 38.0 + r * a.sin() }
        })
        .collect();
    points.push(points[0]);
    Ring::new(points)
}

#[test]
fn near_straight_line_collapses_to_endpoints() {
    let input: Vec<Point> = [(0.0, 0.0), (0.0, 1.0), (0.0001, 2.0), (0.0, 3.0), (0.0, 4.0)]
        .iter()
        .map(|&(x, y)| coord! { x: x, y: y })
        .collect();

    let reduced = reduce_line(&input, 0.01);

    assert_eq!(reduced, vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 0.0, y: 4.0 }]);
}

#[test]
fn collapsed_circle_falls_back_to_stride() {
    let ring = circle(1000, 0.0, 0.0, 1.0);
    let config = SimplificationConfig::default()
        .with_tolerance(5.0)
        .with_min_ring_vertices(MinRingVertices::Fixed(8))
        .with_precision(6);

    let processed = process_ring(&ring, &config);

    assert!(processed.usable);
    // 8 samples at stride 125, plus the original closing point
    assert_eq!(processed.ring.0.len(), 9);
    assert!(processed.ring.is_closed());
}

#[test]
fn ultra_keeps_five_largest_polygons() {
    let sizes = [5, 500, 50, 5, 5, 5, 5, 5, 5, 5];
    let multi = MultiPolygon::new(
        sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| Polygon::new(vec![circle(n, i as f64 * 5.0, 0.0, 1.0)]))
            .collect(),
    );

    assert_eq!(rank_polygons(&multi, Some(5)), vec![1, 2, 0, 3, 4]);

    let config = Profile::Ultra.config();
    let Geometry::MultiPolygon(result) = simplify(Geometry::MultiPolygon(multi), &config) else {
        panic!("multi-polygon expected");
    };
    assert_eq!(result.len(), 5);

    let centres: Vec<f64> = result
        .polygons()
        .iter()
        .map(|p| {
            let outer = p.outer().unwrap();
            let sum: f64 = outer.0.iter().map(|c| c.x).sum();
            (sum / outer.0.len() as f64 / 5.0).round()
        })
        .collect();
    assert_eq!(centres, vec![1.0, 2.0, 0.0, 3.0, 4.0]);
}

#[test]
fn degenerate_outer_ring_uses_fallback() {
    let outer = coastline(3000, 7);
    let config = SimplificationConfig::default()
        .with_tolerance(1e6)
        .with_min_ring_vertices(MinRingVertices::Fixed(1));

    let Geometry::Polygon(result) = simplify(Geometry::Polygon(Polygon::new(vec![outer])), &config)
    else {
        panic!("polygon expected");
    };

    assert_eq!(result.rings.len(), 1);
    let ring = &result.rings[0];
    assert!(ring.is_closed());
    // stride 30 over 3000 points: 100 samples plus closure
    assert_eq!(ring.0.len(), 101);
}

#[test]
fn ring_properties_hold_across_profiles() {
    for profile in [Profile::Light, Profile::Balanced, Profile::Ultra] {
        let config = profile.config();
        for (n, seed) in [(4, 1), (12, 2), (250, 3), (2000, 4), (10_000, 5)] {
            let ring = if n < 5 {
                Ring::new(vec![
                    coord! { x: 0.0, y: 0.0 },
                    coord! { x: 1.0, y: 0.0 },
                    coord! { x: 0.5, y: 1.0 },
                    coord! { x: 0.0, y: 0.0 },
                ])
            } else {
                coastline(n, seed)
            };
            let processed = process_ring(&ring, &config);

            assert!(processed.ring.is_closed(), "{profile} n={n}");
            assert!(processed.ring.0.len() >= 4, "{profile} n={n}");
            assert!(processed.ring.0.len() <= ring.0.len(), "{profile} n={n}");
            assert!(processed.usable, "{profile} n={n}");
        }
    }
}

#[test]
fn dropped_vertices_stay_within_tolerance() {
    let ring = coastline(1500, 11);
    let tolerance = 0.01;
    let reduced = reduce_line(&ring.0, tolerance);

    assert_eq!(reduced.first(), ring.0.first());
    assert_eq!(reduced.last(), ring.0.last());

    // Every original vertex lies within tolerance of the chord that replaced it
    let mut k = 0;
    for window in reduced.windows(2) {
        let (start, end) = (window[0], window[1]);
        while ring.0[k] != start {
            k += 1;
        }
        let mut j = k + 1;
        while j < ring.0.len() && ring.0[j] != end {
            assert!(perpendicular_distance(ring.0[j], start, end) <= tolerance);
            j += 1;
        }
        k = j;
    }
}

#[test]
fn file_round_trip_shrinks_and_keeps_properties() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("zones.geojson");
    let output = dir.path().join("zones.ultra.geojson");

    let ring: Vec<Vec<f64>> = coastline(4000, 21).0.iter().map(|c| vec![c.x, c.y]).collect();
    let islands: Vec<Vec<Vec<Vec<f64>>>> = (0..8)
        .map(|i| {
            vec![
                circle(40 + i * 10, -90.0 + i as f64, 30.0, 0.2)
                    .0
                    .iter()
                    .map(|c| vec![c.x, c.y])
                    .collect(),
            ]
        })
        .collect();
    let document = serde_json::json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "zone": "6b", "temp": "-5 to -0 F" },
                "geometry": { "type": "Polygon", "coordinates": [ring] }
            },
            {
                "type": "Feature",
                "properties": { "zone": "7a" },
                "geometry": { "type": "MultiPolygon", "coordinates": islands }
            }
        ]
    });
    fs::write(&input, serde_json::to_string_pretty(&document).unwrap()).unwrap();

    let mut parsed = read_document(&input).unwrap();
    let stats = simplify_document(&mut parsed, &Profile::Ultra.config()).unwrap();
    let written = write_document(&output, &parsed, false).unwrap();

    assert!(written < fs::metadata(&input).unwrap().len() / 10);
    assert_eq!(stats.features, 2);
    assert_eq!(stats.simplified, 2);
    assert!(stats.area_ratio() > 0.8);

    let reread: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(reread["features"][0]["properties"]["zone"], "6b");
    assert_eq!(
        reread["features"][1]["geometry"]["coordinates"]
            .as_array()
            .unwrap()
            .len(),
        5
    );
}

#[test]
fn unbounded_retention_keeps_every_polygon() {
    let multi = MultiPolygon::new(
        (0..12)
            .map(|i| Polygon::new(vec![circle(30 + i, i as f64 * 3.0, 0.0, 1.0)]))
            .collect(),
    );
    let config = SimplificationConfig::default().with_max_polygons(PolygonLimit::Unbounded);

    let Geometry::MultiPolygon(result) = simplify(Geometry::MultiPolygon(multi), &config) else {
        panic!("multi-polygon expected");
    };
    assert_eq!(result.len(), 12);
}
