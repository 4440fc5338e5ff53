use rand::Rng;

/// Initial great-circle bearing from origin to destination, in degrees
/// normalized to [0, 360).
pub fn initial_bearing(origin_lat: f64, origin_lon: f64, dest_lat: f64, dest_lon: f64) -> f64 {
    let d_lon = (dest_lon - origin_lon).to_radians();
    let lat1 = origin_lat.to_radians();
    let lat2 = dest_lat.to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let degrees = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid of a tiny negative can round up to exactly 360.0.
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

/// Random point within ± spread/2 degrees of the input on both axes.
/// Cosmetic: it gives each event a plausible-looking direction of attack
/// and has no geodetic meaning.
pub fn jittered_origin(lat: f64, lon: f64, spread_degrees: f64) -> (f64, f64) {
    let mut rng = rand::thread_rng();
    (
        lat + (rng.gen::<f64>() - 0.5) * spread_degrees,
        lon + (rng.gen::<f64>() - 0.5) * spread_degrees,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_bearings_on_the_equator() {
        assert!((initial_bearing(0.0, 0.0, 0.0, 10.0) - 90.0).abs() < 1e-9);
        assert!((initial_bearing(0.0, 0.0, 0.0, -10.0) - 270.0).abs() < 1e-9);
        assert!((initial_bearing(0.0, 0.0, 10.0, 0.0) - 0.0).abs() < 1e-9);
        assert!((initial_bearing(10.0, 0.0, 0.0, 0.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_always_in_range() {
        for lat1 in [-80.0, -30.0, 0.0, 45.0, 80.0] {
            for lon1 in [-170.0, -60.0, 0.0, 90.0, 179.0] {
                for lat2 in [-75.0, 0.0, 60.0] {
                    for lon2 in [-120.0, 10.0, 160.0] {
                        let b = initial_bearing(lat1, lon1, lat2, lon2);
                        assert!((0.0..360.0).contains(&b), "bearing {b} out of range");
                    }
                }
            }
        }
    }

    #[test]
    fn jitter_stays_within_spread() {
        for _ in 0..200 {
            let (lat, lon) = jittered_origin(48.0, 31.0, 8.0);
            assert!((lat - 48.0).abs() <= 4.0);
            assert!((lon - 31.0).abs() <= 4.0);
        }
    }
}
