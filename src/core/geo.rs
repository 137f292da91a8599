use crate::domain::model::Coordinate;

pub const DEFAULT_EARTH_RADIUS_KM: f64 = 6378.0;

/// Spherical law of cosines distance, in kilometers.
///
/// The longitude difference is taken between the absolute values of both
/// longitudes, `| |dest_lon| - |origin_lon| |`, rather than their signed
/// difference. Existing result files depend on this exact figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoDistance {
    earth_radius_km: f64,
}

impl GeoDistance {
    pub fn new(earth_radius_km: f64) -> Self {
        Self { earth_radius_km }
    }

    pub fn distance(&self, origin: Coordinate, destination: Coordinate) -> f64 {
        let origin_lat = origin.latitude_radians();
        let dest_lat = destination.latitude_radians();
        let diff_longitude =
            (destination.longitude_radians().abs() - origin.longitude_radians().abs()).abs();

        // acos is undefined outside [-1, 1]; rounding can overshoot near identical or antipodal points
        let cosine = (origin_lat.sin() * dest_lat.sin()
            + origin_lat.cos() * dest_lat.cos() * diff_longitude.cos())
        .clamp(-1.0, 1.0);

        cosine.acos() * self.earth_radius_km
    }
}

impl Default for GeoDistance {
    fn default() -> Self {
        Self::new(DEFAULT_EARTH_RADIUS_KM)
    }
}
