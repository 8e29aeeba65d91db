use crate::Coordinates;

pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers, computed
/// with the haversine formula on a mean Earth radius of 6371 km.
///
/// Total for all finite inputs; antipodal pairs degrade to roughly half the
/// Earth's circumference instead of erroring.
pub fn distance_km(a: &Coordinates, b: &Coordinates) -> f64 {
    let phi_a = a.latitude.to_radians();
    let phi_b = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let hav =
        (d_phi / 2.).sin().powi(2) + phi_a.cos() * phi_b.cos() * (d_lambda / 2.).sin().powi(2);

    // Floating point rounding can push `hav` marginally above 1 for
    // near-antipodal pairs, which would make `asin` return NaN.
    2. * MEAN_EARTH_RADIUS_KM * hav.sqrt().min(1.).asin()
}
