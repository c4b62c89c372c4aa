use std::f64::consts::{PI, TAU};

/// How sexagesimal minute/second fields are folded into an angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleConvention {
    /// Compatibility conversion. Whole minutes are divided by 60 (RA) or by the
    /// catalog size N (declination) in integer arithmetic, so the quotient
    /// truncates toward zero. Seconds are divided by 360 (RA) or N² (declination)
    /// as reals.
    #[default]
    Legacy,
    /// Conventional 60/3600 divisors for both RA and declination, in real arithmetic.
    Sexagesimal,
}

/// Convert right ascension given as hours, minutes, seconds to radians.
pub fn ra_hms_to_rad(hours: i32, minutes: i32, seconds: f64, convention: AngleConvention) -> f64 {
    let h = match convention {
        AngleConvention::Legacy => {
            (i64::from(hours) + i64::from(minutes / 60)) as f64 + seconds / 360.0
        }
        AngleConvention::Sexagesimal => hours as f64 + minutes as f64 / 60.0 + seconds / 3600.0,
    };
    h * TAU / 24.0
}

/// Convert declination given as degrees, minutes, seconds to radians.
///
/// `n` is the number of stars in the catalog; only the legacy convention uses it,
/// and there it must be nonzero (a zero `n` yields NaN).
/// Minutes and seconds are added to the degree term as-is, whatever its sign.
pub fn dec_dms_to_rad(
    degrees: i32,
    minutes: i32,
    seconds: f64,
    n: usize,
    convention: AngleConvention,
) -> f64 {
    let d = match convention {
        AngleConvention::Legacy => {
            let whole = i64::try_from(n)
                .ok()
                .and_then(|n| i64::from(minutes).checked_div(n))
                .map_or(f64::NAN, |q| q as f64);
            let n = n as f64;
            degrees as f64 + whole + seconds / (n * n)
        }
        AngleConvention::Sexagesimal => {
            degrees as f64 + minutes as f64 / 60.0 + seconds / 3600.0
        }
    };
    d * PI / 180.0
}

/// Place a point at `radius` along the direction given by (RA, Dec) in radians.
///
/// Declination is measured as a polar angle from +z: a star at Dec = 0 lies on
/// the z axis, and Dec = pi/2 lies in the xy plane at azimuth RA.
pub fn spherical_to_cartesian(ra: f64, dec: f64, radius: f64) -> [f64; 3] {
    let sin_dec = dec.sin();
    [
        radius * sin_dec * ra.cos(),
        radius * sin_dec * ra.sin(),
        radius * dec.cos(),
    ]
}

/// Euclidean distance between two points.
pub fn euclidean_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
