const PERCENT: f64 = 100.0;

/// Terrain slope between the north and south auxiliaries, in percent.
pub fn slope_percent(north_z: f64, south_z: f64, delta_y_total: f64) -> f64 {
    (north_z - south_z).abs() / delta_y_total.abs() * PERCENT
}

/// Unsigned rise over run between the north and south auxiliaries.
pub fn slope_ratio(north_z: f64, south_z: f64, delta_y_total: f64) -> f64 {
    ((north_z - south_z) / delta_y_total).abs()
}

/// Right triangle formed by a pile's projected distance to the row center
/// (hypotenuse) and the elevation change that slope implies over it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub projected_dist_y: f64,
    pub theoretical_delta_z: f64,
    pub hypotenuse_y: f64,
}

impl Projection {
    pub fn new(pile_y: f64, center_y: f64, slope_ratio: f64) -> Self {
        let projected_dist_y = pile_y - center_y;
        let hypotenuse_y = projected_dist_y.abs();
        Self {
            projected_dist_y,
            theoretical_delta_z: hypotenuse_y * slope_ratio,
            hypotenuse_y,
        }
    }

    /// Horizontal leg of the triangle. `None` when the vertical leg exceeds
    /// the hypotenuse.
    pub fn reduced_distance(&self) -> Option<f64> {
        let hyp_sq = self.hypotenuse_y.powi(2);
        let dz_sq = self.theoretical_delta_z.powi(2);
        if hyp_sq < dz_sq {
            None
        } else {
            Some((hyp_sq - dz_sq).sqrt())
        }
    }

    /// Center Y moved by the reduced distance toward the pile.
    pub fn adjusted_y(&self, center_y: f64) -> Option<f64> {
        self.reduced_distance()
            .map(|reduced| center_y + sign(self.projected_dist_y) * reduced)
    }
}

fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
