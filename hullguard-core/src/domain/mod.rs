mod analysis;
mod cleaning;
mod position;
mod sessions;
mod stops;
mod vessels;
mod zones;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.
            && self.longitude.abs() <= 180.
    }
}

pub use analysis::*;
pub use cleaning::*;
pub use position::*;
pub use sessions::*;
pub use stops::*;
pub use vessels::*;
pub use zones::*;
