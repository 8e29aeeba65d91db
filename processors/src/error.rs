use hullguard_core::VesselId;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("No records available for vessel '{vessel_id}'"))]
    MissingVesselData {
        #[snafu(implicit)]
        location: Location,
        vessel_id: VesselId,
    },
}
