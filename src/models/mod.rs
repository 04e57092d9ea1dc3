//! The four control law models behind a uniform `step(input) -> output` trait, their record
//! types, and reference implementations for bench runs.

mod discrete_time_model;
pub(crate) mod records;
mod reference;
#[cfg(test)]
mod tests;

pub use discrete_time_model::{
    AutothrustLawModel, DiscreteTimeModel, FlightControlLawModel, GuidanceLawModel,
    ModeLogicModel, ModelSet,
};
pub use reference::{
    ReferenceAutothrustLaw, ReferenceFlightControlLaw, ReferenceGuidanceLaw, ReferenceModeLogic,
};
