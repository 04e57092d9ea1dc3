use super::records::{
    AutothrustInput, AutothrustOutput, FlightControlLawInput, FlightControlLawOutput,
    GuidanceLawInput, GuidanceLawOutput, ModeLogicInput, ModeLogicOutput,
};

/// A discrete-time model stepped at most once per tick.
///
/// Implementors keep their integrators internally and have no side effects beyond them.
pub trait DiscreteTimeModel {
    type Input;
    type Output;

    /// Returns the integrators to their initial conditions.
    fn reset(&mut self);

    /// Advances the model by `input.time.dt` and returns the new output record.
    fn step(&mut self, input: &Self::Input) -> Self::Output;
}

pub type ModeLogicModel = Box<dyn DiscreteTimeModel<Input = ModeLogicInput, Output = ModeLogicOutput>>;
pub type GuidanceLawModel =
    Box<dyn DiscreteTimeModel<Input = GuidanceLawInput, Output = GuidanceLawOutput>>;
pub type FlightControlLawModel =
    Box<dyn DiscreteTimeModel<Input = FlightControlLawInput, Output = FlightControlLawOutput>>;
pub type AutothrustLawModel = Box<dyn DiscreteTimeModel<Input = AutothrustInput, Output = AutothrustOutput>>;

/// The four control law models, in pipeline order.
pub struct ModelSet {
    pub mode_logic: ModeLogicModel,
    pub guidance_law: GuidanceLawModel,
    pub flight_control_law: FlightControlLawModel,
    pub autothrust_law: AutothrustLawModel,
}

impl ModelSet {
    pub fn new(
        mode_logic: ModeLogicModel,
        guidance_law: GuidanceLawModel,
        flight_control_law: FlightControlLawModel,
        autothrust_law: AutothrustLawModel,
    ) -> Self {
        Self { mode_logic, guidance_law, flight_control_law, autothrust_law }
    }

    pub fn reset_all(&mut self) {
        self.mode_logic.reset();
        self.guidance_law.reset();
        self.flight_control_law.reset();
        self.autothrust_law.reset();
    }
}
