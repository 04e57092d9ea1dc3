use super::clock::{AnomalyFlags, SimulationClock};
use crate::config::{FeatureGates, ModelConfiguration};
use crate::host::{HostError, HostVariableStore, HostVariables};
use crate::models::ModelSet;
use crate::models::records::{
    ApproachCapability, AutothrustInput, AutothrustOutput, CockpitInputs, CustomGuidance,
    ENGINE_COUNT, FlightControlLawInput, FlightControlLawOutput, FmgcData, GuidanceLawInput,
    GuidanceLawOutput, ModeLogicInput, ModeLogicOutput, ModelIo, ModelTime, SensedState,
};
use crate::recording::TickSnapshot;
use crate::signal_conditioning::{
    Debouncer, DetentZone, DirectorCommand, DirectorSmoother, ThrottleAxisMapper,
    ThrottleAxisState,
};
use crate::{event, info};

/// All state of one connected session. Created by `connect`, dropped by `disconnect`.
pub(super) struct Session {
    pub(super) vars: HostVariables,
    pub(super) gates: FeatureGates,
    pub(super) clock: SimulationClock,
    pub(super) anomalies: AnomalyFlags,
    /// Set on the falling edge of slew, consumed by the next stepped tick.
    pub(super) reinit_pending: bool,
    pub(super) tick: u64,
    throttle_mapper: ThrottleAxisMapper,
    throttle: [ThrottleAxisState; ENGINE_COUNT],
    mode_logic: ModelIo<ModeLogicInput, ModeLogicOutput>,
    guidance_law: ModelIo<GuidanceLawInput, GuidanceLawOutput>,
    flight_control_law: ModelIo<FlightControlLawInput, FlightControlLawOutput>,
    autothrust_law: ModelIo<AutothrustInput, AutothrustOutput>,
    smoother: DirectorSmoother,
    flight_director: DirectorCommand,
    approach_capability: Debouncer<ApproachCapability>,
}

impl Session {
    pub(super) fn new(
        vars: HostVariables,
        config: &ModelConfiguration,
        throttle_mapper: ThrottleAxisMapper,
    ) -> Self {
        Self {
            vars,
            gates: config.gates,
            clock: SimulationClock::new(0.0),
            anomalies: AnomalyFlags::default(),
            reinit_pending: false,
            tick: 0,
            throttle_mapper,
            throttle: [ThrottleAxisState::default(); ENGINE_COUNT],
            mode_logic: ModelIo::default(),
            guidance_law: ModelIo::default(),
            flight_control_law: ModelIo::default(),
            autothrust_law: ModelIo::default(),
            smoother: DirectorSmoother::new(
                config.gates.director_smoothing,
                config.smoothing_factor,
                config.smoothing_limit,
            ),
            flight_director: DirectorCommand::default(),
            approach_capability: Debouncer::new(
                ApproachCapability::None,
                config.approach_capability_dwell_time,
            ),
        }
    }

    pub(super) fn set_director_smoothing(&mut self, enabled: bool) { self.smoother.set_enabled(enabled); }

    pub(super) fn flight_director(&self) -> DirectorCommand { self.flight_director }

    pub(super) fn approach_capability(&self) -> ApproachCapability { self.approach_capability.published() }

    pub(super) fn throttle(&self, engine: usize) -> Option<ThrottleAxisState> { self.throttle.get(engine).copied() }

    /// Refreshes every input record from the host, the throttle levers included.
    /// On error no record is touched.
    pub(super) fn read_inputs(
        &mut self,
        host: &dyn HostVariableStore,
        host_time: f64,
    ) -> Result<(), HostError> {
        let time = ModelTime { simulation_time: host_time, dt: self.clock.sample_time() };
        let sensed = self.read_sensed(host)?;
        let cockpit = self.read_cockpit(host)?;
        let fmgc = self.read_fmgc(host)?;
        let custom = if self.gates.custom_guidance {
            self.read_custom_guidance(host)?
        } else {
            CustomGuidance::default()
        };

        let mut throttle = self.throttle;
        for (engine, vars) in self.vars.engines.iter().enumerate() {
            let raw = host.read(vars.raw_throttle)?;
            let reverse_armed = host.read_bool(vars.reverse_armed)?;
            throttle[engine] = self.throttle_mapper.map(engine, raw, reverse_armed);
        }

        // every read succeeded, nothing below can fail
        self.throttle = throttle;
        self.mode_logic.input.time = time;
        self.mode_logic.input.sensed = sensed;
        self.mode_logic.input.cockpit = cockpit;
        self.mode_logic.input.fmgc = fmgc;

        self.guidance_law.input.time = time;
        self.guidance_law.input.sensed = sensed;
        self.guidance_law.input.custom = custom;

        self.flight_control_law.input.time = time;
        self.flight_control_law.input.sensed = sensed;
        self.flight_control_law.input.tailstrike_protection_enabled =
            self.gates.tailstrike_protection;

        self.autothrust_law.input.time = time;
        self.autothrust_law.input.sensed = sensed;
        self.autothrust_law.input.fmgc = fmgc;
        for (engine, state) in self.throttle.iter().enumerate() {
            self.autothrust_law.input.tla_deg[engine] = state.tla;
            self.autothrust_law.input.reverse[engine] = state.zone == DetentZone::Reverse;
        }
        Ok(())
    }

    fn read_sensed(&self, host: &dyn HostVariableStore) -> Result<SensedState, HostError> {
        let sim = &self.vars.sim;
        let mut engine_n1 = [0.0; ENGINE_COUNT];
        for (n1, vars) in engine_n1.iter_mut().zip(&self.vars.engines) {
            *n1 = host.read(vars.n1)?;
        }
        Ok(SensedState {
            pitch_deg: host.read(sim.pitch)?,
            bank_deg: host.read(sim.bank)?,
            heading_deg: host.read(sim.heading)?,
            track_deg: host.read(sim.track)?,
            pitch_rate_deg_s: host.read(sim.pitch_rate)?,
            roll_rate_deg_s: host.read(sim.roll_rate)?,
            yaw_rate_deg_s: host.read(sim.yaw_rate)?,
            load_factor_g: host.read(sim.load_factor)?,
            v_ias_kn: host.read(sim.v_ias)?,
            v_tas_kn: host.read(sim.v_tas)?,
            v_gs_kn: host.read(sim.v_gs)?,
            vertical_speed_fpm: host.read(sim.vertical_speed)?,
            altitude_ft: host.read(sim.altitude)?,
            radio_altitude_ft: host.read(sim.radio_altitude)?,
            on_ground: host.read_bool(sim.on_ground)?,
            side_stick_x: host.read(sim.side_stick_x)?,
            side_stick_y: host.read(sim.side_stick_y)?,
            engine_n1,
        })
    }

    fn read_cockpit(&self, host: &dyn HostVariableStore) -> Result<CockpitInputs, HostError> {
        let fcu = &self.vars.cockpit;
        Ok(CockpitInputs {
            selected_heading_deg: host.read(fcu.selected_heading)?,
            selected_vs_fpm: host.read(fcu.selected_vs)?,
            selected_fpa_deg: host.read(fcu.selected_fpa)?,
            selected_altitude_ft: host.read(fcu.selected_altitude)?,
            selected_speed_kn: host.read(fcu.selected_speed)?,
            trk_fpa_mode: host.read_bool(fcu.trk_fpa_mode)?,
            loc_pushed: host.read_bool(fcu.loc_pushed)?,
            appr_pushed: host.read_bool(fcu.appr_pushed)?,
            ap_1_pushed: host.read_bool(fcu.ap_1_pushed)?,
            ap_2_pushed: host.read_bool(fcu.ap_2_pushed)?,
            athr_pushed: host.read_bool(fcu.athr_pushed)?,
        })
    }

    fn read_fmgc(&self, host: &dyn HostVariableStore) -> Result<FmgcData, HostError> {
        let fm = &self.vars.fmgc;
        Ok(FmgcData {
            fwc_flight_phase: host.read(fm.fwc_flight_phase)?,
            flight_phase: host.read(fm.flight_phase)?,
            v2_kn: host.read(fm.v2)?,
            v_app_kn: host.read(fm.v_app)?,
            v_ls_kn: host.read(fm.v_ls)?,
            v_max_kn: host.read(fm.v_max)?,
            altitude_constraint_ft: host.read(fm.altitude_constraint)?,
            thrust_reduction_altitude_ft: host.read(fm.thrust_reduction_altitude)?,
            thrust_reduction_altitude_go_around_ft: host
                .read(fm.thrust_reduction_altitude_go_around)?,
            acceleration_altitude_ft: host.read(fm.acceleration_altitude)?,
            acceleration_altitude_engine_out_ft: host.read(fm.acceleration_altitude_engine_out)?,
            acceleration_altitude_go_around_ft: host.read(fm.acceleration_altitude_go_around)?,
            acceleration_altitude_go_around_engine_out_ft: host
                .read(fm.acceleration_altitude_go_around_engine_out)?,
            cruise_altitude_ft: host.read(fm.cruise_altitude)?,
            flex_temperature_deg_c: host.read(fm.flex_temperature)?,
        })
    }

    fn read_custom_guidance(&self, host: &dyn HostVariableStore) -> Result<CustomGuidance, HostError> {
        let fg = &self.vars.custom_guidance;
        Ok(CustomGuidance {
            available: host.read_bool(fg.available)?,
            cross_track_error_nm: host.read(fg.cross_track_error)?,
            track_angle_error_deg: host.read(fg.track_angle_error)?,
            phi_command_deg: host.read(fg.phi_command)?,
        })
    }

    /// Steps the four models in pipeline order. Disabled models keep their last output;
    /// surface and thrust laws are held while slewing.
    pub(super) fn step_models(&mut self, models: &mut ModelSet) {
        let gates = self.gates;
        let slewing = self.anomalies.was_in_slew;

        self.mode_logic.input.previous_guidance = self.guidance_law.output;
        if gates.mode_logic {
            self.mode_logic.output = models.mode_logic.step(&self.mode_logic.input);
        }

        self.guidance_law.input.mode = self.mode_logic.output;
        if gates.guidance_law {
            self.guidance_law.output = models.guidance_law.step(&self.guidance_law.input);
        }

        self.flight_control_law.input.autopilot = self.guidance_law.output;
        if gates.flight_control_law && !slewing {
            self.flight_control_law.output =
                models.flight_control_law.step(&self.flight_control_law.input);
        }

        self.autothrust_law.input.mode = self.mode_logic.output;
        self.autothrust_law.input.guidance = self.guidance_law.output;
        if gates.autothrust && !slewing {
            self.autothrust_law.output = models.autothrust_law.step(&self.autothrust_law.input);
        }
    }

    /// Director smoothing and approach capability debounce.
    pub(super) fn condition_outputs(&mut self, host_time: f64) {
        let sample_time = self.clock.sample_time();
        self.flight_director =
            self.smoother.apply(sample_time, self.guidance_law.output.flight_director);
        let candidate = self.mode_logic.output.approach_capability;
        if let Some(published) = self.approach_capability.update(host_time, sample_time, candidate) {
            info!("Approach capability now {published} at {host_time:.3}s");
        } else if let Some((pending, held)) = self.approach_capability.pending() {
            event!("Approach capability {pending} pending for {held:.3}s");
        }
    }

    /// Writes every published value to the host.
    pub(super) fn publish(&self, host: &mut dyn HostVariableStore) -> Result<(), HostError> {
        let out = &self.vars.outputs;
        let mode = &self.mode_logic.output;
        host.write(out.fma_lateral_mode, mode.lateral_mode.code())?;
        host.write(out.fma_lateral_armed, f64::from(mode.lateral_armed))?;
        host.write(out.fma_vertical_mode, mode.vertical_mode.code())?;
        host.write(out.fma_vertical_armed, f64::from(mode.vertical_armed))?;
        host.write_bool(out.fma_soft_alt_active, mode.soft_alt_active)?;
        host.write(out.fma_approach_capability, self.approach_capability.published().code())?;
        host.write_bool(out.ap_active_any, mode.any_ap_active())?;
        host.write_bool(out.ap_1_active, mode.ap_1_active)?;
        host.write_bool(out.ap_2_active, mode.ap_2_active)?;
        host.write_bool(out.ap_autothrust_mode, mode.athr_requested)?;
        host.write_bool(out.fcu_mode_reversion, mode.mode_reversion)?;
        host.write_bool(out.fcu_mode_reversion_trk_fpa, mode.mode_reversion_trk_fpa)?;

        host.write(out.fd_pitch, self.flight_director.pitch)?;
        host.write(out.fd_bank, self.flight_director.bank)?;
        host.write(out.fd_yaw, self.flight_director.yaw)?;

        let surfaces = &self.flight_control_law.output;
        host.write(out.elevator, surfaces.elevator_deg)?;
        host.write(out.aileron, surfaces.aileron_deg)?;
        host.write(out.rudder, surfaces.rudder_deg)?;
        host.write(out.stabilizer_trim, surfaces.stabilizer_trim_deg)?;

        let athr = &self.autothrust_law.output;
        host.write(out.athr_thrust_limit_type, athr.thrust_limit_type.code())?;
        host.write(out.athr_thrust_limit, athr.thrust_limit)?;
        host.write(out.athr_status, athr.status.code())?;
        host.write(out.athr_mode, f64::from(athr.mode))?;
        host.write(out.athr_mode_message, f64::from(athr.mode_message))?;

        for (engine, vars) in self.vars.engines.iter().enumerate() {
            let lever = &self.throttle[engine];
            host.write(vars.tla, lever.tla)?;
            host.write(vars.n1_tla, athr.n1_tla[engine])?;
            host.write_bool(vars.reverse, lever.zone == DetentZone::Reverse)?;
            host.write(vars.n1_command, athr.n1_command[engine])?;
            host.write(vars.lever_position_3d, lever.lever_position_3d)?;
            host.write(vars.detent_zone, lever.zone.code())?;
        }
        Ok(())
    }

    pub(super) fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            tick: self.tick,
            host_time: self.clock.current_time(),
            sample_time: self.clock.sample_time(),
            pause_detected: self.anomalies.pause_detected,
            slew_active: self.anomalies.was_in_slew,
            gates: self.gates,
            mode_logic: self.mode_logic,
            guidance_law: self.guidance_law,
            flight_control_law: self.flight_control_law,
            autothrust_law: self.autothrust_law,
            throttle: self.throttle,
            flight_director: self.flight_director,
            approach_capability: self.approach_capability.published(),
        }
    }
}
