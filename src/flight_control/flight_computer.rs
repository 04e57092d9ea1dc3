use super::clock::AnomalyFlags;
use super::session::Session;
use crate::config::{ConfigError, ConfigSource, FeatureGates, Subsystem};
use crate::host::{HostError, HostVariableStore, HostVariables};
use crate::models::ModelSet;
use crate::models::records::ApproachCapability;
use crate::recording::{DataRecorder, TickSnapshot};
use crate::signal_conditioning::{DirectorCommand, TableError, ThrottleAxisMapper, ThrottleAxisState};
use crate::{error, event, info, log, warn};
use strum_macros::Display;

/// Reasons a session could not be established.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum ConnectError {
    Config(ConfigError),
    Host(HostError),
    Table(TableError),
}

impl std::error::Error for ConnectError {}

impl From<ConfigError> for ConnectError {
    fn from(e: ConfigError) -> Self { ConnectError::Config(e) }
}

impl From<HostError> for ConnectError {
    fn from(e: HostError) -> Self { ConnectError::Host(e) }
}

impl From<TableError> for ConnectError {
    fn from(e: TableError) -> Self { ConnectError::Table(e) }
}

/// Per frame orchestrator of the four control law models.
///
/// The host calls [`FlightComputer::update`] once per simulation frame. Every tick reads
/// the host state, steps the models in the fixed order mode logic, guidance law,
/// flight control law, autothrust law, conditions the director and approach capability
/// outputs and publishes everything back to the host.
///
/// All session state is created by [`FlightComputer::connect`] and dropped by
/// [`FlightComputer::disconnect`].
pub struct FlightComputer<H: HostVariableStore, R: DataRecorder> {
    host: H,
    models: ModelSet,
    recorder: R,
    config_source: Box<dyn ConfigSource>,
    session: Option<Session>,
}

impl<H: HostVariableStore, R: DataRecorder> FlightComputer<H, R> {
    pub fn new(host: H, models: ModelSet, recorder: R, config_source: Box<dyn ConfigSource>) -> Self {
        Self { host, models, recorder, config_source, session: None }
    }

    /// Loads the configuration, resolves every host variable and resets the models.
    /// An existing session is disconnected first.
    ///
    /// # Errors
    /// A [`ConnectError`] if the configuration is unusable or a host variable cannot be
    /// resolved. No handle stays resolved in that case.
    pub fn connect(&mut self) -> Result<(), ConnectError> {
        if self.session.is_some() {
            self.disconnect();
        }
        match self.open_session() {
            Ok(session) => {
                info!(
                    "Connected using {}, {} host variables resolved",
                    self.config_source.describe(),
                    session.vars.handles().len()
                );
                log!("Feature gates: {:?}", session.gates);
                self.session = Some(session);
                Ok(())
            }
            Err(e) => {
                error!("Connect failed: {e:?}");
                Err(e)
            }
        }
    }

    fn open_session(&mut self) -> Result<Session, ConnectError> {
        let config = self.config_source.load()?;
        let throttle_mapper = ThrottleAxisMapper::new(&config.throttle)?;
        let vars = HostVariables::resolve(&mut self.host)?;
        self.models.reset_all();
        Ok(Session::new(vars, &config, throttle_mapper))
    }

    /// Releases every host variable and drops the session. Safe to call at any time,
    /// also repeatedly and after a failed update.
    pub fn disconnect(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Disconnecting after {} ticks", session.tick);
            session.vars.release(&mut self.host);
            self.recorder.flush();
        }
    }

    pub fn is_connected(&self) -> bool { self.session.is_some() }

    /// Runs one tick at `host_time`, in seconds since session start.
    ///
    /// A tick is a pause if the host reports a pause or `host_time` did not advance. A
    /// pause tick steps nothing and republishes the last outputs. While slewing the flight
    /// control and autothrust laws are held, and both are reset once slew ends.
    ///
    /// # Errors
    /// [`HostError::NotConnected`] without a session, otherwise the first host error.
    /// Nothing is retried, the caller decides whether to disconnect.
    pub fn update(&mut self, host_time: f64) -> Result<(), HostError> {
        let Some(session) = self.session.as_mut() else {
            return Err(HostError::NotConnected);
        };
        let sample_time = session.clock.advance(host_time);
        let host_paused = self.host.read_bool(session.vars.sim.paused)?;
        let slew_active = self.host.read_bool(session.vars.sim.slew)?;

        let previous = session.anomalies;
        let anomalies = AnomalyFlags::detect(host_paused, slew_active, sample_time);
        if !anomalies.pause_detected {
            session.read_inputs(&self.host, host_time)?;
        }

        if anomalies.pause_entered(&previous) {
            log!("Pause detected at {host_time:.3}s (sample time {sample_time:.4}s)");
        } else if anomalies.pause_left(&previous) {
            log!("Pause left at {host_time:.3}s");
        }
        if anomalies.slew_entered(&previous) {
            log!("Slew entered, holding surface and thrust laws");
        } else if anomalies.slew_left(&previous) {
            log!("Slew left, surface and thrust laws will be reset");
            session.reinit_pending = true;
        }
        session.anomalies = anomalies;

        if !anomalies.pause_detected {
            if session.reinit_pending && !anomalies.was_in_slew {
                self.models.flight_control_law.reset();
                self.models.autothrust_law.reset();
                session.reinit_pending = false;
            }
            session.step_models(&mut self.models);
            session.condition_outputs(host_time);
        }
        session.publish(&mut self.host)?;

        session.tick += 1;
        event!("Tick {} at {host_time:.3}s, dt {sample_time:.4}s", session.tick);
        self.recorder.record(&session.snapshot());
        session.clock.commit();
        Ok(())
    }

    /// Overrides one feature gate of the live session.
    ///
    /// # Errors
    /// [`HostError::NotConnected`] without a session.
    pub fn set_feature_gate(&mut self, subsystem: Subsystem, enabled: bool) -> Result<(), HostError> {
        let session = self.session.as_mut().ok_or(HostError::NotConnected)?;
        warn!("Feature gate {subsystem} overridden to {enabled}");
        session.gates.set(subsystem, enabled);
        if subsystem == Subsystem::DirectorSmoothing {
            session.set_director_smoothing(enabled);
        }
        Ok(())
    }

    pub fn host(&self) -> &H { &self.host }
    pub fn host_mut(&mut self) -> &mut H { &mut self.host }
    pub fn recorder(&self) -> &R { &self.recorder }

    pub fn feature_gates(&self) -> Option<FeatureGates> { self.session.as_ref().map(|s| s.gates) }

    pub fn anomaly_flags(&self) -> Option<AnomalyFlags> { self.session.as_ref().map(|s| s.anomalies) }

    /// Flight director command as last published.
    pub fn flight_director(&self) -> Option<DirectorCommand> {
        self.session.as_ref().map(Session::flight_director)
    }

    pub fn approach_capability(&self) -> Option<ApproachCapability> {
        self.session.as_ref().map(Session::approach_capability)
    }

    pub fn throttle_state(&self, engine: usize) -> Option<ThrottleAxisState> {
        self.session.as_ref().and_then(|s| s.throttle(engine))
    }

    /// State of the last tick, as handed to the recorder.
    pub fn snapshot(&self) -> Option<TickSnapshot> { self.session.as_ref().map(Session::snapshot) }
}
