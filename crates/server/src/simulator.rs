// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Background load simulator.
//!
//! A single scheduler task owns the simulator state. HTTP handlers talk to
//! it through a `SimulatorHandle`, which sends commands over an `mpsc`
//! channel and waits for the reply on a `oneshot`. While running, each tick
//! registers one synthetic vessel and books it through the booking service.

use portlink::{CoreError, EventNotifier, PortEvent};
use portlink_api::PortlinkService;
use portlink_domain::{
    Berth, ConflictScope, DomainError, PortCall, PortCallDetails, UtcTimestamp, Vessel,
    validate_vessel_fields,
};
use portlink_persistence::{Persistence, PersistenceError};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::scenario::{
    ScenarioRolls, ScenarioSuggestion, fallback_imo_number, plan_scenario, random_imo_number,
};

const COMMAND_BUFFER_SIZE: usize = 16;
const RANDOM_IMO_ATTEMPTS: usize = 10;

/// Errors raised by the simulator or its control channel.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("persistence failure: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("booking failed: {0}")]
    Booking(#[from] CoreError),
    #[error("generated scenario is invalid: {0}")]
    InvalidScenario(#[from] DomainError),
    #[error("{0} has no id after being stored")]
    Unpersisted(&'static str),
    #[error("simulator task is not running")]
    ChannelClosed,
}

/// The simulator's externally visible state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulatorStatus {
    pub running: bool,
    pub operations_per_second: u32,
    pub suggestion: Option<ScenarioSuggestion>,
}

#[derive(Debug)]
pub enum SimulatorCommand {
    Start {
        operations_per_second: u32,
        suggestion: Option<ScenarioSuggestion>,
        reply: oneshot::Sender<SimulatorStatus>,
    },
    Stop {
        reply: oneshot::Sender<SimulatorStatus>,
    },
    Status {
        reply: oneshot::Sender<SimulatorStatus>,
    },
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A vessel was registered and its port call stored.
    Booked { vessel_id: i64, port_call_id: i64 },
    /// Nothing was booked this cycle.
    Skipped,
}

/// Cloneable control surface of the scheduler task.
#[derive(Debug, Clone)]
pub struct SimulatorHandle {
    tx: mpsc::Sender<SimulatorCommand>,
}

impl SimulatorHandle {
    async fn request(
        &self,
        command: impl FnOnce(oneshot::Sender<SimulatorStatus>) -> SimulatorCommand,
    ) -> Result<SimulatorStatus, SimulatorError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(command(reply))
            .await
            .map_err(|_| SimulatorError::ChannelClosed)?;
        response.await.map_err(|_| SimulatorError::ChannelClosed)
    }

    /// Starts (or reconfigures) the simulator.
    ///
    /// # Errors
    ///
    /// Returns `SimulatorError::ChannelClosed` if the scheduler task has exited.
    pub async fn start(
        &self,
        operations_per_second: u32,
        suggestion: Option<ScenarioSuggestion>,
    ) -> Result<SimulatorStatus, SimulatorError> {
        self.request(|reply| SimulatorCommand::Start {
            operations_per_second,
            suggestion,
            reply,
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `SimulatorError::ChannelClosed` if the scheduler task has exited.
    pub async fn stop(&self) -> Result<SimulatorStatus, SimulatorError> {
        self.request(|reply| SimulatorCommand::Stop { reply }).await
    }

    /// # Errors
    ///
    /// Returns `SimulatorError::ChannelClosed` if the scheduler task has exited.
    pub async fn status(&self) -> Result<SimulatorStatus, SimulatorError> {
        self.request(|reply| SimulatorCommand::Status { reply })
            .await
    }
}

/// Spawns the scheduler task and returns its handle.
///
/// The task exits once every handle has been dropped.
pub fn spawn_simulator<N>(service: Arc<PortlinkService<N>>, interval: Duration) -> SimulatorHandle
where
    N: EventNotifier + 'static,
{
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER_SIZE);
    tokio::spawn(run_scheduler(service, interval, rx));
    SimulatorHandle { tx }
}

async fn run_scheduler<N: EventNotifier>(
    service: Arc<PortlinkService<N>>,
    interval: Duration,
    mut rx: mpsc::Receiver<SimulatorCommand>,
) {
    let mut status: SimulatorStatus = SimulatorStatus::default();
    let mut ticker: tokio::time::Interval = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            command = rx.recv() => {
                let Some(command) = command else {
                    debug!("All simulator handles dropped, stopping scheduler");
                    break;
                };
                apply_command(&mut status, command);
            }
            _ = ticker.tick(), if status.running => {
                match run_tick(&service, &status).await {
                    Ok(TickOutcome::Booked { vessel_id, port_call_id }) => {
                        debug!(vessel_id, port_call_id, "Simulator tick booked a port call");
                    }
                    Ok(TickOutcome::Skipped) => {}
                    Err(SimulatorError::Booking(err)) if err.is_rejection() => {
                        info!(error = %err, "Simulated booking rejected");
                    }
                    Err(SimulatorError::Booking(err)) => {
                        debug!(error = %err, "Simulated booking failed in the booking service");
                    }
                    Err(err) => {
                        error!(error = %err, "Error in load simulator");
                    }
                }
            }
        }
    }
}

fn apply_command(status: &mut SimulatorStatus, command: SimulatorCommand) {
    let reply: oneshot::Sender<SimulatorStatus> = match command {
        SimulatorCommand::Start {
            operations_per_second,
            suggestion,
            reply,
        } => {
            status.running = true;
            status.operations_per_second = operations_per_second.max(1);
            status.suggestion = suggestion;
            info!(
                operations_per_second = status.operations_per_second,
                "Load simulator started"
            );
            reply
        }
        SimulatorCommand::Stop { reply } => {
            status.running = false;
            info!("Load simulator stopped");
            reply
        }
        SimulatorCommand::Status { reply } => reply,
    };

    if reply.send(status.clone()).is_err() {
        debug!("Simulator caller went away before the reply");
    }
}

/// Picks an IMO number that is not registered yet.
///
/// Tries the suggestion, then random candidates, then a clock-derived one.
///
/// # Errors
///
/// Returns an error if a lookup fails.
pub fn unique_imo_number(
    persistence: &mut Persistence,
    suggested: Option<&str>,
    now: UtcTimestamp,
) -> Result<String, PersistenceError> {
    if let Some(imo_number) = suggested {
        if persistence.get_vessel_by_imo(imo_number)?.is_none() {
            return Ok(imo_number.to_string());
        }
        warn!(
            imo_number,
            "Suggested IMO number already exists, generating one instead"
        );
    }

    for _ in 0..RANDOM_IMO_ATTEMPTS {
        let candidate: String = random_imo_number();
        if persistence.get_vessel_by_imo(&candidate)?.is_none() {
            return Ok(candidate);
        }
    }

    let fallback: String = fallback_imo_number(now);
    warn!(imo_number = %fallback, "Falling back to time-based IMO number");
    Ok(fallback)
}

/// Registers one synthetic vessel and books it on a random available berth.
///
/// # Errors
///
/// Returns `SimulatorError::Booking` if the booking service rejects the
/// request, or a persistence error if the store fails.
pub async fn run_tick<N: EventNotifier>(
    service: &PortlinkService<N>,
    status: &SimulatorStatus,
) -> Result<TickOutcome, SimulatorError> {
    let now: UtcTimestamp = UtcTimestamp::now();
    let rolls: ScenarioRolls = ScenarioRolls::random();
    let suggestion: Option<&ScenarioSuggestion> = status.suggestion.as_ref();

    let mut persistence = service.store().lock().await;
    let berths: Vec<Berth> = persistence.list_available_berths()?;
    if berths.is_empty() {
        info!("No available berths for load simulator, skipping this cycle");
        return Ok(TickOutcome::Skipped);
    }
    let Some(berth) = berths.get(rand::random_range(0..berths.len())) else {
        return Ok(TickOutcome::Skipped);
    };
    let berth_id: i64 = berth.berth_id.ok_or(SimulatorError::Unpersisted("berth"))?;

    let open: Vec<PortCallDetails> = persistence
        .list_port_calls_by_berth(berth_id, ConflictScope::AllOpen.excluded_statuses())?;
    let latest_departure: Option<UtcTimestamp> = open
        .iter()
        .map(|details| details.port_call.estimated_departure)
        .max();
    let imo_number: String = unique_imo_number(
        &mut persistence,
        suggestion.and_then(ScenarioSuggestion::imo_number),
        now,
    )?;

    let Some(scenario) = plan_scenario(berth, &imo_number, latest_departure, now, &rolls, suggestion)
    else {
        warn!(berth_id, "Simulated window is out of range, skipping this cycle");
        return Ok(TickOutcome::Skipped);
    };
    validate_vessel_fields(&scenario.vessel)?;
    let vessel: Vessel = persistence.create_vessel(&scenario.vessel)?;
    drop(persistence);

    // The vessel stays registered even if its booking is rejected below.
    let vessel_id: i64 = vessel.vessel_id.ok_or(SimulatorError::Unpersisted("vessel"))?;
    let last_operation: String = format!("Created port call for {}", vessel.name);
    service
        .notifier()
        .publish(PortEvent::VesselChanged { vessel });

    let port_call: PortCall = service.create(scenario.port_call(vessel_id, berth_id)).await?;
    let port_call_id: i64 = port_call
        .port_call_id
        .ok_or(SimulatorError::Unpersisted("port call"))?;

    service.notifier().publish(PortEvent::SimulatorMetrics {
        operations_per_second: status.operations_per_second,
        timestamp: UtcTimestamp::now(),
        last_operation,
    });

    info!(vessel_id, port_call_id, berth_id, "Simulated port call");
    Ok(TickOutcome::Booked {
        vessel_id,
        port_call_id,
    })
}
