//! Turn Orchestrator
//!
//! `end_turn` is the single entry point that advances the campaign by one
//! month. It walks every phase in a fixed order and never fails: anything
//! that goes wrong inside a phase lands in the event log instead.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::{run_faction_turn, AiTurnReport};
use crate::economy::{process_assignments, process_monthly_economy, AssignmentOutcome, CityLedger};
use crate::loyalty::{check_defections, Defection};
use crate::state::{Event, EventType, GameState};

/// Turn processing phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    Idle,
    AssignmentsProcessing,
    EconomyProcessing,
    AiTurns,
    DefectionChecks,
    CalendarAdvance,
    EnergyRecovery,
    VictoryCheck,
}

impl TurnPhase {
    /// The phase that follows this one; `VictoryCheck` wraps back to `Idle`
    pub fn next(self) -> TurnPhase {
        match self {
            TurnPhase::Idle => TurnPhase::AssignmentsProcessing,
            TurnPhase::AssignmentsProcessing => TurnPhase::EconomyProcessing,
            TurnPhase::EconomyProcessing => TurnPhase::AiTurns,
            TurnPhase::AiTurns => TurnPhase::DefectionChecks,
            TurnPhase::DefectionChecks => TurnPhase::CalendarAdvance,
            TurnPhase::CalendarAdvance => TurnPhase::EnergyRecovery,
            TurnPhase::EnergyRecovery => TurnPhase::VictoryCheck,
            TurnPhase::VictoryCheck => TurnPhase::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictoryStatus {
    Ongoing,
    PlayerWon,
    PlayerLost,
}

impl VictoryStatus {
    pub fn is_terminal(self) -> bool {
        self != VictoryStatus::Ongoing
    }
}

/// Campaign result as of now. Player elimination takes precedence.
pub fn check_victory(state: &GameState) -> VictoryStatus {
    if state.is_eliminated(state.player) {
        return VictoryStatus::PlayerLost;
    }
    if state
        .rival_factions()
        .into_iter()
        .all(|f| state.is_eliminated(f))
    {
        return VictoryStatus::PlayerWon;
    }
    VictoryStatus::Ongoing
}

/// What happened during one `end_turn`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnSummary {
    /// Date after the calendar advanced
    pub year: u32,
    pub month: u8,
    /// Phases run, in order
    pub phases: Vec<TurnPhase>,
    pub assignments: Vec<AssignmentOutcome>,
    pub ledgers: Vec<CityLedger>,
    pub ai_turns: Vec<AiTurnReport>,
    pub defections: Vec<Defection>,
    /// Idle officers that regained energy
    pub recovered: usize,
    pub victory: VictoryStatus,
    /// Every event logged since the previous turn ended
    pub events: Vec<Event>,
}

/// Advance the campaign by one month
pub fn end_turn<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> TurnSummary {
    let mut summary = TurnSummary {
        year: state.year(),
        month: state.month(),
        phases: Vec::new(),
        assignments: Vec::new(),
        ledgers: Vec::new(),
        ai_turns: Vec::new(),
        defections: Vec::new(),
        recovered: 0,
        victory: VictoryStatus::Ongoing,
        events: Vec::new(),
    };

    let mut phase = TurnPhase::Idle.next();
    while phase != TurnPhase::Idle {
        tracing::trace!(?phase, "Turn phase");
        run_phase(state, phase, rng, &mut summary);
        summary.phases.push(phase);
        phase = phase.next();
    }

    summary.year = state.year();
    summary.month = state.month();
    summary.events = state.events.drain();

    tracing::info!(
        year = summary.year,
        month = summary.month,
        events = summary.events.len(),
        victory = ?summary.victory,
        "Turn ended"
    );

    summary
}

fn run_phase<R: Rng + ?Sized>(
    state: &mut GameState,
    phase: TurnPhase,
    rng: &mut R,
    summary: &mut TurnSummary,
) {
    match phase {
        TurnPhase::Idle => {}
        TurnPhase::AssignmentsProcessing => {
            summary.assignments = process_assignments(state);
        }
        TurnPhase::EconomyProcessing => {
            summary.ledgers = process_monthly_economy(state);
        }
        TurnPhase::AiTurns => {
            for faction in state.rival_factions() {
                if state.is_eliminated(faction) {
                    continue;
                }
                summary.ai_turns.push(run_faction_turn(state, faction, rng));
            }
        }
        TurnPhase::DefectionChecks => {
            summary.defections = check_defections(state, rng);
        }
        TurnPhase::CalendarAdvance => {
            if state.calendar.advance() {
                let year = state.year();
                state.log(EventType::NewYear { year });
            }
        }
        TurnPhase::EnergyRecovery => {
            summary.recovered = recover_energy(state);
        }
        TurnPhase::VictoryCheck => {
            summary.victory = check_victory(state);
            match summary.victory {
                VictoryStatus::PlayerWon => state.log(EventType::PlayerVictory {
                    faction: state.player,
                }),
                VictoryStatus::PlayerLost => state.log(EventType::PlayerDefeat {
                    faction: state.player,
                }),
                VictoryStatus::Ongoing => {}
            }
        }
    }
}

/// Idle officers rest. Officers holding a queued task do not.
fn recover_energy(state: &mut GameState) -> usize {
    let amount = i32::from(state.config.energy.idle_recovery);
    let mut recovered = 0;
    for officer in state.officers.values_mut().filter(|o| o.is_idle()) {
        officer.adjust_energy(amount);
        recovered += 1;
    }
    recovered
}
