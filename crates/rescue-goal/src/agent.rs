// agent.rs — RescueAgent: the goal-directed lifecycle state machine.
//
// The agent cycles through a fixed set of states:
//   Idle → AlertReceived → Assessing → Responding → Completing → Idle
// with two early exits back to Idle (nothing to assess, or an assessment
// that finds no work). There is no terminal state.
//
// Every state change goes through `transition_to`, which checks the static
// transition table, records history, and notifies observers. Rejected
// transitions leave the agent exactly as it was.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actions::response_actions;
use crate::disaster::DisasterEvent;
use crate::error::RescueError;
use crate::events::{EventDispatcher, RescueEvent};
use crate::goal::RescueGoal;
use crate::queue::GoalQueue;

/// The lifecycle state of a rescue agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentState {
    Idle,
    AlertReceived,
    Assessing,
    Responding,
    Completing,
}

impl AgentState {
    /// All states, in lifecycle order.
    pub const ALL: [AgentState; 5] = [
        AgentState::Idle,
        AgentState::AlertReceived,
        AgentState::Assessing,
        AgentState::Responding,
        AgentState::Completing,
    ];

    /// The static transition table: states reachable from `self`.
    pub fn allowed_targets(self) -> &'static [AgentState] {
        match self {
            AgentState::Idle => &[AgentState::AlertReceived],
            AgentState::AlertReceived => &[AgentState::Assessing, AgentState::Idle],
            AgentState::Assessing => &[AgentState::Responding, AgentState::Idle],
            AgentState::Responding => &[AgentState::Completing],
            AgentState::Completing => &[AgentState::Idle],
        }
    }

    /// Check whether transitioning from this state to `next` is valid.
    pub fn can_transition_to(self, next: AgentState) -> bool {
        self.allowed_targets().contains(&next)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentState::Idle => "IDLE",
            AgentState::AlertReceived => "ALERT_RECEIVED",
            AgentState::Assessing => "ASSESSING",
            AgentState::Responding => "RESPONDING",
            AgentState::Completing => "COMPLETING",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One entry of the append-only transition history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub state: AgentState,
    pub timestamp: DateTime<Utc>,
    pub reason: String,
}

/// One narration line, tagged with the state the agent was in when it
/// was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub agent_id: String,
    pub state: AgentState,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.state, self.message)
    }
}

/// What a single `run_fsm_cycle` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Agent is Idle; a new alert must be delivered before anything happens.
    Waiting,
    /// Assessment found the queue empty and the agent stood down to Idle.
    StoodDown,
    /// A goal was selected and the agent is now Assessing it.
    Assessed { goal_id: Uuid },
    /// The response plan was executed; the actions are listed in order.
    Responded { actions: Vec<&'static str> },
    /// The active goal was completed and the agent is back to Idle.
    Completed { goal_id: Uuid },
    /// Response or completion was requested with no active goal.
    NoActiveGoal,
    /// A leftover Completing state was closed out to Idle.
    WrappedUp,
}

/// A single rescue agent: one state, one goal queue, at most one active goal.
pub struct RescueAgent {
    agent_id: String,
    state: AgentState,
    queue: GoalQueue,
    active_goal: Option<RescueGoal>,
    completed_goals: Vec<RescueGoal>,
    history: Vec<HistoryEntry>,
    execution_log: Vec<LogEntry>,
    completed_missions: u64,
    dispatcher: EventDispatcher,
}

impl RescueAgent {
    /// Create an Idle agent whose narration goes to `dispatcher`.
    pub fn new(agent_id: impl Into<String>, dispatcher: EventDispatcher) -> Self {
        Self {
            agent_id: agent_id.into(),
            state: AgentState::Idle,
            queue: GoalQueue::new(),
            active_goal: None,
            completed_goals: Vec::new(),
            history: vec![HistoryEntry {
                state: AgentState::Idle,
                timestamp: Utc::now(),
                reason: "Agent initialized".to_string(),
            }],
            execution_log: Vec::new(),
            completed_missions: 0,
            dispatcher,
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn queue(&self) -> &GoalQueue {
        &self.queue
    }

    pub fn active_goal(&self) -> Option<&RescueGoal> {
        self.active_goal.as_ref()
    }

    /// Goals released after completion, oldest first.
    pub fn completed_goals(&self) -> &[RescueGoal] {
        &self.completed_goals
    }

    /// Transition history, starting with the initialization entry.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn execution_log(&self) -> &[LogEntry] {
        &self.execution_log
    }

    pub fn completed_missions(&self) -> u64 {
        self.completed_missions
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    fn log(&mut self, message: impl Into<String>) {
        let entry = LogEntry {
            timestamp: Utc::now(),
            agent_id: self.agent_id.clone(),
            state: self.state,
            message: message.into(),
        };
        self.dispatcher.dispatch(&RescueEvent::Log {
            agent_id: entry.agent_id.clone(),
            state: entry.state.to_string(),
            message: entry.message.clone(),
            timestamp: entry.timestamp,
        });
        self.execution_log.push(entry);
    }

    /// Log the rejection and build the error. Does not touch state.
    fn reject(&mut self, target: AgentState) -> RescueError {
        let from = self.state;
        self.log(format!("INVALID TRANSITION: {} -> {}", from, target));
        tracing::warn!(agent_id = %self.agent_id, %from, to = %target, "rejected state transition");
        RescueError::InvalidTransition {
            agent_id: self.agent_id.clone(),
            from: from.to_string(),
            to: target.to_string(),
        }
    }

    /// Move to `target` if the transition table allows it.
    ///
    /// On success the new state is committed, `(target, now, reason)` is
    /// appended to the history, and observers are notified. On failure the
    /// rejection is logged and nothing else changes.
    pub fn transition_to(&mut self, target: AgentState, reason: &str) -> Result<(), RescueError> {
        if !self.state.can_transition_to(target) {
            return Err(self.reject(target));
        }

        let old = self.state;
        let now = Utc::now();
        self.state = target;
        self.history.push(HistoryEntry {
            state: target,
            timestamp: now,
            reason: reason.to_string(),
        });
        tracing::debug!(agent_id = %self.agent_id, from = %old, to = %target, reason, "state transition");
        self.dispatcher.dispatch(&RescueEvent::Transition {
            agent_id: self.agent_id.clone(),
            from_state: old.to_string(),
            to_state: target.to_string(),
            reason: reason.to_string(),
            timestamp: now,
        });
        self.log(format!("Transition: {} -> {} | {}", old, target, reason));
        Ok(())
    }

    /// Turn a detection into a queued goal.
    ///
    /// `None` (a quiet scan) is a no-op. A new goal only wakes an Idle
    /// agent; an agent already on a mission queues it without preemption.
    /// Returns the id of the queued goal.
    pub fn receive_alert(
        &mut self,
        event: Option<DisasterEvent>,
    ) -> Result<Option<Uuid>, RescueError> {
        let Some(event) = event else {
            return Ok(None);
        };

        let reason = format!("Disaster alert: {} in {}", event.kind, event.zone);
        let goal = RescueGoal::from_event(event);
        let goal_id = goal.goal_id;
        self.log(format!(
            "New goal created: {} in {} (Severity: {})",
            goal.kind, goal.target_zone, goal.event.severity
        ));
        self.queue.enqueue(goal);

        if self.state == AgentState::Idle {
            self.transition_to(AgentState::AlertReceived, &reason)?;
        }
        Ok(Some(goal_id))
    }

    /// Select the most urgent pending goal and start assessing it.
    ///
    /// Only valid from AlertReceived. With an empty queue the agent stands
    /// down to Idle and `Ok(None)` is returned. From any other state the
    /// call is rejected before the queue or the active goal is touched.
    pub fn assess(&mut self) -> Result<Option<Uuid>, RescueError> {
        if self.state != AgentState::AlertReceived {
            return Err(self.reject(AgentState::Assessing));
        }
        if self.queue.is_empty() {
            self.transition_to(AgentState::Idle, "No pending goals")?;
            return Ok(None);
        }
        let Some(goal) = self.queue.select_next() else {
            return Ok(None);
        };

        let event = &goal.event;
        let summary = format!(
            "Assessing: {} | Zone: {} ({}) | Severity: {} | Temp: {}C | Water: {}m | Seismic: {}",
            goal.kind,
            event.zone,
            event.zone_name,
            event.severity,
            event.readings.temperature,
            event.readings.water_level,
            event.readings.seismic_activity,
        );
        let reason = format!("Assessing {}", goal.kind);
        let goal_id = goal.goal_id;
        self.active_goal = Some(goal);

        self.log(summary);
        self.transition_to(AgentState::Assessing, &reason)?;
        Ok(Some(goal_id))
    }

    /// Execute the response plan for the active goal.
    ///
    /// Returns the actions performed, in order. With no active goal this is
    /// a no-op returning an empty list.
    pub fn execute_response(&mut self) -> Result<Vec<&'static str>, RescueError> {
        let Some((kind, disaster, severity)) = self
            .active_goal
            .as_ref()
            .map(|g| (g.kind, g.event.kind, g.event.severity))
        else {
            return Ok(Vec::new());
        };

        self.transition_to(AgentState::Responding, &format!("Executing {}", kind))?;

        let actions = response_actions(disaster, severity);
        for action in &actions {
            self.log(format!("  ACTION: {}", action));
        }
        Ok(actions)
    }

    /// Close out the active goal and return to Idle.
    ///
    /// Records two transitions (Responding → Completing → Idle) even though
    /// both happen in this one call. With no active goal this is a no-op.
    pub fn complete_mission(&mut self) -> Result<Option<Uuid>, RescueError> {
        if self.active_goal.is_none() {
            return Ok(None);
        }
        if !self.state.can_transition_to(AgentState::Completing) {
            return Err(self.reject(AgentState::Completing));
        }
        let Some(mut goal) = self.active_goal.take() else {
            return Ok(None);
        };

        goal.complete();
        self.completed_missions += 1;
        self.log(format!(
            "Mission completed: {} in {}",
            goal.kind, goal.target_zone
        ));
        self.dispatcher.dispatch(&RescueEvent::MissionCompleted {
            agent_id: self.agent_id.clone(),
            goal_id: goal.goal_id,
            goal_kind: goal.kind,
            zone: goal.target_zone.clone(),
            priority: goal.priority,
            timestamp: Utc::now(),
        });
        let goal_id = goal.goal_id;
        self.completed_goals.push(goal);

        self.transition_to(AgentState::Completing, "Mission wrap-up")?;
        self.transition_to(AgentState::Idle, "Ready for next assignment")?;
        Ok(Some(goal_id))
    }

    /// Advance the machine by one step, dispatched on the current state.
    pub fn run_fsm_cycle(&mut self) -> Result<StepOutcome, RescueError> {
        match self.state {
            AgentState::Idle => Ok(StepOutcome::Waiting),
            AgentState::AlertReceived => Ok(match self.assess()? {
                Some(goal_id) => StepOutcome::Assessed { goal_id },
                None => StepOutcome::StoodDown,
            }),
            AgentState::Assessing => {
                if self.active_goal.is_none() {
                    return Ok(StepOutcome::NoActiveGoal);
                }
                let actions = self.execute_response()?;
                Ok(StepOutcome::Responded { actions })
            }
            AgentState::Responding => Ok(match self.complete_mission()? {
                Some(goal_id) => StepOutcome::Completed { goal_id },
                None => StepOutcome::NoActiveGoal,
            }),
            AgentState::Completing => {
                self.transition_to(AgentState::Idle, "Ready for next assignment")?;
                Ok(StepOutcome::WrappedUp)
            }
        }
    }
}
