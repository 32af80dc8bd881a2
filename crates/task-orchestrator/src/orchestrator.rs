use crate::{
    Diagnostic, MotionStep, OrchestratorConfig, SessionMetrics, SessionReport, TaskError,
    TaskRecord, TaskState, Termination,
};
use intent_parser::{Color, Command, TokenStream};
use inventory_registry::{InventoryEntry, InventoryRegistry, PresetTable};
use motion_facade::{GoalPose, MotionFacade, PlanningScene};
use scene_sync::{object_state_matches, GateOutcome, ObjectExpectation, ShutdownSignal, SyncGate};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Single-arm task sequencer.
///
/// Owns the arm, the inventory and the scratch goal pose for the duration of a
/// session; one task runs to completion before the next begins.
pub struct Orchestrator<A> {
    arm: A,
    registry: InventoryRegistry,
    presets: PresetTable,
    config: OrchestratorConfig,
    gate: SyncGate,
    goal: GoalPose,
    held: Option<InventoryEntry>,
    metrics: Option<SessionMetrics>,
}

impl<A> Orchestrator<A>
where
    A: MotionFacade + PlanningScene,
{
    pub fn new(
        arm: A,
        registry: InventoryRegistry,
        presets: PresetTable,
        config: OrchestratorConfig,
        shutdown: ShutdownSignal,
    ) -> Self {
        let gate = SyncGate::new(config.poll_interval(), shutdown);
        let goal = GoalPose::new(Default::default(), config.orientation_hint);
        Self {
            arm,
            registry,
            presets,
            config,
            gate,
            goal,
            held: None,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: SessionMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn arm(&self) -> &A {
        &self.arm
    }

    pub fn registry(&self) -> &InventoryRegistry {
        &self.registry
    }

    /// Object currently in the gripper, if any
    pub fn held(&self) -> Option<&InventoryEntry> {
        self.held.as_ref()
    }

    pub fn into_parts(self) -> (A, InventoryRegistry) {
        (self.arm, self.registry)
    }

    /// Extract intents from `tokens` and run them to completion
    pub fn run_session(&mut self, tokens: &TokenStream) -> SessionReport {
        let (commands, colors) = intent_parser::extract(tokens).into_queues();
        self.run_queues(commands, colors)
    }

    /// Drain both queues pairwise in FIFO order
    pub fn run_queues(
        &mut self,
        mut commands: VecDeque<Command>,
        mut colors: VecDeque<Color>,
    ) -> SessionReport {
        let mut report = SessionReport::begin();
        info!(
            session = %report.session_id,
            commands = commands.len(),
            colors = colors.len(),
            "session started"
        );

        loop {
            if self.gate.shutdown().is_triggered() {
                report.diagnostics.push(Diagnostic::new(None, TaskError::Cancelled));
                report.termination = Termination::Cancelled;
                break;
            }
            let (command, color) = match (commands.pop_front(), colors.pop_front()) {
                (Some(command), Some(color)) => (command, color),
                (command, color) => {
                    if let Some(command) = command {
                        commands.push_front(command);
                    }
                    if let Some(color) = color {
                        colors.push_front(color);
                    }
                    break;
                }
            };

            let mut task = TaskRecord::new(report.tasks.len(), command, color);
            info!(task = task.index, %command, %color, "task started");
            let result = match command {
                Command::Pick => self.pick(color, &mut task),
                Command::Place => self.place(color, &mut task),
            };
            let cancelled = matches!(result, Err(TaskError::Cancelled));
            self.finish_task(&mut report, task, result);

            if cancelled {
                report.termination = Termination::Cancelled;
                break;
            }
            let placed = report
                .tasks
                .last()
                .is_some_and(|t| t.command == Command::Place && t.state() == TaskState::Done);
            if placed
                && self.held.is_none()
                && self.registry.is_fully_exhausted()
                && !(commands.is_empty() && colors.is_empty())
            {
                info!("all inventory placed; stopping before remaining queue");
                report.termination = Termination::InventoryExhausted;
                break;
            }
        }

        match report.termination {
            Termination::QueueDrained => {
                for command in commands.drain(..) {
                    let detail = format!("command '{command}' has no colour");
                    warn!("{detail}");
                    report
                        .diagnostics
                        .push(Diagnostic::new(None, TaskError::InvalidSelector { detail }));
                }
                for color in colors.drain(..) {
                    let detail = format!("colour '{color}' has no command");
                    warn!("{detail}");
                    report
                        .diagnostics
                        .push(Diagnostic::new(None, TaskError::InvalidSelector { detail }));
                }
            }
            Termination::InventoryExhausted | Termination::Cancelled => {
                report.unprocessed = commands.len().max(colors.len());
            }
        }

        report.inventory_exhausted = self.registry.is_fully_exhausted();
        report.finished_at = time::OffsetDateTime::now_utc();
        info!("{}", report.summary());
        report
    }

    fn finish_task(
        &self,
        report: &mut SessionReport,
        mut task: TaskRecord,
        result: Result<(), TaskError>,
    ) {
        match result {
            Ok(()) => {
                info!(task = task.index, object = ?task.object, "task done");
                if task.command == Command::Place {
                    report.cycles_completed += 1;
                }
                if let Some(m) = &self.metrics {
                    m.tasks_completed.inc();
                }
            }
            Err(error) => {
                task.machine.fail();
                warn!(task = task.index, "task failed: {error}");
                if let Some(m) = &self.metrics {
                    m.tasks_failed.inc();
                    if matches!(error, TaskError::SyncTimeout { .. }) {
                        m.sync_timeouts.inc();
                    }
                }
                report
                    .diagnostics
                    .push(Diagnostic::new(Some(task.index), error));
            }
        }
        report.tasks.push(task);
    }

    fn pick(&mut self, color: Color, task: &mut TaskRecord) -> Result<(), TaskError> {
        if let Some(held) = &self.held {
            return Err(TaskError::GripperOccupied {
                held: held.name.clone(),
            });
        }
        let entry = self
            .registry
            .claim_next(color)
            .map_err(|_| TaskError::Exhausted { color })?;
        if let Some(m) = &self.metrics {
            m.inventory_claims.inc();
        }
        task.object = Some(entry.name.clone());
        debug!(object = %entry.name, location = %entry.location, "picking");

        self.goal.retarget(entry.location);
        task.machine.advance(TaskState::MovingToSource);
        self.move_to_goal(MotionStep::Approach)?;

        task.machine.advance(TaskState::Grasping);
        self.arm
            .attach_object(&entry.name)
            .map_err(|e| motion_failed(MotionStep::Attach, e))?;
        self.await_object(&entry.name, ObjectExpectation::ATTACHED)?;

        self.held = Some(entry);
        task.machine.advance(TaskState::Done);
        Ok(())
    }

    fn place(&mut self, color: Color, task: &mut TaskRecord) -> Result<(), TaskError> {
        let bin = self.presets.bin(color).ok_or_else(|| TaskError::InvalidSelector {
            detail: format!("invalid bin: no preset for {color}"),
        })?;
        let name = self
            .held
            .as_ref()
            .map(|e| e.name.clone())
            .ok_or(TaskError::NothingHeld)?;
        task.object = Some(name.clone());
        debug!(object = %name, bin = %bin, "placing");

        self.goal.retarget(bin);
        task.machine.advance(TaskState::MovingToBin);
        self.move_to_goal(MotionStep::MoveToBin)?;

        task.machine.advance(TaskState::Releasing);
        self.arm
            .detach_object(&name)
            .map_err(|e| motion_failed(MotionStep::Detach, e))?;
        // Once detach is issued the gripper is treated as open.
        self.held = None;
        self.await_object(&name, ObjectExpectation::DETACHED)?;

        self.arm
            .remove_object(&name)
            .map_err(|e| motion_failed(MotionStep::Remove, e))?;
        self.await_object(&name, ObjectExpectation::REMOVED)?;

        match self.arm.move_to_joint_state(&self.config.rest_joints) {
            Ok(true) => {}
            Ok(false) => {
                return Err(TaskError::MotionFailed {
                    step: MotionStep::Retract,
                    detail: "rest configuration not reached within tolerance".into(),
                })
            }
            Err(e) => return Err(motion_failed(MotionStep::Retract, e)),
        }

        task.machine.advance(TaskState::Done);
        Ok(())
    }

    fn move_to_goal(&mut self, step: MotionStep) -> Result<(), TaskError> {
        match self.arm.move_to_pose_goal(&self.goal) {
            Ok(true) => Ok(()),
            Ok(false) => Err(TaskError::MotionFailed {
                step,
                detail: format!("goal {} not reached within tolerance", self.goal.position),
            }),
            Err(e) => Err(motion_failed(step, e)),
        }
    }

    fn await_object(&self, name: &str, expected: ObjectExpectation) -> Result<(), TaskError> {
        let arm = &self.arm;
        let outcome = self.gate.await_predicate(
            || object_state_matches(arm, name, expected),
            self.config.sync_timeout(),
        );
        match outcome {
            GateOutcome::Satisfied => Ok(()),
            GateOutcome::TimedOut => Err(TaskError::SyncTimeout {
                object: name.to_string(),
                expected: expected.to_string(),
            }),
            GateOutcome::Cancelled => Err(TaskError::Cancelled),
        }
    }
}

fn motion_failed(step: MotionStep, e: motion_facade::MotionError) -> TaskError {
    TaskError::MotionFailed {
        step,
        detail: e.to_string(),
    }
}
