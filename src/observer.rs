//! Step observer trait for monitoring cloth simulation progress.

/// Trait for observing fixed simulation steps.
///
/// Implement this trait to monitor solver progress (debugging,
/// visualization, profiling, tear statistics). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after gravity and wind have been accumulated.
    fn on_forces(&mut self) {}

    /// Called after all particles have been integrated (Verlet step).
    fn on_integrate(&mut self) {}

    /// Called when the relaxation pass tears the spring at `spring` index.
    fn on_spring_torn(&mut self, _spring: usize) {}

    /// Called after each constraint relaxation pass.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called after sphere and ground collisions, with the contact count.
    fn on_collisions(&mut self, _contacts: usize) {}

    /// Called when a fixed step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Counts tears, contacts and completed steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TearCounter {
    pub torn: usize,
    pub contacts: usize,
    pub steps: usize,
}

impl StepObserver for TearCounter {
    fn on_spring_torn(&mut self, spring: usize) {
        log::trace!("spring {} torn", spring);
        self.torn += 1;
    }

    fn on_collisions(&mut self, contacts: usize) {
        self.contacts += contacts;
    }

    fn on_step_complete(&mut self) {
        self.steps += 1;
    }
}
