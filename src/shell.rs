use anyhow::Result;

use crate::form::{reduce, FormEvent, FormState};

/// Something that wants to hear about every state the form passes through.
pub trait StateObserver {
    fn on_transition(&mut self, state: &FormState) -> Result<()>;
}

/// Owns the current form state and feeds events through `reduce`.
pub struct Shell<O: StateObserver> {
    state: FormState,
    observer: O,
}

impl<O: StateObserver> Shell<O> {
    pub fn new(state: FormState, observer: O) -> Self {
        Self { state, observer }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    #[cfg(test)]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Notify the observer of the current state without a transition, for
    /// the first frame and after a terminal resize.
    pub fn refresh(&mut self) -> Result<()> {
        self.observer.on_transition(&self.state)
    }

    pub fn dispatch(&mut self, event: FormEvent) -> Result<()> {
        log::debug!("dispatching {:?}", event);
        self.state = reduce(&self.state, event);
        self.observer.on_transition(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Field, Phase};

    #[derive(Default)]
    struct Recorder {
        seen: Vec<FormState>,
    }

    impl StateObserver for Recorder {
        fn on_transition(&mut self, state: &FormState) -> Result<()> {
            self.seen.push(state.clone());
            Ok(())
        }
    }

    struct Broken;

    impl StateObserver for Broken {
        fn on_transition(&mut self, _state: &FormState) -> Result<()> {
            anyhow::bail!("terminal went away")
        }
    }

    #[test]
    fn notifies_once_per_transition() {
        let mut shell = Shell::new(FormState::default(), Recorder::default());
        shell.refresh().unwrap();
        shell
            .dispatch(FormEvent::Edit(Field::Principal, "1000".into()))
            .unwrap();
        shell.dispatch(FormEvent::FocusNext).unwrap();
        shell.dispatch(FormEvent::Calculate).unwrap();

        let seen = &shell.observer().seen;
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0].phase, Phase::Idle);
        assert_eq!(seen[1].phase, Phase::Editing);
        assert_eq!(seen[2].focus, Field::AnnualRate);
        assert!(matches!(seen[3].phase, Phase::Error(_)));
        assert_eq!(&seen[3], shell.state());
    }

    #[test]
    fn full_interaction_reaches_success() {
        let mut shell = Shell::new(FormState::default(), Recorder::default());
        for (field, value) in [
            (Field::Principal, "100000"),
            (Field::AnnualRate, "0"),
            (Field::Tenure, "12"),
        ] {
            shell
                .dispatch(FormEvent::Edit(field, value.into()))
                .unwrap();
        }
        shell.dispatch(FormEvent::Calculate).unwrap();

        let result = shell.state().result().expect("valid input");
        assert_eq!(result.total_payment, 100_000.0);
    }

    #[test]
    fn observer_failure_propagates_but_state_advances() {
        let mut shell = Shell::new(FormState::default(), Broken);
        let err = shell.dispatch(FormEvent::FocusNext).unwrap_err();
        assert_eq!(err.to_string(), "terminal went away");
        assert_eq!(shell.state().focus, Field::AnnualRate);
    }
}
