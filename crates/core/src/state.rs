/// Parameters gathered so far by one running producer.
///
/// `counter` is the number of confirmed steps. A field confirmed by step
/// `n` is asked again whenever it is unset or the counter has fallen below
/// `n`, which is how going back from step `n + 1` reopens step `n`.
#[derive(Debug, Default)]
pub struct WizardState<P> {
    pub counter: usize,
    /// A selection was resolved without asking because there was only one
    /// candidate, so there is no earlier step to go back to.
    pub fast_path: bool,
    pub params: P,
}

impl<P: Default> WizardState<P> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P> WizardState<P> {
    pub fn must_ask<T>(&self, field: &Option<T>, step_index: usize) -> bool {
        field.is_none() || self.counter < step_index
    }

    pub fn advance(&mut self) {
        self.counter += 1;
    }

    pub fn regress(&mut self) {
        self.counter = self.counter.saturating_sub(1);
    }

    /// Records a selection resolved without a step.
    pub fn take_fast_path(&mut self) {
        self.fast_path = true;
        self.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_must_ask_when_unset() {
        let state: WizardState<()> = WizardState::new();
        assert!(state.must_ask::<String>(&None, 0));
        assert!(state.must_ask::<String>(&None, 1));
    }

    #[test]
    fn test_must_ask_until_counter_reaches_step() {
        let mut state: WizardState<()> = WizardState::new();
        let field = Some("main".to_string());

        assert!(state.must_ask(&field, 1));
        state.advance();
        assert!(!state.must_ask(&field, 1));
        assert!(state.must_ask(&field, 2));

        state.regress();
        assert!(state.must_ask(&field, 1));
    }

    #[test]
    fn test_regress_saturates_at_zero() {
        let mut state: WizardState<()> = WizardState::new();
        state.regress();
        assert_eq!(state.counter, 0);
    }

    #[test]
    fn test_take_fast_path() {
        let mut state: WizardState<()> = WizardState::new();
        state.take_fast_path();
        assert!(state.fast_path);
        assert_eq!(state.counter, 1);
    }
}
