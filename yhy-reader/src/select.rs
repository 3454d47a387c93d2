//! Card selection state machine
//!
//! The handshake is a fixed sequence of three exchanges. Any failure is
//! terminal; the caller starts over from `Idle`.

/// Selection states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectState {
    /// Nothing sent yet
    Idle,
    /// REQA sent, waiting for the card type
    ReqaSent,
    /// Anticollision sent, waiting for the serial
    AnticollisionSent,
    /// Select sent with the serial
    SelectSent,
    /// Card selected
    Selected,
    /// Handshake aborted at the given step
    Failed(SelectStep),
}

/// Handshake step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectStep {
    Reqa,
    Anticollision,
    Select,
}

/// Events that drive the selection handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectEvent {
    /// REQA written to the channel
    SendReqa,
    /// REQA answered with a card type; anticollision written
    CardAnswered,
    /// Anticollision answered with a serial; select written
    SerialResolved,
    /// Select answered successfully
    SelectAcknowledged,
    /// Non-zero status, malformed answer or channel error
    Failure,
    /// Start over
    Reset,
}

impl SelectState {
    /// Check if the handshake has finished, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, SelectState::Selected | SelectState::Failed(_))
    }

    /// Step currently waiting for an answer
    pub fn pending_step(&self) -> Option<SelectStep> {
        match self {
            SelectState::ReqaSent => Some(SelectStep::Reqa),
            SelectState::AnticollisionSent => Some(SelectStep::Anticollision),
            SelectState::SelectSent => Some(SelectStep::Select),
            _ => None,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: SelectEvent) -> Self {
        use SelectEvent::*;
        use SelectState::*;

        match (self, event) {
            (Idle, SendReqa) => ReqaSent,
            (ReqaSent, CardAnswered) => AnticollisionSent,
            (AnticollisionSent, SerialResolved) => SelectSent,
            (SelectSent, SelectAcknowledged) => Selected,

            (state, Failure) => match state.pending_step() {
                Some(step) => Failed(step),
                None => state,
            },

            (Selected | Failed(_), Reset) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = SelectState::Idle
            .transition(SelectEvent::SendReqa)
            .transition(SelectEvent::CardAnswered)
            .transition(SelectEvent::SerialResolved);
        assert_eq!(state, SelectState::SelectSent);

        let selected = state.transition(SelectEvent::SelectAcknowledged);
        assert_eq!(selected, SelectState::Selected);
        assert!(selected.is_terminal());
    }

    #[test]
    fn test_failure_records_step() {
        let cases = [
            (SelectState::ReqaSent, SelectStep::Reqa),
            (SelectState::AnticollisionSent, SelectStep::Anticollision),
            (SelectState::SelectSent, SelectStep::Select),
        ];

        for (state, step) in cases {
            let next = state.transition(SelectEvent::Failure);
            assert_eq!(next, SelectState::Failed(step));
            assert!(next.is_terminal());
        }
    }

    #[test]
    fn test_failed_is_terminal_until_reset() {
        let failed = SelectState::Failed(SelectStep::Reqa);
        assert_eq!(failed.transition(SelectEvent::CardAnswered), failed);
        assert_eq!(failed.transition(SelectEvent::SendReqa), failed);
        assert_eq!(failed.transition(SelectEvent::Failure), failed);
        assert_eq!(failed.transition(SelectEvent::Reset), SelectState::Idle);
    }

    #[test]
    fn test_out_of_order_events_are_ignored() {
        assert_eq!(
            SelectState::Idle.transition(SelectEvent::SerialResolved),
            SelectState::Idle
        );
        assert_eq!(
            SelectState::ReqaSent.transition(SelectEvent::SelectAcknowledged),
            SelectState::ReqaSent
        );
        assert_eq!(
            SelectState::Idle.transition(SelectEvent::Failure),
            SelectState::Idle
        );
        assert_eq!(
            SelectState::ReqaSent.transition(SelectEvent::Reset),
            SelectState::ReqaSent
        );
    }

    #[test]
    fn test_pending_step() {
        assert_eq!(SelectState::Idle.pending_step(), None);
        assert_eq!(
            SelectState::AnticollisionSent.pending_step(),
            Some(SelectStep::Anticollision)
        );
        assert_eq!(SelectState::Selected.pending_step(), None);
    }
}
