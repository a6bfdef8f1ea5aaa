//! State machine trait for step enums.
//!
//! Gives every forward-only lifecycle enum (dialogue steps, for now) the same
//! validated transition API.

use super::ValidationError;

/// Trait for enums whose values form a state machine.
///
/// Implementors declare the legal edges; `transition_to` and `is_terminal`
/// come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DialogueStep {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (AwaitingRecipients, AwaitingPayload))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             AwaitingRecipients => vec![AwaitingPayload],
///             AwaitingPayload => vec![],
///         }
///     }
/// }
///
/// let next = step.transition_to(DialogueStep::AwaitingPayload)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "step",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
