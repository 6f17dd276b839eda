use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Approval state of a performance review.
///
/// Reviews only ever move forward: `draft -> submitted -> approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    Draft,
    Submitted,
    Approved,
}

impl ReviewState {
    pub const ALL: [ReviewState; 3] = [
        ReviewState::Draft,
        ReviewState::Submitted,
        ReviewState::Approved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewState::Draft => "draft",
            ReviewState::Submitted => "submitted",
            ReviewState::Approved => "approved",
        }
    }

    /// The only state reachable from `self`, if any.
    pub fn next(&self) -> Option<ReviewState> {
        match self {
            ReviewState::Draft => Some(ReviewState::Submitted),
            ReviewState::Submitted => Some(ReviewState::Approved),
            ReviewState::Approved => None,
        }
    }

    pub fn can_transition_to(&self, target: ReviewState) -> bool {
        self.next() == Some(target)
    }

    /// Checks a move against the transition table.
    pub fn transition_to(self, target: ReviewState) -> DomainResult<ReviewState> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(DomainError::InvalidTransition {
                from: self,
                to: target,
            })
        }
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "draft" => Ok(ReviewState::Draft),
            "submitted" => Ok(ReviewState::Submitted),
            "approved" => Ok(ReviewState::Approved),
            "" => Err(DomainError::validation("state", "state is required")),
            other => Err(DomainError::validation(
                "state",
                format!("unknown state '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_are_allowed() {
        assert_eq!(
            ReviewState::Draft.transition_to(ReviewState::Submitted),
            Ok(ReviewState::Submitted)
        );
        assert_eq!(
            ReviewState::Submitted.transition_to(ReviewState::Approved),
            Ok(ReviewState::Approved)
        );
    }

    #[test]
    fn test_every_other_pair_is_rejected() {
        let allowed = [
            (ReviewState::Draft, ReviewState::Submitted),
            (ReviewState::Submitted, ReviewState::Approved),
        ];
        for from in ReviewState::ALL {
            for to in ReviewState::ALL {
                if allowed.contains(&(from, to)) {
                    continue;
                }
                assert_eq!(
                    from.transition_to(to),
                    Err(DomainError::InvalidTransition { from, to }),
                    "{} -> {} must be rejected",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_approved_is_terminal() {
        assert_eq!(ReviewState::Approved.next(), None);
    }

    #[test]
    fn test_parse_round_trips_display() {
        for state in ReviewState::ALL {
            assert_eq!(state.to_string().parse::<ReviewState>(), Ok(state));
        }
    }

    #[test]
    fn test_parse_unknown_state_is_validation_error() {
        let err = "archived".parse::<ReviewState>().unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "state", .. }));
        assert!("".parse::<ReviewState>().is_err());
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&ReviewState::Submitted).unwrap();
        assert_eq!(json, "\"submitted\"");
    }
}
