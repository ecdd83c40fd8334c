//! Placing-on-hold policies.
//!
//! A policy only decides; it never emits events or touches the book. Several
//! policies are combined in a [`PolicySet`] and evaluated in order, the first
//! rejection winning.

use serde::{Deserialize, Serialize};

use crate::core::domain::Configuration;
use crate::lending::domain::book::AvailableBook;
use crate::lending::domain::patron::PatronHolds;
use crate::lending::events::MaximumNumberOnHoldsReached;
use crate::lending::value_objects::HoldDuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    reason: String,
}

impl Rejection {
    pub fn with_reason(reason: &str) -> Self {
        Self { reason: reason.to_string() }
    }

    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyDecision {
    Allowance(Allowance),
    Rejection(Rejection),
}

impl PolicyDecision {
    pub fn allow() -> Self {
        PolicyDecision::Allowance(Allowance)
    }

    pub fn reject(reason: &str) -> Self {
        PolicyDecision::Rejection(Rejection::with_reason(reason))
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, PolicyDecision::Allowance(_))
    }
}

pub trait PlacingOnHoldPolicy: Sync + Send {
    fn evaluate(&self, book: &AvailableBook, patron: &dyn PatronHolds, duration: &HoldDuration) -> PolicyDecision;
}

impl<F> PlacingOnHoldPolicy for F
    where F: Fn(&AvailableBook, &dyn PatronHolds, &HoldDuration) -> PolicyDecision + Sync + Send {
    fn evaluate(&self, book: &AvailableBook, patron: &dyn PatronHolds, duration: &HoldDuration) -> PolicyDecision {
        self(book, patron, duration)
    }
}

// Regular patrons cannot hold more than `max` books at once; researchers are not limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaximumHoldsPolicy {
    pub max: usize,
}

impl PlacingOnHoldPolicy for MaximumHoldsPolicy {
    fn evaluate(&self, _book: &AvailableBook, patron: &dyn PatronHolds, _duration: &HoldDuration) -> PolicyDecision {
        if patron.is_regular() && patron.number_of_holds() >= self.max {
            return PolicyDecision::reject(
                format!("patron cannot hold more than {} books", self.max).as_str());
        }
        PolicyDecision::allow()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenEndedHoldsPolicy;

impl PlacingOnHoldPolicy for OpenEndedHoldsPolicy {
    fn evaluate(&self, _book: &AvailableBook, patron: &dyn PatronHolds, duration: &HoldDuration) -> PolicyDecision {
        if duration.is_open_ended() && patron.is_regular() {
            return PolicyDecision::reject("regular patron cannot place open-ended holds");
        }
        PolicyDecision::allow()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DuplicateHoldPolicy;

impl PlacingOnHoldPolicy for DuplicateHoldPolicy {
    fn evaluate(&self, book: &AvailableBook, patron: &dyn PatronHolds, _duration: &HoldDuration) -> PolicyDecision {
        if patron.is_holding(book.book_id()) {
            return PolicyDecision::reject(
                format!("patron already holds book {}", book.book_id()).as_str());
        }
        PolicyDecision::allow()
    }
}

/// Ordered list of policies.
pub struct PolicySet {
    policies: Vec<Box<dyn PlacingOnHoldPolicy>>,
}

impl PolicySet {
    pub fn new(policies: Vec<Box<dyn PlacingOnHoldPolicy>>) -> Self {
        Self { policies }
    }

    pub fn default_policies(config: &Configuration) -> Self {
        Self::new(vec![
            Box::new(DuplicateHoldPolicy),
            Box::new(OpenEndedHoldsPolicy),
            Box::new(MaximumHoldsPolicy { max: config.max_holds }),
        ])
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl PlacingOnHoldPolicy for PolicySet {
    fn evaluate(&self, book: &AvailableBook, patron: &dyn PatronHolds, duration: &HoldDuration) -> PolicyDecision {
        for policy in &self.policies {
            if let rejection @ PolicyDecision::Rejection(_) = policy.evaluate(book, patron, duration) {
                return rejection;
            }
        }
        PolicyDecision::allow()
    }
}

/// Returns the warning when the hold about to be placed is the patron's last allowed one.
pub fn max_holds_reached(patron: &dyn PatronHolds, max: usize) -> Option<MaximumNumberOnHoldsReached> {
    let number_of_holds = patron.number_of_holds() + 1;
    if patron.is_regular() && number_of_holds == max {
        Some(MaximumNumberOnHoldsReached::new(patron.patron_id(), number_of_holds))
    } else {
        None
    }
}
