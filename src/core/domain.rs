use serde::{Deserialize, Serialize};
use crate::lending::value_objects::Version;

// Identifiable defines common traits that can be shared by event-sourced aggregates
pub trait Identifiable: Sync + Send {
    type Id;
    fn id(&self) -> Self::Id;
    fn version(&self) -> Version;
}


// Configuration abstracts config options for the lending context of a branch
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub max_holds: usize,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            max_holds: 4,
        }
    }

    pub fn with_max_holds(mut self, max_holds: usize) -> Self {
        self.max_holds = max_holds;
        self
    }
}
