//! The agent's job queue.

use core::fmt;
use std::collections::VecDeque;

use crate::agent::Agent;
use crate::collectors::mark_sweep::FinalizationRegistry;
use crate::value::Identity;

pub(crate) enum Job {
    /// Delivers the emptied cells of a registry.
    FinalizationCleanup(FinalizationRegistry),
    Host(Box<dyn FnOnce(&mut Agent)>),
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FinalizationCleanup(registry) => f
                .debug_tuple("FinalizationCleanup")
                .field(registry)
                .finish(),
            Self::Host(_) => f.write_str("Host(..)"),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct JobQueue {
    jobs: VecDeque<Job>,
}

impl JobQueue {
    pub(crate) fn push(&mut self, job: Job) {
        self.jobs.push_back(job);
    }

    pub(crate) fn pop(&mut self) -> Option<Job> {
        self.jobs.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.jobs.len()
    }

    // a registry waiting for its cleanup job must survive until the job runs
    pub(crate) fn roots(&self) -> impl Iterator<Item = Identity> + '_ {
        self.jobs.iter().filter_map(|job| match job {
            Job::FinalizationCleanup(registry) => Some(Identity::Object(registry.as_object())),
            Job::Host(_) => None,
        })
    }
}
