use std::collections::{BTreeMap, HashMap};

use crate::color::{ColorPair, Hsl, color};

use super::error::{ClusterError, Entity};
use super::event::{ClusterEvent, JobId, JobStart, SlaveAddr};

#[derive(Clone, Debug)]
pub struct Slave {
    pub addr: SlaveAddr,
    pub key: String,
    pub jobs: u32,
    pub colors: ColorPair,
}

#[derive(Clone, Debug)]
pub struct Client {
    pub key: String,
    pub name: String,
    pub jobs: u32,
    pub color: Hsl,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub slave_key: String,
    pub client_key: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateChange {
    pub topology: bool,
    pub slave_load: Option<String>,
    pub clients: bool,
}

impl StateChange {
    pub fn is_empty(&self) -> bool {
        !self.topology && self.slave_load.is_none() && !self.clients
    }
}

#[derive(Clone, Debug, Default)]
pub struct Outcome {
    pub change: StateChange,
    pub reports: Vec<ClusterError>,
}

impl Outcome {
    fn rejected(error: ClusterError) -> Self {
        Self {
            change: StateChange::default(),
            reports: vec![error],
        }
    }

    fn report(&mut self, error: ClusterError) {
        self.reports.push(error);
    }
}

/// Live slaves, clients and jobs. Slaves and clients enumerate in key order.
#[derive(Debug, Default)]
pub struct ClusterState {
    slaves: BTreeMap<String, Slave>,
    clients: BTreeMap<String, Client>,
    jobs: HashMap<JobId, Job>,
}

impl ClusterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &ClusterEvent) -> Outcome {
        match event {
            ClusterEvent::SlaveAdded(addr) => self.on_slave_added(addr),
            ClusterEvent::SlaveRemoved(addr) => self.on_slave_removed(addr),
            ClusterEvent::JobStarted(job) => self.on_job_started(job),
            ClusterEvent::JobFinished { id } | ClusterEvent::JobAborted { id } => {
                self.on_job_finished(*id)
            }
        }
    }

    pub fn on_slave_added(&mut self, addr: &SlaveAddr) -> Outcome {
        let key = addr.key();
        if self.slaves.contains_key(&key) {
            return Outcome::rejected(ClusterError::duplicate(Entity::Slave, key));
        }

        let slave = Slave {
            addr: addr.clone(),
            key: key.clone(),
            jobs: 0,
            colors: ColorPair::for_key(&key),
        };
        self.slaves.insert(key, slave);

        Outcome {
            change: StateChange {
                topology: true,
                ..StateChange::default()
            },
            reports: Vec::new(),
        }
    }

    pub fn on_slave_removed(&mut self, addr: &SlaveAddr) -> Outcome {
        let key = addr.key();
        if self.slaves.remove(&key).is_none() {
            return Outcome::rejected(ClusterError::unknown(Entity::Slave, key));
        }

        Outcome {
            change: StateChange {
                topology: true,
                ..StateChange::default()
            },
            reports: Vec::new(),
        }
    }

    pub fn on_job_started(&mut self, job: &JobStart) -> Outcome {
        if self.jobs.contains_key(&job.id) {
            return Outcome::rejected(ClusterError::duplicate(Entity::Job, job.id.to_string()));
        }

        let mut outcome = Outcome::default();
        let client_key = job.client.key();
        self.clients
            .entry(client_key.to_owned())
            .and_modify(|client| client.jobs += 1)
            .or_insert_with(|| Client {
                key: client_key.to_owned(),
                name: job.client.name.clone(),
                jobs: 1,
                color: color(client_key, false),
            });
        outcome.change.clients = true;

        let slave_key = job.slave.key();
        let Some(slave) = self.slaves.get_mut(&slave_key) else {
            // client count stays inflated; the job is never recorded
            outcome.report(ClusterError::unknown(Entity::Slave, slave_key));
            return outcome;
        };

        slave.jobs += 1;
        self.jobs.insert(
            job.id,
            Job {
                slave_key: slave_key.clone(),
                client_key: client_key.to_owned(),
            },
        );
        outcome.change.slave_load = Some(slave_key);
        outcome
    }

    pub fn on_job_finished(&mut self, id: JobId) -> Outcome {
        let Some(job) = self.jobs.remove(&id) else {
            return Outcome::rejected(ClusterError::unknown(Entity::Job, id.to_string()));
        };

        let mut outcome = Outcome::default();

        match self.clients.get_mut(&job.client_key) {
            Some(client) => {
                client.jobs = client.jobs.saturating_sub(1);
                if client.jobs == 0 {
                    self.clients.remove(&job.client_key);
                }
                outcome.change.clients = true;
            }
            None => outcome.report(ClusterError::unknown(Entity::Client, job.client_key)),
        }

        match self.slaves.get_mut(&job.slave_key) {
            Some(slave) if slave.jobs == 0 => {
                outcome.report(ClusterError::InvariantViolation {
                    entity: Entity::Slave,
                    key: job.slave_key,
                    detail: "job count already at zero",
                });
            }
            Some(slave) => {
                slave.jobs -= 1;
                outcome.change.slave_load = Some(job.slave_key);
            }
            None => outcome.report(ClusterError::unknown(Entity::Slave, job.slave_key)),
        }

        outcome
    }

    pub fn slave(&self, key: &str) -> Option<&Slave> {
        self.slaves.get(key)
    }

    pub fn client(&self, key: &str) -> Option<&Client> {
        self.clients.get(key)
    }

    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(&id)
    }

    pub fn slaves(&self) -> impl ExactSizeIterator<Item = &Slave> + Clone {
        self.slaves.values()
    }

    pub fn clients(&self) -> impl ExactSizeIterator<Item = &Client> + Clone {
        self.clients.values()
    }

    pub fn jobs(&self) -> impl ExactSizeIterator<Item = (JobId, &Job)> {
        self.jobs.iter().map(|(id, job)| (*id, job))
    }

    pub fn slave_count(&self) -> usize {
        self.slaves.len()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}
