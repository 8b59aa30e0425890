//! Deferred and periodic callback scheduling.
//!
//! Callbacks are plain data (`ScheduledTask`) so they can be cancelled,
//! inspected, and dispatched by the engine on its single logical thread.

use bastion_core::types::{NodeId, TaskHandle, Timestamp};

/// Work a node can defer.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledTask {
    /// Run the coordinator election for a node.
    ElectCoordinator { node: NodeId },
    /// Coordinator sensing tick: sense, escalate, spawn, reap.
    SenseCombat { node: NodeId },
    /// Check that a fired wave actually materialized.
    ConfirmWaveSpawn { node: NodeId, tier: u8 },
    /// Broadcast a wave alert to every combatant.
    BroadcastWave {
        node: NodeId,
        site_name: String,
        tier: u8,
    },
}

impl ScheduledTask {
    pub fn node(&self) -> NodeId {
        match self {
            ScheduledTask::ElectCoordinator { node }
            | ScheduledTask::SenseCombat { node }
            | ScheduledTask::ConfirmWaveSpawn { node, .. }
            | ScheduledTask::BroadcastWave { node, .. } => *node,
        }
    }
}

/// Scheduling interface handed to systems.
pub trait Scheduler {
    /// Run `task` once, `delay_secs` from now.
    fn schedule_once(&mut self, delay_secs: f64, task: ScheduledTask) -> TaskHandle;
    /// Run `task` every `period_secs`, first run one period from now.
    fn schedule_repeating(&mut self, period_secs: f64, task: ScheduledTask) -> TaskHandle;
    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    fn cancel(&mut self, handle: TaskHandle) -> bool;
}

/// A task that came due.
#[derive(Debug, Clone, PartialEq)]
pub struct DueTask {
    pub handle: TaskHandle,
    pub task: ScheduledTask,
    /// Repeating tasks stay pending after they run.
    pub repeating: bool,
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TaskHandle,
    due: Timestamp,
    period: Option<f64>,
    seq: u64,
    task: ScheduledTask,
}

/// Call queue driven by the engine clock.
#[derive(Debug, Default)]
pub struct CallQueue {
    now: Timestamp,
    next_handle: u64,
    next_seq: u64,
    entries: Vec<Entry>,
}

impl CallQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Move the queue's clock forward. Never moves backward.
    pub fn advance_to(&mut self, now: Timestamp) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Pop the earliest task due at or before the current time.
    ///
    /// Ties run in scheduling order. A repeating task is rescheduled one
    /// period later before it is returned; missed periods are skipped.
    pub fn pop_due(&mut self) -> Option<DueTask> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= self.now)
            .min_by(|(_, a), (_, b)| a.due.0.total_cmp(&b.due.0).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;

        match self.entries[index].period {
            Some(period) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[index];
                let mut next = entry.due.after(period);
                if next <= self.now {
                    next = self.now.after(period);
                }
                entry.due = next;
                entry.seq = seq;
                Some(DueTask {
                    handle: entry.handle,
                    task: entry.task.clone(),
                    repeating: true,
                })
            }
            None => {
                let entry = self.entries.swap_remove(index);
                Some(DueTask {
                    handle: entry.handle,
                    task: entry.task,
                    repeating: false,
                })
            }
        }
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Pending tasks, in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.entries.iter().map(|e| &e.task)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn push(&mut self, delay_secs: f64, period: Option<f64>, task: ScheduledTask) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        let seq = self.bump_seq();
        self.entries.push(Entry {
            handle,
            due: self.now.after(delay_secs.max(0.0)),
            period,
            seq,
            task,
        });
        handle
    }
}

impl Scheduler for CallQueue {
    fn schedule_once(&mut self, delay_secs: f64, task: ScheduledTask) -> TaskHandle {
        self.push(delay_secs, None, task)
    }

    fn schedule_repeating(&mut self, period_secs: f64, task: ScheduledTask) -> TaskHandle {
        self.push(period_secs, Some(period_secs), task)
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }
}
