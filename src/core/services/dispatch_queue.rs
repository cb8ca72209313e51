use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use crate::core::errors::{Result, TrailError};
use crate::core::models::audit_record::RecordDraft;
use crate::core::services::audit_trail::AuditTrail;
use crate::core::traits::store::LogStore;

/// Fire-and-forget submission path to the audit trail.
///
/// A fixed pool of background workers drains a channel of drafts and
/// appends each through the trail's exclusive-access path. Submission
/// never blocks on log I/O; concurrency is bounded by the pool size,
/// not by how fast callers submit.
///
/// A failed append is logged and the record dropped. The business
/// mutation that triggered it has already committed and is never
/// rolled back over an audit failure.
#[derive(Debug)]
pub struct DispatchQueue {
    sender: Option<Sender<RecordDraft>>,
    workers: Vec<JoinHandle<()>>,
}

impl DispatchQueue {
    /// Start `workers` background threads appending through `trail`.
    pub fn new<S>(trail: AuditTrail<S>, workers: usize) -> Result<Self>
    where
        S: LogStore + 'static,
    {
        if workers == 0 {
            return Err(TrailError::InvalidConfig {
                detail: "dispatch queue needs at least one worker".into(),
            });
        }

        let (sender, receiver) = crossbeam_channel::unbounded::<RecordDraft>();

        let mut handles = Vec::with_capacity(workers);
        for i in 0..workers {
            let trail = trail.clone();
            let receiver = receiver.clone();
            let handle = thread::Builder::new()
                .name(format!("audit-dispatch-{i}"))
                .spawn(move || worker_loop(trail, receiver))?;
            handles.push(handle);
        }

        Ok(Self {
            sender: Some(sender),
            workers: handles,
        })
    }

    /// Hand a draft to the workers and return immediately.
    ///
    /// Submissions from different business operations may interleave;
    /// each individual append is still atomic.
    pub fn submit(&self, draft: RecordDraft) {
        match &self.sender {
            Some(sender) => {
                if sender.send(draft).is_err() {
                    tracing::error!("audit dispatch workers are gone, dropping record");
                }
            }
            None => tracing::error!("audit dispatch queue is shut down, dropping record"),
        }
    }

    /// Stop accepting submissions, drain everything already queued,
    /// and join the workers. Also runs on drop.
    pub fn shutdown(mut self) {
        self.close_and_join();
    }

    fn close_and_join(&mut self) {
        // Dropping the sender lets workers finish the queue and exit
        self.sender.take();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                tracing::error!("audit dispatch worker panicked");
            }
        }
    }
}

impl Drop for DispatchQueue {
    fn drop(&mut self) {
        self.close_and_join();
    }
}

fn worker_loop<S: LogStore>(trail: AuditTrail<S>, receiver: Receiver<RecordDraft>) {
    while let Ok(draft) = receiver.recv() {
        if let Err(e) = trail.record(draft) {
            tracing::error!("async audit append failed, dropping record: {e}");
        }
    }
}
