//! Registry of mounted containers plus the coalesced layout sweep.
//!
//! The engine is an explicit, injectable object rather than process-global
//! state: construct one at application start and hand it to every mount
//! point. Lifecycle mapping for hosts: "about to render" →
//! [`LayoutContainer::rebuild_children`] via [`UpdateEngine::container_mut`];
//! "mounted" and "did update" → [`UpdateEngine::request_async_update`];
//! "about to unmount" → [`UpdateEngine::deregister`]. The host's event loop
//! invokes [`UpdateEngine::run_pending`] as the coalesced callback.

use crate::LayoutFault;
use crate::container::LayoutContainer;
use anyhow::{Context as _, Result};
use log::{debug, warn};
use style_host::StyleSink;

/// Identity key for a registered container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u64);

/// Owns the registered containers in registration order and coalesces
/// update requests into a single sweep.
pub struct UpdateEngine<S: StyleSink> {
    containers: Vec<(ContainerId, LayoutContainer<S>)>,
    next_id: u64,
    update_pending: bool,
    sweeping: bool,
    /// Telemetry: sweeps completed since construction.
    sweeps_completed: u64,
    /// Telemetry: requests absorbed into the currently armed sweep.
    requests_coalesced: u64,
    /// Telemetry: containers processed by the last sweep.
    containers_swept_last: u64,
}

impl<S: StyleSink> Default for UpdateEngine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StyleSink> UpdateEngine<S> {
    pub fn new() -> Self {
        Self {
            containers: Vec::new(),
            next_id: 0,
            update_pending: false,
            sweeping: false,
            sweeps_completed: 0,
            requests_coalesced: 0,
            containers_swept_last: 0,
        }
    }

    /// Register a mounted container. Ownership moves into the registry, so
    /// registering the same container twice is unrepresentable; identity is
    /// the returned id.
    pub fn register(&mut self, container: LayoutContainer<S>) -> ContainerId {
        let id = ContainerId(self.next_id);
        self.next_id += 1;
        debug!("registering container {id:?}");
        self.containers.push((id, container));
        id
    }

    /// Remove a container synchronously, returning ownership. A sweep that
    /// fires afterwards simply no longer sees it; nothing dangles. An
    /// unknown id is a logged no-op.
    pub fn deregister(&mut self, id: ContainerId) -> Option<LayoutContainer<S>> {
        match self.containers.iter().position(|(key, _)| *key == id) {
            Some(index) => {
                debug!("deregistering container {id:?}");
                Some(self.containers.remove(index).1)
            }
            None => {
                warn!("deregister of unknown container {id:?}");
                None
            }
        }
    }

    pub fn container(&self, id: ContainerId) -> Option<&LayoutContainer<S>> {
        self.containers
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, container)| container)
    }

    pub fn container_mut(&mut self, id: ContainerId) -> Option<&mut LayoutContainer<S>> {
        self.containers
            .iter_mut()
            .find(|(key, _)| *key == id)
            .map(|(_, container)| container)
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Request a layout sweep. Idempotent: requests arriving while one is
    /// already armed coalesce into it. Returns whether this call armed the
    /// sweep.
    pub fn request_async_update(&mut self) -> bool {
        if self.update_pending {
            self.requests_coalesced += 1;
            return false;
        }
        self.update_pending = true;
        true
    }

    pub fn update_pending(&self) -> bool {
        self.update_pending
    }

    /// The coalesced callback body: if a sweep is armed, run the five-phase
    /// pass on every registered container in registration order and disarm.
    /// Returns the number of containers that completed their pass.
    ///
    /// Disarms before sweeping, so requests issued during the sweep arm the
    /// next one. Per-container faults do not stop the sweep: the remaining
    /// containers still run, each pass being independent; the first fault
    /// is returned to the host's error boundary once the sweep completes.
    ///
    /// # Errors
    /// The first per-container [`LayoutFault`], or [`LayoutFault::PassInProgress`]
    /// when re-entered from within a sweep.
    pub fn run_pending(&mut self) -> Result<usize> {
        if self.sweeping {
            debug_assert!(false, "re-entrant layout sweep");
            return Err(LayoutFault::PassInProgress).context("layout sweep re-entered");
        }
        if !self.update_pending {
            return Ok(0);
        }
        self.update_pending = false;
        self.requests_coalesced = 0;
        self.sweeping = true;

        let mut first_fault: Option<LayoutFault> = None;
        let mut swept = 0usize;
        for (id, container) in &mut self.containers {
            match container.run_layout_pass() {
                Ok(()) => swept += 1,
                Err(fault) => {
                    warn!("layout pass failed for container {id:?}: {fault}");
                    first_fault.get_or_insert(fault);
                }
            }
        }

        self.sweeping = false;
        self.sweeps_completed += 1;
        self.containers_swept_last = swept as u64;
        debug!("layout sweep complete: {swept} containers");
        match first_fault {
            None => Ok(swept),
            Some(fault) => Err(fault).context("layout sweep completed with faults"),
        }
    }

    /// Telemetry: sweeps completed since construction.
    pub fn sweeps_completed(&self) -> u64 {
        self.sweeps_completed
    }

    /// Telemetry: requests absorbed into the currently armed sweep.
    pub fn requests_coalesced(&self) -> u64 {
        self.requests_coalesced
    }

    /// Telemetry: containers processed by the last sweep.
    pub fn containers_swept_last(&self) -> u64 {
        self.containers_swept_last
    }
}
