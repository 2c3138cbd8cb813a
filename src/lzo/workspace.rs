//! Compressor scratch memory and its ownership policies.
//!
//! The LZO1X-1 compressor needs [`LZO1X_1_MEM_COMPRESS`] bytes of dictionary
//! scratch while it runs.  The scratch carries no meaning between calls, but
//! two compressions must never write into the same one at the same time.
//!
//! - [`Workspace`]: one owned scratch region.
//! - [`WorkspacePool`]: a mutex-guarded free list; [`WorkspacePool::checkout`]
//!   hands out an exclusive [`PooledWorkspace`] that goes back to the pool on
//!   drop.
//! - [`WorkspaceSource`]: the policy a caller picks: a fresh workspace per call
//!   or leases from a shared pool.

use std::collections::TryReserveError;
use std::fmt;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, PoisonError};

use super::types::{D_SIZE, LZO1X_1_MEM_COMPRESS};

// ---------------------------------------------------------------------------
// Workspace
// ---------------------------------------------------------------------------

/// Dictionary scratch for one in-flight compression.
pub struct Workspace {
    dict: Box<[u16]>,
}

impl Workspace {
    /// Allocate a zeroed workspace, aborting on allocation failure like any
    /// other `Box` allocation.
    pub fn new() -> Self {
        Self {
            dict: vec![0u16; D_SIZE].into_boxed_slice(),
        }
    }

    /// Allocate a zeroed workspace, reporting allocation failure.
    pub fn try_new() -> Result<Self, TryReserveError> {
        let mut dict = Vec::new();
        dict.try_reserve_exact(D_SIZE)?;
        dict.resize(D_SIZE, 0);
        Ok(Self {
            dict: dict.into_boxed_slice(),
        })
    }

    /// Size of the scratch region in bytes.
    pub const fn size_in_bytes() -> usize {
        LZO1X_1_MEM_COMPRESS
    }

    /// Clear every dictionary slot.  Called at the start of each block.
    #[inline]
    pub(crate) fn reset(&mut self) {
        self.dict.fill(0);
    }

    #[inline]
    pub(crate) fn dict_mut(&mut self) -> &mut [u16] {
        &mut self.dict
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workspace")
            .field("bytes", &Self::size_in_bytes())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

/// A reusable set of workspaces with single-owner checkout/checkin.
#[derive(Default)]
pub struct WorkspacePool {
    free: Mutex<Vec<Workspace>>,
}

impl WorkspacePool {
    /// An empty pool; workspaces are created on demand by [`checkout`](Self::checkout).
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool pre-filled with `count` workspaces.
    pub fn with_capacity(count: usize) -> Result<Self, TryReserveError> {
        let mut free = Vec::new();
        free.try_reserve_exact(count)?;
        for _ in 0..count {
            free.push(Workspace::try_new()?);
        }
        Ok(Self {
            free: Mutex::new(free),
        })
    }

    /// Take exclusive ownership of a workspace until the returned guard drops.
    ///
    /// Reuses an idle workspace when one is available, otherwise allocates a
    /// new one.
    pub fn checkout(&self) -> Result<PooledWorkspace<'_>, TryReserveError> {
        // The scratch has no cross-call meaning, so a poisoned lock is still usable.
        let idle = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        let workspace = match idle {
            Some(ws) => ws,
            None => Workspace::try_new()?,
        };
        Ok(PooledWorkspace {
            pool: self,
            workspace: ManuallyDrop::new(workspace),
        })
    }

    /// Number of workspaces currently checked in.
    pub fn idle(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn checkin(&self, workspace: Workspace) {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(workspace);
    }
}

impl fmt::Debug for WorkspacePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspacePool")
            .field("idle", &self.idle())
            .finish()
    }
}

/// A workspace checked out of a [`WorkspacePool`]; returned to it on drop.
pub struct PooledWorkspace<'a> {
    pool: &'a WorkspacePool,
    workspace: ManuallyDrop<Workspace>,
}

impl Deref for PooledWorkspace<'_> {
    type Target = Workspace;
    fn deref(&self) -> &Workspace {
        &self.workspace
    }
}

impl DerefMut for PooledWorkspace<'_> {
    fn deref_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }
}

impl Drop for PooledWorkspace<'_> {
    fn drop(&mut self) {
        // SAFETY: `workspace` is taken exactly once, here, and never touched again.
        let workspace = unsafe { ManuallyDrop::take(&mut self.workspace) };
        self.pool.checkin(workspace);
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Where a compression call gets its workspace from.
#[derive(Debug, Clone, Default)]
pub enum WorkspaceSource {
    /// Allocate a fresh workspace for every call.
    #[default]
    PerCall,
    /// Lease from a shared pool.
    Pooled(Arc<WorkspacePool>),
}

impl WorkspaceSource {
    /// A pooled source backed by a new, empty pool.
    pub fn pooled() -> Self {
        Self::Pooled(Arc::new(WorkspacePool::new()))
    }

    /// Obtain a workspace for exactly one compression call.
    pub fn lease(&self) -> Result<WorkspaceLease<'_>, TryReserveError> {
        match self {
            Self::PerCall => Workspace::try_new().map(WorkspaceLease::Owned),
            Self::Pooled(pool) => pool.checkout().map(WorkspaceLease::Pooled),
        }
    }
}

/// A workspace held for the duration of one call.
pub enum WorkspaceLease<'a> {
    Owned(Workspace),
    Pooled(PooledWorkspace<'a>),
}

impl Deref for WorkspaceLease<'_> {
    type Target = Workspace;
    fn deref(&self) -> &Workspace {
        match self {
            Self::Owned(ws) => ws,
            Self::Pooled(ws) => ws,
        }
    }
}

impl DerefMut for WorkspaceLease<'_> {
    fn deref_mut(&mut self) -> &mut Workspace {
        match self {
            Self::Owned(ws) => ws,
            Self::Pooled(ws) => ws,
        }
    }
}
