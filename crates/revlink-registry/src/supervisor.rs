//! Guarded registry connection with a single reconnect.

use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::{RegistryError, RegistryResult};

/// Opens connections to a registry backend.
pub trait Connector: Send + Sync {
    /// The live connection type.
    type Connection: Send;

    /// Opens a fresh connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn connect(&self) -> RegistryResult<Self::Connection>;
}

/// A lazily opened connection shared by concurrent callers.
///
/// The connection sits behind a mutex, so exactly one query runs on it at a
/// time. When a query fails the connection is dropped, a new one is opened and
/// the query runs once more; a second failure is reported as
/// [`RegistryError::Unavailable`].
pub struct SupervisedConnection<C: Connector> {
    connector: C,
    slot: Mutex<Option<C::Connection>>,
}

impl<C: Connector> SupervisedConnection<C> {
    /// Creates a supervisor. No connection is opened until the first query.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            slot: Mutex::new(None),
        }
    }

    /// Returns the connector.
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Runs `op` against the live connection, reconnecting and retrying once
    /// on failure.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unavailable`] wrapping the second failure.
    pub fn run<T, F>(&self, mut op: F) -> RegistryResult<T>
    where
        F: FnMut(&mut C::Connection) -> RegistryResult<T>,
    {
        // A panic mid-query leaves nothing half-written: the registry is read-only.
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        match self.attempt(&mut slot, &mut op) {
            Ok(value) => Ok(value),
            Err(first) => {
                warn!(error = %first, "registry query failed, reconnecting");
                self.attempt(&mut slot, &mut op)
                    .map_err(|second| RegistryError::Unavailable(Box::new(second)))
            }
        }
    }

    fn attempt<T, F>(&self, slot: &mut Option<C::Connection>, op: &mut F) -> RegistryResult<T>
    where
        F: FnMut(&mut C::Connection) -> RegistryResult<T>,
    {
        let mut conn = match slot.take() {
            Some(conn) => conn,
            None => {
                debug!("opening registry connection");
                self.connector.connect()?
            }
        };

        let result = op(&mut conn);
        if result.is_ok() {
            *slot = Some(conn);
        }
        result
    }
}
