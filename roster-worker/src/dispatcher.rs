/// Command dispatcher
///
/// Runs a `Controller` on its own tokio task. Callers hold a cloneable
/// `DispatchHandle`, send a `Command` through a bounded channel and await the
/// reply on a oneshot. The task handles one command at a time in arrival
/// order, so there is at most one logical writer to the store.
///
/// # Architecture
///
/// ```text
/// DispatchHandle ──mpsc──> dispatcher task ──> Controller ──> Store
///       ^                        │
///       └────────oneshot─────────┘
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_worker::command::Command;
/// use roster_worker::controller::Controller;
/// use roster_worker::dispatcher::Dispatcher;
/// # use roster_shared::store::Store;
///
/// # async fn example(store: Store) -> Result<(), Box<dyn std::error::Error>> {
/// let dispatcher = Dispatcher::spawn(Controller::new(store));
/// let handle = dispatcher.handle();
///
/// let outcome = handle.send(Command::LoadAll).await?;
/// println!("{:?}", outcome);
///
/// // Stop the task and take the store back
/// if let Some(controller) = dispatcher.shutdown().await {
///     controller.into_store().close().await;
/// }
/// # Ok(())
/// # }
/// ```

use crate::command::{Command, Outcome};
use crate::controller::Controller;
use roster_shared::error::{StoreError, StoreResult};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Default number of commands that may wait in the channel
pub const DEFAULT_CAPACITY: usize = 64;

/// Dispatch error
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The controller handled the command and the store refused it
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The dispatcher task is no longer running
    #[error("Dispatcher is closed")]
    Closed,
}

/// A command waiting for the controller, with its reply slot
#[derive(Debug)]
struct Envelope {
    command: Command,
    reply: oneshot::Sender<StoreResult<Outcome>>,
}

/// Cloneable sender side of the dispatcher
#[derive(Debug, Clone)]
pub struct DispatchHandle {
    tx: mpsc::Sender<Envelope>,
}

impl DispatchHandle {
    /// Sends a command and waits for its outcome
    ///
    /// # Errors
    ///
    /// - `Store` if the controller ran the command and it failed
    /// - `Closed` if the dispatcher stopped before replying
    pub async fn send(&self, command: Command) -> Result<Outcome, DispatchError> {
        let (reply, rx) = oneshot::channel();

        self.tx
            .send(Envelope { command, reply })
            .await
            .map_err(|_| DispatchError::Closed)?;

        match rx.await {
            Ok(result) => Ok(result?),
            Err(_) => Err(DispatchError::Closed),
        }
    }

    /// Whether the dispatcher task has stopped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owner of the running dispatcher task
#[derive(Debug)]
pub struct Dispatcher {
    handle: DispatchHandle,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<Controller>,
}

impl Dispatcher {
    /// Spawns the controller with the default channel capacity
    pub fn spawn(controller: Controller) -> Self {
        Self::with_capacity(controller, DEFAULT_CAPACITY)
    }

    /// Spawns the controller with a bounded channel of `capacity` commands
    ///
    /// Senders wait once the channel is full.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(controller: Controller, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(run(controller, rx, shutdown_rx));
        tracing::info!(capacity, "Dispatcher started");

        Dispatcher {
            handle: DispatchHandle { tx },
            shutdown_tx,
            task,
        }
    }

    /// A new handle to this dispatcher
    pub fn handle(&self) -> DispatchHandle {
        self.handle.clone()
    }

    /// Stops the task and returns the controller
    ///
    /// Commands already waiting in the channel are dropped and their senders
    /// get `DispatchError::Closed`. Returns `None` if the task panicked.
    pub async fn shutdown(self) -> Option<Controller> {
        // The task may already be gone; a failed send is fine
        let _ = self.shutdown_tx.send(());

        match self.task.await {
            Ok(controller) => Some(controller),
            Err(e) => {
                tracing::error!(error = %e, "Dispatcher task failed");
                None
            }
        }
    }
}

async fn run(
    mut controller: Controller,
    mut rx: mpsc::Receiver<Envelope>,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> Controller {
    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown_rx => {
                tracing::info!("Dispatcher shutting down");
                break;
            }

            envelope = rx.recv() => {
                let Some(Envelope { command, reply }) = envelope else {
                    tracing::info!("All dispatch handles dropped");
                    break;
                };

                let name = command.name();
                let write = command.is_write();
                let result = controller.dispatch(command).await;
                if let Err(e) = &result {
                    if write {
                        tracing::warn!(command = name, error = %e, "Write command failed");
                    } else {
                        tracing::debug!(command = name, error = %e, "Command failed");
                    }
                }

                if reply.send(result).is_err() {
                    tracing::debug!(command = name, "Caller went away before the reply");
                }
            }
        }
    }

    rx.close();
    controller
}
