//! One game session running on its own task.
//!
//! The simulation loop owns the [`GameState`] and is the only code that
//! mutates it. The input side talks to it through three single-slot
//! channels:
//!
//! - directions: a `watch` slot, overwritten by every send so the newest
//!   heading wins; probed without blocking at the top of each tick
//! - pause toggles: an `mpsc` channel of capacity one; once paused, the loop
//!   waits for the next toggle with no timeout
//! - cancellation: a `watch` flag checked before any other work in a tick
//!
//! After every completed transition the loop publishes a snapshot of the
//! state, which is all the renderer ever reads.

use anyhow::Result;
use log::{error, info};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::game::{Direction, GameEngine, GameState};

/// Simulation side of a session
pub struct SimulationLoop {
    engine: GameEngine,
    state: GameState,
    directions: watch::Receiver<Direction>,
    pauses: mpsc::Receiver<()>,
    cancel: watch::Receiver<bool>,
    snapshots: watch::Sender<GameState>,
}

impl SimulationLoop {
    /// Tick until the session ends or is cancelled
    pub async fn run(mut self) -> Result<()> {
        loop {
            if self.is_cancelled() {
                info!("session cancelled");
                return Ok(());
            }

            if self.pauses.try_recv().is_ok() && !self.wait_while_paused().await {
                return Ok(());
            }

            let pending = match self.directions.has_changed() {
                Ok(true) => Some(*self.directions.borrow_and_update()),
                _ => None,
            };

            if let Err(err) = self.engine.tick(&mut self.state, pending) {
                error!("simulation failed: {}", err);
                return Err(err.into());
            }
            self.publish();

            if self.state.is_over() {
                return Ok(());
            }

            tokio::select! {
                _ = self.cancel.changed() => {}
                _ = sleep(self.state.delay) => {}
            }
        }
    }

    /// Enter the paused state and block until resumed.
    ///
    /// Returns false if the session was cancelled while paused.
    async fn wait_while_paused(&mut self) -> bool {
        self.state.toggle_pause();
        self.publish();
        if !self.state.is_paused() {
            return true;
        }

        tokio::select! {
            _ = self.cancel.changed() => false,
            toggle = self.pauses.recv() => {
                if toggle.is_none() {
                    return false;
                }
                self.state.toggle_pause();
                self.publish();
                true
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        // A dropped handle counts as a cancellation
        *self.cancel.borrow() || self.cancel.has_changed().is_err()
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.clone());
    }
}

/// Input side of a running session
pub struct SessionHandle {
    directions: watch::Sender<Direction>,
    pauses: mpsc::Sender<()>,
    cancel: watch::Sender<bool>,
    snapshots: watch::Receiver<GameState>,
    task: JoinHandle<Result<()>>,
}

impl SessionHandle {
    /// Start a fresh session driven by `engine`
    pub fn spawn(mut engine: GameEngine) -> Result<Self> {
        let state = engine.reset()?;
        let (direction_tx, direction_rx) = watch::channel(state.snail.heading);
        let (pause_tx, pause_rx) = mpsc::channel(1);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (snapshot_tx, snapshot_rx) = watch::channel(state.clone());

        let simulation = SimulationLoop {
            engine,
            state,
            directions: direction_rx,
            pauses: pause_rx,
            cancel: cancel_rx,
            snapshots: snapshot_tx,
        };

        Ok(Self {
            directions: direction_tx,
            pauses: pause_tx,
            cancel: cancel_tx,
            snapshots: snapshot_rx,
            task: tokio::spawn(simulation.run()),
        })
    }

    /// Queue a heading for the next tick, replacing any still pending
    pub fn steer(&self, direction: Direction) {
        self.directions.send_replace(direction);
    }

    /// Ask the simulation to pause or resume; waits while a previous toggle
    /// is still pending
    pub async fn toggle_pause(&self) {
        // The loop is gone once the session ended; nothing to toggle then
        let _ = self.pauses.send(()).await;
    }

    /// Stop the simulation before its next tick
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    /// The latest published state
    pub fn snapshot(&self) -> GameState {
        self.snapshots.borrow().clone()
    }

    pub fn snapshots(&mut self) -> &mut watch::Receiver<GameState> {
        &mut self.snapshots
    }

    /// Wait for the simulation task to end and surface its failure, if any.
    ///
    /// Await this at most once per session.
    pub async fn wait(&mut self) -> Result<()> {
        (&mut self.task).await?
    }
}
