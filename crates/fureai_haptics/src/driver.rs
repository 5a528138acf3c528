//! Haptic driver: a player running on its own fixed-rate tick
//!
//! The HapticDriver owns one PatternPlayer inside a background task. It:
//! - Ticks the player at a fixed interval
//! - Accepts load/stop commands from any number of handles
//! - Publishes a status snapshot after every change
//!
//! Commands and ticks are serialised through the one task, so a stop can
//! never interleave with a half-finished tick.

use crate::actuator::Actuator;
use crate::player::{PatternPlayer, PlayerStatus};
use crate::tick::TickConfig;
use fureai_core::{PatternError, VibrationPattern};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, MissedTickBehavior};

enum Command {
    Load {
        pattern: VibrationPattern,
        reply: oneshot::Sender<Result<(), PatternError>>,
    },
    Stop,
}

/// Handle to a running player task.
///
/// Dropping the last handle stops playback and ends the task.
pub struct HapticDriver {
    /// Channel to send commands
    command_tx: mpsc::Sender<Command>,

    /// Receiver for status updates (cloneable)
    status_rx: watch::Receiver<PlayerStatus>,

    tick_config: TickConfig,
}

impl HapticDriver {
    /// Spawn the player task. Must be called from within a tokio runtime.
    pub fn spawn<A: Actuator + 'static>(actuator: A, tick_config: TickConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (status_tx, status_rx) = watch::channel(PlayerStatus::default());

        let driver = Self {
            command_tx,
            status_rx,
            tick_config,
        };
        driver.spawn_tick_loop(PatternPlayer::new(actuator), command_rx, status_tx);
        driver
    }

    fn spawn_tick_loop<A: Actuator + 'static>(
        &self,
        mut player: PatternPlayer<A>,
        mut command_rx: mpsc::Receiver<Command>,
        status_tx: watch::Sender<PlayerStatus>,
    ) {
        let tick_interval = self.tick_config.interval;

        tokio::spawn(async move {
            let origin = Instant::now();
            let mut interval = tokio::time::interval(tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if !player.is_running() {
                            continue;
                        }
                        let now = origin.elapsed();
                        player.tick(now);
                        let _ = status_tx.send(player.status(now));
                    }

                    command = command_rx.recv() => {
                        let now = origin.elapsed();
                        match command {
                            Some(Command::Load { pattern, reply }) => {
                                let result = player.load(pattern, now);
                                // publish before replying so callers see the new state
                                let _ = status_tx.send(player.status(now));
                                let _ = reply.send(result);
                            }
                            Some(Command::Stop) => {
                                player.stop();
                                let _ = status_tx.send(player.status(now));
                            }
                            None => {
                                player.stop();
                                let _ = status_tx.send(player.status(now));
                                tracing::debug!("All driver handles dropped, tick loop exiting");
                                break;
                            }
                        }
                    }
                }
            }
        });
    }

    /// Start playing a pattern, replacing whatever is playing.
    ///
    /// An empty pattern comes back as a [`PatternError::EmptyPattern`] inside
    /// the error and leaves current playback untouched.
    pub async fn load(&self, pattern: VibrationPattern) -> anyhow::Result<()> {
        let (reply, result) = oneshot::channel();
        self.command_tx
            .send(Command::Load { pattern, reply })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send load command: {}", e))?;
        let outcome = result
            .await
            .map_err(|e| anyhow::anyhow!("Driver task dropped load reply: {}", e))?;
        outcome.map_err(anyhow::Error::from)
    }

    /// Stop playback immediately.
    pub async fn stop(&self) -> anyhow::Result<()> {
        self.command_tx
            .send(Command::Stop)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send stop command: {}", e))
    }

    /// Latest published status
    pub fn status(&self) -> PlayerStatus {
        self.status_rx.borrow().clone()
    }

    /// Subscribe to status updates
    pub fn subscribe(&self) -> watch::Receiver<PlayerStatus> {
        self.status_rx.clone()
    }

    /// Resolve once nothing is playing.
    pub async fn wait_idle(&self) -> anyhow::Result<()> {
        let mut rx = self.subscribe();
        rx.wait_for(|status| !status.running)
            .await
            .map_err(|e| anyhow::anyhow!("Driver task ended: {}", e))?;
        Ok(())
    }

    pub fn tick_config(&self) -> &TickConfig {
        &self.tick_config
    }
}
