//! Runs a [`Bridge`] inside a tokio task.
//!
//! The task owns the bridge outright and processes one command at a time,
//! which gives hosts with several concurrent tasks the single dispatch
//! thread the bridge requires.

mod commands;
mod handle;

pub use handle::BridgeHandle;

use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

use crate::bridge::Bridge;
use crate::config;
use crate::traits::Engine;
use commands::BridgeCommand;

/// Move `bridge` into a new task and return a handle to it.
///
/// Must be called from within a tokio runtime.
pub fn spawn<E>(bridge: Bridge<E>) -> BridgeHandle<E::Board>
where
    E: Engine + Send + 'static,
    E::Board: Send + 'static,
{
    let id = Uuid::new_v4();
    let (cmd_tx, cmd_rx) = mpsc::channel(config::get_command_buffer());
    tokio::spawn(
        run_bridge_actor(bridge, cmd_rx).instrument(tracing::info_span!("bridge", %id)),
    );
    BridgeHandle::new(id, cmd_tx)
}

async fn run_bridge_actor<E: Engine>(
    mut bridge: Bridge<E>,
    mut cmd_rx: mpsc::Receiver<BridgeCommand<E::Board>>,
) {
    tracing::info!("Bridge actor started");

    while let Some(cmd) = cmd_rx.recv().await {
        tracing::trace!("Handling {} command", cmd.name());
        match cmd {
            BridgeCommand::Submit { input, reply } => {
                bridge.submit(input);
                let _ = reply.send(());
            }
            BridgeCommand::AddReaction { reaction, reply } => {
                bridge.add_reaction(reaction);
                let _ = reply.send(());
            }
            BridgeCommand::Save { path, reply } => {
                let result = bridge.save(&path);
                if let Err(ref e) = result {
                    tracing::warn!("Save failed: {}", e);
                }
                let _ = reply.send(result);
            }
            BridgeCommand::Load { path, reply } => {
                let result = bridge.load(&path);
                if let Err(ref e) = result {
                    tracing::warn!("Load failed: {}", e);
                }
                let _ = reply.send(result);
            }
            BridgeCommand::GetBoard { reply } => {
                let _ = reply.send(bridge.board().clone());
            }
            BridgeCommand::GetLastSavePath { reply } => {
                let _ = reply.send(bridge.last_save_path().map(|p| p.to_path_buf()));
            }
            BridgeCommand::Shutdown => {
                tracing::info!("Bridge actor shutting down");
                break;
            }
        }
    }

    tracing::info!("Bridge actor exited");
}
