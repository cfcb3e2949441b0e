use std::path::{Path, PathBuf};

use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use super::commands::BridgeCommand;
use crate::error::{BridgeError, BridgeResult};
use crate::input::Input;
use crate::reactions::Reaction;

/// Cheap, cloneable handle to a bridge running in its own task.
///
/// Commands from every clone are queued on one channel and applied one at a
/// time, so concurrent callers never interleave inside a transaction.
pub struct BridgeHandle<B> {
    id: Uuid,
    cmd_tx: mpsc::Sender<BridgeCommand<B>>,
}

impl<B> Clone for BridgeHandle<B> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            cmd_tx: self.cmd_tx.clone(),
        }
    }
}

impl<B> BridgeHandle<B> {
    pub(crate) fn new(id: Uuid, cmd_tx: mpsc::Sender<BridgeCommand<B>>) -> Self {
        Self { id, cmd_tx }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Submit an input and wait until its transition, if any, is fully applied.
    pub async fn submit(&self, input: Input) -> BridgeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BridgeCommand::Submit { input, reply: tx }).await?;
        rx.await.map_err(|_| BridgeError::Closed)
    }

    pub async fn add_reaction(&self, reaction: Reaction) -> BridgeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BridgeCommand::AddReaction { reaction, reply: tx })
            .await?;
        rx.await.map_err(|_| BridgeError::Closed)
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> BridgeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BridgeCommand::Save {
            path: path.as_ref().to_path_buf(),
            reply: tx,
        })
        .await?;
        rx.await.map_err(|_| BridgeError::Closed)?
    }

    pub async fn load(&self, path: impl AsRef<Path>) -> BridgeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BridgeCommand::Load {
            path: path.as_ref().to_path_buf(),
            reply: tx,
        })
        .await?;
        rx.await.map_err(|_| BridgeError::Closed)?
    }

    /// Snapshot of the current board.
    pub async fn board(&self) -> BridgeResult<B> {
        let (tx, rx) = oneshot::channel();
        self.send(BridgeCommand::GetBoard { reply: tx }).await?;
        rx.await.map_err(|_| BridgeError::Closed)
    }

    pub async fn last_save_path(&self) -> BridgeResult<Option<PathBuf>> {
        let (tx, rx) = oneshot::channel();
        self.send(BridgeCommand::GetLastSavePath { reply: tx })
            .await?;
        rx.await.map_err(|_| BridgeError::Closed)
    }

    pub async fn shutdown(&self) {
        let _ = self.cmd_tx.send(BridgeCommand::Shutdown).await;
    }

    async fn send(&self, cmd: BridgeCommand<B>) -> BridgeResult<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| BridgeError::Closed)
    }
}

impl<B> std::fmt::Debug for BridgeHandle<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeHandle").field("id", &self.id).finish()
    }
}
