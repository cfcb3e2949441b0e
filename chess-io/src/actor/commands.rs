use std::path::PathBuf;

use tokio::sync::oneshot;

use crate::error::BridgeResult;
use crate::input::Input;
use crate::reactions::Reaction;

/// Commands sent to a bridge actor. Each embeds a oneshot for the reply.
pub(crate) enum BridgeCommand<B> {
    Submit {
        input: Input,
        reply: oneshot::Sender<()>,
    },
    AddReaction {
        reaction: Reaction,
        reply: oneshot::Sender<()>,
    },
    Save {
        path: PathBuf,
        reply: oneshot::Sender<BridgeResult<()>>,
    },
    Load {
        path: PathBuf,
        reply: oneshot::Sender<BridgeResult<()>>,
    },
    GetBoard {
        reply: oneshot::Sender<B>,
    },
    GetLastSavePath {
        reply: oneshot::Sender<Option<PathBuf>>,
    },
    Shutdown,
}

impl<B> BridgeCommand<B> {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Submit { .. } => "Submit",
            Self::AddReaction { .. } => "AddReaction",
            Self::Save { .. } => "Save",
            Self::Load { .. } => "Load",
            Self::GetBoard { .. } => "GetBoard",
            Self::GetLastSavePath { .. } => "GetLastSavePath",
            Self::Shutdown => "Shutdown",
        }
    }
}
