//! rawtext — compose Minecraft text-component commands from formatted
//! selections and parse them back into editable structure.
//!
//! The external editing surface extracts selections and hosts the dialogs;
//! this crate owns everything in between: segmentation of the extracted
//! nodes, the event cache the annotations resolve through, the command
//! encoder with its per-flavor packaging, the parser, and the session state
//! (saved compositions, confirm-gated destructive operations).

pub mod command;
pub mod compose;
pub mod confirm;
pub mod store;
pub mod workspace;

pub use command::{CommandKind, CommandTemplates};
pub use compose::{compose_command, import_document, ComposeError, Import};
pub use confirm::ConfirmOutcome;
pub use store::SavedComposition;
pub use workspace::{Clipboard, SessionState, Workspace};

pub use rawtext_codec::decoder::Parsed;
pub use rawtext_codec::error::{EncodeError, ParseError};
pub use rawtext_core::doc::{Block, Document, Inline, SpanNode, TextRun};
pub use rawtext_core::event::{EventCache, EventDescriptor, EventKind};
pub use rawtext_core::format::Format;
pub use rawtext_core::ident::{EventId, IdMinter, SpanKey};
pub use rawtext_core::segment::{Layout, Line, Packing};
pub use rawtext_core::segmenter::segment;
pub use rawtext_core::selection::{Direction, SelNode, Selection};
