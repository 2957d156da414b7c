//! Command kinds and their templates.

use serde::{Deserialize, Serialize};

use rawtext_core::segment::Packing;

/// The command surface a composed selection targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// Bare component output, no wrapping command.
    Nbt,
    Tellraw,
    Title,
    Sign,
    Book,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Nbt => "nbt",
            CommandKind::Tellraw => "tellraw",
            CommandKind::Title => "title",
            CommandKind::Sign => "sign",
            CommandKind::Book => "book",
        }
    }

    pub fn from_str(s: &str) -> Option<CommandKind> {
        match s {
            "nbt" => Some(CommandKind::Nbt),
            "tellraw" => Some(CommandKind::Tellraw),
            "title" => Some(CommandKind::Title),
            "sign" => Some(CommandKind::Sign),
            "book" => Some(CommandKind::Book),
            _ => None,
        }
    }

    /// How segmentation and the encoder package lines for this kind.
    pub fn packing(&self) -> Packing {
        match self {
            CommandKind::Nbt | CommandKind::Tellraw | CommandKind::Title => Packing::Flow,
            CommandKind::Sign => Packing::Lines,
            CommandKind::Book => Packing::Paged,
        }
    }
}

/// One command template per kind, each holding a single `%s` marker the
/// packaged component text substitutes into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandTemplates {
    pub tellraw: String,
    pub title: String,
    pub sign: String,
    pub book: String,
}

impl Default for CommandTemplates {
    fn default() -> Self {
        Self {
            tellraw: "tellraw @a %s".to_string(),
            title: "title @a title %s".to_string(),
            sign: "give @p oak_sign{BlockEntityTag:{%s}} 1".to_string(),
            book: "give @p written_book{pages:[%s],title:\"rawtext\",author:\"@\"} 1".to_string(),
        }
    }
}

impl CommandTemplates {
    /// Template for a kind. Bare nbt output has no surrounding command, so
    /// its template is the marker itself.
    pub fn for_kind(&self, kind: CommandKind) -> &str {
        match kind {
            CommandKind::Nbt => "%s",
            CommandKind::Tellraw => &self.tellraw,
            CommandKind::Title => &self.title,
            CommandKind::Sign => &self.sign,
            CommandKind::Book => &self.book,
        }
    }
}
