use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use shopgraph_core::model::{Interaction, Product, UserIndex};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandName {
    Register,
    Login,
    AddProduct,
    Browse,
    Purchase,
    Recommend,
    Suggest,
    Exit,
}

impl CommandName {
    pub const ALL: [CommandName; 8] = [
        CommandName::Register,
        CommandName::Login,
        CommandName::AddProduct,
        CommandName::Browse,
        CommandName::Purchase,
        CommandName::Recommend,
        CommandName::Suggest,
        CommandName::Exit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommandName::Register => "register",
            CommandName::Login => "login",
            CommandName::AddProduct => "add_product",
            CommandName::Browse => "browse",
            CommandName::Purchase => "purchase",
            CommandName::Recommend => "recommend",
            CommandName::Suggest => "suggest",
            CommandName::Exit => "exit",
        }
    }
}

impl std::fmt::Display for CommandName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SessionError::UnknownCommand(s.to_string()))
    }
}

/// A fully parsed request for one session operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Register {
        username: String,
        email: String,
        password: String,
    },
    Login {
        username: String,
        password: String,
    },
    AddProduct {
        product_id: String,
        name: String,
        category: String,
        inventory: u32,
    },
    Browse {
        user_index: UserIndex,
        product_id: String,
    },
    Purchase {
        user_index: UserIndex,
        product_id: String,
    },
    Recommend {
        user_index: UserIndex,
    },
    Suggest {
        query: String,
    },
    Exit,
}

impl Command {
    /// Parse a JSON command such as `{"command":"recommend","user_index":0}`.
    pub fn parse_json(raw: &str) -> Result<Self, SessionError> {
        serde_json::from_str(raw).map_err(|err| SessionError::InvalidPayload(err.to_string()))
    }

    pub fn name(&self) -> CommandName {
        match self {
            Command::Register { .. } => CommandName::Register,
            Command::Login { .. } => CommandName::Login,
            Command::AddProduct { .. } => CommandName::AddProduct,
            Command::Browse { .. } => CommandName::Browse,
            Command::Purchase { .. } => CommandName::Purchase,
            Command::Recommend { .. } => CommandName::Recommend,
            Command::Suggest { .. } => CommandName::Suggest,
            Command::Exit => CommandName::Exit,
        }
    }
}

/// Structured result of [`crate::Session::execute`], ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Registered {
        user_index: UserIndex,
    },
    LoggedIn {
        success: bool,
    },
    ProductAdded {
        product_id: String,
    },
    InteractionRecorded {
        kind: Interaction,
        user_index: UserIndex,
        product_id: String,
        new_edge: bool,
    },
    Recommendations {
        user_index: UserIndex,
        products: Vec<Product>,
    },
    Suggestions {
        query: String,
        products: Vec<Product>,
    },
    Exit,
}
