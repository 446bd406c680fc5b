// src/models/rbac.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Papel do usuário. Conjunto fechado; qualquer outro texto vindo de um token
/// vira `Unrecognized`, que não tem permissão nenhuma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperUser,
    Editor,
    Viewer,
    #[serde(skip_deserializing)]
    Unrecognized,
}

impl Role {
    pub fn from_claim(value: &str) -> Self {
        match value {
            "SUPER_USER" => Role::SuperUser,
            "EDITOR" => Role::Editor,
            "VIEWER" => Role::Viewer,
            _ => Role::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperUser => "SUPER_USER",
            Role::Editor => "EDITOR",
            Role::Viewer => "VIEWER",
            Role::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entidades do estoque sujeitas à política de mutação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Material,
    Project,
    Category,
    Unit,
    Inflow,
    Outflow,
}

impl Resource {
    const ALL: [Resource; 6] = [
        Resource::Material,
        Resource::Project,
        Resource::Category,
        Resource::Unit,
        Resource::Inflow,
        Resource::Outflow,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Resource::Material => "material",
            Resource::Project => "project",
            Resource::Category => "category",
            Resource::Unit => "unit",
            Resource::Inflow => "inflow",
            Resource::Outflow => "outflow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    const ALL: [Operation; 3] = [Operation::Create, Operation::Update, Operation::Delete];

    fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Ação verificada pela política: mutação de inventário ou gestão de usuários.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Inventory(Operation, Resource),
    ManageUsers,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Inventory(op, res) => write!(f, "{}_{}", op.as_str(), res.as_str()),
            Action::ManageUsers => f.write_str("manage_users"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ação desconhecida: {}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

// "create_material", "delete_inflow", "manage_users"...
impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "manage_users" {
            return Ok(Action::ManageUsers);
        }

        let (op, res) = s.split_once('_').ok_or_else(|| UnknownAction(s.to_string()))?;
        let op = Operation::ALL
            .into_iter()
            .find(|o| o.as_str() == op)
            .ok_or_else(|| UnknownAction(s.to_string()))?;
        let res = Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == res)
            .ok_or_else(|| UnknownAction(s.to_string()))?;

        Ok(Action::Inventory(op, res))
    }
}
