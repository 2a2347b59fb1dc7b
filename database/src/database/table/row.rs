use serde::{Deserialize, Serialize};

/// Payload for creating a person. Ids are assigned by the table,
/// which is why this is not a Person
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewPersonData {
    pub nome: String,
    pub email: String,
}

impl NewPersonData {
    pub fn new(nome: String, email: String) -> Self {
        Self { nome, email }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UpdatePersonData {
    pub nome: UpdateStatement,
    pub email: UpdateStatement,
}

impl UpdatePersonData {
    /// An update where every field is NoChanges is a no-op, callers
    /// should reject these before sending them to the database
    pub fn is_empty(&self) -> bool {
        self.nome == UpdateStatement::NoChanges && self.email == UpdateStatement::NoChanges
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum UpdateStatement {
    Set(String),
    NoChanges,
}

impl From<Option<String>> for UpdateStatement {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(value) => UpdateStatement::Set(value),
            None => UpdateStatement::NoChanges,
        }
    }
}
