use serde::{Deserialize, Serialize};

use crate::consts::consts::EntityId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Person {
    pub id: EntityId,
    pub nome: String,
    pub email: String,
}

impl Person {
    pub fn new_test() -> Self {
        Person {
            id: EntityId(1),
            nome: "Nome".to_string(),
            email: "Email".to_string(),
        }
    }
}
