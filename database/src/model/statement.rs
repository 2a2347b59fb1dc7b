use serde::{Deserialize, Serialize};

use crate::{
    consts::consts::EntityId,
    database::table::row::{NewPersonData, UpdatePersonData},
};

use super::person::Person;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Statement {
    /// Creates a person, the table assigns the id
    Add(NewPersonData),
    Update(EntityId, UpdatePersonData),
    Remove(EntityId),
    Get(EntityId),
    /// Returns a list of Person, ordered by id
    List,
}

impl Statement {
    pub fn is_query(&self) -> bool {
        !self.is_mutation()
    }

    pub fn is_mutation(&self) -> bool {
        match self {
            Statement::Add(_) | Statement::Remove(_) | Statement::Update(_, _) => true,
            Statement::List | Statement::Get(_) => false,
        }
    }
}

// TODO: Is there a better way to type this? Like if we know we are going to get a Single, we should be able to unwrap it
//  Note: the solution could be similiar to how we make the send_request method accept specific statement types, and thus, return their corresponding response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum StatementResult {
    Single(Person),
    List(Vec<Person>),
}

impl StatementResult {
    // TODO: Consider removing these methods and localizing them in the request_manager
    pub fn single(self) -> Person {
        if let StatementResult::Single(p) = self {
            p
        } else {
            panic!("Statement result is not of type Single")
        }
    }

    pub fn list(self) -> Vec<Person> {
        if let StatementResult::List(l) = self {
            l
        } else {
            panic!("Statement result is not of type List")
        }
    }
}
