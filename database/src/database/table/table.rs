use std::collections::HashMap;
use thiserror::Error;

use crate::{
    consts::consts::EntityId,
    model::{
        person::Person,
        statement::{Statement, StatementResult},
    },
};

use super::row::{UpdatePersonData, UpdateStatement};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplyErrors {
    // CRUD - GET
    #[error("Not found, record does not exist: {0}")]
    CannotGetDoesNotExist(EntityId),

    // CRUD - UPDATE
    #[error("Cannot update, record does not exist: {0}")]
    CannotUpdateDoesNotExist(EntityId),

    // CRUD - DELETE
    #[error("Cannot delete, record does not exist: {0}")]
    CannotDeleteDoesNotExist(EntityId),

    // Constraints
    #[error("Cannot add row as a person already exists with this email: {0}")]
    UniqueConstraintViolation(String),

    #[error("Cannot set field to an empty value: {0}")]
    NotNullConstraintViolation(String),
}

pub struct PersonTable {
    pub person_rows: HashMap<EntityId, Person>,
    pub unique_email_index: HashMap<String, EntityId>,
    /// Next id the table will hand out, ids are never reused within a collection
    next_id: EntityId,
}

impl PersonTable {
    pub fn new() -> Self {
        Self {
            person_rows: HashMap::<EntityId, Person>::new(),
            unique_email_index: HashMap::<String, EntityId>::new(),
            next_id: EntityId::new_first_id(),
        }
    }

    // Each mutation statement can be broken up into 3 steps
    //  - Verifying validity / constraints (uniqueness, not null)
    //  - Applying statement
    //  - Clean up (email index maintenance)
    //
    // Constraints are verified before anything mutates, a failed statement leaves the table untouched
    pub fn apply(&mut self, statement: Statement) -> Result<StatementResult, ApplyErrors> {
        let statement_result = match statement {
            Statement::Add(new_person) => {
                // Verify
                Self::verify_not_empty("nome", &new_person.nome)?;
                Self::verify_not_empty("email", &new_person.email)?;

                // Check if a person with this email already exists
                if self.unique_email_index.contains_key(&new_person.email) {
                    return Err(ApplyErrors::UniqueConstraintViolation(new_person.email));
                }

                // Apply -- the table owns the id sequence
                let id = self.next_id.clone();
                self.next_id = id.increment();

                let person = Person {
                    id: id.clone(),
                    nome: new_person.nome,
                    email: new_person.email,
                };

                // Persist the email so it cannot be added again
                self.unique_email_index
                    .insert(person.email.clone(), id.clone());

                self.person_rows.insert(id, person.clone());

                StatementResult::Single(person)
            }
            Statement::Update(id, update_person) => {
                // Verify
                let person_row = self
                    .person_rows
                    .get(&id)
                    .ok_or(ApplyErrors::CannotUpdateDoesNotExist(id.clone()))?;

                if let UpdateStatement::Set(nome) = &update_person.nome {
                    Self::verify_not_empty("nome", nome)?;
                }

                if let UpdateStatement::Set(email_to_update) = &update_person.email {
                    Self::verify_not_empty("email", email_to_update)?;

                    // Edge case: updating the email to its current value must not trip the uniqueness constraint
                    let owned_by_another = match self.unique_email_index.get(email_to_update) {
                        Some(existing_id) => existing_id != &id,
                        None => false,
                    };

                    if owned_by_another {
                        return Err(ApplyErrors::UniqueConstraintViolation(
                            email_to_update.clone(),
                        ));
                    }
                }

                // Apply -- fields marked NoChanges keep their stored value
                let previous_email = person_row.email.clone();
                let mut current_person = person_row.clone();

                if let UpdateStatement::Set(nome) = update_person.nome {
                    current_person.nome = nome;
                }

                if let UpdateStatement::Set(email) = update_person.email {
                    current_person.email = email;
                }

                // Clean up -- keep the email index in sync with the row
                if current_person.email != previous_email {
                    self.unique_email_index.remove(&previous_email);
                    self.unique_email_index
                        .insert(current_person.email.clone(), id.clone());
                }

                self.person_rows.insert(id, current_person.clone());

                StatementResult::Single(current_person)
            }
            Statement::Remove(id) => {
                // Verify / Apply -- removing is its own existence check
                let removed_person = self
                    .person_rows
                    .remove(&id)
                    .ok_or(ApplyErrors::CannotDeleteDoesNotExist(id))?;

                // Clean up -- frees the email for re-registration
                self.unique_email_index.remove(&removed_person.email);

                StatementResult::Single(removed_person)
            }
            Statement::Get(id) => {
                let person = match self.person_rows.get(&id) {
                    Some(person) => person.clone(),
                    None => return Err(ApplyErrors::CannotGetDoesNotExist(id)),
                };

                StatementResult::Single(person)
            }
            Statement::List => StatementResult::List(self.list_documents()),
        };

        Ok(statement_result)
    }

    /// Every person in the table, ordered by ascending id so listings are stable
    pub fn list_documents(&self) -> Vec<Person> {
        let mut people: Vec<Person> = self.person_rows.values().cloned().collect();

        people.sort_by(|a, b| a.id.cmp(&b.id));

        people
    }

    pub fn document_count(&self) -> usize {
        self.person_rows.len()
    }

    /// Replaces the table contents with the restored documents, rebuilds the
    /// email index, and continues the id sequence from the highest restored id
    pub fn restore_table(&mut self, people: Vec<Person>) {
        self.person_rows.clear();
        self.unique_email_index.clear();
        self.next_id = EntityId::new_first_id();

        for person in people {
            if person.id >= self.next_id {
                self.next_id = person.id.increment();
            }

            self.unique_email_index
                .insert(person.email.clone(), person.id.clone());

            self.person_rows.insert(person.id.clone(), person);
        }
    }

    fn verify_not_empty(field: &str, value: &str) -> Result<(), ApplyErrors> {
        if value.is_empty() {
            return Err(ApplyErrors::NotNullConstraintViolation(field.to_string()));
        }

        Ok(())
    }
}
