use thiserror::Error;

use crate::{
    consts::consts::{PersonId, START_AT_ID},
    model::{
        person::{NewPerson, Person},
        statement::{Statement, StatementResult},
    },
};

#[derive(Error, Debug, PartialEq)]
pub enum ApplyErrors {
    // Constraints
    #[error("the name already exists in the phonebook")]
    NameAlreadyExists(String),
}

/// Ordered collection of people, insertion order is the order the phonebook is listed in
pub struct PersonTable {
    pub person_rows: Vec<Person>,
    /// Highest id ever handed out, survives the deletion of that person so the id is never reused
    highest_issued_id: Option<PersonId>,
}

impl PersonTable {
    pub fn new() -> Self {
        Self {
            person_rows: Vec::new(),
            highest_issued_id: None,
        }
    }

    pub fn seeded() -> Self {
        Self {
            person_rows: Person::seed(),
            highest_issued_id: None,
        }
    }

    pub fn apply(&mut self, statement: Statement) -> Result<StatementResult, ApplyErrors> {
        let statement_result = match statement {
            Statement::Add(new_person) => StatementResult::Single(self.insert(new_person)?),
            Statement::Remove(id) => StatementResult::GetSingle(self.delete(id)),
            Statement::Get(id) => StatementResult::GetSingle(self.get_by_id(id).cloned()),
            Statement::GetIndex(index) => {
                StatementResult::GetSingle(self.get_by_index(index).cloned())
            }
            Statement::List => StatementResult::List(self.list_all()),
            Statement::Count => StatementResult::Count(self.len()),
        };

        Ok(statement_result)
    }

    pub fn list_all(&self) -> Vec<Person> {
        self.person_rows.clone()
    }

    pub fn get_by_index(&self, index: usize) -> Option<&Person> {
        self.person_rows.get(index)
    }

    pub fn get_by_id(&self, id: PersonId) -> Option<&Person> {
        self.person_rows.iter().find(|person| person.id == id)
    }

    pub fn len(&self) -> usize {
        self.person_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.person_rows.is_empty()
    }

    /// Next id is one past the biggest id currently stored or ever issued, whichever is larger
    pub fn generate_id(&self) -> PersonId {
        let highest_stored = self.person_rows.iter().map(|person| person.id).max();

        match highest_stored.max(self.highest_issued_id) {
            Some(id) => id.increment(),
            None => START_AT_ID,
        }
    }

    // Each insert can be broken up into 3 steps
    //  - Verifying constraints (name uniqueness)
    //  - Assigning the id
    //  - Appending
    pub fn insert(&mut self, new_person: NewPerson) -> Result<Person, ApplyErrors> {
        if self
            .person_rows
            .iter()
            .any(|person| person.name == new_person.name)
        {
            return Err(ApplyErrors::NameAlreadyExists(new_person.name));
        }

        let id = self.generate_id();
        let person = new_person.with_id(id);

        self.person_rows.push(person.clone());
        self.highest_issued_id = Some(id);

        Ok(person)
    }

    /// Filters out the person with the given id, returns them if they existed
    pub fn delete(&mut self, id: PersonId) -> Option<Person> {
        let position = self.person_rows.iter().position(|person| person.id == id)?;

        Some(self.person_rows.remove(position))
    }
}

impl Default for PersonTable {
    fn default() -> Self {
        Self::new()
    }
}
