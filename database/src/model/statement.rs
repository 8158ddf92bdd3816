use serde::{Deserialize, Serialize};

use crate::consts::consts::PersonId;

use super::person::{NewPerson, Person};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Statement {
    /// Appends a person, the table assigns the id
    Add(NewPerson),
    /// Removes the person with this id, a missing id is not an error
    Remove(PersonId),
    Get(PersonId),
    /// Looks up by position in the phonebook, not by id
    GetIndex(usize),
    List,
    Count,
}

impl Statement {
    pub fn is_mutation(&self) -> bool {
        match self {
            Statement::Add(_) | Statement::Remove(_) => true,
            Statement::Get(_) | Statement::GetIndex(_) | Statement::List | Statement::Count => {
                false
            }
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum StatementResult {
    Single(Person),
    GetSingle(Option<Person>),
    List(Vec<Person>),
    Count(usize),
}
