use serde::{Deserialize, Serialize};

use crate::consts::consts::PersonId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub number: String,
}

/// A person that has not been stored yet, the id is assigned by the table on insert
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewPerson {
    pub name: String,
    pub number: String,
}

impl NewPerson {
    pub fn new(name: &str, number: &str) -> Self {
        NewPerson {
            name: name.to_string(),
            number: number.to_string(),
        }
    }

    pub fn with_id(self, id: PersonId) -> Person {
        Person {
            id,
            name: self.name,
            number: self.number,
        }
    }

    pub fn new_test() -> Self {
        NewPerson::new("Full Name", "040-0000000")
    }
}

impl Person {
    pub fn new(id: u64, name: &str, number: &str) -> Self {
        Person {
            id: PersonId(id),
            name: name.to_string(),
            number: number.to_string(),
        }
    }

    /// Records every phonebook starts with
    pub fn seed() -> Vec<Person> {
        vec![
            Person::new(1, "Arto Hellas", "040-123456"),
            Person::new(2, "Ada Lovelace", "39-44-5323523"),
            Person::new(3, "Dan Abramov", "12-43-234345"),
            Person::new(4, "Mary Poppendieck", "39-23-6423122"),
        ]
    }
}
