use std::time::Duration;

use crate::consts::consts::DEFAULT_REQUEST_TIMEOUT;

#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub seed: bool,
    pub request_timeout: Duration,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl DatabaseOptions {
    /// Defines whether the phonebook starts with the four seed records or empty
    pub fn set_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// How long a request manager waits for the database thread to answer
    pub fn set_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            seed: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[cfg(test)]
impl DatabaseOptions {
    pub fn new_test() -> Self {
        DatabaseOptions::default().set_request_timeout(Duration::from_secs(5))
    }
}
