pub mod budget;
pub mod cascade;
pub mod educational_roadmap;
pub mod key_result;
pub mod roadmap;
pub mod trail;

/// Result of a get-or-generate call.
pub struct Generated<T> {
    pub value: T,
    /// False when an existing row was returned.
    pub created: bool,
}

impl<T> Generated<T> {
    pub fn created(value: T) -> Self {
        Self {
            value,
            created: true,
        }
    }

    pub fn existing(value: T) -> Self {
        Self {
            value,
            created: false,
        }
    }
}
