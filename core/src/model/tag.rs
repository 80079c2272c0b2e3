use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub owner: Uuid,
}

impl Tag {
    pub fn new(name: String, owner: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            owner,
        }
    }
}
