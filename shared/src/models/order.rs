//! Customer and order models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer who can place orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub email: String,
}

/// A customer's request for a robot of a given model and version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// The ordering customer, joined from the customers table
    pub customer: Customer,
    pub model: String,
    pub version: String,
}

impl Order {
    /// Whether this order asks for the given model/version pair
    pub fn matches(&self, model: &str, version: &str) -> bool {
        self.model == model && self.version == version
    }
}
