//! Robot models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::SerialCode;
use crate::validation::{field_errors, parse_timestamp, validate_timestamp, FieldErrors};

/// A registered robot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    pub id: Uuid,
    pub model: String,
    pub version: String,
    pub serial: SerialCode,
    pub created: NaiveDateTime,
}

/// Registration payload as received from the warehouse
///
/// All fields are optional so that a missing key is reported as a field
/// error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterRobotInput {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 5, message = "Must be between 1 and 5 characters.")
    )]
    pub model: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 5, message = "Must be between 1 and 5 characters.")
    )]
    pub version: Option<String>,

    #[validate(
        required(message = "This field is required."),
        custom = "validate_timestamp"
    )]
    pub created: Option<String>,
}

/// Validated robot data, ready to receive a serial code
#[derive(Debug, Clone, PartialEq)]
pub struct NewRobot {
    pub model: String,
    pub version: String,
    pub created: NaiveDateTime,
}

impl RegisterRobotInput {
    /// Validate the payload and convert it into [`NewRobot`]
    pub fn clean(self) -> Result<NewRobot, FieldErrors> {
        if let Err(errors) = self.validate() {
            return Err(field_errors(&errors));
        }

        let created = self.created.as_deref().and_then(parse_timestamp);
        match (self.model, self.version, created) {
            (Some(model), Some(version), Some(created)) => Ok(NewRobot {
                model,
                version,
                created,
            }),
            _ => {
                let mut errors = FieldErrors::new();
                errors.insert(
                    "__all__".to_string(),
                    vec!["Incomplete robot data.".to_string()],
                );
                Err(errors)
            }
        }
    }
}

impl NewRobot {
    /// Attach an identifier and serial code, producing the persisted shape
    pub fn into_robot(self, id: Uuid, serial: SerialCode) -> Robot {
        Robot {
            id,
            model: self.model,
            version: self.version,
            serial,
            created: self.created,
        }
    }
}

/// Production count of one model/version pair within a time window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotInfo {
    pub model: String,
    pub version: String,
    pub produced_amount: i64,
}

impl RobotInfo {
    pub fn new(model: impl Into<String>, version: impl Into<String>, produced_amount: i64) -> Self {
        Self {
            model: model.into(),
            version: version.into(),
            produced_amount,
        }
    }
}
