//! School and district models.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validate::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub district_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl Validate for School {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl Validate for District {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
