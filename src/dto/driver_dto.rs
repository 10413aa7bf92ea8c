use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Driver, DriverChanges, NewDriver};
use crate::utils::errors::AppResult;
use crate::utils::validation::RequiredFields;

// Request para crear un conductor; las tres claves son obligatorias
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(max = 200))]
    pub name: Option<String>,

    #[validate(length(max = 16))]
    pub phone: Option<String>,

    #[validate(length(max = 20))]
    pub license_number: Option<String>,
}

impl CreateDriverRequest {
    pub fn into_new_driver(self) -> AppResult<NewDriver> {
        let mut required = RequiredFields::new();
        let name = required.check("name", self.name.clone());
        let phone = required.check("phone", self.phone.clone());
        let license_number = required.check("license_number", self.license_number.clone());

        match (name, phone, license_number) {
            (Some(name), Some(phone), Some(license_number)) => {
                self.validate()?;
                Ok(NewDriver {
                    name,
                    phone,
                    license_number,
                })
            }
            _ => Err(required.into_error()),
        }
    }
}

// Request para actualizar un conductor
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(max = 200))]
    pub name: Option<String>,

    #[validate(length(max = 16))]
    pub phone: Option<String>,

    #[validate(length(max = 20))]
    pub license_number: Option<String>,
}

impl UpdateDriverRequest {
    pub fn into_changes(self) -> AppResult<DriverChanges> {
        self.validate()?;
        Ok(DriverChanges {
            name: self.name,
            phone: self.phone,
            license_number: self.license_number,
        })
    }
}

// Response de creación
#[derive(Debug, Serialize)]
pub struct CreateDriverResponse {
    pub driver: Driver,
}
