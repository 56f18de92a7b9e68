use std::sync::Arc;

use models::car;
use models::validation::{self, required_fields};
use tracing::{info, instrument};

use super::domain::{CarFields, CarInput, NewCar};
use super::repository::CarRepository;
use crate::errors::ServiceError;

const DUPLICATE_PLATE: &str = "Car with this plate number already exists";

pub struct CarService {
    repo: Arc<dyn CarRepository>,
}

impl CarService {
    pub fn new(repo: Arc<dyn CarRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<car::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, plate_number: &str) -> Result<car::Model, ServiceError> {
        self.repo.get(plate_number).await?.ok_or_else(|| ServiceError::not_found("Car"))
    }

    pub async fn search(&self, term: &str) -> Result<Vec<car::Model>, ServiceError> {
        self.repo.search(term).await
    }

    /// Validate and register a car; the plate must not be taken.
    ///
    /// The pre-check only improves the message: the primary key still
    /// rejects a concurrent duplicate.
    #[instrument(skip(self, input), fields(plate_number = ?input.plate_number))]
    pub async fn create(&self, input: CarInput) -> Result<car::Model, ServiceError> {
        required_fields(&[
            ("plateNumber", input.plate_number.as_deref()),
            ("carType", input.car_type.as_deref()),
            ("carSize", input.car_size.as_deref()),
            ("driverName", input.driver_name.as_deref()),
            ("phoneNumber", input.phone_number.as_deref()),
        ])?;
        let plate_number = input.plate_number.clone().unwrap_or_default();
        validation::plate_number(&plate_number)?;
        let fields = validate_fields(&input)?;

        if self.repo.get(&plate_number).await?.is_some() {
            return Err(ServiceError::Conflict(DUPLICATE_PLATE.into()));
        }
        let created = self
            .repo
            .insert(NewCar { plate_number, fields })
            .await
            .map_err(|e| e.on_conflict(DUPLICATE_PLATE))?;
        info!(plate_number = %created.plate_number, car_type = created.car_type.as_str(), "car_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, plate_number: &str, input: CarInput) -> Result<car::Model, ServiceError> {
        required_fields(&[
            ("carType", input.car_type.as_deref()),
            ("carSize", input.car_size.as_deref()),
            ("driverName", input.driver_name.as_deref()),
            ("phoneNumber", input.phone_number.as_deref()),
        ])?;
        let fields = validate_fields(&input)?;

        if self.repo.get(plate_number).await?.is_none() {
            return Err(ServiceError::not_found("Car"));
        }
        let updated = self
            .repo
            .update(plate_number, fields)
            .await?
            .ok_or_else(|| ServiceError::not_found("Car"))?;
        info!(%plate_number, "car_updated");
        Ok(updated)
    }

    /// Deletes the car together with its service records and payments.
    #[instrument(skip(self))]
    pub async fn delete(&self, plate_number: &str) -> Result<(), ServiceError> {
        if self.repo.get(plate_number).await?.is_none() {
            return Err(ServiceError::not_found("Car"));
        }
        if !self.repo.delete(plate_number).await? {
            return Err(ServiceError::not_found("Car"));
        }
        info!(%plate_number, "car_deleted");
        Ok(())
    }
}

fn validate_fields(input: &CarInput) -> Result<CarFields, ServiceError> {
    let car_type = validation::car_type(input.car_type.as_deref().unwrap_or_default())?;
    let car_size = validation::car_size(input.car_size.as_deref().unwrap_or_default())?;
    validation::phone_number(input.phone_number.as_deref())?;
    let driver_name = input.driver_name.clone().unwrap_or_default();
    validation::non_blank(&driver_name, "Driver name is required")?;
    Ok(CarFields {
        car_type,
        car_size,
        driver_name,
        phone_number: input.phone_number.clone().unwrap_or_default(),
    })
}
