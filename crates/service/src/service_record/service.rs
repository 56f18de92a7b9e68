use std::sync::Arc;

use models::ids::IdKind;
use models::service_record::Detail;
use models::validation::{self, required_fields};
use tracing::{info, instrument};

use super::domain::{ServiceRecordFields, ServiceRecordInput};
use super::repository::ServiceRecordRepository;
use crate::car::CarRepository;
use crate::errors::ServiceError;
use crate::package::PackageRepository;
use crate::store;

/// Records reference a car and a package, both checked before every write.
pub struct ServiceRecordService {
    records: Arc<dyn ServiceRecordRepository>,
    cars: Arc<dyn CarRepository>,
    packages: Arc<dyn PackageRepository>,
}

impl ServiceRecordService {
    pub fn new(
        records: Arc<dyn ServiceRecordRepository>,
        cars: Arc<dyn CarRepository>,
        packages: Arc<dyn PackageRepository>,
    ) -> Self {
        Self { records, cars, packages }
    }

    pub async fn list(&self) -> Result<Vec<Detail>, ServiceError> {
        self.records.list().await
    }

    pub async fn get(&self, record_number: &str) -> Result<Detail, ServiceError> {
        validation::custom_id(record_number, IdKind::Record)?;
        self.records.get(record_number).await?.ok_or_else(|| ServiceError::not_found("Service record"))
    }

    pub async fn by_car(&self, plate_number: &str) -> Result<Vec<Detail>, ServiceError> {
        self.records.by_car(plate_number).await
    }

    pub async fn by_date_range(&self, start: &str, end: &str) -> Result<Vec<Detail>, ServiceError> {
        let (start, end) = validation::date_range(start, end)?;
        self.records.by_date_range(start, end).await
    }

    #[instrument(skip(self, input), fields(plate_number = ?input.plate_number))]
    pub async fn create(&self, input: ServiceRecordInput) -> Result<Detail, ServiceError> {
        let fields = self.validate(&input).await?;
        let created = store::insert_with_id(IdKind::Record, |id| self.records.insert(id, fields.clone()))
            .await
            .map_err(|e| e.on_referential("Car or package not found"))?;
        info!(record_number = %created.record_number, package_number = %created.package_number, "service_record_created");
        self.records
            .get(&created.record_number)
            .await?
            .ok_or_else(|| ServiceError::not_found("Service record"))
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, record_number: &str, input: ServiceRecordInput) -> Result<Detail, ServiceError> {
        validation::custom_id(record_number, IdKind::Record)?;
        let fields = self.validate(&input).await?;
        if !self.records.exists(record_number).await? {
            return Err(ServiceError::not_found("Service record"));
        }
        if !self.records.update(record_number, fields).await? {
            return Err(ServiceError::not_found("Service record"));
        }
        info!(%record_number, "service_record_updated");
        self.get(record_number).await
    }

    /// Deletes the record and its payments.
    #[instrument(skip(self))]
    pub async fn delete(&self, record_number: &str) -> Result<(), ServiceError> {
        validation::custom_id(record_number, IdKind::Record)?;
        if !self.records.exists(record_number).await? || !self.records.delete(record_number).await? {
            return Err(ServiceError::not_found("Service record"));
        }
        info!(%record_number, "service_record_deleted");
        Ok(())
    }

    async fn validate(&self, input: &ServiceRecordInput) -> Result<ServiceRecordFields, ServiceError> {
        required_fields(&[
            ("serviceDate", input.service_date.as_deref()),
            ("plateNumber", input.plate_number.as_deref()),
            ("packageNumber", input.package_number.as_deref()),
        ])?;
        let service_date = validation::date(input.service_date.as_deref().unwrap_or_default())?;
        let plate_number = input.plate_number.clone().unwrap_or_default();
        validation::plate_number(&plate_number)?;
        let package_number = input.package_number.clone().unwrap_or_default();
        validation::custom_id(&package_number, IdKind::Package)?;

        if self.cars.get(&plate_number).await?.is_none() {
            return Err(ServiceError::referential("Car"));
        }
        if self.packages.get(&package_number).await?.is_none() {
            return Err(ServiceError::referential("Package"));
        }
        Ok(ServiceRecordFields { service_date, plate_number, package_number })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::car::domain::CarInput;
    use crate::car::{CarService, SeaOrmCarRepository};
    use crate::package::domain::PackageInput;
    use crate::package::{PackageService, SeaOrmPackageRepository};
    use crate::service_record::SeaOrmServiceRecordRepository;
    use crate::test_support::get_db;
    use chrono::NaiveDate;
    use models::car::CarType;
    use sea_orm::DatabaseConnection;

    pub(crate) struct Fixture {
        pub db: DatabaseConnection,
        pub cars: CarService,
        pub packages: PackageService,
        pub records: ServiceRecordService,
    }

    pub(crate) async fn fixture() -> Result<Fixture, anyhow::Error> {
        let db = get_db().await?;
        let car_repo = Arc::new(SeaOrmCarRepository::from(db.clone()));
        let package_repo = Arc::new(SeaOrmPackageRepository::from(db.clone()));
        let record_repo = Arc::new(SeaOrmServiceRecordRepository::from(db.clone()));
        Ok(Fixture {
            cars: CarService::new(car_repo.clone()),
            packages: PackageService::new(package_repo.clone()),
            records: ServiceRecordService::new(record_repo, car_repo, package_repo),
            db,
        })
    }

    pub(crate) fn car(plate: &str) -> CarInput {
        CarInput {
            plate_number: Some(plate.into()),
            car_type: Some("Sedan".into()),
            car_size: Some("Medium".into()),
            driver_name: Some("Bob".into()),
            phone_number: Some("0788123456".into()),
        }
    }

    pub(crate) fn package(name: &str, price: &str) -> PackageInput {
        PackageInput {
            package_name: Some(name.into()),
            package_description: Some(format!("{name} description")),
            package_price: Some(price.into()),
        }
    }

    pub(crate) fn record(date: &str, plate: &str, package_number: &str) -> ServiceRecordInput {
        ServiceRecordInput {
            service_date: Some(date.into()),
            plate_number: Some(plate.into()),
            package_number: Some(package_number.into()),
        }
    }

    #[tokio::test]
    async fn create_returns_joined_view() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        f.cars.create(car("RAD123A")).await?;
        let pkg = f.packages.create(package("Basic", "5000")).await?;

        let detail = f.records.create(record("2024-01-10", "RAD123A", &pkg.package_number)).await?;
        assert!(models::ids::matches(&detail.record_number, IdKind::Record));
        assert_eq!(detail.service_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(detail.driver_name, "Bob");
        assert_eq!(detail.car_type, CarType::Sedan);
        assert_eq!(detail.package_name, "Basic");
        assert_eq!(detail.package_price, 5000.0);
        assert_eq!(f.records.get(&detail.record_number).await?, detail);
        Ok(())
    }

    #[tokio::test]
    async fn missing_references_insert_nothing() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        f.cars.create(car("RAD123A")).await?;
        let pkg = f.packages.create(package("Basic", "5000")).await?;

        let err = f.records.create(record("2024-01-10", "RAD123A", "PK-20990101000000000")).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Referential(m) if m == "Package not found"));
        let err = f.records.create(record("2024-01-10", "NOCAR1", &pkg.package_number)).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Referential(m) if m == "Car not found"));
        let err = f.records.create(record("2024-01-10", "RAD123A", "basic")).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Validation(m) if m == "Invalid Package ID format"));
        let err = f.records.create(record("10/01/2024", "RAD123A", &pkg.package_number)).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Validation(m) if m == "Invalid date format"));

        assert!(f.records.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn queries_by_car_and_date_range() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        f.cars.create(car("RAD123A")).await?;
        f.cars.create(car("RAB777C")).await?;
        let pkg = f.packages.create(package("Basic", "5000")).await?;
        for (date, plate) in [("2024-01-05", "RAD123A"), ("2024-01-31", "RAB777C"), ("2024-02-01", "RAD123A")] {
            f.records.create(record(date, plate, &pkg.package_number)).await?;
        }

        assert_eq!(f.records.by_car("RAD123A").await?.len(), 2);
        let january = f.records.by_date_range("2024-01-01", "2024-01-31").await?;
        let dates: Vec<String> = january.iter().map(|d| d.service_date.to_string()).collect();
        assert_eq!(dates, ["2024-01-31", "2024-01-05"]);

        let err = f.records.by_date_range("2024-01-01", "soon").await.unwrap_err();
        assert_eq!(err.public_message(), "End date: Invalid date format");
        Ok(())
    }

    #[tokio::test]
    async fn update_rechecks_references() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        f.cars.create(car("RAD123A")).await?;
        f.cars.create(car("RAB777C")).await?;
        let pkg = f.packages.create(package("Basic", "5000")).await?;
        let created = f.records.create(record("2024-01-10", "RAD123A", &pkg.package_number)).await?;

        let moved = f.records.update(&created.record_number, record("2024-01-11", "RAB777C", &pkg.package_number)).await?;
        assert_eq!(moved.plate_number, "RAB777C");
        assert_eq!(moved.record_number, created.record_number);

        let err = f
            .records
            .update(&created.record_number, record("2024-01-11", "GHOST", &pkg.package_number))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Referential(_)));
        let err = f
            .records
            .update("RC-20990101000000000", record("2024-01-11", "RAB777C", &pkg.package_number))
            .await
            .unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == "Service record not found"));
        Ok(())
    }

    #[tokio::test]
    async fn deleted_record_is_gone() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        f.cars.create(car("RAD123A")).await?;
        let pkg = f.packages.create(package("Basic", "5000")).await?;
        let created = f.records.create(record("2024-01-10", "RAD123A", &pkg.package_number)).await?;

        f.records.delete(&created.record_number).await?;
        let err = f.records.get(&created.record_number).await.unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == "Service record not found"));
        let err = f.records.delete(&created.record_number).await.unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == "Service record not found"));
        assert!(f.records.by_car("RAD123A").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn deleting_car_or_package_cascades() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        f.cars.create(car("RAD123A")).await?;
        f.cars.create(car("RAB777C")).await?;
        let basic = f.packages.create(package("Basic", "5000")).await?;
        let premium = f.packages.create(package("Premium", "9000")).await?;
        f.records.create(record("2024-01-10", "RAD123A", &basic.package_number)).await?;
        f.records.create(record("2024-01-10", "RAB777C", &premium.package_number)).await?;

        f.cars.delete("RAD123A").await?;
        let left = f.records.list().await?;
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].plate_number, "RAB777C");

        f.packages.delete(&premium.package_number).await?;
        assert!(f.records.list().await?.is_empty());
        Ok(())
    }
}
