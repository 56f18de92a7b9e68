use std::sync::Arc;

use models::ids::IdKind;
use models::package;
use models::validation::{self, required_fields};
use tracing::{info, instrument};

use super::domain::{PackageFields, PackageInput};
use super::repository::PackageRepository;
use crate::errors::ServiceError;
use crate::store;

pub struct PackageService {
    repo: Arc<dyn PackageRepository>,
}

impl PackageService {
    pub fn new(repo: Arc<dyn PackageRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<package::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, package_number: &str) -> Result<package::Model, ServiceError> {
        validation::custom_id(package_number, IdKind::Package)?;
        self.repo.get(package_number).await?.ok_or_else(|| ServiceError::not_found("Package"))
    }

    pub async fn search(&self, term: &str) -> Result<Vec<package::Model>, ServiceError> {
        self.repo.search(term).await
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: PackageInput) -> Result<package::Model, ServiceError> {
        let fields = validate(&input)?;
        let created = store::insert_with_id(IdKind::Package, |id| self.repo.insert(id, fields.clone())).await?;
        info!(package_number = %created.package_number, price = created.package_price, "package_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, package_number: &str, input: PackageInput) -> Result<package::Model, ServiceError> {
        validation::custom_id(package_number, IdKind::Package)?;
        let fields = validate(&input)?;
        if self.repo.get(package_number).await?.is_none() {
            return Err(ServiceError::not_found("Package"));
        }
        let updated = self
            .repo
            .update(package_number, fields)
            .await?
            .ok_or_else(|| ServiceError::not_found("Package"))?;
        info!(%package_number, "package_updated");
        Ok(updated)
    }

    /// Deletes the package, every service record using it and their payments.
    #[instrument(skip(self))]
    pub async fn delete(&self, package_number: &str) -> Result<(), ServiceError> {
        validation::custom_id(package_number, IdKind::Package)?;
        if self.repo.get(package_number).await?.is_none() || !self.repo.delete(package_number).await? {
            return Err(ServiceError::not_found("Package"));
        }
        info!(%package_number, "package_deleted");
        Ok(())
    }
}

fn validate(input: &PackageInput) -> Result<PackageFields, ServiceError> {
    required_fields(&[
        ("packageName", input.package_name.as_deref()),
        ("packagePrice", input.package_price.as_deref()),
    ])?;
    let package_name = input.package_name.clone().unwrap_or_default();
    validation::non_blank(&package_name, "Package name is required")?;
    let package_price = validation::amount(input.package_price.as_deref().unwrap_or_default())?;
    Ok(PackageFields {
        package_name,
        package_description: input.package_description.clone().unwrap_or_default(),
        package_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::SeaOrmPackageRepository;
    use crate::test_support::get_db;
    use models::ids;

    async fn service() -> Result<PackageService, anyhow::Error> {
        let db = get_db().await?;
        Ok(PackageService::new(Arc::new(SeaOrmPackageRepository::from(db))))
    }

    fn basic() -> PackageInput {
        PackageInput {
            package_name: Some("Basic Wash".into()),
            package_description: None,
            package_price: Some("5000".into()),
        }
    }

    #[tokio::test]
    async fn create_generates_id_and_defaults_description() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let created = svc.create(basic()).await?;
        assert!(ids::matches(&created.package_number, IdKind::Package));
        assert_eq!(created.package_description, "");
        assert_eq!(created.package_price, 5000.0);
        assert_eq!(svc.get(&created.package_number).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn back_to_back_creates_get_distinct_ids() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let a = svc.create(basic()).await?;
        let b = svc.create(basic()).await?;
        assert_ne!(a.package_number, b.package_number);
        assert_eq!(svc.list().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn rejects_bad_price_and_blank_name() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        for price in ["0", "-10", "abc"] {
            let mut input = basic();
            input.package_price = Some(price.into());
            let err = svc.create(input).await.unwrap_err();
            assert_eq!(err.public_message(), "Amount must be a positive number");
        }
        let mut input = basic();
        input.package_name = Some("  ".into());
        assert_eq!(svc.create(input).await.unwrap_err().public_message(), "Package name is required");

        let err = svc.create(PackageInput::default()).await.unwrap_err();
        assert_eq!(err.public_message(), "Missing required fields: packageName, packagePrice");
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn path_keys_are_format_checked_first() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let err = svc.get("PK-1").await.unwrap_err();
        assert!(matches!(&err, ServiceError::Validation(m) if m == "Invalid Package ID format"));
        let err = svc.delete("RC-20240101120000000").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let err = svc.get("PK-20240101120000000").await.unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == "Package not found"));
        Ok(())
    }

    #[tokio::test]
    async fn update_search_and_delete() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let created = svc.create(basic()).await?;
        let updated = svc
            .update(
                &created.package_number,
                PackageInput {
                    package_name: Some("Premium".into()),
                    package_description: Some("Full interior and WAX".into()),
                    package_price: Some("12000.5".into()),
                },
            )
            .await?;
        assert_eq!(updated.package_price, 12000.5);
        assert_eq!(svc.search("wax").await?.len(), 1);
        assert_eq!(svc.search("premium").await?.len(), 1);
        assert!(svc.search("basic").await?.is_empty());

        svc.delete(&created.package_number).await?;
        assert!(matches!(svc.get(&created.package_number).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
