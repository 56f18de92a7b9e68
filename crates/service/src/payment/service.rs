use std::sync::Arc;

use models::ids::IdKind;
use models::payment::Detail;
use models::validation::{self, required_fields};
use tracing::{info, instrument};

use super::domain::{PaymentFields, PaymentInput, RevenueTotal};
use super::repository::PaymentRepository;
use crate::errors::ServiceError;
use crate::service_record::ServiceRecordRepository;
use crate::store;

pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    records: Arc<dyn ServiceRecordRepository>,
}

impl PaymentService {
    pub fn new(payments: Arc<dyn PaymentRepository>, records: Arc<dyn ServiceRecordRepository>) -> Self {
        Self { payments, records }
    }

    pub async fn list(&self) -> Result<Vec<Detail>, ServiceError> {
        self.payments.list().await
    }

    pub async fn get(&self, payment_number: &str) -> Result<Detail, ServiceError> {
        validation::custom_id(payment_number, IdKind::Payment)?;
        self.payments.get(payment_number).await?.ok_or_else(|| ServiceError::not_found("Payment"))
    }

    pub async fn by_record(&self, record_number: &str) -> Result<Vec<Detail>, ServiceError> {
        validation::custom_id(record_number, IdKind::Record)?;
        self.payments.by_record(record_number).await
    }

    pub async fn by_date_range(&self, start: &str, end: &str) -> Result<Vec<Detail>, ServiceError> {
        let (start, end) = validation::date_range(start, end)?;
        self.payments.by_date_range(start, end).await
    }

    pub async fn revenue_between(&self, start: &str, end: &str) -> Result<RevenueTotal, ServiceError> {
        let (start, end) = validation::date_range(start, end)?;
        let total_revenue = self.payments.revenue_between(start, end).await?;
        Ok(RevenueTotal { total_revenue })
    }

    #[instrument(skip(self, input), fields(record_number = ?input.record_number))]
    pub async fn create(&self, input: PaymentInput) -> Result<Detail, ServiceError> {
        let fields = self.validate(&input).await?;
        let created = store::insert_with_id(IdKind::Payment, |id| self.payments.insert(id, fields.clone()))
            .await
            .map_err(|e| e.on_referential("Service record not found"))?;
        info!(payment_number = %created.payment_number, amount = created.amount_paid, "payment_created");
        self.payments
            .get(&created.payment_number)
            .await?
            .ok_or_else(|| ServiceError::not_found("Payment"))
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, payment_number: &str, input: PaymentInput) -> Result<Detail, ServiceError> {
        validation::custom_id(payment_number, IdKind::Payment)?;
        let fields = self.validate(&input).await?;
        if !self.payments.exists(payment_number).await? || !self.payments.update(payment_number, fields).await? {
            return Err(ServiceError::not_found("Payment"));
        }
        info!(%payment_number, "payment_updated");
        self.get(payment_number).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, payment_number: &str) -> Result<(), ServiceError> {
        validation::custom_id(payment_number, IdKind::Payment)?;
        if !self.payments.exists(payment_number).await? || !self.payments.delete(payment_number).await? {
            return Err(ServiceError::not_found("Payment"));
        }
        info!(%payment_number, "payment_deleted");
        Ok(())
    }

    async fn validate(&self, input: &PaymentInput) -> Result<PaymentFields, ServiceError> {
        required_fields(&[
            ("amountPaid", input.amount_paid.as_deref()),
            ("paymentDate", input.payment_date.as_deref()),
            ("recordNumber", input.record_number.as_deref()),
        ])?;
        let amount_paid = validation::amount(input.amount_paid.as_deref().unwrap_or_default())?;
        let payment_date = validation::date(input.payment_date.as_deref().unwrap_or_default())?;
        let record_number = input.record_number.clone().unwrap_or_default();
        validation::custom_id(&record_number, IdKind::Record)?;
        if !self.records.exists(&record_number).await? {
            return Err(ServiceError::referential("Service record"));
        }
        Ok(PaymentFields { amount_paid, payment_date, record_number })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::SeaOrmPaymentRepository;
    use crate::service_record::service::tests::{car, fixture, package, record, Fixture};
    use crate::service_record::SeaOrmServiceRecordRepository;

    fn payments(f: &Fixture) -> PaymentService {
        PaymentService::new(
            Arc::new(SeaOrmPaymentRepository::from(f.db.clone())),
            Arc::new(SeaOrmServiceRecordRepository::from(f.db.clone())),
        )
    }

    fn pay(amount: &str, date: &str, record_number: &str) -> PaymentInput {
        PaymentInput {
            amount_paid: Some(amount.into()),
            payment_date: Some(date.into()),
            record_number: Some(record_number.into()),
        }
    }

    async fn one_record(f: &Fixture) -> Result<String, anyhow::Error> {
        f.cars.create(car("RAD123A")).await?;
        let pkg = f.packages.create(package("Basic", "5000")).await?;
        Ok(f.records.create(record("2024-01-10", "RAD123A", &pkg.package_number)).await?.record_number)
    }

    #[tokio::test]
    async fn payment_for_existing_record_counts_as_revenue() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let svc = payments(&f);
        let rc = one_record(&f).await?;

        let paid = svc.create(pay("5000", "2024-01-10", &rc)).await?;
        assert!(models::ids::matches(&paid.payment_number, IdKind::Payment));
        assert_eq!(paid.plate_number, "RAD123A");
        assert_eq!(paid.package_name, "Basic");
        assert_eq!(svc.revenue_between("2024-01-01", "2024-01-31").await?.total_revenue, 5000.0);
        assert_eq!(svc.revenue_between("2024-02-01", "2024-02-28").await?.total_revenue, 0.0);
        assert_eq!(svc.by_record(&rc).await?.len(), 1);
        assert_eq!(svc.by_date_range("2024-01-10", "2024-01-10").await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_record_is_referential() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let svc = payments(&f);
        let err = svc.create(pay("5000", "2024-01-10", "RC-20990101000000000")).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Referential(m) if m == "Service record not found"));
        let err = svc.create(pay("-1", "2024-01-10", "RC-20990101000000000")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_delete_and_record_cascade() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let svc = payments(&f);
        let rc = one_record(&f).await?;
        let first = svc.create(pay("3000", "2024-01-10", &rc)).await?;
        svc.create(pay("2000", "2024-01-11", &rc)).await?;

        let updated = svc.update(&first.payment_number, pay("3500", "2024-01-12", &rc)).await?;
        assert_eq!(updated.amount_paid, 3500.0);
        assert_eq!(svc.revenue_between("2024-01-01", "2024-01-31").await?.total_revenue, 5500.0);

        svc.delete(&first.payment_number).await?;
        let err = svc.get(&first.payment_number).await.unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == "Payment not found"));

        f.records.delete(&rc).await?;
        assert!(svc.list().await?.is_empty());
        Ok(())
    }
}
