use std::sync::Arc;
use std::time::Duration;

use configs::AppConfig;
use sea_orm::DatabaseConnection;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::{AuthConfig, AuthService};
use service::car::{CarService, SeaOrmCarRepository};
use service::dashboard::{DashboardService, SeaOrmDashboardRepository};
use service::package::{PackageService, SeaOrmPackageRepository};
use service::payment::{PaymentService, SeaOrmPaymentRepository};
use service::service_record::{SeaOrmServiceRecordRepository, ServiceRecordService};

/// Shared handler state: one service per entity over a single pool.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub cars: Arc<CarService>,
    pub packages: Arc<PackageService>,
    pub records: Arc<ServiceRecordService>,
    pub payments: Arc<PaymentService>,
    pub dashboard: Arc<DashboardService>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &AppConfig) -> Self {
        let timeout = Duration::from_millis(cfg.database.query_timeout_ms);
        let auth_cfg = AuthConfig {
            min_username_len: cfg.auth.min_username_len,
            min_password_len: cfg.auth.min_password_len,
        };

        let car_repo = Arc::new(SeaOrmCarRepository::new(db.clone(), timeout));
        let package_repo = Arc::new(SeaOrmPackageRepository::new(db.clone(), timeout));
        let record_repo = Arc::new(SeaOrmServiceRecordRepository::new(db.clone(), timeout));
        let payment_repo = Arc::new(SeaOrmPaymentRepository::new(db.clone(), timeout));
        let dashboard_repo = Arc::new(SeaOrmDashboardRepository::new(db.clone(), timeout));
        let auth_repo = Arc::new(SeaOrmAuthRepository::new(db.clone()).with_timeout(timeout));

        Self {
            auth: Arc::new(AuthService::new(auth_repo, auth_cfg)),
            cars: Arc::new(CarService::new(car_repo.clone())),
            packages: Arc::new(PackageService::new(package_repo.clone())),
            records: Arc::new(ServiceRecordService::new(record_repo.clone(), car_repo, package_repo)),
            payments: Arc::new(PaymentService::new(payment_repo, record_repo)),
            dashboard: Arc::new(DashboardService::new(dashboard_repo)),
            db,
        }
    }
}
