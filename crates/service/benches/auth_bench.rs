use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use models::ids::IdKind;
use models::validation;
use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::repository::mock::MockAuthRepository;
use service::auth::{AuthConfig, AuthService};

fn bench_login(c: &mut Criterion) {
    let repo = Arc::new(MockAuthRepository::default());
    let svc = AuthService::new(repo, AuthConfig::default());

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(svc.register(RegisterInput {
        username: Some("bench".into()),
        password: Some("Benchmark1".into()),
        confirm_password: Some("Benchmark1".into()),
    }))
    .unwrap();

    c.bench_function("auth_login_verify", |b| {
        b.to_async(&rt).iter(|| async {
            svc.login(LoginInput { username: Some("bench".into()), password: Some("Benchmark1".into()) })
                .await
                .unwrap()
        });
    });
}

fn bench_validators(c: &mut Criterion) {
    c.bench_function("validate_car_fields", |b| {
        b.iter(|| {
            validation::plate_number(black_box("RAD123A")).unwrap();
            validation::car_type(black_box("SUV")).unwrap();
            validation::car_size(black_box("Extra Large")).unwrap();
            validation::phone_number(black_box(Some("+250 (788) 123-456"))).unwrap();
        });
    });
    c.bench_function("validate_payment_fields", |b| {
        b.iter(|| {
            validation::amount(black_box("5000.50")).unwrap();
            validation::date(black_box("2024-01-10T08:30:00Z")).unwrap();
            validation::custom_id(black_box("RC-20240110083000123"), IdKind::Record).unwrap();
        });
    });
}

criterion_group!(benches, bench_login, bench_validators);
criterion_main!(benches);
