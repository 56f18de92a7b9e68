use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};

use super::setup_test_db;
use crate::car::{CarSize, CarType};
use crate::ids::{self, IdKind};
use crate::{car, package, payment, service_record, user};

async fn seed_visit(db: &DatabaseConnection) -> Result<(car::Model, package::Model, service_record::Model)> {
    let car = car::ActiveModel {
        plate_number: Set("RAD123A".into()),
        car_type: Set(CarType::Suv),
        car_size: Set(CarSize::ExtraLarge),
        driver_name: Set("Bob".into()),
        phone_number: Set("0788123456".into()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;

    let package = package::ActiveModel {
        package_number: Set(ids::generate(IdKind::Package)),
        package_name: Set("Full wash".into()),
        package_description: Set("Interior and exterior".into()),
        package_price: Set(5000.0),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;

    let record = service_record::ActiveModel {
        record_number: Set(ids::generate(IdKind::Record)),
        service_date: Set(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
        plate_number: Set(car.plate_number.clone()),
        package_number: Set(package.package_number.clone()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;

    Ok((car, package, record))
}

#[tokio::test]
async fn test_car_enums_round_trip_through_store() -> Result<()> {
    let db = setup_test_db().await?;
    let (car, _, _) = seed_visit(&db).await?;

    let found = car::Entity::find_by_id(car.plate_number.clone()).one(&db).await?.unwrap();
    assert_eq!(found.car_type, CarType::Suv);
    assert_eq!(found.car_size, CarSize::ExtraLarge);

    let json = serde_json::to_value(&found)?;
    assert_eq!(json["carType"], "SUV");
    assert_eq!(json["carSize"], "Extra Large");
    assert_eq!(json["plateNumber"], "RAD123A");
    Ok(())
}

#[tokio::test]
async fn test_service_record_detail_joins_car_and_package() -> Result<()> {
    let db = setup_test_db().await?;
    let (car, package, record) = seed_visit(&db).await?;

    let details = service_record::find_details()
        .into_model::<service_record::Detail>()
        .all(&db)
        .await?;
    assert_eq!(details.len(), 1);
    let d = &details[0];
    assert_eq!(d.record_number, record.record_number);
    assert_eq!(d.driver_name, car.driver_name);
    assert_eq!(d.car_type, CarType::Suv);
    assert_eq!(d.package_name, package.package_name);
    assert_eq!(d.package_price, 5000.0);
    Ok(())
}

#[tokio::test]
async fn test_payment_detail_joins_through_record() -> Result<()> {
    let db = setup_test_db().await?;
    let (_, _, record) = seed_visit(&db).await?;

    payment::ActiveModel {
        payment_number: Set(ids::generate(IdKind::Payment)),
        amount_paid: Set(5000.0),
        payment_date: Set(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
        record_number: Set(record.record_number.clone()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;

    let details = payment::find_details()
        .filter(payment::Column::RecordNumber.eq(record.record_number.clone()))
        .into_model::<payment::Detail>()
        .all(&db)
        .await?;
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].plate_number, "RAD123A");
    assert_eq!(details[0].service_date, record.service_date);
    Ok(())
}

#[tokio::test]
async fn test_deleting_car_cascades_in_store() -> Result<()> {
    let db = setup_test_db().await?;
    let (car, _, record) = seed_visit(&db).await?;
    payment::ActiveModel {
        payment_number: Set(ids::generate(IdKind::Payment)),
        amount_paid: Set(1500.0),
        payment_date: Set(NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()),
        record_number: Set(record.record_number.clone()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;

    car::Entity::delete_by_id(car.plate_number).exec(&db).await?;

    assert_eq!(service_record::Entity::find().count(&db).await?, 0);
    assert_eq!(payment::Entity::find().count(&db).await?, 0);
    assert_eq!(package::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_record_with_missing_car_is_rejected_by_store() -> Result<()> {
    let db = setup_test_db().await?;
    let (_, package, _) = seed_visit(&db).await?;

    let res = service_record::ActiveModel {
        record_number: Set("RC-20240101000000000".into()),
        service_date: Set(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
        plate_number: Set("NOPE".into()),
        package_number: Set(package.package_number),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await;
    assert!(res.is_err());
    assert_eq!(service_record::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_user_helpers() -> Result<()> {
    let db = setup_test_db().await?;
    let first = user::create(&db, "alice", "hash-a").await?;
    let second = user::create(&db, "carol", "hash-c").await?;

    let found = user::find_by_username(&db, "alice").await?.unwrap();
    assert_eq!(found.id, first.id);
    assert!(user::find_by_username(&db, "nobody").await?.is_none());

    let all = user::list(&db).await?;
    assert_eq!(all.iter().map(|u| u.id).collect::<Vec<_>>(), vec![second.id, first.id]);

    let json = serde_json::to_value(&found)?;
    assert!(json.get("password_hash").is_none());

    assert!(user::create(&db, "alice", "again").await.is_err());
    Ok(())
}
