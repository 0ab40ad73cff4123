//! Fixtures compartidos por los tests de servicios

use std::sync::Arc;

use crate::dto::performance_dto::CreatePerformanceRequest;
use crate::dto::route_dto::CreateRouteRequest;
use crate::dto::unit_dto::CreateUnitRequest;
use crate::dto::user_dto::CreateUserRequest;
use crate::models::route::{NewRoute, Route};
use crate::models::unit::Unit;
use crate::models::user::{NewUser, User};
use crate::repositories::{InMemoryStore, Repositories, RouteRepository, UnitRepository, UserRepository};
use crate::services::password_service::{BcryptHasher, PasswordHasher};
use crate::services::{PerformanceService, RouteService, UnitService, UserService};

pub struct Fixture {
    pub repos: Repositories,
    pub users: UserService,
    pub units: UnitService,
    pub routes: RouteService,
    pub performance: PerformanceService,
}

pub fn fixture() -> Fixture {
    let repos = Repositories::in_memory();
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::new(4));
    Fixture {
        users: UserService::new(repos.clone(), hasher),
        units: UnitService::new(repos.clone()),
        routes: RouteService::new(repos.clone()),
        performance: PerformanceService::new(repos.clone()),
        repos,
    }
}

pub fn create_user_request(email: &str) -> CreateUserRequest {
    CreateUserRequest {
        email: email.to_string(),
        username: "driver01".to_string(),
        full_name: "Ana Pérez".to_string(),
        phone: None,
        password: "secreto123".to_string(),
    }
}

pub fn create_unit_request(user_id: i64, license_plate: &str) -> CreateUnitRequest {
    CreateUnitRequest {
        license_plate: license_plate.to_string(),
        brand: "Kenworth".to_string(),
        model: "T680".to_string(),
        year: 2020,
        capacity: 30.0,
        user_id,
    }
}

pub fn create_route_request(unit_id: i64) -> CreateRouteRequest {
    CreateRouteRequest {
        origin: "Monterrey".to_string(),
        destination: "Saltillo".to_string(),
        distance_km: 100.0,
        estimated_time_hours: 2.5,
        unit_id,
    }
}

pub fn create_performance_request(route_id: i64) -> CreatePerformanceRequest {
    CreatePerformanceRequest {
        route_id,
        distance_traveled_km: 100.0,
        fuel_consumed_liters: 10.0,
        actual_time_hours: 2.0,
        notes: None,
    }
}

/// Usuario con unidad creados a través de los servicios
pub async fn seeded_unit(fx: &Fixture) -> Unit {
    let user = fx.users.create(create_user_request("seed@x.com")).await.unwrap();
    fx.units.create(create_unit_request(user.id, "SEED-001")).await.unwrap()
}

pub async fn seed_user(store: &InMemoryStore, email: &str) -> User {
    UserRepository::create(
        store,
        NewUser {
            email: email.to_string(),
            username: "driver01".to_string(),
            full_name: "Ana Pérez".to_string(),
            phone: None,
            hashed_password: "hash".to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_unit(store: &InMemoryStore, user_id: i64, license_plate: &str) -> Unit {
    UnitRepository::create(store, create_unit_request(user_id, license_plate).into())
        .await
        .unwrap()
}

pub async fn seed_route(store: &InMemoryStore, unit_id: i64) -> Route {
    RouteRepository::create(store, NewRoute::from(create_route_request(unit_id)))
        .await
        .unwrap()
}
