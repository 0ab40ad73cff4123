//! Almacenamiento en memoria
//!
//! Implementa los cuatro repositorios sobre mapas protegidos por un único
//! `RwLock`, replicando las restricciones del esquema SQL: unicidad de email,
//! matrícula, `units.user_id` y `performance_records.route_id`, borrado
//! restringido de usuarios y unidades con dependientes, y cascada de
//! rutas hacia su registro de rendimiento.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::performance::{NewPerformanceRecord, PerformanceRecord};
use crate::models::route::{NewRoute, Route, RouteFilter, RouteStatus};
use crate::models::unit::{NewUnit, Unit};
use crate::models::user::{NewUser, User};
use crate::repositories::{
    Page, PerformanceRepository, RouteRepository, UnitRepository, UserRepository,
};
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    units: BTreeMap<i64, Unit>,
    routes: BTreeMap<i64, Route>,
    performance: BTreeMap<i64, PerformanceRecord>,
    last_user_id: i64,
    last_unit_id: i64,
    last_route_id: i64,
    last_performance_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

fn paginate<T: Clone>(items: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    let offset = usize::try_from(page.offset).unwrap_or(0);
    let limit = usize::try_from(page.limit).unwrap_or(0);
    items.skip(offset).take(limit).collect()
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tables {
    fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != exclude_id)
    }

    fn plate_taken(&self, license_plate: &str, exclude_id: Option<i64>) -> bool {
        self.units
            .values()
            .any(|u| u.license_plate == license_plate && Some(u.id) != exclude_id)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(conflict_error("User", "email", &user.email));
        }

        let id = next_id(&mut tables.last_user_id);
        let created = User {
            id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            phone: user.phone,
            hashed_password: user.hashed_password,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        };
        tables.users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        Ok(self.tables.read().await.email_taken(email, exclude_id))
    }

    async fn list(&self, page: Page) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.users.values().cloned(), page))
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(not_found_error("User", user.id));
        }
        if tables.email_taken(&user.email, Some(user.id)) {
            return Err(conflict_error("User", "email", &user.email));
        }

        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.units.values().any(|u| u.user_id == id) {
            return Err(AppError::Conflict(format!(
                "User with id '{}' still has a unit assigned",
                id
            )));
        }
        Ok(tables.users.remove(&id).is_some())
    }
}

#[async_trait]
impl UnitRepository for InMemoryStore {
    async fn create(&self, unit: NewUnit) -> AppResult<Unit> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&unit.user_id) {
            return Err(not_found_error("User", unit.user_id));
        }
        if tables.plate_taken(&unit.license_plate, None) {
            return Err(conflict_error("Unit", "license_plate", &unit.license_plate));
        }
        if tables.units.values().any(|u| u.user_id == unit.user_id) {
            return Err(conflict_error("Unit", "user_id", &unit.user_id.to_string()));
        }

        let id = next_id(&mut tables.last_unit_id);
        let created = Unit {
            id,
            license_plate: unit.license_plate,
            brand: unit.brand,
            model: unit.model,
            year: unit.year,
            capacity: unit.capacity,
            user_id: unit.user_id,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        };
        tables.units.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Unit>> {
        Ok(self.tables.read().await.units.get(&id).cloned())
    }

    async fn license_plate_exists(&self, license_plate: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        Ok(self.tables.read().await.plate_taken(license_plate, exclude_id))
    }

    async fn list(&self, page: Page) -> AppResult<Vec<Unit>> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.units.values().cloned(), page))
    }

    async fn list_by_user(&self, user_id: i64, page: Page) -> AppResult<Vec<Unit>> {
        let tables = self.tables.read().await;
        let owned = tables.units.values().filter(|u| u.user_id == user_id).cloned();
        Ok(paginate(owned, page))
    }

    async fn count_by_user(&self, user_id: i64) -> AppResult<i64> {
        let tables = self.tables.read().await;
        let count = tables.units.values().filter(|u| u.user_id == user_id).count();
        Ok(count as i64)
    }

    async fn update(&self, unit: &Unit) -> AppResult<Unit> {
        let mut tables = self.tables.write().await;
        if !tables.units.contains_key(&unit.id) {
            return Err(not_found_error("Unit", unit.id));
        }
        if tables.plate_taken(&unit.license_plate, Some(unit.id)) {
            return Err(conflict_error("Unit", "license_plate", &unit.license_plate));
        }

        tables.units.insert(unit.id, unit.clone());
        Ok(unit.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.routes.values().any(|r| r.unit_id == id) {
            return Err(AppError::Conflict(format!(
                "Unit with id '{}' still has routes",
                id
            )));
        }
        Ok(tables.units.remove(&id).is_some())
    }
}

#[async_trait]
impl RouteRepository for InMemoryStore {
    async fn create(&self, route: NewRoute) -> AppResult<Route> {
        let mut tables = self.tables.write().await;
        if !tables.units.contains_key(&route.unit_id) {
            return Err(not_found_error("Unit", route.unit_id));
        }

        let id = next_id(&mut tables.last_route_id);
        let now = Utc::now();
        let created = Route {
            id,
            origin: route.origin,
            destination: route.destination,
            distance_km: route.distance_km,
            estimated_time_hours: route.estimated_time_hours,
            status: RouteStatus::Assigned,
            unit_id: route.unit_id,
            assigned_at: now,
            started_at: None,
            completed_at: None,
            created_at: now,
            updated_at: None,
        };
        tables.routes.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Route>> {
        Ok(self.tables.read().await.routes.get(&id).cloned())
    }

    async fn list(&self, filter: RouteFilter, page: Page) -> AppResult<Vec<Route>> {
        let tables = self.tables.read().await;
        let matching = tables
            .routes
            .values()
            .filter(|r| filter.status.map_or(true, |status| r.status == status))
            .filter(|r| filter.unit_id.map_or(true, |unit_id| r.unit_id == unit_id))
            .cloned();
        Ok(paginate(matching, page))
    }

    async fn count_by_unit(&self, unit_id: i64) -> AppResult<i64> {
        let tables = self.tables.read().await;
        let count = tables.routes.values().filter(|r| r.unit_id == unit_id).count();
        Ok(count as i64)
    }

    async fn update(&self, route: &Route) -> AppResult<Route> {
        let mut tables = self.tables.write().await;
        match tables.routes.get_mut(&route.id) {
            Some(stored) => {
                *stored = route.clone();
                Ok(route.clone())
            }
            None => Err(not_found_error("Route", route.id)),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.routes.remove(&id).is_some();
        if removed {
            tables.performance.retain(|_, record| record.route_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl PerformanceRepository for InMemoryStore {
    async fn create(&self, record: NewPerformanceRecord) -> AppResult<PerformanceRecord> {
        let mut tables = self.tables.write().await;
        if !tables.routes.contains_key(&record.route_id) {
            return Err(not_found_error("Route", record.route_id));
        }
        if tables.performance.values().any(|p| p.route_id == record.route_id) {
            return Err(conflict_error(
                "Performance record",
                "route_id",
                &record.route_id.to_string(),
            ));
        }

        let id = next_id(&mut tables.last_performance_id);
        let now = Utc::now();
        let created = PerformanceRecord {
            id,
            route_id: record.route_id,
            distance_traveled_km: record.measurements.distance_traveled_km,
            fuel_consumed_liters: record.measurements.fuel_consumed_liters,
            actual_time_hours: record.measurements.actual_time_hours,
            average_speed_kmh: record.metrics.average_speed_kmh,
            fuel_efficiency_km_per_liter: record.metrics.fuel_efficiency_km_per_liter,
            time_efficiency: record.metrics.time_efficiency,
            efficiency_score: record.metrics.efficiency_score,
            notes: record.notes,
            recorded_at: now,
            created_at: now,
            updated_at: None,
        };
        tables.performance.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<PerformanceRecord>> {
        Ok(self.tables.read().await.performance.get(&id).cloned())
    }

    async fn find_by_route(&self, route_id: i64) -> AppResult<Option<PerformanceRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .performance
            .values()
            .find(|p| p.route_id == route_id)
            .cloned())
    }

    async fn list(&self, page: Page) -> AppResult<Vec<PerformanceRecord>> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.performance.values().cloned(), page))
    }

    async fn update(&self, record: &PerformanceRecord) -> AppResult<PerformanceRecord> {
        let mut tables = self.tables.write().await;
        match tables.performance.get_mut(&record.id) {
            Some(stored) => {
                *stored = record.clone();
                Ok(record.clone())
            }
            None => Err(not_found_error("Performance record", record.id)),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.performance.remove(&id).is_some())
    }
}
