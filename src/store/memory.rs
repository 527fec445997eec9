//! In-memory reference implementation of the [`Store`] trait.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CalculationStatus, Engineer, EngineerBalance, Order, Organization, PayrollCalculation,
    RateOverride, SalaryPayment, WorkSession,
};

use super::Store;

#[derive(Debug, Default)]
struct Tables {
    engineers: HashMap<Uuid, Engineer>,
    organizations: HashMap<Uuid, Organization>,
    rate_overrides: HashMap<Uuid, RateOverride>,
    sessions: HashMap<Uuid, WorkSession>,
    calculations: HashMap<Uuid, PayrollCalculation>,
    payments: HashMap<Uuid, SalaryPayment>,
    balances: HashMap<Uuid, EngineerBalance>,
    orders: HashMap<Uuid, Order>,
}

/// Arena-style in-memory store, one id-keyed table per entity.
///
/// Each trait method takes the lock once, so individual reads and writes
/// are consistent. Intended for tests and single-process wiring; a real
/// deployment substitutes a transactional relational implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an engineer.
    pub fn insert_engineer(&self, engineer: Engineer) {
        self.tables
            .write()
            .expect("store lock poisoned")
            .engineers
            .insert(engineer.id, engineer);
    }

    /// Seeds an organization.
    pub fn insert_organization(&self, organization: Organization) {
        self.tables
            .write()
            .expect("store lock poisoned")
            .organizations
            .insert(organization.id, organization);
    }

    /// Seeds a rate override, replacing any previous override for the same
    /// engineer/organization pair to preserve pair uniqueness.
    pub fn insert_rate_override(&self, override_row: RateOverride) {
        let mut tables = self.tables.write().expect("store lock poisoned");
        tables.rate_overrides.retain(|_, existing| {
            existing.engineer_id != override_row.engineer_id
                || existing.organization_id != override_row.organization_id
        });
        tables
            .rate_overrides
            .insert(override_row.id, override_row);
    }

    /// Removes the override for a pair, if present.
    pub fn remove_rate_override(&self, engineer_id: Uuid, organization_id: Uuid) {
        self.tables
            .write()
            .expect("store lock poisoned")
            .rate_overrides
            .retain(|_, existing| {
                existing.engineer_id != engineer_id
                    || existing.organization_id != organization_id
            });
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().expect("store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().expect("store lock poisoned")
    }
}

impl Store for MemoryStore {
    fn engineer(&self, id: Uuid) -> EngineResult<Engineer> {
        self.read()
            .engineers
            .get(&id)
            .cloned()
            .ok_or(EngineError::EntityNotFound {
                entity: "engineer",
                id,
            })
    }

    fn organization(&self, id: Uuid) -> EngineResult<Organization> {
        self.read()
            .organizations
            .get(&id)
            .cloned()
            .ok_or(EngineError::EntityNotFound {
                entity: "organization",
                id,
            })
    }

    fn active_engineers(&self) -> Vec<Engineer> {
        let mut engineers: Vec<Engineer> = self
            .read()
            .engineers
            .values()
            .filter(|e| e.active)
            .cloned()
            .collect();
        engineers.sort_by_key(|e| e.id);
        engineers
    }

    fn active_rate_override(
        &self,
        engineer_id: Uuid,
        organization_id: Uuid,
    ) -> Option<RateOverride> {
        self.read()
            .rate_overrides
            .values()
            .find(|o| {
                o.active && o.engineer_id == engineer_id && o.organization_id == organization_id
            })
            .cloned()
    }

    fn insert_session(&self, session: WorkSession) {
        self.write().sessions.insert(session.id, session);
    }

    fn session(&self, id: Uuid) -> EngineResult<WorkSession> {
        self.read()
            .sessions
            .get(&id)
            .cloned()
            .ok_or(EngineError::EntityNotFound {
                entity: "work session",
                id,
            })
    }

    fn replace_session(&self, session: WorkSession) -> EngineResult<()> {
        let mut tables = self.write();
        if !tables.sessions.contains_key(&session.id) {
            return Err(EngineError::EntityNotFound {
                entity: "work session",
                id: session.id,
            });
        }
        tables.sessions.insert(session.id, session);
        Ok(())
    }

    fn eligible_sessions_for_month(
        &self,
        engineer_id: Uuid,
        month: u32,
        year: i32,
    ) -> Vec<WorkSession> {
        use chrono::Datelike;

        let mut sessions: Vec<WorkSession> = self
            .read()
            .sessions
            .values()
            .filter(|s| {
                s.invoicing_eligible
                    && s.engineer_id == engineer_id
                    && s.work_date.month() == month
                    && s.work_date.year() == year
            })
            .cloned()
            .collect();
        sessions.sort_by_key(|s| (s.work_date, s.id));
        sessions
    }

    fn upsert_calculation(&self, calculation: PayrollCalculation) {
        let mut tables = self.write();
        tables.calculations.retain(|_, existing| {
            existing.engineer_id != calculation.engineer_id
                || existing.month != calculation.month
                || existing.year != calculation.year
                || existing.id == calculation.id
        });
        tables.calculations.insert(calculation.id, calculation);
    }

    fn calculation(&self, id: Uuid) -> EngineResult<PayrollCalculation> {
        self.read()
            .calculations
            .get(&id)
            .cloned()
            .ok_or(EngineError::EntityNotFound {
                entity: "calculation",
                id,
            })
    }

    fn calculation_for_month(
        &self,
        engineer_id: Uuid,
        month: u32,
        year: i32,
    ) -> Option<PayrollCalculation> {
        self.read()
            .calculations
            .values()
            .find(|c| c.engineer_id == engineer_id && c.month == month && c.year == year)
            .cloned()
    }

    fn calculations_for_engineer(&self, engineer_id: Uuid) -> Vec<PayrollCalculation> {
        let mut calculations: Vec<PayrollCalculation> = self
            .read()
            .calculations
            .values()
            .filter(|c| c.engineer_id == engineer_id)
            .cloned()
            .collect();
        calculations.sort_by_key(|c| (c.year, c.month));
        calculations
    }

    fn set_calculation_status(&self, id: Uuid, status: CalculationStatus) -> EngineResult<()> {
        let mut tables = self.write();
        match tables.calculations.get_mut(&id) {
            Some(calculation) => {
                calculation.status = status;
                Ok(())
            }
            None => Err(EngineError::EntityNotFound {
                entity: "calculation",
                id,
            }),
        }
    }

    fn insert_payment(&self, payment: SalaryPayment) {
        self.write().payments.insert(payment.id, payment);
    }

    fn payment(&self, id: Uuid) -> EngineResult<SalaryPayment> {
        self.read()
            .payments
            .get(&id)
            .cloned()
            .ok_or(EngineError::EntityNotFound {
                entity: "payment",
                id,
            })
    }

    fn replace_payment(&self, payment: SalaryPayment) -> EngineResult<()> {
        let mut tables = self.write();
        if !tables.payments.contains_key(&payment.id) {
            return Err(EngineError::EntityNotFound {
                entity: "payment",
                id: payment.id,
            });
        }
        tables.payments.insert(payment.id, payment);
        Ok(())
    }

    fn remove_payment(&self, id: Uuid) -> EngineResult<SalaryPayment> {
        self.write()
            .payments
            .remove(&id)
            .ok_or(EngineError::EntityNotFound {
                entity: "payment",
                id,
            })
    }

    fn payments_for_calculation(&self, calculation_id: Uuid) -> Vec<SalaryPayment> {
        let mut payments: Vec<SalaryPayment> = self
            .read()
            .payments
            .values()
            .filter(|p| p.calculation_id == Some(calculation_id))
            .cloned()
            .collect();
        payments.sort_by_key(|p| (p.payment_date, p.id));
        payments
    }

    fn payments_for_engineer(&self, engineer_id: Uuid) -> Vec<SalaryPayment> {
        let mut payments: Vec<SalaryPayment> = self
            .read()
            .payments
            .values()
            .filter(|p| p.engineer_id == engineer_id)
            .cloned()
            .collect();
        payments.sort_by_key(|p| (p.payment_date, p.id));
        payments
    }

    fn balance(&self, engineer_id: Uuid) -> Option<EngineerBalance> {
        self.read().balances.get(&engineer_id).cloned()
    }

    fn save_balance(&self, balance: EngineerBalance) {
        self.write().balances.insert(balance.engineer_id, balance);
    }

    fn insert_order(&self, order: Order) {
        self.write().orders.insert(order.id, order);
    }

    fn order(&self, id: Uuid) -> EngineResult<Order> {
        self.read()
            .orders
            .get(&id)
            .cloned()
            .ok_or(EngineError::EntityNotFound {
                entity: "order",
                id,
            })
    }

    fn replace_order(&self, order: Order) -> EngineResult<()> {
        let mut tables = self.write();
        if !tables.orders.contains_key(&order.id) {
            return Err(EngineError::EntityNotFound {
                entity: "order",
                id: order.id,
            });
        }
        tables.orders.insert(order.id, order);
        Ok(())
    }

    fn in_flight_order_count(&self, engineer_id: Uuid) -> usize {
        self.read()
            .orders
            .values()
            .filter(|o| o.engineer_id == Some(engineer_id) && o.status.is_in_flight())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EngineerCategory, OrderStatus};
    use rust_decimal::Decimal;

    fn create_test_engineer(active: bool) -> Engineer {
        Engineer {
            id: Uuid::new_v4(),
            name: "Test Engineer".to_string(),
            email: "test@example.com".to_string(),
            category: EngineerCategory::Staff,
            base_rate: Decimal::from(700),
            overtime_rate: Some(Decimal::from(900)),
            planned_hours: Decimal::from(160),
            home_transport_amount: Decimal::from(350),
            fixed_salary: Decimal::ZERO,
            monthly_car_allowance: Decimal::ZERO,
            active,
        }
    }

    #[test]
    fn test_engineer_lookup_and_not_found() {
        let store = MemoryStore::new();
        let engineer = create_test_engineer(true);
        let id = engineer.id;
        store.insert_engineer(engineer);

        assert_eq!(store.engineer(id).unwrap().id, id);
        match store.engineer(Uuid::new_v4()).unwrap_err() {
            EngineError::EntityNotFound { entity, .. } => assert_eq!(entity, "engineer"),
            other => panic!("Expected EntityNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_active_engineers_excludes_deactivated() {
        let store = MemoryStore::new();
        store.insert_engineer(create_test_engineer(true));
        store.insert_engineer(create_test_engineer(false));

        assert_eq!(store.active_engineers().len(), 1);
    }

    #[test]
    fn test_rate_override_pair_uniqueness() {
        let store = MemoryStore::new();
        let engineer_id = Uuid::new_v4();
        let organization_id = Uuid::new_v4();

        let mut first = RateOverride::empty(engineer_id, organization_id);
        first.base_rate = Some(Decimal::from(750));
        store.insert_rate_override(first);

        let mut second = RateOverride::empty(engineer_id, organization_id);
        second.base_rate = Some(Decimal::from(800));
        store.insert_rate_override(second);

        let found = store
            .active_rate_override(engineer_id, organization_id)
            .unwrap();
        assert_eq!(found.base_rate, Some(Decimal::from(800)));
    }

    #[test]
    fn test_inactive_override_is_not_returned() {
        let store = MemoryStore::new();
        let engineer_id = Uuid::new_v4();
        let organization_id = Uuid::new_v4();

        let mut override_row = RateOverride::empty(engineer_id, organization_id);
        override_row.active = false;
        store.insert_rate_override(override_row);

        assert!(
            store
                .active_rate_override(engineer_id, organization_id)
                .is_none()
        );
    }

    #[test]
    fn test_upsert_calculation_replaces_month_row() {
        let store = MemoryStore::new();
        let engineer_id = Uuid::new_v4();

        let first = PayrollCalculation {
            id: Uuid::new_v4(),
            engineer_id,
            month: 5,
            year: 2026,
            planned_hours: Decimal::from(160),
            actual_hours: Decimal::from(100),
            overtime_hours: Decimal::ZERO,
            base_amount: Decimal::from(70_000),
            overtime_amount: Decimal::ZERO,
            bonus_amount: Decimal::ZERO,
            car_amount: Decimal::ZERO,
            earned_amount: Decimal::from(70_000),
            base_salary_paid: Decimal::from(70_000),
            total_payable: Decimal::from(70_000),
            client_revenue: Decimal::from(100_000),
            profit_margin: Decimal::from(30_000),
            status: CalculationStatus::Calculated,
        };
        let mut second = first.clone();
        second.id = Uuid::new_v4();
        second.base_amount = Decimal::from(80_000);

        store.upsert_calculation(first);
        store.upsert_calculation(second.clone());

        let found = store.calculation_for_month(engineer_id, 5, 2026).unwrap();
        assert_eq!(found.id, second.id);
        assert_eq!(found.base_amount, Decimal::from(80_000));
        assert_eq!(store.calculations_for_engineer(engineer_id).len(), 1);
    }

    #[test]
    fn test_in_flight_order_count_ignores_done_orders() {
        let store = MemoryStore::new();
        let engineer_id = Uuid::new_v4();
        let organization_id = Uuid::new_v4();

        for status in [OrderStatus::Processing, OrderStatus::Working, OrderStatus::Done] {
            store.insert_order(Order {
                id: Uuid::new_v4(),
                title: "install".to_string(),
                organization_id,
                status,
                engineer_id: Some(engineer_id),
            });
        }

        assert_eq!(store.in_flight_order_count(engineer_id), 2);
    }

    #[test]
    fn test_remove_payment_returns_row() {
        let store = MemoryStore::new();
        let payment = SalaryPayment {
            id: Uuid::new_v4(),
            engineer_id: Uuid::new_v4(),
            amount: Decimal::from(10_000),
            payment_type: crate::models::PaymentType::Advance,
            method: crate::models::PaymentMethod::Cash,
            status: crate::models::PaymentStatus::Completed,
            payment_date: chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            calculation_id: None,
            month: Some(5),
            year: Some(2026),
        };
        let id = payment.id;
        store.insert_payment(payment);

        let removed = store.remove_payment(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.payment(id).is_err());
    }
}
