use tracing::{debug, info, warn};

use stockroom_core::{DomainError, DomainResult, ProductId};

use crate::entry::{StockChange, StockEntry, StockPlan, StockWrite};
use crate::store::StockStore;

/// Upper bound on compare-and-swap attempts for a single operation.
///
/// Each failed attempt means another writer committed in between, so this only
/// runs out under sustained contention on one product.
pub const MAX_WRITE_ATTEMPTS: usize = 1_000;

/// Run `attempt` until it stops failing with `Conflict`.
///
/// Any other error is returned immediately. After [`MAX_WRITE_ATTEMPTS`]
/// conflicts the last conflict is returned.
pub fn retry_on_conflict<T>(
    product_id: ProductId,
    mut attempt: impl FnMut() -> DomainResult<T>,
) -> DomainResult<T> {
    let mut last = None;
    for n in 1..=MAX_WRITE_ATTEMPTS {
        match attempt() {
            Err(err) if err.is_conflict() => {
                debug!(product_id = %product_id, attempt = n, "stock write conflicted; retrying");
                last = Some(err);
                std::thread::yield_now();
            }
            other => return other,
        }
    }
    Err(last.unwrap_or_else(|| DomainError::conflict("stock write retries exhausted")))
}

/// Stock ledger service.
///
/// Product ids are not checked against the catalog; writing stock for an
/// unknown id creates an entry for it.
#[derive(Debug, Clone)]
pub struct StockLedger<S> {
    store: S,
}

impl<S> StockLedger<S>
where
    S: StockStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current quantity; 0 when the product has no entry.
    pub fn get(&self, product_id: ProductId) -> DomainResult<i64> {
        Ok(self.entry(product_id)?.quantity())
    }

    /// Stored entry, or the implicit empty one.
    pub fn entry(&self, product_id: ProductId) -> DomainResult<StockEntry> {
        Ok(self
            .store
            .load(product_id)?
            .unwrap_or_else(|| StockEntry::empty(product_id)))
    }

    pub fn snapshot(&self) -> DomainResult<Vec<StockEntry>> {
        self.store.list()
    }

    /// Overwrite the quantity. Negative quantities are rejected before any write.
    pub fn set_absolute(&self, product_id: ProductId, quantity: i64) -> DomainResult<StockEntry> {
        let write = StockWrite::absolute(product_id, quantity)?;
        let entry = self.store.save(write)?;
        info!(product_id = %product_id, quantity, "stock set");
        Ok(entry)
    }

    /// Plan an increment against the latest stored version.
    pub fn plan_increment(&self, product_id: ProductId, delta: i64) -> DomainResult<StockPlan> {
        self.entry(product_id)?.plan_delta(delta)
    }

    /// Add `delta` (which may be negative); the result is clamped at zero.
    ///
    /// Clamping is reported through [`StockChange::clamped`] and a warning, never
    /// as an error.
    pub fn increment(&self, product_id: ProductId, delta: i64) -> DomainResult<StockChange> {
        let change = retry_on_conflict(product_id, || {
            let plan = self.plan_increment(product_id, delta)?;
            if let Some(write) = plan.write {
                self.store.save(write)?;
            }
            Ok(plan.change)
        })?;

        if change.was_clamped() {
            warn!(
                product_id = %product_id,
                delta,
                previous = change.previous,
                shortfall = change.clamped,
                "stock increment clamped at zero"
            );
        } else {
            debug!(product_id = %product_id, delta, current = change.current, "stock incremented");
        }
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use stockroom_core::Versioned;

    #[derive(Default)]
    struct MapStore {
        rows: Mutex<HashMap<ProductId, StockEntry>>,
    }

    impl StockStore for MapStore {
        fn load(&self, product_id: ProductId) -> DomainResult<Option<StockEntry>> {
            Ok(self.rows.lock().unwrap().get(&product_id).copied())
        }

        fn save(&self, write: StockWrite) -> DomainResult<StockEntry> {
            let mut rows = self.rows.lock().unwrap();
            let next = write.apply_to(rows.get(&write.product_id))?;
            rows.insert(write.product_id, next);
            Ok(next)
        }

        fn list(&self) -> DomainResult<Vec<StockEntry>> {
            Ok(self.rows.lock().unwrap().values().copied().collect())
        }
    }

    fn ledger() -> StockLedger<Arc<MapStore>> {
        StockLedger::new(Arc::new(MapStore::default()))
    }

    #[test]
    fn missing_entry_reads_as_zero() {
        let ledger = ledger();
        assert_eq!(ledger.get(ProductId::new()).unwrap(), 0);
        assert!(ledger.snapshot().unwrap().is_empty());
    }

    #[test]
    fn first_positive_increment_creates_entry() {
        let ledger = ledger();
        let pid = ProductId::new();
        let change = ledger.increment(pid, 7).unwrap();
        assert_eq!(change.previous, 0);
        assert_eq!(change.current, 7);
        assert_eq!(ledger.entry(pid).unwrap().version(), 1);
    }

    #[test]
    fn deduction_on_missing_entry_creates_nothing() {
        let ledger = ledger();
        let pid = ProductId::new();
        let change = ledger.increment(pid, -3).unwrap();
        assert_eq!(change.current, 0);
        assert!(change.was_clamped());
        assert!(ledger.snapshot().unwrap().is_empty());
    }

    #[test]
    fn most_negative_increment_on_empty_product_clamps() {
        let ledger = ledger();
        let pid = ProductId::new();
        let change = ledger.increment(pid, i64::MIN).unwrap();
        assert_eq!(change.current, 0);
        assert!(change.was_clamped());
        assert_eq!(ledger.get(pid).unwrap(), 0);
        assert!(ledger.snapshot().unwrap().is_empty());
    }

    #[test]
    fn over_deduction_clamps_instead_of_failing() {
        let ledger = ledger();
        let pid = ProductId::new();
        ledger.set_absolute(pid, 2).unwrap();
        let change = ledger.increment(pid, -10).unwrap();
        assert_eq!(change.current, 0);
        assert_eq!(change.clamped, 8);
        assert_eq!(ledger.get(pid).unwrap(), 0);
    }

    #[test]
    fn negative_absolute_set_leaves_store_unchanged() {
        let ledger = ledger();
        let pid = ProductId::new();
        ledger.set_absolute(pid, 4).unwrap();

        let err = ledger.set_absolute(pid, -1).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(ledger.get(pid).unwrap(), 4);
        assert_eq!(ledger.entry(pid).unwrap().version(), 1);
    }

    #[test]
    fn absolute_set_overwrites() {
        let ledger = ledger();
        let pid = ProductId::new();
        ledger.increment(pid, 9).unwrap();
        ledger.set_absolute(pid, 3).unwrap();
        assert_eq!(ledger.get(pid).unwrap(), 3);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let ledger = Arc::new(ledger());
        let pid = ProductId::new();
        let threads = 16;
        let per_thread = 25;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let ledger = ledger.clone();
                std::thread::spawn(move || {
                    for _ in 0..per_thread {
                        ledger.increment(pid, 1).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(ledger.get(pid).unwrap(), threads * per_thread);
    }

    #[test]
    fn retry_gives_up_on_persistent_conflict() {
        let mut calls = 0;
        let result: DomainResult<()> = retry_on_conflict(ProductId::new(), || {
            calls += 1;
            Err(DomainError::conflict("always stale"))
        });
        assert!(result.unwrap_err().is_conflict());
        assert_eq!(calls, MAX_WRITE_ATTEMPTS);
    }

    #[test]
    fn retry_passes_other_errors_through() {
        let mut calls = 0;
        let result: DomainResult<()> = retry_on_conflict(ProductId::new(), || {
            calls += 1;
            Err(DomainError::persistence("disk full"))
        });
        assert!(matches!(result, Err(DomainError::Persistence(_))));
        assert_eq!(calls, 1);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Increment(i64),
            Set(i64),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (-50i64..50).prop_map(Op::Increment),
                (-5i64..50).prop_map(Op::Set),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: no sequence of operations makes stock negative.
            #[test]
            fn stock_never_negative(ops in proptest::collection::vec(op(), 0..40)) {
                let ledger = ledger();
                let pid = ProductId::new();
                for op in ops {
                    match op {
                        Op::Increment(d) => { ledger.increment(pid, d).unwrap(); }
                        Op::Set(q) => { let _ = ledger.set_absolute(pid, q); }
                    }
                    prop_assert!(ledger.get(pid).unwrap() >= 0);
                }
            }

            /// Property: increment matches max(0, current + delta).
            #[test]
            fn increment_is_clamped_sum(start in 0i64..100, delta in -200i64..200) {
                let ledger = ledger();
                let pid = ProductId::new();
                ledger.set_absolute(pid, start).unwrap();
                let change = ledger.increment(pid, delta).unwrap();
                prop_assert_eq!(change.current, (start + delta).max(0));
                prop_assert_eq!(ledger.get(pid).unwrap(), (start + delta).max(0));
            }
        }
    }
}
