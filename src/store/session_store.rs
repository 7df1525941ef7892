//! The session store.
//!
//! [`SessionStore`] owns the live [`Session`], applies every form edit to it
//! synchronously (recomputing hours as times change), runs allocations, and
//! saves, restores and clears the persisted snapshot through a
//! [`SnapshotStore`].

use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{
    AllocationResult, DurationRules, allocate_tips, compute_hours, compute_hours_for_all,
};
use crate::config::AppConfig;
use crate::error::{TipError, TipResult};
use crate::models::{
    EmployeeId, Session, SessionStatus, SessionSummary, Snapshot, TimeLabel, WorkerEntry,
};

use super::{Clock, SnapshotStore, SystemClock};

/// What [`SessionStore::load`] found in the snapshot store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No snapshot exists; the session is empty.
    Missing,
    /// The snapshot was restored; carries the restored lifecycle state.
    Restored(SessionStatus),
    /// The snapshot could not be used and the session was left empty.
    Discarded {
        /// Why the snapshot was rejected.
        reason: String,
    },
}

/// Which side of a shift an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShiftEdge {
    Start,
    End,
}

/// Holds the live session and persists it as a single snapshot.
///
/// # Example
///
/// ```
/// use shift_tips::config::ConfigLoader;
/// use shift_tips::store::{MemoryStore, SessionStore};
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::builtin().unwrap().into_config();
/// let mut store = SessionStore::new(config, MemoryStore::new());
///
/// store.set_headcount(2).unwrap();
/// store.set_start_time(0, "11:00 AM").unwrap();
/// store.set_end_time(0, "03:00 PM").unwrap();
/// store.set_start_time(1, "11:00 AM").unwrap();
/// store.set_end_time(1, "07:00 PM").unwrap();
/// store.set_tip_pool(Decimal::new(120, 0));
///
/// let result = store.submit().unwrap();
/// assert_eq!(result.shares, vec![Decimal::new(4000, 2), Decimal::new(8000, 2)]);
/// ```
pub struct SessionStore<S> {
    config: Arc<AppConfig>,
    rules: DurationRules,
    store: S,
    clock: Box<dyn Clock>,
    session: Session,
    last_allocation: Option<AllocationResult>,
}

impl<S: SnapshotStore> SessionStore<S> {
    /// Creates a store with an empty session, stamping saves with the system clock.
    pub fn new(config: impl Into<Arc<AppConfig>>, store: S) -> Self {
        Self::with_clock(config, store, SystemClock)
    }

    /// Creates a store with an empty session and a custom clock.
    pub fn with_clock(
        config: impl Into<Arc<AppConfig>>,
        store: S,
        clock: impl Clock + 'static,
    ) -> Self {
        let config = config.into();
        let rules = DurationRules::from_settings(config.settings());
        Self {
            config,
            rules,
            store,
            clock: Box::new(clock),
            session: Session::default(),
            last_allocation: None,
        }
    }

    /// Creates a store and restores any persisted snapshot, as done at startup.
    pub fn open(config: impl Into<Arc<AppConfig>>, store: S) -> TipResult<(Self, LoadOutcome)> {
        let mut session_store = Self::new(config, store);
        let outcome = session_store.load()?;
        Ok((session_store, outcome))
    }

    /// Returns the live session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the snapshot backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the session store and returns the snapshot backend.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the most recent allocation, if any has run since the last reset.
    pub fn last_allocation(&self) -> Option<&AllocationResult> {
        self.last_allocation.as_ref()
    }

    /// Returns the display view of the session.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::build(&self.session, self.config.roster())
    }

    /// Resizes the session to `headcount` blank slots.
    ///
    /// Every slot is reset, including slots that existed before. The tip
    /// pool and last save time are kept. A headcount above the configured
    /// maximum is rejected and the session is left unchanged.
    pub fn set_headcount(&mut self, headcount: usize) -> TipResult<()> {
        let max = self.config.settings().max_headcount;
        if headcount > max {
            return Err(TipError::HeadcountOutOfRange { headcount, max });
        }

        let tip_pool = self.session.tip_pool;
        let last_saved = self.session.last_saved.take();

        self.session = Session::with_headcount(headcount);
        self.session.tip_pool = tip_pool;
        self.session.last_saved = last_saved;
        self.last_allocation = None;

        debug!(headcount, "Headcount set; all slots reset");
        Ok(())
    }

    /// Sets the headcount from raw form input.
    ///
    /// Anything that is not a whole number between zero and the configured
    /// maximum clears the headcount and leaves no slots.
    pub fn set_headcount_input(&mut self, raw: &str) {
        let raw = raw.trim();
        match raw.parse::<usize>().map(|headcount| self.set_headcount(headcount)) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                warn!(input = raw, error = %err, "Headcount is out of range; clearing it");
                self.clear_headcount();
            }
            Err(_) => {
                if !raw.is_empty() {
                    warn!(input = raw, "Headcount is not a whole number; clearing it");
                }
                self.clear_headcount();
            }
        }
    }

    fn clear_headcount(&mut self) {
        self.session.headcount = None;
        self.session.workers.clear();
        self.session.status = SessionStatus::Empty;
        self.last_allocation = None;
    }

    /// Sets a slot's start time and recomputes its hours.
    ///
    /// Blank input clears the start time. Hours are left as they were unless
    /// both times are now present.
    pub fn set_start_time(&mut self, index: usize, raw: &str) -> TipResult<&WorkerEntry> {
        self.set_shift_edge(index, raw, ShiftEdge::Start)
    }

    /// Sets a slot's end time and recomputes its hours.
    ///
    /// Blank input clears the end time. Hours are left as they were unless
    /// both times are now present.
    pub fn set_end_time(&mut self, index: usize, raw: &str) -> TipResult<&WorkerEntry> {
        self.set_shift_edge(index, raw, ShiftEdge::End)
    }

    fn set_shift_edge(
        &mut self,
        index: usize,
        raw: &str,
        edge: ShiftEdge,
    ) -> TipResult<&WorkerEntry> {
        let label = self.config.time_labels().resolve(raw)?;
        self.check_index(index)?;

        let rules = self.rules;
        self.session.touch();
        let worker = &mut self.session.workers[index];
        match edge {
            ShiftEdge::Start => worker.start_time = label,
            ShiftEdge::End => worker.end_time = label,
        }

        if worker.has_complete_shift() {
            worker.hours = compute_hours(worker.start_time, worker.end_time, &rules);
            debug!(index, ?edge, hours = ?worker.hours, "Recomputed slot hours");
        }

        Ok(&self.session.workers[index])
    }

    /// Sets every slot's end time and recomputes hours against each slot's own start.
    ///
    /// Blank input is ignored. Slots without a start time keep their hours.
    pub fn apply_end_time_to_all(&mut self, raw: &str) -> TipResult<&[WorkerEntry]> {
        let Some(end) = self.config.time_labels().resolve(raw)? else {
            return Ok(self.session.workers.as_slice());
        };

        let starts: Vec<Option<TimeLabel>> =
            self.session.workers.iter().map(|w| w.start_time).collect();
        let hours = compute_hours_for_all(Some(end), &starts, &self.rules);

        self.session.touch();
        for (worker, hours) in self.session.workers.iter_mut().zip(hours) {
            worker.end_time = Some(end);
            if hours.is_some() {
                worker.hours = hours;
            }
        }

        debug!(
            end_time = %end,
            slots = self.session.workers.len(),
            "Applied end time to all slots"
        );
        Ok(self.session.workers.as_slice())
    }

    /// Sets or clears a slot's roster identity. No recomputation happens.
    pub fn set_employee_id(
        &mut self,
        index: usize,
        id: Option<EmployeeId>,
    ) -> TipResult<&WorkerEntry> {
        if let Some(id) = id.filter(|id| !self.config.roster().contains(*id)) {
            return Err(TipError::EmployeeNotFound { id });
        }
        self.check_index(index)?;

        self.session.touch();
        self.session.workers[index].employee_id = id;
        Ok(&self.session.workers[index])
    }

    /// Stores the tip pool. A negative amount clears it.
    pub fn set_tip_pool(&mut self, amount: Decimal) {
        if amount.is_sign_negative() {
            warn!(amount = %amount, "Tip pool is negative; clearing it");
            self.session.tip_pool = None;
        } else {
            self.session.tip_pool = Some(amount);
        }
        self.session.touch();
    }

    /// Stores the tip pool from raw form input.
    ///
    /// The leading number is read the way a browser number field reads it,
    /// so `"1e3"` is 1000 and `"12.5abc"` is 12.5. Blank or non-numeric input
    /// clears the pool.
    pub fn set_tip_pool_input(&mut self, raw: &str) {
        let raw = raw.trim();
        match parse_amount(raw) {
            Some(amount) => self.set_tip_pool(amount),
            None => {
                if !raw.is_empty() {
                    warn!(input = raw, "Tip pool is not a number; clearing it");
                }
                self.session.tip_pool = None;
                self.session.touch();
            }
        }
    }

    /// Splits the tip pool over all slots by hours and stores every share.
    pub fn allocate_tips(&mut self) -> &AllocationResult {
        let result = allocate_tips(&self.session.hours(), self.session.tip_pool);

        for (worker, share) in self.session.workers.iter_mut().zip(&result.shares) {
            worker.tip_share = Some(*share);
        }

        self.last_allocation.insert(result)
    }

    /// Writes the whole session to the snapshot store, replacing any prior snapshot.
    pub fn save(&mut self) -> TipResult<Snapshot> {
        let save_time = self.format_timestamp()?;
        let snapshot = Snapshot::capture(&self.session, save_time.clone());
        let encoded = serde_json::to_string(&snapshot).map_err(|e| TipError::SnapshotEncode {
            message: e.to_string(),
        })?;

        let key = &self.config.settings().storage_key;
        self.store.write(key, &encoded)?;
        self.session.last_saved = Some(save_time);

        info!(
            key = %key,
            headcount = self.session.headcount(),
            status = %self.session.status,
            save_time = %snapshot.save_time,
            "Saved session snapshot"
        );
        Ok(snapshot)
    }

    /// Replaces the live session with the persisted snapshot.
    ///
    /// A missing snapshot, or one that does not decode into a consistent
    /// session, leaves the session empty. Only storage failures are errors.
    pub fn load(&mut self) -> TipResult<LoadOutcome> {
        let key = self.config.settings().storage_key.clone();
        self.session = Session::default();
        self.last_allocation = None;

        let Some(encoded) = self.store.read(&key)? else {
            info!(key = %key, "No session snapshot found");
            return Ok(LoadOutcome::Missing);
        };

        let snapshot = match serde_json::from_str::<Snapshot>(&encoded) {
            Ok(snapshot) => snapshot,
            Err(err) => return Ok(Self::discard(&key, format!("undecodable snapshot: {err}"))),
        };

        if let Err(reason) = snapshot.validate().and_then(|()| self.check_references(&snapshot)) {
            return Ok(Self::discard(&key, reason));
        }

        self.session = snapshot.into_session();
        info!(
            key = %key,
            headcount = self.session.headcount(),
            status = %self.session.status,
            "Restored session snapshot"
        );
        Ok(LoadOutcome::Restored(self.session.status))
    }

    /// Deletes the persisted snapshot and resets the session to empty.
    pub fn clear(&mut self) -> TipResult<()> {
        let key = &self.config.settings().storage_key;
        self.store.delete(key)?;
        self.session = Session::default();
        self.last_allocation = None;

        info!(key = %key, "Cleared session");
        Ok(())
    }

    /// Allocates the tip pool and saves the settled session.
    pub fn submit(&mut self) -> TipResult<AllocationResult> {
        let result = self.allocate_tips().clone();
        if self.session.headcount.is_some() {
            self.session.status = SessionStatus::Settled;
        }
        self.save()?;

        info!(
            slots = result.shares.len(),
            total_allocated = %result.total_allocated,
            degenerate = result.degenerate,
            "Submitted tip split"
        );
        Ok(result)
    }

    fn check_index(&self, index: usize) -> TipResult<()> {
        let headcount = self.session.workers.len();
        if index >= headcount {
            return Err(TipError::SlotOutOfRange { index, headcount });
        }
        Ok(())
    }

    fn format_timestamp(&self) -> TipResult<String> {
        let format = &self.config.settings().timestamp_format;
        let mut out = String::new();
        write!(out, "{}", self.clock.now().format(format)).map_err(|_| {
            TipError::SnapshotEncode {
                message: format!("invalid timestamp format '{format}'"),
            }
        })?;
        Ok(out)
    }

    /// Checks that every label and identity in a snapshot is still selectable.
    fn check_references(&self, snapshot: &Snapshot) -> Result<(), String> {
        let labels = self.config.time_labels();
        let roster = self.config.roster();
        let max = self.config.settings().max_headcount;

        if let Some(headcount) = snapshot.headcount.filter(|h| *h > max) {
            return Err(format!("snapshot headcount {headcount} exceeds the maximum {max}"));
        }

        for (index, worker) in snapshot.workers.iter().enumerate() {
            for label in [worker.start_time, worker.end_time].into_iter().flatten() {
                if !labels.contains(label) {
                    return Err(format!("slot {index} has unknown time label {label}"));
                }
            }
            if let Some(id) = worker.employee_id.filter(|id| !roster.contains(*id)) {
                return Err(format!("slot {index} has unknown employee {id}"));
            }
        }
        Ok(())
    }

    fn discard(key: &str, reason: String) -> LoadOutcome {
        warn!(key = %key, reason = %reason, "Discarding session snapshot");
        LoadOutcome::Discarded { reason }
    }
}

/// Reads the leading number of `raw`, with an optional fraction and exponent.
///
/// Text after the number is ignored. Returns `None` when `raw` does not start
/// with a number or the number does not fit in a `Decimal`.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let integer_len = leading_digits(unsigned);
    let integer = &unsigned[..integer_len];
    let (fraction, rest) = match unsigned[integer_len..].strip_prefix('.') {
        Some(tail) => tail.split_at(leading_digits(tail)),
        None => ("", &unsigned[integer_len..]),
    };
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut amount = Decimal::from_str(&format!(
        "{}.{}",
        if integer.is_empty() { "0" } else { integer },
        if fraction.is_empty() { "0" } else { fraction },
    ))
    .ok()?;

    if let Some(exponent) = exponent_part(rest) {
        let exponent = exponent
            .parse::<i64>()
            .unwrap_or(if exponent.starts_with('-') { i64::MIN } else { i64::MAX })
            .clamp(-64, 64);
        let ten = Decimal::from(10);
        for _ in 0..exponent.unsigned_abs() {
            amount = if exponent > 0 {
                amount.checked_mul(ten)?
            } else {
                amount.checked_div(ten)?
            };
        }
    }

    Some(if negative { -amount } else { amount })
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Returns the signed digits of an exponent such as `e-3`, if `s` starts with one.
fn exponent_part(s: &str) -> Option<&str> {
    let body = s.strip_prefix(|c: char| c == 'e' || c == 'E')?;
    let sign_len = usize::from(body.starts_with(|c: char| c == '+' || c == '-'));
    let digits = leading_digits(&body[sign_len..]);
    (digits > 0).then(|| &body[..sign_len + digits])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::store::{FixedClock, MemoryStore};
    use chrono::NaiveDate;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(21, 5, 7)
                .unwrap(),
        )
    }

    fn store() -> SessionStore<MemoryStore> {
        let config = ConfigLoader::builtin().unwrap().into_config();
        SessionStore::with_clock(config, MemoryStore::new(), clock())
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = store();
        assert_eq!(store.session(), &Session::default());
        assert!(store.last_allocation().is_none());
    }

    #[test]
    fn test_set_headcount_resets_slots() {
        let mut store = store();
        store.set_headcount(2).unwrap();
        store.set_start_time(0, "11:00 AM").unwrap();
        store.set_headcount(3).unwrap();

        assert_eq!(store.session().workers.len(), 3);
        assert!(store.session().workers[0].start_time.is_none());
        assert_eq!(store.session().status, SessionStatus::Configured);
    }

    #[test]
    fn test_set_headcount_keeps_tip_pool() {
        let mut store = store();
        store.set_tip_pool(dec("50"));
        store.set_headcount(1).unwrap();
        assert_eq!(store.session().tip_pool, Some(dec("50")));
    }

    #[test]
    fn test_headcount_input_coercion() {
        let mut store = store();
        store.set_headcount_input("4");
        assert_eq!(store.session().headcount, Some(4));

        store.set_headcount_input("four");
        assert_eq!(store.session().headcount, None);
        assert!(store.session().workers.is_empty());
        assert_eq!(store.session().status, SessionStatus::Empty);

        store.set_headcount_input("-1");
        assert_eq!(store.session().headcount, None);
    }

    #[test]
    fn test_headcount_above_maximum_is_rejected() {
        let mut store = store();
        store.set_headcount(11).unwrap();
        store.set_start_time(0, "11:00 AM").unwrap();

        match store.set_headcount(12) {
            Err(TipError::HeadcountOutOfRange { headcount, max }) => {
                assert_eq!(headcount, 12);
                assert_eq!(max, 11);
            }
            other => panic!("Expected HeadcountOutOfRange, got {:?}", other),
        }
        assert_eq!(store.session().workers.len(), 11);
        assert!(store.session().workers[0].start_time.is_some());
    }

    #[test]
    fn test_headcount_input_above_maximum_clears() {
        let mut store = store();
        for raw in ["12", "100000000000", "18446744073709551615", "99999999999999999999999"] {
            store.set_headcount_input("3");
            store.set_headcount_input(raw);
            assert_eq!(store.session().headcount, None, "input {raw}");
            assert!(store.session().workers.is_empty());
            assert_eq!(store.session().status, SessionStatus::Empty);
        }

        store.set_headcount_input(" 11 ");
        assert_eq!(store.session().headcount, Some(11));
    }

    #[test]
    fn test_start_then_end_computes_hours() {
        let mut store = store();
        store.set_headcount(1).unwrap();

        let entry = store.set_start_time(0, "05:00 PM").unwrap();
        assert!(entry.hours.is_none());

        let entry = store.set_end_time(0, "11:30 PM").unwrap();
        assert_eq!(entry.hours, Some(dec("6.5")));
    }

    #[test]
    fn test_clearing_a_time_keeps_previous_hours() {
        let mut store = store();
        store.set_headcount(1).unwrap();
        store.set_start_time(0, "05:00 PM").unwrap();
        store.set_end_time(0, "09:00 PM").unwrap();

        let entry = store.set_end_time(0, "").unwrap();
        assert!(entry.end_time.is_none());
        assert_eq!(entry.hours, Some(dec("4")));
    }

    #[test]
    fn test_overnight_end_time() {
        let mut store = store();
        store.set_headcount(1).unwrap();
        store.set_start_time(0, "11:00 PM").unwrap();
        let entry = store.set_end_time(0, "12:30 AM").unwrap();
        assert_eq!(entry.hours, Some(dec("1.5")));
    }

    #[test]
    fn test_unknown_label_is_rejected_without_mutation() {
        let mut store = store();
        store.set_headcount(1).unwrap();

        let result = store.set_start_time(0, "01:00 PM");
        assert!(matches!(result, Err(TipError::InvalidTimeLabel { .. })));
        assert!(store.session().workers[0].start_time.is_none());
    }

    #[test]
    fn test_index_past_headcount_is_rejected() {
        let mut store = store();
        store.set_headcount(2).unwrap();

        match store.set_end_time(2, "03:00 PM") {
            Err(TipError::SlotOutOfRange { index, headcount }) => {
                assert_eq!(index, 2);
                assert_eq!(headcount, 2);
            }
            _ => panic!("Expected SlotOutOfRange error"),
        }
    }

    #[test]
    fn test_apply_end_time_to_all_uses_own_start() {
        let mut store = store();
        store.set_headcount(3).unwrap();
        store.set_start_time(0, "11:00 AM").unwrap();
        store.set_start_time(2, "06:00 PM").unwrap();

        let workers = store.apply_end_time_to_all("10:00 PM").unwrap();
        assert!(workers.iter().all(|w| w.end_time.unwrap().to_string() == "10:00 PM"));
        assert_eq!(workers[0].hours, Some(dec("11")));
        assert_eq!(workers[1].hours, None);
        assert_eq!(workers[2].hours, Some(dec("4")));
    }

    #[test]
    fn test_apply_blank_end_time_is_noop() {
        let mut store = store();
        store.set_headcount(1).unwrap();
        store.set_end_time(0, "03:00 PM").unwrap();

        store.apply_end_time_to_all("").unwrap();
        assert_eq!(
            store.session().workers[0].end_time.unwrap().to_string(),
            "03:00 PM"
        );
    }

    #[test]
    fn test_set_employee_id() {
        let mut store = store();
        store.set_headcount(1).unwrap();

        let entry = store.set_employee_id(0, Some(4)).unwrap();
        assert_eq!(entry.employee_id, Some(4));
        assert!(entry.hours.is_none());

        assert!(matches!(
            store.set_employee_id(0, Some(40)),
            Err(TipError::EmployeeNotFound { id: 40 })
        ));

        let entry = store.set_employee_id(0, None).unwrap();
        assert_eq!(entry.employee_id, None);
    }

    #[test]
    fn test_tip_pool_input_coercion() {
        let mut store = store();
        store.set_tip_pool_input("87.35");
        assert_eq!(store.session().tip_pool, Some(dec("87.35")));

        store.set_tip_pool_input("lots");
        assert_eq!(store.session().tip_pool, None);

        store.set_tip_pool_input("-3");
        assert_eq!(store.session().tip_pool, None);

        store.set_tip_pool_input("");
        assert_eq!(store.session().tip_pool, None);
    }

    #[test]
    fn test_tip_pool_input_reads_leading_number() {
        let mut store = store();
        store.set_tip_pool_input("1e3");
        assert_eq!(store.session().tip_pool, Some(dec("1000")));

        store.set_tip_pool_input("12.5abc");
        assert_eq!(store.session().tip_pool, Some(dec("12.5")));

        store.set_tip_pool_input("2.5E-1");
        assert_eq!(store.session().tip_pool, Some(dec("0.25")));

        store.set_tip_pool_input(".75");
        assert_eq!(store.session().tip_pool, Some(dec("0.75")));

        store.set_tip_pool_input("40e");
        assert_eq!(store.session().tip_pool, Some(dec("40")));

        store.set_tip_pool_input("1e400");
        assert_eq!(store.session().tip_pool, None);

        store.set_tip_pool_input("abc12");
        assert_eq!(store.session().tip_pool, None);
    }

    #[test]
    fn test_submit_with_huge_tip_pool_does_not_panic() {
        let mut store = store();
        store.set_tip_pool_input("10000000000000000000000000000");
        store.set_headcount(1).unwrap();
        store.set_start_time(0, "11:00 AM").unwrap();
        store.set_end_time(0, "12:30 AM").unwrap();

        let result = store.submit().unwrap();
        assert!(!result.degenerate);
        assert_eq!(result.shares[0], dec("10000000000000000000000000000"));
        assert_eq!(store.session().status, SessionStatus::Settled);
    }

    #[test]
    fn test_load_rejects_headcount_above_maximum() {
        let config = ConfigLoader::builtin().unwrap().into_config();
        let workers = vec!["{}"; 12].join(",");
        let mut backend = MemoryStore::new();
        backend.insert(
            "shiftData",
            &format!(
                r#"{{"headcount":12,"workers":[{workers}],"tip_pool":null,"status":"configured","save_time":""}}"#
            ),
        );

        let mut store = SessionStore::with_clock(config, backend, clock());
        match store.load().unwrap() {
            LoadOutcome::Discarded { reason } => assert!(reason.contains("exceeds the maximum 11")),
            other => panic!("Expected Discarded, got {:?}", other),
        }
        assert_eq!(store.session(), &Session::default());
    }

    #[test]
    fn test_allocation_does_not_recompute_on_edit() {
        let mut store = store();
        store.set_headcount(1).unwrap();
        store.set_start_time(0, "11:00 AM").unwrap();
        store.set_end_time(0, "03:00 PM").unwrap();
        store.set_tip_pool(dec("20"));
        store.allocate_tips();
        assert_eq!(store.session().workers[0].tip_share, Some(dec("20")));

        store.set_tip_pool(dec("40"));
        assert_eq!(store.session().workers[0].tip_share, Some(dec("20")));
    }

    #[test]
    fn test_submit_settles_and_edit_reopens() {
        let mut store = store();
        store.set_headcount(1).unwrap();
        store.set_start_time(0, "11:00 AM").unwrap();
        store.set_end_time(0, "03:00 PM").unwrap();

        store.submit().unwrap();
        assert_eq!(store.session().status, SessionStatus::Settled);

        store.set_employee_id(0, Some(1)).unwrap();
        assert_eq!(store.session().status, SessionStatus::Configured);
    }

    #[test]
    fn test_save_uses_configured_timestamp_format() {
        let mut store = store();
        let snapshot = store.save().unwrap();
        assert_eq!(snapshot.save_time, "3/9/2024, 9:05:07 PM");
        assert_eq!(
            store.session().last_saved.as_deref(),
            Some("3/9/2024, 9:05:07 PM")
        );
    }

    #[test]
    fn test_clear_removes_snapshot() {
        let mut store = store();
        store.set_headcount(2).unwrap();
        store.save().unwrap();
        assert!(store.store().get("shiftData").is_some());

        store.clear().unwrap();
        assert!(store.store().get("shiftData").is_none());
        assert_eq!(store.session(), &Session::default());
    }

    #[test]
    fn test_load_rejects_unknown_employee() {
        let config = ConfigLoader::builtin().unwrap().into_config();
        let mut backend = MemoryStore::new();
        backend.insert(
            "shiftData",
            r#"{"headcount":1,"workers":[{"employee_id":99}],"tip_pool":null,"status":"configured","save_time":""}"#,
        );

        let mut store = SessionStore::with_clock(config, backend, clock());
        match store.load().unwrap() {
            LoadOutcome::Discarded { reason } => assert!(reason.contains("unknown employee 99")),
            other => panic!("Expected Discarded, got {:?}", other),
        }
        assert_eq!(store.session(), &Session::default());
    }
}
