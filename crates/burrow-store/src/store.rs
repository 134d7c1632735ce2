use crate::error::{Result, StoreError};
use crate::settings::StoreSettings;
use burrow_core::{Clock, Record, RecordGateway, ShortCode, StorageError, SystemClock};
use burrow_generator::Generator;
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::{debug, info, trace, warn};

/// The authoritative in-memory record set, kept in step with a durable gateway.
///
/// Records keep insertion order and every code matches at most one record.
///
/// All mutations are serialized behind one write lock that is held across the
/// write-back. A mutation is applied to a copy of the record set, written
/// through the gateway, and only then swapped in, so a failed write-back
/// leaves both memory and the durable copy at the previous state. Readers
/// run concurrently with each other and never see a half-applied mutation.
pub struct RecordStore<P, G, C = SystemClock> {
    settings: StoreSettings,
    gateway: P,
    generator: G,
    clock: C,
    records: RwLock<Vec<Record>>,
}

impl<P: RecordGateway, G: Generator> RecordStore<P, G, SystemClock> {
    /// Loads the full record set from `gateway` and returns a ready store.
    pub async fn bootstrap(settings: StoreSettings, gateway: P, generator: G) -> Result<Self> {
        Self::bootstrap_with_clock(settings, gateway, generator, SystemClock).await
    }
}

impl<P: RecordGateway, G: Generator, C: Clock> RecordStore<P, G, C> {
    /// Like [`RecordStore::bootstrap`], reading the current time from `clock`.
    pub async fn bootstrap_with_clock(
        settings: StoreSettings,
        gateway: P,
        generator: G,
        clock: C,
    ) -> Result<Self> {
        settings.validate().map_err(StoreError::InvalidSettings)?;

        let records = load_checked(&gateway).await?;
        info!(count = records.len(), "record store loaded");

        Ok(Self {
            settings,
            gateway,
            generator,
            clock,
            records: RwLock::new(records),
        })
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Discards the in-memory record set and loads it again from the gateway.
    ///
    /// Returns the number of records loaded. On failure the current set is kept.
    pub async fn reload(&self) -> Result<usize> {
        let mut records = self.records.write().await;
        let loaded = load_checked(&self.gateway).await?;
        info!(
            previous = records.len(),
            count = loaded.len(),
            "record store reloaded"
        );
        *records = loaded;
        Ok(records.len())
    }

    /// Returns the record stored under `code`, expired or not.
    pub async fn get_record(&self, code: &ShortCode) -> Result<Record> {
        trace!(code = %code, "looking up record");
        let records = self.records.read().await;
        find(&records, code)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(code.to_string()))
    }

    /// Resolves `code` to its target.
    ///
    /// Fails with [`StoreError::Expired`] once the current time is strictly
    /// past the record's expiry.
    pub async fn resolve(&self, code: &ShortCode) -> Result<String> {
        trace!(code = %code, "resolving short code");
        let records = self.records.read().await;

        let Some(record) = find(&records, code) else {
            debug!(code = %code, "short code not found");
            return Err(StoreError::NotFound(code.to_string()));
        };

        if self
            .settings
            .calendar
            .is_expired(&record.expiry, self.clock.now())?
        {
            debug!(code = %code, expiry = %record.expiry, "short code has expired");
            return Err(StoreError::Expired {
                code: code.to_string(),
                expiry: record.expiry.clone(),
            });
        }

        debug!(code = %code, target = %record.target, "resolved short code");
        Ok(record.target.clone())
    }

    /// Stores a new record and returns its code.
    ///
    /// Without `custom_code` a code of the configured length is generated,
    /// retrying on collisions. A custom code that is already taken fails with
    /// [`StoreError::AliasConflict`]. `expiry` must parse with the configured
    /// calendar.
    pub async fn create(
        &self,
        target: impl Into<String>,
        expiry: impl Into<String>,
        custom_code: Option<ShortCode>,
    ) -> Result<ShortCode> {
        let target = target.into();
        let expiry = expiry.into();
        check_target(&target)?;
        self.settings.calendar.parse(&expiry)?;

        let mut records = self.records.write().await;

        let code = match custom_code {
            Some(code) => {
                if find(&records, &code).is_some() {
                    warn!(code = %code, "custom short code already taken");
                    return Err(StoreError::AliasConflict(code.to_string()));
                }
                code
            }
            None => self.generate_unused(&records)?,
        };

        let mut next = records.clone();
        next.push(Record::new(target, code.clone(), expiry));
        self.gateway.write_all(&next).await?;
        *records = next;

        info!(code = %code, "created record");
        Ok(code)
    }

    /// Points `code` at `new_target`.
    ///
    /// Returns `false` when no record has that code. The record set is written
    /// back in either case.
    pub async fn update_target(
        &self,
        code: &ShortCode,
        new_target: impl Into<String>,
    ) -> Result<bool> {
        let new_target = new_target.into();
        check_target(&new_target)?;

        let mut records = self.records.write().await;
        let mut next = records.clone();

        let updated = match next.iter_mut().find(|r| r.code == *code) {
            Some(record) => {
                record.target = new_target;
                true
            }
            None => false,
        };

        self.gateway.write_all(&next).await?;
        *records = next;

        if updated {
            info!(code = %code, "updated target");
        } else {
            debug!(code = %code, "no record to update");
        }
        Ok(updated)
    }

    /// Moves the expiry of `code` by `days` calendar days and returns the new
    /// expiry.
    ///
    /// Fails with [`StoreError::NotFound`] when no record has that code.
    pub async fn extend_expiry(&self, code: &ShortCode, days: i32) -> Result<String> {
        let mut records = self.records.write().await;

        let Some(index) = records.iter().position(|r| r.code == *code) else {
            return Err(StoreError::NotFound(code.to_string()));
        };
        let extended = self.settings.calendar.extend(&records[index].expiry, days)?;

        let mut next = records.clone();
        next[index].expiry = extended.clone();
        self.gateway.write_all(&next).await?;
        *records = next;

        info!(code = %code, days, expiry = %extended, "extended expiry");
        Ok(extended)
    }

    /// Drops every record whose expiry has passed and returns how many went.
    ///
    /// All-or-nothing: one record with a malformed expiry fails the whole
    /// purge and nothing is removed. Survivors keep their relative order.
    pub async fn purge_expired(&self) -> Result<usize> {
        let mut records = self.records.write().await;
        let now = self.clock.now();

        let mut survivors = Vec::with_capacity(records.len());
        for record in records.iter() {
            if !self.settings.calendar.is_expired(&record.expiry, now)? {
                survivors.push(record.clone());
            }
        }

        let removed = records.len() - survivors.len();
        self.gateway.write_all(&survivors).await?;
        *records = survivors;

        info!(removed, remaining = records.len(), "purged expired records");
        Ok(removed)
    }

    /// Renders the expiry that lies `days` calendar days from now.
    pub fn expiry_in(&self, days: i32) -> Result<String> {
        Ok(self.settings.calendar.days_from(self.clock.now(), days)?)
    }

    /// Returns a copy of every record, in insertion order.
    pub async fn records(&self) -> Vec<Record> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn generate_unused(&self, records: &[Record]) -> Result<ShortCode> {
        let attempts = self.settings.max_generate_attempts;
        for attempt in 1..=attempts {
            let code = self.generator.generate(self.settings.code_length);
            if find(records, &code).is_none() {
                return Ok(code);
            }
            debug!(code = %code, attempt, "generated short code collides, retrying");
        }

        warn!(attempts, "could not generate an unused short code");
        Err(StoreError::CodeSpaceExhausted { attempts })
    }
}

fn find<'a>(records: &'a [Record], code: &ShortCode) -> Option<&'a Record> {
    records.iter().find(|r| r.code == *code)
}

fn check_target(target: &str) -> Result<()> {
    if target.is_empty() {
        return Err(StoreError::InvalidTarget("target cannot be empty".to_string()));
    }
    Ok(())
}

async fn load_checked<P: RecordGateway>(gateway: &P) -> Result<Vec<Record>> {
    let records = gateway.load().await?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.code.as_str()) {
            return Err(StorageError::InvalidData(format!(
                "duplicate short code '{}' in stored records",
                record.code
            ))
            .into());
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_core::{ExpiryError, ManualClock};
    use burrow_generator::{RandomGenerator, SeqGenerator};
    use burrow_storage::InMemoryGateway;
    use jiff::{SignedDuration, Timestamp};
    use std::sync::Arc;

    type TestStore = RecordStore<InMemoryGateway, SeqGenerator, ManualClock>;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn record(target: &str, c: &str, expiry: &str) -> Record {
        Record::new(target, code(c), expiry)
    }

    async fn setup(records: Vec<Record>) -> (TestStore, InMemoryGateway, ManualClock) {
        let gateway = InMemoryGateway::with_records(records);
        let clock = ManualClock::new(ts("2030-01-01T12:00:00Z"));
        let store = RecordStore::bootstrap_with_clock(
            StoreSettings::default(),
            gateway.clone(),
            SeqGenerator::with_prefix("s"),
            clock.clone(),
        )
        .await
        .unwrap();
        (store, gateway, clock)
    }

    #[tokio::test]
    async fn bootstrap_loads_records_in_order() {
        let seeded = vec![
            record("https://a.example", "aaa", "2999-01-01"),
            record("https://b.example", "bbb", "2000-01-01"),
        ];
        let (store, gateway, _) = setup(seeded.clone()).await;

        assert_eq!(store.records().await, seeded);
        assert_eq!(store.len().await, 2);
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn bootstrap_propagates_load_error() {
        let gateway = InMemoryGateway::new();
        gateway.fail_loads(true);

        let err = RecordStore::bootstrap(StoreSettings::default(), gateway, RandomGenerator::new())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, StoreError::Storage(StorageError::Load(_))));
    }

    #[tokio::test]
    async fn bootstrap_rejects_duplicate_codes() {
        let gateway = InMemoryGateway::with_records(vec![
            record("https://a.example", "dup", "2999-01-01"),
            record("https://b.example", "dup", "2999-01-01"),
        ]);

        let err = RecordStore::bootstrap(StoreSettings::default(), gateway, RandomGenerator::new())
            .await
            .err()
            .unwrap();

        let StoreError::Storage(StorageError::InvalidData(message)) = &err else {
            panic!("expected invalid data, got {err:?}");
        };
        assert!(message.contains("dup"));
    }

    #[tokio::test]
    async fn bootstrap_rejects_invalid_settings() {
        let err = RecordStore::bootstrap(
            StoreSettings::builder().code_length(0).build(),
            InMemoryGateway::new(),
            RandomGenerator::new(),
        )
        .await
        .err()
        .unwrap();

        assert!(matches!(err, StoreError::InvalidSettings(_)));
    }

    #[tokio::test]
    async fn get_record_ignores_expiry() {
        let (store, _, _) = setup(vec![record("https://old.example", "old", "2000-01-01")]).await;

        let found = store.get_record(&code("old")).await.unwrap();
        assert_eq!(found, record("https://old.example", "old", "2000-01-01"));

        let err = store.get_record(&code("nope")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(c) if c == "nope"));
    }

    #[tokio::test]
    async fn resolve_live_record() {
        let (store, _, _) = setup(vec![record("https://a.example", "abc", "2999-01-01")]).await;

        assert_eq!(store.resolve(&code("abc")).await.unwrap(), "https://a.example");
    }

    #[tokio::test]
    async fn resolve_missing_record() {
        let (store, _, _) = setup(vec![]).await;

        let err = store.resolve(&code("nope")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn resolve_expiry_boundary_is_strict() {
        let (store, _, clock) = setup(vec![record("https://a.example", "abc", "2030-06-01")]).await;

        clock.set(ts("2030-06-01T00:00:00Z"));
        assert_eq!(store.resolve(&code("abc")).await.unwrap(), "https://a.example");

        clock.advance(SignedDuration::from_nanos(1));
        let err = store.resolve(&code("abc")).await.unwrap_err();
        assert!(
            matches!(err, StoreError::Expired { ref code, ref expiry } if code == "abc" && expiry == "2030-06-01")
        );
    }

    #[tokio::test]
    async fn resolve_malformed_expiry_is_date_error() {
        let (store, _, _) = setup(vec![record("https://a.example", "bad", "someday")]).await;

        let err = store.resolve(&code("bad")).await.unwrap_err();
        assert!(matches!(err, StoreError::DateFormat(ExpiryError::Format { .. })));

        // metadata access still works
        assert!(store.get_record(&code("bad")).await.is_ok());
    }

    #[tokio::test]
    async fn create_generates_code_of_configured_length() {
        let gateway = InMemoryGateway::new();
        let store = RecordStore::bootstrap(
            StoreSettings::default(),
            gateway.clone(),
            RandomGenerator::new(),
        )
        .await
        .unwrap();

        let c = store
            .create("https://a.example", "2999-01-01", None)
            .await
            .unwrap();

        assert_eq!(c.as_str().len(), 5);
        assert!(c.as_str().chars().all(|ch| ch.is_ascii_alphanumeric()));
        assert_eq!(store.resolve(&c).await.unwrap(), "https://a.example");
        assert_eq!(
            gateway.snapshot(),
            vec![Record::new("https://a.example", c, "2999-01-01")]
        );
    }

    #[tokio::test]
    async fn create_respects_code_length_setting() {
        let store = RecordStore::bootstrap(
            StoreSettings::builder().code_length(9).build(),
            InMemoryGateway::new(),
            RandomGenerator::new(),
        )
        .await
        .unwrap();

        assert_eq!(store.settings().code_length, 9);
        let c = store.create("https://a.example", "2999-01-01", None).await.unwrap();
        assert_eq!(c.as_str().len(), 9);
    }

    #[tokio::test]
    async fn create_with_custom_code() {
        let (store, gateway, _) = setup(vec![]).await;

        let c = store
            .create(
                "https://a.example",
                "2999-01-01",
                Some(ShortCode::new("my-alias").unwrap()),
            )
            .await
            .unwrap();

        assert_eq!(c.as_str(), "my-alias");
        assert_eq!(gateway.write_count(), 1);
    }

    #[tokio::test]
    async fn create_rejects_taken_custom_code() {
        let (store, gateway, _) = setup(vec![record("https://a.example", "taken", "2999-01-01")]).await;

        let err = store
            .create("https://b.example", "2999-01-01", Some(code("taken")))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::AliasConflict(c) if c == "taken"));
        assert_eq!(store.resolve(&code("taken")).await.unwrap(), "https://a.example");
        assert_eq!(store.len().await, 1);
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn create_regenerates_on_collision() {
        // the generator's first code is already stored
        let (store, _, _) = setup(vec![record("https://a.example", "s0000", "2999-01-01")]).await;

        let c = store.create("https://b.example", "2999-01-01", None).await.unwrap();

        assert_eq!(c.as_str(), "s0001");
        assert_eq!(store.resolve(&code("s0000")).await.unwrap(), "https://a.example");
        assert_eq!(store.resolve(&c).await.unwrap(), "https://b.example");
    }

    #[tokio::test]
    async fn create_gives_up_after_max_attempts() {
        let gateway = InMemoryGateway::with_records(vec![record("https://a.example", "x", "2999-01-01")]);
        let store = RecordStore::bootstrap(
            StoreSettings::builder()
                .code_length(1)
                .max_generate_attempts(3)
                .build(),
            gateway.clone(),
            RandomGenerator::with_alphabet("x").unwrap(),
        )
        .await
        .unwrap();

        let err = store.create("https://b.example", "2999-01-01", None).await.unwrap_err();

        assert!(matches!(err, StoreError::CodeSpaceExhausted { attempts: 3 }));
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn create_rejects_bad_input() {
        let (store, gateway, _) = setup(vec![]).await;

        let err = store.create("https://a.example", "soon", None).await.unwrap_err();
        assert!(matches!(err, StoreError::DateFormat(_)));

        let err = store.create("", "2999-01-01", None).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidTarget(_)));

        assert!(store.is_empty().await);
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn failed_write_back_leaves_memory_unchanged() {
        let (store, gateway, _) = setup(vec![record("https://a.example", "abc", "2999-01-01")]).await;
        gateway.fail_writes(true);

        let err = store.create("https://b.example", "2999-01-01", None).await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(StorageError::Write(_))));

        let err = store.update_target(&code("abc"), "https://c.example").await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(StorageError::Write(_))));

        let err = store.extend_expiry(&code("abc"), 1).await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(StorageError::Write(_))));

        assert_eq!(
            store.records().await,
            vec![record("https://a.example", "abc", "2999-01-01")]
        );
        assert_eq!(gateway.snapshot(), store.records().await);
    }

    #[tokio::test]
    async fn failed_purge_keeps_expired_records() {
        let seeded = vec![
            record("https://old.example", "old", "2000-01-01"),
            record("https://a.example", "abc", "2999-01-01"),
        ];
        let (store, gateway, _) = setup(seeded.clone()).await;
        gateway.fail_writes(true);

        let err = store.purge_expired().await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(StorageError::Write(_))));

        assert_eq!(store.records().await, seeded);
        assert_eq!(store.get_record(&code("old")).await.unwrap().target, "https://old.example");
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn update_target_existing() {
        let (store, gateway, _) = setup(vec![record("https://a.example", "abc", "2999-01-01")]).await;

        assert!(store.update_target(&code("abc"), "https://b.example").await.unwrap());

        assert_eq!(store.resolve(&code("abc")).await.unwrap(), "https://b.example");
        assert_eq!(
            gateway.snapshot(),
            vec![record("https://b.example", "abc", "2999-01-01")]
        );
    }

    #[tokio::test]
    async fn update_target_missing_still_writes_back() {
        let (store, gateway, _) = setup(vec![record("https://a.example", "abc", "2999-01-01")]).await;

        assert!(!store.update_target(&code("nope"), "https://b.example").await.unwrap());

        assert_eq!(gateway.write_count(), 1);
        assert_eq!(store.resolve(&code("abc")).await.unwrap(), "https://a.example");
    }

    #[tokio::test]
    async fn update_target_rejects_empty_target() {
        let (store, gateway, _) = setup(vec![record("https://a.example", "abc", "2999-01-01")]).await;

        let err = store.update_target(&code("abc"), "").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidTarget(_)));
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn extend_expiry_moves_by_calendar_days() {
        let (store, gateway, clock) = setup(vec![record("https://a.example", "abc", "2030-01-15")]).await;

        let extended = store.extend_expiry(&code("abc"), 30).await.unwrap();
        assert_eq!(extended, "2030-02-14");
        assert_eq!(gateway.snapshot()[0].expiry, "2030-02-14");

        clock.set(ts("2030-02-13T23:59:59Z"));
        assert!(store.resolve(&code("abc")).await.is_ok());

        clock.set(ts("2030-02-14T00:00:01Z"));
        assert!(matches!(
            store.resolve(&code("abc")).await,
            Err(StoreError::Expired { .. })
        ));
    }

    #[tokio::test]
    async fn extend_expiry_missing_is_not_found() {
        let (store, gateway, _) = setup(vec![]).await;

        let err = store.extend_expiry(&code("nope"), 30).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn extend_expiry_malformed_is_date_error() {
        let (store, gateway, _) = setup(vec![record("https://a.example", "bad", "later")]).await;

        let err = store.extend_expiry(&code("bad"), 30).await.unwrap_err();
        assert!(matches!(err, StoreError::DateFormat(_)));
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn purge_removes_exactly_expired_and_keeps_order() {
        let (store, gateway, clock) = setup(vec![
            record("https://1.example", "one", "2030-01-01"),
            record("https://2.example", "two", "2029-12-31"),
            record("https://3.example", "three", "2999-01-01"),
            record("https://4.example", "four", "2030-01-02"),
            record("https://5.example", "five", "2000-01-01"),
        ])
        .await;
        // exactly at one's expiry: not expired
        clock.set(ts("2030-01-01T00:00:00Z"));

        assert_eq!(store.purge_expired().await.unwrap(), 2);

        let expected = vec![
            record("https://1.example", "one", "2030-01-01"),
            record("https://3.example", "three", "2999-01-01"),
            record("https://4.example", "four", "2030-01-02"),
        ];
        assert_eq!(store.records().await, expected);
        assert_eq!(gateway.snapshot(), expected);
    }

    #[tokio::test]
    async fn purge_with_nothing_expired_still_writes_back() {
        let (store, gateway, _) = setup(vec![record("https://a.example", "abc", "2999-01-01")]).await;

        assert_eq!(store.purge_expired().await.unwrap(), 0);
        assert_eq!(gateway.write_count(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn purge_is_all_or_nothing_on_malformed_expiry() {
        let seeded = vec![
            record("https://old.example", "old", "2000-01-01"),
            record("https://bad.example", "bad", "not-a-date"),
        ];
        let (store, gateway, _) = setup(seeded.clone()).await;

        let err = store.purge_expired().await.unwrap_err();

        assert!(matches!(err, StoreError::DateFormat(_)));
        assert_eq!(store.records().await, seeded);
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn reload_discards_in_memory_state() {
        let (store, gateway, _) = setup(vec![]).await;
        store.create("https://a.example", "2999-01-01", None).await.unwrap();

        // someone else replaced the durable copy
        gateway
            .write_all(&[record("https://z.example", "zzz", "2999-01-01")])
            .await
            .unwrap();

        assert_eq!(store.reload().await.unwrap(), 1);
        assert_eq!(store.resolve(&code("zzz")).await.unwrap(), "https://z.example");
    }

    #[tokio::test]
    async fn reload_failure_keeps_current_records() {
        let (store, gateway, _) = setup(vec![record("https://a.example", "abc", "2999-01-01")]).await;
        gateway.fail_loads(true);

        assert!(store.reload().await.is_err());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn expiry_in_counts_from_clock() {
        let (store, _, _) = setup(vec![]).await;

        assert_eq!(store.expiry_in(30).unwrap(), "2030-01-31");
    }

    #[tokio::test]
    async fn end_to_end_lifecycle() {
        let (store, gateway, clock) = setup(vec![]).await;

        let c1 = store.create("http://a.example", "2999-01-01", None).await.unwrap();
        assert_eq!(c1.as_str().len(), 5);
        assert_eq!(store.resolve(&c1).await.unwrap(), "http://a.example");

        assert!(store.update_target(&c1, "http://b.example").await.unwrap());
        assert_eq!(store.resolve(&c1).await.unwrap(), "http://b.example");

        assert_eq!(store.extend_expiry(&c1, 30).await.unwrap(), "2999-01-31");

        clock.set(ts("2999-01-31T00:00:01Z"));
        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert!(matches!(store.resolve(&c1).await, Err(StoreError::NotFound(_))));
        assert!(gateway.snapshot().is_empty());
    }

    #[tokio::test]
    async fn concurrent_creates_are_all_persisted() {
        let gateway = InMemoryGateway::new();
        let store = Arc::new(
            RecordStore::bootstrap(
                StoreSettings::default(),
                gateway.clone(),
                RandomGenerator::new(),
            )
            .await
            .unwrap(),
        );

        let mut handles = vec![];
        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .create(format!("https://example{i}.com"), "2999-01-01", None)
                    .await
                    .unwrap()
            }));
        }
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let _ = store.purge_expired().await;
                ShortCode::new_unchecked(format!("purge-{i}"))
            }));
        }

        let mut codes = HashSet::new();
        for handle in handles {
            let c = handle.await.unwrap();
            if !c.as_str().starts_with("purge-") {
                codes.insert(c);
            }
        }

        assert_eq!(codes.len(), 32);
        let records = store.records().await;
        assert_eq!(records.len(), 32);
        assert_eq!(gateway.snapshot(), records);
    }
}
