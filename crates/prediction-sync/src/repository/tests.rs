//! Repository Integration Tests
//!
//! PredictionRepo over an in-memory store, a fixed baseline and a scripted
//! contents API.

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use async_trait::async_trait;

    use crate::config::AdminConfig;
    use crate::domain::{DomainError, Prediction, PredictionDraft, SyncCredentials};
    use crate::remote::{
        decode_content, BaselineSource, ContentsApi, PushOutcome, PutFileRequest, RemoteFile,
        RemoteSyncClient, SyncError, SyncTarget,
    };
    use crate::repository::{PositionalRepository, PredictionRepo, RepoState, Repository};
    use crate::store::{KeyValueStore, LocalStore, MemoryStore, StoreError, PREDICTIONS_KEY};

    #[derive(Clone, Default)]
    struct FixedBaseline {
        predictions: Vec<Prediction>,
        fetches: Rc<RefCell<usize>>,
    }

    #[async_trait(?Send)]
    impl BaselineSource for FixedBaseline {
        async fn fetch_baseline(&self) -> Vec<Prediction> {
            *self.fetches.borrow_mut() += 1;
            self.predictions.clone()
        }
    }

    /// Remote that always reports a missing file and answers puts with `put_result`.
    #[derive(Clone)]
    struct RecordingApi {
        put_result: Result<(), SyncError>,
        puts: Rc<RefCell<Vec<PutFileRequest>>>,
    }

    impl RecordingApi {
        fn accepting() -> Self {
            Self {
                put_result: Ok(()),
                puts: Rc::default(),
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                put_result: Err(SyncError::Rejected {
                    status: 401,
                    message: message.into(),
                }),
                puts: Rc::default(),
            }
        }

        fn last_written(&self) -> Vec<Prediction> {
            let puts = self.puts.borrow();
            let content = &puts.last().expect("a put").content;
            serde_json::from_str(&decode_content(content).unwrap()).unwrap()
        }
    }

    #[async_trait(?Send)]
    impl ContentsApi for RecordingApi {
        async fn check_repo(&self, _credentials: &SyncCredentials) -> Result<(), SyncError> {
            self.put_result.clone()
        }

        async fn get_file(
            &self,
            _credentials: &SyncCredentials,
            _path: &str,
            _branch: Option<&str>,
        ) -> Result<Option<RemoteFile>, SyncError> {
            Ok(None)
        }

        async fn put_file(
            &self,
            _credentials: &SyncCredentials,
            _path: &str,
            request: &PutFileRequest,
        ) -> Result<(), SyncError> {
            self.puts.borrow_mut().push(request.clone());
            self.put_result.clone()
        }
    }

    struct Fixture {
        repo: PredictionRepo,
        backend: MemoryStore,
        baseline: FixedBaseline,
        api: RecordingApi,
    }

    fn setup(baseline: Vec<Prediction>, api: RecordingApi, with_credentials: bool) -> Fixture {
        let backend = MemoryStore::new();
        let store = LocalStore::new(backend.clone());
        if with_credentials {
            store
                .save_credentials(&SyncCredentials::new("acme", "forecasts", "token"))
                .unwrap();
        }
        let baseline = FixedBaseline {
            predictions: baseline,
            ..Default::default()
        };
        let remote = RemoteSyncClient::new(
            api.clone(),
            SyncTarget::from_config(&AdminConfig::default()),
        );
        Fixture {
            repo: PredictionRepo::new(store, baseline.clone(), remote),
            backend,
            baseline,
            api,
        }
    }

    fn draft(date: &str, condition: &str) -> PredictionDraft {
        PredictionDraft {
            date: date.into(),
            temperature: "18".into(),
            condition: condition.into(),
            ..Default::default()
        }
    }

    fn stored(backend: &MemoryStore) -> Vec<Prediction> {
        let raw = backend.get(PREDICTIONS_KEY).unwrap().expect("stored list");
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_from_baseline_seeds_store() {
        let snow: Prediction = serde_json::from_str(
            r#"{"date":"2024-01-01","temperature":"5","condition":"Snow"}"#,
        )
        .unwrap();
        let fx = setup(vec![snow], RecordingApi::accepting(), false);
        assert_eq!(fx.repo.state(), RepoState::Uninitialized);

        assert_eq!(fx.repo.initialize().await.unwrap(), 1);
        assert_eq!(fx.repo.state(), RepoState::Ready);

        let list = fx.repo.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].date, "2024-01-01");
        assert_eq!(list[0].temperature, "5");
        assert_eq!(list[0].condition, "Snow");
        assert_eq!(stored(&fx.backend), list);
    }

    #[tokio::test]
    async fn test_local_copy_short_circuits_baseline() {
        let fx = setup(
            vec![Prediction::new("2024-01-01", "5", "Snow")],
            RecordingApi::accepting(),
            false,
        );
        let local = vec![Prediction::new("2024-06-01", "30", "Hot")];
        LocalStore::new(fx.backend.clone()).save(&local).unwrap();

        assert_eq!(fx.repo.list().await.unwrap(), local);
        assert_eq!(*fx.baseline.fetches.borrow(), 0);
    }

    #[tokio::test]
    async fn test_first_access_loads_once() {
        let fx = setup(Vec::new(), RecordingApi::accepting(), false);
        fx.repo.list().await.unwrap();
        fx.repo.list().await.unwrap();
        assert_eq!(*fx.baseline.fetches.borrow(), 1);
        // An empty baseline still seeds the store
        assert!(stored(&fx.backend).is_empty());
    }

    #[tokio::test]
    async fn test_add_prepends_and_persists() {
        let fx = setup(
            vec![Prediction::new("2024-01-01", "5", "Snow")],
            RecordingApi::accepting(),
            false,
        );

        let report = fx.repo.add(draft("2024-05-01", "Rain")).await.unwrap();
        assert_eq!(report.sync, Ok(PushOutcome::Skipped));

        let list = fx.repo.list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], report.record);
        assert_eq!(stored(&fx.backend), list);
    }

    #[tokio::test]
    async fn test_add_with_empty_condition_is_rejected() {
        let fx = setup(
            vec![Prediction::new("2024-01-01", "5", "Snow")],
            RecordingApi::accepting(),
            true,
        );
        let before = fx.repo.list().await.unwrap();

        let result = fx.repo.add(draft("2024-05-01", "")).await;
        assert!(matches!(result, Err(DomainError::Validation("condition"))));
        assert_eq!(fx.repo.list().await.unwrap(), before);
        assert!(fx.api.puts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_delete_at_removes_exactly_one() {
        let fx = setup(
            vec![
                Prediction::new("2024-01-01", "5", "Snow"),
                Prediction::new("2024-01-02", "7", "Sleet"),
                Prediction::new("2024-01-03", "9", "Fog"),
            ],
            RecordingApi::accepting(),
            false,
        );
        let before = fx.repo.list().await.unwrap();

        let report = fx.repo.delete_at(1).await.unwrap();
        assert_eq!(report.record, before[1]);

        let after = fx.repo.list().await.unwrap();
        assert_eq!(after.len(), before.len() - 1);
        assert!(!after.contains(&before[1]));
        assert_eq!(stored(&fx.backend), after);
    }

    #[tokio::test]
    async fn test_delete_at_out_of_range() {
        let fx = setup(
            vec![Prediction::new("2024-01-01", "5", "Snow")],
            RecordingApi::accepting(),
            false,
        );
        let before = fx.repo.list().await.unwrap();

        let result = fx.repo.delete_at(1).await;
        assert!(matches!(
            result,
            Err(DomainError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(fx.repo.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let fx = setup(
            vec![
                Prediction::new("2024-01-01", "5", "Snow"),
                Prediction::new("2024-01-02", "7", "Sleet"),
            ],
            RecordingApi::accepting(),
            false,
        );
        let target = fx.repo.list().await.unwrap()[1].clone();

        fx.repo.delete(&target.id).await.unwrap();
        assert!(fx.repo.find_by_id(&target.id).await.unwrap().is_none());

        let missing = fx.repo.delete(&target.id).await;
        assert!(matches!(missing, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_mutations_are_mirrored() {
        let fx = setup(Vec::new(), RecordingApi::accepting(), true);

        let report = fx.repo.add(draft("2024-05-01", "Rain")).await.unwrap();
        assert_eq!(report.sync, Ok(PushOutcome::Created));
        assert_eq!(fx.api.last_written(), fx.repo.list().await.unwrap());

        fx.repo.delete_at(0).await.unwrap();
        assert!(fx.api.last_written().is_empty());
        assert_eq!(fx.api.puts.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_push_keeps_local_mutation() {
        let fx = setup(Vec::new(), RecordingApi::rejecting("Bad credentials"), true);

        let added = fx.repo.commit_add(draft("2024-05-01", "Rain")).await.unwrap();
        let before_push = fx.repo.list().await.unwrap();

        let err = fx.repo.sync_remote().await.unwrap_err();
        assert_eq!(err.to_string(), "Bad credentials");
        assert_eq!(fx.repo.list().await.unwrap(), before_push);
        assert_eq!(before_push[0], added);
        assert_eq!(stored(&fx.backend), before_push);
    }

    #[tokio::test]
    async fn test_add_reports_push_failure() {
        let fx = setup(Vec::new(), RecordingApi::rejecting("Bad credentials"), true);

        let report = fx.repo.add(draft("2024-05-01", "Rain")).await.unwrap();
        assert_eq!(
            report.sync,
            Err(SyncError::Rejected {
                status: 401,
                message: "Bad credentials".into()
            })
        );
        assert_eq!(fx.repo.list().await.unwrap()[0], report.record);
    }

    #[tokio::test]
    async fn test_credentials_round_trip() {
        let fx = setup(Vec::new(), RecordingApi::accepting(), false);
        assert!(fx.repo.credentials().unwrap().is_none());

        let creds = SyncCredentials::new("acme", "forecasts", "token");
        fx.repo.save_credentials(&creds).unwrap();
        assert_eq!(fx.repo.credentials().unwrap(), Some(creds.clone()));
        assert!(fx.repo.test_connection(&creds).await.is_ok());

        fx.repo.clear_credentials().unwrap();
        assert!(fx.repo.credentials().unwrap().is_none());
    }

    #[test]
    fn test_sync_target_follows_config() {
        let fx = setup(Vec::new(), RecordingApi::accepting(), false);
        let target = fx.repo.sync_target();
        assert_eq!(target.file_path, "data.json");
        assert_eq!(target.branch, None);
        assert!(!target.retry_on_conflict);
    }

    #[tokio::test]
    async fn test_legacy_ids_are_persisted_on_load() {
        let fx = setup(Vec::new(), RecordingApi::accepting(), false);
        fx.backend
            .set(
                PREDICTIONS_KEY,
                r#"[{"date":"2023-12-31","temperature":"1","condition":"Frost"}]"#,
            )
            .unwrap();

        let list = fx.repo.list().await.unwrap();
        assert_eq!(stored(&fx.backend)[0].id, list[0].id);
    }

    /// Memory store whose writes can be switched off, like a full quota.
    #[derive(Clone, Default)]
    struct QuotaStore {
        inner: MemoryStore,
        full: Rc<Cell<bool>>,
    }

    impl KeyValueStore for QuotaStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.full.get() {
                return Err(StoreError::Backend("quota".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    fn setup_with_quota(baseline: Vec<Prediction>, api: RecordingApi) -> (PredictionRepo, QuotaStore) {
        let backend = QuotaStore::default();
        let baseline = FixedBaseline {
            predictions: baseline,
            ..Default::default()
        };
        let remote = RemoteSyncClient::new(api, SyncTarget::from_config(&AdminConfig::default()));
        let repo = PredictionRepo::new(LocalStore::new(backend.clone()), baseline, remote);
        (repo, backend)
    }

    #[tokio::test]
    async fn test_failed_write_is_fatal_and_leaves_list_unchanged() {
        let api = RecordingApi::accepting();
        let (repo, backend) =
            setup_with_quota(vec![Prediction::new("2024-01-01", "5", "Snow")], api.clone());
        let before = repo.list().await.unwrap();
        backend.full.set(true);

        let result = repo.add(draft("2024-05-01", "Rain")).await;
        assert!(matches!(
            result,
            Err(DomainError::Storage(StoreError::Backend(_)))
        ));
        let result = repo.delete_at(0).await;
        assert!(matches!(result, Err(DomainError::Storage(_))));

        assert_eq!(repo.list().await.unwrap(), before);
        assert!(api.puts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failed_seed_returns_to_uninitialized() {
        let (repo, backend) = setup_with_quota(
            vec![Prediction::new("2024-01-01", "5", "Snow")],
            RecordingApi::accepting(),
        );
        backend.full.set(true);

        assert!(matches!(
            repo.initialize().await,
            Err(DomainError::Storage(_))
        ));
        assert_eq!(repo.state(), RepoState::Uninitialized);
        assert!(!backend.inner.contains(PREDICTIONS_KEY));

        // Next access retries the load
        backend.full.set(false);
        assert_eq!(repo.initialize().await.unwrap(), 1);
        assert_eq!(repo.state(), RepoState::Ready);
    }
}
