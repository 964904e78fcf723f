//! Binding integration tests against a manually driven store

#[cfg(test)]
mod tests {
    use crate::common::ManualStore;
    use assetdesk::core::models::AssociateRecord;
    use assetdesk::core::subscription::{
        DocumentBinding, DocumentSource, QueryBinding, QuerySource, SubscriptionState,
    };
    use assetdesk::storage::{CollectionQuery, Document, DocumentRef, DocumentStore};
    use assetdesk::utils::error::{RemoteError, RemoteErrorKind};
    use serde_json::json;
    use std::sync::Arc;

    fn associate(id: &str, name: &str) -> Document {
        Document::new(id, json!({ "admin_id": "a-1", "name": name }))
    }

    fn directory_source(store: &Arc<ManualStore>) -> QuerySource<AssociateRecord> {
        let store: Arc<dyn DocumentStore> = store.clone();
        QuerySource::new(store, CollectionQuery::collection("associates"))
    }

    fn profile_source(store: &Arc<ManualStore>, id: &str) -> DocumentSource<AssociateRecord> {
        let store: Arc<dyn DocumentStore> = store.clone();
        DocumentSource::new(store, DocumentRef::new("associates", id))
    }

    #[test]
    fn test_error_after_two_snapshots_keeps_second() {
        let store = ManualStore::new();
        let binding = QueryBinding::bound("associates", Some(directory_source(&store)));

        store.fire_query_at(0, Ok(vec![associate("x", "Xavier")]));
        store.fire_query_at(
            0,
            Ok(vec![associate("x", "Xavier"), associate("y", "Yamini")]),
        );
        store.fire_query_at(0, Err(RemoteError::permission_denied("rules changed")));

        let state = binding.state();
        assert!(!state.loading);
        assert_eq!(state.data.map(|list| list.len()), Some(2));
        assert_eq!(
            state.error.map(|e| e.kind),
            Some(RemoteErrorKind::PermissionDenied)
        );
    }

    #[test]
    fn test_empty_result_is_empty_list_not_absent() {
        let store = ManualStore::new();
        let binding = QueryBinding::bound("associates", Some(directory_source(&store)));

        store.fire_query_at(0, Ok(vec![]));

        assert_eq!(
            binding.state(),
            SubscriptionState {
                data: Some(vec![]),
                loading: false,
                error: None,
            }
        );
    }

    #[test]
    fn test_rebind_never_applies_old_source_after_return() {
        let store = ManualStore::new();
        let binding = DocumentBinding::bound("profile", Some(profile_source(&store, "x")));
        store.fire_document_at(0, Ok(Some(associate("x", "Xavier"))));

        binding.bind(Some(profile_source(&store, "y")));
        assert_eq!(store.reference_at(1), Some(DocumentRef::new("associates", "y")));
        assert_eq!(store.live(), 1);

        store.fire_document_at(0, Ok(Some(associate("x", "Xavier II"))));
        store.fire_document_at(0, Err(RemoteError::internal("late")));
        assert!(binding.is_loading());
        assert!(binding.entity().is_none());

        store.fire_document_at(1, Ok(Some(associate("y", "Yamini"))));
        assert_eq!(binding.entity().map(|e| e.name.clone()), Some("Yamini".to_string()));
        assert!(binding.error().is_none());
    }

    #[test]
    fn test_absent_source_never_subscribes() {
        let store = ManualStore::new();
        let binding: QueryBinding<AssociateRecord> = QueryBinding::bound("associates", None);

        assert_eq!(binding.state(), SubscriptionState::idle());
        assert_eq!(store.opened(), 0);
    }

    #[test]
    fn test_switching_to_absent_releases_subscription() {
        let store = ManualStore::new();
        let binding = QueryBinding::bound("associates", Some(directory_source(&store)));
        store.fire_query_at(0, Ok(vec![associate("x", "Xavier")]));

        binding.bind(None);

        assert_eq!(store.live(), 0);
        assert_eq!(binding.state(), SubscriptionState::idle());
        store.fire_query_at(0, Ok(vec![]));
        assert!(binding.data().is_none());
    }

    #[test]
    fn test_release_twice_is_harmless() {
        let store = ManualStore::new();
        let binding = QueryBinding::bound("associates", Some(directory_source(&store)));
        store.fire_query_at(0, Ok(vec![associate("x", "Xavier")]));

        assert!(binding.release());
        assert!(!binding.release());

        assert_eq!(store.live(), 0);
        assert_eq!(binding.data().map(|list| list.len()), Some(1));
    }

    #[test]
    fn test_undecodable_document_reports_decode_error() {
        let store = ManualStore::new();
        let binding = QueryBinding::bound("associates", Some(directory_source(&store)));
        store.fire_query_at(0, Ok(vec![associate("x", "Xavier")]));

        store.fire_query_at(0, Ok(vec![Document::new("bad", json!({ "name": 7 }))]));

        assert_eq!(binding.error().map(|e| e.kind), Some(RemoteErrorKind::Decode));
        assert_eq!(binding.data().map(|list| list.len()), Some(1));
    }

    #[test]
    fn test_bindings_over_same_source_are_independent() {
        let store = ManualStore::new();
        let first = QueryBinding::bound("first", Some(directory_source(&store)));
        let second = QueryBinding::bound("second", Some(directory_source(&store)));
        assert_eq!(store.opened(), 2);

        store.fire_query_at(0, Ok(vec![associate("x", "Xavier")]));

        assert!(first.data().is_some());
        assert!(second.is_loading());

        drop(first);
        assert_eq!(store.live(), 1);
    }

    #[test]
    fn test_unbound_and_released_bindings_are_not_loading() {
        let store = ManualStore::new();
        let unbound: QueryBinding<AssociateRecord> = QueryBinding::new("associates");
        assert!(!unbound.is_loading());

        let binding = QueryBinding::bound("associates", Some(directory_source(&store)));
        assert!(binding.is_loading());
        binding.release();

        assert_eq!(store.live(), 0);
        assert!(!binding.is_active());
        assert!(!binding.is_loading());

        store.fire_query_at(0, Ok(vec![associate("x", "Xavier")]));
        assert!(binding.data().is_none());
    }

    #[tokio::test]
    async fn test_watch_receiver_observes_updates() {
        let store = ManualStore::new();
        let binding = QueryBinding::bound("associates", Some(directory_source(&store)));
        let mut receiver = binding.watch();
        receiver.borrow_and_update();

        store.fire_query_at(0, Ok(vec![associate("x", "Xavier")]));

        receiver.changed().await.unwrap();
        assert_eq!(
            receiver.borrow().data.as_ref().map(|list| list.len()),
            Some(1)
        );
    }
}
