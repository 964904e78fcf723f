//! Current-user context integration tests

#[cfg(test)]
mod tests {
    use crate::common::{DeskFixture, ManualStore, PrincipalFactory};
    use crate::{assert_err, assert_ok};
    use assetdesk::auth::{Action, MemoryAuthChannel, PermissionMatrix, Resource};
    use assetdesk::config::DirectoryConfig;
    use assetdesk::core::catalog::AssetKind;
    use assetdesk::storage::Document;
    use assetdesk::utils::error::RemoteError;
    use assetdesk::{Access, CurrentUserContext, Denial, DeskError, SessionServices, SessionState};
    use serde_json::json;
    use std::sync::Arc;

    fn associate_doc(id: &str, admin_id: &str) -> Document {
        Document::new(id, json!({ "admin_id": admin_id, "name": id.to_uppercase() }))
    }

    // ==================== Gating ====================

    #[test]
    fn test_associate_gets_denial_view_for_admin_page() {
        let desk = DeskFixture::new();
        desk.sign_in_associate("x");

        assert!(!desk.context.is_authorized(Resource::Admin, Action::View));
        assert_eq!(
            desk.context.access(Resource::Admin, Action::View),
            Access::Denied(Denial::Forbidden)
        );
        let err = assert_err!(desk.context.require(Resource::Admin, Action::View));
        assert!(matches!(err, DeskError::Unauthorized(_)));
    }

    #[test]
    fn test_every_denial_blocks_privileged_content() {
        let desk = DeskFixture::new();

        // Signed out.
        assert!(!desk.context.access(Resource::Associate, Action::View).is_granted());

        desk.sign_in_associate("x");
        assert!(!desk.context.access(Resource::Associate, Action::Delete).is_granted());
        assert!(desk.context.access(Resource::Associate, Action::View).is_granted());

        desk.context.sign_out();
        assert!(!desk.context.access(Resource::Associate, Action::View).is_granted());
    }

    // ==================== Subordinates ====================

    #[test]
    fn test_admin_roster_follows_directory() {
        let desk = DeskFixture::new();
        desk.add_associate("y", "a-1");
        desk.add_associate("x", "a-1");
        desk.add_associate("q", "a-2");

        desk.sign_in_admin("a-1");
        assert_eq!(desk.subordinate_ids(), vec!["x", "y"]);

        desk.store.delete(&desk.directory.associates_collection, "y");
        assert_eq!(desk.subordinate_ids(), vec!["x"]);
    }

    #[test]
    fn test_associate_and_signed_out_have_no_roster() {
        let desk = DeskFixture::new();
        desk.add_associate("x", "a-1");

        assert!(desk.subordinate_ids().is_empty());

        desk.sign_in_associate("x");
        assert!(desk.subordinate_ids().is_empty());
    }

    #[test]
    fn test_admin_without_associates_has_empty_roster() {
        let desk = DeskFixture::new();
        desk.sign_in_admin("a-9");

        assert!(desk.subordinate_ids().is_empty());
        assert!(!desk.context.is_loading());
        assert!(desk.context.directory_error().is_none());
    }

    #[test]
    fn test_directory_query_targets_admin() {
        let store = ManualStore::new();
        let channel = MemoryAuthChannel::new();
        let _context = CurrentUserContext::start(
            SessionServices::new()
                .with_auth(Arc::new(channel.clone()))
                .with_store(store.clone()),
            PermissionMatrix::default(),
            DirectoryConfig::default(),
        );

        channel.sign_in(PrincipalFactory::admin("a-1"));

        let query = store.query_at(0).expect("directory query");
        assert_eq!(query.collection, "associates");
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.filters[0].field, "admin_id");
        assert_eq!(query.filters[0].value, json!("a-1"));
    }

    #[test]
    fn test_late_roster_from_previous_admin_is_dropped() {
        let store = ManualStore::new();
        let channel = MemoryAuthChannel::new();
        let context = CurrentUserContext::start(
            SessionServices::new()
                .with_auth(Arc::new(channel.clone()))
                .with_store(store.clone()),
            PermissionMatrix::default(),
            DirectoryConfig::default(),
        );

        channel.sign_in(PrincipalFactory::admin("a-1"));
        assert!(context.is_loading());
        channel.sign_in(PrincipalFactory::admin("a-2"));
        assert_eq!(store.opened(), 2);
        assert_eq!(store.live(), 1);

        store.fire_query_at(0, Ok(vec![associate_doc("x", "a-1")]));
        assert!(context.subordinates().is_empty());
        assert!(context.is_loading());

        store.fire_query_at(1, Ok(vec![associate_doc("z", "a-2")]));
        let ids: Vec<String> = context.subordinates().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["z"]);
        assert!(!context.is_loading());
    }

    #[test]
    fn test_roster_error_keeps_last_list() {
        let store = ManualStore::new();
        let channel = MemoryAuthChannel::new();
        let context = CurrentUserContext::start(
            SessionServices::new()
                .with_auth(Arc::new(channel.clone()))
                .with_store(store.clone()),
            PermissionMatrix::default(),
            DirectoryConfig::default(),
        );
        channel.sign_in(PrincipalFactory::admin("a-1"));

        store.fire_query_at(0, Ok(vec![associate_doc("x", "a-1")]));
        store.fire_query_at(
            0,
            Ok(vec![associate_doc("x", "a-1"), associate_doc("y", "a-1")]),
        );
        store.fire_query_at(0, Err(RemoteError::unavailable("connection reset")));

        let ids: Vec<String> = context.subordinates().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["x", "y"]);
        assert!(context.directory_error().is_some());
        assert!(context.state().is_resolved());
    }

    // ==================== Lifecycle ====================

    #[test]
    fn test_sign_out_returns_to_unresolved() {
        let desk = DeskFixture::new();
        desk.add_associate("x", "a-1");
        desk.sign_in_admin("a-1");
        assert_eq!(desk.store.watcher_count(), 1);

        assert!(desk.context.sign_out());

        assert_eq!(desk.context.state(), SessionState::Unresolved);
        assert!(desk.context.subordinates().is_empty());
        assert_eq!(desk.channel.listener_count(), 0);
        assert_eq!(desk.store.watcher_count(), 0);
        assert!(!desk.context.sign_out());
    }

    #[test]
    fn test_no_channels_degrade_to_signed_out() {
        let context = CurrentUserContext::start(
            SessionServices::new(),
            PermissionMatrix::default(),
            DirectoryConfig::default(),
        );

        assert_eq!(context.state(), SessionState::Resolved(None));
        assert!(context.subordinates().is_empty());
        assert!(matches!(
            context.store(),
            Err(DeskError::ChannelUnavailable(_))
        ));
    }

    #[test]
    fn test_assets_follow_principal_scope() {
        let desk = DeskFixture::new();
        desk.add_associate("x", "a-1");
        desk.add_asset("h-1", AssetKind::HealthInsurance, "x", "a-1");
        desk.add_asset("h-2", AssetKind::HealthInsurance, "y", "a-1");
        desk.add_asset("h-3", AssetKind::HealthInsurance, "z", "a-2");

        desk.sign_in_admin("a-1");
        let assets = assert_ok!(desk.context.assets(AssetKind::HealthInsurance));
        let ids: Vec<String> = assets.data().unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["h-1", "h-2"]);

        desk.add_asset("h-4", AssetKind::HealthInsurance, "x", "a-1");
        assert_eq!(assets.data().map(|list| list.len()), Some(3));

        desk.sign_in_associate("x");
        let assets = assert_ok!(desk.context.assets(AssetKind::HealthInsurance));
        let ids: Vec<String> = assets.data().unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["h-1", "h-4"]);
    }

    #[tokio::test]
    async fn test_async_consumer_sees_resolution() {
        let desk = DeskFixture::new();
        let mut receiver = desk.context.watch();

        let channel = desk.channel.clone();
        tokio::spawn(async move {
            channel.sign_in(PrincipalFactory::admin("a-1"));
        });

        let resolved = receiver
            .wait_for(|state| state.principal().is_some())
            .await
            .unwrap()
            .clone();
        assert_eq!(resolved.principal().map(|p| p.id.as_str()), Some("a-1"));
    }
}
