//! Current-user context

use super::types::{Access, Denial, SessionState};
use crate::auth::rbac::{Action, Permission, PermissionMatrix, Resource};
use crate::auth::{AuthChannel, Hierarchy, IdentityBinding};
use crate::config::{Config, DirectoryConfig};
use crate::core::catalog::AssetKind;
use crate::core::models::{AssetRecord, AssociateRecord, Entity, Principal, Role};
use crate::core::queries;
use crate::core::subscription::{QueryBinding, SubscriptionState};
use crate::storage::DocumentStore;
use crate::utils::error::{DeskError, RemoteError, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Process-wide channels injected into a session
#[derive(Clone, Default)]
pub struct SessionServices {
    pub auth: Option<Arc<dyn AuthChannel>>,
    pub store: Option<Arc<dyn DocumentStore>>,
}

impl SessionServices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auth(mut self, auth: Arc<dyn AuthChannel>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Drop the channels the configuration disables
    pub fn from_config(
        config: &Config,
        auth: Option<Arc<dyn AuthChannel>>,
        store: Option<Arc<dyn DocumentStore>>,
    ) -> Self {
        Self {
            auth: auth.filter(|_| config.auth().enabled),
            store: store.filter(|_| config.store().enabled),
        }
    }
}

impl std::fmt::Debug for SessionServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionServices")
            .field("auth", &self.auth.is_some())
            .field("store", &self.store.is_some())
            .finish()
    }
}

struct ContextInner {
    identity: IdentityBinding,
    directory: QueryBinding<AssociateRecord>,
    store: Option<Arc<dyn DocumentStore>>,
    matrix: PermissionMatrix,
    directory_config: DirectoryConfig,
    /// Admin the directory binding was last bound for; outer `None` until first bind
    bound_for: Mutex<Option<Option<String>>>,
    signed_out: AtomicBool,
    state: watch::Sender<SessionState>,
}

impl ContextInner {
    fn on_identity(&self, identity: &SubscriptionState<Option<Principal>>) {
        if self.signed_out.load(Ordering::SeqCst) {
            return;
        }

        // A channel failure resolves signed out, never back to unresolved.
        let next = if identity.loading {
            SessionState::Unresolved
        } else {
            SessionState::Resolved(IdentityBinding::principal_of(identity))
        };

        if let SessionState::Resolved(principal) = &next {
            self.sync_directory(principal.as_ref());
        }

        let changed = self.state.send_if_modified(|state| {
            if *state == next {
                false
            } else {
                *state = next.clone();
                true
            }
        });
        if changed {
            info!(session = %next, "Session state changed");
        }
    }

    /// Point the directory binding at the principal's associates, or at nothing
    fn sync_directory(&self, principal: Option<&Principal>) {
        let admin = principal
            .filter(|principal| principal.role == Role::Admin)
            .map(|principal| principal.id.clone());

        {
            let mut bound_for = self.bound_for.lock();
            if bound_for.as_ref() == Some(&admin) {
                return;
            }
            *bound_for = Some(admin.clone());
        }

        let source = admin.as_deref().and_then(|admin_id| {
            queries::associates_source(self.store.as_ref(), &self.directory_config, admin_id)
        });
        if admin.is_some() && source.is_none() {
            debug!("No document store; subordinate list stays empty");
        }
        self.directory.bind(source);
    }
}

/// Who am I, what can I do, who do I manage.
///
/// Cheap to clone; every clone observes the same session. Dropping the last
/// clone releases every subscription the context holds.
#[derive(Clone)]
pub struct CurrentUserContext {
    inner: Arc<ContextInner>,
}

impl CurrentUserContext {
    /// Start a session over `services`. The context is `Unresolved` until the
    /// authentication channel reports, or resolves signed out at once when there
    /// is no channel.
    pub fn start(
        services: SessionServices,
        matrix: PermissionMatrix,
        directory_config: DirectoryConfig,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Unresolved);
        let inner = Arc::new(ContextInner {
            identity: IdentityBinding::new(),
            directory: QueryBinding::new("directory"),
            store: services.store,
            matrix,
            directory_config,
            bound_for: Mutex::new(None),
            signed_out: AtomicBool::new(false),
            state,
        });

        let weak: Weak<ContextInner> = Arc::downgrade(&inner);
        inner.identity.on_change(move |identity| {
            if let Some(inner) = weak.upgrade() {
                inner.on_identity(identity);
            }
        });

        info!(
            auth = services.auth.is_some(),
            store = inner.store.is_some(),
            "Starting current-user context"
        );
        inner.identity.mount(services.auth);

        Self { inner }
    }

    /// Start a session with the configured grants and collections
    pub fn from_config(config: &Config, services: SessionServices) -> Result<Self> {
        let matrix = PermissionMatrix::new(config.permissions())?;
        Ok(Self::start(services, matrix, config.directory().clone()))
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver for async consumers; sees every session transition
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Wait until the session resolves. Returns `None` when nobody is signed in
    /// or the context has been signed out.
    pub async fn resolved(&self) -> Option<Principal> {
        let inner = &self.inner;
        let mut receiver = self.watch();
        let resolved = receiver
            .wait_for(|state| state.is_resolved() || inner.signed_out.load(Ordering::SeqCst))
            .await
            .ok()?
            .principal()
            .cloned();
        resolved
    }

    pub fn principal(&self) -> Option<Principal> {
        self.inner.state.borrow().principal().cloned()
    }

    pub fn role(&self) -> Option<Role> {
        self.inner.state.borrow().principal().map(|principal| principal.role)
    }

    /// Whether identity or the subordinate list is still settling
    pub fn is_loading(&self) -> bool {
        if self.is_signed_out() {
            return false;
        }
        if !self.inner.state.borrow().is_resolved() {
            return true;
        }
        let bound_to_admin = matches!(*self.inner.bound_for.lock(), Some(Some(_)));
        bound_to_admin && self.inner.directory.is_loading()
    }

    /// Associates the signed-in admin owns, ordered by identifier.
    ///
    /// Empty until resolved, for associates, and after sign-out. A directory
    /// error keeps the last known list.
    pub fn subordinates(&self) -> Vec<Entity<AssociateRecord>> {
        let state = self.state();
        match state.principal() {
            Some(principal) => self.hierarchy().subordinates_of(Some(principal)),
            None => Vec::new(),
        }
    }

    /// Hierarchy built from the last directory snapshot
    pub fn hierarchy(&self) -> Hierarchy {
        Hierarchy::from_associates(self.inner.directory.data().unwrap_or_default())
    }

    /// Last directory failure, if the subordinate list is stale
    pub fn directory_error(&self) -> Option<RemoteError> {
        self.inner.directory.error()
    }

    /// Last authentication channel failure
    pub fn identity_error(&self) -> Option<RemoteError> {
        self.inner.identity.error()
    }

    pub fn watch_directory(
        &self,
    ) -> watch::Receiver<SubscriptionState<Vec<Entity<AssociateRecord>>>> {
        self.inner.directory.watch()
    }

    /// Authorization predicate bound to the current principal's role
    pub fn is_authorized(&self, resource: Resource, action: Action) -> bool {
        self.role()
            .is_some_and(|role| self.inner.matrix.is_authorized(role, resource, action))
    }

    /// Gate a privileged view
    pub fn access(&self, resource: Resource, action: Action) -> Access {
        match self.state() {
            SessionState::Unresolved => Access::Denied(Denial::Unresolved),
            SessionState::Resolved(None) => Access::Denied(Denial::SignedOut),
            SessionState::Resolved(Some(principal)) => {
                if self
                    .inner
                    .matrix
                    .is_authorized(principal.role, resource, action)
                {
                    Access::Granted(principal)
                } else {
                    Access::Denied(Denial::Forbidden)
                }
            }
        }
    }

    /// Principal allowed to perform `action`, or `Unauthorized` for a caller
    /// that skipped the gate
    pub fn require(&self, resource: Resource, action: Action) -> Result<Principal> {
        match self.access(resource, action) {
            Access::Granted(principal) => Ok(principal),
            Access::Denied(denial) => {
                let permission = Permission::new(resource, action);
                warn!(%permission, %denial, "Privileged action attempted without access");
                Err(DeskError::unauthorized(format!("{}: {}", permission, denial)))
            }
        }
    }

    /// Grants of the current role, sorted
    pub fn permissions(&self) -> Vec<Permission> {
        self.role()
            .map(|role| self.inner.matrix.permissions_for(role))
            .unwrap_or_default()
    }

    pub fn matrix(&self) -> &PermissionMatrix {
        &self.inner.matrix
    }

    /// The injected store, for pages opening their own bindings
    pub fn store(&self) -> Result<Arc<dyn DocumentStore>> {
        self.inner
            .store
            .clone()
            .ok_or_else(|| DeskError::channel_unavailable("No document store configured"))
    }

    /// Live list of `kind` assets visible to the current principal.
    ///
    /// Fails with `Unauthorized` when the role may not view `kind`. Without a
    /// store the binding settles idle with no data.
    pub fn assets(&self, kind: AssetKind) -> Result<QueryBinding<AssetRecord>> {
        let principal = self.require(Resource::Asset(kind), Action::View)?;
        let source = queries::assets_source(
            self.inner.store.as_ref(),
            &self.inner.directory_config,
            Some(&principal),
            kind,
        );
        Ok(QueryBinding::bound(format!("assets:{}", kind.slug()), source))
    }

    /// Tear the session down: release every subscription and return to
    /// `Unresolved`. Returns `false` when already signed out.
    pub fn sign_out(&self) -> bool {
        if self.inner.signed_out.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.inner.identity.release();
        self.inner.directory.release();
        *self.inner.bound_for.lock() = None;
        self.inner.state.send_replace(SessionState::Unresolved);
        info!("Current-user context signed out");
        true
    }

    pub fn is_signed_out(&self) -> bool {
        self.inner.signed_out.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for CurrentUserContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentUserContext")
            .field("state", &self.state())
            .field("signed_out", &self.is_signed_out())
            .finish()
    }
}
