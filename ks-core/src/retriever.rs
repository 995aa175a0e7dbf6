use std::collections::HashMap;

use async_recursion::async_recursion;
use async_trait::async_trait;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use tracing::*;

use crate::errors::*;
use crate::k8s::KubectlGet;
use crate::prelude::*;
use crate::resources::SupportedKind;

err_impl! {RetrieverError,
    #[error("could not retrieve {0}")]
    NotFound(String),

    #[error("could not parse kubectl output for {0}")]
    Unparseable(String),
}

// Builds the ownership tree for each root identifier.  Results line up with the input: one per
// root, either the materialized tree or the reason that root couldn't be fetched this tick.
#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait ResourceRetriever: Send + Sync {
    async fn get_all_resources(&self, ids: &[ResourceIdentifier], options: &Options) -> Vec<anyhow::Result<Resource>>;
}

// Child listings are shared between siblings for the duration of one tick, so two ReplicaSets in
// the same namespace only cost one `kubectl get Pod`.
type ChildListings = HashMap<(SupportedKind, String), Vec<Resource>>;

pub struct KubectlResourceRetriever {
    kubectl: Box<dyn KubectlGet>,
}

impl KubectlResourceRetriever {
    pub fn new(kubectl: Box<dyn KubectlGet>) -> KubectlResourceRetriever {
        KubectlResourceRetriever { kubectl }
    }

    async fn get_resource(
        &self,
        id: &ResourceIdentifier,
        options: &Options,
        listings: &mut ChildListings,
    ) -> anyhow::Result<Resource> {
        let Some(json) = self.kubectl.get(&id.gvk.kind, &id.name, id.namespace_or_empty()).await else {
            debug!("{id} was not found");
            return Err(RetrieverError::not_found(&id.to_string()));
        };

        let mut resource = match Resource::from_json(&json, options) {
            Ok(resource) => resource,
            Err(err) => {
                log_parse_error(&id.to_string(), &json, &err, options);
                return Err(RetrieverError::unparseable(&id.to_string()));
            },
        };

        self.populate_children(&mut resource, options, listings).await;
        Ok(resource)
    }

    // Walk down the ownership tree.  Failures here only cost us this branch's descendants for
    // the current tick; the parent is still reported.
    #[async_recursion]
    async fn populate_children(&self, parent: &mut Resource, options: &Options, listings: &mut ChildListings) {
        let Some(child_kind) = parent.supported_kind().and_then(|kind| kind.child()) else {
            return;
        };

        let candidates = self.list_kind(child_kind, &parent.namespace, options, listings).await;
        let mut children: Vec<_> = candidates
            .into_iter()
            .filter(|child| child.gvk == *child_kind.gvk() && child.is_owned_by(parent))
            .collect();

        for child in children.iter_mut() {
            self.populate_children(child, options, listings).await;
        }
        parent.children = children;
    }

    async fn list_kind(
        &self,
        kind: SupportedKind,
        namespace: &str,
        options: &Options,
        listings: &mut ChildListings,
    ) -> Vec<Resource> {
        let key = (kind, namespace.to_string());
        if let Some(listed) = listings.get(&key) {
            return listed.clone();
        }

        let kind_name = &kind.gvk().kind;
        let listed = match self.kubectl.get_all(kind_name, namespace).await {
            Some(json) => match Resource::list_from_json(&json, options) {
                Ok(resources) => resources,
                Err(err) => {
                    log_parse_error(&format!("{kind_name} list in {namespace}"), &json, &err, options);
                    vec![]
                },
            },
            None => {
                debug!("could not list {kind_name} in {namespace}");
                vec![]
            },
        };

        listings.insert(key, listed.clone());
        listed
    }
}

// Raw kubectl output can carry things operators would rather not see in deployment logs, so it's
// only printed when they've explicitly asked for it.
fn log_parse_error(what: &str, raw: &str, err: &anyhow::Error, options: &Options) {
    if options.print_verbose_kubectl_output_on_error {
        // Debug-formatted so multi-line output stays inside the one event
        warn!(raw = ?raw, "failed to parse kubectl output for {what}: {err}");
    } else {
        warn!(
            "failed to parse kubectl output for {what}: {err}; \
                set printVerboseKubectlOutputOnError to include the raw output in the logs"
        );
    }
}

#[async_trait]
impl ResourceRetriever for KubectlResourceRetriever {
    async fn get_all_resources(&self, ids: &[ResourceIdentifier], options: &Options) -> Vec<anyhow::Result<Resource>> {
        let mut listings = ChildListings::new();
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            results.push(self.get_resource(id, options, &mut listings).await);
        }
        results
    }
}
