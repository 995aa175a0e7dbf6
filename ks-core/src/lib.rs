pub mod config;
pub mod constants;
pub mod errors;
pub mod hook;
pub mod k8s;
pub mod logging;
pub mod manifest;
pub mod reporter;
pub mod resources;
pub mod retriever;
pub mod status_check;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub mod prelude {
    pub use k8s_openapi::api::apps::v1 as appsv1;
    pub use k8s_openapi::api::batch::v1 as batchv1;
    pub use k8s_openapi::api::core::v1 as corev1;
    pub use k8s_openapi::api::discovery::v1 as discoveryv1;
    pub use k8s_openapi::api::networking::v1 as networkingv1;
    pub use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
    pub use kube::ResourceExt;

    pub use crate::config::{
        Options,
        StatusCheckConfig,
    };
    pub use crate::constants::*;
    pub use crate::errors::EmptyResult;
    pub use crate::k8s::{
        GVK,
        ResourceIdentifier,
    };
    pub use crate::resources::{
        Resource,
        ResourceStatus,
    };
    pub use crate::status_check::DeploymentStatus;
}

#[cfg(test)]
mod tests;
