mod container_state;
mod gvk;
mod identifier;
mod kubectl;

pub use container_state::*;
pub use gvk::*;
pub use identifier::*;
pub use kubectl::*;

use crate::errors::*;
use crate::prelude::*;

err_impl! {KubernetesError,
    #[error("malformed apiVersion: {0}")]
    MalformedApiVersion(String),

    #[error("malformed container state: {0:?}")]
    MalformedContainerState(corev1::ContainerState),

    #[error("kubectl executable not found: {0}")]
    KubectlNotFound(String),

    #[error("kubectl is not usable: {0}")]
    KubectlUnusable(String),
}

#[cfg(test)]
mod tests;
