use std::fmt;
use std::ops::Deref;

use kube::core::GroupVersionKind;
use serde::{
    Deserialize,
    Serialize,
};

use super::*;

// GVK wraps kube's GroupVersionKind so that it can be built from (and written back out as) the
// `apiVersion` + `kind` pair that manifests and `kubectl` output carry.  On the wire it looks like
// `{"apiVersion": "apps/v1", "kind": "Deployment"}`.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "TypeRef", into = "TypeRef")]
pub struct GVK(GroupVersionKind);

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct TypeRef {
    api_version: String,
    kind: String,
}

impl GVK {
    pub fn new(group: &str, version: &str, kind: &str) -> GVK {
        GVK(GroupVersionKind::gvk(group, version, kind))
    }

    // `apiVersion` is either `group/version`, or a bare `version` for the core group
    pub fn from_api_version(api_version: &str, kind: &str) -> anyhow::Result<GVK> {
        let (group, version) = api_version.split_once('/').unwrap_or(("", api_version));
        if version.is_empty() || version.contains('/') {
            return Err(KubernetesError::malformed_api_version(api_version));
        }
        Ok(GVK::new(group, version, kind))
    }
}

impl Deref for GVK {
    type Target = GroupVersionKind;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Printed as `apps/v1.Deployment`, or `v1.Pod` for the core group
impl fmt::Display for GVK {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.api_version(), self.kind)
    }
}

impl TryFrom<TypeRef> for GVK {
    type Error = anyhow::Error;

    fn try_from(type_ref: TypeRef) -> anyhow::Result<GVK> {
        GVK::from_api_version(&type_ref.api_version, &type_ref.kind)
    }
}

impl From<GVK> for TypeRef {
    fn from(gvk: GVK) -> TypeRef {
        TypeRef { api_version: gvk.api_version(), kind: gvk.0.kind }
    }
}

#[cfg(test)]
mod test {
    use assertables::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn test_display() {
        assert_eq!(GVK::new("apps", "v1", "Deployment").to_string(), "apps/v1.Deployment");
        assert_eq!(GVK::new("", "v1", "Pod").to_string(), "v1.Pod");
    }

    #[rstest]
    fn test_serialize() {
        let json = serde_json::to_value(GVK::new("apps", "v1", "Deployment")).unwrap();
        assert_eq!(json, serde_json::json!({"apiVersion": "apps/v1", "kind": "Deployment"}));
    }

    #[rstest]
    fn test_deserialize() {
        let gvk: GVK = serde_json::from_str(r#"{"apiVersion": "v1", "kind": "Pod"}"#).unwrap();
        assert_eq!(gvk, GVK::new("", "v1", "Pod"));

        assert_err!(serde_json::from_str::<GVK>(r#"{"apiVersion": "a/b/c", "kind": "Pod"}"#));
        assert_err!(serde_json::from_str::<GVK>(r#"{"kind": "Pod"}"#));
    }

    #[rstest]
    #[case::core("v1", "Service", GVK::new("", "v1", "Service"))]
    #[case::grouped("networking.k8s.io/v1", "Ingress", GVK::new("networking.k8s.io", "v1", "Ingress"))]
    fn test_from_api_version(#[case] api_version: &str, #[case] kind: &str, #[case] expected: GVK) {
        let gvk = GVK::from_api_version(api_version, kind).unwrap();
        assert_eq!(gvk, expected);
        assert_eq!(gvk.api_version(), api_version);
    }

    #[rstest]
    #[case::empty("")]
    #[case::trailing_slash("apps/")]
    #[case::too_many_parts("a/b/c")]
    fn test_from_api_version_malformed(#[case] api_version: &str) {
        let err = GVK::from_api_version(api_version, "Thing").unwrap_err();
        assert_matches!(err.downcast::<KubernetesError>().unwrap(), KubernetesError::MalformedApiVersion(_));
    }
}
