use super::*;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapDetails {
    pub data: usize,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub data: usize,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeClaimDetails {
    pub phase: String,
    pub volume: Option<String>,
    pub capacity: Option<String>,
    pub access_modes: Vec<String>,
    pub storage_class: Option<String>,
}

// Only key counts are reported; values never leave the cluster
impl ResourceStatusExt for corev1::ConfigMap {
    fn status_and_details(&self, _: &Options) -> (ResourceStatus, ResourceDetails) {
        let data = self.data.as_ref().map_or(0, |d| d.len()) + self.binary_data.as_ref().map_or(0, |d| d.len());
        (ResourceStatus::Successful, ResourceDetails::ConfigMap(ConfigMapDetails { data }))
    }
}

impl ResourceStatusExt for corev1::Secret {
    fn status_and_details(&self, _: &Options) -> (ResourceStatus, ResourceDetails) {
        let details = SecretDetails {
            type_: self.type_.clone().unwrap_or_else(|| "Opaque".into()),
            data: self.data.as_ref().map_or(0, |d| d.len()) + self.string_data.as_ref().map_or(0, |d| d.len()),
        };
        (ResourceStatus::Successful, ResourceDetails::Secret(details))
    }
}

impl ResourceStatusExt for corev1::PersistentVolumeClaim {
    fn status_and_details(&self, _: &Options) -> (ResourceStatus, ResourceDetails) {
        let spec = self.spec.as_ref();
        let pvc_status = self.status.as_ref();
        let phase = pvc_status.and_then(|s| s.phase.clone()).unwrap_or_else(|| "Pending".into());

        let details = PersistentVolumeClaimDetails {
            phase: phase.clone(),
            volume: spec.and_then(|s| s.volume_name.clone()),
            capacity: pvc_status
                .and_then(|s| s.capacity.as_ref())
                .and_then(|c| c.get("storage"))
                .map(|q| q.0.clone()),
            access_modes: pvc_status.and_then(|s| s.access_modes.clone()).unwrap_or_default(),
            storage_class: spec.and_then(|s| s.storage_class_name.clone()),
        };

        let status = match phase.as_str() {
            "Bound" => ResourceStatus::Successful,
            "Lost" => ResourceStatus::Failed,
            _ => ResourceStatus::InProgress,
        };
        (status, ResourceDetails::PersistentVolumeClaim(details))
    }
}
