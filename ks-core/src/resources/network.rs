use super::*;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub cluster_ip: Option<String>,
    pub external_ips: Vec<String>,
    pub ports: Vec<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSliceDetails {
    pub address_type: String,
    pub ports: Vec<String>,
    pub endpoints: Vec<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressDetails {
    pub class: Option<String>,
    pub hosts: Vec<String>,
    pub address: Vec<String>,
}

// kubectl-style "80:30080/TCP"
fn format_service_port(port: &corev1::ServicePort) -> String {
    let protocol = port.protocol.as_deref().unwrap_or("TCP");
    match port.node_port {
        Some(node_port) => format!("{}:{node_port}/{protocol}", port.port),
        None => format!("{}/{protocol}", port.port),
    }
}

impl ResourceStatusExt for corev1::Service {
    fn status_and_details(&self, _: &Options) -> (ResourceStatus, ResourceDetails) {
        let spec = self.spec.as_ref();
        let mut external_ips: Vec<String> = spec.and_then(|s| s.external_ips.clone()).unwrap_or_default();
        let ingress = self
            .status
            .as_ref()
            .and_then(|s| s.load_balancer.as_ref())
            .and_then(|lb| lb.ingress.as_ref());
        external_ips.extend(ingress.into_iter().flatten().filter_map(|i| i.ip.clone().or(i.hostname.clone())));

        let details = ServiceDetails {
            type_: spec.and_then(|s| s.type_.clone()).unwrap_or_else(|| "ClusterIP".into()),
            cluster_ip: spec.and_then(|s| s.cluster_ip.clone()),
            external_ips,
            ports: spec.and_then(|s| s.ports.as_ref()).into_iter().flatten().map(format_service_port).collect(),
        };
        (ResourceStatus::Successful, ResourceDetails::Service(details))
    }
}

impl ResourceStatusExt for discoveryv1::EndpointSlice {
    fn status_and_details(&self, _: &Options) -> (ResourceStatus, ResourceDetails) {
        let ports = self
            .ports
            .iter()
            .flatten()
            .filter_map(|p| p.port.map(|port| format!("{port}/{}", p.protocol.as_deref().unwrap_or("TCP"))))
            .collect();
        let endpoints = self.endpoints.iter().flat_map(|e| e.addresses.iter().cloned()).collect();

        let details = EndpointSliceDetails { address_type: self.address_type.clone(), ports, endpoints };
        (ResourceStatus::Successful, ResourceDetails::EndpointSlice(details))
    }
}

impl ResourceStatusExt for networkingv1::Ingress {
    fn status_and_details(&self, _: &Options) -> (ResourceStatus, ResourceDetails) {
        let spec = self.spec.as_ref();
        let hosts = spec
            .and_then(|s| s.rules.as_ref())
            .into_iter()
            .flatten()
            .filter_map(|r| r.host.clone())
            .collect();
        let address = self
            .status
            .as_ref()
            .and_then(|s| s.load_balancer.as_ref())
            .and_then(|lb| lb.ingress.as_ref())
            .into_iter()
            .flatten()
            .filter_map(|i| i.ip.clone().or(i.hostname.clone()))
            .collect();

        let details = IngressDetails {
            class: spec.and_then(|s| s.ingress_class_name.clone()),
            hosts,
            address,
        };
        (ResourceStatus::Successful, ResourceDetails::Ingress(details))
    }
}
