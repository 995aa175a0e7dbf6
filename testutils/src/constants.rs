pub const TEST_NAMESPACE: &str = "test-namespace";
pub const TEST_DEPLOYMENT: &str = "the-deployment";
pub const TEST_REPLICASET: &str = "the-deployment-5d8b9c7f4";
pub const TEST_POD: &str = "the-deployment-5d8b9c7f4-x2k9p";
pub const TEST_STATEFULSET: &str = "the-statefulset";
pub const TEST_DAEMONSET: &str = "the-daemonset";
pub const TEST_JOB: &str = "the-job";
pub const TEST_CRONJOB: &str = "the-cronjob";
pub const TEST_SERVICE: &str = "the-service";
pub const TEST_CONFIGMAP: &str = "the-configmap";
pub const TEST_SECRET: &str = "the-secret";
pub const TEST_PVC: &str = "the-claim";

pub const TEST_DEPLOYMENT_UID: &str = "6a0c3a6e-0d0e-4c43-9a60-3c1c2b1f0001";
pub const TEST_REPLICASET_UID: &str = "6a0c3a6e-0d0e-4c43-9a60-3c1c2b1f0002";
pub const TEST_POD_UID: &str = "6a0c3a6e-0d0e-4c43-9a60-3c1c2b1f0003";
pub const TEST_SERVICE_UID: &str = "6a0c3a6e-0d0e-4c43-9a60-3c1c2b1f0004";
pub const TEST_JOB_UID: &str = "6a0c3a6e-0d0e-4c43-9a60-3c1c2b1f0005";
pub const TEST_CRONJOB_UID: &str = "6a0c3a6e-0d0e-4c43-9a60-3c1c2b1f0006";
