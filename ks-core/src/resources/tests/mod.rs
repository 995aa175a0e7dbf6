mod batch_test;
mod pod_test;

use ks_testutils::*;
use rstest::*;
use serde_json::Value;

use super::*;

fn materialize(value: Value, options: Options) -> Resource {
    Resource::from_value(value, &options).unwrap()
}
