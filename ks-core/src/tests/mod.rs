mod reporter_test;

use ks_testutils::*;
use rstest::*;
use serde_json::Value;
use tracing_test::traced_test;

use super::hook::*;
use super::reporter::*;
use super::retriever::*;
use super::status_check::*;
use super::testutils::*;
use crate::prelude::*;

fn renamed(mut obj: Value, name: &str, uid: &str) -> Value {
    obj["metadata"]["name"] = name.into();
    obj["metadata"]["uid"] = uid.into();
    obj
}
