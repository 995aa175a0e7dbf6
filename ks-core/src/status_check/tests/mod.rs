mod running_test;

use rstest::*;

use super::*;
use crate::testutils::*;
