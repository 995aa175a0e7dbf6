mod apply_test;
mod args_test;

use clap::Parser;
use rstest::*;

use super::*;
